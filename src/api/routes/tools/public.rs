//! Public types for the tools API
//!
//! Tool calls take a JSON object of arguments and answer with the
//! tool's envelope, see `crate::tools::Envelope`.

pub use crate::tools::Envelope;

//! Access to the Calendar API that owns availability and appointments.

pub mod client;
pub mod types;

pub use client::{ApiError, CalendarApiClient};

pub mod auth;
pub mod oauth;
pub mod token_store;

pub use auth::{AuthOutcome, AuthStatus, GoogleAuth};
pub use token_store::{CredentialRecord, TokenStore, TokenStoreError};

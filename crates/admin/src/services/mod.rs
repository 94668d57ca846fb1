//! Admin services: password auth, credential delivery and image uploads.

pub mod auth;
pub mod credentials;
pub mod uploads;

pub use auth::AuthError;
pub use credentials::{CredentialDelivery, CredentialEntry, DeliveryError};
pub use uploads::{FsUploadStore, UploadStoreError};

pub mod client;
pub mod traits;
pub mod types;

pub use client::RestClient;
pub use traits::{CredentialProvider, ListingBackend, MemoryCredentials};
pub use types::{PropertyQuery, UploadFile};

//! Client side of the cinder paste service.
//!
//! Defines the [`StorageService`] contract the core requires from a storage
//! backend, the share-URL scheme, and the two orchestration pipelines:
//! creation (detect → envelope → generate → seal → store) and retrieval
//! (read → open → decode). The decryption key never enters a wire frame;
//! it exists only in the URL fragment this crate builds and parses.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod memory;
mod pipeline;
mod service;
mod transport;
mod url;

pub use error::ClientError;
pub use memory::InMemoryService;
pub use pipeline::{
    CreateRequest, CreatedMessage, FetchedMessage, create_message, decrypt_record, fetch_message,
};
pub use service::{ServiceError, StorageService};
pub use transport::TcpStorageClient;
pub use url::{UrlError, ViewTarget, parse_share_url, parse_view_url, share_url};

//! # rapi-client
//!
//! Client for the document-exchange REST API: report submission with
//! per-file upload sessions, message listing, receipts, downloads and
//! reference data.
//!
//! ```no_run
//! # async fn run() -> rapi_client::Result<()> {
//! use rapi_client::{Client, ClientConfig};
//!
//! let client = Client::new(ClientConfig::from_env())?;
//! let mut message = client
//!     .create_message([("report.zip.enc", b"...".to_vec())], "1-ПИ", None, None)
//!     .await?;
//! client
//!     .upload_files(&mut message, client.config().chunked_upload())
//!     .await?;
//! client.finalize_message(&message).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod reference;
pub mod transfer;
pub mod transport;

#[cfg(test)]
mod mock;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{normalize, normalize_raw, ClientError, Payload, Result};
pub use messages::MessageFilter;
pub use transfer::{plan_chunks, ByteRange, UploadMode};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportFailure};

pub use rapi_shared;

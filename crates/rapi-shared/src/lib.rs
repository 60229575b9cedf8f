//! # rapi-shared
//!
//! Domain model of the document-exchange API: messages, files, receipts and
//! reference data, the JSON wire codec they share, the static report-form
//! registry and the file-naming rules a submission batch must follow.
//!
//! Nothing here performs I/O; the `rapi-client` crate drives the protocol.

pub mod constants;
pub mod error;
pub mod models;
pub mod naming;
pub mod tasks;
pub mod types;
pub mod wire;

pub use error::{ValidationError, WireError};
pub use models::*;
pub use types::{MessageId, MessageStatus, MessageType};

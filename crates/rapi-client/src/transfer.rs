//! File content transfer: upload sessions, byte-range uploads, downloads.
//!
//! An upload opens a session on the file's repository, then PUTs the content
//! either whole or as ordered slices. Every PUT carries `Content-Range` with
//! the slice's absolute offsets. Slices go out strictly one after another,
//! since the server only accepts a slice once the previous one has landed.

use std::fmt;

use tracing::{debug, info};

use rapi_shared::constants::{DEFAULT_CHUNK_SIZE, OCTET_STREAM_CONTENT_TYPE};
use rapi_shared::{wire, File, ValidationError};

use crate::client::Client;
use crate::error::Result;
use crate::transport::{Method, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMode {
    /// The whole content in one PUT.
    #[default]
    Single,
    /// Ordered PUTs of at most `chunk_size` bytes each.
    Chunked { chunk_size: usize },
}

impl UploadMode {
    /// Chunked mode with the default slice size. A client's configured size
    /// is available through [`ClientConfig::chunked_upload`].
    ///
    /// [`ClientConfig::chunked_upload`]: crate::ClientConfig::chunked_upload
    pub fn chunked() -> Self {
        Self::Chunked {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Inclusive byte range of one transfer out of the whole content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl ByteRange {
    /// Number of bytes covered; `end` is inclusive.
    pub fn len(&self) -> u64 {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bytes {}-{}/{}", self.start, self.end, self.total)
    }
}

/// Split `total` bytes into consecutive ranges of at most `chunk_size`.
pub fn plan_chunks(total: u64, chunk_size: usize) -> std::result::Result<Vec<ByteRange>, ValidationError> {
    if total == 0 {
        return Err(ValidationError::EmptyContent);
    }
    if chunk_size == 0 {
        return Err(ValidationError::InvalidChunkSize);
    }

    let step = chunk_size as u64;
    Ok((0..total)
        .step_by(chunk_size)
        .map(|start| ByteRange {
            start,
            end: (start + step).min(total) - 1,
            total,
        })
        .collect())
}

impl<T: Transport> Client<T> {
    /// Upload a file's content and return the server's record of it.
    ///
    /// Fails before any request when the file has no content or no
    /// repository. With [`UploadMode::Chunked`] the returned record comes
    /// from the last slice's response.
    pub async fn upload(&self, file: &File, mode: UploadMode) -> Result<File> {
        let content = match file.content() {
            Some(content) if !content.is_empty() => content.clone(),
            _ => return Err(ValidationError::EmptyContent.into()),
        };
        let chunk_size = match mode {
            UploadMode::Single => content.len(),
            UploadMode::Chunked { chunk_size } => chunk_size,
        };
        let ranges = plan_chunks(content.len() as u64, chunk_size)?;
        let upload_path = file.upload_path()?;
        let session_path = file.session_path()?;

        let _ = self.execute(self.request(Method::Post, &session_path)).await?;
        debug!(file = file.name(), slices = ranges.len(), "Upload session opened");

        let mut last = None;
        for range in ranges {
            let slice = content.slice(range.start as usize..=range.end as usize);
            let request = self
                .request(Method::Put, &upload_path)
                .header("Content-Type", OCTET_STREAM_CONTENT_TYPE)
                .header("Content-Length", range.len().to_string())
                .header("Content-Range", range.to_string())
                .body(slice);
            last = Some(self.execute(request).await?);
            debug!(file = file.name(), range = %range, "Slice accepted");
        }

        let payload = last.ok_or(ValidationError::EmptyContent)?;
        let uploaded: File = wire::decode(payload.into_json()?)?;
        info!(file = uploaded.name(), id = ?uploaded.id, size = uploaded.size(), "File uploaded");
        Ok(uploaded)
    }

    /// Download a file's content into it.
    pub async fn download(&self, file: &mut File) -> Result<()> {
        let path = file.download_path()?;
        let content = self.execute_raw(self.request(Method::Get, &path)).await?;
        debug!(file = file.name(), size = content.len(), "File downloaded");
        file.set_content(content);
        Ok(())
    }
}

//! Blocking facade over the async [`crate::Client`].
//!
//! Each client owns a current-thread tokio runtime and drives one operation
//! to completion per call. Do not use it from inside another tokio runtime.

use bytes::Bytes;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

use rapi_shared::{Dictionary, File, Message, MessageId, Profile, ProfileQuota, Receipt, Task};

use crate::config::ClientConfig;
use crate::error::{Payload, Result};
use crate::messages::MessageFilter;
use crate::transfer::UploadMode;
use crate::transport::{ReqwestTransport, Transport, TransportFailure};

#[derive(Debug)]
pub struct Client<T = ReqwestTransport> {
    inner: crate::Client<T>,
    runtime: Runtime,
}

impl Client<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            inner: crate::Client::new(config)?,
            runtime: runtime()?,
        })
    }
}

fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| TransportFailure::new(format!("failed to create runtime: {err}")).into())
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self {
            inner: crate::Client::with_transport(config, transport)?,
            runtime: runtime()?,
        })
    }

    /// The async client this facade drives.
    pub fn as_async(&self) -> &crate::Client<T> {
        &self.inner
    }

    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    pub fn get_tasks(&self) -> Result<Vec<Task>> {
        self.runtime.block_on(self.inner.get_tasks())
    }

    pub fn get_profile(&self) -> Result<Profile> {
        self.runtime.block_on(self.inner.get_profile())
    }

    pub fn get_profile_quota(&self) -> Result<ProfileQuota> {
        self.runtime.block_on(self.inner.get_profile_quota())
    }

    pub fn get_dictionaries(&self) -> Result<Vec<Dictionary>> {
        self.runtime.block_on(self.inner.get_dictionaries())
    }

    pub fn get_dictionary(&self, id: Uuid) -> Result<Value> {
        self.runtime.block_on(self.inner.get_dictionary(id))
    }

    pub fn create_message<I, N, C>(
        &self,
        files: I,
        form: &str,
        title: Option<&str>,
        text: Option<&str>,
    ) -> Result<Message>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<Bytes>,
    {
        self.runtime
            .block_on(self.inner.create_message(files, form, title, text))
    }

    pub fn upload(&self, file: &File, mode: UploadMode) -> Result<File> {
        self.runtime.block_on(self.inner.upload(file, mode))
    }

    pub fn upload_files(&self, message: &mut Message, mode: UploadMode) -> Result<()> {
        self.runtime.block_on(self.inner.upload_files(message, mode))
    }

    pub fn finalize_message(&self, message: &Message) -> Result<Payload> {
        self.runtime.block_on(self.inner.finalize_message(message))
    }

    pub fn finalize_message_id(&self, id: MessageId) -> Result<Payload> {
        self.runtime.block_on(self.inner.finalize_message_id(id))
    }

    pub fn get_messages(&self, filter: &MessageFilter) -> Result<Vec<Message>> {
        self.runtime.block_on(self.inner.get_messages(filter))
    }

    pub fn get_receipts(&self, id: MessageId) -> Result<Vec<Receipt>> {
        self.runtime.block_on(self.inner.get_receipts(id))
    }

    pub fn delete_message(&self, id: MessageId) -> Result<Payload> {
        self.runtime.block_on(self.inner.delete_message(id))
    }

    pub fn download(&self, file: &mut File) -> Result<()> {
        self.runtime.block_on(self.inner.download(file))
    }
}

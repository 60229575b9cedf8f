//! Message lifecycle: create, upload, finalize, list, receipts, delete.

use bytes::Bytes;
use tracing::info;

use rapi_shared::constants::JSON_CONTENT_TYPE;
use rapi_shared::{
    default_title, naming, tasks, wire, File, Message, MessageId, MessageStatus, MessageType,
    NewMessage, Receipt, ValidationError,
};

use crate::client::Client;
use crate::error::{Payload, Result};
use crate::transfer::UploadMode;
use crate::transport::{Method, Transport};

/// Query for [`Client::get_messages`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFilter {
    /// Report form; resolved to its task id before the request.
    pub form: Option<String>,
    pub message_type: Option<MessageType>,
    pub status: Option<MessageStatus>,
    /// 1-based page number.
    pub page: u32,
}

impl Default for MessageFilter {
    fn default() -> Self {
        Self {
            form: None,
            message_type: None,
            status: None,
            page: 1,
        }
    }
}

impl MessageFilter {
    pub fn form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }

    pub fn message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = Some(message_type);
        self
    }

    pub fn status(mut self, status: MessageStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Query pairs in wire order: `Page`, `Task`, `Type`, `Status`.
    pub fn to_query(&self) -> std::result::Result<Vec<(String, String)>, ValidationError> {
        let mut query = vec![("Page".to_string(), self.page.to_string())];
        if let Some(form) = &self.form {
            query.push(("Task".to_string(), tasks::resolve(form)?.to_string()));
        }
        if let Some(message_type) = self.message_type {
            query.push(("Type".to_string(), message_type.as_str().to_string()));
        }
        if let Some(status) = &self.status {
            query.push(("Status".to_string(), status.as_str().to_string()));
        }
        Ok(query)
    }
}

impl<T: Transport> Client<T> {
    /// Create a draft message for `form` holding the given files.
    ///
    /// The form and the file names are checked before anything is sent.
    /// The returned message keeps the caller's content and carries the
    /// server-assigned identifiers and repositories, ready for
    /// [`Client::upload_files`].
    pub async fn create_message<I, N, C>(
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
        let task = tasks::resolve(form)?;
        let files: Vec<File> = files
            .into_iter()
            .map(|(name, content)| File::new(name, content))
            .collect();
        naming::validate_batch(files.iter().map(File::name))?;

        let title = title.map_or_else(|| default_title(form), str::to_string);
        let body = wire::encode(&NewMessage::new(task, &title, text, &files))?;
        let request = self
            .request(Method::Post, "/messages")
            .header("Content-Type", JSON_CONTENT_TYPE)
            .body(body.to_string());

        let created: Message = wire::decode(self.execute(request).await?.into_json()?)?;
        let mut message = Message::draft(form, task, title, text.unwrap_or_default().to_string(), files);
        message.refill(created);

        info!(form, task, id = ?message.id, files = message.files.len(), "Message created");
        Ok(message)
    }

    /// Upload every file of `message` in order, refilling each result.
    ///
    /// Stops at the first failure; files already uploaded stay refilled.
    pub async fn upload_files(&self, message: &mut Message, mode: UploadMode) -> Result<()> {
        for index in 0..message.files.len() {
            let uploaded = self.upload(&message.files[index], mode).await?;
            message.refill_files(vec![uploaded]);
        }
        Ok(())
    }

    /// Send a draft for processing.
    pub async fn finalize_message(&self, message: &Message) -> Result<Payload> {
        let id = message.id.ok_or(ValidationError::MissingIdentifier)?;
        self.finalize_message_id(id).await
    }

    pub async fn finalize_message_id(&self, id: MessageId) -> Result<Payload> {
        let payload = self
            .execute(self.request(Method::Post, &format!("/messages/{id}")))
            .await?;
        info!(%id, "Message finalized");
        Ok(payload)
    }

    pub async fn get_messages(&self, filter: &MessageFilter) -> Result<Vec<Message>> {
        let mut request = self.request(Method::Get, "/messages");
        request.query = filter.to_query()?;
        self.fetch_list(request).await
    }

    pub async fn get_receipts(&self, id: MessageId) -> Result<Vec<Receipt>> {
        self.fetch_list(self.request(Method::Get, &format!("/messages/{id}/receipts")))
            .await
    }

    pub async fn delete_message(&self, id: MessageId) -> Result<Payload> {
        let payload = self
            .execute(self.request(Method::Delete, &format!("/messages/{id}")))
            .await?;
        info!(%id, "Message deleted");
        Ok(payload)
    }
}

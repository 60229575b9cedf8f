//! Domain entities exchanged with the document-exchange API.
//!
//! Every struct derives `Serialize` and `Deserialize` against the server's
//! PascalCase wire keys. See [`crate::wire`] for the presence policy.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::constants::{REPOSITORY_TYPE_HTTP, UPLOAD_SESSION_SEGMENT, DOWNLOAD_SEGMENT};
use crate::error::ValidationError;
use crate::naming;
use crate::types::{MessageId, MessageStatus};
use crate::wire;

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Storage endpoint the server designates for a file's content.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    #[serde(rename = "RepositoryType", default, deserialize_with = "wire::nullable")]
    pub kind: String,
    #[serde(rename = "Host", default, deserialize_with = "wire::nullable")]
    pub host: String,
    #[serde(rename = "Port", default, deserialize_with = "wire::nullable")]
    pub port: u16,
    #[serde(rename = "Path", default, deserialize_with = "wire::nullable")]
    pub path: String,
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

/// One attachment of a message or receipt.
///
/// `encrypted` and `signed_file` are derived from the name when the caller
/// builds a file and are never recomputed. `size` always equals the content
/// length while content is present.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct File {
    #[serde(rename = "Name", default, deserialize_with = "wire::nullable")]
    name: String,
    #[serde(skip)]
    content: Option<Bytes>,
    #[serde(rename = "Size", default, deserialize_with = "wire::nullable")]
    size: u64,
    #[serde(rename = "Encrypted", default, deserialize_with = "wire::nullable")]
    encrypted: bool,
    #[serde(rename = "SignedFile", default)]
    signed_file: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Id", default, deserialize_with = "wire::optional_id")]
    pub id: Option<Uuid>,
    #[serde(rename = "RepositoryInfo", default, deserialize_with = "wire::nullable")]
    pub repository: Vec<Repository>,
}

impl File {
    /// Build an outbound file from its name and content.
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content = content.into();
        Self {
            encrypted: naming::is_encrypted(&name),
            signed_file: naming::signature_target(&name),
            size: content.len() as u64,
            content: Some(content),
            name,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    pub fn signed_file(&self) -> Option<&str> {
        self.signed_file.as_deref()
    }

    pub fn content(&self) -> Option<&Bytes> {
        self.content.as_ref()
    }

    /// Replace the content, keeping `size` in step with it.
    pub fn set_content(&mut self, content: impl Into<Bytes>) {
        let content = content.into();
        self.size = content.len() as u64;
        self.content = Some(content);
    }

    pub fn take_content(&mut self) -> Option<Bytes> {
        self.content.take()
    }

    /// Path content is uploaded to: the first repository path without its
    /// last segment, always rooted.
    pub fn upload_path(&self) -> Result<String, ValidationError> {
        let repository = self
            .repository
            .first()
            .ok_or_else(|| ValidationError::NoRepository(self.name.clone()))?;
        let parent = match repository.path.rsplit_once('/') {
            Some((parent, _)) => parent,
            None => repository.path.as_str(),
        };
        if parent.starts_with('/') {
            Ok(parent.to_string())
        } else {
            Ok(format!("/{parent}"))
        }
    }

    pub fn session_path(&self) -> Result<String, ValidationError> {
        Ok(format!("{}/{UPLOAD_SESSION_SEGMENT}", self.upload_path()?))
    }

    pub fn download_path(&self) -> Result<String, ValidationError> {
        Ok(format!("{}/{DOWNLOAD_SEGMENT}", self.upload_path()?))
    }

    /// Merge server-side metadata for the same file into this one.
    ///
    /// Server-assigned fields (identifier, repositories, description) are
    /// taken from `incoming`; name, content and the derived flags stay.
    pub fn refill(&mut self, incoming: File) {
        if incoming.id.is_some() {
            self.id = incoming.id;
        }
        if !incoming.repository.is_empty() {
            self.repository = incoming.repository;
        }
        if incoming.description.is_some() {
            self.description = incoming.description;
        }
        if self.content.is_none() {
            self.size = incoming.size;
        }
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("has_content", &self.content.is_some())
            .field("encrypted", &self.encrypted)
            .field("signed_file", &self.signed_file)
            .field("description", &self.description)
            .field("id", &self.id)
            .field("repository", &self.repository)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Receipt
// ---------------------------------------------------------------------------

/// Status event attached to a message after transmission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Receipt {
    #[serde(rename = "Id", default, deserialize_with = "wire::optional_id")]
    pub id: Option<Uuid>,
    #[serde(rename = "ReceiveTime", default, deserialize_with = "wire::optional_timestamp")]
    pub receive_time: Option<DateTime<Utc>>,
    #[serde(rename = "StatusTime", default, deserialize_with = "wire::optional_timestamp")]
    pub status_time: Option<DateTime<Utc>>,
    #[serde(rename = "Status", default)]
    pub status: MessageStatus,
    #[serde(rename = "Message", default, deserialize_with = "wire::nullable")]
    pub message: String,
    #[serde(rename = "Files", default, deserialize_with = "wire::nullable")]
    pub files: Vec<File>,
}

// ---------------------------------------------------------------------------
// Sender
// ---------------------------------------------------------------------------

/// Organisation that sent an inbound message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sender {
    #[serde(rename = "Inn", default)]
    pub inn: Option<String>,
    #[serde(rename = "Ogrn", default)]
    pub ogrn: Option<String>,
    #[serde(rename = "Bik", default)]
    pub bik: Option<String>,
    #[serde(rename = "RegNum", default)]
    pub reg_num: Option<String>,
    #[serde(rename = "DivisionCode", default)]
    pub division_code: Option<String>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A unit of correspondence with its files and receipts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Report form this message was created from. Client-side only.
    #[serde(skip)]
    pub form: Option<String>,
    #[serde(rename = "Id", default, deserialize_with = "wire::optional_id")]
    pub id: Option<MessageId>,
    #[serde(rename = "CorrelationId", default, deserialize_with = "wire::optional_id")]
    pub correlation_id: Option<MessageId>,
    #[serde(rename = "GroupId", default, deserialize_with = "wire::optional_id")]
    pub group_id: Option<Uuid>,
    #[serde(rename = "Type", default)]
    pub message_type: Option<String>,
    #[serde(rename = "Title", default, deserialize_with = "wire::nullable")]
    pub title: String,
    #[serde(rename = "Text", default, deserialize_with = "wire::nullable")]
    pub text: String,
    #[serde(rename = "TaskName", default, deserialize_with = "wire::nullable")]
    pub task: String,
    #[serde(rename = "CreationDate", default, deserialize_with = "wire::optional_timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "UpdatedDate", default, deserialize_with = "wire::optional_timestamp")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(rename = "Status", default)]
    pub status: MessageStatus,
    #[serde(rename = "RegNumber", default)]
    pub reg_number: Option<String>,
    #[serde(rename = "TotalSize", default, deserialize_with = "wire::nullable")]
    pub total_size: u64,
    #[serde(rename = "Sender", default)]
    pub sender: Option<Sender>,
    #[serde(rename = "Files", default, deserialize_with = "wire::nullable")]
    pub files: Vec<File>,
    #[serde(rename = "Receipts", default, deserialize_with = "wire::nullable")]
    pub receipts: Vec<Receipt>,
}

impl Message {
    /// A local draft holding the caller's files before the server knows it.
    pub fn draft(form: &str, task: &str, title: String, text: String, files: Vec<File>) -> Self {
        let total_size = files.iter().map(File::size).sum();
        Self {
            form: Some(form.to_string()),
            task: task.to_string(),
            title,
            text,
            total_size,
            files,
            ..Self::default()
        }
    }

    pub fn file(&self, name: &str) -> Option<&File> {
        self.files.iter().find(|f| f.name() == name)
    }

    pub fn file_mut(&mut self, name: &str) -> Option<&mut File> {
        self.files.iter_mut().find(|f| f.name() == name)
    }

    /// Merge a server-side view of this message into it.
    ///
    /// Scalars present in `incoming` replace local values; a `Draft` status
    /// counts as absent. Files follow [`Message::refill_files`]. Receipts are
    /// replaced when the server sent any.
    pub fn refill(&mut self, incoming: Message) {
        let Message {
            form: _,
            id,
            correlation_id,
            group_id,
            message_type,
            title,
            text,
            task,
            created,
            updated,
            status,
            reg_number,
            total_size,
            sender,
            files,
            receipts,
        } = incoming;

        self.id = id.or(self.id);
        self.correlation_id = correlation_id.or(self.correlation_id);
        self.group_id = group_id.or(self.group_id);
        self.message_type = message_type.or(self.message_type.take());
        self.created = created.or(self.created);
        self.updated = updated.or(self.updated);
        self.reg_number = reg_number.or(self.reg_number.take());
        self.sender = sender.or(self.sender.take());
        // an absent status decodes to the default and must not erase a known one
        if status != MessageStatus::default() {
            self.status = status;
        }
        if !title.is_empty() {
            self.title = title;
        }
        if !text.is_empty() {
            self.text = text;
        }
        if !task.is_empty() {
            self.task = task;
        }
        if total_size > 0 {
            self.total_size = total_size;
        }
        if !receipts.is_empty() {
            self.receipts = receipts;
        }
        self.refill_files(files);
    }

    /// Match incoming file records to local files by name.
    ///
    /// An empty local list takes every incoming record. Otherwise only files
    /// already present are enriched; unmatched records are dropped.
    pub fn refill_files(&mut self, incoming: Vec<File>) {
        if self.files.is_empty() {
            self.files = incoming;
            return;
        }
        for record in incoming {
            if let Some(local) = self.file_mut(&record.name) {
                local.refill(record);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound payloads
// ---------------------------------------------------------------------------

/// File entry of a message-creation request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewFile<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Encrypted")]
    pub encrypted: bool,
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "SignedFile")]
    pub signed_file: Option<&'a str>,
    #[serde(rename = "RepositoryType")]
    pub repository_type: &'static str,
}

impl<'a> From<&'a File> for NewFile<'a> {
    fn from(file: &'a File) -> Self {
        Self {
            name: file.name(),
            encrypted: file.is_encrypted(),
            size: file.size(),
            signed_file: file.signed_file(),
            repository_type: REPOSITORY_TYPE_HTTP,
        }
    }
}

/// Body of `POST /messages`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewMessage<'a> {
    #[serde(rename = "Task")]
    pub task: &'a str,
    #[serde(rename = "Title")]
    pub title: &'a str,
    #[serde(rename = "Text")]
    pub text: Option<&'a str>,
    #[serde(rename = "Files")]
    pub files: Vec<NewFile<'a>>,
}

impl<'a> NewMessage<'a> {
    pub fn new(task: &'a str, title: &'a str, text: Option<&'a str>, files: &'a [File]) -> Self {
        Self {
            task,
            title,
            text,
            files: files.iter().map(NewFile::from).collect(),
        }
    }
}

/// Default title for a report when the caller gives none.
pub fn default_title(form: &str) -> String {
    format!("Отчет {form}")
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

/// A submittable report type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    #[serde(rename = "Code", default, deserialize_with = "wire::nullable")]
    pub code: String,
    #[serde(rename = "Name", default, deserialize_with = "wire::nullable")]
    pub name: String,
    #[serde(rename = "Description", default, deserialize_with = "wire::nullable")]
    pub description: String,
    #[serde(rename = "Direction", default, deserialize_with = "wire::nullable")]
    pub direction: String,
    #[serde(rename = "AllowAspera", default, deserialize_with = "wire::nullable")]
    pub allow_aspera: bool,
    #[serde(rename = "AllowLinkedMessages", default, deserialize_with = "wire::nullable")]
    pub allow_linked_messages: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupervisionDivision {
    #[serde(rename = "Name", default, deserialize_with = "wire::nullable")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    #[serde(rename = "ShortName", default, deserialize_with = "wire::nullable")]
    pub short_name: String,
    #[serde(rename = "FullName", default, deserialize_with = "wire::nullable")]
    pub full_name: String,
    // the server spells this key "Devision"
    #[serde(rename = "SupervisionDevision", default)]
    pub supervision_division: Option<SupervisionDivision>,
}

/// Account profile of the authenticated organisation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    #[serde(rename = "ShortName", default, deserialize_with = "wire::nullable")]
    pub short_name: String,
    #[serde(rename = "FullName", default, deserialize_with = "wire::nullable")]
    pub full_name: String,
    #[serde(rename = "Activities", default, deserialize_with = "wire::nullable")]
    pub activities: Vec<Activity>,
    #[serde(rename = "Inn", default)]
    pub inn: Option<String>,
    #[serde(rename = "Ogrn", default)]
    pub ogrn: Option<String>,
    #[serde(rename = "InternationalId", default)]
    pub international_id: Option<String>,
    #[serde(rename = "Opf", default)]
    pub opf: Option<String>,
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "Phone", default)]
    pub phone: Option<String>,
    #[serde(rename = "CreationDate", default, deserialize_with = "wire::optional_timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "Status", default, deserialize_with = "wire::nullable")]
    pub status: String,
}

/// Storage quota of the account, in bytes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileQuota {
    #[serde(rename = "TotalQuota", default, deserialize_with = "wire::nullable")]
    pub total: u64,
    #[serde(rename = "UsedQuota", default, deserialize_with = "wire::nullable")]
    pub used: u64,
    #[serde(rename = "MessageSize", default, deserialize_with = "wire::nullable")]
    pub message_size: u64,
}

/// Entry of the dictionary catalogue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dictionary {
    #[serde(rename = "Id", default, deserialize_with = "wire::optional_id")]
    pub id: Option<Uuid>,
    #[serde(rename = "Text", default, deserialize_with = "wire::nullable")]
    pub text: String,
    #[serde(rename = "Date", default, deserialize_with = "wire::optional_timestamp")]
    pub date: Option<DateTime<Utc>>,
}

/// Error body the server returns with a failed status.
///
/// Unlike the entities above, every key is required: a body missing one of
/// them is not a server error document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    #[serde(rename = "HTTPStatus")]
    pub status: u16,
    #[serde(rename = "ErrorCode")]
    pub error_code: String,
    #[serde(rename = "ErrorMessage")]
    pub error_message: String,
    #[serde(rename = "MoreInfo", default)]
    pub more_info: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server_file(name: &str, id: &str) -> Value {
        json!({
            "Name": name,
            "Size": 11,
            "Encrypted": true,
            "SignedFile": null,
            "Description": null,
            "Id": id,
            "RepositoryInfo": [{
                "RepositoryType": "http",
                "Host": "portal5.cbr.ru",
                "Port": 81,
                "Path": format!("back/rapi2/messages/89f43940-5a3f-4343-a550-d0f0d2152ff5/files/{id}/{name}")
            }]
        })
    }

    #[test]
    fn test_file_new_derives_flags() {
        let enc = File::new("report.zip.enc", &b"report data"[..]);
        assert!(enc.is_encrypted());
        assert_eq!(enc.size(), 11);
        assert_eq!(enc.signed_file(), None);

        let sig = File::new("report.zip.1.sig", &b"sign"[..]);
        assert!(!sig.is_encrypted());
        assert_eq!(sig.signed_file(), Some("report.zip.enc"));
    }

    #[test]
    fn test_set_content_keeps_size() {
        let mut file = File::default();
        file.set_content(&b"abc"[..]);
        assert_eq!(file.size(), 3);
        assert_eq!(file.content().map(|c| c.len()), Some(3));
    }

    #[test]
    fn test_decode_file_with_missing_keys() {
        let file: File = wire::decode(json!({"Name": "a"})).unwrap();
        assert_eq!(file.name(), "a");
        assert_eq!(file.size(), 0);
        assert!(file.id.is_none());
        assert!(file.repository.is_empty());

        let file: File = wire::decode(json!({"Name": null, "Id": "", "RepositoryInfo": null})).unwrap();
        assert_eq!(file.name(), "");
        assert!(file.id.is_none());
    }

    #[test]
    fn test_file_paths() {
        let id = "e9a30113-6b20-45c8-a923-69f448757655";
        let file: File = wire::decode(server_file("report.zip.enc", id)).unwrap();
        let base = format!("/back/rapi2/messages/89f43940-5a3f-4343-a550-d0f0d2152ff5/files/{id}");
        assert_eq!(file.upload_path().unwrap(), base);
        assert_eq!(file.session_path().unwrap(), format!("{base}/createUploadSession"));
        assert_eq!(file.download_path().unwrap(), format!("{base}/download"));
    }

    #[test]
    fn test_file_without_repository_has_no_paths() {
        let file = File::new("a.enc", &b"x"[..]);
        assert_eq!(
            file.upload_path().unwrap_err(),
            ValidationError::NoRepository("a.enc".into())
        );
    }

    #[test]
    fn test_payload_roundtrip_preserves_name_flags_size() {
        let files = vec![File::new("report.zip.enc", &b"report data"[..])];
        let payload = wire::encode(&NewMessage::new("Zadacha_61", "t", None, &files)).unwrap();

        let mut echoed = payload["Files"][0].clone();
        echoed["Id"] = json!("e9a30113-6b20-45c8-a923-69f448757655");
        let decoded: File = wire::decode(echoed).unwrap();

        assert_eq!(decoded.name(), files[0].name());
        assert_eq!(decoded.is_encrypted(), files[0].is_encrypted());
        assert_eq!(decoded.size(), files[0].size());
    }

    #[test]
    fn test_new_message_payload_shape() {
        let files = vec![File::new("report.zip.enc", &b"report data"[..])];
        let payload = wire::encode(&NewMessage::new("Zadacha_61", "Отчет 1-ПИ", None, &files)).unwrap();
        assert_eq!(
            payload,
            json!({
                "Task": "Zadacha_61",
                "Title": "Отчет 1-ПИ",
                "Text": null,
                "Files": [{
                    "Name": "report.zip.enc",
                    "Encrypted": true,
                    "Size": 11,
                    "SignedFile": null,
                    "RepositoryType": "http"
                }]
            })
        );
    }

    #[test]
    fn test_refill_matches_by_name_only() {
        let mut msg = Message::draft(
            "1-ПИ",
            "Zadacha_61",
            "t".into(),
            String::new(),
            vec![File::new("a.enc", &b"aaa"[..]), File::new("b.enc", &b"bbbb"[..])],
        );
        let before_b = msg.file("b.enc").cloned().unwrap();

        let id_a = "e9a30113-6b20-45c8-a923-69f448757655";
        let incoming: Message = wire::decode(json!({
            "Id": "89f43940-5a3f-4343-a550-d0f0d2152ff5",
            "Status": "draft",
            "Files": [server_file("a.enc", id_a), server_file("c.enc", id_a)]
        }))
        .unwrap();
        msg.refill(incoming);

        let a = msg.file("a.enc").unwrap();
        assert_eq!(a.id.map(|id| id.to_string()).as_deref(), Some(id_a));
        assert_eq!(a.repository.len(), 1);
        assert_eq!(a.size(), 3);
        assert_eq!(a.content().map(|c| c.as_ref()), Some(&b"aaa"[..]));

        assert_eq!(msg.file("b.enc"), Some(&before_b));
        assert!(msg.file("c.enc").is_none());
        assert_eq!(msg.files.len(), 2);
        assert!(msg.id.is_some());
        assert_eq!(msg.form.as_deref(), Some("1-ПИ"));
    }

    #[test]
    fn test_refill_without_status_keeps_known_status() {
        let mut msg = Message {
            status: MessageStatus::Sent,
            title: "old".into(),
            ..Message::default()
        };
        msg.refill(wire::decode(json!({"Title": "x"})).unwrap());
        assert_eq!(msg.status, MessageStatus::Sent);
        assert_eq!(msg.title, "x");

        msg.refill(wire::decode(json!({"Status": null})).unwrap());
        assert_eq!(msg.status, MessageStatus::Sent);

        msg.refill(wire::decode(json!({"Status": "registered"})).unwrap());
        assert_eq!(msg.status, MessageStatus::Registered);
    }

    #[test]
    fn test_refill_into_empty_takes_all() {
        let mut msg = Message::default();
        msg.refill_files(vec![File::new("x", &b"1"[..]), File::new("y", &b"2"[..])]);
        assert_eq!(msg.files.len(), 2);
    }

    #[test]
    fn test_decode_message_full() {
        let msg: Message = wire::decode(json!({
            "Id": "89f43940-5a3f-4343-a550-d0f0d2152ff5",
            "CorrelationId": null,
            "GroupId": "",
            "Type": "outbox",
            "Title": "Отчет 1-ПИ",
            "Text": null,
            "TaskName": "Zadacha_61",
            "CreationDate": "2021-02-03T10:11:12.345Z",
            "UpdatedDate": "2021-02-03T10:11:13Z",
            "Status": "registered",
            "RegNumber": "123",
            "TotalSize": 42,
            "Sender": {"Inn": "7700000000"},
            "Files": [],
            "Receipts": [{
                "Id": "d66c4f1f-a6e5-4996-a6fb-fbb308135585",
                "ReceiveTime": "2021-02-03T10:12:00Z",
                "StatusTime": "2021-02-03T10:12:00.123",
                "Status": "success",
                "Message": "ok",
                "Files": []
            }]
        }))
        .unwrap();
        assert_eq!(msg.status, MessageStatus::Registered);
        assert!(msg.correlation_id.is_none());
        assert!(msg.group_id.is_none());
        assert_eq!(msg.text, "");
        assert_eq!(msg.total_size, 42);
        assert_eq!(msg.receipts[0].status, MessageStatus::Success);
        assert_eq!(msg.sender.unwrap().inn.as_deref(), Some("7700000000"));
    }

    #[test]
    fn test_decode_message_bad_identifier_fails() {
        let result: Result<Message, _> = wire::decode(json!({"Id": "nope"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_profile_and_quota() {
        let profile: Profile = wire::decode(json!({
            "ShortName": "ООО Ромашка",
            "Activities": [{
                "ShortName": "КО",
                "SupervisionDevision": {"Name": "ДНСКО"}
            }],
            "Status": "Active"
        }))
        .unwrap();
        assert_eq!(profile.status, "Active");
        assert_eq!(
            profile.activities[0]
                .supervision_division
                .as_ref()
                .map(|d| d.name.as_str()),
            Some("ДНСКО")
        );

        let quota: ProfileQuota = wire::decode(json!({"UsedQuota": 142645170})).unwrap();
        assert_eq!(quota.used, 142_645_170);
        assert_eq!(quota.total, 0);
    }

    #[test]
    fn test_error_body_requires_all_keys() {
        let body: ErrorBody = wire::decode(json!({
            "HTTPStatus": 401,
            "ErrorCode": "ACCOUNT_NOT_FOUND",
            "ErrorMessage": "Аккаунт не найден",
            "MoreInfo": {}
        }))
        .unwrap();
        assert_eq!(body.status, 401);
        assert!(wire::decode::<ErrorBody>(json!({"error": "x"})).is_err());
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

// Server-assigned message identifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MessageId(pub Uuid);

impl From<Uuid> for MessageId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for MessageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status shared by messages and receipts.
///
/// Values outside the known vocabulary are kept verbatim in
/// [`MessageStatus::Unknown`] so that decoding never fails on a new status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MessageStatus {
    #[default]
    Draft,
    Sent,
    Delivered,
    Error,
    Processing,
    Registered,
    Rejected,
    New,
    Read,
    Replied,
    Success,
    Unknown(String),
}

impl MessageStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Error => "error",
            Self::Processing => "processing",
            Self::Registered => "registered",
            Self::Rejected => "rejected",
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Success => "success",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn from_wire(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "draft" => Self::Draft,
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            "error" => Self::Error,
            "processing" => Self::Processing,
            "registered" => Self::Registered,
            "rejected" => Self::Rejected,
            "new" => Self::New,
            "read" => Self::Read,
            "replied" => Self::Replied,
            "success" => Self::Success,
            _ => Self::Unknown(raw.to_string()),
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MessageStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Self::from_wire(&s)).unwrap_or_default())
    }
}

/// Mailbox direction used when listing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Inbox,
    Outbox,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Outbox => "outbox",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

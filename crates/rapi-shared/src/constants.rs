/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://portal5.cbr.ru";

/// Path prefix every API endpoint lives under
pub const API_PREFIX: &str = "/back/rapi2";

/// Default slice size for chunked uploads (64 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 65_536;

/// Default per-exchange timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Repository type requested for every outbound file
pub const REPOSITORY_TYPE_HTTP: &str = "http";

/// Name suffix of a payload that is already encrypted
pub const ENCRYPTED_SUFFIX: &str = ".enc";

/// Name suffix of a detached signature
pub const SIGNATURE_SUFFIX: &str = ".sig";

/// Name prefix of a machine-readable power of attorney (MCHD)
pub const MCHD_PREFIX: &str = "DOVER_";

/// Full fixed head of a well-formed MCHD file name
pub const MCHD_HEAD: &str = "DOVER_CBR_";

/// Error code synthesized for failed responses without a JSON error body
pub const INCORRECT_RESPONSE_CONTENT: &str = "INCORRECT_RESPONSE_CONTENT";

/// Path segment that opens an upload session for a file
pub const UPLOAD_SESSION_SEGMENT: &str = "createUploadSession";

/// Path segment that downloads a file's content
pub const DOWNLOAD_SEGMENT: &str = "download";

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

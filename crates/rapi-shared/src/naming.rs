//! File-name conventions of a submission batch.
//!
//! * `*.enc` is a payload that is already encrypted.
//! * `*.sig` is a detached signature. Ordinal signatures (`report.zip.1.sig`)
//!   sign the encrypted payload (`report.zip.enc`); any other signature signs
//!   the file named by stripping `.sig` (`doc.xml.sig` signs `doc.xml`).
//! * `DOVER_*` is a machine-readable power of attorney and must follow
//!   `DOVER_CBR_<INN>_<YYYYMMDD>_<seq>.xml[.sig]`, INN being 10 or 12 digits.

use std::collections::HashSet;

use crate::constants::{ENCRYPTED_SUFFIX, MCHD_HEAD, MCHD_PREFIX, SIGNATURE_SUFFIX};
use crate::error::ValidationError;

pub fn is_encrypted(name: &str) -> bool {
    name.ends_with(ENCRYPTED_SUFFIX)
}

pub fn is_signature(name: &str) -> bool {
    name.ends_with(SIGNATURE_SUFFIX)
}

/// Name of the file a detached signature signs, or `None` for non-signatures.
pub fn signature_target(name: &str) -> Option<String> {
    let stem = name.strip_suffix(SIGNATURE_SUFFIX)?;
    match stem.rsplit_once('.') {
        Some((base, ordinal)) if ordinal.len() == 1 && ordinal.as_bytes()[0].is_ascii_digit() => {
            Some(format!("{base}{ENCRYPTED_SUFFIX}"))
        }
        _ => Some(stem.to_string()),
    }
}

pub fn is_mchd(name: &str) -> bool {
    name.starts_with(MCHD_PREFIX)
}

pub fn matches_mchd_pattern(name: &str) -> bool {
    let base = name.strip_suffix(SIGNATURE_SUFFIX).unwrap_or(name);
    let Some(rest) = base
        .strip_prefix(MCHD_HEAD)
        .and_then(|rest| rest.strip_suffix(".xml"))
    else {
        return false;
    };

    let parts: Vec<&str> = rest.split('_').collect();
    match parts.as_slice() {
        [inn, date, seq] => {
            matches!(inn.len(), 10 | 12)
                && all_digits(inn)
                && date.len() == 8
                && all_digits(date)
                && all_digits(seq)
        }
        _ => false,
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Validate the names of one submission batch, in submission order.
///
/// Fails on the first offending name: a duplicate, a malformed MCHD name, or
/// a signature whose signed file does not appear earlier in the batch.
pub fn validate_batch<'a, I>(names: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    for name in names {
        if seen.contains(name) {
            return Err(ValidationError::DuplicateFileName(name.to_string()));
        }
        if is_mchd(name) && !matches_mchd_pattern(name) {
            return Err(ValidationError::FilenamePattern(name.to_string()));
        }
        if let Some(target) = signature_target(name) {
            if !seen.contains(target.as_str()) {
                return Err(ValidationError::MissingSignedFile(name.to_string()));
            }
        }
        seen.insert(name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &[&str] = &[
        "test_report.zip.enc",
        "test_report.zip.1.sig",
        "test_report.zip.2.sig",
        "DOVER_CBR_1234567890_20000101_1.xml",
        "DOVER_CBR_1234567890_20000101_1.xml.sig",
        "DOVER_CBR_1234567890111_20000101_1.xml",
        "DOVER_CBR_1234567890111_20000101_1.xml.sig",
    ];

    #[test]
    fn test_signature_targets() {
        assert_eq!(
            signature_target("test_report.zip.1.sig").as_deref(),
            Some("test_report.zip.enc")
        );
        assert_eq!(signature_target("doc.xml.sig").as_deref(), Some("doc.xml"));
        assert_eq!(signature_target("report.zip.enc"), None);
    }

    #[test]
    fn test_encrypted_suffix() {
        assert!(is_encrypted("report.zip.enc"));
        assert!(!is_encrypted("report.zip.enc.sig"));
        assert!(!is_encrypted("report.zip"));
    }

    #[test]
    fn test_mchd_pattern() {
        assert!(matches_mchd_pattern("DOVER_CBR_1234567890_20000101_1.xml"));
        assert!(matches_mchd_pattern("DOVER_CBR_123456789012_20000101_17.xml.sig"));
        assert!(!matches_mchd_pattern("DOVER_CBR_1234567890111_20000101_1.xml"));
        assert!(!matches_mchd_pattern("DOVER_CBR_1234567890_2000011_1.xml"));
        assert!(!matches_mchd_pattern("DOVER_XYZ_1234567890_20000101_1.xml"));
        assert!(!matches_mchd_pattern("DOVER_CBR_1234567890_20000101_.xml"));
    }

    #[test]
    fn test_valid_batch() {
        validate_batch(BATCH[..5].iter().copied()).unwrap();
    }

    #[test]
    fn test_malformed_mchd_reported_by_name() {
        let err = validate_batch(BATCH.iter().copied()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Filename DOVER_CBR_1234567890111_20000101_1.xml does not match pattern"
        );
    }

    #[test]
    fn test_signature_before_its_file_rejected() {
        let err = validate_batch(["a.zip.1.sig", "a.zip.enc"]).unwrap_err();
        assert_eq!(err, ValidationError::MissingSignedFile("a.zip.1.sig".into()));
    }

    #[test]
    fn test_orphan_signature_rejected() {
        let err = validate_batch(["report.zip.enc", "other.zip.1.sig"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Signed file for other.zip.1.sig is missing from the batch"
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = validate_batch(["a.enc", "a.enc"]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateFileName("a.enc".into()));
    }
}

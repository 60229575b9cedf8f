//! Static registry of report forms and the server tasks they submit to.
//!
//! Lookup is exact and case-sensitive. Several forms may share one task.

use crate::error::ValidationError;

const REGISTRY: &[(&str, &str)] = &[
    ("1-ПИ", "Zadacha_61"),
    ("1-ИЦБ", "Zadacha_98"),
    ("1-АРЕНДА", "Zadacha_98"),
    ("1-ПОЕЗДКИ", "Zadacha_98"),
    ("1-РОУМИНГ", "Zadacha_98"),
    ("1-ТРАНСПОРТ", "Zadacha_98"),
    ("2-ТРАНСПОРТ", "Zadacha_98"),
    ("3-ТРАНСПОРТ", "Zadacha_98"),
    ("1-МЕД", "Zadacha_98"),
];

/// Resolve a report form to its task identifier.
pub fn resolve(form: &str) -> Result<&'static str, ValidationError> {
    REGISTRY
        .iter()
        .find(|(known, _)| *known == form)
        .map(|(_, task)| *task)
        .ok_or_else(|| ValidationError::UnknownTask(form.to_string()))
}

pub fn is_known(form: &str) -> bool {
    resolve(form).is_ok()
}

/// All `(form, task)` pairs in registry order.
pub fn forms() -> impl Iterator<Item = (&'static str, &'static str)> {
    REGISTRY.iter().copied()
}

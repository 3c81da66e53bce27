//! Case-insensitive identities for courses and students.
//!
//! Every map in the directory is keyed by [`Key`], the normalized (trimmed,
//! uppercased) form of a code. Comparing keys is the only way two codes are ever
//! compared, which keeps the uniqueness rule enforceable in one place.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::core::error::{IdentField, IdentityError};

pub const MIN_IDENT_LEN: usize = 3;
pub const MAX_IDENT_LEN: usize = 10;

/// Normalized lookup key for a course code or student id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(String);

impl Key {
    /// Trim and uppercase char by char. A char whose uppercase form is more than
    /// one char (`ß`) is kept as is, so `ßAB` and `SSAB` stay distinct.
    pub fn normalize(raw: &str) -> Self {
        Key(raw.trim().chars().map(simple_uppercase).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated course code or student id.
///
/// Keeps the caller's spelling for display; equality goes through [`Key`].
#[derive(Debug, Clone)]
pub struct Ident {
    spelling: String,
    key: Key,
}

impl Ident {
    /// Trim `raw` and check it is 3-10 alphanumeric characters.
    pub fn parse(field: IdentField, raw: &str) -> Result<Self, IdentityError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::Empty { field });
        }
        let len = trimmed.chars().count();
        if !(MIN_IDENT_LEN..=MAX_IDENT_LEN).contains(&len) {
            return Err(IdentityError::Length { field, len });
        }
        if let Some(found) = trimmed.chars().find(|ch| !ch.is_alphanumeric()) {
            return Err(IdentityError::NotAlphanumeric { field, found });
        }
        Ok(Self {
            spelling: trimmed.to_string(),
            key: Key::normalize(trimmed),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.spelling
    }

    pub fn key(&self) -> &Key {
        &self.key
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Ident {}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling)
    }
}

fn simple_uppercase(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

/// Normalize a list of codes into a key set, dropping blank entries.
pub fn key_set<I, S>(codes: I) -> BTreeSet<Key>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .map(|code| Key::normalize(code.as_ref()))
        .filter(|key| !key.is_empty())
        .collect()
}

/// Like [`key_set`], but keeps the first trimmed spelling seen for each key.
pub fn spelled_keys<I, S>(codes: I) -> BTreeMap<Key, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut spelled = BTreeMap::new();
    for code in codes {
        let key = Key::normalize(code.as_ref());
        if !key.is_empty() {
            spelled
                .entry(key)
                .or_insert_with(|| code.as_ref().trim().to_string());
        }
    }
    spelled
}

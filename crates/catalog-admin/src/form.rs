//! Raw, untrusted form submissions.
//!
//! A [`FormData`] is what the caller hands to an action: named parts, each either text or an
//! uploaded file. Nothing here is validated. When a name is submitted more than once the last
//! part wins, the way a form is flattened into a record.

use serde::Deserialize;

/// An uploaded file part. Only metadata travels through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormFile {
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
}

impl FormFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size,
        }
    }
}

/// One submitted part.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    File(FormFile),
}

/// An ordered multipart submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: FormValue) {
        self.entries.push((name.into(), value));
    }

    /// Builder-style text part.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, FormValue::Text(value.into()));
        self
    }

    /// Builder-style file part.
    pub fn file(mut self, name: impl Into<String>, file: FormFile) -> Self {
        self.append(name, FormValue::File(file));
        self
    }

    /// The last part submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// The last part under `name` when it is text.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FormValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FormValue)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, FormValue)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

//! Multipart form bodies.

use crate::FetchError;

/// A file attached to a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Value of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(FilePart),
}

/// A `multipart/form-data` body.
///
/// The content type header (with its boundary) is produced by the transport,
/// so callers never set it themselves.
///
/// # Example
///
/// ```rust,ignore
/// let form = MultipartForm::new()
///     .text("name", "Acme")
///     .file("picture", "logo.png", "image/png", bytes);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<(String, PartValue)>,
}

impl MultipartForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), PartValue::Text(value.into())));
        self
    }

    /// Append a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push((
            name.into(),
            PartValue::File(FilePart {
                file_name: file_name.into(),
                content_type: content_type.into(),
                bytes: bytes.into(),
            }),
        ));
        self
    }

    /// Append a field whose value is the JSON encoding of `value`.
    pub fn json<T: serde::Serialize>(
        self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, FetchError> {
        let encoded = serde_json::to_string(value)?;
        Ok(self.text(name, encoded))
    }

    /// All fields in insertion order.
    pub fn parts(&self) -> &[(String, PartValue)] {
        &self.parts
    }

    /// First text value for `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(key, value)| match value {
            PartValue::Text(text) if key == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// First file attached under `name`.
    pub fn file_value(&self, name: &str) -> Option<&FilePart> {
        self.parts.iter().find_map(|(key, value)| match value {
            PartValue::File(file) if key == name => Some(file),
            _ => None,
        })
    }

    /// Whether the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub(crate) fn into_reqwest(self) -> Result<reqwest::multipart::Form, FetchError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.parts {
            form = match value {
                PartValue::Text(text) => form.text(name, text),
                PartValue::File(file) => {
                    let part = reqwest::multipart::Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

//! Request bodies for create and update calls.
//!
//! A [`Submission`] is encoded as multipart form data only when it carries a
//! binary file; otherwise it goes out as JSON. File fields that keep an
//! existing upload are sent as `<name>_url` in both encodings.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::{Map, Number, Value};

use crate::Error;

/// A binary file chosen for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).map(str::to_string);
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Reads a file from disk, guessing its content type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn into_part(self) -> Result<Part, Error> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.content_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| Error::InvalidPayload(format!("bad content type {}: {}", mime, e))),
            None => Ok(part),
        }
    }
}

fn guess_content_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// A single submitted value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    /// A newly chosen binary file.
    File(FileUpload),
    /// A previously uploaded file, kept by URL.
    Url(String),
}

impl FieldValue {
    /// Whether the value counts as filled in for required-field checks.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) | FieldValue::Url(s) => s.trim().is_empty(),
            FieldValue::Number(n) => !n.is_finite(),
            FieldValue::Bool(_) => false,
            FieldValue::File(f) => f.bytes.is_empty() && f.file_name.is_empty(),
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, FieldValue::File(_))
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Null | FieldValue::File(_) => Value::Null,
            FieldValue::Text(s) | FieldValue::Url(s) => Value::String(s.clone()),
            FieldValue::Number(n) => number_to_json(*n),
            FieldValue::Bool(b) => Value::Bool(*b),
        }
    }

    fn to_form_text(&self) -> Option<String> {
        match self {
            FieldValue::Null | FieldValue::File(_) => None,
            FieldValue::Text(s) | FieldValue::Url(s) => Some(s.clone()),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        }
    }
}

fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// How a submission will be sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

/// Ordered field name → value pairs for one create or update call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Submission {
    values: Vec<(String, FieldValue)>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, replacing an earlier value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn encoding(&self) -> Encoding {
        if self.values.iter().any(|(_, v)| v.is_binary()) {
            Encoding::Multipart
        } else {
            Encoding::Json
        }
    }

    /// JSON object body. Binary files are never part of a JSON body.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        for (name, value) in &self.values {
            match value {
                FieldValue::File(_) => {}
                FieldValue::Url(_) => {
                    obj.insert(url_key(name), value.to_json());
                }
                _ => {
                    obj.insert(name.clone(), value.to_json());
                }
            }
        }
        Value::Object(obj)
    }

    /// Multipart body. Nulls are left out, booleans become `"1"`/`"0"`.
    pub fn into_multipart(self) -> Result<Form, Error> {
        let mut form = Form::new();
        for (name, value) in self.values {
            form = match value {
                FieldValue::File(upload) => form.part(name, upload.into_part()?),
                FieldValue::Url(url) => form.text(url_key(&name), url),
                other => match other.to_form_text() {
                    Some(text) => form.text(name, text),
                    None => form,
                },
            };
        }
        Ok(form)
    }
}

fn url_key(name: &str) -> String {
    format!("{}_url", name)
}

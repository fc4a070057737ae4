//! Field descriptors: declarative metadata describing the editable shape
//! of one resource for the generic listing form.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wanderdesk_api::types::FieldValue;

use crate::error::{AdminError, FieldError};
use crate::validation::{
    parse_datetime_local, parse_number, parse_switch, sanitize_text, truthy, validate_option,
    MAX_TEXTAREA_LENGTH, MAX_TEXT_LENGTH,
};

/// Input kind of a field.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Number,
    Textarea,
    /// A select populated from the descriptor's options.
    #[serde(rename = "option")]
    Select,
    Switch,
    File,
    DatetimeLocal,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FieldType::Text => "text",
                FieldType::Number => "number",
                FieldType::Textarea => "textarea",
                FieldType::Select => "option",
                FieldType::Switch => "switch",
                FieldType::File => "file",
                FieldType::DatetimeLocal => "datetime-local",
            }
        )
    }
}

/// One `{value, label}` choice of a select field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Metadata for one editable attribute of a resource.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FieldDescriptor {
    pub fn new(name: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            required: false,
            placeholder: None,
            options: Vec::new(),
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Text)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Number)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Textarea)
    }

    pub fn switch(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Switch)
    }

    pub fn file(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::File)
    }

    pub fn datetime(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::DatetimeLocal)
    }

    /// A select field. `options` are `(value, label)` pairs.
    pub fn select(name: &str, label: &str, options: &[(&str, &str)]) -> Self {
        let mut field = Self::new(name, label, FieldType::Select);
        field.options = options
            .iter()
            .map(|(value, label)| FieldOption::new(*value, *label))
            .collect();
        field
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    /// The value an untouched field starts with.
    pub fn default_value(&self) -> FieldValue {
        match self.field_type {
            FieldType::Text | FieldType::Textarea | FieldType::Select | FieldType::DatetimeLocal => {
                FieldValue::Text(String::new())
            }
            FieldType::Number => FieldValue::Number(0.0),
            FieldType::Switch => FieldValue::Bool(false),
            FieldType::File => FieldValue::Null,
        }
    }

    /// Converts a value taken from a backend record into this field's type.
    /// Missing keys and values that cannot be read fall back to
    /// [`default_value`](Self::default_value).
    pub fn seed_value(&self, raw: Option<&Value>) -> FieldValue {
        let Some(raw) = raw.filter(|v| !v.is_null()) else {
            return self.default_value();
        };
        match self.field_type {
            FieldType::Text | FieldType::Textarea | FieldType::Select => {
                FieldValue::Text(seed_text(raw))
            }
            FieldType::DatetimeLocal => {
                let text = scalar_text(raw).unwrap_or_default();
                FieldValue::Text(parse_datetime_local(&text).unwrap_or(text))
            }
            FieldType::Number => {
                let parsed = match raw {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => parse_number(s).ok().flatten(),
                    _ => None,
                };
                parsed
                    .map(FieldValue::Number)
                    .unwrap_or_else(|| self.default_value())
            }
            FieldType::Switch => FieldValue::Bool(truthy(raw).unwrap_or(false)),
            FieldType::File => match raw {
                Value::String(url) if !url.trim().is_empty() => FieldValue::Url(url.clone()),
                _ => FieldValue::Null,
            },
        }
    }

    /// Converts raw text typed by a user into this field's type.
    pub fn parse_input(&self, raw: &str) -> Result<FieldValue, String> {
        match self.field_type {
            FieldType::Text => sanitize_text(raw, MAX_TEXT_LENGTH, false).map(FieldValue::Text),
            FieldType::Textarea => {
                sanitize_text(raw, MAX_TEXTAREA_LENGTH, true).map(FieldValue::Text)
            }
            FieldType::Select => {
                let value = raw.trim().to_string();
                validate_option(&value, &self.options)?;
                Ok(FieldValue::Text(value))
            }
            FieldType::Number => Ok(parse_number(raw)?
                .map(FieldValue::Number)
                .unwrap_or(FieldValue::Null)),
            FieldType::Switch => parse_switch(raw).map(FieldValue::Bool),
            FieldType::DatetimeLocal => {
                if raw.trim().is_empty() {
                    Ok(FieldValue::Text(String::new()))
                } else {
                    parse_datetime_local(raw).map(FieldValue::Text)
                }
            }
            FieldType::File => {
                let url = raw.trim();
                if url.is_empty() {
                    Ok(FieldValue::Null)
                } else {
                    Ok(FieldValue::Url(url.to_string()))
                }
            }
        }
    }

    /// Whether `value` has the right shape for this field.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self.field_type, value) {
            (FieldType::Number, FieldValue::Number(_) | FieldValue::Null) => true,
            (FieldType::Switch, FieldValue::Bool(_)) => true,
            (FieldType::File, FieldValue::File(_) | FieldValue::Url(_) | FieldValue::Null) => true,
            (
                FieldType::Text | FieldType::Textarea | FieldType::Select | FieldType::DatetimeLocal,
                FieldValue::Text(_),
            ) => true,
            _ => false,
        }
    }

    /// Submit-time check: required fields must be filled in and filled-in
    /// values must be well formed.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        if let Some(missing) = self.check_required(value) {
            return Some(missing);
        }
        match (self.field_type, value) {
            (FieldType::Select, FieldValue::Text(v)) => validate_option(v, &self.options).err(),
            (FieldType::DatetimeLocal, FieldValue::Text(v)) if !v.trim().is_empty() => {
                parse_datetime_local(v).err()
            }
            _ => None,
        }
    }

    /// Only the required check. Used for values an edit form kept from the
    /// record untouched.
    pub fn check_required(&self, value: &FieldValue) -> Option<String> {
        (self.required && value.is_empty()).then(|| format!("{} is required", self.label))
    }
}

/// Text form of a stored value. Lists are comma-joined, as the listing shows
/// them; objects keep their JSON text.
fn seed_text(raw: &Value) -> String {
    match raw {
        Value::Array(items) => items.iter().map(seed_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => raw.to_string(),
        other => scalar_text(other).unwrap_or_default(),
    }
}

fn scalar_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        _ => None,
    }
}

/// Checks a descriptor list: names are non-empty and unique, and every
/// option field declares at least one option.
pub fn validate_descriptors(fields: &[FieldDescriptor]) -> Result<(), AdminError> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();
    for field in fields {
        if field.name.trim().is_empty() {
            errors.push(FieldError {
                field: field.label.clone(),
                message: "field name is empty".to_string(),
            });
            continue;
        }
        if !seen.insert(field.name.as_str()) {
            errors.push(FieldError {
                field: field.name.clone(),
                message: "duplicate field name".to_string(),
            });
        }
        if field.field_type == FieldType::Select && field.options.is_empty() {
            errors.push(FieldError {
                field: field.name.clone(),
                message: "option field without options".to_string(),
            });
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AdminError::ValidationFailed(errors))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_per_type() {
        assert_eq!(FieldDescriptor::text("a", "A").default_value(), FieldValue::Text(String::new()));
        assert_eq!(FieldDescriptor::textarea("a", "A").default_value(), FieldValue::Text(String::new()));
        assert_eq!(
            FieldDescriptor::select("a", "A", &[("x", "X")]).default_value(),
            FieldValue::Text(String::new())
        );
        assert_eq!(FieldDescriptor::number("a", "A").default_value(), FieldValue::Number(0.0));
        assert_eq!(FieldDescriptor::switch("a", "A").default_value(), FieldValue::Bool(false));
        assert_eq!(FieldDescriptor::file("a", "A").default_value(), FieldValue::Null);
    }

    #[test]
    fn seed_option_is_always_text() {
        let f = FieldDescriptor::select("stars", "Stars", &[("3", "3"), ("4", "4")]);
        assert_eq!(f.seed_value(Some(&json!(4))), FieldValue::Text("4".into()));
    }

    #[test]
    fn seed_switch_from_string_flag() {
        let f = FieldDescriptor::switch("published", "Published");
        assert_eq!(f.seed_value(Some(&json!("1"))), FieldValue::Bool(true));
        assert_eq!(f.seed_value(Some(&json!("0"))), FieldValue::Bool(false));
        assert_eq!(f.seed_value(Some(&json!(true))), FieldValue::Bool(true));
        assert_eq!(f.seed_value(None), FieldValue::Bool(false));
    }

    #[test]
    fn seed_text_from_lists_and_objects() {
        let f = FieldDescriptor::textarea("amenities", "Amenities");
        assert_eq!(
            f.seed_value(Some(&json!(["wifi", "pool"]))),
            FieldValue::Text("wifi, pool".into())
        );
        assert_eq!(
            f.seed_value(Some(&json!({"lat": 38.7}))),
            FieldValue::Text(r#"{"lat":38.7}"#.into())
        );
    }

    #[test]
    fn kept_values_only_face_the_required_check() {
        let f = FieldDescriptor::select("class", "Class", &[("economy", "Economy")]).required();
        let legacy = FieldValue::Text("Economy".into());
        assert!(f.check(&legacy).is_some());
        assert_eq!(f.check_required(&legacy), None);
        assert_eq!(
            f.check_required(&FieldValue::Text(String::new())),
            Some("Class is required".to_string())
        );
    }

    #[test]
    fn seed_number_from_string() {
        let f = FieldDescriptor::number("price", "Price");
        assert_eq!(f.seed_value(Some(&json!("45"))), FieldValue::Number(45.0));
        assert_eq!(f.seed_value(Some(&json!("n/a"))), FieldValue::Number(0.0));
    }

    #[test]
    fn seed_file_keeps_url() {
        let f = FieldDescriptor::file("image", "Image");
        assert_eq!(
            f.seed_value(Some(&json!("https://cdn/x.jpg"))),
            FieldValue::Url("https://cdn/x.jpg".into())
        );
        assert_eq!(f.seed_value(Some(&json!(""))), FieldValue::Null);
    }

    #[test]
    fn seed_datetime_from_timestamp() {
        let f = FieldDescriptor::datetime("departure_time", "Departure");
        assert_eq!(
            f.seed_value(Some(&json!("2026-11-01T08:30:00Z"))),
            FieldValue::Text("2026-11-01T08:30".into())
        );
    }

    #[test]
    fn required_check() {
        let f = FieldDescriptor::text("name", "Name").required();
        assert_eq!(f.check(&FieldValue::Text("".into())), Some("Name is required".into()));
        assert_eq!(f.check(&FieldValue::Text("Porto".into())), None);
        let optional = FieldDescriptor::text("note", "Note");
        assert_eq!(optional.check(&FieldValue::Text("".into())), None);
    }

    #[test]
    fn parse_input_by_type() {
        assert_eq!(
            FieldDescriptor::number("n", "N").parse_input("12").unwrap(),
            FieldValue::Number(12.0)
        );
        assert!(FieldDescriptor::number("n", "N").parse_input("twelve").is_err());
        assert_eq!(
            FieldDescriptor::switch("s", "S").parse_input("yes").unwrap(),
            FieldValue::Bool(true)
        );
        assert!(FieldDescriptor::select("c", "C", &[("a", "A")]).parse_input("b").is_err());
    }

    #[test]
    fn descriptor_list_checks() {
        let ok = vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::select("class", "Class", &[("economy", "Economy")]),
        ];
        assert!(validate_descriptors(&ok).is_ok());

        let bad = vec![
            FieldDescriptor::text("name", "Name"),
            FieldDescriptor::text("name", "Name again"),
            FieldDescriptor::new("class", "Class", FieldType::Select),
        ];
        match validate_descriptors(&bad) {
            Err(AdminError::ValidationFailed(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn descriptor_serializes_type_names() {
        let f = FieldDescriptor::datetime("at", "At");
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["type"], "datetime-local");
        let f = FieldDescriptor::select("c", "C", &[("a", "A")]);
        assert_eq!(serde_json::to_value(&f).unwrap()["type"], "option");
    }
}

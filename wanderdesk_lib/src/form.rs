//! The generic listing form: one create or edit session over a field
//! descriptor list.

use std::collections::BTreeMap;
use std::future::Future;

use wanderdesk_api::types::{FieldValue, FileUpload, Record, RecordId, Submission};

use crate::error::{AdminError, FieldError};
use crate::fields::{FieldDescriptor, FieldType};

/// Whether the session creates a new record or edits an existing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

/// One open create/edit interaction.
///
/// The session owns its values and holds no reference to the list it came
/// from. It is discarded when the dialog closes, whether by cancel or by a
/// successful submit.
#[derive(Clone, Debug)]
pub struct ListingForm {
    mode: FormMode,
    fields: Vec<FieldDescriptor>,
    values: BTreeMap<String, FieldValue>,
    /// What an edit form started from. Values still equal to these only
    /// face the required check.
    seeded: BTreeMap<String, FieldValue>,
    errors: BTreeMap<String, String>,
    is_submitting: bool,
}

impl ListingForm {
    /// A blank create form: every field starts at its type default.
    pub fn create(fields: Vec<FieldDescriptor>) -> Self {
        Self::with_initial_values(FormMode::Create, fields, &BTreeMap::new())
    }

    /// An edit form seeded from exactly one record.
    pub fn edit(fields: Vec<FieldDescriptor>, record: &Record) -> Result<Self, AdminError> {
        let id = record.id().ok_or_else(|| {
            AdminError::InvalidInput("cannot edit a record without an id".to_string())
        })?;
        let values: BTreeMap<String, FieldValue> = fields
            .iter()
            .map(|f| (f.name.clone(), f.seed_value(record.get(&f.name))))
            .collect();
        Ok(Self {
            mode: FormMode::Edit(id),
            fields,
            seeded: values.clone(),
            values,
            errors: BTreeMap::new(),
            is_submitting: false,
        })
    }

    /// A form with explicit initial values. Missing keys, and values of
    /// the wrong shape, fall back to the field's type default.
    pub fn with_initial_values(
        mode: FormMode,
        fields: Vec<FieldDescriptor>,
        initial: &BTreeMap<String, FieldValue>,
    ) -> Self {
        let values = fields
            .iter()
            .map(|f| {
                let value = initial
                    .get(&f.name)
                    .filter(|v| f.accepts(v))
                    .cloned()
                    .unwrap_or_else(|| f.default_value());
                (f.name.clone(), value)
            })
            .collect();
        Self {
            mode,
            fields,
            values,
            seeded: BTreeMap::new(),
            errors: BTreeMap::new(),
            is_submitting: false,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Inline error currently flagged on a field.
    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    fn descriptor(&self, name: &str) -> Result<&FieldDescriptor, AdminError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| AdminError::InvalidInput(format!("unknown field '{}'", name)))
    }

    /// Sets a typed value. Clears any error flagged on that field.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), AdminError> {
        let field = self.descriptor(name)?;
        if !field.accepts(&value) {
            return Err(AdminError::InvalidInput(format!(
                "field '{}' of type {} cannot hold a {} value",
                name,
                field.field_type,
                kind_of(&value)
            )));
        }
        self.errors.remove(name);
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Sets a value from raw user text, converted to the field's type.
    /// A conversion failure is flagged on the field and returned.
    pub fn set_input(&mut self, name: &str, raw: &str) -> Result<(), AdminError> {
        let field = self.descriptor(name)?;
        match field.parse_input(raw) {
            Ok(value) => self.set(name, value),
            Err(message) => {
                self.errors.insert(name.to_string(), message.clone());
                Err(AdminError::ValidationFailed(vec![FieldError {
                    field: name.to_string(),
                    message,
                }]))
            }
        }
    }

    /// Chooses a new binary file for a file field, replacing any kept URL.
    pub fn attach_file(&mut self, name: &str, upload: FileUpload) -> Result<(), AdminError> {
        if self.descriptor(name)?.field_type != FieldType::File {
            return Err(AdminError::InvalidInput(format!(
                "field '{}' is not a file field",
                name
            )));
        }
        self.set(name, FieldValue::File(upload))
    }

    /// Runs the submit-time checks, flagging every offending field.
    /// On success returns the values in descriptor order.
    pub fn validate(&mut self) -> Result<Submission, AdminError> {
        self.errors.clear();
        let mut submission = Submission::new();
        let mut failures = Vec::new();
        for field in &self.fields {
            let value = self
                .values
                .get(&field.name)
                .cloned()
                .unwrap_or_else(|| field.default_value());
            let problem = if self.seeded.get(&field.name) == Some(&value) {
                field.check_required(&value)
            } else {
                field.check(&value)
            };
            if let Some(message) = problem {
                failures.push(FieldError {
                    field: field.name.clone(),
                    message,
                });
            }
            submission.insert(field.name.clone(), value);
        }
        if failures.is_empty() {
            return Ok(submission);
        }
        for failure in &failures {
            self.errors
                .insert(failure.field.clone(), failure.message.clone());
        }
        Err(AdminError::ValidationFailed(failures))
    }

    /// Validates and hands the values to `on_submit`.
    ///
    /// Invalid forms never call `on_submit`. When `on_submit` fails, the form
    /// keeps its values so the user can try again; it does not retry on its
    /// own. `Ok` tells the owner to close the dialog.
    pub async fn submit<F, Fut>(&mut self, on_submit: F) -> Result<(), AdminError>
    where
        F: FnOnce(Submission) -> Fut,
        Fut: Future<Output = Result<(), AdminError>>,
    {
        if self.is_submitting {
            return Err(AdminError::InvalidInput(
                "form is already submitting".to_string(),
            ));
        }
        let submission = self.validate()?;
        self.is_submitting = true;
        let result = on_submit(submission).await;
        self.is_submitting = false;
        result
    }
}

fn kind_of(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Null => "null",
        FieldValue::Text(_) => "text",
        FieldValue::Number(_) => "number",
        FieldValue::Bool(_) => "boolean",
        FieldValue::File(_) => "file",
        FieldValue::Url(_) => "url",
    }
}

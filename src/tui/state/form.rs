//! # Form State
//!
//! Text-entry forms for new resolutions and check-ins.

use crate::api::{CheckInCreate, ResolutionCreate};
use chrono::NaiveDate;

/// A single text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub required: bool,
}

impl Field {
    fn new(label: &'static str, placeholder: &'static str, required: bool) -> Self {
        Field {
            label,
            placeholder,
            value: String::new(),
            required,
        }
    }
}

/// What a form submits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    NewResolution,
    CheckIn { resolution_id: i64 },
}

/// Validated form payload
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Resolution(ResolutionCreate),
    CheckIn {
        resolution_id: i64,
        body: CheckInCreate,
    },
}

/// Multi-field text form with a focused field
#[derive(Debug, Clone)]
pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<Field>,
    pub focus: usize,
    /// Set while the submission is in flight
    pub submitting: bool,
}

impl FormState {
    pub fn new_resolution() -> Self {
        FormState {
            kind: FormKind::NewResolution,
            fields: vec![
                Field::new("Title", "Title", true),
                Field::new("Description", "What do you want to achieve?", true),
                Field::new("Target date", "YYYY-MM-DD (optional)", false),
            ],
            focus: 0,
            submitting: false,
        }
    }

    pub fn check_in(resolution_id: i64) -> Self {
        FormState {
            kind: FormKind::CheckIn { resolution_id },
            fields: vec![Field::new(
                "Note",
                "How's your progress? What have you accomplished?",
                true,
            )],
            focus: 0,
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::NewResolution => "New Resolution",
            FormKind::CheckIn { .. } => "New Check-in",
        }
    }

    /// Label for the submit action, reflecting whether a request is pending
    pub fn submit_label(&self) -> &'static str {
        match (self.kind, self.submitting) {
            (_, true) => "Analyzing...",
            (FormKind::NewResolution, false) => "Create Resolution",
            (FormKind::CheckIn { .. }, false) => "Submit Check-in",
        }
    }

    pub fn on_last_field(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.trim()).unwrap_or("")
    }

    /// Check required fields and formats, producing the request body
    pub fn validate(&self) -> Result<FormSubmission, String> {
        for field in &self.fields {
            if field.required && field.value.trim().is_empty() {
                return Err(format!("{} is required", field.label));
            }
        }

        match self.kind {
            FormKind::NewResolution => {
                let target = self.value(2);
                let target_date = if target.is_empty() {
                    None
                } else {
                    NaiveDate::parse_from_str(target, "%Y-%m-%d")
                        .map_err(|_| "Target date must be YYYY-MM-DD".to_string())?;
                    Some(target.to_string())
                };
                Ok(FormSubmission::Resolution(ResolutionCreate {
                    title: self.value(0).to_string(),
                    description: self.value(1).to_string(),
                    target_date,
                }))
            }
            FormKind::CheckIn { resolution_id } => Ok(FormSubmission::CheckIn {
                resolution_id,
                body: CheckInCreate {
                    note: self.value(0).to_string(),
                },
            }),
        }
    }
}

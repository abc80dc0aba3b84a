//! Input validation for enrollment submissions.
//!
//! Provides clear, descriptive validation errors for the student filling in
//! the form. Messages are in Catalan, like the form itself.

use std::fmt;

use crate::catalog::ModuleCatalog;
use crate::enrollment::models::Submission;

/// Validation error with detailed, user-friendly messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message in Catalan
    pub message: String,
    /// Suggestion for how to fix the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("El camp {} és obligatori", label))
            .with_suggestion(format!("Omple el camp {}", label.to_lowercase()))
    }

    /// Create error for a program missing from the catalog
    pub fn unknown_program(field: &str, value: &str) -> Self {
        Self::new(field, format!("El cicle '{}' no existeix", value))
            .with_suggestion("Tria un cicle de la llista")
    }

    /// Create error for a year the program does not offer
    pub fn unknown_year(field: &str, program: &str, value: &str) -> Self {
        Self::new(
            field,
            format!("El cicle {} no té el curs '{}'", program, value),
        )
        .with_suggestion("Tria un curs de la llista")
    }

    /// Create error for a module outside the selected program year
    pub fn unknown_module(field: &str, value: &str, program: &str, year: &str) -> Self {
        Self::new(
            field,
            format!(
                "El mòdul '{}' no pertany a {} curs {}",
                value, program, year
            ),
        )
        .with_suggestion("Selecciona només mòduls del cicle i curs triats")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Fields that failed, in the order they were checked.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Get formatted plain-text message for the HTTP response body
    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "La matrícula no és vàlida: {} error(s)\n",
            self.errors.len()
        )];

        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }

        parts.join("\n")
    }

    /// Convert to Result - Ok if no errors, Err with all collected errors otherwise
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_message())
    }
}

impl std::error::Error for ValidationErrors {}

/// Which checks a submission must pass.
#[derive(Debug, Clone, Copy)]
pub struct ValidationPolicy<'a> {
    /// Personal data and program/year must be non-empty.
    pub require_fields: bool,
    /// When set, program, year and modules must exist in this catalog.
    pub catalog: Option<&'a ModuleCatalog>,
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate program, year and every selected module against the catalog.
///
/// Empty program or year are left to `validate_required`.
pub fn validate_against_catalog(
    submission: &Submission,
    catalog: &ModuleCatalog,
    errors: &mut ValidationErrors,
) {
    let program = submission.cicle.trim();
    let year = submission.curs.trim();
    if program.is_empty() || year.is_empty() {
        return;
    }

    if catalog.years(program).is_none() {
        errors.add(ValidationError::unknown_program("cicle", program));
        return;
    }

    if catalog.modules(program, year).is_none() {
        errors.add(ValidationError::unknown_year("curs", program, year));
        return;
    }

    for module in &submission.moduls {
        if !catalog.contains(program, year, module) {
            errors.add(ValidationError::unknown_module(
                "moduls", module, program, year,
            ));
        }
    }
}

/// Run every check the policy asks for and collect all failures.
pub fn validate_submission(
    submission: &Submission,
    policy: ValidationPolicy<'_>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if policy.require_fields {
        validate_required(&submission.nom, "nom", "Nom", &mut errors);
        validate_required(&submission.cognoms, "cognoms", "Cognoms", &mut errors);
        validate_required(&submission.email, "email", "Correu electrònic", &mut errors);
        validate_required(&submission.adreca, "adreca", "Adreça", &mut errors);
        validate_required(&submission.telefon, "telefon", "Telèfon", &mut errors);
        validate_required(&submission.cicle, "cicle", "Cicle", &mut errors);
        validate_required(&submission.curs, "curs", "Curs", &mut errors);
    }

    if let Some(catalog) = policy.catalog {
        validate_against_catalog(submission, catalog, &mut errors);
    }

    errors.into_result()
}

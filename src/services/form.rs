use chrono::{NaiveDate, Utc};

use crate::config::DEFAULT_CERT_PREFIX;
use crate::dates;
use crate::error::ValidationError;
use crate::models::{CertificateInput, CertificateRecord, FormField};

/// Suggests certificate numbers as `<prefix><unix millis>`. A convenience
/// default only; the service decides whether a number is acceptable.
#[derive(Debug, Clone)]
pub struct CertificateNumberGenerator {
    prefix: String,
}

impl CertificateNumberGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn next_number(&self) -> String {
        format!("{}{}", self.prefix, Utc::now().timestamp_millis())
    }
}

impl Default for CertificateNumberGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CERT_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone)]
pub struct CertificateForm {
    fields: CertificateInput,
    mode: Mode,
    generator: CertificateNumberGenerator,
}

impl CertificateForm {
    /// Empty form in create mode with a suggested certificate number.
    pub fn new(generator: CertificateNumberGenerator) -> Self {
        let mut fields = CertificateInput::default();
        fields.certificate_number = generator.next_number();
        Self {
            fields,
            mode: Mode::Create,
            generator,
        }
    }

    /// Form prefilled from an existing record.
    pub fn editing(record: &CertificateRecord, generator: CertificateNumberGenerator) -> Self {
        let mut fields = record.input();
        fields.date_of_birth = dates::to_iso_date(&fields.date_of_birth);
        Self {
            fields,
            mode: Mode::Edit { id: record.id.clone() },
            generator,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Edit { .. })
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            Mode::Edit { id } => Some(id),
            Mode::Create => None,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    pub fn fields(&self) -> &CertificateInput {
        &self.fields
    }

    /// Validates the form and returns a trimmed copy of the eight fields.
    /// Leaves the form untouched; call [`complete_submission`] once the
    /// caller has accepted the result.
    ///
    /// [`complete_submission`]: CertificateForm::complete_submission
    pub fn submit(&self) -> Result<CertificateInput, ValidationError> {
        let mut normalized = CertificateInput::default();
        let mut missing = Vec::new();

        for field in FormField::ALL {
            let value = self.fields.get(field).trim();
            if value.is_empty() {
                missing.push(field);
            }
            normalized.set(field, value);
        }

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        if NaiveDate::parse_from_str(&normalized.date_of_birth, "%Y-%m-%d").is_err() {
            return Err(ValidationError::InvalidDate(normalized.date_of_birth));
        }

        Ok(normalized)
    }

    /// Post-submit continuation. A create form is cleared and gets a fresh
    /// certificate number; an edit form is left as is.
    pub fn complete_submission(&mut self) {
        if self.is_editing() {
            return;
        }
        self.fields = CertificateInput::default();
        self.fields.certificate_number = self.generator.next_number();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> CertificateForm {
        let mut form = CertificateForm::new(CertificateNumberGenerator::new("TEC"));
        form.set(FormField::StudentName, "  Asha Verma ");
        form.set(FormField::FatherName, "Ramesh Verma");
        form.set(FormField::DateOfBirth, "2001-04-12");
        form.set(FormField::RollNo, "R-17");
        form.set(FormField::PassingYear, "2025");
        form.set(FormField::CourseOfDuration, "6 Months");
        form.set(FormField::CourseName, "Tally Prime");
        form
    }

    #[test]
    fn new_form_suggests_prefixed_number() {
        let form = CertificateForm::new(CertificateNumberGenerator::new("TEC"));
        let number = form.get(FormField::CertificateNumber);
        assert!(number.starts_with("TEC"));
        assert!(number["TEC".len()..].chars().all(|c| c.is_ascii_digit()));
        assert!(!form.is_editing());
    }

    #[test]
    fn submit_trims_and_emits_all_fields() {
        let input = filled_form().submit().expect("valid form");
        assert_eq!(input.student_name, "Asha Verma");
        assert_eq!(input.course_name, "Tally Prime");
        assert!(input.certificate_number.starts_with("TEC"));
    }

    #[test]
    fn submit_names_every_missing_field_in_form_order() {
        let mut form = filled_form();
        form.set(FormField::CourseName, "");
        form.set(FormField::FatherName, "   ");
        form.set(FormField::CertificateNumber, "");

        let err = form.submit().expect_err("missing fields");
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![
                FormField::FatherName,
                FormField::CertificateNumber,
                FormField::CourseName,
            ])
        );
    }

    #[test]
    fn submit_rejects_malformed_date() {
        let mut form = filled_form();
        form.set(FormField::DateOfBirth, "12/04/2001");
        assert_eq!(
            form.submit(),
            Err(ValidationError::InvalidDate("12/04/2001".to_string()))
        );
    }

    #[test]
    fn complete_submission_resets_create_form() {
        let mut form = filled_form();
        form.submit().expect("valid form");
        form.complete_submission();

        assert_eq!(form.get(FormField::StudentName), "");
        assert_eq!(form.get(FormField::CourseName), "");
        assert!(form.get(FormField::CertificateNumber).starts_with("TEC"));
    }

    #[test]
    fn complete_submission_keeps_edit_form() {
        let record = CertificateRecord {
            id: "abc".to_string(),
            student_name: "Asha Verma".to_string(),
            father_name: "Ramesh Verma".to_string(),
            date_of_birth: "2001-04-12T00:00:00.000Z".to_string(),
            certificate_number: "TEC1".to_string(),
            roll_no: "R-17".to_string(),
            passing_year: "2025".to_string(),
            course_of_duration: "6 Months".to_string(),
            course_name: "Tally Prime".to_string(),
            created_at: "2025-03-01T10:00:00.000Z".to_string(),
        };
        let mut form = CertificateForm::editing(&record, CertificateNumberGenerator::default());
        form.complete_submission();

        assert_eq!(form.editing_id(), Some("abc"));
        assert_eq!(form.get(FormField::StudentName), "Asha Verma");
        assert_eq!(form.get(FormField::CertificateNumber), "TEC1");
        assert_eq!(form.get(FormField::DateOfBirth), "2001-04-12");
    }
}

//! Sign-in and registration form validation.
//!
//! Runs before any request is sent so obviously bad input never reaches the
//! backend.

use crate::error::ApiError;
use crate::model::{AcademicYear, RegisterData, MAX_BIO_CHARS, MIN_PASSWORD_CHARS};

/// A problem found in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Form field the issue belongs to.
    pub field: &'static str,
    /// Message shown to the user.
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a sign-in form.
pub fn validate_login(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Please fill in all fields".into()));
    }
    Ok(())
}

/// All problems with a registration form, in the order the form shows them.
pub fn registration_issues(data: &RegisterData) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let missing = [
        ("name", data.name.trim().is_empty()),
        ("email", data.email.trim().is_empty()),
        ("password", data.password.is_empty()),
    ];
    for (field, is_missing) in missing {
        if is_missing {
            issues.push(ValidationIssue::new(
                field,
                "Please fill in all required fields",
            ));
        }
    }

    if !data.password.is_empty() && data.password.chars().count() < MIN_PASSWORD_CHARS {
        issues.push(ValidationIssue::new(
            "password",
            format!("Password must be at least {MIN_PASSWORD_CHARS} characters"),
        ));
    }

    if AcademicYear::from_number(data.academic_year).is_none() {
        issues.push(ValidationIssue::new(
            "academic_year",
            format!("Academic year must be between 1 and 4, got {}", data.academic_year),
        ));
    }

    if let Some(bio) = &data.bio {
        let len = bio.chars().count();
        if len > MAX_BIO_CHARS {
            issues.push(ValidationIssue::new(
                "bio",
                format!("Bio must be at most {MAX_BIO_CHARS} characters ({len} given)"),
            ));
        }
    }

    issues
}

/// Check a registration form, reporting the first problem.
pub fn validate_registration(data: &RegisterData) -> Result<(), ApiError> {
    match registration_issues(data).into_iter().next() {
        Some(issue) => Err(ApiError::Validation(issue.message)),
        None => Ok(()),
    }
}

/// Characters left for the bio, as shown under the field.
pub fn bio_chars_remaining(bio: &str) -> usize {
    MAX_BIO_CHARS.saturating_sub(bio.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterData {
        RegisterData {
            name: "Ada Lovelace".into(),
            email: "ada@bits.edu".into(),
            password: "engines42".into(),
            academic_year: 2,
            telegram_username: Some("@ada".into()),
            bio: Some("Maths tutor".into()),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(registration_issues(&form()).is_empty());
        assert!(validate_registration(&form()).is_ok());
    }

    #[test]
    fn missing_required_fields() {
        let mut data = form();
        data.name = "  ".into();
        data.password.clear();
        let issues = registration_issues(&data);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "name");
        assert_eq!(
            validate_registration(&data).unwrap_err().to_string(),
            "Please fill in all required fields"
        );
    }

    #[test]
    fn short_password_rejected() {
        let mut data = form();
        data.password = "short".into();
        assert_eq!(
            validate_registration(&data).unwrap_err(),
            ApiError::Validation("Password must be at least 8 characters".into())
        );
    }

    #[test]
    fn bio_limit_counts_characters() {
        let mut data = form();
        data.bio = Some("é".repeat(MAX_BIO_CHARS));
        assert!(validate_registration(&data).is_ok());

        data.bio = Some("x".repeat(MAX_BIO_CHARS + 1));
        let issues = registration_issues(&data);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "bio");
    }

    #[test]
    fn academic_year_out_of_range() {
        let mut data = form();
        data.academic_year = 5;
        assert!(validate_registration(&data).is_err());
    }

    #[test]
    fn login_requires_both_fields() {
        assert!(validate_login("a@b.c", "pw").is_ok());
        assert!(validate_login("", "pw").is_err());
        assert!(validate_login("a@b.c", "").is_err());
    }

    #[test]
    fn remaining_bio_chars() {
        assert_eq!(bio_chars_remaining(""), 70);
        assert_eq!(bio_chars_remaining(&"a".repeat(80)), 0);
    }
}

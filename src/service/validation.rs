//! Request validation for student payloads.

use crate::error::AppError;
use crate::model::Student;
use regex::Regex;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+$";

pub struct StudentValidator;

impl StudentValidator {
    /// Name is required and bounded; email, when present, must look like an address.
    pub fn validate(student: &Student) -> Result<(), AppError> {
        let name = student.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name is required".into()));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::Validation(format!(
                "name must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }
        if let Some(email) = &student.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(AppError::Validation(format!(
            "email must be at most {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    let re = Regex::new(EMAIL_PATTERN).map_err(|_| AppError::Internal("invalid email pattern".into()))?;
    if !re.is_match(email) {
        return Err(AppError::Validation("email must be a valid email".into()));
    }
    Ok(())
}

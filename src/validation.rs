use crate::models::PropertyDetails;
use rand::Rng;
use std::fmt;

/// Reasons a submission is blocked before any request is made.
/// The display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Incorrect security answer. Please try again.")]
    WrongAnswer,
    #[error("Please enter a city.")]
    MissingCity,
    #[error("Please enter a valid property area size.")]
    InvalidSize,
    #[error("Please choose a location.")]
    MissingLocation,
}

/// Simple "what is a + b" human check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Captcha {
    a: u8,
    b: u8,
}

impl Captcha {
    /// Fresh question with operands in 1..=10
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            a: rng.gen_range(1..=10),
            b: rng.gen_range(1..=10),
        }
    }

    #[cfg(test)]
    pub fn with_operands(a: u8, b: u8) -> Self {
        Self { a, b }
    }

    pub fn question(&self) -> String {
        format!("What is {} + {}?", self.a, self.b)
    }

    /// Compare a typed answer against the sum
    pub fn check(&self, answer: &str) -> Result<(), ValidationError> {
        match answer.trim().parse::<u32>() {
            Ok(n) if n == u32::from(self.a) + u32::from(self.b) => Ok(()),
            _ => Err(ValidationError::WrongAnswer),
        }
    }

    /// A failed check invalidates the question
    pub fn regenerate(&mut self) {
        *self = Self::new();
    }
}

impl Default for Captcha {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Captcha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question())
    }
}

pub fn validate_property_details(details: &PropertyDetails) -> Result<(), ValidationError> {
    if details.city.trim().is_empty() {
        return Err(ValidationError::MissingCity);
    }
    if !details.size_sqm.is_finite() || details.size_sqm <= 0.0 {
        return Err(ValidationError::InvalidSize);
    }
    Ok(())
}

pub fn validate_location(location: &str) -> Result<(), ValidationError> {
    if location.trim().is_empty() {
        return Err(ValidationError::MissingLocation);
    }
    Ok(())
}

/// Full gate for the appraisal form: the human check first, then the fields
pub fn validate_submission(
    details: &PropertyDetails,
    captcha: &Captcha,
    answer: &str,
) -> Result<(), ValidationError> {
    captcha.check(answer)?;
    validate_property_details(details)
}

use std::fmt;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingBrowserIdentity,
    MissingPhoneInput,
    InvalidPhoneNumber,
    MissingVerifyInput,
    InvalidRegistrationToken,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBrowserIdentity => {
                write!(f, "Please provide both user-agent and accept-language headers")
            }
            Self::MissingPhoneInput => {
                write!(f, "Please provide both phoneNumber and countryCode")
            }
            Self::InvalidPhoneNumber => write!(f, "Provided phoneNumber is invalid"),
            Self::MissingVerifyInput => {
                write!(f, "Please provide both registrationToken and code")
            }
            Self::InvalidRegistrationToken => {
                write!(f, "Provided registrationToken is invalid")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check that `phone_number` is a structurally valid number for the given
/// ISO alpha-2 `country_code`.
///
/// This is a validity check, not mere viability: the number must match the
/// country's numbering plan (length, prefix ranges).
pub fn validate_phone_number(country_code: &str, phone_number: &str) -> Result<(), ValidationError> {
    let region = country_code
        .trim()
        .to_ascii_uppercase()
        .parse::<country::Id>()
        .map_err(|_| ValidationError::InvalidPhoneNumber)?;

    let parsed = phonenumber::parse(Some(region), phone_number)
        .map_err(|_| ValidationError::InvalidPhoneNumber)?;

    if !phonenumber::is_valid(&parsed) {
        return Err(ValidationError::InvalidPhoneNumber);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_human_readable() {
        assert_eq!(
            ValidationError::MissingPhoneInput.to_string(),
            "Please provide both phoneNumber and countryCode"
        );
        assert_eq!(
            ValidationError::InvalidPhoneNumber.to_string(),
            "Provided phoneNumber is invalid"
        );
        assert_eq!(
            ValidationError::MissingVerifyInput.to_string(),
            "Please provide both registrationToken and code"
        );
        assert_eq!(
            ValidationError::InvalidRegistrationToken.to_string(),
            "Provided registrationToken is invalid"
        );
    }

    #[test]
    fn valid_national_number_passes() {
        assert!(validate_phone_number("FR", "0648446907").is_ok());
    }

    #[test]
    fn lowercase_country_code_is_accepted() {
        assert!(validate_phone_number("fr", "0648446907").is_ok());
    }

    #[test]
    fn truncated_number_is_rejected() {
        assert_eq!(
            validate_phone_number("FR", "064844690"),
            Err(ValidationError::InvalidPhoneNumber)
        );
    }

    #[test]
    fn unknown_region_is_rejected() {
        assert_eq!(
            validate_phone_number("ZZ", "0648446907"),
            Err(ValidationError::InvalidPhoneNumber)
        );
    }
}

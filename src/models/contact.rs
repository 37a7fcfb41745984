use std::collections::BTreeMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("valid phone regex"));

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    OwnerName,
    PetName,
    Email,
    Phone,
    Notes,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::OwnerName => "owner_name",
            ContactField::PetName => "pet_name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Notes => "notes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contact field: {0}")]
pub struct UnknownContactField(pub String);

impl FromStr for ContactField {
    type Err = UnknownContactField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner_name" => Ok(ContactField::OwnerName),
            "pet_name" => Ok(ContactField::PetName),
            "email" => Ok(ContactField::Email),
            "phone" => Ok(ContactField::Phone),
            "notes" => Ok(ContactField::Notes),
            _ => Err(UnknownContactField(s.to_string())),
        }
    }
}

pub type ValidationErrors = BTreeMap<ContactField, String>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub owner_name: String,
    pub pet_name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl ContactForm {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::OwnerName => &self.owner_name,
            ContactField::PetName => &self.pet_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Notes => &self.notes,
        }
    }

    /// Stores the raw value; nothing is trimmed until validation.
    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::OwnerName => &mut self.owner_name,
            ContactField::PetName => &mut self.pet_name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Notes => &mut self.notes,
        };
        *slot = value;
    }

    pub fn required_filled(&self) -> bool {
        [&self.owner_name, &self.pet_name, &self.email, &self.phone]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    pub fn validate(&self) -> Validation {
        let mut errors = ValidationErrors::new();

        if self.owner_name.trim().is_empty() {
            errors.insert(ContactField::OwnerName, "Owner's name is required".to_string());
        }
        if self.pet_name.trim().is_empty() {
            errors.insert(ContactField::PetName, "Pet's name is required".to_string());
        }

        if self.email.trim().is_empty() {
            errors.insert(ContactField::Email, "Email is required".to_string());
        } else if !EMAIL_RE.is_match(&self.email) {
            errors.insert(ContactField::Email, "Invalid email format".to_string());
        }

        if self.phone.trim().is_empty() {
            errors.insert(ContactField::Phone, "Phone number is required".to_string());
        } else if !PHONE_RE.is_match(&self.phone) {
            errors.insert(ContactField::Phone, "Invalid phone number".to_string());
        }

        Validation {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            owner_name: "John Doe".to_string(),
            pet_name: "Max".to_string(),
            email: "john@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let result = valid_form().validate();
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_form_reports_all_required() {
        let result = ContactForm::default().validate();
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 4);
        assert_eq!(result.errors[&ContactField::OwnerName], "Owner's name is required");
        assert_eq!(result.errors[&ContactField::PetName], "Pet's name is required");
        assert_eq!(result.errors[&ContactField::Email], "Email is required");
        assert_eq!(result.errors[&ContactField::Phone], "Phone number is required");
        assert!(!result.errors.contains_key(&ContactField::Notes));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let mut form = valid_form();
        form.owner_name = "   ".to_string();
        form.email = " \t".to_string();
        let result = form.validate();
        assert_eq!(result.errors[&ContactField::OwnerName], "Owner's name is required");
        assert_eq!(result.errors[&ContactField::Email], "Email is required");
    }

    #[test]
    fn test_email_format() {
        let mut form = valid_form();
        for bad in ["john.example.com", "john@example", "john @example.com", "@example.com"] {
            form.email = bad.to_string();
            assert_eq!(
                form.validate().errors.get(&ContactField::Email).map(String::as_str),
                Some("Invalid email format"),
                "{bad} should be rejected"
            );
        }
        form.email = "first.last@mail.example.org".to_string();
        assert!(form.validate().valid);
    }

    #[test]
    fn test_phone_format() {
        let mut form = valid_form();
        form.phone = "abc-123".to_string();
        assert_eq!(form.validate().errors[&ContactField::Phone], "Invalid phone number");

        form.phone = "555 123 4567".to_string();
        assert!(form.validate().valid);

        form.phone = "++1 555".to_string();
        assert_eq!(form.validate().errors[&ContactField::Phone], "Invalid phone number");
    }

    #[test]
    fn test_notes_never_validated() {
        let mut form = valid_form();
        form.notes = "@@@ not an email ###".to_string();
        assert!(form.validate().valid);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut form = valid_form();
        form.email = String::new();
        form.phone = "call me".to_string();
        assert_eq!(form.validate(), form.validate());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in [
            ContactField::OwnerName,
            ContactField::PetName,
            ContactField::Email,
            ContactField::Phone,
            ContactField::Notes,
        ] {
            assert_eq!(field.as_str().parse::<ContactField>().unwrap(), field);
        }
        assert!("address".parse::<ContactField>().is_err());
    }
}

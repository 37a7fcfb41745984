use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
    Other,
}

impl PetType {
    pub const ALL: [PetType; 3] = [PetType::Dog, PetType::Cat, PetType::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::Dog => "dog",
            PetType::Cat => "cat",
            PetType::Other => "other",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            PetType::Dog => "Dog",
            PetType::Cat => "Cat",
            PetType::Other => "Other",
        }
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pet type: {0}")]
pub struct UnknownPetType(pub String);

impl FromStr for PetType {
    type Err = UnknownPetType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dog" => Ok(PetType::Dog),
            "cat" => Ok(PetType::Cat),
            "other" => Ok(PetType::Other),
            _ => Err(UnknownPetType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PetOption {
    pub id: PetType,
    pub label: String,
}

pub fn default_pet_options() -> Vec<PetOption> {
    PetType::ALL
        .iter()
        .map(|p| PetOption {
            id: *p,
            label: p.default_label().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        assert_eq!("dog".parse::<PetType>().unwrap(), PetType::Dog);
        assert_eq!("cat".parse::<PetType>().unwrap(), PetType::Cat);
        assert_eq!("other".parse::<PetType>().unwrap(), PetType::Other);
    }

    #[test]
    fn test_parse_unknown_id_rejected() {
        let err = "hamster".parse::<PetType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown pet type: hamster");
        // ids are case sensitive
        assert!("Dog".parse::<PetType>().is_err());
    }

    #[test]
    fn test_default_options_order() {
        let labels: Vec<_> = default_pet_options().into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Dog", "Cat", "Other"]);
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Checkup,
    Vaccination,
    Grooming,
    Surgery,
    Emergency,
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        ServiceType::Checkup,
        ServiceType::Vaccination,
        ServiceType::Grooming,
        ServiceType::Surgery,
        ServiceType::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Checkup => "checkup",
            ServiceType::Vaccination => "vaccination",
            ServiceType::Grooming => "grooming",
            ServiceType::Surgery => "surgery",
            ServiceType::Emergency => "emergency",
        }
    }

    fn defaults(&self) -> (&'static str, &'static str) {
        match self {
            ServiceType::Checkup => ("General Checkup", "Routine health examination"),
            ServiceType::Vaccination => ("Vaccination", "Immunization services"),
            ServiceType::Grooming => ("Grooming", "Professional pet grooming"),
            ServiceType::Surgery => ("Surgery", "Surgical procedures"),
            ServiceType::Emergency => ("Emergency Care", "Urgent medical attention"),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service type: {0}")]
pub struct UnknownServiceType(pub String);

impl FromStr for ServiceType {
    type Err = UnknownServiceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkup" => Ok(ServiceType::Checkup),
            "vaccination" => Ok(ServiceType::Vaccination),
            "grooming" => Ok(ServiceType::Grooming),
            "surgery" => Ok(ServiceType::Surgery),
            "emergency" => Ok(ServiceType::Emergency),
            _ => Err(UnknownServiceType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceOption {
    pub id: ServiceType,
    pub label: String,
    pub description: String,
}

pub fn default_service_options() -> Vec<ServiceOption> {
    ServiceType::ALL
        .iter()
        .map(|s| {
            let (label, description) = s.defaults();
            ServiceOption {
                id: *s,
                label: label.to_string(),
                description: description.to_string(),
            }
        })
        .collect()
}

use serde::{Deserialize, Serialize};

use super::ServiceCategory;
use crate::errors::AppError;
use crate::events::Loggable;
use crate::utils::humanize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    // Clinic
    Vaccine,
    GeneralMedicine,
    Surgery,
    // Hotel
    Lodging,
    Recreation,
    Feeding,
    Transport,
    // Spa
    Grooming,
    PetProducts,
}

impl ServiceType {
    pub const ALL: [ServiceType; 9] = [
        ServiceType::Vaccine,
        ServiceType::GeneralMedicine,
        ServiceType::Surgery,
        ServiceType::Lodging,
        ServiceType::Recreation,
        ServiceType::Feeding,
        ServiceType::Transport,
        ServiceType::Grooming,
        ServiceType::PetProducts,
    ];

    pub fn category(&self) -> ServiceCategory {
        match self {
            ServiceType::Vaccine | ServiceType::GeneralMedicine | ServiceType::Surgery => {
                ServiceCategory::Clinic
            }
            ServiceType::Lodging
            | ServiceType::Recreation
            | ServiceType::Feeding
            | ServiceType::Transport => ServiceCategory::Hotel,
            ServiceType::Grooming | ServiceType::PetProducts => ServiceCategory::Spa,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Vaccine => "VACCINE",
            ServiceType::GeneralMedicine => "GENERAL_MEDICINE",
            ServiceType::Surgery => "SURGERY",
            ServiceType::Lodging => "LODGING",
            ServiceType::Recreation => "RECREATION",
            ServiceType::Feeding => "FEEDING",
            ServiceType::Transport => "TRANSPORT",
            ServiceType::Grooming => "GROOMING",
            ServiceType::PetProducts => "PET_PRODUCTS",
        }
    }

    /// Human label, e.g. `GENERAL_MEDICINE` -> `General Medicine`.
    pub fn label(&self) -> String {
        humanize(self.as_str())
    }

    pub fn parse(raw: &str) -> Option<ServiceType> {
        let normalized = raw.trim().to_ascii_uppercase().replace('-', "_");
        ServiceType::ALL.into_iter().find(|t| t.as_str() == normalized)
    }
}

impl std::str::FromStr for ServiceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::parse(s).ok_or_else(|| AppError::bad_request(format!("unknown service type `{s}`")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ServiceCategory,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub available: bool,
}

impl Loggable for Service {
    fn entity_type() -> &'static str { "service" }
    fn subject_id(&self) -> &str { &self.id }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// Moving a service to another line requires edit rights on both.
    pub category: Option<ServiceCategory>,
    #[serde(rename = "type")]
    pub service_type: Option<ServiceType>,
    pub available: Option<bool>,
}

/// Form-level checks shared by create and update.
pub(crate) fn validate_service_fields(
    name: &str,
    price: f64,
    category: ServiceCategory,
    service_type: ServiceType,
) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::bad_request("service name must not be empty"));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::bad_request("service price must be a non-negative amount"));
    }
    if service_type.category() != category {
        return Err(AppError::bad_request(format!(
            "service type {} does not belong to the {} category",
            service_type.as_str(),
            category.as_str()
        )));
    }
    Ok(())
}

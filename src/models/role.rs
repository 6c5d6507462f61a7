use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The fixed set of roles a session can be opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    GeneralManager,
    HotelEmployee,
    ClinicAdmin,
    SpaAssistant,
    Public,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::GeneralManager,
        Role::HotelEmployee,
        Role::ClinicAdmin,
        Role::SpaAssistant,
        Role::Public,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::GeneralManager => "GENERAL_MANAGER",
            Role::HotelEmployee => "HOTEL_EMPLOYEE",
            Role::ClinicAdmin => "CLINIC_ADMIN",
            Role::SpaAssistant => "SPA_ASSISTANT",
            Role::Public => "PUBLIC",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::GeneralManager => "General Manager",
            Role::HotelEmployee => "Hotel Employee",
            Role::ClinicAdmin => "Clinic Administrator",
            Role::SpaAssistant => "Spa Assistant",
            Role::Public => "Public User",
        }
    }

    /// Lenient parse: case-insensitive, `-` and `_` are interchangeable.
    /// Returns `None` for anything outside the closed set.
    pub fn parse(raw: &str) -> Option<Role> {
        let normalized = raw.trim().to_ascii_uppercase().replace('-', "_");
        Role::ALL.into_iter().find(|role| role.as_str() == normalized)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Role::Public)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| AppError::bad_request(format!("unknown role `{s}`")))
    }
}

/// Business line a service, PQR or permission rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    Clinic,
    Hotel,
    Spa,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 3] = [
        ServiceCategory::Clinic,
        ServiceCategory::Hotel,
        ServiceCategory::Spa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Clinic => "CLINIC",
            ServiceCategory::Hotel => "HOTEL",
            ServiceCategory::Spa => "SPA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Clinic => "Clinic",
            ServiceCategory::Hotel => "Hotel",
            ServiceCategory::Spa => "Spa",
        }
    }

    /// Route that lists this category's services.
    pub fn route(&self) -> &'static str {
        match self {
            ServiceCategory::Clinic => crate::authz::routes::CLINIC_SERVICES,
            ServiceCategory::Hotel => crate::authz::routes::HOTEL_SERVICES,
            ServiceCategory::Spa => crate::authz::routes::SPA_SERVICES,
        }
    }

    /// Role that administers only this category. Spa has none: its
    /// assistant holds blanket edit rights instead.
    pub fn admin_role(&self) -> Option<Role> {
        match self {
            ServiceCategory::Clinic => Some(Role::ClinicAdmin),
            ServiceCategory::Hotel => Some(Role::HotelEmployee),
            ServiceCategory::Spa => None,
        }
    }

    pub fn parse(raw: &str) -> Option<ServiceCategory> {
        let normalized = raw.trim().to_ascii_uppercase();
        ServiceCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceCategory::parse(s)
            .ok_or_else(|| AppError::bad_request(format!("unknown service category `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_lenient_but_closed() {
        assert_eq!(Role::parse("GENERAL_MANAGER"), Some(Role::GeneralManager));
        assert_eq!(Role::parse("spa-assistant"), Some(Role::SpaAssistant));
        assert_eq!(Role::parse(" public "), Some(Role::Public));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn role_serializes_screaming_snake() {
        let json = serde_json::to_string(&Role::ClinicAdmin).unwrap();
        assert_eq!(json, "\"CLINIC_ADMIN\"");
        let back: Role = serde_json::from_str("\"HOTEL_EMPLOYEE\"").unwrap();
        assert_eq!(back, Role::HotelEmployee);
    }

    #[test]
    fn category_admins() {
        assert_eq!(ServiceCategory::Clinic.admin_role(), Some(Role::ClinicAdmin));
        assert_eq!(ServiceCategory::Hotel.admin_role(), Some(Role::HotelEmployee));
        assert_eq!(ServiceCategory::Spa.admin_role(), None);
    }

    #[test]
    fn from_str_reports_unknown_values() {
        let err = "janitor".parse::<Role>().unwrap_err();
        assert_eq!(err.kind(), "bad_request");
        assert!("spa".parse::<ServiceCategory>().is_ok());
        assert!("grooming".parse::<ServiceCategory>().is_err());
    }
}

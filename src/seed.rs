//! Mock data the application starts with.
//!
//! The built-in set mirrors the demo fixtures; a JSON file with the same
//! shape can replace it via `PETCARE_SEED_PATH`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::{
    Pqr, PqrKind, PqrStatus, Report, ReportFrequency, ReportKind, Role, Service,
    ServiceCategory, ServiceType, User,
};
use crate::utils::utc_date;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub pqrs: Vec<Pqr>,
    #[serde(default)]
    pub reports: Vec<Report>,
}

impl SeedData {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path)?;
        let seed = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            users = seed.users.len(),
            services = seed.services.len(),
            pqrs = seed.pqrs.len(),
            reports = seed.reports.len(),
            "seed file loaded"
        );
        Ok(seed)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let de = &mut serde_json::Deserializer::from_str(raw);
        let seed: SeedData = serde_path_to_error::deserialize(de)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Ids must be unique per collection and every service type must
    /// belong to the service's category.
    pub fn validate(&self) -> AppResult<()> {
        ensure_unique("user", self.users.iter().map(|u| u.id.as_str()))?;
        ensure_unique("service", self.services.iter().map(|s| s.id.as_str()))?;
        ensure_unique("pqr", self.pqrs.iter().map(|p| p.id.as_str()))?;
        ensure_unique("report", self.reports.iter().map(|r| r.id.as_str()))?;

        if let Some(service) = self
            .services
            .iter()
            .find(|s| s.service_type.category() != s.category)
        {
            return Err(AppError::configuration(format!(
                "service {} has type {} outside category {}",
                service.id,
                service.service_type.as_str(),
                service.category
            )));
        }
        Ok(())
    }

    pub fn builtin() -> AppResult<Self> {
        Ok(Self {
            users: builtin_users(),
            services: builtin_services(),
            pqrs: builtin_pqrs()?,
            reports: builtin_reports()?,
        })
    }
}

fn ensure_unique<'a>(what: &str, ids: impl Iterator<Item = &'a str>) -> AppResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AppError::configuration(format!("duplicate {what} id `{id}`")));
        }
    }
    Ok(())
}

fn user(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar: None,
    }
}

fn builtin_users() -> Vec<User> {
    vec![
        user("1", "Ana Gómez", "ana@pethotel.com", Role::GeneralManager),
        user("2", "Carlos Rodríguez", "carlos@pethotel.com", Role::HotelEmployee),
        user("3", "Laura Martínez", "laura@pethotel.com", Role::ClinicAdmin),
        user("4", "Diego Sánchez", "diego@pethotel.com", Role::SpaAssistant),
        user("5", "Guest", "guest@example.com", Role::Public),
    ]
}

fn service(id: &str, name: &str, description: &str, price: f64, service_type: ServiceType) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: service_type.category(),
        service_type,
        available: true,
    }
}

fn builtin_services() -> Vec<Service> {
    vec![
        service("c1", "Annual Vaccination", "Complete annual vaccination package", 80.0, ServiceType::Vaccine),
        service("c2", "General Consultation", "Full physical examination", 50.0, ServiceType::GeneralMedicine),
        service("c3", "Dental Cleaning", "Professional dental cleaning under anesthesia", 200.0, ServiceType::Surgery),
        service("h1", "Standard Room", "A comfortable room for your pet", 40.0, ServiceType::Lodging),
        service("h2", "Play Time", "Supervised play sessions with other pets", 15.0, ServiceType::Recreation),
        service("h3", "Premium Feeding Package", "High quality food for your pet", 20.0, ServiceType::Feeding),
        service("h4", "Pickup/Delivery", "Transport service for your pet", 25.0, ServiceType::Transport),
        service("s1", "Basic Grooming", "Bath, brushing and nail trim", 35.0, ServiceType::Grooming),
        service("s2", "Full Grooming", "Complete grooming with styling", 60.0, ServiceType::Grooming),
        service("s3", "Premium Collar", "High quality collar for dogs or cats", 25.0, ServiceType::PetProducts),
    ]
}

fn builtin_pqrs() -> AppResult<Vec<Pqr>> {
    Ok(vec![
        Pqr {
            id: "p1".into(),
            customer_id: Some("1".into()),
            email: "maria@example.com".into(),
            kind: PqrKind::Complaint,
            category: ServiceCategory::Hotel,
            subject: "Room cleanliness".into(),
            message: "The room was not properly clean when we arrived".into(),
            date: utc_date(2023, 11, 16)?,
            status: PqrStatus::Resolved,
            response: Some(
                "We apologize for the inconvenience. We have spoken with our cleaning staff \
                 and are offering a discount on your next visit."
                    .into(),
            ),
            response_date: Some(utc_date(2023, 11, 18)?),
        },
        Pqr {
            id: "p2".into(),
            customer_id: None,
            email: "anonymous@example.com".into(),
            kind: PqrKind::Suggestion,
            category: ServiceCategory::Spa,
            subject: "Additional grooming services".into(),
            message: "It would be great to offer special treatments for older pets".into(),
            date: utc_date(2023, 12, 1)?,
            status: PqrStatus::Pending,
            response: None,
            response_date: None,
        },
    ])
}

fn builtin_reports() -> AppResult<Vec<Report>> {
    use Role::*;

    let report = |id: &str,
                  name: &str,
                  description: &str,
                  kind: ReportKind,
                  frequency: ReportFrequency,
                  last_generated: DateTime<Utc>,
                  access_roles: Vec<Role>| Report {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        kind,
        frequency,
        last_generated: Some(last_generated),
        access_roles,
    };

    Ok(vec![
        report(
            "r1",
            "Biweekly PQR Report",
            "Complaints and suggestions from the last two weeks",
            ReportKind::Pqr,
            ReportFrequency::Biweekly,
            utc_date(2023, 12, 1)?,
            vec![GeneralManager],
        ),
        report(
            "r2",
            "Weekly Services Report",
            "Ordered list of services delivered in the last week",
            ReportKind::Services,
            ReportFrequency::Weekly,
            utc_date(2023, 12, 7)?,
            vec![GeneralManager, HotelEmployee, ClinicAdmin, SpaAssistant],
        ),
        report(
            "r3",
            "Most Served Breeds",
            "Most common pet breeds served",
            ReportKind::Breeds,
            ReportFrequency::Biweekly,
            utc_date(2023, 12, 1)?,
            vec![GeneralManager, HotelEmployee],
        ),
        report(
            "r4",
            "Profit Report",
            "Biweekly profit by business line",
            ReportKind::Profit,
            ReportFrequency::Biweekly,
            utc_date(2023, 12, 1)?,
            vec![GeneralManager],
        ),
    ])
}

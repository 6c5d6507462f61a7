//! Service catalog for the clinic, hotel and spa lines.

use crate::authz::AccessPolicy;
use crate::errors::{AppError, AppResult};
use crate::models::service::validate_service_fields;
use crate::models::{
    Role, Service, ServiceCategory, ServiceCreateRequest, ServiceType, ServiceUpdateRequest,
};

#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    pub fn all(&self) -> &[Service] {
        &self.services
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Services of `category`, optionally narrowed to one type, in insertion order.
    pub fn list(
        &self,
        category: ServiceCategory,
        type_filter: Option<ServiceType>,
    ) -> impl Iterator<Item = &Service> + '_ {
        self.services
            .iter()
            .filter(move |s| s.category == category)
            .filter(move |s| type_filter.map_or(true, |t| s.service_type == t))
    }

    /// Distinct types present in `category`, first-seen order.
    pub fn type_options(&self, category: ServiceCategory) -> Vec<ServiceType> {
        let mut options = Vec::new();
        for service in self.list(category, None) {
            if !options.contains(&service.service_type) {
                options.push(service.service_type);
            }
        }
        options
    }

    /// Available services of `category`, cheapest first.
    pub fn available_by_category(&self, category: ServiceCategory) -> Vec<&Service> {
        let mut services: Vec<&Service> = self
            .list(category, None)
            .filter(|s| s.available)
            .collect();
        services.sort_by(|a, b| a.price.total_cmp(&b.price));
        services
    }

    pub fn create<P: AccessPolicy + ?Sized>(
        &mut self,
        policy: &P,
        role: Role,
        category: ServiceCategory,
        request: ServiceCreateRequest,
    ) -> AppResult<&Service> {
        if !policy.can_create_service(role, category) {
            return Err(AppError::forbidden(format!(
                "{role} may not create {category} services"
            )));
        }
        validate_service_fields(&request.name, request.price, category, request.service_type)?;

        let service = Service {
            id: self.next_id(category),
            name: request.name.trim().to_string(),
            description: request.description.trim().to_string(),
            price: request.price,
            category,
            service_type: request.service_type,
            available: request.available,
        };
        tracing::debug!(service_id = %service.id, role = %role, "service created");
        self.services.push(service);
        Ok(&self.services[self.services.len() - 1])
    }

    pub fn update<P: AccessPolicy + ?Sized>(
        &mut self,
        policy: &P,
        role: Role,
        id: &str,
        request: ServiceUpdateRequest,
    ) -> AppResult<&Service> {
        let index = self.index_of(id)?;
        let current = &self.services[index];

        if !policy.can_edit_service(role, current.category) {
            return Err(AppError::forbidden(format!(
                "{role} may not edit {} services",
                current.category
            )));
        }

        let category = request.category.unwrap_or(current.category);
        if category != current.category && !policy.can_edit_service(role, category) {
            return Err(AppError::forbidden(format!(
                "{role} may not move services into {category}"
            )));
        }

        let service_type = match request.service_type {
            Some(service_type) => service_type,
            // keep the type when it still fits, otherwise the caller must pick one
            None if current.service_type.category() == category => current.service_type,
            None => {
                return Err(AppError::bad_request(format!(
                    "a service type is required when moving to {category}"
                )))
            }
        };
        let name = request.name.unwrap_or_else(|| current.name.clone());
        let price = request.price.unwrap_or(current.price);
        validate_service_fields(&name, price, category, service_type)?;

        let service = &mut self.services[index];
        service.name = name.trim().to_string();
        if let Some(description) = request.description {
            service.description = description.trim().to_string();
        }
        service.price = price;
        service.category = category;
        service.service_type = service_type;
        if let Some(available) = request.available {
            service.available = available;
        }
        tracing::debug!(service_id = %service.id, role = %role, "service updated");
        Ok(service)
    }

    pub fn delete<P: AccessPolicy + ?Sized>(
        &mut self,
        policy: &P,
        role: Role,
        id: &str,
    ) -> AppResult<Service> {
        let index = self.index_of(id)?;
        if !policy.can_delete_service(role) {
            return Err(AppError::forbidden(format!("{role} may not delete services")));
        }
        let removed = self.services.remove(index);
        tracing::debug!(service_id = %removed.id, role = %role, "service deleted");
        Ok(removed)
    }

    fn index_of(&self, id: &str) -> AppResult<usize> {
        self.services
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("service {id}")))
    }

    /// Category initial plus a counter, skipping ids already taken.
    fn next_id(&self, category: ServiceCategory) -> String {
        let prefix = category.as_str().chars().next().unwrap_or('x').to_ascii_lowercase();
        let mut counter = self.services.len() + 1;
        loop {
            let candidate = format!("{prefix}{counter}");
            if self.get(&candidate).is_none() {
                return candidate;
            }
            counter += 1;
        }
    }
}

//! PQR desk: customer complaints, questions and suggestions.

use serde::Deserialize;

use crate::authz::{actions, AccessPolicy};
use crate::errors::{AppError, AppResult};
use crate::models::{Pqr, PqrStatus, PqrSubmitRequest, Role, ServiceCategory};
use crate::utils::{is_valid_email, utc_now};

/// Listing criteria. An empty filter matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PqrFilter {
    /// `None` is the "all" tab.
    pub status: Option<PqrStatus>,
    pub category: Option<ServiceCategory>,
    /// Case-insensitive match against subject or message.
    pub search: Option<String>,
}

impl PqrFilter {
    pub fn matches(&self, pqr: &Pqr) -> bool {
        if self.status.is_some_and(|status| pqr.status != status) {
            return false;
        }
        if self.category.is_some_and(|category| pqr.category != category) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                pqr.subject.to_lowercase().contains(&needle)
                    || pqr.message.to_lowercase().contains(&needle)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PqrDesk {
    pqrs: Vec<Pqr>,
}

impl PqrDesk {
    pub fn new(pqrs: Vec<Pqr>) -> Self {
        Self { pqrs }
    }

    pub fn all(&self) -> &[Pqr] {
        &self.pqrs
    }

    pub fn get(&self, id: &str) -> Option<&Pqr> {
        self.pqrs.iter().find(|p| p.id == id)
    }

    pub fn filter<'a, 'f>(&'a self, filter: &'f PqrFilter) -> impl Iterator<Item = &'a Pqr> + 'f
    where
        'a: 'f,
    {
        self.pqrs.iter().filter(move |pqr| filter.matches(pqr))
    }

    /// Anyone who can open the PQR page may submit.
    pub fn submit(&mut self, request: PqrSubmitRequest) -> AppResult<&Pqr> {
        if !is_valid_email(&request.email) {
            return Err(AppError::bad_request("a valid email address is required"));
        }
        if request.subject.trim().is_empty() {
            return Err(AppError::bad_request("subject must not be empty"));
        }
        if request.message.trim().is_empty() {
            return Err(AppError::bad_request("message must not be empty"));
        }

        let pqr = Pqr {
            id: self.next_id(),
            customer_id: request.customer_id,
            email: request.email.trim().to_string(),
            kind: request.kind,
            category: request.category,
            subject: request.subject.trim().to_string(),
            message: request.message.trim().to_string(),
            date: utc_now(),
            status: PqrStatus::Pending,
            response: None,
            response_date: None,
        };
        tracing::debug!(pqr_id = %pqr.id, category = %pqr.category, "pqr submitted");
        self.pqrs.push(pqr);
        Ok(&self.pqrs[self.pqrs.len() - 1])
    }

    /// Move a PQR between Pending and InProgress (or straight to Resolved
    /// without a response). Resolved PQRs are frozen.
    pub fn set_status<P: AccessPolicy + ?Sized>(
        &mut self,
        policy: &P,
        role: Role,
        id: &str,
        status: PqrStatus,
    ) -> AppResult<&Pqr> {
        let pqr = self.open_for_manager(policy, role, id)?;
        pqr.status = status;
        tracing::debug!(pqr_id = %pqr.id, status = status.as_str(), "pqr status changed");
        Ok(pqr)
    }

    /// Record the manager's answer and close the PQR.
    pub fn resolve<P: AccessPolicy + ?Sized>(
        &mut self,
        policy: &P,
        role: Role,
        id: &str,
        response: &str,
    ) -> AppResult<&Pqr> {
        let response = response.trim();
        if response.is_empty() {
            return Err(AppError::bad_request("a response is required to resolve a PQR"));
        }
        let pqr = self.open_for_manager(policy, role, id)?;
        pqr.status = PqrStatus::Resolved;
        pqr.response = Some(response.to_string());
        pqr.response_date = Some(utc_now());
        tracing::debug!(pqr_id = %pqr.id, "pqr resolved");
        Ok(pqr)
    }

    fn open_for_manager<P: AccessPolicy + ?Sized>(
        &mut self,
        policy: &P,
        role: Role,
        id: &str,
    ) -> AppResult<&mut Pqr> {
        if !policy.can_perform(role, actions::PQRS_MANAGE) {
            return Err(AppError::forbidden(format!("{role} may not manage PQRs")));
        }
        let pqr = self
            .pqrs
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("pqr {id}")))?;
        if pqr.is_resolved() {
            return Err(AppError::conflict(format!("pqr {id} is already resolved")));
        }
        Ok(pqr)
    }

    fn next_id(&self) -> String {
        let mut counter = self.pqrs.len() + 1;
        loop {
            let candidate = format!("p{counter}");
            if self.get(&candidate).is_none() {
                return candidate;
            }
            counter += 1;
        }
    }
}

pub mod pqr;
pub mod report;
pub mod role;
pub mod service;
pub mod user;

pub use pqr::{Pqr, PqrKind, PqrStatus, PqrSubmitRequest};
pub use report::{Report, ReportFrequency, ReportKind};
pub use role::{Role, ServiceCategory};
pub use service::{Service, ServiceCreateRequest, ServiceType, ServiceUpdateRequest};
pub use user::User;

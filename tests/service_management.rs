use anyhow::Result;

use petcare_hub::models::{Role, ServiceCategory, ServiceCreateRequest, ServiceType, ServiceUpdateRequest};
use petcare_hub::{create_app, AppConfig};

fn new_service(name: &str, price: f64, service_type: ServiceType) -> ServiceCreateRequest {
    ServiceCreateRequest {
        name: name.to_string(),
        description: String::new(),
        price,
        service_type,
        available: true,
    }
}

#[test]
fn clinic_admin_manages_clinic_line_only() -> Result<()> {
    let mut app = create_app(AppConfig::default())?;
    let session = app.login_as(Role::ClinicAdmin)?;

    let created = app.create_service(
        &session,
        ServiceCategory::Clinic,
        new_service("Deworming", 25.0, ServiceType::GeneralMedicine),
    )?;
    assert_eq!(created.id, "c11");
    assert_eq!(created.category, ServiceCategory::Clinic);

    let err = app
        .create_service(
            &session,
            ServiceCategory::Hotel,
            new_service("Suite", 90.0, ServiceType::Lodging),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "forbidden");

    let err = app
        .update_service(
            &session,
            "h1",
            ServiceUpdateRequest {
                price: Some(45.0),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), "forbidden");

    let err = app.delete_service(&session, "c11").unwrap_err();
    assert_eq!(err.kind(), "forbidden");
    assert!(app.catalog().get("c11").is_some());

    Ok(())
}

#[test]
fn general_manager_deletes_and_moves_services() -> Result<()> {
    let mut app = create_app(AppConfig::default())?;
    let session = app.login_as(Role::GeneralManager)?;

    let moved = app.update_service(
        &session,
        "h2",
        ServiceUpdateRequest {
            category: Some(ServiceCategory::Spa),
            service_type: Some(ServiceType::Grooming),
            ..Default::default()
        },
    )?;
    assert_eq!(moved.category, ServiceCategory::Spa);
    assert_eq!(moved.service_type, ServiceType::Grooming);

    let removed = app.delete_service(&session, "c1")?;
    assert_eq!(removed.id, "c1");
    assert!(app.catalog().get("c1").is_none());

    let err = app.delete_service(&session, "c1").unwrap_err();
    assert_eq!(err.kind(), "not_found");

    Ok(())
}

#[test]
fn moving_without_a_fitting_type_is_rejected() -> Result<()> {
    let mut app = create_app(AppConfig::default())?;
    let session = app.login_as(Role::GeneralManager)?;

    let err = app
        .update_service(
            &session,
            "h1",
            ServiceUpdateRequest {
                category: Some(ServiceCategory::Clinic),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), "bad_request");
    assert_eq!(app.catalog().get("h1").map(|s| s.category), Some(ServiceCategory::Hotel));

    Ok(())
}

#[test]
fn service_page_reflects_role() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let hotel = app.login_as(Role::HotelEmployee)?;
    let page = app.service_page(&hotel, ServiceCategory::Clinic, None);
    assert!(!page.can_add);
    assert!(page.cards.iter().all(|card| !card.can_edit && !card.can_delete));

    let spa = app.login_as(Role::SpaAssistant)?;
    let page = app.service_page(&spa, ServiceCategory::Clinic, None);
    assert!(page.can_add);
    assert!(page.cards.iter().all(|card| card.can_edit && !card.can_delete));

    let manager = app.login_as(Role::GeneralManager)?;
    let page = app.service_page(&manager, ServiceCategory::Hotel, Some(ServiceType::Lodging));
    assert!(page.cards.iter().all(|card| card.service.service_type == ServiceType::Lodging));
    assert!(page.cards.iter().all(|card| card.can_delete));

    Ok(())
}

#[test]
fn guests_land_on_dashboard_when_route_is_closed() -> Result<()> {
    let app = create_app(AppConfig::default())?;
    let guest = app.guest_login()?;

    assert!(app.open(&guest, "pricing").is_allowed());
    let decision = app.open(&guest, "hotel-services");
    assert!(!decision.is_allowed());
    assert_eq!(decision.route(), "dashboard");

    let routes: Vec<&str> = app.navigation(&guest).iter().map(|item| item.route).collect();
    assert_eq!(routes, vec!["dashboard", "pricing", "pqrs"]);

    Ok(())
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use petcare_hub::authz::{actions, routes, AccessPolicy};
use petcare_hub::models::{PqrStatus, Role, ServiceCategory, ServiceType};
use petcare_hub::pqrs::PqrFilter;
use petcare_hub::{create_app, AppConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "PetCare Hub back office", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List roles with their display name and landing route
    Roles,
    /// Print the route and action matrix for every role
    Matrix,
    /// Show the navigation a role gets
    Nav {
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },
    /// Check whether a role may open a route
    Check {
        #[arg(long, value_parser = parse_role)]
        role: Role,
        #[arg(long)]
        route: String,
    },
    /// Render the service page of a category
    Services {
        #[arg(long, value_parser = parse_role)]
        role: Role,
        #[arg(long, value_parser = parse_category)]
        category: ServiceCategory,
        #[arg(long = "type", value_parser = parse_service_type)]
        service_type: Option<ServiceType>,
    },
    /// Render the report page
    Reports {
        #[arg(long, value_parser = parse_role)]
        role: Role,
        /// Report id to show as active
        #[arg(long)]
        active: Option<String>,
    },
    /// Render the PQR page
    Pqrs {
        #[arg(long, value_parser = parse_role)]
        role: Role,
        #[arg(long, value_parser = parse_status)]
        status: Option<PqrStatus>,
        #[arg(long, value_parser = parse_category)]
        category: Option<ServiceCategory>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Render the dashboard
    Dashboard {
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },
    /// Render the public pricing page
    Pricing {
        #[arg(long, value_parser = parse_category)]
        category: Option<ServiceCategory>,
    },
}

#[derive(Serialize)]
struct RoleRow {
    role: Role,
    name: &'static str,
    landing: &'static str,
}

#[derive(Serialize)]
struct MatrixRow {
    role: Role,
    routes: Vec<&'static str>,
    actions: Vec<&'static str>,
    edit_categories: Vec<ServiceCategory>,
    can_delete_services: bool,
}

fn main() -> anyhow::Result<()> {
    load_env();
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to read configuration")?;
    let app = create_app(config).context("failed to build application state")?;
    let resolver = app.resolver();

    match cli.command {
        Commands::Roles => {
            let rows: Vec<RoleRow> = Role::ALL
                .into_iter()
                .map(|role| RoleRow {
                    role,
                    name: role.display_name(),
                    landing: resolver.default_landing_route(role),
                })
                .collect();
            print_json(&rows)?;
        }
        Commands::Matrix => {
            let rows: Vec<MatrixRow> = Role::ALL
                .into_iter()
                .map(|role| MatrixRow {
                    role,
                    routes: routes::ALL
                        .into_iter()
                        .filter(|route| resolver.can_access_route(role, route))
                        .collect(),
                    actions: actions::ALL
                        .into_iter()
                        .filter(|action| resolver.can_perform(role, action))
                        .collect(),
                    edit_categories: ServiceCategory::ALL
                        .into_iter()
                        .filter(|category| resolver.can_edit_service(role, *category))
                        .collect(),
                    can_delete_services: resolver.can_delete_service(role),
                })
                .collect();
            print_json(&rows)?;
        }
        Commands::Nav { role } => {
            let session = app.login_as(role)?;
            print_json(&app.navigation(&session))?;
        }
        Commands::Check { role, route } => {
            let session = app.login_as(role)?;
            print_json(&app.open(&session, &route))?;
        }
        Commands::Services {
            role,
            category,
            service_type,
        } => {
            let session = app.login_as(role)?;
            let decision = app.open(&session, category.route());
            if decision.is_allowed() {
                print_json(&app.service_page(&session, category, service_type))?;
            } else {
                print_json(&decision)?;
            }
        }
        Commands::Reports { role, active } => {
            let session = app.login_as(role)?;
            let decision = app.open(&session, routes::REPORTS);
            if decision.is_allowed() {
                print_json(&app.report_page(&session, active.as_deref()))?;
            } else {
                print_json(&decision)?;
            }
        }
        Commands::Pqrs {
            role,
            status,
            category,
            search,
        } => {
            let session = app.login_as(role)?;
            let filter = PqrFilter {
                status,
                category,
                search,
            };
            print_json(&app.pqr_page(&session, &filter))?;
        }
        Commands::Dashboard { role } => {
            let session = app.login_as(role)?;
            print_json(&app.dashboard(&session))?;
        }
        Commands::Pricing { category } => {
            print_json(&app.pricing_page(category))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse::<Role>().map_err(|err| err.to_string())
}

fn parse_category(raw: &str) -> Result<ServiceCategory, String> {
    raw.parse::<ServiceCategory>().map_err(|err| err.to_string())
}

fn parse_service_type(raw: &str) -> Result<ServiceType, String> {
    raw.parse::<ServiceType>().map_err(|err| err.to_string())
}

fn parse_status(raw: &str) -> Result<PqrStatus, String> {
    PqrStatus::parse(raw).ok_or_else(|| format!("unknown PQR status `{raw}`"))
}

fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    let _ = dotenvy::from_path(crate_env);
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    // logs go to stderr so stdout stays pure JSON
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

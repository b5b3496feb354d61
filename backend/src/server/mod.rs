//! Server wiring: environment configuration, state construction, and the
//! HTTP server loop.

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{App, HttpServer, Scope, web};
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{CatalogRepository, LoanRepository, UserRepository};
use crate::domain::{AccountDirectory, CatalogueService, CirculationService, StatisticsService};
use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{catalogue, circulation, statistics, users};
use crate::middleware::trace::Trace;
use crate::outbound::persistence::{JsonFileStore, MemoryStore};

/// Runtime configuration, read from the environment with safe defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address for the HTTP server, from `BIND_ADDR`.
    pub bind_addr: String,
    /// Data directory for the JSON store, from `DATA_DIR`; records stay in
    /// memory when unset.
    pub data_dir: Option<PathBuf>,
    /// Seed example data into empty stores, from `EXAMPLE_DATA=1`.
    pub seed_example_data: bool,
}

impl ServerConfig {
    /// Read the configuration from the environment.
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
        let data_dir = env::var_os("DATA_DIR").map(PathBuf::from);
        if data_dir.is_none() {
            warn!("DATA_DIR not set; records are stored in memory only");
        }
        let seed_example_data = env::var("EXAMPLE_DATA").ok().as_deref() == Some("1");
        Self {
            bind_addr,
            data_dir,
            seed_example_data,
        }
    }
}

/// Build the handler state over the configured store.
pub async fn build_state(config: &ServerConfig) -> io::Result<HttpState> {
    match &config.data_dir {
        Some(dir) => init_state(Arc::new(JsonFileStore::open(dir)?), config).await,
        None => init_state(Arc::new(MemoryStore::new()), config).await,
    }
}

async fn init_state<S>(store: Arc<S>, config: &ServerConfig) -> io::Result<HttpState>
where
    S: CatalogRepository + LoanRepository + UserRepository + 'static,
{
    if config.seed_example_data {
        #[cfg(feature = "example-data")]
        seed_empty_store(store.as_ref()).await.map_err(io::Error::other)?;
        #[cfg(not(feature = "example-data"))]
        warn!("EXAMPLE_DATA=1 but the example-data feature is not compiled in");
    }

    Ok(state_from_store(store, Arc::new(DefaultClock)))
}

/// Wire every domain service over one store implementing all repositories.
pub fn state_from_store<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> HttpState
where
    S: CatalogRepository + LoanRepository + UserRepository + 'static,
{
    let circulation = Arc::new(CirculationService::new(
        store.clone(),
        store.clone(),
        clock.clone(),
    ));
    let statistics = Arc::new(StatisticsService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
    ));
    let catalogue = Arc::new(CatalogueService::new(store.clone()));
    let accounts = Arc::new(AccountDirectory::new(store, clock));

    HttpState {
        circulation: circulation.clone(),
        loans: circulation,
        statistics,
        catalogue: catalogue.clone(),
        catalogue_query: catalogue,
        accounts,
    }
}

/// Seed an empty store with the example catalogue and administrator.
#[cfg(feature = "example-data")]
async fn seed_empty_store<S>(store: &S) -> Result<(), String>
where
    S: CatalogRepository + UserRepository,
{
    use chrono::Utc;

    use crate::domain::ports::NewUser;
    use crate::domain::{NewBook, Role, password_digest};

    let books = CatalogRepository::list(store).await.map_err(|err| err.to_string())?;
    if books.is_empty() {
        for seed in example_data::CATALOGUE {
            CatalogRepository::insert(
                store,
                NewBook {
                    isbn: seed.isbn.to_owned(),
                    title: seed.title.to_owned(),
                    author: seed.author.to_owned(),
                    publisher: seed.publisher.to_owned(),
                    category: seed.category.to_owned(),
                    price: seed.price,
                    total: seed.total,
                    publish_date: seed.publish_date.to_owned(),
                    description: seed.description.to_owned(),
                },
            )
            .await
            .map_err(|err| err.to_string())?;
        }
        info!(count = example_data::CATALOGUE.len(), "seeded example catalogue");
    }

    let users = UserRepository::list(store).await.map_err(|err| err.to_string())?;
    if users.is_empty() {
        let admin = example_data::ADMINISTRATOR;
        UserRepository::insert(
            store,
            NewUser {
                username: admin.username.to_owned(),
                password_digest: password_digest(admin.password),
                role: Role::Admin,
                name: admin.name.to_owned(),
                email: admin.email.to_owned(),
                phone: admin.phone.to_owned(),
                created_at: Utc::now(),
            },
        )
        .await
        .map_err(|err| err.to_string())?;
        info!(username = admin.username, "seeded administrator account");
    }

    Ok(())
}

/// All REST endpoints under `/api`.
///
/// `books/categories` is registered ahead of the `books/{id}` matcher so the
/// literal segment wins.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(circulation::borrow_book)
        .service(circulation::return_book)
        .service(circulation::list_loans)
        .service(statistics::get_statistics)
        .service(catalogue::list_categories)
        .service(catalogue::list_books)
        .service(catalogue::get_book)
        .service(catalogue::create_book)
        .service(catalogue::update_book)
        .service(catalogue::delete_book)
        .service(users::register)
        .service(users::login)
        .service(users::list_users)
        .service(users::update_user)
        .service(users::delete_user)
}

/// Application bootstrap: build state, bind, and serve until shutdown.
pub async fn run() -> io::Result<()> {
    let config = ServerConfig::from_env();
    let state = web::Data::new(build_state(&config).await?);
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays shared.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(api_scope())
            .service(health::ready)
            .service(health::live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr.as_str())?;

    info!(bind_addr = %config.bind_addr, "server listening");
    health_state.mark_ready();
    server.run().await
}

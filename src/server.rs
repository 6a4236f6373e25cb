//! Server runtime
//!
//! [`ServerHandle`] owns the full lifecycle: database connection and
//! migrations, bootstrap admin, REST API and graceful shutdown.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::RentalServices;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::PasswordHasher;
use crate::infrastructure::{init_database, Migrator, SeaOrmRepositoryProvider};
use crate::interfaces::http::create_api_router;
use crate::shared::{
    listen_for_shutdown_signals, retry_transient, AppError, DomainError, InfraError, KeyedLocks,
    RetryConfig, ShutdownSignal, SystemClock,
};

/// Options for starting the server
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true)
    pub auto_migrate: bool,
    /// Create the configured admin when no user exists (default: true)
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

/// Handle to a running server
pub struct ServerHandle {
    pub services: Arc<RentalServices>,
    pub config: AppConfig,
    db: DatabaseConnection,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global recorder can be installed once per process
fn prometheus_handle() -> Result<PrometheusHandle, InfraError> {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    if let Some(handle) = HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| InfraError::Config(format!("Failed to install metrics recorder: {}", e)))?;
    info!("Prometheus metrics recorder installed");
    Ok(HANDLE.get_or_init(|| handle).clone())
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let config = opts.config;
        info!("Starting fleet rental service...");

        let prometheus = prometheus_handle()?;

        let db_config = config.database_config();
        let db = retry_transient(
            RetryConfig::default(),
            || async { init_database(&db_config).await.map_err(DomainError::from) },
            "database connect",
        )
        .await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await.map_err(InfraError::from)?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let jwt_config = config.jwt_config();
        info!(
            expiration_hours = jwt_config.expiration_hours,
            "JWT configured"
        );

        let services = Arc::new(RentalServices::new(
            repos,
            KeyedLocks::shared(config.lock_timeout()),
            Arc::new(SystemClock),
            jwt_config.clone(),
            PasswordHasher::default(),
        ));

        if opts.create_default_admin {
            match services
                .identity
                .ensure_bootstrap_admin(&config.admin.email, &config.admin.password)
                .await
            {
                Ok(true) => warn!(
                    email = %config.admin.email,
                    "Default admin created; change its password"
                ),
                Ok(false) => {}
                Err(e) => error!("Failed to create admin user: {}", e),
            }
        }

        let router = create_api_router(services.clone(), db.clone(), jwt_config, prometheus);

        let addr = config.server.address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| InfraError::Config(format!("Cannot bind {}: {}", addr, e)))?;
        info!("REST API listening on http://{}", addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_task = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API received shutdown signal");
            });
            if let Err(e) = server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            services,
            config,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Trigger shutdown on SIGTERM / SIGINT
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    /// Wait until the API has drained (bounded by `server.shutdown_timeout`
    /// once shutdown is triggered), then close the database.
    pub async fn wait(self) {
        let ServerHandle {
            config,
            db,
            shutdown,
            mut api_task,
            ..
        } = self;

        tokio::select! {
            result = &mut api_task => {
                if let Err(e) = result {
                    error!("REST API task failed: {}", e);
                }
            }
            _ = async {
                shutdown.wait().await;
                tokio::time::sleep(config.shutdown_timeout()).await;
            } => {
                warn!("Shutdown timeout elapsed with requests still in flight");
                api_task.abort();
            }
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
        info!("Shutdown complete");
    }

    pub async fn shutdown(self) {
        self.shutdown.trigger();
        self.wait().await;
    }
}

/// Initialize tracing from the configuration. `RUST_LOG` wins over
/// `logging.level` when set.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

use crate::server::{config::Config, error::AppError};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the
/// `panel_server` schema is up-to-date. This function must complete successfully before
/// the server registry is initialized.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client shared by every panel client.
///
/// Redirects are not followed and reqwest keeps no cookie store; each panel client
/// tracks its own session cookie.
///
/// # Arguments
/// - `config` - Application configuration containing the per-request timeout
///
/// # Returns
/// - `Ok(reqwest::Client)` - Client ready for use
/// - `Err(AppError::InternalErr)` - TLS backend could not be initialized
pub fn setup_reqwest_client(config: &Config) -> Result<reqwest::Client, AppError> {
    use crate::server::error::internal::InternalError;

    let client = reqwest::Client::builder()
        .timeout(config.panel_request_timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(InternalError::HttpClientBuild)?;

    Ok(client)
}

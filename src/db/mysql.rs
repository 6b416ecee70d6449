use std::io::ErrorKind;
use std::time::Duration;

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};

use crate::config::Config;

/// Creates a MySQL connection pool
///
/// The pool is bounded at 10 concurrent connections; excess acquisition
/// requests queue until `acquire_timeout` elapses. Construction is lazy,
/// so connectivity is proven by [`verify_connection`] rather than here.
pub fn create_pool(config: &Config) -> MySqlPool {
    let options = MySqlConnectOptions::new()
        .host(&config.db_host)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name);

    MySqlPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(60))
        .idle_timeout(Duration::from_secs(60))
        .test_before_acquire(true)
        .connect_lazy_with(options)
}

/// Logs a pool-level error.
///
/// For the transient network classes (connection reset, host not found,
/// connection refused) an informational reconnect line is logged as well;
/// no corrective action is taken, reconnection is the pool's own job.
pub fn observe_pool_error(err: &sqlx::Error) {
    tracing::error!(error = %err, "Database pool error");
    if is_transient_network_error(err) {
        tracing::info!("Attempting to reconnect to database...");
    }
}

fn is_transient_network_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(io) => matches!(
            io.kind(),
            ErrorKind::ConnectionReset | ErrorKind::NotFound | ErrorKind::ConnectionRefused
        ),
        _ => false,
    }
}

/// Startup connectivity probe: acquire one connection and release it.
///
/// Runs exactly once at process startup. On failure the error has already
/// been reported through [`observe_pool_error`]; the caller decides whether
/// to abort the process.
pub async fn verify_connection(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    match pool.acquire().await {
        Ok(conn) => {
            tracing::info!("Database connection successful");
            drop(conn);
            Ok(())
        }
        Err(err) => {
            observe_pool_error(&err);
            Err(err)
        }
    }
}

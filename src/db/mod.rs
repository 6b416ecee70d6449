pub mod mysql;

pub use mysql::create_pool;
pub use mysql::observe_pool_error;
pub use mysql::verify_connection;

//! Database connection management module
//! Resolves the employees database URL from the environment and hands out scoped sessions

pub mod config;
pub mod conn_url;
pub mod connection;
pub mod error;
pub mod redact;
pub mod session;

pub use config::{resolve, ConnectionSpec, UrlSource};
pub use conn_url::{normalize_scheme, ConnectionParts};
pub use connection::{connect, init, DbContext, DbSession, SeaOrmSessions};
pub use error::DbError;
pub use redact::{redact, RedactedUrl, PASSWORD_MASK};
pub use session::{acquire, with_session, SessionFactory, SessionGuard};

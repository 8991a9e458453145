pub mod auth;
pub mod commerce;
pub mod error;
pub mod interactions;
pub mod middleware;
pub mod notifications;
pub mod posts;
pub mod profiles;

use tracing::warn;
use uuid::Uuid;

/// Row ids come back from SQLite as text; a parse failure means a
/// corrupt row, which we log and surface as a nil uuid rather than
/// failing the whole response.
pub(crate) fn parse_uuid(field: &str, value: &str) -> Uuid {
    value.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} '{}': {}", field, value, e);
        Uuid::default()
    })
}

use crate::error::Result;
use crate::models::{Host, Hotel};
use async_trait::async_trait;

/// Common trait for everything that can supply hotels and hosts.
/// The search view-model only talks to this, so the HTTP client and the
/// built-in fixtures are interchangeable.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch hotels, reporting failures instead of hiding them
    async fn try_fetch_hotels(&self) -> Result<Vec<Hotel>>;

    /// Fetch hosts, reporting failures instead of hiding them
    async fn try_fetch_hosts(&self) -> Result<Vec<Host>>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}

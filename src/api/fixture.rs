use crate::api::traits::CatalogSource;
use crate::error::Result;
use crate::mock::fixtures;
use crate::models::{Host, Hotel};
use async_trait::async_trait;
use tracing::debug;

/// Catalog backed by the built-in sample hotels and hosts
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    hotels: Vec<Hotel>,
    hosts: Vec<Host>,
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::new(fixtures::hotels(), fixtures::hosts())
    }
}

impl FixtureCatalog {
    pub fn new(hotels: Vec<Hotel>, hosts: Vec<Host>) -> Self {
        Self { hotels, hosts }
    }
}

#[async_trait]
impl CatalogSource for FixtureCatalog {
    async fn try_fetch_hotels(&self) -> Result<Vec<Hotel>> {
        debug!("Serving {} sample hotels", self.hotels.len());
        Ok(self.hotels.clone())
    }

    async fn try_fetch_hosts(&self) -> Result<Vec<Host>> {
        debug!("Serving {} sample hosts", self.hosts.len());
        Ok(self.hosts.clone())
    }

    fn source_name(&self) -> &'static str {
        "fixtures"
    }
}

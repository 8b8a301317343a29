use crate::config::Config;
use crate::db::Db;
use crate::error::InfraError;
use crate::repo::cache_mem::SWEEP_INTERVAL;
use crate::repo::{CacheRepo, CatalogRepo, MemoryCache, PgCache, XivApiCatalog};
use crate::services::{CatalogService, RecipeService};
use std::sync::Arc;

pub struct Services {
    pub catalog: Arc<CatalogService>,
    pub recipe: Arc<RecipeService>,
}

/// Process-wide handles, built once at start-up and shared by every invocation.
pub struct Registry {
    pub config: Arc<Config>,
    pub services: Services,
}

impl Registry {
    pub fn new(config: Config, catalog: Arc<dyn CatalogRepo>, cache: Arc<dyn CacheRepo>) -> Self {
        let catalog = Arc::new(CatalogService::new(
            catalog,
            cache,
            config.item_search_limit,
            config.cache_expiry(),
        ));
        let recipe = Arc::new(RecipeService::new(catalog.clone()));

        Self {
            config: Arc::new(config),
            services: Services { catalog, recipe },
        }
    }

    /// Wires the production adapters: xivapi over HTTP, and Postgres as cache when a
    /// database url is configured (in-memory otherwise).
    pub async fn from_config(config: Config) -> Result<Self, InfraError> {
        let catalog: Arc<dyn CatalogRepo> = Arc::new(XivApiCatalog::new(&config)?);

        let cache: Arc<dyn CacheRepo> = match config.database_url.as_deref() {
            Some(url) => {
                let db = Db::new(url)?;
                db.init().await?;
                tracing::info!("using postgres cache");
                Arc::new(PgCache::new(Arc::new(db)))
            }
            None => {
                tracing::info!("using in-memory cache");
                let cache = Arc::new(MemoryCache::new());
                MemoryCache::spawn_sweeper(&cache, SWEEP_INTERVAL);
                cache
            }
        };

        Ok(Self::new(config, catalog, cache))
    }
}

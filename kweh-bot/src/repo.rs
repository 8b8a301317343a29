mod error;

pub mod catalog;
pub mod catalog_http;

pub mod cache;
pub mod cache_mem;
pub mod cache_db;

pub use error::{RepoError, RepoResult};
pub use catalog::CatalogRepo;
pub use catalog_http::XivApiCatalog;
pub use cache::CacheRepo;
pub use cache_mem::MemoryCache;
pub use cache_db::PgCache;

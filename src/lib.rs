pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;

pub use crate::api::{build_router, AppState};
pub use crate::config::ServerConfig;
pub use crate::core::{cache::CachedCatalogSource, fetcher::HttpCatalogSource, query::query};
pub use crate::domain::model::{Catalog, Item, QueryParameters, ResultPage};
pub use crate::domain::ports::CatalogSource;
pub use crate::utils::error::{FetchError, LibraryError, Result};

pub mod cache;
pub mod fetcher;
pub mod images;
pub mod query;

pub use crate::domain::model::{Catalog, Item, QueryParameters, ResultPage};
pub use crate::domain::ports::CatalogSource;
pub use crate::utils::error::Result;

pub mod catalog_localizer;

pub use catalog_localizer::{CatalogLocalizer, Catalogs};

pub mod errors;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod locale;
pub mod routes;
pub mod templates;
pub mod views;

// Re-export commonly used types
pub use errors::WebError;
pub use locale::RequestLocale;
pub use routes::{InvoiceRouteDependencies, configure_invoice_routes};
pub use templates::{DEFAULT_TEMPLATES, TemplateEngine};

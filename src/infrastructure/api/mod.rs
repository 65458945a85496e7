pub mod http_invoice_repository;
pub mod in_memory_invoice_repository;
pub mod records;

pub use http_invoice_repository::HttpInvoiceRepository;
pub use in_memory_invoice_repository::InMemoryInvoiceRepository;
pub use records::{InvoiceRecord, LineItemRecord, parse_api_date};

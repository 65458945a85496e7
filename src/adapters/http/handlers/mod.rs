pub mod invoices_web;
pub mod language_web;

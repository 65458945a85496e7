pub mod invoice;
pub mod presentation;

pub mod entities;
pub mod errors;
pub mod form;
pub(crate) mod lenient;
pub mod line_items;
pub mod payload;
pub mod ports;
pub mod value_objects;

pub use entities::{Invoice, LineItem, Party};
pub use errors::{FormError, RepositoryError};
pub use form::{InvoiceFormModel, InvoiceSource, ValidationResult};
pub use line_items::LineItemCollection;
pub use payload::{DATE_FORMAT, LineItemPayload, PersistablePayload};
pub use ports::InvoiceRepository;
pub use value_objects::{
  FieldPath, ItemField, LineItemKey, LineValue, PartyField, PartyRole, ValueObjectError,
};

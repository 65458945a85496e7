pub mod delete_invoice;
pub mod form_controller;
pub mod list_invoices;

pub use delete_invoice::{DeleteInvoiceCommand, DeleteInvoiceUseCase};
pub use form_controller::{
  ControllerError, FormCollaborators, FormFlow, FormState, InvoiceFormController, LoadFailure,
  SubmitOutcome,
};
pub use list_invoices::{InvoiceListItemDto, ListInvoicesResponse, ListInvoicesUseCase};

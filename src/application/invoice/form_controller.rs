use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;

use crate::domain::invoice::{
  FormError, Invoice, InvoiceFormModel, InvoiceRepository, InvoiceSource, LineItemKey,
  RepositoryError, ValidationResult,
};
use crate::domain::presentation::{Localizer, Navigator, Notification, Notifier, Route};

const CREATED_MESSAGE: &str = "NOTIFICATION.CREATED";
const EDITED_MESSAGE: &str = "NOTIFICATION.EDITED";
const CREATE_FAILED_MESSAGE: &str = "NOTIFICATION.CREATE_FAILED";
const SAVE_FAILED_MESSAGE: &str = "NOTIFICATION.SAVE_FAILED";

/// Which workflow a form screen runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFlow {
  Create,
  Edit(String),
}

impl FormFlow {
  pub fn invoice_id(&self) -> Option<&str> {
    match self {
      FormFlow::Create => None,
      FormFlow::Edit(id) => Some(id),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
  NotFound,
  Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
  Idle,
  Loading,
  Ready,
  Submitting,
  /// Terminal for the screen
  LoadError(LoadFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// The repository accepted the invoice; navigation was requested
  Saved(Invoice),
  /// Required fields are missing; nothing was sent
  Invalid(ValidationResult),
  /// The repository call failed; the model is kept for a retry
  Failed(RepositoryError),
  /// A submit was already in flight
  Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
  #[error("Form is not ready (state: {0:?})")]
  NotReady(FormState),

  #[error("Form screen was torn down")]
  TornDown,

  #[error("Failed to load invoice: {0}")]
  Load(RepositoryError),

  #[error(transparent)]
  Form(#[from] FormError),
}

/// Collaborators a form screen talks to
#[derive(Clone)]
pub struct FormCollaborators {
  pub repository: Arc<dyn InvoiceRepository>,
  pub navigator: Arc<dyn Navigator>,
  pub notifier: Arc<dyn Notifier>,
  pub localizer: Arc<dyn Localizer>,
}

struct Screen {
  flow: FormFlow,
  model: Option<InvoiceFormModel>,
}

/// Drives one create or edit screen from load to submission
///
/// State changes are published on a watch channel. Once the controller is torn
/// down (or dropped) any repository response still in flight is discarded and
/// every further operation fails with [`ControllerError::TornDown`].
pub struct InvoiceFormController {
  collaborators: FormCollaborators,
  screen: Mutex<Screen>,
  state: watch::Sender<FormState>,
  teardown: CancellationToken,
}

impl InvoiceFormController {
  pub fn new(collaborators: FormCollaborators) -> Self {
    let (state, _) = watch::channel(FormState::Idle);
    Self {
      collaborators,
      screen: Mutex::new(Screen {
        flow: FormFlow::Create,
        model: None,
      }),
      state,
      teardown: CancellationToken::new(),
    }
  }

  /// Hydrates the form: fetches `invoice_id` for editing, or seeds defaults
  pub async fn load(&self, invoice_id: Option<&str>) -> Result<(), ControllerError> {
    let Some(id) = invoice_id else {
      let mut screen = self.lock().await?;
      self.expect_state(|state| *state == FormState::Idle)?;
      screen.flow = FormFlow::Create;
      screen.model = Some(InvoiceFormModel::initialize(InvoiceSource::Blank));
      self.state.send_replace(FormState::Ready);
      return Ok(());
    };

    {
      let mut screen = self.lock().await?;
      self.expect_state(|state| *state == FormState::Idle)?;
      screen.flow = FormFlow::Edit(id.to_string());
      self.state.send_replace(FormState::Loading);
    }

    let fetched = tokio::select! {
      biased;
      _ = self.teardown.cancelled() => {
        tracing::debug!(invoice_id = %id, "Load abandoned, screen torn down");
        return Err(ControllerError::TornDown);
      }
      result = self.collaborators.repository.get_invoice(id) => result,
    };

    let mut screen = self.lock().await?;
    match fetched {
      Ok(invoice) => {
        screen.model = Some(InvoiceFormModel::initialize(InvoiceSource::Existing(
          &invoice,
        )));
        self.state.send_replace(FormState::Ready);
        Ok(())
      }
      Err(e) => {
        tracing::error!(invoice_id = %id, error = %e, "Failed to load invoice");
        let failure = if e.is_not_found() {
          LoadFailure::NotFound
        } else {
          LoadFailure::Unavailable
        };
        self.state.send_replace(FormState::LoadError(failure));
        Err(ControllerError::Load(e))
      }
    }
  }

  /// Continues a screen from a model rebuilt from posted values
  pub async fn resume(
    &self,
    flow: FormFlow,
    model: InvoiceFormModel,
  ) -> Result<(), ControllerError> {
    let mut screen = self.lock().await?;
    self.expect_state(|state| *state == FormState::Idle)?;
    screen.flow = flow;
    screen.model = Some(model);
    self.state.send_replace(FormState::Ready);
    Ok(())
  }

  pub async fn submit(&self) -> Result<SubmitOutcome, ControllerError> {
    let (flow, payload) = {
      let mut screen = self.lock().await?;
      if *self.state.borrow() == FormState::Submitting {
        tracing::debug!("Submit already in flight, ignoring");
        return Ok(SubmitOutcome::Ignored);
      }
      self.expect_state(|state| *state == FormState::Ready)?;

      let flow = screen.flow.clone();
      let model = self.model_mut(&mut screen)?;
      let validation = model.validate(None)?;
      if !validation.is_valid() {
        tracing::debug!(errors = validation.len(), "Submit rejected by validation");
        return Ok(SubmitOutcome::Invalid(validation));
      }

      let payload = model.to_persistable_payload();
      self.state.send_replace(FormState::Submitting);
      (flow, payload)
    };

    let repository = &self.collaborators.repository;
    let saved = tokio::select! {
      biased;
      _ = self.teardown.cancelled() => {
        tracing::debug!("Submit response discarded, screen torn down");
        return Err(ControllerError::TornDown);
      }
      result = async {
        match &flow {
          FormFlow::Create => repository.add_invoice(&payload).await,
          FormFlow::Edit(id) => repository.edit_invoice(id, &payload).await,
        }
      } => result,
    };

    let _screen = self.lock().await?;
    self.state.send_replace(FormState::Ready);

    let localizer = &self.collaborators.localizer;
    match saved {
      Ok(invoice) => {
        tracing::info!(invoice_id = ?invoice.id, name = %payload.name, "Invoice saved");
        let key = match flow {
          FormFlow::Create => CREATED_MESSAGE,
          FormFlow::Edit(_) => EDITED_MESSAGE,
        };
        let message = localizer.translate_with(key, &[("name", payload.name.as_str())]);
        self.collaborators.navigator.navigate(Route::InvoiceList);
        self
          .collaborators
          .notifier
          .notify(Notification::success(message));
        Ok(SubmitOutcome::Saved(invoice))
      }
      Err(e) => {
        tracing::error!(error = %e, flow = ?flow, "Failed to save invoice");
        let key = match flow {
          FormFlow::Create => CREATE_FAILED_MESSAGE,
          FormFlow::Edit(_) => SAVE_FAILED_MESSAGE,
        };
        self
          .collaborators
          .notifier
          .notify(Notification::error(localizer.translate(key)));
        Ok(SubmitOutcome::Failed(e))
      }
    }
  }

  pub async fn add_line_item(&self) -> Result<LineItemKey, ControllerError> {
    let mut screen = self.lock().await?;
    Ok(self.model_mut(&mut screen)?.add_line_item())
  }

  pub async fn remove_line_item(&self, key: &LineItemKey) -> Result<bool, ControllerError> {
    let mut screen = self.lock().await?;
    Ok(self.model_mut(&mut screen)?.remove_line_item(key))
  }

  pub async fn set_field(
    &self,
    path: &str,
    value: &str,
  ) -> Result<Option<&'static str>, ControllerError> {
    let mut screen = self.lock().await?;
    Ok(self.model_mut(&mut screen)?.set_field(path, value)?)
  }

  /// Field-scoped validation, as run when an input loses focus
  pub async fn validate_field(&self, path: &str) -> Result<ValidationResult, ControllerError> {
    let mut screen = self.lock().await?;
    Ok(self.model_mut(&mut screen)?.validate(Some(path))?)
  }

  /// Copy of the current model, if the screen has one
  pub async fn snapshot(&self) -> Option<InvoiceFormModel> {
    self.screen.lock().await.model.clone()
  }

  pub async fn flow(&self) -> FormFlow {
    self.screen.lock().await.flow.clone()
  }

  pub fn state(&self) -> FormState {
    self.state.borrow().clone()
  }

  pub fn subscribe(&self) -> watch::Receiver<FormState> {
    self.state.subscribe()
  }

  /// Marks the screen as gone; responses arriving afterwards are dropped
  pub fn teardown(&self) {
    self.teardown.cancel();
  }

  pub fn is_torn_down(&self) -> bool {
    self.teardown.is_cancelled()
  }

  async fn lock(&self) -> Result<tokio::sync::MutexGuard<'_, Screen>, ControllerError> {
    let screen = self.screen.lock().await;
    if self.teardown.is_cancelled() {
      return Err(ControllerError::TornDown);
    }
    Ok(screen)
  }

  fn model_mut<'a>(
    &self,
    screen: &'a mut Screen,
  ) -> Result<&'a mut InvoiceFormModel, ControllerError> {
    screen
      .model
      .as_mut()
      .ok_or_else(|| ControllerError::NotReady(self.state()))
  }

  fn expect_state(&self, allowed: impl Fn(&FormState) -> bool) -> Result<(), ControllerError> {
    let current = self.state.borrow().clone();
    if allowed(&current) {
      Ok(())
    } else {
      Err(ControllerError::NotReady(current))
    }
  }
}

impl Drop for InvoiceFormController {
  fn drop(&mut self) {
    self.teardown.cancel();
  }
}

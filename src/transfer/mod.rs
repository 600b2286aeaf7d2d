//! Transfer Module
//!
//! Form values, validation, best-route selection, the executor state
//! machine, and the session transfer history.

pub mod events;
pub mod executor;
pub mod form;
pub mod history;
pub mod route;
pub mod status;
pub mod validate;

pub use events::{EventSink, NoticeLevel, TracingEventSink, TransferEvent};
pub use executor::{OnDone, TransferError, TransferExecutor};
pub use form::{initial_form_values, FormQuery, TransferFormValues};
pub use history::{TransferContext, TransferDetails, TransferHistory};
pub use status::{statuses_for_category, TransferStatus};
pub use validate::{validate_form, ValidationOutcome};

//! Form domain layer
//!
//! Type-safe form handling for the orphanage registration page.

mod field;
mod form_state;

pub use field::RegistrationField;
pub use form_state::{
    Form, RegistrationForm, SubmissionOutcome, SubmissionPhase, SubmissionReport, SubmitError,
    CANCEL_BUTTON, CONFIRM_BUTTON,
};

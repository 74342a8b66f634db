//! The booking form session: collects the 24 booking attributes, submits them
//! to the prediction service and records successful predictions.

mod form;
mod outcome;

pub use form::{FormSession, request_prediction, store_outcome};
pub use outcome::SubmitOutcome;

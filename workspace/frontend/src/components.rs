pub mod predict_form;
pub mod prediction_card;
pub mod prediction_history;

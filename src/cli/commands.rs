pub mod fields;
pub mod health;
pub mod history;
pub mod predict;

pub use self::fields::list_fields;
pub use self::health::check_health;
pub use self::history::{delete_prediction, show_history};
pub use self::predict::predict;

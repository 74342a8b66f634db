//! Domain types for hotel booking cancellation predictions: the 24 booking
//! attributes a user fills in, and the prediction records kept in history.

pub mod booking;
pub mod choices;
pub mod feature;
pub mod record;

pub use booking::{BookingFeatures, InvalidFeature};
pub use choices::{
    CustomerType, DepositType, DistributionChannel, HotelType, MarketSegment, MealPlan, RoomType,
    UnknownLabel, YesNo,
};
pub use feature::{FEATURE_COUNT, FeatureKind, FeatureName, FieldValues, UnknownFeature};
pub use record::{InvalidProbability, PredictionRecord, RiskLevel};

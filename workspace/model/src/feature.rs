use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::choices::{
    CustomerType, DepositType, DistributionChannel, HotelType, MarketSegment, MealPlan, RoomType,
    YesNo,
};

/// Number of attributes collected for a single prediction request.
pub const FEATURE_COUNT: usize = 24;

/// Name of a booking attribute that the form collects.
///
/// The discriminant order is the order in which the form presents the fields,
/// and it doubles as the slot index inside [`FieldValues`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureName {
    Hotel,
    LeadTime,
    ArrivalDateYear,
    ArrivalDateWeekNumber,
    ArrivalDateDayOfMonth,
    StaysInWeekendNights,
    StaysInWeekNights,
    Adults,
    Children,
    BookingChanges,
    Agent,
    TotalOfSpecialRequests,
    ArrivalDateMonth,
    IsRepeatedGuest,
    HasWaitingList,
    Adr,
    RequiredCarParkingSpaces,
    Meal,
    DepositType,
    CustomerType,
    ReservedRoomType,
    AssignedRoomType,
    MarketSegment,
    DistributionChannel,
}

/// Semantic type of a feature value once it leaves the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Non-negative whole number.
    Integer,
    /// Decimal amount (average daily rate).
    Decimal,
    /// One of a closed set of labels.
    Choice(&'static [&'static str]),
}

impl FeatureKind {
    /// Short human description of what the field accepts.
    pub fn describe(&self) -> String {
        match self {
            FeatureKind::Integer => "a whole number".to_string(),
            FeatureKind::Decimal => "a decimal number".to_string(),
            FeatureKind::Choice(labels) => format!("one of {}", labels.join(", ")),
        }
    }
}

/// A string that does not name one of the 24 features.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown booking feature {0:?}")]
pub struct UnknownFeature(pub String);

impl FeatureName {
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::Hotel,
        FeatureName::LeadTime,
        FeatureName::ArrivalDateYear,
        FeatureName::ArrivalDateWeekNumber,
        FeatureName::ArrivalDateDayOfMonth,
        FeatureName::StaysInWeekendNights,
        FeatureName::StaysInWeekNights,
        FeatureName::Adults,
        FeatureName::Children,
        FeatureName::BookingChanges,
        FeatureName::Agent,
        FeatureName::TotalOfSpecialRequests,
        FeatureName::ArrivalDateMonth,
        FeatureName::IsRepeatedGuest,
        FeatureName::HasWaitingList,
        FeatureName::Adr,
        FeatureName::RequiredCarParkingSpaces,
        FeatureName::Meal,
        FeatureName::DepositType,
        FeatureName::CustomerType,
        FeatureName::ReservedRoomType,
        FeatureName::AssignedRoomType,
        FeatureName::MarketSegment,
        FeatureName::DistributionChannel,
    ];

    /// Key used in the request payload.
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureName::Hotel => "hotel",
            FeatureName::LeadTime => "lead_time",
            FeatureName::ArrivalDateYear => "arrival_date_year",
            FeatureName::ArrivalDateWeekNumber => "arrival_date_week_number",
            FeatureName::ArrivalDateDayOfMonth => "arrival_date_day_of_month",
            FeatureName::StaysInWeekendNights => "stays_in_weekend_nights",
            FeatureName::StaysInWeekNights => "stays_in_week_nights",
            FeatureName::Adults => "adults",
            FeatureName::Children => "children",
            FeatureName::BookingChanges => "booking_changes",
            FeatureName::Agent => "agent",
            FeatureName::TotalOfSpecialRequests => "total_of_special_requests",
            FeatureName::ArrivalDateMonth => "arrival_date_month",
            FeatureName::IsRepeatedGuest => "is_repeated_guest",
            FeatureName::HasWaitingList => "has_waiting_list",
            FeatureName::Adr => "adr",
            FeatureName::RequiredCarParkingSpaces => "required_car_parking_spaces",
            FeatureName::Meal => "meal",
            FeatureName::DepositType => "deposit_type",
            FeatureName::CustomerType => "customer_type",
            FeatureName::ReservedRoomType => "reserved_room_type",
            FeatureName::AssignedRoomType => "assigned_room_type",
            FeatureName::MarketSegment => "market_segment",
            FeatureName::DistributionChannel => "distribution_channel",
        }
    }

    /// Form label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FeatureName::Hotel => "Hotel Type",
            FeatureName::LeadTime => "Lead Time",
            FeatureName::ArrivalDateYear => "Arrival Year",
            FeatureName::ArrivalDateWeekNumber => "Week Number",
            FeatureName::ArrivalDateDayOfMonth => "Day of Month",
            FeatureName::StaysInWeekendNights => "Weekend Nights",
            FeatureName::StaysInWeekNights => "Week Nights",
            FeatureName::Adults => "Adults",
            FeatureName::Children => "Children",
            FeatureName::BookingChanges => "Booking Changes",
            FeatureName::Agent => "Agent",
            FeatureName::TotalOfSpecialRequests => "Total Special Requests",
            FeatureName::ArrivalDateMonth => "Arrival Month",
            FeatureName::IsRepeatedGuest => "Is Repeated Guest",
            FeatureName::HasWaitingList => "Has Waiting List",
            FeatureName::Adr => "ADR",
            FeatureName::RequiredCarParkingSpaces => "Required Parking Spaces",
            FeatureName::Meal => "Meal",
            FeatureName::DepositType => "Deposit Type",
            FeatureName::CustomerType => "Customer Type",
            FeatureName::ReservedRoomType => "Reserved Room Type",
            FeatureName::AssignedRoomType => "Assigned Room Type",
            FeatureName::MarketSegment => "Market Segment",
            FeatureName::DistributionChannel => "Distribution Channel",
        }
    }

    pub fn kind(self) -> FeatureKind {
        match self {
            FeatureName::Hotel => FeatureKind::Choice(HotelType::LABELS),
            FeatureName::IsRepeatedGuest | FeatureName::HasWaitingList => {
                FeatureKind::Choice(YesNo::LABELS)
            }
            FeatureName::Adr => FeatureKind::Decimal,
            FeatureName::Meal => FeatureKind::Choice(MealPlan::LABELS),
            FeatureName::DepositType => FeatureKind::Choice(DepositType::LABELS),
            FeatureName::CustomerType => FeatureKind::Choice(CustomerType::LABELS),
            FeatureName::ReservedRoomType | FeatureName::AssignedRoomType => {
                FeatureKind::Choice(RoomType::LABELS)
            }
            FeatureName::MarketSegment => FeatureKind::Choice(MarketSegment::LABELS),
            FeatureName::DistributionChannel => FeatureKind::Choice(DistributionChannel::LABELS),
            _ => FeatureKind::Integer,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for FeatureName {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text entered for each feature, exactly as typed or selected.
///
/// Nothing is validated here. An empty string means the field was left blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValues {
    slots: [String; FEATURE_COUNT],
}

impl Default for FieldValues {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| String::new()),
        }
    }
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: FeatureName) -> &str {
        &self.slots[name.index()]
    }

    /// Replace the value of one field, leaving the others untouched.
    pub fn set(&mut self, name: FeatureName, value: impl Into<String>) {
        self.slots[name.index()] = value.into();
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.clear();
        }
    }

    /// True when every field is empty.
    pub fn is_blank(&self) -> bool {
        self.slots.iter().all(String::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, &str)> {
        FeatureName::ALL
            .into_iter()
            .map(move |name| (name, self.get(name)))
    }
}

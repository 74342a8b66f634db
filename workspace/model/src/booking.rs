use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::choices::{
    CustomerType, DepositType, DistributionChannel, HotelType, MarketSegment, MealPlan, RoomType,
    YesNo,
};
use crate::feature::{FEATURE_COUNT, FeatureName, FieldValues};

/// A field whose text does not parse as the field's semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for {field}: expected {expected}")]
pub struct InvalidFeature {
    pub field: FeatureName,
    pub value: String,
    pub expected: String,
}

/// Typed booking attributes sent to the prediction service.
///
/// Every field is optional: a blank form field becomes `None`. There are no
/// cross-field checks, the service decides what a usable booking looks like.
///
/// On the wire all 24 keys are always present and every value is text, with
/// `""` for a missing value. This is the shape the service coerces from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFeatures {
    pub hotel: Option<HotelType>,
    pub lead_time: Option<u32>,
    pub arrival_date_year: Option<u32>,
    pub arrival_date_week_number: Option<u32>,
    pub arrival_date_day_of_month: Option<u32>,
    pub stays_in_weekend_nights: Option<u32>,
    pub stays_in_week_nights: Option<u32>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub booking_changes: Option<u32>,
    pub agent: Option<u32>,
    pub total_of_special_requests: Option<u32>,
    pub arrival_date_month: Option<u32>,
    pub is_repeated_guest: Option<YesNo>,
    pub has_waiting_list: Option<YesNo>,
    /// Average daily rate.
    pub adr: Option<Decimal>,
    pub required_car_parking_spaces: Option<u32>,
    pub meal: Option<MealPlan>,
    pub deposit_type: Option<DepositType>,
    pub customer_type: Option<CustomerType>,
    pub reserved_room_type: Option<RoomType>,
    pub assigned_room_type: Option<RoomType>,
    pub market_segment: Option<MarketSegment>,
    pub distribution_channel: Option<DistributionChannel>,
}

fn parse_field<T: FromStr>(
    values: &FieldValues,
    name: FeatureName,
) -> Result<Option<T>, InvalidFeature> {
    let raw = values.get(name).trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>().map(Some).map_err(|_| InvalidFeature {
        field: name,
        value: raw.to_string(),
        expected: name.kind().describe(),
    })
}

fn text<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl BookingFeatures {
    /// Text sent for `name`; empty when the field is unset.
    pub fn wire_value(&self, name: FeatureName) -> String {
        match name {
            FeatureName::Hotel => text(&self.hotel),
            FeatureName::LeadTime => text(&self.lead_time),
            FeatureName::ArrivalDateYear => text(&self.arrival_date_year),
            FeatureName::ArrivalDateWeekNumber => text(&self.arrival_date_week_number),
            FeatureName::ArrivalDateDayOfMonth => text(&self.arrival_date_day_of_month),
            FeatureName::StaysInWeekendNights => text(&self.stays_in_weekend_nights),
            FeatureName::StaysInWeekNights => text(&self.stays_in_week_nights),
            FeatureName::Adults => text(&self.adults),
            FeatureName::Children => text(&self.children),
            FeatureName::BookingChanges => text(&self.booking_changes),
            FeatureName::Agent => text(&self.agent),
            FeatureName::TotalOfSpecialRequests => text(&self.total_of_special_requests),
            FeatureName::ArrivalDateMonth => text(&self.arrival_date_month),
            FeatureName::IsRepeatedGuest => text(&self.is_repeated_guest),
            FeatureName::HasWaitingList => text(&self.has_waiting_list),
            FeatureName::Adr => text(&self.adr),
            FeatureName::RequiredCarParkingSpaces => text(&self.required_car_parking_spaces),
            FeatureName::Meal => text(&self.meal),
            FeatureName::DepositType => text(&self.deposit_type),
            FeatureName::CustomerType => text(&self.customer_type),
            FeatureName::ReservedRoomType => text(&self.reserved_room_type),
            FeatureName::AssignedRoomType => text(&self.assigned_room_type),
            FeatureName::MarketSegment => text(&self.market_segment),
            FeatureName::DistributionChannel => text(&self.distribution_channel),
        }
    }
}

impl TryFrom<&FieldValues> for BookingFeatures {
    type Error = InvalidFeature;

    fn try_from(values: &FieldValues) -> Result<Self, Self::Error> {
        Ok(Self {
            hotel: parse_field(values, FeatureName::Hotel)?,
            lead_time: parse_field(values, FeatureName::LeadTime)?,
            arrival_date_year: parse_field(values, FeatureName::ArrivalDateYear)?,
            arrival_date_week_number: parse_field(values, FeatureName::ArrivalDateWeekNumber)?,
            arrival_date_day_of_month: parse_field(values, FeatureName::ArrivalDateDayOfMonth)?,
            stays_in_weekend_nights: parse_field(values, FeatureName::StaysInWeekendNights)?,
            stays_in_week_nights: parse_field(values, FeatureName::StaysInWeekNights)?,
            adults: parse_field(values, FeatureName::Adults)?,
            children: parse_field(values, FeatureName::Children)?,
            booking_changes: parse_field(values, FeatureName::BookingChanges)?,
            agent: parse_field(values, FeatureName::Agent)?,
            total_of_special_requests: parse_field(values, FeatureName::TotalOfSpecialRequests)?,
            arrival_date_month: parse_field(values, FeatureName::ArrivalDateMonth)?,
            is_repeated_guest: parse_field(values, FeatureName::IsRepeatedGuest)?,
            has_waiting_list: parse_field(values, FeatureName::HasWaitingList)?,
            adr: parse_field(values, FeatureName::Adr)?,
            required_car_parking_spaces: parse_field(
                values,
                FeatureName::RequiredCarParkingSpaces,
            )?,
            meal: parse_field(values, FeatureName::Meal)?,
            deposit_type: parse_field(values, FeatureName::DepositType)?,
            customer_type: parse_field(values, FeatureName::CustomerType)?,
            reserved_room_type: parse_field(values, FeatureName::ReservedRoomType)?,
            assigned_room_type: parse_field(values, FeatureName::AssignedRoomType)?,
            market_segment: parse_field(values, FeatureName::MarketSegment)?,
            distribution_channel: parse_field(values, FeatureName::DistributionChannel)?,
        })
    }
}

impl Serialize for BookingFeatures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for name in FeatureName::ALL {
            map.serialize_entry(name.as_str(), &self.wire_value(name))?;
        }
        map.end()
    }
}

//! Enumerated booking attributes.
//!
//! Every categorical field of the booking form accepts a closed set of labels.
//! The labels are exactly what the prediction service was trained on, so they
//! are also what goes over the wire.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A label that is not part of the field's accepted set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label {0:?}")]
pub struct UnknownLabel(pub String);

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Accepted wire labels, in form order.
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownLabel(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Property type of the booked hotel.
    HotelType {
        City => "City",
        Resort => "Resort",
    }
}

labelled_enum! {
    YesNo {
        Yes => "Yes",
        No => "No",
    }
}

labelled_enum! {
    /// Board basis: bed & breakfast, half board, full board, self catering.
    MealPlan {
        BedAndBreakfast => "BB",
        HalfBoard => "HB",
        FullBoard => "FB",
        SelfCatering => "SC",
    }
}

labelled_enum! {
    DepositType {
        NoDeposit => "No Deposit",
        NonRefundable => "Non Refundable",
        Refundable => "Refund",
    }
}

labelled_enum! {
    CustomerType {
        Transient => "Transient",
        Contract => "Contract",
        TransientParty => "Transient Party",
        Group => "Group",
    }
}

labelled_enum! {
    /// Room type code. Reserved and assigned rooms share the code space.
    RoomType {
        A => "A",
        B => "B",
        C => "C",
        D => "D",
        E => "E",
        F => "F",
        G => "G",
        H => "H",
        I => "I",
        K => "K",
        L => "L",
        P => "P",
    }
}

labelled_enum! {
    MarketSegment {
        Direct => "Direct",
        Corporate => "Corporate",
        OnlineTravelAgent => "Online TA",
        OfflineTravelAgent => "Offline TA/TO",
        Complementary => "Complementary",
        Groups => "Groups",
        Undefined => "Undefined",
        Aviation => "Aviation",
    }
}

labelled_enum! {
    DistributionChannel {
        Direct => "Direct",
        Corporate => "Corporate",
        TravelAgent => "TA/TO",
        Undefined => "Undefined",
        Gds => "GDS",
    }
}

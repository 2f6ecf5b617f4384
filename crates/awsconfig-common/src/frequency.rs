//! Delivery frequency for configuration snapshots

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How often AWS Config delivers configuration snapshots to the channel.
///
/// The string forms are the literals used by the ConfigService API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeliveryFrequency {
    OneHour,
    ThreeHours,
    SixHours,
    TwelveHours,
    TwentyFourHours,
}

/// Rejected delivery frequency literal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"delivery_frequency\" must be one of: [{}], got {value:?}", DeliveryFrequency::VALID_VALUES.join(", "))]
pub struct InvalidDeliveryFrequency {
    pub value: String,
}

impl DeliveryFrequency {
    /// All accepted literals, in increasing interval order
    pub const VALID_VALUES: &'static [&'static str] = &[
        "One_Hour",
        "Three_Hours",
        "Six_Hours",
        "Twelve_Hours",
        "TwentyFour_Hours",
    ];

    /// Get the ConfigService literal for this frequency
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryFrequency::OneHour => "One_Hour",
            DeliveryFrequency::ThreeHours => "Three_Hours",
            DeliveryFrequency::SixHours => "Six_Hours",
            DeliveryFrequency::TwelveHours => "Twelve_Hours",
            DeliveryFrequency::TwentyFourHours => "TwentyFour_Hours",
        }
    }

    /// Interval between deliveries, in hours
    pub fn hours(self) -> u32 {
        match self {
            DeliveryFrequency::OneHour => 1,
            DeliveryFrequency::ThreeHours => 3,
            DeliveryFrequency::SixHours => 6,
            DeliveryFrequency::TwelveHours => 12,
            DeliveryFrequency::TwentyFourHours => 24,
        }
    }
}

impl fmt::Display for DeliveryFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryFrequency {
    type Err = InvalidDeliveryFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "One_Hour" => Ok(DeliveryFrequency::OneHour),
            "Three_Hours" => Ok(DeliveryFrequency::ThreeHours),
            "Six_Hours" => Ok(DeliveryFrequency::SixHours),
            "Twelve_Hours" => Ok(DeliveryFrequency::TwelveHours),
            "TwentyFour_Hours" => Ok(DeliveryFrequency::TwentyFourHours),
            other => Err(InvalidDeliveryFrequency {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for DeliveryFrequency {
    type Error = InvalidDeliveryFrequency;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeliveryFrequency> for String {
    fn from(value: DeliveryFrequency) -> Self {
        value.as_str().to_string()
    }
}

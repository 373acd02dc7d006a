//! Code tables published by DataPoint: resolutions, parameter codes,
//! weather types, UV bands and visibility classes.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Temporal resolution of a forecast or observation feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "3hourly")]
    ThreeHourly,
    /// Only offered by the observation feeds.
    #[serde(rename = "hourly")]
    Hourly,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Daily => "daily",
            Resolution::ThreeHourly => "3hourly",
            Resolution::Hourly => "hourly",
        }
    }

    pub const fn all() -> &'static [Resolution] {
        &[Resolution::Daily, Resolution::ThreeHourly, Resolution::Hourly]
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown resolution '{0}', expected one of: daily, 3hourly, hourly")]
pub struct ParseResolutionError(String);

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Resolution::all()
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseResolutionError(value.to_string()))
    }
}

/// Parameter codes documented by DataPoint for the forecast feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownParameter {
    FeelsLikeTemp,
    WindGust,
    WindGustNoon,
    ScreenRelativeHumidity,
    ScreenRelativeHumidityNoon,
    Temperature,
    DayMaximumTemperature,
    NightMinimumTemperature,
    FeelsLikeDayMaximumTemperature,
    Visibility,
    WindDirection,
    WindSpeed,
    MaxUvIndex,
    WeatherType,
    PrecipitationProbability,
    PrecipitationProbabilityDay,
    PrecipitationProbabilityNight,
}

/// Codes whose values are always whole numbers. Anything outside this list
/// is kept as text, even when the text happens to be numeric.
pub const KNOWN_INT_PARAMETERS: &[&str] = &[
    "F", "G", "H", "Pp", "S", "T", "W", "U", "Gn", "Hn", "Dm", "Nm", "FDm", "PPd", "PPn",
];

/// Integer codes of the hourly observation feed. Observed temperature,
/// humidity and dew point carry decimals there, so they stay text.
pub const OBSERVATION_INT_PARAMETERS: &[&str] = &["G", "S", "W", "P"];

/// Whether values under `code` are decoded as integers.
pub fn is_known_int(code: &str) -> bool {
    KNOWN_INT_PARAMETERS.contains(&code)
}

impl KnownParameter {
    pub fn code(&self) -> &'static str {
        match self {
            KnownParameter::FeelsLikeTemp => "F",
            KnownParameter::WindGust => "G",
            KnownParameter::WindGustNoon => "Gn",
            KnownParameter::ScreenRelativeHumidity => "H",
            KnownParameter::ScreenRelativeHumidityNoon => "Hn",
            KnownParameter::Temperature => "T",
            KnownParameter::DayMaximumTemperature => "Dm",
            KnownParameter::NightMinimumTemperature => "Nm",
            KnownParameter::FeelsLikeDayMaximumTemperature => "FDm",
            KnownParameter::Visibility => "V",
            KnownParameter::WindDirection => "D",
            KnownParameter::WindSpeed => "S",
            KnownParameter::MaxUvIndex => "U",
            KnownParameter::WeatherType => "W",
            KnownParameter::PrecipitationProbability => "Pp",
            KnownParameter::PrecipitationProbabilityDay => "PPd",
            KnownParameter::PrecipitationProbabilityNight => "PPn",
        }
    }

    pub const fn all() -> &'static [KnownParameter] {
        &[
            KnownParameter::FeelsLikeTemp,
            KnownParameter::WindGust,
            KnownParameter::WindGustNoon,
            KnownParameter::ScreenRelativeHumidity,
            KnownParameter::ScreenRelativeHumidityNoon,
            KnownParameter::Temperature,
            KnownParameter::DayMaximumTemperature,
            KnownParameter::NightMinimumTemperature,
            KnownParameter::FeelsLikeDayMaximumTemperature,
            KnownParameter::Visibility,
            KnownParameter::WindDirection,
            KnownParameter::WindSpeed,
            KnownParameter::MaxUvIndex,
            KnownParameter::WeatherType,
            KnownParameter::PrecipitationProbability,
            KnownParameter::PrecipitationProbabilityDay,
            KnownParameter::PrecipitationProbabilityNight,
        ]
    }

    /// Case-sensitive: "D" and "Dm" are different parameters.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.code() == code)
    }

    pub fn is_integer(&self) -> bool {
        is_known_int(self.code())
    }
}

impl fmt::Display for KnownParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Significant weather code carried by the `W` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherType {
    ClearNight,
    SunnyDay,
    PartlyCloudyNight,
    PartlyCloudyDay,
    Mist,
    Fog,
    Cloudy,
    Overcast,
    LightRainShowerNight,
    LightRainShowerDay,
    Drizzle,
    LightRain,
    HeavyRainShowerNight,
    HeavyRainShowerDay,
    HeavyRain,
    SleetShowerNight,
    SleetShowerDay,
    Sleet,
    HailShowerNight,
    HailShowerDay,
    Hail,
    LightSnowShowerNight,
    LightSnowShowerDay,
    LightSnow,
    HeavySnowShowerNight,
    HeavySnowShowerDay,
    HeavySnow,
    ThunderShowerNight,
    ThunderShowerDay,
    Thunder,
}

impl WeatherType {
    /// Code 4 is reserved and maps to `None`, as does anything above 30.
    pub fn from_code(code: i16) -> Option<Self> {
        use WeatherType::*;

        let ty = match code {
            0 => ClearNight,
            1 => SunnyDay,
            2 => PartlyCloudyNight,
            3 => PartlyCloudyDay,
            5 => Mist,
            6 => Fog,
            7 => Cloudy,
            8 => Overcast,
            9 => LightRainShowerNight,
            10 => LightRainShowerDay,
            11 => Drizzle,
            12 => LightRain,
            13 => HeavyRainShowerNight,
            14 => HeavyRainShowerDay,
            15 => HeavyRain,
            16 => SleetShowerNight,
            17 => SleetShowerDay,
            18 => Sleet,
            19 => HailShowerNight,
            20 => HailShowerDay,
            21 => Hail,
            22 => LightSnowShowerNight,
            23 => LightSnowShowerDay,
            24 => LightSnow,
            25 => HeavySnowShowerNight,
            26 => HeavySnowShowerDay,
            27 => HeavySnow,
            28 => ThunderShowerNight,
            29 => ThunderShowerDay,
            30 => Thunder,
            _ => return None,
        };

        Some(ty)
    }

    pub fn description(&self) -> &'static str {
        use WeatherType::*;

        match self {
            ClearNight => "Clear night",
            SunnyDay => "Sunny day",
            PartlyCloudyNight => "Partly cloudy (night)",
            PartlyCloudyDay => "Partly cloudy (day)",
            Mist => "Mist",
            Fog => "Fog",
            Cloudy => "Cloudy",
            Overcast => "Overcast",
            LightRainShowerNight => "Light rain shower (night)",
            LightRainShowerDay => "Light rain shower (day)",
            Drizzle => "Drizzle",
            LightRain => "Light rain",
            HeavyRainShowerNight => "Heavy rain shower (night)",
            HeavyRainShowerDay => "Heavy rain shower (day)",
            HeavyRain => "Heavy rain",
            SleetShowerNight => "Sleet shower (night)",
            SleetShowerDay => "Sleet shower (day)",
            Sleet => "Sleet",
            HailShowerNight => "Hail shower (night)",
            HailShowerDay => "Hail shower (day)",
            Hail => "Hail",
            LightSnowShowerNight => "Light snow shower (night)",
            LightSnowShowerDay => "Light snow shower (day)",
            LightSnow => "Light snow",
            HeavySnowShowerNight => "Heavy snow shower (night)",
            HeavySnowShowerDay => "Heavy snow shower (day)",
            HeavySnow => "Heavy snow",
            ThunderShowerNight => "Thunder shower (night)",
            ThunderShowerDay => "Thunder shower (day)",
            Thunder => "Thunder",
        }
    }
}

impl fmt::Display for WeatherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Maximum UV index, as carried by the `U` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UvIndex(pub i16);

impl UvIndex {
    pub fn is_low_exposure(&self) -> bool {
        (1..=2).contains(&self.0)
    }

    pub fn is_moderate_exposure(&self) -> bool {
        (3..=5).contains(&self.0)
    }

    pub fn is_high_exposure(&self) -> bool {
        (6..=7).contains(&self.0)
    }

    pub fn is_very_high_exposure(&self) -> bool {
        (8..=10).contains(&self.0)
    }

    pub fn is_extreme_exposure(&self) -> bool {
        self.0 >= 11
    }
}

/// Visibility class carried by the `V` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Unknown,
    VeryPoor,
    Poor,
    Moderate,
    Good,
    VeryGood,
    Excellent,
}

impl Visibility {
    pub fn code(&self) -> &'static str {
        match self {
            Visibility::Unknown => "UN",
            Visibility::VeryPoor => "VP",
            Visibility::Poor => "PO",
            Visibility::Moderate => "MO",
            Visibility::Good => "GO",
            Visibility::VeryGood => "VG",
            Visibility::Excellent => "EX",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [
            Visibility::Unknown,
            Visibility::VeryPoor,
            Visibility::Poor,
            Visibility::Moderate,
            Visibility::Good,
            Visibility::VeryGood,
            Visibility::Excellent,
        ]
        .into_iter()
        .find(|v| v.code() == code)
    }
}

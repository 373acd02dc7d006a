use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::params::{KnownParameter, Resolution, UvIndex, Visibility, WeatherType};

/// A location for which forecasts or observations are available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// ID number of the location, e.g. 310069.
    pub id: i64,
    /// Decimal degrees.
    pub latitude: f64,
    /// Decimal degrees.
    pub longitude: f64,
    pub name: String,
    /// Undocumented upstream and often missing; 0 when absent.
    pub elevation: f64,
    pub region: String,
    pub unitary_auth_area: String,
}

/// Definition of one attribute that may appear in a forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Short code, e.g. "T".
    pub name: String,
    pub units: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringParameterValue {
    #[serde(flatten)]
    pub descriptor: ParameterDescriptor,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntParameterValue {
    #[serde(flatten)]
    pub descriptor: ParameterDescriptor,
    pub value: i16,
}

/// The weather at a single instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Derived from the period date and the record's offset marker.
    pub time: DateTime<Utc>,
    /// Parameters known to always be integers.
    pub int_params: BTreeMap<String, IntParameterValue>,
    /// Every other parameter, kept verbatim.
    pub string_params: BTreeMap<String, StringParameterValue>,
}

impl Forecast {
    pub fn int(&self, code: &str) -> Option<i16> {
        self.int_params.get(code).map(|p| p.value)
    }

    pub fn string(&self, code: &str) -> Option<&str> {
        self.string_params.get(code).map(|p| p.value.as_str())
    }

    /// `T` for three-hourly data, falling back to the day maximum or night
    /// minimum used by the daily feed.
    pub fn temperature(&self) -> Option<i16> {
        [
            KnownParameter::Temperature,
            KnownParameter::DayMaximumTemperature,
            KnownParameter::NightMinimumTemperature,
        ]
        .iter()
        .find_map(|p| self.int(p.code()))
    }

    pub fn weather_type(&self) -> Option<WeatherType> {
        self.int(KnownParameter::WeatherType.code())
            .and_then(WeatherType::from_code)
    }

    pub fn uv_index(&self) -> Option<UvIndex> {
        self.int(KnownParameter::MaxUvIndex.code()).map(UvIndex)
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.string(KnownParameter::Visibility.code())
            .and_then(Visibility::from_code)
    }
}

/// A span of time, usually a day, grouping forecasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    /// Usually "Day".
    pub kind: String,
    pub time: DateTime<Utc>,
    pub forecasts: Vec<Forecast>,
}

/// Location details together with its forecast periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRep {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: String,
    pub continent: String,
    /// Not always returned; 0 when absent.
    pub elevation: f64,
    pub periods: Vec<Period>,
}

/// Forecast or observation data for a single location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRep {
    /// When the model run producing this data happened.
    pub data_date: DateTime<Utc>,
    /// "Forecast" or "Obs".
    pub kind: String,
    pub location: LocationRep,
}

/// Outcome of a single-location query that reached the service and parsed.
///
/// DataPoint answers with an empty location when it has nothing for the
/// requested site, time and resolution; that is reported as `NoData`
/// rather than as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SiteLookup {
    Found(SiteRep),
    NoData,
}

impl SiteLookup {
    pub fn into_option(self) -> Option<SiteRep> {
        match self {
            SiteLookup::Found(rep) => Some(rep),
            SiteLookup::NoData => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SiteLookup::Found(_))
    }
}

/// Timesteps for which data currently exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSteps {
    pub data_date: DateTime<Utc>,
    pub resolution: Resolution,
    /// Resource type, e.g. "wxfcs" or "wxobs".
    pub kind: String,
    pub time_steps: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremeCapabilities {
    pub extreme_date: NaiveDate,
    pub issued_at: DateTime<Utc>,
}

/// A single observed extreme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extreme {
    /// May not appear in the forecast site list.
    pub location_id: i64,
    pub location_name: String,
    /// e.g. "HMAXT" for highest maximum temperature.
    pub kind: String,
    pub unit_of_measurement: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Short name of the region.
    pub id: String,
    pub name: String,
    pub extremes: Vec<Extreme>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestExtremes {
    pub extreme_date: NaiveDate,
    pub issued_at: DateTime<Utc>,
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalForecastSite {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalForecastCapabilities {
    pub issued_at: DateTime<Utc>,
}

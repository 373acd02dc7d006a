//! Typed client for the Met Office DataPoint weather service.
//!
//! This crate defines:
//! - Transport with pluggable API key suppliers and HTTP backends
//! - Wire schemas and converters for the loosely typed DataPoint JSON
//! - Domain models for sites, forecasts, observations and extremes
//! - On-disk configuration used by `datapoint-cli`
//!
//! ```no_run
//! # async fn run() -> Result<(), datapoint_core::DataPointError> {
//! use datapoint_core::{DataPointClient, Resolution, SiteLookup};
//!
//! let client = DataPointClient::new("my-api-key")?;
//! match client.five_day_forecast(Resolution::ThreeHourly, 310069, None).await? {
//!     SiteLookup::Found(rep) => println!("{} periods", rep.location.periods.len()),
//!     SiteLookup::NoData => println!("nothing available"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
mod convert;
pub mod error;
pub mod model;
pub mod params;
pub mod transport;
mod wire;

pub use client::{DEFAULT_BASE_URI, DataPointClient, DataPointClientBuilder};
pub use config::Config;
pub use error::{DataPointError, Stage};
pub use model::{
    Extreme, ExtremeCapabilities, Forecast, IntParameterValue, LatestExtremes, LocationRep,
    ParameterDescriptor, Period, Region, RegionalForecastCapabilities, RegionalForecastSite, Site,
    SiteLookup, SiteRep, StringParameterValue, TimeSteps,
};
pub use params::{KnownParameter, Resolution, UvIndex, Visibility, WeatherType};
pub use transport::{ApiKeySupplier, HttpTransport, StaticApiKey, TransportFailure};

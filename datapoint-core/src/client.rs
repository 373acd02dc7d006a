use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    convert,
    error::{DataPointError, Result},
    model::{
        ExtremeCapabilities, LatestExtremes, RegionalForecastCapabilities, RegionalForecastSite,
        Site, SiteLookup, SiteRep, TimeSteps,
    },
    params::Resolution,
    transport::{ApiKeySupplier, HttpTransport, StaticApiKey, Transport},
    wire,
};

pub const DEFAULT_BASE_URI: &str = "http://datapoint.metoffice.gov.uk/public/data/";

/// Client for the Met Office DataPoint service.
///
/// Every method performs exactly one GET. Nothing is cached or retried, and
/// HTTP status codes are not inspected: the body is always decoded, so an
/// upstream error page surfaces as a decode error.
///
/// Cloning is cheap and clones share the key supplier and HTTP transport.
#[derive(Debug, Clone)]
pub struct DataPointClient {
    transport: Transport,
}

/// Collects options for a [`DataPointClient`]. A key, either fixed or from
/// a supplier, is required.
#[derive(Default)]
pub struct DataPointClientBuilder {
    base_uri: Option<String>,
    api_key: Option<Arc<dyn ApiKeySupplier>>,
    http: Option<Arc<dyn HttpTransport>>,
}

impl DataPointClientBuilder {
    /// Points the client somewhere other than the public service, e.g. a proxy.
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Uses a fixed key for every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(Arc::new(StaticApiKey::new(key)));
        self
    }

    /// Asks `supplier` for a key on every request.
    pub fn api_key_supplier(mut self, supplier: impl ApiKeySupplier + 'static) -> Self {
        self.api_key = Some(Arc::new(supplier));
        self
    }

    /// Sends requests through a preconfigured `reqwest` client, e.g. one with
    /// timeouts or a proxy.
    pub fn http_client(self, client: reqwest::Client) -> Self {
        self.transport(client)
    }

    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.http = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> Result<DataPointClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| DataPointError::config("no api key provided"))?;

        let http = self
            .http
            .unwrap_or_else(|| Arc::new(reqwest::Client::new()));

        let base_uri = self
            .base_uri
            .unwrap_or_else(|| DEFAULT_BASE_URI.to_string());

        Ok(DataPointClient {
            transport: Transport::new(base_uri, api_key, http),
        })
    }
}

fn forecast_query(resolution: Resolution, at: Option<DateTime<Utc>>) -> BTreeMap<&'static str, String> {
    let mut query = BTreeMap::new();
    query.insert("res", resolution.as_str().to_string());
    if let Some(at) = at {
        query.insert("time", at.to_rfc3339_opts(SecondsFormat::Secs, true));
    }
    query
}

impl DataPointClient {
    pub fn builder() -> DataPointClientBuilder {
        DataPointClientBuilder::default()
    }

    /// Shorthand for a client with a fixed key and default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub fn base_uri(&self) -> &str {
        self.transport.base_uri()
    }

    async fn get<W: DeserializeOwned>(
        &self,
        description: &str,
        suffix: &str,
        query: BTreeMap<&str, String>,
    ) -> Result<W> {
        let (body, target) = self.transport.fetch(description, suffix, &query).await?;

        serde_json::from_slice(&body).map_err(|source| DataPointError::Decode {
            description: description.to_string(),
            url: target,
            source,
        })
    }

    /// Locations that have daily and three-hourly forecasts.
    pub async fn forecast_site_list(&self) -> Result<Vec<Site>> {
        self.site_list("wxfcs").await
    }

    /// Locations that have hourly observations.
    pub async fn observation_site_list(&self) -> Result<Vec<Site>> {
        self.site_list("wxobs").await
    }

    async fn site_list(&self, resource: &str) -> Result<Vec<Site>> {
        let suffix = format!("val/{resource}/all/json/sitelist");
        let resp: wire::SiteListResponse = self.get("sitelist", &suffix, BTreeMap::new()).await?;
        convert::site_list(resp)
    }

    /// Timesteps for which forecasts are currently available. Checking this
    /// first avoids requesting forecasts that do not exist yet.
    pub async fn forecast_time_step_capabilities(
        &self,
        resolution: Resolution,
    ) -> Result<TimeSteps> {
        let resp: wire::CapabilitiesResponse = self
            .get(
                "capabilities",
                "val/wxfcs/all/json/capabilities",
                forecast_query(resolution, None),
            )
            .await?;
        convert::time_steps(resp)
    }

    /// Timesteps for which hourly observations are available.
    pub async fn observation_time_step_capabilities(&self) -> Result<TimeSteps> {
        let resp: wire::CapabilitiesResponse = self
            .get(
                "observation capabilities",
                "val/wxobs/all/json/capabilities",
                forecast_query(Resolution::Hourly, None),
            )
            .await?;
        convert::time_steps(resp)
    }

    /// Daily or three-hourly forecast for one site, starting at the latest
    /// model run or at `at` when given.
    ///
    /// Returns [`SiteLookup::NoData`] when the service has nothing for this
    /// site, resolution and time.
    pub async fn five_day_forecast(
        &self,
        resolution: Resolution,
        location_id: i64,
        at: Option<DateTime<Utc>>,
    ) -> Result<SiteLookup> {
        let resp: wire::SiteRepResponse<wire::LocationEntry> = self
            .get(
                "five day forecast",
                &format!("val/wxfcs/all/json/{location_id}"),
                forecast_query(resolution, at),
            )
            .await?;
        convert::site_rep(resp)
    }

    /// Same as [`Self::five_day_forecast`] for every site at once. The
    /// response is large.
    pub async fn five_day_forecast_for_all_locations(
        &self,
        resolution: Resolution,
        at: Option<DateTime<Utc>>,
    ) -> Result<Vec<SiteRep>> {
        let resp: wire::SiteRepResponse<Vec<wire::LocationEntry>> = self
            .get(
                "five day forecast for all locations",
                "val/wxfcs/all/json/all",
                forecast_query(resolution, at),
            )
            .await?;
        convert::site_reps(resp)
    }

    /// The last 24 hours of hourly observations for one site.
    pub async fn hourly_observations(&self, location_id: i64) -> Result<SiteLookup> {
        let resp: wire::SiteRepResponse<wire::LocationEntry> = self
            .get(
                "hourly observations",
                &format!("val/wxobs/all/json/{location_id}"),
                forecast_query(Resolution::Hourly, None),
            )
            .await?;
        convert::observation_rep(resp)
    }

    pub async fn regional_forecast_site_list(&self) -> Result<Vec<RegionalForecastSite>> {
        let resp: wire::RegionalSiteListResponse = self
            .get(
                "regional forecast site list",
                "txt/wxfcs/regionalforecast/json/sitelist",
                BTreeMap::new(),
            )
            .await?;
        convert::regional_sites(resp)
    }

    /// When the last set of regional forecasts was issued.
    pub async fn regional_forecast_capabilities(&self) -> Result<RegionalForecastCapabilities> {
        let resp: wire::RegionalCapabilitiesResponse = self
            .get(
                "regional forecast capabilities",
                "txt/wxfcs/regionalforecast/json/capabilities",
                BTreeMap::new(),
            )
            .await?;
        convert::regional_capabilities(resp)
    }

    /// When the UK extremes feed was last updated and which day it covers.
    pub async fn uk_extremes_capabilities(&self) -> Result<ExtremeCapabilities> {
        let resp: wire::ExtremesResponse = self
            .get(
                "uk extremes capabilities",
                "txt/wxobs/ukextremes/json/capabilities",
                BTreeMap::new(),
            )
            .await?;
        convert::extreme_capabilities(resp)
    }

    /// Observed extremes across the UK for the day of issue, updated daily.
    pub async fn uk_extremes_latest(&self) -> Result<LatestExtremes> {
        let resp: wire::ExtremesResponse = self
            .get(
                "uk extremes latest",
                "txt/wxobs/ukextremes/json/latest",
                BTreeMap::new(),
            )
            .await?;
        convert::latest_extremes(resp)
    }
}

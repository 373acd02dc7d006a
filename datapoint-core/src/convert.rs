//! Conversion from the raw wire shapes to the domain model.
//!
//! Every numeric or date string is parsed exactly once here. Any failure
//! aborts the whole response; the only exception is elevation, which is
//! undocumented upstream and falls back to 0 with a warning.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::{
    error::{DataPointError, Result},
    model::{
        Extreme, ExtremeCapabilities, Forecast, IntParameterValue, LatestExtremes, LocationRep,
        ParameterDescriptor, Period, Region, RegionalForecastCapabilities, RegionalForecastSite,
        Site, SiteLookup, SiteRep, StringParameterValue, TimeSteps,
    },
    params::{KNOWN_INT_PARAMETERS, OBSERVATION_INT_PARAMETERS},
    wire,
};

/// Key of the offset marker inside each `Rep` record.
const OFFSET_KEY: &str = "$";
/// "Night" is pinned to the last second of the period's day.
const NIGHT_OFFSET_SECS: i64 = 86_399;

const PERIOD_DATE_FORMAT: &str = "%Y-%m-%dZ";
const DATE_FORMAT: &str = "%Y-%m-%d";

type Descriptors = HashMap<String, ParameterDescriptor>;

fn parse_int(field: &str, raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|e| DataPointError::invalid_number(field, raw, e))
}

fn parse_float(field: &str, raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|e| DataPointError::invalid_number(field, raw, e))
}

/// Empty means "not provided"; anything unparseable is logged and dropped.
fn parse_elevation(raw: &str) -> f64 {
    if raw.is_empty() {
        return 0.0;
    }

    match raw.parse() {
        Ok(elevation) => elevation,
        Err(err) => {
            warn!(elevation = raw, %err, "failed to parse elevation");
            0.0
        }
    }
}

fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DataPointError::invalid_timestamp(field, raw, e))
}

fn parse_date(field: &str, raw: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, format)
        .map_err(|e| DataPointError::invalid_timestamp(field, raw, e))
}

/// Decodes the `$` marker of a forecast record into seconds after midnight.
fn decode_offset(token: &str) -> Result<i64> {
    match token {
        "Day" => Ok(0),
        "Night" => Ok(NIGHT_OFFSET_SECS),
        minutes => {
            let minutes: i16 = minutes
                .parse()
                .map_err(|e| DataPointError::invalid_number("forecast offset", minutes, e))?;
            Ok(i64::from(minutes) * 60)
        }
    }
}

fn descriptor_table(wx: &wire::WxEntry) -> Descriptors {
    wx.param
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                ParameterDescriptor {
                    name: p.name.clone(),
                    units: p.units.clone(),
                    description: p.description.clone(),
                },
            )
        })
        .collect()
}

/// `int_codes` lists the parameters decoded as integers; the forecast and
/// observation feeds disagree on which codes carry whole numbers.
fn convert_forecast(
    descriptors: &Descriptors,
    int_codes: &[&str],
    period_start: DateTime<Utc>,
    rep: &BTreeMap<String, String>,
) -> Result<Forecast> {
    let offset = rep
        .get(OFFSET_KEY)
        .ok_or_else(|| DataPointError::MissingField {
            field: "forecast offset".into(),
        })
        .and_then(|token| decode_offset(token))?;

    let mut int_params = BTreeMap::new();
    let mut string_params = BTreeMap::new();

    for (code, value) in rep.iter().filter(|(code, _)| *code != OFFSET_KEY) {
        let descriptor = descriptors
            .get(code)
            .cloned()
            .ok_or_else(|| DataPointError::UnknownParameter { code: code.clone() })?;

        if int_codes.contains(&code.as_str()) {
            let value: i16 = value.parse().map_err(|e| {
                DataPointError::invalid_number(format!("known int value {code}"), value, e)
            })?;
            int_params.insert(code.clone(), IntParameterValue { descriptor, value });
        } else {
            string_params.insert(
                code.clone(),
                StringParameterValue {
                    descriptor,
                    value: value.clone(),
                },
            );
        }
    }

    Ok(Forecast {
        time: period_start + Duration::seconds(offset),
        int_params,
        string_params,
    })
}

fn convert_period(
    descriptors: &Descriptors,
    int_codes: &[&str],
    entry: &wire::PeriodEntry,
) -> Result<Period> {
    let time = parse_date("period date", &entry.value, PERIOD_DATE_FORMAT)?
        .and_time(NaiveTime::MIN)
        .and_utc();

    let forecasts = entry
        .rep
        .iter()
        .map(|rep| convert_forecast(descriptors, int_codes, time, rep))
        .collect::<Result<Vec<_>>>()?;

    Ok(Period {
        kind: entry.kind.clone(),
        time,
        forecasts,
    })
}

/// Shared by the single-location and all-locations endpoints.
fn convert_location(
    descriptors: &Descriptors,
    int_codes: &[&str],
    kind: &str,
    data_date: DateTime<Utc>,
    entry: &wire::LocationEntry,
) -> Result<SiteRep> {
    let periods = entry
        .period
        .iter()
        .map(|p| convert_period(descriptors, int_codes, p))
        .collect::<Result<Vec<_>>>()?;

    Ok(SiteRep {
        data_date,
        kind: kind.to_string(),
        location: LocationRep {
            id: parse_int("location id", &entry.id)?,
            latitude: parse_float("latitude", &entry.latitude)?,
            longitude: parse_float("longitude", &entry.longitude)?,
            name: entry.name.clone(),
            country: entry.country.clone(),
            continent: entry.continent.clone(),
            elevation: parse_elevation(&entry.elevation),
            periods,
        },
    })
}

pub(crate) fn site_list(resp: wire::SiteListResponse) -> Result<Vec<Site>> {
    resp.locations
        .location
        .into_iter()
        .map(|site| -> Result<Site> {
            Ok(Site {
                id: parse_int("id", &site.id)?,
                latitude: parse_float("latitude", &site.latitude)?,
                longitude: parse_float("longitude", &site.longitude)?,
                elevation: parse_elevation(&site.elevation),
                name: site.name,
                region: site.region,
                unitary_auth_area: site.unitary_auth_area,
            })
        })
        .collect()
}

pub(crate) fn time_steps(resp: wire::CapabilitiesResponse) -> Result<TimeSteps> {
    let resource = resp.resource;

    let data_date = parse_timestamp("data date", &resource.data_date)?;
    let time_steps = resource
        .time_steps
        .ts
        .iter()
        .map(|ts| parse_timestamp("time step", ts))
        .collect::<Result<Vec<_>>>()?;

    Ok(TimeSteps {
        data_date,
        resolution: resource.res,
        kind: resource.kind,
        time_steps,
    })
}

/// An empty location id means the service had nothing for the request.
pub(crate) fn site_rep(resp: wire::SiteRepResponse<wire::LocationEntry>) -> Result<SiteLookup> {
    single_location(resp, KNOWN_INT_PARAMETERS)
}

/// Hourly observations share the forecast envelope but not its integer codes.
pub(crate) fn observation_rep(
    resp: wire::SiteRepResponse<wire::LocationEntry>,
) -> Result<SiteLookup> {
    single_location(resp, OBSERVATION_INT_PARAMETERS)
}

fn single_location(
    resp: wire::SiteRepResponse<wire::LocationEntry>,
    int_codes: &[&str],
) -> Result<SiteLookup> {
    let body = resp.site_rep;
    if body.dv.location.id.is_empty() {
        return Ok(SiteLookup::NoData);
    }

    let descriptors = descriptor_table(&body.wx);
    let data_date = parse_timestamp("data date", &body.dv.data_date)?;

    convert_location(
        &descriptors,
        int_codes,
        &body.dv.kind,
        data_date,
        &body.dv.location,
    )
    .map(SiteLookup::Found)
}

pub(crate) fn site_reps(
    resp: wire::SiteRepResponse<Vec<wire::LocationEntry>>,
) -> Result<Vec<SiteRep>> {
    let body = resp.site_rep;

    let descriptors = descriptor_table(&body.wx);
    let data_date = parse_timestamp("data date", &body.dv.data_date)?;

    body.dv
        .location
        .iter()
        .map(|entry| {
            convert_location(
                &descriptors,
                KNOWN_INT_PARAMETERS,
                &body.dv.kind,
                data_date,
                entry,
            )
        })
        .collect()
}

pub(crate) fn extreme_capabilities(resp: wire::ExtremesResponse) -> Result<ExtremeCapabilities> {
    let extremes = resp.uk_extremes;

    Ok(ExtremeCapabilities {
        extreme_date: parse_date("extreme date", &extremes.extreme_date, DATE_FORMAT)?,
        issued_at: parse_timestamp("issued at date", &extremes.issued_at)?,
    })
}

pub(crate) fn latest_extremes(resp: wire::ExtremesResponse) -> Result<LatestExtremes> {
    let extremes = resp.uk_extremes;

    let regions = extremes
        .regions
        .region
        .into_iter()
        .map(|region| -> Result<Region> {
            let extremes = region
                .extremes
                .extreme
                .into_iter()
                .map(|e| -> Result<Extreme> {
                    Ok(Extreme {
                        location_id: parse_int("location id", &e.location_id)?,
                        value: parse_float("extreme value", &e.value)?,
                        location_name: e.location_name,
                        kind: e.kind,
                        unit_of_measurement: e.uom,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(Region {
                id: region.id,
                name: region.name,
                extremes,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LatestExtremes {
        extreme_date: parse_date("extreme date", &extremes.extreme_date, DATE_FORMAT)?,
        issued_at: parse_timestamp("issued at date", &extremes.issued_at)?,
        regions,
    })
}

pub(crate) fn regional_sites(
    resp: wire::RegionalSiteListResponse,
) -> Result<Vec<RegionalForecastSite>> {
    resp.locations
        .location
        .into_iter()
        .map(|site| -> Result<RegionalForecastSite> {
            Ok(RegionalForecastSite {
                id: parse_int("location id", &site.id)?,
                name: site.name,
            })
        })
        .collect()
}

pub(crate) fn regional_capabilities(
    resp: wire::RegionalCapabilitiesResponse,
) -> Result<RegionalForecastCapabilities> {
    Ok(RegionalForecastCapabilities {
        issued_at: parse_timestamp("issued at time", &resp.regional_forecast.issued_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use chrono::TimeZone;
    use serde_json::json;
    use std::{
        io,
        sync::{Arc, Mutex},
    };
    use tracing_subscriber::fmt::MakeWriter;

    fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).expect("fixture should decode")
    }

    fn param_table() -> serde_json::Value {
        json!([
            {"name": "F", "units": "C", "$": "Feels Like Temperature"},
            {"name": "G", "units": "mph", "$": "Wind Gust"},
            {"name": "T", "units": "C", "$": "Temperature"},
            {"name": "V", "units": "", "$": "Visibility"},
            {"name": "D", "units": "compass", "$": "Wind Direction"},
            {"name": "W", "units": "", "$": "Weather Type"},
            {"name": "Dm", "units": "C", "$": "Day Maximum Temperature"},
            {"name": "Nm", "units": "C", "$": "Night Minimum Temperature"},
            {"name": "Zq", "units": "", "$": "Undocumented"}
        ])
    }

    fn single(location: serde_json::Value) -> wire::SiteRepResponse<wire::LocationEntry> {
        decode(json!({
            "SiteRep": {
                "Wx": {"Param": param_table()},
                "DV": {"dataDate": "2024-03-01T09:00:00Z", "type": "Forecast", "Location": location}
            }
        }))
    }

    fn location(reps: serde_json::Value) -> serde_json::Value {
        json!({
            "i": "310069", "lat": "50.7179", "lon": "-3.5327", "name": "EXETER",
            "country": "ENGLAND", "continent": "EUROPE", "elevation": "27.0",
            "Period": [{"type": "Day", "value": "2024-03-01Z", "Rep": reps}]
        })
    }

    fn found(lookup: SiteLookup) -> SiteRep {
        match lookup {
            SiteLookup::Found(rep) => rep,
            SiteLookup::NoData => panic!("expected data"),
        }
    }

    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn known_int_codes_go_to_int_params() {
        let rep = found(
            site_rep(single(location(json!([
                {"F": "-2", "G": "25", "T": "4", "W": "7", "$": "180"}
            ]))))
            .unwrap(),
        );
        let forecast = &rep.location.periods[0].forecasts[0];

        assert_eq!(forecast.int("F"), Some(-2));
        assert_eq!(forecast.int("G"), Some(25));
        assert_eq!(forecast.int("T"), Some(4));
        assert_eq!(forecast.int_params["W"].descriptor.description, "Weather Type");
        assert!(forecast.string_params.is_empty());
    }

    #[test]
    fn other_codes_stay_verbatim_even_when_numeric() {
        let rep = found(
            site_rep(single(location(json!([
                {"V": "GO", "D": "SSW", "Zq": "0042", "$": "Day"}
            ]))))
            .unwrap(),
        );
        let forecast = &rep.location.periods[0].forecasts[0];

        assert_eq!(forecast.string("V"), Some("GO"));
        assert_eq!(forecast.string("D"), Some("SSW"));
        assert_eq!(forecast.string("Zq"), Some("0042"));
        assert!(forecast.int_params.is_empty());
    }

    fn observation(reps: serde_json::Value) -> wire::SiteRepResponse<wire::LocationEntry> {
        decode(json!({
            "SiteRep": {
                "Wx": {"Param": [
                    {"name": "G", "units": "mph", "$": "Wind Gust"},
                    {"name": "T", "units": "C", "$": "Temperature"},
                    {"name": "H", "units": "%", "$": "Screen Relative Humidity"},
                    {"name": "Dp", "units": "C", "$": "Dew Point"},
                    {"name": "P", "units": "hpa", "$": "Pressure"},
                    {"name": "S", "units": "mph", "$": "Wind Speed"},
                    {"name": "W", "units": "", "$": "Weather Type"}
                ]},
                "DV": {"dataDate": "2024-03-01T09:00:00Z", "type": "Obs", "Location": location(reps)}
            }
        }))
    }

    #[test]
    fn observation_decimals_stay_text() {
        let rep = found(
            observation_rep(observation(json!([
                {"T": "10.2", "H": "90.5", "Dp": "8.7", "P": "1008", "$": "540"},
                {"G": "21", "S": "12", "W": "8", "T": "9.8", "$": "600"}
            ])))
            .unwrap(),
        );
        let first = &rep.location.periods[0].forecasts[0];
        let second = &rep.location.periods[0].forecasts[1];

        assert_eq!(first.string("T"), Some("10.2"));
        assert_eq!(first.string("H"), Some("90.5"));
        assert_eq!(first.string("Dp"), Some("8.7"));
        assert_eq!(first.int("P"), Some(1008));
        assert_eq!(first.time, midnight() + Duration::minutes(540));

        assert_eq!(second.int("G"), Some(21));
        assert_eq!(second.int("S"), Some(12));
        assert_eq!(second.int("W"), Some(8));
        assert_eq!(second.string("T"), Some("9.8"));
    }

    #[test]
    fn forecast_codes_stay_strict() {
        let err = site_rep(observation(json!([{"T": "10.2", "$": "540"}]))).unwrap_err();

        assert_eq!(err.stage(), Stage::Conversion);
        assert!(err.to_string().contains("\"10.2\""));
    }

    #[test]
    fn offset_marker_is_never_a_parameter() {
        let rep = found(site_rep(single(location(json!([{"T": "1", "$": "Day"}])))).unwrap());
        let forecast = &rep.location.periods[0].forecasts[0];

        assert!(!forecast.int_params.contains_key("$"));
        assert!(!forecast.string_params.contains_key("$"));
    }

    #[test]
    fn offsets_decode_to_absolute_times() {
        let rep = found(
            site_rep(single(location(json!([
                {"Dm": "12", "$": "Day"},
                {"Nm": "3", "$": "Night"},
                {"T": "8", "$": "180"}
            ]))))
            .unwrap(),
        );
        let period = &rep.location.periods[0];

        assert_eq!(period.time, midnight());
        assert_eq!(period.forecasts[0].time, midnight());
        assert_eq!(
            period.forecasts[1].time,
            Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap()
        );
        assert_eq!(
            period.forecasts[2].time,
            Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_offset_fails() {
        let err = site_rep(single(location(json!([{"T": "8"}])))).unwrap_err();
        assert!(matches!(err, DataPointError::MissingField { .. }));
    }

    #[test]
    fn garbage_offset_fails() {
        let err = site_rep(single(location(json!([{"T": "8", "$": "Dusk"}])))).unwrap_err();
        assert!(err.to_string().contains("Dusk"));
    }

    #[test]
    fn unknown_parameter_names_the_code() {
        let err = site_rep(single(location(json!([{"Xy": "1", "$": "Day"}])))).unwrap_err();

        assert_eq!(err.stage(), Stage::Conversion);
        assert!(matches!(&err, DataPointError::UnknownParameter { code } if code == "Xy"));
        assert!(err.to_string().contains("Xy"));
    }

    #[test]
    fn non_numeric_known_int_is_fatal() {
        let err = site_rep(single(location(json!([{"T": "warm", "$": "Day"}])))).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("known int value T"));
        assert!(msg.contains("warm"));
    }

    #[test]
    fn known_int_outside_16_bits_is_fatal() {
        let err = site_rep(single(location(json!([{"T": "40000", "$": "Day"}])))).unwrap_err();
        assert!(matches!(err, DataPointError::InvalidNumber { .. }));
    }

    #[test]
    fn empty_location_id_means_no_data() {
        let resp: wire::SiteRepResponse<wire::LocationEntry> = decode(json!({
            "SiteRep": {"Wx": {"Param": []}, "DV": {"dataDate": "", "type": "Forecast"}}
        }));

        assert_eq!(site_rep(resp).unwrap(), SiteLookup::NoData);
    }

    #[test]
    fn bad_data_date_is_fatal() {
        let resp: wire::SiteRepResponse<wire::LocationEntry> = decode(json!({
            "SiteRep": {
                "Wx": {"Param": []},
                "DV": {"dataDate": "01/03/2024 09:00", "type": "Forecast", "Location": location(json!([]))}
            }
        }));

        let err = site_rep(resp).unwrap_err();
        assert!(err.to_string().contains("01/03/2024 09:00"));
    }

    #[test]
    fn bad_period_date_is_fatal() {
        let mut loc = location(json!([]));
        loc["Period"][0]["value"] = json!("2024-03-01");

        let err = site_rep(single(loc)).unwrap_err();
        assert!(matches!(err, DataPointError::InvalidTimestamp { .. }));
    }

    #[test]
    fn location_fields_are_parsed() {
        let rep = found(site_rep(single(location(json!([])))).unwrap());

        assert_eq!(rep.kind, "Forecast");
        assert_eq!(rep.data_date, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        assert_eq!(rep.location.id, 310069);
        assert_eq!(rep.location.latitude, 50.7179);
        assert_eq!(rep.location.longitude, -3.5327);
        assert_eq!(rep.location.elevation, 27.0);
        assert_eq!(rep.location.country, "ENGLAND");
    }

    #[test]
    fn every_location_is_converted_in_order() {
        let mut second = location(json!([{"T": "5", "$": "Day"}]));
        second["i"] = json!("3772");
        second["elevation"] = json!("");

        let resp: wire::SiteRepResponse<Vec<wire::LocationEntry>> = decode(json!({
            "SiteRep": {
                "Wx": {"Param": param_table()},
                "DV": {
                    "dataDate": "2024-03-01T09:00:00Z",
                    "type": "Forecast",
                    "Location": [location(json!([])), second]
                }
            }
        }));

        let reps = site_reps(resp).unwrap();
        assert_eq!(reps.len(), 2);
        assert_eq!(reps[0].location.id, 310069);
        assert_eq!(reps[1].location.id, 3772);
        assert_eq!(reps[1].location.elevation, 0.0);
        assert_eq!(reps[1].location.periods[0].forecasts[0].int("T"), Some(5));
    }

    #[test]
    fn one_bad_location_fails_the_batch() {
        let mut bad = location(json!([]));
        bad["lat"] = json!("north");

        let resp: wire::SiteRepResponse<Vec<wire::LocationEntry>> = decode(json!({
            "SiteRep": {
                "Wx": {"Param": []},
                "DV": {"dataDate": "2024-03-01T09:00:00Z", "type": "Forecast", "Location": [location(json!([])), bad]}
            }
        }));

        assert!(site_reps(resp).is_err());
    }

    fn sitelist(elevation: &str) -> wire::SiteListResponse {
        decode(json!({
            "Locations": {"Location": [{
                "id": "310069", "latitude": "50.7179", "longitude": "-3.5327",
                "name": "Exeter", "elevation": elevation, "region": "sw",
                "unitaryAuthArea": "Devon"
            }]}
        }))
    }

    #[test]
    fn sitelist_entry_is_converted() {
        let sites = site_list(sitelist("")).unwrap();

        assert_eq!(
            sites,
            vec![Site {
                id: 310069,
                latitude: 50.7179,
                longitude: -3.5327,
                name: "Exeter".into(),
                elevation: 0.0,
                region: "sw".into(),
                unitary_auth_area: "Devon".into(),
            }]
        );
    }

    #[test]
    fn elevation_defaults() {
        assert_eq!(site_list(sitelist("12.5")).unwrap()[0].elevation, 12.5);
        assert_eq!(site_list(sitelist("abc")).unwrap()[0].elevation, 0.0);
        assert_eq!(parse_elevation(""), 0.0);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Runs `f` with a subscriber that records WARN and above as plain text.
    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let out = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        (out, logs)
    }

    #[test]
    fn garbage_elevation_is_logged_once() {
        let (sites, logs) = with_captured_logs(|| site_list(sitelist("abc")));

        assert_eq!(sites.unwrap()[0].elevation, 0.0);
        let warnings: Vec<&str> = logs
            .lines()
            .filter(|line| line.contains("failed to parse elevation"))
            .collect();
        assert_eq!(warnings.len(), 1, "logs: {logs}");
        assert!(warnings[0].contains("WARN"));
        assert!(warnings[0].contains("abc"));
    }

    #[test]
    fn empty_elevation_is_silent() {
        let (sites, logs) = with_captured_logs(|| site_list(sitelist("")));

        assert_eq!(sites.unwrap()[0].elevation, 0.0);
        assert!(logs.is_empty(), "unexpected logs: {logs}");
    }

    #[test]
    fn bad_site_id_is_fatal() {
        let resp: wire::SiteListResponse = decode(json!({
            "Locations": {"Location": [{"id": "x1", "latitude": "1", "longitude": "1"}]}
        }));

        let err = site_list(resp).unwrap_err();
        assert!(err.to_string().contains("x1"));
    }

    #[test]
    fn capabilities_are_converted() {
        let resp: wire::CapabilitiesResponse = decode(json!({
            "Resource": {
                "dataDate": "2024-03-01T09:00:00Z",
                "res": "3hourly",
                "type": "wxfcs",
                "TimeSteps": {"TS": ["2024-03-01T09:00:00Z", "2024-03-01T12:00:00Z"]}
            }
        }));

        let steps = time_steps(resp).unwrap();
        assert_eq!(steps.resolution, crate::params::Resolution::ThreeHourly);
        assert_eq!(steps.kind, "wxfcs");
        assert_eq!(
            steps.time_steps,
            vec![
                Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            ]
        );
    }

    fn extremes() -> wire::ExtremesResponse {
        decode(json!({
            "UkExtremes": {
                "extremeDate": "2024-02-29",
                "issuedAt": "2024-03-01T08:00:00Z",
                "Regions": {"Region": [
                    {"id": "sw", "name": "South West England", "Extremes": {"Extreme": [
                        {"locId": "3808", "locationName": "Camborne", "type": "HMAXT", "uom": "degC", "$": "12.3"}
                    ]}},
                    {"id": "ta", "name": "Tayside", "Extremes": {"Extreme":
                        {"locId": "3088", "locationName": "Braemar", "type": "LMINT", "uom": "degC", "$": "-6.1"}
                    }}
                ]}
            }
        }))
    }

    #[test]
    fn latest_extremes_are_grouped_by_region() {
        let latest = latest_extremes(extremes()).unwrap();

        assert_eq!(latest.extreme_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(latest.regions.len(), 2);
        assert_eq!(latest.regions[0].extremes[0].value, 12.3);
        assert_eq!(latest.regions[1].extremes[0].location_name, "Braemar");
        assert_eq!(latest.regions[1].extremes[0].value, -6.1);
    }

    #[test]
    fn extreme_capabilities_use_date_only_format() {
        let caps = extreme_capabilities(extremes()).unwrap();
        assert_eq!(caps.extreme_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(caps.issued_at, Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn regional_capabilities_parse_issued_at() {
        let resp: wire::RegionalCapabilitiesResponse =
            decode(json!({"RegionalFcst": {"issuedAt": "2024-03-01T04:00:00Z"}}));

        let caps = regional_capabilities(resp).unwrap();
        assert_eq!(caps.issued_at, Utc.with_ymd_and_hms(2024, 3, 1, 4, 0, 0).unwrap());
    }

    #[test]
    fn regional_sites_parse_ids() {
        let resp: wire::RegionalSiteListResponse = decode(json!({
            "Locations": {"Location": [{"@id": "500", "@name": "os"}, {"@id": "515", "@name": "uk"}]}
        }));

        let sites = regional_sites(resp).unwrap();
        assert_eq!(sites[1], RegionalForecastSite { id: 515, name: "uk".into() });
    }
}

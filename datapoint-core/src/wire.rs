//! Raw JSON shapes returned by DataPoint.
//!
//! Numbers and dates arrive as strings and are only interpreted by
//! [`crate::convert`]. Missing fields decode to empty values, leaving the
//! converters to decide what is fatal.

use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, SeqAccess, Visitor},
};
use std::{collections::BTreeMap, fmt, marker::PhantomData};

use crate::params::Resolution;

/// Accepts `[..]` or a bare value. The XML bridge behind DataPoint drops
/// the array wrapper when a list has exactly one element.
///
/// Errors inside an element are reported as-is rather than being folded
/// into a generic "no variant matched" message.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct OneOrMany<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for OneOrMany<T> {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list or a single element")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
            Vec::deserialize(de::value::SeqAccessDeserializer::new(seq))
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
            T::deserialize(de::value::MapAccessDeserializer::new(map)).map(|item| vec![item])
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            T::deserialize(de::value::StrDeserializer::new(v)).map(|item| vec![item])
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            T::deserialize(de::value::StringDeserializer::new(v)).map(|item| vec![item])
        }
    }

    deserializer.deserialize_any(OneOrMany(PhantomData))
}

// ============================================================================
// val/{wxfcs,wxobs}/all/json/sitelist
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SiteListResponse {
    #[serde(rename = "Locations", default)]
    pub locations: SiteLocations,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SiteLocations {
    #[serde(rename = "Location", default, deserialize_with = "one_or_many")]
    pub location: Vec<SiteEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct SiteEntry {
    pub elevation: String,
    pub id: String,
    pub latitude: String,
    pub longitude: String,
    pub name: String,
    pub region: String,
    pub unitary_auth_area: String,
}

// ============================================================================
// val/{wxfcs,wxobs}/all/json/capabilities
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct CapabilitiesResponse {
    #[serde(rename = "Resource")]
    pub resource: CapabilitiesResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CapabilitiesResource {
    #[serde(rename = "dataDate", default)]
    pub data_date: String,
    pub res: Resolution,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "TimeSteps", default)]
    pub time_steps: TimeStepList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TimeStepList {
    #[serde(rename = "TS", default, deserialize_with = "one_or_many")]
    pub ts: Vec<String>,
}

// ============================================================================
// val/{wxfcs,wxobs}/all/json/{location}
// ============================================================================

/// `L` is a single [`LocationEntry`] when one site was requested and a
/// `Vec<LocationEntry>` for `all`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SiteRepResponse<L> {
    #[serde(rename = "SiteRep", default)]
    pub site_rep: SiteRepBody<L>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SiteRepBody<L> {
    #[serde(rename = "Wx", default)]
    pub wx: WxEntry,
    #[serde(rename = "DV", default)]
    pub dv: DvEntry<L>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WxEntry {
    #[serde(rename = "Param", default, deserialize_with = "one_or_many")]
    pub param: Vec<ParamEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ParamEntry {
    pub name: String,
    pub units: String,
    #[serde(rename = "$")]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DvEntry<L> {
    #[serde(rename = "dataDate", default)]
    pub data_date: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "Location", default)]
    pub location: L,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LocationEntry {
    #[serde(rename = "i")]
    pub id: String,
    #[serde(rename = "lat")]
    pub latitude: String,
    #[serde(rename = "lon")]
    pub longitude: String,
    pub name: String,
    pub country: String,
    pub continent: String,
    pub elevation: String,
    #[serde(rename = "Period", deserialize_with = "one_or_many")]
    pub period: Vec<PeriodEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PeriodEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    /// Parameter code to raw value, plus the `$` offset marker.
    #[serde(rename = "Rep", deserialize_with = "one_or_many")]
    pub rep: Vec<BTreeMap<String, String>>,
}

// ============================================================================
// txt/wxobs/ukextremes/json/{capabilities,latest}
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ExtremesResponse {
    #[serde(rename = "UkExtremes")]
    pub uk_extremes: UkExtremes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct UkExtremes {
    pub extreme_date: String,
    pub issued_at: String,
    #[serde(rename = "Regions")]
    pub regions: RegionList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RegionList {
    #[serde(rename = "Region", default, deserialize_with = "one_or_many")]
    pub region: Vec<RegionEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RegionEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "Extremes")]
    pub extremes: ExtremeList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExtremeList {
    #[serde(rename = "Extreme", default, deserialize_with = "one_or_many")]
    pub extreme: Vec<ExtremeEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ExtremeEntry {
    #[serde(rename = "locId")]
    pub location_id: String,
    #[serde(rename = "locationName")]
    pub location_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub uom: String,
    #[serde(rename = "$")]
    pub value: String,
}

// ============================================================================
// txt/wxfcs/regionalforecast/json/{sitelist,capabilities}
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RegionalSiteListResponse {
    #[serde(rename = "Locations", default)]
    pub locations: RegionalLocations,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RegionalLocations {
    #[serde(rename = "Location", default, deserialize_with = "one_or_many")]
    pub location: Vec<RegionalLocationEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RegionalLocationEntry {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegionalCapabilitiesResponse {
    #[serde(rename = "RegionalFcst")]
    pub regional_forecast: RegionalForecastEntry,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RegionalForecastEntry {
    pub issued_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rep_object_is_accepted() {
        let json = r#"{"type":"Day","value":"2024-03-01Z","Rep":{"T":"9","$":"Day"}}"#;
        let period: PeriodEntry = serde_json::from_str(json).unwrap();

        assert_eq!(period.rep.len(), 1);
        assert_eq!(period.rep[0]["T"], "9");
    }

    #[test]
    fn single_time_step_string_is_accepted() {
        let list: TimeStepList = serde_json::from_str(r#"{"TS":"2024-03-01T09:00:00Z"}"#).unwrap();
        assert_eq!(list.ts, vec!["2024-03-01T09:00:00Z".to_string()]);
    }

    #[test]
    fn element_errors_keep_their_diagnostic() {
        let json = r#"{"type":"Day","value":"2024-03-01Z","Rep":[{"T":9,"$":"Day"}]}"#;
        let err = serde_json::from_str::<PeriodEntry>(json).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("invalid type: integer `9`"), "{msg}");
        assert!(!msg.contains("did not match any variant"), "{msg}");
    }

    #[test]
    fn bare_object_errors_keep_their_diagnostic() {
        let json = r#"{"type":"Day","value":"2024-03-01Z","Rep":{"T":["9"],"$":"Day"}}"#;
        let err = serde_json::from_str::<PeriodEntry>(json).unwrap_err();

        assert!(err.to_string().contains("invalid type: sequence"), "{err}");
    }

    #[test]
    fn scalar_where_list_expected_is_rejected() {
        let err = serde_json::from_str::<WxEntry>(r#"{"Param":7}"#).unwrap_err();
        assert!(err.to_string().contains("a list or a single element"), "{err}");
    }

    #[test]
    fn missing_location_decodes_as_empty() {
        let json = r#"{"SiteRep":{"Wx":{"Param":[]},"DV":{"dataDate":"2024-03-01T09:00:00Z","type":"Forecast"}}}"#;
        let resp: SiteRepResponse<LocationEntry> = serde_json::from_str(json).unwrap();

        assert!(resp.site_rep.dv.location.id.is_empty());
        assert!(resp.site_rep.dv.location.period.is_empty());
    }

    #[test]
    fn site_entry_uses_camel_case_keys() {
        let json = r#"{"id":"1","unitaryAuthArea":"Devon"}"#;
        let entry: SiteEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.unitary_auth_area, "Devon");
        assert!(entry.elevation.is_empty());
    }

    #[test]
    fn regional_sites_use_attribute_keys() {
        let json = r#"{"Locations":{"Location":[{"@id":"500","@name":"os"}]}}"#;
        let resp: RegionalSiteListResponse = serde_json::from_str(json).unwrap();

        assert_eq!(resp.locations.location[0].id, "500");
        assert_eq!(resp.locations.location[0].name, "os");
    }
}

//! The per-request geolocation result.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Where a visitor is, as reported by the upstream provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub country: String,
    pub city: String,
}

impl Visit {
    /// Decode the first JSON value of an upstream body.
    ///
    /// Anything after that value is ignored and a top-level `null` is an
    /// empty visit. An empty body is an error.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<Visit>>();
        match values.next() {
            Some(value) => Ok(value?.unwrap_or_default()),
            None => Err(de::Error::custom("empty geolocation response body")),
        }
    }
}

// Keys match case-insensitively and are applied in document order, so a
// repeated key keeps its last value. `null` leaves a field untouched and
// unknown keys are skipped.
impl<'de> Deserialize<'de> for Visit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(VisitVisitor)
    }
}

struct VisitVisitor;

impl<'de> Visitor<'de> for VisitVisitor {
    type Value = Visit;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object with country and city strings")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Visit, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut visit = Visit::default();

        while let Some(key) = map.next_key::<String>()? {
            let field = if key.eq_ignore_ascii_case("country") {
                &mut visit.country
            } else if key.eq_ignore_ascii_case("city") {
                &mut visit.city
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };

            if let Some(value) = map.next_value::<Option<String>>()? {
                *field = value;
            }
        }

        Ok(visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paris() -> Visit {
        Visit { country: "France".into(), city: "Paris".into() }
    }

    #[test]
    fn test_decode_ip_api_body() {
        let body = br#"{
            "status": "success",
            "country": "France",
            "countryCode": "FR",
            "regionName": "Ile-de-France",
            "city": "Paris",
            "lat": 48.8566,
            "lon": 2.3522,
            "query": "203.0.113.5"
        }"#;
        assert_eq!(Visit::from_body(body).unwrap(), paris());
    }

    #[test]
    fn test_missing_and_null_fields_are_empty() {
        let visit = Visit::from_body(br#"{"status":"fail","message":"private range"}"#).unwrap();
        assert_eq!(visit, Visit::default());

        let visit = Visit::from_body(br#"{"country":null,"city":"Oslo"}"#).unwrap();
        assert_eq!(visit.country, "");
        assert_eq!(visit.city, "Oslo");
    }

    #[test]
    fn test_only_first_value_is_read() {
        let body = b"{\"country\":\"France\",\"city\":\"Paris\"}\n{\"extra\":1}";
        assert_eq!(Visit::from_body(body).unwrap(), paris());

        let body = b"{\"country\":\"France\",\"city\":\"Paris\"} trailing garbage";
        assert_eq!(Visit::from_body(body).unwrap(), paris());
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let visit = Visit::from_body(br#"{"Country":"France","CITY":"Paris"}"#).unwrap();
        assert_eq!(visit, paris());
    }

    #[test]
    fn test_null_body_is_empty_visit() {
        assert_eq!(Visit::from_body(b"null").unwrap(), Visit::default());
        assert_eq!(Visit::from_body(b"  null\n").unwrap(), Visit::default());
    }

    #[test]
    fn test_last_duplicate_key_wins() {
        let visit = Visit::from_body(br#"{"country":"A","country":"B","city":"Paris"}"#).unwrap();
        assert_eq!(visit.country, "B");

        let visit = Visit::from_body(br#"{"city":"Lyon","CITY":"Paris","country":"France"}"#).unwrap();
        assert_eq!(visit, paris());
    }

    #[test]
    fn test_null_does_not_clear_earlier_value() {
        let visit = Visit::from_body(br#"{"city":"Paris","city":null}"#).unwrap();
        assert_eq!(visit.city, "Paris");
    }

    #[test]
    fn test_wrong_shapes_fail() {
        assert!(Visit::from_body(b"<html>nope</html>").is_err());
        assert!(Visit::from_body(br#"{"country": 42}"#).is_err());
        assert!(Visit::from_body(br#"["France","Paris"]"#).is_err());
        assert!(Visit::from_body(br#""Paris""#).is_err());
        assert!(Visit::from_body(b"").is_err());
        assert!(Visit::from_body(b"   \n").is_err());
    }

    #[test]
    fn test_serialized_shape() {
        assert_eq!(
            serde_json::to_value(paris()).unwrap(),
            json!({"country": "France", "city": "Paris"})
        );
    }
}

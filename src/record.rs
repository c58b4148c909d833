//! Source records: the filtered animal-hospital entries read from JSON.

use std::{fmt, path::Path};

use anyhow::{Context, Result};
use encoding_rs::UTF_8;
use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};

use crate::io_utils;

/// A scalar JSON value carried as text. The upstream filter step emits
/// strings for most fields but plain numbers for management numbers and
/// coordinates, so any scalar is accepted and coerced on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text(value.to_string())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text(value)
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Text;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number, boolean, or null")
            }

            fn visit_str<E>(self, value: &str) -> Result<Text, E>
            where
                E: de::Error,
            {
                Ok(Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Text, E>
            where
                E: de::Error,
            {
                Ok(Text(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Text, E>
            where
                E: de::Error,
            {
                Ok(Text(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Text, E>
            where
                E: de::Error,
            {
                Ok(Text(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Text, E>
            where
                E: de::Error,
            {
                Ok(Text(value.to_string()))
            }

            fn visit_bool<E>(self, value: bool) -> Result<Text, E>
            where
                E: de::Error,
            {
                Ok(Text(value.to_string()))
            }

            fn visit_unit<E>(self) -> Result<Text, E>
            where
                E: de::Error,
            {
                Ok(Text(String::new()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// One filtered animal-hospital entry. Field names mirror the keys produced
/// by the upstream filter step; unknown keys are ignored. A missing required
/// key fails deserialization and aborts the run.
#[derive(Debug, Clone, Deserialize)]
pub struct HospitalRecord {
    pub management_no: Text,
    pub license_date: Text,
    pub phone: Text,
    #[serde(default)]
    pub postal_code: Option<Text>,
    pub address: Text,
    pub road_address: Text,
    pub hospital_name: Text,
    pub x_coordinate: Text,
    pub y_coordinate: Text,
}

impl HospitalRecord {
    /// Postal code shared by both postal-code columns; empty when absent.
    pub fn postal_code_or_empty(&self) -> &str {
        self.postal_code.as_ref().map(Text::as_str).unwrap_or("")
    }
}

/// Loads the filtered hospital records from a JSON array file.
pub fn load_records(path: &Path) -> Result<Vec<HospitalRecord>> {
    let reader = io_utils::open_decoded_reader(path, UTF_8)?;
    serde_json::from_reader(reader)
        .with_context(|| format!("Parsing hospital records from {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_fields_coerce_to_text() {
        let record: HospitalRecord = serde_json::from_value(json!({
            "management_no": 3220000,
            "license_date": "20230315",
            "phone": "02-1234-5678",
            "postal_code": 6035,
            "address": "서울특별시 강남구 테헤란로 123",
            "road_address": "서울특별시 강남구 테헤란로 123",
            "hospital_name": "행복동물병원",
            "x_coordinate": 202100.123456,
            "y_coordinate": 444838.25
        }))
        .expect("record deserializes");

        assert_eq!(record.management_no.as_str(), "3220000");
        assert_eq!(record.postal_code_or_empty(), "6035");
        assert_eq!(record.x_coordinate.as_str(), "202100.123456");
        assert_eq!(record.y_coordinate.as_str(), "444838.25");
        assert_eq!(record.hospital_name.as_str(), "행복동물병원");
    }

    #[test]
    fn absent_postal_code_defaults_to_none() {
        let record: HospitalRecord = serde_json::from_value(json!({
            "management_no": "3220000-037-2023-00045",
            "license_date": "20230315",
            "phone": "02-1234-5678",
            "address": "서울특별시 강남구",
            "road_address": "서울특별시 강남구",
            "hospital_name": "행복동물병원",
            "x_coordinate": "202100.1",
            "y_coordinate": "444838.2"
        }))
        .expect("record deserializes");

        assert!(record.postal_code.is_none());
        assert_eq!(record.postal_code_or_empty(), "");
    }

    #[test]
    fn null_scalar_coerces_to_empty_text() {
        let record: HospitalRecord = serde_json::from_value(json!({
            "management_no": "m-1",
            "license_date": "20230315",
            "phone": null,
            "postal_code": null,
            "address": "부산광역시 해운대구",
            "road_address": "부산광역시 해운대구",
            "hospital_name": "바다동물병원",
            "x_coordinate": 1,
            "y_coordinate": 2
        }))
        .expect("record deserializes");

        assert_eq!(record.phone.as_str(), "");
        assert_eq!(record.postal_code_or_empty(), "");
    }

    #[test]
    fn missing_required_key_is_an_error() {
        let err = serde_json::from_value::<HospitalRecord>(json!({
            "management_no": "m-1",
            "license_date": "20230315",
            "phone": "02-1234-5678",
            "address": "서울특별시",
            "road_address": "서울특별시",
            "x_coordinate": 1.0,
            "y_coordinate": 2.0
        }))
        .expect_err("hospital_name is required");

        assert!(err.to_string().contains("hospital_name"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let record: HospitalRecord = serde_json::from_value(json!({
            "management_no": "m-1",
            "license_date": "20230315",
            "phone": "02-1234-5678",
            "address": "서울특별시",
            "road_address": "서울특별시",
            "hospital_name": "동물병원",
            "x_coordinate": 1.0,
            "y_coordinate": 2.0,
            "employee_count": 4,
            "homepage": "https://example.com"
        }))
        .expect("extra keys do not fail");

        assert_eq!(record.management_no.as_str(), "m-1");
    }

    #[test]
    fn text_display_matches_contents() {
        assert_eq!(Text::from("동물병원").to_string(), "동물병원");
        assert_eq!(Text::from(String::new()).into_string(), "");
    }
}

//! JSON-lines record shape and per-line decoding.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One decoded line of a `records.jsonl` file.
///
/// Decoding is lenient about shape: absent or `null` fields keep their zero
/// value and unknown fields are ignored. Only a wrong type is an error.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Record {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Renders as `{ID:1 Name:alice}`, field names included.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ID:{} Name:{}}}", self.id, self.name)
    }
}

/// Decode a single line into a [`Record`].
///
/// Returns `None` for blank lines, which separate values without carrying one.
/// Object keys match field names case-insensitively (`ID`, `Name`), and a bare
/// `null` decodes to the zero record.
pub fn decode_line(line: &str) -> Option<Result<Record, serde_json::Error>> {
    if line.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str::<Value>(line).and_then(record_from_value))
}

fn record_from_value(value: Value) -> Result<Record, serde_json::Error> {
    match value {
        Value::Null => Ok(Record::default()),
        Value::Object(fields) => {
            let folded = fields
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect();
            serde_json::from_value(Value::Object(folded))
        }
        other => serde_json::from_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_line() {
        let record = decode_line(r#"{"id": 7, "name": "ada"}"#)
            .expect("non-blank")
            .expect("decode");
        assert_eq!(
            record,
            Record {
                id: 7,
                name: "ada".to_string()
            }
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record = decode_line(r#"{"id": 1, "name": "x", "extra": true}"#)
            .expect("non-blank")
            .expect("decode");
        assert_eq!(record.id, 1);
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        let result = decode_line(r#"{"id": "seven", "name": "ada"}"#).expect("non-blank");
        assert!(result.is_err());
    }

    #[test]
    fn truncated_object_is_an_error() {
        let result = decode_line(r#"{"id": 1, "name": "#).expect("non-blank");
        assert!(result.is_err());
    }

    #[test]
    fn missing_field_decodes_to_zero_value() {
        let record = decode_line(r#"{"id": 1}"#)
            .expect("non-blank")
            .expect("decode");
        assert_eq!(
            record,
            Record {
                id: 1,
                name: String::new()
            }
        );
        assert_eq!(record.to_string(), "{ID:1 Name:}");
    }

    #[test]
    fn null_fields_decode_to_zero_value() {
        let record = decode_line(r#"{"id": null, "name": null}"#)
            .expect("non-blank")
            .expect("decode");
        assert_eq!(record, Record::default());
    }

    #[test]
    fn bare_null_is_the_zero_record() {
        let record = decode_line("null").expect("non-blank").expect("decode");
        assert_eq!(record, Record::default());
    }

    #[test]
    fn keys_match_case_insensitively() {
        let record = decode_line(r#"{"ID": 4, "Name": "grace"}"#)
            .expect("non-blank")
            .expect("decode");
        assert_eq!(
            record,
            Record {
                id: 4,
                name: "grace".to_string()
            }
        );
    }

    #[test]
    fn non_object_value_is_an_error() {
        let result = decode_line("[1, 2]").expect("non-blank");
        assert!(result.is_err());
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert!(decode_line("").is_none());
        assert!(decode_line("   \t").is_none());
    }

    #[test]
    fn display_names_each_field() {
        let record = Record {
            id: 1,
            name: "alice".to_string(),
        };
        assert_eq!(record.to_string(), "{ID:1 Name:alice}");
    }
}

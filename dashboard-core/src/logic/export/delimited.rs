//! Delimited Text Encoding
//!
//! Every field, header included, is double-quote wrapped with embedded
//! quotes doubled. The header comes from the first record's keys.

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use serde_json::{Map, Value};

use crate::error::ExportError;

/// Encode records as quoted CSV text
pub fn to_delimited(dataset: &str, records: &[Map<String, Value>]) -> Result<String, ExportError> {
    let first = records.first().ok_or_else(|| ExportError::Empty {
        dataset: dataset.to_string(),
    })?;
    let header: Vec<&str> = first.keys().map(String::as_str).collect();
    if header.is_empty() {
        return Err(ExportError::NoColumns {
            dataset: dataset.to_string(),
        });
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|key| cell(record.get(*key))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ExportError::Encoding)
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read an export back into `(header, value)` rows
pub fn parse_delimited(text: &str) -> Result<Vec<Vec<(String, String)>>, ExportError> {
    let mut reader = ReaderBuilder::new().from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect(),
        );
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_every_field_is_quoted() {
        let records = vec![object(json!({"finding_type": "SSH", "count": 3}))];
        let text = to_delimited("threats", &records).unwrap();

        assert_eq!(text, "\"finding_type\",\"count\"\n\"SSH\",\"3\"\n");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let records = vec![object(json!({"note": "said \"hi\", left"}))];
        let text = to_delimited("threats", &records).unwrap();

        assert!(text.contains("\"said \"\"hi\"\", left\""));
    }

    #[test]
    fn test_header_follows_first_record() {
        let records = vec![
            object(json!({"a": 1, "b": null})),
            object(json!({"b": "x", "c": "ignored"})),
        ];
        let rows = parse_delimited(&to_delimited("remediations", &records).unwrap()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![("a".into(), "1".into()), ("b".into(), "".into())]);
        assert_eq!(rows[1], vec![("a".into(), "".into()), ("b".into(), "x".into())]);
    }

    #[test]
    fn test_nested_values_use_json_text() {
        let records = vec![object(json!({"tags": ["a", "b"], "ok": true}))];
        let rows = parse_delimited(&to_delimited("threats", &records).unwrap()).unwrap();

        assert_eq!(rows[0][0].1, "[\"a\",\"b\"]");
        assert_eq!(rows[0][1].1, "true");
    }

    #[test]
    fn test_round_trip_preserves_string_fields() {
        let records = vec![
            object(json!({"ip": "203.0.113.9", "reason": "port scan, \"aggressive\"\nline two"})),
            object(json!({"ip": "198.51.100.1", "reason": ""})),
        ];
        let rows = parse_delimited(&to_delimited("blocked_ips", &records).unwrap()).unwrap();

        for (row, record) in rows.iter().zip(&records) {
            for (key, value) in row {
                assert_eq!(record[key].as_str().unwrap(), value);
            }
        }
    }

    #[test]
    fn test_fieldless_first_record_has_no_columns() {
        let records = vec![Map::new(), object(json!({"ip": "203.0.113.9"}))];
        let err = to_delimited("blocked_ips", &records).unwrap_err();

        assert!(matches!(err, ExportError::NoColumns { ref dataset } if dataset == "blocked_ips"));
    }

    #[test]
    fn test_no_records_is_empty_error() {
        let err = to_delimited("threats", &[]).unwrap_err();
        assert!(matches!(err, ExportError::Empty { ref dataset } if dataset == "threats"));
        assert_eq!(err.to_string(), "No threats records to export");
    }
}

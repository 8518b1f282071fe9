//! Selects one price series out of a raw market-data response.

use {
    crate::{
        error::ExporterError,
        pvpc::models::{ApiResponse, PriceRecord},
    },
};

/// Parses `body` and returns the records of every block whose id equals
/// `series_id`, in the order they appear in the payload.
///
/// No matching block yields an empty list. Whether that is an error is up to
/// the encoder.
pub fn decode_series(body: &[u8], series_id: &str) -> Result<Vec<PriceRecord>, ExporterError> {
    let response: ApiResponse = serde_json::from_slice(body)?;

    Ok(response
        .included
        .into_iter()
        .filter(|block| block.id == series_id)
        .flat_map(|block| block.attributes.values)
        .collect())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::pvpc::PVPC_SERIES_ID,
        assert_matches::assert_matches,
        serde_json::json,
    };

    const SINGLE_SERIES: &str = r#"{"included":[{"id":"1001","attributes":{"values":[{"value":12.34,"datetime":"2024-01-01T00:00:00Z"}]}}]}"#;

    #[test]
    fn test_decodes_matching_series() {
        let records = decode_series(SINGLE_SERIES.as_bytes(), "1001").unwrap();

        assert_eq!(
            records,
            vec![PriceRecord {
                value: 12.34,
                datetime: "2024-01-01T00:00:00Z".to_string(),
            }]
        );
    }

    #[test]
    fn test_other_series_id_yields_nothing() {
        let records = decode_series(SINGLE_SERIES.as_bytes(), "600").unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn test_ignores_other_blocks_and_extra_fields() {
        // Shape of a real response: several series, each with metadata.
        let body = json!({
            "data": { "type": "Precios mercado peninsular en tiempo real" },
            "included": [
                {
                    "type": "PVPC",
                    "id": "1001",
                    "groupId": null,
                    "attributes": {
                        "title": "PVPC",
                        "last-update": "2024-01-01T20:46:55.000+01:00",
                        "values": [
                            { "value": 127.65, "percentage": 0.5, "datetime": "2024-01-01T00:00:00.000+01:00" },
                            { "value": 119.1, "percentage": 0.5, "datetime": "2024-01-01T01:00:00.000+01:00" }
                        ]
                    }
                },
                {
                    "type": "Precio mercado spot",
                    "id": "600",
                    "groupId": null,
                    "attributes": {
                        "title": "Precio mercado spot",
                        "values": [
                            { "value": 80.0, "percentage": 0.5, "datetime": "2024-01-01T00:00:00.000+01:00" }
                        ]
                    }
                }
            ]
        });

        let records = decode_series(body.to_string().as_bytes(), PVPC_SERIES_ID).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value, 127.65);
        assert_eq!(records[0].datetime, "2024-01-01T00:00:00.000+01:00");
        assert_eq!(records[1].value, 119.1);
    }

    #[test]
    fn test_keeps_payload_order() {
        let body = json!({
            "included": [{
                "id": "1001",
                "attributes": { "values": [
                    { "value": 3.0, "datetime": "2024-01-01T02:00:00Z" },
                    { "value": 1.0, "datetime": "2024-01-01T00:00:00Z" },
                    { "value": 2.0, "datetime": "2024-01-01T01:00:00Z" }
                ]}
            }]
        });

        let records = decode_series(body.to_string().as_bytes(), "1001").unwrap();
        let values: Vec<f64> = records.iter().map(|r| r.value).collect();

        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_keeps_malformed_datetime_as_is() {
        let body = json!({
            "included": [{
                "id": "1001",
                "attributes": { "values": [{ "value": 1.0, "datetime": "yesterday" }] }
            }]
        });

        let records = decode_series(body.to_string().as_bytes(), "1001").unwrap();

        assert_eq!(records[0].datetime, "yesterday");
    }

    #[test]
    fn test_missing_included_is_empty() {
        let records = decode_series(br#"{"data":{}}"#, "1001").unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_json_fails() {
        let result = decode_series(b"<html>Service Unavailable</html>", "1001");

        assert_matches!(result, Err(ExporterError::Decode(_)));
    }

    #[test]
    fn test_wrong_value_type_fails() {
        let body = json!({
            "included": [{
                "id": "1001",
                "attributes": { "values": [{ "value": "cheap", "datetime": "2024-01-01T00:00:00Z" }] }
            }]
        });

        let result = decode_series(body.to_string().as_bytes(), "1001");

        assert_matches!(result, Err(ExporterError::Decode(_)));
    }
}

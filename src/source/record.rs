//! Core analytics record decoding.
//!
//! Each blob holds one JSON document of shape
//! `{"records":[{"properties":{...}}]}`. Only the first record is used.
//! Metric fields are matched by exact name, independent of their order in
//! the document; a missing or `null` field decodes to `None`. Malformed
//! JSON or an empty `records` array is a hard failure.

use serde::Deserialize;
use serde_json::Number;
use snafu::prelude::*;

use crate::error::{JsonParseSnafu, NoRecordsSnafu, RecordError};

/// One hour-windowed core analytics document, as written by the CDN
/// diagnostics pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportDocument {
    pub records: Vec<ExportRecord>,
}

/// One record inside a document. Envelope fields other than `properties`
/// (`time`, `resourceId`, `operationName`, `category`) are not used.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRecord {
    pub properties: CoreAnalytics,
}

/// The per-endpoint traffic metrics of one record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoreAnalytics {
    pub domain_name: Option<String>,
    pub request_count_total: Option<Number>,
    pub request_count_http_status2xx: Option<Number>,
    pub request_count_http_status3xx: Option<Number>,
    pub request_count_http_status4xx: Option<Number>,
    pub request_count_http_status5xx: Option<Number>,
    pub request_count_http_status_others: Option<Number>,
    pub request_count_http_status200: Option<Number>,
    pub request_count_http_status206: Option<Number>,
    pub request_count_http_status302: Option<Number>,
    pub request_count_http_status304: Option<Number>,
    pub request_count_http_status404: Option<Number>,
    pub request_count_cache_hit: Option<Number>,
    pub request_count_cache_miss: Option<Number>,
    pub request_count_cache_no_cache: Option<Number>,
    pub request_count_cache_uncacheable: Option<Number>,
    pub request_count_cache_others: Option<Number>,
    pub egress_total: Option<Number>,
    pub egress_http_status2xx: Option<Number>,
    pub egress_http_status3xx: Option<Number>,
    pub egress_http_status4xx: Option<Number>,
    pub egress_http_status5xx: Option<Number>,
    pub egress_http_status_others: Option<Number>,
    pub egress_cache_hit: Option<Number>,
    pub egress_cache_miss: Option<Number>,
    pub egress_cache_no_cache: Option<Number>,
    pub egress_cache_uncacheable: Option<Number>,
    pub egress_cache_others: Option<Number>,
}

impl CoreAnalytics {
    /// Metric values in the declared column order.
    pub fn metric_values(&self) -> [Option<&Number>; 27] {
        [
            self.request_count_total.as_ref(),
            self.request_count_http_status2xx.as_ref(),
            self.request_count_http_status3xx.as_ref(),
            self.request_count_http_status4xx.as_ref(),
            self.request_count_http_status5xx.as_ref(),
            self.request_count_http_status_others.as_ref(),
            self.request_count_http_status200.as_ref(),
            self.request_count_http_status206.as_ref(),
            self.request_count_http_status302.as_ref(),
            self.request_count_http_status304.as_ref(),
            self.request_count_http_status404.as_ref(),
            self.request_count_cache_hit.as_ref(),
            self.request_count_cache_miss.as_ref(),
            self.request_count_cache_no_cache.as_ref(),
            self.request_count_cache_uncacheable.as_ref(),
            self.request_count_cache_others.as_ref(),
            self.egress_total.as_ref(),
            self.egress_http_status2xx.as_ref(),
            self.egress_http_status3xx.as_ref(),
            self.egress_http_status4xx.as_ref(),
            self.egress_http_status5xx.as_ref(),
            self.egress_http_status_others.as_ref(),
            self.egress_cache_hit.as_ref(),
            self.egress_cache_miss.as_ref(),
            self.egress_cache_no_cache.as_ref(),
            self.egress_cache_uncacheable.as_ref(),
            self.egress_cache_others.as_ref(),
        ]
    }
}

/// Decode a blob's content into the first record's metrics.
pub fn decode_record(path: &str, bytes: &[u8]) -> Result<CoreAnalytics, RecordError> {
    let document: ExportDocument =
        serde_json::from_slice(bytes).context(JsonParseSnafu { path })?;

    let record = document
        .records
        .into_iter()
        .next()
        .context(NoRecordsSnafu { path })?;

    Ok(record.properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "records": [
            {
                "time": "2017-04-01T08:00:00",
                "resourceId": "/SUBSCRIPTIONS/SUB1/RESOURCEGROUPS/GROUP1/PROVIDERS/MICROSOFT.CDN/PROFILES/PROFILE1/ENDPOINTS/ENDPOINT1",
                "operationName": "Microsoft.Cdn/profiles/endpoints/contentDelivery",
                "category": "CoreAnalytics",
                "properties": {
                    "DomainName": "endpoint1.azureedge.net",
                    "RequestCountTotal": 480,
                    "RequestCountHttpStatus2xx": 0,
                    "RequestCountHttpStatus4xx": 480,
                    "RequestCountCacheHit": null,
                    "EgressTotal": 0.0
                }
            }
        ]
    }"#;

    #[test]
    fn test_decode_sample_document() {
        let analytics = decode_record("blob.json", SAMPLE.as_bytes()).unwrap();

        assert_eq!(analytics.domain_name.as_deref(), Some("endpoint1.azureedge.net"));
        assert_eq!(analytics.request_count_total.as_ref().unwrap().to_string(), "480");
        assert_eq!(
            analytics.request_count_http_status4xx.as_ref().unwrap().to_string(),
            "480"
        );
        assert_eq!(analytics.egress_total.as_ref().unwrap().to_string(), "0.0");
    }

    #[test]
    fn test_null_and_missing_fields_decode_identically() {
        let analytics = decode_record("blob.json", SAMPLE.as_bytes()).unwrap();

        // RequestCountCacheHit is explicitly null, RequestCountCacheMiss is absent
        assert!(analytics.request_count_cache_hit.is_none());
        assert!(analytics.request_count_cache_miss.is_none());
    }

    #[test]
    fn test_field_order_independent() {
        let reordered = r#"{
            "records": [
                {
                    "properties": {
                        "EgressTotal": 12.5,
                        "RequestCountTotal": 7,
                        "DomainName": "e.example.net"
                    }
                }
            ]
        }"#;

        let analytics = decode_record("blob.json", reordered.as_bytes()).unwrap();
        assert_eq!(analytics.domain_name.as_deref(), Some("e.example.net"));
        assert_eq!(analytics.request_count_total.as_ref().unwrap().to_string(), "7");
        assert_eq!(analytics.egress_total.as_ref().unwrap().to_string(), "12.5");
    }

    #[test]
    fn test_only_first_record_used() {
        let two_records = r#"{
            "records": [
                {"properties": {"DomainName": "first.example.net"}},
                {"properties": {"DomainName": "second.example.net"}}
            ]
        }"#;

        let analytics = decode_record("blob.json", two_records.as_bytes()).unwrap();
        assert_eq!(analytics.domain_name.as_deref(), Some("first.example.net"));
    }

    #[test]
    fn test_malformed_json_fails() {
        let err = decode_record("blob.json", b"not json").unwrap_err();
        assert!(matches!(err, RecordError::JsonParse { .. }));
    }

    #[test]
    fn test_empty_records_fails() {
        let err = decode_record("blob.json", br#"{"records":[]}"#).unwrap_err();
        assert!(matches!(err, RecordError::NoRecords { .. }));
    }

    #[test]
    fn test_missing_records_field_fails() {
        let err = decode_record("blob.json", br#"{"other":[]}"#).unwrap_err();
        assert!(matches!(err, RecordError::JsonParse { .. }));
    }

    #[test]
    fn test_metric_values_order() {
        let analytics = decode_record("blob.json", SAMPLE.as_bytes()).unwrap();
        let values = analytics.metric_values();

        assert_eq!(values.len(), 27);
        // RequestCountTotal first, EgressTotal at the start of the egress block
        assert_eq!(values[0].unwrap().to_string(), "480");
        assert_eq!(values[16].unwrap().to_string(), "0.0");
    }
}

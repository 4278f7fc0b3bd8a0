//! Payload construction for live submissions and operator test sends.
//!
//! A [`Payload`] is a flat JSON object keyed by header name plus the
//! reserved [`META_KEY`] entry describing where the row came from.
//! Headers without a value are omitted, never written as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::event::{SheetRef, SpreadsheetRef, SubmissionEvent};
use crate::workbook::SheetSnapshot;

pub const META_KEY: &str = "_meta";

fn is_false(v: &bool) -> bool {
    !*v
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Meta {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub sheet_id: i64,
    pub spreadsheet_url: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_test_meta: bool,
}

impl Meta {
    #[must_use]
    pub fn new(spreadsheet: &SpreadsheetRef, sheet: &SheetRef) -> Self {
        Self {
            spreadsheet_id: spreadsheet.id.clone(),
            sheet_name: sheet.name.clone(),
            sheet_id: sheet.id,
            spreadsheet_url: spreadsheet.url.clone(),
            is_test_meta: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn set_meta(&mut self, meta: &Meta) {
        // Meta has only string, integer and bool fields; serialization cannot fail.
        if let Ok(value) = serde_json::to_value(meta) {
            self.0.insert(META_KEY.to_string(), value);
        }
    }

    #[must_use]
    pub fn meta(&self) -> Option<Meta> {
        self.0
            .get(META_KEY)
            .and_then(|v| Meta::deserialize(v).ok())
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.0)
    }
}

/// Flatten a submission into a payload describing the triggering tab.
#[must_use]
pub fn format_event(event: &SubmissionEvent) -> Payload {
    let mut payload = Payload::new();
    for header in &event.headers {
        if let Some(value) = event.value(header) {
            payload.insert(header.clone(), value.clone());
        }
    }

    payload.set_meta(&Meta::new(&event.spreadsheet, &event.sheet));

    tracing::debug!(
        sheet = %event.sheet.name,
        payload = %serde_json::to_string(&payload).unwrap_or_default(),
        "formatted submission"
    );
    payload
}

/// Build the synthetic payload sent by the manual test action.
///
/// Uses the tab's last data row when there is one; falls back to
/// placeholder fields when no cell value survives.
#[must_use]
pub fn build_test_payload(
    sheet: &SheetSnapshot,
    spreadsheet: &SpreadsheetRef,
    timestamp: &str,
) -> Payload {
    let mut payload = Payload::new();

    if let Some(row) = sheet.last_data_row() {
        for (header, cell) in sheet.header_row().iter().zip(row) {
            let Some(key) = header_key(header) else {
                continue;
            };
            if !cell.is_null() {
                payload.insert(key, cell.clone());
            }
        }
    }

    payload.insert("is_test_data", true);
    if payload.len() == 1 {
        payload.insert("TestField1", "TestValue1");
        payload.insert("TestField2", "TestValue2");
        payload.insert("Timestamp", timestamp);
    }

    tracing::debug!(
        sheet = %sheet.name,
        payload = %serde_json::to_string(&payload).unwrap_or_default(),
        "using test data"
    );

    let mut meta = Meta::new(spreadsheet, &sheet.sheet_ref());
    meta.is_test_meta = true;
    payload.set_meta(&meta);
    payload
}

fn header_key(header: &Value) -> Option<String> {
    match header {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn event(headers: &[&str], values: &[(&str, Value)]) -> SubmissionEvent {
        SubmissionEvent {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            named_values: values
                .iter()
                .map(|(k, v)| ((*k).to_string(), vec![v.clone()]))
                .collect::<HashMap<_, _>>(),
            sheet: SheetRef {
                name: "Orders".into(),
                id: 1_234_567,
            },
            spreadsheet: SpreadsheetRef {
                id: "SSID1".into(),
                url: "https://sheets.example/SSID1".into(),
            },
        }
    }

    fn sorted_keys(payload: &Payload) -> Vec<&str> {
        let mut keys: Vec<&str> = payload.keys().collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn missing_header_value_is_omitted() {
        let payload = format_event(&event(
            &["Name", "Email", "Age"],
            &[("Name", json!("Alice")), ("Email", json!("a@x.com"))],
        ));
        assert_eq!(sorted_keys(&payload), vec!["Email", "Name", "_meta"]);
        assert_eq!(payload.get("Name"), Some(&json!("Alice")));
        assert_eq!(payload.get("Email"), Some(&json!("a@x.com")));
        assert!(payload.get("Age").is_none());
    }

    #[test]
    fn values_outside_header_row_are_ignored() {
        let payload = format_event(&event(
            &["Item"],
            &[("Item", json!("Widget")), ("Extra", json!("nope"))],
        ));
        assert_eq!(sorted_keys(&payload), vec!["Item", "_meta"]);
    }

    #[test]
    fn null_value_is_omitted() {
        let payload = format_event(&event(&["Item"], &[("Item", Value::Null)]));
        assert_eq!(sorted_keys(&payload), vec!["_meta"]);
    }

    #[test]
    fn empty_header_row_yields_only_meta() {
        let payload = format_event(&event(&[], &[("Item", json!("Widget"))]));
        assert_eq!(sorted_keys(&payload), vec!["_meta"]);
    }

    #[test]
    fn meta_describes_triggering_tab() {
        let payload = format_event(&event(&["Item"], &[("Item", json!("Widget"))]));
        let meta = payload.meta().unwrap();
        assert_eq!(meta.spreadsheet_id, "SSID1");
        assert_eq!(meta.sheet_name, "Orders");
        assert_eq!(meta.sheet_id, 1_234_567);
        assert_eq!(meta.spreadsheet_url, "https://sheets.example/SSID1");
        assert!(!meta.is_test_meta);
        assert!(payload.get(META_KEY).unwrap().get("is_test_meta").is_none());
    }

    #[test]
    fn payload_survives_json_round_trip() {
        let payload = format_event(&event(
            &["Item", "Qty", "Paid"],
            &[
                ("Item", json!("Widget")),
                ("Qty", json!(3)),
                ("Paid", json!(true)),
            ],
        ));
        let bytes = payload.to_json().unwrap();
        let parsed: Payload = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, payload);
        assert_eq!(parsed.meta(), payload.meta());
    }

    fn snapshot(rows: Value) -> SheetSnapshot {
        serde_json::from_value(json!({"name": "Leads", "id": 5, "rows": rows})).unwrap()
    }

    fn spreadsheet() -> SpreadsheetRef {
        SpreadsheetRef {
            id: "SSID1".into(),
            url: "https://sheets.example/SSID1".into(),
        }
    }

    #[test]
    fn test_payload_uses_last_row() {
        let sheet = snapshot(json!([
            ["Name", "Score", "Note"],
            ["Bob", 1, "first"],
            ["Carol", 2, null]
        ]));
        let payload = build_test_payload(&sheet, &spreadsheet(), "2026-01-01 00:00:00");
        assert_eq!(
            sorted_keys(&payload),
            vec!["Name", "Score", "_meta", "is_test_data"]
        );
        assert_eq!(payload.get("Name"), Some(&json!("Carol")));
        assert_eq!(payload.get("Score"), Some(&json!(2)));
        assert_eq!(payload.get("is_test_data"), Some(&json!(true)));
    }

    #[test]
    fn test_payload_without_data_rows_uses_placeholders() {
        let sheet = snapshot(json!([["Name", "Score"]]));
        let payload = build_test_payload(&sheet, &spreadsheet(), "2026-01-01 00:00:00");
        assert_eq!(
            sorted_keys(&payload),
            vec![
                "TestField1",
                "TestField2",
                "Timestamp",
                "_meta",
                "is_test_data"
            ]
        );
        assert_eq!(payload.get("TestField1"), Some(&json!("TestValue1")));
        assert_eq!(payload.get("TestField2"), Some(&json!("TestValue2")));
        assert_eq!(payload.get("Timestamp"), Some(&json!("2026-01-01 00:00:00")));

        let meta = payload.meta().unwrap();
        assert!(meta.is_test_meta);
        assert_eq!(meta.sheet_name, "Leads");
        assert_eq!(meta.sheet_id, 5);
    }

    #[test]
    fn test_payload_with_all_null_row_uses_placeholders() {
        let sheet = snapshot(json!([["Name"], [null]]));
        let payload = build_test_payload(&sheet, &spreadsheet(), "now");
        assert_eq!(payload.get("TestField1"), Some(&json!("TestValue1")));
    }

    #[test]
    fn test_payload_stringifies_non_text_headers() {
        let sheet = snapshot(json!([[2024, null], ["yes", "dropped"]]));
        let payload = build_test_payload(&sheet, &spreadsheet(), "now");
        assert_eq!(payload.get("2024"), Some(&json!("yes")));
        assert_eq!(sorted_keys(&payload), vec!["2024", "_meta", "is_test_data"]);
    }
}

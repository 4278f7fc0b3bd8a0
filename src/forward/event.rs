//! Inbound form-submission event contract.
//!
//! A host adapter translates its native event into [`SubmissionEvent`]
//! before handing it to the [`EventRouter`](super::router::EventRouter).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The tab a submission landed in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SheetRef {
    pub name: String,
    pub id: i64,
}

/// The workbook owning the tab.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SpreadsheetRef {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmissionEvent {
    /// Row 1 of the triggering tab, in column order.
    pub headers: Vec<String>,

    /// Submitted row keyed by header. Hosts report each value as a
    /// list; only the first element is used.
    #[serde(alias = "namedValues", default)]
    pub named_values: HashMap<String, Vec<Value>>,

    pub sheet: SheetRef,
    pub spreadsheet: SpreadsheetRef,
}

impl SubmissionEvent {
    /// First non-null value submitted under `header`.
    #[must_use]
    pub fn value(&self, header: &str) -> Option<&Value> {
        self.named_values
            .get(header)
            .and_then(|values| values.first())
            .filter(|v| !v.is_null())
    }
}

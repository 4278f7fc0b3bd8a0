//! Workbook snapshots for the operator actions.
//!
//! The host adapter exports the workbook as JSON: spreadsheet identity,
//! the tab the operator is looking at, and every tab's cell grid with the
//! header row first. The manual test and trigger actions read this
//! instead of talking to the host.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SheethookError;
use crate::forward::event::{SheetRef, SpreadsheetRef};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Workbook {
    pub spreadsheet: SpreadsheetRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_sheet: Option<String>,

    #[serde(default)]
    pub sheets: Vec<SheetSnapshot>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SheetSnapshot {
    pub name: String,
    pub id: i64,

    /// Cell grid, row 0 is the header row.
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl Workbook {
    pub async fn load(path: &Path) -> Result<Self, SheethookError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(content: &str, path_display: &str) -> Result<Self, SheethookError> {
        serde_json::from_str(content).map_err(|e| SheethookError::WorkbookParse {
            path: path_display.to_string(),
            source: Box::new(e),
        })
    }

    /// The tab named `name`, or the active tab, or the first tab.
    pub fn sheet(&self, name: Option<&str>) -> Result<&SheetSnapshot, SheethookError> {
        let Some(wanted) = name.or(self.active_sheet.as_deref()) else {
            return self.sheets.first().ok_or(SheethookError::EmptyWorkbook);
        };

        self.sheets
            .iter()
            .find(|s| s.name == wanted)
            .ok_or_else(|| SheethookError::TabNotFound {
                name: wanted.to_string(),
                available: self
                    .sheets
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl SheetSnapshot {
    #[must_use]
    pub fn sheet_ref(&self) -> SheetRef {
        SheetRef {
            name: self.name.clone(),
            id: self.id,
        }
    }

    #[must_use]
    pub fn header_row(&self) -> &[Value] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Last row below the header, if the tab has any data.
    #[must_use]
    pub fn last_data_row(&self) -> Option<&[Value]> {
        if self.rows.len() > 1 {
            self.rows.last().map(Vec::as_slice)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn workbook() -> Workbook {
        serde_json::from_value(json!({
            "spreadsheet": {"id": "SSID1", "url": "https://sheets.example/SSID1"},
            "active_sheet": "Leads",
            "sheets": [
                {"name": "Orders", "id": 0, "rows": [["Item", "Qty"], ["Widget", 3]]},
                {"name": "Leads", "id": 99, "rows": [["Name"]]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn sheet_prefers_explicit_name() {
        assert_eq!(workbook().sheet(Some("Orders")).unwrap().id, 0);
    }

    #[test]
    fn sheet_falls_back_to_active_tab() {
        assert_eq!(workbook().sheet(None).unwrap().name, "Leads");
    }

    #[test]
    fn sheet_falls_back_to_first_tab_without_active() {
        let mut wb = workbook();
        wb.active_sheet = None;
        assert_eq!(wb.sheet(None).unwrap().name, "Orders");
    }

    #[test]
    fn unknown_tab_lists_available() {
        let err = workbook().sheet(Some("Missing")).unwrap_err();
        assert!(err.to_string().contains("Orders, Leads"));
    }

    #[test]
    fn empty_workbook_errors() {
        let mut wb = workbook();
        wb.sheets.clear();
        wb.active_sheet = None;
        assert!(matches!(wb.sheet(None), Err(SheethookError::EmptyWorkbook)));
    }

    #[test]
    fn last_data_row_requires_rows_below_header() {
        let wb = workbook();
        let orders = wb.sheet(Some("Orders")).unwrap();
        assert_eq!(orders.last_data_row().unwrap()[0], json!("Widget"));
        assert!(wb.sheet(Some("Leads")).unwrap().last_data_row().is_none());
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = Workbook::parse("{", "book.json").unwrap_err();
        assert!(err.to_string().contains("book.json"));
    }
}

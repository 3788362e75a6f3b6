use pixgrid_core::{Grid, Pixel};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ScriptError;
use crate::interpreter::ScriptReport;

/// Returns true if the boolean is false (used by serde skip_serializing_if).
#[inline]
fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshotDto {
    pub width: usize,
    pub height: usize,
    pub default: Pixel,
    pub rows: Vec<String>,
}

impl From<&Grid> for GridSnapshotDto {
    fn from(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            default: grid.default_value().clone(),
            rows: grid
                .rows()
                .map(|row| row.iter().map(Pixel::as_str).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummaryDto {
    pub executed: usize,
    pub ignored: usize,
    pub saved: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSnapshotDto>,
}

impl RunSummaryDto {
    pub fn new(report: &ScriptReport, grid: Option<&Grid>, dry_run: bool) -> Self {
        Self {
            executed: report.executed,
            ignored: report.ignored,
            saved: report.saved.clone(),
            dry_run,
            failures: report.failures.iter().map(ScriptError::to_json).collect(),
            grid: grid.map(GridSnapshotDto::from),
        }
    }
}

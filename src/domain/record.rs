use crate::domain::model::{ControlVariable, RiskZone, RiskZoneFormula};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the boundaries data table. Empty cells are missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRecord {
    #[serde(alias = "label")]
    pub control_variable: String,
    pub baseline: Option<f64>,
    pub current_value: Option<f64>,
    pub planetary_boundary: Option<f64>,
    pub upper_limit: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl VariableRecord {
    /// Missing thresholds become NaN so the variable renders as unquantified.
    pub fn to_control_variable(&self) -> Result<ControlVariable> {
        let variable = ControlVariable::new(
            self.control_variable.clone(),
            self.current_value,
            self.baseline.unwrap_or(f64::NAN),
            self.planetary_boundary.unwrap_or(f64::NAN),
            self.upper_limit.unwrap_or(f64::NAN),
        )?;
        Ok(variable.with_range(self.min, self.max))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableReport {
    pub name: String,
    pub angle: f64,
    pub norm: Option<f64>,
    /// Normalized observed min/max, when the data table carries them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<(f64, f64)>,
    pub zone: RiskZone,
    pub sectors: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryReport {
    pub name: String,
    pub label: String,
    pub quantified: bool,
    pub angle: f64,
    pub variables: Vec<VariableReport>,
}

/// What a render pass put on the canvas, per boundary and variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    pub system: String,
    pub formula: RiskZoneFormula,
    pub outer_radius: f64,
    pub boundaries: Vec<BoundaryReport>,
}

impl RenderReport {
    pub fn unquantified_boundaries(&self) -> impl Iterator<Item = &BoundaryReport> {
        self.boundaries.iter().filter(|b| !b.quantified)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotSummary {
    pub title: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub report: RenderReport,
}

#[derive(Debug, Clone)]
pub struct PlotOutcome {
    pub plot_path: String,
    pub summary_path: Option<String>,
    pub summary: PlotSummary,
}

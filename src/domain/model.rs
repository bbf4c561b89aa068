use crate::utils::error::{PlotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which numerator the zone of increasing risk uses when lower values are
/// safer.
///
/// `BoundaryAnchored` measures the distance past the boundary, so the scale
/// reads 1 at the boundary and 2 at the upper limit. `BaselineAnchored`
/// measures from the baseline instead, which is the formula older plots were
/// produced with; it jumps above 1 as soon as the boundary is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskZoneFormula {
    #[default]
    #[serde(alias = "boundary")]
    BoundaryAnchored,
    #[serde(alias = "baseline")]
    BaselineAnchored,
}

/// Zone a normalized value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskZone {
    Safe,
    IncreasingRisk,
    HighRisk,
    Unquantified,
}

impl RiskZone {
    pub fn classify(norm: Option<f64>) -> Self {
        match norm {
            Some(h) if h.is_nan() => RiskZone::Unquantified,
            Some(h) if h <= 1.0 => RiskZone::Safe,
            Some(h) if h <= 2.0 => RiskZone::IncreasingRisk,
            Some(_) => RiskZone::HighRisk,
            None => RiskZone::Unquantified,
        }
    }
}

/// A single measurable quantity with baseline, boundary and upper limit
/// thresholds.
///
/// Normalized values are anchored on the thresholds:
/// 0 = baseline, 1 = planetary boundary, 2 = upper end of the zone of
/// increasing risk. Past the upper limit the value keeps rising by one unit
/// per risk-zone width, e.g. boundary 0.1, upper 0.2, current 0.3 gives 3.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlVariable {
    name: String,
    current_value: Option<f64>,
    baseline_value: f64,
    boundary_value: f64,
    upper_value: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl ControlVariable {
    pub fn new(
        name: impl Into<String>,
        current_value: Option<f64>,
        baseline_value: f64,
        boundary_value: f64,
        upper_value: f64,
    ) -> Result<Self> {
        let name = name.into();

        if boundary_value == baseline_value {
            return Err(PlotError::DegenerateZone {
                name,
                zone: "safe",
                from: baseline_value,
                to: boundary_value,
            });
        }
        if upper_value == boundary_value {
            return Err(PlotError::DegenerateZone {
                name,
                zone: "risk",
                from: boundary_value,
                to: upper_value,
            });
        }

        Ok(Self {
            name,
            current_value,
            baseline_value,
            boundary_value,
            upper_value,
            min: None,
            max: None,
        })
    }

    /// Attaches the observed range of the current value.
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_value(&self) -> Option<f64> {
        self.current_value
    }

    pub fn baseline_value(&self) -> f64 {
        self.baseline_value
    }

    pub fn boundary_value(&self) -> f64 {
        self.boundary_value
    }

    pub fn upper_value(&self) -> f64 {
        self.upper_value
    }

    pub fn range(&self) -> (Option<f64>, Option<f64>) {
        (self.min, self.max)
    }

    pub fn lower_is_safer(&self) -> bool {
        self.boundary_value > self.baseline_value
    }

    /// Normalized current value, `None` while the variable is not quantified.
    pub fn norm(&self) -> Option<f64> {
        self.norm_with(RiskZoneFormula::default())
    }

    pub fn norm_with(&self, formula: RiskZoneFormula) -> Option<f64> {
        self.current_value.map(|v| self.normalize(v, formula))
    }

    /// Normalized observed range, present only when both ends are known.
    pub fn norm_range(&self, formula: RiskZoneFormula) -> Option<(f64, f64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some((self.normalize(min, formula), self.normalize(max, formula))),
            _ => None,
        }
    }

    pub fn zone(&self, formula: RiskZoneFormula) -> RiskZone {
        RiskZone::classify(self.norm_with(formula))
    }

    /// Maps any raw value of this variable onto the unified risk scale.
    pub fn normalize(&self, value: f64, formula: RiskZoneFormula) -> f64 {
        let baseline = self.baseline_value;
        let boundary = self.boundary_value;
        let upper = self.upper_value;

        // 任一門檻缺值時直接回傳 NaN，避免走錯方向分支
        if [value, baseline, boundary, upper].iter().any(|x| x.is_nan()) {
            return f64::NAN;
        }

        let width_of_safe_zone = (boundary - baseline).abs();
        let width_of_risk_zone = (upper - boundary).abs();

        if self.lower_is_safer() {
            if value > upper {
                2.0 + (value - upper) / width_of_risk_zone
            } else if value > boundary {
                let anchor = match formula {
                    RiskZoneFormula::BoundaryAnchored => boundary,
                    RiskZoneFormula::BaselineAnchored => baseline,
                };
                1.0 + (value - anchor) / width_of_risk_zone
            } else {
                (value - baseline) / width_of_safe_zone
            }
        } else if value < upper {
            2.0 + (upper - value) / width_of_risk_zone
        } else if value < boundary {
            1.0 + (boundary - value) / width_of_risk_zone
        } else {
            (baseline - value) / width_of_safe_zone
        }
    }
}

impl fmt::Display for ControlVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self
            .current_value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "None".to_string());
        write!(
            f,
            "ControlVariable('{}', {}, {}, {}, {})",
            self.name, current, self.baseline_value, self.boundary_value, self.upper_value
        )
    }
}

/// A named thematic group of control variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    name: String,
    variables: Vec<ControlVariable>,
}

pub const NOT_QUANTIFIED_SUFFIX: &str = "\n(not yet quantified)";

impl Boundary {
    pub fn new(name: impl Into<String>, variables: Vec<ControlVariable>) -> Result<Self> {
        let name = name.into();
        if variables.is_empty() {
            return Err(PlotError::EmptyGroup {
                entity: "Boundary",
                name,
            });
        }
        Ok(Self { name, variables })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[ControlVariable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name()).collect()
    }

    /// True when at least one member yields a normalized value that is not NaN.
    pub fn is_quantified(&self, formula: RiskZoneFormula) -> bool {
        self.variables
            .iter()
            .any(|v| v.norm_with(formula).is_some_and(|h| !h.is_nan()))
    }

    pub fn display_label(&self, quantified: bool) -> String {
        if quantified {
            self.name.clone()
        } else {
            format!("{}{}", self.name, NOT_QUANTIFIED_SUFFIX)
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Boundary('{}', [", self.name)?;
        for (i, v) in self.variables.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "])")
    }
}

/// Ordered set of boundaries drawn together on one radial diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetarySystem {
    name: String,
    boundaries: Vec<Boundary>,
}

impl PlanetarySystem {
    pub fn new(name: impl Into<String>, boundaries: Vec<Boundary>) -> Result<Self> {
        let name = name.into();
        if boundaries.is_empty() {
            return Err(PlotError::EmptyGroup {
                entity: "PlanetarySystem",
                name,
            });
        }
        Ok(Self { name, boundaries })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.boundaries.iter().map(|b| b.name()).collect()
    }

    pub fn variable_count(&self) -> usize {
        self.boundaries.iter().map(Boundary::len).sum()
    }
}

impl fmt::Display for PlanetarySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlanetarySystem('{}')", self.name)?;
        for b in &self.boundaries {
            write!(f, "\n  {}", b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv(current: Option<f64>, baseline: f64, boundary: f64, upper: f64) -> ControlVariable {
        ControlVariable::new("test", current, baseline, boundary, upper).unwrap()
    }

    #[test]
    fn test_high_risk_example_from_functional_integrity() {
        let x = cv(Some(0.3), 0.0, 0.1, 0.2);
        let h = x.norm().unwrap();
        assert!((h - 3.0).abs() < 1e-12, "got {}", h);

        let legacy = x.norm_with(RiskZoneFormula::BaselineAnchored).unwrap();
        assert!((legacy - 3.0).abs() < 1e-12, "got {}", legacy);
    }

    #[test]
    fn test_below_baseline_is_negative() {
        let y = cv(Some(-5.0), 0.0, 10.0, 20.0);
        assert_eq!(y.norm(), Some(-0.5));
    }

    #[test]
    fn test_risk_zone_formulas_differ() {
        let v = cv(Some(15.0), 0.0, 10.0, 20.0);
        assert_eq!(v.norm_with(RiskZoneFormula::BoundaryAnchored), Some(1.5));
        assert_eq!(v.norm_with(RiskZoneFormula::BaselineAnchored), Some(2.5));
    }

    #[test]
    fn test_higher_is_safer_orientation() {
        // 臭氧: 數值越高越安全
        let ozone = cv(Some(283.0), 290.0, 276.0, 262.0);
        assert!(!ozone.lower_is_safer());
        assert_eq!(ozone.norm(), Some(0.5));
        assert_eq!(ozone.normalize(269.0, RiskZoneFormula::default()), 1.5);
        assert_eq!(ozone.normalize(255.0, RiskZoneFormula::default()), 2.5);
    }

    #[test]
    fn test_missing_current_value_is_unquantified() {
        let v = cv(None, 0.0, 1.0, 2.0);
        assert_eq!(v.norm(), None);
        assert_eq!(v.zone(RiskZoneFormula::default()), RiskZone::Unquantified);
    }

    #[test]
    fn test_nan_current_value_propagates() {
        let v = cv(Some(f64::NAN), 0.0, 1.0, 2.0);
        assert!(v.norm().unwrap().is_nan());
        assert_eq!(v.zone(RiskZoneFormula::default()), RiskZone::Unquantified);
    }

    #[test]
    fn test_degenerate_zones_are_rejected() {
        let safe = ControlVariable::new("flat", Some(1.0), 5.0, 5.0, 6.0);
        assert!(matches!(safe, Err(PlotError::DegenerateZone { zone: "safe", .. })));

        let risk = ControlVariable::new("flat", Some(1.0), 4.0, 5.0, 5.0);
        assert!(matches!(risk, Err(PlotError::DegenerateZone { zone: "risk", .. })));
    }

    #[test]
    fn test_zone_classification() {
        assert_eq!(RiskZone::classify(Some(0.4)), RiskZone::Safe);
        assert_eq!(RiskZone::classify(Some(1.0)), RiskZone::Safe);
        assert_eq!(RiskZone::classify(Some(1.7)), RiskZone::IncreasingRisk);
        assert_eq!(RiskZone::classify(Some(4.2)), RiskZone::HighRisk);
    }

    #[test]
    fn test_norm_range() {
        let v = cv(Some(15.0), 0.0, 10.0, 20.0).with_range(Some(5.0), Some(25.0));
        assert_eq!(v.norm_range(RiskZoneFormula::default()), Some((0.5, 2.5)));
        assert_eq!(cv(Some(15.0), 0.0, 10.0, 20.0).norm_range(RiskZoneFormula::default()), None);
    }

    #[test]
    fn test_display_matches_repr() {
        let v = ControlVariable::new("nitrogen", Some(190.0), 0.0, 62.0, 82.0).unwrap();
        assert_eq!(v.to_string(), "ControlVariable('nitrogen', 190, 0, 62, 82)");
    }

    #[test]
    fn test_empty_groups_are_rejected() {
        assert!(matches!(
            Boundary::new("Novel\nentities", vec![]),
            Err(PlotError::EmptyGroup { entity: "Boundary", .. })
        ));
        assert!(matches!(
            PlanetarySystem::new("PBS", vec![]),
            Err(PlotError::EmptyGroup { entity: "PlanetarySystem", .. })
        ));
    }

    #[test]
    fn test_boundary_label_is_derived() {
        let boundary = Boundary::new("Novel\nentities", vec![cv(None, 0.0, 1.0, 2.0)]).unwrap();
        assert!(!boundary.is_quantified(RiskZoneFormula::default()));
        assert_eq!(boundary.display_label(false), "Novel\nentities\n(not yet quantified)");
        assert_eq!(boundary.name(), "Novel\nentities");
    }

    #[test]
    fn test_system_counts() {
        let water = Boundary::new(
            "Freshwater\nchange",
            vec![cv(Some(18.2), 9.4, 10.2, 50.0), cv(Some(15.8), 9.8, 11.1, 50.0)],
        )
        .unwrap();
        let ozone = Boundary::new("Ozone", vec![cv(Some(284.6), 290.0, 276.0, 261.0)]).unwrap();
        let system = PlanetarySystem::new("PBS: 2023", vec![water, ozone]).unwrap();

        assert_eq!(system.variable_count(), 3);
        assert_eq!(system.names(), vec!["Freshwater\nchange", "Ozone"]);
        assert_eq!(system.boundaries()[0].names(), vec!["test", "test"]);
    }
}

use planetary_boundaries::{ControlVariable, RiskZone, RiskZoneFormula};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-6;

fn lower_is_safer() -> impl Strategy<Value = (f64, f64, f64)> {
    (-1000.0..1000.0f64, 0.01..100.0f64, 0.01..100.0f64)
        .prop_map(|(baseline, safe, risk)| (baseline, baseline + safe, baseline + safe + risk))
}

fn higher_is_safer() -> impl Strategy<Value = (f64, f64, f64)> {
    (-1000.0..1000.0f64, 0.01..100.0f64, 0.01..100.0f64)
        .prop_map(|(baseline, safe, risk)| (baseline, baseline - safe, baseline - safe - risk))
}

fn variable((baseline, boundary, upper): (f64, f64, f64)) -> ControlVariable {
    ControlVariable::new("x", None, baseline, boundary, upper).unwrap()
}

proptest! {
    #[test]
    fn thresholds_map_to_zero_one_two(thresholds in prop_oneof![lower_is_safer(), higher_is_safer()]) {
        let v = variable(thresholds);
        let f = RiskZoneFormula::BoundaryAnchored;
        prop_assert!(v.normalize(thresholds.0, f).abs() < TOLERANCE);
        prop_assert!((v.normalize(thresholds.1, f) - 1.0).abs() < TOLERANCE);
        prop_assert!((v.normalize(thresholds.2, f) - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn rises_with_value_when_lower_is_safer(
        thresholds in lower_is_safer(),
        a in -3000.0..3000.0f64,
        b in -3000.0..3000.0f64,
    ) {
        let v = variable(thresholds);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let f = RiskZoneFormula::BoundaryAnchored;
        prop_assert!(v.normalize(lo, f) <= v.normalize(hi, f) + TOLERANCE);
    }

    #[test]
    fn falls_with_value_when_higher_is_safer(
        thresholds in higher_is_safer(),
        a in -3000.0..3000.0f64,
        b in -3000.0..3000.0f64,
    ) {
        let v = variable(thresholds);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let f = RiskZoneFormula::BoundaryAnchored;
        prop_assert!(v.normalize(lo, f) + TOLERANCE >= v.normalize(hi, f));
    }

    #[test]
    fn norm_is_absent_only_without_current_value(
        thresholds in lower_is_safer(),
        current in proptest::option::of(-3000.0..3000.0f64),
    ) {
        let v = ControlVariable::new("x", current, thresholds.0, thresholds.1, thresholds.2).unwrap();
        prop_assert_eq!(v.norm().is_none(), current.is_none());
        prop_assert_eq!(v.zone(RiskZoneFormula::default()) == RiskZone::Unquantified, current.is_none());
    }
}

#[test]
fn test_formulas_agree_beyond_upper_limit() {
    let v = ControlVariable::new("x", Some(0.3), 0.0, 0.1, 0.2).unwrap();
    assert!((v.norm_with(RiskZoneFormula::BoundaryAnchored).unwrap() - 3.0).abs() < 1e-12);
    assert!((v.norm_with(RiskZoneFormula::BaselineAnchored).unwrap() - 3.0).abs() < 1e-12);
}

#[test]
fn test_formulas_differ_inside_risk_zone() {
    let v = ControlVariable::new("x", Some(0.15), 0.0, 0.1, 0.2).unwrap();
    let anchored = v.norm_with(RiskZoneFormula::BoundaryAnchored).unwrap();
    let literal = v.norm_with(RiskZoneFormula::BaselineAnchored).unwrap();
    assert!((anchored - 1.5).abs() < 1e-12);
    assert!((literal - 2.5).abs() < 1e-12);
}

#[test]
fn test_higher_is_safer_example() {
    let v = ControlVariable::new("y", Some(1.0), 0.0, -0.1, -0.2).unwrap();
    assert!((v.norm().unwrap() + 10.0).abs() < 1e-12);
    assert_eq!(v.zone(RiskZoneFormula::default()), RiskZone::Safe);

    let v = ControlVariable::new("y", Some(0.05), 0.0, -0.1, -0.2).unwrap();
    assert!((v.norm().unwrap() + 0.5).abs() < 1e-12);
}

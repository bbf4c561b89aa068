use planetary_boundaries::adapters::DrawCommand;
use planetary_boundaries::core::palette::{GREEN, GREY};
use planetary_boundaries::domain::drawing::Paint;
use planetary_boundaries::{
    Boundary, ControlVariable, PlanetarySystem, RecordingCanvas, RenderOptions, RiskZone,
    SvgCanvas,
};

fn variable(name: &str, current: Option<f64>, baseline: f64, boundary: f64, upper: f64) -> ControlVariable {
    ControlVariable::new(name, current, baseline, boundary, upper).unwrap()
}

fn single(v: ControlVariable) -> PlanetarySystem {
    PlanetarySystem::new("single", vec![Boundary::new("Ozone", vec![v]).unwrap()]).unwrap()
}

fn circles(canvas: &RecordingCanvas) -> Vec<f64> {
    canvas
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle { radius, .. } => Some(*radius),
            _ => None,
        })
        .collect()
}

#[test]
fn test_single_safe_variable() {
    let system = single(variable("ozone depletion", Some(0.5), 0.0, 1.0, 2.0));
    let mut canvas = RecordingCanvas::with_gradient();

    let report = system.render(&mut canvas, &RenderOptions::default()).unwrap();

    assert_eq!(report.outer_radius, 6.0);
    assert!(matches!(
        canvas.commands().first(),
        Some(DrawCommand::Begin { outer_radius }) if (*outer_radius - 6.48).abs() < 1e-9
    ));
    assert_eq!(canvas.commands().last(), Some(&DrawCommand::Finish));

    let sectors: Vec<_> = canvas.sectors().collect();
    assert_eq!(sectors.len(), 1);
    assert_eq!(sectors[0].1, &Paint::Solid(GREEN));
    assert_eq!(sectors[0].0.outer, 0.5);

    assert_eq!(circles(&canvas), vec![1.0, 2.0]);
    assert_eq!(canvas.radial_lines().count(), 1);

    let texts: Vec<_> = canvas.texts().collect();
    assert_eq!(texts, vec!["ozone\ndepletion", "Ozone"]);

    assert_eq!(report.boundaries[0].variables[0].zone, RiskZone::Safe);
}

#[test]
fn test_unquantified_variable_draws_placeholder() {
    let system = single(variable("novel entities", None, 0.0, 1.0, 2.0));
    let mut canvas = RecordingCanvas::with_gradient();

    let report = system.render(&mut canvas, &RenderOptions::default()).unwrap();

    let sectors: Vec<_> = canvas.sectors().collect();
    assert_eq!(sectors.len(), 1);
    assert_eq!(sectors[0].1, &Paint::Solid(GREY));
    assert_eq!(sectors[0].0.outer, 1.0);

    // 未量化時不畫變數標籤
    let texts: Vec<_> = canvas.texts().collect();
    assert_eq!(texts, vec!["Ozone\n(not yet quantified)"]);
    assert_eq!(report.outer_radius, 2.0);
    assert_eq!(report.unquantified_boundaries().count(), 1);
}

#[test]
fn test_partly_quantified_boundary_keeps_plain_label() {
    let boundary = Boundary::new(
        "Biosphere\nintegrity",
        vec![
            variable("genetic", Some(10.0), 0.0, 1.0, 2.0),
            variable("functional", None, 0.0, 1.0, 2.0),
        ],
    )
    .unwrap();
    let system = PlanetarySystem::new("partial", vec![boundary]).unwrap();
    let mut canvas = RecordingCanvas::with_gradient();

    let report = system.render(&mut canvas, &RenderOptions::new(true, false)).unwrap();

    assert!(report.boundaries[0].quantified);
    assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["Biosphere\nintegrity"]);
    assert_eq!(report.outer_radius, 10.0);
    // 同一邊界內兩個變數之間有一條內部分隔線
    assert_eq!(canvas.radial_lines().count(), 2);
    assert_eq!(report.boundaries[0].variables[0].zone, RiskZone::HighRisk);
}

#[test]
fn test_gradient_and_segment_canvases() {
    let system = single(variable("aerosols", Some(3.0), 0.0, 1.0, 2.0));

    let mut gradient = RecordingCanvas::with_gradient();
    let report = system.render(&mut gradient, &RenderOptions::default()).unwrap();
    assert_eq!(report.boundaries[0].variables[0].sectors, 1);
    assert!(matches!(gradient.sectors().next(), Some((_, Paint::Radial(_)))));

    let mut segmented = RecordingCanvas::new();
    let options = RenderOptions {
        segments: 300,
        ..RenderOptions::default()
    };
    let report = system.render(&mut segmented, &options).unwrap();
    let sectors: Vec<_> = segmented.sectors().collect();
    assert_eq!(report.boundaries[0].variables[0].sectors, sectors.len());
    assert!(sectors.len() > 2);
    assert_eq!(sectors[0].1, &Paint::Solid(GREEN));
    assert!(sectors.iter().all(|(_, p)| matches!(p, Paint::Solid(_))));
    assert!((sectors.last().unwrap().0.outer - 3.0).abs() < 1e-9);
}

#[test]
fn test_below_baseline_draws_no_bar() {
    let system = single(variable("y", Some(-5.0), 0.0, 10.0, 20.0));
    let mut canvas = RecordingCanvas::with_gradient();

    let report = system.render(&mut canvas, &RenderOptions::default()).unwrap();

    assert_eq!(canvas.sectors().count(), 0);
    assert_eq!(report.boundaries[0].variables[0].norm, Some(-0.5));
    assert_eq!(report.boundaries[0].variables[0].sectors, 0);
    assert!(report.boundaries[0].quantified);
}

#[test]
fn test_labels_can_be_hidden() {
    let system = single(variable("ozone", Some(0.5), 0.0, 1.0, 2.0));
    let mut canvas = RecordingCanvas::with_gradient();

    let report = system.render(&mut canvas, &RenderOptions::new(false, false)).unwrap();

    assert_eq!(canvas.texts().count(), 0);
    assert_eq!(report.outer_radius, 2.0);
}

#[test]
fn test_separators_per_boundary() {
    let boundaries = (0..4)
        .map(|i| {
            let vars = (0..=i)
                .map(|j| variable(&format!("v{}{}", i, j), Some(1.5), 0.0, 1.0, 2.0))
                .collect();
            Boundary::new(format!("b{}", i), vars).unwrap()
        })
        .collect();
    let system = PlanetarySystem::new("four", boundaries).unwrap();
    let mut canvas = RecordingCanvas::with_gradient();

    let report = system.render(&mut canvas, &RenderOptions::default()).unwrap();

    // 4 boundary separators + (0 + 1 + 2 + 3) inner separators
    assert_eq!(canvas.radial_lines().count(), 10);
    assert_eq!(canvas.sectors().count(), 10);
    let angles: Vec<f64> = report.boundaries.iter().map(|b| b.angle).collect();
    for (i, angle) in angles.iter().enumerate() {
        assert!((angle - i as f64 * std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }
}

#[test]
fn test_nan_threshold_draws_placeholder() {
    let system = single(variable("ozone", Some(280.0), f64::NAN, 276.0, 261.0));
    let mut canvas = RecordingCanvas::with_gradient();

    let report = system.render(&mut canvas, &RenderOptions::default()).unwrap();

    let sectors: Vec<_> = canvas.sectors().collect();
    assert_eq!(sectors.len(), 1);
    assert_eq!(sectors[0].1, &Paint::Solid(GREY));
    assert_eq!(sectors[0].0.inner, 0.0);
    assert_eq!(sectors[0].0.outer, 1.0);

    assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["Ozone\n(not yet quantified)"]);
    let ozone = &report.boundaries[0].variables[0];
    assert!(ozone.norm.unwrap().is_nan());
    assert_eq!(ozone.zone, RiskZone::Unquantified);
    assert!(!report.boundaries[0].quantified);
}

fn assert_finite_sectors(canvas: &RecordingCanvas, outer_radius: f64) {
    for (sector, _) in canvas.sectors() {
        assert!(sector.inner.is_finite() && sector.outer.is_finite());
        assert!(sector.outer <= outer_radius);
    }
}

#[test]
fn test_overflowing_norm_is_clamped_to_figure() {
    let system = single(variable("huge", Some(1e308), 0.0, 1e-300, 2e-300));
    assert_eq!(system.boundaries()[0].variables()[0].norm(), Some(f64::INFINITY));

    let mut gradient = RecordingCanvas::with_gradient();
    let report = system.render(&mut gradient, &RenderOptions::default()).unwrap();
    assert_eq!(report.outer_radius, 6.0);
    assert_eq!(gradient.sectors().count(), 1);
    assert_finite_sectors(&gradient, report.outer_radius);

    let mut segmented = RecordingCanvas::new();
    let options = RenderOptions {
        segments: 200,
        ..RenderOptions::default()
    };
    system.render(&mut segmented, &options).unwrap();
    assert!(segmented.sectors().count() > 1);
    assert_finite_sectors(&segmented, report.outer_radius);

    let mut svg = SvgCanvas::new(400, 400);
    system.render(&mut svg, &RenderOptions::default()).unwrap();
    let document = svg.into_document().unwrap();
    assert!(!document.contains("NaN"));
    assert!(!document.contains("inf"));
}

#[test]
fn test_observed_range_reaches_report() {
    let ranged = variable("phosphorus", Some(22.6), 0.0, 11.0, 100.0).with_range(Some(5.5), Some(55.5));
    let plain = variable("nitrogen", Some(190.0), 0.0, 62.0, 200.0);
    let boundary = Boundary::new("Biogeochemical\nflows", vec![ranged, plain]).unwrap();
    let system = PlanetarySystem::new("range", vec![boundary]).unwrap();
    let mut canvas = RecordingCanvas::with_gradient();

    let report = system.render(&mut canvas, &RenderOptions::default()).unwrap();

    let variables = &report.boundaries[0].variables;
    let (lo, hi) = variables[0].range.unwrap();
    assert!((lo - 0.5).abs() < 1e-12);
    assert!((hi - 1.5).abs() < 1e-12);
    assert!(variables[1].range.is_none());

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["boundaries"][0]["variables"][0]["range"].is_array());
    assert!(json["boundaries"][0]["variables"][1].get("range").is_none());
}

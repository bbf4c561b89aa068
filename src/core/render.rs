use crate::core::layout::RadialLayout;
use crate::core::palette::{self, ColorLaw};
use crate::domain::drawing::{Paint, Rgb, Sector, Stroke, TextStyle};
use crate::domain::model::{PlanetarySystem, RiskZone, RiskZoneFormula};
use crate::domain::ports::Canvas;
use crate::domain::record::{BoundaryReport, RenderReport, VariableReport};
use crate::utils::error::Result;
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_SEGMENTS: usize = 10_000;
pub const DEFAULT_LABEL_RADIUS: f64 = 6.0;
/// Boundary labels sit just outside the outermost drawn radius.
const TICK_RING_FACTOR: f64 = 1.08;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub show_boundary_labels: bool,
    pub show_variable_labels: bool,
    /// Radial segments per bar on canvases without gradient support.
    pub segments: usize,
    pub label_radius: f64,
    pub formula: RiskZoneFormula,
    pub palette: ColorLaw,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_boundary_labels: true,
            show_variable_labels: true,
            segments: DEFAULT_SEGMENTS,
            label_radius: DEFAULT_LABEL_RADIUS,
            formula: RiskZoneFormula::default(),
            palette: ColorLaw::default(),
        }
    }
}

impl RenderOptions {
    pub fn new(show_boundary_labels: bool, show_variable_labels: bool) -> Self {
        Self {
            show_boundary_labels,
            show_variable_labels,
            ..Self::default()
        }
    }
}

/// Consecutive bar segments sharing one colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRun {
    pub inner: f64,
    pub outer: f64,
    pub color: Rgb,
}

/// Cuts a bar of `height` into `segments` equal radial segments, colours each
/// by its lower edge and merges neighbours of identical colour.
pub fn segment_runs(height: f64, segments: usize, palette: &ColorLaw) -> Vec<SegmentRun> {
    let segments = segments.max(1);
    let segment_height = height / segments as f64;
    let mut runs: Vec<SegmentRun> = Vec::new();

    for i in 0..segments {
        let bottom = i as f64 * segment_height;
        let top = if i + 1 == segments {
            height
        } else {
            (i + 1) as f64 * segment_height
        };
        let color = palette.color_at(bottom, height);

        match runs.last_mut() {
            Some(run) if run.color == color => run.outer = top,
            _ => runs.push(SegmentRun {
                inner: bottom,
                outer: top,
                color,
            }),
        }
    }

    runs
}

/// Replaces every whitespace character with a line break.
pub fn wrap_label(name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s").expect("valid whitespace pattern"));
    re.replace_all(name, "\n").into_owned()
}

impl PlanetarySystem {
    /// Draws the radial diagram onto `canvas` and reports what was drawn.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        options: &RenderOptions,
    ) -> Result<RenderReport> {
        let layout = RadialLayout::for_system(self)?;
        let formula = options.formula;

        let norms: Vec<Vec<Option<f64>>> = self
            .boundaries()
            .iter()
            .map(|b| b.variables().iter().map(|v| v.norm_with(formula)).collect())
            .collect();

        let outer_radius = outer_extent(&norms, options);
        let tick_ring = outer_radius * TICK_RING_FACTOR;
        canvas.begin(tick_ring)?;

        let gradient = canvas.supports_gradient();
        tracing::debug!(
            "Rendering '{}': {} boundaries, {} variables, gradient fill: {}",
            self.name(),
            self.len(),
            self.variable_count(),
            gradient
        );

        let mut boundaries = Vec::with_capacity(self.len());
        for ((boundary, sector), boundary_norms) in
            self.boundaries().iter().zip(&layout.sectors).zip(&norms)
        {
            let w = sector.variable_width;
            let quantified = boundary.is_quantified(formula);
            let mut variables = Vec::with_capacity(boundary.len());

            for ((variable, &t), &norm) in boundary
                .variables()
                .iter()
                .zip(&sector.variable_angles)
                .zip(boundary_norms)
            {
                tracing::debug!("Drawing {}", variable);

                let sectors = match norm {
                    Some(h) if !h.is_nan() => {
                        // 溢位成無限大時截到圖的外緣
                        let drawn = draw_bar(canvas, t, w, h.min(outer_radius), gradient, options)?;
                        if options.show_variable_labels {
                            canvas.text(
                                t + w / 10.0,
                                options.label_radius,
                                &wrap_label(variable.name()),
                                &TextStyle::variable_label(),
                            )?;
                        }
                        drawn
                    }
                    _ => {
                        tracing::warn!("'{}' is not yet quantified", variable.name());
                        canvas.fill_sector(
                            &Sector {
                                theta: t,
                                width: w,
                                inner: 0.0,
                                outer: 1.0,
                            },
                            &Paint::Solid(options.palette.unquantified),
                        )?;
                        1
                    }
                };

                variables.push(VariableReport {
                    name: variable.name().to_string(),
                    angle: t,
                    norm,
                    range: variable.norm_range(formula),
                    zone: RiskZone::classify(norm),
                    sectors,
                });
            }

            boundaries.push(BoundaryReport {
                name: boundary.name().to_string(),
                label: boundary.display_label(quantified),
                quantified,
                angle: sector.center,
                variables,
            });
        }

        // 安全操作空間 (r = 1) 與風險上限 (r = 2)
        canvas.circle(1.0, &Stroke::dashed(options.palette.safe, 0.5))?;
        canvas.circle(2.0, &Stroke::dashed(options.palette.risk_end, 0.5))?;

        for sector in &layout.sectors {
            canvas.radial_line(
                sector.separator,
                0.0,
                outer_radius,
                &Stroke::solid(palette::GREY, 1.0),
            )?;
        }
        for angle in layout.sectors.iter().flat_map(|s| s.inner_separators.iter()) {
            canvas.radial_line(
                *angle,
                0.0,
                outer_radius,
                &Stroke::solid(palette::GREY, 0.5).with_alpha(0.25),
            )?;
        }

        if options.show_boundary_labels {
            for report in &boundaries {
                canvas.text(
                    report.angle,
                    tick_ring,
                    &report.label,
                    &TextStyle::boundary_label(),
                )?;
            }
        }

        canvas.finish()?;

        Ok(RenderReport {
            system: self.name().to_string(),
            formula,
            outer_radius,
            boundaries,
        })
    }
}

fn outer_extent(norms: &[Vec<Option<f64>>], options: &RenderOptions) -> f64 {
    let quantified: Vec<f64> = norms
        .iter()
        .flatten()
        .filter_map(|n| *n)
        .filter(|h| !h.is_nan())
        .collect();

    // 無限大不撐開圖，長條會被截到外緣
    let mut extent = quantified
        .iter()
        .copied()
        .filter(|h| h.is_finite())
        .fold(2.0_f64, f64::max);
    if options.show_variable_labels && !quantified.is_empty() {
        extent = extent.max(options.label_radius);
    }
    extent
}

fn draw_bar<C: Canvas + ?Sized>(
    canvas: &mut C,
    theta: f64,
    width: f64,
    height: f64,
    gradient: bool,
    options: &RenderOptions,
) -> Result<usize> {
    // 低於基準值的長條不畫
    if height <= 0.0 {
        return Ok(0);
    }

    if gradient {
        canvas.fill_sector(
            &Sector {
                theta,
                width,
                inner: 0.0,
                outer: height,
            },
            &options.palette.paint_for(height),
        )?;
        return Ok(1);
    }

    let runs = segment_runs(height, options.segments, &options.palette);
    for run in &runs {
        canvas.fill_sector(
            &Sector {
                theta,
                width,
                inner: run.inner,
                outer: run.outer,
            },
            &Paint::Solid(run.color),
        )?;
    }
    Ok(runs.len())
}

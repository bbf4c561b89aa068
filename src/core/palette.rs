use crate::domain::drawing::{GradientStop, Paint, Rgb};

pub const GREEN: Rgb = Rgb::new(0, 128, 0);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const INDIGO: Rgb = Rgb::new(75, 0, 130);
pub const GREY: Rgb = Rgb::new(128, 128, 128);

/// Linear interpolation between two colours, `t` clamped to [0, 1].
pub fn mix(start: Rgb, end: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
    Rgb::new(
        channel(start.r, end.r),
        channel(start.g, end.g),
        channel(start.b, end.b),
    )
}

/// Three-zone colour law of a risk bar.
///
/// Up to 1 the bar is solid `safe`. Between 1 and 2 it runs from `risk_start`
/// to `risk_end`. Beyond 2 it runs from `risk_end` to `high_risk_end`, scaled
/// so the far colour is reached at the bar's own height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorLaw {
    pub safe: Rgb,
    pub risk_start: Rgb,
    pub risk_end: Rgb,
    pub high_risk_end: Rgb,
    pub unquantified: Rgb,
    /// Resolution of the sampled gradients.
    pub steps: usize,
}

impl Default for ColorLaw {
    fn default() -> Self {
        Self {
            safe: GREEN,
            risk_start: YELLOW,
            risk_end: RED,
            high_risk_end: INDIGO,
            unquantified: GREY,
            steps: 100,
        }
    }
}

impl ColorLaw {
    /// Colour of the bar at radius `p` for a bar of height `height`, sampled
    /// from a `steps`-entry gradient table.
    pub fn color_at(&self, p: f64, height: f64) -> Rgb {
        if p <= 1.0 {
            self.safe
        } else if p <= 2.0 {
            self.sample(self.risk_start, self.risk_end, p - 1.0)
        } else {
            self.sample(self.risk_end, self.high_risk_end, (p - 2.0) / (height - 2.0))
        }
    }

    fn sample(&self, start: Rgb, end: Rgb, pos: f64) -> Rgb {
        let steps = self.steps.max(1);
        let last = (steps - 1) as f64;
        let index = (pos.clamp(0.0, 1.0) * last) as usize;
        mix(start, end, index as f64 / steps as f64)
    }

    /// Continuous paint for a bar of height `height`.
    pub fn paint_for(&self, height: f64) -> Paint {
        if height <= 1.0 {
            return Paint::Solid(self.safe);
        }

        let mut stops = vec![
            GradientStop {
                radius: 0.0,
                color: self.safe,
            },
            GradientStop {
                radius: 1.0,
                color: self.safe,
            },
            GradientStop {
                radius: 1.0,
                color: self.risk_start,
            },
        ];

        if height <= 2.0 {
            stops.push(GradientStop {
                radius: height,
                color: mix(self.risk_start, self.risk_end, height - 1.0),
            });
        } else {
            stops.push(GradientStop {
                radius: 2.0,
                color: self.risk_end,
            });
            stops.push(GradientStop {
                radius: height,
                color: self.high_risk_end,
            });
        }

        Paint::Radial(stops)
    }
}

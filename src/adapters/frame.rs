use std::f64::consts::PI;

/// Share of the half canvas the outer radius may use; the rest is margin for
/// boundary labels.
const PLOT_FILL: f64 = 0.72;
/// Angular step used when an arc has to be approximated by a polyline.
const ARC_STEP: f64 = PI / 180.0;

/// Maps polar data coordinates onto a pixel canvas with the pole at the
/// centre and y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarFrame {
    pub cx: f64,
    pub cy: f64,
    pub scale: f64,
    pub min_dim: f64,
}

impl PolarFrame {
    pub fn new(width: u32, height: u32, outer_radius: f64) -> Self {
        let min_dim = width.min(height) as f64;
        let outer_radius = if outer_radius > 0.0 { outer_radius } else { 1.0 };
        Self {
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
            scale: (min_dim / 2.0) * PLOT_FILL / outer_radius,
            min_dim,
        }
    }

    pub fn to_pixel(&self, theta: f64, radius: f64) -> (f64, f64) {
        let r = radius * self.scale;
        (self.cx + r * theta.cos(), self.cy - r * theta.sin())
    }

    pub fn radius_px(&self, radius: f64) -> f64 {
        radius * self.scale
    }

    pub fn font_px(&self, size: f64) -> f64 {
        size * self.min_dim / 500.0
    }

    pub fn stroke_px(&self, width: f64) -> f64 {
        (width * self.min_dim / 600.0).max(0.5)
    }

    /// Points along the arc of `radius` from `start` to `end`, both included.
    pub fn arc(&self, radius: f64, start: f64, end: f64) -> Vec<(f64, f64)> {
        let steps = (((end - start).abs() / ARC_STEP).ceil() as usize).max(2);
        (0..=steps)
            .map(|i| {
                let t = start + (end - start) * i as f64 / steps as f64;
                self.to_pixel(t, radius)
            })
            .collect()
    }
}

/// Splits a polyline into dash pieces of `dash` pixels separated by `gap`.
pub fn dash_polyline(points: &[(f64, f64)], dash: f64, gap: f64) -> Vec<Vec<(f64, f64)>> {
    let dash = dash.max(0.5);
    let gap = gap.max(0.5);
    let mut pieces = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut drawing = true;
    let mut left = dash;

    for pair in points.windows(2) {
        let (mut x0, mut y0) = pair[0];
        let (x1, y1) = pair[1];
        let mut seg = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();

        while seg > 0.0 {
            if drawing && current.is_empty() {
                current.push((x0, y0));
            }
            let step = left.min(seg);
            if step >= seg {
                x0 = x1;
                y0 = y1;
            } else {
                let f = step / seg;
                x0 += (x1 - x0) * f;
                y0 += (y1 - y0) * f;
            }
            seg -= step;
            left -= step;

            if drawing {
                current.push((x0, y0));
            }
            if left <= 0.0 {
                if drawing {
                    pieces.push(std::mem::take(&mut current));
                }
                drawing = !drawing;
                left = if drawing { dash } else { gap };
            }
        }
    }

    if current.len() > 1 {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_mapping() {
        let frame = PolarFrame::new(1000, 1000, 2.0);
        let (x, y) = frame.to_pixel(0.0, 2.0);
        assert!((x - 860.0).abs() < 1e-9);
        assert!((y - 500.0).abs() < 1e-9);

        let (x, y) = frame.to_pixel(PI / 2.0, 2.0);
        assert!((x - 500.0).abs() < 1e-9);
        assert!((y - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_arc_endpoints() {
        let frame = PolarFrame::new(800, 600, 1.0);
        let arc = frame.arc(1.0, 0.0, PI);
        assert!(arc.len() >= 181);
        assert_eq!(arc[0], frame.to_pixel(0.0, 1.0));
        let last = arc[arc.len() - 1];
        assert!((last.0 - (400.0 - frame.scale)).abs() < 1e-9);
    }

    #[test]
    fn test_dash_polyline() {
        let line = vec![(0.0, 0.0), (10.0, 0.0)];
        let pieces = dash_polyline(&line, 2.0, 1.0);
        // dashes at 0-2, 3-5, 6-8, 9-10
        assert_eq!(pieces.len(), 4);
        assert_eq!(pieces[1][0], (3.0, 0.0));
        assert_eq!(pieces[3][1], (10.0, 0.0));
    }
}

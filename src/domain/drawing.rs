use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// An annular sector in polar data coordinates. `theta` is the centre angle
/// in radians (0 = east, counterclockwise), `width` the angular width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub theta: f64,
    pub width: f64,
    pub inner: f64,
    pub outer: f64,
}

impl Sector {
    pub fn start_angle(&self) -> f64 {
        self.theta - self.width / 2.0
    }

    pub fn end_angle(&self) -> f64 {
        self.theta + self.width / 2.0
    }
}

/// Colour at an absolute radius. Stops are ordered by radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub radius: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgb),
    /// Radial gradient centred on the pole.
    Radial(Vec<GradientStop>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
    pub alpha: f64,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: Rgb, width: f64) -> Self {
        Self {
            color,
            width,
            alpha: 1.0,
            dashed: false,
        }
    }

    pub fn dashed(color: Rgb, width: f64) -> Self {
        Self {
            dashed: true,
            ..Self::solid(color, width)
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points at a 1000 px canvas; adapters scale it.
    pub size: f64,
    pub weight: FontWeight,
    pub italic: bool,
    pub color: Rgb,
}

impl TextStyle {
    pub fn boundary_label() -> Self {
        Self {
            size: 8.0,
            weight: FontWeight::Bold,
            italic: false,
            color: Rgb::new(0, 0, 0),
        }
    }

    pub fn variable_label() -> Self {
        Self {
            size: 5.5,
            weight: FontWeight::Normal,
            italic: true,
            color: Rgb::new(0, 0, 0),
        }
    }
}

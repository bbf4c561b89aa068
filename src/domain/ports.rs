use crate::domain::drawing::{Paint, Sector, Stroke, TextStyle};
use crate::domain::model::PlanetarySystem;
use crate::domain::record::{PlotOutcome, VariableRecord};
use crate::utils::error::Result;

/// A 2D drawing surface addressed in polar data coordinates.
///
/// Angles are radians, 0 pointing east and increasing counterclockwise.
/// Radii are in normalized risk units; `begin` tells the surface the largest
/// radius it has to fit so it can choose a scale.
pub trait Canvas {
    fn begin(&mut self, outer_radius: f64) -> Result<()>;

    /// Whether `Paint::Radial` is drawn natively. Surfaces that return false
    /// only ever receive `Paint::Solid`.
    fn supports_gradient(&self) -> bool {
        false
    }

    fn fill_sector(&mut self, sector: &Sector, paint: &Paint) -> Result<()>;

    fn circle(&mut self, radius: f64, stroke: &Stroke) -> Result<()>;

    fn radial_line(&mut self, theta: f64, from: f64, to: f64, stroke: &Stroke) -> Result<()>;

    /// Draws `text` centred on the point. Lines are separated by `\n`.
    fn text(&mut self, theta: f64, radius: f64, text: &str, style: &TextStyle) -> Result<()>;

    fn finish(&mut self) -> Result<()>;
}

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<VariableRecord>>;
    fn transform(&self, records: Vec<VariableRecord>) -> Result<PlanetarySystem>;
    fn load(&self, system: &PlanetarySystem) -> Result<PlotOutcome>;
}

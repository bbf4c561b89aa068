use crate::domain::drawing::{Paint, Sector, Stroke, TextStyle};
use crate::domain::ports::Canvas;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Begin {
        outer_radius: f64,
    },
    Sector {
        sector: Sector,
        paint: Paint,
    },
    Circle {
        radius: f64,
        stroke: Stroke,
    },
    RadialLine {
        theta: f64,
        from: f64,
        to: f64,
        stroke: Stroke,
    },
    Text {
        theta: f64,
        radius: f64,
        text: String,
        style: TextStyle,
    },
    Finish,
}

/// Canvas that keeps the draw commands instead of rasterising them.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    gradient: bool,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gradient() -> Self {
        Self {
            commands: Vec::new(),
            gradient: true,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn sectors(&self) -> impl Iterator<Item = (&Sector, &Paint)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sector { sector, paint } => Some((sector, paint)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn radial_lines(&self) -> impl Iterator<Item = (f64, &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::RadialLine { theta, stroke, .. } => Some((*theta, stroke)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn begin(&mut self, outer_radius: f64) -> Result<()> {
        self.commands.push(DrawCommand::Begin { outer_radius });
        Ok(())
    }

    fn supports_gradient(&self) -> bool {
        self.gradient
    }

    fn fill_sector(&mut self, sector: &Sector, paint: &Paint) -> Result<()> {
        self.commands.push(DrawCommand::Sector {
            sector: *sector,
            paint: paint.clone(),
        });
        Ok(())
    }

    fn circle(&mut self, radius: f64, stroke: &Stroke) -> Result<()> {
        self.commands.push(DrawCommand::Circle {
            radius,
            stroke: *stroke,
        });
        Ok(())
    }

    fn radial_line(&mut self, theta: f64, from: f64, to: f64, stroke: &Stroke) -> Result<()> {
        self.commands.push(DrawCommand::RadialLine {
            theta,
            from,
            to,
            stroke: *stroke,
        });
        Ok(())
    }

    fn text(&mut self, theta: f64, radius: f64, text: &str, style: &TextStyle) -> Result<()> {
        self.commands.push(DrawCommand::Text {
            theta,
            radius,
            text: text.to_string(),
            style: *style,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.commands.push(DrawCommand::Finish);
        Ok(())
    }
}

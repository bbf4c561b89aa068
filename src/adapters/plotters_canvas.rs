use crate::adapters::frame::{dash_polyline, PolarFrame};
use crate::domain::drawing::{FontWeight, Paint, Rgb, Sector, Stroke, TextStyle};
use crate::domain::ports::Canvas;
use crate::utils::error::{PlotError, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::element::{PathElement, Polygon, Text};
use plotters::prelude::{DrawingBackend, IntoFont};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, FontStyle, RGBColor, ShapeStyle, WHITE};
use std::f64::consts::PI;

/// Canvas over any plotters drawing area.
///
/// plotters has no gradient fill, so bars arrive here as flat-coloured
/// segments and every sector is approximated by a polygon.
pub struct PlottersCanvas<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    frame: Option<PolarFrame>,
    title: Option<String>,
}

fn draw_error(e: impl std::fmt::Display) -> PlotError {
    PlotError::render(e.to_string())
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn to_backend(points: &[(f64, f64)]) -> Vec<(i32, i32)> {
    points
        .iter()
        .map(|(x, y)| (x.round() as i32, y.round() as i32))
        .collect()
}

impl<DB: DrawingBackend> PlottersCanvas<DB> {
    pub fn new(area: DrawingArea<DB, Shift>) -> Self {
        Self {
            area,
            frame: None,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn frame(&self) -> Result<PolarFrame> {
        self.frame
            .ok_or_else(|| PlotError::render("plotters canvas used before begin()"))
    }

    fn line_style(frame: &PolarFrame, stroke: &Stroke) -> ShapeStyle {
        let width = frame.stroke_px(stroke.width).round().max(1.0) as u32;
        rgb(stroke.color).mix(stroke.alpha).stroke_width(width)
    }

    fn polyline(&self, frame: &PolarFrame, points: &[(f64, f64)], stroke: &Stroke) -> Result<()> {
        let style = Self::line_style(frame, stroke);
        let pieces = if stroke.dashed {
            let unit = frame.stroke_px(stroke.width) * 4.0;
            dash_polyline(points, unit * 1.5, unit)
        } else {
            vec![points.to_vec()]
        };

        for piece in pieces {
            self.area
                .draw(&PathElement::new(to_backend(&piece), style))
                .map_err(draw_error)?;
        }
        Ok(())
    }

    fn draw_lines(&self, x: f64, y: f64, text: &str, style: &TextStyle, pos: Pos) -> Result<()> {
        let frame = self.frame()?;
        let px = frame.font_px(style.size);
        let font_style = match (style.weight, style.italic) {
            (FontWeight::Bold, _) => FontStyle::Bold,
            (FontWeight::Normal, true) => FontStyle::Italic,
            (FontWeight::Normal, false) => FontStyle::Normal,
        };
        let font = ("sans-serif", px)
            .into_font()
            .style(font_style)
            .color(&rgb(style.color))
            .pos(pos);

        let lines: Vec<&str> = text.split('\n').collect();
        let line_height = px * 1.15;
        let top = y - line_height * (lines.len() as f64 - 1.0) / 2.0;
        for (i, line) in lines.iter().enumerate() {
            let at = (x.round() as i32, (top + i as f64 * line_height).round() as i32);
            self.area
                .draw(&Text::new(line.to_string(), at, font.clone()))
                .map_err(draw_error)?;
        }
        Ok(())
    }
}

impl<DB: DrawingBackend> Canvas for PlottersCanvas<DB> {
    fn begin(&mut self, outer_radius: f64) -> Result<()> {
        let (width, height) = self.area.dim_in_pixel();
        self.frame = Some(PolarFrame::new(width, height, outer_radius));
        self.area.fill(&WHITE).map_err(draw_error)
    }

    fn fill_sector(&mut self, sector: &Sector, paint: &Paint) -> Result<()> {
        let frame = self.frame()?;
        if sector.outer <= sector.inner {
            return Ok(());
        }

        let color = match paint {
            Paint::Solid(color) => *color,
            // 沒有漸層支援時取最外側的顏色
            Paint::Radial(stops) => stops
                .last()
                .map(|s| s.color)
                .ok_or_else(|| PlotError::render("radial paint without stops"))?,
        };

        let a0 = sector.start_angle();
        let a1 = sector.end_angle();
        let mut points = frame.arc(sector.outer, a0, a1);
        if sector.inner > 0.0 {
            let mut inner = frame.arc(sector.inner, a1, a0);
            points.append(&mut inner);
        } else {
            points.push((frame.cx, frame.cy));
        }

        self.area
            .draw(&Polygon::new(to_backend(&points), rgb(color).filled()))
            .map_err(draw_error)
    }

    fn circle(&mut self, radius: f64, stroke: &Stroke) -> Result<()> {
        let frame = self.frame()?;
        let points = frame.arc(radius, 0.0, 2.0 * PI);
        self.polyline(&frame, &points, stroke)
    }

    fn radial_line(&mut self, theta: f64, from: f64, to: f64, stroke: &Stroke) -> Result<()> {
        let frame = self.frame()?;
        let points = [frame.to_pixel(theta, from), frame.to_pixel(theta, to)];
        self.polyline(&frame, &points, stroke)
    }

    fn text(&mut self, theta: f64, radius: f64, text: &str, style: &TextStyle) -> Result<()> {
        let frame = self.frame()?;
        let (x, y) = frame.to_pixel(theta, radius);
        self.draw_lines(x, y, text, style, Pos::new(HPos::Center, VPos::Center))
    }

    fn finish(&mut self) -> Result<()> {
        let frame = self.frame()?;
        if let Some(title) = self.title.clone() {
            let style = TextStyle {
                size: 10.0,
                weight: FontWeight::Bold,
                ..TextStyle::boundary_label()
            };
            let px = frame.font_px(style.size);
            self.draw_lines(px, px * 1.5, &title, &style, Pos::new(HPos::Left, VPos::Center))?;
        }
        self.area.present().map_err(draw_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::palette::{GREEN, RED};
    use plotters::prelude::{IntoDrawingArea, SVGBackend};

    #[test]
    fn test_draws_polygons_paths_and_text() {
        let mut buf = String::new();
        {
            let area = SVGBackend::with_string(&mut buf, (400, 400)).into_drawing_area();
            let mut canvas = PlottersCanvas::new(area).with_title("PBS 2023");
            canvas.begin(2.0).unwrap();
            canvas
                .fill_sector(
                    &Sector {
                        theta: 0.0,
                        width: 0.6,
                        inner: 1.0,
                        outer: 1.5,
                    },
                    &Paint::Solid(RED),
                )
                .unwrap();
            canvas.circle(1.0, &Stroke::dashed(GREEN, 0.5)).unwrap();
            canvas
                .text(0.0, 2.1, "Ocean\nacidification", &TextStyle::boundary_label())
                .unwrap();
            canvas.finish().unwrap();
        }

        assert!(buf.contains("<polygon"));
        assert!(buf.contains("<polyline"));
        assert!(buf.contains("acidification"));
        assert!(buf.contains("PBS 2023"));
    }

    #[test]
    fn test_drawing_before_begin_fails() {
        let mut buf = String::new();
        let area = SVGBackend::with_string(&mut buf, (100, 100)).into_drawing_area();
        let mut canvas = PlottersCanvas::new(area);
        assert!(canvas.circle(1.0, &Stroke::solid(GREEN, 1.0)).is_err());
    }
}

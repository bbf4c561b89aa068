use crate::adapters::frame::PolarFrame;
use crate::domain::drawing::{FontWeight, GradientStop, Paint, Sector, Stroke, TextStyle};
use crate::domain::ports::Canvas;
use crate::utils::error::{PlotError, Result};
use std::f64::consts::PI;

/// SVG document canvas with native radial gradients.
///
/// Risk bars become one `<path>` each, filled with a `radialGradient` in user
/// space centred on the pole, so the colour law is continuous instead of
/// being faked with thousands of flat segments.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    title: Option<String>,
    frame: Option<PolarFrame>,
    defs: String,
    body: String,
    gradients: usize,
    document: Option<String>,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: None,
            frame: None,
            defs: String::new(),
            body: String::new(),
            gradients: 0,
            document: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The finished document, available after `finish`.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn into_document(self) -> Result<String> {
        self.document
            .ok_or_else(|| PlotError::render("SVG canvas was not finished"))
    }

    fn frame(&self) -> Result<PolarFrame> {
        self.frame
            .ok_or_else(|| PlotError::render("SVG canvas used before begin()"))
    }

    fn sector_path(frame: &PolarFrame, sector: &Sector) -> String {
        let a0 = sector.start_angle();
        let a1 = sector.end_angle();
        let large = if sector.width > PI { 1 } else { 0 };
        let ro = frame.radius_px(sector.outer);
        let (ox0, oy0) = frame.to_pixel(a0, sector.outer);
        let (ox1, oy1) = frame.to_pixel(a1, sector.outer);

        if sector.inner <= 0.0 {
            format!(
                "M {:.3} {:.3} L {:.3} {:.3} A {:.3} {:.3} 0 {} 0 {:.3} {:.3} Z",
                frame.cx, frame.cy, ox0, oy0, ro, ro, large, ox1, oy1
            )
        } else {
            let ri = frame.radius_px(sector.inner);
            let (ix0, iy0) = frame.to_pixel(a0, sector.inner);
            let (ix1, iy1) = frame.to_pixel(a1, sector.inner);
            format!(
                "M {:.3} {:.3} A {:.3} {:.3} 0 {} 0 {:.3} {:.3} L {:.3} {:.3} A {:.3} {:.3} 0 {} 1 {:.3} {:.3} Z",
                ox0, oy0, ro, ro, large, ox1, oy1, ix1, iy1, ri, ri, large, ix0, iy0
            )
        }
    }

    fn push_gradient(&mut self, frame: &PolarFrame, outer: f64, stops: &[GradientStop]) -> String {
        let id = format!("risk-gradient-{}", self.gradients);
        self.gradients += 1;

        self.defs.push_str(&format!(
            "<radialGradient id=\"{}\" gradientUnits=\"userSpaceOnUse\" cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\">",
            id,
            frame.cx,
            frame.cy,
            frame.radius_px(outer)
        ));
        for stop in stops {
            let offset = if outer > 0.0 {
                (stop.radius / outer).clamp(0.0, 1.0)
            } else {
                0.0
            };
            self.defs.push_str(&format!(
                "<stop offset=\"{:.5}\" stop-color=\"{}\"/>",
                offset,
                stop.color.to_hex()
            ));
        }
        self.defs.push_str("</radialGradient>");
        id
    }

    fn stroke_attrs(frame: &PolarFrame, stroke: &Stroke) -> String {
        let mut attrs = format!(
            "fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\" stroke-opacity=\"{:.2}\"",
            stroke.color.to_hex(),
            frame.stroke_px(stroke.width),
            stroke.alpha
        );
        if stroke.dashed {
            let unit = frame.stroke_px(stroke.width) * 4.0;
            attrs.push_str(&format!(
                " stroke-dasharray=\"{:.2} {:.2}\"",
                unit * 1.5,
                unit
            ));
        }
        attrs
    }

    fn push_text_lines(&mut self, x: f64, y: f64, text: &str, style: &TextStyle, anchor: &str) {
        let frame_font = self
            .frame
            .map(|f| f.font_px(style.size))
            .unwrap_or(style.size);
        let lines: Vec<&str> = text.split('\n').collect();
        let first_dy = -((lines.len() as f64 - 1.0) / 2.0) * 1.15;

        self.body.push_str(&format!(
            "<text x=\"{:.3}\" y=\"{:.3}\" text-anchor=\"{}\" dominant-baseline=\"central\" font-family=\"sans-serif\" font-size=\"{:.2}\" font-weight=\"{}\" font-style=\"{}\" fill=\"{}\">",
            x,
            y,
            anchor,
            frame_font,
            match style.weight {
                FontWeight::Bold => "bold",
                FontWeight::Normal => "normal",
            },
            if style.italic { "italic" } else { "normal" },
            style.color.to_hex()
        ));
        for (i, line) in lines.iter().enumerate() {
            let dy = if i == 0 { first_dy } else { 1.15 };
            self.body.push_str(&format!(
                "<tspan x=\"{:.3}\" dy=\"{:.3}em\">{}</tspan>",
                x,
                dy,
                html_escape::encode_text(line)
            ));
        }
        self.body.push_str("</text>");
    }
}

impl Canvas for SvgCanvas {
    fn begin(&mut self, outer_radius: f64) -> Result<()> {
        self.frame = Some(PolarFrame::new(self.width, self.height, outer_radius));
        self.defs.clear();
        self.body.clear();
        self.gradients = 0;
        self.document = None;
        Ok(())
    }

    fn supports_gradient(&self) -> bool {
        true
    }

    fn fill_sector(&mut self, sector: &Sector, paint: &Paint) -> Result<()> {
        let frame = self.frame()?;
        if sector.outer <= sector.inner {
            return Ok(());
        }

        let fill = match paint {
            Paint::Solid(color) => color.to_hex(),
            Paint::Radial(stops) => {
                let id = self.push_gradient(&frame, sector.outer, stops);
                format!("url(#{})", id)
            }
        };

        let path = Self::sector_path(&frame, sector);
        self.body
            .push_str(&format!("<path d=\"{}\" fill=\"{}\" stroke=\"none\"/>", path, fill));
        Ok(())
    }

    fn circle(&mut self, radius: f64, stroke: &Stroke) -> Result<()> {
        let frame = self.frame()?;
        self.body.push_str(&format!(
            "<circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\" {}/>",
            frame.cx,
            frame.cy,
            frame.radius_px(radius),
            Self::stroke_attrs(&frame, stroke)
        ));
        Ok(())
    }

    fn radial_line(&mut self, theta: f64, from: f64, to: f64, stroke: &Stroke) -> Result<()> {
        let frame = self.frame()?;
        let (x0, y0) = frame.to_pixel(theta, from);
        let (x1, y1) = frame.to_pixel(theta, to);
        self.body.push_str(&format!(
            "<line x1=\"{:.3}\" y1=\"{:.3}\" x2=\"{:.3}\" y2=\"{:.3}\" {}/>",
            x0,
            y0,
            x1,
            y1,
            Self::stroke_attrs(&frame, stroke)
        ));
        Ok(())
    }

    fn text(&mut self, theta: f64, radius: f64, text: &str, style: &TextStyle) -> Result<()> {
        let frame = self.frame()?;
        let (x, y) = frame.to_pixel(theta, radius);
        self.push_text_lines(x, y, text, style, "middle");
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let frame = self.frame()?;

        let mut doc = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height
        );
        doc.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");
        if !self.defs.is_empty() {
            doc.push_str("<defs>");
            doc.push_str(&self.defs);
            doc.push_str("</defs>");
        }
        doc.push_str(&self.body);

        if let Some(title) = &self.title {
            let size = frame.font_px(10.0);
            doc.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-family=\"sans-serif\" font-size=\"{:.2}\" font-weight=\"bold\" fill=\"#000000\">{}</text>",
                size,
                size * 1.5,
                size,
                html_escape::encode_text(title)
            ));
        }
        doc.push_str("</svg>\n");

        self.document = Some(doc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::palette::{ColorLaw, GREEN};

    fn bar(outer: f64) -> Sector {
        Sector {
            theta: 0.0,
            width: 0.5,
            inner: 0.0,
            outer,
        }
    }

    #[test]
    fn test_gradient_bar_emits_radial_gradient() {
        let mut canvas = SvgCanvas::new(600, 600);
        canvas.begin(4.0).unwrap();
        canvas
            .fill_sector(&bar(4.0), &ColorLaw::default().paint_for(4.0))
            .unwrap();
        canvas.finish().unwrap();

        let doc = canvas.document().unwrap();
        assert!(doc.contains("<radialGradient id=\"risk-gradient-0\""));
        assert!(doc.contains("<stop offset=\"0.25000\" stop-color=\"#008000\"/>"));
        assert!(doc.contains("<stop offset=\"0.50000\" stop-color=\"#ff0000\"/>"));
        assert!(doc.contains("fill=\"url(#risk-gradient-0)\""));
    }

    #[test]
    fn test_solid_sector_and_lines() {
        let mut canvas = SvgCanvas::new(400, 400).with_title("PBS 2023");
        canvas.begin(2.0).unwrap();
        canvas.fill_sector(&bar(0.6), &Paint::Solid(GREEN)).unwrap();
        canvas
            .circle(1.0, &Stroke::dashed(GREEN, 0.5))
            .unwrap();
        canvas
            .radial_line(1.0, 0.0, 2.0, &Stroke::solid(GREEN, 1.0).with_alpha(0.25))
            .unwrap();
        canvas.finish().unwrap();

        let doc = canvas.into_document().unwrap();
        assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(doc.contains("fill=\"#008000\" stroke=\"none\""));
        assert!(doc.contains("stroke-dasharray"));
        assert!(doc.contains("stroke-opacity=\"0.25\""));
        assert!(doc.contains(">PBS 2023</text>"));
        assert!(!doc.contains("<defs>"));
    }

    #[test]
    fn test_multiline_text_is_escaped() {
        let mut canvas = SvgCanvas::new(400, 400);
        canvas.begin(2.0).unwrap();
        canvas
            .text(0.0, 2.2, "Land\nsystem & change", &TextStyle::boundary_label())
            .unwrap();
        canvas.finish().unwrap();

        let doc = canvas.document().unwrap();
        assert!(doc.contains(">Land</tspan>"));
        assert!(doc.contains(">system &amp; change</tspan>"));
        assert!(doc.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_drawing_before_begin_fails() {
        let mut canvas = SvgCanvas::new(400, 400);
        assert!(canvas.fill_sector(&bar(1.0), &Paint::Solid(GREEN)).is_err());
        assert!(canvas.into_document().is_err());
    }
}

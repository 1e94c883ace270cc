//! Headless SVG export
//!
//! Builds a standalone SVG document from the same draw calls a browser
//! canvas would receive. Rectangles and paths map one-to-one onto SVG
//! elements; a full-surface `clear_rect` drops everything drawn so far.

use std::fmt::Write as _;

use super::DrawSurface;

#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
    fill_style: String,
    stroke_style: String,
    line_width: f64,
    dash: Vec<f64>,
    path: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
            fill_style: "#000000".to_string(),
            stroke_style: "#000000".to_string(),
            line_width: 1.0,
            dash: Vec::new(),
            path: String::new(),
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Complete SVG document.
    pub fn finish(&self) -> String {
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        out.push('\n');
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    fn stroke_attrs(&self) -> String {
        let mut attrs = format!(
            r#"fill="none" stroke="{}" stroke-width="{}""#,
            escape(&self.stroke_style),
            self.line_width
        );
        if !self.dash.is_empty() {
            let dash: Vec<String> = self.dash.iter().map(|d| d.to_string()).collect();
            let _ = write!(attrs, r#" stroke-dasharray="{}""#, dash.join(" "));
        }
        attrs
    }
}

fn escape(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}

impl DrawSurface for SvgSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if x <= 0.0 && y <= 0.0 && x + w >= self.width && y + h >= self.height {
            self.elements.clear();
        } else {
            log::trace!("partial clear_rect ignored by svg surface");
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.elements.push(format!(
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{}"/>"#,
            escape(&self.fill_style)
        ));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.elements.push(format!(
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" {}/>"#,
            self.stroke_attrs()
        ));
    }

    fn set_fill_style(&mut self, style: &str) {
        self.fill_style = style.to_string();
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.stroke_style = style.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.dash = segments.to_vec();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.path, "M{x} {y} ");
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.path, "L{x} {y} ");
    }

    fn close_path(&mut self) {
        self.path.push_str("Z ");
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.elements.push(format!(r#"<path d="{}" {}/>"#, self.path.trim_end(), self.stroke_attrs()));
    }

    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.elements.push(format!(
            r#"<path d="{}" fill="{}"/>"#,
            self.path.trim_end(),
            escape(&self.fill_style)
        ));
    }
}

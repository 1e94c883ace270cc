//! Command-recording surface
//!
//! Hosts that own a real canvas replay `DrawCommand`s onto it one-for-one.
//! The query helpers replay the list to recover what was actually drawn.

use serde::{Deserialize, Serialize};

use super::DrawSurface;
use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    StrokeRect { x: f64, y: f64, w: f64, h: f64 },
    SetFillStyle { style: String },
    SetStrokeStyle { style: String },
    SetLineWidth { width: f64 },
    SetLineDash { segments: Vec<f64> },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
    Stroke,
    Fill,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Dash pattern in effect after the last command.
    pub fn current_dash(&self) -> &[f64] {
        self.commands
            .iter()
            .rev()
            .find_map(|c| match c {
                DrawCommand::SetLineDash { segments } => Some(segments.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Every stroked two-point path as (start, end, dash in effect).
    pub fn stroked_segments(&self) -> Vec<(Point, Point, Vec<f64>)> {
        let mut out = Vec::new();
        let mut path: Vec<Point> = Vec::new();
        let mut dash: Vec<f64> = Vec::new();

        for cmd in &self.commands {
            match cmd {
                DrawCommand::SetLineDash { segments } => dash = segments.clone(),
                DrawCommand::BeginPath => path.clear(),
                DrawCommand::MoveTo { x, y } | DrawCommand::LineTo { x, y } => {
                    path.push(Point::new(*x, *y))
                }
                DrawCommand::Stroke if path.len() == 2 => out.push((path[0], path[1], dash.clone())),
                _ => {}
            }
        }
        out
    }

    /// Vertices of every filled path.
    pub fn filled_polygons(&self) -> Vec<Vec<Point>> {
        let mut out = Vec::new();
        let mut path: Vec<Point> = Vec::new();

        for cmd in &self.commands {
            match cmd {
                DrawCommand::BeginPath => path.clear(),
                DrawCommand::MoveTo { x, y } | DrawCommand::LineTo { x, y } => {
                    path.push(Point::new(*x, *y))
                }
                DrawCommand::Fill => out.push(path.clone()),
                _ => {}
            }
        }
        out
    }
}

impl DrawSurface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::StrokeRect { x, y, w, h });
    }

    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::SetFillStyle { style: style.to_string() });
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::SetStrokeStyle { style: style.to_string() });
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::SetLineWidth { width });
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.commands.push(DrawCommand::SetLineDash { segments: segments.to_vec() });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }
}

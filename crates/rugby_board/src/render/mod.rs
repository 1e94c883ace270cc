//! Field renderer
//!
//! Draws the static field markings and every arrow onto a `DrawSurface`.
//! The output depends only on (dimensions, arrows, style): calling
//! `render` twice with the same inputs emits the same command sequence.

pub mod recorder;
pub mod svg;

pub use recorder::{DrawCommand, RecordingSurface};
pub use svg::SvgSurface;

use crate::annotation::Arrow;
use crate::config::{ArrowStyle, FieldStyle};
use crate::geometry::{FieldDimensions, Point};

/// The subset of 2D-canvas primitives the board needs.
///
/// Styles are CSS colour strings, as a browser canvas takes them.
pub trait DrawSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    /// Empty slice = solid line.
    fn set_line_dash(&mut self, segments: &[f64]);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);
}

/// Clear and redraw the whole board.
pub fn render<S: DrawSurface + ?Sized>(
    surface: &mut S,
    dims: FieldDimensions,
    arrows: &[Arrow],
    field: &FieldStyle,
    arrow_style: &ArrowStyle,
) {
    draw_field(surface, dims, field);
    for arrow in arrows {
        draw_arrow(surface, arrow.from, arrow.to, arrow_style);
    }
}

/// Background, touchlines, midline, 22 m lines and end zones.
pub fn draw_field<S: DrawSurface + ?Sized>(surface: &mut S, dims: FieldDimensions, style: &FieldStyle) {
    let (w, h) = (dims.width, dims.height);
    let m = style.margin;

    surface.clear_rect(0.0, 0.0, w, h);

    surface.set_fill_style(&style.background);
    surface.fill_rect(0.0, 0.0, w, h);

    surface.set_stroke_style(&style.line_color);
    surface.set_line_width(style.line_width);

    surface.stroke_rect(m, m, w - 2.0 * m, h - 2.0 * m);

    let mid = w / 2.0;
    vertical_line(surface, mid, m, h - m);

    surface.set_line_dash(&style.twenty_two_dash);
    vertical_line(surface, mid - style.twenty_two_offset, m, h - m);
    vertical_line(surface, mid + style.twenty_two_offset, m, h - m);
    surface.set_line_dash(&[]);

    surface.set_fill_style(&style.end_zone_fill);
    surface.fill_rect(m, m, style.end_zone_width, h - 2.0 * m);
    surface.fill_rect(w - m - style.end_zone_width, m, style.end_zone_width, h - 2.0 * m);
}

fn vertical_line<S: DrawSurface + ?Sized>(surface: &mut S, x: f64, y0: f64, y1: f64) {
    surface.begin_path();
    surface.move_to(x, y0);
    surface.line_to(x, y1);
    surface.stroke();
}

/// Arrowhead triangle: `[apex, wing_a, wing_b]`.
///
/// Wings sit `head_length` back from `to`, rotated ∓`head_angle_deg`
/// from the shaft direction.
pub fn arrow_head(from: Point, to: Point, style: &ArrowStyle) -> [Point; 3] {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let spread = style.head_angle_deg.to_radians();
    let wing = |a: f64| {
        Point::new(to.x - style.head_length * a.cos(), to.y - style.head_length * a.sin())
    };
    [to, wing(angle - spread), wing(angle + spread)]
}

pub fn draw_arrow<S: DrawSurface + ?Sized>(surface: &mut S, from: Point, to: Point, style: &ArrowStyle) {
    surface.set_stroke_style(&style.color);
    surface.set_line_width(style.line_width);
    surface.begin_path();
    surface.move_to(from.x, from.y);
    surface.line_to(to.x, to.y);
    surface.stroke();

    let [apex, wing_a, wing_b] = arrow_head(from, to, style);
    surface.begin_path();
    surface.move_to(apex.x, apex.y);
    surface.line_to(wing_a.x, wing_a.y);
    surface.line_to(wing_b.x, wing_b.y);
    surface.close_path();
    surface.set_fill_style(&style.color);
    surface.fill();
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn dims() -> FieldDimensions {
        FieldDimensions::new(800.0, 500.0)
    }

    #[test]
    fn test_field_markings() {
        let mut surface = RecordingSurface::new();
        draw_field(&mut surface, dims(), &FieldStyle::default());
        let cmds = surface.commands();

        assert_eq!(cmds[0], DrawCommand::ClearRect { x: 0.0, y: 0.0, w: 800.0, h: 500.0 });
        assert!(cmds.contains(&DrawCommand::StrokeRect { x: 20.0, y: 20.0, w: 760.0, h: 460.0 }));

        // midline, then the two dashed 22 m lines
        let strokes = surface.stroked_segments();
        assert_eq!(strokes.len(), 3);
        assert_eq!(strokes[0], (Point::new(400.0, 20.0), Point::new(400.0, 480.0), vec![]));
        assert_eq!(strokes[1], (Point::new(180.0, 20.0), Point::new(180.0, 480.0), vec![10.0, 8.0]));
        assert_eq!(strokes[2], (Point::new(620.0, 20.0), Point::new(620.0, 480.0), vec![10.0, 8.0]));

        assert!(cmds.contains(&DrawCommand::FillRect { x: 20.0, y: 20.0, w: 60.0, h: 460.0 }));
        assert!(cmds.contains(&DrawCommand::FillRect { x: 720.0, y: 20.0, w: 60.0, h: 460.0 }));
        // dash reset before the end zones
        assert_eq!(surface.current_dash(), &[] as &[f64]);
    }

    #[test]
    fn test_horizontal_arrow_head() {
        let style = ArrowStyle::default();
        let [apex, a, b] = arrow_head(Point::new(10.0, 10.0), Point::new(110.0, 10.0), &style);
        assert_eq!(apex, Point::new(110.0, 10.0));

        let expected_dx = 12.0 * (30f64).to_radians().cos();
        assert!((a.x - (110.0 - expected_dx)).abs() < EPS);
        assert!((a.y - 16.0).abs() < EPS);
        assert!((b.x - (110.0 - expected_dx)).abs() < EPS);
        assert!((b.y - 4.0).abs() < EPS);

        // wings point back along 180° ± 30°
        for wing in [a, b] {
            let deg = (wing.y - apex.y).atan2(wing.x - apex.x).to_degrees().abs();
            assert!((deg - 150.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_render_draws_arrow_after_field() {
        let arrows = vec![Arrow::new(Point::new(10.0, 10.0), Point::new(110.0, 10.0))];
        let mut surface = RecordingSurface::new();
        render(&mut surface, dims(), &arrows, &FieldStyle::default(), &ArrowStyle::default());

        let strokes = surface.stroked_segments();
        assert_eq!(strokes.last().unwrap().0, Point::new(10.0, 10.0));
        assert_eq!(strokes.last().unwrap().1, Point::new(110.0, 10.0));

        let fills = surface.filled_polygons();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0][0], Point::new(110.0, 10.0));
        assert_eq!(surface.commands().last(), Some(&DrawCommand::Fill));
    }

    #[test]
    fn test_render_is_deterministic() {
        let arrows = vec![
            Arrow::new(Point::new(100.0, 100.0), Point::new(200.0, 300.0)),
            Arrow::new(Point::new(50.0, 400.0), Point::new(50.0, 100.0)),
        ];
        let mut first = RecordingSurface::new();
        let mut second = RecordingSurface::new();
        render(&mut first, dims(), &arrows, &FieldStyle::default(), &ArrowStyle::default());
        render(&mut second, dims(), &arrows, &FieldStyle::default(), &ArrowStyle::default());
        assert_eq!(first.commands(), second.commands());
    }
}

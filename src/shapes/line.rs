use crate::errors::{Result, SketchError};
use crate::style::{ArrowStyle, Style, StyleUpdate};
use crate::types::{Angle, Point};

use super::{Curve, Shape, Transform, check_scale};

/// Below this coordinate delta a line counts as vertical (or horizontal)
const AXIS_EPS: f64 = 1e-12;

/// A straight segment between two distinct points.
///
/// The explicit forms `y = a·x + b` and `x = c·y + d` are precomputed so
/// the line can be solved for either coordinate.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) curve: Curve,
    /// `(a, b)`; absent for vertical lines
    slope_form: Option<(f64, f64)>,
    /// `(c, d)`; absent for horizontal lines
    inverse_form: Option<(f64, f64)>,
}

impl Line {
    /// Fails when `start` and `end` coincide (within point tolerance).
    pub fn new(start: Point, end: Point) -> Result<Self> {
        Line::with_style(start, end, Style::default())
    }

    /// A line with an arrowhead at `end`
    pub fn arrow(start: Point, end: Point) -> Result<Self> {
        let style = Style::default().with(StyleUpdate::Arrow(Some(ArrowStyle::End)));
        Line::with_style(start, end, style)
    }

    pub(crate) fn with_style(start: Point, end: Point, style: Style) -> Result<Self> {
        if start == end {
            return Err(SketchError::invalid(
                "line",
                format!("start {start} and end {end} coincide"),
            ));
        }
        Ok(Line::from_curve(Curve::from_parts(vec![start, end], style)))
    }

    /// Rebuild the explicit forms for a two-point curve already known to
    /// be non-degenerate.
    fn from_curve(curve: Curve) -> Self {
        let (start, end) = (curve.start(), curve.end());
        let (dx, dy) = (end.x - start.x, end.y - start.y);

        let slope_form = (dx.abs() > AXIS_EPS).then(|| {
            let a = dy / dx;
            (a, start.y - a * start.x)
        });
        let inverse_form = (dy.abs() > AXIS_EPS).then(|| {
            let c = dx / dy;
            (c, start.x - c * start.y)
        });

        Line {
            curve,
            slope_form,
            inverse_form,
        }
    }

    pub fn start(&self) -> Point {
        self.curve.start()
    }

    pub fn end(&self) -> Point {
        self.curve.end()
    }

    pub fn length(&self) -> f64 {
        self.start().dist(self.end())
    }

    pub fn is_vertical(&self) -> bool {
        self.slope_form.is_none()
    }

    pub fn is_horizontal(&self) -> bool {
        self.inverse_form.is_none()
    }

    /// Solve for y at `x`. Undefined on a vertical line.
    pub fn y_at(&self, x: f64) -> Result<f64> {
        let (a, b) = self.slope_form.ok_or_else(|| SketchError::DomainRange {
            what: "y of a vertical line",
            value: x,
            limit: self.start().x,
        })?;
        Ok(a * x + b)
    }

    /// Solve for x at `y`. Undefined on a horizontal line.
    pub fn x_at(&self, y: f64) -> Result<f64> {
        let (c, d) = self.inverse_form.ok_or_else(|| SketchError::DomainRange {
            what: "x of a horizontal line",
            value: y,
            limit: self.start().y,
        })?;
        Ok(c * y + d)
    }

    /// The sub-segment spanning `x_range` or `y_range`.
    ///
    /// Exactly one range must be given.
    pub fn interval(
        &self,
        x_range: Option<(f64, f64)>,
        y_range: Option<(f64, f64)>,
    ) -> Result<Line> {
        let (start, end) = match (x_range, y_range) {
            (Some((x0, x1)), None) => (
                Point::new(x0, self.y_at(x0)?),
                Point::new(x1, self.y_at(x1)?),
            ),
            (None, Some((y0, y1))) => (
                Point::new(self.x_at(y0)?, y0),
                Point::new(self.x_at(y1)?, y1),
            ),
            (Some(_), Some(_)) => {
                return Err(SketchError::invalid(
                    "line interval",
                    "give either an x range or a y range, not both",
                ));
            }
            (None, None) => {
                return Err(SketchError::invalid(
                    "line interval",
                    "an x range or a y range is required",
                ));
            }
        };
        Line::with_style(start, end, self.curve.style)
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Line) -> bool {
        self.curve == other.curve
    }
}

impl Shape for Line {
    fn curve(&self) -> &Curve {
        &self.curve
    }
}

impl Transform for Line {
    type Output = Line;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Line {
        Line::from_curve(self.curve.rotate(angle, center))
    }

    fn translate(&self, vec: Point) -> Line {
        Line::from_curve(self.curve.translate(vec))
    }

    fn scale(&self, factor: f64) -> Result<Line> {
        check_scale(factor, "line")?;
        Ok(Line::from_curve(self.curve.scale(factor)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Stylable;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn coincident_endpoints_are_rejected() {
        assert!(matches!(
            Line::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0)),
            Err(SketchError::InvalidConstruction { shape: "line", .. })
        ));
        // within tolerance still counts as coincident
        assert!(Line::new(Point::new(1.0, 1.0), Point::new(1.00001, 1.0)).is_err());
    }

    #[test]
    fn solves_for_either_coordinate() {
        let line = Line::new(Point::new(0.0, 1.0), Point::new(2.0, 5.0)).unwrap();
        assert!((line.y_at(1.0).unwrap() - 3.0).abs() < 1e-12);
        assert!((line.x_at(3.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn vertical_line_has_no_y_of_x() {
        let line = Line::new(Point::new(1.0, 0.0), Point::new(1.0, 3.0)).unwrap();
        assert!(line.is_vertical());
        assert!(matches!(line.y_at(1.0), Err(SketchError::DomainRange { .. })));
        assert!((line.x_at(2.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn horizontal_line_has_no_x_of_y() {
        let line = Line::new(Point::new(0.0, 2.0), Point::new(3.0, 2.0)).unwrap();
        assert!(line.is_horizontal());
        assert!(matches!(line.x_at(2.0), Err(SketchError::DomainRange { .. })));
        assert!((line.y_at(10.0).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn interval_clips_by_x_or_y() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(4.0, 2.0)).unwrap();
        let sub = line.interval(Some((1.0, 2.0)), None).unwrap();
        assert_eq!(sub.start(), Point::new(1.0, 0.5));
        assert_eq!(sub.end(), Point::new(2.0, 1.0));

        let sub = line.interval(None, Some((0.5, 1.5))).unwrap();
        assert_eq!(sub.start(), Point::new(1.0, 0.5));
        assert_eq!(sub.end(), Point::new(3.0, 1.5));
    }

    #[test]
    fn interval_needs_exactly_one_range() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(4.0, 2.0)).unwrap();
        assert!(line.interval(Some((0.0, 1.0)), Some((0.0, 1.0))).is_err());
        assert!(line.interval(None, None).is_err());
    }

    #[test]
    fn rotation_recomputes_forms() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)).unwrap();
        let turned = line.rotate(FRAC_PI_2, Point::ORIGIN);
        assert!(turned.is_vertical());
        assert_eq!(turned.end(), Point::new(0.0, 1.0));

        let back = turned.rotate(-FRAC_PI_2, Point::ORIGIN);
        assert_eq!(back, line);
    }

    #[test]
    fn arrow_sets_end_head() {
        let arrow = Line::arrow(Point::ORIGIN, Point::UNIT_X).unwrap();
        assert_eq!(arrow.style().arrow, Some(ArrowStyle::End));
    }

    #[test]
    fn scale_to_zero_fails() {
        let line = Line::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0)).unwrap();
        assert!(line.scale(0.0).is_err());
        assert_eq!(line.scale(2.0).unwrap().end(), Point::new(4.0, 4.0));
    }
}

use crate::errors::{Result, SketchError};
use crate::style::{Stylable, Style, StyleUpdate};
use crate::types::{Angle, Point};

use super::{Shape, Transform, check_scale};

/// An open or closed polyline: the common representation of every
/// curve-like shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub(crate) points: Vec<Point>,
    pub(crate) style: Style,
}

impl Curve {
    /// Build a curve from at least one point
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.is_empty() {
            return Err(SketchError::invalid("curve", "a curve needs at least one point"));
        }
        Ok(Curve {
            points,
            style: Style::default(),
        })
    }

    /// Build from parallel coordinate arrays
    pub fn from_coordinate_lists(xs: &[f64], ys: &[f64]) -> Result<Self> {
        Curve::new(Point::from_coordinate_lists(xs, ys)?)
    }

    /// Callers guarantee `points` is non-empty.
    pub(crate) fn from_parts(points: Vec<Point>, style: Style) -> Self {
        debug_assert!(!points.is_empty());
        Curve { points, style }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Whether the last point returns to the first
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.start() == self.end()
    }

    /// Total length along the polyline
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].dist(w[1])).sum()
    }

    pub fn to_coordinate_lists(&self) -> (Vec<f64>, Vec<f64>) {
        Point::to_coordinate_lists(&self.points)
    }

    /// Same style, every point passed through `f`
    pub(crate) fn map_points(&self, f: impl Fn(Point) -> Point) -> Curve {
        Curve::from_parts(self.points.iter().map(|&p| f(p)).collect(), self.style)
    }
}

impl Shape for Curve {
    fn curve(&self) -> &Curve {
        self
    }
}

impl Stylable for Curve {
    fn style(&self) -> Style {
        self.style
    }

    fn apply_style(&mut self, update: StyleUpdate) {
        self.style.apply(update);
    }
}

impl Transform for Curve {
    type Output = Curve;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Curve {
        let angle = angle.into();
        self.map_points(|p| p.rotate(angle, center))
    }

    fn translate(&self, vec: Point) -> Curve {
        self.map_points(|p| p + vec)
    }

    fn scale(&self, factor: f64) -> Result<Curve> {
        check_scale(factor, "curve")?;
        Ok(self.map_points(|p| p * factor))
    }
}

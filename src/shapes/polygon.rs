use crate::errors::{Result, SketchError};
use crate::style::Style;
use crate::types::{Angle, Point};

use super::{Curve, Shape, Transform, check_scale};

/// An axis-aligned rectangle at construction, closed counter-clockwise
/// from its lower-left corner.
///
/// Corner and midpoint accessors read the current points, so they follow
/// the rectangle through rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) curve: Curve,
}

impl Rectangle {
    pub fn new(lower_left: Point, width: f64, height: f64) -> Result<Self> {
        for (name, value) in [("width", width), ("height", height)] {
            if value == 0.0 || !value.is_finite() {
                return Err(SketchError::invalid(
                    "rectangle",
                    format!("{name} must be non-zero and finite, got {value}"),
                ));
            }
        }
        let Point { x, y } = lower_left;
        let points = vec![
            lower_left,
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
            lower_left,
        ];
        Ok(Rectangle {
            curve: Curve::from_parts(points, Style::default()),
        })
    }

    pub fn lower_left(&self) -> Point {
        self.curve.points[0]
    }

    pub fn lower_right(&self) -> Point {
        self.curve.points[1]
    }

    pub fn upper_right(&self) -> Point {
        self.curve.points[2]
    }

    pub fn upper_left(&self) -> Point {
        self.curve.points[3]
    }

    pub fn width(&self) -> f64 {
        self.lower_left().dist(self.lower_right())
    }

    pub fn height(&self) -> f64 {
        self.lower_left().dist(self.upper_left())
    }

    pub fn center(&self) -> Point {
        self.lower_left().midpoint(self.upper_right())
    }

    pub fn lower_mid(&self) -> Point {
        self.lower_left().midpoint(self.lower_right())
    }

    pub fn upper_mid(&self) -> Point {
        self.upper_left().midpoint(self.upper_right())
    }

    pub fn left_mid(&self) -> Point {
        self.lower_left().midpoint(self.upper_left())
    }

    pub fn right_mid(&self) -> Point {
        self.lower_right().midpoint(self.upper_right())
    }
}

impl Shape for Rectangle {
    fn curve(&self) -> &Curve {
        &self.curve
    }
}

impl Transform for Rectangle {
    type Output = Rectangle;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Rectangle {
        Rectangle {
            curve: self.curve.rotate(angle, center),
        }
    }

    fn translate(&self, vec: Point) -> Rectangle {
        Rectangle {
            curve: self.curve.translate(vec),
        }
    }

    fn scale(&self, factor: f64) -> Result<Rectangle> {
        check_scale(factor, "rectangle")?;
        Ok(Rectangle {
            curve: self.curve.scale(factor)?,
        })
    }
}

/// A closed three-vertex polyline
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub(crate) curve: Curve,
}

impl Triangle {
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        Triangle {
            curve: Curve::from_parts(vec![p1, p2, p3, p1], Style::default()),
        }
    }

    pub fn p1(&self) -> Point {
        self.curve.points[0]
    }

    pub fn p2(&self) -> Point {
        self.curve.points[1]
    }

    pub fn p3(&self) -> Point {
        self.curve.points[2]
    }
}

impl Shape for Triangle {
    fn curve(&self) -> &Curve {
        &self.curve
    }
}

impl Transform for Triangle {
    type Output = Triangle;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Triangle {
        Triangle {
            curve: self.curve.rotate(angle, center),
        }
    }

    fn translate(&self, vec: Point) -> Triangle {
        Triangle {
            curve: self.curve.translate(vec),
        }
    }

    fn scale(&self, factor: f64) -> Result<Triangle> {
        Ok(Triangle {
            curve: self.curve.scale(factor)?,
        })
    }
}

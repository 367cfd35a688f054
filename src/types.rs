//! Value types for sketch geometry: [`Point`] and [`Angle`].
//!
//! Both are `Copy` and every operation returns a new value. Vector math
//! goes through `glam::DVec2` where it saves writing the formulas by hand.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::{DVec2, dvec2};

use crate::errors::{Result, SketchError};

/// Absolute per-axis tolerance used by `Point` equality
pub const TOLERANCE: f64 = 1e-4;

/// Below this magnitude a vector has no usable direction
const DEGENERATE_NORM: f64 = 1e-12;

/// Slack allowed when matching an angle against a quarter turn
const QUARTER_TURN_EPS: f64 = 1e-12;

/// A position or displacement in the sketch plane.
///
/// Equality is tolerant: two points compare equal when both coordinate
/// deltas are below [`TOLERANCE`]. This is what geometry code wants when
/// checking for coincident endpoints, but it is not transitive, so points
/// must not be used as hash keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };
    pub const UNIT_X: Point = Point { x: 1.0, y: 0.0 };
    pub const UNIT_Y: Point = Point { x: 0.0, y: 1.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean norm
    pub fn abs(self) -> f64 {
        self.to_dvec2().length()
    }

    /// Distance to another point
    pub fn dist(self, other: Point) -> f64 {
        (other - self).abs()
    }

    pub fn midpoint(self, other: Point) -> Point {
        (self + other) * 0.5
    }

    /// The vector scaled to length one.
    ///
    /// Fails with [`SketchError::DegenerateVector`] when the magnitude is
    /// too close to zero to divide by.
    pub fn unit_vector(self) -> Result<Point> {
        let len = self.abs();
        if len < DEGENERATE_NORM {
            return Err(SketchError::DegenerateVector {
                x: self.x,
                y: self.y,
            });
        }
        Ok(self / len)
    }

    /// Direction of the vector measured from the positive x axis
    pub fn angle(self) -> Angle {
        Angle::new(self.y.atan2(self.x))
    }

    /// Unit vector perpendicular to this one, turned +90°
    pub fn normal(self) -> Result<Point> {
        let unit = self.unit_vector()?;
        Ok(Point::new(-unit.y, unit.x))
    }

    /// Rotate about `center`.
    ///
    /// Quarter and half turns are computed by swapping coordinates, so
    /// axis-aligned geometry stays exactly axis-aligned.
    pub fn rotate(self, angle: impl Into<Angle>, center: Point) -> Point {
        let angle = angle.into();
        let rel = self - center;
        let turned = match angle.quarter_turns() {
            Some(0) => rel,
            Some(1) => Point::new(-rel.y, rel.x),
            Some(2) => -rel,
            Some(3) => Point::new(rel.y, -rel.x),
            _ => DVec2::from_angle(angle.radians())
                .rotate(rel.to_dvec2())
                .into(),
        };
        center + turned
    }

    /// Scale both coordinates about the origin
    pub fn scale(self, factor: f64) -> Point {
        self * factor
    }

    pub fn translate(self, vec: Point) -> Point {
        self + vec
    }

    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Zip parallel coordinate arrays into points
    pub fn from_coordinate_lists(xs: &[f64], ys: &[f64]) -> Result<Vec<Point>> {
        if xs.len() != ys.len() {
            return Err(SketchError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        Ok(xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect())
    }

    /// Split points into parallel coordinate arrays
    pub fn to_coordinate_lists(points: &[Point]) -> (Vec<f64>, Vec<f64>) {
        points.iter().map(|p| (p.x, p.y)).unzip()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < TOLERANCE && (self.y - other.y).abs() < TOLERANCE
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;
    fn mul(self, rhs: Point) -> Point {
        rhs * self
    }
}

impl Div<f64> for Point {
    type Output = Point;
    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// An angle in radians, always normalized into (-π, π].
///
/// Every arithmetic operator re-normalizes, so angle arithmetic never
/// leaves the range.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    pub const QUARTER: Angle = Angle(FRAC_PI_2);
    pub const HALF: Angle = Angle(PI);

    pub fn new(radians: f64) -> Self {
        Angle(normalize(radians))
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Angle::new(degrees.to_radians())
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    pub fn to_degrees(self) -> f64 {
        self.0.to_degrees()
    }

    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// Number of counter-clockwise quarter turns (0..=3) when the angle is
    /// one, `None` otherwise.
    fn quarter_turns(self) -> Option<u8> {
        let v = self.0;
        if v.abs() < QUARTER_TURN_EPS {
            Some(0)
        } else if (v - FRAC_PI_2).abs() < QUARTER_TURN_EPS {
            Some(1)
        } else if (v.abs() - PI).abs() < QUARTER_TURN_EPS {
            Some(2)
        } else if (v + FRAC_PI_2).abs() < QUARTER_TURN_EPS {
            Some(3)
        } else {
            None
        }
    }
}

/// Fold `v` into (-π, π].
///
/// The truncated remainder removes whole turns in one step; a single
/// multiply-and-subtract can land just outside the range because of
/// rounding at the boundary, so the result is then nudged by single turns.
/// NaN and infinities come out as NaN.
fn normalize(v: f64) -> f64 {
    let mut v = v % TAU;
    while v > PI {
        v -= TAU;
    }
    while v <= -PI {
        v += TAU;
    }
    v
}

impl From<f64> for Angle {
    fn from(radians: f64) -> Self {
        Angle::new(radians)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> f64 {
        angle.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle::new(self.0 + rhs.0)
    }
}

impl Add<f64> for Angle {
    type Output = Angle;
    fn add(self, rhs: f64) -> Angle {
        Angle::new(self.0 + rhs)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle::new(self.0 - rhs.0)
    }
}

impl Sub<f64> for Angle {
    type Output = Angle;
    fn sub(self, rhs: f64) -> Angle {
        Angle::new(self.0 - rhs)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f64) -> Angle {
        Angle::new(self.0 * rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;
    fn div(self, rhs: f64) -> Angle {
        Angle::new(self.0 / rhs)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle::new(-self.0)
    }
}

use std::f64::consts::{PI, TAU};

use crate::errors::{Result, SketchError};
use crate::style::Style;
use crate::types::{Angle, Point};

use super::{Curve, Shape, Transform, check_scale};

/// A circular arc sampled as a polyline.
///
/// The arc starts at `start_angle` and sweeps `arc_angle` radians
/// (counter-clockwise when positive). The sweep is a plain `f64` rather
/// than an [`Angle`] because a full turn must stay representable.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub(crate) curve: Curve,
    center: Point,
    radius: f64,
    start_angle: Angle,
    arc_angle: f64,
    resolution: usize,
}

impl Arc {
    /// Number of segments used when none is given
    pub const DEFAULT_RESOLUTION: usize = 180;

    pub fn new(
        center: Point,
        radius: f64,
        start_angle: impl Into<Angle>,
        arc_angle: f64,
    ) -> Result<Self> {
        Arc::with_resolution(center, radius, start_angle, arc_angle, Arc::DEFAULT_RESOLUTION)
    }

    /// Sample the arc with `resolution` segments (`resolution + 1` points)
    pub fn with_resolution(
        center: Point,
        radius: f64,
        start_angle: impl Into<Angle>,
        arc_angle: f64,
        resolution: usize,
    ) -> Result<Self> {
        Arc::build(
            center,
            radius,
            start_angle.into(),
            arc_angle,
            resolution,
            Style::default(),
        )
    }

    fn build(
        center: Point,
        radius: f64,
        start_angle: Angle,
        arc_angle: f64,
        resolution: usize,
        style: Style,
    ) -> Result<Self> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(SketchError::invalid(
                "arc",
                format!("radius must be positive, got {radius}"),
            ));
        }
        if arc_angle == 0.0 || !arc_angle.is_finite() {
            return Err(SketchError::invalid(
                "arc",
                format!("arc angle must be non-zero, got {arc_angle}"),
            ));
        }
        if resolution == 0 {
            return Err(SketchError::invalid("arc", "resolution must be at least 1"));
        }

        let step = arc_angle / resolution as f64;
        let points = (0..=resolution)
            .map(|i| polar(center, radius, start_angle.radians() + step * i as f64))
            .collect();

        Ok(Arc {
            curve: Curve::from_parts(points, style),
            center,
            radius,
            start_angle,
            arc_angle,
            resolution,
        })
    }

    /// Same arc with the geometry replaced. Parameters were already valid,
    /// and rotation and translation keep them valid.
    fn rebuilt(&self, center: Point, radius: f64, start_angle: Angle) -> Result<Arc> {
        Arc::build(
            center,
            radius,
            start_angle,
            self.arc_angle,
            self.resolution,
            self.curve.style,
        )
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn start_angle(&self) -> Angle {
        self.start_angle
    }

    pub fn arc_angle(&self) -> f64 {
        self.arc_angle
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn start_point(&self) -> Point {
        self.curve.start()
    }

    pub fn end_point(&self) -> Point {
        self.curve.end()
    }

    /// The point `theta` radians past the start of the arc.
    ///
    /// Fails when `theta` runs past the end of the sweep.
    pub fn point_at(&self, theta: f64) -> Result<Point> {
        if theta > self.arc_angle {
            return Err(SketchError::DomainRange {
                what: "arc point",
                value: theta,
                limit: self.arc_angle,
            });
        }
        Ok(polar(self.center, self.radius, self.start_angle.radians() + theta))
    }
}

fn polar(center: Point, radius: f64, theta: f64) -> Point {
    center + Point::new(theta.cos(), theta.sin()) * radius
}

impl Shape for Arc {
    fn curve(&self) -> &Curve {
        &self.curve
    }
}

impl Transform for Arc {
    type Output = Arc;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Arc {
        let angle = angle.into();
        let mut arc = self.clone();
        arc.center = self.center.rotate(angle, center);
        arc.start_angle = self.start_angle + angle;
        arc.curve = self.curve.rotate(angle, center);
        arc
    }

    fn translate(&self, vec: Point) -> Arc {
        let mut arc = self.clone();
        arc.center = self.center + vec;
        arc.curve = self.curve.translate(vec);
        arc
    }

    fn scale(&self, factor: f64) -> Result<Arc> {
        check_scale(factor, "arc")?;
        // a negative factor is a point reflection: half a turn further on
        let start_angle = if factor < 0.0 {
            self.start_angle + PI
        } else {
            self.start_angle
        };
        self.rebuilt(self.center * factor, self.radius * factor.abs(), start_angle)
    }
}

/// A full circle: an [`Arc`] sweeping 2π from angle zero
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub(crate) arc: Arc,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        Circle::with_resolution(center, radius, Arc::DEFAULT_RESOLUTION)
    }

    pub fn with_resolution(center: Point, radius: f64, resolution: usize) -> Result<Self> {
        Ok(Circle {
            arc: Arc::with_resolution(center, radius, Angle::ZERO, TAU, resolution)?,
        })
    }

    pub fn center(&self) -> Point {
        self.arc.center()
    }

    pub fn radius(&self) -> f64 {
        self.arc.radius()
    }

    /// The point `theta` radians counter-clockwise from the circle's start
    pub fn point_at(&self, theta: f64) -> Result<Point> {
        self.arc.point_at(theta)
    }

    pub fn as_arc(&self) -> &Arc {
        &self.arc
    }
}

impl Shape for Circle {
    fn curve(&self) -> &Curve {
        &self.arc.curve
    }
}

impl Transform for Circle {
    type Output = Circle;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Circle {
        Circle {
            arc: self.arc.rotate(angle, center),
        }
    }

    fn translate(&self, vec: Point) -> Circle {
        Circle {
            arc: self.arc.translate(vec),
        }
    }

    fn scale(&self, factor: f64) -> Result<Circle> {
        Ok(Circle {
            arc: self.arc.scale(factor)?,
        })
    }
}

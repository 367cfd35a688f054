use crate::errors::{Result, SketchError};
use crate::style::{FillPattern, Style, StyleUpdate};
use crate::types::{Angle, Point};

use super::{Curve, Shape, Transform, check_scale};

/// A thick, hatched band along a polyline.
///
/// The outline is the path itself, then the path displaced by `thickness`
/// to its left and walked backwards, then the first point again.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub(crate) curve: Curve,
    thickness: f64,
}

impl Wall {
    pub fn new(points: Vec<Point>, thickness: f64) -> Result<Self> {
        if points.len() < 2 {
            return Err(SketchError::invalid("wall", "at least two points are required"));
        }
        if thickness == 0.0 || !thickness.is_finite() {
            return Err(SketchError::invalid(
                "wall",
                format!("thickness must be non-zero and finite, got {thickness}"),
            ));
        }

        let last = points.len() - 1;
        let mut displaced = Vec::with_capacity(points.len());
        for i in 0..=last {
            let tangent = points[(i + 1).min(last)] - points[i.saturating_sub(1)];
            displaced.push(points[i] + tangent.normal()? * thickness);
        }

        let first = points[0];
        let mut outline = points;
        outline.extend(displaced.into_iter().rev());
        outline.push(first);

        let style = Style::default().with(StyleUpdate::FillPattern(Some(FillPattern::Cross)));
        Ok(Wall {
            curve: Curve::from_parts(outline, style),
            thickness,
        })
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// The path the wall was built along
    pub fn path(&self) -> &[Point] {
        let n = (self.curve.points.len() - 1) / 2;
        &self.curve.points[..n]
    }
}

impl Shape for Wall {
    fn curve(&self) -> &Curve {
        &self.curve
    }
}

impl Transform for Wall {
    type Output = Wall;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Wall {
        Wall {
            curve: self.curve.rotate(angle, center),
            thickness: self.thickness,
        }
    }

    fn translate(&self, vec: Point) -> Wall {
        Wall {
            curve: self.curve.translate(vec),
            thickness: self.thickness,
        }
    }

    fn scale(&self, factor: f64) -> Result<Wall> {
        check_scale(factor, "wall")?;
        Ok(Wall {
            curve: self.curve.scale(factor)?,
            thickness: self.thickness * factor,
        })
    }
}

use crate::errors::{Result, SketchError};
use crate::style::{Stylable, Style, StyleUpdate, TextStyle};
use crate::types::{Angle, Point};

use super::Transform;

/// A text label anchored at `position` and running along `direction`
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    text: String,
    position: Point,
    direction: Point,
    pub(crate) style: TextStyle,
}

impl Text {
    pub fn new(text: impl Into<String>, position: Point) -> Self {
        Text {
            text: text.into(),
            position,
            direction: Point::UNIT_X,
            style: TextStyle::default(),
        }
    }

    /// Run the text along `direction`; only its angle matters.
    pub fn with_direction(mut self, direction: Point) -> Result<Self> {
        self.direction = direction.unit_vector()?;
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> Point {
        self.direction
    }

    /// Baseline angle, measured from the positive x axis
    pub fn angle(&self) -> Angle {
        self.direction.angle()
    }

    pub fn text_style(&self) -> &TextStyle {
        &self.style
    }
}

impl Stylable for Text {
    fn style(&self) -> Style {
        self.style.style
    }

    fn apply_style(&mut self, update: StyleUpdate) {
        self.style.apply(update);
    }
}

impl Transform for Text {
    type Output = Text;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Text {
        let angle = angle.into();
        Text {
            position: self.position.rotate(angle, center),
            direction: self.direction.rotate(angle, Point::ORIGIN),
            ..self.clone()
        }
    }

    /// Moves the anchor; direction and style are kept.
    fn translate(&self, vec: Point) -> Text {
        Text {
            position: self.position + vec,
            ..self.clone()
        }
    }

    /// Glyph size is not geometry, so text cannot be scaled.
    fn scale(&self, _factor: f64) -> Result<Text> {
        Err(SketchError::unsupported("scale", "text"))
    }
}

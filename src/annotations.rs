//! Dimension lines, labelled arrows and other annotation composites
//!
//! Every annotation is a small parameter struct implementing [`Composite`]:
//! construct it with the required geometry, adjust optional settings with
//! the builder methods, then call [`Composite::build`].

use crate::composition::{Composite, Composition};
use crate::errors::{Result, SketchError};
use crate::shapes::{Arc, Line, Text};
use crate::style::{ArrowStyle, Style, StyleExt, StyleUpdate, TextAlignment};
use crate::types::{Angle, Point};

/// Default gap between an annotated feature and its label, in sketch units
pub const DEFAULT_SPACING: f64 = 1.0 / 6.0;

/// Which end of an annotation its text is attached to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextPosition {
    Start,
    #[default]
    Middle,
    End,
}

impl TextPosition {
    /// The opposite end; `Middle` stays put
    pub fn swapped(self) -> Self {
        match self {
            TextPosition::Start => TextPosition::End,
            TextPosition::Middle => TextPosition::Middle,
            TextPosition::End => TextPosition::Start,
        }
    }
}

fn double_arrow(start: Point, end: Point) -> Result<Line> {
    Line::with_style(
        start,
        end,
        Style::default().with(StyleUpdate::Arrow(Some(ArrowStyle::Double))),
    )
}

/// An arrow pointing from a label to a feature
#[derive(Clone, Debug)]
pub struct ArrowWithText {
    text: String,
    text_position: Point,
    arrow_tip: Point,
    alignment: TextAlignment,
}

impl ArrowWithText {
    pub fn new(text: impl Into<String>, text_position: Point, arrow_tip: Point) -> Self {
        ArrowWithText {
            text: text.into(),
            text_position,
            arrow_tip,
            alignment: TextAlignment::Center,
        }
    }

    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Composite for ArrowWithText {
    fn build(&self) -> Result<Composition> {
        Ok(Composition::new()
            .add("arrow", Line::arrow(self.text_position, self.arrow_tip)?)
            .add(
                "text",
                Text::new(&self.text, self.text_position).with_alignment(self.alignment),
            ))
    }
}

/// A double-headed arrow between two points with a label beside it.
///
/// Mostly vertical arrows point up with the label to their right; other
/// arrows run right to left with the label above.
#[derive(Clone, Debug)]
pub struct DistanceWithText {
    text: String,
    start: Point,
    end: Point,
    spacing: f64,
    text_position: TextPosition,
    alignment: TextAlignment,
}

impl DistanceWithText {
    pub fn new(text: impl Into<String>, start: Point, end: Point) -> Self {
        DistanceWithText {
            text: text.into(),
            start,
            end,
            spacing: DEFAULT_SPACING,
            text_position: TextPosition::Middle,
            alignment: TextAlignment::Center,
        }
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn text_position(mut self, position: TextPosition) -> Self {
        self.text_position = position;
        self
    }

    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Endpoints, text position and alignment after orientation is settled
    fn oriented(&self) -> (Point, Point, TextPosition, TextAlignment) {
        let (mut start, mut end) = (self.start, self.end);
        let mut text_position = self.text_position;
        let mut alignment = self.alignment;

        let d = end - start;
        let vertical = d.x.abs() < 2.0 * d.y.abs();
        let swap = if vertical {
            if alignment == TextAlignment::Center {
                alignment = TextAlignment::Left;
            }
            end.y < start.y
        } else {
            start.x < end.x
        };
        if swap {
            std::mem::swap(&mut start, &mut end);
            text_position = text_position.swapped();
        }
        (start, end, text_position, alignment)
    }
}

impl Composite for DistanceWithText {
    fn build(&self) -> Result<Composition> {
        let (start, end, text_position, alignment) = self.oriented();
        let arrow = double_arrow(start, end)?;

        let d = end - start;
        let normal = Point::new(d.y, -d.x).unit_vector()?;
        let anchor = match text_position {
            TextPosition::Start => start,
            TextPosition::Middle => start.midpoint(end),
            TextPosition::End => end,
        };
        let label = Text::new(&self.text, anchor + normal * self.spacing).with_alignment(alignment);

        Ok(Composition::new().add("arrow", arrow).add("text", label))
    }
}

/// A dimension line offset from the measured segment, with extension
/// lines back to the segment's ends.
#[derive(Clone, Debug)]
pub struct LinearDimension {
    text: String,
    start: Point,
    end: Point,
    offset: f64,
    spacing: f64,
    text_position: TextPosition,
}

impl LinearDimension {
    /// `offset` is the signed distance of the dimension line, measured to
    /// the left of the `start -> end` direction.
    pub fn new(text: impl Into<String>, start: Point, end: Point, offset: f64) -> Self {
        LinearDimension {
            text: text.into(),
            start,
            end,
            offset,
            spacing: DEFAULT_SPACING,
            text_position: TextPosition::Middle,
        }
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn text_position(mut self, position: TextPosition) -> Self {
        self.text_position = position;
        self
    }
}

impl Composite for LinearDimension {
    fn build(&self) -> Result<Composition> {
        if self.offset == 0.0 || !self.offset.is_finite() {
            return Err(SketchError::invalid(
                "linear dimension",
                format!("offset must be non-zero and finite, got {}", self.offset),
            ));
        }
        let shift = (self.end - self.start).normal()? * self.offset;
        let (start, end) = (self.start + shift, self.end + shift);

        let dimension = DistanceWithText::new(&self.text, start, end)
            .spacing(self.spacing)
            .text_position(self.text_position)
            .build()?;

        Ok(Composition::new()
            .add("start_line", Line::new(self.start, start)?)
            .add("end_line", Line::new(self.end, end)?)
            .add("dimension", dimension))
    }
}

/// A double-headed arc measuring the angle between two rays from `center`
#[derive(Clone, Debug)]
pub struct AngularDimension {
    text: String,
    center: Point,
    start: Point,
    end: Point,
    radius: Option<f64>,
    spacing: f64,
    text_position: TextPosition,
}

impl AngularDimension {
    pub fn new(text: impl Into<String>, center: Point, start: Point, end: Point) -> Self {
        AngularDimension {
            text: text.into(),
            center,
            start,
            end,
            radius: None,
            spacing: DEFAULT_SPACING,
            text_position: TextPosition::Middle,
        }
    }

    /// Arc radius; defaults to the distance from `center` to `start`
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn text_position(mut self, position: TextPosition) -> Self {
        self.text_position = position;
        self
    }
}

impl Composite for AngularDimension {
    fn build(&self) -> Result<Composition> {
        let radius = self.radius.unwrap_or_else(|| self.start.dist(self.center));
        let mut from = (self.start - self.center).angle();
        let mut sweep = ((self.end - self.center).angle() - from).radians();
        let mut text_position = self.text_position;
        if sweep < 0.0 {
            from = from + sweep;
            sweep = -sweep;
            text_position = text_position.swapped();
        }

        let arc = Arc::new(self.center, radius, from, sweep)?
            .with_arrow(Some(ArrowStyle::Double));

        let at = match text_position {
            TextPosition::Start => from,
            TextPosition::Middle => from + sweep / 2.0,
            TextPosition::End => from + sweep,
        };
        let direction = Point::new(at.cos(), at.sin());
        let label = Text::new(&self.text, self.center + direction * (radius + self.spacing));

        Ok(Composition::new().add("arc", arc).add("text", label))
    }
}

/// An arrow from a circle's center to its rim, labelled at its midpoint
#[derive(Clone, Debug)]
pub struct RadialDimension {
    text: String,
    center: Point,
    radius: f64,
    angle: Angle,
    spacing: f64,
}

impl RadialDimension {
    pub fn new(
        text: impl Into<String>,
        center: Point,
        radius: f64,
        angle: impl Into<Angle>,
    ) -> Self {
        RadialDimension {
            text: text.into(),
            center,
            radius,
            angle: angle.into(),
            spacing: DEFAULT_SPACING,
        }
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }
}

impl Composite for RadialDimension {
    fn build(&self) -> Result<Composition> {
        if !(self.radius > 0.0) {
            return Err(SketchError::invalid(
                "radial dimension",
                format!("radius must be positive, got {}", self.radius),
            ));
        }
        let direction = Point::new(self.angle.cos(), self.angle.sin());
        let tip = self.center + direction * self.radius;
        let arrow = Line::arrow(self.center, tip)?;
        let beside = self.center.midpoint(tip) + direction.normal()? * self.spacing;

        Ok(Composition::new()
            .add("arrow", arrow)
            .add("text", Text::new(&self.text, beside)))
    }
}

/// A force arrow with its label behind the tail
#[derive(Clone, Debug)]
pub struct Force {
    text: String,
    start: Point,
    end: Point,
    spacing: f64,
}

impl Force {
    pub fn new(text: impl Into<String>, start: Point, end: Point) -> Self {
        Force {
            text: text.into(),
            start,
            end,
            spacing: DEFAULT_SPACING,
        }
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }
}

impl Composite for Force {
    fn build(&self) -> Result<Composition> {
        let arrow = Line::arrow(self.start, self.end)?;
        let back = (self.start - self.end).unit_vector()?;
        let label = Text::new(&self.text, self.start + back * self.spacing);
        Ok(Composition::new().add("arrow", arrow).add("text", label))
    }
}

/// A coordinate axis: an arrow with its label past the tip
#[derive(Clone, Debug)]
pub struct Axis {
    start: Point,
    length: f64,
    label: String,
    angle: Angle,
    spacing: f64,
}

impl Axis {
    pub fn new(
        start: Point,
        length: f64,
        label: impl Into<String>,
        angle: impl Into<Angle>,
    ) -> Self {
        Axis {
            start,
            length,
            label: label.into(),
            angle: angle.into(),
            spacing: DEFAULT_SPACING,
        }
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }
}

impl Composite for Axis {
    fn build(&self) -> Result<Composition> {
        let direction = Point::new(self.angle.cos(), self.angle.sin());
        let tip = self.start + direction * self.length;
        Ok(Composition::new()
            .add("arrow", Line::arrow(self.start, tip)?)
            .add("label", Text::new(&self.label, tip + direction * self.spacing)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Drawable;
    use crate::style::Stylable;
    use std::f64::consts::FRAC_PI_2;

    fn text_of(comp: &Composition, key: &str) -> Text {
        match comp.get(key).unwrap() {
            Drawable::Text(t) => t.clone(),
            other => panic!("{key} is a {}", other.kind()),
        }
    }

    fn line_of(comp: &Composition, key: &str) -> Line {
        match comp.get(key).unwrap() {
            Drawable::Line(l) => l.clone(),
            other => panic!("{key} is a {}", other.kind()),
        }
    }

    #[test]
    fn horizontal_distance_runs_right_to_left() {
        let comp = DistanceWithText::new("L", Point::new(0.0, 0.0), Point::new(3.0, 0.0))
            .text_position(TextPosition::Start)
            .build()
            .unwrap();
        let arrow = line_of(&comp, "arrow");
        assert_eq!(arrow.start(), Point::new(3.0, 0.0));
        assert_eq!(arrow.style().arrow, Some(ArrowStyle::Double));

        // Start swapped to End, which is now the left point; label above it
        let label = text_of(&comp, "text");
        assert_eq!(label.position(), Point::new(0.0, DEFAULT_SPACING));
        assert_eq!(label.text_style().alignment, TextAlignment::Center);
    }

    #[test]
    fn vertical_distance_points_up_with_left_aligned_label() {
        let comp = DistanceWithText::new("h", Point::new(1.0, 2.0), Point::new(1.0, 0.0))
            .spacing(0.5)
            .build()
            .unwrap();
        let arrow = line_of(&comp, "arrow");
        assert_eq!(arrow.start(), Point::new(1.0, 0.0));
        assert_eq!(arrow.end(), Point::new(1.0, 2.0));

        let label = text_of(&comp, "text");
        assert_eq!(label.position(), Point::new(1.5, 1.0));
        assert_eq!(label.text_style().alignment, TextAlignment::Left);
    }

    #[test]
    fn dx_twice_dy_counts_as_horizontal() {
        let comp = DistanceWithText::new("d", Point::new(0.0, 0.0), Point::new(2.0, 1.0))
            .text_position(TextPosition::Start)
            .build()
            .unwrap();
        // swapped to run right to left
        let arrow = line_of(&comp, "arrow");
        assert_eq!(arrow.start(), Point::new(2.0, 1.0));
        assert_eq!(arrow.end(), Point::new(0.0, 0.0));

        // Start became End: anchored on the left point, alignment untouched
        let label = text_of(&comp, "text");
        let normal = Point::new(-1.0, 2.0).unit_vector().unwrap();
        assert_eq!(label.position(), normal * DEFAULT_SPACING);
        assert_eq!(label.text_style().alignment, TextAlignment::Center);
    }

    #[test]
    fn dx_just_under_twice_dy_counts_as_vertical() {
        let comp = DistanceWithText::new("d", Point::new(0.0, 1.0), Point::new(1.9, 0.0))
            .text_position(TextPosition::Start)
            .build()
            .unwrap();
        // swapped to point up
        let arrow = line_of(&comp, "arrow");
        assert_eq!(arrow.start(), Point::new(1.9, 0.0));
        assert_eq!(arrow.end(), Point::new(0.0, 1.0));

        let label = text_of(&comp, "text");
        let normal = Point::new(1.0, 1.9).unit_vector().unwrap();
        assert_eq!(label.position(), Point::new(0.0, 1.0) + normal * DEFAULT_SPACING);
        assert_eq!(label.text_style().alignment, TextAlignment::Left);

        // no swap when it already points up; Start stays on the start point
        let comp = DistanceWithText::new("d", Point::new(1.9, 0.0), Point::new(0.0, 1.0))
            .text_position(TextPosition::Start)
            .alignment(TextAlignment::Right)
            .build()
            .unwrap();
        assert_eq!(line_of(&comp, "arrow").start(), Point::new(1.9, 0.0));
        let label = text_of(&comp, "text");
        assert_eq!(label.position(), Point::new(1.9, 0.0) + normal * DEFAULT_SPACING);
        assert_eq!(label.text_style().alignment, TextAlignment::Right);
    }

    #[test]
    fn linear_dimension_offsets_its_arrow() {
        let comp = LinearDimension::new("w", Point::new(0.0, 0.0), Point::new(0.0, 4.0), -1.0)
            .build()
            .unwrap();
        assert_eq!(comp.keys().collect::<Vec<_>>(), ["start_line", "end_line", "dimension"]);
        // left of straight up is -x, so a negative offset lands at +x
        assert_eq!(line_of(&comp, "start_line").end(), Point::new(1.0, 0.0));
        let arrow = comp.get_path(&["dimension", "arrow"]).unwrap();
        assert_eq!(arrow.as_curve().unwrap().end(), Point::new(1.0, 4.0));
    }

    #[test]
    fn angular_dimension_sweeps_counter_clockwise() {
        let comp = AngularDimension::new("θ", Point::ORIGIN, Point::UNIT_Y, Point::UNIT_X)
            .text_position(TextPosition::Start)
            .build()
            .unwrap();
        let Drawable::Arc(arc) = comp.get("arc").unwrap() else {
            panic!("arc missing");
        };
        assert!(arc.start_angle().radians().abs() < 1e-12);
        assert!((arc.arc_angle() - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(arc.style().arrow, Some(ArrowStyle::Double));
        // Start followed the swap to the upper ray
        let label = text_of(&comp, "text");
        assert_eq!(label.position(), Point::new(0.0, 1.0 + DEFAULT_SPACING));
    }

    #[test]
    fn radial_dimension_reaches_the_rim() {
        let comp = RadialDimension::new("R", Point::new(1.0, 1.0), 2.0, 0.0)
            .build()
            .unwrap();
        assert_eq!(line_of(&comp, "arrow").end(), Point::new(3.0, 1.0));
        assert_eq!(text_of(&comp, "text").position(), Point::new(2.0, 1.0 + DEFAULT_SPACING));
        assert!(RadialDimension::new("R", Point::ORIGIN, 0.0, 0.0).build().is_err());
    }

    #[test]
    fn force_label_sits_behind_the_tail() {
        let comp = Force::new("F", Point::new(0.0, 1.0), Point::new(0.0, 0.0))
            .spacing(0.25)
            .build()
            .unwrap();
        assert_eq!(text_of(&comp, "text").position(), Point::new(0.0, 1.25));
        assert_eq!(line_of(&comp, "arrow").style().arrow, Some(ArrowStyle::End));
    }

    #[test]
    fn axis_label_past_the_tip() {
        let comp = Axis::new(Point::ORIGIN, 2.0, "y", FRAC_PI_2).build().unwrap();
        assert_eq!(line_of(&comp, "arrow").end(), Point::new(0.0, 2.0));
        assert_eq!(text_of(&comp, "label").position(), Point::new(0.0, 2.0 + DEFAULT_SPACING));
    }

    #[test]
    fn arrow_with_text_points_at_the_tip() {
        let comp = ArrowWithText::new("here", Point::new(2.0, 2.0), Point::ORIGIN)
            .build()
            .unwrap();
        assert_eq!(line_of(&comp, "arrow").start(), Point::new(2.0, 2.0));
        assert_eq!(text_of(&comp, "text").text(), "here");
    }
}

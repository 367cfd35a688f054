//! Declarative 2D sketches.
//!
//! Build figures from points, lines, arcs, splines and text, group them
//! into named [`Composition`]s, style and transform whole groups at once,
//! and hand the result to a [`Backend`] such as [`SvgBackend`].
//!
//! ```no_run
//! use sketchru::prelude::*;
//!
//! fn main() -> sketchru::Result<()> {
//!     let mut fig = Figure::new(0.0, 4.0, 0.0, 3.0, SvgBackend::new)?;
//!     let beam = Rectangle::new(Point::new(0.5, 1.0), 3.0, 0.3)?
//!         .with_fill_pattern(Some(FillPattern::UpLeftToRight));
//!     fig.add(beam)?;
//!     fig.add(Gravity::new(Point::new(2.0, 2.5), 0.8).build()?)?;
//!     fig.save("beam.svg")
//! }
//! ```

pub mod annotations;
pub mod composition;
pub mod errors;
pub mod figure;
mod log;
pub mod mechanics;
pub mod render;
pub mod shapes;
pub mod style;
pub mod types;

pub use composition::{Composite, Composition};
pub use errors::{Result, SketchError};
pub use figure::{Backend, BoundingBox, Figure};
pub use render::{SvgBackend, SvgOptions};
pub use shapes::{Drawable, Shape, Transform};
pub use types::{Angle, Point};

/// Everything needed to build and draw a sketch
pub mod prelude {
    pub use crate::annotations::{
        AngularDimension, ArrowWithText, Axis, DistanceWithText, Force, LinearDimension,
        RadialDimension, TextPosition,
    };
    pub use crate::composition::{Composite, Composition};
    pub use crate::figure::{Backend, BoundingBox, Figure};
    pub use crate::mechanics::{
        Dashpot, Gravity, SimpleSupport, Spring, UniformLoad, VelocityProfile, Wheel,
    };
    pub use crate::render::{SvgBackend, SvgOptions};
    pub use crate::shapes::{
        Arc, Circle, Curve, Drawable, Line, Rectangle, Shape, Spline, Text, Transform, Triangle,
        Wall,
    };
    pub use crate::style::{
        ArrowStyle, Color, FillPattern, FontFamily, LineStyle, Stylable, Style, StyleExt,
        StyleUpdate, TextAlignment, TextStyle,
    };
    pub use crate::types::{Angle, Point};
}

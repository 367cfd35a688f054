//! The figure: an explicit drawing context and the backends it feeds

use std::path::Path;
use std::time::Duration;

use crate::errors::{Result, SketchError};
use crate::log::debug;
use crate::shapes::Drawable;

/// The region of sketch space a figure shows
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Fails unless both ranges are non-empty and finite.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        for (axis, lo, hi) in [("x", x_min, x_max), ("y", y_min, y_max)] {
            if !(lo < hi) || !lo.is_finite() || !hi.is_finite() {
                return Err(SketchError::invalid(
                    "figure",
                    format!("{axis} range [{lo}, {hi}] is empty"),
                ));
            }
        }
        Ok(BoundingBox {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// A drawing surface.
///
/// Backends receive every drawable added to a figure, in order, and decide
/// how each variant is drawn.
pub trait Backend {
    /// Short name used in error messages
    fn name(&self) -> &'static str {
        "backend"
    }

    fn add(&mut self, drawable: &Drawable) -> Result<()>;

    /// Forget everything drawn so far
    fn erase(&mut self);

    fn show(&mut self) -> Result<()>;

    fn save(&mut self, path: &Path) -> Result<()>;

    /// Redraw with the frames produced by `frame` until it yields `None`.
    fn animate(
        &mut self,
        frame: &mut dyn FnMut(usize) -> Option<Vec<Drawable>>,
        interval: Duration,
    ) -> Result<()> {
        let _ = (frame, interval);
        Err(SketchError::unsupported("animate", self.name()))
    }

    fn save_animation(&mut self, path: &Path) -> Result<()> {
        let _ = path;
        Err(SketchError::unsupported("save_animation", self.name()))
    }
}

/// The drawables of one picture and the backend they are sent to
#[derive(Debug)]
pub struct Figure<B: Backend> {
    bounds: BoundingBox,
    drawables: Vec<Drawable>,
    backend: B,
}

impl<B: Backend> Figure<B> {
    /// Check the bounds, then build the backend for them.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        factory: impl FnOnce(BoundingBox) -> B,
    ) -> Result<Self> {
        let bounds = BoundingBox::new(x_min, x_max, y_min, y_max)?;
        Ok(Figure {
            bounds,
            drawables: Vec::new(),
            backend: factory(bounds),
        })
    }

    /// Keep `drawable` and hand it to the backend
    pub fn add(&mut self, drawable: impl Into<Drawable>) -> Result<()> {
        let drawable = drawable.into();
        debug!(kind = drawable.kind(), "figure add");
        self.backend.add(&drawable)?;
        self.drawables.push(drawable);
        Ok(())
    }

    pub fn show(&mut self) -> Result<()> {
        self.backend.show()
    }

    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.backend.save(path.as_ref())
    }

    pub fn erase(&mut self) {
        self.backend.erase();
        self.drawables.clear();
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Line;
    use crate::types::Point;

    #[derive(Default)]
    struct Tally {
        added: usize,
        erased: usize,
    }

    impl Backend for Tally {
        fn add(&mut self, _drawable: &Drawable) -> Result<()> {
            self.added += 1;
            Ok(())
        }

        fn erase(&mut self) {
            self.erased += 1;
        }

        fn show(&mut self) -> Result<()> {
            Ok(())
        }

        fn save(&mut self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn empty_ranges_are_rejected() {
        assert!(Figure::new(1.0, 1.0, 0.0, 1.0, |_| Tally::default()).is_err());
        assert!(Figure::new(0.0, 1.0, 2.0, -2.0, |_| Tally::default()).is_err());
    }

    #[test]
    fn factory_sees_the_bounds() {
        let mut seen = None;
        let fig = Figure::new(0.0, 4.0, -1.0, 1.0, |b| {
            seen = Some(b);
            Tally::default()
        })
        .unwrap();
        assert_eq!(seen, Some(fig.bounds()));
        assert_eq!(fig.bounds().width(), 4.0);
    }

    #[test]
    fn erase_clears_both_sides() {
        let mut fig = Figure::new(0.0, 1.0, 0.0, 1.0, |_| Tally::default()).unwrap();
        fig.add(Line::new(Point::ORIGIN, Point::UNIT_X).unwrap()).unwrap();
        assert_eq!(fig.drawables().len(), 1);
        assert_eq!(fig.backend().added, 1);
        fig.erase();
        assert!(fig.drawables().is_empty());
        assert_eq!(fig.backend().erased, 1);
    }

    #[test]
    fn animation_is_unsupported_by_default() {
        let mut fig = Figure::new(0.0, 1.0, 0.0, 1.0, |_| Tally::default()).unwrap();
        let err = fig
            .backend_mut()
            .animate(&mut |_| None, Duration::from_millis(40))
            .unwrap_err();
        assert!(matches!(
            err,
            SketchError::Unsupported {
                operation: "animate",
                target: "backend"
            }
        ));
        assert!(fig.backend_mut().save_animation(Path::new("out.gif")).is_err());
    }
}

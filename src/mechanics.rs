//! Parametric mechanical-diagram composites
//!
//! Dampers, springs, wheels, loads and supports, each built from plain
//! primitives into a [`Composition`]. Parameters are checked when the
//! composite is built; nothing partially valid is ever returned.

use std::f64::consts::TAU;

use crate::annotations::Force;
use crate::composition::{Composite, Composition};
use crate::errors::{Result, SketchError};
use crate::log::{debug, warn};
use crate::shapes::{Circle, Curve, Line, Rectangle, Triangle, Wall};
use crate::style::{Color, StyleExt};
use crate::types::Point;

fn require_positive(shape: &'static str, name: &str, value: f64) -> Result<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(SketchError::invalid(
            shape,
            format!("{name} must be positive, got {value}"),
        ));
    }
    Ok(())
}

/// A vertical damper: a rod and piston sliding in an open pot.
///
/// From the bottom up: a bar from `start`, the pot, and the rod leaving the
/// pot to end at `start.y + total_length`.
#[derive(Clone, Debug)]
pub struct Dashpot {
    start: Point,
    total_length: f64,
    bar_length: Option<f64>,
    width: Option<f64>,
    dashpot_length: Option<f64>,
    piston_pos: Option<f64>,
}

impl Dashpot {
    /// Piston thickness as a fraction of the pot length
    pub const PISTON_GAP_FRACTION: f64 = 0.1;

    pub fn new(start: Point, total_length: f64) -> Self {
        Dashpot {
            start,
            total_length,
            bar_length: None,
            width: None,
            dashpot_length: None,
            piston_pos: None,
        }
    }

    pub fn bar_length(mut self, bar_length: f64) -> Self {
        self.bar_length = Some(bar_length);
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn dashpot_length(mut self, dashpot_length: f64) -> Self {
        self.dashpot_length = Some(dashpot_length);
        self
    }

    /// Height of the piston above the pot bottom
    pub fn piston_pos(mut self, piston_pos: f64) -> Self {
        self.piston_pos = Some(piston_pos);
        self
    }

    /// `(bar_length, dashpot_length, width, piston_pos)` with defaults filled in
    pub fn dimensions(&self) -> (f64, f64, f64, f64) {
        let total = self.total_length;
        let dashpot_length = self.dashpot_length.unwrap_or(total / 2.0);
        let bar_length = self.bar_length.unwrap_or((total - dashpot_length) / 2.0);
        let width = self.width.unwrap_or(dashpot_length / 2.0);
        let piston_pos = self.piston_pos.unwrap_or(dashpot_length / 3.0);
        (bar_length, dashpot_length, width, piston_pos)
    }
}

impl Composite for Dashpot {
    fn build(&self) -> Result<Composition> {
        let (bar_length, dashpot_length, width, piston_pos) = self.dimensions();
        let Point { x, y } = self.start;
        let bar_end = y + bar_length;
        let pot_end = bar_end + dashpot_length;
        let top = y + self.total_length;

        if !(y < bar_end && bar_end < pot_end && pot_end < top) {
            return Err(SketchError::invalid(
                "dashpot",
                format!(
                    "need {y} < bar end {bar_end} < pot end {pot_end} < top {top}"
                ),
            ));
        }
        require_positive("dashpot", "width", width)?;
        let piston_gap = dashpot_length * Dashpot::PISTON_GAP_FRACTION;
        if !(0.0..=dashpot_length - piston_gap).contains(&piston_pos) {
            return Err(SketchError::invalid(
                "dashpot",
                format!(
                    "piston position {piston_pos} outside [0, {}]",
                    dashpot_length - piston_gap
                ),
            ));
        }

        let half = width / 2.0;
        let pot = Curve::new(vec![
            Point::new(x - half, pot_end),
            Point::new(x - half, bar_end),
            Point::new(x + half, bar_end),
            Point::new(x + half, pot_end),
        ])?;

        let clearance = width / 8.0;
        let piston_bottom = bar_end + piston_pos;
        let piston = Rectangle::new(
            Point::new(x - half + clearance, piston_bottom),
            width - 2.0 * clearance,
            piston_gap,
        )?
        .with_fill_color(Some(Color::Black));

        debug!(bar_end, pot_end, piston_bottom, "dashpot");
        Ok(Composition::new()
            .add("line start", Line::new(self.start, Point::new(x, bar_end))?)
            .add("pot", pot)
            .add("piston", piston)
            .add(
                "rod",
                Line::new(Point::new(x, piston_bottom + piston_gap), Point::new(x, top))?,
            ))
    }
}

/// A vertical coil spring between two straight bars
#[derive(Clone, Debug)]
pub struct Spring {
    start: Point,
    length: f64,
    width: Option<f64>,
    bar_length: Option<f64>,
    num_windings: usize,
    teeth: bool,
}

impl Spring {
    pub const DEFAULT_WINDINGS: usize = 11;
    pub const MIN_WINDINGS: usize = 7;
    /// Samples per winding of the smooth coil
    const SAMPLES_PER_WINDING: usize = 20;

    pub fn new(start: Point, length: f64) -> Self {
        Spring {
            start,
            length,
            width: None,
            bar_length: None,
            num_windings: Spring::DEFAULT_WINDINGS,
            teeth: false,
        }
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn bar_length(mut self, bar_length: f64) -> Self {
        self.bar_length = Some(bar_length);
        self
    }

    pub fn num_windings(mut self, num_windings: usize) -> Self {
        self.num_windings = num_windings;
        self
    }

    /// Draw the coil as a zigzag instead of a smooth wave
    pub fn teeth(mut self, teeth: bool) -> Self {
        self.teeth = teeth;
        self
    }

    /// Half-windings actually drawn: at least the minimum, and odd so the
    /// coil ends on the axis.
    pub fn intervals(&self) -> usize {
        let n = self.num_windings.max(Spring::MIN_WINDINGS);
        if n % 2 == 0 { n + 1 } else { n }
    }
}

impl Composite for Spring {
    fn build(&self) -> Result<Composition> {
        require_positive("spring", "length", self.length)?;
        let width = self.width.unwrap_or(self.length / 10.0);
        let bar_length = self.bar_length.unwrap_or(self.length / 6.0);
        require_positive("spring", "width", width)?;
        require_positive("spring", "bar length", bar_length)?;
        if bar_length >= self.length / 2.0 {
            return Err(SketchError::invalid(
                "spring",
                format!(
                    "bar length {bar_length} leaves no room for the coil in length {}",
                    self.length
                ),
            ));
        }

        if self.intervals() != self.num_windings {
            warn!(
                requested = self.num_windings,
                drawn = self.intervals(),
                "spring windings adjusted"
            );
        }

        let Point { x, y } = self.start;
        let coil_start = y + bar_length;
        let coil_end = y + self.length - bar_length;
        let pitch = (coil_end - coil_start) / self.intervals() as f64;
        let half = width / 2.0;

        let mut coil = vec![Point::new(x, coil_start)];
        if self.teeth {
            for i in 0..self.intervals() {
                let side = if i % 2 == 0 { half } else { -half };
                coil.push(Point::new(x + side, coil_start + (i as f64 + 0.5) * pitch));
            }
        } else {
            let samples = self.intervals() * Spring::SAMPLES_PER_WINDING;
            let span = coil_end - coil_start;
            for i in 1..samples {
                let t = i as f64 / samples as f64;
                let phase = std::f64::consts::PI * self.intervals() as f64 * t;
                coil.push(Point::new(x + half * phase.sin(), coil_start + t * span));
            }
        }
        coil.push(Point::new(x, coil_end));

        Ok(Composition::new()
            .add("bar1", Line::new(self.start, Point::new(x, coil_start))?)
            .add("spiral", Curve::new(coil)?)
            .add("bar2", Line::new(Point::new(x, coil_end), Point::new(x, y + self.length))?))
    }
}

/// A spoked wheel
#[derive(Clone, Debug)]
pub struct Wheel {
    center: Point,
    radius: f64,
    inner_radius: Option<f64>,
    nlines: usize,
}

impl Wheel {
    pub const DEFAULT_SPOKES: usize = 10;

    pub fn new(center: Point, radius: f64) -> Self {
        Wheel {
            center,
            radius,
            inner_radius: None,
            nlines: Wheel::DEFAULT_SPOKES,
        }
    }

    /// Radius of the hub; defaults to a fifth of the wheel
    pub fn inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = Some(inner_radius);
        self
    }

    pub fn nlines(mut self, nlines: usize) -> Self {
        self.nlines = nlines;
        self
    }
}

impl Composite for Wheel {
    fn build(&self) -> Result<Composition> {
        let inner = self.inner_radius.unwrap_or(self.radius / 5.0);
        if !(0.0 < inner && inner < self.radius) {
            return Err(SketchError::invalid(
                "wheel",
                format!("inner radius {inner} must lie in (0, {})", self.radius),
            ));
        }

        let mut spokes = Composition::new();
        for k in 0..self.nlines {
            let theta = TAU * k as f64 / self.nlines as f64;
            let dir = Point::new(theta.cos(), theta.sin());
            let spoke = Line::new(self.center + dir * inner, self.center + dir * self.radius)?;
            spokes.insert(k.to_string(), spoke.into());
        }

        Ok(Composition::new()
            .add("outer", Circle::new(self.center, self.radius)?)
            .add("inner", Circle::new(self.center, inner)?)
            .add("spokes", spokes))
    }
}

/// A distributed load: a box with evenly spaced arrows pointing down
#[derive(Clone, Debug)]
pub struct UniformLoad {
    lower_left: Point,
    width: f64,
    height: f64,
    num_arrows: usize,
}

impl UniformLoad {
    pub const DEFAULT_ARROWS: usize = 10;

    pub fn new(lower_left: Point, width: f64, height: f64) -> Self {
        UniformLoad {
            lower_left,
            width,
            height,
            num_arrows: UniformLoad::DEFAULT_ARROWS,
        }
    }

    pub fn num_arrows(mut self, num_arrows: usize) -> Self {
        self.num_arrows = num_arrows;
        self
    }
}

impl Composite for UniformLoad {
    fn build(&self) -> Result<Composition> {
        if self.num_arrows < 2 {
            return Err(SketchError::invalid(
                "uniform load",
                format!("need at least 2 arrows, got {}", self.num_arrows),
            ));
        }
        let frame = Rectangle::new(self.lower_left, self.width, self.height)?;

        let Point { x, y } = self.lower_left;
        let step = self.width / (self.num_arrows - 1) as f64;
        let mut arrows = Composition::new();
        for i in 0..self.num_arrows {
            let xi = x + step * i as f64;
            let arrow = Line::arrow(Point::new(xi, y + self.height), Point::new(xi, y))?;
            arrows.insert(i.to_string(), arrow.into());
        }

        Ok(Composition::new().add("box", frame).add("arrows", arrows))
    }
}

/// Velocity arrows along a vertical line, with the profile drawn through
/// their tips.
///
/// `profile` maps a height above `start` to a velocity vector.
pub struct VelocityProfile<F> {
    start: Point,
    height: f64,
    profile: F,
    num_arrows: usize,
    scaling: f64,
}

impl<F: Fn(f64) -> Point> VelocityProfile<F> {
    /// Below this horizontal speed an arrow is left out
    pub const MIN_SPEED: f64 = 1e-8;
    const CURVE_SAMPLES: usize = 100;

    pub fn new(start: Point, height: f64, profile: F) -> Self {
        VelocityProfile {
            start,
            height,
            profile,
            num_arrows: 5,
            scaling: 1.0,
        }
    }

    pub fn num_arrows(mut self, num_arrows: usize) -> Self {
        self.num_arrows = num_arrows;
        self
    }

    /// Length of the drawn arrow per unit of velocity
    pub fn scaling(mut self, scaling: f64) -> Self {
        self.scaling = scaling;
        self
    }

    fn tip(&self, y: f64) -> (Point, Point) {
        let base = self.start + Point::new(0.0, y);
        (base, base + (self.profile)(y) * self.scaling)
    }
}

impl<F: Fn(f64) -> Point> Composite for VelocityProfile<F> {
    fn build(&self) -> Result<Composition> {
        require_positive("velocity profile", "height", self.height)?;
        if self.num_arrows < 2 {
            return Err(SketchError::invalid(
                "velocity profile",
                format!("need at least 2 arrows, got {}", self.num_arrows),
            ));
        }

        let step = self.height / (self.num_arrows - 1) as f64;
        let mut arrows = Composition::new();
        for i in 0..self.num_arrows {
            let y = step * i as f64;
            let (base, tip) = self.tip(y);
            // too short to draw as an arrow
            if (self.profile)(y).x.abs() < Self::MIN_SPEED || base == tip {
                continue;
            }
            arrows.insert(i.to_string(), Line::arrow(base, tip)?.into());
        }
        debug!(drawn = arrows.len(), of = self.num_arrows, "velocity arrows");

        let curve = (0..=Self::CURVE_SAMPLES)
            .map(|i| self.tip(self.height * i as f64 / Self::CURVE_SAMPLES as f64).1)
            .collect();

        Ok(Composition::new()
            .add(
                "start line",
                Line::new(self.start, self.start + Point::new(0.0, self.height))?,
            )
            .add("arrows", arrows)
            .add("smooth curve", Curve::new(curve)?))
    }
}

/// A pin support: a triangle under `position` resting on hatched ground
#[derive(Clone, Debug)]
pub struct SimpleSupport {
    position: Point,
    size: f64,
}

impl SimpleSupport {
    pub fn new(position: Point, size: f64) -> Self {
        SimpleSupport { position, size }
    }
}

impl Composite for SimpleSupport {
    fn build(&self) -> Result<Composition> {
        require_positive("simple support", "size", self.size)?;
        let Point { x, y } = self.position;
        let (half, base) = (self.size / 2.0, y - self.size);
        let triangle = Triangle::new(
            self.position,
            Point::new(x - half, base),
            Point::new(x + half, base),
        );
        let ground = Wall::new(
            vec![Point::new(x - self.size, base), Point::new(x + self.size, base)],
            -self.size / 4.0,
        )?;
        Ok(Composition::new().add("triangle", triangle).add("ground", ground))
    }
}

/// A downward arrow labelled `g`
#[derive(Clone, Debug)]
pub struct Gravity {
    start: Point,
    length: f64,
}

impl Gravity {
    pub fn new(start: Point, length: f64) -> Self {
        Gravity { start, length }
    }
}

impl Composite for Gravity {
    fn build(&self) -> Result<Composition> {
        require_positive("gravity", "length", self.length)?;
        Force::new("g", self.start, self.start - Point::new(0.0, self.length)).build()
    }
}

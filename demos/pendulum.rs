//! A simple pendulum with its forces and dimensions.
//!
//! Writes the SVG to the path given as first argument, or to stdout.

use std::f64::consts::FRAC_PI_2;

use sketchru::prelude::*;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let length = 5.0;
    let angle = Angle::from_degrees(20.0);
    let pivot = Point::new(4.0, 9.0);
    let down = Point::new(0.0, -length);
    let mass = pivot + down.rotate(angle, Point::ORIGIN);

    let ceiling = Wall::new(vec![Point::new(2.5, 9.0), Point::new(5.5, 9.0)], 0.3)?;
    let rod = Line::new(pivot, mass)?.with_line_width(2.0);
    let bob = Circle::new(mass, 0.4)?.with_fill_color(Some(Color::Blue));
    let vertical = Line::new(pivot, pivot + down)?.with_line_style(LineStyle::Dotted);

    let theta = AngularDimension::new("θ", pivot, pivot + down, mass)
        .radius(length * 0.4)
        .build()?;
    let rod_length = LinearDimension::new("L", pivot, mass, 0.6).build()?;
    let gravity = Gravity::new(mass, 1.5).build()?;
    let tension = Force::new("T", mass, mass + (pivot - mass).unit_vector()? * 1.5).build()?;

    let pendulum = Composition::new()
        .add("ceiling", ceiling)
        .add("rod", rod)
        .add("bob", bob)
        .add("vertical", vertical)
        .add("theta", theta)
        .add("length", rod_length)
        .add("gravity", gravity)
        .add("tension", tension);

    let axes = Composition::new()
        .add("x", Axis::new(Point::new(0.5, 0.5), 2.0, "x", 0.0).build()?)
        .add("y", Axis::new(Point::new(0.5, 0.5), 2.0, "y", FRAC_PI_2).build()?);

    let mut fig = Figure::new(0.0, 8.0, 0.0, 10.0, SvgBackend::new)?;
    fig.add(pendulum)?;
    fig.add(axes)?;

    match std::env::args().nth(1) {
        Some(path) => fig.save(path)?,
        None => fig.show()?,
    }
    Ok(())
}

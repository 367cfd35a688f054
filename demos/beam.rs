//! A simply supported beam under a uniform load, resting on a spring and
//! a damper.

use sketchru::prelude::*;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let beam = Rectangle::new(Point::new(1.0, 4.0), 8.0, 0.4)?
        .with_fill_pattern(Some(FillPattern::UpLeftToRight));
    let load = UniformLoad::new(Point::new(1.0, 4.6), 8.0, 1.0)
        .num_arrows(9)
        .build()?;

    let left = SimpleSupport::new(beam.lower_left(), 0.6).build()?;
    let spring = Spring::new(Point::new(4.0, 1.0), 3.0).teeth(true).build()?;
    let damper = Dashpot::new(Point::new(6.0, 1.0), 3.0).build()?;
    let ground = Wall::new(vec![Point::new(3.0, 1.0), Point::new(7.0, 1.0)], -0.3)?;
    let right = SimpleSupport::new(beam.lower_right(), 0.6).build()?;

    let span = DistanceWithText::new("8 m", Point::new(1.0, 6.2), Point::new(9.0, 6.2)).build()?;
    let label = ArrowWithText::new("q", Point::new(9.8, 6.0), Point::new(9.0, 5.3)).build()?;

    let mut fig = Figure::new(0.0, 10.0, 0.0, 7.0, |bounds| {
        SvgBackend::with_options(bounds, SvgOptions { scale: 60.0, margin: 20.0 })
    })?;
    for (name, part) in [
        ("beam", Drawable::from(beam)),
        ("load", load.into()),
        ("left", left.into()),
        ("right", right.into()),
        ("spring", spring.into()),
        ("damper", damper.into()),
        ("ground", ground.into()),
        ("span", span.into()),
        ("label", label.into()),
    ] {
        tracing::debug!(name, "adding");
        fig.add(part)?;
    }

    match std::env::args().nth(1) {
        Some(path) => fig.save(path)?,
        None => fig.show()?,
    }
    Ok(())
}

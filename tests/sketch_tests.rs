//! Behavior of the sketch core: geometry, compositions, styling and the
//! mechanical composites, exercised through the public API only.

use std::f64::consts::{FRAC_PI_2, PI};

use sketchru::prelude::*;
use sketchru::SketchError;

fn curve_of(comp: &Composition, path: &[&str]) -> Curve {
    comp.get_path(path)
        .unwrap()
        .as_curve()
        .unwrap_or_else(|| panic!("{path:?} is not curve-like"))
        .clone()
}

#[test]
fn point_equality_is_tolerant() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.00005, 1.99996));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.001, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 2.002));
}

#[test]
fn angle_sums_stay_in_half_open_range() {
    let sum = Angle::new(3.0) + Angle::new(3.0);
    assert!(sum.radians() > -PI && sum.radians() <= PI);
    assert!((sum.radians() - (6.0 - 2.0 * PI)).abs() < 1e-12);

    for a in [-50.0, -7.5, -PI, 0.0, PI, 4.0, 123.456] {
        for b in [-3.3, 0.1, PI, 10.0] {
            let r = (Angle::new(a) + b).radians();
            assert!(r > -PI && r <= PI, "{a} + {b} gave {r}");
        }
    }
}

#[test]
fn rotation_round_trips() {
    let line = Line::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)).unwrap();
    let back = line
        .rotate(FRAC_PI_2, Point::ORIGIN)
        .rotate(-FRAC_PI_2, Point::ORIGIN);
    assert_eq!(back, line);

    let spline = Spline::new(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.5),
        Point::new(2.0, -0.5),
        Point::new(3.0, 1.0),
    ])
    .unwrap();
    let center = Point::new(0.3, -1.2);
    let back = spline.rotate(0.7, center).rotate(-0.7, center);
    assert_eq!(back.points(), spline.points());
}

#[test]
fn rectangle_rotation_scenario() {
    let rect = Rectangle::new(Point::new(0.0, 0.0), 4.0, 2.0).unwrap();
    let turned = rect.rotate(FRAC_PI_2, Point::new(0.0, 0.0));
    assert_eq!(
        turned.points(),
        &[
            Point::new(0.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(-2.0, 4.0),
            Point::new(-2.0, 0.0),
            Point::new(0.0, 0.0),
        ]
    );
}

#[test]
fn composition_add_is_copy_on_write() {
    let base = Composition::new()
        .add("floor", Line::new(Point::ORIGIN, Point::new(4.0, 0.0)).unwrap())
        .add("wheel", Circle::new(Point::new(1.0, 1.0), 1.0).unwrap());
    let snapshot = base.clone();

    let grown = base.add("label", Text::new("car", Point::new(2.0, 3.0)));
    assert_eq!(base.len(), 2);
    assert!(base.ptr_eq(&snapshot));
    assert_eq!(grown.len(), 3);
    assert!(grown.contains("label") && !base.contains("label"));

    let replaced = base.add("wheel", Circle::new(Point::new(1.0, 1.0), 0.5).unwrap());
    assert_eq!(replaced.len(), 2);
    let Drawable::Circle(old) = base.get("wheel").unwrap() else {
        panic!("wheel is not a circle");
    };
    assert_eq!(old.radius(), 1.0);
}

#[test]
fn style_broadcast_reaches_every_leaf() {
    let inner = Composition::new()
        .add("a", Line::new(Point::ORIGIN, Point::UNIT_X).unwrap())
        .add("t", Text::new("x", Point::ORIGIN));
    let outer = Composition::new()
        .add("inner", inner)
        .add("b", Arc::new(Point::ORIGIN, 1.0, 0.0, PI).unwrap());

    let styled = outer
        .clone()
        .with_line_color(Color::Blue)
        .with_line_style(LineStyle::Dashed)
        .with_font_size(18.0);

    for path in [&["inner", "a"][..], &["b"][..]] {
        let style = styled.get_path(path).unwrap().style();
        assert_eq!(style.line_color, Color::Blue);
        assert_eq!(style.line_style, LineStyle::Dashed);
    }
    let text = styled.get_path(&["inner", "t"]).unwrap().as_text().unwrap();
    assert_eq!(text.text_style().font_size, 18.0);
    assert_eq!(text.style().line_color, Color::Blue);

    // nothing leaked into the unstyled original
    assert_eq!(outer.get_path(&["b"]).unwrap().style(), Style::default());
}

#[test]
fn set_style_in_place() {
    let mut comp = Composition::new().add("a", Line::new(Point::ORIGIN, Point::UNIT_X).unwrap());
    comp.set_line_width(3.0).set_arrow(Some(ArrowStyle::End));
    let style = comp.get("a").unwrap().style();
    assert_eq!(style.line_width, 3.0);
    assert_eq!(style.arrow, Some(ArrowStyle::End));
}

#[test]
fn transforms_recurse_through_compositions() {
    let comp = Composition::new().add(
        "inner",
        Composition::new().add("a", Line::new(Point::new(1.0, 0.0), Point::new(2.0, 0.0)).unwrap()),
    );
    let moved = comp
        .rotate(FRAC_PI_2, Point::ORIGIN)
        .translate(Point::new(1.0, 0.0))
        .scale(2.0)
        .unwrap();
    let line = curve_of(&moved, &["inner", "a"]);
    assert_eq!(line.start(), Point::new(2.0, 2.0));
    assert_eq!(line.end(), Point::new(2.0, 4.0));
    assert_eq!(curve_of(&comp, &["inner", "a"]).start(), Point::new(1.0, 0.0));
}

#[test]
fn degenerate_shapes_are_rejected() {
    let invalid = |r: sketchru::Result<Drawable>| {
        matches!(r, Err(SketchError::InvalidConstruction { .. }))
    };
    assert!(invalid(Line::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0)).map(Into::into)));
    assert!(invalid(Curve::new(vec![]).map(Into::into)));
    assert!(invalid(Arc::new(Point::ORIGIN, 0.0, 0.0, 1.0).map(Into::into)));
    assert!(invalid(Circle::new(Point::ORIGIN, -1.0).map(Into::into)));
    assert!(invalid(Rectangle::new(Point::ORIGIN, 0.0, 1.0).map(Into::into)));
    assert!(invalid(Wall::new(vec![Point::ORIGIN], 0.1).map(Into::into)));
    assert!(invalid(Dashpot::new(Point::ORIGIN, 1.0).bar_length(2.0).to_drawable()));
    assert!(invalid(Spring::new(Point::ORIGIN, 1.0).bar_length(0.5).to_drawable()));
    assert!(invalid(Wheel::new(Point::ORIGIN, 1.0).inner_radius(2.0).to_drawable()));

    assert!(matches!(
        Curve::from_coordinate_lists(&[0.0, 1.0, 2.0], &[0.0]),
        Err(SketchError::LengthMismatch { xs: 3, ys: 1 })
    ));
    assert!(matches!(
        Point::ORIGIN.unit_vector(),
        Err(SketchError::DegenerateVector { .. })
    ));
}

#[test]
fn domain_errors() {
    let arc = Arc::new(Point::ORIGIN, 1.0, 0.0, FRAC_PI_2).unwrap();
    assert!(matches!(arc.point_at(PI), Err(SketchError::DomainRange { .. })));
    let vertical = Line::new(Point::ORIGIN, Point::UNIT_Y).unwrap();
    assert!(matches!(vertical.y_at(0.0), Err(SketchError::DomainRange { .. })));
    assert!(matches!(
        Text::new("x", Point::ORIGIN).scale(2.0),
        Err(SketchError::Unsupported { .. })
    ));
}

#[test]
fn dashpot_offsets_are_ordered() {
    let start = Point::new(2.0, 1.0);
    let total = 3.0;
    let comp = Dashpot::new(start, total).build().unwrap();

    let bar_end = curve_of(&comp, &["line start"]).end().y;
    let pot = curve_of(&comp, &["pot"]);
    let pot_end = pot.start().y;
    let top = curve_of(&comp, &["rod"]).end().y;
    assert!(start.y < bar_end && bar_end < pot_end && pot_end < top);
    assert!((top - (start.y + total)).abs() < 1e-12);

    for bad in [
        Dashpot::new(start, total).bar_length(4.0),
        Dashpot::new(start, total).dashpot_length(3.0),
        Dashpot::new(start, total).bar_length(1.0).dashpot_length(2.0),
    ] {
        assert!(bad.build().is_err(), "{bad:?} should fail");
    }
}

#[test]
fn wall_outline_reverses_the_offset() {
    let path = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.5),
        Point::new(2.0, 0.0),
        Point::new(3.0, 0.5),
    ];
    let wall = Wall::new(path.clone(), 0.2).unwrap();
    let pts = wall.points();
    assert_eq!(pts.len(), 2 * path.len() + 1);
    assert_eq!(&pts[..path.len()], path.as_slice());
    assert_eq!(pts[pts.len() - 1], path[0]);

    // offset half runs backwards: its first point lies over the last input
    let offset = &pts[path.len()..2 * path.len()];
    assert!((offset[0].dist(path[3]) - 0.2).abs() < 1e-9);
    assert!((offset[3].dist(path[0]) - 0.2).abs() < 1e-9);
    assert!(offset[0].x > offset[3].x);
}

#[test]
fn annotations_build_named_parts() {
    let dim = LinearDimension::new("L", Point::ORIGIN, Point::new(3.0, 0.0), 0.5)
        .build()
        .unwrap();
    assert_eq!(
        dim.get_path(&["dimension", "text"]).unwrap().as_text().unwrap().text(),
        "L"
    );

    let angle = AngularDimension::new("a", Point::ORIGIN, Point::UNIT_X, Point::UNIT_Y)
        .radius(2.0)
        .build()
        .unwrap();
    let Drawable::Arc(arc) = angle.get("arc").unwrap() else {
        panic!("no arc");
    };
    assert_eq!(arc.radius(), 2.0);
    assert_eq!(arc.end_point(), Point::new(0.0, 2.0));
}

#[test]
fn figure_keeps_what_it_forwards() {
    let mut fig = Figure::new(0.0, 5.0, 0.0, 5.0, SvgBackend::new).unwrap();
    fig.add(Wheel::new(Point::new(2.5, 2.5), 1.0).nlines(6).build().unwrap())
        .unwrap();
    fig.add(Text::new("wheel", Point::new(2.5, 4.0))).unwrap();
    assert_eq!(fig.drawables().len(), 2);
    // outer + inner + 6 spokes + text
    assert_eq!(fig.backend().len(), 9);

    fig.erase();
    assert!(fig.drawables().is_empty());
    assert!(fig.backend().is_empty());

    assert!(Figure::new(1.0, 0.0, 0.0, 1.0, SvgBackend::new).is_err());
}

//! SVG backend
//!
//! Drawables are flattened into marks as they are added: curve-like
//! variants become polylines, text stays text, and compositions are walked
//! child by child. The document is generated from the marks on demand.

use std::io::Write;
use std::path::{Path, PathBuf};

use ::svg::Document;
use ::svg::node::Text as TextNode;
use ::svg::node::element::{
    Circle as SvgCircle, Definitions, Line as SvgLine, Pattern, Polygon, Polyline,
    Rectangle as SvgRect, Text as SvgText,
};
use glam::{DVec2, dvec2};

use super::defaults;
use crate::errors::{Result, SketchError};
use crate::figure::{Backend, BoundingBox};
use crate::log::debug;
use crate::shapes::{Curve, Drawable, Text, Transform};
use crate::style::{Color, FillPattern, FontFamily, LineStyle, Stylable, TextAlignment};
use crate::types::Point;

/// Output size settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SvgOptions {
    /// Pixels per sketch unit
    pub scale: f64,
    /// Blank border around the figure, in pixels
    pub margin: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        SvgOptions {
            scale: defaults::SCALE,
            margin: defaults::MARGIN,
        }
    }
}

#[derive(Clone, Debug)]
enum Mark {
    Curve(Curve),
    Text(Text),
}

/// Collects drawables and writes them as one SVG document
#[derive(Debug)]
pub struct SvgBackend {
    bounds: BoundingBox,
    options: SvgOptions,
    marks: Vec<Mark>,
}

impl SvgBackend {
    pub fn new(bounds: BoundingBox) -> Self {
        SvgBackend::with_options(bounds, SvgOptions::default())
    }

    pub fn with_options(bounds: BoundingBox, options: SvgOptions) -> Self {
        SvgBackend {
            bounds,
            options,
            marks: Vec::new(),
        }
    }

    pub fn options(&self) -> SvgOptions {
        self.options
    }

    /// Number of leaf shapes collected so far
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Sketch coordinates to pixels, y pointing down
    fn px(&self, p: Point) -> DVec2 {
        let SvgOptions { scale, margin } = self.options;
        dvec2(
            (p.x - self.bounds.x_min) * scale + margin,
            (self.bounds.y_max - p.y) * scale + margin,
        )
    }

    fn points_attr(&self, points: &[Point]) -> String {
        join_points(points.iter().map(|&p| self.px(p)))
    }

    pub fn to_document(&self) -> Document {
        let SvgOptions { scale, margin } = self.options;
        let width = num(self.bounds.width() * scale + 2.0 * margin);
        let height = num(self.bounds.height() * scale + 2.0 * margin);
        let mut doc = Document::new()
            .set("width", width.as_str())
            .set("height", height.as_str())
            .set("viewBox", format!("0 0 {width} {height}"));

        let mut patterns: Vec<(FillPattern, Color)> = Vec::new();
        for mark in &self.marks {
            if let Mark::Curve(curve) = mark {
                let style = curve.style();
                if let Some(kind) = style.fill_pattern {
                    let key = (kind, style.fill_color.unwrap_or(Color::White));
                    if !patterns.contains(&key) {
                        patterns.push(key);
                    }
                }
            }
        }
        if !patterns.is_empty() {
            let defs = patterns
                .iter()
                .fold(Definitions::new(), |defs, &(kind, bg)| defs.add(pattern(kind, bg)));
            doc = doc.add(defs);
        }

        for mark in &self.marks {
            doc = match mark {
                Mark::Curve(curve) => self.draw_curve(doc, curve),
                Mark::Text(text) => doc.add(self.draw_text(text)),
            };
        }

        debug!(
            width = %width,
            height = %height,
            marks = self.marks.len(),
            patterns = patterns.len(),
            "svg document"
        );
        doc
    }

    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }

    fn draw_curve(&self, mut doc: Document, curve: &Curve) -> Document {
        let style = curve.style();
        let stroke_width = num(style.line_width);

        if let Some(offset) = style.shadow {
            let shadow = curve.translate(Point::new(offset, -offset));
            doc = doc.add(
                Polyline::new()
                    .set("points", self.points_attr(shadow.points()))
                    .set("fill", "none")
                    .set("stroke", color_token(defaults::SHADOW_COLOR))
                    .set("stroke-width", stroke_width.as_str()),
            );
        }

        let fill = match (style.fill_pattern, style.fill_color) {
            (Some(kind), bg) => format!("url(#{})", pattern_id(kind, bg.unwrap_or(Color::White))),
            (None, Some(color)) => color_token(color).to_string(),
            (None, None) => "none".to_string(),
        };
        let mut line = Polyline::new()
            .set("points", self.points_attr(curve.points()))
            .set("fill", fill)
            .set("stroke", color_token(style.line_color))
            .set("stroke-width", stroke_width.as_str());
        if let Some(dashes) = dash_array(style.line_style) {
            line = line.set("stroke-dasharray", dashes);
        }
        doc = doc.add(line);

        if let Some(arrow) = style.arrow {
            let (at_start, at_end) = arrow.heads();
            let points = curve.points();
            let heads = [
                at_start.then(|| self.arrowhead(points.iter().copied(), style.line_color)),
                at_end.then(|| self.arrowhead(points.iter().rev().copied(), style.line_color)),
            ];
            for head in heads.into_iter().flatten().flatten() {
                doc = doc.add(head);
            }
        }
        doc
    }

    /// A filled triangle at the first point of `points`, aimed along the
    /// segment that arrives there.
    fn arrowhead(&self, mut points: impl Iterator<Item = Point>, color: Color) -> Option<Polygon> {
        let tip = points.next()?;
        let from = points.find(|p| *p != tip)?;
        let (tip, from) = (self.px(tip), self.px(from));
        let dir = (tip - from).normalize_or_zero();
        if dir == DVec2::ZERO {
            return None;
        }
        let base = tip - dir * defaults::ARROW_LENGTH;
        let side = dir.perp() * (defaults::ARROW_WIDTH / 2.0);
        Some(
            Polygon::new()
                .set("points", join_points([tip, base + side, base - side]))
                .set("fill", color_token(color))
                .set("stroke", "none"),
        )
    }

    fn draw_text(&self, text: &Text) -> SvgText {
        let at = self.px(text.position());
        let ts = text.text_style();
        let mut el = SvgText::new()
            .set("x", num(at.x))
            .set("y", num(at.y))
            .set("font-size", num(ts.font_size))
            .set("font-family", family_token(ts.font_family))
            .set("text-anchor", anchor_token(ts.alignment))
            .set("fill", color_token(ts.style.line_color))
            .add(TextNode::new(text.text()));
        // y is flipped, so counter-clockwise turns become negative
        let degrees = text.angle().to_degrees();
        if degrees.abs() > 1e-9 {
            el = el.set(
                "transform",
                format!("rotate({} {} {})", num(-degrees), num(at.x), num(at.y)),
            );
        }
        el
    }
}

impl Backend for SvgBackend {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn add(&mut self, drawable: &Drawable) -> Result<()> {
        debug!(kind = drawable.kind(), "svg add");
        match drawable {
            Drawable::Text(text) => self.marks.push(Mark::Text(text.clone())),
            Drawable::Composition(group) => {
                group
                    .apply(|child| self.add(child))
                    .into_values()
                    .collect::<Result<()>>()?;
            }
            other => {
                if let Some(curve) = other.as_curve() {
                    self.marks.push(Mark::Curve(curve.clone()));
                }
            }
        }
        Ok(())
    }

    fn erase(&mut self) {
        self.marks.clear();
    }

    fn show(&mut self) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", self.to_document()).map_err(|source| SketchError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        ::svg::save(path, &self.to_document()).map_err(|source| SketchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), marks = self.marks.len(), "saved svg");
        Ok(())
    }
}

/// Round to the emitted precision, without negative zero
fn num(v: f64) -> String {
    let factor = 10f64.powi(defaults::PRECISION);
    let rounded = (v * factor).round() / factor;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

fn join_points(points: impl IntoIterator<Item = DVec2>) -> String {
    points
        .into_iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn color_token(color: Color) -> &'static str {
    match color {
        Color::Grey => "grey",
        Color::Black => "black",
        Color::Brown => "brown",
        Color::Red => "red",
        Color::Orange => "orange",
        Color::Yellow => "yellow",
        Color::Green => "green",
        Color::Cyan => "cyan",
        Color::Blue => "blue",
        Color::Magenta => "magenta",
        Color::Purple => "purple",
        Color::White => "white",
    }
}

/// `stroke-dasharray` for a line style; solid lines have none
pub fn dash_array(style: LineStyle) -> Option<&'static str> {
    match style {
        LineStyle::Solid => None,
        LineStyle::Dotted => Some("2,3"),
        LineStyle::DashDot => Some("6,3,2,3"),
        LineStyle::Dashed => Some("6,4"),
    }
}

pub fn pattern_token(kind: FillPattern) -> &'static str {
    match kind {
        FillPattern::Vertical => "vertical",
        FillPattern::Horizontal => "horizontal",
        FillPattern::Cross => "cross",
        FillPattern::Square => "square",
        FillPattern::Star => "star",
        FillPattern::Dot => "dot",
        FillPattern::Circle => "circle",
        FillPattern::SmallCircle => "small-circle",
        FillPattern::UpRightToLeft => "up-right-to-left",
        FillPattern::UpLeftToRight => "up-left-to-right",
    }
}

fn family_token(family: FontFamily) -> &'static str {
    match family {
        FontFamily::Serif => "serif",
        FontFamily::Sans => "sans-serif",
        FontFamily::Mono => "monospace",
    }
}

fn anchor_token(alignment: TextAlignment) -> &'static str {
    match alignment {
        TextAlignment::Left => "start",
        TextAlignment::Center => "middle",
        TextAlignment::Right => "end",
    }
}

fn pattern_id(kind: FillPattern, background: Color) -> String {
    format!("pattern-{}-{}", pattern_token(kind), color_token(background))
}

/// One tile of a fill pattern over its background color
fn pattern(kind: FillPattern, background: Color) -> Pattern {
    let t = defaults::PATTERN_TILE;
    let h = t / 2.0;
    let stroke = num(defaults::PATTERN_STROKE_WIDTH);
    let line = |x1: f64, y1: f64, x2: f64, y2: f64| {
        SvgLine::new()
            .set("x1", num(x1))
            .set("y1", num(y1))
            .set("x2", num(x2))
            .set("y2", num(y2))
            .set("stroke", "black")
            .set("stroke-width", stroke.as_str())
    };
    let ring = |r: f64, filled: bool| {
        SvgCircle::new()
            .set("cx", num(h))
            .set("cy", num(h))
            .set("r", num(r))
            .set("fill", if filled { "black" } else { "none" })
            .set("stroke", "black")
            .set("stroke-width", stroke.as_str())
    };

    let tile = Pattern::new()
        .set("id", pattern_id(kind, background))
        .set("patternUnits", "userSpaceOnUse")
        .set("width", num(t))
        .set("height", num(t))
        .add(
            SvgRect::new()
                .set("width", num(t))
                .set("height", num(t))
                .set("fill", color_token(background)),
        );

    match kind {
        FillPattern::Vertical => tile.add(line(h, 0.0, h, t)),
        FillPattern::Horizontal => tile.add(line(0.0, h, t, h)),
        FillPattern::Cross => tile.add(line(0.0, 0.0, t, t)).add(line(0.0, t, t, 0.0)),
        FillPattern::Square => tile.add(line(h, 0.0, h, t)).add(line(0.0, h, t, h)),
        FillPattern::Star => tile
            .add(line(h, 0.0, h, t))
            .add(line(0.0, h, t, h))
            .add(line(0.0, 0.0, t, t))
            .add(line(0.0, t, t, 0.0)),
        FillPattern::Dot => tile.add(ring(t / 8.0, true)),
        FillPattern::Circle => tile.add(ring(t / 3.0, false)),
        FillPattern::SmallCircle => tile.add(ring(t / 6.0, false)),
        // pixel y grows downward
        FillPattern::UpRightToLeft => tile.add(line(0.0, 0.0, t, t)),
        FillPattern::UpLeftToRight => tile.add(line(0.0, t, t, 0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composition;
    use crate::shapes::{Line, Rectangle};
    use crate::style::{ArrowStyle, StyleExt};

    fn backend() -> SvgBackend {
        SvgBackend::new(BoundingBox::new(0.0, 2.0, 0.0, 1.0).unwrap())
    }

    /// Element names in document order
    fn tags(svg: &str) -> String {
        svg.split('<')
            .skip(1)
            .filter(|s| !s.starts_with('/'))
            .map(|s| {
                s.split(|c: char| c.is_whitespace() || c == '>' || c == '/')
                    .next()
                    .unwrap_or("")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn flips_y_and_applies_margin() {
        let mut svg = backend();
        svg.add(&Line::new(Point::ORIGIN, Point::new(1.0, 1.0)).unwrap().into())
            .unwrap();
        let out = svg.to_svg_string();
        assert!(out.contains(r#"points="10,60 60,10""#), "{out}");
        assert!(out.contains(r#"viewBox="0 0 120 70""#), "{out}");
        insta::assert_snapshot!(tags(&out), @"svg polyline");
    }

    #[test]
    fn arrowheads_follow_arrow_style() {
        let mut svg = backend();
        let line = Line::new(Point::ORIGIN, Point::UNIT_X)
            .unwrap()
            .with_arrow(Some(ArrowStyle::Double));
        svg.add(&line.into()).unwrap();
        let out = svg.to_svg_string();
        insta::assert_snapshot!(tags(&out), @"svg polyline polygon polygon");
        // end head: tip at (60, 60), base 10px back toward the start
        assert!(out.contains(r#"points="60,60 50,63 50,57""#), "{out}");
    }

    #[test]
    fn patterns_become_shared_defs() {
        let mut svg = backend();
        let rect = Rectangle::new(Point::ORIGIN, 1.0, 0.5)
            .unwrap()
            .with_fill_pattern(Some(FillPattern::Cross));
        svg.add(&rect.clone().into()).unwrap();
        svg.add(&rect.translate(Point::new(0.5, 0.0)).into()).unwrap();
        let out = svg.to_svg_string();
        insta::assert_snapshot!(tags(&out), @"svg defs pattern rect line line polyline polyline");
        assert!(out.contains(r#"fill="url(#pattern-cross-white)""#), "{out}");
    }

    #[test]
    fn shadow_is_drawn_first() {
        let mut svg = backend();
        let line = Line::new(Point::ORIGIN, Point::UNIT_X)
            .unwrap()
            .with_shadow(Some(0.2));
        svg.add(&line.into()).unwrap();
        let out = svg.to_svg_string();
        assert!(out.contains(r#"points="20,70 70,70""#), "{out}");
        assert!(out.contains(r#"stroke="grey""#), "{out}");
        insta::assert_snapshot!(tags(&out), @"svg polyline polyline");
    }

    #[test]
    fn compositions_are_flattened() {
        let group = Composition::new()
            .add("a", Line::new(Point::ORIGIN, Point::UNIT_X).unwrap())
            .add(
                "nested",
                Composition::new().add("t", Text::new("hello", Point::new(1.0, 0.5))),
            );
        let mut svg = backend();
        svg.add(&group.into()).unwrap();
        assert_eq!(svg.len(), 2);
        let out = svg.to_svg_string();
        insta::assert_snapshot!(tags(&out), @"svg polyline text");
        assert!(out.contains(r#"text-anchor="middle""#), "{out}");
        assert!(out.contains("hello"), "{out}");
    }

    #[test]
    fn rotated_text_gets_a_transform() {
        let mut svg = backend();
        let label = Text::new("v", Point::new(1.0, 0.5))
            .with_direction(Point::UNIT_Y)
            .unwrap();
        svg.add(&label.into()).unwrap();
        let out = svg.to_svg_string();
        assert!(out.contains(r#"transform="rotate(-90 60 35)""#), "{out}");
    }

    #[test]
    fn erase_forgets_marks() {
        let mut svg = backend();
        svg.add(&Line::new(Point::ORIGIN, Point::UNIT_X).unwrap().into())
            .unwrap();
        svg.erase();
        assert!(svg.is_empty());
        insta::assert_snapshot!(tags(&svg.to_svg_string()), @"svg");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(num(60.0), "60");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(1.23456), "1.235");
    }

    #[test]
    fn every_pattern_has_a_token() {
        let ids: Vec<_> = FillPattern::ALL.iter().map(|&k| pattern_id(k, Color::White)).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }
}

//! Named groups of drawables
//!
//! A [`Composition`] is an insertion-ordered map from keys to [`Drawable`]s.
//! The map sits behind an [`Arc`], so cloning a composition is cheap and
//! every structural change copies the map only when it is shared.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::errors::{Result, SketchError};
use crate::log::debug;
use crate::shapes::{Drawable, Transform};
use crate::style::{Stylable, Style, StyleUpdate};
use crate::types::{Angle, Point};

/// A parametric figure assembled from primitives.
///
/// Builders validate their parameters and produce the finished group.
pub trait Composite {
    fn build(&self) -> Result<Composition>;

    fn to_drawable(&self) -> Result<Drawable> {
        Ok(self.build()?.into())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Composition(Arc<IndexMap<String, Drawable>>);

impl Composition {
    pub fn new() -> Self {
        Composition::default()
    }

    /// A copy with `drawable` stored under `key`.
    ///
    /// An existing key keeps its position and has its value replaced.
    /// `self` is left untouched.
    pub fn add(&self, key: impl Into<String>, drawable: impl Into<Drawable>) -> Composition {
        let mut next = self.clone();
        next.insert(key.into(), drawable.into());
        next
    }

    /// In-place insert, used while building
    pub(crate) fn insert(&mut self, key: String, drawable: Drawable) {
        Arc::make_mut(&mut self.0).insert(key, drawable);
    }

    pub fn get(&self, key: &str) -> Result<&Drawable> {
        self.0.get(key).ok_or_else(|| SketchError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Look up through nested compositions, one key per level.
    pub fn get_path(&self, path: &[&str]) -> Result<&Drawable> {
        let Some((first, rest)) = path.split_first() else {
            return Err(SketchError::KeyNotFound { key: String::new() });
        };
        let mut current = self.get(first)?;
        for key in rest {
            current = match current {
                Drawable::Composition(inner) => inner.get(key)?,
                _ => {
                    return Err(SketchError::KeyNotFound {
                        key: key.to_string(),
                    });
                }
            };
        }
        Ok(current)
    }

    /// Map `f` over the children in insertion order
    pub fn apply<R>(&self, mut f: impl FnMut(&Drawable) -> R) -> IndexMap<String, R> {
        self.0.iter().map(|(k, v)| (k.clone(), f(v))).collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Drawable)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether both values share the same underlying map
    pub fn ptr_eq(&self, other: &Composition) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// A new map with every child passed through `f`, keys in order
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn map_children(&self, op: &'static str, f: impl Fn(&Drawable) -> Drawable) -> Composition {
        let map: IndexMap<_, _> = self.0.iter().map(|(k, v)| (k.clone(), f(v))).collect();
        debug!(op, children = map.len(), "rebuilt composition");
        Composition(Arc::new(map))
    }

    /// Like [`Self::map_children`], stopping at the first child that fails
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn try_map_children(
        &self,
        op: &'static str,
        f: impl Fn(&Drawable) -> Result<Drawable>,
    ) -> Result<Composition> {
        let map = self
            .0
            .iter()
            .map(|(k, v)| Ok((k.clone(), f(v)?)))
            .collect::<Result<IndexMap<_, _>>>()?;
        debug!(op, children = map.len(), "rebuilt composition");
        Ok(Composition(Arc::new(map)))
    }
}

impl<K: Into<String>, D: Into<Drawable>> FromIterator<(K, D)> for Composition {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let map: IndexMap<String, Drawable> = iter
            .into_iter()
            .map(|(k, d)| (k.into(), d.into()))
            .collect();
        debug!(children = map.len(), "built composition");
        Composition(Arc::new(map))
    }
}

impl<'a> IntoIterator for &'a Composition {
    type Item = (&'a String, &'a Drawable);
    type IntoIter = indexmap::map::Iter<'a, String, Drawable>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Stylable for Composition {
    /// A composition has no style of its own
    fn style(&self) -> Style {
        Style::default()
    }

    fn apply_style(&mut self, update: StyleUpdate) {
        for child in Arc::make_mut(&mut self.0).values_mut() {
            child.apply_style(update);
        }
    }
}

impl Transform for Composition {
    type Output = Composition;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Composition {
        let angle = angle.into();
        self.map_children("rotate", |child| child.rotate(angle, center))
    }

    fn translate(&self, vec: Point) -> Composition {
        self.map_children("translate", |child| child.translate(vec))
    }

    fn scale(&self, factor: f64) -> Result<Composition> {
        self.try_map_children("scale", |child| child.scale(factor))
    }
}

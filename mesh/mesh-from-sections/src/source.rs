//! Named curve lookup.

use hashbrown::HashMap;
use section_curves::{CurveObject, PlacedCurve};

use crate::error::{SectionError, SectionResult};
use crate::grid::CurveSection;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Something that can look up curve objects by name, such as a scene.
pub trait CurveSource {
    /// The curve object called `name`, if any.
    fn curve(&self, name: &str) -> Option<&CurveObject>;
}

impl<S: CurveSource + ?Sized> CurveSource for &S {
    fn curve(&self, name: &str) -> Option<&CurveObject> {
        (**self).curve(name)
    }
}

/// In-memory [`CurveSource`] keyed by object name.
#[derive(Debug, Clone, Default)]
pub struct CurveLibrary {
    curves: HashMap<String, CurveObject>,
}

impl CurveLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a curve under its own name, returning any curve it replaced.
    pub fn insert(&mut self, curve: CurveObject) -> Option<CurveObject> {
        self.curves.insert(curve.name.clone(), curve)
    }

    /// Remove a curve by name.
    pub fn remove(&mut self, name: &str) -> Option<CurveObject> {
        self.curves.remove(name)
    }

    /// Number of curves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Check if the library has no curves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Curve names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }
}

impl CurveSource for CurveLibrary {
    fn curve(&self, name: &str) -> Option<&CurveObject> {
        self.curves.get(name)
    }
}

impl FromIterator<CurveObject> for CurveLibrary {
    fn from_iter<I: IntoIterator<Item = CurveObject>>(iter: I) -> Self {
        let mut library = Self::new();
        for curve in iter {
            library.insert(curve);
        }
        library
    }
}

/// A section named by its four boundary curves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SectionSpec {
    /// Name of the left curve.
    pub left: String,
    /// Name of the right curve.
    pub right: String,
    /// Name of the top curve.
    pub top: String,
    /// Name of the bottom curve.
    pub bottom: String,
}

impl SectionSpec {
    /// Create a section spec from four curve names.
    pub fn new(
        left: impl Into<String>,
        right: impl Into<String>,
        top: impl Into<String>,
        bottom: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    /// Look up the four curves and place each at its object's location.
    ///
    /// # Errors
    ///
    /// - [`SectionError::UnknownCurve`] if a name is missing from `source`
    /// - [`SectionError::Curve`] if an object has no usable Bézier spline
    pub fn resolve<S: CurveSource + ?Sized>(
        &self,
        source: &S,
    ) -> SectionResult<CurveSection<PlacedCurve>> {
        let place = |name: &str| -> SectionResult<PlacedCurve> {
            let object = source
                .curve(name)
                .ok_or_else(|| SectionError::UnknownCurve(name.to_string()))?;
            Ok(object.placed()?)
        };

        Ok(CurveSection::new(
            place(&self.left)?,
            place(&self.right)?,
            place(&self.top)?,
            place(&self.bottom)?,
        ))
    }
}

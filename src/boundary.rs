/// Classification through an injected marker -> kind function
pub mod callback;
/// Loading and exporting marker configurations as JSON
pub mod config;
/// Boundary condition errors
pub mod error;
/// Classification through explicit lists of markers
pub mod markers;
/// Per-marker coefficients and prescribed essential values
pub mod values;

pub use callback::{default_bc_type, BcTypeFn, CallbackClassifier};
pub use error::{BcError, BcResult, ValidationError};
pub use markers::MarkerRegistry;
pub use values::{EssentialValues, MarkerTable};

use std::fmt;

/// Identifier of a boundary region, as assigned by the mesh
///
/// Signed so that non-positive markers coming from a bad configuration can still be represented (and rejected).
pub type Marker = i32;

/// Expected number of markers registered to a single kind. Determines the stack allocation size of the marker buckets.
pub const EXPECTED_NUM_MARKERS: usize = 8;

/// Type of boundary condition applied on a marked part of the boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BoundaryKind {
    /// Essential (Dirichlet) condition; the solution value is prescribed
    Essential,
    /// Natural (Neumann, Newton) condition; a flux is prescribed. Unregistered markers default to this.
    #[default]
    Natural,
    /// No boundary integrals will be evaluated on this part of the boundary
    None,
}

impl BoundaryKind {
    pub const ALL: [Self; 3] = [Self::Essential, Self::Natural, Self::None];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Natural => "natural",
            Self::None => "none",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Essential => write!(f, "Essential (Dirichlet)"),
            Self::Natural => write!(f, "Natural (Neumann)"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Something which can decide the [BoundaryKind] of a boundary marker
///
/// Assembly code is written once against this trait; [MarkerRegistry] and [CallbackClassifier] are interchangeable behind it.
///
/// Implementors must not be modified once classification has started. All queries take `&self`, so a configured
/// classifier can be shared freely between worker threads.
pub trait BoundaryClassifier: Send + Sync {
    fn classify(&self, marker: Marker) -> BcResult<BoundaryKind>;

    /// Independent copy of this classifier behind a new box
    fn boxed_clone(&self) -> Box<dyn BoundaryClassifier>;
}

impl BoundaryClassifier for MarkerRegistry {
    fn classify(&self, marker: Marker) -> BcResult<BoundaryKind> {
        Ok(self.get_type(marker))
    }

    fn boxed_clone(&self) -> Box<dyn BoundaryClassifier> {
        Box::new(self.duplicate())
    }
}

impl BoundaryClassifier for CallbackClassifier {
    fn classify(&self, marker: Marker) -> BcResult<BoundaryKind> {
        self.get_type(marker)
    }

    fn boxed_clone(&self) -> Box<dyn BoundaryClassifier> {
        Box::new(self.duplicate())
    }
}

impl Clone for Box<dyn BoundaryClassifier> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Vec<Box<dyn BoundaryClassifier>> {
        let mut registry = MarkerRegistry::new();
        registry.add_essential([1]).unwrap();

        let mut callback = CallbackClassifier::new();
        callback.register_fn(|marker| {
            if marker == 1 {
                BoundaryKind::Essential
            } else {
                BoundaryKind::Natural
            }
        });

        let mut classifiers: Vec<Box<dyn BoundaryClassifier>> = Vec::new();
        classifiers.push(Box::new(registry));
        classifiers.push(Box::new(callback));
        classifiers
    }

    #[test]
    fn variants_are_interchangeable() {
        for classifier in configured() {
            assert_eq!(classifier.classify(1).unwrap(), BoundaryKind::Essential);
            assert_eq!(classifier.classify(2).unwrap(), BoundaryKind::Natural);
        }
    }

    #[test]
    fn boxed_clone_keeps_classification() {
        for classifier in configured() {
            let copy = classifier.clone();
            assert_eq!(copy.classify(1).unwrap(), BoundaryKind::Essential);
        }
    }

    #[test]
    fn kind_names() {
        for kind in BoundaryKind::ALL {
            assert_eq!(BoundaryKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(BoundaryKind::from_name("robin"), None);
        assert_eq!(BoundaryKind::default(), BoundaryKind::Natural);
    }
}

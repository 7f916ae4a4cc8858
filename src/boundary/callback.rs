use super::{BcError, BcResult, BoundaryKind, Marker};
use std::fmt;
use std::sync::Arc;

/// Shared marker -> [BoundaryKind] function
pub type BcTypeFn = Arc<dyn Fn(Marker) -> BoundaryKind + Send + Sync>;

/// Classifies every marker as [BoundaryKind::Natural]
pub fn default_bc_type(_marker: Marker) -> BoundaryKind {
    BoundaryKind::Natural
}

/// Links boundary markers with boundary condition types using a classification function
///
/// No markers are stored, so there is no consistency check for this variant; the installed function is
/// responsible for being self-consistent.
#[derive(Clone, Default)]
pub struct CallbackClassifier {
    callback: Option<BcTypeFn>,
}

impl CallbackClassifier {
    /// Construct a classifier without a callback. It can't classify anything until [CallbackClassifier::register_callback] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a classifier with a callback already installed
    pub fn with_fn<F>(callback: F) -> Self
    where
        F: Fn(Marker) -> BoundaryKind + Send + Sync + 'static,
    {
        let mut classifier = Self::new();
        classifier.register_fn(callback);
        classifier
    }

    /// Install a classification function. `None` installs [default_bc_type].
    pub fn register_callback(&mut self, callback: Option<BcTypeFn>) {
        let callback: BcTypeFn = match callback {
            Some(callback) => callback,
            None => Arc::new(default_bc_type),
        };
        self.callback = Some(callback);
    }

    pub fn register_fn<F>(&mut self, callback: F)
    where
        F: Fn(Marker) -> BoundaryKind + Send + Sync + 'static,
    {
        self.register_callback(Some(Arc::new(callback)));
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Get the type of boundary condition applied at some marker by delegating to the installed function
    ///
    /// Returns an error if no callback has been registered.
    pub fn get_type(&self, marker: Marker) -> BcResult<BoundaryKind> {
        match &self.callback {
            Some(callback) => Ok(callback(marker)),
            None => Err(BcError::NoCallback { marker }),
        }
    }

    /// Produce a new classifier which shares this one's classification function
    pub fn duplicate(&self) -> Self {
        log::trace!("duplicating boundary condition callback");
        self.clone()
    }
}

impl fmt::Debug for CallbackClassifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CallbackClassifier")
            .field("registered", &self.has_callback())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // same classification as the CUBIT heat example: marker 1 is held at a fixed temperature
    fn bc_types(marker: Marker) -> BoundaryKind {
        if marker == 1 {
            BoundaryKind::Essential
        } else {
            BoundaryKind::Natural
        }
    }

    #[test]
    fn unregistered_callback() {
        let bc = CallbackClassifier::new();
        assert!(!bc.has_callback());
        match bc.get_type(1) {
            Err(BcError::NoCallback { marker }) => assert_eq!(marker, 1),
            other => panic!("expected a missing callback error, got {:?}", other),
        }
    }

    #[test]
    #[should_panic]
    fn unregistered_callback_panics_on_unwrap() {
        CallbackClassifier::new().get_type(3).unwrap();
    }

    #[test]
    fn delegates_to_callback() {
        let mut bc = CallbackClassifier::new();
        bc.register_callback(Some(Arc::new(bc_types)));

        for marker in -5..20 {
            assert_eq!(bc.get_type(marker).unwrap(), bc_types(marker));
        }
    }

    #[test]
    fn default_callback() {
        let mut bc = CallbackClassifier::new();
        bc.register_callback(None);

        assert!(bc.has_callback());
        for marker in [-1, 0, 1, 2, 1000] {
            assert_eq!(bc.get_type(marker).unwrap(), BoundaryKind::Natural);
        }
    }

    #[test]
    fn closures_can_capture_state() {
        let skipped = vec![7, 9];
        let bc = CallbackClassifier::with_fn(move |marker| {
            if skipped.contains(&marker) {
                BoundaryKind::None
            } else {
                BoundaryKind::Natural
            }
        });

        assert_eq!(bc.get_type(9).unwrap(), BoundaryKind::None);
        assert_eq!(bc.get_type(8).unwrap(), BoundaryKind::Natural);
    }

    #[test]
    fn duplicate_shares_callback() {
        let original = CallbackClassifier::with_fn(bc_types);
        let mut copy = original.duplicate();

        assert_eq!(copy.get_type(1).unwrap(), BoundaryKind::Essential);

        copy.register_callback(None);
        assert_eq!(copy.get_type(1).unwrap(), BoundaryKind::Natural);
        assert_eq!(original.get_type(1).unwrap(), BoundaryKind::Essential);
    }

    #[test]
    fn duplicate_of_empty_classifier() {
        let copy = CallbackClassifier::new().duplicate();
        assert!(copy.get_type(1).is_err());
    }
}

use super::{BoundaryKind, Marker};
use thiserror::Error;

pub type BcResult<T> = Result<T, BcError>;

/// Errors raised while configuring or querying boundary conditions
///
/// Every variant describes a configuration mistake; none of them are transient.
#[derive(Error, Debug)]
pub enum BcError {
    /// A registration call was made without any markers
    #[error("{kind} registration expects at least one marker; Cannot register an empty marker set!")]
    EmptyMarkerSet { kind: BoundaryKind },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `get_type` was called on a [CallbackClassifier](super::callback::CallbackClassifier) with nothing installed
    #[error("No callback was registered; Cannot classify marker {marker}!")]
    NoCallback { marker: Marker },

    #[error("Malformed boundary condition configuration: {message}")]
    Config { message: String },

    #[error("Unable to read boundary condition configuration")]
    Io(#[from] std::io::Error),

    /// No prescribed value is known for a marker
    #[error("No {kind} value was prescribed for marker {marker}; Cannot evaluate boundary value!")]
    MissingValue { kind: BoundaryKind, marker: Marker },

    #[error("{kind} bucket holds {expected} markers but {found} coefficients were supplied")]
    CoefficientCount {
        kind: BoundaryKind,
        expected: usize,
        found: usize,
    },
}

impl BcError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// First inconsistency found by [MarkerRegistry::check_consistency](super::markers::MarkerRegistry::check_consistency)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Boundary markers need to be positive; found {marker} in the {kind} bucket!")]
    NonPositive { kind: BoundaryKind, marker: Marker },

    #[error("Duplicated {kind} boundary marker {marker}!")]
    Duplicate { kind: BoundaryKind, marker: Marker },

    #[error("Mismatched boundary markers: {marker} is registered as both {kind} and {other}!")]
    Mismatched {
        marker: Marker,
        kind: BoundaryKind,
        other: BoundaryKind,
    },
}

impl ValidationError {
    /// The marker which violated the invariant
    pub fn marker(&self) -> Marker {
        match self {
            Self::NonPositive { marker, .. }
            | Self::Duplicate { marker, .. }
            | Self::Mismatched { marker, .. } => *marker,
        }
    }
}

//! Boundary condition marker classification for Finite Element assembly
//!
//! A [MarkerRegistry](boundary::MarkerRegistry) or [CallbackClassifier](boundary::CallbackClassifier) decides which
//! type of boundary condition applies at each mesh boundary marker. Assembly code uses the shared
//! [BoundaryClassifier] interface to sort boundary faces with a [BoundaryPartition].

/// Sorting boundary faces for assembly
pub mod assembly;
/// Boundary markers and boundary condition types
pub mod boundary;

pub use assembly::{BoundaryFace, BoundaryPartition};
pub use boundary::{
    BcError, BcResult, BoundaryClassifier, BoundaryKind, CallbackClassifier, EssentialValues, Marker,
    MarkerRegistry,
};

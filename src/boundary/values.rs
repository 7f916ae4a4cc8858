use super::{BcError, BcResult, BoundaryKind, Marker, MarkerRegistry};
use nalgebra::Point3;
use std::fmt;
use std::sync::Arc;

/// Per-marker coefficients stored in parallel with one bucket of a [MarkerRegistry]
///
/// The `n`th coefficient belongs to the `n`th marker registered to the table's [BoundaryKind]. The table borrows
/// its registry, so the registry can't be modified while the table is in use.
#[derive(Debug, Clone)]
pub struct MarkerTable<'r, S> {
    registry: &'r MarkerRegistry,
    kind: BoundaryKind,
    values: Vec<S>,
}

impl MarkerRegistry {
    /// Attach a list of coefficients to the markers registered to some [BoundaryKind]
    ///
    /// Returns an error if the number of coefficients doesn't match the number of registered markers.
    pub fn coefficients<S>(&self, kind: BoundaryKind, values: Vec<S>) -> BcResult<MarkerTable<'_, S>> {
        let expected = self.markers(kind).len();
        if values.len() != expected {
            return Err(BcError::CoefficientCount {
                kind,
                expected,
                found: values.len(),
            });
        }

        Ok(MarkerTable {
            registry: self,
            kind,
            values,
        })
    }
}

impl<'r, S> MarkerTable<'r, S> {
    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    /// Retrieve the coefficient associated with a marker (`None` if the marker isn't registered to this table's kind)
    pub fn get(&self, marker: Marker) -> Option<&S> {
        self.registry
            .find_index(self.kind, marker)
            .map(|idx| &self.values[idx])
    }

    /// Iterate over `(marker, coefficient)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (Marker, &S)> + '_ {
        self.registry
            .markers(self.kind)
            .iter()
            .copied()
            .zip(self.values.iter())
    }
}

/// Function describing the prescribed solution value on essential (Dirichlet) parts of the boundary
///
/// Generic over the scalar type so that real and complex valued problems can share it.
pub struct EssentialValues<S> {
    eval: Arc<dyn Fn(Marker, &Point3<f64>) -> BcResult<S> + Send + Sync>,
}

impl<S> EssentialValues<S> {
    pub fn new<F>(eval: F) -> Self
    where
        F: Fn(Marker, &Point3<f64>) -> S + Send + Sync + 'static,
    {
        Self::try_new(move |marker, point| Ok(eval(marker, point)))
    }

    /// Same as `new`, except the function may refuse to evaluate some markers
    pub fn try_new<F>(eval: F) -> Self
    where
        F: Fn(Marker, &Point3<f64>) -> BcResult<S> + Send + Sync + 'static,
    {
        Self {
            eval: Arc::new(eval),
        }
    }

    /// The same value everywhere on the essential boundary
    pub fn constant(value: S) -> Self
    where
        S: Clone + Send + Sync + 'static,
    {
        Self::new(move |_, _| value.clone())
    }

    /// Look up one value per essential marker in a [MarkerTable]
    ///
    /// Evaluating a marker which is not in the table returns an error.
    pub fn from_table(table: &MarkerTable<'_, S>) -> Self
    where
        S: Clone + Send + Sync + 'static,
    {
        let per_marker: Vec<(Marker, S)> = table.iter().map(|(m, v)| (m, v.clone())).collect();
        let kind = table.kind();

        Self::try_new(move |marker, _| {
            per_marker
                .iter()
                .find(|(m, _)| *m == marker)
                .map(|(_, v)| v.clone())
                .ok_or(BcError::MissingValue { kind, marker })
        })
    }

    pub fn value(&self, marker: Marker, point: &Point3<f64>) -> BcResult<S> {
        (self.eval)(marker, point)
    }
}

impl<S> Clone for EssentialValues<S> {
    fn clone(&self) -> Self {
        Self {
            eval: self.eval.clone(),
        }
    }
}

impl<S> fmt::Debug for EssentialValues<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EssentialValues")
    }
}

use crate::boundary::{BcResult, BoundaryClassifier, BoundaryKind, EssentialValues, Marker};
use nalgebra::Point3;
use rayon::prelude::*;
use std::collections::HashSet;

/// A face (or edge in 2D) on the boundary of a mesh, as seen by the assembly driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryFace {
    pub id: usize,
    pub marker: Marker,
    pub centroid: Point3<f64>,
}

impl BoundaryFace {
    pub fn new(id: usize, marker: Marker, centroid: Point3<f64>) -> Self {
        Self {
            id,
            marker,
            centroid,
        }
    }
}

/// Boundary face IDs sorted by the type of boundary condition applied to them
///
/// * `essential` faces are handed to the degree-of-freedom constraint step
/// * `natural` faces contribute boundary integrals
/// * `skipped` faces contribute nothing
///
/// Each list keeps the order in which the faces were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryPartition {
    pub essential: Vec<usize>,
    pub natural: Vec<usize>,
    pub skipped: Vec<usize>,
}

impl BoundaryPartition {
    /// Classify every face once using some [BoundaryClassifier]
    ///
    /// Returns the first classification error encountered.
    pub fn build<C>(classifier: &C, faces: &[BoundaryFace]) -> BcResult<Self>
    where
        C: BoundaryClassifier + ?Sized,
    {
        let mut partition = Self::default();
        for face in faces {
            let kind = classifier.classify(face.marker)?;
            partition.push(face.id, kind);
        }

        partition.log_counts();
        Ok(partition)
    }

    /// Same as `build`, except faces are classified in parallel using the Rayon Global ThreadPool
    ///
    /// If several faces fail to classify, any one of their errors may be returned.
    pub fn build_parallel<C>(classifier: &C, faces: &[BoundaryFace]) -> BcResult<Self>
    where
        C: BoundaryClassifier + ?Sized,
    {
        let kinds: Vec<(usize, BoundaryKind)> = faces
            .par_iter()
            .map(|face| {
                classifier
                    .classify(face.marker)
                    .map(|kind| (face.id, kind))
            })
            .collect::<BcResult<Vec<_>>>()?;

        let mut partition = Self::default();
        for (face_id, kind) in kinds {
            partition.push(face_id, kind);
        }

        partition.log_counts();
        Ok(partition)
    }

    pub fn faces_of(&self, kind: BoundaryKind) -> &[usize] {
        match kind {
            BoundaryKind::Essential => self.essential.as_slice(),
            BoundaryKind::Natural => self.natural.as_slice(),
            BoundaryKind::None => self.skipped.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.essential.len() + self.natural.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate the prescribed value at the centroid of every essential face
    ///
    /// `faces` must be the same faces that the partition was built from. Returns `(face_id, value)` pairs in the order
    /// the faces are supplied, or the first error raised while evaluating a value.
    pub fn essential_constraints<S>(
        &self,
        faces: &[BoundaryFace],
        values: &EssentialValues<S>,
    ) -> BcResult<Vec<(usize, S)>> {
        let essential_ids: HashSet<usize> = self.essential.iter().copied().collect();

        faces
            .iter()
            .filter(|face| essential_ids.contains(&face.id))
            .map(|face| {
                values
                    .value(face.marker, &face.centroid)
                    .map(|value| (face.id, value))
            })
            .collect()
    }

    fn push(&mut self, face_id: usize, kind: BoundaryKind) {
        match kind {
            BoundaryKind::Essential => self.essential.push(face_id),
            BoundaryKind::Natural => self.natural.push(face_id),
            BoundaryKind::None => self.skipped.push(face_id),
        }
    }

    fn log_counts(&self) {
        log::trace!(
            "partitioned {} boundary faces ({} essential, {} natural, {} skipped)",
            self.len(),
            self.essential.len(),
            self.natural.len(),
            self.skipped.len()
        );
    }
}

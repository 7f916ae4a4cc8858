use super::{BcError, BcResult, BoundaryKind, Marker, ValidationError, EXPECTED_NUM_MARKERS};
use smallvec::SmallVec;

type MarkerBucket = SmallVec<[Marker; EXPECTED_NUM_MARKERS]>;

/// Links boundary markers with boundary condition types using explicit lists of markers
///
/// Markers are registered into one of three buckets (essential, natural or none). Any marker which is not
/// registered is treated as [BoundaryKind::Natural].
///
/// Registration is append-only and does not validate anything. Call [MarkerRegistry::check_consistency]
/// once all markers have been registered, and before the registry is used for classification.
///
/// ```
/// use fem_bc::boundary::{BoundaryKind, MarkerRegistry};
///
/// let mut bc = MarkerRegistry::new();
/// bc.add_essential([1, 3]).unwrap();
/// bc.add_natural([2]).unwrap();
/// bc.add_none([5]).unwrap();
/// bc.check_consistency().unwrap();
///
/// assert_eq!(bc.get_type(5), BoundaryKind::None);
/// assert_eq!(bc.get_type(99), BoundaryKind::Natural);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerRegistry {
    essential: MarkerBucket,
    natural: MarkerBucket,
    none: MarkerBucket,
}

impl MarkerRegistry {
    /// Construct a registry without any markers
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_essential(&mut self, markers: impl IntoIterator<Item = Marker>) -> BcResult<()> {
        self.add(BoundaryKind::Essential, markers)
    }

    pub fn add_natural(&mut self, markers: impl IntoIterator<Item = Marker>) -> BcResult<()> {
        self.add(BoundaryKind::Natural, markers)
    }

    pub fn add_none(&mut self, markers: impl IntoIterator<Item = Marker>) -> BcResult<()> {
        self.add(BoundaryKind::None, markers)
    }

    /// Append a set of markers to the bucket of one [BoundaryKind]
    ///
    /// Returns an error if no markers are supplied. Duplicates are accepted here and only rejected by [MarkerRegistry::check_consistency].
    pub fn add(
        &mut self,
        kind: BoundaryKind,
        markers: impl IntoIterator<Item = Marker>,
    ) -> BcResult<()> {
        let bucket = self.bucket_mut(kind);
        let num_before = bucket.len();
        bucket.extend(markers);

        let num_added = bucket.len() - num_before;
        if num_added == 0 {
            return Err(BcError::EmptyMarkerSet { kind });
        }

        log::debug!("registered {} {} boundary marker(s)", num_added, kind.name());
        Ok(())
    }

    pub fn is_essential(&self, marker: Marker) -> bool {
        self.essential.contains(&marker)
    }

    pub fn is_natural(&self, marker: Marker) -> bool {
        self.natural.contains(&marker)
    }

    pub fn is_none(&self, marker: Marker) -> bool {
        self.none.contains(&marker)
    }

    /// Get the type of boundary condition applied at some marker
    ///
    /// Essential markers take precedence over none markers; everything else is natural.
    pub fn get_type(&self, marker: Marker) -> BoundaryKind {
        if self.is_essential(marker) {
            BoundaryKind::Essential
        } else if self.is_none(marker) {
            BoundaryKind::None
        } else {
            BoundaryKind::Natural
        }
    }

    pub fn find_index_essential(&self, marker: Marker) -> Option<usize> {
        self.find_index(BoundaryKind::Essential, marker)
    }

    pub fn find_index_natural(&self, marker: Marker) -> Option<usize> {
        self.find_index(BoundaryKind::Natural, marker)
    }

    pub fn find_index_none(&self, marker: Marker) -> Option<usize> {
        self.find_index(BoundaryKind::None, marker)
    }

    /// Position of a marker within the bucket of one [BoundaryKind] (`None` if it was not registered to that kind)
    pub fn find_index(&self, kind: BoundaryKind, marker: Marker) -> Option<usize> {
        self.markers(kind).iter().position(|m| *m == marker)
    }

    /// The markers registered to one [BoundaryKind], in registration order
    pub fn markers(&self, kind: BoundaryKind) -> &[Marker] {
        match kind {
            BoundaryKind::Essential => self.essential.as_slice(),
            BoundaryKind::Natural => self.natural.as_slice(),
            BoundaryKind::None => self.none.as_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        BoundaryKind::ALL
            .iter()
            .all(|kind| self.markers(*kind).is_empty())
    }

    /// Make sure that the registered markers are positive, unique within their bucket, and not registered to more than one kind.
    ///
    /// Returns the first violation found.
    pub fn check_consistency(&self) -> BcResult<()> {
        for kind in BoundaryKind::ALL {
            let bucket = self.markers(kind);

            for (i, marker) in bucket.iter().enumerate() {
                if *marker <= 0 {
                    return Err(ValidationError::NonPositive {
                        kind,
                        marker: *marker,
                    }
                    .into());
                }

                if bucket.iter().skip(i + 1).any(|m| m == marker) {
                    return Err(ValidationError::Duplicate {
                        kind,
                        marker: *marker,
                    }
                    .into());
                }

                // overlaps with the none bucket are caught from the essential and natural sides
                if kind != BoundaryKind::None {
                    if let Some(other) = self.registered_elsewhere(kind, *marker) {
                        return Err(ValidationError::Mismatched {
                            marker: *marker,
                            kind,
                            other,
                        }
                        .into());
                    }
                }
            }
        }

        log::debug!(
            "boundary markers are consistent ({} essential, {} natural, {} none)",
            self.essential.len(),
            self.natural.len(),
            self.none.len()
        );
        Ok(())
    }

    /// Produce an independent copy of this registry
    pub fn duplicate(&self) -> Self {
        log::trace!("duplicating boundary marker registry");
        self.clone()
    }

    fn registered_elsewhere(&self, kind: BoundaryKind, marker: Marker) -> Option<BoundaryKind> {
        BoundaryKind::ALL
            .into_iter()
            .filter(|other| *other != kind)
            .find(|other| self.find_index(*other, marker).is_some())
    }

    fn bucket_mut(&mut self, kind: BoundaryKind) -> &mut MarkerBucket {
        match kind {
            BoundaryKind::Essential => &mut self.essential,
            BoundaryKind::Natural => &mut self.natural,
            BoundaryKind::None => &mut self.none,
        }
    }
}

//! Externally assigned table indices.

/// An index handed out by the style registry, plus whether it was assigned
/// against the current content of its owner.
///
/// The value itself survives invalidation so that callers can still read the
/// last assignment; only [`IndexSlot::is_assigned`] changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct IndexSlot {
    index: Option<u32>,
    assigned: bool,
}

impl IndexSlot {
    #[inline]
    pub(crate) fn get(&self) -> Option<u32> {
        self.index
    }

    #[inline]
    pub(crate) fn assign(&mut self, index: u32) {
        self.index = Some(index);
        self.assigned = true;
    }

    #[inline]
    pub(crate) fn is_assigned(&self) -> bool {
        self.assigned
    }

    #[inline]
    pub(crate) fn invalidate(&mut self) {
        self.assigned = false;
    }
}

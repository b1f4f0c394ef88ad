//! Cell protection flags.

use super::key::KeyWriter;

/// Protection flags of a cell. They only take effect once the sheet is
/// protected.
#[derive(Debug, Clone)]
pub struct Protection {
    hidden: bool,
    locked: bool,
    dirty: bool,
}

impl Default for Protection {
    fn default() -> Self {
        Self {
            hidden: false,
            locked: true,
            dirty: false,
        }
    }
}

impl Protection {
    /// Create the default protection (locked, not hidden).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether formulas are hidden
    #[inline]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.dirty = true;
    }

    #[inline]
    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        self.dirty = true;
    }

    /// Check if the flags differ from the defaults.
    #[inline]
    pub fn has_settings(&self) -> bool {
        self.hidden || !self.locked
    }

    pub(crate) fn write_key(&self, w: &mut KeyWriter) {
        w.bool(self.hidden).bool(self.locked);
    }

    #[inline]
    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

use serde::Serialize;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub current_index: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// 1-based position for display, clamped to `total` once complete.
    #[must_use]
    pub fn position(&self) -> usize {
        (self.current_index + 1).min(self.total)
    }
}

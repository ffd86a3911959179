//! Height change detection

/// Deduplicates height reports: a height is worth sending only when it
/// differs from the last reported value.
#[derive(Debug, Clone, Default)]
pub struct HeightReporter {
    last_reported: Option<u32>,
}

impl HeightReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe a height sample; returns the height when it should be
    /// reported, `None` when it matches the last report.
    pub fn observe(&mut self, height: u32) -> Option<u32> {
        if self.last_reported == Some(height) {
            return None;
        }
        self.last_reported = Some(height);
        Some(height)
    }

    pub fn last_reported(&self) -> Option<u32> {
        self.last_reported
    }
}

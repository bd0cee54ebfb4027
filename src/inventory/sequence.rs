//! Request ids for item lookups.
//!
//! Lookups can overlap: a slow answer for an old code may arrive after the
//! answer for a newer one. Each lookup takes the next id from a
//! [`LookupSequence`]; only the answer carrying the latest id is accepted.

/// Monotonic lookup id generator with a "latest issued" watermark.
///
/// # Examples
///
/// ```
/// use machine_tracker::inventory::LookupSequence;
///
/// let mut seq = LookupSequence::default();
/// let first = seq.issue();
/// let second = seq.issue();
/// assert!(!seq.is_current(first));
/// assert!(seq.is_current(second));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupSequence {
    last_issued: u64,
    invalidated: bool,
}

impl LookupSequence {
    /// Issues a new id, superseding every earlier one.
    pub fn issue(&mut self) -> u64 {
        self.last_issued += 1;
        self.invalidated = false;
        self.last_issued
    }

    /// Whether `request_id` is the latest issued id and has not been invalidated.
    #[must_use]
    pub const fn is_current(&self, request_id: u64) -> bool {
        !self.invalidated && request_id == self.last_issued && request_id != 0
    }

    /// Drops interest in every outstanding lookup (the popup was closed).
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase() {
        let mut seq = LookupSequence::default();
        let ids: Vec<u64> = (0..5).map(|_| seq.issue()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn nothing_is_current_before_first_issue() {
        assert!(!LookupSequence::default().is_current(0));
    }

    #[test]
    fn invalidation_rejects_latest_until_next_issue() {
        let mut seq = LookupSequence::default();
        let id = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(id));
        let next = seq.issue();
        assert!(seq.is_current(next));
    }
}

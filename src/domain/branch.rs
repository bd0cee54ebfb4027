//! Branch sites and the branch selector used by the machine table.
//!
//! Machines are registered at one of a fixed set of physical sites. The table
//! can be narrowed to a single site or show every site via the `All` sentinel.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::TrackerError;

/// A physical site where machines are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Hettipola,
    Bakamuna1,
    Bakamuna2,
    Mathara,
    Welioya,
    SampleRoom,
    Piliyandala,
}

impl Branch {
    /// Every branch, in the order the branch bar shows them.
    pub const ALL: [Self; 7] = [
        Self::Hettipola,
        Self::Bakamuna1,
        Self::Bakamuna2,
        Self::Mathara,
        Self::Welioya,
        Self::SampleRoom,
        Self::Piliyandala,
    ];

    /// The branch name exactly as the inventory API spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hettipola => "Hettipola",
            Self::Bakamuna1 => "Bakamuna1",
            Self::Bakamuna2 => "Bakamuna2",
            Self::Mathara => "Mathara",
            Self::Welioya => "Welioya",
            Self::SampleRoom => "Sample Room",
            Self::Piliyandala => "Piliyandala",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|b| *b == self).unwrap_or(0)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Branch {
    type Err = TrackerError;

    /// Parses a branch name. Matching ignores ASCII case and surrounding
    /// whitespace so configuration values like `sample room` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TrackerError::Config(format!("unknown branch: {wanted}")))
    }
}

/// Branch restriction applied to the machine table.
///
/// # Examples
///
/// ```
/// use machine_tracker::domain::{Branch, BranchFilter};
///
/// let filter = BranchFilter::All.next();
/// assert_eq!(filter, BranchFilter::Only(Branch::Hettipola));
/// assert!(filter.admits(Some("Hettipola")));
/// assert!(!filter.admits(None));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchFilter {
    /// No restriction.
    #[default]
    All,
    /// Only machines registered at this branch.
    Only(Branch),
}

impl BranchFilter {
    /// Label shown in the branch bar and header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(branch) => branch.as_str(),
        }
    }

    /// Whether a record registered at `branch` passes this filter.
    ///
    /// A record without a branch only passes `All`.
    #[must_use]
    pub fn admits(self, branch: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => branch == Some(wanted.as_str()),
        }
    }

    /// The next selector in branch bar order, wrapping back to `All`.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(Branch::ALL[0]),
            Self::Only(branch) => Branch::ALL
                .get(branch.position() + 1)
                .copied()
                .map_or(Self::All, Self::Only),
        }
    }

    /// The previous selector in branch bar order, wrapping to the last branch.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::All => Self::Only(Branch::ALL[Branch::ALL.len() - 1]),
            Self::Only(branch) if branch.position() == 0 => Self::All,
            Self::Only(branch) => Self::Only(Branch::ALL[branch.position() - 1]),
        }
    }
}

impl FromStr for BranchFilter {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for BranchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_forward_visits_every_branch_then_all() {
        let mut filter = BranchFilter::All;
        let mut seen = vec![];
        for _ in 0..=Branch::ALL.len() {
            filter = filter.next();
            seen.push(filter);
        }
        assert_eq!(seen.last(), Some(&BranchFilter::All));
        assert_eq!(seen[6], BranchFilter::Only(Branch::Piliyandala));
    }

    #[test]
    fn prev_undoes_next() {
        let mut filter = BranchFilter::All;
        for _ in 0..10 {
            assert_eq!(filter.next().prev(), filter);
            filter = filter.next();
        }
    }

    #[test]
    fn parses_spaced_and_cased_names() {
        assert_eq!("sample room".parse::<Branch>().ok(), Some(Branch::SampleRoom));
        assert_eq!(" ALL ".parse::<BranchFilter>().ok(), Some(BranchFilter::All));
        assert!("Colombo".parse::<BranchFilter>().is_err());
    }

    #[test]
    fn branch_exclusivity() {
        let record_branch = Some("Hettipola");
        assert!(!BranchFilter::Only(Branch::Bakamuna1).admits(record_branch));
        assert!(BranchFilter::Only(Branch::Hettipola).admits(record_branch));
        assert!(BranchFilter::All.admits(record_branch));
    }
}

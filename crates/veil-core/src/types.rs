use serde::{Deserialize, Serialize};
use std::fmt;

/// Virtue XP required to advance one rank.
pub const XP_PER_RANK: u32 = 200;

// ---------------------------------------------------------------------------
// Rank
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Unnamed,
    Veiled,
    QuietOne,
    Watchful,
    Faithful,
    Steward,
}

impl Rank {
    pub fn all() -> &'static [Rank] {
        &[
            Rank::Unnamed,
            Rank::Veiled,
            Rank::QuietOne,
            Rank::Watchful,
            Rank::Faithful,
            Rank::Steward,
        ]
    }

    /// Rank derived from total virtue XP: one tier per [`XP_PER_RANK`],
    /// clamped to the last tier.
    pub fn from_xp(xp: u32) -> Rank {
        let all = Rank::all();
        let i = (xp / XP_PER_RANK) as usize;
        all[i.min(all.len() - 1)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Rank> {
        let all = Rank::all();
        all.get(self.index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Unnamed => "unnamed",
            Rank::Veiled => "veiled",
            Rank::QuietOne => "quiet_one",
            Rank::Watchful => "watchful",
            Rank::Faithful => "faithful",
            Rank::Steward => "steward",
        }
    }

    /// Display title shown to the user.
    pub fn title(self) -> &'static str {
        match self {
            Rank::Unnamed => "The Unnamed",
            Rank::Veiled => "The Veiled",
            Rank::QuietOne => "The Quiet One",
            Rank::Watchful => "The Watchful",
            Rank::Faithful => "The Faithful",
            Rank::Steward => "The Steward",
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::Unnamed
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NarrativeTone
// ---------------------------------------------------------------------------

/// Mood of the flavor text shown after completions. Advances with
/// accumulated unseen acts and never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeTone {
    Encouraging,
    Observant,
    Sparse,
}

impl NarrativeTone {
    pub fn all() -> &'static [NarrativeTone] {
        &[
            NarrativeTone::Encouraging,
            NarrativeTone::Observant,
            NarrativeTone::Sparse,
        ]
    }

    /// Tone the given unseen-act count maps to on its own.
    pub fn for_unseen(unseen: u32) -> NarrativeTone {
        if unseen > 20 {
            NarrativeTone::Sparse
        } else if unseen > 10 {
            NarrativeTone::Observant
        } else {
            NarrativeTone::Encouraging
        }
    }

    /// Forward-only transition: the tone for `unseen` counts only if it
    /// is further along than the current one.
    pub fn advance(self, unseen: u32) -> NarrativeTone {
        self.max(NarrativeTone::for_unseen(unseen))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NarrativeTone::Encouraging => "encouraging",
            NarrativeTone::Observant => "observant",
            NarrativeTone::Sparse => "sparse",
        }
    }
}

impl Default for NarrativeTone {
    fn default() -> Self {
        NarrativeTone::Encouraging
    }
}

impl fmt::Display for NarrativeTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Disclosure
// ---------------------------------------------------------------------------

/// Whether the user told anyone about completing an act. Only unseen
/// completions earn the hidden reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disclosure {
    Unseen,
    Told,
}

impl Disclosure {
    pub fn is_unseen(self) -> bool {
        matches!(self, Disclosure::Unseen)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Disclosure::Unseen => "unseen",
            Disclosure::Told => "told",
        }
    }
}

impl fmt::Display for Disclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_ordering() {
        assert!(Rank::Unnamed < Rank::Veiled);
        assert!(Rank::QuietOne < Rank::Watchful);
        assert!(Rank::Steward > Rank::Faithful);
    }

    #[test]
    fn rank_from_xp_boundaries() {
        assert_eq!(Rank::from_xp(0), Rank::Unnamed);
        assert_eq!(Rank::from_xp(199), Rank::Unnamed);
        assert_eq!(Rank::from_xp(200), Rank::Veiled);
        assert_eq!(Rank::from_xp(399), Rank::Veiled);
        assert_eq!(Rank::from_xp(400), Rank::QuietOne);
        assert_eq!(Rank::from_xp(1000), Rank::Steward);
    }

    #[test]
    fn rank_from_xp_clamps_to_last_tier() {
        assert_eq!(Rank::from_xp(1200), Rank::Steward);
        assert_eq!(Rank::from_xp(u32::MAX), Rank::Steward);
    }

    #[test]
    fn rank_next() {
        assert_eq!(Rank::Unnamed.next(), Some(Rank::Veiled));
        assert_eq!(Rank::Steward.next(), None);
    }

    #[test]
    fn rank_titles() {
        assert_eq!(Rank::Unnamed.title(), "The Unnamed");
        assert_eq!(Rank::Steward.title(), "The Steward");
    }

    #[test]
    fn tone_thresholds() {
        assert_eq!(NarrativeTone::for_unseen(0), NarrativeTone::Encouraging);
        assert_eq!(NarrativeTone::for_unseen(10), NarrativeTone::Encouraging);
        assert_eq!(NarrativeTone::for_unseen(11), NarrativeTone::Observant);
        assert_eq!(NarrativeTone::for_unseen(20), NarrativeTone::Observant);
        assert_eq!(NarrativeTone::for_unseen(21), NarrativeTone::Sparse);
    }

    #[test]
    fn tone_never_regresses() {
        // A count that maps to an earlier tone must not pull an advanced
        // tone backward.
        assert_eq!(NarrativeTone::Sparse.advance(3), NarrativeTone::Sparse);
        assert_eq!(NarrativeTone::Observant.advance(10), NarrativeTone::Observant);
        assert_eq!(NarrativeTone::Encouraging.advance(11), NarrativeTone::Observant);
        assert_eq!(NarrativeTone::Observant.advance(21), NarrativeTone::Sparse);
    }

    #[test]
    fn disclosure_flags() {
        assert!(Disclosure::Unseen.is_unseen());
        assert!(!Disclosure::Told.is_unseen());
    }
}

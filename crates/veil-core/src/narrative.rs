use crate::types::NarrativeTone;
use rand::Rng;

/// Flavor lines shown after a completion. The voice thins out as the
/// tone advances.
pub fn lines(tone: NarrativeTone) -> &'static [&'static str] {
    match tone {
        NarrativeTone::Encouraging => {
            &["Well done.", "This was noticed.", "Carry on.", "You chose well."]
        }
        NarrativeTone::Observant => &[
            "You chose silence.",
            "This mattered.",
            "The choice was yours.",
            "Witnessed.",
        ],
        NarrativeTone::Sparse => &["Yes.", "This.", "Known.", "..."],
    }
}

/// Uniformly pick one flavor line for the tone.
pub fn pick_line(tone: NarrativeTone, rng: &mut impl Rng) -> &'static str {
    let lines = lines(tone);
    lines[rng.gen_range(0..lines.len())]
}

/// Emotion tags offered at reflection. Collected, acknowledged, and
/// discarded; they are never persisted.
pub const EMOTIONS: &[&str] = &[
    "Peace",
    "Resistance",
    "Fear",
    "Clarity",
    "Doubt",
    "Strength",
    "Humility",
    "Joy",
];

pub fn is_emotion(tag: &str) -> bool {
    EMOTIONS.iter().any(|e| e.eq_ignore_ascii_case(tag))
}

/// One mark per three unseen acts, capped at twelve.
pub fn progress_sigil(unseen: u32) -> String {
    "◦".repeat((unseen / 3).min(12) as usize)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

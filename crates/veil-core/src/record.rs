use crate::catalog::{ActCategory, Catalog};
use crate::error::{Result, VeilError};
use crate::mission::{Mission, MissionTier};
use crate::types::{Disclosure, NarrativeTone, Rank};
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Undisclosed-completion reward ranges.
pub const INTEGRITY_GAIN: std::ops::RangeInclusive<u32> = 15..=24;
pub const STAT_GAIN: std::ops::RangeInclusive<u32> = 5..=12;

/// Sacred-loss side-event: eligible above this unseen-act count,
/// offered with this probability per undisclosed completion.
pub const LOSS_ELIGIBLE_ABOVE: u32 = 5;
pub const LOSS_CHANCE: f64 = 0.15;
pub const LOSS_INTEGRITY_PENALTY: u32 = 30;
pub const LOSS_DISCIPLINE_PENALTY: u32 = 10;

// ---------------------------------------------------------------------------
// CurrentAct / HistoryEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentAct {
    pub text: String,
    pub category: ActCategory,
    #[serde(default)]
    pub is_mission: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub act: String,
    pub completed_at: DateTime<Utc>,
    pub seen: bool,
}

// ---------------------------------------------------------------------------
// Completion outcome
// ---------------------------------------------------------------------------

/// What a completion earned, for the caller to present. The record
/// itself already carries the updated counters.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Reward {
    pub integrity_gain: u32,
    pub stat_gain: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompletionOutcome {
    /// Reward drawn on the undisclosed path; disclosure forfeits it.
    pub reward: Option<Reward>,
    /// The completion pushed the rank up a tier.
    pub rank_advanced: bool,
    /// A sacred-loss offer was drawn; it stays pending on the record
    /// until resolved or discarded by reflection.
    pub loss_offered: bool,
}

// ---------------------------------------------------------------------------
// ProgressRecord
// ---------------------------------------------------------------------------

/// The whole of a user's progress. Mutated only through the operations
/// below; persisted wholesale by the profile layer after each mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub rank: Rank,
    #[serde(default)]
    pub integrity: u32,
    #[serde(default)]
    pub discipline: u32,
    #[serde(default)]
    pub courage: u32,
    #[serde(default)]
    pub humility: u32,
    #[serde(default)]
    pub consistency: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_act: Option<CurrentAct>,
    #[serde(default)]
    pub completed_today: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub narrative_tone: NarrativeTone,
    #[serde(default)]
    pub total_acts: u32,
    #[serde(default)]
    pub unseen_acts: u32,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub completed_missions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_in_progress: Option<Mission>,
    #[serde(default)]
    pub loss_pending: bool,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn virtue_total(&self) -> u32 {
        self.integrity + self.discipline + self.courage + self.humility + self.consistency
    }

    // -----------------------------------------------------------------------
    // Act lifecycle
    // -----------------------------------------------------------------------

    /// Issue a new act: uniform category, then uniform prompt within it.
    /// The engine does not enforce a one-act-per-day rule; that is the
    /// caller's policy to apply before calling this.
    pub fn draw_act(&mut self, catalog: &Catalog, rng: &mut impl Rng) -> Result<CurrentAct> {
        if self.current_act.is_some() {
            return Err(VeilError::ActOutstanding);
        }
        let (category, text) = catalog.draw(rng);
        let act = CurrentAct {
            text,
            category,
            is_mission: false,
        };
        self.current_act = Some(act.clone());
        self.completed_today = false;
        Ok(act)
    }

    /// Complete the outstanding act in the given disclosure mode.
    ///
    /// Leaves `current_act` in place for the reflection step; only
    /// `finish_reflection` clears it.
    pub fn complete_act(
        &mut self,
        disclosure: Disclosure,
        rng: &mut impl Rng,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<CompletionOutcome> {
        let act = self.current_act.as_ref().ok_or(VeilError::NoCurrentAct)?;
        if self.completed_today {
            return Err(VeilError::ActAwaitingReflection);
        }
        let act_text = act.text.clone();

        self.total_acts += 1;
        self.completed_today = true;
        self.last_completed_date = Some(today);

        let mut outcome = CompletionOutcome {
            reward: None,
            rank_advanced: false,
            loss_offered: false,
        };

        match disclosure {
            Disclosure::Told => {
                // Telling forfeits the hidden reward: no counters move.
                self.history.push(HistoryEntry {
                    act: act_text,
                    completed_at: now,
                    seen: true,
                });
            }
            Disclosure::Unseen => {
                let reward = Reward {
                    integrity_gain: rng.gen_range(INTEGRITY_GAIN),
                    stat_gain: rng.gen_range(STAT_GAIN),
                };
                self.integrity += reward.integrity_gain;
                self.discipline += reward.stat_gain;
                self.courage += reward.stat_gain;
                self.humility += reward.stat_gain;
                self.consistency += reward.stat_gain;
                self.unseen_acts += 1;

                let before = self.rank;
                self.rank = Rank::from_xp(self.virtue_total());
                outcome.rank_advanced = self.rank > before;

                self.narrative_tone = self.narrative_tone.advance(self.unseen_acts);

                self.history.push(HistoryEntry {
                    act: act_text,
                    completed_at: now,
                    seen: false,
                });

                if self.unseen_acts > LOSS_ELIGIBLE_ABOVE && rng.gen_bool(LOSS_CHANCE) {
                    self.loss_pending = true;
                    outcome.loss_offered = true;
                }
                outcome.reward = Some(reward);
            }
        }

        Ok(outcome)
    }

    /// Resolve the pending sacred-loss offer. Accepting costs integrity
    /// and discipline, floored at zero; rank keeps its last
    /// completion-time value either way. The offer is consumed whether
    /// accepted or declined.
    pub fn resolve_sacred_loss(&mut self, accepted: bool) -> Result<()> {
        if !self.loss_pending {
            return Err(VeilError::NoLossPending);
        }
        self.loss_pending = false;
        if accepted {
            self.integrity = self.integrity.saturating_sub(LOSS_INTEGRITY_PENALTY);
            self.discipline = self.discipline.saturating_sub(LOSS_DISCIPLINE_PENALTY);
        }
        Ok(())
    }

    /// Close out the reflection step: clears the completed act and any
    /// mission in progress, discarding an unresolved loss offer.
    ///
    /// A mission counts as completed only when its act stayed unseen;
    /// the disclosure is read from the history entry the completion
    /// appended. Completed mission ids are recorded at most once.
    pub fn finish_reflection(&mut self) -> Result<()> {
        let act = self.current_act.as_ref().ok_or(VeilError::NoCurrentAct)?;
        if !self.completed_today {
            return Err(VeilError::ActNotCompleted);
        }
        let was_mission = act.is_mission;
        self.current_act = None;
        let mission = self.mission_in_progress.take();

        if was_mission {
            if let Some(m) = mission {
                let stayed_unseen = self.history.last().map(|h| !h.seen).unwrap_or(false);
                if stayed_unseen && !self.completed_missions.contains(&m.id) {
                    self.completed_missions.push(m.id);
                }
            }
        }

        self.loss_pending = false;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Missions
    // -----------------------------------------------------------------------

    /// Staging check before a mission is confirmed. Mutates nothing.
    pub fn can_select_mission(&self) -> Result<()> {
        if let Some(m) = &self.mission_in_progress {
            return Err(VeilError::MissionInProgress(m.id.clone()));
        }
        if self.current_act.is_some() {
            return Err(VeilError::ActOutstanding);
        }
        Ok(())
    }

    /// Accept a mission: its text becomes the outstanding act, flagged
    /// as a mission. Requires the tier gate open, the mission not yet
    /// completed, and nothing else active.
    pub fn start_mission(&mut self, tier: &MissionTier, mission: &Mission) -> Result<()> {
        self.can_select_mission()?;
        if self.completed_missions.contains(&mission.id) {
            return Err(VeilError::MissionCompleted(mission.id.clone()));
        }
        if !tier.unlocked_for(self.unseen_acts) {
            return Err(VeilError::MissionLocked {
                mission: mission.id.clone(),
                tier: tier.name.clone(),
                required: tier.required_acts,
                unseen: self.unseen_acts,
            });
        }

        self.mission_in_progress = Some(mission.clone());
        self.current_act = Some(CurrentAct {
            text: mission.text.clone(),
            category: mission.category,
            is_mission: true,
        });
        self.completed_today = false;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

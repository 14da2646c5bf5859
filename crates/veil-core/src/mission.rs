use crate::catalog::ActCategory;
use crate::error::{Result, VeilError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A longer-form curated act, gated behind a progression tier and
/// tracked for exactly-once completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub category: ActCategory,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionTier {
    pub id: String,
    pub name: String,
    pub required_acts: u32,
    pub missions: Vec<Mission>,
}

impl MissionTier {
    /// Tier gate: unlocked once enough unseen acts have accumulated.
    pub fn unlocked_for(&self, unseen_acts: u32) -> bool {
        unseen_acts >= self.required_acts
    }
}

// ---------------------------------------------------------------------------
// MissionBook
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionBook {
    pub tiers: Vec<MissionTier>,
}

impl MissionBook {
    pub fn builtin() -> MissionBook {
        fn mission(id: &str, category: ActCategory, text: &str) -> Mission {
            Mission {
                id: id.to_string(),
                category,
                text: text.to_string(),
            }
        }

        MissionBook {
            tiers: vec![
                MissionTier {
                    id: "threshold".to_string(),
                    name: "The Threshold".to_string(),
                    required_acts: 5,
                    missions: vec![
                        mission(
                            "quiet-week",
                            ActCategory::Restraint,
                            "For seven days, keep one good deed each day entirely to yourself.",
                        ),
                        mission(
                            "hidden-hands",
                            ActCategory::Service,
                            "Complete three acts of service this week without being seen doing any of them.",
                        ),
                        mission(
                            "unsigned-gift",
                            ActCategory::Mercy,
                            "Give something you value to someone who needs it more, with no note and no name.",
                        ),
                    ],
                },
                MissionTier {
                    id: "long-silence".to_string(),
                    name: "The Long Silence".to_string(),
                    required_acts: 15,
                    missions: vec![
                        mission(
                            "fast-of-credit",
                            ActCategory::Restraint,
                            "For one month, let every compliment you receive pass without correction or addition.",
                        ),
                        mission(
                            "steward-of-small-things",
                            ActCategory::Discipline,
                            "Choose one neglected duty and tend it daily for two weeks before anyone asks.",
                        ),
                        mission(
                            "early-watch",
                            ActCategory::Discipline,
                            "Rise an hour early for ten days and spend the hour preparing something for someone else.",
                        ),
                    ],
                },
                MissionTier {
                    id: "unseen-road".to_string(),
                    name: "The Unseen Road".to_string(),
                    required_acts: 30,
                    missions: vec![
                        mission(
                            "advocate-unknown",
                            ActCategory::Courage,
                            "Defend someone's name in three separate rooms they will never enter.",
                        ),
                        mission(
                            "the-long-mercy",
                            ActCategory::Mercy,
                            "Forgive one old debt completely and never mention it again.",
                        ),
                        mission(
                            "keeper-of-names",
                            ActCategory::Service,
                            "Learn the names and needs of five people others overlook, and quietly meet one need for each.",
                        ),
                    ],
                },
            ],
        }
    }

    /// Load the mission book for `root`: the override file if present,
    /// otherwise the built-in tiers.
    pub fn load(root: &Path) -> Result<MissionBook> {
        let path = paths::missions_path(root);
        if !path.exists() {
            return Ok(MissionBook::builtin());
        }
        let content = std::fs::read_to_string(&path)?;
        let book: MissionBook = serde_yaml::from_str(&content)?;
        book.validate()?;
        Ok(book)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(VeilError::InvalidMissionBook("no tiers".to_string()));
        }
        let mut tier_ids = Vec::new();
        let mut mission_ids = Vec::new();
        for tier in &self.tiers {
            paths::validate_slug(&tier.id)?;
            if tier_ids.contains(&tier.id.as_str()) {
                return Err(VeilError::InvalidMissionBook(format!(
                    "duplicate tier id: {}",
                    tier.id
                )));
            }
            tier_ids.push(&tier.id);
            if tier.missions.is_empty() {
                return Err(VeilError::InvalidMissionBook(format!(
                    "tier '{}' has no missions",
                    tier.id
                )));
            }
            for m in &tier.missions {
                paths::validate_slug(&m.id)?;
                if mission_ids.contains(&m.id.as_str()) {
                    return Err(VeilError::InvalidMissionBook(format!(
                        "duplicate mission id: {}",
                        m.id
                    )));
                }
                mission_ids.push(&m.id);
                if m.text.trim().is_empty() {
                    return Err(VeilError::InvalidMissionBook(format!(
                        "mission '{}' has no text",
                        m.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Find a mission and the tier it belongs to.
    pub fn find(&self, mission_id: &str) -> Result<(&MissionTier, &Mission)> {
        for tier in &self.tiers {
            if let Some(m) = tier.missions.iter().find(|m| m.id == mission_id) {
                return Ok((tier, m));
            }
        }
        Err(VeilError::MissionNotFound(mission_id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::atomic_write;
    use tempfile::TempDir;

    #[test]
    fn builtin_is_valid() {
        let book = MissionBook::builtin();
        book.validate().unwrap();
        assert_eq!(book.tiers.len(), 3);
    }

    #[test]
    fn tier_gate_boundaries() {
        let book = MissionBook::builtin();
        let first = &book.tiers[0];
        assert_eq!(first.required_acts, 5);
        assert!(!first.unlocked_for(4));
        assert!(first.unlocked_for(5));
        assert!(first.unlocked_for(6));
    }

    #[test]
    fn find_mission_and_tier() {
        let book = MissionBook::builtin();
        let (tier, mission) = book.find("quiet-week").unwrap();
        assert_eq!(tier.id, "threshold");
        assert_eq!(mission.category, ActCategory::Restraint);
    }

    #[test]
    fn find_unknown_mission() {
        let book = MissionBook::builtin();
        assert!(matches!(
            book.find("no-such-mission"),
            Err(VeilError::MissionNotFound(_))
        ));
    }

    #[test]
    fn load_without_override_uses_builtin() {
        let dir = TempDir::new().unwrap();
        let book = MissionBook::load(dir.path()).unwrap();
        assert_eq!(book.tiers.len(), 3);
    }

    #[test]
    fn load_reads_override() {
        let dir = TempDir::new().unwrap();
        let override_yaml = "tiers:\n  - id: first\n    name: The First\n    required_acts: 1\n    missions:\n      - id: only-one\n        category: mercy\n        text: Visit someone lonely every week this month.\n";
        atomic_write(&paths::missions_path(dir.path()), override_yaml.as_bytes()).unwrap();
        let book = MissionBook::load(dir.path()).unwrap();
        assert_eq!(book.tiers.len(), 1);
        assert_eq!(book.tiers[0].missions[0].id, "only-one");
    }

    #[test]
    fn validate_rejects_duplicate_mission_ids() {
        let mut book = MissionBook::builtin();
        let dup = book.tiers[0].missions[0].clone();
        book.tiers[1].missions.push(dup);
        assert!(book.validate().is_err());
    }
}

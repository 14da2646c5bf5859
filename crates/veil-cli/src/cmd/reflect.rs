use crate::output::print_json;
use serde_json::json;
use std::path::Path;
use veil_core::{account, narrative, paths, profile::Profile};

pub fn run(root: &Path, note: Option<&str>, emotions: &[String], json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;

    for tag in emotions {
        if !narrative::is_emotion(tag) {
            anyhow::bail!(
                "unknown emotion '{}'; valid tags: {}",
                tag,
                narrative::EMOTIONS.join(", ")
            );
        }
    }

    let account = account::require_current(root)?;
    let mut profile = Profile::load(root, &account.user_id)?;

    let missions_before = profile.record.completed_missions.len();
    profile.record.finish_reflection()?;
    let fulfilled = profile.record.completed_missions.len() > missions_before;
    let mission_id = if fulfilled {
        profile.record.completed_missions.last().cloned()
    } else {
        None
    };
    profile.save(root)?;

    // The note and emotion tags belong to the ritual, not the record.
    let acknowledged = note.is_some() || !emotions.is_empty();

    if json {
        return print_json(&json!({
            "reflected": true,
            "acknowledged": acknowledged,
            "mission_completed": mission_id,
        }));
    }

    if acknowledged {
        println!("Held, not kept.");
    }
    println!("The day closes.");
    if let Some(id) = mission_id {
        println!("Mission fulfilled: {id}");
    }
    Ok(())
}

use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use veil_core::{account, narrative, paths, profile::Profile, types::XP_PER_RANK};

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let account = account::require_current(root)?;
    let profile = Profile::load(root, &account.user_id).context("failed to load profile")?;
    let record = &profile.record;

    if json {
        #[derive(serde::Serialize)]
        struct ActView<'a> {
            text: &'a str,
            category: &'static str,
            is_mission: bool,
            completed: bool,
        }

        #[derive(serde::Serialize)]
        struct StatusOutput<'a> {
            email: &'a str,
            display_name: Option<&'a str>,
            rank: &'static str,
            rank_title: &'static str,
            integrity: u32,
            discipline: u32,
            courage: u32,
            humility: u32,
            consistency: u32,
            virtue_total: u32,
            total_acts: u32,
            unseen_acts: u32,
            tone: &'static str,
            sigil: String,
            act: Option<ActView<'a>>,
            mission_in_progress: Option<&'a str>,
            completed_missions: &'a [String],
            loss_pending: bool,
        }

        let output = StatusOutput {
            email: &profile.email,
            display_name: profile.display_name.as_deref(),
            rank: record.rank.as_str(),
            rank_title: record.rank.title(),
            integrity: record.integrity,
            discipline: record.discipline,
            courage: record.courage,
            humility: record.humility,
            consistency: record.consistency,
            virtue_total: record.virtue_total(),
            total_acts: record.total_acts,
            unseen_acts: record.unseen_acts,
            tone: record.narrative_tone.as_str(),
            sigil: narrative::progress_sigil(record.unseen_acts),
            act: record.current_act.as_ref().map(|a| ActView {
                text: &a.text,
                category: a.category.as_str(),
                is_mission: a.is_mission,
                completed: record.completed_today,
            }),
            mission_in_progress: record.mission_in_progress.as_ref().map(|m| m.id.as_str()),
            completed_missions: &record.completed_missions,
            loss_pending: record.loss_pending,
        };
        return print_json(&output);
    }

    match &profile.display_name {
        Some(name) => println!("{} <{}>", name, profile.email),
        None => println!("{}", profile.email),
    }
    println!("Rank: {}", record.rank.title());
    if let Some(next) = record.rank.next() {
        let threshold = (record.rank.index() as u32 + 1) * XP_PER_RANK;
        println!(
            "Toward {}: {} / {}",
            next.title(),
            record.virtue_total(),
            threshold
        );
    }

    let sigil = narrative::progress_sigil(record.unseen_acts);
    if sigil.is_empty() {
        println!(
            "Unseen acts: {} ({} total)",
            record.unseen_acts, record.total_acts
        );
    } else {
        println!(
            "Unseen acts: {} ({} total)  {}",
            record.unseen_acts, record.total_acts, sigil
        );
    }

    println!();
    println!("  Integrity    {:>5}", record.integrity);
    println!("  Discipline   {:>5}", record.discipline);
    println!("  Courage      {:>5}", record.courage);
    println!("  Humility     {:>5}", record.humility);
    println!("  Consistency  {:>5}", record.consistency);

    if let Some(act) = &record.current_act {
        let kind = if act.is_mission { "Mission" } else { "Act" };
        let state = if record.completed_today {
            "completed, reflect to close"
        } else {
            "outstanding"
        };
        println!("\n{} ({}): {}", kind, state, act.text);
    }
    if let Some(m) = &record.mission_in_progress {
        println!("Mission in progress: {}", m.id);
    }
    if record.loss_pending {
        println!("\nA loss is pending: veil loss accept | veil loss decline");
    }
    Ok(())
}

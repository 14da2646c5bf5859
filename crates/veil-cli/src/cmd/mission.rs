use crate::output::{print_json, print_table_indent};
use anyhow::Context;
use clap::Subcommand;
use serde_json::json;
use std::path::Path;
use veil_core::{
    account,
    mission::{Mission, MissionBook},
    paths,
    profile::Profile,
    record::ProgressRecord,
};

#[derive(Subcommand)]
pub enum MissionSubcommand {
    /// Show all tiers and their missions
    List,

    /// Accept a mission as the outstanding act
    Begin { id: String },
}

pub fn run(root: &Path, subcommand: MissionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        MissionSubcommand::List => list(root, json),
        MissionSubcommand::Begin { id } => begin(root, &id, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let account = account::require_current(root)?;
    let profile = Profile::load(root, &account.user_id)?;
    if !paths::missions_path(root).exists() {
        tracing::debug!("no mission book override; using the built-in tiers");
    }
    let book = MissionBook::load(root).context("failed to load mission book")?;
    let record = &profile.record;

    if json {
        #[derive(serde::Serialize)]
        struct MissionRow<'a> {
            id: &'a str,
            category: &'static str,
            text: &'a str,
            status: &'static str,
        }

        #[derive(serde::Serialize)]
        struct TierSummary<'a> {
            id: &'a str,
            name: &'a str,
            required_acts: u32,
            unlocked: bool,
            missions: Vec<MissionRow<'a>>,
        }

        let tiers: Vec<TierSummary> = book
            .tiers
            .iter()
            .map(|tier| TierSummary {
                id: &tier.id,
                name: &tier.name,
                required_acts: tier.required_acts,
                unlocked: tier.unlocked_for(record.unseen_acts),
                missions: tier
                    .missions
                    .iter()
                    .map(|m| MissionRow {
                        id: &m.id,
                        category: m.category.as_str(),
                        text: &m.text,
                        status: mission_status(record, m),
                    })
                    .collect(),
            })
            .collect();
        return print_json(&tiers);
    }

    println!("Unseen acts: {}", record.unseen_acts);

    for tier in &book.tiers {
        if tier.unlocked_for(record.unseen_acts) {
            println!("\n{} (open)", tier.name);
        } else {
            println!(
                "\n{} (locked: asks for {} unseen acts, you have {})",
                tier.name, tier.required_acts, record.unseen_acts
            );
        }

        let rows: Vec<Vec<String>> = tier
            .missions
            .iter()
            .map(|m| {
                vec![
                    m.id.clone(),
                    m.category.to_string(),
                    mission_status(record, m).to_string(),
                    m.text.clone(),
                ]
            })
            .collect();
        print_table_indent(&["ID", "CATEGORY", "STATUS", "MISSION"], rows, 2);
    }
    Ok(())
}

fn mission_status(record: &ProgressRecord, mission: &Mission) -> &'static str {
    if record.completed_missions.contains(&mission.id) {
        "fulfilled"
    } else if record
        .mission_in_progress
        .as_ref()
        .is_some_and(|m| m.id == mission.id)
    {
        "in progress"
    } else {
        ""
    }
}

fn begin(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let account = account::require_current(root)?;
    let mut profile = Profile::load(root, &account.user_id)?;

    let book = MissionBook::load(root).context("failed to load mission book")?;
    let (tier, mission) = book.find(id)?;

    // Staging check first so a busy record fails before the tier gate.
    profile.record.can_select_mission()?;
    profile.record.start_mission(tier, mission)?;
    profile.save(root)?;

    if json {
        return print_json(&json!({
            "id": mission.id,
            "category": mission.category.as_str(),
            "text": mission.text,
            "tier": tier.name,
        }));
    }

    println!("Mission accepted ({}):", mission.category);
    println!("  {}", mission.text);
    println!("\nCarry it out unseen, then: veil act complete --unseen");
    Ok(())
}

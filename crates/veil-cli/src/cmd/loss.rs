use crate::output::print_json;
use clap::Subcommand;
use serde_json::json;
use std::path::Path;
use veil_core::{account, paths, profile::Profile};

#[derive(Subcommand)]
pub enum LossSubcommand {
    /// Give it up: integrity and discipline pay the cost
    Accept,

    /// Keep it: the offer passes
    Decline,
}

pub fn run(root: &Path, subcommand: LossSubcommand, json: bool) -> anyhow::Result<()> {
    let accepted = matches!(subcommand, LossSubcommand::Accept);
    resolve(root, accepted, json)
}

fn resolve(root: &Path, accepted: bool, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let account = account::require_current(root)?;
    let mut profile = Profile::load(root, &account.user_id)?;

    profile.record.resolve_sacred_loss(accepted)?;
    profile.save(root)?;

    if json {
        return print_json(&json!({
            "accepted": accepted,
            "integrity": profile.record.integrity,
            "discipline": profile.record.discipline,
        }));
    }

    if accepted {
        println!("It is given.");
        println!(
            "Integrity {}  Discipline {}",
            profile.record.integrity, profile.record.discipline
        );
    } else {
        println!("The offer passes.");
    }
    Ok(())
}

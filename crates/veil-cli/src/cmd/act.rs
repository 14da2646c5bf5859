use crate::output::print_json;
use anyhow::Context;
use chrono::{Local, Utc};
use clap::Subcommand;
use rand::thread_rng;
use serde_json::json;
use std::path::Path;
use veil_core::{account, catalog::Catalog, narrative, paths, profile::Profile, types::Disclosure};

#[derive(Subcommand)]
pub enum ActSubcommand {
    /// Draw today's act
    Draw {
        /// Draw again even though today's act is already complete
        #[arg(long)]
        again: bool,
    },

    /// Show the outstanding act
    Show,

    /// Complete the outstanding act
    Complete {
        /// Nobody knew
        #[arg(long, conflicts_with = "told")]
        unseen: bool,

        /// Somebody found out, or you told
        #[arg(long)]
        told: bool,
    },
}

pub fn run(root: &Path, subcommand: ActSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        ActSubcommand::Draw { again } => draw(root, again, json),
        ActSubcommand::Show => show(root, json),
        ActSubcommand::Complete { unseen, told } => {
            let disclosure = match (unseen, told) {
                (true, false) => Disclosure::Unseen,
                (false, true) => Disclosure::Told,
                _ => anyhow::bail!("pass exactly one of --unseen or --told"),
            };
            complete(root, disclosure, json)
        }
    }
}

fn draw(root: &Path, again: bool, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let account = account::require_current(root)?;
    let mut profile = Profile::load(root, &account.user_id)?;

    // One act per day unless overridden; an outstanding act falls
    // through to the engine's own guard.
    let today = Local::now().date_naive();
    if !again
        && profile.record.current_act.is_none()
        && profile.record.completed_today
        && profile.record.last_completed_date == Some(today)
    {
        anyhow::bail!("today's act is already complete; pass --again to draw another");
    }

    if !paths::catalog_path(root).exists() {
        tracing::debug!("no catalog override; using the built-in prompts");
    }
    let catalog = Catalog::load(root).context("failed to load act catalog")?;
    let act = profile.record.draw_act(&catalog, &mut thread_rng())?;
    profile.save(root)?;

    if json {
        return print_json(&json!({
            "text": act.text,
            "category": act.category.as_str(),
        }));
    }

    println!("Today's act ({}):", act.category);
    println!("  {}", act.text);
    println!("\nCarry it out, then: veil act complete --unseen | --told");
    Ok(())
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let account = account::require_current(root)?;
    let profile = Profile::load(root, &account.user_id)?;

    let Some(act) = &profile.record.current_act else {
        anyhow::bail!("no act is outstanding; run: veil act draw");
    };

    if json {
        return print_json(&json!({
            "text": act.text,
            "category": act.category.as_str(),
            "is_mission": act.is_mission,
            "completed": profile.record.completed_today,
        }));
    }

    let kind = if act.is_mission { "Mission" } else { "Act" };
    println!("{} ({}):", kind, act.category);
    println!("  {}", act.text);
    if profile.record.completed_today {
        println!("\nCompleted. Next: veil reflect");
    }
    Ok(())
}

fn complete(root: &Path, disclosure: Disclosure, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let account = account::require_current(root)?;
    let mut profile = Profile::load(root, &account.user_id)?;

    let mut rng = thread_rng();
    let outcome =
        profile
            .record
            .complete_act(disclosure, &mut rng, Utc::now(), Local::now().date_naive())?;
    let line = narrative::pick_line(profile.record.narrative_tone, &mut rng);
    profile.save(root)?;

    if json {
        return print_json(&json!({
            "disclosure": disclosure.as_str(),
            "line": line,
            "reward": outcome.reward,
            "rank": profile.record.rank.title(),
            "rank_advanced": outcome.rank_advanced,
            "loss_offered": outcome.loss_offered,
            "total_acts": profile.record.total_acts,
            "unseen_acts": profile.record.unseen_acts,
        }));
    }

    println!("{line}");
    if let Some(reward) = outcome.reward {
        println!("\nIntegrity +{}", reward.integrity_gain);
        println!(
            "Discipline, courage, humility, consistency +{}",
            reward.stat_gain
        );
    }
    if outcome.rank_advanced {
        println!("Rank attained: {}", profile.record.rank.title());
    }
    if outcome.loss_offered {
        println!("\nSomething asks to be given up.");
        println!("Resolve it: veil loss accept | veil loss decline");
    }
    println!("\nNext: veil reflect");
    Ok(())
}

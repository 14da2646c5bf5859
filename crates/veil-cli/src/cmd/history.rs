use crate::output::{print_json, print_table};
use std::path::Path;
use veil_core::{account, paths, profile::Profile};

pub fn run(root: &Path, limit: Option<usize>, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let account = account::require_current(root)?;
    let profile = Profile::load(root, &account.user_id)?;

    // Oldest first; a limit keeps only the most recent entries.
    let history = &profile.record.history;
    let start = limit.map(|n| history.len().saturating_sub(n)).unwrap_or(0);
    let entries = &history[start..];

    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No completions yet. Run: veil act draw");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.completed_at.format("%Y-%m-%d %H:%M").to_string(),
                if e.seen { "told" } else { "unseen" }.to_string(),
                e.act.clone(),
            ]
        })
        .collect();
    print_table(&["COMPLETED", "DISCLOSURE", "ACT"], rows);
    Ok(())
}

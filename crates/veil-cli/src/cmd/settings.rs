use crate::output::{print_json, print_table};
use clap::Subcommand;
use std::path::Path;
use veil_core::{account, paths, profile::Profile, settings::SettingKey};

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show all settings
    Show,

    /// Turn a setting on or off
    Set { key: String, value: String },
}

pub fn run(root: &Path, subcommand: SettingsSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        SettingsSubcommand::Show => show(root, json),
        SettingsSubcommand::Set { key, value } => set(root, &key, &value, json),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let account = account::require_current(root)?;
    let profile = Profile::load(root, &account.user_id)?;

    if json {
        return print_json(&profile.settings);
    }

    let rows: Vec<Vec<String>> = SettingKey::all()
        .iter()
        .map(|&key| {
            vec![
                key.to_string(),
                on_off(profile.settings.get(key)).to_string(),
            ]
        })
        .collect();
    print_table(&["SETTING", "VALUE"], rows);
    Ok(())
}

fn set(root: &Path, key: &str, value: &str, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let key: SettingKey = key.parse()?;
    let value = parse_on_off(value)?;

    let account = account::require_current(root)?;
    let mut profile = Profile::load(root, &account.user_id)?;
    profile.settings.set(key, value);
    profile.save(root)?;

    if json {
        return print_json(&profile.settings);
    }

    println!("{} is {}", key, on_off(value));
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn parse_on_off(value: &str) -> anyhow::Result<bool> {
    match value {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        other => anyhow::bail!("expected on or off, got '{}'", other),
    }
}

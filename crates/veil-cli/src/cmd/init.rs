use anyhow::Context;
use std::path::Path;
use veil_core::{catalog::Catalog, io, mission::MissionBook, paths};

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing veil in: {}", root.display());

    let dirs = [paths::VEIL_DIR, paths::PROFILES_DIR];
    for dir in dirs {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    // Seed the editable act catalog and mission book if missing. Both
    // fall back to the builtin content when their file is removed.
    let catalog =
        serde_yaml::to_string(&Catalog::builtin()).context("failed to render act catalog")?;
    if io::write_if_missing(&paths::catalog_path(root), catalog.as_bytes())? {
        println!("  created: {}", paths::CATALOG_FILE);
    } else {
        println!("  exists:  {}", paths::CATALOG_FILE);
    }

    let missions =
        serde_yaml::to_string(&MissionBook::builtin()).context("failed to render mission book")?;
    if io::write_if_missing(&paths::missions_path(root), missions.as_bytes())? {
        println!("  created: {}", paths::MISSIONS_FILE);
    } else {
        println!("  exists:  {}", paths::MISSIONS_FILE);
    }

    println!("\nVeil initialized.");
    println!("Next: veil auth sign-up --email you@example.com");
    Ok(())
}

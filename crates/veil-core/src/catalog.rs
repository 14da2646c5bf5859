use crate::error::{Result, VeilError};
use crate::paths;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// ActCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActCategory {
    Service,
    Restraint,
    Discipline,
    Courage,
    Mercy,
}

impl ActCategory {
    pub fn all() -> &'static [ActCategory] {
        &[
            ActCategory::Service,
            ActCategory::Restraint,
            ActCategory::Discipline,
            ActCategory::Courage,
            ActCategory::Mercy,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActCategory::Service => "service",
            ActCategory::Restraint => "restraint",
            ActCategory::Discipline => "discipline",
            ActCategory::Courage => "courage",
            ActCategory::Mercy => "mercy",
        }
    }
}

impl fmt::Display for ActCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The curated act prompts, grouped by category. Loaded once at startup
/// and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<CategoryPrompts>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPrompts {
    pub name: ActCategory,
    pub prompts: Vec<String>,
}

impl Catalog {
    /// The built-in catalog shipped with the binary.
    pub fn builtin() -> Catalog {
        fn cat(name: ActCategory, prompts: &[&str]) -> CategoryPrompts {
            CategoryPrompts {
                name,
                prompts: prompts.iter().map(|p| p.to_string()).collect(),
            }
        }

        Catalog {
            categories: vec![
                cat(
                    ActCategory::Service,
                    &[
                        "Do a chore that isn't yours",
                        "Leave an encouraging note for someone",
                        "Pay for a stranger's coffee",
                        "Help someone carry something",
                        "Clean a shared space without being asked",
                    ],
                ),
                cat(
                    ActCategory::Restraint,
                    &[
                        "Give up your favorite snack today",
                        "Skip social media for 4 hours",
                        "Hold back a complaint you want to make",
                        "Let someone else have the last word",
                        "Wait patiently without checking your phone",
                    ],
                ),
                cat(
                    ActCategory::Discipline,
                    &[
                        "Wake up 30 minutes earlier than usual",
                        "Do 20 minutes of exercise",
                        "Write down 3 things you're grateful for",
                        "Organize one small area of your space",
                        "Read for 20 minutes instead of screen time",
                    ],
                ),
                cat(
                    ActCategory::Courage,
                    &[
                        "Speak to someone new",
                        "Ask a question you've been afraid to ask",
                        "Admit a mistake to someone",
                        "Try something you might fail at",
                        "Share an unpopular opinion respectfully",
                    ],
                ),
                cat(
                    ActCategory::Mercy,
                    &[
                        "Forgive someone silently",
                        "Pray or wish well for someone who hurt you",
                        "Give someone a second chance",
                        "Respond gently to rudeness",
                        "Let go of a grudge today",
                    ],
                ),
            ],
        }
    }

    /// Load the catalog for `root`: the override file if present,
    /// otherwise the built-in set. An override must pass validation.
    pub fn load(root: &Path) -> Result<Catalog> {
        let path = paths::catalog_path(root);
        if !path.exists() {
            return Ok(Catalog::builtin());
        }
        let content = std::fs::read_to_string(&path)?;
        let catalog: Catalog = serde_yaml::from_str(&content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(VeilError::InvalidCatalog("no categories".to_string()));
        }
        let mut seen = Vec::new();
        for cat in &self.categories {
            if seen.contains(&cat.name) {
                return Err(VeilError::InvalidCatalog(format!(
                    "duplicate category: {}",
                    cat.name
                )));
            }
            seen.push(cat.name);
            if cat.prompts.is_empty() {
                return Err(VeilError::InvalidCatalog(format!(
                    "category '{}' has no prompts",
                    cat.name
                )));
            }
            if cat.prompts.iter().any(|p| p.trim().is_empty()) {
                return Err(VeilError::InvalidCatalog(format!(
                    "category '{}' has a blank prompt",
                    cat.name
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: ActCategory) -> Option<&CategoryPrompts> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Uniformly pick a category, then uniformly pick one of its prompts.
    /// Assumes a validated (non-empty) catalog.
    pub fn draw(&self, rng: &mut impl Rng) -> (ActCategory, String) {
        let cat = &self.categories[rng.gen_range(0..self.categories.len())];
        let text = cat.prompts[rng.gen_range(0..cat.prompts.len())].clone();
        (cat.name, text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::atomic_write;
    use rand::rngs::mock::StepRng;
    use tempfile::TempDir;

    #[test]
    fn builtin_is_valid() {
        let catalog = Catalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.categories.len(), 5);
        for cat in &catalog.categories {
            assert_eq!(cat.prompts.len(), 5);
        }
    }

    #[test]
    fn load_without_override_uses_builtin() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.categories.len(), Catalog::builtin().categories.len());
    }

    #[test]
    fn load_reads_override() {
        let dir = TempDir::new().unwrap();
        let override_yaml = "categories:\n  - name: mercy\n    prompts:\n      - Visit someone lonely\n";
        atomic_write(&paths::catalog_path(dir.path()), override_yaml.as_bytes()).unwrap();
        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].name, ActCategory::Mercy);
        assert_eq!(catalog.categories[0].prompts[0], "Visit someone lonely");
    }

    #[test]
    fn load_rejects_invalid_override() {
        let dir = TempDir::new().unwrap();
        let override_yaml = "categories:\n  - name: mercy\n    prompts: []\n";
        atomic_write(&paths::catalog_path(dir.path()), override_yaml.as_bytes()).unwrap();
        assert!(Catalog::load(dir.path()).is_err());
    }

    #[test]
    fn validate_rejects_duplicate_category() {
        let mut catalog = Catalog::builtin();
        let dup = catalog.categories[0].clone();
        catalog.categories.push(dup);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn draw_with_floor_rng_picks_first_entry() {
        let catalog = Catalog::builtin();
        let mut rng = StepRng::new(0, 0);
        let (category, text) = catalog.draw(&mut rng);
        assert_eq!(category, ActCategory::Service);
        assert_eq!(text, "Do a chore that isn't yours");
    }
}

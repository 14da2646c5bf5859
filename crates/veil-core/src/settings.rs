use crate::error::VeilError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-profile preferences. Presentation-level knobs only; nothing here
/// feeds the progress engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub daily_reminder: bool,
    pub dark_mode: bool,
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::Sound => self.sound_enabled,
            SettingKey::Reminder => self.daily_reminder,
            SettingKey::DarkMode => self.dark_mode,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::Sound => self.sound_enabled = value,
            SettingKey::Reminder => self.daily_reminder = value,
            SettingKey::DarkMode => self.dark_mode = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Sound,
    Reminder,
    DarkMode,
}

impl SettingKey {
    pub fn all() -> &'static [SettingKey] {
        &[SettingKey::Sound, SettingKey::Reminder, SettingKey::DarkMode]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Sound => "sound",
            SettingKey::Reminder => "reminder",
            SettingKey::DarkMode => "dark-mode",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SettingKey {
    type Err = VeilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sound" | "sound-enabled" => Ok(SettingKey::Sound),
            "reminder" | "daily-reminder" => Ok(SettingKey::Reminder),
            "dark-mode" | "dark_mode" => Ok(SettingKey::DarkMode),
            _ => Err(VeilError::UnknownSetting(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults_are_off() {
        let settings = Settings::default();
        for key in SettingKey::all() {
            assert!(!settings.get(*key));
        }
    }

    #[test]
    fn set_and_get() {
        let mut settings = Settings::default();
        settings.set(SettingKey::DarkMode, true);
        assert!(settings.get(SettingKey::DarkMode));
        assert!(!settings.get(SettingKey::Sound));
        settings.set(SettingKey::DarkMode, false);
        assert!(!settings.get(SettingKey::DarkMode));
    }

    #[test]
    fn key_parsing() {
        assert_eq!(SettingKey::from_str("sound").unwrap(), SettingKey::Sound);
        assert_eq!(
            SettingKey::from_str("daily-reminder").unwrap(),
            SettingKey::Reminder
        );
        assert_eq!(
            SettingKey::from_str("dark-mode").unwrap(),
            SettingKey::DarkMode
        );
        assert!(SettingKey::from_str("volume").is_err());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let settings: Settings = serde_yaml::from_str("dark_mode: true\n").unwrap();
        assert!(settings.dark_mode);
        assert!(!settings.sound_enabled);
        assert!(!settings.daily_reminder);
    }
}

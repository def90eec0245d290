use thiserror::Error;

/// Key under which progress is persisted unless overridden.
pub const DEFAULT_STORAGE_KEY: &str = "qa-trainer-progress-v1";

/// Environment variable overriding the storage key.
pub const STORAGE_KEY_ENV: &str = "QA_TRAINER_STORAGE_KEY";

/// Environment variable overriding the initial shuffle preference.
pub const SHUFFLE_ENV: &str = "QA_TRAINER_SHUFFLE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("storage key cannot be empty")]
    EmptyStorageKey,

    #[error("invalid shuffle flag: {raw}")]
    InvalidShuffleFlag { raw: String },
}

/// Trainer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerSettings {
    storage_key: String,
    shuffle_by_default: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TrainerSettingsDraft {
    pub storage_key: Option<String>,
    pub shuffle_by_default: Option<bool>,
}

impl TrainerSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill in defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::EmptyStorageKey` if a key is given but blank.
    pub fn validate(self) -> Result<TrainerSettings, SettingsError> {
        let storage_key = match self.storage_key {
            Some(key) => {
                let trimmed = key.trim();
                if trimmed.is_empty() {
                    return Err(SettingsError::EmptyStorageKey);
                }
                trimmed.to_string()
            }
            None => DEFAULT_STORAGE_KEY.to_string(),
        };

        Ok(TrainerSettings {
            storage_key,
            shuffle_by_default: self.shuffle_by_default.unwrap_or(true),
        })
    }
}

impl TrainerSettings {
    /// Settings from `QA_TRAINER_STORAGE_KEY` / `QA_TRAINER_SHUFFLE`, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`TrainerSettings::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let shuffle_by_default = lookup(SHUFFLE_ENV).map(|raw| parse_flag(&raw)).transpose()?;

        TrainerSettingsDraft {
            storage_key: lookup(STORAGE_KEY_ENV),
            shuffle_by_default,
        }
        .validate()
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    #[must_use]
    pub fn shuffle_by_default(&self) -> bool {
        self.shuffle_by_default
    }
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            shuffle_by_default: true,
        }
    }
}

fn parse_flag(raw: &str) -> Result<bool, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidShuffleFlag {
            raw: raw.to_string(),
        }),
    }
}

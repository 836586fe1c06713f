use thiserror::Error;

pub const SEED_VAR: &str = "QUIZ_SEED";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("QUIZ_SEED must be an unsigned integer, got {0:?}")]
    InvalidSeed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Fixed seed for the operand generator, for reproducible sessions.
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let seed = match lookup(SEED_VAR) {
            Some(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| SettingsError::InvalidSeed(raw.clone()))?,
            ),
            _ => None,
        };
        Ok(Self { seed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_seed_is_none() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, Settings::default());

        let settings = Settings::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_seed_is_parsed() {
        let settings = Settings::from_lookup(|key| {
            assert_eq!(key, SEED_VAR);
            Some(" 1234 ".to_string())
        })
        .unwrap();
        assert_eq!(settings.seed, Some(1234));
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        let error = Settings::from_lookup(|_| Some("-3".to_string())).unwrap_err();
        assert_eq!(error, SettingsError::InvalidSeed("-3".to_string()));
        assert_eq!(
            error.to_string(),
            "QUIZ_SEED must be an unsigned integer, got \"-3\""
        );
    }
}

//! Configuration for service calendar maintenance.

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: expected true/false/1/0")]
pub struct ConfigError {
    var: &'static str,
    value: String,
}

/// How [`ServiceCalendar`](crate::service::ServiceCalendar) tidies the
/// records it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    /// Trim every produced record so its range starts and ends on active days.
    pub trim_pieces: bool,

    /// Discard records that no longer cover any date.
    pub drop_empty: bool,

    /// Fold a newly isolated single-day record into an existing one when a
    /// single record can represent both.
    pub merge_additions: bool,
}

/// Environment variable names read by [`CalendarConfig::from_env`].
pub const TRIM_VAR: &str = "SERVICE_CALENDAR_TRIM";
pub const DROP_EMPTY_VAR: &str = "SERVICE_CALENDAR_DROP_EMPTY";
pub const MERGE_VAR: &str = "SERVICE_CALENDAR_MERGE";

impl CalendarConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(trim_pieces: bool, drop_empty: bool, merge_additions: bool) -> Self {
        Self {
            trim_pieces,
            drop_empty,
            merge_additions,
        }
    }

    /// A configuration that keeps records exactly as the algebra returns them.
    pub fn raw() -> Self {
        Self::new(false, false, false)
    }

    /// Read overrides from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |var: &'static str, default: bool| match lookup(var) {
            None => Ok(default),
            Some(value) => parse_flag(&value).ok_or(ConfigError { var, value }),
        };

        Ok(Self {
            trim_pieces: flag(TRIM_VAR, defaults.trim_pieces)?,
            drop_empty: flag(DROP_EMPTY_VAR, defaults.drop_empty)?,
            merge_additions: flag(MERGE_VAR, defaults.merge_additions)?,
        })
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            trim_pieces: true,
            drop_empty: true,
            merge_additions: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn default_config() {
        let config = CalendarConfig::default();

        assert!(config.trim_pieces);
        assert!(config.drop_empty);
        assert!(config.merge_additions);
    }

    #[test]
    fn raw_config() {
        assert_eq!(CalendarConfig::raw(), CalendarConfig::new(false, false, false));
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = CalendarConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CalendarConfig::default());
    }

    #[test]
    fn overrides() {
        let config =
            CalendarConfig::from_lookup(lookup(&[(TRIM_VAR, "0"), (MERGE_VAR, " FALSE ")]))
                .unwrap();
        assert!(!config.trim_pieces);
        assert!(config.drop_empty);
        assert!(!config.merge_additions);
    }

    #[test]
    fn invalid_value() {
        let err = CalendarConfig::from_lookup(lookup(&[(DROP_EMPTY_VAR, "maybe")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value \"maybe\" for SERVICE_CALENDAR_DROP_EMPTY: expected true/false/1/0"
        );
    }
}

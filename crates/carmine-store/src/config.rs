//! Store configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::storage::CategoryId;

/// Font family used when the store has no valid face name.
const DEFAULT_FONT_FAMILY: &str = "Consolas";
/// Point size used when the store has no valid height.
const DEFAULT_FONT_SIZE: f64 = 13.0;

const FONT_FAMILY_VAR: &str = "CARMINE_FONT_FAMILY";
const FONT_SIZE_VAR: &str = "CARMINE_FONT_SIZE";

/// Which category the gateway works on and its font fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Category holding the classification colors and the editor font.
    pub category: CategoryId,
    pub default_font_family: String,
    pub default_font_size: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            category: CategoryId::text_editor_mef_items(),
            default_font_family: DEFAULT_FONT_FAMILY.to_string(),
            default_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl StoreConfig {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Defaults overridden by `CARMINE_FONT_FAMILY` / `CARMINE_FONT_SIZE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(family) = lookup(FONT_FAMILY_VAR).filter(|f| !f.trim().is_empty()) {
            self.default_font_family = family;
        }
        if let Some(value) = lookup(FONT_SIZE_VAR) {
            self.default_font_size = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Env {
                    var: FONT_SIZE_VAR,
                    value: value.clone(),
                })?;
        }
        self.validate()
    }

    /// The font fallbacks must describe a usable font.
    fn validate(self) -> Result<Self, ConfigError> {
        if self.default_font_family.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "default_font_family",
                value: format!("{:?}", self.default_font_family),
            });
        }
        if !(self.default_font_size.is_finite() && self.default_font_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "default_font_size",
                value: self.default_font_size.to_string(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.category.0, CategoryId::TEXT_EDITOR_MEF_ITEMS);
        assert_eq!(config.default_font_family, "Consolas");
        assert_eq!(config.default_font_size, 13.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = StoreConfig::from_json(r#"{ "default_font_size": 11.5 }"#).unwrap();
        assert_eq!(config.default_font_size, 11.5);
        assert_eq!(config.default_font_family, "Consolas");
    }

    #[test]
    fn test_category_is_a_plain_string() {
        let config = StoreConfig::from_json(r#"{ "category": "abc" }"#).unwrap();
        assert_eq!(config.category, CategoryId::new("abc"));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            StoreConfig::from_json("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::default()
            .with_overrides(|var| match var {
                FONT_FAMILY_VAR => Some("Cascadia Mono".into()),
                FONT_SIZE_VAR => Some(" 10 ".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.default_font_family, "Cascadia Mono");
        assert_eq!(config.default_font_size, 10.0);
    }

    #[test]
    fn test_bad_size_override() {
        let result = StoreConfig::default().with_overrides(|var| {
            (var == FONT_SIZE_VAR).then(|| "-3".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "default_font_size",
                ..
            })
        ));
    }

    #[test]
    fn test_unparsable_size_override() {
        let result = StoreConfig::default().with_overrides(|var| {
            (var == FONT_SIZE_VAR).then(|| "large".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::Env { var: FONT_SIZE_VAR, .. })
        ));
    }

    #[test]
    fn test_bad_json_size() {
        for json in [
            r#"{ "default_font_size": -3.0 }"#,
            r#"{ "default_font_size": 0.0 }"#,
        ] {
            assert!(
                matches!(
                    StoreConfig::from_json(json),
                    Err(ConfigError::Invalid {
                        field: "default_font_size",
                        ..
                    })
                ),
                "{json}"
            );
        }
    }

    #[test]
    fn test_empty_json_family() {
        assert!(matches!(
            StoreConfig::from_json(r#"{ "default_font_family": " " }"#),
            Err(ConfigError::Invalid {
                field: "default_font_family",
                ..
            })
        ));
    }
}

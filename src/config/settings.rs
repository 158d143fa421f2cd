//! TOML-based configuration for vSQL.
//!
//! Supports a config file (vsql.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [render]
//! indent = "    "
//! comment = "generated for ${USER}"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::query::{Query, DEFAULT_INDENT};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// How queries are rendered.
    pub render: RenderSettings,
}

/// Query rendering configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Indentation for clause items; empty renders the query on one line.
    pub indent: String,

    /// Comment put in front of every rendered query.
    pub comment: Option<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            comment: None,
        }
    }
}

impl RenderSettings {
    /// Render `query` with these settings.
    ///
    /// The configured comment is only used if the query has none of its own.
    pub fn render(&self, query: &Query) -> String {
        match (&self.comment, query.comment()) {
            (Some(comment), None) => query
                .clone()
                .with_comment(comment.clone())
                .sqlsource_with_indent(&self.indent),
            _ => query.sqlsource_with_indent(&self.indent),
        }
    }
}

impl FromStr for Settings {
    type Err = SettingsError;

    /// Parse settings, expanding environment variables first.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let content = expand_env_vars(content)?;
        Ok(toml::from_str(&content)?)
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings = content.parse()?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `VSQL_CONFIG`
    /// 2. `./vsql.toml`
    /// 3. `~/.config/vsql/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("VSQL_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("vsql.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("vsql").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A `$` not followed by a name is kept.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.next_if_eq(&'{').is_some() {
            let name = std::iter::from_fn(|| chars.next_if(|&ch| ch != '}')).collect();
            chars.next(); // '}'
            name
        } else {
            std::iter::from_fn(|| chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_')).collect()
        };

        if var_name.is_empty() {
            result.push('$');
        } else {
            let value =
                env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
            result.push_str(&value);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_env_vars_braces() {
        env::set_var("VSQL_TEST_VAR", "hello");
        assert_eq!(expand_env_vars("${VSQL_TEST_VAR}").unwrap(), "hello");
        assert_eq!(
            expand_env_vars("prefix_${VSQL_TEST_VAR}_suffix").unwrap(),
            "prefix_hello_suffix"
        );
        env::remove_var("VSQL_TEST_VAR");
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        env::set_var("VSQL_TEST_VAR2", "world");
        assert_eq!(expand_env_vars("$VSQL_TEST_VAR2").unwrap(), "world");
        assert_eq!(expand_env_vars("$VSQL_TEST_VAR2!").unwrap(), "world!");
        assert_eq!(expand_env_vars("costs $ 5").unwrap(), "costs $ 5");
        env::remove_var("VSQL_TEST_VAR2");
    }

    #[test]
    fn test_expand_env_vars_missing() {
        let result = expand_env_vars("${NONEXISTENT_VAR_12345}");
        assert!(matches!(result, Err(SettingsError::MissingEnvVar(name)) if name == "NONEXISTENT_VAR_12345"));
    }

    #[test]
    fn test_parse_toml() {
        let settings: Settings = r#"
[render]
indent = "  "
comment = "report"
"#
        .parse()
        .unwrap();

        assert_eq!(settings.render.indent, "  ");
        assert_eq!(settings.render.comment.as_deref(), Some("report"));
    }

    #[test]
    fn test_default_settings() {
        let settings: Settings = "".parse().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.render.indent, "\t");
        assert!(settings.render.comment.is_none());
    }

    #[test]
    fn test_render_uses_configured_comment() {
        let render = RenderSettings {
            indent: String::new(),
            comment: Some("nightly".into()),
        };
        assert_eq!(
            render.render(&Query::new()),
            "/* nightly */ select 42 from dual"
        );
        assert_eq!(
            render.render(&Query::new().with_comment("own")),
            "/* own */ select 42 from dual"
        );
    }
}

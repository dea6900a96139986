//! Linter configuration.
//!
//! [`LinterConfig`] mirrors the on-disk document. [`RuleConfiguration`] is
//! the resolved view a lint pass runs against.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::LinterError;
use crate::globals::{GlobalMap, GlobalOrigin, overlay, overlay_names};
use crate::rule::{OptionFlag, RuleCode, RuleLevel};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Default for `max_line_length`.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 80;

const MAX_LINE_LENGTH_KEY: &str = "max_line_length";

/// Configuration document for the linter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Rule levels, numeric options and option flags, keyed by name.
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,

    /// Extra language globals.
    #[serde(default)]
    pub globals: Vec<String>,

    /// Extra browser globals, used when `browser` is set.
    #[serde(default)]
    pub globals_browser: Vec<String>,

    /// User-declared globals.
    #[serde(default)]
    pub globals_user: Vec<String>,
}

/// Value of a single entry in `options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// `true` / `false`.
    Flag(bool),
    /// Numeric option such as `max_line_length`.
    Number(u64),
    /// `"off"`, `"warn"` or `"error"`.
    Level(RuleLevel),
}

impl LinterConfig {
    /// File names searched by [`LinterConfig::discover`], in priority order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".lexlint.jsonc", ".lexlint.json"];

    /// Creates a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the nearest configuration file in `start` or its ancestors.
    pub fn discover(start: impl AsRef<Path>) -> Option<PathBuf> {
        for dir in start.as_ref().ancestors() {
            for name in Self::CONFIG_FILES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    info!("Using config file: {}", candidate.display());
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.lexlint.jsonc`, `.lexlint.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::config(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON or JSONC string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        Self::from_value(value)
    }

    /// Builds configuration from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, LinterError> {
        let schema = CONFIG_SCHEMA
            .get_or_init(|| {
                let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
                    .map_err(|e| format!("Invalid embedded config schema: {}", e))?;
                Validator::new(&schema_json)
                    .map_err(|e| format!("Invalid config schema compilation: {}", e))
            })
            .as_ref()
            .map_err(|e| LinterError::internal(e.clone()))?;

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LinterError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Resolves the document against the rule catalog.
    ///
    /// Unknown keys and values of the wrong kind are dropped with a warning.
    pub fn resolve(&self) -> RuleConfiguration {
        let mut resolved = RuleConfiguration::new();

        for (key, value) in &self.options {
            if let Ok(code) = key.parse::<RuleCode>() {
                let level = match *value {
                    OptionValue::Level(level) => level,
                    OptionValue::Flag(true) => code.enabled_level(),
                    OptionValue::Flag(false) => RuleLevel::Off,
                    OptionValue::Number(_) => {
                        warn!("Ignoring numeric value for rule '{}'", key);
                        continue;
                    }
                };
                resolved.rules.insert(code, level);
            } else if key == MAX_LINE_LENGTH_KEY {
                match *value {
                    OptionValue::Number(n) => {
                        resolved.max_line_length = usize::try_from(n).unwrap_or(usize::MAX);
                    }
                    _ => warn!("Option '{}' expects a number", key),
                }
            } else if let Ok(flag) = key.parse::<OptionFlag>() {
                match *value {
                    OptionValue::Flag(enabled) => {
                        resolved.flags.insert(flag, enabled);
                    }
                    _ => warn!("Option '{}' expects true or false", key),
                }
            } else {
                warn!("Ignoring unknown option '{}'", key);
            }
        }

        resolved.extra_globals = self.globals.clone();
        resolved.extra_browser_globals = self.globals_browser.clone();
        resolved.user_globals = self.globals_user.clone();
        resolved
    }
}

/// Resolved rule levels, numeric options, flags and globals.
///
/// Immutable for the duration of a lint pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfiguration {
    rules: BTreeMap<RuleCode, RuleLevel>,
    max_line_length: usize,
    flags: BTreeMap<OptionFlag, bool>,
    extra_globals: Vec<String>,
    extra_browser_globals: Vec<String>,
    user_globals: Vec<String>,
}

impl RuleConfiguration {
    /// Creates a configuration where every rule uses its default level.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            flags: BTreeMap::new(),
            extra_globals: Vec::new(),
            extra_browser_globals: Vec::new(),
            user_globals: Vec::new(),
        }
    }

    pub fn with_rule(mut self, code: RuleCode, level: RuleLevel) -> Self {
        self.rules.insert(code, level);
        self
    }

    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    pub fn with_flag(mut self, flag: OptionFlag, enabled: bool) -> Self {
        self.flags.insert(flag, enabled);
        self
    }

    /// Level set explicitly for `code`, if any.
    pub fn rule_level(&self, code: RuleCode) -> Option<RuleLevel> {
        self.rules.get(&code).copied()
    }

    /// Effective level of `code`.
    pub fn level(&self, code: RuleCode) -> RuleLevel {
        self.rule_level(code).unwrap_or(code.default_level())
    }

    pub fn flag(&self, flag: OptionFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Builds the globals map.
    ///
    /// Language built-ins are always present; environment categories follow
    /// their flags; configured lists are layered last.
    pub fn globals(&self) -> GlobalMap {
        let mut globals = GlobalMap::new();
        overlay(&mut globals, GlobalOrigin::EcmaScript);

        for (flag, origin) in ENVIRONMENTS {
            if self.flag(*flag) {
                overlay(&mut globals, *origin);
            }
        }

        overlay_names(
            &mut globals,
            self.extra_globals.iter().map(String::as_str),
            GlobalOrigin::EcmaScript,
        );
        if self.flag(OptionFlag::Browser) {
            overlay_names(
                &mut globals,
                self.extra_browser_globals.iter().map(String::as_str),
                GlobalOrigin::Browser,
            );
        }
        overlay_names(
            &mut globals,
            self.user_globals.iter().map(String::as_str),
            GlobalOrigin::UserDefined,
        );

        globals
    }
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

/// Flags that pull in a category of built-in globals.
pub(crate) const ENVIRONMENTS: &[(OptionFlag, GlobalOrigin)] = &[
    (OptionFlag::Browser, GlobalOrigin::Browser),
    (OptionFlag::Node, GlobalOrigin::NodeJs),
    (OptionFlag::Couch, GlobalOrigin::CouchDb),
    (OptionFlag::Devel, GlobalOrigin::Development),
];

// src/config/model.rs

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A build config document as read from JSON.
///
/// The file holds either one profile object or an array of them:
///
/// ```json
/// {
///   "enable": 1,
///   "file_list": { "./src": ["\\.cc$", "\\.h$"] },
///   "build_command": "make",
///   "build_args": ["-C", "build", "$TARGET"]
/// }
/// ```
///
/// Which variant applies is decided by the JSON shape alone: an array is
/// `Many`, an object is `Single`. Decoding errors then come from that
/// variant, so they name the offending field.
#[derive(Debug, Clone)]
pub enum ConfigDocument {
    Many(Vec<RawProfile>),
    Single(RawProfile),
}

impl<'de> Deserialize<'de> for ConfigDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Array(_) => Vec::<RawProfile>::deserialize(value)
                .map(ConfigDocument::Many)
                .map_err(D::Error::custom),
            Value::Object(_) => RawProfile::deserialize(value)
                .map(ConfigDocument::Single)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected a profile object or an array of profiles, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ConfigDocument {
    /// Flatten into document-ordered profiles.
    pub fn into_profiles(self) -> Vec<RawProfile> {
        match self {
            ConfigDocument::Many(list) => list,
            ConfigDocument::Single(profile) => vec![profile],
        }
    }
}

/// One profile exactly as it appears in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    /// Numeric on/off flag. Only a number equal to zero disables the profile;
    /// anything else (including absence) leaves it active.
    #[serde(default, alias = "enabled")]
    pub enable: Option<Value>,

    /// Directory path -> regex patterns matched against entry names.
    #[serde(default)]
    pub file_list: BTreeMap<String, Vec<String>>,

    /// Executable name or path.
    pub build_command: String,

    /// Argument template; elements equal to `$TARGET` are replaced per build.
    #[serde(default)]
    pub build_args: Vec<String>,
}

/// Resolved, immutable profile used by the scanner and the build runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Position of the profile in the config document.
    pub index: usize,
    pub enabled: bool,
    pub file_list: BTreeMap<String, Vec<String>>,
    pub build_command: String,
    pub build_args: Vec<String>,
}

impl Profile {
    pub fn from_raw(index: usize, raw: RawProfile) -> Self {
        Self {
            index,
            enabled: !is_disabled_flag(raw.enable.as_ref()),
            file_list: raw.file_list,
            build_command: raw.build_command,
            build_args: raw.build_args,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// `true` only for a JSON number equal to zero.
fn is_disabled_flag(flag: Option<&Value>) -> bool {
    match flag {
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Fully loaded configuration: every profile of the document, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub profiles: Vec<Profile>,
}

impl From<ConfigDocument> for ConfigFile {
    fn from(doc: ConfigDocument) -> Self {
        let profiles = doc
            .into_profiles()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Profile::from_raw(index, raw))
            .collect();
        Self { profiles }
    }
}

impl ConfigFile {
    /// Profiles that should be installed (enable flag not zero).
    pub fn active_profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter().filter(|p| p.is_enabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ConfigFile {
        let doc: ConfigDocument = serde_json::from_str(json).unwrap();
        ConfigFile::from(doc)
    }

    #[test]
    fn single_object_becomes_one_profile() {
        let cfg = parse(
            r#"{ "file_list": { "src": ["\\.c$"] }, "build_command": "make", "build_args": ["$TARGET"] }"#,
        );
        assert_eq!(cfg.profiles.len(), 1);
        let p = &cfg.profiles[0];
        assert_eq!(p.index, 0);
        assert_eq!(p.build_command, "make");
        assert_eq!(p.build_args, vec!["$TARGET".to_string()]);
        assert_eq!(p.file_list["src"], vec!["\\.c$".to_string()]);
        assert!(p.is_enabled());
    }

    #[test]
    fn array_keeps_document_order() {
        let cfg = parse(
            r#"[
                { "build_command": "first" },
                { "build_command": "second", "enable": 0 },
                { "build_command": "third" }
            ]"#,
        );
        let names: Vec<_> = cfg.profiles.iter().map(|p| p.build_command.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        let indices: Vec<_> = cfg.profiles.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);

        let active: Vec<_> = cfg.active_profiles().map(|p| p.build_command.as_str()).collect();
        assert_eq!(active, vec!["first", "third"]);
    }

    #[test]
    fn only_numeric_zero_disables() {
        let disabled = [r#"0"#, r#"0.0"#, r#"-0"#];
        for flag in disabled {
            let cfg = parse(&format!(r#"{{ "build_command": "x", "enable": {flag} }}"#));
            assert!(!cfg.profiles[0].is_enabled(), "enable: {flag} should disable");
        }

        let enabled = [r#"1"#, r#"2"#, r#""0""#, r#"false"#, r#"null"#, r#"-1"#];
        for flag in enabled {
            let cfg = parse(&format!(r#"{{ "build_command": "x", "enable": {flag} }}"#));
            assert!(cfg.profiles[0].is_enabled(), "enable: {flag} should stay active");
        }
    }

    #[test]
    fn enabled_alias_is_accepted() {
        let cfg = parse(r#"{ "build_command": "x", "enabled": 0 }"#);
        assert!(!cfg.profiles[0].is_enabled());
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let cfg = parse(r#"{ "build_command": "true" }"#);
        let p = &cfg.profiles[0];
        assert!(p.file_list.is_empty());
        assert!(p.build_args.is_empty());
    }

    #[test]
    fn missing_build_command_error_names_the_field() {
        let single: Result<ConfigDocument, _> = serde_json::from_str(r#"{ "build_args": [] }"#);
        let msg = single.unwrap_err().to_string();
        assert!(msg.contains("missing field `build_command`"), "got: {msg}");

        let many: Result<ConfigDocument, _> =
            serde_json::from_str(r#"[{ "build_command": "ok" }, { "build_args": [] }]"#);
        let msg = many.unwrap_err().to_string();
        assert!(msg.contains("missing field `build_command`"), "got: {msg}");
    }

    #[test]
    fn scalar_document_error_names_the_shape() {
        let res: Result<ConfigDocument, _> = serde_json::from_str("42");
        let msg = res.unwrap_err().to_string();
        assert!(msg.contains("found a number"), "got: {msg}");
    }
}

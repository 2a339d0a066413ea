// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Turns `--debug-tagbook-api` / `--debug-all` style arguments into
//! per-crate `debug` filter directives.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Debug flags collected from arguments and `TAGBOOK_DEBUG`
///
/// ```rust
/// use tagbook_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-tagbook-api".to_string()]);
/// assert!(flags.is_enabled("tagbook-api"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Looks for arguments matching `--debug-{crate-name}` and `--debug-all`.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut enabled_crates = HashMap::new();
        let mut debug_all = false;

        for arg in args {
            if arg == "--debug-all" {
                debug_all = true;
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                enabled_crates.insert(crate_name.to_string(), true);
            }
        }

        if debug_all {
            for crate_name in KNOWN_CRATES {
                enabled_crates.insert(crate_name.to_string(), true);
            }
        }

        CrateDebugFlags { enabled_crates }
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Build an `EnvFilter` directive string.
    ///
    /// Targets use crate names as written in `tracing` calls (`tagbook-api`),
    /// and the module paths (`tagbook_api`) are raised alongside them.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters = vec![default_level.to_string()];
        let mut names: Vec<&String> = self.enabled_crates.keys().collect();
        names.sort();
        for crate_name in names {
            filters.push(format!("{}=debug", crate_name));
            let module_path = crate_name.replace('-', "_");
            if module_path != *crate_name {
                filters.push(format!("{}=debug", module_path));
            }
        }
        filters.join(",")
    }
}

/// Parse debug flags from `--debug-*` style arguments plus the
/// `TAGBOOK_DEBUG` variable (comma-separated crate names, or `all`).
pub fn parse_debug_flags<I>(args: I) -> CrateDebugFlags
where
    I: IntoIterator<Item = String>,
{
    let mut flags = CrateDebugFlags::from_args(args);

    if let Ok(env_var) = env::var("TAGBOOK_DEBUG") {
        merge_env_value(&mut flags, &env_var);
    }

    flags
}

fn merge_env_value(flags: &mut CrateDebugFlags, value: &str) {
    if value == "all" {
        for crate_name in KNOWN_CRATES {
            flags.enabled_crates.insert(crate_name.to_string(), true);
        }
        return;
    }
    for crate_name in value.split(',') {
        let crate_name = crate_name.trim();
        if !crate_name.is_empty() {
            flags.enabled_crates.insert(crate_name.to_string(), true);
        }
    }
}

/// Help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug all                    Enable debug logging for all crates
  --debug {{crate-name}}[,...]    Enable debug logging for specific crates

Available crates:
  {}

Environment Variable:
  TAGBOOK_DEBUG={{crate-name}}[,{{crate-name}}]
  TAGBOOK_DEBUG=all
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-tagbook-api".to_string()]);
        assert!(flags.is_enabled("tagbook-api"));
        assert!(!flags.is_enabled("tagbook-services"));
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_unrelated_args_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "tagbook".to_string(),
            "serve".to_string(),
            "--port".to_string(),
        ]);
        assert!(!flags.any_enabled());
        assert_eq!(flags.to_filter_string("info"), "info");
    }

    #[test]
    fn test_filter_string_covers_module_path() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-tagbook-api".to_string()]);
        let filter = flags.to_filter_string("warn");
        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("tagbook-api=debug"));
        assert!(filter.contains("tagbook_api=debug"));
    }

    #[test]
    fn test_env_value_list() {
        let mut flags = CrateDebugFlags::default();
        merge_env_value(&mut flags, "tagbook-api, tagbook-services,");
        assert!(flags.is_enabled("tagbook-api"));
        assert!(flags.is_enabled("tagbook-services"));
        assert_eq!(flags.enabled_crates.len(), 2);
    }
}

use anyhow::{Context, Result};
use glob::Pattern;

/// File name patterns and the package directory they are copied to.
pub const DEFAULT_RULES: [(&str, &str); 5] = [
    ("libpact_ffi*.so", "lib"),
    ("libpact_ffi*.dylib", "lib"),
    ("pact_ffi*.lib", "lib"),
    ("pact_ffi*.dll", "bin"),
    ("*.h", "include"),
];

#[derive(Debug, Clone)]
pub struct StageRule {
    pub pattern: Pattern,
    pub destination: String,
}

impl StageRule {
    pub fn new(pattern: &str, destination: &str) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::new(pattern)
                .with_context(|| format!("Invalid staging pattern '{}'", pattern))?,
            destination: destination.to_string(),
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.matches(file_name)
    }
}

/// Ordered rule table; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct StageRules {
    rules: Vec<StageRule>,
}

impl StageRules {
    /// Destination directory for a file name, or None when the file is not staged.
    pub fn destination_for(&self, file_name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(file_name))
            .map(|rule| rule.destination.as_str())
    }
}

impl Default for StageRules {
    fn default() -> Self {
        // Every built-in pattern is valid glob syntax
        let rules = DEFAULT_RULES
            .iter()
            .filter_map(|(pattern, dest)| StageRule::new(pattern, dest).ok())
            .collect();
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_destinations() {
        let rules = StageRules::default();
        assert_eq!(rules.destination_for("libpact_ffi.so"), Some("lib"));
        assert_eq!(rules.destination_for("libpact_ffi.dylib"), Some("lib"));
        assert_eq!(rules.destination_for("pact_ffi.lib"), Some("lib"));
        assert_eq!(rules.destination_for("pact_ffi.dll.lib"), Some("lib"));
        assert_eq!(rules.destination_for("pact_ffi.dll"), Some("bin"));
        assert_eq!(rules.destination_for("pact.h"), Some("include"));
        assert_eq!(rules.destination_for("pact-cpp.h"), Some("include"));
    }

    #[test]
    fn test_every_default_rule_is_loaded() {
        let rules = StageRules::default();
        for (pattern, dest) in DEFAULT_RULES {
            let sample = pattern.replace('*', "");
            assert_eq!(rules.destination_for(&sample), Some(dest), "{}", pattern);
        }
    }

    #[test]
    fn test_unmatched_files_are_not_staged() {
        let rules = StageRules::default();
        assert_eq!(rules.destination_for("libpact_ffi.so.gz"), None);
        assert_eq!(rules.destination_for("pact_ffi.dll.gz"), None);
        assert_eq!(rules.destination_for("libpact_ffi.so.gz.sha256"), None);
        assert_eq!(rules.destination_for("libother.so"), None);
        assert_eq!(rules.destination_for("meta.json"), None);
    }

    #[test]
    fn test_default_rules_are_disjoint() {
        let rules: Vec<StageRule> = DEFAULT_RULES
            .iter()
            .map(|(pattern, dest)| StageRule::new(pattern, dest).unwrap())
            .collect();
        let names = [
            "libpact_ffi.so",
            "libpact_ffi-linux-x86_64.so",
            "libpact_ffi.dylib",
            "pact_ffi.lib",
            "pact_ffi.dll",
            "pact.h",
            "pact-cpp.h",
        ];
        for name in names {
            let matching = rules.iter().filter(|r| r.matches(name)).count();
            assert_eq!(matching, 1, "{} matched {} rules", name, matching);
        }
    }

    #[test]
    fn test_rule_matches_file_name() {
        let rule = StageRule::new("*.txt", "share").unwrap();
        assert!(rule.matches("LICENSE.txt"));
        assert!(!rule.matches("pact.h"));
        assert_eq!(rule.destination, "share");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(StageRule::new("[", "lib").is_err());
    }
}

// src/watch/patterns.rs

use std::path::Path;

use regex::Regex;
use tracing::error;

/// A single file path being monitored.
///
/// The path is the configured directory string joined with the entry name by
/// a `/`, exactly as written in the config; it is not canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchTarget {
    path: String,
}

impl WatchTarget {
    pub fn new(dir: &str, name: &str) -> Self {
        Self {
            path: format!("{dir}/{name}"),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.path)
    }
}

/// Compile a directory's pattern list, keeping the configured order.
///
/// Patterns that fail to compile are logged and skipped; the others still
/// apply.
pub fn compile_patterns(dir: &str, patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(err) => {
                error!(dir, pattern = %pattern, error = %err, "invalid file pattern; skipping");
                None
            }
        })
        .collect()
}

/// Match directory entries against patterns.
///
/// Matching is unanchored (`is_match`), so `\.c` also matches `a.cc`; use
/// `^`/`$` in the pattern to anchor. Every (entry, pattern) match yields a
/// target, so a name that matches two patterns appears twice.
pub fn match_entries(dir: &str, entries: &[String], patterns: &[Regex]) -> Vec<WatchTarget> {
    let mut targets = Vec::new();
    for name in entries {
        for re in patterns {
            if re.is_match(name) {
                targets.push(WatchTarget::new(dir, name));
            }
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn paths(targets: &[WatchTarget]) -> Vec<&str> {
        targets.iter().map(|t| t.path()).collect()
    }

    #[test]
    fn txt_pattern_skips_log_file() {
        let patterns = compile_patterns("docs", &names(&[r"\.txt$"]));
        let targets = match_entries("docs", &names(&["a.txt", "b.log", "c.txt"]), &patterns);
        assert_eq!(paths(&targets), vec!["docs/a.txt", "docs/c.txt"]);
    }

    #[test]
    fn matching_is_unanchored() {
        let patterns = compile_patterns("src", &names(&[r"\.c"]));
        let targets = match_entries("src", &names(&["main.c", "util.cc", "README"]), &patterns);
        assert_eq!(paths(&targets), vec!["src/main.c", "src/util.cc"]);
    }

    #[test]
    fn name_matching_two_patterns_yields_duplicate_targets() {
        let patterns = compile_patterns("src", &names(&[r"\.h$", r"^net"]));
        let targets = match_entries("src", &names(&["netdec.h", "timer.h", "netdec.cc"]), &patterns);
        assert_eq!(
            paths(&targets),
            vec!["src/netdec.h", "src/netdec.h", "src/timer.h", "src/netdec.cc"]
        );
    }

    #[test]
    fn invalid_pattern_is_skipped_but_others_apply() {
        let patterns = compile_patterns("src", &names(&["(unclosed", r"\.rs$"]));
        assert_eq!(patterns.len(), 1);
        let targets = match_entries("src", &names(&["lib.rs"]), &patterns);
        assert_eq!(paths(&targets), vec!["src/lib.rs"]);
    }

    #[test]
    fn target_path_joins_directory_verbatim() {
        assert_eq!(WatchTarget::new("./src", "a.c").path(), "./src/a.c");
        assert_eq!(WatchTarget::new("/abs/dir", "a.c").as_path(), Path::new("/abs/dir/a.c"));
    }
}

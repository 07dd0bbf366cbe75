// src/exec/args.rs

/// Placeholder replaced by the trigger file (or `INIT`) in `build_args`.
pub const TARGET_PLACEHOLDER: &str = "$TARGET";

/// Expand an argument template for one build.
///
/// Only elements that are exactly `$TARGET` are replaced; an element that
/// merely contains the token (e.g. `--file=$TARGET`) is passed through.
pub fn substitute_args(template: &[String], target: &str) -> Vec<String> {
    template
        .iter()
        .map(|arg| {
            if arg == TARGET_PLACEHOLDER {
                target.to_string()
            } else {
                arg.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn replaces_placeholder_in_place() {
        let out = substitute_args(&strings(&["run", "$TARGET", "--flag"]), "src/x.c");
        assert_eq!(out, strings(&["run", "src/x.c", "--flag"]));
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = substitute_args(&strings(&["$TARGET", "-o", "$TARGET"]), "INIT");
        assert_eq!(out, strings(&["INIT", "-o", "INIT"]));
    }

    #[test]
    fn embedded_token_is_not_substituted() {
        let out = substitute_args(&strings(&["--file=$TARGET", "$TARGETS", "$target"]), "a");
        assert_eq!(out, strings(&["--file=$TARGET", "$TARGETS", "$target"]));
    }

    #[test]
    fn empty_template_stays_empty() {
        assert!(substitute_args(&[], "a").is_empty());
    }
}

//! Branch naming conventions: validation rules and fix suggestions.
//!
//! Pure string logic, no git interaction. The rules split into two layers:
//! rules git itself enforces (no spaces, no `..`, no `~^:?*[\`), applied for
//! every convention, and the team convention layered on top.

use clap::ValueEnum;

/// Supported branch naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Convention {
    /// GitFlow: `feature/`, `bugfix/`, `hotfix/`, `release/`, `support/`
    /// prefixes, plus the `main`/`master`/`develop` mainline branches.
    Gitflow,
    /// Any `type/description` shape with at least one slash.
    FeatureSlash,
    /// Lowercase with hyphens: `my-branch-name` (slashes allowed).
    KebabCase,
    /// Lowercase with underscores: `my_branch_name` (slashes allowed).
    SnakeCase,
}

/// Characters git refuses in ref names.
const INVALID_CHARS: &[char] = &['~', '^', ':', '?', '*', '[', ']', '\\'];

const GITFLOW_PREFIXES: &[&str] = &["feature/", "bugfix/", "hotfix/", "release/", "support/"];
const MAINLINE_BRANCHES: &[&str] = &["main", "master", "develop"];

/// Validates a branch name against a convention.
///
/// Returns `Err(reason)` with a human-readable explanation on the first
/// rule the name breaks.
pub fn validate(name: &str, convention: Convention) -> Result<(), String> {
    if name.is_empty() {
        return Err("Branch name cannot be empty".to_string());
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Err("Branch name cannot start or end with '/'".to_string());
    }
    if name.contains("//") {
        return Err("Branch name cannot contain consecutive slashes '//'".to_string());
    }
    if name.contains(' ') {
        return Err("Branch name cannot contain spaces".to_string());
    }
    for &c in INVALID_CHARS {
        if name.contains(c) {
            return Err(format!("Branch name cannot contain '{c}'"));
        }
    }
    if name.contains("..") {
        return Err("Branch name cannot contain '..'".to_string());
    }

    match convention {
        Convention::Gitflow => validate_gitflow(name),
        Convention::FeatureSlash => validate_feature_slash(name),
        Convention::KebabCase => validate_charset(
            name,
            '-',
            "Branch name should be lowercase with hyphens (kebab-case)",
        ),
        Convention::SnakeCase => validate_charset(
            name,
            '_',
            "Branch name should be lowercase with underscores (snake_case)",
        ),
    }
}

fn validate_gitflow(name: &str) -> Result<(), String> {
    if MAINLINE_BRANCHES.contains(&name) {
        return Ok(());
    }

    let Some(prefix) = GITFLOW_PREFIXES.iter().find(|p| name.starts_with(**p)) else {
        return Err(format!(
            "Branch must start with one of: {}, main, master, develop",
            GITFLOW_PREFIXES.join(", ")
        ));
    };

    let suffix = &name[prefix.len()..];
    if suffix.is_empty() {
        return Err(format!("Branch name cannot be just '{prefix}'"));
    }
    if !suffix.chars().all(is_kebab_char) {
        return Err("Branch suffix should be lowercase with hyphens or slashes only".to_string());
    }

    Ok(())
}

fn validate_feature_slash(name: &str) -> Result<(), String> {
    if !name.contains('/') {
        return Err("Branch name should contain '/' (e.g., feature/my-feature)".to_string());
    }
    Ok(())
}

fn validate_charset(name: &str, separator: char, message: &str) -> Result<(), String> {
    let ok = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == separator || c == '/');
    if ok {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

fn is_kebab_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '/'
}

/// Suggests a corrected branch name.
///
/// Applies the git-level cleanups first (strip edge slashes, spaces to
/// hyphens, collapse `//`, drop forbidden characters, lowercase), then the
/// convention-specific shape.
pub fn suggest(name: &str, convention: Convention) -> String {
    let mut fixed: String = name.trim_matches('/').replace(' ', "-");

    while fixed.contains("//") {
        fixed = fixed.replace("//", "/");
    }

    fixed.retain(|c| !INVALID_CHARS.contains(&c));
    while fixed.contains("..") {
        fixed = fixed.replace("..", "");
    }

    fixed = fixed.to_lowercase();

    match convention {
        Convention::Gitflow => fix_gitflow(fixed),
        Convention::FeatureSlash => fixed,
        Convention::KebabCase => map_segments(&fixed, |s| s.replace('_', "-")),
        Convention::SnakeCase => map_segments(&fixed, |s| s.replace('-', "_")),
    }
}

fn fix_gitflow(name: String) -> String {
    if MAINLINE_BRANCHES.contains(&name.as_str()) {
        return name;
    }

    let prefixed = if GITFLOW_PREFIXES.iter().any(|p| name.starts_with(p)) {
        name
    } else {
        // Guess the branch type from common keywords. Hotfix/release are
        // checked first: "hotfix" contains "fix" and must not fall into
        // the bugfix bucket.
        let prefix = if name.contains("hotfix") {
            "hotfix/"
        } else if name.contains("release") {
            "release/"
        } else if ["feat", "feature", "add", "implement"]
            .iter()
            .any(|k| name.contains(k))
        {
            "feature/"
        } else if ["bug", "fix", "issue"].iter().any(|k| name.contains(k)) {
            "bugfix/"
        } else {
            "feature/"
        };
        format!("{prefix}{name}")
    };

    // Kebab-case the suffix, keep the prefix intact
    for prefix in GITFLOW_PREFIXES {
        if let Some(suffix) = prefixed.strip_prefix(prefix) {
            return format!("{prefix}{}", suffix.replace('_', "-"));
        }
    }
    prefixed
}

fn map_segments(name: &str, f: impl Fn(&str) -> String) -> String {
    name.split('/').map(|s| f(s)).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_rules_apply_to_every_convention() {
        for convention in [
            Convention::Gitflow,
            Convention::FeatureSlash,
            Convention::KebabCase,
            Convention::SnakeCase,
        ] {
            assert!(validate("", convention).is_err());
            assert!(validate("/leading", convention).is_err());
            assert!(validate("trailing/", convention).is_err());
            assert!(validate("a//b", convention).is_err());
            assert!(validate("has space", convention).is_err());
            assert!(validate("bad~name", convention).is_err());
            assert!(validate("bad..name", convention).is_err());
        }
    }

    #[test]
    fn gitflow_accepts_mainline_and_prefixed() {
        assert!(validate("main", Convention::Gitflow).is_ok());
        assert!(validate("develop", Convention::Gitflow).is_ok());
        assert!(validate("feature/add-login", Convention::Gitflow).is_ok());
        assert!(validate("bugfix/issue-42", Convention::Gitflow).is_ok());
        assert!(validate("release/1-2-0", Convention::Gitflow).is_ok());
    }

    #[test]
    fn gitflow_rejects_bad_shapes() {
        assert!(validate("my-branch", Convention::Gitflow).is_err());
        assert!(validate("feature/", Convention::Gitflow).is_err());
        assert!(validate("feature/Add-Login", Convention::Gitflow).is_err());
        assert!(validate("feature/add_login", Convention::Gitflow).is_err());
    }

    #[test]
    fn feature_slash_needs_a_slash() {
        assert!(validate("feature/anything", Convention::FeatureSlash).is_ok());
        assert!(validate("wip/Mixed-Case", Convention::FeatureSlash).is_ok());
        assert!(validate("no-slash-here", Convention::FeatureSlash).is_err());
    }

    #[test]
    fn kebab_and_snake_charsets() {
        assert!(validate("my-branch-2", Convention::KebabCase).is_ok());
        assert!(validate("my_branch", Convention::KebabCase).is_err());
        assert!(validate("My-Branch", Convention::KebabCase).is_err());

        assert!(validate("my_branch_2", Convention::SnakeCase).is_ok());
        assert!(validate("my-branch", Convention::SnakeCase).is_err());
    }

    #[test]
    fn suggest_cleans_git_level_problems() {
        assert_eq!(
            suggest("/My Feature Branch/", Convention::KebabCase),
            "my-feature-branch"
        );
        assert_eq!(suggest("a//b", Convention::KebabCase), "a/b");
        assert_eq!(suggest("bad~na^me", Convention::KebabCase), "badname");
    }

    #[test]
    fn suggest_guesses_gitflow_prefix() {
        assert_eq!(
            suggest("add login page", Convention::Gitflow),
            "feature/add-login-page"
        );
        assert_eq!(
            suggest("fix-header-bug", Convention::Gitflow),
            "bugfix/fix-header-bug"
        );
        assert_eq!(
            suggest("hotfix payment crash", Convention::Gitflow),
            "hotfix/hotfix-payment-crash"
        );
        assert_eq!(suggest("cleanup", Convention::Gitflow), "feature/cleanup");
        assert_eq!(suggest("main", Convention::Gitflow), "main");
    }

    #[test]
    fn suggest_keeps_existing_gitflow_prefix() {
        assert_eq!(
            suggest("feature/My_New_Thing", Convention::Gitflow),
            "feature/my-new-thing"
        );
    }

    #[test]
    fn suggest_swaps_separators_per_convention() {
        assert_eq!(
            suggest("wip/my_mixed-name", Convention::KebabCase),
            "wip/my-mixed-name"
        );
        assert_eq!(
            suggest("wip/my_mixed-name", Convention::SnakeCase),
            "wip/my_mixed_name"
        );
    }

    #[test]
    fn suggested_names_validate() {
        for raw in ["My Feature Branch", "fix login bug", "/weird//path/"] {
            for convention in [
                Convention::Gitflow,
                Convention::KebabCase,
                Convention::SnakeCase,
            ] {
                let fixed = suggest(raw, convention);
                assert!(
                    validate(&fixed, convention).is_ok(),
                    "{raw:?} -> {fixed:?} should validate under {convention:?}"
                );
            }
        }
    }
}

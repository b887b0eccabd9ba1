//! Dispatch configuration
//!
//! [`SliceConfig`] controls how dispatchers find their handler and which
//! dispatches are logged through `tracing`.
//!
//! # Example
//!
//! ```
//! use slice_dispatch_core::{DispatchLogConfig, Resolution, SliceConfig};
//!
//! let config = SliceConfig::default()
//!     .with_resolution(Resolution::Captured)
//!     .with_log(DispatchLogConfig::new(Some("todo*"), None));
//!
//! assert!(config.log.should_log("todoAdd"));
//! assert!(!config.log.should_log("setInputText"));
//! ```

/// How a dispatcher finds the handler for its action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    /// Re-run a reducer function against the previous state on every
    /// dispatch and take the handler from that fresh mapping
    #[default]
    Rebind,
    /// Use the handler mapping captured when the table was built
    Captured,
}

impl Resolution {
    /// Lowercase name, as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Resolution::Rebind => "rebind",
            Resolution::Captured => "captured",
        }
    }

    /// Parse a lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rebind" => Some(Resolution::Rebind),
            "captured" => Some(Resolution::Captured),
            _ => None,
        }
    }
}

/// Glob filter deciding which action names are logged.
///
/// Patterns support:
/// - `*` matches any sequence of characters
/// - `?` matches any single character
/// - Literal text matches exactly
///
/// # Examples
///
/// - `todo*` matches todoAdd, todoToggle, etc.
/// - `*Text` matches setInputText, clearText, etc.
#[derive(Debug, Clone, Default)]
pub struct DispatchLogConfig {
    /// If non-empty, only log actions matching these patterns
    pub include_patterns: Vec<String>,
    /// Exclude actions matching these patterns (applied after include)
    pub exclude_patterns: Vec<String>,
}

impl DispatchLogConfig {
    /// Create a config from comma-separated pattern strings
    ///
    /// ```
    /// use slice_dispatch_core::DispatchLogConfig;
    ///
    /// let config = DispatchLogConfig::new(Some("add*, remove*"), Some("addDraft"));
    /// assert!(config.should_log("addTodo"));
    /// assert!(config.should_log("removeTodo"));
    /// assert!(!config.should_log("addDraft"));
    /// assert!(!config.should_log("toggleTodo"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include_patterns: include.map(split_patterns).unwrap_or_default(),
            exclude_patterns: exclude.map(split_patterns).unwrap_or_default(),
        }
    }

    /// Create a config with specific pattern vectors
    pub fn with_patterns(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self {
            include_patterns: include,
            exclude_patterns: exclude,
        }
    }

    /// A config that logs nothing
    pub fn silent() -> Self {
        Self::with_patterns(Vec::new(), vec!["*".to_string()])
    }

    /// Check if an action name should be logged
    pub fn should_log(&self, action: &str) -> bool {
        let included =
            self.include_patterns.is_empty() || any_match(&self.include_patterns, action);
        included && !any_match(&self.exclude_patterns, action)
    }
}

fn any_match(patterns: &[String], action: &str) -> bool {
    patterns.iter().any(|p| glob_match(p, action))
}

fn split_patterns(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration for a [`SlicedReducer`](crate::SlicedReducer)
#[derive(Debug, Clone, Default)]
pub struct SliceConfig {
    /// Handler lookup strategy
    pub resolution: Resolution,
    /// Dispatch log filter
    pub log: DispatchLogConfig,
}

impl SliceConfig {
    /// Set the handler lookup strategy
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the dispatch log filter
    pub fn with_log(mut self, log: DispatchLogConfig) -> Self {
        self.log = log;
        self
    }
}

/// Match an action name against a glob pattern (`*` and `?`).
///
/// The whole name must match; there is no implicit prefix matching.
pub fn glob_match(pattern: &str, action: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let action: Vec<char> = action.chars().collect();
    match_from(&pattern, &action)
}

fn match_from(pattern: &[char], action: &[char]) -> bool {
    match pattern.split_first() {
        None => action.is_empty(),
        Some((&'*', rest)) => {
            // A run of stars behaves like one
            let rest = match rest.iter().position(|&c| c != '*') {
                Some(skip) => &rest[skip..],
                None => return true,
            };
            (0..=action.len()).any(|start| match_from(rest, &action[start..]))
        }
        Some((&expected, rest)) => match action.split_first() {
            Some((&c, tail)) if expected == '?' || expected == c => match_from(rest, tail),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match() {
        assert!(glob_match("addTodo", "addTodo"));
        assert!(!glob_match("addTodo", "addTodos"));
        assert!(glob_match("add*", "addTodo"));
        assert!(glob_match("*Todo", "toggleTodo"));
        assert!(glob_match("*In*", "setInputText"));
        assert!(glob_match("se?", "set"));
        assert!(!glob_match("se?", "se"));
        assert!(glob_match("*", ""));
    }

    #[test]
    fn test_glob_match_star_runs_and_backtracking() {
        assert!(glob_match("**Todo", "addTodo"));
        assert!(glob_match("*o*o", "toggleTodo"));
        assert!(glob_match("?*Text", "setInputText"));
        assert!(!glob_match("*Todo?", "addTodo"));
        assert!(!glob_match("", "addTodo"));
    }

    #[test]
    fn test_default_logs_everything() {
        let config = DispatchLogConfig::default();
        assert!(config.should_log("anything"));
    }

    #[test]
    fn test_silent_logs_nothing() {
        let config = DispatchLogConfig::silent();
        assert!(!config.should_log("addTodo"));
    }

    #[test]
    fn test_exclude_applies_after_include() {
        let config = DispatchLogConfig::new(Some("*Todo"), Some("remove*"));
        assert!(config.should_log("addTodo"));
        assert!(!config.should_log("removeTodo"));
        assert!(!config.should_log("setInputText"));
    }

    #[test]
    fn test_empty_pattern_segments_ignored() {
        let config = DispatchLogConfig::new(Some("addTodo,, "), None);
        assert_eq!(config.include_patterns, vec!["addTodo".to_string()]);
    }

    #[test]
    fn test_resolution_names() {
        assert_eq!(Resolution::default(), Resolution::Rebind);
        for r in [Resolution::Rebind, Resolution::Captured] {
            assert_eq!(Resolution::from_name(r.name()), Some(r));
        }
        assert_eq!(Resolution::from_name("eager"), None);
    }
}

//! Shell-glob exclusion patterns matched against root-relative paths.

use glob::{MatchOptions, Pattern};
use std::path::{self, Path};
use tracing::{debug, warn};

/// A compiled exclusion pattern.
#[derive(Debug, Clone)]
struct ExcludePattern {
    pattern: Pattern,
    options: MatchOptions,
}

impl ExcludePattern {
    /// Compile `raw`, accepting everything `fnmatch` accepts.
    ///
    /// Patterns `glob` rejects are rewritten with fnmatch rules first, then
    /// matched literally as a last resort.
    fn compile(raw: &str) -> Option<Self> {
        let pattern = Pattern::new(raw)
            .or_else(|err| {
                debug!(pattern = raw, error = %err, "Rewriting pattern with fnmatch rules");
                Pattern::new(&to_fnmatch_syntax(raw))
            })
            .or_else(|_| Pattern::new(&Pattern::escape(raw)));

        let pattern = match pattern {
            Ok(pattern) => pattern,
            Err(err) => {
                warn!(pattern = raw, error = %err, "Ignoring exclude pattern");
                return None;
            }
        };

        // A pattern that names a directory may let wildcards cross separators;
        // one without separators only matches within a single path segment.
        let spans_directories = raw.chars().any(path::is_separator);

        Some(Self {
            pattern,
            options: MatchOptions {
                case_sensitive: true,
                require_literal_separator: !spans_directories,
                require_literal_leading_dot: false,
            },
        })
    }

    fn matches(&self, relative: &Path) -> bool {
        self.pattern.matches_path_with(relative, self.options)
    }
}

/// Rewrite the constructs `fnmatch` accepts but `Pattern` rejects: an
/// unclosed `[` is a literal bracket and a run of `*` acts as one `*`.
fn to_fnmatch_syntax(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
                out.push('*');
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end;
                }
                None => out.push_str("[[]"),
            },
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `start`. A `]` right after
/// `[` or `[!` is a class member, not the terminator.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j..].iter().position(|&c| c == ']').map(|k| j + k)
}

/// Ordered set of user-supplied exclusion patterns.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<ExcludePattern>,
}

impl ExcludeSet {
    /// Compile every pattern, in order.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter_map(|p| ExcludePattern::compile(p.as_ref()))
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check whether a root-relative path matches any pattern.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.patterns.iter().any(|p| p.matches(relative))
    }
}

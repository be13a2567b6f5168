//! Substitution rules that put EJS output tags broken across lines back on one line.
//!
//! Every pattern is compiled with multi-line and dot-matches-newline semantics, so a rule
//! sees the whole template as one haystack. Rules in a set run in order, each over the
//! output of the previous one.

use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::{PatchError, Result};

pub const OVER_BUDGET_CANONICAL: &str = "<%= remaining >= 0 ? 'remaining' : 'over budget' %>";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Which rules a patch run applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    /// Only the split `'over budget'` ternary.
    #[default]
    Default,
    /// Every repair known for broken output tags.
    All,
}

/// How a match is rewritten.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Replacement {
    /// Expanded with `${n}` capture references.
    Template(&'static str),
    /// The match itself with every whitespace run collapsed to a single space.
    CollapseWhitespace,
}

/// Static description of a rule before compilation.
struct RuleSpec {
    name: &'static str,
    pattern: &'static str,
    replacement: Replacement,
}

const OVER_BUDGET: RuleSpec = RuleSpec {
    name: "over-budget",
    pattern: r"<%=\s+remaining\s*>=\s*0\s*\?\s*'remaining'\s*:\s*'over\s+budget'\s*%>",
    replacement: Replacement::Template(OVER_BUDGET_CANONICAL),
};

const EXTENDED: [RuleSpec; 7] = [
    // the opening whitespace is optional here, unlike the default rule
    RuleSpec {
        name: "over-budget",
        pattern: r"<%=\s*remaining\s*>=\s*0\s*\?\s*'remaining'\s*:\s*'over\s+budget'\s*%>",
        replacement: Replacement::Template(OVER_BUDGET_CANONICAL),
    },
    RuleSpec {
        name: "multiline-to-fixed",
        // `\s*` before the newline takes the `\r` of a CRLF break
        pattern: r"<%=\s*([^%]+?)\s*\n\s*\.toFixed\(([^)]+)\)\s*%>",
        replacement: Replacement::Template("<%= ${1}.toFixed(${2}) %>"),
    },
    RuleSpec {
        name: "to-fixed-expression",
        pattern: r"<%=\s*[^%]+\.toFixed\([^)]+\)\s*%>",
        replacement: Replacement::CollapseWhitespace,
    },
    RuleSpec {
        name: "multiline-date",
        pattern: r"<%=\s*new\s+Date\(([^)]+)\)\.toLocaleDateString\(([^)]+)\)\s*%>",
        replacement: Replacement::CollapseWhitespace,
    },
    RuleSpec {
        name: "multiline-ternary",
        // captures stop at `%` so a match never runs into the next tag
        pattern: r"<%=\s*([^?%]+?)\s*\?\s*\n\s*([^:%]+?)\s*:\s*\n\s*([^%]+?)\s*%>",
        replacement: Replacement::Template("<%= ${1} ? ${2} : ${3} %>"),
    },
    RuleSpec {
        name: "tag-open-whitespace",
        pattern: r"<%=\s+",
        replacement: Replacement::Template("<%= "),
    },
    RuleSpec {
        name: "tag-close-whitespace",
        pattern: r"\s+%>",
        replacement: Replacement::Template(" %>"),
    },
];

/// A compiled substitution.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
    replacement: Replacement,
}

/// What one rule did to the content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleHit {
    pub rule: &'static str,
    /// Occurrences of the pattern.
    pub matches: usize,
    /// Occurrences whose replacement differs from the matched text.
    pub changed: usize,
}

impl Rule {
    fn compile(spec: &RuleSpec) -> Result<Self> {
        let pattern = RegexBuilder::new(spec.pattern)
            .multi_line(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| PatchError::InvalidPattern {
                rule: spec.name,
                source,
            })?;
        Ok(Rule {
            name: spec.name,
            pattern,
            replacement: spec.replacement.clone(),
        })
    }

    /// Replaces every non-overlapping match in `content`.
    pub fn apply(&self, content: &str) -> (String, RuleHit) {
        let mut hit = RuleHit {
            rule: self.name,
            ..Default::default()
        };
        let patched = self
            .pattern
            .replace_all(content, |caps: &Captures<'_>| {
                let matched = &caps[0];
                let replaced = match &self.replacement {
                    Replacement::Template(template) => {
                        let mut dst = String::new();
                        caps.expand(template, &mut dst);
                        dst
                    }
                    Replacement::CollapseWhitespace => {
                        WHITESPACE.replace_all(matched, " ").into_owned()
                    }
                };
                hit.matches += 1;
                if replaced != matched {
                    hit.changed += 1;
                }
                replaced
            })
            .into_owned();
        (patched, hit)
    }
}

impl RuleSet {
    /// Compiles the rules of this set in application order.
    pub fn compile(self) -> Result<Vec<Rule>> {
        match self {
            RuleSet::Default => Ok(vec![Rule::compile(&OVER_BUDGET)?]),
            RuleSet::All => EXTENDED.iter().map(Rule::compile).collect(),
        }
    }

    /// Message printed after a successful write.
    pub fn completion_message(self, target: &std::path::Path) -> String {
        match self {
            RuleSet::Default => "Fixed 'over budget' multi-line EJS tag".to_string(),
            RuleSet::All => format!("Fixed multi-line EJS tags in {}", target.display()),
        }
    }
}

/// Runs `rules` over `content` in order.
pub fn apply_rules(rules: &[Rule], content: &str) -> (String, Vec<RuleHit>) {
    let mut current = content.to_string();
    let mut hits = Vec::with_capacity(rules.len());
    for rule in rules {
        let (next, hit) = rule.apply(&current);
        tracing::debug!(
            "rule {}: {} match(es), {} changed",
            hit.rule,
            hit.matches,
            hit.changed
        );
        current = next;
        hits.push(hit);
    }
    (current, hits)
}

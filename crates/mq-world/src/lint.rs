//! Startup checks over a topology rule set.
//!
//! Content defects such as a category with no neighbors do not crash
//! generation (the expander falls back), so they have to be caught here
//! before a session starts.

use std::collections::{BTreeSet, VecDeque};

use crate::category::TileCategory;
use crate::rules::TopologyRules;

/// A warning or error found while linting rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// The category the issue concerns.
    pub category: TileCategory,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl std::fmt::Display for LintIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.category, self.message)
    }
}

/// Lint `rules` for a world that starts on `start`.
pub fn lint_rules(rules: &TopologyRules, start: TileCategory) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let categories = rules.categories();

    for &category in &categories {
        let connected = categories.iter().any(|&c| rules.can_connect(category, c));
        if !connected {
            issues.push(LintIssue {
                category,
                message: "has no neighbors".to_string(),
                is_error: true,
            });
        }

        for &neighbor in rules.neighbors(category) {
            if !rules.stored_adjacent(neighbor, category) {
                issues.push(LintIssue {
                    category,
                    message: format!("lists {neighbor} but {neighbor} does not list it back"),
                    is_error: false,
                });
            }
            if !rules.levels_meet(category, neighbor) {
                issues.push(LintIssue {
                    category,
                    message: format!(
                        "neighbor {neighbor} is on level {} but {category} spans {:?}",
                        rules.zone_level(neighbor),
                        rules.level_span(category)
                    ),
                    is_error: false,
                });
            }
        }

        if rules.weight(category) == 0 {
            issues.push(LintIssue {
                category,
                message: "has zero generation weight and will never be placed".to_string(),
                is_error: false,
            });
        }
    }

    for &(a, b) in rules.door_pairs() {
        if !rules.can_connect(a, b) {
            issues.push(LintIssue {
                category: a,
                message: format!("requires a door to {b} but cannot connect to it"),
                is_error: true,
            });
        }
    }

    let reachable = reachable_from(rules, start, &categories);
    for &category in &categories {
        if !reachable.contains(&category) {
            issues.push(LintIssue {
                category,
                message: format!("is unreachable from {start}"),
                is_error: true,
            });
        }
    }

    issues
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.is_error)
}

/// Emit each issue through `tracing`.
pub fn log_issues(issues: &[LintIssue]) {
    for issue in issues {
        if issue.is_error {
            tracing::error!(category = %issue.category, "{}", issue.message);
        } else {
            tracing::warn!(category = %issue.category, "{}", issue.message);
        }
    }
}

/// BFS over the symmetric adjacency relation.
fn reachable_from(
    rules: &TopologyRules,
    start: TileCategory,
    categories: &BTreeSet<TileCategory>,
) -> BTreeSet<TileCategory> {
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &next in categories {
            if rules.can_connect(current, next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited
}

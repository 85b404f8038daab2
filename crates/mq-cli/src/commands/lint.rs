use std::path::Path;

use colored::Colorize;
use mq_world::{TileCategory, has_errors, lint_rules};

pub fn run(rules: Option<&Path>, start: TileCategory) -> Result<(), String> {
    let rules = super::load_rules(rules)?;
    let issues = lint_rules(&rules, start);

    for issue in &issues {
        let label = if issue.is_error {
            "error".red().bold()
        } else {
            "warning".yellow().bold()
        };
        println!("  {label}: {}: {}", issue.category, issue.message);
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;

    if has_errors(&issues) {
        return Err(format!(
            "{errors} error{}, {warnings} warning{}",
            if errors == 1 { "" } else { "s" },
            if warnings == 1 { "" } else { "s" },
        ));
    }

    println!(
        "  All checks passed: {} categories, {} door pairs",
        rules.categories().len(),
        rules.door_pairs().len()
    );
    if warnings > 0 {
        println!("  {}", format!("{warnings} warning(s)").dimmed());
    }
    Ok(())
}

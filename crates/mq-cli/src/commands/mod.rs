pub mod combat;
pub mod crawl;
pub mod desperate;
pub mod doom;
pub mod explore;
pub mod lint;
pub mod odds;

use std::path::Path;

use colored::Colorize;
use mq_world::TopologyRules;

/// Load a rules file, or the built-in rules when no path is given.
fn load_rules(path: Option<&Path>) -> Result<TopologyRules, String> {
    let Some(path) = path else {
        return Ok(TopologyRules::standard());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    TopologyRules::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

/// Write `contents` to `path` and report it.
fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    std::fs::write(path, contents).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    println!("  {} {}", "Saved".green(), path.display());
    Ok(())
}

fn signed(n: i32) -> String {
    format!("{n:+}")
}

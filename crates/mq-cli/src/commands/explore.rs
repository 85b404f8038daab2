use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;

use mq_world::{HexCoord, Preference, TileCategory, TileExpander, WorldMap};

pub fn run(
    rules: Option<&Path>,
    steps: usize,
    seed: u64,
    prefer: Preference,
    start: TileCategory,
    save: Option<&Path>,
) -> Result<(), String> {
    let rules = super::load_rules(rules)?;
    let expander = TileExpander::new(&rules);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut map = WorldMap::with_start(HexCoord::ORIGIN, start, &rules);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Tile", "Category", "From", "Edge", "Notes"]);

    let mut placed = 0;
    let mut failed = 0;
    // a side that cannot be filled stays on the frontier, so cap the retries
    while placed < steps && failed < steps.max(1) * 4 {
        let Some((from, dir)) = TileExpander::random_frontier(&map, &mut rng) else {
            break;
        };
        let from_category = map.require(from).map_err(|e| e.to_string())?.category;
        match expander.expand(&mut map, from, dir, prefer, &mut rng) {
            Ok(expansion) => {
                placed += 1;
                let notes = if expansion.preference_relaxed {
                    "preference relaxed".to_string()
                } else {
                    String::new()
                };
                table.add_row(vec![
                    placed.to_string(),
                    expansion.coord.to_string(),
                    expansion.category.to_string(),
                    format!("{from_category} {from} {dir}"),
                    expansion.shared_edge.edge_type().to_string(),
                    notes,
                ]);
            }
            Err(e) => {
                failed += 1;
                tracing::debug!(%from, %dir, error = %e, "expansion failed");
            }
        }
    }

    map.validate(&rules).map_err(|e| e.to_string())?;

    let prefer = format!("{prefer:?}").to_lowercase();
    println!(
        "  {} {}",
        "Exploration".bold(),
        format!("(seed={seed}, prefer={prefer}, start={start})").dimmed()
    );
    println!();
    if placed > 0 {
        println!("{table}");
        println!();
    }

    let mut counts: BTreeMap<TileCategory, usize> = BTreeMap::new();
    for tile in map.tiles() {
        *counts.entry(tile.category).or_default() += 1;
    }
    let summary: Vec<String> = counts.iter().map(|(c, n)| format!("{c} {n}")).collect();
    println!("  {} tiles placed, {} on the map", placed, map.len());
    println!("  {}", summary.join(", "));
    if placed < steps {
        println!(
            "  {}",
            format!("stopped early: {} frontier sides left", map.frontier().len()).dimmed()
        );
    }

    if let Some(path) = save {
        let json = map.to_json().map_err(|e| e.to_string())?;
        super::write_file(path, &json)?;
    }

    Ok(())
}

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use mq_mechanics::{DoomTable, Severity};

pub fn run(value: i32) -> Result<(), String> {
    let table = DoomTable::default();
    let band = table.band(value);

    let severity = match band.severity {
        Severity::Calm => band.severity.to_string().green(),
        Severity::Uneasy => band.severity.to_string().yellow(),
        Severity::Dire => band.severity.to_string().red(),
    };
    println!("  Doom {value}: {}", severity.bold());
    println!(
        "  Enemy damage {}, player dice {}",
        super::signed(band.modifier.enemy_damage_bonus),
        super::signed(band.modifier.player_dice_bonus)
    );
    println!();

    let mut bands = Table::new();
    bands.set_content_arrangement(ContentArrangement::Dynamic);
    bands.set_header(vec!["From", "Severity", "Enemy damage", "Player dice", ""]);
    for b in table.bands() {
        let marker = if b == band { "<" } else { "" };
        bands.add_row(vec![
            b.threshold.to_string(),
            b.severity.to_string(),
            super::signed(b.modifier.enemy_damage_bonus),
            super::signed(b.modifier.player_dice_bonus),
            marker.to_string(),
        ]);
    }
    println!("{bands}");

    Ok(())
}

use comfy_table::{ContentArrangement, Table};

use mq_mechanics::{die_success_chance, expected_successes, success_probability};

pub fn run(max_dice: i32, dc: u8, required: u32) -> Result<(), String> {
    if !(1..=6).contains(&dc) {
        return Err(format!("dc must be between 1 and 6, got {dc}"));
    }
    if max_dice < 1 {
        return Err("max-dice must be at least 1".into());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Dice", "Expected", "Pass chance"]);

    for dice in 1..=max_dice {
        table.add_row(vec![
            dice.to_string(),
            format!("{:.2}", expected_successes(dice, dc)),
            format!("{:.1}%", success_probability(dice, dc, required) * 100.0),
        ]);
    }

    println!(
        "  Odds at DC {dc}, {required} success{} needed ({:.0}% per die)",
        if required == 1 { "" } else { "es" },
        die_success_chance(dc) * 100.0
    );
    println!();
    println!("{table}");

    Ok(())
}

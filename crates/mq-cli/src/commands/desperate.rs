use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use mq_mechanics::{DesperateEngine, MeasureEffect, Trigger};

pub fn run(hp: i32, sanity: i32) -> Result<(), String> {
    let engine = DesperateEngine::standard();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Measure", "Trigger", "Effect", "Drawback", "Active"]);

    for measure in engine.measures() {
        let active = if measure.is_active(hp, sanity) {
            "yes"
        } else {
            ""
        };
        let drawback = measure
            .auto_fail
            .map(|skill| format!("{skill} checks fail"))
            .unwrap_or_default();
        table.add_row(vec![
            measure.name.clone(),
            describe_trigger(measure.trigger),
            describe_effect(&measure.effect),
            drawback,
            active.to_string(),
        ]);
    }

    println!("  {} {}", "Desperate measures".bold(), format!("(hp={hp}, sanity={sanity})").dimmed());
    println!();
    println!("{table}");
    println!();

    let summary = engine.bonuses(hp, sanity);
    if summary.is_empty() {
        println!("  {}", "No desperate measures active.".dimmed());
        return Ok(());
    }

    println!("  Active: {}", summary.active.join(", "));
    println!(
        "  Action points {}, attack dice {}, defense dice {}, damage {}",
        super::signed(summary.action_points),
        super::signed(summary.attack_dice),
        super::signed(summary.defense_dice),
        super::signed(summary.damage)
    );
    if !summary.auto_fail.is_empty() {
        let skills: Vec<String> = summary.auto_fail.iter().map(ToString::to_string).collect();
        println!("  {} {}", "Auto-fail:".red(), skills.join(", "));
    }

    Ok(())
}

fn describe_trigger(trigger: Trigger) -> String {
    match trigger {
        Trigger::HpAtMost(t) => format!("hp <= {t}"),
        Trigger::SanityAtMost(t) => format!("sanity <= {t}"),
        Trigger::Both { hp, sanity } => format!("hp <= {hp} and sanity <= {sanity}"),
    }
}

fn describe_effect(effect: &MeasureEffect) -> String {
    let parts: Vec<String> = [
        (effect.action_points, "action point"),
        (effect.attack_dice, "attack die"),
        (effect.defense_dice, "defense die"),
        (effect.damage, "damage"),
    ]
    .into_iter()
    .filter(|(n, _)| *n != 0)
    .map(|(n, label)| format!("{} {label}", super::signed(n)))
    .collect();
    parts.join(", ")
}

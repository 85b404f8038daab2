use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use mq_mechanics::{
    CombatSetup, Critical, CriticalConfig, calculate_desperate_bonuses, get_combat_modifier,
    resolve_enemy_attack, resolve_player_attack,
};

pub struct CombatArgs {
    pub attack: i32,
    pub defense: i32,
    pub dc: u8,
    pub doom: i32,
    pub hp: i32,
    pub sanity: i32,
    pub enemy: bool,
    pub seed: u64,
}

pub fn run(args: CombatArgs) -> Result<(), String> {
    if !(1..=6).contains(&args.dc) {
        return Err(format!("dc must be between 1 and 6, got {}", args.dc));
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let modifier = get_combat_modifier(args.doom);
    let desperate = calculate_desperate_bonuses(args.hp, args.sanity);
    let setup = CombatSetup::new(args.attack, args.defense).with_dc(args.dc);
    let config = CriticalConfig::default();

    let (title, result) = if args.enemy {
        (
            "Enemy attack",
            resolve_enemy_attack(setup, modifier, &desperate, &mut rng),
        )
    } else {
        (
            "Player attack",
            resolve_player_attack(setup, modifier, &desperate, &config, &mut rng),
        )
    };

    println!(
        "  {} {}",
        title.bold(),
        format!("(doom={}, hp={}, sanity={}, seed={})", args.doom, args.hp, args.sanity, args.seed)
            .dimmed()
    );
    println!("  Doom modifier: {modifier}");
    if !desperate.is_empty() {
        println!("  Desperate: {}", desperate.active.join(", "));
    }
    println!();
    println!(
        "  Attack   {}  {} {}",
        result.attack,
        result.attack_successes,
        "skulls".dimmed()
    );
    println!(
        "  Defense  {}  {} {}",
        result.defense,
        result.defense_successes,
        "shields".dimmed()
    );
    println!();

    if result.is_hit() {
        let bonus = if result.bonus_damage > 0 {
            format!(" ({} bonus)", result.bonus_damage)
        } else {
            String::new()
        };
        println!("  {} {} damage{bonus}", "HIT".red().bold(), result.net_damage);
    } else {
        println!("  {} no damage", "MISS".dimmed().bold());
    }

    match &result.critical {
        Some(Critical::Hit(choice)) => {
            println!("  {} choose one of:", "CRITICAL HIT".green().bold());
            for (i, bonus) in choice.options().iter().enumerate() {
                println!("    {}. {bonus}", i + 1);
            }
        }
        Some(Critical::Miss(penalty)) => {
            println!("  {} {penalty}", "CRITICAL MISS".yellow().bold());
        }
        None => {}
    }

    Ok(())
}

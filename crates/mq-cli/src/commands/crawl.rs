use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use mq_core::RandomSource;
use mq_mechanics::{CombatSetup, Critical, DoomEvent};
use mq_session::{AttackOutcome, Discovery, PenaltyEffect, Session, SessionConfig};
use mq_world::{Direction, DoorState, Edge, Preference};

pub fn run(
    rules: Option<&Path>,
    turns: u32,
    seed: u64,
    prefer: Preference,
    resume: Option<&Path>,
    save: Option<&Path>,
) -> Result<(), String> {
    let rules = Arc::new(super::load_rules(rules)?);
    let config = SessionConfig::default().with_seed(seed);

    let mut session = match resume {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Session::restore(rules, config, &json).map_err(|e| e.to_string())?
        }
        None => Session::new(rules, config).map_err(|e| e.to_string())?,
    };
    // route choices get their own stream so they never shift the session's dice
    let mut routes = StdRng::seed_from_u64(seed.wrapping_add(1));

    println!(
        "  {} {}",
        "Crawl".bold(),
        format!("({turns} turns, seed={seed})").dimmed()
    );
    print_status(&session);
    println!();

    for turn in 1..=turns {
        if session.is_over() {
            break;
        }
        let label = format!("[turn {turn:>2}]").dimmed();
        let line = take_turn(&mut session, prefer, &mut routes).map_err(|e| e.to_string())?;
        println!("  {label} {line}");

        let change = session.record(DoomEvent::RoundEnded);
        if change.escalated {
            println!("  {} doom is now {}", "!!".red().bold(), change.severity);
        }
    }

    println!();
    print_status(&session);
    if session.is_over() {
        println!("  {}", "The darkness wins.".red().bold());
    }

    if let Some(path) = save {
        let json = session.save().map_err(|e| e.to_string())?;
        super::write_file(path, &json)?;
    }

    Ok(())
}

fn print_status(session: &Session) {
    let v = session.vitals();
    println!(
        "  at {} ({}), hp {}/{}, sanity {}/{}, doom {} ({}), {} tiles",
        session.position(),
        session
            .map()
            .get(session.position())
            .map(|t| t.category.to_string())
            .unwrap_or_default(),
        v.hp,
        v.max_hp,
        v.sanity,
        v.max_sanity,
        session.doom().value(),
        session.doom().severity(),
        session.map().len()
    );
}

/// Search the current tile if it has not been searched, otherwise move on.
fn take_turn(
    session: &mut Session,
    prefer: Preference,
    routes: &mut StdRng,
) -> mq_session::SessionResult<String> {
    let here = session.map().require(session.position())?;
    if !here.searched {
        return search(session);
    }

    let unmapped: Vec<Direction> = here
        .edges()
        .filter(|(dir, edge)| {
            edge.allows_expansion() && !session.map().contains(session.position().neighbor(*dir))
        })
        .map(|(dir, _)| dir)
        .collect();
    let mapped: Vec<Direction> = here
        .edges()
        .filter(|(dir, edge)| {
            session.map().contains(session.position().neighbor(*dir))
                && (edge.is_passable()
                    || matches!(
                        edge,
                        Edge::Door {
                            state: DoorState::Closed
                        }
                    ))
        })
        .map(|(dir, _)| dir)
        .collect();

    if let Some(dir) = pick(&unmapped, routes) {
        let expansion = match session.explore(dir, prefer) {
            Ok(expansion) => expansion,
            Err(e) => return Ok(format!("the way {dir} leads nowhere ({e})")),
        };
        if !expansion.shared_edge.allows_expansion() {
            return Ok(format!(
                "found a {} to the {dir}, walled off",
                expansion.category
            ));
        }
        let moved = walk(session, dir)?;
        return Ok(format!("explored {dir}: {}{moved}", expansion.category));
    }

    match pick(&mapped, routes) {
        Some(dir) => {
            let moved = walk(session, dir)?;
            let category = session
                .map()
                .get(session.position())
                .map(|t| t.category.to_string())
                .unwrap_or_default();
            Ok(format!("backtracked {dir} to the {category}{moved}"))
        }
        None => Ok("dead end; waited in the dark".to_string()),
    }
}

fn pick(dirs: &[Direction], routes: &mut StdRng) -> Option<Direction> {
    if dirs.is_empty() {
        return None;
    }
    Some(dirs[routes.below(dirs.len() as u64) as usize])
}

/// Open a closed door if needed, then step through.
fn walk(session: &mut Session, dir: Direction) -> mq_session::SessionResult<String> {
    let edge = session.map().require(session.position())?.edge(dir);
    let closed = matches!(
        edge,
        Edge::Door {
            state: DoorState::Closed
        }
    );
    if !closed && !edge.is_passable() {
        return Ok(", but the way is shut".to_string());
    }

    let mut note = String::new();
    if closed {
        session.open_door(dir)?;
        note.push_str(", opened a door");
    }
    session.enter(dir)?;
    Ok(note)
}

fn search(session: &mut Session) -> mq_session::SessionResult<String> {
    let found = session.search()?;
    let mut line = format!("searched {}: {}", found.coord, found.discovery);
    match found.discovery {
        Discovery::Ambush => line.push_str(&fight(session)),
        Discovery::Item => session.apply_bonus(mq_mechanics::CriticalBonus::RestoreHealth),
        Discovery::Lore => session.shock(1),
        Discovery::Nothing | Discovery::Survivor => {}
    }
    Ok(line)
}

fn fight(session: &mut Session) -> String {
    let AttackOutcome { combat, penalty } = session.attack(CombatSetup::new(3, 2));
    if let Some(Critical::Hit(choice)) = &combat.critical {
        if let Some(&bonus) = choice.options().first() {
            session.apply_bonus(bonus);
        }
    }
    if combat.is_hit() {
        session.record(DoomEvent::EnemyKilled);
        return format!(" -> struck it down ({} damage)", combat.net_damage);
    }
    let fumble = match penalty {
        Some(PenaltyEffect::CounterAttack(counter)) => {
            format!(", fumbled into a counter ({} damage)", counter.net_damage)
        }
        Some(PenaltyEffect::ThreatAttracted(change)) => {
            format!(", the noise drew something (doom {})", change.after)
        }
        Some(PenaltyEffect::LostActionPoint) => ", lost footing".to_string(),
        Some(PenaltyEffect::DroppedItem) => ", dropped something".to_string(),
        None => String::new(),
    };
    let defense = session.defend(CombatSetup::new(2, 2));
    format!(" -> missed{fumble}, took {} damage", defense.net_damage)
}

//! Game session management.
//!
//! `Session` is the single mutator of one game: it owns the world map, the
//! doom counter, the player's resources and a private seeded RNG, and wires
//! the tile expander and dice resolver together. Rules are shared read-only
//! between sessions.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use mq_core::WeightedTable;
use mq_mechanics::{
    BonusSummary, CheckOutcome, CombatResult, CombatSetup, Critical, CriticalBonus,
    CriticalPenalty, DoomChange, DoomEvent, DoomTracker, SkillCheck, calculate_desperate_bonuses, perform_check, resolve_enemy_attack,
    resolve_player_attack,
};
use mq_world::{
    Direction, DoorState, Edge, Expansion, HexCoord, Preference, TileExpander, TopologyRules,
    WorldMap, has_errors, lint_rules, log_issues,
};

use crate::config::SessionConfig;
use crate::discovery::{Discovery, GatedDiscovery};
use crate::error::{SessionError, SessionResult};

/// The player's live resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    /// Current health.
    pub hp: i32,
    /// Maximum health.
    pub max_hp: i32,
    /// Current sanity.
    pub sanity: i32,
    /// Maximum sanity.
    pub max_sanity: i32,
    /// Insight gathered from critical hits.
    pub insight: u32,
}

impl Vitals {
    /// Full health and sanity.
    pub fn new(max_hp: i32, max_sanity: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            sanity: max_sanity,
            max_sanity,
            insight: 0,
        }
    }

    /// Whether the player is still standing.
    pub fn is_alive(&self) -> bool {
        self.hp > 0 && self.sanity > 0
    }
}

/// The result of searching a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Where the search happened.
    pub coord: HexCoord,
    /// What was found.
    pub discovery: Discovery,
    /// Doom movement caused by the find, if any.
    pub doom: Option<DoomChange>,
}

/// What a critical miss did to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PenaltyEffect {
    /// The enemy struck back at once; its damage has already been taken.
    CounterAttack(CombatResult),
    /// The noise drew a threat; doom moved as for a spawned enemy.
    ThreatAttracted(DoomChange),
    /// The turn driver withholds one action point next round.
    LostActionPoint,
    /// The turn driver removes one held item.
    DroppedItem,
}

/// A player attack together with any penalty it triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    /// The exchange itself.
    pub combat: CombatResult,
    /// Set when the attack was a critical miss.
    pub penalty: Option<PenaltyEffect>,
}

/// Everything needed to resume a session. Tiles and doom are stored
/// verbatim; nothing derived is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Snapshot {
    map: WorldMap,
    doom: DoomTracker,
    position: HexCoord,
    vitals: Vitals,
}

/// An in-progress game.
#[derive(Debug)]
pub struct Session {
    rules: Arc<TopologyRules>,
    config: SessionConfig,
    map: WorldMap,
    doom: DoomTracker,
    position: HexCoord,
    vitals: Vitals,
    discoveries: WeightedTable<GatedDiscovery>,
    rng: StdRng,
}

impl Session {
    /// Start a new session on a single explored tile at the origin.
    ///
    /// The rules are linted first; any lint error aborts the start.
    pub fn new(rules: Arc<TopologyRules>, config: SessionConfig) -> SessionResult<Self> {
        check_rules(&rules, &config)?;
        let map = WorldMap::with_start(HexCoord::ORIGIN, config.start_category, &rules);
        let seed = config.seed;
        Self::assemble(rules, config, seed, map, None, HexCoord::ORIGIN, None)
    }

    /// Resume a session from [`Session::save`] output.
    ///
    /// The rules are linted as in [`Session::new`], then the map is
    /// re-validated against them; a snapshot whose tiles break any topology
    /// invariant is rejected. The RNG is reseeded from `config` mixed with the
    /// saved progress, so a resumed game does not replay its opening rolls.
    pub fn restore(
        rules: Arc<TopologyRules>,
        config: SessionConfig,
        json: &str,
    ) -> SessionResult<Self> {
        check_rules(&rules, &config)?;
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.map.validate(&rules)?;
        if !snapshot.map.contains(snapshot.position) {
            return Err(SessionError::BadPosition(snapshot.position));
        }
        let seed = resume_seed(config.seed, &snapshot);
        Self::assemble(
            rules,
            config,
            seed,
            snapshot.map,
            Some(snapshot.doom),
            snapshot.position,
            Some(snapshot.vitals),
        )
    }

    fn assemble(
        rules: Arc<TopologyRules>,
        config: SessionConfig,
        seed: u64,
        map: WorldMap,
        doom: Option<DoomTracker>,
        position: HexCoord,
        vitals: Option<Vitals>,
    ) -> SessionResult<Self> {
        let discoveries = WeightedTable::from_entries(config.discoveries.clone())?;
        Ok(Self {
            doom: doom.unwrap_or_else(|| DoomTracker::new(config.doom.clone())),
            vitals: vitals.unwrap_or_else(|| Vitals::new(config.max_hp, config.max_sanity)),
            rng: StdRng::seed_from_u64(seed),
            rules,
            config,
            map,
            position,
            discoveries,
        })
    }

    /// Serialize the map, doom, position and vitals as JSON.
    pub fn save(&self) -> SessionResult<String> {
        let snapshot = Snapshot {
            map: self.map.clone(),
            doom: self.doom.clone(),
            position: self.position,
            vitals: self.vitals,
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// The shared rules.
    pub fn rules(&self) -> &TopologyRules {
        &self.rules
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The world map.
    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    /// The doom counter.
    pub fn doom(&self) -> &DoomTracker {
        &self.doom
    }

    /// Where the player stands.
    pub fn position(&self) -> HexCoord {
        self.position
    }

    /// The player's resources.
    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    /// Desperate bonuses for the player's current resources.
    pub fn desperate(&self) -> BonusSummary {
        calculate_desperate_bonuses(self.vitals.hp, self.vitals.sanity)
    }

    /// Generate the unmapped cell across side `dir` of the player's tile.
    pub fn explore(&mut self, dir: Direction, preference: Preference) -> SessionResult<Expansion> {
        let expander = TileExpander::new(&self.rules);
        Ok(expander.expand(
            &mut self.map,
            self.position,
            dir,
            preference,
            &mut self.rng,
        )?)
    }

    /// Walk through side `dir` into a placed tile. Returns true on the first
    /// visit.
    pub fn enter(&mut self, dir: Direction) -> SessionResult<bool> {
        let here = self.map.require(self.position)?;
        if !here.edge(dir).is_passable() {
            return Err(SessionError::Impassable {
                coord: self.position,
                dir,
            });
        }
        let target = self.position.neighbor(dir);
        let first = self.map.mark_explored(target)?;
        self.position = target;
        tracing::debug!(coord = %target, first, "entered tile");
        Ok(first)
    }

    /// Open the door on side `dir` of the player's tile.
    pub fn open_door(&mut self, dir: Direction) -> SessionResult<DoorState> {
        Ok(self.map.update_door(self.position, dir, DoorState::open)?)
    }

    /// Search the player's tile. Each tile can be searched once.
    ///
    /// The result is drawn from the discovery table restricted to entries
    /// whose doom window contains the current doom. An ambush spawns an
    /// enemy.
    pub fn search(&mut self) -> SessionResult<SearchResult> {
        let coord = self.position;
        let tile = self.map.require(coord)?;
        if !tile.explored {
            return Err(SessionError::NotExplored(coord));
        }
        if tile.searched {
            return Err(SessionError::AlreadySearched(coord));
        }

        let doom = self.doom.value();
        let discovery = self
            .discoveries
            .pick_filtered(&mut self.rng, |g| g.doom.contains(doom))?
            .discovery;
        self.map.mark_searched(coord)?;
        let doom = match discovery {
            Discovery::Ambush => Some(self.doom.apply(DoomEvent::EnemySpawned)),
            _ => None,
        };
        tracing::debug!(%coord, %discovery, "searched tile");

        Ok(SearchResult {
            coord,
            discovery,
            doom,
        })
    }

    /// The player attacks an enemy.
    ///
    /// A critical miss applies its penalty immediately. A counter-attack is
    /// the enemy rolling its `defense_dice` against the caught-off-guard
    /// player, who defends with desperate dice only. An attracted threat
    /// moves doom as a spawned enemy. Lost action points and dropped items
    /// are reported for the turn driver to enforce.
    pub fn attack(&mut self, setup: CombatSetup) -> AttackOutcome {
        let desperate = self.desperate();
        let combat = resolve_player_attack(
            setup,
            self.doom.modifier(),
            &desperate,
            &self.config.critical,
            &mut self.rng,
        );
        let penalty = match &combat.critical {
            Some(Critical::Miss(penalty)) => Some(self.apply_penalty(*penalty, setup)),
            _ => None,
        };
        AttackOutcome { combat, penalty }
    }

    fn apply_penalty(&mut self, penalty: CriticalPenalty, setup: CombatSetup) -> PenaltyEffect {
        tracing::debug!(%penalty, "critical miss");
        match penalty {
            CriticalPenalty::CounterAttack => {
                let counter = CombatSetup::new(setup.defense_dice, 0).with_dc(setup.dc);
                PenaltyEffect::CounterAttack(self.defend(counter))
            }
            CriticalPenalty::AttractThreat => {
                PenaltyEffect::ThreatAttracted(self.doom.apply(DoomEvent::EnemySpawned))
            }
            CriticalPenalty::LoseNextActionPoint => PenaltyEffect::LostActionPoint,
            CriticalPenalty::DropItem => PenaltyEffect::DroppedItem,
        }
    }

    /// An enemy attacks the player. Damage is taken from the player's health.
    pub fn defend(&mut self, setup: CombatSetup) -> CombatResult {
        let desperate = self.desperate();
        let result = resolve_enemy_attack(
            setup,
            self.doom.modifier(),
            &desperate,
            &mut self.rng,
        );
        self.damage(result.net_damage);
        result
    }

    /// Make a skill check with the player's current resources.
    pub fn skill_check(&mut self, check: &SkillCheck) -> CheckOutcome {
        perform_check(
            check,
            self.vitals.hp,
            self.vitals.sanity,
            self.doom.modifier(),
            &mut self.rng,
        )
    }

    /// Place a blockage on side `dir` of `coord` (and its neighbor).
    pub fn block(&mut self, coord: HexCoord, dir: Direction, edge: Edge) -> SessionResult<()> {
        if !matches!(edge, Edge::Blocked { .. }) {
            return Err(SessionError::NotBlocked { coord, dir });
        }
        self.map.set_edge(coord, dir, edge)?;
        Ok(())
    }

    /// Try to clear the blockage on side `dir` of the player's tile with
    /// `dice` dice. On success the edge becomes whatever the topology rules
    /// put between the two tiles: open, a closed door, or a wall. Facing an
    /// unplaced cell it simply opens.
    ///
    /// A blockage with neither a check nor a removal item clears without a
    /// roll; one that only an item removes is an error.
    pub fn clear_blockage(
        &mut self,
        dir: Direction,
        dice: i32,
    ) -> SessionResult<Option<CheckOutcome>> {
        let coord = self.position;
        let here = self.map.require(coord)?;
        let (check, removal) = match here.edge(dir) {
            Edge::Blocked { check, removal, .. } => (*check, removal.clone()),
            _ => return Err(SessionError::NotBlocked { coord, dir }),
        };
        let cleared = match self.map.get(coord.neighbor(dir)) {
            Some(neighbor) => Edge::from_suggestion(
                self.rules
                    .validate_connection(here.category, neighbor.category, false)
                    .suggested_edge,
            ),
            None => Edge::Open,
        };

        let outcome = match (check, removal) {
            (Some(gate), _) => {
                let check = SkillCheck::new(gate.skill, dice)
                    .with_dc(gate.dc)
                    .with_required(gate.required);
                Some(self.skill_check(&check))
            }
            (None, Some(item)) => return Err(SessionError::RequiresItem(item)),
            (None, None) => None,
        };

        if outcome.as_ref().is_none_or(|o| o.passed) {
            tracing::debug!(%coord, %dir, edge = %cleared.edge_type(), "blockage cleared");
            self.map.set_edge(coord, dir, cleared)?;
        }
        Ok(outcome)
    }

    /// Apply a doom event.
    pub fn record(&mut self, event: DoomEvent) -> DoomChange {
        self.doom.apply(event)
    }

    /// Take the chosen critical bonus.
    pub fn apply_bonus(&mut self, bonus: CriticalBonus) {
        let v = &mut self.vitals;
        match bonus {
            CriticalBonus::RestoreHealth => v.hp = (v.hp + 1).min(v.max_hp),
            CriticalBonus::RecoverSanity => v.sanity = (v.sanity + 1).min(v.max_sanity),
            CriticalBonus::GainInsight => v.insight += 1,
            // action economy belongs to the turn driver
            CriticalBonus::ExtraAction => {}
        }
    }

    /// Lose health, never below zero.
    pub fn damage(&mut self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.vitals.hp = self.vitals.hp.saturating_sub(amount).max(0);
    }

    /// Lose sanity, never below zero.
    pub fn shock(&mut self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.vitals.sanity = self.vitals.sanity.saturating_sub(amount).max(0);
    }

    /// The scenario is lost: doom hit the floor or the player fell.
    pub fn is_over(&self) -> bool {
        self.doom.is_defeated() || !self.vitals.is_alive()
    }
}

/// The configured seed mixed with how far the saved game had progressed.
fn resume_seed(seed: u64, snapshot: &Snapshot) -> u64 {
    let progress = [
        snapshot.map.len() as u64,
        u64::from(snapshot.doom.value() as u32),
        u64::from(snapshot.vitals.hp as u32),
        u64::from(snapshot.vitals.sanity as u32),
        u64::from(snapshot.vitals.insight),
    ];
    progress.iter().fold(seed, |acc, &p| {
        (acc ^ p).wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(31)
    })
}

fn check_rules(rules: &TopologyRules, config: &SessionConfig) -> SessionResult<()> {
    let issues = lint_rules(rules, config.start_category);
    log_issues(&issues);
    if has_errors(&issues) {
        let first = issues
            .iter()
            .find(|i| i.is_error)
            .map(ToString::to_string)
            .unwrap_or_default();
        return Err(SessionError::InvalidRules(first));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use mq_core::{RandomSource, SkillCategory, WeightedEntry};
    use mq_mechanics::{DoomConfig, DoomRange};
    use mq_world::TileCategory::{Basement, Corridor, Crypt, Room, Stairs};
    use mq_world::{BlockingKind, SkillGate, TileCategory};
    use proptest::prelude::*;

    fn session() -> Session {
        Session::new(Arc::new(TopologyRules::standard()), SessionConfig::default()).unwrap()
    }

    fn explore_and_enter(s: &mut Session) -> Direction {
        for dir in Direction::ALL {
            if s.explore(dir, Preference::Any).is_ok() {
                if s.map().get(s.position()).unwrap().edge(dir).is_door() {
                    s.open_door(dir).unwrap();
                }
                if s.enter(dir).is_ok() {
                    return dir;
                }
            }
        }
        panic!("no direction could be explored");
    }

    #[test]
    fn starts_on_explored_tile() {
        let s = session();
        assert_eq!(s.map().len(), 1);
        assert_eq!(s.position(), HexCoord::ORIGIN);
        assert_eq!(s.map().get(HexCoord::ORIGIN).unwrap().category, TileCategory::Street);
        assert_eq!(s.doom().value(), 12);
        assert_eq!(s.vitals().hp, 5);
    }

    #[test]
    fn broken_rules_refuse_to_start() {
        let rules = TopologyRules::standard()
            .with_adjacency(Crypt, &[])
            .with_adjacency(Basement, &[Basement, Stairs]);
        let err = Session::new(Arc::new(rules), SessionConfig::default()).unwrap_err();
        assert!(matches!(err, SessionError::InvalidRules(_)));
    }

    #[test]
    fn broken_rules_refuse_to_resume() {
        let json = session().save().unwrap();
        let rules = TopologyRules::standard()
            .with_adjacency(Crypt, &[])
            .with_adjacency(Basement, &[Basement, Stairs]);
        let err = Session::restore(Arc::new(rules), SessionConfig::default(), &json).unwrap_err();
        assert!(matches!(err, SessionError::InvalidRules(_)));
    }

    #[test]
    fn explore_then_enter() {
        let mut s = session();
        let dir = explore_and_enter(&mut s);
        assert_eq!(s.position(), HexCoord::ORIGIN.neighbor(dir));
        assert!(s.map().get(s.position()).unwrap().explored);
        assert!(s.map().validate(s.rules()).is_ok());
    }

    #[test]
    fn cannot_enter_unplaced_cell() {
        let mut s = session();
        assert!(s.enter(Direction::N).is_err());
        assert_eq!(s.position(), HexCoord::ORIGIN);
    }

    #[test]
    fn search_once() {
        let mut s = session();
        s.search().unwrap();
        let err = s.search().unwrap_err();
        assert!(matches!(err, SessionError::AlreadySearched(_)));
    }

    #[test]
    fn ambush_spawns_enemy() {
        let config = SessionConfig::default().with_discoveries(vec![WeightedEntry {
            item: GatedDiscovery {
                discovery: Discovery::Ambush,
                doom: DoomRange::any(),
            },
            weight: 1,
        }]);
        let mut s = Session::new(Arc::new(TopologyRules::standard()), config).unwrap();
        let found = s.search().unwrap();
        assert_eq!(found.discovery, Discovery::Ambush);
        assert_eq!(found.doom.unwrap().after, 11);
        assert_eq!(s.doom().value(), 11);
    }

    #[test]
    fn search_gated_out_entirely_is_an_error() {
        let config = SessionConfig::default().with_discoveries(vec![WeightedEntry {
            item: GatedDiscovery {
                discovery: Discovery::Survivor,
                doom: DoomRange::at_least(20),
            },
            weight: 1,
        }]);
        let mut s = Session::new(Arc::new(TopologyRules::standard()), config).unwrap();
        assert!(matches!(s.search().unwrap_err(), SessionError::Table(_)));
    }

    #[test]
    fn defend_costs_health() {
        let mut s = session();
        let before = s.vitals().hp;
        let mut taken = 0;
        for _ in 0..20 {
            taken += s.defend(CombatSetup::new(3, 0)).net_damage;
        }
        assert_eq!(s.vitals().hp, (before - taken as i32).max(0));
        assert!(s.vitals().hp >= 0);
    }

    #[test]
    fn bonuses_are_capped() {
        let mut s = session();
        s.apply_bonus(CriticalBonus::RestoreHealth);
        assert_eq!(s.vitals().hp, 5);
        s.damage(2);
        s.apply_bonus(CriticalBonus::RestoreHealth);
        assert_eq!(s.vitals().hp, 4);
        s.shock(9);
        assert_eq!(s.vitals().sanity, 0);
        assert!(s.is_over());
        s.apply_bonus(CriticalBonus::GainInsight);
        assert_eq!(s.vitals().insight, 1);
    }

    #[test]
    fn desperate_bonuses_track_live_health() {
        let mut s = session();
        assert!(s.desperate().is_empty());
        s.damage(4);
        assert_eq!(s.desperate().attack_dice, 1);
        s.apply_bonus(CriticalBonus::RestoreHealth);
        s.apply_bonus(CriticalBonus::RestoreHealth);
        assert!(s.desperate().is_empty());
    }

    #[test]
    fn clear_blockage_without_requirements() {
        let mut s = session();
        let blockage = Edge::Blocked {
            kind: BlockingKind::Rubble,
            check: None,
            removal: None,
        };
        s.block(HexCoord::ORIGIN, Direction::S, blockage).unwrap();
        assert!(!s.map().get(HexCoord::ORIGIN).unwrap().edge(Direction::S).is_passable());
        assert!(s.clear_blockage(Direction::S, 2).unwrap().is_none());
        assert_eq!(*s.map().get(HexCoord::ORIGIN).unwrap().edge(Direction::S), Edge::Open);
    }

    #[test]
    fn cleared_blockage_restores_required_door() {
        let rules = Arc::new(
            TopologyRules::empty()
                .with_adjacency(Room, &[Room, Corridor])
                .with_adjacency(Corridor, &[Corridor, Room])
                .with_door(Room, Corridor)
                .with_level(Room, 0)
                .with_level(Corridor, 0)
                .with_weight(Room, 0)
                .with_weight(Corridor, 1),
        );
        let config = SessionConfig::default().with_start(Room);
        let mut s = Session::new(rules.clone(), config.clone()).unwrap();

        let expansion = s.explore(Direction::N, Preference::Any).unwrap();
        assert_eq!(expansion.category, Corridor);
        assert_eq!(expansion.shared_edge, Edge::closed_door());

        let blockage = Edge::Blocked {
            kind: BlockingKind::Rubble,
            check: None,
            removal: None,
        };
        s.block(HexCoord::ORIGIN, Direction::N, blockage).unwrap();
        assert!(s.clear_blockage(Direction::N, 2).unwrap().is_none());

        let origin = s.map().get(HexCoord::ORIGIN).unwrap();
        assert_eq!(*origin.edge(Direction::N), Edge::closed_door());
        assert!(s.map().check_invariants(&rules).is_empty());
        assert!(Session::restore(rules, config, &s.save().unwrap()).is_ok());
    }

    #[test]
    fn clear_blockage_with_item_requirement() {
        let mut s = session();
        let blockage = Edge::Blocked {
            kind: BlockingKind::Ward,
            check: None,
            removal: Some("elder sign".to_string()),
        };
        s.block(HexCoord::ORIGIN, Direction::S, blockage).unwrap();
        let err = s.clear_blockage(Direction::S, 2).unwrap_err();
        assert!(matches!(err, SessionError::RequiresItem(item) if item == "elder sign"));
    }

    #[test]
    fn clear_blockage_with_check() {
        let mut s = session();
        let blockage = Edge::Blocked {
            kind: BlockingKind::Rubble,
            check: Some(SkillGate {
                skill: SkillCategory::Strength,
                dc: 1,
                required: 1,
            }),
            removal: None,
        };
        s.block(HexCoord::ORIGIN, Direction::NE, blockage).unwrap();
        // DC 1 always succeeds
        let outcome = s.clear_blockage(Direction::NE, 1).unwrap().unwrap();
        assert!(outcome.passed);
        assert!(s.map().get(HexCoord::ORIGIN).unwrap().edge(Direction::NE).is_passable());
    }

    #[test]
    fn clear_requires_blockage() {
        let mut s = session();
        assert!(matches!(
            s.clear_blockage(Direction::N, 2).unwrap_err(),
            SessionError::NotBlocked { .. }
        ));
        assert!(s.block(HexCoord::ORIGIN, Direction::N, Edge::Wall).is_err());
    }

    #[test]
    fn save_restore_round_trip() {
        let mut s = session();
        explore_and_enter(&mut s);
        s.record(DoomEvent::RoundEnded);
        s.damage(1);
        let json = s.save().unwrap();

        let back = Session::restore(
            Arc::new(TopologyRules::standard()),
            SessionConfig::default(),
            &json,
        )
        .unwrap();
        assert_eq!(back.map().len(), s.map().len());
        for tile in s.map().tiles() {
            assert_eq!(back.map().get(tile.coord), Some(tile));
        }
        assert_eq!(back.doom(), s.doom());
        assert_eq!(back.position(), s.position());
        assert_eq!(back.vitals(), s.vitals());
    }

    #[test]
    fn tampered_snapshot_is_rejected() {
        let mut s = session();
        let dir = explore_and_enter(&mut s);
        let json = s.save().unwrap();

        // make the origin's side disagree with its neighbor's
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["map"][0]["edges"][dir.index()] = serde_json::json!({"type": "wall"});
        let tampered = serde_json::to_string(&value).unwrap();
        let neighbor_edge = &value["map"][1]["edges"][dir.opposite().index()];
        assert_ne!(neighbor_edge["type"], "wall");

        let err = Session::restore(
            Arc::new(TopologyRules::standard()),
            SessionConfig::default(),
            &tampered,
        )
        .err()
        .unwrap();
        assert!(matches!(err, SessionError::World(_)));
    }

    #[test]
    fn restore_rejects_missing_position() {
        let s = session();
        let json = s.save().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["position"] = serde_json::json!({"q": 7, "r": 7});
        let err = Session::restore(
            Arc::new(TopologyRules::standard()),
            SessionConfig::default(),
            &value.to_string(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, SessionError::BadPosition(_)));
    }

    #[test]
    fn resumed_session_does_not_replay_dice() {
        let draws = |s: &mut Session| (0..8).map(|_| s.rng.below(1_000_000)).collect::<Vec<_>>();
        let mut s = session();
        explore_and_enter(&mut s);
        s.damage(1);
        let json = s.save().unwrap();

        let rules = Arc::new(TopologyRules::standard());
        let mut first = Session::restore(rules.clone(), SessionConfig::default(), &json).unwrap();
        let mut second = Session::restore(rules, SessionConfig::default(), &json).unwrap();
        let mut fresh = session();

        let resumed = draws(&mut first);
        assert_eq!(resumed, draws(&mut second));
        assert_ne!(resumed, draws(&mut fresh));
    }

    #[test]
    fn critical_misses_apply_their_penalty() {
        let mut seen = HashSet::new();
        for seed in 0..200 {
            let config = SessionConfig::default().with_seed(seed);
            let mut s = Session::new(Arc::new(TopologyRules::standard()), config).unwrap();
            let hp = s.vitals().hp;
            let doom = s.doom().value();

            // one die at DC 6 misses most of the time
            let outcome = s.attack(CombatSetup::new(1, 1).with_dc(6));
            let missed = matches!(outcome.combat.critical, Some(Critical::Miss(_)));
            assert_eq!(missed, outcome.penalty.is_some());

            match outcome.penalty {
                Some(PenaltyEffect::CounterAttack(counter)) => {
                    assert!(counter.critical.is_none());
                    assert_eq!(s.vitals().hp, hp - counter.net_damage as i32);
                    assert_eq!(s.doom().value(), doom);
                    seen.insert(CriticalPenalty::CounterAttack);
                }
                Some(PenaltyEffect::ThreatAttracted(change)) => {
                    assert_eq!(change.after, doom - 1);
                    assert_eq!(s.doom().value(), doom - 1);
                    assert_eq!(s.vitals().hp, hp);
                    seen.insert(CriticalPenalty::AttractThreat);
                }
                Some(PenaltyEffect::LostActionPoint) => {
                    seen.insert(CriticalPenalty::LoseNextActionPoint);
                }
                Some(PenaltyEffect::DroppedItem) => {
                    seen.insert(CriticalPenalty::DropItem);
                }
                None => {
                    assert_eq!(s.vitals().hp, hp);
                    assert_eq!(s.doom().value(), doom);
                }
            }
        }
        assert_eq!(seen.len(), CriticalPenalty::ALL.len());
    }

    #[test]
    fn same_seed_same_world() {
        let grow = |seed| {
            let config = SessionConfig::default().with_seed(seed);
            let mut s = Session::new(Arc::new(TopologyRules::standard()), config).unwrap();
            for dir in Direction::ALL {
                let _ = s.explore(dir, Preference::Any);
            }
            s.map().tiles().map(|t| t.category).collect::<Vec<_>>()
        };
        assert_eq!(grow(5), grow(5));
    }

    #[test]
    fn doom_config_flows_through() {
        let config = SessionConfig::default().with_doom(DoomConfig::default().with_start(1));
        let mut s = Session::new(Arc::new(TopologyRules::standard()), config).unwrap();
        assert!(!s.is_over());
        let change = s.record(DoomEvent::RoundEnded);
        assert!(change.defeated);
        assert!(s.is_over());
    }

    proptest! {
        #[test]
        fn wandering_keeps_map_consistent(
            seed in 0u64..1_000,
            moves in prop::collection::vec(0usize..6, 1..25),
        ) {
            let config = SessionConfig::default().with_seed(seed);
            let rules = Arc::new(TopologyRules::standard());
            let mut s = Session::new(rules.clone(), config.clone()).unwrap();
            for i in moves {
                let dir = Direction::ALL[i];
                let _ = s.explore(dir, Preference::Any);
                let _ = s.open_door(dir);
                let _ = s.enter(dir);
            }
            prop_assert!(s.map().check_invariants(&rules).is_empty());
            prop_assert!(s.map().contains(s.position()));

            let restored = Session::restore(rules, config, &s.save().unwrap()).unwrap();
            prop_assert_eq!(restored.position(), s.position());
            prop_assert_eq!(restored.map().len(), s.map().len());
        }
    }
}

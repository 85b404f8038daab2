//! Doom tracking and doom-driven difficulty.
//!
//! Doom counts down toward defeat. As it falls the game gets harder: enemies
//! hit harder and the player rolls fewer dice. The difficulty tier comes from
//! a [`DoomTable`] of bands ordered by descending threshold.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Combat adjustments for a doom band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatModifier {
    /// Added to damage from enemy attacks that land.
    pub enemy_damage_bonus: i32,
    /// Added to the player's attack and check pools.
    pub player_dice_bonus: i32,
}

impl CombatModifier {
    /// Create a modifier.
    pub fn new(enemy_damage_bonus: i32, player_dice_bonus: i32) -> Self {
        Self {
            enemy_damage_bonus,
            player_dice_bonus,
        }
    }
}

impl std::fmt::Display for CombatModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "enemy damage {:+}, player dice {:+}",
            self.enemy_damage_bonus, self.player_dice_bonus
        )
    }
}

/// How grim things look. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Doom is high; nothing unusual.
    Calm,
    /// Doom is slipping.
    Uneasy,
    /// Doom is nearly spent.
    Dire,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calm => write!(f, "calm"),
            Self::Uneasy => write!(f, "uneasy"),
            Self::Dire => write!(f, "dire"),
        }
    }
}

/// One row of a [`DoomTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoomBand {
    /// Lowest doom value that still selects this band.
    pub threshold: i32,
    /// Combat adjustments while in this band.
    pub modifier: CombatModifier,
    /// Severity reported while in this band.
    pub severity: Severity,
}

/// Doom bands sorted by descending threshold.
///
/// The last band is the most dangerous one and also applies below its own
/// threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DoomBand>", into = "Vec<DoomBand>")]
pub struct DoomTable {
    bands: Vec<DoomBand>,
}

impl Default for DoomTable {
    fn default() -> Self {
        Self {
            bands: vec![
                DoomBand {
                    threshold: 10,
                    modifier: CombatModifier::new(0, 0),
                    severity: Severity::Calm,
                },
                DoomBand {
                    threshold: 5,
                    modifier: CombatModifier::new(1, 0),
                    severity: Severity::Uneasy,
                },
                DoomBand {
                    threshold: 0,
                    modifier: CombatModifier::new(2, -1),
                    severity: Severity::Dire,
                },
            ],
        }
    }
}

impl DoomTable {
    /// Build a table. Bands are sorted by descending threshold.
    pub fn new(mut bands: Vec<DoomBand>) -> MechResult<Self> {
        if bands.is_empty() {
            return Err(MechError::InvalidConfig(
                "doom table needs at least one band".to_string(),
            ));
        }
        bands.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        Ok(Self { bands })
    }

    /// Bands in descending threshold order.
    pub fn bands(&self) -> &[DoomBand] {
        &self.bands
    }

    /// The highest band whose threshold `doom` meets, or the last band.
    pub fn band(&self, doom: i32) -> &DoomBand {
        let last = &self.bands[self.bands.len() - 1];
        self.bands
            .iter()
            .find(|b| doom >= b.threshold)
            .unwrap_or(last)
    }

    /// Combat adjustments at `doom`.
    pub fn modifier(&self, doom: i32) -> CombatModifier {
        self.band(doom).modifier
    }

    /// Severity at `doom`, without any ratchet.
    pub fn severity(&self, doom: i32) -> Severity {
        self.band(doom).severity
    }
}

impl TryFrom<Vec<DoomBand>> for DoomTable {
    type Error = MechError;

    fn try_from(bands: Vec<DoomBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<DoomTable> for Vec<DoomBand> {
    fn from(table: DoomTable) -> Self {
        table.bands
    }
}

/// Combat adjustments at `doom` under the default table.
pub fn get_combat_modifier(doom: i32) -> CombatModifier {
    DoomTable::default().modifier(doom)
}

/// Per-scenario doom settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoomConfig {
    /// Doom at the start of the scenario.
    pub start: i32,
    /// Doom at or below this value means defeat.
    pub floor: i32,
    /// Change when an enemy spawns.
    pub enemy_spawned: i32,
    /// Change when an enemy is killed.
    pub enemy_killed: i32,
    /// Change when an objective is completed.
    pub objective_completed: i32,
    /// Change at the end of every round.
    pub round_ended: i32,
    /// Difficulty bands.
    pub table: DoomTable,
}

impl Default for DoomConfig {
    fn default() -> Self {
        Self {
            start: 12,
            floor: 0,
            enemy_spawned: -1,
            enemy_killed: 1,
            objective_completed: 2,
            round_ended: -1,
            table: DoomTable::default(),
        }
    }
}

impl DoomConfig {
    /// Set the starting doom.
    pub fn with_start(mut self, start: i32) -> Self {
        self.start = start;
        self
    }

    /// Set the defeat floor.
    pub fn with_floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }

    /// Set the per-round change.
    pub fn with_round_delta(mut self, delta: i32) -> Self {
        self.round_ended = delta;
        self
    }

    /// Replace the difficulty bands.
    pub fn with_table(mut self, table: DoomTable) -> Self {
        self.table = table;
        self
    }

    /// The configured change for an event.
    pub fn delta(&self, event: DoomEvent) -> i32 {
        match event {
            DoomEvent::EnemySpawned => self.enemy_spawned,
            DoomEvent::EnemyKilled => self.enemy_killed,
            DoomEvent::ObjectiveCompleted => self.objective_completed,
            DoomEvent::RoundEnded => self.round_ended,
            DoomEvent::Narrative(delta) => delta,
        }
    }
}

/// Something that moves the doom counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoomEvent {
    /// An enemy entered play.
    EnemySpawned,
    /// An enemy was defeated.
    EnemyKilled,
    /// A scenario objective was completed.
    ObjectiveCompleted,
    /// A round ended.
    RoundEnded,
    /// A scripted story adjustment by the given amount.
    Narrative(i32),
}

impl std::fmt::Display for DoomEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnemySpawned => write!(f, "enemy spawned"),
            Self::EnemyKilled => write!(f, "enemy killed"),
            Self::ObjectiveCompleted => write!(f, "objective completed"),
            Self::RoundEnded => write!(f, "round ended"),
            Self::Narrative(delta) => write!(f, "narrative ({delta:+})"),
        }
    }
}

/// What one event did to the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoomChange {
    /// The event applied.
    pub event: DoomEvent,
    /// Doom before the event.
    pub before: i32,
    /// Doom after the event.
    pub after: i32,
    /// Severity after the event, ratchet included.
    pub severity: Severity,
    /// The event pushed severity to a new worst.
    pub escalated: bool,
    /// Doom reached the defeat floor.
    pub defeated: bool,
}

/// The live doom counter for one scenario.
///
/// Severity only escalates as doom falls. Regaining doom through kills or
/// objectives keeps the worst severity seen; only a narrative event that
/// raises doom resets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoomTracker {
    value: i32,
    severity: Severity,
    config: DoomConfig,
}

impl Default for DoomTracker {
    fn default() -> Self {
        Self::new(DoomConfig::default())
    }
}

impl DoomTracker {
    /// Start a tracker at the configured starting doom.
    pub fn new(config: DoomConfig) -> Self {
        let value = config.start.max(config.floor);
        Self {
            value,
            severity: config.table.severity(value),
            config,
        }
    }

    /// Current doom.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Worst severity reached since the last narrative reset.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Scenario settings.
    pub fn config(&self) -> &DoomConfig {
        &self.config
    }

    /// Combat adjustments at the current doom.
    pub fn modifier(&self) -> CombatModifier {
        self.config.table.modifier(self.value)
    }

    /// Doom has reached the defeat floor.
    pub fn is_defeated(&self) -> bool {
        self.value <= self.config.floor
    }

    /// Apply an event. Doom never drops below the floor.
    pub fn apply(&mut self, event: DoomEvent) -> DoomChange {
        let before = self.value;
        let delta = self.config.delta(event);
        self.value = before.saturating_add(delta).max(self.config.floor);

        let observed = self.config.table.severity(self.value);
        let previous = self.severity;
        self.severity = match event {
            DoomEvent::Narrative(d) if d > 0 => observed,
            _ => previous.max(observed),
        };

        let change = DoomChange {
            event,
            before,
            after: self.value,
            severity: self.severity,
            escalated: self.severity > previous,
            defeated: self.is_defeated(),
        };
        tracing::debug!(
            %event,
            before,
            after = self.value,
            severity = %self.severity,
            "doom changed"
        );
        change
    }
}

/// An inclusive doom window used to gate table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DoomRange {
    /// Lowest doom that qualifies, unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    /// Highest doom that qualifies, unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
}

impl DoomRange {
    /// Every doom value qualifies.
    pub fn any() -> Self {
        Self::default()
    }

    /// Doom at or below `max`.
    pub fn at_most(max: i32) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Doom at or above `min`.
    pub fn at_least(min: i32) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Doom within `min..=max`.
    pub fn between(min: i32, max: i32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Whether `doom` falls inside the window.
    pub fn contains(&self, doom: i32) -> bool {
        self.min.is_none_or(|min| doom >= min) && self.max.is_none_or(|max| doom <= max)
    }
}

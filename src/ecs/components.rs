//! Typed component aggregates attached to entities
//!
//! The component set is closed: an entity is at most one of each of
//! Position, Renderable, Fighter, and Ai. The owning relation lives in the
//! store's registry keyed by `EntityId`; components never hold back-pointers.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::combat::messages::{self, MessageTemplate};
use crate::core::types::TurnCost;
use crate::render::Color;

/// Grid cell an entity occupies
///
/// Written only by movement validation; AI and combat never set coordinates
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// How an entity appears on the display surface and reads in narration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    pub symbol: char,
    pub fg: Color,
    pub bg: Color,
    pub name: String,
    /// Other entities cannot enter this entity's cell
    pub blocks: bool,
    /// Proper names drop the "the"/"The" article in narration
    pub proper_name: bool,
    /// Plural names take the third-person-plural verb form
    pub plural: bool,
}

/// Label selecting one of a fighter's attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Melee swing against an adjacent blocker
    Base,
    /// Follow-through attack one cell beyond a completed move
    Lunge,
}

/// One attack a fighter can make
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    /// Base damage before the defense roll
    pub power: i32,
    /// Higher accuracy is more likely to land against a given defense
    pub accuracy: i32,
    /// Turn cost charged to the attacker on use, hit or miss
    pub speed: TurnCost,
    pub msg_hit: MessageTemplate,
    pub msg_miss: MessageTemplate,
    /// Announced before the outcome; the outcome line then omits the target
    pub msg_attempt: Option<MessageTemplate>,
}

impl Attack {
    pub fn new(power: i32, accuracy: i32, speed: TurnCost) -> Self {
        Self {
            power,
            accuracy,
            speed,
            msg_hit: messages::hit(),
            msg_miss: messages::miss(),
            msg_attempt: None,
        }
    }

    pub fn with_attempt(mut self, template: MessageTemplate) -> Self {
        self.msg_attempt = Some(template);
        self
    }
}

/// Hit points, defense, and the attacks an entity fights with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    hp: i32,
    max_hp: i32,
    pub defense: i32,
    pub attacks: AHashMap<AttackKind, Attack>,
}

impl Fighter {
    /// Spawn at full health. Defense must be non-negative.
    pub fn new(max_hp: i32, defense: i32, attacks: AHashMap<AttackKind, Attack>) -> Self {
        assert!(defense >= 0, "fighter defense must be non-negative");
        Self {
            hp: max_hp,
            max_hp,
            defense,
            attacks,
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn attack(&self, kind: AttackKind) -> Option<&Attack> {
        self.attacks.get(&kind)
    }

    /// Subtract damage. Returns true when this call brought hp to zero or
    /// below; the caller runs the death sequence exactly once.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        self.hp <= 0
    }
}

/// Behavioral tag plus the turn cost of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ai {
    pub kind: AiKind,
    pub move_speed: TurnCost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiKind {
    /// Turn waits on external input via the scheduler lock
    Player,
    /// Autonomous: walks the distance field toward the player, attacks when
    /// adjacent
    Monster,
}

impl Ai {
    pub fn player(move_speed: TurnCost) -> Self {
        Self {
            kind: AiKind::Player,
            move_speed,
        }
    }

    pub fn monster(move_speed: TurnCost) -> Self {
        Self {
            kind: AiKind::Monster,
            move_speed,
        }
    }
}

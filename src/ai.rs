//! Autonomous turn decisions
//!
//! A monster reads the distance field at its own cell and either walks
//! downhill toward the origin (the player) or, once adjacent, attacks.
//! Neighbor order is shuffled so equally-good steps don't bias one way.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::EntityId;
use crate::ecs::EntityStore;
use crate::map::{Grid, KING_MOVES};

/// What a monster chose to do with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Step to the cell; costs the mover's move_speed
    Move { x: i32, y: i32 },
    /// Swing the base attack at the player
    AttackPlayer,
    /// No viable action; costs nothing and defers to the rest of the queue
    Pass,
}

/// Decide one monster turn.
///
/// Unreached cells (no distance) produce a pass: a monster the flood never
/// reached neither approaches nor attacks through walls.
pub fn monster_decision(
    grid: &Grid,
    store: &EntityStore,
    id: EntityId,
    rng: &mut impl Rng,
) -> Decision {
    let Some(position) = store.get(id).and_then(|e| e.position) else {
        return Decision::Pass;
    };
    let Some(own_distance) = grid.distance_at(position.x, position.y) else {
        return Decision::Pass;
    };

    if own_distance <= 1 {
        return Decision::AttackPlayer;
    }

    let mut neighbors = KING_MOVES;
    neighbors.shuffle(rng);

    let mut best = own_distance;
    let mut step = None;
    for (dx, dy) in neighbors {
        let (x, y) = (position.x + dx, position.y + dy);
        if grid.is_blocked(x, y) || store.blocks_at(x, y) {
            continue;
        }
        if let Some(d) = grid.distance_at(x, y) {
            if d < best {
                best = d;
                step = Some(Decision::Move { x, y });
            }
        }
    }

    step.unwrap_or(Decision::Pass)
}

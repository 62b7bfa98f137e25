//! Combat resolution math
//!
//! Pure rolls only: hit chance follows a logistic curve in
//! (accuracy - defense), damage subtracts a random slice of defense from the
//! attack's power. Charging the attacker's turn cost, applying damage, and
//! narrating the outcome are the session's job.

pub mod messages;

pub use messages::MessageTemplate;

use rand::Rng;

use crate::ecs::components::Attack;

/// What one resolved attack did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub hit: bool,
    /// The damage roll, pre-gate; applied only when the attack hit and the
    /// roll was positive
    pub damage: i32,
}

/// Probability that an attack with the given accuracy lands against the
/// given defense.
///
/// Centered where accuracy equals defense (exactly 0.5); each point of
/// accuracy above defense doubles the odds in the attacker's favor.
pub fn hit_chance(accuracy: i32, defense: i32) -> f64 {
    1.0 / (1.0 + f64::powi(2.0, defense - accuracy))
}

/// Draw the hit/miss roll for one attack.
pub fn roll_hit(attack: &Attack, defense: i32, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < hit_chance(attack.accuracy, defense)
}

/// Draw the damage roll for one attack.
///
/// Defense subtracts a uniformly random amount in [0, defense), never more.
/// The result may be zero or negative; the caller gates application on
/// damage > 0.
pub fn roll_damage(attack: &Attack, defense: i32, rng: &mut impl Rng) -> i32 {
    attack.power - (rng.gen::<f64>() * defense as f64).floor() as i32
}

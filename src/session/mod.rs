//! Game session orchestration
//!
//! One session owns the grid, the entity store, the scheduler, and the
//! message log, and is the only place any of them are mutated. The run loop
//! advances scheduled entities until the player's turn locks it; the
//! front-end then feeds one decoded input back in and the loop resumes.

pub mod narration;

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::ai::{monster_decision, Decision};
use crate::combat::{self, messages, AttackOutcome, MessageTemplate};
use crate::core::config::GameConfig;
use crate::core::types::EntityId;
use crate::ecs::{AiKind, AttackKind, Entity, EntityStore, Position, Renderable};
use crate::input::PlayerAction;
use crate::map::Grid;
use crate::render::color;
use crate::scheduler::TurnScheduler;
use narration::{MessageLog, Speaker};

/// A running dungeon-crawl session
pub struct GameSession {
    grid: Grid,
    store: EntityStore,
    scheduler: TurnScheduler,
    log: MessageLog,
    rng: ChaCha8Rng,
    player: EntityId,
    game_over: bool,
    visible_log_lines: usize,
}

impl GameSession {
    /// Start a session on a generated grid with the given player prototype.
    ///
    /// # Panics
    /// The player prototype must carry a Position and a player-controlled
    /// Ai; anything else is a construction bug.
    pub fn new(config: &GameConfig, grid: Grid, player: Entity, rng: ChaCha8Rng) -> Self {
        let position = player
            .position
            .expect("player prototype must carry a Position");
        assert!(
            player.ai.is_some_and(|ai| ai.kind == AiKind::Player),
            "player prototype must carry a player-controlled Ai"
        );

        let mut store = EntityStore::new();
        let mut scheduler = TurnScheduler::new();
        let player_id = store.spawn(player);
        scheduler.add(player_id);

        let mut grid = grid;
        grid.recompute_distance(position.x, position.y);

        Self {
            grid,
            store,
            scheduler,
            log: MessageLog::new(config.message_budget),
            rng,
            player: player_id,
            game_over: false,
            visible_log_lines: config.visible_log_lines,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    /// True once the player has died; the run loop stops advancing.
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn visible_log_lines(&self) -> usize {
        self.visible_log_lines
    }

    /// The trailing log lines the display shows.
    pub fn log_tail(&self) -> &[String] {
        self.log.recent(self.visible_log_lines)
    }

    pub fn player_hp(&self) -> Option<(i32, i32)> {
        let fighter = self.store.get(self.player)?.fighter.as_ref()?;
        Some((fighter.hp(), fighter.max_hp()))
    }

    /// Push a complete line straight into the log (banners, status text).
    pub fn add_log_line(&mut self, line: &str) {
        self.log.push_line(line);
    }

    /// Register a new entity; AI-bearing entities join the scheduler.
    pub fn spawn(&mut self, prototype: Entity) -> EntityId {
        let scheduled = prototype.ai.is_some();
        let id = self.store.spawn(prototype);
        if scheduled {
            self.scheduler.add(id);
        }
        id
    }

    /// Remove an entity from the store and, in the same step, from the
    /// scheduler. Nothing can observe the entity scheduled but destroyed.
    pub fn remove_entity(&mut self, id: EntityId) {
        self.scheduler.remove(id);
        self.store.destroy(id);
    }

    /// A cell is closed to movement when the terrain blocks it or a
    /// blocking entity stands on it.
    pub fn cell_blocked(&self, x: i32, y: i32) -> bool {
        self.grid.is_blocked(x, y) || self.store.blocks_at(x, y)
    }

    /// Advance scheduled entities until the player's turn suspends the loop
    /// or the session ends. The only suspension point in the core.
    pub fn run_until_input(&mut self) {
        while !self.scheduler.is_locked() && !self.game_over {
            let id = self.scheduler.advance();
            self.take_turn(id);
        }
        self.log.flush();
    }

    /// Feed one decoded player input into the locked session.
    ///
    /// Returns true when the input consumed the turn; the scheduler is then
    /// unlocked and the distance field refreshed from the player's cell.
    /// Rejected inputs leave the lock in place so the player can try again.
    pub fn handle_input(&mut self, action: PlayerAction) -> bool {
        if self.game_over || !self.scheduler.is_locked() {
            return false;
        }

        let acted = match action {
            PlayerAction::Move { dx, dy } => self.player_move_or_fight(dx, dy),
            PlayerAction::Wait => match self.store.get(self.player).and_then(|e| e.ai) {
                Some(ai) => {
                    self.scheduler.charge(self.player, ai.move_speed);
                    true
                }
                None => false,
            },
        };

        if acted {
            if let Some(position) = self.store.get(self.player).and_then(|e| e.position) {
                self.grid.recompute_distance(position.x, position.y);
            }
            self.scheduler.unlock();
        }
        self.log.flush();
        acted
    }

    fn take_turn(&mut self, id: EntityId) {
        let Some(ai) = self.store.get(id).and_then(|e| e.ai) else {
            // Scheduled entity lost its Ai; stop scheduling it
            self.scheduler.remove(id);
            return;
        };

        match ai.kind {
            AiKind::Player => self.scheduler.lock(),
            AiKind::Monster => {
                match monster_decision(&self.grid, &self.store, id, &mut self.rng) {
                    Decision::Move { x, y } => {
                        if self.try_move(id, x, y) {
                            self.scheduler.charge(id, ai.move_speed);
                        } else {
                            self.scheduler.defer(id);
                        }
                    }
                    Decision::AttackPlayer => {
                        if self
                            .resolve_attack(id, AttackKind::Base, self.player)
                            .is_none()
                        {
                            // No usable attack; yield instead of spinning
                            self.scheduler.defer(id);
                        }
                    }
                    Decision::Pass => self.scheduler.defer(id),
                }
            }
        }
    }

    /// Validated position mutation: the single place coordinates change.
    fn try_move(&mut self, id: EntityId, x: i32, y: i32) -> bool {
        if self.cell_blocked(x, y) {
            return false;
        }
        let Some(position) = self.store.get_mut(id).and_then(|e| e.position.as_mut()) else {
            return false;
        };
        *position = Position::new(x, y);
        true
    }

    /// Resolve one directional player input: move, then lunge and announce;
    /// or attack the blocker; or fall back to a wall jump.
    fn player_move_or_fight(&mut self, dx: i32, dy: i32) -> bool {
        let Some(position) = self.store.get(self.player).and_then(|e| e.position) else {
            return false;
        };
        let Some(ai) = self.store.get(self.player).and_then(|e| e.ai) else {
            return false;
        };
        let (nx, ny) = (position.x + dx, position.y + dy);

        if self.try_move(self.player, nx, ny) {
            debug!(x = nx, y = ny, "player moved");
            // Follow through: lunge at whatever stands one step further on
            let lunge_targets: Vec<EntityId> = self
                .store
                .at(nx + dx, ny + dy)
                .filter(|id| self.store.get(*id).is_some_and(|e| e.fighter.is_some()))
                .collect();
            for target in lunge_targets {
                self.resolve_attack(self.player, AttackKind::Lunge, target);
            }
            self.announce_cell(nx, ny);
            self.scheduler.charge(self.player, ai.move_speed);
            return true;
        }

        let occupants: Vec<EntityId> = self.store.at(nx, ny).collect();
        if occupants.is_empty() {
            // Intrinsic terrain, nobody to fight: try the fallback move
            return self.wall_jump(dx, dy);
        }

        let target = occupants
            .into_iter()
            .find(|id| self.store.get(*id).is_some_and(|e| e.fighter.is_some()));
        match target {
            Some(target) => {
                self.resolve_attack(self.player, AttackKind::Base, target);
                true
            }
            None => false,
        }
    }

    /// Fallback special move: displace two cells backward along the
    /// blocked direction. Failure costs nothing and tells only the player.
    fn wall_jump(&mut self, dx: i32, dy: i32) -> bool {
        let Some(position) = self.store.get(self.player).and_then(|e| e.position) else {
            return false;
        };
        let Some(ai) = self.store.get(self.player).and_then(|e| e.ai) else {
            return false;
        };
        let (jx, jy) = (position.x - 2 * dx, position.y - 2 * dy);

        if self.try_move(self.player, jx, jy) {
            debug!(x = jx, y = jy, "player wall-jumped");
            self.say(&messages::spring(), self.player, None);
            self.scheduler.charge(self.player, ai.move_speed);
            true
        } else {
            self.tell_player("No room to wall jump.", self.player);
            false
        }
    }

    /// Resolve an attack end to end: charge the attacker's time, roll
    /// hit and damage, narrate, apply damage, and run the death sequence if
    /// the defender drops.
    ///
    /// Returns None (a no-op) when either side lacks the components the
    /// attack needs.
    pub fn resolve_attack(
        &mut self,
        attacker: EntityId,
        kind: AttackKind,
        defender: EntityId,
    ) -> Option<AttackOutcome> {
        let attack = self
            .store
            .get(attacker)?
            .fighter
            .as_ref()?
            .attack(kind)?
            .clone();
        let defense = self.store.get(defender)?.fighter.as_ref()?.defense;

        // Time is charged up front so a simultaneous death cannot skip it
        self.scheduler.charge(attacker, attack.speed);

        let hit = combat::roll_hit(&attack, defense, &mut self.rng);
        let damage = combat::roll_damage(&attack, defense, &mut self.rng);

        // An attempt line names the target once; the outcome line then
        // leaves the object clause out
        let mut narrated_target = Some(defender);
        if let Some(attempt) = &attack.msg_attempt {
            self.say(attempt, attacker, Some(defender));
            narrated_target = None;
        }

        if hit && damage > 0 {
            debug!(?attacker, ?defender, damage, "attack hit");
            self.say(&attack.msg_hit, attacker, narrated_target);
            let died = self
                .store
                .get_mut(defender)
                .and_then(|e| e.fighter.as_mut())
                .map(|f| f.take_damage(damage))
                .unwrap_or(false);
            if died {
                self.kill(defender);
            }
            Some(AttackOutcome { hit: true, damage })
        } else {
            debug!(?attacker, ?defender, "attack missed");
            self.say(&attack.msg_miss, attacker, narrated_target);
            Some(AttackOutcome { hit: false, damage })
        }
    }

    /// Death sequence: narrate, remove the entity everywhere, leave a
    /// corpse where it fell.
    fn kill(&mut self, id: EntityId) {
        self.say(&messages::die(), id, None);

        let (position, name) = match self.store.get(id) {
            Some(entity) => (
                entity.position,
                entity
                    .renderable
                    .as_ref()
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| "something".to_string()),
            ),
            None => return,
        };
        debug!(?id, %name, "entity died");

        self.remove_entity(id);

        if let Some(position) = position {
            self.store.spawn(Entity {
                position: Some(position),
                renderable: Some(Renderable {
                    symbol: '%',
                    fg: color::GREY,
                    bg: color::DARK_RED,
                    name: format!("{name} corpse"),
                    blocks: false,
                    proper_name: false,
                    plural: false,
                }),
                ..Entity::default()
            });
        }

        if id == self.player {
            self.game_over = true;
        }
    }

    /// Announce every non-player entity sharing the cell, grouped by name:
    /// "You see here a banana and a lute."
    fn announce_cell(&mut self, x: i32, y: i32) {
        let names: Vec<String> = self
            .store
            .at(x, y)
            .filter(|id| *id != self.player)
            .filter_map(|id| {
                self.store
                    .get(id)
                    .and_then(|e| e.renderable.as_ref())
                    .map(|r| r.name.clone())
            })
            .collect();
        if names.is_empty() {
            return;
        }
        let list = narration::name_list(&names);
        self.log.append(&format!("You see here {list}."));
    }

    fn say(&mut self, template: &MessageTemplate, subject: EntityId, object: Option<EntityId>) {
        let message = {
            let subject = self.speaker(subject);
            let object = object.map(|id| self.speaker(id));
            narration::compose(template, &subject, object.as_ref())
        };
        self.log.append(&message);
    }

    /// Status line visible only when the acting entity is the player.
    fn tell_player(&mut self, message: &str, subject: EntityId) {
        if subject == self.player {
            self.log.append(message);
        }
    }

    fn speaker(&self, id: EntityId) -> Speaker<'_> {
        let renderable = self.store.get(id).and_then(|e| e.renderable.as_ref());
        Speaker {
            name: renderable.map_or("something", |r| r.name.as_str()),
            proper_name: renderable.is_some_and(|r| r.proper_name),
            plural: renderable.is_some_and(|r| r.plural),
            is_player: id == self.player,
        }
    }
}

//! Dojo Crawl - minimal turn-based dungeon crawl core
//!
//! An entity-component world, a speed-based turn scheduler, a distance-field
//! pathfinder for monster AI, and a combat/narration resolver. Map generation,
//! terminal rendering, and keyboard capture plug in at the boundaries in
//! `render` and `input`.

pub mod ai;
pub mod combat;
pub mod core;
pub mod ecs;
pub mod input;
pub mod map;
pub mod render;
pub mod scheduler;
pub mod session;

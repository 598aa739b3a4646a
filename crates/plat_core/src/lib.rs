//! Deterministic simulation core for a tile-based side-scrolling platformer.
//!
//! Everything here is frame-stepped and free of I/O: the driver builds a
//! [`Level`] from a parsed [`LevelDescriptor`], issues commands to the
//! [`Character`] and calls [`Level::step`] once per tick.

pub mod animation;
pub mod body;
pub mod character;
pub mod collision;
pub mod config;
pub mod enemy;
pub mod entity;
pub mod events;
pub mod geometry;
pub mod level;

pub use body::{Direction, KinematicBody};
pub use character::Character;
pub use config::{CharacterConfig, HeartPolicy, SimConfig};
pub use enemy::{Enemy, EnemyKind};
pub use entity::{Block, Flag, Pickup, PickupEffect, TileKind};
pub use events::FrameEvent;
pub use geometry::Rect;
pub use level::{Level, LevelDescriptor, SpriteKind, SpriteView};

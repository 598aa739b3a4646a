//! Level session: static geometry, live entity sets and the per-frame step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::animation::SpriteFrame;
use crate::character::Character;
use crate::config::SimConfig;
use crate::enemy::{Enemy, EnemyKind, PatrolContext};
use crate::entity::{Block, Flag, Pickup, PickupEffect, TileKind};
use crate::events::FrameEvent;
use crate::geometry::Rect;

/// Parsed level data in grid units. Keys the simulation does not use
/// (backgrounds, scenery) are ignored on deserialize.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LevelDescriptor {
    pub width: i32,
    pub height: i32,
    pub start: [i32; 2],
    pub gravity: f32,
    pub terminal_velocity: f32,
    #[serde(default)]
    pub blocks: Vec<(i32, i32, TileKind)>,
    #[serde(default)]
    pub bears: Vec<[i32; 2]>,
    #[serde(default)]
    pub monsters: Vec<[i32; 2]>,
    #[serde(default)]
    pub coins: Vec<[i32; 2]>,
    #[serde(default)]
    pub oneups: Vec<[i32; 2]>,
    #[serde(default)]
    pub hearts: Vec<[i32; 2]>,
    /// First entry is the flag itself, the rest are pole segments.
    #[serde(default)]
    pub flag: Vec<[i32; 2]>,
}

impl LevelDescriptor {
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0 || self.height <= 0 {
            return Err(format!(
                "Level validation failed: size must be positive (got {}x{})",
                self.width, self.height
            ));
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(format!(
                "Level validation failed: gravity must be a finite value >= 0 (got {})",
                self.gravity
            ));
        }
        if !self.terminal_velocity.is_finite() || self.terminal_velocity <= 0.0 {
            return Err(format!(
                "Level validation failed: terminal-velocity must be a finite value > 0 (got {})",
                self.terminal_velocity
            ));
        }
        Ok(())
    }

    fn is_inside(&self, cell: [i32; 2]) -> bool {
        (0..self.width).contains(&cell[0]) && (0..self.height).contains(&cell[1])
    }
}

/// What a renderer should draw for one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteKind {
    Block(TileKind),
    Flag,
    Pole,
    Coin,
    OneUp,
    Heart,
    Enemy { kind: EnemyKind, frame: SpriteFrame },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteView {
    pub kind: SpriteKind,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct Level {
    /// World width in units.
    pub width: f32,
    pub height: f32,
    pub start_position: Vec2,
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub(crate) completed: bool,
    pub(crate) blocks: Vec<Block>,
    pub(crate) flag: Vec<Flag>,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) coins: Vec<Pickup>,
    pub(crate) powerups: Vec<Pickup>,
    starting_enemies: Vec<Enemy>,
    starting_coins: Vec<Pickup>,
    starting_powerups: Vec<Pickup>,
    enemy_cull_distance: f32,
}

impl Level {
    pub fn from_descriptor(desc: &LevelDescriptor, config: &SimConfig) -> Result<Self, String> {
        config.validate()?;
        desc.validate()?;

        let grid = config.grid_size;
        // A body falling a full tile per frame could skip over a one-tile floor.
        if desc.terminal_velocity >= grid {
            return Err(format!(
                "Level validation failed: terminal-velocity {} must be below the grid size {grid}",
                desc.terminal_velocity
            ));
        }
        let width = desc.width as f32 * grid;
        let height = desc.height as f32 * grid;
        if !width.is_finite() || !height.is_finite() {
            return Err(format!(
                "Level validation failed: {}x{} cells at grid size {grid} overflows world units",
                desc.width, desc.height
            ));
        }
        let cell_rect = |what: &str, cell: [i32; 2]| -> Result<Rect, String> {
            let rect = Rect::square(cell[0] as f32 * grid, cell[1] as f32 * grid, grid);
            if rect.is_well_formed() {
                Ok(rect)
            } else {
                Err(format!(
                    "Level validation failed: {what} at {cell:?} scales to degenerate rect {rect:?}"
                ))
            }
        };

        let placements = desc
            .blocks
            .iter()
            .map(|&(x, y, _)| [x, y])
            .chain(desc.bears.iter().copied())
            .chain(desc.monsters.iter().copied())
            .chain(desc.coins.iter().copied())
            .chain(desc.oneups.iter().copied())
            .chain(desc.hearts.iter().copied())
            .chain(desc.flag.iter().copied());
        let outside = placements.filter(|&cell| !desc.is_inside(cell)).count();
        if outside > 0 {
            log::warn!(
                "Level has {outside} entities placed outside its {}x{} grid",
                desc.width,
                desc.height
            );
        }
        if !desc.is_inside(desc.start) {
            log::warn!("Level start {:?} is outside the grid", desc.start);
        }
        if desc.flag.is_empty() {
            log::warn!("Level has no flag and can never be completed");
        }

        let start_position = cell_rect("start", desc.start)?.position();
        let blocks = desc
            .blocks
            .iter()
            .map(|&(x, y, tile)| Ok(Block::new(cell_rect("block", [x, y])?, tile)))
            .collect::<Result<Vec<_>, String>>()?;
        let flag = desc
            .flag
            .iter()
            .enumerate()
            .map(|(i, &cell)| Ok(Flag::new(cell_rect("flag", cell)?, i > 0)))
            .collect::<Result<Vec<_>, String>>()?;

        let spawn = |kind: EnemyKind, cell: [i32; 2]| -> Result<Enemy, String> {
            Ok(Enemy::new(kind, cell_rect(kind.label(), cell)?, config.enemy_speed))
        };
        let enemies = desc
            .bears
            .iter()
            .map(|&cell| spawn(EnemyKind::GroundPatrol, cell))
            .chain(desc.monsters.iter().map(|&cell| spawn(EnemyKind::LedgeAware, cell)))
            .collect::<Result<Vec<_>, String>>()?;

        let place = |effect: PickupEffect, cell: [i32; 2]| -> Result<Pickup, String> {
            Ok(Pickup::new(cell_rect("pickup", cell)?, effect))
        };
        let coin = PickupEffect::Coin {
            value: config.coin_value,
        };
        let coins = desc
            .coins
            .iter()
            .map(|&cell| place(coin, cell))
            .collect::<Result<Vec<_>, String>>()?;
        let powerups = desc
            .oneups
            .iter()
            .map(|&cell| place(PickupEffect::OneUp, cell))
            .chain(desc.hearts.iter().map(|&cell| place(PickupEffect::Heart, cell)))
            .collect::<Result<Vec<_>, String>>()?;

        log::info!(
            "Level built: {}x{} cells, {} blocks, {} enemies, {} coins, {} power-ups",
            desc.width,
            desc.height,
            blocks.len(),
            enemies.len(),
            coins.len(),
            powerups.len()
        );

        Ok(Self {
            width,
            height,
            start_position,
            gravity: desc.gravity,
            terminal_velocity: desc.terminal_velocity,
            completed: false,
            blocks,
            flag,
            starting_enemies: enemies.clone(),
            starting_coins: coins.clone(),
            starting_powerups: powerups.clone(),
            enemies,
            coins,
            powerups,
            enemy_cull_distance: config.enemy_cull_distance(),
        })
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn flag(&self) -> &[Flag] {
        &self.flag
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn coins(&self) -> &[Pickup] {
        &self.coins
    }

    pub fn powerups(&self) -> &[Pickup] {
        &self.powerups
    }

    pub fn enemy_cull_distance(&self) -> f32 {
        self.enemy_cull_distance
    }

    /// Restore enemies, coins and power-ups to their starting state. Blocks and
    /// the flag have nothing to restore.
    pub fn reset(&mut self) {
        self.enemies = self.starting_enemies.clone();
        for enemy in &mut self.enemies {
            enemy.reset();
        }
        self.coins = self.starting_coins.clone();
        self.powerups = self.starting_powerups.clone();
        log::info!(
            "Level reset: {} enemies, {} coins, {} power-ups",
            self.enemies.len(),
            self.coins.len(),
            self.powerups.len()
        );
    }

    /// Advance `frames` frames: the character first, then every enemy near it.
    ///
    /// Stops early once the level is completed or the character runs out of
    /// hearts, so the caller can react before anything else moves.
    pub fn step(&mut self, hero: &mut Character, frames: u32) -> Vec<FrameEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            hero.update(self, &mut events);

            let ctx = PatrolContext {
                blocks: &self.blocks,
                gravity: self.gravity,
                terminal_velocity: self.terminal_velocity,
                level_width: self.width,
                hero: hero.rect(),
                cull_distance: self.enemy_cull_distance,
            };
            let mut simulated = 0;
            for enemy in &mut self.enemies {
                if enemy.update(&ctx) {
                    simulated += 1;
                }
            }
            log::trace!("Stepped {simulated}/{} enemies", self.enemies.len());

            if self.completed || hero.hearts == 0 {
                break;
            }
        }
        events
    }

    /// Static entities: blocks, then the flag and its pole.
    pub fn inactive_sprites(&self) -> impl Iterator<Item = SpriteView> + '_ {
        let blocks = self.blocks.iter().map(|block| SpriteView {
            kind: SpriteKind::Block(block.tile),
            rect: *block.rect(),
        });
        let flag = self.flag.iter().map(|flag| SpriteView {
            kind: if flag.pole { SpriteKind::Pole } else { SpriteKind::Flag },
            rect: *flag.rect(),
        });
        blocks.chain(flag)
    }

    /// Simulated entities: coins, power-ups, then enemies.
    pub fn active_sprites(&self) -> impl Iterator<Item = SpriteView> + '_ {
        let pickups = self.coins.iter().chain(&self.powerups).map(|pickup| SpriteView {
            kind: match pickup.effect {
                PickupEffect::Coin { .. } => SpriteKind::Coin,
                PickupEffect::OneUp => SpriteKind::OneUp,
                PickupEffect::Heart => SpriteKind::Heart,
            },
            rect: *pickup.rect(),
        });
        let enemies = self.enemies.iter().map(|enemy| SpriteView {
            kind: SpriteKind::Enemy {
                kind: enemy.kind,
                frame: enemy.sprite_frame(),
            },
            rect: *enemy.rect(),
        });
        pickups.chain(enemies)
    }
}

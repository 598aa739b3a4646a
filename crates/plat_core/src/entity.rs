//! Static level geometry and pickups.
//!
//! Blocks and flag segments never move after the level is built. Pickups are
//! stationary too, but live in the level's active sets and are removed the
//! first time the character touches them.

use serde::{Deserialize, Serialize};

use crate::body::KinematicBody;
use crate::character::Character;
use crate::config::HeartPolicy;
use crate::geometry::Rect;

/// Tile artwork tag carried through for the renderer. Has no effect on collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    #[serde(rename = "TL")]
    TopLeft,
    #[serde(rename = "TM")]
    TopMiddle,
    #[serde(rename = "TR")]
    TopRight,
    #[serde(rename = "ER")]
    EndRight,
    #[serde(rename = "EL")]
    EndLeft,
    #[serde(rename = "TP")]
    Top,
    #[serde(rename = "CN")]
    Center,
    #[serde(rename = "LF")]
    LoneFloat,
    #[serde(rename = "SP")]
    Special,
}

/// Solid tile. Zero velocity, immutable after level load.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    body: KinematicBody,
    pub tile: TileKind,
}

impl Block {
    pub fn new(rect: Rect, tile: TileKind) -> Self {
        Self {
            body: KinematicBody::new(rect),
            tile,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }
}

/// End-of-level marker. The first placement is the flag, the rest are pole segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    body: KinematicBody,
    pub pole: bool,
}

impl Flag {
    pub fn new(rect: Rect, pole: bool) -> Self {
        Self {
            body: KinematicBody::new(rect),
            pole,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupEffect {
    Coin { value: u32 },
    OneUp,
    Heart,
}

impl PickupEffect {
    pub fn apply(&self, character: &mut Character) {
        match *self {
            PickupEffect::Coin { value } => {
                character.score = character.score.saturating_add(value);
            }
            PickupEffect::OneUp => {
                character.lives = character.lives.saturating_add(1);
            }
            PickupEffect::Heart => {
                let raised = character.hearts.saturating_add(1);
                character.hearts = match character.heart_policy() {
                    HeartPolicy::Clamp => raised.min(character.max_hearts),
                    HeartPolicy::LegacyMax => raised.max(character.max_hearts),
                };
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    body: KinematicBody,
    pub effect: PickupEffect,
}

impl Pickup {
    pub fn new(rect: Rect, effect: PickupEffect) -> Self {
        Self {
            body: KinematicBody::new(rect),
            effect,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }
}

/// Remove and return every pickup overlapping `rect`, preserving the order of both halves.
pub(crate) fn take_overlapping(set: &mut Vec<Pickup>, rect: &Rect) -> Vec<Pickup> {
    let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(set)
        .into_iter()
        .partition(|pickup| pickup.rect().intersects(rect));
    *set = kept;
    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn hero(policy: HeartPolicy) -> Character {
        let config = SimConfig {
            heart_policy: policy,
            ..SimConfig::default()
        };
        Character::new(&config)
    }

    #[test]
    fn tile_tags_parse_from_level_shorthand() {
        let tiles: Vec<TileKind> = serde_json::from_str(r#"["TL","CN","SP"]"#).expect("tags parse");
        assert_eq!(tiles, vec![TileKind::TopLeft, TileKind::Center, TileKind::Special]);
    }

    #[test]
    fn coin_adds_value_to_score() {
        let mut character = hero(HeartPolicy::Clamp);
        PickupEffect::Coin { value: 3 }.apply(&mut character);
        assert_eq!(character.score, 3);
    }

    #[test]
    fn one_up_adds_a_life() {
        let mut character = hero(HeartPolicy::Clamp);
        let before = character.lives;
        PickupEffect::OneUp.apply(&mut character);
        assert_eq!(character.lives, before + 1);
    }

    #[test]
    fn heart_is_capped_at_max_hearts() {
        let mut character = hero(HeartPolicy::Clamp);
        character.hearts = 1;
        PickupEffect::Heart.apply(&mut character);
        assert_eq!(character.hearts, 2);
        PickupEffect::Heart.apply(&mut character);
        PickupEffect::Heart.apply(&mut character);
        assert_eq!(character.hearts, character.max_hearts);
    }

    #[test]
    fn legacy_heart_policy_refills_and_overflows() {
        let mut character = hero(HeartPolicy::LegacyMax);
        character.hearts = 1;
        PickupEffect::Heart.apply(&mut character);
        assert_eq!(character.hearts, character.max_hearts);
        PickupEffect::Heart.apply(&mut character);
        assert_eq!(character.hearts, character.max_hearts + 1);
    }

    #[test]
    fn take_overlapping_splits_set() {
        let mut coins = vec![
            Pickup::new(Rect::square(0.0, 0.0, 64.0), PickupEffect::Coin { value: 1 }),
            Pickup::new(Rect::square(200.0, 0.0, 64.0), PickupEffect::Coin { value: 1 }),
        ];
        let taken = take_overlapping(&mut coins, &Rect::square(32.0, 0.0, 64.0));
        assert_eq!(taken.len(), 1);
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].rect().x, 200.0);
    }
}

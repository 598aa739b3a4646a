use serde::Serialize;

use crate::entity::PickupEffect;

/// Outcomes of a simulation frame, reported to the outer game (HUD, audio, stage changes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameEvent {
    /// Enemy contact cost a heart.
    HeroHurt { hearts_left: u32 },
    CoinCollected { value: u32 },
    PowerUpCollected(PickupEffect),
    FlagReached,
    /// Hearts ran out and a life was spent. Emitted once per depletion.
    HeroDied { lives_left: u32 },
}

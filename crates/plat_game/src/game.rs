//! Top-level stage machine: splash and start screens, play, pause, level
//! transitions and the two end screens.

use crate::camera::{Camera, LayerOffsets};
use crate::replay::{FrameCommands, Movement};
use plat_core::{Character, FrameEvent, Level, LevelDescriptor, SimConfig};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Splash,
    Start,
    Playing,
    Paused,
    LevelCompleted,
    GameOver,
    Victory,
}

/// Numbers shown on the heads-up display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudStats {
    pub hearts: u32,
    pub lives: u32,
    pub score: u32,
}

pub struct Game {
    config: SimConfig,
    levels: Vec<LevelDescriptor>,
    current_level: usize,
    pub stage: Stage,
    pub level: Level,
    pub hero: Character,
    camera: Camera,
}

impl Game {
    pub fn new(config: SimConfig, levels: Vec<LevelDescriptor>) -> Result<Self, String> {
        let first = levels
            .first()
            .ok_or_else(|| "Game setup failed: no levels".to_string())?;
        let level = Level::from_descriptor(first, &config)?;
        let mut hero = Character::new(&config);
        hero.respawn(&level);
        Ok(Self {
            config,
            levels,
            current_level: 0,
            stage: Stage::Splash,
            level,
            hero,
            camera: Camera::new(config.viewport_width, config.viewport_height),
        })
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn hud(&self) -> HudStats {
        HudStats {
            hearts: self.hero.hearts,
            lives: self.hero.lives,
            score: self.hero.score,
        }
    }

    pub fn layer_offsets(&self) -> LayerOffsets {
        self.camera.layer_offsets(self.hero.rect(), self.level.width)
    }

    /// Run one frame: react to this frame's commands, then advance the
    /// simulation if playing.
    pub fn frame(&mut self, commands: &FrameCommands) -> Result<Vec<FrameEvent>, String> {
        self.process_commands(commands)?;
        Ok(self.update())
    }

    fn process_commands(&mut self, commands: &FrameCommands) -> Result<(), String> {
        let was_playing = self.stage == Stage::Playing;
        match self.stage {
            Stage::Splash | Stage::Start => {
                if commands.key_pressed() {
                    self.set_stage(Stage::Playing);
                }
            }
            Stage::Playing => {
                if commands.pause {
                    self.set_stage(Stage::Paused);
                    return Ok(());
                }
            }
            Stage::Paused => {
                if commands.pause {
                    self.set_stage(Stage::Playing);
                }
            }
            Stage::LevelCompleted => {
                if commands.key_pressed() {
                    self.advance()?;
                }
            }
            Stage::GameOver | Stage::Victory => {
                if commands.restart {
                    self.reset()?;
                }
            }
        }

        if self.stage != Stage::Playing {
            return Ok(());
        }
        // The key that starts or resumes play is not also a jump.
        if was_playing && commands.jump {
            self.hero.jump(self.level.blocks());
        }
        // Every playing frame sets the held direction, including the one that
        // enters play, so no velocity carries over from before the transition.
        match commands.movement {
            Movement::Left => self.hero.move_left(),
            Movement::Right => self.hero.move_right(),
            Movement::None => self.hero.stop(),
        }
        Ok(())
    }

    fn update(&mut self) -> Vec<FrameEvent> {
        if self.stage != Stage::Playing {
            return Vec::new();
        }
        let events = self.level.step(&mut self.hero, 1);

        if self.level.is_completed() {
            if self.current_level + 1 < self.levels.len() {
                self.set_stage(Stage::LevelCompleted);
            } else {
                self.set_stage(Stage::Victory);
            }
        } else if self.hero.lives == 0 {
            self.set_stage(Stage::GameOver);
        } else if self.hero.hearts == 0 {
            self.level.reset();
            self.hero.respawn(&self.level);
        }
        events
    }

    fn start(&mut self) -> Result<(), String> {
        let descriptor = self.levels.get(self.current_level).ok_or_else(|| {
            format!("Game setup failed: level index {} out of range", self.current_level)
        })?;
        self.level = Level::from_descriptor(descriptor, &self.config)?;
        self.hero.respawn(&self.level);
        log::info!(
            "Starting level {}/{}",
            self.current_level + 1,
            self.levels.len()
        );
        Ok(())
    }

    fn advance(&mut self) -> Result<(), String> {
        self.current_level += 1;
        self.start()?;
        self.set_stage(Stage::Start);
        Ok(())
    }

    /// New character, back to the first level and the splash screen.
    fn reset(&mut self) -> Result<(), String> {
        self.hero = Character::new(&self.config);
        self.current_level = 0;
        self.start()?;
        self.set_stage(Stage::Splash);
        Ok(())
    }

    fn set_stage(&mut self, stage: Stage) {
        if self.stage != stage {
            log::info!("Stage {:?} -> {:?}", self.stage, stage);
            self.stage = stage;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plat_core::TileKind;

    fn floor_level(extra: impl FnOnce(&mut LevelDescriptor)) -> LevelDescriptor {
        let mut desc = LevelDescriptor {
            width: 20,
            height: 10,
            start: [2, 7],
            gravity: 1.0,
            terminal_velocity: 32.0,
            blocks: (0..20).map(|x| (x, 8, TileKind::TopMiddle)).collect(),
            flag: vec![[10, 7]],
            ..LevelDescriptor::default()
        };
        extra(&mut desc);
        desc
    }

    fn key() -> FrameCommands {
        FrameCommands {
            any_key: true,
            ..FrameCommands::default()
        }
    }

    fn hold(movement: Movement) -> FrameCommands {
        FrameCommands {
            movement,
            ..FrameCommands::default()
        }
    }

    fn playing(levels: Vec<LevelDescriptor>) -> Game {
        let mut game = Game::new(SimConfig::default(), levels).expect("game should build");
        game.frame(&key()).expect("frame");
        assert_eq!(game.stage, Stage::Playing);
        game
    }

    fn run_until(game: &mut Game, commands: FrameCommands, stage: Stage, limit: usize) {
        for _ in 0..limit {
            if game.stage == stage {
                return;
            }
            game.frame(&commands).expect("frame");
        }
        assert_eq!(game.stage, stage, "stage not reached within {limit} frames");
    }

    #[test]
    fn new_game_rejects_empty_campaign() {
        assert!(Game::new(SimConfig::default(), Vec::new()).is_err());
    }

    #[test]
    fn splash_waits_for_a_key() {
        let mut game = Game::new(SimConfig::default(), vec![floor_level(|_| {})]).expect("game");
        let start_x = game.hero.rect().x;
        game.frame(&hold(Movement::Right)).expect("frame");
        assert_eq!(game.stage, Stage::Splash);
        assert_eq!(game.hero.rect().x, start_x, "nothing simulates before play");

        game.frame(&key()).expect("frame");
        assert_eq!(game.stage, Stage::Playing);
    }

    #[test]
    fn pause_freezes_the_simulation() {
        let mut game = playing(vec![floor_level(|_| {})]);
        game.frame(&hold(Movement::Right)).expect("frame");
        let paused = FrameCommands {
            pause: true,
            ..FrameCommands::default()
        };
        game.frame(&paused).expect("frame");
        assert_eq!(game.stage, Stage::Paused);

        let x = game.hero.rect().x;
        for _ in 0..10 {
            game.frame(&hold(Movement::Right)).expect("frame");
        }
        assert_eq!(game.hero.rect().x, x);

        game.frame(&paused).expect("frame");
        assert_eq!(game.stage, Stage::Playing);
    }

    #[test]
    fn reaching_flag_advances_through_levels_to_victory() {
        let mut game = playing(vec![floor_level(|_| {}), floor_level(|_| {})]);
        run_until(&mut game, hold(Movement::Right), Stage::LevelCompleted, 200);
        let score_before = game.hud().score;

        game.frame(&key()).expect("frame");
        assert_eq!(game.stage, Stage::Start);
        assert_eq!(game.current_level(), 1);
        assert!(!game.level.is_completed());
        assert_eq!(game.hero.rect().position(), game.level.start_position);
        assert_eq!(game.hud().score, score_before);

        game.frame(&key()).expect("frame");
        run_until(&mut game, hold(Movement::Right), Stage::Victory, 200);
        assert_eq!(game.current_level(), 1);
    }

    #[test]
    fn entering_play_applies_the_held_direction() {
        let mut game = playing(vec![floor_level(|_| {}), floor_level(|_| {})]);
        run_until(&mut game, hold(Movement::Right), Stage::LevelCompleted, 200);
        game.frame(&key()).expect("frame");
        assert_eq!(game.stage, Stage::Start);
        let start_x = game.hero.rect().x;

        // Key pressed with no direction held: the hero must not keep running.
        game.frame(&key()).expect("frame");
        assert_eq!(game.stage, Stage::Playing);
        assert_eq!(game.hero.body.velocity.x, 0.0);
        assert_eq!(game.hero.rect().x, start_x);
    }

    #[test]
    fn resuming_from_pause_applies_the_held_direction() {
        let mut game = playing(vec![floor_level(|_| {})]);
        game.frame(&hold(Movement::Right)).expect("frame");
        let pause = FrameCommands {
            pause: true,
            ..FrameCommands::default()
        };
        game.frame(&pause).expect("frame");
        assert_eq!(game.stage, Stage::Paused);
        let x = game.hero.rect().x;

        game.frame(&pause).expect("frame");
        assert_eq!(game.stage, Stage::Playing);
        assert_eq!(game.hero.body.velocity.x, 0.0);
        assert_eq!(game.hero.rect().x, x);

        let resume_left = FrameCommands {
            pause: true,
            movement: Movement::Left,
            ..FrameCommands::default()
        };
        game.frame(&pause).expect("frame");
        game.frame(&resume_left).expect("frame");
        assert_eq!(game.stage, Stage::Playing);
        assert!(game.hero.rect().x < x);
    }

    #[test]
    fn heart_depletion_resets_level_and_respawns() {
        let mut game = playing(vec![floor_level(|desc| {
            desc.coins.push([5, 7]);
            desc.bears.push([16, 7]);
        })]);
        for _ in 0..40 {
            game.frame(&hold(Movement::Right)).expect("frame");
        }
        assert!(game.level.coins().is_empty());

        game.hero.hearts = 0;
        game.frame(&hold(Movement::None)).expect("frame");
        assert_eq!(game.stage, Stage::Playing);
        assert_eq!(game.hud().lives, 2);
        assert_eq!(game.hud().hearts, 3);
        assert_eq!(game.level.coins().len(), 1, "level was reset");
        assert_eq!(game.hero.rect().position(), game.level.start_position);
    }

    #[test]
    fn last_life_ends_the_game_and_restart_goes_back_to_splash() {
        let mut game = playing(vec![floor_level(|_| {}), floor_level(|_| {})]);
        game.hero.lives = 1;
        game.hero.hearts = 0;
        game.frame(&hold(Movement::None)).expect("frame");
        assert_eq!(game.stage, Stage::GameOver);

        game.frame(&key()).expect("frame");
        assert_eq!(game.stage, Stage::GameOver, "only restart leaves game over");

        let restart = FrameCommands {
            restart: true,
            ..FrameCommands::default()
        };
        game.frame(&restart).expect("frame");
        assert_eq!(game.stage, Stage::Splash);
        assert_eq!(game.current_level(), 0);
        assert_eq!(
            game.hud(),
            HudStats {
                hearts: 3,
                lives: 3,
                score: 0
            }
        );
    }

    #[test]
    fn camera_follows_hero() {
        let game = Game::new(SimConfig::default(), vec![floor_level(|_| {})]).expect("game");
        let offsets = game.layer_offsets();
        assert_eq!(offsets.world.x, 0.0, "hero starts near the left edge");
    }
}

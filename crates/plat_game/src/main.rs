//! Headless platformer driver.
//!
//! Loads a campaign manifest and a replay, then feeds one replay frame per
//! simulation tick into the stage machine:
//!
//!   1. translate the frame's commands into stage changes or character commands
//!   2. step the level once while playing
//!   3. apply level-complete / game-over / respawn transitions
//!
//! By default the replay runs as fast as possible. With `--realtime` the
//! fixed-timestep `FrameClock` paces it at the configured frame rate.

mod camera;
mod campaign;
mod clock;
mod game;
mod level_file;
mod replay;

use std::path::PathBuf;
use std::time::Duration;

use plat_core::FrameEvent;
use serde::Serialize;

use crate::clock::FrameClock;
use crate::game::{Game, HudStats, Stage};
use crate::replay::FrameCommands;

#[derive(Debug, Default, Serialize)]
struct EventTally {
    hurt: u32,
    coins: u32,
    power_ups: u32,
    flags: u32,
    deaths: u32,
}

impl EventTally {
    fn record(&mut self, event: &FrameEvent) {
        match event {
            FrameEvent::HeroHurt { .. } => self.hurt += 1,
            FrameEvent::CoinCollected { .. } => self.coins += 1,
            FrameEvent::PowerUpCollected(_) => self.power_ups += 1,
            FrameEvent::FlagReached => self.flags += 1,
            FrameEvent::HeroDied { .. } => self.deaths += 1,
        }
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    frames: usize,
    stage: Stage,
    level: usize,
    level_count: usize,
    hud: HudStats,
    events: EventTally,
}

fn usage() -> String {
    [
        "Usage: cargo run -p plat_game -- <campaign_json> <replay_json> [--realtime]",
        "Example: cargo run -p plat_game -- assets/campaign.json assets/replays/meadow.json",
    ]
    .join("\n")
}

fn run_frame(
    game: &mut Game,
    commands: &FrameCommands,
    tally: &mut EventTally,
) -> Result<(), String> {
    for event in game.frame(commands)? {
        log::debug!("{event:?}");
        tally.record(&event);
    }
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let realtime = args.iter().skip(1).any(|arg| arg == "--realtime");
    let paths: Vec<&String> = args.iter().skip(1).filter(|arg| *arg != "--realtime").collect();
    if paths.len() != 2 {
        return Err(usage());
    }
    let campaign_path = PathBuf::from(paths[0]);
    let replay_path = PathBuf::from(paths[1]);

    let campaign = campaign::load_campaign_from_path(&campaign_path)?;
    let replay = replay::load_replay_from_path(&replay_path)?;
    let commands = replay.expanded_commands();
    log::info!(
        "Replaying {} frames from {}{}",
        commands.len(),
        replay_path.display(),
        if realtime { " in real time" } else { "" }
    );

    let frame_rate = campaign.config.frame_rate;
    let mut game = Game::new(campaign.config, campaign.levels)?;
    let mut tally = EventTally::default();

    if realtime {
        let mut clock = FrameClock::new(frame_rate);
        let mut pending = commands.iter();
        'replay: loop {
            clock.begin_frame();
            while clock.should_step() {
                let Some(frame) = pending.next() else {
                    break 'replay;
                };
                run_frame(&mut game, frame, &mut tally)?;
            }
            let second_boundary = clock.fixed_step_count % u64::from(frame_rate.max(1)) == 0;
            if clock.steps_this_frame > 0 && second_boundary {
                log::trace!("{:.1} fps", clock.smoothed_fps);
            }
            std::thread::sleep(Duration::from_secs_f64(clock.time_to_next_step()));
        }
        log::info!(
            "Real-time playback: {} steps over {:.2}s",
            clock.fixed_step_count,
            clock.total_time
        );
    } else {
        for frame in &commands {
            run_frame(&mut game, frame, &mut tally)?;
        }
    }

    let offsets = game.layer_offsets();
    log::info!(
        "Replay finished on level {}/{} in stage {:?}, camera x {:.0} \
         (scenery {:.0}, background {:.0})",
        game.current_level() + 1,
        game.level_count(),
        game.stage,
        offsets.world.x,
        offsets.scenery.x,
        offsets.background.x
    );

    let summary = RunSummary {
        frames: commands.len(),
        stage: game.stage,
        level: game.current_level(),
        level_count: game.level_count(),
        hud: game.hud(),
        events: tally,
    };
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| format!("Failed to serialize run summary: {e}"))?;
    println!("{json}");
    Ok(())
}

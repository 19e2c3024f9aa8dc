use sdl2::event::Event;
use std::time::{Duration, Instant};

mod actor;
mod config;
mod enemy;
mod game_state;
mod geo;
mod geometry;
mod global_anim;
mod input_system;
mod level;
mod player;
mod pool;
mod render;

use config::Tuning;
use game_state::{GameState, SCREEN_HEIGHT, SCREEN_WIDTH};
use input_system::translate_key;
use level::LevelBuilder;
use render::render_frame;

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

/// How many frames between window-title telemetry refreshes.
const TITLE_REFRESH_FRAMES: u32 = 30;

/// Target duration of one frame at the 60 FPS cap.
const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Built-in level used when no level file is present: two pits, some
/// platforms, a couple of coin blocks and three enemies. Records are in
/// ascending x order so the stream can pause at the horizon.
fn demo_level() -> Vec<u8> {
    LevelBuilder::new()
        .texture(0, 1)
        .texture(1, 2)
        .texture(2, 3)
        .geo(0, 140, 100, 10, 0, 0)
        .geo(40, 110, 20, 10, 1, 1)
        .geo(70, 80, 20, 10, 1, 1)
        .geo(120, 140, 160, 10, 0, 0)
        .geo(140, 100, 10, 10, 2, 2)
        .enemy(160, 130, 1, 1)
        .geo(300, 140, 200, 10, 0, 0)
        .enemy(330, 130, 1, 1)
        .geo(360, 100, 30, 10, 1, 1)
        .geo(520, 140, 150, 10, 0, 0)
        .geo(560, 100, 10, 10, 2, 2)
        .enemy(580, 130, 1, 1)
        .build()
}

/// Reads a level's byte stream from disk, falling back to the built-in
/// level when the file is missing.
fn level_bytes(level_id: u32) -> Vec<u8> {
    let path = format!("assets/levels/level{}.lvl", level_id);
    match std::fs::read(&path) {
        Ok(bytes) => {
            log::info!("loaded level {} from {}", level_id, path);
            bytes
        }
        Err(err) => {
            log::info!("no level file at {} ({}), using built-in level", path, err);
            demo_level()
        }
    }
}

fn reset_and_load(state: &mut GameState) {
    state.reset();
    let bytes = level_bytes(state.level_id);
    if let Err(err) = state.load_level(&bytes) {
        log::error!("level {} failed to load: {}", state.level_id, err);
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    let tuning = Tuning::load_or_default();

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window = video_subsystem
        .window("Platformer", WINDOW_WIDTH, WINDOW_HEIGHT)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

    // The whole game thinks in a 200x150 logical space; SDL scales it up.
    canvas
        .set_logical_size(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
        .map_err(|e| e.to_string())?;

    let mut event_pump = sdl_context.event_pump()?;

    let mut state = GameState::new(tuning);
    reset_and_load(&mut state);

    let mut last_frame = Instant::now();
    let mut frame_count: u32 = 0;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(sdl2::keyboard::Keycode::Escape),
                    ..
                } => break 'running,
                // Repeats are filtered so held keys do not re-queue edges.
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(signal) = translate_key(keycode, true) {
                        state.queue_input(signal);
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(signal) = translate_key(keycode, false) {
                        state.queue_input(signal);
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let delta = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        state.tick_frame(delta);

        if state.needs_reset {
            reset_and_load(&mut state);
        }

        render_frame(&mut canvas, &state)?;

        frame_count = frame_count.wrapping_add(1);
        if frame_count % TITLE_REFRESH_FRAMES == 0 {
            let title = format!(
                "Platformer | {:.0} fps | sim {:.2} ms",
                state.frame_rate,
                state.sim_time * 1000.0
            );
            canvas
                .window_mut()
                .set_title(&title)
                .map_err(|e| e.to_string())?;
        }

        // Cap framerate to ~60 FPS, accounting for how long the frame took.
        if let Some(remaining) = FRAME_TIME.checked_sub(last_frame.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    Ok(())
}

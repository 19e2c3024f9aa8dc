/// Simulation root: owns the player, the entity pools, the level cursor and
/// the camera, and drives them all once per frame.
use std::time::Instant;

use crate::config::Tuning;
use crate::enemy::{Enemy, EnemyKind};
use crate::geo::{BlockType, Geo};
use crate::geometry::Rect;
use crate::global_anim::GlobalAnimation;
use crate::input_system::InputSignal;
use crate::level::{LevelCursor, LevelError, LevelRecord, StreamStep};
use crate::player::Player;
use crate::pool::Pool;

/// Logical screen size in world units; the window scales this up.
pub const SCREEN_WIDTH: f32 = 200.0;
pub const SCREEN_HEIGHT: f32 = 150.0;

pub const NUM_GEO_SLOTS: usize = 20;
pub const NUM_ENEMY_SLOTS: usize = 5;
pub const NUM_TEXTURE_SLOTS: usize = 20;

/// How far ahead of the camera's left edge the player can get before the
/// camera scrolls to keep up.
const CAMERA_AHEAD: f32 = SCREEN_WIDTH / 3.0 * 2.0;

pub struct GameState {
    pub needs_reset: bool,
    pub level_id: u32,
    pub cursor: LevelCursor,
    pub pending_input: Option<InputSignal>,
    pub player: Player,
    pub geo: Pool<Geo>,
    pub enemies: Pool<Enemy>,
    pub anim: GlobalAnimation,
    pub camera_scroll: f32,
    /// Frame telemetry for the window title: instantaneous frame rate and
    /// the wall-clock cost of the last tick.
    pub frame_rate: f32,
    pub sim_time: f32,
    /// Level-defined texture slots, mapping slot index to a resource id.
    pub texture_bindings: [Option<i16>; NUM_TEXTURE_SLOTS],
    pub tuning: Tuning,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        GameState {
            needs_reset: false,
            level_id: 1,
            cursor: LevelCursor::empty(),
            pending_input: None,
            player: Player::new(&tuning),
            geo: Pool::new(NUM_GEO_SLOTS),
            enemies: Pool::new(NUM_ENEMY_SLOTS),
            anim: GlobalAnimation::new(),
            camera_scroll: 0.0,
            frame_rate: 0.0,
            sim_time: 0.0,
            texture_bindings: [None; NUM_TEXTURE_SLOTS],
            tuning,
        }
    }

    /// Stores an input edge for the next frame. Edges arriving faster than
    /// the frame rate overwrite each other; the last one wins.
    pub fn queue_input(&mut self, signal: InputSignal) {
        self.pending_input = Some(signal);
    }

    /// One frame: input, then either the scripted animation or the normal
    /// simulation, then geo eviction. Eviction runs on every frame, even
    /// while a scripted animation has the simulation suspended, so blocks
    /// never linger behind the camera.
    pub fn tick_frame(&mut self, delta: f32) {
        let input = self.pending_input.take();
        self.player.handle_input(input);

        self.frame_rate = 1.0 / delta;
        let tick_start = Instant::now();

        if self.anim.is_active() {
            if self.anim.tick(&mut self.player, self.tuning.gravity, delta) {
                self.needs_reset = true;
            }
        } else {
            self.tick_simulation(delta);
        }

        self.evict_offscreen_geo();

        self.sim_time = tick_start.elapsed().as_secs_f32();
    }

    /// Normal simulation order: player, enemies (removing last frame's dead
    /// at the head of their own slot's turn), block animations, camera, then
    /// streaming in newly reachable level entities.
    fn tick_simulation(&mut self, delta: f32) {
        self.player.tick(
            &mut self.geo,
            &mut self.enemies,
            &mut self.anim,
            &self.tuning,
            delta,
        );

        self.tick_enemies(delta);

        for (_, block) in self.geo.iter_mut() {
            block.tick_anim(delta);
        }

        if self.player.actor.x > self.camera_scroll + CAMERA_AHEAD {
            self.camera_scroll = self.player.actor.x - CAMERA_AHEAD;
        }
        if self.player.actor.x < self.camera_scroll {
            self.player.actor.x = self.camera_scroll;
        }

        self.stream_level_entities();
    }

    fn tick_enemies(&mut self, delta: f32) {
        let GameState {
            player,
            geo,
            enemies,
            tuning,
            ..
        } = self;

        for index in 0..enemies.capacity() {
            let is_dead = match enemies.get(index) {
                Some(enemy) => enemy.is_dead,
                None => continue,
            };

            if is_dead {
                enemies.deallocate(index);
                continue;
            }

            if let Some(enemy) = enemies.get_mut(index) {
                enemy.tick(geo, player, tuning, delta);
            }
        }
    }

    fn evict_offscreen_geo(&mut self) {
        for index in 0..self.geo.capacity() {
            let evict = match self.geo.get(index) {
                Some(block) => block.rect.right < self.camera_scroll,
                None => false,
            };
            if evict {
                self.geo.deallocate(index);
            }
        }
    }

    /// Consumes level records up to the streaming horizon, one screen width
    /// past the camera. A malformed stream is logged once and the cursor
    /// stops producing; the already-spawned world keeps running.
    fn stream_level_entities(&mut self) {
        let horizon = self.camera_scroll + SCREEN_WIDTH;

        loop {
            match self.cursor.next_record(horizon) {
                Ok(StreamStep::Record(record)) => self.spawn_record(record),
                Ok(StreamStep::Horizon) | Ok(StreamStep::End) => break,
                Err(err) => {
                    log::warn!("level {} stream halted: {}", self.level_id, err);
                    break;
                }
            }
        }
    }

    fn spawn_record(&mut self, record: LevelRecord) {
        match record {
            LevelRecord::Geo {
                left,
                top,
                width,
                height,
                texture_id,
                block_type_token,
            } => {
                let rect = Rect::from_size(
                    f32::from(left),
                    f32::from(top),
                    f32::from(width),
                    f32::from(height),
                );
                let block = Geo::new(rect, texture_id, BlockType::from_token(block_type_token));
                if self.geo.allocate(block).is_none() {
                    log::warn!("geo pool exhausted, dropping block at x {}", left);
                }
            }
            LevelRecord::Enemy {
                x,
                y,
                kind_token,
                texture_id,
            } => {
                let Some(kind) = EnemyKind::from_token(kind_token) else {
                    log::warn!("unknown enemy kind {} at x {}, skipping", kind_token, x);
                    return;
                };
                let enemy = Enemy::new(f32::from(x), f32::from(y), kind, texture_id, &self.tuning);
                if self.enemies.allocate(enemy).is_none() {
                    log::warn!("enemy pool exhausted, dropping enemy at x {}", x);
                }
            }
            LevelRecord::Texture { slot, resource } => {
                let index = slot as i32;
                if index < 0 || index >= NUM_TEXTURE_SLOTS as i32 {
                    log::warn!("texture slot {} out of range, ignoring", slot);
                    return;
                }
                self.texture_bindings[index as usize] = Some(resource);
            }
        }
    }

    /// Returns the game to its pre-level state. Texture bindings survive a
    /// reset; the next level's records overwrite them as needed.
    pub fn reset(&mut self) {
        self.needs_reset = false;
        self.pending_input = None;
        self.player.reset(&self.tuning);
        self.geo.clear();
        self.enemies.clear();
        self.anim.deactivate();
        self.camera_scroll = 0.0;
        self.level_id = 1;
        self.cursor = LevelCursor::empty();
    }

    /// Points the cursor at a new level's data and spawns everything within
    /// the initial horizon.
    pub fn load_level(&mut self, bytes: &[u8]) -> Result<(), LevelError> {
        self.cursor = LevelCursor::from_bytes(bytes)?;
        self.stream_level_entities();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Actions;
    use crate::level::LevelBuilder;

    fn state_with_level(bytes: &[u8]) -> GameState {
        let mut state = GameState::new(Tuning::default());
        state.load_level(bytes).unwrap();
        state
    }

    /// A flat floor long enough to walk on, spanning x 0..300 at y 140.
    fn floor() -> LevelBuilder {
        LevelBuilder::new()
            .geo(0, 140, 150, 10, 0, 0)
            .geo(150, 140, 150, 10, 0, 0)
    }

    #[test]
    fn test_load_level_spawns_entities_within_horizon() {
        let bytes = floor()
            .enemy(100, 130, 1, 1)
            .geo(500, 140, 100, 10, 0, 0) // beyond the first horizon
            .build();
        let mut state = state_with_level(&bytes);

        assert_eq!(state.geo.len(), 2);
        assert_eq!(state.enemies.len(), 1);

        // Scrolling the camera far enough pulls in the distant block.
        state.camera_scroll = 320.0;
        state.stream_level_entities();
        assert_eq!(state.geo.len(), 3);
    }

    #[test]
    fn test_texture_records_bind_slots() {
        let bytes = LevelBuilder::new().texture(3, 42).build();
        let state = state_with_level(&bytes);

        assert_eq!(state.texture_bindings[3], Some(42));
        assert_eq!(state.texture_bindings[0], None);
    }

    #[test]
    fn test_out_of_range_texture_slot_is_ignored() {
        let bytes = LevelBuilder::new()
            .texture(25, 7)
            .texture(-1, 7)
            .geo(0, 140, 150, 10, 0, 0)
            .build();
        let state = state_with_level(&bytes);

        // The bad bindings are dropped without touching the table, and the
        // stream keeps decoding past them.
        assert!(state.texture_bindings.iter().all(|slot| slot.is_none()));
        assert_eq!(state.geo.len(), 1);
    }

    #[test]
    fn test_bad_stream_leaves_spawned_world_running() {
        let mut bytes = floor().build();
        // Corrupt the end marker.
        let len = bytes.len();
        bytes[len - 2..].copy_from_slice(&9i16.to_le_bytes());

        let mut state = GameState::new(Tuning::default());
        state.load_level(&bytes).unwrap();

        // Both floor slabs made it in before the stream halted.
        assert_eq!(state.geo.len(), 2);

        // Subsequent frames keep ticking without panicking.
        state.tick_frame(0.016);
        assert_eq!(state.geo.len(), 2);
    }

    #[test]
    fn test_camera_follows_and_walls_off_backtracking() {
        let mut state = state_with_level(&floor().build());
        state.player.actor.y = 120.0; // standing on the floor
        state.player.actor.actions.insert(Actions::MOVE_RIGHT);

        // Run right well past the scroll-ahead threshold.
        for _ in 0..40 {
            state.tick_frame(0.05);
        }
        assert!(state.camera_scroll > 0.0);
        let scroll = state.camera_scroll;
        assert!((state.player.actor.x - (scroll + CAMERA_AHEAD)).abs() < 1.0);

        // Turning around stops at the camera's left edge.
        state.player.actor.actions = Actions::NONE;
        state.player.actor.actions.insert(Actions::MOVE_LEFT);
        for _ in 0..200 {
            state.tick_frame(0.05);
        }
        assert_eq!(state.player.actor.x, state.camera_scroll);
        // The camera itself never scrolls backwards.
        assert!(state.camera_scroll >= scroll);
    }

    #[test]
    fn test_offscreen_geo_is_evicted() {
        let mut state = state_with_level(&floor().build());

        state.camera_scroll = 160.0;
        state.evict_offscreen_geo();

        // The first slab (right edge 150) is gone, the second remains.
        assert_eq!(state.geo.len(), 1);
        let (_, remaining) = state.geo.iter().next().unwrap();
        assert_eq!(remaining.rect.left, 150.0);
    }

    #[test]
    fn test_eviction_runs_during_death_animation() {
        let mut state = state_with_level(&floor().build());
        state.anim.activate(crate::global_anim::AnimationKind::Death);
        state.camera_scroll = 400.0;

        state.tick_frame(0.016);

        assert!(state.geo.is_empty());
    }

    #[test]
    fn test_stomped_enemy_is_removed_same_pass() {
        let bytes = floor().enemy(20, 130, 1, 1).build();
        let mut state = state_with_level(&bytes);

        // Drop the player squarely onto the enemy.
        state.player.actor.x = 20.0;
        state.player.actor.y = 105.0;
        state.player.actor.falling = true;
        state.player.actor.y_vel = 100.0;

        state.tick_frame(0.05);

        // The player's tick marks it dead, the enemy pass reaps it.
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.actor.y_vel, state.tuning.jump_impulse);
    }

    #[test]
    fn test_self_dead_enemy_lingers_one_pass() {
        let bytes = floor().enemy(20, 130, 1, 1).build();
        let mut state = state_with_level(&bytes);
        state.player.actor.x = 190.0; // out of the enemy's way

        // Mark the enemy dead after its own tick would have run.
        for (_, enemy) in state.enemies.iter_mut() {
            enemy.is_dead = true;
        }

        // Still present for one frame (it renders once as a corpse), gone on
        // the next pass.
        assert_eq!(state.enemies.len(), 1);
        state.tick_frame(0.016);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_death_animation_suspends_simulation_and_requests_reset() {
        let mut state = state_with_level(&floor().enemy(60, 130, 1, 1).build());
        state.player.actor.y = 120.0;
        state.anim.activate(crate::global_anim::AnimationKind::Death);

        let enemy_x_before = {
            let (_, enemy) = state.enemies.iter().next().unwrap();
            enemy.actor.x
        };

        // Enemies freeze while the animation runs.
        state.tick_frame(0.1);
        let (_, enemy) = state.enemies.iter().next().unwrap();
        assert_eq!(enemy.actor.x, enemy_x_before);

        // Run the script to completion.
        for _ in 0..40 {
            state.tick_frame(0.1);
        }
        assert!(state.needs_reset);
    }

    #[test]
    fn test_reset_restores_initial_state_but_keeps_textures() {
        let bytes = LevelBuilder::new()
            .texture(0, 7)
            .geo(0, 140, 150, 10, 0, 0)
            .enemy(100, 130, 1, 0)
            .build();
        let mut state = state_with_level(&bytes);
        state.camera_scroll = 50.0;
        state.needs_reset = true;
        state.player.is_dead = true;

        state.reset();

        assert!(!state.needs_reset);
        assert!(!state.player.is_dead);
        assert!(state.geo.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.camera_scroll, 0.0);
        assert!(!state.anim.is_active());
        assert_eq!(state.texture_bindings[0], Some(7));
    }

    #[test]
    fn test_geo_pool_exhaustion_drops_excess_blocks() {
        let mut builder = LevelBuilder::new();
        for i in 0..(NUM_GEO_SLOTS as i16 + 5) {
            builder = builder.geo(i, 140, 1, 10, 0, 0);
        }
        let state = state_with_level(&builder.build());

        assert_eq!(state.geo.len(), NUM_GEO_SLOTS);
    }

    #[test]
    fn test_unknown_enemy_kind_is_skipped() {
        let bytes = floor().enemy(50, 130, 9, 0).build();
        let state = state_with_level(&bytes);

        assert!(state.enemies.is_empty());
        assert_eq!(state.geo.len(), 2);
    }
}

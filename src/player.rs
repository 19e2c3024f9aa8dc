/// The player: input-driven actor plus enemy-contact rules and the jump.
use crate::actor::{Actions, Actor, SpriteOffsets};
use crate::config::Tuning;
use crate::enemy::Enemy;
use crate::game_state::SCREEN_HEIGHT;
use crate::geometry::{Movement, intersect};
use crate::global_anim::{AnimationKind, GlobalAnimation};
use crate::input_system::InputSignal;
use crate::pool::Pool;

pub const PLAYER_WIDTH: f32 = 10.0;
pub const PLAYER_HEIGHT: f32 = 20.0;

const SPRITE_OFFSETS: SpriteOffsets = SpriteOffsets {
    nominal: 0.0,
    run_a: 10.0,
    run_b: 20.0,
    airborne: 30.0,
};

pub struct Player {
    pub actor: Actor,
    pub is_dead: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Player {
            actor: Actor::new(
                0.0,
                0.0,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
                tuning.player_run_speed,
            ),
            is_dead: false,
        }
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Player::new(tuning);
    }

    /// Applies one pending input edge to the action flags. Up/Down/Special
    /// are accepted but unused.
    pub fn handle_input(&mut self, input: Option<InputSignal>) {
        let Some(input) = input else {
            return;
        };

        match input {
            InputSignal::LeftDown => self.actor.actions.insert(Actions::MOVE_LEFT),
            InputSignal::LeftUp => self.actor.actions.remove(Actions::MOVE_LEFT),
            InputSignal::RightDown => self.actor.actions.insert(Actions::MOVE_RIGHT),
            InputSignal::RightUp => self.actor.actions.remove(Actions::MOVE_RIGHT),
            InputSignal::JumpDown => self.actor.actions.insert(Actions::JUMP),
            InputSignal::JumpUp => self.actor.actions.remove(Actions::JUMP),
            InputSignal::UpDown
            | InputSignal::UpUp
            | InputSignal::DownDown
            | InputSignal::DownUp
            | InputSignal::SpecialDown
            | InputSignal::SpecialUp => {}
        }
    }

    /// One simulation tick: move, animate, resolve collisions, then the jump
    /// check (a fresh stomp also triggers the jump impulse as a bounce), the
    /// bottom-of-screen dead zone, and finally the death animation kickoff.
    pub fn tick(
        &mut self,
        geo: &mut Pool<crate::geo::Geo>,
        enemies: &mut Pool<Enemy>,
        anim: &mut GlobalAnimation,
        tuning: &Tuning,
        delta: f32,
    ) {
        let movement = self.actor.update_movement(tuning.gravity, delta);

        self.actor.tick_anim(delta, SPRITE_OFFSETS);

        let got_kill = self.resolve_collisions(geo, enemies, movement);

        self.actor.check_falling(geo);

        if (!self.actor.falling && self.actor.actions.has_jump()) || got_kill {
            self.actor.y_vel = tuning.jump_impulse;
            self.actor.falling = true;
        }

        if self.actor.y > SCREEN_HEIGHT {
            self.is_dead = true;
        }

        if self.is_dead {
            anim.activate(AnimationKind::Death);
        }
    }

    /// Resolves against level blocks first, then applies the enemy-contact
    /// rules from the corrected position: any sideways contact is lethal to
    /// the player; an overlap entered from above kills the enemy instead and
    /// reports a stomp; any other overlap is lethal to the player. The
    /// player's rectangle is not refreshed between enemies, and enemies
    /// killed earlier in the walk still take part.
    fn resolve_collisions(
        &mut self,
        geo: &mut Pool<crate::geo::Geo>,
        enemies: &mut Pool<Enemy>,
        movement: Movement,
    ) -> bool {
        self.actor.resolve_geo_collisions(geo, movement);

        let rect = self.actor.rect();
        let mut got_kill = false;

        for (_, enemy) in enemies.iter_mut() {
            let Some(contact) = intersect(&rect, &enemy.actor.rect(), movement) else {
                continue;
            };

            if contact.horizontal != 0.0 {
                self.is_dead = true;
            }

            if contact.vertical < 0.0 {
                enemy.is_dead = true;
                got_kill = true;
            } else {
                self.is_dead = true;
            }
        }

        got_kill
    }
}

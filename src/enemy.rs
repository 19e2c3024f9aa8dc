/// Patrolling enemies. They walk until a wall turns them around and kill the
/// player on any contact other than a stomp from above.
use crate::actor::{Actions, Actor, SpriteOffsets};
use crate::config::Tuning;
use crate::game_state::SCREEN_HEIGHT;
use crate::geo::Geo;
use crate::geometry::{Movement, intersect};
use crate::player::Player;
use crate::pool::Pool;

pub const ENEMY_WIDTH: f32 = 10.0;
pub const ENEMY_HEIGHT: f32 = 10.0;

const SPRITE_OFFSETS: SpriteOffsets = SpriteOffsets {
    nominal: 0.0,
    run_a: 0.0,
    run_b: 10.0,
    airborne: 0.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Cat,
}

impl EnemyKind {
    /// Maps a level-data token to an enemy kind. Unknown tokens are rejected
    /// so the loader can skip the record.
    pub fn from_token(token: i16) -> Option<Self> {
        match token {
            1 => Some(EnemyKind::Cat),
            _ => None,
        }
    }
}

pub struct Enemy {
    pub actor: Actor,
    pub is_dead: bool,
    pub kind: EnemyKind,
    pub texture_id: i16,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind, texture_id: i16, tuning: &Tuning) -> Self {
        let mut actor = Actor::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT, tuning.enemy_run_speed);
        actor.actions = Actions::MOVE_LEFT;
        Enemy {
            actor,
            is_dead: false,
            kind,
            texture_id,
        }
    }

    /// One simulation tick: patrol movement, collisions (walls reverse the
    /// patrol, player contact applies the stomp rules), animation, ledge
    /// check, and the bottom-of-screen dead zone.
    pub fn tick(&mut self, geo: &mut Pool<Geo>, player: &mut Player, tuning: &Tuning, delta: f32) {
        let movement = self.actor.update_movement(tuning.gravity, delta);

        self.resolve_collisions(geo, player, movement);

        self.actor.tick_anim(delta, SPRITE_OFFSETS);

        self.actor.check_falling(geo);

        if self.actor.y > SCREEN_HEIGHT {
            self.is_dead = true;
        }
    }

    /// Wall contact replaces the whole action set with the opposite patrol
    /// direction. Player contact: sideways or from above kills the player,
    /// anything else means the player came down on us and we die.
    fn resolve_collisions(&mut self, geo: &mut Pool<Geo>, player: &mut Player, movement: Movement) {
        let had_horizontal = self.actor.resolve_geo_collisions(geo, movement);
        if had_horizontal {
            if self.actor.actions.has_move_left() {
                self.actor.actions = Actions::MOVE_RIGHT;
            } else if self.actor.actions.has_move_right() {
                self.actor.actions = Actions::MOVE_LEFT;
            }
        }

        let Some(contact) = intersect(&self.actor.rect(), &player.actor.rect(), movement) else {
            return;
        };

        if contact.horizontal != 0.0 {
            player.is_dead = true;
        } else if contact.vertical < 0.0 {
            player.is_dead = true;
        } else {
            self.is_dead = true;
        }
    }
}

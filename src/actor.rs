/// Kinematics shared by the player and enemies: action flags, explicit Euler
/// integration, sequential collision resolution against level blocks, and
/// ledge detection.
use crate::geo::Geo;
use crate::geometry::{Movement, Rect, intersect};
use crate::pool::Pool;

/// How far below the feet the ledge probe reaches.
const FALLING_PROBE_OFFSET: f32 = 0.1;
/// Gravity divisor while the jump action is held, for variable jump height.
const HELD_JUMP_GRAVITY_DIVISOR: f32 = 2.5;
/// Alternation rate of the two run-cycle sprites.
const RUN_ANIM_RATE: f32 = 6.0;

/// Actions currently requested of an actor. For the player these track input
/// edges; for enemies the patrol AI writes them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Actions(u8);

impl Actions {
    pub const NONE: Actions = Actions(0);
    pub const MOVE_LEFT: Actions = Actions(0x1);
    pub const MOVE_RIGHT: Actions = Actions(0x2);
    pub const JUMP: Actions = Actions(0x4);

    pub fn insert(&mut self, other: Actions) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Actions) {
        self.0 &= !other.0;
    }

    pub fn has_move_left(self) -> bool {
        self.0 & Self::MOVE_LEFT.0 != 0
    }

    pub fn has_move_right(self) -> bool {
        self.0 & Self::MOVE_RIGHT.0 != 0
    }

    pub fn has_jump(self) -> bool {
        self.0 & Self::JUMP.0 != 0
    }

    pub fn is_moving_horizontally(self) -> bool {
        self.has_move_left() || self.has_move_right()
    }
}

/// Sprite-sheet horizontal offsets for an actor's animation states. Purely
/// presentational; the renderer reads the selected offset each frame.
#[derive(Debug, Clone, Copy)]
pub struct SpriteOffsets {
    pub nominal: f32,
    pub run_a: f32,
    pub run_b: f32,
    pub airborne: f32,
}

pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub y_vel: f32,
    pub falling: bool,
    pub actions: Actions,
    pub run_speed: f32,
    anim_time: f32,
    pub sprite_offset: f32,
    pub sprite_flip: bool,
}

impl Actor {
    pub fn new(x: f32, y: f32, width: f32, height: f32, run_speed: f32) -> Self {
        Actor {
            x,
            y,
            width,
            height,
            y_vel: 0.0,
            falling: false,
            actions: Actions::NONE,
            run_speed,
            anim_time: 0.0,
            sprite_offset: 0.0,
            sprite_flip: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_size(self.x, self.y, self.width, self.height)
    }

    /// Thin sensor just below the feet, used by the ledge check.
    fn falling_probe_rect(&self) -> Rect {
        self.rect().offset_y(FALLING_PROBE_OFFSET)
    }

    /// Integrates one tick of movement and returns the directions actually
    /// travelled, which the collision resolver uses to pick adjustment axes.
    ///
    /// Horizontal position moves directly from the run speed (left wins when
    /// both directions are requested). Vertical velocity accumulates gravity
    /// while falling, reduced while the jump action is held so that holding
    /// the button jumps higher, then position integrates from the updated
    /// velocity.
    pub fn update_movement(&mut self, gravity: f32, delta: f32) -> Movement {
        let mut movement = Movement::NONE;

        if self.actions.has_move_left() {
            self.x -= self.run_speed * delta;
            movement |= Movement::LEFT;
        } else if self.actions.has_move_right() {
            self.x += self.run_speed * delta;
            movement |= Movement::RIGHT;
        }

        if self.falling {
            let mut actual_gravity = gravity;
            if self.actions.has_jump() {
                actual_gravity /= HELD_JUMP_GRAVITY_DIVISOR;
            }
            self.y_vel += actual_gravity * delta;
        }

        if self.y_vel != 0.0 {
            movement |= if self.y_vel > 0.0 {
                Movement::DOWN
            } else {
                Movement::UP
            };
        }

        self.y += self.y_vel * delta;

        movement
    }

    /// Pushes the actor out of every overlapping block, in slot order.
    ///
    /// Resolution is sequential: the actor's rectangle is recomputed after
    /// each adjustment so later blocks see the corrected position. A downward
    /// correction is a landing (grounds the actor and kills vertical
    /// velocity); an upward correction is a head bump (kills velocity and
    /// bumps the block). Returns whether any purely horizontal correction
    /// occurred, which enemies use to turn around.
    pub fn resolve_geo_collisions(&mut self, geo: &mut Pool<Geo>, movement: Movement) -> bool {
        let mut rect = self.rect();
        let mut had_horizontal = false;

        for (_, block) in geo.iter_mut() {
            let Some(contact) = intersect(&rect, &block.collision_rect(), movement) else {
                continue;
            };

            self.x += contact.horizontal;
            self.y += contact.vertical;
            rect = self.rect();

            if contact.vertical < 0.0 {
                self.falling = false;
                self.y_vel = 0.0;
            } else if contact.vertical > 0.0 {
                self.y_vel = 0.0;
                block.bump();
            } else if contact.horizontal != 0.0 {
                had_horizontal = true;
            }
        }

        had_horizontal
    }

    /// Ledge detection: a grounded actor with no block under its feet starts
    /// falling. Only runs while grounded; landing is detected by the
    /// collision resolver instead.
    pub fn check_falling(&mut self, geo: &Pool<Geo>) {
        if self.falling {
            return;
        }

        let probe = self.falling_probe_rect();
        let supported = geo.iter().any(|(_, block)| {
            intersect(&probe, &block.collision_rect(), Movement::DOWN).is_some()
        });

        if !supported {
            self.falling = true;
        }
    }

    /// Advances the sprite phase: airborne frame while falling, two-frame run
    /// cycle while moving, nominal frame otherwise. Flipped sprites mirror
    /// their sheet offset around the cell width.
    pub fn tick_anim(&mut self, delta: f32, offsets: SpriteOffsets) {
        self.anim_time += delta;
        while self.anim_time > 100.0 {
            self.anim_time -= 100.0;
        }

        if self.falling {
            self.sprite_offset = offsets.airborne;
        } else if self.actions.is_moving_horizontally() {
            self.sprite_offset = if (self.anim_time * RUN_ANIM_RATE) as i32 % 2 == 1 {
                offsets.run_a
            } else {
                offsets.run_b
            };
        } else {
            self.sprite_offset = offsets.nominal;
        }

        if self.actions.is_moving_horizontally() {
            self.sprite_flip = self.actions.has_move_left();
        }

        if self.sprite_flip {
            self.sprite_offset = -self.sprite_offset - 10.0;
        }
    }
}

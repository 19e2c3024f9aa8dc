/// Scripted full-override animations.
///
/// While one of these is active the normal simulation step does not run at
/// all; the animation drives the player's vertical motion directly from
/// elapsed time. Only the death sequence exists today: a short freeze, an
/// upward hop, then a fall off the bottom of the screen, ending in a request
/// to reset the whole game.
use crate::player::Player;

/// Seconds of freeze at the start of the death sequence.
const DEATH_FREEZE_END: f32 = 0.5;
/// End of the upward-hop band.
const DEATH_HOP_END: f32 = 1.0;
/// End of the fall band; past this the game resets.
const DEATH_FALL_END: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Death,
}

pub struct GlobalAnimation {
    kind: Option<AnimationKind>,
    pub elapsed: f32,
}

impl GlobalAnimation {
    pub fn new() -> Self {
        GlobalAnimation {
            kind: None,
            elapsed: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    pub fn activate(&mut self, kind: AnimationKind) {
        self.kind = Some(kind);
        self.elapsed = 0.0;
    }

    pub fn deactivate(&mut self) {
        self.kind = None;
        self.elapsed = 0.0;
    }

    /// Advances the active animation one tick. Returns true when the script
    /// has finished and the game should fully reset.
    pub fn tick(&mut self, player: &mut Player, gravity: f32, delta: f32) -> bool {
        self.elapsed += delta;

        match self.kind {
            Some(AnimationKind::Death) => self.tick_death(player, gravity, delta),
            None => false,
        }
    }

    fn tick_death(&mut self, player: &mut Player, gravity: f32, delta: f32) -> bool {
        let mut finished = false;

        if self.elapsed < DEATH_FREEZE_END {
            player.actor.y_vel = 0.0;
        } else if self.elapsed < DEATH_HOP_END {
            player.actor.y_vel -= gravity / 2.0 * delta;
        } else if self.elapsed < DEATH_FALL_END {
            player.actor.y_vel += gravity / 2.0 * delta;
        } else {
            finished = true;
        }

        // Position integrates from velocity in every band, including the
        // freeze (where the velocity is forced to zero).
        player.actor.y += player.actor.y_vel * delta;

        finished
    }
}

impl Default for GlobalAnimation {
    fn default() -> Self {
        Self::new()
    }
}

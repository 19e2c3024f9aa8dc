/// Static level blocks: ground, bricks and coin blocks.
///
/// Blocks never move. A coin block carries a one-shot gameplay state: the
/// first time an actor bumps it from below it empties, pays out its bump
/// animation, and thereafter ignores further bumps.
use crate::geometry::Rect;

const BUMP_TIME: f32 = 0.2;
const BUMP_SIZE: f32 = -5.0;
const QUESTION_CYCLE_RATE: f32 = 2.5;

/// What kind of block this is, as encoded in level data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    None,
    Breakable,
    Coin,
}

impl BlockType {
    /// Maps a level-data token to a block type. Unknown tokens fall back to
    /// a plain block.
    pub fn from_token(token: i16) -> Self {
        match token {
            1 => BlockType::Breakable,
            2 => BlockType::Coin,
            _ => BlockType::None,
        }
    }
}

/// Gameplay-visible state of a block. Only coin blocks ever leave `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameplayState {
    None,
    HasCoin,
    Empty,
}

/// Which sprite animation the block is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimState {
    None,
    CycleQuestion,
    Bumped,
}

pub struct Geo {
    pub rect: Rect,
    pub texture_id: i16,
    pub block_type: BlockType,
    pub gameplay_state: GameplayState,
    pub anim_state: AnimState,
    anim_time: f32,
    pub anim_y_offset: f32,
    pub sprite_offset: f32,
}

impl Geo {
    pub fn new(rect: Rect, texture_id: i16, block_type: BlockType) -> Self {
        let (gameplay_state, anim_state) = match block_type {
            BlockType::Coin => (GameplayState::HasCoin, AnimState::CycleQuestion),
            _ => (GameplayState::None, AnimState::None),
        };

        Geo {
            rect,
            texture_id,
            block_type,
            gameplay_state,
            anim_state,
            anim_time: 0.0,
            anim_y_offset: 0.0,
            sprite_offset: 0.0,
        }
    }

    /// Rectangle used for collision. The bump animation never moves the
    /// collision shape, only the rendered one.
    pub fn collision_rect(&self) -> Rect {
        self.rect
    }

    /// Rectangle to draw, including the transient bump offset.
    pub fn render_rect(&self) -> Rect {
        self.rect.offset_y(self.anim_y_offset)
    }

    /// Reaction to being hit from below. Only a coin block that still holds
    /// its coin reacts; everything else (including an already-emptied coin
    /// block) is a no-op.
    pub fn bump(&mut self) {
        if self.block_type == BlockType::Coin && self.gameplay_state == GameplayState::HasCoin {
            self.gameplay_state = GameplayState::Empty;
            self.anim_state = AnimState::Bumped;
            self.anim_time = 0.0;
            self.sprite_offset = 30.0;
        }
    }

    pub fn tick_anim(&mut self, delta: f32) {
        self.anim_time += delta;

        match self.anim_state {
            AnimState::Bumped => {
                // Rise for the first half of the bump, settle back for the
                // second half.
                if self.anim_time < BUMP_TIME / 2.0 {
                    self.anim_y_offset = self.anim_time * (BUMP_SIZE / (BUMP_TIME / 2.0));
                } else if self.anim_time < BUMP_TIME {
                    self.anim_y_offset =
                        (BUMP_TIME - self.anim_time) * (BUMP_SIZE / (BUMP_TIME / 2.0));
                } else {
                    self.anim_state = AnimState::None;
                    self.anim_y_offset = 0.0;
                }
            }
            AnimState::CycleQuestion => {
                self.sprite_offset = match (self.anim_time * QUESTION_CYCLE_RATE) as i32 % 3 {
                    1 => 10.0,
                    2 => 20.0,
                    _ => 0.0,
                };
            }
            AnimState::None => {}
        }
    }
}

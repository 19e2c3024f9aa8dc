/// Streaming level decoding.
///
/// A level is a flat stream of little-endian 16-bit integers: tagged records
/// laid out left to right in world order, closed by an end marker. The game
/// does not decode the whole level up front; it consumes records lazily as
/// the camera approaches them, so a cursor has to support peeking at the next
/// record's position without consuming it.
use std::error::Error;
use std::fmt;

pub const TAG_END: i16 = 0;
pub const TAG_GEO: i16 = 1;
pub const TAG_ENEMY: i16 = 2;
pub const TAG_TEXTURE: i16 = 3;

/// Token counts per record, including the tag.
const GEO_RECORD_LEN: usize = 7;
const ENEMY_RECORD_LEN: usize = 5;
const TEXTURE_RECORD_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The raw byte stream does not split evenly into 16-bit tokens.
    OddByteCount { len: usize },
    /// A record ran past the end of the stream with no end marker.
    UnexpectedEnd { offset: usize },
    /// A record tag outside the known set.
    UnknownTag { tag: i16, offset: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::OddByteCount { len } => {
                write!(f, "level data has odd byte count {}", len)
            }
            LevelError::UnexpectedEnd { offset } => {
                write!(f, "level data ended mid-record at token {}", offset)
            }
            LevelError::UnknownTag { tag, offset } => {
                write!(f, "unknown record tag {} at token {}", tag, offset)
            }
        }
    }
}

impl Error for LevelError {}

/// A decoded record, still carrying raw tokens where the meaning belongs to
/// another module (block and enemy kinds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelRecord {
    Geo {
        left: i16,
        top: i16,
        width: i16,
        height: i16,
        texture_id: i16,
        block_type_token: i16,
    },
    Enemy {
        x: i16,
        y: i16,
        kind_token: i16,
        texture_id: i16,
    },
    Texture {
        slot: i16,
        resource: i16,
    },
}

/// Outcome of one streaming step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamStep {
    /// A record at or behind the horizon; it has been consumed.
    Record(LevelRecord),
    /// The next record lies beyond the horizon and was left in place.
    Horizon,
    /// The end marker (or the end of the stream) was reached.
    End,
}

/// Read cursor over a level's token stream.
///
/// The cursor fails closed: any structural error poisons it, and a poisoned
/// cursor yields `End` forever. Callers log the error once and the level
/// simply stops producing entities.
#[derive(Debug)]
pub struct LevelCursor {
    tokens: Vec<i16>,
    pos: usize,
    poisoned: bool,
}

impl LevelCursor {
    /// A cursor with nothing to yield, used before any level is loaded.
    pub fn empty() -> Self {
        LevelCursor {
            tokens: Vec::new(),
            pos: 0,
            poisoned: true,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LevelError> {
        if bytes.len() % 2 != 0 {
            return Err(LevelError::OddByteCount { len: bytes.len() });
        }

        let tokens = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(LevelCursor {
            tokens,
            pos: 0,
            poisoned: false,
        })
    }

    fn peek(&self, ahead: usize) -> Option<i16> {
        self.tokens.get(self.pos + ahead).copied()
    }

    fn take(&mut self) -> Result<i16, LevelError> {
        let token = self
            .peek(0)
            .ok_or(LevelError::UnexpectedEnd { offset: self.pos })?;
        self.pos += 1;
        Ok(token)
    }

    fn take_record(&mut self, len: usize) -> Result<Vec<i16>, LevelError> {
        let mut tokens = Vec::with_capacity(len);
        for _ in 0..len {
            tokens.push(self.take()?);
        }
        Ok(tokens)
    }

    /// Decodes the next record if it lies within the horizon.
    ///
    /// Positioned records (blocks and enemies) carry their x coordinate right
    /// after the tag; if it is beyond `horizon` the record is not consumed
    /// and the step reports `Horizon`. Texture records have no position and
    /// always decode. Running out of tokens without an end marker, or hitting
    /// an unknown tag, is an error and poisons the cursor.
    pub fn next_record(&mut self, horizon: f32) -> Result<StreamStep, LevelError> {
        if self.poisoned {
            return Ok(StreamStep::End);
        }

        let step = self.next_record_inner(horizon);
        if step.is_err() {
            self.poisoned = true;
        }
        step
    }

    fn next_record_inner(&mut self, horizon: f32) -> Result<StreamStep, LevelError> {
        let Some(tag) = self.peek(0) else {
            return Err(LevelError::UnexpectedEnd { offset: self.pos });
        };

        match tag {
            TAG_END => Ok(StreamStep::End),
            TAG_GEO | TAG_ENEMY => {
                let x = self
                    .peek(1)
                    .ok_or(LevelError::UnexpectedEnd { offset: self.pos + 1 })?;
                if f32::from(x) > horizon {
                    return Ok(StreamStep::Horizon);
                }

                if tag == TAG_GEO {
                    let t = self.take_record(GEO_RECORD_LEN)?;
                    Ok(StreamStep::Record(LevelRecord::Geo {
                        left: t[1],
                        top: t[2],
                        width: t[3],
                        height: t[4],
                        texture_id: t[5],
                        block_type_token: t[6],
                    }))
                } else {
                    let t = self.take_record(ENEMY_RECORD_LEN)?;
                    Ok(StreamStep::Record(LevelRecord::Enemy {
                        x: t[1],
                        y: t[2],
                        kind_token: t[3],
                        texture_id: t[4],
                    }))
                }
            }
            TAG_TEXTURE => {
                let t = self.take_record(TEXTURE_RECORD_LEN)?;
                Ok(StreamStep::Record(LevelRecord::Texture {
                    slot: t[1],
                    resource: t[2],
                }))
            }
            tag => Err(LevelError::UnknownTag {
                tag,
                offset: self.pos,
            }),
        }
    }
}

/// Chainable encoder for level streams, used by tests and the built-in
/// level. Appends the end marker when finalized.
pub struct LevelBuilder {
    tokens: Vec<i16>,
}

impl LevelBuilder {
    pub fn new() -> Self {
        LevelBuilder { tokens: Vec::new() }
    }

    pub fn geo(
        mut self,
        left: i16,
        top: i16,
        width: i16,
        height: i16,
        texture_id: i16,
        block_type_token: i16,
    ) -> Self {
        self.tokens.extend_from_slice(&[
            TAG_GEO,
            left,
            top,
            width,
            height,
            texture_id,
            block_type_token,
        ]);
        self
    }

    pub fn enemy(mut self, x: i16, y: i16, kind_token: i16, texture_id: i16) -> Self {
        self.tokens
            .extend_from_slice(&[TAG_ENEMY, x, y, kind_token, texture_id]);
        self
    }

    pub fn texture(mut self, slot: i16, resource: i16) -> Self {
        self.tokens.extend_from_slice(&[TAG_TEXTURE, slot, resource]);
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.tokens.push(TAG_END);
        self.tokens
            .iter()
            .flat_map(|token| token.to_le_bytes())
            .collect()
    }
}

impl Default for LevelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

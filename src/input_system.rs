/// Input signals and their SDL2 translation.
///
/// The simulation consumes discrete edge events, not device state: the host
/// translates raw keyboard events into `InputSignal`s and stores the latest
/// one in a single pending slot on the game state, which the player consumes
/// and clears once per frame. If several key events arrive between frames the
/// last one wins.
use sdl2::keyboard::Keycode;

/// Discrete input edges the simulation understands. Up/Down/Special are
/// accepted but currently have no effect on the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    UpDown,
    UpUp,
    DownDown,
    DownUp,
    JumpDown,
    JumpUp,
    SpecialDown,
    SpecialUp,
}

/// Maps a keyboard event to an input signal. Keys outside the game's
/// bindings produce nothing. Key-repeat events must be filtered by the
/// caller; this only sees genuine edges.
pub fn translate_key(keycode: Keycode, pressed: bool) -> Option<InputSignal> {
    let signal = match keycode {
        Keycode::A => {
            if pressed {
                InputSignal::LeftDown
            } else {
                InputSignal::LeftUp
            }
        }
        Keycode::D => {
            if pressed {
                InputSignal::RightDown
            } else {
                InputSignal::RightUp
            }
        }
        Keycode::W => {
            if pressed {
                InputSignal::UpDown
            } else {
                InputSignal::UpUp
            }
        }
        Keycode::S => {
            if pressed {
                InputSignal::DownDown
            } else {
                InputSignal::DownUp
            }
        }
        Keycode::Space => {
            if pressed {
                InputSignal::JumpDown
            } else {
                InputSignal::JumpUp
            }
        }
        Keycode::LShift => {
            if pressed {
                InputSignal::SpecialDown
            } else {
                InputSignal::SpecialUp
            }
        }
        _ => return None,
    };

    Some(signal)
}

/// Frame rendering: everything draws as solid-color rectangles in the
/// logical 200x150 coordinate space, translated by the camera scroll. The
/// window's logical size setting handles scaling to the real window.
use sdl2::pixels::Color;
use sdl2::rect::Rect as SdlRect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::game_state::{GameState, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::geometry::Rect;

const BACKGROUND: Color = Color::RGB(255, 255, 255);
const GRID: Color = Color::RGB(230, 230, 230);
const PLAYER: Color = Color::RGB(200, 30, 30);
const ENEMY: Color = Color::RGB(60, 60, 200);
const GRID_SPACING: i32 = 10;

/// Color for a block, keyed by the texture slot its record named. Unbound
/// slots fall back to a neutral block color.
fn texture_color(state: &GameState, texture_id: i16) -> Color {
    let bound = usize::try_from(texture_id)
        .ok()
        .and_then(|slot| state.texture_bindings.get(slot).copied())
        .flatten();

    match bound {
        Some(resource) => match resource % 3 {
            0 => Color::RGB(150, 100, 50),
            1 => Color::RGB(220, 180, 60),
            _ => Color::RGB(120, 160, 80),
        },
        None => Color::RGB(120, 120, 120),
    }
}

fn to_screen(rect: &Rect, camera_scroll: f32) -> SdlRect {
    let left = (rect.left - camera_scroll) as i32;
    let top = rect.top as i32;
    let width = (rect.right - rect.left).max(0.0) as u32;
    let height = (rect.bottom - rect.top).max(0.0) as u32;
    SdlRect::new(left, top, width, height)
}

pub fn render_frame(canvas: &mut Canvas<Window>, state: &GameState) -> Result<(), String> {
    canvas.set_draw_color(BACKGROUND);
    canvas.clear();

    draw_grid(canvas, state.camera_scroll)?;

    for (_, block) in state.geo.iter() {
        canvas.set_draw_color(texture_color(state, block.texture_id));
        canvas.fill_rect(to_screen(&block.render_rect(), state.camera_scroll))?;
    }

    canvas.set_draw_color(ENEMY);
    for (_, enemy) in state.enemies.iter() {
        canvas.fill_rect(to_screen(&enemy.actor.rect(), state.camera_scroll))?;
    }

    canvas.set_draw_color(PLAYER);
    canvas.fill_rect(to_screen(&state.player.actor.rect(), state.camera_scroll))?;

    canvas.present();
    Ok(())
}

/// Faint world-space grid so camera motion is visible even over empty
/// stretches of level.
fn draw_grid(canvas: &mut Canvas<Window>, camera_scroll: f32) -> Result<(), String> {
    canvas.set_draw_color(GRID);

    // First grid line at or left of the camera edge, in world units.
    let first_x = (camera_scroll as i32) / GRID_SPACING * GRID_SPACING;
    let mut x = first_x;
    while x <= camera_scroll as i32 + SCREEN_WIDTH as i32 {
        let screen_x = x - camera_scroll as i32;
        canvas.draw_line((screen_x, 0), (screen_x, SCREEN_HEIGHT as i32))?;
        x += GRID_SPACING;
    }

    let mut y = 0;
    while y <= SCREEN_HEIGHT as i32 {
        canvas.draw_line((0, y), (SCREEN_WIDTH as i32, y))?;
        y += GRID_SPACING;
    }

    Ok(())
}

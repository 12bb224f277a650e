mod camera;
mod rendering;

pub use camera::GameCamera;
pub use rendering::Renderer;

use macroquad::prelude::Color;

// Rendering constants
pub const BACKGROUND_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const FOOD_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const CARRYING_ANT_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const FOOD_TRAIL_COLOR: Color = Color::new(1.0, 215.0 / 255.0, 0.0, 1.0); // gold
pub const NEST_RADIUS: f32 = 1.5;
pub const TRAIL_VISIBILITY_THRESHOLD: f32 = 0.01;
pub const HOME_TRAIL_ALPHA_SCALE: f32 = 2.5;
pub const FOOD_TRAIL_ALPHA_SCALE: f32 = 4.0;
pub const HOME_TRAIL_LIGHTEN: u8 = 50;
pub const ANT_FADE_LIFESPAN: u32 = 50;

// HUD
pub const HUD_FONT_SIZE: f32 = 28.0;
pub const HUD_MARGIN: f32 = 16.0;
pub const HUD_LINE_HEIGHT: f32 = 32.0;

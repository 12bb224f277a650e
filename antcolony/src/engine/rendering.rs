use super::GameCamera;
use super::{
    ANT_FADE_LIFESPAN, BACKGROUND_COLOR, CARRYING_ANT_COLOR, FOOD_COLOR, FOOD_TRAIL_ALPHA_SCALE,
    FOOD_TRAIL_COLOR, HOME_TRAIL_ALPHA_SCALE, HOME_TRAIL_LIGHTEN, HUD_FONT_SIZE, HUD_LINE_HEIGHT,
    HUD_MARGIN, NEST_RADIUS, TRAIL_VISIBILITY_THRESHOLD,
};
use colony_core::{Ant, Colony, FoodGrid, GRID_SIZE, PheromoneField, Rgb, Simulation};
use macroquad::prelude::*;

// Keyboard camera speeds, per second of key hold
const KEY_ZOOM_RATE: f32 = 8.0;
const KEY_PAN_VIEW_FRACTION: f32 = 0.75;
// Squared world distance the cursor must travel before a drag pans
const DRAG_DEADZONE_SQ: f32 = 0.01;

/// Draws the grid, trails, nests and ants, and owns the camera input state.
pub struct Renderer {
    pub game_camera: GameCamera,
    /// World point held under the cursor while the left button is down.
    drag_anchor: Option<Vec2>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            game_camera: GameCamera::new(GRID_SIZE, GRID_SIZE),
            drag_anchor: None,
        }
    }

    /// Wheel zoom takes priority over dragging for the frame it happens in.
    pub fn process_camera_input(&mut self, dt: f32) {
        if !self.process_mouse_wheel_zoom() {
            self.process_mouse_drag_pan();
        }
        self.process_keyboard_camera(dt);
    }

    /// Returns true if the wheel moved this frame.
    fn process_mouse_wheel_zoom(&mut self) -> bool {
        let wheel = mouse_wheel().1;
        if wheel == 0.0 {
            return false;
        }
        self.game_camera.adjust_zoom(-wheel.signum());
        true
    }

    /// Keeps the world point grabbed on press under the cursor until release.
    fn process_mouse_drag_pan(&mut self) {
        let cursor = Vec2::from(mouse_position());
        if is_mouse_button_pressed(MouseButton::Left) {
            self.drag_anchor = Some(self.game_camera.camera.screen_to_world(cursor));
        }
        if !is_mouse_button_down(MouseButton::Left) {
            self.drag_anchor = None;
        }

        let Some(anchor) = self.drag_anchor else {
            return;
        };
        let under_cursor = self.game_camera.camera.screen_to_world(cursor);
        if let Some(shift) = drag_shift(anchor, under_cursor) {
            self.game_camera.move_by(shift);
        }
    }

    /// Up/Down zoom, arrows and WASD pan.
    fn process_keyboard_camera(&mut self, dt: f32) {
        let zoom = axis(is_key_down(KeyCode::Down), is_key_down(KeyCode::Up));
        if zoom != 0.0 {
            // Negative amounts zoom in
            self.game_camera
                .adjust_zoom_centered(-zoom * KEY_ZOOM_RATE * dt);
        }

        let pan = vec2(
            axis(
                is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
                is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            ),
            axis(is_key_down(KeyCode::W), is_key_down(KeyCode::S)),
        );
        if pan != Vec2::ZERO {
            self.game_camera
                .pan_by_view_fraction(pan * KEY_PAN_VIEW_FRACTION * dt);
        }
    }

    /// Draws the world in camera space.
    pub fn render(&self, simulation: &Simulation, show_pheromones: bool) {
        clear_background(BACKGROUND_COLOR);
        set_camera(&self.game_camera.camera);

        self.draw_nests(&simulation.colonies);
        if show_pheromones {
            self.draw_pheromones(&simulation.colonies);
        }
        self.draw_ants(&simulation.colonies);
        self.draw_food(&simulation.grid);
    }

    fn draw_nests(&self, colonies: &[Colony]) {
        for colony in colonies {
            draw_circle(
                colony.home.x as f32 + 0.5,
                colony.home.y as f32 + 0.5,
                NEST_RADIUS,
                to_color(colony.color),
            );
        }
    }

    fn draw_pheromones(&self, colonies: &[Colony]) {
        for colony in colonies {
            let home_tint = lighten(colony.color, HOME_TRAIL_LIGHTEN);
            draw_field(&colony.trails.to_home, home_tint, HOME_TRAIL_ALPHA_SCALE);
            draw_field(&colony.trails.to_food, FOOD_TRAIL_COLOR, FOOD_TRAIL_ALPHA_SCALE);
        }
    }

    fn draw_ants(&self, colonies: &[Colony]) {
        for colony in colonies {
            let base = to_color(colony.color);
            for ant in &colony.ants {
                draw_rectangle(
                    ant.pos.x as f32,
                    ant.pos.y as f32,
                    1.0,
                    1.0,
                    ant_color(base, ant),
                );
            }
        }
    }

    fn draw_food(&self, grid: &FoodGrid) {
        for (idx, &amount) in grid.cells().iter().enumerate() {
            if amount > 0 {
                let (x, y) = (idx % GRID_SIZE, idx / GRID_SIZE);
                draw_rectangle(x as f32, y as f32, 1.0, 1.0, FOOD_COLOR);
            }
        }
    }

    /// Draws text lines in screen space, top-left.
    pub fn draw_hud(&self, lines: &[String]) {
        set_default_camera();
        for (i, line) in lines.iter().enumerate() {
            draw_text(
                line,
                HUD_MARGIN,
                HUD_MARGIN + HUD_LINE_HEIGHT * (i as f32 + 1.0),
                HUD_FONT_SIZE,
                BLACK,
            );
        }
    }
}

fn draw_field(field: &PheromoneField, tint: Color, alpha_scale: f32) {
    for (idx, &value) in field.values().iter().enumerate() {
        if value <= TRAIL_VISIBILITY_THRESHOLD {
            continue;
        }
        let (x, y) = (idx % GRID_SIZE, idx / GRID_SIZE);
        draw_rectangle(
            x as f32,
            y as f32,
            1.0,
            1.0,
            Color::new(tint.r, tint.g, tint.b, trail_alpha(value, alpha_scale)),
        );
    }
}

/// Camera shift that puts `anchor` back under the cursor, ignoring jitter.
fn drag_shift(anchor: Vec2, under_cursor: Vec2) -> Option<Vec2> {
    let drift = under_cursor - anchor;
    (drift.length_squared() > DRAG_DEADZONE_SQ).then_some(-drift)
}

fn axis(negative: bool, positive: bool) -> f32 {
    (positive as i32 - negative as i32) as f32
}

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

fn lighten(rgb: Rgb, amount: u8) -> Color {
    Color::from_rgba(
        rgb.r.saturating_add(amount),
        rgb.g.saturating_add(amount),
        rgb.b.saturating_add(amount),
        255,
    )
}

/// Opacity in `[0, 1]` for a trail value, saturating at 255/255.
fn trail_alpha(value: f32, scale: f32) -> f32 {
    (value * scale).min(255.0) / 255.0
}

/// Colony colour, green while carrying. Ants near the end of their life darken and fade out.
fn ant_color(base: Color, ant: &Ant) -> Color {
    let color = if ant.has_food {
        CARRYING_ANT_COLOR
    } else {
        base
    };
    if ant.lifespan >= ANT_FADE_LIFESPAN {
        return color;
    }

    let fade = ant.lifespan as f32 * 5.1 / 255.0;
    let darken = 1.0 - fade;
    Color::new(
        (color.r - darken).max(0.0),
        (color.g - darken).max(0.0),
        (color.b - darken).max(0.0),
        fade,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_core::{Cell, Direction};

    #[test]
    fn test_trail_alpha_saturates() {
        assert_eq!(trail_alpha(0.0, 4.0), 0.0);
        assert!((trail_alpha(51.0, 2.5) - 0.5).abs() < 1e-3);
        assert_eq!(trail_alpha(500.0, 4.0), 1.0);
    }

    #[test]
    fn test_lighten_saturates_per_channel() {
        let c = lighten(Rgb::new(230, 0, 100), 50);
        assert_eq!(c, Color::from_rgba(255, 50, 150, 255));
    }

    #[test]
    fn test_ant_color_fades_near_death() {
        let mut ant = Ant::with_heading(Cell::new(1, 1), Cell::new(1, 1), Direction::North);
        let base = to_color(Rgb::new(255, 0, 0));
        assert_eq!(ant_color(base, &ant), base);

        ant.has_food = true;
        assert_eq!(ant_color(base, &ant), CARRYING_ANT_COLOR);

        ant.has_food = false;
        ant.lifespan = 25;
        let faded = ant_color(base, &ant);
        assert!(faded.a < 1.0 && faded.a > 0.0);
        assert!(faded.r < base.r);

        ant.lifespan = 0;
        assert_eq!(ant_color(base, &ant).a, 0.0);
    }

    #[test]
    fn test_drag_shift_moves_against_cursor_drift() {
        let anchor = vec2(40.0, 60.0);
        assert_eq!(drag_shift(anchor, vec2(43.0, 58.0)), Some(vec2(-3.0, 2.0)));
        assert_eq!(drag_shift(anchor, vec2(40.05, 60.05)), None);
        assert_eq!(drag_shift(anchor, anchor), None);
    }

    #[test]
    fn test_axis() {
        assert_eq!(axis(true, false), -1.0);
        assert_eq!(axis(false, true), 1.0);
        assert_eq!(axis(true, true), 0.0);
    }
}

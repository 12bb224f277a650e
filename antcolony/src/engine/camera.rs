use macroquad::prelude::*;

// Camera configuration constants
/// Minimum zoom level allowed (1.0 = whole grid in view)
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 50.0;
/// Speed multiplier for zoom operations
const ZOOM_SPEED: f32 = 0.1;

/// 2D camera over the cell grid, one world unit per cell.
pub struct GameCamera {
    zoom: f32,

    pub grid_width: f32,
    pub grid_height: f32,

    pub camera: Camera2D,
}

impl GameCamera {
    pub fn new(grid_width: usize, grid_height: usize) -> Self {
        let mut camera = Self {
            zoom: 1.0,
            grid_width: grid_width as f32,
            grid_height: grid_height as f32,
            camera: Camera2D {
                target: vec2(grid_width as f32 / 2.0, grid_height as f32 / 2.0),
                ..Default::default()
            },
        };

        camera.update_camera_zoom();
        camera
    }

    /// Zooms about the mouse cursor.
    pub fn adjust_zoom(&mut self, wheel_movement: f32) {
        self.zoom_at(Vec2::from(mouse_position()), wheel_movement);
    }

    /// Zooms about the centre of the window.
    pub fn adjust_zoom_centered(&mut self, amount: f32) {
        self.zoom_at(vec2(screen_width() / 2.0, screen_height() / 2.0), amount);
    }

    /// Changes the zoom while keeping the world point under `screen_pos` fixed.
    fn zoom_at(&mut self, screen_pos: Vec2, amount: f32) {
        let old_zoom = self.zoom;
        let world_pos = self.camera.screen_to_world(screen_pos);

        self.zoom = (self.zoom - amount * self.zoom * ZOOM_SPEED).clamp(MIN_ZOOM, MAX_ZOOM);

        if old_zoom != self.zoom {
            self.update_camera_zoom();
            let new_world_pos = self.camera.screen_to_world(screen_pos);
            self.move_by(world_pos - new_world_pos);
        }
    }

    pub fn move_by(&mut self, movement: Vec2) {
        self.camera.target += movement;
        self.adjust_camera_bounds();
    }

    fn update_camera_zoom(&mut self) {
        let stretch = letterbox_stretch(self.grid_width / self.grid_height, screen_aspect());
        let full_grid = vec2(2.0 / self.grid_width, 2.0 / self.grid_height);
        self.camera.zoom = full_grid * self.zoom * stretch;
    }

    /// Visible world extent at the current zoom.
    fn view_size(&self) -> Vec2 {
        let stretch = letterbox_stretch(self.grid_width / self.grid_height, screen_aspect());
        vec2(self.grid_width, self.grid_height) / (self.zoom * stretch)
    }

    fn adjust_camera_bounds(&mut self) {
        let view = self.view_size();
        self.camera.target.x = clamp_to_view(self.camera.target.x, view.x, self.grid_width);
        self.camera.target.y = clamp_to_view(self.camera.target.y, view.y, self.grid_height);
    }

    /// Pans by a fraction of the visible area, so keyboard panning feels
    /// the same at every zoom level.
    pub fn pan_by_view_fraction(&mut self, fraction: Vec2) {
        let view = self.view_size();
        self.move_by(fraction * view);
    }

    pub fn handle_resize(&mut self) {
        self.update_camera_zoom();
        self.adjust_camera_bounds();
    }
}

fn screen_aspect() -> f32 {
    screen_width() / screen_height()
}

/// Per-axis scale that keeps cells square whatever the window shape.
/// One axis always stays at 1.
fn letterbox_stretch(grid_aspect: f32, screen_aspect: f32) -> Vec2 {
    if grid_aspect >= screen_aspect {
        vec2(grid_aspect / screen_aspect, 1.0)
    } else {
        vec2(1.0, screen_aspect / grid_aspect)
    }
}

fn clamp_to_view(value: f32, view_size: f32, grid_size: f32) -> f32 {
    let min = view_size / 2.0;
    let max = grid_size - min;

    if max < min {
        // View is larger than the grid, center the camera
        grid_size / 2.0
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_view_keeps_view_inside_grid() {
        assert_eq!(clamp_to_view(5.0, 40.0, 200.0), 20.0);
        assert_eq!(clamp_to_view(195.0, 40.0, 200.0), 180.0);
        assert_eq!(clamp_to_view(90.0, 40.0, 200.0), 90.0);
    }

    #[test]
    fn test_letterbox_stretch_keeps_cells_square() {
        // Square grid in a 16:9 window: vertical axis is stretched.
        let stretch = letterbox_stretch(1.0, 16.0 / 9.0);
        assert_eq!(stretch.x, 1.0);
        assert!((stretch.y - 16.0 / 9.0).abs() < 1e-6);

        // Square grid in a portrait window: horizontal axis is stretched.
        let stretch = letterbox_stretch(1.0, 0.5);
        assert_eq!(stretch, vec2(2.0, 1.0));

        assert_eq!(letterbox_stretch(1.0, 1.0), vec2(1.0, 1.0));
    }

    #[test]
    fn test_clamp_to_view_centres_oversized_view() {
        assert_eq!(clamp_to_view(3.0, 300.0, 200.0), 100.0);
    }
}

use crate::config::{AppConfig, ViewerConfig};
use crate::engine::Renderer;
use crate::timer::Timer;
use colony_core::{Simulation, SimulationState, SimulationStats};
use macroquad::prelude::*;
use tracing::info;

// Upper bound on catch-up ticks after a long frame
const MAX_TICKS_PER_FRAME: u32 = 8;

/// Window application: runs the simulation on a fixed cadence and draws it.
pub struct AntApp {
    simulation: Simulation,
    renderer: Renderer,
    viewer: ViewerConfig,
    tick_timer: Timer,
    /// Running while the simulation waits for its automatic restart.
    reset_countdown: Option<Timer>,
    paused: bool,
    show_pheromones: bool,
    screen_size: (f32, f32),
}

impl AntApp {
    pub fn new(config: AppConfig) -> Self {
        let viewer = config.viewer;
        Self {
            simulation: Simulation::new(config.simulation),
            renderer: Renderer::new(),
            tick_timer: Timer::new(viewer.tick_interval, 0.0),
            reset_countdown: None,
            paused: false,
            show_pheromones: viewer.show_pheromones,
            screen_size: (screen_width(), screen_height()),
            viewer,
        }
    }

    /// Runs the main loop until Escape is pressed.
    pub async fn run(&mut self) {
        loop {
            if self.handle_shortcuts() {
                info!("Quit requested");
                break;
            }
            let dt = get_frame_time();
            self.renderer.process_camera_input(dt);
            self.handle_resize();

            self.advance(dt);

            self.renderer.render(&self.simulation, self.show_pheromones);
            let lines = hud_lines(
                &self.simulation.stats(),
                self.reset_countdown.as_ref().map(Timer::remaining),
                self.viewer.auto_reset,
                self.paused,
            );
            self.renderer.draw_hud(&lines);

            next_frame().await;
        }
    }

    /// Returns true when the app should quit.
    fn handle_shortcuts(&mut self) -> bool {
        if is_key_pressed(KeyCode::Escape) {
            return true;
        }

        if is_key_pressed(KeyCode::Space) {
            self.paused = !self.paused;
            info!(paused = self.paused, "Toggled pause");
        } else if is_key_pressed(KeyCode::R) {
            info!("Manual reset");
            self.reset();
        } else if is_key_pressed(KeyCode::H) {
            self.show_pheromones = !self.show_pheromones;
        }
        false
    }

    fn handle_resize(&mut self) {
        let current = (screen_width(), screen_height());
        if current != self.screen_size {
            self.screen_size = current;
            self.renderer.game_camera.handle_resize();
        }
    }

    fn advance(&mut self, dt: f32) {
        if self.paused {
            return;
        }

        if let Some(countdown) = self.reset_countdown.as_mut() {
            countdown.update(dt);
            if self.viewer.auto_reset && countdown.is_ready() {
                self.reset();
            }
            return;
        }

        self.tick_timer.update(dt);
        let mut ticks = 0;
        while ticks < MAX_TICKS_PER_FRAME && self.tick_timer.consume() {
            ticks += 1;
            if self.simulation.tick() == SimulationState::AwaitingReset {
                self.reset_countdown = Some(Timer::new(self.viewer.reset_delay, 0.0));
                break;
            }
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.tick_timer.wrap();
        }
    }

    fn reset(&mut self) {
        self.simulation.reset();
        self.reset_countdown = None;
        self.tick_timer = Timer::new(self.viewer.tick_interval, 0.0);
    }
}

/// HUD text, one entry per line.
fn hud_lines(
    stats: &SimulationStats,
    countdown: Option<f32>,
    auto_reset: bool,
    paused: bool,
) -> Vec<String> {
    let mut lines = vec![
        format!("Total Live Ants: {}", stats.live_ants),
        format!("Peak Population: {}", stats.peak_population),
        format!("Total Deaths: {}", stats.deaths),
        format!("Food Sources: {}", stats.food_sources),
        format!("Tick: {}", stats.tick),
    ];
    if paused {
        lines.push("Paused".to_string());
    }
    match countdown {
        Some(remaining) if auto_reset => {
            lines.push(format!("Restarting in {}s", remaining.ceil() as u32));
        }
        Some(_) => lines.push("Simulation over, press R to restart".to_string()),
        None => {}
    }
    lines
}

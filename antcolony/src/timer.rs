// Count-up timer driving the tick cadence and the restart countdown.

#[derive(Debug, Clone)]
pub struct Timer {
    pub max_value: f32,
    pub value: f32,
}

impl Timer {
    /// Create a new timer with a max value and an initial value
    pub fn new(max_value: f32, initial_value: f32) -> Self {
        Self {
            max_value,
            value: initial_value,
        }
    }

    /// Returns true if the timer has gone past the max value
    pub fn is_ready(&self) -> bool {
        self.value >= self.max_value
    }

    /// Update the timer by dt (delta time)
    pub fn update(&mut self, dt: f32) {
        self.value += dt;
    }

    /// Takes one period off the timer if it is ready.
    pub fn consume(&mut self) -> bool {
        if self.is_ready() {
            self.value -= self.max_value;
            true
        } else {
            false
        }
    }

    /// Wraps the timer value back within bounds.
    pub fn wrap(&mut self) {
        if self.max_value > 0.0 {
            self.value %= self.max_value;
        } else {
            self.value = 0.0;
        }
    }

    /// Seconds left before the timer is ready, never negative.
    pub fn remaining(&self) -> f32 {
        (self.max_value - self.value).max(0.0)
    }
}

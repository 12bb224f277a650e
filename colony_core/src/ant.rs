use rand::Rng;
use rand::seq::IndexedRandom;

use super::geometry::{Cell, Direction};
use super::grid::FoodGrid;
use super::memory::ShortTermMemory;
use super::pheromone::{PheromoneField, Trails};
use super::selection::{self, Candidate, SelectionMode};
use super::{
    BOUNDARY_TURN_UNITS, DELIVERY_PHEROMONE_BONUS, DEPOSIT_COST, DIAGONAL_BONUS,
    FOOD_DEPOSIT_MIN_STRENGTH, FOOD_PHEROMONE_DEPOSIT, FOOD_TRAIL_CROWDING_LEVEL,
    FOUND_FOOD_PHEROMONE_STRENGTH, GRID_SIZE, HOME_DEPOSIT_MIN_STRENGTH, HOME_PHEROMONE_DEPOSIT,
    HOME_PROXIMITY_THRESHOLD, HOME_TRAIL_CROWDING_LEVEL, INITIAL_PHEROMONE_STRENGTH,
    LOW_TRAIL_WEIGHT, LOW_TRAIL_WANDER_PERCENT, MAX_LIFESPAN, MAX_TOTAL_RETURN_ATTEMPTS,
    MIN_CANDIDATE_WEIGHT, NEAR_HOME_DISTANCE, NEST_DEPARTURE_WANDER_PERCENT,
    NO_PROGRESS_EPSILON, TRAIL_CROWDING_WANDER_PERCENT, WANDER_INERTIA_PERCENT,
};

/// Everything an ant may touch during its update, borrowed from its colony and the shared grid.
pub struct ForageContext<'a> {
    pub grid: &'a mut FoodGrid,
    pub trails: &'a mut Trails,
    pub food_stored: &'a mut u32,
}

/// How a trail-following call moved the ant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    /// Stepped onto a neighbour chosen from the trail.
    Trail,
    /// Fell back to `wander`.
    Wander,
    /// Stepped straight onto the nest from an adjacent cell.
    Homed,
    /// Carrying food with no usable trail; did not move.
    Stay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrailBias {
    /// Searching ants favour cells farther from the nest.
    AwayFromHome,
    /// Homing ants favour cells closer to the nest.
    TowardHome,
}

/// State of an ant.
#[derive(Debug, Clone)]
pub struct Ant {
    pub pos: Cell,
    pub prev_pos: Cell,
    pub direction: Direction,
    pub has_food: bool,
    /// Deposit budget, spent by every trail deposit and topped up on delivery.
    pub pheromone_strength: f32,
    pub lifespan: u32,
    pub home: Cell,
    /// Attempt counter while returning; escalates from direct homing to random escapes.
    pub moves_while_returning_home: u32,
    pub memory: ShortTermMemory,
}

impl Ant {
    /// A fresh ant on its nest with a random heading.
    pub fn new<R: Rng + ?Sized>(home: Cell, rng: &mut R) -> Self {
        Self::with_heading(home, home, Direction::random(rng))
    }

    pub fn with_heading(pos: Cell, home: Cell, direction: Direction) -> Self {
        Self {
            pos,
            prev_pos: pos,
            direction,
            has_food: false,
            pheromone_strength: INITIAL_PHEROMONE_STRENGTH,
            lifespan: MAX_LIFESPAN,
            home,
            moves_while_returning_home: 0,
            memory: ShortTermMemory::starting_at(pos),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lifespan == 0
    }

    pub fn is_home(&self) -> bool {
        self.pos == self.home
    }

    /// Advances the ant by one tick. Death is left for the colony to evaluate.
    pub fn update_self<R: Rng + ?Sized>(&mut self, ctx: &mut ForageContext<'_>, rng: &mut R) {
        self.lifespan = self.lifespan.saturating_sub(1);

        if self.has_food {
            self.return_home(ctx, rng);
        } else {
            self.forage(ctx, rng);
        }
    }

    fn return_home<R: Rng + ?Sized>(&mut self, ctx: &mut ForageContext<'_>, rng: &mut R) {
        if self.is_home() {
            self.store_food(ctx.food_stored);
            self.lifespan += 1;
            return;
        }

        let old_pos = self.pos;
        let dist_before = self.pos.distance_to(self.home);
        let near_home = dist_before <= HOME_PROXIMITY_THRESHOLD;

        if near_home || self.moves_while_returning_home < MAX_TOTAL_RETURN_ATTEMPTS {
            self.go_home(ctx.food_stored, rng);
        } else {
            // Escape valve for ants that have failed to get home for too long.
            self.direction = Direction::random(rng);
            self.move_forward(rng);
        }

        if !self.is_home() {
            self.moves_while_returning_home += 1;
        }

        let moved = self.pos != old_pos;
        let dist_after = self.pos.distance_to(self.home);
        if (!moved || dist_after >= dist_before - NO_PROGRESS_EPSILON) && !near_home {
            self.moves_while_returning_home += 1;
        }

        if self.is_home() {
            if self.has_food {
                self.store_food(ctx.food_stored);
            }
        } else if self.has_food && self.moves_while_returning_home < MAX_TOTAL_RETURN_ATTEMPTS {
            self.deposit_food_pheromone(ctx.trails);
        }
    }

    fn forage<R: Rng + ?Sized>(&mut self, ctx: &mut ForageContext<'_>, rng: &mut R) {
        if self.moves_while_returning_home == 0 && self.prev_pos == self.home {
            // Just left the nest: every departure reinforces the way back.
            if roll_percent(rng, NEST_DEPARTURE_WANDER_PERCENT) {
                self.wander(rng);
            } else {
                self.follow_food_pheromones(ctx.trails, rng);
            }
            self.deposit_home_pheromone(ctx.trails);
            return;
        }

        if self.search_for_food(ctx.grid) {
            self.pheromone_strength = FOUND_FOOD_PHEROMONE_STRENGTH;
            self.deposit_food_pheromone(ctx.trails);
            self.moves_while_returning_home = 0;
        } else {
            self.deposit_home_pheromone(ctx.trails);
            self.follow_food_pheromones(ctx.trails, rng);
        }
    }

    /// One step along `direction`, clamped to the grid. Hitting an edge forces a sharp turn.
    pub fn move_forward<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.prev_pos = self.pos;

        let next = self.pos.step(self.direction);
        let max = GRID_SIZE as i32 - 1;
        let clamped = Cell::new(next.x.clamp(0, max), next.y.clamp(0, max));
        let hit_boundary = clamped != next;
        self.pos = clamped;

        if hit_boundary {
            self.direction = match rng.random_range(0..3) {
                0 => self
                    .direction
                    .turned(-(BOUNDARY_TURN_UNITS + rng.random_range(0..=1))),
                1 => self
                    .direction
                    .turned(BOUNDARY_TURN_UNITS + rng.random_range(0..=1)),
                _ => self.direction.turned(4),
            };
        }

        self.memory.push(self.pos);
    }

    /// Random exploration with heading inertia. Always moves.
    pub fn wander<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let keep_heading = roll_percent(rng, WANDER_INERTIA_PERCENT)
            && self.is_unvisited(self.pos.step(self.direction));

        if !keep_heading {
            let options: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&dir| self.is_unvisited(self.pos.step(dir)))
                .collect();
            self.direction = match options.choose(rng) {
                Some(&dir) => dir,
                None => Direction::random(rng),
            };
        }

        self.move_forward(rng);
    }

    /// In bounds, not the cell just left, and not in short-term memory.
    fn is_unvisited(&self, cell: Cell) -> bool {
        cell.in_bounds() && cell != self.prev_pos && !self.memory.contains(cell)
    }

    /// Checks the current cell, then the eight neighbours in compass order.
    /// Picking up from a neighbour steps onto it. Returns true if food was taken.
    pub fn search_for_food(&mut self, grid: &mut FoodGrid) -> bool {
        if grid.has_food(self.pos) {
            grid.remove_food(self.pos);
            self.has_food = true;
            return true;
        }

        for dir in Direction::ALL {
            let neighbor = self.pos.step(dir);
            if !neighbor.in_bounds() {
                continue;
            }
            if grid.has_food(neighbor) {
                self.prev_pos = self.pos;
                self.pos = neighbor;
                self.has_food = true;
                grid.remove_food(neighbor);
                return true;
            }
        }
        false
    }

    /// Greedy step toward the nest, delivering on arrival.
    pub fn go_home<R: Rng + ?Sized>(&mut self, food_stored: &mut u32, rng: &mut R) {
        let Some(dir) = Direction::toward(self.home.x - self.pos.x, self.home.y - self.pos.y)
        else {
            if self.has_food {
                self.store_food(food_stored);
            }
            return;
        };

        self.direction = dir;
        self.move_forward(rng);

        if self.is_home() && self.has_food {
            self.store_food(food_stored);
        }
    }

    pub fn store_food(&mut self, food_stored: &mut u32) {
        self.has_food = false;
        self.pheromone_strength += DELIVERY_PHEROMONE_BONUS;
        *food_stored += 1;
    }

    pub fn deposit_food_pheromone(&mut self, trails: &mut Trails) {
        if self.has_food && self.pheromone_strength > FOOD_DEPOSIT_MIN_STRENGTH {
            trails.to_food.deposit(self.pos, FOOD_PHEROMONE_DEPOSIT);
            self.spend_pheromone();
        }
    }

    pub fn deposit_home_pheromone(&mut self, trails: &mut Trails) {
        if !self.has_food && self.pheromone_strength > HOME_DEPOSIT_MIN_STRENGTH {
            trails.to_home.deposit(self.pos, HOME_PHEROMONE_DEPOSIT);
            self.spend_pheromone();
        }
    }

    fn spend_pheromone(&mut self) {
        self.pheromone_strength = (self.pheromone_strength - DEPOSIT_COST).max(0.0);
    }

    pub fn follow_food_pheromones<R: Rng + ?Sized>(
        &mut self,
        trails: &Trails,
        rng: &mut R,
    ) -> Steering {
        // Strong trail underfoot: occasionally step off it so ants don't pile up at the end.
        if !self.has_food
            && trails.to_food.level(self.pos) > FOOD_TRAIL_CROWDING_LEVEL
            && roll_percent(rng, TRAIL_CROWDING_WANDER_PERCENT)
        {
            self.wander(rng);
            return Steering::Wander;
        }

        let candidates = self.trail_candidates(&trails.to_food, TrailBias::AwayFromHome);
        self.steer_along(&candidates, TrailBias::AwayFromHome, rng)
    }

    pub fn follow_home_pheromones<R: Rng + ?Sized>(
        &mut self,
        trails: &Trails,
        rng: &mut R,
    ) -> Steering {
        if self.has_food && !self.is_home() && self.pos.chebyshev_to(self.home) <= 1 {
            if let Some(dir) =
                Direction::toward(self.home.x - self.pos.x, self.home.y - self.pos.y)
            {
                self.direction = dir;
                self.move_forward(rng);
                return Steering::Homed;
            }
        }

        if !self.has_food
            && trails.to_home.level(self.pos) > HOME_TRAIL_CROWDING_LEVEL
            && roll_percent(rng, TRAIL_CROWDING_WANDER_PERCENT)
        {
            self.wander(rng);
            return Steering::Wander;
        }

        let candidates = self.trail_candidates(&trails.to_home, TrailBias::TowardHome);
        self.steer_along(&candidates, TrailBias::TowardHome, rng)
    }

    /// Weighted neighbours of the current cell on `field`. Skips the grid edge,
    /// the previous cell and cells without signal.
    fn trail_candidates(&self, field: &PheromoneField, bias: TrailBias) -> Vec<Candidate> {
        let current_dist = self.pos.distance_to(self.home);
        let revisit_penalty = match bias {
            TrailBias::TowardHome if self.has_food && current_dist < NEAR_HOME_DISTANCE => 0.9,
            _ => 0.5,
        };

        Direction::ALL
            .into_iter()
            .filter_map(|dir| {
                let neighbor = self.pos.step(dir);
                if !neighbor.in_bounds() || neighbor == self.prev_pos {
                    return None;
                }

                let level = field.level(neighbor);
                if level <= 0.0 {
                    return None;
                }

                let mut weight = level;
                if self.memory.contains(neighbor) {
                    weight *= revisit_penalty;
                }

                let neighbor_dist = neighbor.distance_to(self.home);
                let (closer, farther) = match bias {
                    TrailBias::AwayFromHome => (0.2, 1.2),
                    TrailBias::TowardHome => (2.0, 0.1),
                };
                if neighbor_dist < current_dist {
                    weight *= closer;
                } else if neighbor_dist > current_dist {
                    weight *= farther;
                }

                if dir.is_diagonal() {
                    weight *= DIAGONAL_BONUS;
                }

                (weight > MIN_CANDIDATE_WEIGHT).then_some(Candidate {
                    direction: dir,
                    weight,
                })
            })
            .collect()
    }

    fn steer_along<R: Rng + ?Sized>(
        &mut self,
        candidates: &[Candidate],
        bias: TrailBias,
        rng: &mut R,
    ) -> Steering {
        if candidates.is_empty() {
            return self.lose_trail(bias, rng);
        }

        if !self.has_food
            && selection::total_weight(candidates) <= LOW_TRAIL_WEIGHT
            && roll_percent(rng, LOW_TRAIL_WANDER_PERCENT)
        {
            self.wander(rng);
            return Steering::Wander;
        }

        let mode = if self.has_food {
            SelectionMode::Greedy
        } else {
            SelectionMode::Roulette
        };

        match selection::pick(candidates, mode, rng) {
            Some(idx) => {
                self.direction = candidates[idx].direction;
                self.move_forward(rng);
                Steering::Trail
            }
            None => self.lose_trail(bias, rng),
        }
    }

    fn lose_trail<R: Rng + ?Sized>(&mut self, bias: TrailBias, rng: &mut R) -> Steering {
        if bias == TrailBias::TowardHome && self.has_food {
            return Steering::Stay;
        }
        self.wander(rng);
        Steering::Wander
    }
}

#[inline(always)]
fn roll_percent<R: Rng + ?Sized>(rng: &mut R, percent: u32) -> bool {
    rng.random_range(0..100) < percent
}

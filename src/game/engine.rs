use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::{
    action::Direction,
    config::GameConfig,
    state::{GameState, Position, Snake},
};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Snake moved one cell, length unchanged
    Moved,
    /// Snake ate the food and grew by one cell
    Ate,
    /// Snake ran into itself; the game was reset to a fresh episode
    Collided {
        /// Length the snake had reached before the collision
        length: usize,
    },
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the state for a fresh episode: snake in the middle heading
    /// right, new food, not running
    pub fn init_game(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let food = self.generate_food(&snake);

        let mut state = GameState::new(
            snake,
            Direction::Right,
            food,
            self.config.grid_width,
            self.config.grid_height,
        );
        state.guard_double_turn = self.config.guard_double_turn;
        state
    }

    /// Advance the game by exactly one step.
    ///
    /// Callers gate on `state.running`; the engine does not.
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        let new_head = state
            .snake
            .head()
            .moved_in_direction(state.direction)
            .wrapped(state.grid_width, state.grid_height);

        // The tail cell still counts: it has not moved away yet
        if state.snake.occupies(new_head) {
            let length = state.snake.len();
            info!(length, "snake ran into itself, starting a new episode");
            *state = self.init_game();
            return TickOutcome::Collided { length };
        }

        state.heading = state.direction;
        state.snake.push_head(new_head);

        if new_head == state.food {
            state.food = self.generate_food(&state.snake);
            debug!(length = state.snake.len(), food = ?state.food, "food eaten");
            TickOutcome::Ate
        } else {
            state.snake.pop_tail();
            trace!(head = ?new_head, "snake moved");
            TickOutcome::Moved
        }
    }

    /// Pick a uniformly random cell for the food.
    ///
    /// The snake is only avoided when `food_avoids_snake` is set and a free
    /// cell exists.
    pub fn generate_food(&mut self, snake: &Snake) -> Position {
        let cell_count = self.config.grid_width * self.config.grid_height;
        let avoid = self.config.food_avoids_snake && snake.len() < cell_count;

        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !avoid || !snake.occupies(pos) {
                return pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7)
    }

    #[test]
    fn test_init_game() {
        let mut engine = engine();
        let state = engine.init_game();

        assert!(!state.running);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = engine.init_game();
        state.food = Position::new(0, 0);

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(11, 10));
        assert_eq!(state.snake.tail(), Position::new(9, 10));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = engine.init_game();
        state.food = Position::new(11, 10);

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::Ate);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.tail(), Position::new(8, 10));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_wraps_instead_of_wall_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let snake = Snake::new(Position::new(0, 5), Direction::Left, 3);
        let mut state = GameState::new(snake, Direction::Left, Position::new(5, 5), 10, 10);

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(state.snake.head(), Position::new(9, 5));
    }

    #[test]
    fn test_self_collision_resets() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3);

        // Curled snake; moving left from the head lands on (4,5)
        let snake = Snake::from_cells([
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(4, 6),
            Position::new(4, 5),
            Position::new(4, 4),
        ])
        .unwrap();
        let mut state = GameState::new(snake, Direction::Left, Position::new(8, 8), 10, 10);
        state.running = true;

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::Collided { length: 5 });
        assert!(!state.running);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(5, 5));
        assert_eq!(state.direction, Direction::Right);
    }

    #[test]
    fn test_heading_follows_direction_after_tick() {
        let mut engine = engine();
        let mut state = engine.init_game();
        state.food = Position::new(0, 0);

        state.set_direction(Direction::Up);
        assert_eq!(state.heading, Direction::Right);

        engine.tick(&mut state);
        assert_eq!(state.heading, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(10, 9));

        // Now Down is the reversal
        state.set_direction(Direction::Down);
        assert_eq!(state.direction, Direction::Up);
    }

    #[test]
    fn test_double_turn_guard_from_config() {
        let config = GameConfig {
            guard_double_turn: true,
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 8);
        let mut state = engine.init_game();
        assert!(state.guard_double_turn);

        state.set_direction(Direction::Up);
        state.set_direction(Direction::Left);
        assert_eq!(state.direction, Direction::Up);

        // Default rules judge against the latest request
        let mut state = GameEngine::with_seed(GameConfig::default(), 8).init_game();
        state.set_direction(Direction::Up);
        state.set_direction(Direction::Left);
        assert_eq!(state.direction, Direction::Left);
    }

    #[test]
    fn test_seeded_food_is_reproducible() {
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 3);
        let mut a = GameEngine::with_seed(GameConfig::default(), 42);
        let mut b = GameEngine::with_seed(GameConfig::default(), 42);

        for _ in 0..20 {
            assert_eq!(a.generate_food(&snake), b.generate_food(&snake));
        }
    }

    #[test]
    fn test_food_avoids_snake_when_enabled() {
        let config = GameConfig {
            grid_width: 4,
            grid_height: 1,
            food_avoids_snake: true,
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 9);
        let snake = Snake::new(Position::new(2, 0), Direction::Right, 3);

        for _ in 0..50 {
            assert_eq!(engine.generate_food(&snake), Position::new(3, 0));
        }
    }

    #[test]
    fn test_food_on_full_grid_does_not_hang() {
        let config = GameConfig {
            grid_width: 2,
            grid_height: 1,
            initial_snake_length: 2,
            food_avoids_snake: true,
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 5);
        let snake = Snake::new(Position::new(1, 0), Direction::Right, 2);

        let food = engine.generate_food(&snake);
        assert!(snake.occupies(food));
    }
}

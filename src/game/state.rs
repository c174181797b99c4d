use std::collections::VecDeque;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold each axis back onto `[0, width) x [0, height)`
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }
}

/// The snake body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body }
    }

    /// Build a snake from explicit cells, head first. `None` if there are no cells.
    pub fn from_cells(cells: impl IntoIterator<Item = Position>) -> Option<Self> {
        let body: VecDeque<Position> = cells.into_iter().collect();
        (!body.is_empty()).then_some(Self { body })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Iterate over all cells, head first
    pub fn cells(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Check if any cell of the snake, head included, is at `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Position> {
        // Never shrink below one cell
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true once constructed)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction the next tick will move in
    pub direction: Direction,
    /// Direction the last tick moved in
    pub heading: Direction,
    /// Judge reversals against `heading` instead of `direction`, so two quick
    /// turns inside one tick cannot fold the snake back onto itself
    pub guard_double_turn: bool,
    pub food: Position,
    /// False until the first directional input of an episode
    pub running: bool,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl GameState {
    /// Create an idle game state moving in `direction`
    pub fn new(
        snake: Snake,
        direction: Direction,
        food: Position,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        Self {
            snake,
            direction,
            heading: direction,
            guard_double_turn: false,
            food,
            running: false,
            grid_width,
            grid_height,
        }
    }

    /// Steer the snake and start the episode.
    ///
    /// A request for the reverse of the current direction is ignored, but
    /// still starts play. With `guard_double_turn` the reverse of the last
    /// completed move is ignored instead.
    pub fn set_direction(&mut self, direction: Direction) {
        let current = if self.guard_double_turn {
            self.heading
        } else {
            self.direction
        };
        if !current.is_opposite(direction) {
            self.direction = direction;
        }
        self.running = true;
    }

    /// Check if a position is within the grid bounds.
    ///
    /// Movement wraps, so play never needs this; it backs the on-grid
    /// invariant checks for snake cells and food.
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

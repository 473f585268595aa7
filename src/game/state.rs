use super::action::Direction;
use super::config::Rgb;

/// A cell on the game grid
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

    /// Fold the position back onto a `width` x `height` torus
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }

    /// Move one cell in a direction, wrapping around the grid edges
    pub fn moved_in_direction(&self, direction: Direction, width: usize, height: usize) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy).wrapped(width, height)
    }
}

/// The food item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    pub position: Position,
    pub color: Rgb,
}

impl Apple {
    pub fn new(position: Position, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Occupied cells, with head at index 0
    pub positions: Vec<Position>,
    /// Direction used by the next move
    pub direction: Direction,
    /// Turn requested by input, applied after the next move
    pub next_direction: Option<Direction>,
    /// Target length; `positions` catches up one move at a time
    pub length: usize,
    pub color: Rgb,
}

impl Snake {
    /// Create a one-cell snake
    pub fn new(head: Position, direction: Direction, color: Rgb) -> Self {
        Self {
            positions: vec![head],
            direction,
            next_direction: None,
            length: 1,
            color,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.positions[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.positions[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn head_hits_body(&self) -> bool {
        self.collides_with_body(self.head())
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Buffer a turn for the next move.
    ///
    /// Returns `false` (and leaves the pending turn untouched) when the turn
    /// would reverse into the current heading.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.next_direction = Some(direction);
        true
    }

    /// Apply the buffered turn, if any
    pub fn update_direction(&mut self) {
        if let Some(next) = self.next_direction.take() {
            self.direction = next;
        }
    }

    /// Move one cell in the current direction on a wrapping grid.
    ///
    /// The tail is dropped only while the body is longer than the target length.
    pub fn advance(&mut self, width: usize, height: usize) {
        let new_head = self.head().moved_in_direction(self.direction, width, height);
        self.positions.insert(0, new_head);

        if self.positions.len() > self.length {
            self.positions.pop();
        }
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Shrink back to a single cell at `head`
    pub fn reset(&mut self, head: Position, direction: Direction) {
        self.positions.clear();
        self.positions.push(head);
        self.direction = direction;
        self.next_direction = None;
        self.length = 1;
    }

    /// Get the number of occupied cells
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Apple,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Apples eaten since the last reset
    pub score: u32,
    pub steps: u64,
    pub resets: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, apple: Apple, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            apple,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            resets: 0,
        }
    }

    pub fn total_cells(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Center cell, where a fresh snake starts
    pub fn center(&self) -> Position {
        Position::new((self.grid_width / 2) as i32, (self.grid_height / 2) as i32)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Cells not covered by the snake, in row-major order
    pub fn free_cells(&self) -> Vec<Position> {
        (0..self.grid_height as i32)
            .flat_map(|y| (0..self.grid_width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !self.snake.occupies(*pos))
            .collect()
    }

    pub fn is_board_full(&self) -> bool {
        self.snake.len() >= self.total_cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_from(cells: &[(i32, i32)], direction: Direction) -> Snake {
        let mut snake = Snake::new(Position::new(cells[0].0, cells[0].1), direction, Rgb::GREEN);
        snake.positions = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        snake.length = cells.len();
        snake
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_position_wraps_on_every_edge() {
        let (w, h) = (32, 24);
        assert_eq!(
            Position::new(31, 3).moved_in_direction(Direction::Right, w, h),
            Position::new(0, 3)
        );
        assert_eq!(
            Position::new(0, 3).moved_in_direction(Direction::Left, w, h),
            Position::new(31, 3)
        );
        assert_eq!(
            Position::new(4, 0).moved_in_direction(Direction::Up, w, h),
            Position::new(4, 23)
        );
        assert_eq!(
            Position::new(4, 23).moved_in_direction(Direction::Down, w, h),
            Position::new(4, 0)
        );
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, Rgb::GREEN);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.length, 1);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert!(snake.body_segments().is_empty());
        assert_eq!(snake.next_direction, None);
    }

    #[test]
    fn test_advance_drops_tail_at_target_length() {
        let mut snake = snake_from(&[(5, 5), (4, 5), (3, 5)], Direction::Right);

        snake.advance(10, 10);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(
            snake.positions,
            vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
        assert!(!snake.occupies(Position::new(3, 5)));
    }

    #[test]
    fn test_growth_lags_one_move() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, Rgb::GREEN);
        snake.grow();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.length, 2);

        snake.advance(10, 10);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.positions, vec![Position::new(6, 5), Position::new(5, 5)]);

        snake.advance(10, 10);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.positions, vec![Position::new(7, 5), Position::new(6, 5)]);
    }

    #[test]
    fn test_reverse_requests_are_rejected() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, Rgb::GREEN);

        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.next_direction, None);

        assert!(snake.request_direction(Direction::Up));
        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.next_direction, Some(Direction::Up));
    }

    #[test]
    fn test_direction_applies_only_on_update() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, Rgb::GREEN);
        snake.request_direction(Direction::Down);
        assert_eq!(snake.direction, Direction::Right);

        snake.update_direction();
        assert_eq!(snake.direction, Direction::Down);
        assert_eq!(snake.next_direction, None);

        // no pending turn keeps the heading
        snake.update_direction();
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn test_collision_detection() {
        let snake = snake_from(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(9, 9))); // empty
        assert!(!snake.head_hits_body());

        let looped = snake_from(&[(4, 5), (4, 4), (5, 4), (5, 5), (4, 5)], Direction::Down);
        assert!(looped.head_hits_body());
    }

    #[test]
    fn test_reset() {
        let mut snake = snake_from(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        snake.request_direction(Direction::Up);
        snake.reset(Position::new(1, 1), Direction::Left);

        assert_eq!(snake.positions, vec![Position::new(1, 1)]);
        assert_eq!(snake.length, 1);
        assert_eq!(snake.direction, Direction::Left);
        assert_eq!(snake.next_direction, None);
    }

    #[test]
    fn test_bounds_and_free_cells() {
        let state = GameState::new(
            snake_from(&[(1, 1), (0, 1)], Direction::Right),
            Apple::new(Position::new(2, 2), Rgb::RED),
            3,
            3,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(2, 2)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(3, 0)));

        let free = state.free_cells();
        assert_eq!(free.len(), 7);
        assert!(!free.contains(&Position::new(1, 1)));
        assert!(!free.contains(&Position::new(0, 1)));
        assert_eq!(state.center(), Position::new(1, 1));
        assert!(!state.is_board_full());
    }
}

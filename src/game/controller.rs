use std::time::Duration;

use tracing::{debug, info, trace};

use super::{
    action::{Command, Direction},
    clock::{GameClock, ScheduledTick, TickId},
    config::GameConfig,
    error::GameError,
    food::FoodSpawner,
    grid::Grid,
    state::{Cell, CollisionType, GameState, Snake},
};

/// Renders wrap the visual tick counter at this many frames
pub const VISUAL_CYCLE: u32 = 30;

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub grid: Grid,
    pub snake: &'a [Cell],
    /// `None` only once the board is full
    pub food: Option<Cell>,
    /// Visual tick counter, cycles through `0..VISUAL_CYCLE`
    pub frame: u32,
}

/// Drawing sink for the board. Called once per tick and whenever the
/// board is (re)initialized.
pub trait Renderer {
    fn render(&mut self, view: &BoardView<'_>);
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Collision(CollisionType),
    /// The snake filled every cell; counts as a win
    BoardFull,
}

/// Events for the UI chrome (overlay, score label)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A run has started; hide any overlay
    Started,
    /// The game was reset and waits for `start`
    Idle,
    ScoreChanged(u32),
    GameOver { final_score: u32, outcome: RunOutcome },
}

/// Result of delivering a tick to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale tick id, or the game is not running
    Ignored,
    Moved { ate_food: bool },
    Ended(RunOutcome),
}

/// Owns the snake, food, score and speed of one game and drives the
/// idle -> running -> game over lifecycle.
pub struct GameController<R: Renderer> {
    config: GameConfig,
    grid: Grid,
    renderer: R,
    spawner: FoodSpawner,
    clock: GameClock,

    state: GameState,
    initial_snake: Snake,
    snake: Snake,
    /// Direction change waiting for the next tick boundary
    queued_direction: Option<Direction>,
    food: Option<Cell>,
    score: u32,
    interval: Duration,
    frame: u32,

    notifications: Vec<Notification>,
}

impl<R: Renderer> GameController<R> {
    /// Build an idle game and draw its initial board
    pub fn new(config: GameConfig, renderer: R) -> Result<Self, GameError> {
        let grid = config.validate()?;
        let spawner = match config.seed {
            Some(seed) => FoodSpawner::seeded(seed),
            None => FoodSpawner::new(),
        };
        let snake = Snake::new(config.initial_snake.clone(), config.initial_direction)?;
        let interval = config.initial_interval();

        let mut controller = Self {
            config,
            grid,
            renderer,
            spawner,
            clock: GameClock::new(),
            state: GameState::Idle,
            initial_snake: snake.clone(),
            snake,
            queued_direction: None,
            food: None,
            score: 0,
            interval,
            frame: 0,
            notifications: Vec::new(),
        };
        controller.food = controller.spawner.spawn(&controller.grid, &controller.snake);
        controller.render();

        info!(cols = grid.cols, rows = grid.rows, "Game created");
        Ok(controller)
    }

    /// Dispatch an external command
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Reset => self.reset(),
            Command::Turn(direction) => self.turn(direction),
        }
    }

    /// Begin a run.
    ///
    /// While already running this only replaces the pending tick. After a
    /// game over the board is reset first.
    pub fn start(&mut self) {
        if self.state == GameState::GameOver {
            self.reset();
        }

        self.clock.cancel();
        if self.state == GameState::Idle {
            info!("Run started");
            self.state = GameState::Running;
            self.notifications.push(Notification::Started);
        }
        self.render();
        self.clock.schedule(self.interval);
    }

    /// Abort a running game and go back to idle
    pub fn stop(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        info!(score = self.score, "Run stopped");
        self.reset();
    }

    /// Reinitialize snake, score, speed and food, then wait idle for `start`
    pub fn reset(&mut self) {
        self.clock.cancel();

        self.snake.clone_from(&self.initial_snake);
        self.queued_direction = None;
        self.interval = self.config.initial_interval();
        self.set_score(0);
        self.food = self.spawner.spawn(&self.grid, &self.snake);
        self.state = GameState::Idle;

        debug!("Game reset");
        self.notifications.push(Notification::Idle);
        self.render();
    }

    /// Buffer a direction change for the next tick.
    ///
    /// Ignored after a game over, and when it would reverse the direction in
    /// effect. A later request in the same tick replaces an earlier one.
    pub fn turn(&mut self, direction: Direction) {
        if self.state == GameState::GameOver {
            return;
        }
        if direction.is_opposite(self.snake.direction()) {
            trace!(?direction, "Reversal ignored");
            return;
        }
        self.queued_direction = Some(direction);
    }

    /// Advance the game by one step if `id` is the pending tick
    pub fn tick(&mut self, id: TickId) -> TickOutcome {
        if self.state != GameState::Running || !self.clock.fire(id) {
            trace!(?id, "Stale tick ignored");
            return TickOutcome::Ignored;
        }

        if let Some(direction) = self.queued_direction.take() {
            self.snake.set_direction(direction);
        }

        let next = self.snake.peek_next_head(self.snake.direction());
        if !self.grid.contains(next) {
            return self.finish(RunOutcome::Collision(CollisionType::Wall));
        }

        let ate_food = self.food == Some(next);
        if self.snake.would_collide(next, ate_food) {
            return self.finish(RunOutcome::Collision(CollisionType::SelfCollision));
        }

        self.snake.advance(ate_food);

        if ate_food {
            self.set_score(self.score + self.config.food_reward);
            self.interval = self
                .interval
                .saturating_sub(self.config.interval_step())
                .max(self.config.min_interval());
            self.food = self.spawner.spawn(&self.grid, &self.snake);
            debug!(
                score = self.score,
                interval_ms = self.interval.as_millis() as u64,
                "Food eaten"
            );

            if self.food.is_none() {
                self.render();
                return self.finish(RunOutcome::BoardFull);
            }
        }

        self.render();
        self.clock.schedule(self.interval);
        TickOutcome::Moved { ate_food }
    }

    /// Take the notifications raised since the last call
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn pending_tick(&self) -> Option<ScheduledTick> {
        self.clock.pending()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Current board as handed to the renderer
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            grid: self.grid,
            snake: self.snake.cells(),
            food: self.food,
            frame: self.frame,
        }
    }

    fn finish(&mut self, outcome: RunOutcome) -> TickOutcome {
        self.clock.cancel();
        self.queued_direction = None;
        self.state = GameState::GameOver;

        info!(score = self.score, ?outcome, "Run over");
        self.notifications.push(Notification::GameOver {
            final_score: self.score,
            outcome,
        });
        TickOutcome::Ended(outcome)
    }

    fn set_score(&mut self, score: u32) {
        if score != self.score {
            self.score = score;
            self.notifications.push(Notification::ScoreChanged(score));
        }
    }

    fn render(&mut self) {
        self.frame = (self.frame + 1) % VISUAL_CYCLE;
        let view = BoardView {
            grid: self.grid,
            snake: self.snake.cells(),
            food: self.food,
            frame: self.frame,
        };
        self.renderer.render(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        last_snake: Vec<Cell>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, view: &BoardView<'_>) {
            self.frames += 1;
            self.last_snake = view.snake.to_vec();
        }
    }

    fn seeded() -> GameConfig {
        GameConfig {
            seed: Some(3),
            ..Default::default()
        }
    }

    fn controller() -> GameController<CountingRenderer> {
        GameController::new(seeded(), CountingRenderer::default()).unwrap()
    }

    fn fire(game: &mut GameController<CountingRenderer>) -> TickOutcome {
        let tick = game.pending_tick().expect("tick scheduled");
        game.tick(tick.id)
    }

    #[test]
    fn test_created_idle_and_rendered() {
        let game = controller();
        assert_eq!(game.state(), GameState::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.interval(), Duration::from_millis(130));
        assert_eq!(game.renderer().frames, 1);
        assert!(game.pending_tick().is_none());

        let food = game.food().unwrap();
        assert!(!game.snake().collides_with(food));
    }

    #[test]
    fn test_start_schedules_one_tick() {
        let mut game = controller();
        game.start();

        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.renderer().frames, 2);
        let tick = game.pending_tick().unwrap();
        assert_eq!(tick.delay, Duration::from_millis(130));
        assert_eq!(game.drain_notifications(), vec![Notification::Started]);
    }

    #[test]
    fn test_tick_ignored_while_idle() {
        let mut game = controller();
        game.start();
        let tick = game.pending_tick().unwrap();
        game.reset();

        assert_eq!(game.tick(tick.id), TickOutcome::Ignored);
        assert_eq!(game.snake().head(), Cell::new(5, 10));
    }

    #[test]
    fn test_restart_supersedes_pending_tick() {
        let mut game = controller();
        game.start();
        let first = game.pending_tick().unwrap();
        game.start();
        let second = game.pending_tick().unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(game.tick(first.id), TickOutcome::Ignored);
        assert!(matches!(game.tick(second.id), TickOutcome::Moved { .. }));
        assert_eq!(game.snake().head(), Cell::new(6, 10));
    }

    #[test]
    fn test_tail_vacate_move() {
        let mut game = controller();
        game.food = Some(Cell::new(0, 0));
        game.start();

        assert_eq!(fire(&mut game), TickOutcome::Moved { ate_food: false });
        assert_eq!(
            game.snake().cells(),
            &[Cell::new(6, 10), Cell::new(5, 10), Cell::new(4, 10)]
        );
        assert_eq!(game.renderer().last_snake, game.snake().cells());
    }

    #[test]
    fn test_growth() {
        let mut game = controller();
        game.food = Some(Cell::new(6, 10));
        game.start();
        game.drain_notifications();

        assert_eq!(fire(&mut game), TickOutcome::Moved { ate_food: true });
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.score(), 10);
        assert_eq!(game.interval(), Duration::from_millis(126));
        assert_eq!(game.pending_tick().unwrap().delay, Duration::from_millis(126));

        let food = game.food().unwrap();
        assert!(!game.snake().collides_with(food));
        assert_eq!(game.drain_notifications(), vec![Notification::ScoreChanged(10)]);
    }

    #[test]
    fn test_interval_clamped_to_floor() {
        let mut game = controller();
        game.interval = Duration::from_millis(62);
        game.food = Some(Cell::new(6, 10));
        game.start();
        fire(&mut game);
        assert_eq!(game.interval(), Duration::from_millis(60));

        game.food = Some(Cell::new(7, 10));
        fire(&mut game);
        assert_eq!(game.interval(), Duration::from_millis(60));
        assert_eq!(game.score(), 20);
    }

    #[test]
    fn test_wall_collision() {
        let mut game = controller();
        game.snake =
            Snake::new(vec![Cell::new(24, 3), Cell::new(23, 3)], Direction::Right).unwrap();
        game.food = Some(Cell::new(0, 0));
        game.score = 30;
        game.start();
        game.drain_notifications();
        let frames = game.renderer().frames;

        assert_eq!(
            fire(&mut game),
            TickOutcome::Ended(RunOutcome::Collision(CollisionType::Wall))
        );
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.score(), 30);
        assert!(game.pending_tick().is_none());
        assert_eq!(game.renderer().frames, frames);
        assert_eq!(
            game.drain_notifications(),
            vec![Notification::GameOver {
                final_score: 30,
                outcome: RunOutcome::Collision(CollisionType::Wall),
            }]
        );
    }

    #[test]
    fn test_self_collision() {
        let mut game = controller();
        // Heading left along row 5 with the body folded back under row 6
        game.snake = Snake::new(
            vec![
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6),
                Cell::new(4, 6),
            ],
            Direction::Left,
        )
        .unwrap();
        game.food = Some(Cell::new(0, 0));
        game.start();
        game.turn(Direction::Down);
        fire(&mut game);

        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.snake().len(), 5);
    }

    #[test]
    fn test_start_after_game_over_resets() {
        let mut game = controller();
        game.score = 50;
        game.finish(RunOutcome::Collision(CollisionType::Wall));
        game.drain_notifications();

        game.start();
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().head(), Cell::new(5, 10));
        assert_eq!(
            game.drain_notifications(),
            vec![
                Notification::ScoreChanged(0),
                Notification::Idle,
                Notification::Started
            ]
        );
    }

    #[test]
    fn test_only_last_turn_per_tick_applies() {
        let mut game = controller();
        game.food = Some(Cell::new(0, 0));
        game.start();

        game.turn(Direction::Up);
        game.turn(Direction::Left); // reverses the direction in effect
        game.turn(Direction::Down);
        fire(&mut game);

        assert_eq!(game.snake().head(), Cell::new(5, 11));
        assert_eq!(game.snake().direction(), Direction::Down);
    }

    #[test]
    fn test_turn_ignored_after_game_over() {
        let mut game = controller();
        game.finish(RunOutcome::Collision(CollisionType::Wall));
        game.turn(Direction::Up);
        assert_eq!(game.queued_direction, None);
    }

    #[test]
    fn test_stop_returns_to_idle() {
        let mut game = controller();
        game.start();
        game.drain_notifications();
        game.stop();

        assert_eq!(game.state(), GameState::Idle);
        assert!(game.pending_tick().is_none());
        assert_eq!(game.drain_notifications(), vec![Notification::Idle]);
    }

    #[test]
    fn test_stop_is_noop_when_idle() {
        let mut game = controller();
        let frames = game.renderer().frames;
        game.stop();
        assert_eq!(game.renderer().frames, frames);
        assert!(game.drain_notifications().is_empty());
    }

    #[test]
    fn test_handle_dispatches() {
        let mut game = controller();
        game.handle(Command::Turn(Direction::Down));
        assert_eq!(game.queued_direction, Some(Direction::Down));
        game.handle(Command::Start);
        assert_eq!(game.state(), GameState::Running);
        game.handle(Command::Reset);
        assert_eq!(game.state(), GameState::Idle);
    }

    #[test]
    fn test_frame_counter_wraps() {
        let mut game = controller();
        for _ in 0..(VISUAL_CYCLE * 2) {
            game.reset();
        }
        assert!(game.view().frame < VISUAL_CYCLE);
    }
}

use log::{debug, info};
use rand::Rng;

use crate::{Coords, TermInt};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::snake::Snake;
use crate::surface::{Key, Paint, Surface, TextStyle};
use crate::term::{MIN_HEIGHT, MIN_WIDTH};

const TITLE: &str = "| simple snake game |";
const GAME_OVER: &str = "GAME OVER!";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Over,
}

/// How a session ended, with the final snake length.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit { length: usize },
    GameOver { length: usize },
}

pub struct Game<S: Surface, R: Rng> {
    surface: S,
    rng: R,
    height: TermInt,
    width: TermInt,
    snake: Snake,
    apple: Coords,
    state: GameState,
    debug: bool,
}

impl<S: Surface, R: Rng> Game<S, R> {
    pub fn new(mut surface: S, mut rng: R, config: &Config) -> Result<Self> {
        let (height, width) = surface.geometry();
        if height < MIN_HEIGHT || width < MIN_WIDTH {
            return Err(Error::TerminalTooSmall { rows: height, cols: width });
        }

        surface.draw_border(TITLE)?;

        let (y, x) = random_interior(&mut rng, height, width);
        let snake = Snake::new(y, x, config.step)?;
        debug!("Snake starts at ({}, {})", y, x);

        let mut game = Game {
            surface,
            rng,
            height,
            width,
            snake,
            apple: (0, 0),
            state: GameState::Running,
            debug: false,
        };
        game.spawn_apple()?;
        game.surface.refresh()?;

        Ok(game)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Coords {
        self.apple
    }

    /// Plays until quit or game over. The first tick runs without a key so
    /// the snake shows up before anything is pressed.
    pub fn run(&mut self) -> Result<Outcome> {
        let mut key = None;

        loop {
            self.tick(key)?;
            if self.state == GameState::Over {
                break;
            }

            match self.surface.read_key()? {
                Key::Quit => break,
                k => key = Some(k),
            }
        }

        let length = self.snake.len();
        match self.state {
            GameState::Running => {
                info!("Quit with a snake of length {}", length);
                Ok(Outcome::Quit { length })
            }
            GameState::Over => {
                self.game_over()?;
                // Keys typed before the banner went up don't dismiss it
                while self.surface.poll_key()?.is_some() {}
                self.surface.read_key()?;
                Ok(Outcome::GameOver { length })
            }
        }
    }

    /// One read-process-render cycle for an already read key.
    pub fn tick(&mut self, key: Option<Key>) -> Result<()> {
        if key == Some(Key::Debug) && !self.debug {
            info!("Debug dump enabled");
            self.debug = true;
        }

        if let Some((y, x)) = key.and_then(|k| k.step(self.snake.head())) {
            if self.snake.body_collision(y, x) {
                info!("Snake ran into itself at ({}, {})", y, x);
                self.state = GameState::Over;
            }
            self.snake.clear(&mut self.surface)?;
            self.snake.move_to(y, x);
        }

        if self.snake.head() == self.apple {
            let (y, x) = self.apple;
            self.snake.grow(y, x)?;
            debug!("Apple eaten, length is now {}", self.snake.len());
            self.spawn_apple()?;
        }

        self.snake.render(&mut self.surface)?;

        if self.debug {
            self.print_debug()?;
        }

        if self.out_of_bounds(self.snake.head()) {
            info!("Snake hit the wall at {:?}", self.snake.head());
            self.state = GameState::Over;
        }

        Ok(())
    }

    fn out_of_bounds(&self, (y, x): Coords) -> bool {
        y <= 0 || y >= self.height as i32 - 1 || x <= 0 || x >= self.width as i32 - 1
    }

    /// Any interior cell other than the one just eaten. The snake body is
    /// not avoided. The minimum window size leaves more than one interior
    /// cell, so the re-roll always ends.
    fn spawn_apple(&mut self) -> Result<()> {
        let eaten = self.apple;

        let mut apple = random_interior(&mut self.rng, self.height, self.width);
        while apple == eaten {
            apple = random_interior(&mut self.rng, self.height, self.width);
        }

        self.apple = apple;
        debug!("Apple spawned at {:?}", apple);
        self.surface.draw_cell(apple, Paint::Apple)?;
        self.surface.refresh()
    }

    fn game_over(&mut self) -> Result<()> {
        let y = (self.height as i32 - 1) / 2;
        let x = ((self.width as i32 - 1) - GAME_OVER.len() as i32) / 2;

        self.surface.print_text((y, x), GAME_OVER, TextStyle::Alert)?;
        self.surface.refresh()
    }

    fn print_debug(&mut self) -> Result<()> {
        let array: String = self.snake.segments().iter()
            .map(|(y, x)| format!("[ {:3} {:3} ] ", y, x))
            .collect();

        let lines = [
            "DEBUG".to_string(),
            format!("snake length: {} (max {})", self.snake.len(), self.snake.capacity()),
            format!("snake array: {}", array),
        ];

        self.surface.print_debug(&lines)?;
        self.surface.refresh()
    }
}

fn random_interior<R: Rng>(rng: &mut R, height: TermInt, width: TermInt) -> Coords {
    let y = rng.gen_range(1..height as i32 - 1);
    let x = rng.gen_range(1..width as i32 - 1);
    (y, x)
}

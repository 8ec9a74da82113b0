use log::debug;

use crate::Coords;
use crate::error::{Error, Result};
use crate::surface::{Paint, Surface};

/// Segment slots added per reallocation are `2 * step`.
pub const DEFAULT_STEP: usize = 5;

/// Snake body, head first. `capacity` is the number of segment slots the
/// body has been sized for; it grows in chunks and never shrinks.
pub struct Snake {
    body: Vec<Coords>,
    capacity: usize,
    step: usize,
}

impl Snake {
    pub fn new(y: i32, x: i32, step: usize) -> Result<Self> {
        let step = step.max(1);
        let mut body = Vec::new();
        reserve(&mut body, step)?;
        body.push((y, x));

        Ok(Snake { body, capacity: step, step })
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn segments(&self) -> &[Coords] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Shifts every segment one place toward the tail and puts the head at
    /// `(y, x)`. The old tail falls off. The caller validates the new head.
    pub fn move_to(&mut self, y: i32, x: i32) {
        self.body.rotate_right(1);
        self.body[0] = (y, x);
    }

    /// Appends a tail segment at `(y, x)`.
    pub fn grow(&mut self, y: i32, x: i32) -> Result<()> {
        if self.body.len() == self.capacity {
            let new_capacity = self.capacity.saturating_add(self.step.saturating_mul(2));
            reserve(&mut self.body, new_capacity)?;
            debug!("Snake body grown from {} to {} slots", self.capacity, new_capacity);
            self.capacity = new_capacity;
        }

        self.body.push((y, x));
        Ok(())
    }

    /// Whether `(y, x)` hits any segment behind the head.
    pub fn body_collision(&self, y: i32, x: i32) -> bool {
        self.body[1..].contains(&(y, x))
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<()> {
        for pos in &self.body {
            surface.draw_cell(*pos, Paint::Snake)?;
        }
        surface.refresh()
    }

    pub fn clear<S: Surface>(&self, surface: &mut S) -> Result<()> {
        for pos in &self.body {
            surface.clear_cell(*pos)?;
        }
        surface.refresh()
    }
}

fn reserve(body: &mut Vec<Coords>, total: usize) -> Result<()> {
    let additional = total.saturating_sub(body.len());
    body.try_reserve_exact(additional)
        .map_err(|_| Error::OutOfMemory { requested: total })
}

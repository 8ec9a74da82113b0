//! In-memory surface for driving the game from tests.

use std::collections::{HashMap, VecDeque};

use crate::{Coords, TermInt};
use crate::error::Result;
use crate::surface::{Key, Paint, Surface, TextStyle};

pub struct ScriptedSurface {
    height: TermInt,
    width: TermInt,
    keys: VecDeque<Key>,
    pending: VecDeque<Key>,
    cells: HashMap<Coords, Paint>,
    pub texts: Vec<(Coords, String, TextStyle)>,
    pub debug_lines: Vec<String>,
    pub title: Option<String>,
    pub refreshes: usize,
    pub keys_read: usize,
    pub last_read: Option<Key>,
}

impl ScriptedSurface {
    pub fn new(height: TermInt, width: TermInt, keys: Vec<Key>) -> Self {
        ScriptedSurface {
            height,
            width,
            keys: keys.into(),
            pending: VecDeque::new(),
            cells: HashMap::new(),
            texts: vec![],
            debug_lines: vec![],
            title: None,
            refreshes: 0,
            keys_read: 0,
            last_read: None,
        }
    }

    /// Keys already typed and waiting; only `poll_key` sees them.
    pub fn with_pending(mut self, keys: Vec<Key>) -> Self {
        self.pending = keys.into();
        self
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn unread(&self) -> Vec<Key> {
        self.keys.iter().copied().collect()
    }

    pub fn cell(&self, pos: Coords) -> Option<Paint> {
        self.cells.get(&pos).copied()
    }

    pub fn painted(&self, paint: Paint) -> usize {
        self.cells.values().filter(|p| **p == paint).count()
    }
}

impl Surface for ScriptedSurface {
    fn geometry(&self) -> (TermInt, TermInt) {
        (self.height, self.width)
    }

    fn draw_border(&mut self, title: &str) -> Result<()> {
        self.title = Some(title.to_string());
        Ok(())
    }

    fn clear_cell(&mut self, pos: Coords) -> Result<()> {
        self.cells.remove(&pos);
        Ok(())
    }

    fn draw_cell(&mut self, pos: Coords, paint: Paint) -> Result<()> {
        self.cells.insert(pos, paint);
        Ok(())
    }

    fn print_text(&mut self, pos: Coords, text: &str, style: TextStyle) -> Result<()> {
        self.texts.push((pos, text.to_string(), style));
        Ok(())
    }

    fn print_debug(&mut self, lines: &[String]) -> Result<()> {
        self.debug_lines = lines.to_vec();
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.refreshes += 1;
        Ok(())
    }

    // Running out of script reads as a quit, so every session ends
    fn read_key(&mut self) -> Result<Key> {
        self.keys_read += 1;
        let key = self.keys.pop_front().unwrap_or(Key::Quit);
        self.last_read = Some(key);
        Ok(key)
    }

    fn poll_key(&mut self) -> Result<Option<Key>> {
        Ok(self.pending.pop_front())
    }
}

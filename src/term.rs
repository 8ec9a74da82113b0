use crate::{Coords, TermInt};
use crate::error::{Error, Result};
use crate::surface::{Key, Paint, Surface, TextStyle};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::{Attribute, Color};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, read, poll};
use log::{info, warn};

/// Smallest window that still fits the border and the game over banner.
pub const MIN_HEIGHT: TermInt = 5;
pub const MIN_WIDTH: TermInt = 14;

const DEBUG_COLUMN: TermInt = 5;

/// Where the game window sits on the screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub height: TermInt,
    pub width: TermInt,
    pub top: TermInt,
    pub left: TermInt,
}

impl Layout {
    pub fn fit(rows: TermInt, cols: TermInt, margin: TermInt) -> Result<Self> {
        let height = rows.checked_sub(margin / 2);
        let width = cols.checked_sub(margin.saturating_mul(2));

        match (height, width) {
            (Some(height), Some(width)) if height >= MIN_HEIGHT && width >= MIN_WIDTH => {
                Ok(Layout { height, width, top: margin / 4, left: margin })
            }
            _ => Err(Error::TerminalTooSmall { rows, cols }),
        }
    }

    /// Whether `lines` rows fit on the screen above the window.
    fn fits_above(&self, lines: usize) -> bool {
        lines <= self.top as usize
    }

    /// Screen `(col, row)` for a window `(row, col)`, if it lands on screen.
    fn to_screen(&self, pos: Coords) -> Option<(TermInt, TermInt)> {
        let row = TermInt::try_from(self.top as i32 + pos.0).ok()?;
        let col = TermInt::try_from(self.left as i32 + pos.1).ok()?;
        Some((col, row))
    }
}

pub struct TermManager {
    layout: Layout,
    screen_width: TermInt,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    /// Sizes the window first, so a terminal that is too small is reported
    /// before the screen is touched.
    pub fn new(margin: TermInt) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        let layout = Layout::fit(rows, cols, margin)?;
        info!("Terminal is {}x{}, game window {:?}", cols, rows, layout);

        let mut term = TermManager { layout, screen_width: cols, stdout: stdout(), active: false };
        term.setup()?;
        Ok(term)
    }

    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        if let Some((col, row)) = self.layout.to_screen(pos) {
            queue!(self.stdout, cursor::MoveTo(col, row), style::Print(ch))?;
        }
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Failed to restore the terminal: {}", e);
        }
    }
}

impl Surface for TermManager {
    fn geometry(&self) -> (TermInt, TermInt) {
        (self.layout.height, self.layout.width)
    }

    fn draw_border(&mut self, title: &str) -> Result<()> {
        let end_y = self.layout.height as i32 - 1;
        let end_x = self.layout.width as i32 - 1;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((0, x), ch)?;
            self.print_at((end_y, x), ch)?;
        }

        for y in 1..end_y {
            self.print_at((y, 0), '|')?;
            self.print_at((y, end_x), '|')?;
        }

        self.print_text((0, 5), title, TextStyle::Plain)?;
        self.refresh()
    }

    fn clear_cell(&mut self, pos: Coords) -> Result<()> {
        self.print_at(pos, ' ')
    }

    fn draw_cell(&mut self, pos: Coords, paint: Paint) -> Result<()> {
        let color = match paint {
            Paint::Snake => Color::Green,
            Paint::Apple => Color::Red,
        };

        if let Some((col, row)) = self.layout.to_screen(pos) {
            queue!(
                self.stdout,
                cursor::MoveTo(col, row),
                style::SetBackgroundColor(color),
                style::Print(' '),
                style::ResetColor
            )?;
        }
        Ok(())
    }

    fn print_text(&mut self, pos: Coords, text: &str, text_style: TextStyle) -> Result<()> {
        let (col, row) = match self.layout.to_screen(pos) {
            Some(screen) => screen,
            None => return Ok(()),
        };

        queue!(self.stdout, cursor::MoveTo(col, row))?;
        match text_style {
            TextStyle::Plain => queue!(self.stdout, style::Print(text))?,
            TextStyle::Alert => queue!(
                self.stdout,
                style::SetForegroundColor(Color::Red),
                style::SetBackgroundColor(Color::Black),
                style::SetAttribute(Attribute::SlowBlink),
                style::Print(text),
                style::SetAttribute(Attribute::Reset),
                style::ResetColor
            )?,
        }
        Ok(())
    }

    fn print_debug(&mut self, lines: &[String]) -> Result<()> {
        if !self.layout.fits_above(lines.len()) {
            return Ok(());
        }

        let room = self.screen_width.saturating_sub(DEBUG_COLUMN) as usize;

        for (row, line) in lines.iter().enumerate() {
            let line: String = line.chars().take(room).collect();
            queue!(
                self.stdout,
                cursor::MoveTo(DEBUG_COLUMN, row as TermInt),
                terminal::Clear(ClearType::UntilNewLine),
                style::Print(line)
            )?;
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(ev) = read()? {
                if let Some(key) = map_key(&ev) {
                    return Ok(key);
                }
            }
        }
    }

    fn poll_key(&mut self) -> Result<Option<Key>> {
        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                if let Some(key) = map_key(&ev) {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

/// Key presses only; releases and repeats are dropped.
pub fn map_key(ev: &KeyEvent) -> Option<Key> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    let key = match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char('q') => Key::Quit,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::F(1) => Key::Debug,
        _ => Key::Other,
    };
    Some(key)
}

//! Canvas - an off-screen character grid
//!
//! Frames are drawn here first, then either flushed to the terminal or
//! printed as plain lines.

use unicode_width::UnicodeWidthChar;

/// What a cell is drawn as
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    #[default]
    Plain,
    Border,
    Title,
    Tab,
    ActiveTab,
    Text,
    Status,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    style: Style,
    /// Right half of a wide character
    continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::Plain,
            continuation: false,
        }
    }
}

/// Fixed-size character grid
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Set one cell, ignoring positions off the grid
    pub fn put(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell {
                ch,
                style,
                continuation: false,
            };
        }
    }

    /// Write text clipped to `max_width` columns, returning the columns used
    pub fn text(&mut self, x: u16, y: u16, text: &str, max_width: u16, style: Style) -> u16 {
        let mut used: u16 = 0;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if used + w > max_width {
                break;
            }
            self.put(x + used, y, ch, style);
            if w == 2 {
                if let Some(i) = self.index(x + used + 1, y) {
                    self.cells[i] = Cell {
                        ch: ' ',
                        style,
                        continuation: true,
                    };
                }
            }
            used += w;
        }
        used
    }

    /// Fill a horizontal run with one character
    pub fn hline(&mut self, x: u16, y: u16, len: u16, ch: char, style: Style) {
        for dx in 0..len {
            self.put(x + dx, y, ch, style);
        }
    }

    /// Row `y` split into runs of equal style
    pub fn runs(&self, y: u16) -> Vec<(Style, String)> {
        let mut runs: Vec<(Style, String)> = Vec::new();
        if y >= self.height {
            return runs;
        }
        let start = y as usize * self.width as usize;
        for cell in &self.cells[start..start + self.width as usize] {
            if cell.continuation {
                continue;
            }
            match runs.last_mut() {
                Some((style, text)) if *style == cell.style => text.push(cell.ch),
                _ => runs.push((cell.style, cell.ch.to_string())),
            }
        }
        runs
    }

    /// Plain text of every row, trailing blanks trimmed
    pub fn lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let line: String = self.runs(y).into_iter().map(|(_, text)| text).collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

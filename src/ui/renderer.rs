//! Dock window renderer.
//!
//! Draws a [`DockWindow`] into a [`Canvas`], scaling the window's logical
//! coordinates to terminal cells, and flushes canvases to the terminal.
//!
//! ```text
//! begin_frame()  → Hide cursor, disable autowrap, start sync
//!     ↓
//! flush canvas   → One styled run at a time
//!     ↓
//! end_frame()    → Show cursor, enable autowrap, end sync, flush
//! ```

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::config::ColorScheme;
use crate::layout::DockHost;
use crate::wm::{DockWindow, Rect, TabStack};

use super::canvas::{Canvas, Style};

/// Begin a render frame (synchronized update, hide cursor, disable autowrap)
fn begin_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?2026h")?;
    write!(out, "\x1b[?7l")?;
    execute!(out, Hide)?;
    Ok(())
}

/// End a render frame (show cursor, enable autowrap, end synchronized update, flush)
fn end_frame<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Show)?;
    write!(out, "\x1b[?7h")?;
    write!(out, "\x1b[?2026l")?;
    out.flush()?;
    Ok(())
}

/// Execute a render operation with frame guards, ensuring cleanup on error
fn with_frame<W: Write, F, R>(out: &mut W, f: F) -> io::Result<R>
where
    F: FnOnce(&mut W) -> io::Result<R>,
{
    begin_frame(out)?;
    let result = f(out);
    let _ = end_frame(out);
    result
}

/// Border characters
struct BorderChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderChars {
    fn single() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        }
    }
}

/// Cell rectangle of a stack
#[derive(Clone, Copy, Debug, PartialEq)]
struct CellRect {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

/// Map a logical rectangle onto the cell grid
///
/// Edges are rounded independently so neighbouring stacks share borders
/// without gaps.
fn to_cells(rect: Rect, scale_x: f64, scale_y: f64) -> CellRect {
    let x0 = (rect.x * scale_x).round();
    let y0 = (rect.y * scale_y).round();
    let x1 = ((rect.x + rect.width) * scale_x).round();
    let y1 = ((rect.y + rect.height) * scale_y).round();
    CellRect {
        x: x0 as u16,
        y: y0 as u16,
        width: (x1 - x0).max(0.0) as u16,
        height: (y1 - y0).max(0.0) as u16,
    }
}

/// Dock window renderer
pub struct DockRenderer {
    initialized: bool,
    pub color_scheme: ColorScheme,
}

impl DockRenderer {
    pub fn with_color_scheme(color_scheme: ColorScheme) -> Self {
        Self {
            initialized: false,
            color_scheme,
        }
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen, Clear(ClearType::All))?;
        stdout.flush()?;

        self.initialized = true;
        Ok(())
    }

    /// Cleanup
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }

        let mut stdout = io::stdout();
        write!(stdout, "\x1b[?7h")?;
        write!(stdout, "\x1b[?2026l")?;
        stdout.flush()?;

        execute!(stdout, Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        self.initialized = false;
        Ok(())
    }

    /// Get terminal size
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Draw the window with a status line on the last row
    pub fn draw(&self, window: &DockWindow, width: u16, height: u16, status: &str) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let body_height = height.saturating_sub(1);
        if window.width > 0.0 && window.height > 0.0 {
            let scale_x = width as f64 / window.width;
            let scale_y = body_height as f64 / window.height;
            for (stack, rect) in window.stacks() {
                let cells = to_cells(rect, scale_x, scale_y);
                self.draw_stack(&mut canvas, window, stack, cells);
            }
        }
        if height > 0 {
            canvas.hline(0, body_height, width, ' ', Style::Status);
            canvas.text(1, body_height, status, width.saturating_sub(2), Style::Status);
        }
        canvas
    }

    /// Draw one tab stack: frame, title, tab strip and the front panel's id
    fn draw_stack(&self, canvas: &mut Canvas, window: &DockWindow, stack: &TabStack, cells: CellRect) {
        if cells.width < 2 || cells.height < 2 {
            return;
        }
        let Some(front) = stack.front().and_then(|id| window.dock(id)) else {
            return;
        };
        let chars = BorderChars::single();
        let border = Style::Border;
        let CellRect { x, y, width, height } = cells;
        let right = x + width - 1;
        let bottom = y + height - 1;

        canvas.put(x, y, chars.top_left, border);
        canvas.hline(x + 1, y, width - 2, chars.horizontal, border);
        canvas.put(right, y, chars.top_right, border);
        for row in y + 1..bottom {
            canvas.put(x, row, chars.vertical, border);
            canvas.put(right, row, chars.vertical, border);
        }
        canvas.put(x, bottom, chars.bottom_left, border);
        canvas.hline(x + 1, bottom, width - 2, chars.horizontal, border);
        canvas.put(right, bottom, chars.bottom_right, border);

        let inner = width.saturating_sub(2);
        if front.title_bar && inner > 2 {
            canvas.text(x + 1, y, &format!(" {} ", front.title), inner, Style::Title);
        }

        let mut row = y + 1;
        if stack.docks.len() > 1 && row < bottom {
            let mut col = x + 1;
            for (i, id) in stack.docks.iter().enumerate() {
                let Some(dock) = window.dock(*id) else {
                    continue;
                };
                let style = if i == stack.current { Style::ActiveTab } else { Style::Tab };
                let room = (x + 1 + inner).saturating_sub(col);
                if room == 0 {
                    break;
                }
                col += canvas.text(col, row, &format!(" {} ", dock.title), room, style);
            }
            row += 1;
        }

        if row < bottom {
            let geometry = window.query_geometry(front.id);
            let label = format!("{} {}x{}", front.content.id, geometry.width, geometry.height);
            canvas.text(x + 1, row, &label, inner, Style::Text);
        }
    }

    /// Flush a canvas to the terminal
    pub fn render(&mut self, canvas: &Canvas) -> io::Result<()> {
        if !self.initialized {
            self.init()?;
        }
        let stdout = io::stdout();
        let mut out = io::BufWriter::with_capacity(65536, stdout.lock());

        with_frame(&mut out, |out| {
            for y in 0..canvas.height() {
                execute!(out, MoveTo(0, y))?;
                for (style, text) in canvas.runs(y) {
                    self.apply_style(out, style)?;
                    write!(out, "{}", text)?;
                }
            }
            execute!(out, ResetColor)?;
            Ok(())
        })
    }

    fn apply_style<W: Write>(&self, out: &mut W, style: Style) -> io::Result<()> {
        let cs = &self.color_scheme;
        execute!(out, ResetColor)?;
        match style {
            Style::Plain => {}
            Style::Border => execute!(out, SetForegroundColor(cs.border.to_crossterm()))?,
            Style::Title => execute!(out, SetForegroundColor(cs.title_fg.to_crossterm()))?,
            Style::Tab => execute!(out, SetForegroundColor(cs.tab_inactive_fg.to_crossterm()))?,
            Style::ActiveTab => execute!(
                out,
                SetBackgroundColor(cs.tab_active_bg.to_crossterm()),
                SetForegroundColor(cs.tab_active_fg.to_crossterm())
            )?,
            Style::Text => execute!(out, SetForegroundColor(cs.text_fg.to_crossterm()))?,
            Style::Status => execute!(
                out,
                SetBackgroundColor(cs.status_bar_bg.to_crossterm()),
                SetForegroundColor(cs.status_bar_fg.to_crossterm())
            )?,
        }
        Ok(())
    }
}

impl Drop for DockRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

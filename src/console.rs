use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{self, Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use lifebox::{
    FrameInput, Host, Key, MouseState, Rgba, Surface,
    canvas::GLYPH_HEIGHT,
};
use std::io::{self, Write};

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// A [`Host`] on the terminal
///
/// Each character cell shows two pixels stacked vertically, so the screen
/// is as many pixels wide as there are columns and twice as tall as there
/// are rows. Glyph cells line up with character cells.
pub struct ConsoleHost {
    cols: u16,
    rows: u16,
    mouse: MouseState,
}
impl ConsoleHost {
    pub fn new() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        terminal::enable_raw_mode()?;
        // from here on, drop restores the terminal
        let host = Self {
            cols,
            rows,
            mouse: MouseState::default(),
        };
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(host)
    }

    fn map_key(ev: KeyEvent) -> Key {
        match ev.code {
            // CTRL+C
            KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Key::Escape,
            KeyCode::Esc => Key::Escape,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }

    fn track_mouse(&mut self, ev: MouseEvent) {
        self.mouse.x = ev.column as i32;
        self.mouse.y = ev.row as i32 * GLYPH_HEIGHT as i32;

        let (button, held) = match ev.kind {
            MouseEventKind::Down(button) | MouseEventKind::Drag(button) => (button, true),
            MouseEventKind::Up(button) => (button, false),
            _ => return,
        };
        match button {
            MouseButton::Left => self.mouse.left = held,
            MouseButton::Right => self.mouse.right = held,
            MouseButton::Middle => self.mouse.middle = held,
        }
    }
}

impl Host for ConsoleHost {
    fn screen_size(&self) -> (u32, u32) {
        (self.cols as u32, self.rows as u32 * GLYPH_HEIGHT)
    }

    fn poll_input(&mut self) -> io::Result<FrameInput> {
        let mut key = None;
        // drain everything pending; only the latest key press counts
        while event::poll(std::time::Duration::from_secs(0))? {
            match event::read()? {
                event::Event::Key(ev) if ev.kind == KeyEventKind::Press => {
                    key = Some(Self::map_key(ev));
                }
                event::Event::Mouse(ev) => self.track_mouse(ev),
                _ => {}
            }
        }
        Ok(FrameInput {
            key,
            mouse: self.mouse,
        })
    }

    fn present(&mut self, screen: &Surface) -> io::Result<()> {
        let mut stdout = io::BufWriter::new(io::stdout().lock());
        let (mut fg, mut bg) = (None, None);
        for row in 0..self.rows {
            queue!(stdout, cursor::MoveTo(0, row))?;
            let top_y = row as u32 * GLYPH_HEIGHT;
            for col in 0..self.cols as u32 {
                let top = screen.pixel(col, top_y).unwrap_or(Rgba::BLACK);
                let bottom = screen.pixel(col, top_y + 1).unwrap_or(top);
                let (ch, want_fg, want_bg) = match screen.glyph(col, row as u32) {
                    Some(glyph) => (glyph.ch, glyph.color, top),
                    None => (HALF_BLOCK, top, bottom),
                };

                if fg != Some(want_fg) {
                    queue!(stdout, SetForegroundColor(to_color(want_fg)))?;
                    fg = Some(want_fg);
                }
                if bg != Some(want_bg) {
                    queue!(stdout, SetBackgroundColor(to_color(want_bg)))?;
                    bg = Some(want_bg);
                }
                queue!(stdout, Print(ch))?;
            }
        }
        queue!(stdout, style::ResetColor)?;
        stdout.flush()
    }
}

impl Drop for ConsoleHost {
    fn drop(&mut self) {
        // if we can enable it, we should be able to disable it
        let _ = execute!(
            io::stdout(),
            style::ResetColor,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[inline]
fn to_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

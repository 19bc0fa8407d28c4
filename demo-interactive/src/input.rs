//! Keyboard and mouse handling on the input thread
//!
//! Every event takes the cursor lock or the grid lock briefly and never both
//! at once. While a mouse button is held, each event also strokes the brush
//! at the cursor, so dragging paints a continuous line.

use crate::view::{screen_to_grid, Picker};
use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use falling_sand_core::{Cursor, SimContext};
use ratatui::layout::Rect;
use std::time::Duration;
use tracing::debug;

/// How long a poll waits before rechecking the shutdown flag
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Mouse button state carried between events.
#[derive(Debug, Default)]
pub struct Controls {
    /// Left button held: paint with the brush
    painting: bool,
    /// Middle button held: erase
    erasing: bool,
}

/// Read events until shutdown is requested.
pub fn run(ctx: &SimContext) -> Result<()> {
    let mut controls = Controls::default();
    while ctx.is_running() {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                controls.on_key(ctx, key.code);
            }
            Event::Mouse(mouse) => {
                let (columns, rows) = crossterm::terminal::size()?;
                controls.on_mouse(ctx, mouse, Rect::new(0, 0, columns, rows));
            }
            _ => {}
        }
    }
    debug!("Input thread stopped");
    Ok(())
}

impl Controls {
    pub fn on_key(&mut self, ctx: &SimContext, code: KeyCode) {
        if ctx.cursor().is_picker_open() {
            Self::on_picker_key(ctx, code);
            return;
        }

        match code {
            KeyCode::Char('q') => ctx.request_shutdown(),
            KeyCode::Up => ctx.update_cursor(|c| c.move_by(0, -1)),
            KeyCode::Down => ctx.update_cursor(|c| c.move_by(0, 1)),
            KeyCode::Left => ctx.update_cursor(|c| c.move_by(-1, 0)),
            KeyCode::Right => ctx.update_cursor(|c| c.move_by(1, 0)),
            KeyCode::Char(' ') => {
                ctx.paint_at_cursor();
            }
            KeyCode::Char('c') => ctx.clear_grid(),
            KeyCode::Char('+') => ctx.update_cursor(Cursor::grow_brush),
            KeyCode::Char('-') => ctx.update_cursor(Cursor::shrink_brush),
            KeyCode::Tab => {
                ctx.update_cursor(Cursor::open_picker);
                debug!("Cell picker opened");
            }
            KeyCode::Char(c) => {
                if let Some(digit) = c.to_digit(10) {
                    ctx.update_cursor(|cursor| cursor.select_brush_by_index(digit as usize));
                }
            }
            _ => {}
        }
        self.stroke(ctx);
    }

    fn on_picker_key(ctx: &SimContext, code: KeyCode) {
        match code {
            KeyCode::Tab | KeyCode::Esc => {
                ctx.update_cursor(Cursor::close_picker);
                debug!("Cell picker closed");
            }
            KeyCode::Left => ctx.update_cursor(Cursor::prev_brush),
            KeyCode::Right => ctx.update_cursor(Cursor::next_brush),
            KeyCode::Char('q') => ctx.request_shutdown(),
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, ctx: &SimContext, mouse: MouseEvent, screen: Rect) {
        if ctx.cursor().is_picker_open() {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                if let Some(kind) = Picker::hit(screen, mouse.column, mouse.row) {
                    ctx.update_cursor(|c| c.select_brush(kind));
                }
            }
            return;
        }

        ctx.update_cursor(|c| {
            let (width, height) = c.grid_size();
            let (x, y) = screen_to_grid(mouse.column, mouse.row, width, height);
            c.jump_to(x, y);
            match mouse.kind {
                MouseEventKind::ScrollUp => c.grow_brush(),
                MouseEventKind::ScrollDown => c.shrink_brush(),
                _ => {}
            }
        });

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.painting = true,
            MouseEventKind::Up(MouseButton::Left) => self.painting = false,
            MouseEventKind::Down(MouseButton::Middle) => self.erasing = true,
            MouseEventKind::Up(MouseButton::Middle) => self.erasing = false,
            _ => {}
        }
        self.stroke(ctx);
    }

    /// Stroke at the cursor while a button is held. Painting wins over
    /// erasing when both are held.
    fn stroke(&self, ctx: &SimContext) {
        if self.painting || self.erasing {
            ctx.stroke_at_cursor(!self.painting);
        }
    }
}

//! Grid, status line and cell picker rendering

use crate::palette::{appearance, CURSOR_GLYPH, CURSOR_STYLE};
use falling_sand_core::{fire_flicker, CellKind, Cursor, Grid, Spark, MAX_BRUSH_SIZE};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Widget};
use rand::rngs::StdRng;

/// Gap between picker entries
const PICKER_SPACING: u16 = 3;

/// Screen area holding the grid cells, inside the border.
pub fn grid_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Map a terminal position to grid coordinates. Each axis is `None` when it
/// falls outside the grid.
pub fn screen_to_grid(
    column: u16,
    row: u16,
    grid_width: usize,
    grid_height: usize,
) -> (Option<usize>, Option<usize>) {
    let inner = grid_area(Rect::new(0, 0, u16::MAX, u16::MAX));
    let x = column
        .checked_sub(inner.x)
        .map(usize::from)
        .filter(|&x| x < grid_width);
    let y = row
        .checked_sub(inner.y)
        .map(usize::from)
        .filter(|&y| y < grid_height);
    (x, y)
}

/// The whole simulation screen for one frame.
pub struct Scene<'a> {
    grid: &'a mut Grid,
    cursor: &'a Cursor,
    rng: &'a mut StdRng,
    flicker_chance: f64,
}

impl<'a> Scene<'a> {
    pub fn new(
        grid: &'a mut Grid,
        cursor: &'a Cursor,
        rng: &'a mut StdRng,
        flicker_chance: f64,
    ) -> Self {
        Self {
            grid,
            cursor,
            rng,
            flicker_chance,
        }
    }

    fn status_line(cursor: &Cursor) -> Line<'static> {
        let (glyph, style) = appearance(cursor.brush()).primary();
        let size = cursor.brush_size().min(MAX_BRUSH_SIZE);
        Line::from(vec![
            Span::styled(glyph.to_string(), style),
            Span::raw(format!(" {:<2} ", size)),
            Span::raw(cursor.brush().name()).bold(),
        ])
    }
}

impl Widget for Scene<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .borders(Borders::ALL)
            .title(Self::status_line(self.cursor))
            .render(area, buf);

        let inner = grid_area(area);
        let footprint = self.cursor.footprint();
        let width = self.grid.width().min(usize::from(inner.width));
        let height = self.grid.height().min(usize::from(inner.height));
        let mut sparks: Vec<Spark> = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let index = self.grid.index(x, y);
                let Some(cell) = self.grid.cell_mut(index) else {
                    continue;
                };
                if cell.take_skip_render() {
                    continue;
                }
                let kind = cell.kind;
                let pos = (inner.x + x as u16, inner.y + y as u16);

                if footprint.contains(x, y) {
                    let glyph = if kind == CellKind::Empty {
                        CURSOR_GLYPH
                    } else {
                        appearance(kind).primary().0
                    };
                    buf[pos].set_char(glyph).set_style(CURSOR_STYLE);
                    continue;
                }

                let (glyph, style) = appearance(kind).primary();
                buf[pos].set_char(glyph).set_style(style);

                if kind == CellKind::Fire {
                    sparks.clear();
                    fire_flicker(
                        &mut *self.grid,
                        x,
                        y,
                        self.flicker_chance,
                        &mut *self.rng,
                        &mut sparks,
                    );
                    let fire = appearance(CellKind::Fire);
                    for spark in &sparks {
                        if spark.x >= width || spark.y >= height {
                            continue;
                        }
                        let (glyph, style) = fire.variant(spark.glyph, spark.tint);
                        let at = (inner.x + spark.x as u16, inner.y + spark.y as u16);
                        buf[at].set_char(glyph).set_style(style);
                    }
                }
            }
        }

        if self.cursor.is_picker_open() {
            Picker::new(self.cursor.brush()).render(area, buf);
        }
    }
}

/// Overlay listing every cell kind, with the current brush highlighted.
pub struct Picker {
    selected: CellKind,
}

impl Picker {
    pub fn new(selected: CellKind) -> Self {
        Self { selected }
    }

    /// Popup rectangle: two thirds of the screen, offset one sixth in.
    pub fn area(screen: Rect) -> Rect {
        Rect::new(
            screen.x + screen.width / 6,
            screen.y + screen.height / 6,
            (screen.width * 2 / 3).max(4),
            (screen.height * 2 / 3).max(3),
        )
        .intersection(screen)
    }

    /// Where each entry is drawn inside the popup. Entries are laid out left
    /// to right and wrap onto every other row.
    pub fn entries(popup: Rect) -> Vec<(CellKind, Rect)> {
        let inner = Block::default().borders(Borders::ALL).inner(popup);
        let mut out = Vec::with_capacity(CellKind::COUNT);
        let (mut col, mut row) = (0u16, 0u16);

        for kind in CellKind::ALL {
            // Glyph, space, name
            let len = kind.name().len() as u16 + 2;
            if col > 0 && col + len > inner.width {
                col = 0;
                row += 2;
            }
            let rect = Rect::new(inner.x + col, inner.y + row, len, 1).intersection(inner);
            out.push((kind, rect));
            col += len + PICKER_SPACING;
        }
        out
    }

    /// Entry under a screen position, if any.
    pub fn hit(screen: Rect, column: u16, row: u16) -> Option<CellKind> {
        Self::entries(Self::area(screen))
            .into_iter()
            .find(|(_, rect)| rect.contains((column, row).into()))
            .map(|(kind, _)| kind)
    }
}

impl Widget for Picker {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = Self::area(area);
        Clear.render(popup, buf);
        Block::default()
            .borders(Borders::ALL)
            .title(" Cells menu ")
            .render(popup, buf);

        for (kind, rect) in Self::entries(popup) {
            if rect.is_empty() {
                continue;
            }
            let (glyph, style) = appearance(kind).primary();
            let name_style = if kind == self.selected {
                CURSOR_STYLE
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(glyph.to_string(), style),
                Span::styled(" ", name_style),
                Span::styled(kind.name(), name_style),
            ])
            .render(rect, buf);
        }
    }
}

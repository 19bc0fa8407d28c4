//! Glyphs and colors for each cell kind

use falling_sand_core::CellKind;
use ratatui::style::{Color, Style};

/// Drawn for Empty cells under the brush.
pub const CURSOR_GLYPH: char = '*';

/// Brush footprint highlight: black on white.
pub const CURSOR_STYLE: Style = Style::new().fg(Color::Black).bg(Color::White);

const GRAY: Color = Color::Rgb(140, 140, 140);
const DARK_GRAY: Color = Color::Rgb(51, 51, 51);
const BROWN: Color = Color::Rgb(102, 51, 0);
const ORANGE: Color = Color::Rgb(255, 128, 0);

/// How one kind is drawn. Fire has two glyphs and two colors to flicker
/// between; every other kind has one of each.
#[derive(Debug, Clone, Copy)]
pub struct Appearance {
    pub glyphs: &'static [char],
    pub styles: &'static [Style],
}

impl Appearance {
    /// Primary glyph and style.
    pub fn primary(&self) -> (char, Style) {
        (self.glyphs[0], self.styles[0])
    }

    /// Glyph and style picked by index, wrapping to the available variants.
    pub fn variant(&self, glyph: usize, tint: usize) -> (char, Style) {
        (
            self.glyphs[glyph % self.glyphs.len()],
            self.styles[tint % self.styles.len()],
        )
    }
}

const fn on(bg: Color) -> Style {
    Style::new().fg(Color::White).bg(bg)
}

/// Indexed by [`CellKind::index`].
const TABLE: [Appearance; CellKind::COUNT] = [
    // Empty
    Appearance {
        glyphs: &[' '],
        styles: &[on(Color::Black)],
    },
    // Sand
    Appearance {
        glyphs: &['#'],
        styles: &[on(Color::Yellow)],
    },
    // Water
    Appearance {
        glyphs: &['.'],
        styles: &[on(Color::Blue)],
    },
    // Stone
    Appearance {
        glyphs: &['@'],
        styles: &[Style::new().fg(Color::Black).bg(DARK_GRAY)],
    },
    // Wood
    Appearance {
        glyphs: &['$'],
        styles: &[on(BROWN)],
    },
    // Ash
    Appearance {
        glyphs: &['+'],
        styles: &[on(GRAY)],
    },
    // Fire
    Appearance {
        glyphs: &['^', '!'],
        styles: &[on(Color::Red), on(ORANGE)],
    },
    // Bomb
    Appearance {
        glyphs: &['&'],
        styles: &[on(Color::Green)],
    },
];

pub fn appearance(kind: CellKind) -> Appearance {
    TABLE[kind.index()]
}

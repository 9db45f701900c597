// Core value types shared by the rasterizer, the grid and the pencil.
// Coordinates are in cells; only the surface knows about screen pixels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One cell of the grid. Unbounded; validity is checked against a [`GridExtent`] on write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// How many cells the surface shows at the current cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridExtent {
    pub columns: u32,
    pub rows: u32,
}

impl GridExtent {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// `width / cell_size` by `height / cell_size`. A cell that is only partly
    /// on the surface still counts; its visible part gets painted.
    pub fn from_surface(width: u32, height: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        Self { columns: width.div_ceil(cell_size), rows: height.div_ceil(cell_size) }
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.columns
            && (coord.y as u32) < self.rows
    }
}

/// Pencil color as straight RGBA bytes. Never blended, only stored and painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Parse any CSS color string: names, hex, `rgb()`, `hsl()`...
    pub fn parse(s: &str) -> Result<Self, Error> {
        let parsed = csscolorparser::parse(s).map_err(|e| Error::InvalidColor(format!("{s:?}: {e}")))?;
        Ok(Self(parsed.to_rgba8()))
    }

    /// Packed 0x00RRGGBB, the layout minifb displays. Alpha is dropped.
    pub fn to_u32(self) -> u32 {
        let [r, g, b, _] = self.0;
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    pub fn alpha(self) -> u8 {
        self.0[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Software screen buffer; each entry is 0x00RRGGBB for minifb.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
    /// What a cleared region is filled with.
    pub background: u32,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let background = background.to_u32();
        Self { width, height, pixels: vec![background; width * height], background }
    }

    /// Read back one screen pixel. Only hosts and tests do this; the pencil never does.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }
}

// Sparse cell storage: only cells that have been drawn since the last clear exist.

use std::collections::hash_map::{self, HashMap};
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{Color, GridCoord, GridExtent};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelGrid {
    cells: HashMap<GridCoord, Color>,
}

impl PixelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one cell. Cells outside `extent` are dropped and `false` is returned;
    /// on `true` the caller is expected to render the cell.
    pub fn set(&mut self, coord: GridCoord, color: Color, extent: GridExtent) -> bool {
        if !extent.contains(coord) {
            return false;
        }
        self.cells.insert(coord, color);
        true
    }

    pub fn get(&self, coord: GridCoord) -> Option<Color> {
        self.cells.get(&coord).copied()
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Independent copy; later writes to either side never show up in the other.
    pub fn snapshot(&self) -> PixelGrid {
        self.clone()
    }

    /// Replace everything with a copy of `other`. Entries are taken as-is, without bounds checks.
    pub fn load(&mut self, other: &PixelGrid) {
        self.cells.clone_from(&other.cells);
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Entries in no particular order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.cells.iter() }
    }
}

pub struct Iter<'a> {
    inner: hash_map::Iter<'a, GridCoord, Color>,
}

impl Iterator for Iter<'_> {
    type Item = (GridCoord, Color);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&coord, &color)| (coord, color))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a PixelGrid {
    type Item = (GridCoord, Color);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(GridCoord, Color)> for PixelGrid {
    fn from_iter<T: IntoIterator<Item = (GridCoord, Color)>>(iter: T) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

// On disk a grid is column-major nested maps, `{ "x": { "y": "#rrggbb" } }`.
type Columns = BTreeMap<i32, BTreeMap<i32, Color>>;

impl Serialize for PixelGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut columns = Columns::new();
        for (coord, color) in self {
            columns.entry(coord.x).or_default().insert(coord.y, color);
        }
        columns.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PixelGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let columns = Columns::deserialize(deserializer)?;
        Ok(columns
            .into_iter()
            .flat_map(|(x, column)| {
                column.into_iter().map(move |(y, color)| (GridCoord::new(x, y), color))
            })
            .collect())
    }
}

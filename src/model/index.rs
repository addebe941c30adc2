//! Addressing types shared by the model and its observers

use generational_arena::Index;

/// Address of one cell: a row among its parent's children, a column, and the item.
///
/// An index stays valid until the next structural change. Indices into removed
/// items resolve to nothing; callers drop them after a removal notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelIndex {
    row: usize,
    column: usize,
    item: Index,
}

impl ModelIndex {
    pub(crate) fn new(row: usize, column: usize, item: Index) -> Self {
        Self { row, column, item }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn item(&self) -> Index {
        self.item
    }

    /// The same item addressed at another column.
    pub fn sibling_column(&self, column: usize) -> Self {
        Self { column, ..*self }
    }
}

/// Intent of a data request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    Display,
    Edit,
    /// Whether the cell matches the active search term
    Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Interaction capabilities of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemFlags {
    pub enabled: bool,
    pub selectable: bool,
    pub editable: bool,
}

impl ItemFlags {
    pub const NONE: Self = Self {
        enabled: false,
        selectable: false,
        editable: false,
    };

    pub const EDITABLE: Self = Self {
        enabled: true,
        selectable: true,
        editable: true,
    };
}

use generational_arena::Index;
use std::fmt;
use tracing::{debug, instrument};

use crate::domain::{ItemArena, TreeItem, Value};
use crate::model::events::{ModelEvent, ModelObserver};
use crate::model::index::{ItemFlags, ItemRole, ModelIndex, Orientation};

/// Index-based view over an [`ItemArena`].
///
/// The root item holds the header labels and defines the column count of every
/// row. Only column 0 carries child structure: asking for children of an index
/// in another column yields nothing.
///
/// Parent arguments of `None` address the (invisible) root.
pub struct TreeModel {
    items: ItemArena,
    observers: Vec<Box<dyn ModelObserver>>,
    search_term: Option<String>,
}

impl fmt::Debug for TreeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeModel")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .field("search_term", &self.search_term)
            .finish()
    }
}

impl TreeModel {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let root_data = headers
            .into_iter()
            .map(|h| Value::Text(h.into()))
            .collect();
        Self {
            items: ItemArena::new(root_data),
            observers: Vec::new(),
            search_term: None,
        }
    }

    /// Builds a model and fills it with one flatten call per record.
    ///
    /// `flatten` receives the item tree, the root, and one record; it is expected
    /// to append rows under the root sized to the root's column count.
    pub fn from_records<I, S, R, F>(headers: I, records: &[R], mut flatten: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&mut ItemArena, Index, &R),
    {
        let mut model = Self::new(headers);
        let root = model.items.root();
        for record in records {
            flatten(&mut model.items, root, record);
        }
        debug!(
            "built model with {} top-level rows",
            model.items.child_count(root)
        );
        model
    }

    pub fn add_observer(&mut self, observer: Box<dyn ModelObserver>) {
        self.observers.push(observer);
    }

    pub fn items(&self) -> &ItemArena {
        &self.items
    }

    fn emit(&mut self, event: ModelEvent) {
        for observer in self.observers.iter_mut() {
            observer.notify(&event);
        }
    }

    /// Resolves a parent argument: `None` is the root, a stale index is nothing.
    fn resolve(&self, index: Option<&ModelIndex>) -> Option<Index> {
        match index {
            None => Some(self.items.root()),
            Some(idx) if self.items.contains(idx.item()) => Some(idx.item()),
            Some(_) => None,
        }
    }

    /// The item an index points at, if it still exists.
    pub fn item(&self, index: &ModelIndex) -> Option<&TreeItem> {
        self.items.get(index.item())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn index_count_rows(&self, parent: Option<&ModelIndex>) -> usize {
        if parent.is_some_and(|p| p.column() > 0) {
            return 0;
        }
        self.resolve(parent)
            .map_or(0, |item| self.items.child_count(item))
    }

    pub fn index_count_columns(&self, _parent: Option<&ModelIndex>) -> usize {
        self.items.column_count(self.items.root())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn index(
        &self,
        row: usize,
        column: usize,
        parent: Option<&ModelIndex>,
    ) -> Option<ModelIndex> {
        if parent.is_some_and(|p| p.column() != 0) {
            return None;
        }
        if column >= self.index_count_columns(parent) {
            return None;
        }
        let parent_item = self.resolve(parent)?;
        let child = self.items.child(parent_item, row)?;
        Some(ModelIndex::new(row, column, child))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn parent_of(&self, index: &ModelIndex) -> Option<ModelIndex> {
        let parent = self.items.parent(index.item())?;
        if parent == self.items.root() {
            return None;
        }
        Some(ModelIndex::new(self.items.child_number(parent), 0, parent))
    }

    pub fn data(&self, index: &ModelIndex, role: ItemRole) -> Option<Value> {
        let value = self.items.data(index.item(), index.column())?;
        match role {
            ItemRole::Display | ItemRole::Edit => Some(value.clone()),
            ItemRole::Highlight => {
                let term = self.search_term.as_deref()?;
                Some(Value::Bool(value_matches(value, term)))
            }
        }
    }

    /// Edits one cell. Only the edit role writes.
    #[instrument(level = "trace", skip(self, value))]
    pub fn set_data(&mut self, index: &ModelIndex, value: Value, role: ItemRole) -> bool {
        if role != ItemRole::Edit {
            return false;
        }
        if !self.items.set_data(index.item(), index.column(), value) {
            return false;
        }
        self.emit(ModelEvent::DataChanged {
            top_left: *index,
            bottom_right: *index,
            roles: vec![ItemRole::Display, ItemRole::Edit],
        });
        true
    }

    pub fn flags(&self, index: Option<&ModelIndex>) -> ItemFlags {
        match index {
            Some(idx) if self.items.contains(idx.item()) => ItemFlags::EDITABLE,
            _ => ItemFlags::NONE,
        }
    }

    pub fn header_data(&self, section: usize, orientation: Orientation) -> Option<&Value> {
        match orientation {
            Orientation::Horizontal => self.items.data(self.items.root(), section),
            Orientation::Vertical => None,
        }
    }

    pub fn set_header_data(
        &mut self,
        section: usize,
        orientation: Orientation,
        value: Value,
        role: ItemRole,
    ) -> bool {
        if role != ItemRole::Edit || orientation != Orientation::Horizontal {
            return false;
        }
        let root = self.items.root();
        if !self.items.set_data(root, section, value) {
            return false;
        }
        self.emit(ModelEvent::HeaderDataChanged {
            orientation,
            first: section,
            last: section,
        });
        true
    }

    /// Inserts `rows` empty rows under `parent`, each as wide as the header.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_rows(&mut self, position: usize, rows: usize, parent: Option<&ModelIndex>) -> bool {
        let Some(parent_item) = self.resolve(parent) else {
            return false;
        };
        if position > self.items.child_count(parent_item) || position.checked_add(rows).is_none() {
            debug!("insert_rows rejected: {}+{} out of range", position, rows);
            return false;
        }
        if rows == 0 {
            return true;
        }

        let (first, last) = (position, position + (rows - 1));
        let parent = parent.copied();
        self.emit(ModelEvent::RowsAboutToBeInserted { parent, first, last });
        let columns = self.items.column_count(self.items.root());
        let success = self
            .items
            .insert_children(parent_item, position, rows, columns);
        self.emit(ModelEvent::RowsInserted { parent, first, last });
        success
    }

    #[instrument(level = "debug", skip(self))]
    pub fn remove_rows(&mut self, position: usize, rows: usize, parent: Option<&ModelIndex>) -> bool {
        let Some(parent_item) = self.resolve(parent) else {
            return false;
        };
        match position.checked_add(rows) {
            Some(end) if end <= self.items.child_count(parent_item) => {}
            _ => {
                debug!("remove_rows rejected: {}+{} out of range", position, rows);
                return false;
            }
        }
        if rows == 0 {
            return true;
        }

        let (first, last) = (position, position + (rows - 1));
        let parent = parent.copied();
        self.emit(ModelEvent::RowsAboutToBeRemoved { parent, first, last });
        let success = self.items.remove_children(parent_item, position, rows);
        self.emit(ModelEvent::RowsRemoved { parent, first, last });
        success
    }

    /// Inserts columns into every row of the model.
    ///
    /// Column structure is global, so the root is widened whatever `parent` is;
    /// `parent` is only reported to observers.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_columns(
        &mut self,
        position: usize,
        columns: usize,
        parent: Option<&ModelIndex>,
    ) -> bool {
        let root = self.items.root();
        if position > self.items.column_count(root) || position.checked_add(columns).is_none() {
            debug!("insert_columns rejected: {}+{} out of range", position, columns);
            return false;
        }
        if columns == 0 {
            return true;
        }

        let (first, last) = (position, position + (columns - 1));
        let parent = parent.copied();
        self.emit(ModelEvent::ColumnsAboutToBeInserted { parent, first, last });
        let success = self.items.insert_columns(root, position, columns);
        self.emit(ModelEvent::ColumnsInserted { parent, first, last });
        success
    }

    /// Removes columns from every row; removing the last column drops all rows.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_columns(
        &mut self,
        position: usize,
        columns: usize,
        parent: Option<&ModelIndex>,
    ) -> bool {
        let root = self.items.root();
        match position.checked_add(columns) {
            Some(end) if end <= self.items.column_count(root) => {}
            _ => return false,
        }
        if columns == 0 {
            return true;
        }

        let (first, last) = (position, position + (columns - 1));
        let parent = parent.copied();
        self.emit(ModelEvent::ColumnsAboutToBeRemoved { parent, first, last });
        let success = self.items.remove_columns(root, position, columns);
        self.emit(ModelEvent::ColumnsRemoved { parent, first, last });

        if self.items.column_count(root) == 0 {
            let rows = self.items.child_count(root);
            self.remove_rows(0, rows, None);
        }
        success
    }

    /// Discards every row and repopulates the tree, bracketed by reset events.
    ///
    /// The header row is kept. Every index handed out before the reset is stale
    /// afterwards.
    #[instrument(level = "debug", skip(self, populate))]
    pub fn reset_with<F>(&mut self, populate: F)
    where
        F: FnOnce(&mut ItemArena, Index),
    {
        self.emit(ModelEvent::ModelAboutToBeReset);
        let root = self.items.root();
        let rows = self.items.child_count(root);
        self.items.remove_children(root, 0, rows);
        populate(&mut self.items, root);
        debug!("model reset: {} top-level rows", self.items.child_count(root));
        self.emit(ModelEvent::ModelReset);
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    /// Sets or clears the term that the highlight role matches against.
    pub fn set_search_term(&mut self, term: Option<&str>) {
        self.search_term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        for (top_left, bottom_right) in self.child_ranges() {
            self.emit(ModelEvent::DataChanged {
                top_left,
                bottom_right,
                roles: vec![ItemRole::Highlight],
            });
        }
    }

    /// First and last cell of every non-empty block of siblings, in pre-order.
    fn child_ranges(&self) -> Vec<(ModelIndex, ModelIndex)> {
        let columns = self.items.column_count(self.items.root());
        if columns == 0 {
            return Vec::new();
        }
        self.items
            .iter()
            .filter_map(|(_, item)| {
                let first = *item.children().first()?;
                let last = *item.children().last()?;
                Some((
                    ModelIndex::new(0, 0, first),
                    ModelIndex::new(item.child_count() - 1, columns - 1, last),
                ))
            })
            .collect()
    }

    /// Every cell matching the search term, in pre-order and column order.
    pub fn matches(&self) -> Vec<ModelIndex> {
        let Some(term) = self.search_term.as_deref() else {
            return Vec::new();
        };
        let root = self.items.root();
        self.items
            .iter()
            .filter(|(idx, _)| *idx != root)
            .flat_map(move |(idx, item)| {
                let row = self.items.child_number(idx);
                item.values()
                    .iter()
                    .enumerate()
                    .filter(move |(_, value)| value_matches(value, term))
                    .map(move |(column, _)| ModelIndex::new(row, column, idx))
            })
            .collect()
    }
}

fn value_matches(value: &Value, term: &str) -> bool {
    match value {
        Value::Text(text) => text.to_lowercase().contains(term),
        Value::Integer(i) => i.to_string().contains(term),
        _ => false,
    }
}

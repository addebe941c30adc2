use generational_arena::{Arena, Index};
use std::fmt;
use tracing::{debug, instrument};

use crate::domain::value::Value;

/// Tree node holding one fixed-width row of column values.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeItem {
    /// Column values, one per model column
    data: Vec<Value>,
    /// Index of parent item in the arena, None for the root
    parent: Option<Index>,
    /// Owned child items, in row order
    children: Vec<Index>,
}

impl TreeItem {
    fn new(data: Vec<Value>, parent: Option<Index>) -> Self {
        Self {
            data,
            parent,
            children: Vec::new(),
        }
    }

    pub fn data(&self, column: usize) -> Option<&Value> {
        self.data.get(column)
    }

    pub fn values(&self) -> &[Value] {
        &self.data
    }

    pub fn column_count(&self) -> usize {
        self.data.len()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }
}

impl fmt::Display for TreeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in &self.data {
            if !first {
                f.write_str(" | ")?;
            }
            first = false;
            if value.is_empty() {
                f.write_str("<empty>")?;
            } else {
                write!(f, "{}", value)?;
            }
        }
        Ok(())
    }
}

/// Arena-backed N-ary tree of [`TreeItem`]s.
///
/// Children are owned through the `children` slots; the `parent` slot is a plain
/// arena index used for lookup only. Removed items are freed from the arena, so
/// a stale [`Index`] held by a caller resolves to nothing instead of to a
/// recycled item.
///
/// Structural operations mirror a view model's needs and report failure through
/// their return value; nothing here panics on bad positions.
#[derive(Debug)]
pub struct ItemArena {
    arena: Arena<TreeItem>,
    root: Index,
}

impl ItemArena {
    /// Creates a tree whose root carries `root_data` (typically the header labels).
    pub fn new(root_data: Vec<Value>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeItem::new(root_data, None));
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn get(&self, item: Index) -> Option<&TreeItem> {
        self.arena.get(item)
    }

    pub fn contains(&self, item: Index) -> bool {
        self.arena.contains(item)
    }

    /// Number of live items, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn child(&self, item: Index, position: usize) -> Option<Index> {
        self.get(item)?.children.get(position).copied()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn last_child(&self, item: Index) -> Option<Index> {
        self.get(item)?.children.last().copied()
    }

    pub fn child_count(&self, item: Index) -> usize {
        self.get(item).map_or(0, TreeItem::child_count)
    }

    /// Position of `item` among its parent's children; 0 for the root.
    #[instrument(level = "trace", skip(self))]
    pub fn child_number(&self, item: Index) -> usize {
        self.parent(item)
            .and_then(|parent| self.get(parent))
            .and_then(|parent| parent.children.iter().position(|&c| c == item))
            .unwrap_or(0)
    }

    pub fn column_count(&self, item: Index) -> usize {
        self.get(item).map_or(0, TreeItem::column_count)
    }

    pub fn data(&self, item: Index, column: usize) -> Option<&Value> {
        self.get(item)?.data(column)
    }

    pub fn parent(&self, item: Index) -> Option<Index> {
        self.get(item)?.parent
    }

    /// Inserts `count` children with `columns` empty values each at `position`.
    ///
    /// `position == child_count` appends. Fails for positions past the end.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_children(
        &mut self,
        item: Index,
        position: usize,
        count: usize,
        columns: usize,
    ) -> bool {
        match self.get(item) {
            Some(parent) if position <= parent.children.len() => {}
            _ => return false,
        }

        let new_children: Vec<Index> = (0..count)
            .map(|_| {
                self.arena
                    .insert(TreeItem::new(vec![Value::Empty; columns], Some(item)))
            })
            .collect();

        if let Some(parent) = self.arena.get_mut(item) {
            parent.children.splice(position..position, new_children);
        }
        true
    }

    /// Inserts `count` empty columns at `position` into `item` and all its descendants.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_columns(&mut self, item: Index, position: usize, count: usize) -> bool {
        match self.get(item) {
            Some(node) if position <= node.data.len() => {}
            _ => return false,
        }

        for idx in self.subtree(item) {
            if let Some(node) = self.arena.get_mut(idx) {
                let at = position.min(node.data.len());
                node.data
                    .splice(at..at, std::iter::repeat(Value::Empty).take(count));
            }
        }
        true
    }

    /// Removes `count` children starting at `position`, freeing their subtrees.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_children(&mut self, item: Index, position: usize, count: usize) -> bool {
        let end = match (self.get(item), position.checked_add(count)) {
            (Some(node), Some(end)) if end <= node.children.len() => end,
            _ => return false,
        };

        let removed: Vec<Index> = match self.arena.get_mut(item) {
            Some(node) => node.children.drain(position..end).collect(),
            None => return false,
        };

        let mut freed = 0;
        for child in removed {
            for idx in self.subtree(child) {
                if self.arena.remove(idx).is_some() {
                    freed += 1;
                }
            }
        }
        debug!("removed {} children, freed {} items", count, freed);
        true
    }

    /// Removes `count` columns at `position` from `item` and all its descendants.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_columns(&mut self, item: Index, position: usize, count: usize) -> bool {
        match (self.get(item), position.checked_add(count)) {
            (Some(node), Some(end)) if end <= node.data.len() => {}
            _ => return false,
        }

        for idx in self.subtree(item) {
            if let Some(node) = self.arena.get_mut(idx) {
                let len = node.data.len();
                let start = position.min(len);
                let end = (position + count).min(len);
                node.data.drain(start..end);
            }
        }
        true
    }

    /// Sets one column value; out-of-range columns leave the item untouched.
    #[instrument(level = "trace", skip(self, value))]
    pub fn set_data(&mut self, item: Index, column: usize, value: Value) -> bool {
        match self.arena.get_mut(item).and_then(|n| n.data.get_mut(column)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Overwrites the leading columns of `item` with `values`.
    ///
    /// Values beyond the item's column count are dropped.
    pub fn set_row(&mut self, item: Index, values: Vec<Value>) -> bool {
        match self.arena.get_mut(item) {
            Some(node) => {
                for (slot, value) in node.data.iter_mut().zip(values) {
                    *slot = value;
                }
                true
            }
            None => false,
        }
    }

    /// Appends one child sized to `columns` and returns it.
    pub fn append_child(&mut self, item: Index, columns: usize) -> Option<Index> {
        let position = self.child_count(item);
        if self.insert_children(item, position, 1, columns) {
            self.last_child(item)
        } else {
            None
        }
    }

    /// Pre-order traversal starting at `item`.
    pub fn iter_from(&self, item: Index) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, item)
    }

    /// Pre-order traversal of the whole tree, root first.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        self.iter_from(self.root)
    }

    fn subtree(&self, item: Index) -> Vec<Index> {
        self.iter_from(item).map(|(idx, _)| idx).collect()
    }

    /// Number of item levels below and including the root.
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, item: Index) -> usize {
        match self.get(item) {
            Some(node) => {
                1 + node
                    .children
                    .iter()
                    .map(|&child| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }
}

pub struct PreOrderIterator<'a> {
    arena: &'a ItemArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a ItemArena, start: Index) -> Self {
        Self {
            arena,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a TreeItem);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.arena.get(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(n: usize) -> Vec<Value> {
        (0..n).map(|i| Value::from(format!("h{}", i))).collect()
    }

    #[test]
    fn test_root_has_no_parent_and_child_number_zero() {
        let tree = ItemArena::new(header(3));
        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.child_number(tree.root()), 0);
        assert_eq!(tree.column_count(tree.root()), 3);
    }

    #[test]
    fn test_insert_children_sets_parent_and_positions() {
        let mut tree = ItemArena::new(header(2));
        let root = tree.root();
        assert!(tree.insert_children(root, 0, 3, 2));

        for position in 0..3 {
            let child = tree.child(root, position).unwrap();
            assert_eq!(tree.parent(child), Some(root));
            assert_eq!(tree.child_number(child), position);
            assert_eq!(tree.data(child, 0), Some(&Value::Empty));
        }
        assert_eq!(tree.child(root, 3), None);
    }

    #[test]
    fn test_insert_children_in_middle_renumbers_siblings() {
        let mut tree = ItemArena::new(header(1));
        let root = tree.root();
        tree.insert_children(root, 0, 2, 1);
        let second = tree.child(root, 1).unwrap();

        assert!(tree.insert_children(root, 1, 1, 1));
        assert_eq!(tree.child_number(second), 2);
    }

    #[test]
    fn test_insert_children_past_end_fails() {
        let mut tree = ItemArena::new(header(1));
        let root = tree.root();
        assert!(!tree.insert_children(root, 1, 1, 1));
        assert_eq!(tree.child_count(root), 0);
    }

    #[test]
    fn test_last_child_of_empty_item_is_none() {
        let tree = ItemArena::new(header(1));
        assert_eq!(tree.last_child(tree.root()), None);
    }

    #[test]
    fn test_remove_children_frees_subtree() {
        let mut tree = ItemArena::new(header(1));
        let root = tree.root();
        let child = tree.append_child(root, 1).unwrap();
        let grandchild = tree.append_child(child, 1).unwrap();
        assert_eq!(tree.len(), 3);

        assert!(tree.remove_children(root, 0, 1));
        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert_eq!(tree.parent(grandchild), None);
    }

    #[test]
    fn test_remove_children_range_past_end_fails() {
        let mut tree = ItemArena::new(header(1));
        let root = tree.root();
        tree.insert_children(root, 0, 2, 1);
        assert!(!tree.remove_children(root, 1, 2));
        assert!(!tree.remove_children(root, usize::MAX, 2));
        assert_eq!(tree.child_count(root), 2);
    }

    #[test]
    fn test_columns_propagate_to_descendants() {
        let mut tree = ItemArena::new(header(2));
        let root = tree.root();
        let child = tree.append_child(root, 2).unwrap();
        let grandchild = tree.append_child(child, 2).unwrap();
        tree.set_data(grandchild, 1, Value::from("kept"));

        assert!(tree.insert_columns(root, 1, 2));
        for idx in [root, child, grandchild] {
            assert_eq!(tree.column_count(idx), 4);
        }
        assert_eq!(tree.data(grandchild, 3), Some(&Value::from("kept")));

        assert!(tree.remove_columns(root, 0, 3));
        for idx in [root, child, grandchild] {
            assert_eq!(tree.column_count(idx), 1);
        }
        assert_eq!(tree.data(grandchild, 0), Some(&Value::from("kept")));
    }

    #[test]
    fn test_column_bounds() {
        let mut tree = ItemArena::new(header(2));
        let root = tree.root();
        assert!(!tree.insert_columns(root, 3, 1));
        assert!(!tree.remove_columns(root, 1, 2));
        assert!(tree.insert_columns(root, 2, 1));
        assert_eq!(tree.column_count(root), 3);
    }

    #[test]
    fn test_set_data_out_of_range_leaves_row_unchanged() {
        let mut tree = ItemArena::new(header(2));
        let root = tree.root();
        assert!(!tree.set_data(root, 2, Value::from("x")));
        assert_eq!(tree.get(root).unwrap().values(), header(2).as_slice());
    }

    #[test]
    fn test_depth_and_preorder() {
        let mut tree = ItemArena::new(header(1));
        let root = tree.root();
        let a = tree.append_child(root, 1).unwrap();
        tree.set_data(a, 0, Value::from("a"));
        let b = tree.append_child(a, 1).unwrap();
        tree.set_data(b, 0, Value::from("b"));
        let c = tree.append_child(root, 1).unwrap();
        tree.set_data(c, 0, Value::from("c"));

        assert_eq!(tree.depth(), 3);
        let order: Vec<String> = tree
            .iter()
            .skip(1)
            .map(|(_, item)| item.data(0).unwrap().to_string())
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}

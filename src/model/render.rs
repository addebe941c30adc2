//! Text rendering of a model for terminal output
//!
//! Only the first `columns` columns of each row are shown, so the hidden id
//! and kind columns stay out of the picture unless asked for.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::ItemArena;
use crate::model::tree_model::TreeModel;

fn row_label(items: &ItemArena, item: Index, columns: usize) -> String {
    items
        .get(item)
        .map(|node| {
            node.values()
                .iter()
                .take(columns)
                .map(|v| v.to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .unwrap_or_default()
}

impl TreeModel {
    /// The model as a termtree, one node per row, labelled with its first `columns` cells.
    #[instrument(level = "debug", skip(self))]
    pub fn to_tree_string(&self, columns: usize) -> Tree<String> {
        fn build_tree(items: &ItemArena, item: Index, columns: usize, parent_tree: &mut Tree<String>) {
            if let Some(node) = items.get(item) {
                for &child in node.children() {
                    let mut child_tree = Tree::new(row_label(items, child, columns));
                    build_tree(items, child, columns, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        let items = self.items();
        let root = items.root();
        let mut tree = Tree::new(row_label(items, root, columns));
        build_tree(items, root, columns, &mut tree);
        tree
    }
}

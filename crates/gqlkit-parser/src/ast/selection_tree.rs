use crate::ast::Selection;
use std::collections::HashMap;

/// An ordered selection set in which every keyed selection (see
/// [`Selection::response_key()`]) is unique.
///
/// Iteration follows source order; lookup by key is a hash lookup.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SelectionTree {
    nodes: Vec<Selection>,
    #[serde(skip)]
    index_by_key: HashMap<String, usize>,
}

impl SelectionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `selection`.
    ///
    /// On a duplicated key the tree is left unchanged and the offending key
    /// is returned as the error.
    pub fn insert(&mut self, selection: Selection) -> Result<(), String> {
        if let Some(key) = selection.response_key() {
            if self.index_by_key.contains_key(key.as_ref()) {
                return Err(key.into_owned());
            }
            self.index_by_key.insert(key.into_owned(), self.nodes.len());
        }
        self.nodes.push(selection);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Selection> {
        self.index_by_key.get(key).map(|idx| &self.nodes[*idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Response keys of all field selections, with fragment spreads and
    /// inline fragments expanded in place.
    pub fn expanded_field_keys(&self) -> Vec<&str> {
        let mut keys = vec![];
        for selection in &self.nodes {
            match selection {
                Selection::Field(field) => keys.push(field.response_key()),
                Selection::FragmentSpread(spread) => {
                    keys.extend(spread.selection_tree().expanded_field_keys())
                },
                Selection::InlineFragment(inline) => {
                    keys.extend(inline.selection_tree.expanded_field_keys())
                },
            }
        }
        keys
    }
}

impl<'a> IntoIterator for &'a SelectionTree {
    type Item = &'a Selection;
    type IntoIter = std::slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

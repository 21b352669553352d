//! List row control: reordering, row buttons and stable row keys.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::I18n;
use crate::error::IndexError;
use crate::ids::IdAllocator;

/// Remove the element at `from` and reinsert it at `to`.
///
/// Both indices must be in bounds for the sequence as it is before the move.
///
/// # Example
/// ```rust
/// let mut items = vec![1, 2, 3, 4];
/// formgen::list::move_item(&mut items, 0, 2).unwrap();
/// assert_eq!(items, [2, 3, 1, 4]);
/// ```
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<&mut Vec<T>, IndexError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(IndexError { index, len });
        }
    }
    let element = items.remove(from);
    items.insert(to, element);
    Ok(items)
}

/// Which row buttons a list offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPolicy {
    pub removable: bool,
    pub orderable: bool,
}

impl Default for RowPolicy {
    fn default() -> Self {
        Self {
            removable: true,
            orderable: true,
        }
    }
}

/// An action offered by a row button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Remove,
    Up,
    Down,
}

impl RowAction {
    pub fn label<'a>(&self, i18n: &'a I18n) -> &'a str {
        match self {
            Self::Remove => &i18n.remove,
            Self::Up => &i18n.up,
            Self::Down => &i18n.down,
        }
    }

    /// The `(from, to)` move this action performs on row `index`, if any.
    pub fn displacement(&self, index: usize) -> Option<(usize, usize)> {
        match self {
            Self::Remove => None,
            Self::Up => index.checked_sub(1).map(|to| (index, to)),
            Self::Down => Some((index, index + 1)),
        }
    }
}

/// The buttons of row `index` in a list of `len` rows, in display order.
/// Up is not offered on the first row, nor down on the last.
pub fn row_actions(index: usize, len: usize, policy: RowPolicy) -> Vec<RowAction> {
    let mut actions = Vec::with_capacity(3);
    if policy.removable {
        actions.push(RowAction::Remove);
    }
    if policy.orderable {
        if index > 0 {
            actions.push(RowAction::Up);
        }
        if index + 1 < len {
            actions.push(RowAction::Down);
        }
    }
    actions
}

/// Row keys per list, owned by the caller across render passes.
///
/// Keys are allocated once per row and then travel with it, so a row keeps
/// its identity (and the presentation layer its focus) when rows are
/// reordered, inserted or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListKeys(HashMap<String, Vec<String>>);

impl ListKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// The keys of the list at `path`, sized to `len` rows.
    pub fn ensure(&mut self, path: &str, len: usize, ids: &dyn IdAllocator) -> &[String] {
        let keys = self.0.entry(path.to_string()).or_default();
        keys.truncate(len);
        while keys.len() < len {
            keys.push(ids.next_id());
        }
        keys
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    /// Record a new row appended to the list at `path`.
    pub fn push(&mut self, path: &str, ids: &dyn IdAllocator) {
        self.0
            .entry(path.to_string())
            .or_default()
            .push(ids.next_id());
    }

    /// Forget the key of a removed row, along with the lists inside it.
    /// Lists inside later rows shift up one index.
    pub fn remove(&mut self, path: &str, index: usize) {
        if let Some(keys) = self.0.get_mut(path) {
            if index < keys.len() {
                keys.remove(index);
            }
        }
        self.renumber_rows(path, |row| match row.cmp(&index) {
            Ordering::Less => Some(row),
            Ordering::Equal => None,
            Ordering::Greater => Some(row - 1),
        });
    }

    /// Move a row's key, and the keys of the lists inside it, along with
    /// the row.
    pub fn move_key(&mut self, path: &str, from: usize, to: usize) -> Result<(), IndexError> {
        if let Some(keys) = self.0.get_mut(path) {
            move_item(keys, from, to)?;
        }
        self.renumber_rows(path, |row| Some(moved_index(row, from, to)));
        Ok(())
    }

    /// Drop the keys of every list at or below `path`.
    pub fn forget(&mut self, path: &str) {
        if path.is_empty() {
            self.0.clear();
            return;
        }
        let prefix = format!("{}.", path);
        self.0
            .retain(|key, _| key != path && !key.starts_with(&prefix));
    }

    /// Rewrite the row index of every list nested in the rows of `path`.
    /// `renumber` maps an old row index to the new one, or to `None` when the
    /// row is gone.
    fn renumber_rows(&mut self, path: &str, renumber: impl Fn(usize) -> Option<usize>) {
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{}.", path)
        };
        let nested: Vec<String> = self
            .0
            .keys()
            .filter(|key| key.len() > prefix.len() && key.starts_with(&prefix))
            .cloned()
            .collect();

        let mut renamed = Vec::with_capacity(nested.len());
        for key in nested {
            let Some(keys) = self.0.remove(&key) else {
                continue;
            };
            let tail = &key[prefix.len()..];
            let (row, rest) = tail.split_at(tail.find('.').unwrap_or(tail.len()));
            match row.parse::<usize>() {
                Ok(row) => {
                    if let Some(row) = renumber(row) {
                        renamed.push((format!("{}{}{}", prefix, row, rest), keys));
                    }
                }
                // Not inside a row of this list.
                Err(_) => renamed.push((key.clone(), keys)),
            }
        }
        self.0.extend(renamed);
    }
}

/// Where the row at `row` ends up after [`move_item`] moves `from` to `to`.
fn moved_index(row: usize, from: usize, to: usize) -> usize {
    if row == from {
        to
    } else if from < to && (from + 1..=to).contains(&row) {
        row - 1
    } else if to < from && (to..from).contains(&row) {
        row + 1
    } else {
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    #[test]
    fn test_move_forward() {
        let mut items = vec![1, 2, 3, 4];
        assert_eq!(move_item(&mut items, 0, 2).unwrap(), &vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_move_backward() {
        let mut items = vec!['a', 'b', 'c'];
        move_item(&mut items, 2, 0).unwrap();
        assert_eq!(items, ['c', 'a', 'b']);
    }

    #[test]
    fn test_move_out_of_range() {
        let mut items = vec![1, 2];
        assert_eq!(
            move_item(&mut items, 0, 2),
            Err(IndexError { index: 2, len: 2 })
        );
        assert_eq!(
            move_item(&mut items, 5, 0),
            Err(IndexError { index: 5, len: 2 })
        );
        assert_eq!(items, [1, 2]);
    }

    #[test]
    fn test_row_actions_at_edges() {
        let policy = RowPolicy::default();
        assert_eq!(
            row_actions(0, 3, policy),
            [RowAction::Remove, RowAction::Down]
        );
        assert_eq!(
            row_actions(1, 3, policy),
            [RowAction::Remove, RowAction::Up, RowAction::Down]
        );
        assert_eq!(row_actions(2, 3, policy), [RowAction::Remove, RowAction::Up]);
        assert_eq!(row_actions(0, 1, policy), [RowAction::Remove]);
    }

    #[test]
    fn test_row_actions_disabled() {
        let policy = RowPolicy {
            removable: false,
            orderable: false,
        };
        assert!(row_actions(1, 3, policy).is_empty());
    }

    #[test]
    fn test_displacement() {
        assert_eq!(RowAction::Up.displacement(2), Some((2, 1)));
        assert_eq!(RowAction::Up.displacement(0), None);
        assert_eq!(RowAction::Down.displacement(0), Some((0, 1)));
        assert_eq!(RowAction::Remove.displacement(0), None);
    }

    #[test]
    fn test_keys_follow_moves() {
        let ids = SequentialIds::new("k");
        let mut keys = ListKeys::new();
        assert_eq!(keys.ensure("tags", 3, &ids), ["k0", "k1", "k2"]);

        keys.move_key("tags", 2, 0).unwrap();
        assert_eq!(keys.get("tags").unwrap(), ["k2", "k0", "k1"]);

        keys.remove("tags", 1);
        keys.push("tags", &ids);
        assert_eq!(keys.ensure("tags", 3, &ids), ["k2", "k1", "k3"]);
    }

    #[test]
    fn test_forget_nested_lists() {
        let ids = SequentialIds::new("k");
        let mut keys = ListKeys::new();
        keys.ensure("rows", 1, &ids);
        keys.ensure("rows.0.tags", 2, &ids);
        keys.ensure("rowsx", 1, &ids);

        keys.forget("rows");
        assert!(keys.get("rows").is_none());
        assert!(keys.get("rows.0.tags").is_none());
        assert!(keys.get("rowsx").is_some());
    }

    #[test]
    fn test_nested_keys_follow_moved_rows() {
        let ids = SequentialIds::new("k");
        let mut keys = ListKeys::new();
        keys.ensure("rows", 3, &ids);
        keys.ensure("rows.0.tags", 1, &ids);
        keys.ensure("rows.2.tags", 1, &ids);
        keys.ensure("rows.2.tags.0.notes", 1, &ids);

        keys.move_key("rows", 0, 2).unwrap();
        assert_eq!(keys.get("rows").unwrap(), ["k1", "k2", "k0"]);
        assert_eq!(keys.get("rows.2.tags").unwrap(), ["k3"]);
        assert_eq!(keys.get("rows.1.tags").unwrap(), ["k4"]);
        assert_eq!(keys.get("rows.1.tags.0.notes").unwrap(), ["k5"]);
        assert!(keys.get("rows.0.tags").is_none());
    }

    #[test]
    fn test_nested_keys_shift_after_removed_row() {
        let ids = SequentialIds::new("k");
        let mut keys = ListKeys::new();
        keys.ensure("rows", 3, &ids);
        keys.ensure("rows.0.tags", 1, &ids);
        keys.ensure("rows.1.tags", 1, &ids);
        keys.ensure("rows.2.tags", 1, &ids);

        keys.remove("rows", 1);
        assert_eq!(keys.get("rows").unwrap(), ["k0", "k2"]);
        assert_eq!(keys.get("rows.0.tags").unwrap(), ["k3"]);
        assert_eq!(keys.get("rows.1.tags").unwrap(), ["k5"]);
        assert!(keys.get("rows.2.tags").is_none());
    }

    #[test]
    fn test_root_list_rows_renumber() {
        let ids = SequentialIds::new("k");
        let mut keys = ListKeys::new();
        keys.ensure("", 2, &ids);
        keys.ensure("1", 1, &ids);

        keys.move_key("", 1, 0).unwrap();
        assert_eq!(keys.get("").unwrap(), ["k1", "k0"]);
        assert_eq!(keys.get("0").unwrap(), ["k2"]);
        assert!(keys.get("1").is_none());
    }
}

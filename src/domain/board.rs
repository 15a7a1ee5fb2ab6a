use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::BoardConfig;
use crate::domain::drag::DragEnd;
use crate::domain::ids::{GroupId, IdGenerator, ItemId};
use crate::session::Session;

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
}

impl Item {
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A board column holding an ordered list of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub title: String,
    pub items: Vec<Item>,
}

impl Group {
    pub fn new(id: GroupId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Position of an item within this group
    pub fn position_of(&self, item_id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == item_id)
    }
}

/// Snapshot of the whole board, columns left to right
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub groups: Vec<Group>,
}

impl Board {
    pub fn group(&self, group_id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| &group.id == group_id)
    }

    /// Finds the (group index, item index) address of an item
    pub fn locate_item(&self, item_id: &ItemId) -> Option<(usize, usize)> {
        self.groups
            .iter()
            .enumerate()
            .find_map(|(g, group)| group.position_of(item_id).map(|i| (g, i)))
    }

    pub fn find_item(&self, item_id: &ItemId) -> Option<&Item> {
        self.locate_item(item_id)
            .map(|(g, i)| &self.groups[g].items[i])
    }

    pub fn contains_group(&self, group_id: &GroupId) -> bool {
        self.group(group_id).is_some()
    }

    pub fn contains_item(&self, item_id: &ItemId) -> bool {
        self.locate_item(item_id).is_some()
    }

    /// Total number of cards across all columns
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    /// All card ids, column by column
    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter().map(|item| &item.id))
    }

    fn group_index(&self, group_id: &GroupId) -> Option<usize> {
        self.groups.iter().position(|group| &group.id == group_id)
    }
}

/// Receives the new board snapshot after every successful mutation
pub trait BoardObserver {
    fn board_changed(&mut self, board: &Board);
}

/// Holds the board and applies structural edits to it.
///
/// Every operation either changes the board and notifies observers, or
/// leaves the board untouched and reports `false`/`None`. Missing ids,
/// blank titles and self-drops are treated as stale UI state, not errors.
pub struct BoardManager {
    board: Board,
    ids: IdGenerator,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl BoardManager {
    /// Creates a board with the configured default columns
    pub fn new(config: &BoardConfig) -> Self {
        let mut manager = Self {
            board: Board::default(),
            ids: IdGenerator::new(),
            observers: Vec::new(),
        };
        for title in &config.columns {
            let id = manager.ids.next_group_id(|_| false);
            manager.board.groups.push(Group::new(id, title.clone()));
        }
        manager
    }

    /// Creates a board and places the session's newly created item, if any,
    /// at the top of the first column.
    pub fn with_session(config: &BoardConfig, session: &mut Session) -> Self {
        let mut manager = Self::new(config);
        if let Some(seed) = session.take_seed_item() {
            if manager.board.contains_item(&seed.id) {
                tracing::debug!(item = %seed.id, "seed item already on board");
            } else if let Some(first) = manager.board.groups.first_mut() {
                tracing::debug!(item = %seed.id, group = %first.id, "seeding created item");
                first.items.insert(0, Item::new(seed.id, seed.title));
            }
        }
        manager
    }

    /// Current board snapshot
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn subscribe(&mut self, observer: Box<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    /// Appends a new, empty column. Blank titles are ignored.
    pub fn add_group(&mut self, title: &str) -> Option<GroupId> {
        if title.trim().is_empty() {
            tracing::debug!("ignoring add_group with blank title");
            return None;
        }
        let board = &self.board;
        let id = self.ids.next_group_id(|candidate| board.contains_group(candidate));
        self.board.groups.push(Group::new(id.clone(), title));
        self.notify();
        Some(id)
    }

    pub fn rename_group(&mut self, group_id: &GroupId, new_title: &str) -> bool {
        let Some(index) = self.board.group_index(group_id) else {
            tracing::debug!(group = %group_id, "rename_group: no such group");
            return false;
        };
        self.board.groups[index].title = new_title.to_string();
        self.notify();
        true
    }

    /// Deletes a column together with all of its cards
    pub fn remove_group(&mut self, group_id: &GroupId) -> bool {
        let Some(index) = self.board.group_index(group_id) else {
            tracing::debug!(group = %group_id, "remove_group: no such group");
            return false;
        };
        let removed = self.board.groups.remove(index);
        tracing::debug!(
            group = %removed.id,
            discarded = removed.items.len(),
            "removed group"
        );
        self.notify();
        true
    }

    /// Appends a new card to the end of a column
    pub fn add_item(&mut self, group_id: &GroupId, title: &str) -> Option<ItemId> {
        if title.trim().is_empty() {
            tracing::debug!(group = %group_id, "ignoring add_item with blank title");
            return None;
        }
        let Some(index) = self.board.group_index(group_id) else {
            tracing::debug!(group = %group_id, "add_item: no such group");
            return None;
        };
        let board = &self.board;
        let id = self.ids.next_item_id(|candidate| board.contains_item(candidate));
        self.board.groups[index]
            .items
            .push(Item::new(id.clone(), title));
        self.notify();
        Some(id)
    }

    pub fn rename_item(&mut self, item_id: &ItemId, new_title: &str) -> bool {
        let Some((g, i)) = self.board.locate_item(item_id) else {
            tracing::debug!(item = %item_id, "rename_item: no such item");
            return false;
        };
        self.board.groups[g].items[i].title = new_title.to_string();
        self.notify();
        true
    }

    pub fn remove_item(&mut self, group_id: &GroupId, item_id: &ItemId) -> bool {
        let Some(g) = self.board.group_index(group_id) else {
            tracing::debug!(group = %group_id, "remove_item: no such group");
            return false;
        };
        let Some(i) = self.board.groups[g].position_of(item_id) else {
            tracing::debug!(group = %group_id, item = %item_id, "remove_item: no such item");
            return false;
        };
        self.board.groups[g].items.remove(i);
        self.notify();
        true
    }

    /// Moves a card into the column that holds `target_item_id`.
    ///
    /// The card is removed from its current column and appended to the end
    /// of the destination column; the exact drop position is not used. When
    /// both cards share a column the moved card ends up last in it.
    pub fn move_item(&mut self, moved_item_id: &ItemId, target_item_id: &ItemId) -> bool {
        if moved_item_id == target_item_id {
            return false;
        }
        let Some((source, index)) = self.board.locate_item(moved_item_id) else {
            tracing::debug!(item = %moved_item_id, "move_item: dragged item not on board");
            return false;
        };
        let Some((destination, _)) = self.board.locate_item(target_item_id) else {
            tracing::debug!(item = %target_item_id, "move_item: drop target not on board");
            return false;
        };

        let item = self.board.groups[source].items.remove(index);
        self.board.groups[destination].items.push(item);
        tracing::debug!(
            item = %moved_item_id,
            from = %self.board.groups[source].id,
            to = %self.board.groups[destination].id,
            "moved item"
        );
        self.notify();
        true
    }

    /// Applies a finished drag gesture. No target means the drop was abandoned.
    pub fn handle_drag_end(&mut self, event: &DragEnd) -> bool {
        if event.is_self_drop() {
            tracing::debug!(item = %event.moved_item_id, "drag released over itself");
            return false;
        }
        match &event.target_item_id {
            Some(target) => self.move_item(&event.moved_item_id, target),
            None => false,
        }
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.board_changed(&self.board);
        }
    }
}

impl fmt::Debug for BoardManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardManager")
            .field("board", &self.board)
            .field("ids", &self.ids)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for BoardManager {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}

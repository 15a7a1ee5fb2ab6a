use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::TaskboardError;

/// Identifier of a board column (e.g., col-1, col-2)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    const PREFIX: &'static str = "col-";

    /// Creates a GroupId from a counter
    pub fn new(counter: u64) -> Self {
        Self(format!("{}{}", Self::PREFIX, counter))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a card. Unique across the whole board, not only its column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    const PREFIX: &'static str = "card-";

    /// Creates an ItemId from a counter
    pub fn new(counter: u64) -> Self {
        Self(format!("{}{}", Self::PREFIX, counter))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Externally supplied ids (drag payloads, backend records) are accepted
// verbatim once trimmed, so the only rejected input is a blank string.
fn parse_id(s: &str) -> Result<String, TaskboardError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(TaskboardError::InvalidId(s.to_string()));
    }
    Ok(trimmed.to_string())
}

impl FromStr for GroupId {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id(s).map(Self)
    }
}

impl FromStr for ItemId {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id(s).map(Self)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session-local id source. Counters only move forward, so an id is never
/// handed out twice even after the entity it named has been deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next_group_number: u64,
    next_item_number: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next_group_number: 1,
            next_item_number: 1,
        }
    }

    /// Generates the next group id not rejected by `taken`
    pub fn next_group_id(&mut self, taken: impl Fn(&GroupId) -> bool) -> GroupId {
        loop {
            let id = GroupId::new(self.next_group_number);
            self.next_group_number += 1;
            if !taken(&id) {
                return id;
            }
        }
    }

    /// Generates the next item id not rejected by `taken`
    pub fn next_item_id(&mut self, taken: impl Fn(&ItemId) -> bool) -> ItemId {
        loop {
            let id = ItemId::new(self.next_item_number);
            self.next_item_number += 1;
            if !taken(&id) {
                return id;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

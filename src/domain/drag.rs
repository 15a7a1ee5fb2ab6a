use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::ids::ItemId;
use crate::error::{Result, TaskboardError};

/// A completed drag gesture: the card that was dragged and the card it was
/// released over, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub moved_item_id: ItemId,
    #[serde(default)]
    pub target_item_id: Option<ItemId>,
}

impl DragEnd {
    pub fn new(moved_item_id: ItemId, target_item_id: Option<ItemId>) -> Self {
        Self {
            moved_item_id,
            target_item_id,
        }
    }

    /// Normalizes raw identifiers from a drag detector.
    ///
    /// Returns `None` when there is no dragged item at all. A blank target
    /// becomes `None`, which the board treats as an abandoned gesture.
    pub fn from_raw(active: &str, over: Option<&str>) -> Option<Self> {
        let moved_item_id = ItemId::from_str(active).ok()?;
        let target_item_id = over.and_then(|raw| ItemId::from_str(raw).ok());
        Some(Self::new(moved_item_id, target_item_id))
    }

    /// Parses a JSON payload of the form
    /// `{"movedItemId": "...", "targetItemId": "..." | null}`
    pub fn from_json(payload: &str) -> Result<Self> {
        let raw: DragEnd = serde_json::from_str(payload)?;
        Self::from_raw(
            raw.moved_item_id.as_str(),
            raw.target_item_id.as_ref().map(ItemId::as_str),
        )
        .ok_or_else(|| TaskboardError::InvalidId(raw.moved_item_id.to_string()))
    }

    /// True when the card was dropped back onto itself
    pub fn is_self_drop(&self) -> bool {
        self.target_item_id.as_ref() == Some(&self.moved_item_id)
    }
}

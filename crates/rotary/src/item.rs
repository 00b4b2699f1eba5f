use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

/// One entry on the wheel. The wheel only reads the collection's length and
/// indices; it never changes an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub label: Label,
    #[serde(default)]
    pub color: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, label: impl Into<String>, color: Option<String>) -> Self {
        Self {
            id: ItemId::new(id),
            label: Label::new(label),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub selected_id: ItemId,
}

impl SelectionResult {
    pub fn new(selected_id: ItemId) -> Self {
        Self { selected_id }
    }
}

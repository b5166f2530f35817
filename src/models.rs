use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// List name that routes items to the unassociated `todoitems` collection.
pub const DEFAULT_LIST_NAME: &str = "Today";

pub const ITEM_NAME_REQUIRED: &str =
    "A todo item without name cannot exist. Please check your entry and try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

impl TodoItem {
    /// Builds an item with a fresh id. The name is required; an empty string
    /// is rejected, whitespace is kept as typed.
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(AppError::validation(ITEM_NAME_REQUIRED));
        }

        Ok(Self {
            id: ObjectId::new(),
            name,
        })
    }

    pub fn id_hex(&self) -> String {
        self.id.to_hex()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<TodoItem>,
}

impl TodoList {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            items: Vec::new(),
        }
    }
}

/// Form posted by the "+" button of a list page.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItemForm {
    #[serde(rename = "newItem", default)]
    pub new_item: String,
    #[serde(default = "default_list_name")]
    pub list: String,
}

/// Form posted when an item's checkbox is ticked.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteItemForm {
    #[serde(rename = "checkItem", default)]
    pub check_item: String,
    #[serde(rename = "listName", default = "default_list_name")]
    pub list_name: String,
}

fn default_list_name() -> String {
    DEFAULT_LIST_NAME.to_string()
}

pub fn is_default_list(name: &str) -> bool {
    name == DEFAULT_LIST_NAME
}

/// Upper-cases the first character of a list name and leaves the rest alone,
/// so `work` becomes `Work` but `wORK` becomes `WORK`.
pub fn normalize_list_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolves the list name carried by a posted form. Forms may be hand-built,
/// so the name goes through the same normalization as the URL segment and a
/// missing name means the default list.
pub fn form_list_name(raw: &str) -> String {
    if raw.is_empty() {
        return DEFAULT_LIST_NAME.to_string();
    }
    normalize_list_name(raw)
}

pub fn parse_item_id(raw: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::validation(format!("invalid item id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_only_touches_first_character() {
        assert_eq!(normalize_list_name("work"), "Work");
        assert_eq!(normalize_list_name("wORK"), "WORK");
        assert_eq!(normalize_list_name("home chores"), "Home chores");
        assert_eq!(normalize_list_name(""), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_list_name("groceries");
        assert_eq!(normalize_list_name(&once), once);
    }

    #[test]
    fn normalization_handles_multichar_uppercase() {
        assert_eq!(normalize_list_name("ßtraße"), "SStraße");
        assert_eq!(normalize_list_name("éte"), "Éte");
    }

    #[test]
    fn item_requires_a_name() {
        let err = TodoItem::new("").expect_err("empty name must be rejected");
        assert!(matches!(err, AppError::Validation(ref msg) if msg == ITEM_NAME_REQUIRED));

        let item = TodoItem::new("  ").expect("whitespace is a name");
        assert_eq!(item.name, "  ");
    }

    #[test]
    fn item_ids_are_unique() {
        let a = TodoItem::new("a").expect("valid item");
        let b = TodoItem::new("b").expect("valid item");
        assert_ne!(a.id, b.id);
        assert_eq!(a.id_hex().len(), 24);
    }

    #[test]
    fn item_id_parsing() {
        let item = TodoItem::new("x").expect("valid item");
        assert_eq!(parse_item_id(&item.id_hex()).expect("valid hex"), item.id);
        assert!(matches!(
            parse_item_id("not-an-id"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn form_list_names_are_normalized() {
        assert_eq!(form_list_name("work"), "Work");
        assert_eq!(form_list_name("Work"), "Work");
        assert_eq!(form_list_name(""), DEFAULT_LIST_NAME);
        assert_eq!(form_list_name("today"), DEFAULT_LIST_NAME);
    }

    #[test]
    fn default_list_is_exact_match() {
        assert!(is_default_list("Today"));
        assert!(!is_default_list("today"));
    }
}

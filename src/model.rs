//! Plain item data and the validation rules applied before anything is
//! written to the store.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::entity::item;

pub const NAME_MAX_LEN: usize = 255;
pub const CATEGORY_MAX_LEN: usize = 100;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";

fn too_long(max: usize) -> String {
  format!("Ensure this field has no more than {max} characters.")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub id: i32,
  pub name: String,
  pub category: String,
  pub description: Option<String>,
  /// Serialized as RFC 3339 in UTC
  pub created_at: DateTime<Utc>,
}

impl From<item::Model> for Item {
  fn from(model: item::Model) -> Self {
    Self {
      id: model.id,
      name: model.name,
      category: model.category,
      description: model.description,
      created_at: Utc.from_utc_datetime(&model.created_at),
    }
  }
}

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
  pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
    self.0.entry(field).or_default().push(message.into());
  }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn into_result(self) -> Result<(), FieldErrors> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, messages) in &self.0 {
      for message in messages {
        if !first {
          f.write_str("; ")?;
        }
        write!(f, "{field}: {message}")?;
        first = false;
      }
    }
    Ok(())
  }
}

impl std::error::Error for FieldErrors {}

fn check_text(
  errors: &mut FieldErrors,
  field: &'static str,
  value: &str,
  max: usize,
) {
  if value.trim().is_empty() {
    errors.add(field, NOT_BLANK);
  } else if value.chars().count() > max {
    errors.add(field, too_long(max));
  }
}

/// Fields of an item that is about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
  pub name: String,
  pub category: String,
  pub description: Option<String>,
}

impl NewItem {
  pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
    Self { name: name.into(), category: category.into(), description: None }
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn validate(&self) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_text(&mut errors, "name", &self.name, NAME_MAX_LEN);
    check_text(&mut errors, "category", &self.category, CATEGORY_MAX_LEN);
    errors.into_result()
  }
}

/// Changes to apply to an existing item. `None` leaves a field untouched,
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
  pub name: Option<String>,
  pub category: Option<String>,
  pub description: Option<Option<String>>,
}

impl ItemPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.category.is_none() && self.description.is_none()
  }

  pub fn validate(&self) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if let Some(name) = &self.name {
      check_text(&mut errors, "name", name, NAME_MAX_LEN);
    }
    if let Some(category) = &self.category {
      check_text(&mut errors, "category", category, CATEGORY_MAX_LEN);
    }
    errors.into_result()
  }
}

/// Distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`).
fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

/// Request body accepted by create and update. Unknown keys, including `id`
/// and `created_at`, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemInput {
  #[serde(default, deserialize_with = "nullable")]
  pub name: Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub category: Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub description: Option<Option<String>>,
}

fn text_field(
  errors: &mut FieldErrors,
  field: &'static str,
  value: Option<Option<String>>,
  max: usize,
  required: bool,
) -> Option<String> {
  match value {
    None => {
      if required {
        errors.add(field, REQUIRED);
      }
      None
    }
    Some(None) => {
      errors.add(field, NOT_NULL);
      None
    }
    Some(Some(value)) => {
      check_text(errors, field, &value, max);
      Some(value)
    }
  }
}

impl ItemInput {
  pub fn into_new(self) -> Result<NewItem, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = text_field(&mut errors, "name", self.name, NAME_MAX_LEN, true);
    let category = text_field(
      &mut errors,
      "category",
      self.category,
      CATEGORY_MAX_LEN,
      true,
    );

    match (name, category) {
      (Some(name), Some(category)) if errors.is_empty() => {
        Ok(NewItem { name, category, description: self.description.flatten() })
      }
      _ => Err(errors),
    }
  }

  /// `partial` is PATCH semantics: nothing is required. Otherwise `name` and
  /// `category` must be present.
  pub fn into_patch(self, partial: bool) -> Result<ItemPatch, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name =
      text_field(&mut errors, "name", self.name, NAME_MAX_LEN, !partial);
    let category = text_field(
      &mut errors,
      "category",
      self.category,
      CATEGORY_MAX_LEN,
      !partial,
    );

    errors.into_result()?;
    Ok(ItemPatch { name, category, description: self.description })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn input(body: json::Value) -> ItemInput {
    json::from_value(body).unwrap()
  }

  #[test]
  fn new_item_limits_count_characters() {
    assert!(NewItem::new("é".repeat(NAME_MAX_LEN), "Tools").validate().is_ok());

    let errors = NewItem::new("x".repeat(NAME_MAX_LEN + 1), "Tools")
      .validate()
      .unwrap_err();
    assert_eq!(errors.get("name").unwrap(), [too_long(NAME_MAX_LEN)]);
    assert!(errors.get("category").is_none());
  }

  #[test]
  fn new_item_rejects_blank_fields() {
    let errors = NewItem::new("  ", "").validate().unwrap_err();
    assert_eq!(errors.get("name").unwrap(), [NOT_BLANK]);
    assert_eq!(errors.get("category").unwrap(), [NOT_BLANK]);
  }

  #[test]
  fn category_limit_is_separate() {
    let errors = NewItem::new("Widget", "c".repeat(CATEGORY_MAX_LEN + 1))
      .validate()
      .unwrap_err();
    assert_eq!(errors.get("category").unwrap(), [too_long(CATEGORY_MAX_LEN)]);
  }

  #[test]
  fn create_input_reports_every_field() {
    let errors = input(json::json!({ "name": null })).into_new().unwrap_err();
    assert_eq!(errors.get("name").unwrap(), [NOT_NULL]);
    assert_eq!(errors.get("category").unwrap(), [REQUIRED]);
  }

  #[test]
  fn create_input_ignores_read_only_keys() {
    let new = input(json::json!({
      "id": 42,
      "created_at": "2000-01-01T00:00:00Z",
      "name": "Widget",
      "category": "Tools",
      "description": null,
    }))
    .into_new()
    .unwrap();

    assert_eq!(new, NewItem::new("Widget", "Tools"));
  }

  #[test]
  fn partial_input_keeps_absent_and_null_apart() {
    let patch =
      input(json::json!({ "description": null })).into_patch(true).unwrap();
    assert_eq!(patch.description, Some(None));
    assert!(patch.name.is_none());

    let patch = input(json::json!({})).into_patch(true).unwrap();
    assert!(patch.is_empty());
  }

  #[test]
  fn full_input_requires_name_and_category() {
    let errors = input(json::json!({ "name": "Widget" }))
      .into_patch(false)
      .unwrap_err();
    assert!(errors.get("name").is_none());
    assert_eq!(errors.get("category").unwrap(), [REQUIRED]);
  }

  #[test]
  fn field_errors_display_joins_messages() {
    let mut errors = FieldErrors::default();
    errors.add("name", NOT_BLANK);
    errors.add("category", REQUIRED);
    assert_eq!(
      errors.to_string(),
      "category: This field is required.; name: This field may not be blank."
    );
  }
}

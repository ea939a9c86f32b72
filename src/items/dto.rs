use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{AppError, FieldError};
use crate::items::repo::Item;
use crate::users::dto::double_option;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ItemCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl ItemCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        check_title(&self.title, &mut errors);
        check_price(self.price, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// All fields optional; `description` is doubly wrapped so an explicit null
/// clears the column instead of being read as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ItemUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl ItemUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            check_title(title, &mut errors);
        }
        if let Some(price) = self.price {
            check_price(price, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.is_active.is_none()
    }

    /// Copies the supplied fields onto a fetched row.
    pub fn apply(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(is_active) = self.is_active {
            item.is_active = is_active;
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            price: item.price,
            is_active: item.is_active,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

fn check_title(value: &str, errors: &mut Vec<FieldError>) {
    let len = value.chars().count();
    if !(1..=200).contains(&len) {
        errors.push(FieldError::new(
            "title",
            "must be between 1 and 200 characters",
        ));
    }
}

fn check_price(value: Decimal, errors: &mut Vec<FieldError>) {
    if value < Decimal::ZERO {
        errors.push(FieldError::new("price", "must be greater than or equal to 0"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Item {
        Item {
            id: Uuid::new_v4(),
            title: "Widget".into(),
            description: Some("A widget".into()),
            price: Decimal::new(1999, 2),
            is_active: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: None,
        }
    }

    #[test]
    fn create_accepts_valid_payload() {
        let payload: ItemCreate =
            serde_json::from_str(r#"{"title":"Widget","price":"19.99"}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.is_active);
    }

    #[test]
    fn create_rejects_negative_price() {
        let payload: ItemCreate = serde_json::from_str(r#"{"title":"Widget","price":-1}"#).unwrap();
        let err = payload.validate().unwrap_err();
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "price");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_accepts_zero_price() {
        let payload: ItemCreate = serde_json::from_str(r#"{"title":"Widget","price":0}"#).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn create_rejects_empty_title() {
        let payload: ItemCreate = serde_json::from_str(r#"{"title":"","price":1}"#).unwrap();
        let err = payload.validate().unwrap_err();
        match err {
            AppError::Validation(fields) => assert_eq!(fields[0].field, "title"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_update_applies_nothing() {
        let update: ItemUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());

        let mut item = sample_item();
        let before = item.clone();
        update.apply(&mut item);
        assert_eq!(item.title, before.title);
        assert_eq!(item.description, before.description);
        assert_eq!(item.price, before.price);
        assert_eq!(item.is_active, before.is_active);
    }

    #[test]
    fn price_only_update_preserves_other_fields() {
        let update: ItemUpdate = serde_json::from_str(r#"{"price":"5.00"}"#).unwrap();
        let mut item = sample_item();
        update.apply(&mut item);
        assert_eq!(item.price, Decimal::new(500, 2));
        assert_eq!(item.title, "Widget");
        assert_eq!(item.description.as_deref(), Some("A widget"));
    }

    #[test]
    fn null_description_clears_the_column() {
        let update: ItemUpdate = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert!(!update.is_empty(), "explicit null counts as supplied");

        let mut item = sample_item();
        update.apply(&mut item);
        assert_eq!(item.description, None);
        assert_eq!(item.title, "Widget");
    }

    #[test]
    fn update_rejects_negative_price() {
        let update: ItemUpdate = serde_json::from_str(r#"{"price":-0.01}"#).unwrap();
        assert!(update.validate().is_err());
    }

    #[test]
    fn response_serializes_price_and_timestamps() {
        let response = ItemResponse::from(sample_item());
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""title":"Widget""#));
        assert!(json.contains("19.99"));
        assert!(json.contains("1970-01-01T00:00:00Z"));
    }
}

//! Item capability: size class and optional grid shape.
//!
//! An entity carrying an [`ItemComponent`] can be picked up, stored, and wrapped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Size class of an item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum ItemSize {
    Tiny,
    #[default]
    Small,
    Normal,
    Large,
    Huge,
    Ginormous,
}

impl ItemSize {
    /// Stable identifier used as an appearance datum.
    pub fn id(self) -> &'static str {
        match self {
            Self::Tiny => "Tiny",
            Self::Small => "Small",
            Self::Normal => "Normal",
            Self::Large => "Large",
            Self::Huge => "Huge",
            Self::Ginormous => "Ginormous",
        }
    }
}

impl fmt::Display for ItemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for ItemSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Tiny" => Ok(Self::Tiny),
            "Small" => Ok(Self::Small),
            "Normal" => Ok(Self::Normal),
            "Large" => Ok(Self::Large),
            "Huge" => Ok(Self::Huge),
            "Ginormous" => Ok(Self::Ginormous),
            other => Err(DomainError::parse(format!("Unknown item size: {other}"))),
        }
    }
}

/// One rectangle of an item's inventory footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Inventory footprint override; never empty, no zero-area boxes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShapeBox>", into = "Vec<ShapeBox>")]
pub struct ItemShape(Vec<ShapeBox>);

impl ItemShape {
    pub fn new(boxes: Vec<ShapeBox>) -> Result<Self, DomainError> {
        if boxes.is_empty() {
            return Err(DomainError::validation("Item shape needs at least one box"));
        }
        if boxes.iter().any(|b| b.width == 0 || b.height == 0) {
            return Err(DomainError::validation("Item shape boxes must have area"));
        }
        Ok(Self(boxes))
    }

    pub fn boxes(&self) -> &[ShapeBox] {
        &self.0
    }
}

impl TryFrom<Vec<ShapeBox>> for ItemShape {
    type Error = DomainError;

    fn try_from(boxes: Vec<ShapeBox>) -> Result<Self, Self::Error> {
        Self::new(boxes)
    }
}

impl From<ItemShape> for Vec<ShapeBox> {
    fn from(shape: ItemShape) -> Self {
        shape.0
    }
}

/// Marks an entity as an item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemComponent {
    #[serde(default)]
    pub size: ItemSize,
    #[serde(default)]
    pub shape: Option<ItemShape>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_parses_from_id() {
        for size in [ItemSize::Tiny, ItemSize::Normal, ItemSize::Ginormous] {
            assert_eq!(size.id().parse::<ItemSize>(), Ok(size));
        }
        assert!("Colossal".parse::<ItemSize>().is_err());
    }

    #[test]
    fn empty_shape_is_rejected() {
        assert!(ItemShape::new(vec![]).is_err());
    }

    #[test]
    fn zero_area_box_is_rejected() {
        let flat = ShapeBox {
            x: 0,
            y: 0,
            width: 2,
            height: 0,
        };
        assert!(ItemShape::new(vec![flat]).is_err());
    }

    #[test]
    fn item_component_defaults_when_fields_missing() {
        let item: ItemComponent = serde_json::from_str("{}").expect("parses");
        assert_eq!(item.size, ItemSize::Small);
        assert!(item.shape.is_none());
    }
}

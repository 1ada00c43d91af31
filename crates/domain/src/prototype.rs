//! Prototype catalog: the templates entities are spawned from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::components::ComponentSet;
use crate::error::DomainError;
use crate::value_objects::{ItemComponent, LimitedCharges, PrototypeId};

/// One spawnable template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrototypeDef {
    pub id: PrototypeId,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Present when entities of this prototype can be picked up and wrapped.
    #[serde(default)]
    pub item: Option<ItemComponent>,
    #[serde(default)]
    pub charges: Option<LimitedCharges>,
    #[serde(default)]
    pub components: ComponentSet,
}

impl PrototypeDef {
    pub fn new(id: PrototypeId) -> Self {
        Self {
            id,
            tags: Vec::new(),
            item: None,
            charges: None,
            components: ComponentSet::default(),
        }
    }

    pub fn with_item(mut self, item: ItemComponent) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_charges(mut self, charges: LimitedCharges) -> Self {
        self.charges = Some(charges);
        self
    }

    pub fn with_components(mut self, components: ComponentSet) -> Self {
        self.components = components;
        self
    }
}

/// Lookup table of every known prototype.
#[derive(Debug, Clone, Default)]
pub struct PrototypeCatalog {
    prototypes: HashMap<PrototypeId, PrototypeDef>,
}

impl PrototypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of definitions, rejecting duplicate ids.
    pub fn from_defs(defs: Vec<PrototypeDef>) -> Result<Self, DomainError> {
        let mut catalog = Self::new();
        for def in defs {
            catalog.insert(def)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of prototype definitions.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let defs: Vec<PrototypeDef> = serde_json::from_str(json)
            .map_err(|e| DomainError::parse(format!("Invalid prototype catalog: {e}")))?;
        Self::from_defs(defs)
    }

    pub fn insert(&mut self, def: PrototypeDef) -> Result<(), DomainError> {
        if self.prototypes.contains_key(&def.id) {
            return Err(DomainError::validation(format!(
                "Duplicate prototype id: {}",
                def.id
            )));
        }
        self.prototypes.insert(def.id.clone(), def);
        Ok(())
    }

    pub fn get(&self, id: &PrototypeId) -> Option<&PrototypeDef> {
        self.prototypes.get(id)
    }

    pub fn require(&self, id: &PrototypeId) -> Result<&PrototypeDef, DomainError> {
        self.get(id)
            .ok_or_else(|| DomainError::not_found("Prototype", id.as_str()))
    }

    pub fn contains(&self, id: &PrototypeId) -> bool {
        self.prototypes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &PrototypeId> {
        self.prototypes.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PolicyKind;
    use crate::value_objects::ItemSize;

    const CATALOG: &str = r#"[
        {
            "id": "Widget",
            "tags": ["Gadget"],
            "item": { "size": "Small" }
        },
        {
            "id": "ParcelWrap",
            "charges": { "charges": 30, "max_charges": 30 },
            "components": { "parcel_wrap": { "charges_consumed": 1 } }
        },
        {
            "id": "WrappedParcel",
            "item": {},
            "components": { "wrapped_parcel": {} }
        }
    ]"#;

    #[test]
    fn parses_catalog_with_components() {
        let catalog = PrototypeCatalog::from_json(CATALOG).expect("catalog parses");
        assert_eq!(catalog.len(), 3);

        let widget = catalog
            .get(&PrototypeId::new("Widget").expect("valid"))
            .expect("widget exists");
        assert_eq!(widget.tags, vec!["Gadget".to_string()]);
        assert_eq!(
            widget.item.as_ref().map(|item| item.size),
            Some(ItemSize::Small)
        );

        let wrap = catalog
            .get(&PrototypeId::new("ParcelWrap").expect("valid"))
            .expect("wrap exists");
        assert!(wrap.components.has(PolicyKind::ParcelWrap));
        assert_eq!(wrap.charges.map(|c| c.charges()), Some(30));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[{ "id": "Widget" }, { "id": "Widget" }]"#;
        let err = PrototypeCatalog::from_json(json).expect_err("duplicates rejected");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = PrototypeCatalog::from_json("{").expect_err("bad json");
        assert!(matches!(err, DomainError::Parse(_)));
    }

    #[test]
    fn require_reports_missing_prototype() {
        let catalog = PrototypeCatalog::new();
        let err = catalog
            .require(&PrototypeId::new("Ghost").expect("valid"))
            .expect_err("missing");
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}

//! Applicability predicate shared by every transfer-in policy.

use std::fmt;
use std::sync::Arc;

use stowage_domain::{EntityId, EntityWhitelist};

use crate::infrastructure::ports::{ChargesPort, ItemPort, WhitelistPort};

/// What a policy asks of a prospective target.
#[derive(Debug, Clone, Copy)]
pub struct TransferRule<'a> {
    /// Entity carrying the policy (the tool).
    pub source: EntityId,
    pub target: EntityId,
    pub require_item: bool,
    pub whitelist: Option<&'a EntityWhitelist>,
    pub blacklist: Option<&'a EntityWhitelist>,
    pub charges: Option<u32>,
}

/// Why a target was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inapplicable {
    SelfTarget,
    NotAnItem,
    NotWhitelisted,
    Blacklisted,
    InsufficientCharges,
}

impl fmt::Display for Inapplicable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfTarget => write!(f, "target is the source"),
            Self::NotAnItem => write!(f, "target is not an item"),
            Self::NotWhitelisted => write!(f, "target fails the whitelist"),
            Self::Blacklisted => write!(f, "target is blacklisted"),
            Self::InsufficientCharges => write!(f, "source lacks charges"),
        }
    }
}

#[derive(Clone)]
pub struct Applicability {
    items: Arc<dyn ItemPort>,
    whitelist: Arc<dyn WhitelistPort>,
    charges: Arc<dyn ChargesPort>,
}

impl Applicability {
    pub fn new(
        items: Arc<dyn ItemPort>,
        whitelist: Arc<dyn WhitelistPort>,
        charges: Arc<dyn ChargesPort>,
    ) -> Self {
        Self {
            items,
            whitelist,
            charges,
        }
    }

    /// Run every check in order. Pure: no state changes either way.
    pub fn check(&self, rule: &TransferRule<'_>) -> Result<(), Inapplicable> {
        if rule.target == rule.source {
            return Err(Inapplicable::SelfTarget);
        }
        if rule.require_item && self.items.item(rule.target).is_none() {
            return Err(Inapplicable::NotAnItem);
        }
        if !self.passes_whitelist(rule.whitelist, rule.target) {
            return Err(Inapplicable::NotWhitelisted);
        }
        if !self.fails_blacklist(rule.blacklist, rule.target) {
            return Err(Inapplicable::Blacklisted);
        }
        if !self.has_charges(rule.source, rule.charges) {
            return Err(Inapplicable::InsufficientCharges);
        }
        Ok(())
    }

    /// No whitelist lets everything through.
    pub fn passes_whitelist(&self, list: Option<&EntityWhitelist>, entity: EntityId) -> bool {
        list.is_none_or(|list| self.whitelist.is_valid(list, entity))
    }

    /// No blacklist blocks nothing.
    pub fn fails_blacklist(&self, list: Option<&EntityWhitelist>, entity: EntityId) -> bool {
        list.is_none_or(|list| !self.whitelist.is_valid(list, entity))
    }

    pub fn has_charges(&self, source: EntityId, amount: Option<u32>) -> bool {
        amount.is_none_or(|amount| !self.charges.has_insufficient_charges(source, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockChargesPort, MockItemPort, MockWhitelistPort};
    use stowage_domain::ItemComponent;

    fn applicability(
        items: MockItemPort,
        whitelist: MockWhitelistPort,
        charges: MockChargesPort,
    ) -> Applicability {
        Applicability::new(Arc::new(items), Arc::new(whitelist), Arc::new(charges))
    }

    fn rule(source: EntityId, target: EntityId) -> TransferRule<'static> {
        TransferRule {
            source,
            target,
            require_item: false,
            whitelist: None,
            blacklist: None,
            charges: None,
        }
    }

    #[test]
    fn self_target_is_rejected_before_any_lookup() {
        let tool = EntityId::new();
        let mut items = MockItemPort::new();
        items.expect_item().never();

        let check = applicability(items, MockWhitelistPort::new(), MockChargesPort::new());
        assert_eq!(
            check.check(&rule(tool, tool)),
            Err(Inapplicable::SelfTarget)
        );
    }

    #[test]
    fn item_requirement_is_enforced() {
        let mut items = MockItemPort::new();
        items.expect_item().returning(|_| None);

        let check = applicability(items, MockWhitelistPort::new(), MockChargesPort::new());
        let mut wrap = rule(EntityId::new(), EntityId::new());
        wrap.require_item = true;
        assert_eq!(check.check(&wrap), Err(Inapplicable::NotAnItem));
    }

    #[test]
    fn blacklisted_target_is_rejected() {
        let blacklist = EntityWhitelist::with_tags(["Organ"]);
        let mut items = MockItemPort::new();
        items
            .expect_item()
            .returning(|_| Some(ItemComponent::default()));
        let mut whitelist = MockWhitelistPort::new();
        whitelist.expect_is_valid().returning(|_, _| true);

        let check = applicability(items, whitelist, MockChargesPort::new());
        let mut wrap = rule(EntityId::new(), EntityId::new());
        wrap.require_item = true;
        wrap.blacklist = Some(&blacklist);
        assert_eq!(check.check(&wrap), Err(Inapplicable::Blacklisted));
    }

    #[test]
    fn charge_shortage_is_rejected() {
        let mut charges = MockChargesPort::new();
        charges
            .expect_has_insufficient_charges()
            .returning(|_, amount| amount > 2);

        let check = applicability(MockItemPort::new(), MockWhitelistPort::new(), charges);
        let mut spend = rule(EntityId::new(), EntityId::new());
        spend.charges = Some(3);
        assert_eq!(check.check(&spend), Err(Inapplicable::InsufficientCharges));
        spend.charges = Some(2);
        assert_eq!(check.check(&spend), Ok(()));
    }

    #[test]
    fn missing_lists_pass() {
        let check = applicability(
            MockItemPort::new(),
            MockWhitelistPort::new(),
            MockChargesPort::new(),
        );
        let target = EntityId::new();
        assert!(check.passes_whitelist(None, target));
        assert!(check.fails_blacklist(None, target));
    }
}

//! Execution authority of the running simulation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Whether this process owns the authoritative outcome of a transfer.
///
/// Predicted contexts may play feedback (sounds, charge prediction) but must not
/// spawn, move, or delete entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityContext {
    #[default]
    Authoritative,
    Predicted,
}

impl AuthorityContext {
    pub fn is_authoritative(self) -> bool {
        matches!(self, Self::Authoritative)
    }
}

impl fmt::Display for AuthorityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authoritative => write!(f, "authoritative"),
            Self::Predicted => write!(f, "predicted"),
        }
    }
}

impl std::str::FromStr for AuthorityContext {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "authoritative" | "server" => Ok(Self::Authoritative),
            "predicted" | "client" => Ok(Self::Predicted),
            other => Err(DomainError::parse(format!(
                "Unknown authority context: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!(
            "Server".parse::<AuthorityContext>(),
            Ok(AuthorityContext::Authoritative)
        );
        assert_eq!(
            " client ".parse::<AuthorityContext>(),
            Ok(AuthorityContext::Predicted)
        );
        assert!("observer".parse::<AuthorityContext>().is_err());
    }
}

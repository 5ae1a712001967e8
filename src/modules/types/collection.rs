//! Collection definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Collections of the point-of-sale database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Catalog items
    Items,
    /// Completed sales
    Transactions,
    /// Register sessions with running totals
    Sessions,
    /// Customer records
    Customers,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::all()
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("Unknown collection: {}", s))
    }
}

impl Collection {
    /// Returns all collections
    pub fn all() -> &'static [Collection] {
        &[
            Collection::Items,
            Collection::Transactions,
            Collection::Sessions,
            Collection::Customers,
        ]
    }

    /// Collection name as stored in the database
    pub const fn name(&self) -> &'static str {
        match self {
            Collection::Items => "items",
            Collection::Transactions => "transactions",
            Collection::Sessions => "sessions",
            Collection::Customers => "customers",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Items.name(), "items");
        assert_eq!(Collection::Customers.to_string(), "customers");
    }

    #[test]
    fn test_collection_from_str() {
        assert_eq!("sessions".parse::<Collection>(), Ok(Collection::Sessions));
        assert!("Sessions".parse::<Collection>().is_err());
        assert!("orders".parse::<Collection>().is_err());
    }

    #[test]
    fn test_collection_serde() {
        let json = serde_json::to_string(&Collection::Transactions).unwrap();
        assert_eq!(json, "\"transactions\"");
    }
}

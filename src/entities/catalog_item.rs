//! Catalog item entity - A billable product or service with a unit price.
//!
//! Prices travel as integer minor units (cents) and tax rates as whole percentages,
//! so no floating point value ever reaches the wire.

use serde::{Deserialize, Serialize};

/// Catalog item record as stored by the service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Identifier issued by the store
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit of sale, e.g. "hour" or "piece"
    pub unit: String,
    /// Price per unit in minor currency units
    pub unit_price: u64,
    /// Tax rate in whole percent, absent when not taxed
    #[serde(default)]
    pub tax_rate: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Normalized catalog item body for create and update requests
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemPayload {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub unit_price: u64,
    pub tax_rate: Option<u32>,
}

impl From<&CatalogItem> for CatalogItemPayload {
    fn from(item: &CatalogItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            unit: item.unit.clone(),
            unit_price: item.unit_price,
            tax_rate: item.tax_rate,
        }
    }
}

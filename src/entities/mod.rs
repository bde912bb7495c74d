//! Entity module - Records exchanged with the REST service.
//! Each entity has a record struct as the service returns it and a payload struct
//! holding the normalized fields sent on create and update.

pub mod catalog_item;
pub mod client;
pub mod company_profile;

pub use catalog_item::{CatalogItem, CatalogItemPayload};
pub use client::{Client, ClientPayload, ContactMethod};
pub use company_profile::{CompanyProfile, CompanyProfilePayload};

//! Catalog item validation - Handles price and tax parsing for billable items.
//!
//! Prices are entered as decimal text and normalized to integer minor units; tax
//! rates accept a trailing percent sign and must be whole numbers. See
//! [`super::numeric`] for the accepted input forms.

use super::fields::{FieldError, FieldErrors, FormReader, MAX_SHORT_LEN, MAX_TEXT_LEN, RawFields};
use super::numeric::{format_minor_units, parse_minor_units, parse_whole_number};
use super::{EntityKind, FormPayload};
use crate::entities::{CatalogItem, CatalogItemPayload};

/// Form fields of the catalog item modal, in display order
pub const CATALOG_ITEM_FIELDS: [&str; 5] = ["name", "description", "unit", "unit_price", "tax_rate"];

/// Validates and normalizes raw catalog item form input.
///
/// # Errors
/// Returns the failing fields when a required field is blank, a text is too long,
/// the price is not a non-negative decimal, or the tax rate is not a whole number.
pub fn validate_catalog_item(raw: &RawFields) -> Result<CatalogItemPayload, FieldErrors> {
    let mut form = FormReader::new(raw);

    let name = form.required("name", MAX_SHORT_LEN);
    let description = form.required("description", MAX_TEXT_LEN);
    let unit = form.required("unit", MAX_SHORT_LEN);
    let unit_price = read_unit_price(&mut form);
    let tax_rate = read_tax_rate(&mut form);

    form.finish(CatalogItemPayload {
        name,
        description,
        unit,
        unit_price: unit_price.unwrap_or_default(),
        tax_rate,
    })
}

fn read_unit_price(form: &mut FormReader<'_>) -> Option<u64> {
    let value = form.trimmed("unit_price");
    if value.is_empty() {
        form.reject("unit_price", FieldError::Required);
        return None;
    }
    let parsed = parse_minor_units(value);
    if parsed.is_none() {
        form.reject("unit_price", FieldError::Invalid);
    }
    parsed
}

fn read_tax_rate(form: &mut FormReader<'_>) -> Option<u32> {
    let value = form.trimmed("tax_rate");
    if value.is_empty() {
        return None;
    }
    let parsed = parse_whole_number(value);
    if parsed.is_none() {
        form.reject("tax_rate", FieldError::Invalid);
    }
    parsed
}

impl FormPayload for CatalogItemPayload {
    fn to_form(&self) -> RawFields {
        [
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("unit", self.unit.clone()),
            ("unit_price", format_minor_units(self.unit_price)),
            (
                "tax_rate",
                self.tax_rate.map(|r| r.to_string()).unwrap_or_default(),
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

impl EntityKind for CatalogItem {
    type Payload = CatalogItemPayload;

    const RESOURCE: &'static str = "/api/catalog-items";
    const MESSAGES: &'static str = "catalog";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(raw: &RawFields) -> Result<CatalogItemPayload, FieldErrors> {
        validate_catalog_item(raw)
    }

    fn empty_form() -> RawFields {
        CATALOG_ITEM_FIELDS
            .iter()
            .map(|field| ((*field).to_string(), String::new()))
            .collect()
    }

    fn to_payload(&self) -> CatalogItemPayload {
        CatalogItemPayload::from(self)
    }
}

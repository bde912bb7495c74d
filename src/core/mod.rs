//! Core business logic - framework-agnostic validation, normalization, and the
//! profile completeness gate.
//!
//! Validators are pure functions. The gate is the only stateful piece and is an
//! explicit object owned by whoever needs it.

/// Catalog item validation and price/tax normalization
pub mod catalog_item;
/// Client validation and form conversion
pub mod client;
/// Company profile validation and completeness check
pub mod company_profile;
/// Raw form mapping, field error codes, and the error-collecting reader
pub mod fields;
/// Tolerant decimal parsing for prices and percentages
pub mod numeric;
/// Cached, invalidatable profile completeness check
pub mod profile_gate;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub use fields::{FieldError, FieldErrors, RawFields};
pub use profile_gate::{Completeness, ProfileGate};

/// A normalized payload that can be rendered back into form fields.
pub trait FormPayload: Serialize + Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Raw form fields that validate back to this payload
    fn to_form(&self) -> RawFields;
}

/// An entity kind managed through a list page: its record type, payload, REST
/// collection, message prefix, and validator.
pub trait EntityKind: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Normalized body sent on create and update
    type Payload: FormPayload;

    /// REST collection path, e.g. `/api/clients`
    const RESOURCE: &'static str;

    /// Message-table section holding this kind's labels, toasts, and errors
    const MESSAGES: &'static str;

    /// Identifier issued by the store
    fn id(&self) -> &str;

    /// Validates raw form input into a payload.
    ///
    /// # Errors
    /// Returns every failing field when the input is not acceptable.
    fn validate(raw: &RawFields) -> Result<Self::Payload, FieldErrors>;

    /// Blank form for the create flow
    fn empty_form() -> RawFields;

    /// The stored record's editable fields as a payload
    fn to_payload(&self) -> Self::Payload;

    /// Pre-filled form for the edit flow
    fn to_form(&self) -> RawFields {
        self.to_payload().to_form()
    }
}

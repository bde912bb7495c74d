//! Client validation and form conversion.
//!
//! Turns the client modal's raw fields into a [`ClientPayload`], and a stored
//! [`Client`] back into pre-filled form fields for the edit flow.

use super::fields::{
    FieldError, FieldErrors, FormReader, MAX_PLACE_LEN, MAX_REGISTRATION_LEN, MAX_SHORT_LEN,
    MAX_TEXT_LEN, RawFields,
};
use super::{EntityKind, FormPayload};
use crate::entities::{Client, ClientPayload, ContactMethod};

/// Form fields of the client modal, in display order
pub const CLIENT_FIELDS: [&str; 11] = [
    "name",
    "address",
    "city",
    "country",
    "main_contact_method",
    "main_contact",
    "additional_contact",
    "ico",
    "dic",
    "notes",
    "favourite",
];

/// Validates and normalizes raw client form input.
///
/// Every field is checked, so the returned errors cover the whole form.
///
/// # Errors
/// Returns the failing fields when any required field is blank, any text is too
/// long, the contact method is unknown, or the favourite flag is unreadable.
pub fn validate_client(raw: &RawFields) -> Result<ClientPayload, FieldErrors> {
    let mut form = FormReader::new(raw);

    let name = form.required("name", MAX_SHORT_LEN);
    let address = form.required("address", MAX_SHORT_LEN);
    let city = form.required("city", MAX_PLACE_LEN);
    let country = form.required("country", MAX_PLACE_LEN);
    let main_contact_method = read_contact_method(&mut form);
    let main_contact = form.required("main_contact", MAX_SHORT_LEN);
    let additional_contact = form.optional("additional_contact", MAX_SHORT_LEN);
    let ico = form.optional("ico", MAX_REGISTRATION_LEN);
    let dic = form.optional("dic", MAX_REGISTRATION_LEN);
    let notes = form.optional("notes", MAX_TEXT_LEN);
    let favourite = form.flag("favourite");

    form.finish(ClientPayload {
        name,
        address,
        city,
        country,
        // Placeholder only survives when the field already failed
        main_contact_method: main_contact_method.unwrap_or(ContactMethod::Email),
        main_contact,
        additional_contact,
        ico,
        dic,
        notes,
        favourite,
    })
}

fn read_contact_method(form: &mut FormReader<'_>) -> Option<ContactMethod> {
    let value = form.trimmed("main_contact_method").to_ascii_lowercase();
    if value.is_empty() {
        form.reject("main_contact_method", FieldError::Required);
        return None;
    }
    let method = ContactMethod::from_wire(&value);
    if method.is_none() {
        form.reject("main_contact_method", FieldError::Invalid);
    }
    method
}

impl FormPayload for ClientPayload {
    fn to_form(&self) -> RawFields {
        let optional = |v: &Option<String>| v.clone().unwrap_or_default();
        [
            ("name", self.name.clone()),
            ("address", self.address.clone()),
            ("city", self.city.clone()),
            ("country", self.country.clone()),
            ("main_contact_method", self.main_contact_method.to_string()),
            ("main_contact", self.main_contact.clone()),
            ("additional_contact", optional(&self.additional_contact)),
            ("ico", optional(&self.ico)),
            ("dic", optional(&self.dic)),
            ("notes", optional(&self.notes)),
            ("favourite", self.favourite.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

impl EntityKind for Client {
    type Payload = ClientPayload;

    const RESOURCE: &'static str = "/api/clients";
    const MESSAGES: &'static str = "clients";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(raw: &RawFields) -> Result<ClientPayload, FieldErrors> {
        validate_client(raw)
    }

    fn empty_form() -> RawFields {
        let mut form: RawFields = CLIENT_FIELDS
            .iter()
            .map(|field| ((*field).to_string(), String::new()))
            .collect();
        form.insert(
            "main_contact_method".to_string(),
            ContactMethod::Email.to_string(),
        );
        form.insert("favourite".to_string(), false.to_string());
        form
    }

    fn to_payload(&self) -> ClientPayload {
        ClientPayload::from(self)
    }
}

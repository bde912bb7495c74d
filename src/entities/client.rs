//! Client entity - A customer the company invoices.
//!
//! `Client` is the record as the REST service returns it; `ClientPayload` is the
//! normalized body sent on create and update.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Preferred channel for reaching a client
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    /// E-mail address
    Email,
    /// `WhatsApp` number
    Whatsapp,
    /// Discord handle
    Discord,
}

impl ContactMethod {
    /// Every accepted contact method, in display order
    pub const ALL: [Self; 3] = [Self::Email, Self::Whatsapp, Self::Discord];

    /// Wire value of the method
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
            Self::Discord => "discord",
        }
    }

    /// Parses a wire value. Input is expected to be trimmed and lower-cased already.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client record as stored by the service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Identifier issued by the store
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub main_contact_method: ContactMethod,
    pub main_contact: String,
    #[serde(default)]
    pub additional_contact: Option<String>,
    /// Company registration number
    #[serde(default)]
    pub ico: Option<String>,
    /// VAT registration number
    #[serde(default)]
    pub dic: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub favourite: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Normalized client body for create and update requests
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPayload {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub main_contact_method: ContactMethod,
    pub main_contact: String,
    pub additional_contact: Option<String>,
    pub ico: Option<String>,
    pub dic: Option<String>,
    pub notes: Option<String>,
    pub favourite: bool,
}

impl From<&Client> for ClientPayload {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            address: client.address.clone(),
            city: client.city.clone(),
            country: client.country.clone(),
            main_contact_method: client.main_contact_method,
            main_contact: client.main_contact.clone(),
            additional_contact: client.additional_contact.clone(),
            ico: client.ico.clone(),
            dic: client.dic.clone(),
            notes: client.notes.clone(),
            favourite: client.favourite,
        }
    }
}

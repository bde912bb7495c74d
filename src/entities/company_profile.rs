//! Company profile entity - The invoicing company's own details.
//!
//! The service stores every field as nullable because a fresh account starts empty;
//! the payload requires all of them.

use serde::{Deserialize, Serialize};

/// Company profile record as returned by `GET /api/users/me`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub trade_licensing_office: Option<String>,
    pub ico: Option<String>,
    pub dic: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bank: Option<String>,
    pub iban: Option<String>,
    pub swift: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl CompanyProfile {
    /// Looks up one of the profile's form fields by its wire name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "name" => &self.name,
            "address" => &self.address,
            "city" => &self.city,
            "country" => &self.country,
            "trade_licensing_office" => &self.trade_licensing_office,
            "ico" => &self.ico,
            "dic" => &self.dic,
            "email" => &self.email,
            "phone" => &self.phone,
            "bank" => &self.bank,
            "iban" => &self.iban,
            "swift" => &self.swift,
            _ => return None,
        };
        value.as_deref()
    }
}

/// Normalized company profile body for `PUT /api/users/me`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfilePayload {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub trade_licensing_office: String,
    pub ico: String,
    pub dic: String,
    pub email: String,
    pub phone: String,
    pub bank: String,
    pub iban: String,
    pub swift: String,
}

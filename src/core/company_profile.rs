//! Company profile validation and completeness.
//!
//! The profile has no optional fields: all twelve must be filled in before invoices
//! can be issued, which is what the completeness gate checks.

use super::FormPayload;
use super::fields::{
    FieldErrors, FormReader, MAX_PLACE_LEN, MAX_REGISTRATION_LEN, MAX_SHORT_LEN, RawFields,
};
use crate::entities::{CompanyProfile, CompanyProfilePayload};

/// Maximum length of a phone number
pub const MAX_PHONE_LEN: usize = 64;

/// Maximum length of an IBAN
pub const MAX_IBAN_LEN: usize = 34;

/// Maximum length of a SWIFT/BIC code
pub const MAX_SWIFT_LEN: usize = 11;

/// Every company profile field, all of them required
pub const PROFILE_FIELDS: [&str; 12] = [
    "name",
    "address",
    "city",
    "country",
    "trade_licensing_office",
    "ico",
    "dic",
    "email",
    "phone",
    "bank",
    "iban",
    "swift",
];

/// True when every profile field is present and non-blank after trimming.
#[must_use]
pub fn is_profile_complete(profile: &CompanyProfile) -> bool {
    PROFILE_FIELDS
        .iter()
        .all(|field| profile.field(field).is_some_and(|v| !v.trim().is_empty()))
}

/// All-blank profile form, used before the current profile has loaded.
#[must_use]
pub fn empty_profile() -> RawFields {
    PROFILE_FIELDS
        .iter()
        .map(|field| ((*field).to_string(), String::new()))
        .collect()
}

/// Profile form pre-filled from a fetched record; missing values read as blank.
#[must_use]
pub fn normalize_profile(profile: Option<&CompanyProfile>) -> RawFields {
    PROFILE_FIELDS
        .iter()
        .map(|field| {
            let value = profile.and_then(|p| p.field(field)).unwrap_or_default();
            ((*field).to_string(), value.to_string())
        })
        .collect()
}

/// Validates and normalizes raw company profile form input.
///
/// # Errors
/// Returns the failing fields when any field is blank or too long.
pub fn validate_company_profile(raw: &RawFields) -> Result<CompanyProfilePayload, FieldErrors> {
    let mut form = FormReader::new(raw);

    let payload = CompanyProfilePayload {
        name: form.required("name", MAX_SHORT_LEN),
        address: form.required("address", MAX_SHORT_LEN),
        city: form.required("city", MAX_PLACE_LEN),
        country: form.required("country", MAX_PLACE_LEN),
        trade_licensing_office: form.required("trade_licensing_office", MAX_SHORT_LEN),
        ico: form.required("ico", MAX_REGISTRATION_LEN),
        dic: form.required("dic", MAX_REGISTRATION_LEN),
        email: form.required("email", MAX_SHORT_LEN),
        phone: form.required("phone", MAX_PHONE_LEN),
        bank: form.required("bank", MAX_SHORT_LEN),
        iban: form.required("iban", MAX_IBAN_LEN),
        swift: form.required("swift", MAX_SWIFT_LEN),
    };

    form.finish(payload)
}

impl FormPayload for CompanyProfilePayload {
    fn to_form(&self) -> RawFields {
        [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("country", &self.country),
            ("trade_licensing_office", &self.trade_licensing_office),
            ("ico", &self.ico),
            ("dic", &self.dic),
            ("email", &self.email),
            ("phone", &self.phone),
            ("bank", &self.bank),
            ("iban", &self.iban),
            ("swift", &self.swift),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::fields::FieldError;
    use crate::test_utils::complete_profile;

    #[test]
    fn test_empty_profile_is_not_complete() {
        assert!(!is_profile_complete(&CompanyProfile::default()));
    }

    #[test]
    fn test_complete_profile_passes() {
        assert!(is_profile_complete(&complete_profile()));
    }

    #[test]
    fn test_single_blank_field_fails_completeness() {
        for field in PROFILE_FIELDS {
            let mut form = normalize_profile(Some(&complete_profile()));
            form.insert(field.to_string(), "  ".to_string());
            let profile: CompanyProfile =
                serde_json::from_value(serde_json::to_value(&form).unwrap()).unwrap();

            assert!(!is_profile_complete(&profile), "blank {field} must fail");
        }
    }

    #[test]
    fn test_normalize_profile_fills_missing_fields() {
        let profile = CompanyProfile {
            name: Some("Acme Co".to_string()),
            ..CompanyProfile::default()
        };

        let normalized = normalize_profile(Some(&profile));
        assert_eq!(normalized.len(), PROFILE_FIELDS.len());
        assert_eq!(normalized["name"], "Acme Co");
        assert_eq!(normalized["email"], "");
        assert_eq!(normalize_profile(None), empty_profile());
    }

    #[test]
    fn test_validation_requires_every_field() {
        let errors = validate_company_profile(&empty_profile()).unwrap_err();
        assert_eq!(errors.len(), PROFILE_FIELDS.len());
        assert!(errors.iter().all(|(_, e)| e == FieldError::Required));
    }

    #[test]
    fn test_validation_trims_payload() {
        let mut form = normalize_profile(Some(&complete_profile()));
        form.insert("name".to_string(), "  Acme Updated  ".to_string());
        form.insert("iban".to_string(), "  CZ6508000000192000145399  ".to_string());

        let payload = validate_company_profile(&form).unwrap();
        assert_eq!(payload.name, "Acme Updated");
        assert_eq!(payload.iban, "CZ6508000000192000145399");
        assert_eq!(validate_company_profile(&payload.to_form()).unwrap(), payload);
    }

    #[test]
    fn test_validation_rejects_too_long_field() {
        let mut form = normalize_profile(Some(&complete_profile()));
        form.insert("bank".to_string(), "b".repeat(MAX_SHORT_LEN + 1));

        let errors = validate_company_profile(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("bank"),
            Some(FieldError::TooLong { max: MAX_SHORT_LEN })
        );
    }

    #[test]
    fn test_per_field_limits() {
        let limits = [
            ("city", MAX_PLACE_LEN),
            ("country", MAX_PLACE_LEN),
            ("ico", MAX_REGISTRATION_LEN),
            ("dic", MAX_REGISTRATION_LEN),
            ("phone", MAX_PHONE_LEN),
            ("iban", MAX_IBAN_LEN),
            ("swift", MAX_SWIFT_LEN),
        ];
        for (field, max) in limits {
            let mut form = normalize_profile(Some(&complete_profile()));
            form.insert(field.to_string(), "x".repeat(max));
            assert!(
                validate_company_profile(&form).is_ok(),
                "{field} at {max} chars must pass"
            );

            form.insert(field.to_string(), "x".repeat(max + 1));
            let errors = validate_company_profile(&form).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get(field), Some(FieldError::TooLong { max }));
        }
    }

    #[test]
    fn test_long_banking_fields_are_rejected() {
        let mut form = normalize_profile(Some(&complete_profile()));
        for field in ["swift", "iban", "phone"] {
            form.insert(field.to_string(), "9".repeat(200));
        }

        let errors = validate_company_profile(&form).unwrap_err();
        assert_eq!(errors.get("swift"), Some(FieldError::TooLong { max: 11 }));
        assert_eq!(errors.get("iban"), Some(FieldError::TooLong { max: 34 }));
        assert_eq!(errors.get("phone"), Some(FieldError::TooLong { max: 64 }));
    }
}

//! Shared test utilities for the admin client.
//!
//! Provides in-memory fakes of the REST APIs that count calls, record payloads,
//! and can be told to fail or to respond slowly, plus sample entities with
//! sensible defaults.
#![allow(clippy::unwrap_used)]

use crate::{
    api::{EntityApi, ProfileApi},
    core::{EntityKind, RawFields, fields::raw_fields},
    entities::{
        CatalogItem, CatalogItemPayload, Client, ClientPayload, CompanyProfile,
        CompanyProfilePayload, ContactMethod,
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer tracing subscriber once per test binary.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates a stored client with sensible defaults.
///
/// # Defaults
/// * contact: e-mail `hello@acme.test`
/// * `favourite`: true
/// * optional fields: absent, except `notes`
pub fn sample_client(id: &str, name: &str) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        address: "123 Main St".to_string(),
        city: "Prague".to_string(),
        country: "Czechia".to_string(),
        main_contact_method: ContactMethod::Email,
        main_contact: "hello@acme.test".to_string(),
        additional_contact: None,
        ico: None,
        dic: None,
        notes: Some("Priority account".to_string()),
        favourite: true,
        created_at: None,
        updated_at: None,
    }
}

/// A client form that passes validation.
pub fn valid_client_form() -> RawFields {
    raw_fields([
        ("name", "Nova Labs"),
        ("address", "88 Market St"),
        ("city", "Brno"),
        ("country", "Czechia"),
        ("main_contact_method", "discord"),
        ("main_contact", "nova-team"),
        ("additional_contact", ""),
        ("ico", ""),
        ("dic", ""),
        ("notes", "Pilot customer"),
        ("favourite", "false"),
    ])
}

/// Builds the record the store would return for a client payload.
pub fn client_from_payload(id: &str, payload: &ClientPayload) -> Client {
    Client {
        id: id.to_string(),
        name: payload.name.clone(),
        address: payload.address.clone(),
        city: payload.city.clone(),
        country: payload.country.clone(),
        main_contact_method: payload.main_contact_method,
        main_contact: payload.main_contact.clone(),
        additional_contact: payload.additional_contact.clone(),
        ico: payload.ico.clone(),
        dic: payload.dic.clone(),
        notes: payload.notes.clone(),
        favourite: payload.favourite,
        created_at: None,
        updated_at: None,
    }
}

/// Creates a stored catalog item with a 21% tax rate.
pub fn sample_catalog_item(id: &str, name: &str, unit_price: u64) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} description"),
        unit: "hour".to_string(),
        unit_price,
        tax_rate: Some(21),
        created_at: None,
        updated_at: None,
    }
}

/// Builds the record the store would return for a catalog item payload.
pub fn catalog_item_from_payload(id: &str, payload: &CatalogItemPayload) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: payload.name.clone(),
        description: payload.description.clone(),
        unit: payload.unit.clone(),
        unit_price: payload.unit_price,
        tax_rate: payload.tax_rate,
        created_at: None,
        updated_at: None,
    }
}

/// The fully populated example company profile.
pub fn complete_profile() -> CompanyProfile {
    let field = |v: &str| Some(v.to_string());
    CompanyProfile {
        id: field("user-1"),
        name: field("Acme Co"),
        address: field("123 Main St"),
        city: field("Prague"),
        country: field("Czechia"),
        trade_licensing_office: field("Prague 1"),
        ico: field("12345678"),
        dic: field("CZ12345678"),
        email: field("billing@acme.test"),
        phone: field("+420123456789"),
        bank: field("Example Bank"),
        iban: field("CZ6508000000192000145399"),
        swift: field("GIBACZPX"),
        created_at: None,
        updated_at: None,
    }
}

fn profile_from_payload(payload: &CompanyProfilePayload) -> CompanyProfile {
    let field = |v: &String| Some(v.clone());
    CompanyProfile {
        id: Some("user-1".to_string()),
        name: field(&payload.name),
        address: field(&payload.address),
        city: field(&payload.city),
        country: field(&payload.country),
        trade_licensing_office: field(&payload.trade_licensing_office),
        ico: field(&payload.ico),
        dic: field(&payload.dic),
        email: field(&payload.email),
        phone: field(&payload.phone),
        bank: field(&payload.bank),
        iban: field(&payload.iban),
        swift: field(&payload.swift),
        created_at: None,
        updated_at: None,
    }
}

/// In-memory profile endpoint
pub struct FakeProfileApi {
    profile: Mutex<std::result::Result<CompanyProfile, String>>,
    update_error: Mutex<Option<String>>,
    updates: Mutex<Vec<CompanyProfilePayload>>,
    fetches: AtomicUsize,
    delay: Option<Duration>,
}

impl FakeProfileApi {
    pub fn with_profile(profile: CompanyProfile) -> Self {
        Self {
            profile: Mutex::new(Ok(profile)),
            update_error: Mutex::new(None),
            updates: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        let api = Self::with_profile(CompanyProfile::default());
        api.fail_with(message);
        api
    }

    /// Every fetch sleeps for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_profile(&self, profile: CompanyProfile) {
        *self.profile.lock().unwrap() = Ok(profile);
    }

    pub fn fail_with(&self, message: &str) {
        *self.profile.lock().unwrap() = Err(message.to_string());
    }

    pub fn fail_updates_with(&self, message: &str) {
        *self.update_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> Vec<CompanyProfilePayload> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileApi for FakeProfileApi {
    async fn get_current(&self) -> Result<CompanyProfile> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.profile
            .lock()
            .unwrap()
            .clone()
            .map_err(|message| Error::Transport { message })
    }

    async fn update_current(&self, payload: &CompanyProfilePayload) -> Result<CompanyProfile> {
        self.updates.lock().unwrap().push(payload.clone());
        if let Some(message) = self.update_error.lock().unwrap().clone() {
            return Err(Error::Api {
                status: Some(422),
                message,
            });
        }
        let profile = profile_from_payload(payload);
        *self.profile.lock().unwrap() = Ok(profile.clone());
        Ok(profile)
    }
}

type BuildEntity<K> = Box<dyn Fn(&str, &<K as EntityKind>::Payload) -> K + Send + Sync>;

/// In-memory REST collection for one entity kind
pub struct FakeEntityApi<K: EntityKind> {
    items: Mutex<Vec<K>>,
    build: BuildEntity<K>,
    next_id: AtomicUsize,
    list_error: Mutex<Option<String>>,
    write_error: Mutex<Option<String>>,
    created: Mutex<Vec<K::Payload>>,
    updated: Mutex<Vec<(String, K::Payload)>>,
    archived: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
    delay: Option<Duration>,
}

impl FakeEntityApi<Client> {
    pub fn clients(items: Vec<Client>) -> Self {
        Self::new(items, Box::new(client_from_payload))
    }
}

impl FakeEntityApi<CatalogItem> {
    pub fn catalog_items(items: Vec<CatalogItem>) -> Self {
        Self::new(items, Box::new(catalog_item_from_payload))
    }
}

impl<K: EntityKind> FakeEntityApi<K> {
    pub fn new(items: Vec<K>, build: BuildEntity<K>) -> Self {
        Self {
            items: Mutex::new(items),
            build,
            next_id: AtomicUsize::new(1),
            list_error: Mutex::new(None),
            write_error: Mutex::new(None),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            archived: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Every create and update sleeps for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fail_list_with(&self, message: &str) {
        *self.list_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_writes_with(&self, message: &str) {
        *self.write_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<K::Payload> {
        self.created.lock().unwrap().clone()
    }

    pub fn updated(&self) -> Vec<(String, K::Payload)> {
        self.updated.lock().unwrap().clone()
    }

    pub fn archived(&self) -> Vec<String> {
        self.archived.lock().unwrap().clone()
    }

    fn write_error(&self) -> Option<Error> {
        self.write_error
            .lock()
            .unwrap()
            .clone()
            .map(|message| Error::Api {
                status: Some(409),
                message,
            })
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn not_found() -> Error {
    Error::Api {
        status: Some(404),
        message: "Not found".to_string(),
    }
}

#[async_trait]
impl<K: EntityKind> EntityApi<K> for FakeEntityApi<K> {
    async fn list(&self) -> Result<Vec<K>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.list_error.lock().unwrap().clone() {
            return Err(Error::Transport { message });
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create(&self, payload: &K::Payload) -> Result<K> {
        self.created.lock().unwrap().push(payload.clone());
        self.pause().await;
        if let Some(error) = self.write_error() {
            return Err(error);
        }
        let id = format!("id-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let entity = (self.build)(&id, payload);
        self.items.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: &str, payload: &K::Payload) -> Result<K> {
        self.updated
            .lock()
            .unwrap()
            .push((id.to_string(), payload.clone()));
        self.pause().await;
        if let Some(error) = self.write_error() {
            return Err(error);
        }
        let entity = (self.build)(id, payload);
        let mut items = self.items.lock().unwrap();
        let slot = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(not_found)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn archive(&self, id: &str) -> Result<()> {
        self.archived.lock().unwrap().push(id.to_string());
        if let Some(error) = self.write_error() {
            return Err(error);
        }
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

/// Settings file and environment overrides
pub mod settings;

pub use settings::{ApiSettings, NotificationSettings, Settings};

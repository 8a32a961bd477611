pub mod settings_service;
pub mod timestamp_injector;

pub use settings_service::SettingsService;
pub use timestamp_injector::TimestampInjector;

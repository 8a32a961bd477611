//! tests/interceptor_tests.rs
use std::sync::Arc;
use mockall::mock;
use serde_json::json;
use stampbot_common::models::chat::ChatMessage;
use stampbot_common::models::timestamp::TimestampConfig;
use stampbot_common::traits::interceptor_traits::{AbortSignal, GenerationType};
use stampbot_common::traits::settings_traits::ConfigProvider;
use stampbot_core::{Error, InterceptorRegistry, MessageTimestampInterceptor, SettingsService};
use stampbot_core::interceptors::message_timestamp::MESSAGE_TIMESTAMP_ID;
use stampbot_core::settings::InMemorySettingsStore;
use stampbot_core::test_utils::helpers::{enabled_config, message_at, utc_injector, CountingSaver, FIXED_INSTANT_MS};

mock! {
    Provider {}
    impl ConfigProvider for Provider {
        fn get_configuration(&self) -> TimestampConfig;
    }
}

#[test]
fn test_settings_are_read_on_every_generation() {
    let mut provider = MockProvider::new();
    provider
        .expect_get_configuration()
        .times(2)
        .returning(|| enabled_config("YYYY-MM-DD", "[{{timestamp}}] {{message}}"));

    let registry = InterceptorRegistry::new();
    registry
        .register(Arc::new(MessageTimestampInterceptor::new(Arc::new(provider), utc_injector())))
        .unwrap();

    let mut chat = vec![message_at("hello", FIXED_INSTANT_MS)];
    let abort = AbortSignal::new();
    registry.run(&mut chat, 8192, &abort, &GenerationType::Normal);
    registry.run(&mut chat, 8192, &abort, &GenerationType::Swipe);

    assert_eq!(chat[0].text(), Some("[2024-01-15] [2024-01-15] hello"));
}

#[test]
fn test_install_with_settings_service() -> Result<(), Error> {
    let store = Arc::new(InMemorySettingsStore::new());
    let saver = Arc::new(CountingSaver::new());
    let settings = Arc::new(SettingsService::new(store, saver.clone()));

    let registry = InterceptorRegistry::new();
    MessageTimestampInterceptor::install(&registry, settings.clone())?;
    assert_eq!(registry.ids(), vec![MESSAGE_TIMESTAMP_ID]);

    // Disabled by default: nothing changes.
    let mut chat = vec![message_at("hello", FIXED_INSTANT_MS)];
    let outcome = registry.run(&mut chat, 4096, &AbortSignal::new(), &GenerationType::Normal);
    assert_eq!(outcome.ran, 1);
    assert!(!outcome.aborted);
    assert_eq!(chat[0].mes, json!("hello"));

    // Enabled with an explicit time zone-free pattern.
    settings.set_enabled(true);
    settings.set_timestamp_format("[stamped]");
    registry.run(&mut chat, 4096, &AbortSignal::new(), &GenerationType::Normal);
    assert_eq!(chat[0].mes, json!("[stamped] hello"));
    assert_eq!(saver.saves(), 2);

    // Second install is rejected.
    assert!(matches!(
        MessageTimestampInterceptor::install(&registry, settings.clone()),
        Err(Error::AlreadyRegistered(_))
    ));
    Ok(())
}

#[test]
fn test_pre_aborted_generation_runs_nothing() {
    let mut provider = MockProvider::new();
    provider.expect_get_configuration().never();

    let registry = InterceptorRegistry::new();
    registry
        .register(Arc::new(MessageTimestampInterceptor::new(Arc::new(provider), utc_injector())))
        .unwrap();

    let abort = AbortSignal::new();
    abort.abort();
    let mut chat: Vec<ChatMessage> = vec![message_at("hello", FIXED_INSTANT_MS)];
    let outcome = registry.run(&mut chat, 0, &abort, &GenerationType::Normal);

    assert_eq!(outcome.ran, 0);
    assert!(outcome.aborted);
    assert_eq!(chat[0].text(), Some("hello"));
}

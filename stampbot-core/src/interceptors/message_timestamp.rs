// File: stampbot-core/src/interceptors/message_timestamp.rs

use std::sync::Arc;
use stampbot_common::models::chat::ChatMessage;
use stampbot_common::traits::interceptor_traits::{AbortSignal, GenerationInterceptor, GenerationType};
use stampbot_common::traits::settings_traits::ConfigProvider;
use crate::Error;
use crate::interceptors::registry::InterceptorRegistry;
use crate::services::timestamp_injector::TimestampInjector;

pub const MESSAGE_TIMESTAMP_ID: &str = "message_timestamp";

/// Hooks the timestamp injector into the host's generation pipeline.
/// Settings are read fresh on every generation.
pub struct MessageTimestampInterceptor {
    provider: Arc<dyn ConfigProvider>,
    injector: TimestampInjector,
}

impl MessageTimestampInterceptor {
    pub fn new(provider: Arc<dyn ConfigProvider>, injector: TimestampInjector) -> Self {
        Self { provider, injector }
    }

    /// Build with the default injector and register it.
    pub fn install(
        registry: &InterceptorRegistry,
        provider: Arc<dyn ConfigProvider>,
    ) -> Result<Arc<Self>, Error> {
        let interceptor = Arc::new(Self::new(provider, TimestampInjector::with_defaults()));
        registry.register(interceptor.clone())?;
        Ok(interceptor)
    }
}

impl GenerationInterceptor for MessageTimestampInterceptor {
    fn id(&self) -> &str {
        MESSAGE_TIMESTAMP_ID
    }

    fn intercept(
        &self,
        chat: &mut [ChatMessage],
        _context_size: usize,
        _abort: &AbortSignal,
        _generation_type: &GenerationType,
    ) {
        let config = self.provider.get_configuration();
        self.injector.inject(chat, &config);
    }
}

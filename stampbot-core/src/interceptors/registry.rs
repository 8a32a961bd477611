// File: stampbot-core/src/interceptors/registry.rs

use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{debug, info};
use stampbot_common::models::chat::ChatMessage;
use stampbot_common::traits::interceptor_traits::{AbortSignal, GenerationInterceptor, GenerationType};
use crate::Error;

/// What happened during one `InterceptorRegistry::run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterceptOutcome {
    /// Number of interceptors that were called
    pub ran: usize,
    /// True if an interceptor tripped the abort signal
    pub aborted: bool,
}

/// Ordered set of interceptors the host runs over a chat before generating.
/// Interceptors are kept sorted by priority; equal priorities keep
/// registration order.
#[derive(Default)]
pub struct InterceptorRegistry {
    interceptors: RwLock<Vec<Arc<dyn GenerationInterceptor>>>,
}

impl InterceptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, interceptor: Arc<dyn GenerationInterceptor>) -> Result<(), Error> {
        let id = interceptor.id().to_string();
        let priority = interceptor.priority();

        let mut list = self.interceptors.write();
        if list.iter().any(|i| i.id() == id) {
            return Err(Error::AlreadyRegistered(format!(
                "Interceptor with ID '{}' already registered",
                id
            )));
        }

        let insert_pos = list.partition_point(|i| i.priority() <= priority);
        list.insert(insert_pos, interceptor);

        info!("Registered generation interceptor '{}' with priority {}", id, priority);
        Ok(())
    }

    pub fn unregister(&self, id: &str) -> Result<(), Error> {
        let mut list = self.interceptors.write();
        let before = list.len();
        list.retain(|i| i.id() != id);

        if list.len() == before {
            return Err(Error::NotFound(format!("Interceptor '{}' not registered", id)));
        }

        info!("Unregistered generation interceptor '{}'", id);
        Ok(())
    }

    /// Registered ids in run order.
    pub fn ids(&self) -> Vec<String> {
        self.interceptors.read().iter().map(|i| i.id().to_string()).collect()
    }

    /// Run every interceptor over `chat` in priority order. Stops as soon as
    /// the abort signal is tripped.
    pub fn run(
        &self,
        chat: &mut [ChatMessage],
        context_size: usize,
        abort: &AbortSignal,
        generation_type: &GenerationType,
    ) -> InterceptOutcome {
        // Snapshot so an interceptor may (un)register others without deadlocking.
        let snapshot: Vec<Arc<dyn GenerationInterceptor>> = self.interceptors.read().clone();
        let mut ran = 0;

        for interceptor in snapshot {
            if abort.is_aborted() {
                break;
            }
            debug!("Running interceptor '{}' for {} generation", interceptor.id(), generation_type);
            interceptor.intercept(chat, context_size, abort, generation_type);
            ran += 1;
        }

        let outcome = InterceptOutcome { ran, aborted: abort.is_aborted() };
        if outcome.aborted {
            info!("Generation aborted by interceptor after {} interceptor(s)", ran);
        }
        outcome
    }
}

// File: stampbot-common/src/traits/interceptor_traits.rs

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use serde::{Deserialize, Serialize};
use crate::models::chat::ChatMessage;

/// Kind of generation the host is about to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationType {
    Normal,
    Regenerate,
    Swipe,
    Continue,
    Impersonate,
    Quiet,
    Other(String),
}

impl GenerationType {
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "" | "normal" => GenerationType::Normal,
            "regenerate" => GenerationType::Regenerate,
            "swipe" => GenerationType::Swipe,
            "continue" => GenerationType::Continue,
            "impersonate" => GenerationType::Impersonate,
            "quiet" => GenerationType::Quiet,
            other => GenerationType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for GenerationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationType::Normal => write!(f, "normal"),
            GenerationType::Regenerate => write!(f, "regenerate"),
            GenerationType::Swipe => write!(f, "swipe"),
            GenerationType::Continue => write!(f, "continue"),
            GenerationType::Impersonate => write!(f, "impersonate"),
            GenerationType::Quiet => write!(f, "quiet"),
            GenerationType::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Cloneable flag an interceptor can trip to cancel the pending generation.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    aborted: Arc<AtomicBool>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

/// A callback the host runs over the outgoing chat before generating.
pub trait GenerationInterceptor: Send + Sync {
    /// Unique identifier for this interceptor
    fn id(&self) -> &str;

    /// Lower runs first
    fn priority(&self) -> u32 {
        100
    }

    fn intercept(
        &self,
        chat: &mut [ChatMessage],
        context_size: usize,
        abort: &AbortSignal,
        generation_type: &GenerationType,
    );
}

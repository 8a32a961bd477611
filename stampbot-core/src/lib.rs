// src/lib.rs

pub mod render;
pub mod settings;
pub mod services;
pub mod interceptors;
pub mod test_utils;

pub use stampbot_common::error::Error;
pub use interceptors::{InterceptorRegistry, MessageTimestampInterceptor};
pub use services::{SettingsService, TimestampInjector};

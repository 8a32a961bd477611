// File: stampbot-common/src/models/mod.rs
pub mod chat;
pub mod timestamp;

pub use chat::{ChatMessage, MessageExtra, SendDate};
pub use timestamp::TimestampConfig;

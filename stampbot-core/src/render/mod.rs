//! Host-style template substitution and date handling.

pub mod moment;
pub mod send_date;
pub mod template;
pub mod zone;

pub use moment::MomentFormatter;
pub use template::MacroRenderer;
pub use zone::Zone;

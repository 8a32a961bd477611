pub mod interceptor_traits;
pub mod render_traits;
pub mod settings_traits;

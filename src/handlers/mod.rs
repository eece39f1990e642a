pub mod default;
pub mod global_404;
pub mod ping;
pub mod user;

pub use default::default_route_handler;
pub use global_404::global_404_handler;
pub use ping::ping_handler;

pub use user::login::login_handler;
pub use user::profile::profile_handler;
pub use user::resend_code::resend_code_handler;
pub use user::send_code::send_code_handler;
pub use user::signup::signup_handler;
pub use user::verify_code::verify_code_handler;

pub mod get_profile;
pub mod login;
pub mod register;

pub use get_profile::get_profile;
pub use login::login;
pub use register::register;

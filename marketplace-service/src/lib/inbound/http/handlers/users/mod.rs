pub mod update_user;

pub use update_user::update_user;

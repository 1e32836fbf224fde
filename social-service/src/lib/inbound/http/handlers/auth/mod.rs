pub mod google;
pub mod login;
pub mod register;

pub use google::google_callback;
pub use google::google_login;
pub use login::login;
pub use register::register;

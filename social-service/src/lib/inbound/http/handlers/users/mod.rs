pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod get_user_posts;
pub mod list_users;
pub mod update_user;

pub use create_user::create_user;
pub use delete_user::delete_user;
pub use get_user::get_user;
pub use get_user::get_user_by_email;
pub use get_user::get_user_by_username;
pub use get_user_posts::get_user_posts;
pub use list_users::list_users;
pub use update_user::update_user;

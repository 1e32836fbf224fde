pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod list_posts;
pub mod update_post;

pub use create_post::create_post;
pub use delete_post::delete_post;
pub use get_post::get_post;
pub use list_posts::list_posts;
pub use list_posts::list_posts_by_user;
pub use update_post::update_post;

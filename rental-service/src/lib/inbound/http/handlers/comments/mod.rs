pub mod create_comment;
pub mod delete_comment;
pub mod list_comments;

pub use create_comment::create_comment;
pub use delete_comment::delete_comment;
pub use list_comments::list_comments;

pub mod comment_ids;
pub mod in_memory;
pub mod sqlite_comment_store;

pub use in_memory::InMemoryCommentStore;
pub use sqlite_comment_store::SqliteCommentStore;

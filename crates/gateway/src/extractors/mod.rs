//! Custom request extractors.

mod book_id;
mod validated_json;

pub use book_id::BookId;
pub use validated_json::ValidatedJson;

pub mod collection;
pub mod content_list;
pub mod frontmatter;
pub mod record;

pub use collection::ContentCollection;
pub use record::{ContentRecord, RecordDate, Slug};

mod page;
pub use self::page::{PageQuery, DEFAULT_LIMIT};

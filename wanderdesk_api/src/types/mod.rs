mod meta;
pub use self::meta::{Page, Pagination};
pub(crate) use self::meta::items_from_body;

mod record;
pub use self::record::{Record, RecordId};

mod payload;
pub use self::payload::{Encoding, FieldValue, FileUpload, Submission};

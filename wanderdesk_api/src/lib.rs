pub mod auth;
mod client;
mod errors;
mod query;
mod resource;
pub mod types;
pub use self::auth::{NoAuth, StaticToken, TokenFile, TokenSource};
pub use self::client::{Client, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::query::{PageQuery, DEFAULT_LIMIT};
pub use self::resource::Resource;

pub mod client;
pub mod storage;
pub mod token;

pub use client::AuthClient;
pub use storage::{FileStore, KeyValueStore, MemoryStore, NullStore, SessionStore};
pub use token::{is_token_expired, is_token_expired_at};

//! vndb-client - Connection-pooled async client for the VNDB TCP API
//!
//! Talks the line-oriented VNDB protocol: UTF-8 commands terminated by an
//! end-of-transmission byte, JSON payloads, optional TLS.
//!
//! ## Architecture
//!
//! | Layer | Module | Role |
//! |-------|--------|------|
//! | Facade | `client` | One typed method per server command |
//! | Dispatch | `dispatch` | Acquire session, run command, decode payload |
//! | Pooling | `connection::pool` | Bounded set of reusable sessions |
//! | Session | `connection::session` | Login state, request/response pairing |
//! | Transport | `connection::transport` | TCP or TLS byte stream, frame reads |
//! | Wire | `protocol` | Framing, response splitting, error classification |
//!
//! Server refusals are data, not failures: every call returns
//! `Result<Reply<T>, VndbError>` where the `Err` arm means the conversation
//! itself broke (I/O, malformed payloads) and `Reply::Rejected` carries a
//! well-formed `error` response.
//!
//! ## Usage
//!
//! ```ignore
//! use vndb_client::{ClientConfig, Filter, Vndb, VndbFlag};
//!
//! let client = Vndb::new(ClientConfig::default());
//! match client
//!     .get_visual_novel(&Filter::new("id = 17"), &[VndbFlag::Basic], None)
//!     .await?
//! {
//!     Reply::Data(set) => println!("{} rows", set.num),
//!     Reply::Rejected(refusal) => eprintln!("server said no: {refusal}"),
//! }
//! ```

pub mod client;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod protocol;
pub mod request;

// Re-exports
pub use client::Vndb;
pub use config::{ClientConfig, Credentials};
pub use connection::{PooledSession, ServerReply, Session, SessionPool};
pub use dispatch::Dispatcher;
pub use error::{Reply, ServerError, VndbError};
pub use request::{Filter, GetVerb, RequestOptions, SetVerb, VndbFlag};

// Model re-exports
pub use models::{
    Character, DatabaseStats, Producer, Release, ResultSet, Staff, User, VisualNovel, VnListItem,
    VnListUpdate, VoteListItem, VoteUpdate, WishlistItem, WishlistUpdate,
};

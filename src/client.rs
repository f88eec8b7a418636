//! High-level API Client
//!
//! Single responsibility: the typed surface callers use. One method per
//! server command, wired through a dispatcher to the session pool.
//!
//! # Usage
//!
//! ```ignore
//! use vndb_client::{ClientConfig, Filter, Vndb, VndbFlag};
//!
//! let client = Vndb::new(ClientConfig::default());
//! let reply = client
//!     .get_visual_novel(&Filter::new("id = 17"), &[VndbFlag::Basic], None)
//!     .await?;
//! ```
//!
//! Every method returns `Result<Reply<T>, VndbError>`: the `Err` arm is a
//! broken conversation, a `Reply::Rejected` is the server saying no, and
//! `Reply::Data` carries the decoded payload.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::connection::SessionPool;
use crate::dispatch::Dispatcher;
use crate::error::{Reply, VndbError};
use crate::models::{
    Character, DatabaseStats, Producer, Release, ResultSet, Staff, User, VisualNovel, VnListItem,
    VnListUpdate, VoteListItem, VoteUpdate, WishlistItem, WishlistUpdate,
};
use crate::request::{
    build_get_command, build_set_command, Filter, GetVerb, RequestOptions, SetVerb, VndbFlag,
};

/// A pooled, typed client for the VNDB API.
pub struct Vndb {
    pool: Arc<SessionPool>,
    dispatcher: Dispatcher,
}

impl Vndb {
    /// Create a client over its own session pool.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_pool(SessionPool::new(config))
    }

    /// Create a client over an existing pool. Several clients may share
    /// one pool.
    pub fn with_pool(pool: Arc<SessionPool>) -> Self {
        let dispatcher = Dispatcher::new(Arc::clone(&pool));
        Self { pool, dispatcher }
    }

    /// The pool backing this client.
    pub fn pool(&self) -> &Arc<SessionPool> {
        &self.pool
    }

    /// Close the backing pool. Outstanding requests finish; new ones fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Query visual novels: `get vn`.
    pub async fn get_visual_novel(
        &self,
        filter: &Filter,
        flags: &[VndbFlag],
        options: Option<&RequestOptions>,
    ) -> Result<Reply<ResultSet<VisualNovel>>, VndbError> {
        self.get(GetVerb::VisualNovel, filter, flags, options).await
    }

    /// Query releases: `get release`.
    pub async fn get_release(
        &self,
        filter: &Filter,
        flags: &[VndbFlag],
        options: Option<&RequestOptions>,
    ) -> Result<Reply<ResultSet<Release>>, VndbError> {
        self.get(GetVerb::Release, filter, flags, options).await
    }

    /// Query producers: `get producer`.
    pub async fn get_producer(
        &self,
        filter: &Filter,
        flags: &[VndbFlag],
        options: Option<&RequestOptions>,
    ) -> Result<Reply<ResultSet<Producer>>, VndbError> {
        self.get(GetVerb::Producer, filter, flags, options).await
    }

    /// Query characters: `get character`.
    pub async fn get_character(
        &self,
        filter: &Filter,
        flags: &[VndbFlag],
        options: Option<&RequestOptions>,
    ) -> Result<Reply<ResultSet<Character>>, VndbError> {
        self.get(GetVerb::Character, filter, flags, options).await
    }

    /// Query staff: `get staff`.
    pub async fn get_staff(
        &self,
        filter: &Filter,
        flags: &[VndbFlag],
        options: Option<&RequestOptions>,
    ) -> Result<Reply<ResultSet<Staff>>, VndbError> {
        self.get(GetVerb::Staff, filter, flags, options).await
    }

    /// Query users: `get user`.
    pub async fn get_user(
        &self,
        filter: &Filter,
        flags: &[VndbFlag],
        options: Option<&RequestOptions>,
    ) -> Result<Reply<ResultSet<User>>, VndbError> {
        self.get(GetVerb::User, filter, flags, options).await
    }

    /// Query votes: `get votelist`.
    pub async fn get_vote_list(
        &self,
        filter: &Filter,
        flags: &[VndbFlag],
        options: Option<&RequestOptions>,
    ) -> Result<Reply<ResultSet<VoteListItem>>, VndbError> {
        self.get(GetVerb::VoteList, filter, flags, options).await
    }

    /// Query play-status rows: `get vnlist`.
    pub async fn get_visual_novel_list(
        &self,
        filter: &Filter,
        flags: &[VndbFlag],
        options: Option<&RequestOptions>,
    ) -> Result<Reply<ResultSet<VnListItem>>, VndbError> {
        self.get(GetVerb::VnList, filter, flags, options).await
    }

    /// Query wishlist rows: `get wishlist`.
    pub async fn get_wishlist(
        &self,
        filter: &Filter,
        flags: &[VndbFlag],
        options: Option<&RequestOptions>,
    ) -> Result<Reply<ResultSet<WishlistItem>>, VndbError> {
        self.get(GetVerb::Wishlist, filter, flags, options).await
    }

    /// Database row counts: `dbstats`.
    pub async fn get_database_stats(&self) -> Result<Reply<DatabaseStats>, VndbError> {
        self.dispatcher.execute_get("dbstats".to_string()).await
    }

    /// Cast, change or remove a vote: `set votelist`.
    ///
    /// `None` removes the vote.
    pub async fn set_vote_list(
        &self,
        id: u32,
        update: Option<&VoteUpdate>,
    ) -> Result<Reply<()>, VndbError> {
        self.set(SetVerb::VoteList, id, update).await
    }

    /// Add, change or remove a play-status row: `set vnlist`.
    ///
    /// `None` removes the row.
    pub async fn set_visual_novel_list(
        &self,
        id: u32,
        update: Option<&VnListUpdate>,
    ) -> Result<Reply<()>, VndbError> {
        self.set(SetVerb::VnList, id, update).await
    }

    /// Add, change or remove a wishlist row: `set wishlist`.
    ///
    /// `None` removes the row.
    pub async fn set_wishlist(
        &self,
        id: u32,
        update: Option<&WishlistUpdate>,
    ) -> Result<Reply<()>, VndbError> {
        self.set(SetVerb::Wishlist, id, update).await
    }

    /// Send a command verbatim and return the raw response text.
    ///
    /// The session is logged in first, but the response is not decoded,
    /// error responses included. Meant for commands this crate has no
    /// typed surface for yet.
    pub async fn raw(&self, command: impl Into<String>) -> Result<Reply<String>, VndbError> {
        self.dispatcher.execute_raw(command.into()).await
    }

    async fn get<T>(
        &self,
        verb: GetVerb,
        filter: &Filter,
        flags: &[VndbFlag],
        options: Option<&RequestOptions>,
    ) -> Result<Reply<ResultSet<T>>, VndbError>
    where
        T: DeserializeOwned,
    {
        let command = build_get_command(verb, flags, filter, options)?;
        self.dispatcher.execute_get(command).await
    }

    async fn set<B>(
        &self,
        verb: SetVerb,
        id: u32,
        body: Option<&B>,
    ) -> Result<Reply<()>, VndbError>
    where
        B: Serialize,
    {
        let command = build_set_command(verb, id, body)?;
        self.dispatcher.execute_set(command).await
    }
}

//! # accord-cache
//!
//! In-memory entity storage with policy-driven admission.
//!
//! ## Features
//!
//! - **Entity Store**: concurrent keyed storage for every cached entity
//!   kind, with guild-scoped kinds keyed by `(guild_id, entity_id)`
//! - **Cache Policies**: composable admission predicates ("always",
//!   "never", "while connected", "newer than D") combined with AND/OR
//! - **Bulk Eviction**: drop all entities scoped to a guild or all
//!   messages of a channel in one call
//!
//! ## Example
//!
//! ```
//! use accord_cache::{CacheConfig, CachePolicy, EntityCache, PolicyContext};
//! use accord_core::{Snowflake, User};
//! use chrono::Duration;
//!
//! let cache = EntityCache::new();
//! let config = CacheConfig {
//!     messages: CachePolicy::WhileConnected.and(CachePolicy::NewerThan(Duration::hours(1))),
//!     ..CacheConfig::default()
//! };
//!
//! let user = User::new(Snowflake::new(1), "alice");
//! if config.users.admits(&PolicyContext::new(true), user.id.created_at()) {
//!     cache.put_user(user);
//! }
//! ```

pub mod policy;
pub mod store;

pub use policy::{CacheConfig, CachePolicy, PolicyContext};
pub use store::EntityCache;

//! Cache admission policies.
//!
//! A policy decides whether a freshly materialized entity is retained in
//! the in-memory store. Evaluation is side-effect-free: policies read a
//! snapshot of client state ([`PolicyContext`]) and the entity's creation
//! time, never the store itself.

use chrono::{DateTime, Duration, Utc};

/// Read-only snapshot of client state consulted during policy evaluation.
///
/// Constructed by the caller at materialization time so that policies
/// never perform implicit global lookups.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext {
    /// Whether the gateway connection is currently in its ready state.
    pub connected: bool,
    /// Evaluation time (injected for deterministic tests).
    pub now: DateTime<Utc>,
}

impl PolicyContext {
    /// Create a context evaluated at the current wall-clock time.
    #[must_use]
    pub fn new(connected: bool) -> Self {
        Self {
            connected,
            now: Utc::now(),
        }
    }

    /// Create a context with an explicit evaluation time.
    #[must_use]
    pub fn at(connected: bool, now: DateTime<Utc>) -> Self {
        Self { connected, now }
    }
}

/// Composable admission predicate for cached entities.
///
/// Policies combine with [`CachePolicy::and`] / [`CachePolicy::or`];
/// `and` short-circuits on the first rejection, `or` on the first
/// acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachePolicy {
    /// Admit every entity.
    Always,
    /// Admit nothing.
    Never,
    /// Admit only while the gateway connection is ready.
    WhileConnected,
    /// Admit only entities created within the given duration of now.
    ///
    /// Primarily useful for messages, where age is meaningful.
    NewerThan(Duration),
    /// Admit when every inner policy admits.
    All(Vec<CachePolicy>),
    /// Admit when any inner policy admits.
    Any(Vec<CachePolicy>),
}

impl CachePolicy {
    /// Combine two policies with logical AND.
    #[must_use]
    pub fn and(self, other: CachePolicy) -> CachePolicy {
        match self {
            CachePolicy::All(mut inner) => {
                inner.push(other);
                CachePolicy::All(inner)
            }
            policy => CachePolicy::All(vec![policy, other]),
        }
    }

    /// Combine two policies with logical OR.
    #[must_use]
    pub fn or(self, other: CachePolicy) -> CachePolicy {
        match self {
            CachePolicy::Any(mut inner) => {
                inner.push(other);
                CachePolicy::Any(inner)
            }
            policy => CachePolicy::Any(vec![policy, other]),
        }
    }

    /// Evaluate the policy for an entity created at `created_at`.
    #[must_use]
    pub fn admits(&self, ctx: &PolicyContext, created_at: DateTime<Utc>) -> bool {
        match self {
            CachePolicy::Always => true,
            CachePolicy::Never => false,
            CachePolicy::WhileConnected => ctx.connected,
            CachePolicy::NewerThan(max_age) => ctx.now - created_at <= *max_age,
            CachePolicy::All(inner) => inner.iter().all(|p| p.admits(ctx, created_at)),
            CachePolicy::Any(inner) => inner.iter().any(|p| p.admits(ctx, created_at)),
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy::Always
    }
}

/// Per-entity-kind cache policies for one client.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub users: CachePolicy,
    pub guilds: CachePolicy,
    pub channels: CachePolicy,
    pub members: CachePolicy,
    pub roles: CachePolicy,
    pub messages: CachePolicy,
    pub voice_states: CachePolicy,
    pub emotes: CachePolicy,
    pub commands: CachePolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            users: CachePolicy::Always,
            guilds: CachePolicy::Always,
            channels: CachePolicy::Always,
            members: CachePolicy::Always,
            roles: CachePolicy::Always,
            messages: CachePolicy::WhileConnected
                .and(CachePolicy::NewerThan(Duration::hours(1))),
            voice_states: CachePolicy::WhileConnected,
            emotes: CachePolicy::Always,
            commands: CachePolicy::Always,
        }
    }
}

impl CacheConfig {
    /// A configuration that caches nothing at all.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            users: CachePolicy::Never,
            guilds: CachePolicy::Never,
            channels: CachePolicy::Never,
            members: CachePolicy::Never,
            roles: CachePolicy::Never,
            messages: CachePolicy::Never,
            voice_states: CachePolicy::Never,
            emotes: CachePolicy::Never,
            commands: CachePolicy::Never,
        }
    }
}

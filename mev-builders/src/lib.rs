//! Known Ethereum block builders.
//!
//! [`BUILDERS`] lists builders seen producing blocks recently, highest block
//! count first. [`OTHER_BUILDERS`] lists the rest. Both are rewritten by
//! `builder-sync regen`; edit entries in place and keep the field order.

mod builders;

pub use builders::{BUILDERS, OTHER_BUILDERS};

/// Whether a builder requires bundles signed with `X-Flashbots-Signature`.
///
/// Signed bundles may get better priority where signing is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signing {
    /// Unsigned bundles are rejected.
    Required,
    /// Signing is accepted and may improve priority.
    Optional,
    /// Signatures are ignored.
    NotSupported,
}

impl Signing {
    pub const fn is_required(&self) -> bool {
        matches!(self, Signing::Required)
    }

    pub const fn is_optional(&self) -> bool {
        matches!(self, Signing::Optional)
    }

    pub const fn is_not_supported(&self) -> bool {
        matches!(self, Signing::NotSupported)
    }
}

/// A block builder and how to submit bundles to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder<'a> {
    /// Human-readable name.
    pub name: &'a str,
    /// Unique lowercase alphanumeric identifier.
    pub identifier: &'a str,
    pub website: &'a str,
    /// Bundle submission endpoint.
    pub searcher_rpc: &'a str,
    /// MEV-Share endpoint, if the builder runs one.
    pub mev_share_rpc: Option<&'a str>,
    /// Block `extra_data` the builder stamps, trimmed. Anyone can forge it.
    pub extra_data: Option<&'a str>,
    pub signing: Signing,
    /// An account is needed before the RPC accepts bundles.
    pub account_required: bool,
}

impl Builder<'_> {
    /// True for builders that cannot be reached with a plain HTTPS client:
    /// `buildernet` needs its own certificate, `bloxroute` needs an account.
    pub fn requires_extra_handling(&self) -> bool {
        matches!(self.identifier, "buildernet" | "bloxroute")
    }
}

/// Every known builder, ranked ones first.
pub fn all() -> impl Iterator<Item = &'static Builder<'static>> {
    BUILDERS.iter().chain(OTHER_BUILDERS.iter())
}

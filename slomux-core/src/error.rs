//! Error types for slomux

use crate::host::InstanceId;

/// Errors surfaced by hooks and the host runtime
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A selector hook ran in a subtree with no provider for its state type
    #[error("no store providing `{state}` is reachable from this component; mount it under a Provider")]
    NoStore { state: &'static str },

    /// Hook slot `index` holds a different type than the hook asked for
    #[error("hook #{index} changed type between activations (expected `{expected}`); hooks must run in the same order on every render")]
    HookOrder { index: usize, expected: &'static str },

    /// The instance is not (or no longer) mounted in this host
    #[error("instance {0} is not mounted")]
    UnknownInstance(InstanceId),
}

/// Result alias used throughout slomux
pub type Result<T, E = Error> = std::result::Result<T, E>;

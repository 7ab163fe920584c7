//! Transaction handles issued by index providers.

use std::any::Any;

use crate::error::Result;

/// Configuration passed to [`IndexProvider::begin_transaction`].
///
/// [`IndexProvider::begin_transaction`]: crate::provider::IndexProvider::begin_transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionConfig {
    group_name: Option<String>,
}

impl TransactionConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a group name (used by backends that group commit logs).
    pub fn with_group_name<S: Into<String>>(mut self, group_name: S) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    /// The configured group name, if any.
    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }
}

/// A transaction scope for index operations.
///
/// Handles are issued by [`IndexProvider::begin_transaction`] and passed back
/// into the provider's operations; providers downcast through
/// [`as_any`](IndexTransaction::as_any) to recover their own handle type and
/// must reject handles they did not issue.
///
/// [`IndexProvider::begin_transaction`]: crate::provider::IndexProvider::begin_transaction
pub trait IndexTransaction: Send {
    /// Make all buffered changes of this transaction durable and visible.
    fn commit(&mut self) -> Result<()>;

    /// Discard all buffered changes of this transaction.
    fn rollback(&mut self) -> Result<()>;

    /// Downcast support.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

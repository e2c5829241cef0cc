//! Per-scenario state shared between steps.
//!
//! Values are stored type-erased under a [`TestContextKey`]; readers name
//! the type they expect back.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, StepError};

/// Well-known slots in the scenario context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestContextKey {
    /// `ApiResponse<PostLoansResponse>` from loan creation.
    LoanCreateResponse,
    /// `ApiResponse<PostLoansLoanIdTransactionsResponse>` from a re-age call.
    LoanReagingResponse,
    /// `ApiResponse<PostLoansLoanIdTransactionsResponse>` from an undo re-age call.
    LoanReagingUndoResponse,
}

impl TestContextKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestContextKey::LoanCreateResponse => "LoanCreateResponse",
            TestContextKey::LoanReagingResponse => "LoanReagingResponse",
            TestContextKey::LoanReagingUndoResponse => "LoanReagingUndoResponse",
        }
    }
}

impl fmt::Display for TestContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Default)]
pub struct TestContext {
    values: HashMap<TestContextKey, Box<dyn Any + Send + Sync>>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, replacing whatever the key held.
    pub fn set<V: Any + Send + Sync>(&mut self, key: TestContextKey, value: V) {
        self.values.insert(key, Box::new(value));
    }

    /// Typed read; `None` when unset or stored with another type.
    pub fn get<V: Any>(&self, key: TestContextKey) -> Option<&V> {
        self.values.get(&key).and_then(|v| v.downcast_ref::<V>())
    }

    /// Typed read that fails the step when the value is missing.
    pub fn require<V: Any>(&self, key: TestContextKey) -> Result<&V> {
        self.get(key).ok_or(StepError::MissingContext(key))
    }

    pub fn remove<V: Any>(&mut self, key: TestContextKey) -> Option<V> {
        let value = self.values.remove(&key)?;
        value.downcast::<V>().ok().map(|boxed| *boxed)
    }

    pub fn contains(&self, key: TestContextKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl fmt::Debug for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.values.keys().map(TestContextKey::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("TestContext").field("keys", &keys).finish()
    }
}

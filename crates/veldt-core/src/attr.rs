//! Attribute conditions for filtered neighbor queries.
//!
//! The spatial core knows nothing about simulation variables. When a
//! query must be restricted to entities whose attribute satisfies a
//! comparison (possibly against a lagged value), the embedding runtime
//! implements [`AttrReader`] and passes it alongside a [`Condition`].
//! The core only ever asks "give me attribute value of entity E at lag
//! L" and compares.

use crate::id::EntityId;

/// Comparison operator of a [`Condition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    /// Attribute equals the condition value.
    Eq,
    /// Attribute differs from the condition value.
    Ne,
    /// Attribute is strictly greater than the condition value.
    Gt,
    /// Attribute is strictly less than the condition value.
    Lt,
}

/// A predicate over one entity attribute.
///
/// `lag` selects how many steps back the attribute is read; its exact
/// semantics belong to the [`AttrReader`] implementation (e.g. the
/// runtime's variable history). `lag = 0` reads the current value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Condition {
    /// Comparison operator.
    pub op: CmpOp,
    /// Value the attribute is compared against.
    pub value: f64,
    /// Time lag passed through to the attribute reader.
    pub lag: u32,
}

impl Condition {
    /// Condition requiring the attribute to equal `value`.
    pub fn eq(value: f64) -> Self {
        Self {
            op: CmpOp::Eq,
            value,
            lag: 0,
        }
    }

    /// Condition requiring the attribute to differ from `value`.
    pub fn ne(value: f64) -> Self {
        Self {
            op: CmpOp::Ne,
            value,
            lag: 0,
        }
    }

    /// Condition requiring the attribute to exceed `value`.
    pub fn gt(value: f64) -> Self {
        Self {
            op: CmpOp::Gt,
            value,
            lag: 0,
        }
    }

    /// Condition requiring the attribute to be below `value`.
    pub fn lt(value: f64) -> Self {
        Self {
            op: CmpOp::Lt,
            value,
            lag: 0,
        }
    }

    /// Read the attribute with the given lag instead of the current value.
    pub fn with_lag(mut self, lag: u32) -> Self {
        self.lag = lag;
        self
    }

    /// Evaluate the condition against `entity` through `reader`.
    ///
    /// An entity whose attribute is absent, or not comparable (NaN),
    /// fails the condition — it is filtered out, never an error.
    pub fn eval(&self, reader: &dyn AttrReader, entity: EntityId) -> bool {
        let Some(actual) = reader.read(entity, self.lag) else {
            return false;
        };
        match self.op {
            CmpOp::Eq => actual == self.value,
            CmpOp::Ne => {
                // NaN must fail every condition, including Ne.
                !actual.is_nan() && !self.value.is_nan() && actual != self.value
            }
            CmpOp::Gt => actual > self.value,
            CmpOp::Lt => actual < self.value,
        }
    }
}

/// Capability through which the embedding runtime exposes entity
/// attributes to the query engine.
///
/// Returning `None` means the entity has no such attribute (or no value
/// at the requested lag); the entity then simply fails the condition.
pub trait AttrReader {
    /// Read the attribute of `entity`, `lag` steps back in time.
    fn read(&self, entity: EntityId, lag: u32) -> Option<f64>;
}

//! First-match-wins conditional transforms.
//!
//! A [`ChainedCondition`] is the value-level form of an `if / else if / else` ladder:
//!
//! ```
//! use streamline::{ChainedCondition, Stream};
//!
//! let sign = ChainedCondition::new()
//!     .if_then(|x: &i32| *x < 0, |_| "negative")?
//!     .if_then(|x: &i32| *x == 0, |_| "zero")?
//!     .otherwise(|_| "positive")?;
//!
//! assert_eq!(sign.apply(-3)?, "negative");
//! assert_eq!(sign.to_string(), "ChainedCondition defines 'if' then 1 elif condition and 'else' condition");
//!
//! let labels = Stream::new(vec![-1, 0, 5]).conditional(sign)?.to_vec()?;
//! assert_eq!(labels, vec!["negative", "zero", "positive"]);
//! # Ok::<(), streamline::StreamError>(())
//! ```
//!
//! A chain must be closed before it is applied, either with [`otherwise`](ChainedCondition::otherwise)
//! or, when input and output types agree, with [`done`](ChainedCondition::done), which
//! passes unmatched elements through unchanged.

use crate::error::{Result, StreamError};
use crate::lifecycle::Lifecycle;
use std::fmt;

type Predicate<'c, X> = Box<dyn Fn(&X) -> bool + 'c>;
type Transform<'c, X, Y> = Box<dyn Fn(X) -> Y + 'c>;

pub struct ChainedCondition<'c, X, Y = X> {
    clauses: Vec<(Predicate<'c, X>, Transform<'c, X, Y>)>,
    fallback: Option<Transform<'c, X, Y>>,
    else_called: bool,
    name: Option<String>,
    lifecycle: Lifecycle,
}

impl<'c, X, Y> Default for ChainedCondition<'c, X, Y> {
    fn default() -> Self {
        Self {
            clauses: Vec::new(),
            fallback: None,
            else_called: false,
            name: None,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<'c, X, Y> ChainedCondition<'c, X, Y> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain whose `Display` is `name` instead of the generated description.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    /// `if pred(x) { then(x) } else { else_(x) }` as a closed chain.
    pub fn if_else(
        pred: impl Fn(&X) -> bool + 'c,
        then: impl Fn(X) -> Y + 'c,
        else_: impl Fn(X) -> Y + 'c,
    ) -> Self {
        let mut chain = Self::new();
        chain.clauses.push((Box::new(pred), Box::new(then)));
        chain.fallback = Some(Box::new(else_));
        chain.else_called = true;
        chain.lifecycle.mark_closed();
        chain
    }

    /// Append a clause. Fails with [`StreamError::ConditionClosed`] once the chain is closed.
    pub fn if_then(
        mut self,
        pred: impl Fn(&X) -> bool + 'c,
        then: impl Fn(X) -> Y + 'c,
    ) -> Result<Self> {
        self.lifecycle.ensure_open(|| StreamError::ConditionClosed)?;
        self.clauses.push((Box::new(pred), Box::new(then)));
        Ok(self)
    }

    /// Install the catch-all transform and close the chain.
    ///
    /// At least one `if_then` clause must precede it ([`StreamError::MissingIfClause`]).
    pub fn otherwise(mut self, else_: impl Fn(X) -> Y + 'c) -> Result<Self> {
        self.lifecycle.ensure_open(|| StreamError::ConditionClosed)?;
        if self.clauses.is_empty() {
            return Err(StreamError::MissingIfClause);
        }
        self.fallback = Some(Box::new(else_));
        self.else_called = true;
        self.lifecycle.close(|| StreamError::ConditionClosed)?;
        Ok(self)
    }

    pub fn is_closed(&self) -> bool {
        self.lifecycle.is_closed()
    }

    /// Transform `x` with the first clause whose predicate holds, else the fallback.
    pub fn apply(&self, x: X) -> Result<Y> {
        if !self.lifecycle.is_closed() {
            return Err(StreamError::ConditionNotClosed);
        }
        self.evaluate(x).ok_or(StreamError::ConditionNotClosed)
    }

    /// `None` only for an unclosed chain.
    pub(crate) fn evaluate(&self, x: X) -> Option<Y> {
        match self.clauses.iter().find(|(pred, _)| pred(&x)) {
            Some((_, then)) => Some(then(x)),
            None => self.fallback.as_ref().map(|f| f(x)),
        }
    }

    /// Generated description of the chain's shape.
    pub fn default_name(&self) -> String {
        let size = self.clauses.len() + usize::from(self.else_called);
        let plural = |n: usize| if n > 1 { "s" } else { "" };
        match size {
            0 => "ChainedCondition has not defined any condition".to_string(),
            1 => "ChainedCondition defines 'if' condition".to_string(),
            2 if self.else_called => "ChainedCondition defines 'if' and 'else' condition".to_string(),
            _ if self.else_called => format!(
                "ChainedCondition defines 'if' then {} elif condition{} and 'else' condition",
                size - 2,
                plural(size - 2)
            ),
            _ => format!(
                "ChainedCondition defines 'if' then {} elif condition{}",
                size - 1,
                plural(size - 1)
            ),
        }
    }
}

impl<'c, X: 'c> ChainedCondition<'c, X, X> {
    /// Close the chain; elements no clause matches pass through unchanged.
    pub fn done(mut self) -> Result<Self> {
        self.lifecycle.close(|| StreamError::ConditionClosed)?;
        self.fallback = Some(Box::new(|x| x));
        Ok(self)
    }
}

impl<X, Y> fmt::Display for ChainedCondition<'_, X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => f.write_str(&self.default_name()),
        }
    }
}

impl<X, Y> fmt::Debug for ChainedCondition<'_, X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedCondition")
            .field("clauses", &self.clauses.len())
            .field("else_called", &self.else_called)
            .field("name", &self.name)
            .field("closed", &self.lifecycle.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclosed_chain_cannot_be_applied() {
        let chain = ChainedCondition::new().if_then(|x: &i32| *x > 0, |x| x * 2).unwrap();
        assert!(matches!(chain.apply(1), Err(StreamError::ConditionNotClosed)));
        assert_eq!(chain.to_string(), "ChainedCondition defines 'if' condition");
    }

    #[test]
    fn descriptions_follow_shape() {
        let empty: ChainedCondition<i32> = ChainedCondition::new();
        assert_eq!(empty.default_name(), "ChainedCondition has not defined any condition");

        let two = ChainedCondition::if_else(|x: &i32| *x > 0, |x| x, |x| -x);
        assert_eq!(two.to_string(), "ChainedCondition defines 'if' and 'else' condition");

        let elifs = ChainedCondition::new()
            .if_then(|x: &i32| *x > 0, |x| x)
            .and_then(|c| c.if_then(|x| *x > 1, |x| x))
            .and_then(|c| c.if_then(|x| *x > 2, |x| x))
            .unwrap();
        assert_eq!(elifs.to_string(), "ChainedCondition defines 'if' then 2 elif conditions");

        let named: ChainedCondition<i32> = ChainedCondition::named("abs");
        assert_eq!(named.to_string(), "abs");
    }
}

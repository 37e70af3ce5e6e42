//! Carry-forward balance resolution.
//!
//! The opening balance of a period is the signed sum of every flow entry
//! classified strictly before the period starts. Two strategies compute it:
//! a full re-sum per request and a prefix-sum index built once per snapshot.
//! Both must agree exactly.

pub mod index;
pub mod resolver;

#[cfg(test)]
mod resolver_props;

pub use index::{BalancePoint, RunningBalanceIndex};
pub use resolver::{BalanceResolver, closing_balance, net_flow, opening_balance};

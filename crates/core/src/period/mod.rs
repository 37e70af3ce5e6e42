//! Statement period windows.
//!
//! A statement period is the contiguous date window anchored to a closing
//! day. Periods of one closing day tile the calendar with no gaps and no
//! overlaps.

pub mod error;
pub mod window;

#[cfg(test)]
mod window_props;

pub use error::PeriodError;
pub use window::{
    ClosingDay, MAX_PERIOD_SPAN, Period, PeriodKey, compute_period, days_in_month,
};

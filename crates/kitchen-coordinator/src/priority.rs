//! # Priority Calculator
//!
//! Derives the urgency tier of a unit of kitchen work from the age of its
//! order. Pure and idempotent: safe to recompute at any time from the
//! order's placement timestamp. Recomputation does not retroactively change
//! an already-stored priority unless a caller explicitly writes the new
//! value back (a manager override or a re-derivation).

use crate::model::Priority;
use chrono::{DateTime, Utc};

/// Orders this old (minutes) escalate to `High`.
pub const HIGH_AFTER_MINUTES: i64 = 30;
/// Orders this old (minutes) escalate to `Urgent`.
pub const URGENT_AFTER_MINUTES: i64 = 60;

/// Computes the urgency tier for an order placed at `placed_at`, evaluated
/// at `now`.
///
/// Elapsed `< 30` minutes is `Normal`, `[30, 60)` is `High`, `>= 60` is
/// `Urgent`. `Low` is never produced here; it exists only for manual
/// manager override. Negative elapsed time (clock skew) clamps to
/// `Normal`.
pub fn compute_priority(placed_at: DateTime<Utc>, now: DateTime<Utc>) -> Priority {
    let elapsed_minutes = (now - placed_at).num_minutes();
    if elapsed_minutes >= URGENT_AFTER_MINUTES {
        Priority::Urgent
    } else if elapsed_minutes >= HIGH_AFTER_MINUTES {
        Priority::High
    } else {
        Priority::Normal
    }
}

//! Session state and derived-metric computation.

pub mod clock;
pub mod metrics;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use metrics::{
    by_category, daily_series, percent_used, remaining, total_spent, BudgetStatus, CategoryTotal,
    DailyTotal, SpendSummary, DEFAULT_WINDOW_DAYS,
};
pub use session::Session;

//! Public-holiday resolution.
//!
//! The live source is the holidays-jp JSON API, fronted by a per-year cache
//! with a 24-hour expiry. Any source failure degrades silently to a
//! hard-coded table for known recent years (empty for others); holiday
//! lookup never surfaces an error to the validation pipeline.

pub mod calendar;
pub mod fallback;
pub mod source;

pub use calendar::{Clock, HolidayCalendar, SystemClock};
pub use source::{ApiHolidaySource, HolidaySource};

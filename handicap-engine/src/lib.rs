//! Handicap Engine
//!
//! Turns handicap indexes and raw strokes into equalized net scores:
//!
//! 1. **Course handicap**: index adjusted by the tee's slope and rating
//! 2. **Allocation**: relative handicap spread over holes by stroke index
//! 3. **Net scores**: gross strokes minus strokes received, per hole and range
//!
//! Every function here is pure; identical inputs give identical outputs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod allocation;
pub mod course;
pub mod error;
pub mod net;

pub use allocation::{allocate_strokes, relative_handicaps, StrokeAllocation};
pub use course::{course_handicap, open_scorecard, refresh_course_handicap, CourseRating};
pub use error::{Error, Result};
pub use net::{net_cards, refresh_totals, HoleNet, NetCard, NetTotals};

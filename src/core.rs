//! Rebate calculation: factor schedule, capacity taper, and the calculator combining them.

pub mod calculator;
pub mod schedule;
pub mod taper;

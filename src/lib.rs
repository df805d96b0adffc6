//! RetireWise retirement planner
//!
//! Projects a retirement corpus from level monthly contributions, splits it
//! into a lump sum and an annuity-funded pension, solves the reverse problem
//! of finding the contribution for a target pension, and annotates results
//! with rule-based insights. [`core`] and [`insight`] are pure; [`api`]
//! serves them over HTTP.

pub mod api;
pub mod config;
pub mod core;
pub mod insight;
pub mod report;

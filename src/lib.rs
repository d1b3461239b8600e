//! Scoring-consistency and rank-aggregation core for performance-assessment
//! workflows. Transport, persistence engines, and auth live outside this
//! crate and reach it through the store traits in
//! [`workflows::appraisal::repository`].

pub mod config;
pub mod telemetry;
pub mod workflows;

//! Reusable dashboard widgets

pub mod sparkline;

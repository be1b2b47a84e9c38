//! BDD step definitions for newswatch service

pub mod monitor_steps;

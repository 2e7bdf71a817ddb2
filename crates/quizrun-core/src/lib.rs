//! quizrun-core — Quiz session engine, countdown timer, and scoring.
//!
//! This crate defines the question model, the question-bank loader, session
//! configuration, and the engine that runs a timed session to a final score.

pub mod bank;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod session;
pub mod timer;

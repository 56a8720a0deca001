//! Session orchestration
//!
//! [`controller::ExhaustionController`] drives the generate → embed →
//! assign → estimate loop for one prompt; [`report::SessionReport`] is the
//! final output handed to whatever surfaces results.

pub mod controller;
pub mod report;

pub use controller::ExhaustionController;
pub use report::{Item, SessionReport, StopReason};

//! Application layer - use case handlers.
//!
//! Each handler wires one use case to the ports it needs. Handlers hold
//! `Arc<dyn Port>` references and carry no state of their own.

pub mod handlers;

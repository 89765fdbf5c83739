//! Bloc Checklist - Surgical Safety Checklist Backend
//!
//! This crate manages operating-theatre checklists (ordered steps with typed
//! questions), collects form submissions and serves a per-checklist aggregated
//! view that merges structure with submitted or current answers.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

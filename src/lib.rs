//! Academic timetable engine for the U-Engine ecosystem.
//!
//! Decides whether a proposed class meeting may be booked: it detects room
//! and lecturer double-booking and enforces the schedule status workflow.
//! Persistence, HTTP handling and notifications belong to the caller;
//! storage is reached only through the traits in [`repository`].
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Schedule`, `ScheduleRequest`,
//!   `ScheduleCandidate`, `ScheduleStatus`, `Room`, `TimeRange`
//! - **`conflict`**: Half-open interval overlap scan, duration and capacity guards
//! - **`workflow`**: Status transition table and locked-field enforcement
//! - **`normalize`**: Derived fields (duration, weekday, attendance rate)
//! - **`validation`**: Request entry point returning field-keyed errors
//! - **`service`**: Check-then-write under a commit guard
//! - **`repository`**: Storage traits and an in-memory store
//! - **`config`**: Scheduling policy
//!
//! # Flow
//!
//! ```text
//! ScheduleRequest ─▶ normalize ─▶ ConflictChecker ─▶ ScheduleStateMachine ─▶ ScheduleStore::save
//! ```
//!
//! This is not a solver: it never searches for a free slot or resolves a
//! conflict, it only reports one.

pub mod config;
pub mod conflict;
pub mod error;
pub mod models;
pub mod normalize;
pub mod repository;
pub mod service;
pub mod telemetry;
pub mod validation;
pub mod workflow;

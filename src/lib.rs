//! Live CPU, memory and per-process sampling with bounded history.
//!
//! The sampling core lives in [`system`]: a [`system::SamplingLoop`] queries a
//! [`system::MetricsProvider`] once per cycle and publishes immutable
//! [`system::SystemSnapshot`]s through a latest-value channel. The terminal UI
//! in [`app`] and [`ui`] is one consumer of that channel.

pub mod action;
pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod logging;
pub mod system;
pub mod ui;

pub use error::{MonitorError, Result};

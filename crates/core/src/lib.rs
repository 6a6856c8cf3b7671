//! Normalization and derived metrics for CPU scheduling simulation results.
//!
//! Producers emit timelines in several loosely-typed JSON shapes. The
//! [`parsers`] turn them into canonical [`model::Interval`] lists,
//! [`metrics`] derives quanta, busy series and overlays from those, and
//! [`layout`] plus [`views`] position everything for a dual Gantt chart.
//! [`analysis`] ties the pieces together per result document.

pub mod analysis;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod parsers;
pub mod views;

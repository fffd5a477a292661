//! Redline annotation engine for the storm-water map viewer.
//!
//! This crate owns the full lifecycle of user-authored "redline" annotations:
//! translating map clicks into point/line draw gestures, staging a drafted
//! feature while its attribute form is open, rendering optimistically before
//! the feature service has confirmed persistence, and reconciling the local
//! layers against the authoritative server state. The host (browser shell,
//! desktop map widget, test harness) is responsible only for wiring input
//! events to the engine and executing the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and host-facing [`engine::Action`]s |
//! | [`feature`] | Redline feature model and typed attribute access |
//! | [`layer`] | Per-kind in-memory feature collection |
//! | [`draw`] | Draw-gesture state machine (point click, line vertex chain) |
//! | [`form`] | Attribute editor protocol types |
//! | [`session`] | Direct-manipulation edit session (`Idle` / `Editing`) |
//! | [`geom`] | Coordinates and point/line geometries |
//! | [`wire`] | GeoJSON-style wire representation |
//! | [`store`] | Remote feature store trait and HTTP client |
//! | [`service`] | Async glue between engine actions and the store |
//! | [`config`] | Engine and store configuration |

pub mod config;
pub mod draw;
pub mod engine;
pub mod feature;
pub mod form;
pub mod geom;
pub mod layer;
pub mod service;
pub mod session;
pub mod store;
pub mod wire;

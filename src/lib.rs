//! Triage statistics dashboards.
//!
//! This crate turns in-memory issue-triage data into a static HTML site:
//! per-person pages carrying multi-series severity trend charts and nested
//! team dropdown menus, plus an index page. Chart rendering itself is
//! delegated to Chart.js through generated configuration, so everything up
//! to that point is plain data assembly, testable offline.
//!
//! The pipeline:
//! - [`stats::collect`] counts dated severity events into monthly series
//!   per triage owner and component,
//! - [`stats::team_backlog`] rolls those series up the management chain,
//! - [`site::SiteGenerator`] writes the dashboard pages.

pub mod chart;
pub mod config;
pub mod error;
pub mod menu;
pub mod page;
pub mod severity;
pub mod site;
pub mod stats;
pub mod team;
pub mod timeline;

pub use config::ReportConfig;
pub use error::{Error, Result};
pub use page::Page;
pub use severity::{Severity, SeverityBand};
pub use site::SiteGenerator;
pub use stats::{Backlog, BugEvent, EventKind, TriageStats};
pub use team::{TeamNode, TeamTree};

//! Portal Visitors
//!
//! In-memory tracking of anonymous visitor sessions on the public portal
//! pages. Sessions expire after a period of inactivity and the tracker holds
//! at most a configured number of them, evicting the least recently seen
//! session when full.
//!
//! # Example
//!
//! ```rust,ignore
//! use portal_visitors::{TrackerConfig, VisitorTracker};
//!
//! let tracker = VisitorTracker::new(TrackerConfig::from_env()?)?;
//! let outcome = tracker.record_visit(&session_cookie, "/home").await?;
//! ```

pub mod config;
pub mod error;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::{TrackerError, TrackerResult};
pub use tracker::{TrackerStats, VisitOutcome, VisitorSession, VisitorTracker, MAX_SESSION_ID_LEN};

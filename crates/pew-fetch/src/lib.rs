//! Streamed HTTP downloads with progress tracking.
//!
//! The transfer writes each chunk as it arrives and can be cancelled by a
//! user interrupt, in which case the partially written file is left where
//! it is.

pub use client::{ClientSetting, Download};
pub use error::{ClientSettingError, DownloadError};
pub use tracker::{ProgressTracker, ProgressTrackerBuilder, Tracker, TrackerBuilder};

mod client;
mod error;
mod runtime;
mod tracker;

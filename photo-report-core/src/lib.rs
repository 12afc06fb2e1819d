//! # photo-report
//!
//! Client-side assembly and submission workflow for server-rendered photo
//! reports: collect a fixed set of report fields, ingest up to 50 captioned
//! photos, validate completeness, POST one JSON payload to the render
//! server and hand back the returned PDF for saving.
//!
//! ## Features
//!
//! - **Report Session**: explicit in-memory session object holding an
//!   ordered photo collection with monotonic ids, caption editing, removal
//!   and reset
//! - **Ingestion**: batch file intake with capacity, type and size checks,
//!   sequential async decode into data-URL entries
//! - **Validation**: required fields checked in declared order, first
//!   offender reported, photo minimum enforced
//! - **Submission**: single best-effort POST with guaranteed busy-state
//!   cleanup, server error messages surfaced verbatim
//! - **Notifications**: one uniform success/error/info sink, pluggable per
//!   presentation layer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use photo_report::{ReportClient, ReportSession, Result};
//!
//! # async fn run() -> Result<()> {
//! let mut session = ReportSession::new();
//!
//! let fields = session.fields_mut();
//! fields.title = "Depot inspection".to_string();
//! fields.location = "North depot".to_string();
//! fields.system_reference = "SR-114".to_string();
//! fields.issued_by = "Maintenance".to_string();
//!
//! let wall = std::fs::read("wall.png")?;
//! let id = session.add_photo("wall.png", "image/png", &wall)?;
//! session.edit_caption(id, "crack along the north wall");
//!
//! let client = ReportClient::new("http://localhost:5000");
//! let report = session.submit(&client).await?;
//! std::fs::write(&report.file_name, &report.content)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`session`] - the report session and its command methods
//! - [`photo`] - photo entries, ids and ingestion primitives
//! - [`fields`] - report fields and required-field validation
//! - [`payload`] - the submission wire format
//! - [`client`] - HTTP client for the render server
//! - [`notify`] - the notification sink abstraction
//! - [`error`] - error type and crate-wide `Result`

pub mod client;
pub mod error;
pub mod fields;
pub mod notify;
pub mod payload;
pub mod photo;
pub mod session;

pub use client::{download_file_name, GeneratedReport, HealthStatus, ReportClient};
pub use error::{ReportError, Result};
pub use fields::ReportFields;
pub use notify::{ConsoleNotifier, Notifier, NullNotifier, RecordingNotifier, Severity};
pub use payload::{PhotoPayload, ReportPayload, EMPTY_CAPTION_PLACEHOLDER};
pub use photo::{PhotoEntry, PhotoId, MAX_PHOTOS, MAX_PHOTO_BYTES};
pub use session::{IngestSkip, IngestSummary, ReportSession};

//! The report session
//!
//! [`ReportSession`] is the complete in-memory state for one report being
//! assembled: the field values plus the ordered photo collection. All
//! mutations go through its methods and every user-facing outcome is
//! reported through the injected [`Notifier`], so the session carries no
//! knowledge of any particular presentation layer.

use crate::client::{GeneratedReport, ReportClient};
use crate::error::{ReportError, Result};
use crate::fields::ReportFields;
use crate::notify::{Notifier, NullNotifier, Severity};
use crate::payload::ReportPayload;
use crate::photo::{
    encode_data_url, image_mime_for, PhotoEntry, PhotoId, MAX_PHOTOS, MAX_PHOTO_BYTES,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const FIRST_PHOTO_ID: u32 = 1;

/// Why one candidate file was left out of the session during ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestSkip {
    /// Declared type is not an image type. Skipped without a notification.
    UnsupportedType { name: String },
    /// File exceeds the per-photo size limit. Reported per file.
    TooLarge { name: String },
    /// The file could not be read or decoded. Reported per file.
    DecodeFailed { name: String, reason: String },
}

/// Outcome of one ingestion batch.
///
/// `requested` is the batch size as handed in; `added` holds the ids of the
/// entries that actually made it into the session, in input order.
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    pub requested: usize,
    pub added: Vec<PhotoId>,
    pub skipped: Vec<IngestSkip>,
}

impl IngestSummary {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

/// In-memory state for one report being assembled.
pub struct ReportSession {
    fields: ReportFields,
    photos: Vec<PhotoEntry>,
    next_id: u32,
    submitting: bool,
    notifier: Arc<dyn Notifier>,
}

impl Default for ReportSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSession {
    /// A fresh session with no photos, default field values (date set to
    /// the current local date) and a silent notification sink.
    pub fn new() -> Self {
        Self::with_notifier(Arc::new(NullNotifier))
    }

    /// A fresh session reporting outcomes through the given sink.
    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            fields: ReportFields::default(),
            photos: Vec::new(),
            next_id: FIRST_PHOTO_ID,
            submitting: false,
            notifier,
        }
    }

    pub fn fields(&self) -> &ReportFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ReportFields {
        &mut self.fields
    }

    /// Photo entries in insertion order, which is also display and PDF page
    /// order.
    pub fn photos(&self) -> &[PhotoEntry] {
        &self.photos
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    pub fn photo(&self, id: PhotoId) -> Option<&PhotoEntry> {
        self.photos.iter().find(|entry| entry.id() == id)
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn notify(&self, severity: Severity, message: &str) {
        self.notifier.notify(severity, message);
    }

    /// Append one already-read photo to the session.
    ///
    /// Enforces the photo ceiling and the per-photo size limit, notifying
    /// on either violation. `mime` is the declared image type; type
    /// filtering happens before this point.
    pub fn add_photo(&mut self, name: &str, mime: &str, bytes: &[u8]) -> Result<PhotoId> {
        if self.photos.len() >= MAX_PHOTOS {
            let err = ReportError::Capacity(MAX_PHOTOS);
            self.notify(Severity::Error, &err.to_string());
            return Err(err);
        }
        if bytes.len() as u64 > MAX_PHOTO_BYTES {
            let err = ReportError::PhotoTooLarge(name.to_string());
            self.notify(Severity::Error, &err.to_string());
            return Err(err);
        }
        Ok(self.append_entry(name.to_string(), mime, bytes))
    }

    fn append_entry(&mut self, name: String, mime: &str, bytes: &[u8]) -> PhotoId {
        let id = PhotoId::new(self.next_id);
        self.next_id += 1;
        self.photos
            .push(PhotoEntry::new(id, name, encode_data_url(mime, bytes)));
        id
    }

    /// Ingest a batch of candidate files.
    ///
    /// The whole batch is rejected when it would push the session past the
    /// photo ceiling; otherwise files are processed one at a time, in
    /// order, each decode awaited before the next starts. Non-image types
    /// are skipped silently; oversize and unreadable files are skipped with
    /// a per-file error notification. A summary notification reports how
    /// many photos were actually added.
    pub async fn ingest_paths(&mut self, paths: &[PathBuf]) -> Result<IngestSummary> {
        if self.photos.len() + paths.len() > MAX_PHOTOS {
            let err = ReportError::Capacity(MAX_PHOTOS);
            self.notify(Severity::Error, &err.to_string());
            return Err(err);
        }

        self.notify(
            Severity::Info,
            &format!("Processing {} photo(s)...", paths.len()),
        );

        let mut summary = IngestSummary {
            requested: paths.len(),
            ..Default::default()
        };

        for path in paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let Some(mime) = image_mime_for(path) else {
                summary.skipped.push(IngestSkip::UnsupportedType { name });
                continue;
            };

            let size = match tokio::fs::metadata(path).await {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    self.skip_unreadable(&mut summary, name, err);
                    continue;
                }
            };
            if size > MAX_PHOTO_BYTES {
                let err = ReportError::PhotoTooLarge(name.clone());
                self.notify(Severity::Error, &err.to_string());
                summary.skipped.push(IngestSkip::TooLarge { name });
                continue;
            }

            match tokio::fs::read(path).await {
                Ok(bytes) => {
                    let id = self.append_entry(name, mime, &bytes);
                    summary.added.push(id);
                }
                Err(err) => self.skip_unreadable(&mut summary, name, err),
            }
        }

        self.notify(
            Severity::Success,
            &format!("{} photo(s) added", summary.added_count()),
        );
        Ok(summary)
    }

    fn skip_unreadable(&self, summary: &mut IngestSummary, name: String, err: std::io::Error) {
        warn!(photo = %name, error = %err, "failed to ingest photo");
        self.notify(Severity::Error, &format!("Failed to process {name}"));
        summary.skipped.push(IngestSkip::DecodeFailed {
            name,
            reason: err.to_string(),
        });
    }

    /// Overwrite the caption of the photo with the given id, verbatim.
    ///
    /// Returns `false` without touching anything when the id is not
    /// present (the entry was removed).
    pub fn edit_caption(&mut self, id: PhotoId, caption: &str) -> bool {
        match self.photos.iter_mut().find(|entry| entry.id() == id) {
            Some(entry) => {
                entry.set_caption(caption);
                true
            }
            None => false,
        }
    }

    /// Remove the photo with the given id, preserving the order of the
    /// rest. Removing an absent id is a no-op. The confirmation
    /// notification is emitted either way, matching the interface this
    /// replaces.
    pub fn remove_photo(&mut self, id: PhotoId) -> bool {
        let before = self.photos.len();
        self.photos.retain(|entry| entry.id() != id);
        self.notify(Severity::Info, "Photo removed");
        self.photos.len() < before
    }

    /// Check the session is complete enough to submit: every required
    /// field non-empty after trimming (first offender reported), then at
    /// least one photo.
    pub fn validate(&self) -> Result<()> {
        if let Err(err) = self.fields.validate() {
            self.notify(Severity::Error, &err.to_string());
            return Err(err);
        }
        if self.photos.is_empty() {
            let err = ReportError::NoPhotos;
            self.notify(Severity::Error, &err.to_string());
            return Err(err);
        }
        Ok(())
    }

    /// The submission payload for the current state.
    pub fn payload(&self) -> ReportPayload {
        ReportPayload::assemble(&self.fields, &self.photos)
    }

    /// Validate, then submit the report and return the rendered PDF.
    ///
    /// The busy flag is raised for the duration of the call and cleared on
    /// every exit path. A failed submission surfaces the server's message
    /// verbatim when one is present; there is no retry.
    pub async fn submit(&mut self, client: &ReportClient) -> Result<GeneratedReport> {
        self.validate()?;
        let payload = self.payload();
        let notifier = Arc::clone(&self.notifier);

        let busy = BusyGuard::engage(&mut self.submitting);
        let outcome = client.generate(&payload).await;
        drop(busy);

        match outcome {
            Ok(report) => {
                notifier.notify(Severity::Success, "Report generated successfully");
                Ok(report)
            }
            Err(err) => {
                let message = match &err {
                    ReportError::Server(message) => message.clone(),
                    other => other.to_string(),
                };
                notifier.notify(
                    Severity::Error,
                    &format!("Failed to generate report: {message}"),
                );
                Err(err)
            }
        }
    }

    /// Whether resetting would lose anything worth confirming: any photo,
    /// or a non-empty title.
    pub fn has_pending_work(&self) -> bool {
        !self.photos.is_empty() || !self.fields.title.is_empty()
    }

    /// Return the session to its initial state: no photos, id counter back
    /// to its starting value, all fields cleared and the date
    /// re-initialized to the current local date.
    ///
    /// Callers own the confirmation prompt; check [`has_pending_work`]
    /// first when driving an interactive surface.
    ///
    /// [`has_pending_work`]: ReportSession::has_pending_work
    pub fn reset(&mut self) {
        self.photos.clear();
        self.next_id = FIRST_PHOTO_ID;
        self.fields = ReportFields::default();
        self.notify(Severity::Info, "Report reset");
    }
}

/// Raises the busy flag and guarantees it is lowered again when dropped,
/// whichever way the submission path exits.
struct BusyGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

//! Document panel.
//!
//! Dropped files are staged into the draft immediately with status
//! `uploading` and their bytes attached; the actual upload happens when the
//! builder saves. A batch moves to `ready` when its completion signal
//! arrives (currently a fixed local delay driven by the console).

use crate::draft::{Document, DraftChange, DroppedFile, PendingFile};
use crate::enums::DocumentStatus;
use crate::error::DocumentError;
use crate::new_client_id;
use chrono::Utc;
use std::path::Path;
use std::time::Duration;

/// Delay between a drop and its batch being marked ready.
pub const DOCUMENT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_MARKDOWN: &str = "text/markdown";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MIME_UNKNOWN: &str = "application/octet-stream";

pub const ACCEPTED_MIME_TYPES: &[&str] = &[MIME_PDF, MIME_TEXT, MIME_MARKDOWN, MIME_DOCX];

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Infer a MIME type from a file name's extension.
pub fn mime_for_file_name(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => MIME_PDF,
        Some("txt") => MIME_TEXT,
        Some("md") => MIME_MARKDOWN,
        Some("docx") => MIME_DOCX,
        _ => MIME_UNKNOWN,
    }
}

pub fn is_accepted_mime(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}

/// Render a byte count with base-1024 units and at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    while unit + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(unit as u32 + 1) {
        unit += 1;
    }
    let scaled = bytes as f64 / 1024f64.powi(unit as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

impl DroppedFile {
    /// Read a file from disk for dropping into the panel.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DocumentError::StagingFailed {
                reason: format!("{} has no file name", path.display()),
            })?
            .to_string();
        let bytes = std::fs::read(path).map_err(|e| DocumentError::StagingFailed {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Ok(Self {
            mime: mime_for_file_name(&name).to_string(),
            name,
            bytes,
        })
    }
}

/// Files accepted by one drop, plus the list to hand back to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedBatch {
    pub ids: Vec<String>,
    pub change: DraftChange,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentPanel;

impl DocumentPanel {
    /// Stage dropped files. Files outside the allow-list are skipped
    /// silently; returns `None` when nothing was accepted.
    pub fn drop_files(&self, current: &[Document], files: Vec<DroppedFile>) -> Option<DroppedBatch> {
        let now = Utc::now();
        let staged: Vec<Document> = files
            .into_iter()
            .filter(|file| is_accepted_mime(&file.mime))
            .map(|file| Document {
                id: new_client_id(),
                name: file.name,
                mime: file.mime,
                size: file.bytes.len() as u64,
                status: DocumentStatus::Uploading,
                uploaded_at: now,
                file: Some(PendingFile { bytes: file.bytes }),
            })
            .collect();
        if staged.is_empty() {
            return None;
        }

        let ids = staged.iter().map(|d| d.id.clone()).collect();
        let mut next = current.to_vec();
        next.extend(staged);
        Some(DroppedBatch {
            ids,
            change: DraftChange::Documents(next),
        })
    }

    /// Completion signal for a batch: its members still pending become
    /// ready. Members removed in the meantime are not brought back.
    pub fn finish_processing(&self, current: &[Document], batch: &[String]) -> DraftChange {
        let next = current
            .iter()
            .cloned()
            .map(|mut doc| {
                if doc.status.is_pending() && batch.contains(&doc.id) {
                    doc.status = DocumentStatus::Ready;
                }
                doc
            })
            .collect();
        DraftChange::Documents(next)
    }

    pub fn remove(&self, current: &[Document], id: &str) -> DraftChange {
        DraftChange::Documents(current.iter().filter(|d| d.id != id).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn file(name: &str, len: usize) -> DroppedFile {
        DroppedFile {
            name: name.to_string(),
            mime: mime_for_file_name(name).to_string(),
            bytes: vec![b'x'; len],
        }
    }

    fn documents(change: DraftChange) -> Vec<Document> {
        match change {
            DraftChange::Documents(docs) => docs,
            other => panic!("expected documents change, got {:?}", other),
        }
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn mime_inference_is_case_insensitive() {
        assert_eq!(mime_for_file_name("Guide.PDF"), MIME_PDF);
        assert_eq!(mime_for_file_name("notes.md"), MIME_MARKDOWN);
        assert_eq!(mime_for_file_name("brief.docx"), MIME_DOCX);
        assert_eq!(mime_for_file_name("image.png"), MIME_UNKNOWN);
        assert_eq!(mime_for_file_name("README"), MIME_UNKNOWN);
    }

    #[test]
    fn drop_stages_accepted_files_as_uploading() {
        let panel = DocumentPanel;
        let batch = panel
            .drop_files(&[], vec![file("faq.txt", 10), file("logo.png", 4)])
            .unwrap();
        assert_eq!(batch.ids.len(), 1);
        let docs = documents(batch.change);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "faq.txt");
        assert_eq!(docs[0].size, 10);
        assert_eq!(docs[0].status, DocumentStatus::Uploading);
        assert!(docs[0].has_pending_upload());
    }

    #[test]
    fn drop_of_only_rejected_files_changes_nothing() {
        assert!(DocumentPanel.drop_files(&[], vec![file("a.exe", 1)]).is_none());
    }

    #[test]
    fn finish_processing_only_touches_the_batch() {
        let panel = DocumentPanel;
        let first = panel.drop_files(&[], vec![file("a.md", 1)]).unwrap();
        let after_first = documents(first.change);
        let second = panel
            .drop_files(&after_first, vec![file("b.md", 1)])
            .unwrap();
        let after_second = documents(second.change);

        let done = documents(panel.finish_processing(&after_second, &first.ids));
        assert_eq!(done[0].status, DocumentStatus::Ready);
        assert_eq!(done[1].status, DocumentStatus::Uploading);
    }

    #[test]
    fn removed_document_stays_removed_after_processing() {
        let panel = DocumentPanel;
        let batch = panel
            .drop_files(&[], vec![file("a.md", 1), file("b.md", 2)])
            .unwrap();
        let docs = documents(batch.change);
        let remaining = documents(panel.remove(&docs, &batch.ids[0]));
        let done = documents(panel.finish_processing(&remaining, &batch.ids));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, batch.ids[1]);
        assert_eq!(done[0].status, DocumentStatus::Ready);
    }

    #[test]
    fn from_path_reports_missing_files() {
        let err = DroppedFile::from_path(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, DocumentError::StagingFailed { .. }));
    }

    fn arb_file() -> impl Strategy<Value = DroppedFile> {
        (
            prop::sample::select(vec!["pdf", "txt", "md", "docx", "png", "zip", "exe"]),
            0usize..64,
        )
            .prop_map(|(ext, len)| file(&format!("doc.{}", ext), len))
    }

    proptest! {
        #[test]
        fn list_length_matches_accepted_files(drops in prop::collection::vec(prop::collection::vec(arb_file(), 0..5), 0..6)) {
            let panel = DocumentPanel;
            let mut current: Vec<Document> = Vec::new();
            let mut expected = 0usize;
            for drop in drops {
                expected += drop.iter().filter(|f| is_accepted_mime(&f.mime)).count();
                if let Some(batch) = panel.drop_files(&current, drop) {
                    current = documents(batch.change);
                }
            }
            prop_assert_eq!(current.len(), expected);
            prop_assert!(current.iter().all(|d| is_accepted_mime(&d.mime)));
        }

        #[test]
        fn staged_ids_are_unique(count in 1usize..20) {
            let files = (0..count).map(|i| file(&format!("f{}.txt", i), i)).collect();
            let batch = DocumentPanel.drop_files(&[], files).unwrap();
            let mut ids = batch.ids.clone();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), count);
        }
    }
}

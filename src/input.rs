//! File intake from drag-and-drop and the file picker
//!
//! Both channels funnel into [`DropInputAdapter::accept`], which keeps the
//! first offered file, checks that it is an Excel workbook, and emits a single
//! [`FileChosen`] event. Anything else is an [`InputRejected`] and never
//! reaches the selection.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::RadarResult;
use crate::types::ChosenFile;

/// OOXML workbook (.xlsx)
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Legacy binary workbook (.xls)
pub const XLS_MIME: &str = "application/vnd.ms-excel";

/// Accepted (MIME, extension) pairs
const ACCEPTED_TYPES: &[(&str, &str)] = &[(XLSX_MIME, "xlsx"), (XLS_MIME, "xls")];

/// Where a candidate file came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChannel {
    DragDrop,
    Picker,
}

/// A file offered by one of the input channels, not yet accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, mime: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.map(str::to_string),
            bytes,
        }
    }

    /// Read a file from disk, declaring its type from the extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> RadarResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_for_name(&name).map(str::to_string);
        Ok(Self { name, mime, bytes })
    }
}

/// Emitted once per accepted offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChosen {
    pub channel: InputChannel,
    pub file: ChosenFile,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejected {
    #[error("no file was offered")]
    NoFile,

    #[error("'{name}' is not an Excel workbook (.xlsx or .xls)")]
    UnsupportedType { name: String, mime: Option<String> },
}

/// Gatekeeper between the input channels and the selection
#[derive(Debug, Default)]
pub struct DropInputAdapter {
    drag_active: bool,
}

impl DropInputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag carrying files entered the drop zone
    pub fn drag_enter(&mut self) {
        self.drag_active = true;
    }

    /// The drag left the drop zone without dropping
    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Whether to show the "drop the file here" prompt
    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Accept an offer from either channel.
    ///
    /// Only the first candidate is considered; extra candidates are dropped
    /// without notice.
    pub fn accept(
        &mut self,
        channel: InputChannel,
        candidates: Vec<CandidateFile>,
    ) -> Result<FileChosen, InputRejected> {
        if channel == InputChannel::DragDrop {
            self.drag_active = false;
        }

        let offered = candidates.len();
        let candidate = candidates
            .into_iter()
            .next()
            .ok_or(InputRejected::NoFile)?;
        if offered > 1 {
            debug!(offered, kept = %candidate.name, "discarding extra files");
        }

        let Some(mime) = accepted_type(&candidate.name, candidate.mime.as_deref()) else {
            warn!(name = %candidate.name, mime = ?candidate.mime, "rejected file type");
            return Err(InputRejected::UnsupportedType {
                name: candidate.name,
                mime: candidate.mime,
            });
        };

        Ok(FileChosen {
            channel,
            file: ChosenFile::new(candidate.name, mime, candidate.bytes),
        })
    }
}

/// Accepted when either the declared type or the extension matches
pub fn is_accepted(name: &str, mime: Option<&str>) -> bool {
    accepted_type(name, mime).is_some()
}

/// Workbook MIME type for an accepted file; the declared type wins over the
/// extension
pub fn accepted_type(name: &str, mime: Option<&str>) -> Option<&'static str> {
    mime.and_then(|declared| {
        ACCEPTED_TYPES
            .iter()
            .find(|(accepted_mime, _)| declared.eq_ignore_ascii_case(accepted_mime))
            .map(|(accepted_mime, _)| *accepted_mime)
    })
    .or_else(|| mime_for_name(name))
}

/// Declared type for a spreadsheet file name, if it is one
pub fn mime_for_name(name: &str) -> Option<&'static str> {
    let ext = extension(name)?;
    ACCEPTED_TYPES
        .iter()
        .find(|(_, accepted_ext)| ext.eq_ignore_ascii_case(accepted_ext))
        .map(|(mime, _)| *mime)
}

fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

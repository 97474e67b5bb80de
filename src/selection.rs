//! Selection state - the one chosen file and its decoded grid
//!
//! Every `select` hands out a [`DecodeTicket`] tagged with a fresh
//! [`SelectionId`]. A decode result is only applied while its id is still the
//! current selection, so a slow decode for an older file can never overwrite
//! the preview of a newer one.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::decoder::DecodeError;
use crate::types::{ChosenFile, DecodedGrid};

/// Monotonic tag issued per `select`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionId(u64);

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observable lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Decoding,
    Ready,
}

/// Work order for one decode, bound to the selection that requested it
#[derive(Debug, Clone)]
pub struct DecodeTicket {
    pub id: SelectionId,
    pub file: Arc<ChosenFile>,
}

#[derive(Debug)]
enum Preview {
    Decoding,
    Ready(DecodedGrid),
    Failed(DecodeError),
}

#[derive(Debug)]
struct Selected {
    id: SelectionId,
    file: Arc<ChosenFile>,
    preview: Preview,
}

#[derive(Debug, Default)]
pub struct SelectionState {
    last_id: u64,
    current: Option<Selected>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was selected and start over in the decoding phase
    pub fn select(&mut self, file: ChosenFile) -> DecodeTicket {
        self.last_id += 1;
        let id = SelectionId(self.last_id);
        let file = Arc::new(file);
        self.current = Some(Selected {
            id,
            file: Arc::clone(&file),
            preview: Preview::Decoding,
        });
        DecodeTicket { id, file }
    }

    /// Store a decode result if it belongs to the current selection.
    ///
    /// Returns `false` when the result is stale and was discarded.
    pub fn apply_decode(
        &mut self,
        id: SelectionId,
        result: Result<DecodedGrid, DecodeError>,
    ) -> bool {
        let Some(selected) = self.current.as_mut() else {
            debug!(%id, "discarding decode result, nothing selected");
            return false;
        };
        if selected.id != id || !matches!(selected.preview, Preview::Decoding) {
            debug!(%id, current = %selected.id, "discarding stale decode result");
            return false;
        }

        selected.preview = match result {
            Ok(grid) => Preview::Ready(grid),
            Err(e) => Preview::Failed(e),
        };
        true
    }

    /// Drop the file and its grid; safe to call in any state
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn phase(&self) -> Phase {
        match &self.current {
            None => Phase::Empty,
            Some(Selected {
                preview: Preview::Decoding,
                ..
            }) => Phase::Decoding,
            Some(_) => Phase::Ready,
        }
    }

    pub fn file(&self) -> Option<&Arc<ChosenFile>> {
        self.current.as_ref().map(|s| &s.file)
    }

    pub fn current_id(&self) -> Option<SelectionId> {
        self.current.as_ref().map(|s| s.id)
    }

    /// Decoded grid; empty while decoding, after a failed decode, or with no file
    pub fn grid(&self) -> &DecodedGrid {
        static EMPTY: DecodedGrid = DecodedGrid::EMPTY;
        match &self.current {
            Some(Selected {
                preview: Preview::Ready(grid),
                ..
            }) => grid,
            _ => &EMPTY,
        }
    }

    pub fn decode_error(&self) -> Option<&DecodeError> {
        match &self.current {
            Some(Selected {
                preview: Preview::Failed(e),
                ..
            }) => Some(e),
            _ => None,
        }
    }
}

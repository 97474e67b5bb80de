//! Import session - the upload page's behaviour without the page
//!
//! Owns the selection and drives it from a single task: decodes run on the
//! blocking pool and report back over a channel, and only this session applies
//! their results. Must be used inside a Tokio runtime.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::decoder::{Decode, DecodeError, SpreadsheetDecoder};
use crate::error::{RadarError, RadarResult};
use crate::input::{CandidateFile, DropInputAdapter, InputChannel, InputRejected};
use crate::preview::{self, PreviewTable};
use crate::selection::{DecodeTicket, Phase, SelectionId, SelectionState};
use crate::transfer::{SessionCredentials, TransferClient, TransferOutcome};
use crate::types::{ChosenFile, DecodedGrid};

/// Shown while nothing is selected
pub const NO_FILE_NOTICE: &str = "No file uploaded yet";

#[derive(Debug)]
struct DecodeCompletion {
    id: SelectionId,
    result: Result<DecodedGrid, DecodeError>,
}

pub struct ImportSession {
    adapter: DropInputAdapter,
    state: SelectionState,
    decoder: Arc<dyn Decode>,
    client: TransferClient,
    credentials: Option<SessionCredentials>,
    completions_tx: mpsc::UnboundedSender<DecodeCompletion>,
    completions_rx: mpsc::UnboundedReceiver<DecodeCompletion>,
}

impl ImportSession {
    pub fn new(client: TransferClient) -> Self {
        Self::with_decoder(client, Arc::new(SpreadsheetDecoder::new()))
    }

    pub fn with_decoder(client: TransferClient, decoder: Arc<dyn Decode>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            adapter: DropInputAdapter::new(),
            state: SelectionState::new(),
            decoder,
            client,
            credentials: None,
            completions_tx,
            completions_rx,
        }
    }

    /// Credentials forwarded with every upload from this session
    pub fn with_credentials(mut self, credentials: SessionCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Drop-zone hover state, driven by the caller's drag events
    pub fn input(&mut self) -> &mut DropInputAdapter {
        &mut self.adapter
    }

    /// Files offered by a drop or the picker
    pub fn offer(
        &mut self,
        channel: InputChannel,
        candidates: Vec<CandidateFile>,
    ) -> Result<SelectionId, InputRejected> {
        let chosen = self.adapter.accept(channel, candidates)?;
        Ok(self.select(chosen.file))
    }

    /// Replace the selection and start decoding it
    pub fn select(&mut self, file: ChosenFile) -> SelectionId {
        info!(name = file.name(), bytes = file.len(), "file selected");
        let ticket = self.state.select(file);
        let id = ticket.id;
        self.spawn_decode(ticket);
        id
    }

    fn spawn_decode(&self, ticket: DecodeTicket) {
        let decoder = Arc::clone(&self.decoder);
        let tx = self.completions_tx.clone();
        let DecodeTicket { id, file } = ticket;

        tokio::spawn(async move {
            let result =
                match tokio::task::spawn_blocking(move || decoder.decode(file.bytes())).await {
                    Ok(result) => result,
                    Err(e) => Err(DecodeError::Aborted(e.to_string())),
                };
            // Receiver only goes away with the session
            let _ = tx.send(DecodeCompletion { id, result });
        });
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Apply decode results that have already arrived, without waiting
    pub fn pump(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply(completion);
        }
    }

    /// Wait until the current selection has finished decoding
    pub async fn settle(&mut self) {
        while self.state.phase() == Phase::Decoding {
            match self.completions_rx.recv().await {
                Some(completion) => self.apply(completion),
                None => break,
            }
        }
    }

    fn apply(&mut self, completion: DecodeCompletion) {
        let DecodeCompletion { id, result } = completion;
        if let Err(e) = &result {
            warn!(%id, error = %e, "could not decode spreadsheet");
        }
        self.state.apply_decode(id, result);
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn file(&self) -> Option<&Arc<ChosenFile>> {
        self.state.file()
    }

    pub fn grid(&self) -> &DecodedGrid {
        self.state.grid()
    }

    pub fn decode_error(&self) -> Option<&DecodeError> {
        self.state.decode_error()
    }

    pub fn preview(&self) -> Option<PreviewTable> {
        preview::render(self.state.grid())
    }

    /// Name of the selected file, or the idle notice
    pub fn file_label(&self) -> String {
        match self.state.file() {
            Some(file) => file.name().to_string(),
            None => NO_FILE_NOTICE.to_string(),
        }
    }

    /// Whether an upload can be started
    pub fn can_submit(&self) -> bool {
        self.state.file().is_some()
    }

    /// Upload the selected file once, whatever its decode state
    pub async fn submit(&self) -> RadarResult<TransferOutcome> {
        let file = self.state.file().ok_or(RadarError::NothingSelected)?;
        let outcome = self.client.upload(file, self.credentials.as_ref()).await;
        info!(name = file.name(), ?outcome, "upload finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::TransferConfig;

    fn session() -> ImportSession {
        let client = TransferClient::new(&TransferConfig::default()).unwrap();
        ImportSession::new(client)
    }

    #[tokio::test]
    async fn test_submit_without_file_is_refused() {
        let session = session();
        assert!(!session.can_submit());
        assert_eq!(session.file_label(), NO_FILE_NOTICE);
        assert!(matches!(
            session.submit().await,
            Err(RadarError::NothingSelected)
        ));
    }

    #[tokio::test]
    async fn test_rejected_offer_leaves_session_empty() {
        let mut session = session();
        let result = session.offer(
            InputChannel::DragDrop,
            vec![CandidateFile::new("dates.csv", Some("text/csv"), b"a,b".to_vec())],
        );
        assert!(result.is_err());
        assert_eq!(session.phase(), Phase::Empty);
        assert!(session.file().is_none());
    }

    #[tokio::test]
    async fn test_settle_when_empty_returns() {
        let mut session = session();
        session.settle().await;
        assert_eq!(session.phase(), Phase::Empty);
        assert!(session.preview().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_file_still_selected() {
        let mut session = session();
        session
            .offer(
                InputChannel::Picker,
                vec![CandidateFile::new("broken.xlsx", None, b"not a zip".to_vec())],
            )
            .unwrap();
        session.settle().await;

        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.decode_error().is_some());
        assert!(session.preview().is_none());
        assert!(session.can_submit());
        assert_eq!(session.file_label(), "broken.xlsx");
    }
}

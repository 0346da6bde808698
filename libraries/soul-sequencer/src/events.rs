//! Sequencer events
//!
//! Notifications the sequencer pushes to listeners (typically the player,
//! which has to stop the audio when the playing track disappears).

use crossbeam_channel::{unbounded, Receiver, Sender};
use soul_core::Track;
use std::sync::Arc;
use tracing::trace;

/// Events emitted by the sequencer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    /// The playing track was removed from the playlist (or the playlist was
    /// cleared). The sequencer has already ended the sequence.
    PlayingTrackRemoved(Arc<Track>),
}

/// Fan-out of events to every live subscriber
#[derive(Debug, Default)]
pub(crate) struct EventEmitter {
    subscribers: Vec<Sender<SequencerEvent>>,
}

impl EventEmitter {
    pub(crate) fn subscribe(&mut self) -> Receiver<SequencerEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Send to every subscriber, dropping the ones whose receiver is gone
    pub(crate) fn emit(&mut self, event: &SequencerEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());

        trace!(subscribers = self.subscribers.len(), ?event, "Emitted sequencer event");
    }
}

//! Threaded sequencer handle
//!
//! Moves a [`Sequencer`] onto a dedicated worker thread and funnels every
//! operation, reads included, through one command queue. Playlist changes
//! and user commands therefore never interleave with each other, and peeks
//! never observe a sequence halfway through a resize.
//!
//! ```text
//! UI / player ──commands──> [queue] ──> worker thread (owns Sequencer)
//!             <──replies─── per-request channel
//! ```

use crate::error::{Result, SequencerError};
use crate::events::SequencerEvent;
use crate::sequencer::Sequencer;
use crate::types::{RepeatAndShuffleModes, RepeatMode, SequenceInfo, ShuffleMode};
use crossbeam_channel::{bounded, Receiver, Sender};
use soul_core::{GroupKey, PlaylistChange, Track};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Capacity of the command queue
const COMMAND_QUEUE_CAPACITY: usize = 64;

/// Requests answered with a track
#[derive(Debug, Clone)]
enum TrackRequest {
    Begin,
    Subsequent,
    Next,
    Previous,
    PeekSubsequent,
    PeekNext,
    PeekPrevious,
    CurrentTrack,
    Select(usize),
    SelectTrack(Arc<Track>),
    SelectGroup(GroupKey),
}

/// Requests answered with the modes
#[derive(Debug, Clone, Copy)]
enum ModeRequest {
    Get,
    SetRepeat(RepeatMode),
    SetShuffle(ShuffleMode),
    ToggleRepeat,
    ToggleShuffle,
}

/// Messages processed by the worker thread
enum SequencerCommand {
    Track(TrackRequest, Sender<Option<Arc<Track>>>),
    Modes(ModeRequest, Sender<RepeatAndShuffleModes>),
    Info(Sender<SequenceInfo>),
    Subscribe(Sender<Receiver<SequencerEvent>>),
    End,
    PlaylistChanged(PlaylistChange),
    Shutdown,
}

/// Owner of the sequencer worker thread
///
/// Dropping the handle stops the worker.
pub struct SequencerHandle {
    commands: Sender<SequencerCommand>,
    worker: Option<JoinHandle<()>>,
}

impl SequencerHandle {
    /// Start a worker thread owning `sequencer`
    pub fn spawn(sequencer: Sequencer) -> Result<Self> {
        let (commands, queue) = bounded(COMMAND_QUEUE_CAPACITY);

        let worker = thread::Builder::new()
            .name("sequencer".to_string())
            .spawn(move || Self::worker_loop(sequencer, &queue))?;

        Ok(Self {
            commands,
            worker: Some(worker),
        })
    }

    fn worker_loop(mut sequencer: Sequencer, queue: &Receiver<SequencerCommand>) {
        info!("Sequencer worker started");

        while let Ok(command) = queue.recv() {
            match command {
                SequencerCommand::Track(request, reply) => {
                    let track = Self::handle_track_request(&mut sequencer, request);
                    reply.send(track).ok();
                }
                SequencerCommand::Modes(request, reply) => {
                    let modes = match request {
                        ModeRequest::Get => sequencer.repeat_and_shuffle_modes(),
                        ModeRequest::SetRepeat(mode) => sequencer.set_repeat_mode(mode),
                        ModeRequest::SetShuffle(mode) => sequencer.set_shuffle_mode(mode),
                        ModeRequest::ToggleRepeat => sequencer.toggle_repeat_mode(),
                        ModeRequest::ToggleShuffle => sequencer.toggle_shuffle_mode(),
                    };
                    reply.send(modes).ok();
                }
                SequencerCommand::Info(reply) => {
                    reply.send(sequencer.sequence_info()).ok();
                }
                SequencerCommand::Subscribe(reply) => {
                    reply.send(sequencer.subscribe()).ok();
                }
                SequencerCommand::End => sequencer.end(),
                SequencerCommand::PlaylistChanged(change) => {
                    sequencer.handle_playlist_change(&change);
                }
                SequencerCommand::Shutdown => break,
            }
        }

        info!("Sequencer worker stopped");
    }

    fn handle_track_request(sequencer: &mut Sequencer, request: TrackRequest) -> Option<Arc<Track>> {
        match request {
            TrackRequest::Begin => sequencer.begin(),
            TrackRequest::Subsequent => sequencer.subsequent(),
            TrackRequest::Next => sequencer.next(),
            TrackRequest::Previous => sequencer.previous(),
            TrackRequest::PeekSubsequent => sequencer.peek_subsequent(),
            TrackRequest::PeekNext => sequencer.peek_next(),
            TrackRequest::PeekPrevious => sequencer.peek_previous(),
            TrackRequest::CurrentTrack => sequencer.current_track(),
            TrackRequest::Select(index) => sequencer.select(index),
            TrackRequest::SelectTrack(track) => sequencer.select_track(&track),
            TrackRequest::SelectGroup(key) => sequencer.select_group(&key),
        }
    }

    /// Send a command and wait for its reply
    fn request<T>(&self, command: impl FnOnce(Sender<T>) -> SequencerCommand) -> Result<T> {
        let (reply_tx, reply_rx) = bounded(1);

        self.commands
            .send(command(reply_tx))
            .map_err(|_| SequencerError::Disconnected)?;

        reply_rx.recv().map_err(|_| SequencerError::Disconnected)
    }

    fn track(&self, request: TrackRequest) -> Result<Option<Arc<Track>>> {
        self.request(|reply| SequencerCommand::Track(request, reply))
    }

    fn modes(&self, request: ModeRequest) -> Result<RepeatAndShuffleModes> {
        self.request(|reply| SequencerCommand::Modes(request, reply))
    }

    /// See [`Sequencer::begin`]
    pub fn begin(&self) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::Begin)
    }

    /// See [`Sequencer::end`]
    pub fn end(&self) -> Result<()> {
        self.commands
            .send(SequencerCommand::End)
            .map_err(|_| SequencerError::Disconnected)
    }

    /// See [`Sequencer::select`]
    pub fn select(&self, index: usize) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::Select(index))
    }

    /// See [`Sequencer::select_track`]
    pub fn select_track(&self, track: Arc<Track>) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::SelectTrack(track))
    }

    /// See [`Sequencer::select_group`]
    pub fn select_group(&self, key: GroupKey) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::SelectGroup(key))
    }

    /// See [`Sequencer::subsequent`]
    pub fn subsequent(&self) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::Subsequent)
    }

    /// See [`Sequencer::next`]
    pub fn next(&self) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::Next)
    }

    /// See [`Sequencer::previous`]
    pub fn previous(&self) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::Previous)
    }

    /// See [`Sequencer::peek_subsequent`]
    pub fn peek_subsequent(&self) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::PeekSubsequent)
    }

    /// See [`Sequencer::peek_next`]
    pub fn peek_next(&self) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::PeekNext)
    }

    /// See [`Sequencer::peek_previous`]
    pub fn peek_previous(&self) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::PeekPrevious)
    }

    /// See [`Sequencer::current_track`]
    pub fn current_track(&self) -> Result<Option<Arc<Track>>> {
        self.track(TrackRequest::CurrentTrack)
    }

    /// See [`Sequencer::sequence_info`]
    pub fn sequence_info(&self) -> Result<SequenceInfo> {
        self.request(SequencerCommand::Info)
    }

    /// See [`Sequencer::repeat_and_shuffle_modes`]
    pub fn repeat_and_shuffle_modes(&self) -> Result<RepeatAndShuffleModes> {
        self.modes(ModeRequest::Get)
    }

    /// See [`Sequencer::set_repeat_mode`]
    pub fn set_repeat_mode(&self, mode: RepeatMode) -> Result<RepeatAndShuffleModes> {
        self.modes(ModeRequest::SetRepeat(mode))
    }

    /// See [`Sequencer::set_shuffle_mode`]
    pub fn set_shuffle_mode(&self, mode: ShuffleMode) -> Result<RepeatAndShuffleModes> {
        self.modes(ModeRequest::SetShuffle(mode))
    }

    /// See [`Sequencer::toggle_repeat_mode`]
    pub fn toggle_repeat_mode(&self) -> Result<RepeatAndShuffleModes> {
        self.modes(ModeRequest::ToggleRepeat)
    }

    /// See [`Sequencer::toggle_shuffle_mode`]
    pub fn toggle_shuffle_mode(&self) -> Result<RepeatAndShuffleModes> {
        self.modes(ModeRequest::ToggleShuffle)
    }

    /// See [`Sequencer::subscribe`]
    pub fn subscribe(&self) -> Result<Receiver<SequencerEvent>> {
        self.request(SequencerCommand::Subscribe)
    }

    /// Queue a playlist change; processed in order with all other commands
    pub fn playlist_changed(&self, change: PlaylistChange) -> Result<()> {
        self.commands
            .send(SequencerCommand::PlaylistChanged(change))
            .map_err(|_| SequencerError::Disconnected)
    }

    /// Stop the worker and wait for it to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        debug!("Stopping sequencer worker");
        self.commands.send(SequencerCommand::Shutdown).ok();

        if worker.join().is_err() {
            warn!("Sequencer worker panicked");
        }
    }
}

impl Drop for SequencerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

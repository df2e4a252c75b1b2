use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::debug;

use crate::config::PAUSE_POLL_MS;
use crate::error::Cancelled;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Running,
    Paused,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pause,
    Resume,
    Stop,
}

/// Sending side of a playback channel. Cheap to clone and `Send`, so an input
/// thread can hold one while the run blocks in a checkpoint.
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    tx: Sender<Command>,
}

impl PlaybackHandle {
    pub fn pause(&self) {
        self.send(Command::Pause);
    }

    pub fn resume(&self) {
        self.send(Command::Resume);
    }

    pub fn stop(&self) {
        self.send(Command::Stop);
    }

    pub fn send(&self, command: Command) {
        // the run may already be gone; nothing left to control then
        let _ = self.tx.send(command);
    }
}

/// Pause/stop state of one run, consulted by the engine at step boundaries.
#[derive(Debug)]
pub struct Playback {
    state: PlaybackState,
    commands: Receiver<Command>,
    poll_interval: Duration,
}

impl Playback {
    /// A playback with its own fresh channel.
    pub fn new() -> (Playback, PlaybackHandle) {
        let (tx, rx) = unbounded();
        (Playback::with_receiver(rx), PlaybackHandle { tx })
    }

    pub fn channel() -> (PlaybackHandle, Receiver<Command>) {
        let (tx, rx) = unbounded();
        (PlaybackHandle { tx }, rx)
    }

    /// Attaches to a long-lived command channel. Commands queued before this
    /// run existed are discarded: every run starts out running.
    pub fn with_receiver(commands: Receiver<Command>) -> Playback {
        let stale = commands.try_iter().count();
        if stale > 0 {
            debug!("Discarded {} stale playback commands", stale);
        }
        Playback {
            state: PlaybackState::Running,
            commands,
            poll_interval: Duration::from_millis(PAUSE_POLL_MS),
        }
    }

    pub fn poll_interval(mut self, interval: Duration) -> Playback {
        self.poll_interval = interval;
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Running {
            debug!("Playback paused");
            self.state = PlaybackState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            debug!("Playback resumed");
            self.state = PlaybackState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.state != PlaybackState::Stopped {
            debug!("Playback stopped");
            self.state = PlaybackState::Stopped;
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Stop => self.stop(),
        }
    }

    fn drain(&mut self) {
        loop {
            match self.commands.try_recv() {
                Ok(command) => self.apply(command),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Suspension point between two steps.
    ///
    /// Fails with `Cancelled` as soon as a stop is seen, whether it arrived
    /// before the call or while waiting out a pause.
    pub fn checkpoint(&mut self) -> Result<(), Cancelled> {
        self.drain();
        loop {
            match self.state {
                PlaybackState::Stopped => return Err(Cancelled),
                PlaybackState::Running => return Ok(()),
                PlaybackState::Paused => match self.commands.recv_timeout(self.poll_interval) {
                    Ok(command) => self.apply(command),
                    Err(RecvTimeoutError::Timeout) => {}
                    // with every handle dropped nobody can resume or stop us
                    Err(RecvTimeoutError::Disconnected) => {
                        debug!("Playback channel closed while paused");
                        self.stop();
                    }
                },
            }
        }
    }
}

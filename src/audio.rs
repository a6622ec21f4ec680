//! Sound cues.
//!
//! Audio is a side channel: every call site discards the error after logging
//! it, and the simulation never looks at the outcome.

use std::io::{self, Write};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A firework leaves the ground
    Launch,
    /// A firework bursts into particles
    Explosion,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("could not write to the terminal: {0}")]
    Io(#[from] io::Error),
}

pub trait Audio {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// No audio attached: every cue is skipped.
impl<A: Audio> Audio for Option<A> {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        match self {
            Some(audio) => audio.play(cue),
            None => Ok(()),
        }
    }
}

/// Rings the terminal bell for every cue.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Audio for TerminalBell {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}

/// Plays `cue`, logging and dropping any failure.
pub fn play_best_effort(audio: &mut impl Audio, cue: Cue) {
    if let Err(err) = audio.play(cue) {
        log::debug!("{cue:?} cue skipped: {err}");
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Remembers every cue it is asked to play, optionally failing each time.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub cues: Vec<Cue>,
        pub fail: bool,
    }

    impl Recorder {
        pub fn failing() -> Self {
            Self { cues: Vec::new(), fail: true }
        }

        pub fn count(&self, cue: Cue) -> usize {
            self.cues.iter().filter(|&&c| c == cue).count()
        }
    }

    impl Audio for Recorder {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            self.cues.push(cue);
            if self.fail {
                return Err(io::Error::other("speaker unplugged").into());
            }
            Ok(())
        }
    }
}

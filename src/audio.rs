use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_CRY_BASE: &str = "https://pokemoncries.com/cries";

const STOP_POLL: Duration = Duration::from_millis(50);

#[derive(thiserror::Error, Debug)]
pub enum PlaybackError {
    #[error("unsupported audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("no audio output: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("audio sink failed: {0}")]
    Sink(#[from] rodio::PlayError),
}

pub fn cry_url(base: &str, id: u32) -> String {
    format!("{}/{id}.mp3", base.trim_end_matches('/'))
}

/// Plays one cry at a time. Claiming a new ticket silences the clip that
/// holds the previous one.
#[derive(Clone, Debug, Default)]
pub struct CryPlayer {
    latest: Arc<AtomicU64>,
}

impl CryPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Plays the clip on the default output device until it ends or a newer
    /// ticket is claimed. Blocking.
    pub fn play(&self, ticket: u64, bytes: Vec<u8>) -> Result<(), PlaybackError> {
        let source = rodio::Decoder::new(Cursor::new(bytes))?;
        if !self.is_current(ticket) {
            return Ok(());
        }
        let (_stream, handle) = rodio::OutputStream::try_default()?;
        let sink = rodio::Sink::try_new(&handle)?;
        sink.append(source);
        while !sink.empty() {
            if !self.is_current(ticket) {
                tracing::debug!(ticket, "cry superseded");
                sink.stop();
                break;
            }
            std::thread::sleep(STOP_POLL);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cry_url_uses_id() {
        assert_eq!(
            cry_url(DEFAULT_CRY_BASE, 25),
            "https://pokemoncries.com/cries/25.mp3"
        );
        assert_eq!(cry_url("http://localhost:8080/", 7), "http://localhost:8080/7.mp3");
    }

    #[test]
    fn test_newer_claim_supersedes_older() {
        let player = CryPlayer::new();
        let first = player.claim();
        assert!(player.is_current(first));

        let second = player.clone().claim();
        assert!(!player.is_current(first));
        assert!(player.is_current(second));
    }

    #[test]
    fn test_play_rejects_undecodable_bytes() {
        let player = CryPlayer::new();
        let ticket = player.claim();
        let result = player.play(ticket, b"not audio".to_vec());
        assert!(matches!(result, Err(PlaybackError::Decode(_))));
    }
}

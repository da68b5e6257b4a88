//! Local-disk storage for generated audio and contract PDFs.
//!
//! Layout under the media root:
//!   audio/<prefix>_<campaign_id>_<creator_id>_<unix_ts>.mp3  → /api/audio/<file>
//!   contracts/<deal_id>.pdf                                 → /api/contracts/download/<deal_id>.pdf

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::tts::SpeechSynthesizer;

pub const AUDIO_URL_PREFIX: &str = "/api/audio";
pub const CONTRACT_URL_PREFIX: &str = "/api/contracts/download";

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.root.join("audio")
    }

    pub fn contracts_dir(&self) -> PathBuf {
        self.root.join("contracts")
    }

    /// Creates the audio and contract directories if they do not exist.
    pub async fn ensure_dirs(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(self.audio_dir()).await?;
        tokio::fs::create_dir_all(self.contracts_dir()).await?;
        Ok(())
    }

    /// Writes an MP3 and returns the public URL it is served under.
    pub async fn save_audio(&self, file_name: &str, audio: &[u8]) -> io::Result<String> {
        write_file(&self.audio_dir(), file_name, audio).await?;
        Ok(format!("{AUDIO_URL_PREFIX}/{file_name}"))
    }

    pub fn contract_path(&self, deal_id: Uuid) -> PathBuf {
        self.contracts_dir().join(format!("{deal_id}.pdf"))
    }

    /// Writes a contract PDF and returns its download URL.
    pub async fn save_contract(&self, deal_id: Uuid, pdf: &[u8]) -> io::Result<String> {
        write_file(&self.contracts_dir(), &format!("{deal_id}.pdf"), pdf).await?;
        Ok(contract_url(deal_id))
    }

    /// Reads a previously generated contract. `Ok(None)` when it was never rendered.
    pub async fn read_contract(&self, deal_id: Uuid) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.contract_path(deal_id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

async fn write_file(dir: &Path, file_name: &str, contents: &[u8]) -> io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(file_name), contents).await
}

pub fn contract_url(deal_id: Uuid) -> String {
    format!("{CONTRACT_URL_PREFIX}/{deal_id}.pdf")
}

pub fn audio_file_name(prefix: &str, campaign_id: Uuid, creator_id: Uuid, unix_ts: i64) -> String {
    format!("{prefix}_{campaign_id}_{creator_id}_{unix_ts}.mp3")
}

/// Synthesizes `script` and stores it. Returns `None` when either step fails;
/// voice notes are optional for every caller.
pub async fn record_voice_message(
    tts: &dyn SpeechSynthesizer,
    media: &MediaStore,
    prefix: &str,
    campaign_id: Uuid,
    creator_id: Uuid,
    script: &str,
) -> Option<String> {
    if script.trim().is_empty() {
        return None;
    }

    let audio = match tts.synthesize_speech(script).await {
        Ok(audio) => audio,
        Err(e) => {
            warn!("Voice generation failed for {prefix} {campaign_id}/{creator_id}: {e}");
            return None;
        }
    };

    let file_name = audio_file_name(prefix, campaign_id, creator_id, Utc::now().timestamp());
    match media.save_audio(&file_name, &audio).await {
        Ok(url) => {
            info!("Stored voice message {file_name} ({} bytes)", audio.len());
            Some(url)
        }
        Err(e) => {
            warn!("Failed to write voice message {file_name}: {e}");
            None
        }
    }
}

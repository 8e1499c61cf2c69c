//! Turning "say this character in variant X" into one utterance.
//!
//! Everything here is platform-neutral: the browser specifics live behind the
//! [`UtterancePlayer`] trait (see `platform::BrowserPlayer`), which keeps the
//! cancel-before-speak rule and the advisory messages testable natively.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::voice::{Variant, VoiceMeta};

/// Tunables for speech requests.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    /// How long to wait for a lazily populated voice list.
    pub voice_wait_timeout_ms: i32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self { rate: 0.9, pitch: 1.0, voice_wait_timeout_ms: 1500 }
    }
}

#[cfg(feature = "serde_json")]
impl SpeechSettings {
    /// Parse settings from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Why a speech request produced no audio. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeakError {
    #[error("此裝置/瀏覽器不支援語音功能。")]
    NoSpeechCapability,
    #[error("{}", .0.missing_voice_message())]
    NoMatchingVoice(Variant),
    #[error("speech platform error: {0}")]
    Platform(String),
}

impl Variant {
    fn missing_voice_message(self) -> String {
        match self {
            Variant::Mandarin => "此裝置未安裝普通話語音，請到系統語音設定下載。".to_string(),
            Variant::Cantonese => format!(
                "此裝置未提供可用中文語音（包括{}）。\n你可以到系統「文字轉語音/TTS」下載中文語音，或改用其他瀏覽器/裝置。",
                self.label()
            ),
        }
    }
}

impl From<JsValue> for SpeakError {
    fn from(value: JsValue) -> Self {
        SpeakError::Platform(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SpeakError> for JsValue {
    fn from(err: SpeakError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// A resolved request, ready for the player.
#[derive(Clone, Debug, PartialEq)]
pub struct UtterancePlan {
    pub text: String,
    pub variant: Variant,
    /// Language put on the utterance.
    pub lang: String,
    /// Tag of the voice that was picked.
    pub voice_lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub degraded: bool,
}

impl UtterancePlan {
    /// Notice shown when the voice is only a stand-in for the variant.
    pub fn degraded_notice(&self) -> Option<String> {
        self.degraded.then(|| {
            format!("此裝置未有 {} 專用語音，已改用 {} 讀音。", self.variant.label(), self.voice_lang)
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SpeakOutcome {
    /// Nothing to say (blank text).
    Skipped,
    Spoken(UtterancePlan),
}

/// Plays utterances on some speech engine.
pub trait UtterancePlayer {
    type Voice: VoiceMeta;

    /// Stop anything currently speaking or queued.
    fn cancel_all(&self);

    fn speak(&self, plan: &UtterancePlan, voice: &Self::Voice) -> Result<(), SpeakError>;
}

/// Resolve a voice for `variant` and hand the utterance to `player`.
///
/// Blank text is a silent no-op. Any in-flight utterance is cancelled before
/// the new one starts, so at most one is ever audible.
pub fn speak_with<P: UtterancePlayer>(
    player: &P,
    voices: &[P::Voice],
    text: &str,
    variant: Variant,
    settings: &SpeechSettings,
) -> Result<SpeakOutcome, SpeakError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(SpeakOutcome::Skipped);
    }

    let profile = variant.profile();
    let voice = profile.resolve(voices).ok_or_else(|| {
        tracing::warn!(?variant, available = voices.len(), "no matching voice");
        SpeakError::NoMatchingVoice(variant)
    })?;

    let voice_lang = voice.language_tag().into_owned();
    let plan = UtterancePlan {
        text: text.to_string(),
        variant,
        lang: profile.utterance_lang.map(str::to_string).unwrap_or_else(|| voice_lang.clone()),
        degraded: profile.is_degraded(&voice_lang),
        voice_lang,
        rate: settings.rate,
        pitch: settings.pitch,
    };
    tracing::info!(
        ?variant,
        voice = %voice.display_name(),
        lang = %plan.voice_lang,
        degraded = plan.degraded,
        "speaking"
    );

    player.cancel_all();
    player.speak(&plan, voice)?;
    Ok(SpeakOutcome::Spoken(plan))
}

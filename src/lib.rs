//! Hanzi flashcards core crate.
//!
//! A single-page widget: show a random Hanzi with an emoji hint and read it
//! aloud in Cantonese or Mandarin using the browser's own speech synthesis.
//! The interesting part is picking a voice (`voice`), since browsers label
//! Chinese voices inconsistently. Deck, speech planning, voice selection and
//! the voice-list wait are plain Rust and tested natively; `platform` and `app` hold the web-sys glue.

use wasm_bindgen::prelude::*;

mod app;
pub mod deck;
pub mod platform;
pub mod speech;
pub mod voice;
pub mod voice_list;

pub use deck::{DECK, Flashcard, FlashcardSelector};
pub use speech::{SpeakError, SpeakOutcome, SpeechSettings, UtterancePlan, UtterancePlayer, speak_with};
pub use voice::{Variant, VariantProfile, Voice, VoiceMeta, resolve};
pub use voice_list::{VoiceSource, WaitSettled, voices_with_wait};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    tracing_wasm::set_as_global_default();
}

/// Bind the page's buttons with default speech settings.
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    app::mount(SpeechSettings::default())
}

/// Like [`start_app`], with settings given as JSON
/// (`{"rate": 0.9, "pitch": 1.0, "voice_wait_timeout_ms": 1500}`, all optional).
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_app_with_settings(json: &str) -> Result<(), JsValue> {
    let settings = SpeechSettings::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("invalid speech settings: {e}")))?;
    app::mount(settings)
}

/// Speak `text` in `variant` (`"cantonese"` or `"mandarin"`).
///
/// Resolves to the degraded-voice notice, if any, or `undefined`; rejects with
/// the user-facing message when no speech is possible.
#[wasm_bindgen]
pub async fn speak(text: String, variant: String) -> Result<JsValue, JsValue> {
    let variant = Variant::from_name(&variant)
        .ok_or_else(|| JsValue::from_str(&format!("unknown variant {variant:?}")))?;
    match platform::speak_text(&text, variant, &SpeechSettings::default()).await? {
        SpeakOutcome::Spoken(plan) => Ok(plan.degraded_notice().map(JsValue::from).unwrap_or(JsValue::UNDEFINED)),
        SpeakOutcome::Skipped => Ok(JsValue::UNDEFINED),
    }
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

//! Browser side of speech: `window.speechSynthesis` access, the web-sys
//! backed [`VoiceSource`] and [`UtterancePlayer`].

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice, Window, window};

use crate::speech::{SpeakError, SpeakOutcome, SpeechSettings, UtterancePlan, UtterancePlayer, speak_with};
use crate::voice::Variant;
use crate::voice_list::{VoiceSource, voices_with_wait};

const VOICES_CHANGED: &str = "voiceschanged";

/// The page's speech engine, or `None` when the browser has none.
pub fn speech_synthesis(win: &Window) -> Option<SpeechSynthesis> {
    // Reflect keeps us from touching the getter on browsers without the API.
    if !Reflect::has(win, &JsValue::from_str("speechSynthesis")).unwrap_or(false) {
        return None;
    }
    win.speech_synthesis().ok()
}

pub fn current_voices(synth: &SpeechSynthesis) -> Vec<SpeechSynthesisVoice> {
    synth
        .get_voices()
        .iter()
        .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
        .collect()
}

/// Kick off voice enumeration early. Safari and some Android builds only fill
/// the list after a first `getVoices()` call plus a `voiceschanged` event.
pub fn prime_voices(win: &Window) {
    let Some(synth) = speech_synthesis(win) else { return };
    let reader = synth.clone();
    let closure = Closure::wrap(Box::new(move || {
        let count = reader.get_voices().length();
        tracing::debug!(count, "voice list changed");
    }) as Box<dyn FnMut()>);
    synth.set_onvoiceschanged(Some(closure.as_ref().unchecked_ref()));
    // Lives as long as the page. Waits add their own listeners beside it.
    closure.forget();
    synth.get_voices();
}

/// `window.speechSynthesis` as a [`VoiceSource`]. Waits listen with
/// `addEventListener`, so the page's own `onvoiceschanged` handler stays put.
pub struct BrowserVoices {
    win: Window,
    synth: SpeechSynthesis,
}

impl BrowserVoices {
    pub fn new(win: Window, synth: SpeechSynthesis) -> Self {
        Self { win, synth }
    }

    pub fn synth(&self) -> &SpeechSynthesis {
        &self.synth
    }
}

impl VoiceSource for BrowserVoices {
    type Voice = SpeechSynthesisVoice;
    type Subscription = Closure<dyn FnMut()>;
    type Timer = (i32, Closure<dyn FnMut()>);

    fn voices(&self) -> Vec<SpeechSynthesisVoice> {
        current_voices(&self.synth)
    }

    fn subscribe_voices_changed(&self, notify: Box<dyn Fn()>) -> Result<Self::Subscription, SpeakError> {
        let listener = Closure::wrap(Box::new(move || notify()) as Box<dyn FnMut()>);
        self.synth
            .add_event_listener_with_callback(VOICES_CHANGED, listener.as_ref().unchecked_ref())?;
        Ok(listener)
    }

    fn unsubscribe_voices_changed(&self, listener: Self::Subscription) {
        let _ = self
            .synth
            .remove_event_listener_with_callback(VOICES_CHANGED, listener.as_ref().unchecked_ref());
        // Detached above, so the closure can go.
        drop(listener);
    }

    fn start_timer(&self, timeout_ms: i32, notify: Box<dyn Fn()>) -> Result<Self::Timer, SpeakError> {
        let callback = Closure::wrap(Box::new(move || notify()) as Box<dyn FnMut()>);
        let handle = self
            .win
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), timeout_ms)?;
        Ok((handle, callback))
    }

    fn cancel_timer(&self, (handle, callback): Self::Timer) {
        self.win.clear_timeout_with_handle(handle);
        drop(callback);
    }
}

/// Plays utterances through `window.speechSynthesis`.
pub struct BrowserPlayer {
    synth: SpeechSynthesis,
}

impl BrowserPlayer {
    pub fn new(synth: SpeechSynthesis) -> Self {
        Self { synth }
    }
}

impl UtterancePlayer for BrowserPlayer {
    type Voice = SpeechSynthesisVoice;

    fn cancel_all(&self) {
        self.synth.cancel();
    }

    fn speak(&self, plan: &UtterancePlan, voice: &SpeechSynthesisVoice) -> Result<(), SpeakError> {
        let utterance = SpeechSynthesisUtterance::new_with_text(&plan.text)?;
        utterance.set_voice(Some(voice));
        utterance.set_lang(&plan.lang);
        utterance.set_rate(plan.rate);
        utterance.set_pitch(plan.pitch);
        self.synth.speak(&utterance);
        Ok(())
    }
}

/// Speak `text` in `variant` with the browser's speech engine.
pub async fn speak_text(
    text: &str,
    variant: Variant,
    settings: &SpeechSettings,
) -> Result<SpeakOutcome, SpeakError> {
    if text.trim().is_empty() {
        return Ok(SpeakOutcome::Skipped);
    }
    let win = window().ok_or(SpeakError::NoSpeechCapability)?;
    let synth = speech_synthesis(&win).ok_or(SpeakError::NoSpeechCapability)?;

    let source = BrowserVoices::new(win, synth);
    let (voices, _) = voices_with_wait(&source, settings.voice_wait_timeout_ms).await?;
    let player = BrowserPlayer::new(source.synth().clone());
    speak_with(&player, &voices, text, variant, settings)
}

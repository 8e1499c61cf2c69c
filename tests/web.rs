// Browser tests (wasm-pack test --headless --chrome). Exercise the web-sys glue.
#![cfg(target_arch = "wasm32")]

use hanzi_flashcards::platform::{BrowserVoices, speech_synthesis};
use hanzi_flashcards::{WaitSettled, voices_with_wait};
use hanzi_flashcards::{SpeakOutcome, SpeechSettings, Variant};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn voice_wait_leaves_page_handler_alone() {
    let win = web_sys::window().unwrap();
    let Some(synth) = speech_synthesis(&win) else { return };
    let before = synth.onvoiceschanged();
    let source = BrowserVoices::new(win, synth.clone());
    let (first, second) = futures::join!(voices_with_wait(&source, 200), voices_with_wait(&source, 50));
    for (voices, how) in [first.unwrap(), second.unwrap()] {
        if how == WaitSettled::Immediate {
            assert!(!voices.is_empty());
        }
    }
    assert_eq!(synth.onvoiceschanged().map(JsValue::from), before.map(JsValue::from));
}

#[wasm_bindgen_test]
async fn blank_text_is_a_no_op() {
    let out = hanzi_flashcards::platform::speak_text("  ", Variant::Mandarin, &SpeechSettings::default())
        .await
        .unwrap();
    assert_eq!(out, SpeakOutcome::Skipped);
}

#[wasm_bindgen_test]
fn unknown_variant_name_is_rejected() {
    assert_eq!(Variant::from_name("klingon"), None);
    assert_eq!(Variant::from_name("mandarin"), Some(Variant::Mandarin));
}

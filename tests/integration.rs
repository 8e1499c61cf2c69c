// Integration tests (native) for the `hanzi-flashcards` crate.
// These avoid wasm-specific functionality and exercise the public API the way
// the page does: draw cards, then resolve a voice and plan an utterance.

use std::cell::RefCell;

use hanzi_flashcards::{
    DECK, FlashcardSelector, SpeakError, SpeakOutcome, SpeechSettings, UtterancePlan, UtterancePlayer,
    Variant, Voice, speak_with,
};

struct Log(RefCell<Vec<String>>);

impl UtterancePlayer for Log {
    type Voice = Voice;

    fn cancel_all(&self) {
        self.0.borrow_mut().push("cancel".to_string());
    }

    fn speak(&self, plan: &UtterancePlan, voice: &Voice) -> Result<(), SpeakError> {
        self.0.borrow_mut().push(format!("{}@{}", plan.text, voice.lang));
        Ok(())
    }
}

// Voice list roughly as Chrome on macOS reports it.
fn mac_chrome_voices() -> Vec<Voice> {
    vec![
        Voice::new("en-US", "Samantha", "com.apple.voice.compact.en-US.Samantha"),
        Voice::new("zh-HK", "Sinji", "com.apple.voice.compact.zh-HK.Sinji"),
        Voice::new("zh-TW", "Meijia", "com.apple.voice.compact.zh-TW.Meijia"),
        Voice::new("zh-CN", "Tingting", "com.apple.voice.compact.zh-CN.Tingting"),
        Voice::new("zh-HK", "Google 粵語（香港）", "Google 粵語（香港）"),
        Voice::new("zh-CN", "Google 普通话（中国大陆）", "Google 普通话（中国大陆）"),
    ]
}

#[test]
fn draw_then_speak_in_both_variants() {
    let mut selector = FlashcardSelector::new(DECK).unwrap();
    let card = selector.draw_next(|bound| bound / 2);
    let player = Log(RefCell::new(Vec::new()));
    let voices = mac_chrome_voices();
    let settings = SpeechSettings::default();

    let yue = speak_with(&player, &voices, card.character, Variant::Cantonese, &settings).unwrap();
    let cmn = speak_with(&player, &voices, card.character, Variant::Mandarin, &settings).unwrap();

    let SpeakOutcome::Spoken(yue) = yue else { panic!("cantonese skipped") };
    let SpeakOutcome::Spoken(cmn) = cmn else { panic!("mandarin skipped") };
    // No yue-* voice installed: zh-HK is a stand-in.
    assert_eq!(yue.voice_lang, "zh-HK");
    assert!(yue.degraded);
    assert_eq!(cmn.voice_lang, "zh-CN");
    assert_eq!(cmn.lang, "zh-CN");
    assert!(!cmn.degraded);
    assert_eq!(
        *player.0.borrow(),
        vec![
            "cancel".to_string(),
            format!("{}@zh-HK", card.character),
            "cancel".to_string(),
            format!("{}@zh-CN", card.character),
        ]
    );
}

#[test]
fn real_cantonese_voice_is_not_degraded() {
    let mut voices = mac_chrome_voices();
    voices.push(Voice::new("yue-HK", "Aasing", "com.apple.voice.enhanced.yue-HK.Aasing"));
    let player = Log(RefCell::new(Vec::new()));
    let out = speak_with(&player, &voices, "魚", Variant::Cantonese, &SpeechSettings::default()).unwrap();
    let SpeakOutcome::Spoken(plan) = out else { panic!("skipped") };
    assert_eq!(plan.voice_lang, "yue-HK");
    assert_eq!(plan.lang, "yue-HK");
    assert_eq!(plan.degraded_notice(), None);
}

#[test]
fn cantonese_only_device_has_no_mandarin() {
    let voices = vec![
        Voice::new("yue-HK", "Sinji", ""),
        Voice::new("zh-HK", "Google 粵語（香港）", ""),
        Voice::new("zh", "Chinese", ""),
    ];
    let player = Log(RefCell::new(Vec::new()));
    let err = speak_with(&player, &voices, "人", Variant::Mandarin, &SpeechSettings::default()).unwrap_err();
    assert_eq!(err, SpeakError::NoMatchingVoice(Variant::Mandarin));
    assert_eq!(err.to_string(), "此裝置未安裝普通話語音，請到系統語音設定下載。");
    assert!(player.0.borrow().is_empty());
}

#[test]
fn resolve_is_exposed_with_custom_predicates() {
    let voices = mac_chrome_voices();
    let never = |_: &Voice| false;
    // Nothing looks like anything: strict Mandarin finds nothing, broad
    // Cantonese still goes by tags alone.
    assert!(hanzi_flashcards::resolve(&voices, Variant::Mandarin.profile(), never, never).is_none());
    let got = hanzi_flashcards::resolve(&voices, Variant::Cantonese.profile(), never, never).unwrap();
    assert_eq!(got.name, "Sinji");
}

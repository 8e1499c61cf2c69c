//! Page wiring: start screen, "next card" button and the two speak buttons.
//!
//! Expected markup ids: `home-page`, `learn-page`, `start-btn`, `next-btn`,
//! `speak-cantonese-btn`, `speak-mandarin-btn`, `word-emoji`, `word-char`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window, window};

use crate::deck::{DECK, Flashcard, FlashcardSelector, random_index};
use crate::platform::{prime_voices, speak_text};
use crate::speech::{SpeakError, SpeakOutcome, SpeechSettings};
use crate::voice::Variant;

const ACTIVE_CLASS: &str = "active";

/// Elements the widget renders into.
#[derive(Clone)]
struct View {
    win: Window,
    home_page: Element,
    learn_page: Element,
    word_emoji: Element,
    word_char: Element,
}

impl View {
    fn show_card(&self, card: &Flashcard) {
        self.word_emoji.set_text_content(Some(card.emoji));
        self.word_emoji
            .set_attribute("aria-label", &format!("{} 的圖案", card.character))
            .ok();
        self.word_char.set_text_content(Some(card.character));
    }

    fn displayed_character(&self) -> String {
        self.word_char.text_content().unwrap_or_default().trim().to_string()
    }

    fn enter_learn_page(&self) {
        self.home_page.class_list().remove_1(ACTIVE_CLASS).ok();
        self.learn_page.class_list().add_1(ACTIVE_CLASS).ok();
    }

    fn advise(&self, message: &str) {
        if self.win.alert_with_message(message).is_err() {
            tracing::warn!(advisory = message, "alert failed");
        }
    }
}

fn element(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

fn on_click(el: &Element, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| handler())
        as Box<dyn FnMut(web_sys::MouseEvent)>);
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // Buttons live for the whole page.
    closure.forget();
    Ok(())
}

/// Find the widget's elements and bind its buttons. Each button is bound once.
pub fn mount(settings: SpeechSettings) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let view = View {
        win: win.clone(),
        home_page: element(&doc, "home-page")?,
        learn_page: element(&doc, "learn-page")?,
        word_emoji: element(&doc, "word-emoji")?,
        word_char: element(&doc, "word-char")?,
    };
    let selector = FlashcardSelector::new(DECK).ok_or_else(|| JsValue::from_str("empty deck"))?;
    let selector = Rc::new(RefCell::new(selector));
    let settings = Rc::new(settings);

    let show_next = {
        let view = view.clone();
        let selector = selector.clone();
        move || {
            let card = selector.borrow_mut().draw_next(random_index);
            view.show_card(card);
        }
    };

    {
        let view = view.clone();
        let show_next = show_next.clone();
        on_click(&element(&doc, "start-btn")?, move || {
            view.enter_learn_page();
            show_next();
        })?;
    }
    on_click(&element(&doc, "next-btn")?, show_next)?;

    for (id, variant) in [
        ("speak-cantonese-btn", Variant::Cantonese),
        ("speak-mandarin-btn", Variant::Mandarin),
    ] {
        let view = view.clone();
        let settings = settings.clone();
        on_click(&element(&doc, id)?, move || {
            let view = view.clone();
            let settings = settings.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let text = view.displayed_character();
                let result = speak_text(&text, variant, &settings).await;
                present(&view, variant, result);
            });
        })?;
    }

    prime_voices(&win);
    tracing::info!(cards = DECK.len(), "flashcards ready");
    Ok(())
}

fn present(view: &View, variant: Variant, result: Result<SpeakOutcome, SpeakError>) {
    match result {
        Ok(SpeakOutcome::Skipped) => {}
        Ok(SpeakOutcome::Spoken(plan)) => {
            if let Some(notice) = plan.degraded_notice() {
                tracing::warn!(?variant, lang = %plan.voice_lang, "degraded voice");
                view.advise(&notice);
            }
        }
        Err(SpeakError::Platform(reason)) => {
            tracing::warn!(?variant, %reason, "speech failed");
        }
        Err(err) => {
            tracing::warn!(?variant, %err, "speech unavailable");
            view.advise(&err.to_string());
        }
    }
}

//! Voice selection for Cantonese / Mandarin speech.
//!
//! Browsers hand out a flat list of voices with a language tag, a display name
//! and a voice URI. None of these are reliable on their own (many engines tag
//! Cantonese as `zh-HK` or plain `zh`), so picking a voice is a small pipeline:
//!
//! 1. drop voices whose tag starts with an excluded prefix;
//! 2. for a strict variant, drop rival-looking voices and keep target-looking ones;
//! 3. walk the preferred tags in order, exact match before prefix match per tag;
//! 4. for a broad variant, fall back to any target-looking voice.
//!
//! Position in the preferred list always wins over match specificity: a prefix
//! hit on the first tag beats an exact hit on the second.

use std::borrow::Cow;

pub mod markers;
mod profiles;

pub use markers::{is_cantonese_like, is_mandarin_like};
pub use profiles::{CANTONESE, MANDARIN, Matching, Variant, VariantProfile};

/// Read-only view of a platform voice.
pub trait VoiceMeta {
    fn language_tag(&self) -> Cow<'_, str>;
    fn display_name(&self) -> Cow<'_, str>;
    fn resource_id(&self) -> Cow<'_, str>;
}

/// Owned voice record, used off-browser and in tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Voice {
    pub lang: String,
    pub name: String,
    pub uri: String,
}

impl Voice {
    pub fn new(lang: impl Into<String>, name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self { lang: lang.into(), name: name.into(), uri: uri.into() }
    }

    pub fn tagged(lang: impl Into<String>) -> Self {
        Self { lang: lang.into(), ..Self::default() }
    }
}

impl VoiceMeta for Voice {
    fn language_tag(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.lang)
    }
    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
    fn resource_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.uri)
    }
}

impl VoiceMeta for web_sys::SpeechSynthesisVoice {
    fn language_tag(&self) -> Cow<'_, str> {
        Cow::Owned(self.lang())
    }
    fn display_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.name())
    }
    fn resource_id(&self) -> Cow<'_, str> {
        Cow::Owned(self.voice_uri())
    }
}

/// Pick the best voice in `voices` for `profile`, or `None`.
///
/// The two predicates classify a voice as Mandarin-like / Cantonese-like; the
/// profile's variant decides which one is the target and which the rival.
pub fn resolve<'v, V, M, C>(
    voices: &'v [V],
    profile: &VariantProfile,
    is_mandarin_like: M,
    is_cantonese_like: C,
) -> Option<&'v V>
where
    V: VoiceMeta,
    M: Fn(&V) -> bool,
    C: Fn(&V) -> bool,
{
    let looks_like = |v: &V, which: Variant| match which {
        Variant::Mandarin => is_mandarin_like(v),
        Variant::Cantonese => is_cantonese_like(v),
    };
    let target = profile.variant;
    let rival = match target {
        Variant::Mandarin => Variant::Cantonese,
        Variant::Cantonese => Variant::Mandarin,
    };

    let mut candidates: Vec<(&V, String)> = voices
        .iter()
        .map(|v| (v, v.language_tag().to_lowercase()))
        .filter(|(_, lang)| !profile.is_excluded(lang))
        .collect();

    if profile.matching == Matching::Strict {
        candidates.retain(|(v, _)| !looks_like(*v, rival) && looks_like(*v, target));
    }

    for tag in profile.preferred_tags {
        let tag = tag.to_lowercase();
        if let Some((v, _)) = candidates.iter().find(|(_, lang)| *lang == tag) {
            return Some(*v);
        }
        if let Some((v, _)) = candidates.iter().find(|(_, lang)| lang.starts_with(&tag)) {
            return Some(*v);
        }
    }

    if profile.matching == Matching::Broad {
        if let Some((v, _)) = candidates.iter().find(|(v, _)| looks_like(*v, target)) {
            tracing::debug!(variant = ?target, "no preferred tag matched, using look-alike voice");
            return Some(*v);
        }
    }

    None
}

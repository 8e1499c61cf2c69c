// Per-variant voice preferences.
use super::{VoiceMeta, markers};

/// Spoken variety the user can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Cantonese,
    Mandarin,
}

/// How hard the resolver works to keep the rival variety out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matching {
    /// Drop rival-looking voices and keep only target-looking ones before
    /// consulting the preferred tags. No look-alike fallback.
    Strict,
    /// Preferred tags only, then any target-looking voice as a last resort.
    Broad,
}

#[derive(Debug)]
pub struct VariantProfile {
    pub variant: Variant,
    pub label: &'static str,
    /// Most to least preferred. Never empty.
    pub preferred_tags: &'static [&'static str],
    pub excluded_tag_prefixes: &'static [&'static str],
    pub matching: Matching,
    /// Lowercase tag prefixes of a voice that is not a stand-in.
    pub canonical_prefixes: &'static [&'static str],
    /// Language put on the utterance instead of the voice's own tag. Some
    /// engines pick the reading from the utterance language, not the voice.
    pub utterance_lang: Option<&'static str>,
}

pub static CANTONESE: VariantProfile = VariantProfile {
    variant: Variant::Cantonese,
    label: "廣東話",
    preferred_tags: &["yue-HK", "yue", "zh-HK", "zh-TW", "zh-CN", "zh"],
    excluded_tag_prefixes: &[],
    matching: Matching::Broad,
    canonical_prefixes: &["yue"],
    utterance_lang: None,
};

pub static MANDARIN: VariantProfile = VariantProfile {
    variant: Variant::Mandarin,
    label: "普通話",
    // zh-HK / bare zh would too often land on a Cantonese voice.
    preferred_tags: &["zh-CN", "cmn-Hans-CN", "cmn"],
    excluded_tag_prefixes: &["yue"],
    matching: Matching::Strict,
    canonical_prefixes: &["zh-cn", "cmn"],
    utterance_lang: Some("zh-CN"),
};

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Cantonese, Variant::Mandarin];

    pub fn profile(self) -> &'static VariantProfile {
        match self {
            Variant::Cantonese => &CANTONESE,
            Variant::Mandarin => &MANDARIN,
        }
    }

    /// Accepts the names used by the page's buttons.
    pub fn from_name(name: &str) -> Option<Variant> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cantonese" | "yue" => Some(Variant::Cantonese),
            "mandarin" | "cmn" | "putonghua" => Some(Variant::Mandarin),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        self.profile().label
    }
}

impl VariantProfile {
    /// Resolve with the crate's own look-alike predicates.
    pub fn resolve<'v, V: VoiceMeta>(&self, voices: &'v [V]) -> Option<&'v V> {
        super::resolve(voices, self, markers::is_mandarin_like::<V>, markers::is_cantonese_like::<V>)
    }

    /// True when a voice with `lang` is only a stand-in for this variant.
    pub fn is_degraded(&self, lang: &str) -> bool {
        let lang = lang.to_lowercase();
        !self.canonical_prefixes.iter().any(|p| lang.starts_with(p))
    }

    pub(crate) fn is_excluded(&self, lang_lower: &str) -> bool {
        self.excluded_tag_prefixes
            .iter()
            .any(|p| lang_lower.starts_with(&p.to_lowercase()))
    }
}

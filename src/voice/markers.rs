// Look-alike predicates for platform voices.
//
// Platforms disagree on how they tag Chinese voices: Cantonese voices often
// ship as `zh-HK`, and the macro-language tag `zh` is used for both varieties.
// These checks combine the language tag with keywords found in the display
// name and voice URI. They are heuristics; an oddly named voice can slip
// through either way.

use super::VoiceMeta;

const CANTONESE_MARKERS: &[&str] = &["canton", "yue", "粵", "粤"];
const MANDARIN_MARKERS: &[&str] = &["mandarin", "putonghua", "guoyu", "普通話", "国语"];

/// Lowercased `"{name} {uri}"`, the text the keyword checks run against.
pub fn text_marker<V: VoiceMeta + ?Sized>(voice: &V) -> String {
    format!("{} {}", voice.display_name(), voice.resource_id()).to_lowercase()
}

pub fn is_cantonese_like<V: VoiceMeta + ?Sized>(voice: &V) -> bool {
    let lang = voice.language_tag().to_lowercase();
    if lang.starts_with("yue") {
        return true;
    }
    let marker = text_marker(voice);
    CANTONESE_MARKERS.iter().any(|m| marker.contains(m))
}

pub fn is_mandarin_like<V: VoiceMeta + ?Sized>(voice: &V) -> bool {
    let lang = voice.language_tag().to_lowercase();
    if lang == "zh-cn" || lang.starts_with("cmn") {
        return true;
    }
    let marker = text_marker(voice);
    MANDARIN_MARKERS.iter().any(|m| marker.contains(m))
}

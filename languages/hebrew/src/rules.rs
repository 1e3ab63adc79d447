use milon_translator::MarkupRules;

const ENGLISH_LABEL: &str = "אנגלית";
/// he.wiktionary writes translations as `{{ת|אנגלית|<gloss>}}`
const TRANSLATION_TEMPLATE: &str = "ת";
const MASCULINE: &str = "זכר";
const FEMININE: &str = "נקבה";

/// Rules for Hebrew headwords with English glosses
pub fn hebrew_rules(gender_scan_lines: usize) -> MarkupRules {
    MarkupRules::new(ENGLISH_LABEL, TRANSLATION_TEMPLATE, ENGLISH_LABEL)
        .with_markers([MASCULINE, "masculine"], [FEMININE, "feminine"])
        .with_scan_lines(gender_scan_lines)
}

//! Heuristic gloss and gender extraction from dictionary markup.
//!
//! Markup is loosely structured, so instead of parsing it the engine runs a
//! short ordered list of named rules and keeps the first hit per signal:
//!
//! 1. gender markers, searched only in the first few lines,
//! 2. a labelled bullet line `* <label>: <gloss>`,
//! 3. an inline template `{{<name>|<lang>|<gloss>}}`, tried when the bullet
//!    is missing or captured the raw template,
//! 4. one unwrap pass peeling a template still left in the gloss. A gloss
//!    that keeps its wrapper after that is dropped.

use std::fmt;

use milon_types::{Gender, TranslationResult};
use regex::Regex;

fn default_masculine_markers() -> Vec<String> {
    vec!["masculine".to_string()]
}

fn default_feminine_markers() -> Vec<String> {
    vec!["feminine".to_string()]
}

/// Language-specific tokens the rules look for
#[derive(Debug, Clone)]
pub struct MarkupRules {
    /// Gender markers further down usually belong to inflection tables
    pub gender_scan_lines: usize,
    pub masculine_markers: Vec<String>,
    pub feminine_markers: Vec<String>,
    /// Label in `* <label>: <gloss>` lines
    pub gloss_label: String,
    /// Name and language argument of `{{<name>|<lang>|<gloss>}}`
    pub template_name: String,
    pub template_lang: String,
}

impl MarkupRules {
    pub fn new(
        gloss_label: impl Into<String>,
        template_name: impl Into<String>,
        template_lang: impl Into<String>,
    ) -> Self {
        Self {
            gender_scan_lines: 10,
            masculine_markers: default_masculine_markers(),
            feminine_markers: default_feminine_markers(),
            gloss_label: gloss_label.into(),
            template_name: template_name.into(),
            template_lang: template_lang.into(),
        }
    }

    pub fn with_markers<M, F>(mut self, masculine: M, feminine: F) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        self.masculine_markers = masculine.into_iter().map(Into::into).collect();
        self.feminine_markers = feminine.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scan_lines(mut self, lines: usize) -> Self {
        self.gender_scan_lines = lines;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    MasculineMarker,
    FeminineMarker,
    LabelledBullet,
    InlineTemplate,
    TemplateUnwrap,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::MasculineMarker => "masculine_marker",
            Rule::FeminineMarker => "feminine_marker",
            Rule::LabelledBullet => "labelled_bullet",
            Rule::InlineTemplate => "inline_template",
            Rule::TemplateUnwrap => "template_unwrap",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: Rule,
    /// Marker token for gender rules, extracted text for gloss rules
    pub value: String,
}

/// Result plus the rules that fired, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub result: TranslationResult,
    pub matched: Vec<RuleMatch>,
}

impl Inference {
    pub fn fired(&self, rule: Rule) -> bool {
        self.matched.iter().any(|m| m.rule == rule)
    }
}

pub struct InferenceEngine {
    rules: MarkupRules,
    labelled_bullet: Regex,
    inline_template: Regex,
    template_opening: String,
}

impl InferenceEngine {
    pub fn new(rules: MarkupRules) -> Result<Self, regex::Error> {
        let labelled_bullet = Regex::new(&format!(
            r"\*[ \t]*{}:[ \t]*(\S[^\n]*)",
            regex::escape(&rules.gloss_label)
        ))?;
        let inline_template = Regex::new(&format!(
            r"\{{\{{{}\|{}\|\s*([^}}|\s][^}}|]*)",
            regex::escape(&rules.template_name),
            regex::escape(&rules.template_lang)
        ))?;
        let template_opening = format!("{{{{{}|{}|", rules.template_name, rules.template_lang);

        Ok(Self {
            rules,
            labelled_bullet,
            inline_template,
            template_opening,
        })
    }

    /// Best-effort guess, absence of a signal is an absent field
    pub fn infer(&self, source_word: &str, markup: &str) -> TranslationResult {
        self.infer_traced(source_word, markup).result
    }

    pub fn infer_traced(&self, source_word: &str, markup: &str) -> Inference {
        let span = tracing::debug_span!("infer", word = %source_word);
        let _guard = span.enter();
        tracing::debug!("Raw markup length: {}", markup.len());

        let mut matched = Vec::new();

        let gender = self.detect_gender(markup, &mut matched);

        let mut gloss = self.labelled_bullet(markup);
        if let Some(value) = &gloss {
            record(&mut matched, Rule::LabelledBullet, value);
        }

        if gloss.as_deref().is_none_or(|g| self.has_template(g)) {
            if let Some(value) = self.inline_template(markup) {
                record(&mut matched, Rule::InlineTemplate, &value);
                gloss = Some(value);
            }
        }

        if let Some(current) = gloss.as_deref().filter(|g| self.has_template(g)) {
            if let Some(inner) = self.inline_template(current) {
                record(&mut matched, Rule::TemplateUnwrap, &inner);
                gloss = Some(inner);
            }
        }

        if gloss.as_deref().is_some_and(|g| self.has_template(g)) {
            tracing::debug!("gloss still wrapped, dropping it");
            gloss = None;
        }

        if gloss.is_none() && gender.is_none() {
            tracing::debug!("no rule matched");
        }

        Inference {
            result: TranslationResult { gloss, gender },
            matched,
        }
    }

    fn detect_gender(&self, markup: &str, matched: &mut Vec<RuleMatch>) -> Option<Gender> {
        let prefix: Vec<&str> = markup.lines().take(self.rules.gender_scan_lines).collect();
        let find = |markers: &[String]| {
            markers
                .iter()
                .find(|marker| prefix.iter().any(|line| line.contains(marker.as_str())))
                .cloned()
        };

        if let Some(marker) = find(&self.rules.masculine_markers) {
            record(matched, Rule::MasculineMarker, &marker);
            return Some(Gender::Masculine);
        }
        if let Some(marker) = find(&self.rules.feminine_markers) {
            record(matched, Rule::FeminineMarker, &marker);
            return Some(Gender::Feminine);
        }

        None
    }

    fn labelled_bullet(&self, markup: &str) -> Option<String> {
        let captures = self.labelled_bullet.captures(markup)?;
        non_empty(captures.get(1)?.as_str())
    }

    fn inline_template(&self, text: &str) -> Option<String> {
        let captures = self.inline_template.captures(text)?;
        non_empty(captures.get(1)?.as_str())
    }

    fn has_template(&self, text: &str) -> bool {
        text.contains(&self.template_opening)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn record(matched: &mut Vec<RuleMatch>, rule: Rule, value: &str) {
    tracing::debug!(rule = rule.name(), value, "rule matched");
    matched.push(RuleMatch {
        rule,
        value: value.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> InferenceEngine {
        InferenceEngine::new(MarkupRules::new("English", "translation-tag", "en")).unwrap()
    }

    fn filler(lines: usize) -> String {
        (0..lines).map(|i| format!("line {i}\n")).collect()
    }

    #[test]
    fn test_no_marker_means_no_gender() {
        let result = engine().infer("x", "noun\n* English: bread\n");
        assert_eq!(result.gender, None);
    }

    #[test]
    fn test_masculine_in_prefix() {
        let markup = format!("{}masculine\n{}feminine\n", filler(3), filler(20));
        let inference = engine().infer_traced("x", &markup);

        assert_eq!(inference.result.gender, Some(Gender::Masculine));
        assert!(inference.fired(Rule::MasculineMarker));
        assert!(!inference.fired(Rule::FeminineMarker));
    }

    #[test]
    fn test_masculine_wins_over_feminine_in_prefix() {
        let markup = "feminine form exists\nmasculine noun\n";
        assert_eq!(engine().infer("x", markup).gender, Some(Gender::Masculine));
    }

    #[test]
    fn test_feminine_in_prefix() {
        let markup = "{{noun|feminine}}\n* English: city\n";
        assert_eq!(engine().infer("x", markup).gender, Some(Gender::Feminine));
    }

    #[test]
    fn test_markers_past_scan_window_are_ignored() {
        // tenth line is the last one scanned
        let inside = format!("{}feminine\n", filler(9));
        assert_eq!(engine().infer("x", &inside).gender, Some(Gender::Feminine));

        let outside = format!("{}masculine\n", filler(10));
        assert_eq!(engine().infer("x", &outside).gender, None);
    }

    #[test]
    fn test_scan_window_is_configurable() {
        let engine = InferenceEngine::new(
            MarkupRules::new("English", "translation-tag", "en").with_scan_lines(2),
        )
        .unwrap();
        let markup = "a\nb\nmasculine\n";
        assert_eq!(engine.infer("x", markup).gender, None);
    }

    #[test]
    fn test_labelled_bullet() {
        let inference = engine().infer_traced("x", "* English: hummus");
        assert_eq!(inference.result.gloss.as_deref(), Some("hummus"));
        assert_eq!(
            inference.matched,
            vec![RuleMatch {
                rule: Rule::LabelledBullet,
                value: "hummus".to_string()
            }]
        );
    }

    #[test]
    fn test_labelled_bullet_takes_first_line_only() {
        let markup = "intro\n*English:   apple  \n* English: pear\n";
        assert_eq!(engine().infer("x", markup).gloss.as_deref(), Some("apple"));
    }

    #[test]
    fn test_inline_template_fallback() {
        let inference = engine().infer_traced("x", "{{translation-tag|en|hummus}}");
        assert_eq!(inference.result.gloss.as_deref(), Some("hummus"));
        assert!(inference.fired(Rule::InlineTemplate));
        assert!(!inference.fired(Rule::LabelledBullet));
    }

    #[test]
    fn test_template_value_stops_at_delimiter() {
        let markup = "{{translation-tag|en| chickpea paste |alt=x}}";
        assert_eq!(
            engine().infer("x", markup).gloss.as_deref(),
            Some("chickpea paste")
        );
    }

    #[test]
    fn test_bullet_holding_raw_template_falls_back() {
        let markup = "* English: {{translation-tag|en|hummus}}\n";
        let inference = engine().infer_traced("x", markup);

        assert_eq!(inference.result.gloss.as_deref(), Some("hummus"));
        let rules: Vec<Rule> = inference.matched.iter().map(|m| m.rule).collect();
        assert_eq!(rules, vec![Rule::LabelledBullet, Rule::InlineTemplate]);
    }

    #[test]
    fn test_unwrap_extracts_inner_payload() {
        let engine = engine();
        let wrapped = "{{translation-tag|en|hummus}}, lit. chickpeas";

        assert!(engine.has_template(wrapped));
        assert_eq!(engine.inline_template(wrapped).as_deref(), Some("hummus"));
        assert!(!engine.has_template("hummus"));
    }

    #[test]
    fn test_empty_template_never_leaks_into_gloss() {
        let inference = engine().infer_traced("x", "* English: {{translation-tag|en| }}\n");

        assert_eq!(inference.result.gloss, None);
        let rules: Vec<Rule> = inference.matched.iter().map(|m| m.rule).collect();
        assert_eq!(rules, vec![Rule::LabelledBullet]);
    }

    #[test]
    fn test_blank_bullet_falls_through_to_next_one() {
        let markup = "* English: \n* English: bread\n";
        assert_eq!(engine().infer("x", markup).gloss.as_deref(), Some("bread"));
    }

    #[test]
    fn test_blank_template_falls_through_to_next_one() {
        let markup = "{{translation-tag|en| }}\n{{translation-tag|en|bread}}\n";
        assert_eq!(engine().infer("x", markup).gloss.as_deref(), Some("bread"));
    }

    #[test]
    fn test_nothing_matches() {
        let inference = engine().infer_traced("x", "==Etymology==\nfrom Aramaic\n");
        assert_eq!(inference.result, TranslationResult::default());
        assert!(inference.matched.is_empty());
    }

    #[test]
    fn test_empty_markup() {
        assert!(engine().infer("x", "").is_empty());
    }

    #[test]
    fn test_label_with_regex_metacharacters() {
        let engine = InferenceEngine::new(MarkupRules::new("en (US)", "t+", "en.")).unwrap();
        assert_eq!(
            engine.infer("x", "* en (US): color").gloss.as_deref(),
            Some("color")
        );
        assert_eq!(
            engine.infer("x", "{{t+|en.|colour}}").gloss.as_deref(),
            Some("colour")
        );
    }
}

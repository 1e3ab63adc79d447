pub mod rules;
pub mod wiktionary;

pub use rules::hebrew_rules;
pub use wiktionary::HebrewWiktionary;

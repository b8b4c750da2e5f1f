use once_cell::sync::Lazy;
use syntect::parsing::{SyntaxReference, SyntaxSet};

pub static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(Syntaxes::load);

pub struct Syntaxes;

impl Syntaxes {
    fn load() -> SyntaxSet {
        SyntaxSet::load_defaults_newlines()
    }

    /// Find the syntax for a fence info string such as `rs`, `Rust` or
    /// `python`. Unknown languages are plain text.
    pub fn get(name: &str) -> &'static SyntaxReference {
        let name = name.trim();
        if name.is_empty() {
            return SYNTAX_SET.find_syntax_plain_text();
        }

        if let Some(syntax) = SYNTAX_SET.find_syntax_by_extension(name) {
            return syntax;
        }

        if let Some(syntax) = SYNTAX_SET.find_syntax_by_name(name) {
            return syntax;
        }

        if let Some(syntax) = SYNTAX_SET.find_syntax_by_token(name) {
            return syntax;
        }

        SYNTAX_SET.find_syntax_plain_text()
    }
}

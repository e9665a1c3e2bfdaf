use tracing::{debug, warn};

use crate::config::Config;
use crate::engine::transliterate;
use crate::error::Result;
use crate::modes::{InputMethod, RuleTable};
use crate::text::{byte_offset, last_word, looks_like_code, token_before};

/// Plain-text editing surface: a value and a caret, both in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    caret: usize,
}

impl TextField {
    /// Caret at the end.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let caret = value.chars().count();
        Self { value, caret }
    }

    pub fn with_caret(value: impl Into<String>, caret: usize) -> Self {
        let value = value.into();
        let caret = caret.min(value.chars().count());
        Self { value, caret }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn insert(&mut self, ch: char) {
        let at = byte_offset(&self.value, self.caret);
        self.value.insert(at, ch);
        self.caret += 1;
    }

    /// Replaces chars `start..end` and puts the caret after the new text.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        let len = self.value.chars().count();
        let end = end.min(len);
        let start = start.min(end);
        let (from, to) = (byte_offset(&self.value, start), byte_offset(&self.value, end));
        self.value.replace_range(from..to, text);
        self.caret = start + text.chars().count();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositionState {
    #[default]
    Idle,
    /// An OS-level IME owns the keystrokes.
    Composing,
}

/// Drives the engine from input events on a [`TextField`].
#[derive(Debug, Clone, Default)]
pub struct InputSession {
    config: Config,
    state: CompositionState,
}

impl InputSession {
    pub fn new(config: Config) -> Self {
        Self { config, state: CompositionState::Idle }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    pub fn toggle(&mut self) {
        self.config.enabled = !self.config.enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn input_method(&self) -> InputMethod {
        self.config.input_method
    }

    pub fn set_input_method(&mut self, method: InputMethod) {
        self.config.input_method = method;
    }

    /// Unknown names are rejected and the current method is kept.
    pub fn set_input_method_str(&mut self, name: &str) -> Result<()> {
        match name.parse() {
            Ok(method) => {
                self.set_input_method(method);
                Ok(())
            }
            Err(err) => {
                warn!(name, current = %self.config.input_method, "ignoring input method");
                Err(err)
            }
        }
    }

    pub fn rules(&self) -> &'static RuleTable {
        self.config.input_method.rules()
    }

    pub fn state(&self) -> CompositionState {
        self.state
    }

    pub fn composition_start(&mut self) {
        self.state = CompositionState::Composing;
    }

    pub fn composition_end(&mut self) {
        self.state = CompositionState::Idle;
    }

    fn is_boundary(&self, c: char) -> bool {
        // VIQR types tones with '.' and '?'.
        self.config.boundaries.contains(c) && !self.rules().is_trigger(c)
    }

    /// Rewrites the word before the caret. Returns whether the field changed.
    pub fn handle_input(&self, field: &mut TextField) -> bool {
        if !self.config.enabled || self.state == CompositionState::Composing {
            return false;
        }

        let caret = field.caret();
        let (start, word) = last_word(field.value(), caret, |c| self.is_boundary(c));
        if word.chars().count() < self.config.min_fragment_len {
            return false;
        }
        if self.config.skip_code_like && looks_like_code(token_before(field.value(), caret)) {
            return false;
        }

        let out = transliterate(word, self.rules());
        if out == word {
            return false;
        }
        debug!(method = %self.config.input_method, from = word, to = %out, "replace");
        field.replace_range(start, caret, &out);
        true
    }

    /// Types `key` at the caret, then handles the input event.
    pub fn feed(&self, field: &mut TextField, key: char) -> bool {
        field.insert(key);
        self.handle_input(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn type_seq(session: &InputSession, seq: &str) -> String {
        let mut field = TextField::default();
        for c in seq.chars() {
            session.feed(&mut field, c);
        }
        field.value().to_string()
    }

    fn telex() -> InputSession {
        InputSession::new(Config::default())
    }

    #[test]
    fn text_field_editing() {
        let mut f = TextField::new("Xin chao cac ban");
        assert_eq!(f.caret(), 16);
        f.replace_range(8, 11, "bạn");
        assert_eq!(f.value(), "Xin chaobạnc ban");
        assert_eq!(f.caret(), 11);

        let mut f = TextField::with_caret("Xin chao cac ban", 0);
        f.replace_range(0, 0, "Chào ");
        assert_eq!(f.value(), "Chào Xin chao cac ban");
        assert_eq!(f.caret(), 5);

        let mut f = TextField::with_caret("hello world", 11);
        f.replace_range(6, 11, "everyone");
        assert_eq!(f.value(), "hello everyone");
        assert_eq!(f.caret(), 14);

        let mut f = TextField::with_caret("ạc", 1);
        f.insert('b');
        assert_eq!(f.value(), "ạbc");
        assert_eq!(f.caret(), 2);
    }

    #[test]
    fn toggle_enable_disable() {
        let mut s = InputSession::new(Config { enabled: false, ..Config::default() });
        assert!(!s.is_enabled());
        s.enable();
        assert!(s.is_enabled());
        s.disable();
        assert!(!s.is_enabled());
        s.toggle();
        assert!(s.is_enabled());
    }

    #[test]
    fn input_method_selection() {
        let mut s = InputSession::new(Config { input_method: InputMethod::Vni, ..Config::default() });
        assert_eq!(s.input_method(), InputMethod::Vni);
        s.set_input_method(InputMethod::Telex);
        assert_eq!(s.input_method(), InputMethod::Telex);
        s.set_input_method_str("viqr").unwrap();
        assert_eq!(s.input_method(), InputMethod::Viqr);
        assert!(matches!(s.set_input_method_str("invalid"), Err(Error::UnknownInputMethod(_))));
        assert_eq!(s.input_method(), InputMethod::Viqr);
        assert_eq!(s.rules().method, InputMethod::Viqr);
    }

    #[test]
    fn composition_state_machine() {
        let mut s = telex();
        assert_eq!(s.state(), CompositionState::Idle);
        s.composition_start();
        assert_eq!(s.state(), CompositionState::Composing);
        s.composition_end();
        assert_eq!(s.state(), CompositionState::Idle);
    }

    #[test]
    fn skips_when_disabled_or_composing() {
        let mut s = telex();
        s.disable();
        let mut f = TextField::new("baas");
        assert!(!s.handle_input(&mut f));
        assert_eq!(f.value(), "baas");

        s.enable();
        s.composition_start();
        assert!(!s.handle_input(&mut f));
        assert_eq!(f.value(), "baas");

        s.composition_end();
        assert!(s.handle_input(&mut f));
        assert_eq!(f.value(), "baá");
    }

    #[test]
    fn skips_short_fragments() {
        let mut f = TextField::new("a");
        assert!(!telex().handle_input(&mut f));
        assert_eq!(f.value(), "a");
    }

    #[test]
    fn replaces_last_word_only() {
        let s = telex();
        let mut f = TextField::new("baaa");
        assert!(s.handle_input(&mut f));
        assert_eq!(f.value(), "baâ");
        assert_eq!(f.caret(), 3);

        let mut f = TextField::new("toi ddi hocj");
        assert!(s.handle_input(&mut f));
        assert_eq!(f.value(), "toi ddi học");

        let mut f = TextField::with_caret("viet nam", 4);
        assert!(!s.handle_input(&mut f));

        let mut f = TextField::with_caret("vieetj nam", 6);
        assert!(s.handle_input(&mut f));
        assert_eq!(f.value(), "vieẹt nam");
        assert_eq!(f.caret(), 5);
    }

    #[test]
    fn live_typing_telex() {
        let s = telex();
        assert_eq!(type_seq(&s, "Tieengs Vieetj"), "Tiếng Việt");
        assert_eq!(type_seq(&s, "xin chaof"), "xin chào");
        assert_eq!(type_seq(&s, "dduwowngf"), "đường");
        assert_eq!(type_seq(&s, "trangs"), "tráng");
        assert_eq!(type_seq(&s, "tuowngr"), "tưởng");
        assert_eq!(type_seq(&s, "bangr toongr"), "bảng tổng");
    }

    #[test]
    fn live_typing_vni() {
        let s = InputSession::new(Config { input_method: InputMethod::Vni, ..Config::default() });
        assert_eq!(type_seq(&s, "Tie6ng1 Vie6t5"), "Tiếng Việt");
        assert_eq!(type_seq(&s, "d9u7o7ng2"), "đường");
    }

    #[test]
    fn viqr_tone_keys_are_not_boundaries() {
        let s = InputSession::new(Config { input_method: InputMethod::Viqr, ..Config::default() });
        assert_eq!(type_seq(&s, "vie^t."), "việt");
        assert_eq!(type_seq(&s, "ho?i"), "hỏi");
    }

    #[test]
    fn code_like_tokens_can_be_skipped() {
        let s = InputSession::new(Config { skip_code_like: true, ..Config::default() });
        let mut f = TextField::new("my_vaan");
        assert!(!s.handle_input(&mut f));
        assert_eq!(f.value(), "my_vaan");

        let mut f = TextField::new("vaan");
        assert!(s.handle_input(&mut f));
        assert_eq!(f.value(), "vân");
    }
}

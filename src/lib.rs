//! Vietnamese transliteration for live text input.
//!
//! [`transliterate`] rewrites the word being typed with the rules of one input
//! method (Telex, VNI or VIQR). [`InputSession`] wires it to a [`TextField`]
//! the way an editor would on every keystroke.
//!
//! ```
//! use vikey::{transliterate, InputMethod};
//!
//! let telex = InputMethod::Telex.rules();
//! assert_eq!(transliterate("aa", telex), "â");
//! assert_eq!(transliterate("as", telex), "á");
//! assert_eq!(transliterate("huowng", telex), "hương");
//! ```

mod config;
mod engine;
mod error;
mod modes;
mod session;
pub mod text;
pub mod tone;

pub use config::{Config, DEFAULT_BOUNDARIES};
pub use engine::transliterate;
pub use error::{Error, Result};
pub use modes::{InputMethod, MarkRule, RuleTable, ToneRule, rules_for};
pub use session::{CompositionState, InputSession, TextField};
pub use tone::{apply_tone, vowel_positions};

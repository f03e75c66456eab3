pub mod interface;
pub mod client;

pub use interface::{TranslateError, TranslationRequest, TranslationResult, Translator};
pub use client::GoogleTranslateClient;

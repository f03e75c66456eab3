use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Fraction of word characters that must be CJK for text to count as Chinese
const CHINESE_RATIO_THRESHOLD: f64 = 0.3;

/// Any CJK ideograph, including the extension blocks and compatibility ideographs
static CJK_ANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\x{4E00}-\x{9FFF}\x{3400}-\x{4DBF}\x{20000}-\x{2A6DF}\x{2A700}-\x{2B73F}\x{2B740}-\x{2B81F}\x{2B820}-\x{2CEAF}\x{F900}-\x{FAFF}\x{2F800}-\x{2FA1F}]",
    )
    .expect("CJK range pattern is valid")
});

/// CJK Unified Ideographs block only
static CJK_UNIFIED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{4E00}-\x{9FFF}]").expect("CJK block pattern is valid"));

static WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w").expect("word pattern is valid"));

/// Languages the bot translates between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    ZhCn,
    En,
}

impl Lang {
    /// Language tag understood by the translation endpoint
    pub fn code(self) -> &'static str {
        match self {
            Lang::ZhCn => "zh-CN",
            Lang::En => "en",
        }
    }

    pub fn counterpart(self) -> Lang {
        match self {
            Lang::ZhCn => Lang::En,
            Lang::En => Lang::ZhCn,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Source and target language for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub source: Lang,
    pub target: Lang,
}

impl Direction {
    /// Chinese-majority text goes to English, everything else goes to Chinese.
    pub fn detect(text: &str) -> Self {
        let source = if is_mostly_chinese(text) {
            Lang::ZhCn
        } else {
            Lang::En
        };
        Self {
            source,
            target: source.counterpart(),
        }
    }
}

/// Detect whether text contains any CJK ideograph
pub fn contains_chinese(text: &str) -> bool {
    CJK_ANY.is_match(text)
}

/// Decide whether text is mostly Chinese
///
/// Counts ideographs from the unified CJK block against all Unicode word
/// characters. Text with no word characters at all falls back to
/// [`contains_chinese`].
pub fn is_mostly_chinese(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }

    let chinese_chars = CJK_UNIFIED.find_iter(text).count();
    let total_chars = WORD_CHAR.find_iter(text).count();

    if total_chars == 0 {
        return contains_chinese(text);
    }

    chinese_chars as f64 / total_chars as f64 > CHINESE_RATIO_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_chinese_is_mostly_chinese() {
        assert!(is_mostly_chinese("你好世界"));
        assert!(is_mostly_chinese("今天天气很好，我们去公园吧。"));
    }

    #[test]
    fn english_is_not_mostly_chinese() {
        assert!(!is_mostly_chinese("hello world"));
        assert!(!is_mostly_chinese("The quick brown fox jumps over 13 lazy dogs"));
    }

    #[test]
    fn blank_text_is_not_mostly_chinese() {
        assert!(!is_mostly_chinese(""));
        assert!(!is_mostly_chinese("   "));
        assert!(!is_mostly_chinese("\n\t  \n"));
    }

    #[test]
    fn mixed_text_uses_ratio() {
        // 2 of 6 word characters
        assert!(is_mostly_chinese("我爱rust"));
        // 1 of 20 word characters
        assert!(!is_mostly_chinese("我 love rust programming"));
    }

    #[test]
    fn ratio_must_exceed_threshold() {
        // exactly 3 of 10
        assert!(!is_mostly_chinese("中中中aaaaaaa"));
        // 4 of 10
        assert!(is_mostly_chinese("中中中中aaaaaa"));
    }

    #[test]
    fn punctuation_only_has_no_chinese() {
        assert!(!is_mostly_chinese("！？。…"));
        assert!(!is_mostly_chinese("?!... 😀"));
    }

    #[test]
    fn contains_chinese_covers_extension_blocks() {
        assert!(contains_chinese("abc 中 def"));
        assert!(contains_chinese("\u{3400}"));
        assert!(contains_chinese("\u{20000}"));
        assert!(contains_chinese("\u{F900}"));
        assert!(!contains_chinese("hello"));
        assert!(!contains_chinese("こんにちは"));
    }

    #[test]
    fn direction_follows_classification() {
        assert_eq!(
            Direction::detect("你好世界"),
            Direction {
                source: Lang::ZhCn,
                target: Lang::En
            }
        );
        assert_eq!(
            Direction::detect("hello world"),
            Direction {
                source: Lang::En,
                target: Lang::ZhCn
            }
        );
        // anything that is not Chinese is treated as English
        assert_eq!(Direction::detect("こんにちは").source, Lang::En);
    }

    #[test]
    fn lang_codes_match_endpoint_tags() {
        assert_eq!(Lang::ZhCn.code(), "zh-CN");
        assert_eq!(Lang::En.to_string(), "en");
    }
}

//! TEI manuscript descriptions
//!
//! The only fact read from a TEI document is its primary language, declared as
//! `<textLang mainLang="...">`. [`TeiDocument::parse`] walks the whole
//! document; [`scan_main_lang`] is a regex shortcut over raw text, used on a
//! truncated read.

use std::sync::OnceLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use crate::constants::tei;
use crate::errors::TeiResult;

/// Parsed view of a TEI document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeiDocument {
    main_lang: Option<String>,
    text_lang_count: usize,
}

impl TeiDocument {
    /// Parses a TEI document
    ///
    /// The whole document is read so that malformed XML anywhere in it is
    /// reported.
    pub fn parse(xml: &str) -> TeiResult<Self> {
        let mut reader = Reader::from_str(xml);
        let mut document = Self::default();

        loop {
            match reader.read_event()? {
                Event::Start(ref e) | Event::Empty(ref e) => document.visit(e)?,
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(document)
    }

    fn visit(&mut self, element: &BytesStart<'_>) -> TeiResult<()> {
        if element.local_name().as_ref() != tei::TEXT_LANG_ELEMENT.as_bytes() {
            return Ok(());
        }
        self.text_lang_count += 1;
        if self.main_lang.is_some() {
            return Ok(());
        }
        for attr in element.attributes() {
            let attr = attr?;
            if attr.key.local_name().as_ref() == tei::MAIN_LANG_ATTRIBUTE.as_bytes() {
                let value = attr.unescape_value()?;
                // A blank declaration does not count; keep looking
                if !value.trim().is_empty() {
                    self.main_lang = Some(value.into_owned());
                }
                break;
            }
        }
        Ok(())
    }

    /// `mainLang` of the first `textLang` element carrying a non-blank one, as written
    pub fn main_lang(&self) -> Option<&str> {
        self.main_lang.as_deref()
    }

    /// Number of `textLang` elements seen, with or without `mainLang`
    pub fn text_lang_count(&self) -> usize {
        self.text_lang_count
    }
}

fn main_lang_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#"mainLang="([^"]+)""#).expect("mainLang pattern is valid"))
}

/// Finds the first non-blank `mainLang="..."` attribute in raw text, trimmed
///
/// ```
/// use openn_resolver::app::tei::scan_main_lang;
///
/// assert_eq!(scan_main_lang(r#"<textLang mainLang=" lat ">Latin</textLang>"#), Some("lat"));
/// assert_eq!(scan_main_lang("<textLang>Latin</textLang>"), None);
/// ```
pub fn scan_main_lang(text: &str) -> Option<&str> {
    main_lang_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|lang| !lang.is_empty())
}

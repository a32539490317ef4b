//! Mapping of content paths onto the supported locale set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Locales the site is authored in.
///
/// The set is closed: every content path maps to exactly one of these, with
/// [`Locale::EnUs`] acting as the default when no locale segment is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
  /// English (United States), the default locale.
  #[default]
  #[serde(rename = "en-us")]
  EnUs,
  /// Greek.
  #[serde(rename = "el")]
  El,
  /// Turkish.
  #[serde(rename = "tr")]
  Tr,
}

/// Error returned when parsing a string that is not a supported locale tag.
#[derive(Debug, Error)]
#[error("unrecognized locale tag '{0}'")]
pub struct UnknownLocale(String);

impl Locale {
  /// Every supported locale, in display order.
  pub const ALL: [Locale; 3] = [Locale::EnUs, Locale::El, Locale::Tr];

  /// Canonical tag used in URLs and for date/number formatting.
  pub fn tag(self) -> &'static str {
    match self {
      Locale::EnUs => "en-us",
      Locale::El => "el",
      Locale::Tr => "tr",
    }
  }

  /// Flag glyph shown by the language selector.
  pub fn flag(self) -> &'static str {
    match self {
      Locale::EnUs => "\u{1F1FA}\u{1F1F8}",
      Locale::El => "\u{1F1EC}\u{1F1F7}",
      Locale::Tr => "\u{1F1F9}\u{1F1F7}",
    }
  }

  /// Locale consulted when this one has no translation for a string.
  ///
  /// The default locale is the end of every fallback chain and has none.
  pub fn fallback(self) -> Option<Locale> {
    match self {
      Locale::EnUs => None,
      Locale::El | Locale::Tr => Some(Locale::EnUs),
    }
  }

  /// Recognize a single path segment as a locale token.
  pub fn from_token(token: &str) -> Option<Locale> {
    Locale::ALL
      .into_iter()
      .find(|locale| locale.tag() == token)
  }

  /// Resolve the locale for a slash-delimited content path.
  ///
  /// Segments are scanned in path order and the first recognized locale token
  /// wins, wherever it sits in the path; paths without a recognized token
  /// resolve to the default locale. Equivalent to
  /// [`Locale::resolve_path_or`] with [`Locale::default`].
  pub fn resolve_path(path: &str) -> Locale {
    Locale::resolve_path_or(path, Locale::default())
  }

  /// Resolve the locale for a content path with an explicit default.
  pub fn resolve_path_or(path: &str, default: Locale) -> Locale {
    path
      .split('/')
      .filter(|segment| !segment.is_empty())
      .find_map(Locale::from_token)
      .unwrap_or(default)
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

impl FromStr for Locale {
  type Err = UnknownLocale;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    Locale::from_token(value).ok_or_else(|| UnknownLocale(value.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn recognizes_every_supported_token() {
    for locale in Locale::ALL {
      assert_eq!(Locale::from_token(locale.tag()), Some(locale));
    }
    assert_eq!(Locale::from_token("de"), None);
    assert_eq!(Locale::from_token(""), None);
  }

  #[test]
  fn resolves_locale_segment_anywhere_in_path() {
    for locale in Locale::ALL {
      let path = format!("/blog/{}/posts/first", locale.tag());
      assert_eq!(Locale::resolve_path(&path), locale);
    }
  }

  #[test]
  fn resolves_complex_paths() {
    assert_eq!(Locale::resolve_path("/some/deep/path/el/post"), Locale::El);
  }

  #[test]
  fn falls_back_to_default_without_locale_segment() {
    assert_eq!(Locale::resolve_path("/about/index"), Locale::EnUs);
    assert_eq!(Locale::resolve_path(""), Locale::EnUs);
    assert_eq!(Locale::resolve_path("/"), Locale::EnUs);
  }

  #[test]
  fn first_token_wins_when_multiple_are_present() {
    assert_eq!(Locale::resolve_path("/el/tr/post"), Locale::El);
    assert_eq!(Locale::resolve_path("/tr/el/post"), Locale::Tr);
  }

  #[test]
  fn honours_explicit_default() {
    assert_eq!(
      Locale::resolve_path_or("/posts/first", Locale::Tr),
      Locale::Tr
    );
  }

  #[test]
  fn ignores_partial_segment_matches() {
    assert_eq!(Locale::resolve_path("/elastic/post"), Locale::EnUs);
    assert_eq!(Locale::resolve_path("/posts/travel"), Locale::EnUs);
  }

  #[test]
  fn non_default_locales_fall_back_to_the_default() {
    assert_eq!(Locale::El.fallback(), Some(Locale::EnUs));
    assert_eq!(Locale::Tr.fallback(), Some(Locale::EnUs));
    assert_eq!(Locale::EnUs.fallback(), None);
  }

  #[test]
  fn parses_and_displays_canonical_tags() {
    let locale: Locale = "el".parse().unwrap();
    assert_eq!(locale, Locale::El);
    assert_eq!(locale.to_string(), "el");
    assert!("en_US".parse::<Locale>().is_err());
  }
}

//! Translated UI strings consumed by the page layer.

use crate::locale::Locale;

/// Translation rows: lookup key, then one entry per locale in
/// [`Locale::ALL`] order. An empty entry means the locale has no translation
/// yet and the fallback chain applies.
const STRINGS: &[(&str, [&str; 3])] = &[
  ("home", ["Home", "Αρχική", "Ana Sayfa"]),
  ("posts", ["Posts", "Αναρτήσεις", "Yazılar"]),
  ("tags", ["Tags", "Ετικέτες", "Etiketler"]),
  ("about", ["About", "Σχετικά", "Hakkında"]),
  ("archive", ["Archive", "Αρχείο", "Arşiv"]),
  ("read-more", ["Read more", "Διαβάστε περισσότερα", "Devamını oku"]),
  ("published", ["Published", "Δημοσιεύτηκε", "Yayınlandı"]),
  (
    "skip-to-content",
    [
      "Skip to main content",
      "Μετάβαση στο κύριο περιεχόμενο",
      "Ana içeriğe atla",
    ],
  ),
];

fn column(locale: Locale) -> usize {
  Locale::ALL
    .iter()
    .position(|candidate| *candidate == locale)
    .unwrap_or(0)
}

/// Look up a translated UI string.
///
/// Missing translations walk the locale's fallback chain; unknown keys yield
/// `None` so callers can surface the raw key instead of crashing a build.
pub fn ui_string(locale: Locale, key: &str) -> Option<&'static str> {
  let (_, row) = STRINGS.iter().find(|(candidate, _)| *candidate == key)?;

  let mut current = Some(locale);
  while let Some(locale) = current {
    let value = row[column(locale)];
    if !value.is_empty() {
      return Some(value);
    }
    current = locale.fallback();
  }

  None
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn looks_up_translations_per_locale() {
    assert_eq!(ui_string(Locale::EnUs, "tags"), Some("Tags"));
    assert_eq!(ui_string(Locale::El, "tags"), Some("Ετικέτες"));
    assert_eq!(ui_string(Locale::Tr, "tags"), Some("Etiketler"));
  }

  #[test]
  fn unknown_keys_yield_nothing() {
    assert_eq!(ui_string(Locale::El, "not-a-key"), None);
  }

  #[test]
  fn every_key_is_translated_for_every_locale() {
    for (key, _) in STRINGS {
      for locale in Locale::ALL {
        assert!(
          ui_string(locale, key).is_some(),
          "missing translation for '{key}' in {locale}"
        );
      }
    }
  }
}

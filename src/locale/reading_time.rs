//! Reading-time phrase assembly.

use crate::locale::Locale;

/// Words-per-minute rate assumed when estimating reading time.
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimate whole minutes of reading time for a word count.
///
/// Always at least one minute so even the shortest page gets a phrase.
pub fn reading_minutes(word_count: usize, words_per_minute: usize) -> usize {
  word_count.div_ceil(words_per_minute.max(1)).max(1)
}

/// Compose the localized phrase for an already-computed minute count.
pub fn reading_time_phrase(minutes: usize, locale: Locale) -> String {
  match locale {
    Locale::EnUs => format!("{minutes} min read"),
    Locale::El => format!("{minutes} λεπτά ανάγνωσης"),
    Locale::Tr => format!("{minutes} dk okuma"),
  }
}

/// Compose the localized reading-time phrase for a word count at the default
/// [`WORDS_PER_MINUTE`] rate.
pub fn reading_time(word_count: usize, locale: Locale) -> String {
  reading_time_phrase(reading_minutes(word_count, WORDS_PER_MINUTE), locale)
}

//! Locale-aware date rendering for page metadata.

use chrono::{Datelike, NaiveDate};

use crate::locale::Locale;

const MONTHS_EN: [&str; 12] = [
  "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_EL: [&str; 12] = [
  "Ιαν", "Φεβ", "Μαρ", "Απρ", "Μαΐ", "Ιουν", "Ιουλ", "Αυγ", "Σεπ", "Οκτ", "Νοε", "Δεκ",
];

const MONTHS_TR: [&str; 12] = [
  "Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara",
];

/// Render a date as `25 Dec 2023` using the month abbreviations of the locale.
///
/// The day is never zero-padded; display only, the output is not parsed back.
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
  let months = match locale {
    Locale::EnUs => &MONTHS_EN,
    Locale::El => &MONTHS_EL,
    Locale::Tr => &MONTHS_TR,
  };

  format!(
    "{} {} {}",
    date.day(),
    months[date.month0() as usize],
    date.year()
  )
}

/// Render a date for a raw locale tag.
///
/// Unrecognized tags fall back to the default locale rendering rather than
/// raising an error, matching the behaviour of the rest of the formatting
/// layer.
pub fn readable_date(date: NaiveDate, locale_tag: &str) -> String {
  format_date(date, Locale::from_token(locale_tag).unwrap_or_default())
}

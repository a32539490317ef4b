//! Locale resolution and localized formatting for the content pipeline.
//!
//! The resolver maps content-relative paths onto the closed set of supported
//! locales; the sibling submodules cover the formatting concerns that consume
//! the resolved locale (dates, reading-time phrases, translated UI strings).
//! Everything here is pure and synchronous so the page-generation layer can
//! call it from any number of concurrent build tasks.

mod dates;
mod reading_time;
mod resolver;
mod strings;

pub use dates::{format_date, readable_date};
pub use reading_time::{reading_minutes, reading_time, reading_time_phrase, WORDS_PER_MINUTE};
pub use resolver::{Locale, UnknownLocale};
pub use strings::ui_string;

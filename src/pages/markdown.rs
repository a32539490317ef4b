//! Markdown parsing helpers used during page metadata assembly.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use gray_matter::{engine::YAML, Matter};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Deserialize;

use crate::manifest::should_ignore_precache_reference;

/// Optional frontmatter fields attached to authored pages.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PageFrontmatter {
  /// Page title rendered in listings and the document head.
  pub title: Option<String>,
  /// Optional summary rendered alongside the title.
  pub description: Option<String>,
  /// Publication date.
  pub date: Option<NaiveDate>,
  /// Tags attached to the page.
  pub tags: Vec<String>,
}

/// Parse a page markdown file, extracting frontmatter and the content body.
pub fn parse_page_markdown(path: &Path) -> Option<(PageFrontmatter, String)> {
  let content = fs::read_to_string(path).ok()?;
  Some(parse_page_source(&content))
}

/// Parse page source text, extracting frontmatter and the content body.
///
/// Malformed frontmatter never fails a build; it degrades to defaults with
/// the full source treated as the body.
pub fn parse_page_source(source: &str) -> (PageFrontmatter, String) {
  let matter = Matter::<YAML>::new();
  match matter.parse(source) {
    Ok(parsed) => {
      let frontmatter = parsed
        .data
        .and_then(|yaml| serde_yaml::from_value::<PageFrontmatter>(yaml).ok())
        .unwrap_or_default();
      (frontmatter, parsed.content)
    }
    Err(_) => (PageFrontmatter::default(), source.to_string()),
  }
}

fn markdown_options() -> Options {
  let mut options = Options::empty();
  options.insert(Options::ENABLE_TABLES);
  options.insert(Options::ENABLE_FOOTNOTES);
  options.insert(Options::ENABLE_STRIKETHROUGH);
  options.insert(Options::ENABLE_TASKLISTS);
  options.insert(Options::ENABLE_SMART_PUNCTUATION);
  options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
  options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
  options
}

/// Extract the text of the first heading in a markdown body.
pub fn extract_first_heading(body: &str) -> Option<String> {
  let parser = Parser::new_ext(body, markdown_options());
  let mut in_heading = false;
  let mut heading_text = String::new();

  for event in parser {
    match event {
      Event::Start(Tag::Heading { .. }) => {
        in_heading = true;
        heading_text.clear();
      }
      Event::End(TagEnd::Heading(_)) => {
        if in_heading && !heading_text.trim().is_empty() {
          return Some(heading_text.trim().to_string());
        }
        in_heading = false;
      }
      Event::Text(text) if in_heading => {
        heading_text.push_str(&text);
      }
      _ => {}
    }
  }

  None
}

/// Count the prose words of a markdown body, ignoring markup.
pub fn count_words(body: &str) -> usize {
  let parser = Parser::new_ext(body, markdown_options());
  let mut words = 0;

  for event in parser {
    match event {
      Event::Text(text) | Event::Code(text) => {
        words += text.split_whitespace().count();
      }
      _ => {}
    }
  }

  words
}

/// Collect local asset references (links, images and inline HTML) from
/// markdown content, for inclusion in the precache manifest.
pub fn collect_asset_references(markdown: &str) -> BTreeSet<String> {
  let parser = Parser::new_ext(markdown, markdown_options());
  let mut references = BTreeSet::new();

  for event in parser {
    match event {
      Event::Start(Tag::Image { dest_url, .. }) | Event::Start(Tag::Link { dest_url, .. }) => {
        add_reference(&mut references, &dest_url);
      }
      Event::Html(html) | Event::InlineHtml(html) => {
        extract_inline_asset_values(&html, &mut references);
      }
      _ => {}
    }
  }

  references
}

fn add_reference(references: &mut BTreeSet<String>, value: &str) {
  if should_ignore_precache_reference(value) {
    return;
  }
  references.insert(value.to_string());
}

fn inline_attribute_patterns() -> &'static [Regex] {
  use std::sync::OnceLock;

  static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
  PATTERNS
    .get_or_init(|| {
      vec![
        Regex::new(r#"(?i)(?:src|href|poster)\s*=\s*"([^"]+)""#)
          .expect("invalid double-quoted attribute regex"),
        Regex::new(r"(?i)(?:src|href|poster)\s*=\s*'([^']+)'")
          .expect("invalid single-quoted attribute regex"),
      ]
    })
    .as_slice()
}

fn extract_inline_asset_values(fragment: &str, references: &mut BTreeSet<String>) {
  for pattern in inline_attribute_patterns() {
    for captures in pattern.captures_iter(fragment) {
      if let Some(value) = captures.get(1) {
        add_reference(references, value.as_str());
      }
    }
  }
}

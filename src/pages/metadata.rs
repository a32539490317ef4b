//! Per-page locale metadata assembled at content-generation time.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::locale::{format_date, reading_minutes, reading_time_phrase, Locale};
use crate::pages::markdown::{
  collect_asset_references, count_words, extract_first_heading, parse_page_source,
};

/// Locale-resolved metadata for one authored page.
///
/// This is what the page-rendering layer consumes; everything here is
/// computed once at build time from the page's route and markdown source.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
  /// Site-relative route of the rendered page.
  pub route: String,
  /// Locale resolved from the route.
  pub locale: Locale,
  /// Page title from frontmatter, the first heading, or the route stem.
  pub title: String,
  /// Optional summary from frontmatter.
  pub description: Option<String>,
  /// Publication date rendered for the resolved locale.
  pub display_date: Option<String>,
  /// Localized reading-time phrase.
  pub reading_time: String,
  /// Prose word count feeding the reading-time estimate.
  pub word_count: usize,
  /// Tags attached to the page.
  pub tags: Vec<String>,
  /// Local asset references found in the body.
  pub asset_references: Vec<String>,
}

/// Assemble metadata for one page from its route and markdown source.
pub fn page_metadata(config: &SiteConfig, route: &str, source: &str) -> PageMetadata {
  let locale = Locale::resolve_path_or(route, config.default_locale);
  let (frontmatter, body) = parse_page_source(source);

  let title = frontmatter
    .title
    .or_else(|| extract_first_heading(&body))
    .unwrap_or_else(|| route_stem(route).to_string());

  let word_count = count_words(&body);
  let minutes = reading_minutes(word_count, config.words_per_minute);

  PageMetadata {
    route: route.to_string(),
    locale,
    title,
    description: frontmatter.description,
    display_date: frontmatter.date.map(|date| format_date(date, locale)),
    reading_time: reading_time_phrase(minutes, locale),
    word_count,
    tags: frontmatter.tags,
    asset_references: collect_asset_references(&body).into_iter().collect(),
  }
}

/// Walk the content tree and assemble metadata for every authored page.
///
/// Pages are returned sorted by route so repeated builds emit identical
/// output. Dotfiles and unreadable entries are skipped, matching how the
/// rest of the content pipeline treats partially-authored trees.
pub fn collect_site_pages(config: &SiteConfig, content_root: &Path) -> Result<Vec<PageMetadata>> {
  if !content_root.is_dir() {
    anyhow::bail!("content directory {} does not exist", content_root.display());
  }

  let mut pages = Vec::new();
  collect_pages_recursively(config, content_root, Path::new(""), &mut pages)
    .with_context(|| format!("failed to scan {}", content_root.display()))?;
  pages.sort_by(|a, b| a.route.cmp(&b.route));
  Ok(pages)
}

fn collect_pages_recursively(
  config: &SiteConfig,
  root: &Path,
  relative: &Path,
  pages: &mut Vec<PageMetadata>,
) -> Result<()> {
  let current = if relative.as_os_str().is_empty() {
    root.to_path_buf()
  } else {
    root.join(relative)
  };

  if let Ok(entries) = fs::read_dir(&current) {
    for entry in entries.flatten() {
      let file_name = entry.file_name();
      let name_str = file_name.to_string_lossy();
      if name_str.starts_with('.') {
        continue;
      }

      let child_relative = if relative.as_os_str().is_empty() {
        Path::new(&file_name).to_path_buf()
      } else {
        relative.join(&file_name)
      };

      let Ok(file_type) = entry.file_type() else {
        continue;
      };

      if file_type.is_dir() {
        collect_pages_recursively(config, root, &child_relative, pages)?;
      } else if file_type.is_file()
        && child_relative
          .extension()
          .is_some_and(|ext| ext.to_string_lossy() == config.markdown_extension.as_str())
      {
        let source = match fs::read_to_string(entry.path()) {
          Ok(source) => source,
          Err(_) => continue,
        };
        let route = route_for(&child_relative);
        pages.push(page_metadata(config, &route, &source));
      }
    }
  }

  Ok(())
}

/// Derive the served route for a content-relative markdown path.
///
/// `index` pages collapse onto their directory: `index.md` becomes `/` and
/// `el/index.md` becomes `/el/`.
fn route_for(relative: &Path) -> String {
  let without_ext = relative.with_extension("");
  let flat = without_ext.to_string_lossy().replace('\\', "/");

  if flat == "index" {
    return "/".to_string();
  }
  match flat.strip_suffix("/index") {
    Some(parent) => format!("/{parent}/"),
    None => format!("/{flat}"),
  }
}

fn route_stem(route: &str) -> &str {
  route
    .trim_end_matches('/')
    .rsplit('/')
    .next()
    .filter(|stem| !stem.is_empty())
    .unwrap_or("index")
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
  }

  #[test]
  fn derives_routes_from_content_paths() {
    assert_eq!(route_for(Path::new("index.md")), "/");
    assert_eq!(route_for(Path::new("el/index.md")), "/el/");
    assert_eq!(route_for(Path::new("el/posts/first.md")), "/el/posts/first");
    assert_eq!(route_for(Path::new("about.md")), "/about");
  }

  #[test]
  fn assembles_localized_metadata_for_a_page() {
    let config = SiteConfig::default();
    let source = "---\ntitle: Χριστούγεννα\ndate: 2023-12-25\ntags:\n  - γιορτές\n---\nΣύντομο κείμενο εδώ.\n";

    let page = page_metadata(&config, "/el/posts/christmas", source);
    assert_eq!(page.locale, Locale::El);
    assert_eq!(page.title, "Χριστούγεννα");
    assert_eq!(page.display_date.as_deref(), Some("25 Δεκ 2023"));
    assert_eq!(page.reading_time, "1 λεπτά ανάγνωσης");
    assert_eq!(page.tags, vec!["γιορτές".to_string()]);
  }

  #[test]
  fn title_falls_back_to_heading_then_route_stem() {
    let config = SiteConfig::default();

    let with_heading = page_metadata(&config, "/posts/first", "# From Heading\n\nBody.\n");
    assert_eq!(with_heading.title, "From Heading");

    let bare = page_metadata(&config, "/posts/first", "Body only.\n");
    assert_eq!(bare.title, "first");
  }

  #[test]
  fn collects_pages_across_locale_subtrees() {
    let temp = tempdir().unwrap();
    let content = temp.path();

    write_file(&content.join("index.md"), "---\ntitle: Home\n---\nWelcome.\n");
    write_file(
      &content.join("el/index.md"),
      "---\ntitle: Αρχική\n---\nΚαλώς ήρθατε.\n",
    );
    write_file(
      &content.join("tr/posts/birinci.md"),
      "---\ntitle: Birinci\ndate: 2023-12-25\n---\nMerhaba.\n",
    );
    write_file(&content.join(".draft/skip.md"), "skipped\n");

    let config = SiteConfig::default();
    let pages = collect_site_pages(&config, content).unwrap();

    let routes: Vec<&str> = pages.iter().map(|page| page.route.as_str()).collect();
    assert_eq!(routes, vec!["/", "/el/", "/tr/posts/birinci"]);

    assert_eq!(pages[0].locale, Locale::EnUs);
    assert_eq!(pages[1].locale, Locale::El);
    assert_eq!(pages[2].locale, Locale::Tr);
    assert_eq!(pages[2].display_date.as_deref(), Some("25 Ara 2023"));
    assert_eq!(pages[2].reading_time, "1 dk okuma");
  }

  #[test]
  fn missing_content_directory_is_an_error() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("no-such-dir");
    assert!(collect_site_pages(&SiteConfig::default(), &missing).is_err());
  }
}

//! Build-time page metadata for the localized content tree.

mod markdown;
mod metadata;

pub use markdown::{
  collect_asset_references, count_words, extract_first_heading, parse_page_markdown,
  parse_page_source, PageFrontmatter,
};
pub use metadata::{collect_site_pages, page_metadata, PageMetadata};

use serde::Serialize;

use crate::config::Site;

/// Per-page SEO metadata: what ends up in `<title>`, `<meta>` and Open Graph tags.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    pub robots: Robots,
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
}

impl Robots {
    pub const ALL: Robots = Robots { index: true, follow: true };
    pub const NONE: Robots = Robots { index: false, follow: false };
}

impl PageMeta {
    pub fn new(title: &str, description: &str, canonical_url: &str) -> PageMeta {
        PageMeta {
            title: title.to_string(),
            description: description.to_string(),
            canonical_url: Some(canonical_url.to_string()),
            keywords: vec![],
            authors: vec![],
            og_image: None,
            published_time: None,
            modified_time: None,
            robots: Robots::ALL,
        }
    }

    /// Metadata for a page whose content does not exist; kept out of search indexes.
    pub fn not_found() -> PageMeta {
        PageMeta {
            title: "Blog Not Found".to_string(),
            description: "The requested blog post could not be found.".to_string(),
            canonical_url: None,
            keywords: vec![],
            authors: vec![],
            og_image: None,
            published_time: None,
            modified_time: None,
            robots: Robots::NONE,
        }
    }

    /// Site-wide defaults, used by the home page
    pub fn site_default(site: &Site) -> PageMeta {
        let mut meta = PageMeta::new(&site.name, &site.description, site.base_url());
        meta.keywords = site.extra_keywords.clone();
        meta.og_image = site.hero_image.clone();
        meta
    }
}

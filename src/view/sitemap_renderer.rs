use std::fs;
use std::io;
use std::io::Cursor;
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use spdlog::info;

use crate::config::{Route, Site};
use crate::content::ContentCollection;
use crate::content_index::DatePolicy;
use crate::pages::blog_post_url;
use crate::text_utils::{absolute_url, format_date};

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://www.medborgarskaps-prov.se/</loc>
    <lastmod>2025-01-01</lastmod>
    <changefreq>weekly</changefreq>
    <priority>1.0</priority>
  </url>
</urlset>
*/

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const POST_CHANGE_FREQUENCY: ChangeFrequency = ChangeFrequency::Monthly;
const POST_PRIORITY: f32 = 0.7;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Static routes first, stamped with `now`, then one entry per record.
/// A record's date is `lastModified` when it parses, else `date`, else none at all.
pub fn build_sitemap(site: &Site, routes: &[Route], collection: &ContentCollection,
                     now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base_url = site.base_url();

    let static_entries = routes.iter().map(|route| SitemapEntry {
        url: absolute_url(base_url, &route.path),
        last_modified: Some(now),
        change_frequency: route.change_frequency,
        priority: route.priority,
    });

    let post_entries = collection.records().iter().map(|record| {
        let last_modified = DatePolicy::OmitIfInvalid.resolve(record.last_modified.as_ref(), now)
            .or_else(|| DatePolicy::OmitIfInvalid.resolve(record.date.as_ref(), now));
        SitemapEntry {
            url: blog_post_url(base_url, &record.slug.0),
            last_modified,
            change_frequency: POST_CHANGE_FREQUENCY,
            priority: POST_PRIORITY,
        }
    });

    static_entries.chain(post_entries).collect()
}

pub fn render_xml(entries: &[SitemapEntry]) -> quick_xml::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
    writer.write_event(decl)?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        push_text(&mut writer, "loc", &entry.url)?;
        if let Some(ref last_modified) = entry.last_modified {
            push_text(&mut writer, "lastmod", &format_date(last_modified))?;
        }
        push_text(&mut writer, "changefreq", entry.change_frequency.as_str())?;
        push_text(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    Ok(writer.into_inner().into_inner())
}

pub fn write_sitemap(entries: &[SitemapEntry], out_file: &Path) -> io::Result<()> {
    let xml = render_xml(entries)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Error rendering sitemap: {}", e)))?;

    if let Some(parent) = out_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out_file, xml)?;

    info!("Sitemap with {} urls written to {}", entries.len(), out_file.display());
    Ok(())
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

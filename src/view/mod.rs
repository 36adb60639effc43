pub mod sitemap_renderer;

pub use sitemap_renderer::{build_sitemap, render_xml, write_sitemap, ChangeFrequency, SitemapEntry};

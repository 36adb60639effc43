use std::io;
use std::io::ErrorKind;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::authors::{Author, AuthorRegistry};
use crate::config::Site;
use crate::content::{ContentCollection, ContentRecord};
use crate::content_index::{filter_by_author, filter_by_tag, list_tags, sort_by_date_descending, DatePolicy, TagCount, ALL_TAG};
use crate::page_meta::PageMeta;
use crate::structured_data::{build_faq_page, build_item_list, build_person, to_script_tag, BlogPostingInput, Crumb, GraphInput, ItemListEntry, Node, SiteSchema, WebPageType};
use crate::text_utils::{absolute_url, format_iso};

const HOME_CRUMB: &str = "Hem";
const BLOG_CRUMB: &str = "Blogg";
const CONTRIBUTORS_CRUMB: &str = "Medarbetare";
const CONTRIBUTORS_PATH: &str = "/medarbetare";

pub fn blog_post_url(base_url: &str, slug: &str) -> String {
    format!("{}/blog/{}", base_url.trim_end_matches('/'), slug)
}

pub fn author_url(base_url: &str, key: &str) -> String {
    format!("{}/author/{}", base_url.trim_end_matches('/'), key)
}

/// Metadata and JSON-LD graph of one rendered page.
#[derive(Serialize, Debug, Clone)]
pub struct Page {
    pub meta: PageMeta,
    pub graph: Vec<Node>,
}

impl Page {
    pub fn script_tag(&self) -> serde_json::Result<String> {
        to_script_tag(&self.graph)
    }
}

#[derive(Debug, Clone)]
pub struct PostSummary<'a> {
    pub record: &'a ContentRecord,
    pub url: String,
    /// Falls back to the build time when the record has no valid date
    pub display_date: DateTime<Utc>,
    pub author: Option<&'a Author>,
}

#[derive(Debug, Clone)]
pub struct HomePage<'a> {
    pub page: Page,
    pub tags: Vec<TagCount>,
    pub selected_tag: String,
    pub posts: Vec<PostSummary<'a>>,
}

/// A landing page that is not backed by a content record (about, contact, FAQ pages).
#[derive(Debug, Clone)]
pub struct InfoPage<'a> {
    pub kind: WebPageType,
    pub path: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub breadcrumb_name: &'a str,
    pub primary_image: Option<&'a str>,
    pub faq: Vec<(&'a str, &'a str)>,
}

/// Assembles the pages of the site from the loaded content.
/// Everything it reads is immutable, so one assembler can serve every page.
pub struct PageAssembler<'a> {
    site: &'a Site,
    schema: &'a SiteSchema,
    authors: &'a AuthorRegistry,
    collection: &'a ContentCollection,
    now: DateTime<Utc>,
}

impl<'a> PageAssembler<'a> {
    pub fn new(site: &'a Site, schema: &'a SiteSchema, authors: &'a AuthorRegistry,
               collection: &'a ContentCollection, now: DateTime<Utc>) -> PageAssembler<'a> {
        PageAssembler {
            site,
            schema,
            authors,
            collection,
            now,
        }
    }

    fn base_url(&self) -> &str {
        self.site.base_url()
    }

    fn summarize(&self, record: &'a ContentRecord) -> PostSummary<'a> {
        PostSummary {
            record,
            url: blog_post_url(self.base_url(), &record.slug.0),
            display_date: DatePolicy::FallbackToNow.resolve(record.date.as_ref(), self.now).unwrap_or(self.now),
            author: record.author.as_deref().and_then(|key| self.authors.get(key)),
        }
    }

    /// Newest posts first, narrowed to `tag` when one other than "All" is selected.
    pub fn home(&self, tag: Option<&str>) -> HomePage<'a> {
        let records = self.collection.records();
        let selected_tag = tag.filter(|t| !t.is_empty()).unwrap_or(ALL_TAG).to_string();
        let posts = sort_by_date_descending(filter_by_tag(records, &selected_tag))
            .into_iter()
            .map(|record| self.summarize(record))
            .collect();

        let mut input = GraphInput::new(self.base_url(), &self.site.name);
        input.kind = WebPageType::CollectionPage;
        input.description = Some(self.site.description.as_str());
        input.primary_image = self.site.hero_image.as_deref();
        input.extra = vec![Node::Blog(self.schema.blog())];

        HomePage {
            page: Page {
                meta: PageMeta::site_default(self.site),
                graph: self.schema.graph(input),
            },
            tags: list_tags(records),
            selected_tag,
            posts,
        }
    }

    pub fn blog_post(&self, slug: &str) -> io::Result<Page> {
        let Some(record) = self.collection.get(slug) else {
            return Err(io::Error::new(ErrorKind::NotFound, format!("Could not find post {}", slug)));
        };

        let base_url = self.base_url();
        let canonical_url = blog_post_url(base_url, slug);
        let title = record.display_title();

        let image = match record.thumbnail {
            Some(ref thumbnail) => absolute_url(base_url, thumbnail),
            None => format!("{}/opengraph-image", canonical_url),
        };

        let mut keywords = record.tags.clone();
        keywords.extend(self.site.extra_keywords.iter().cloned());

        let author = record.author.as_deref().and_then(|key| self.authors.get(key));
        let author_name = match (author, record.author.as_deref()) {
            (Some(author), _) => author.name.as_str(),
            (None, Some(raw)) => raw,
            (None, None) => self.site.short_name.as_str(),
        };
        let author_page = author.map(|a| author_url(base_url, &a.key));
        let author_image = match (record.author_image.as_deref(), author) {
            (Some(image), _) => Some(absolute_url(base_url, image)),
            (None, Some(author)) => Some(absolute_url(base_url, &author.avatar)),
            (None, None) => None,
        };

        let posting = self.schema.blog_posting(&BlogPostingInput {
            title: record.title.as_deref(),
            description: record.description.as_deref(),
            canonical_url: &canonical_url,
            images: vec![image.clone()],
            published_time: record.date.as_ref().map(|d| d.raw.as_str()),
            modified_time: record.last_modified.as_ref().map(|d| d.raw.as_str()),
            keywords: keywords.clone(),
            author_name: Some(author_name),
            author_image_url: author_image.as_deref(),
            author_url: author_page.as_deref(),
        });

        let mut meta = PageMeta::new(&posting.headline, &posting.description, &canonical_url);
        meta.keywords = keywords;
        meta.authors = vec![author_name.to_string()];
        meta.og_image = Some(image);
        meta.published_time = record.published().map(|d| format_iso(&d));
        meta.modified_time = record.modified().map(|d| format_iso(&d));

        let mut input = GraphInput::new(&canonical_url, title);
        input.description = record.description.as_deref();
        input.breadcrumbs = vec![
            Crumb::new(HOME_CRUMB, base_url),
            Crumb::new(BLOG_CRUMB, &format!("{}/blog", base_url)),
            Crumb::new(title, &canonical_url),
        ];
        input.extra = vec![Node::BlogPosting(posting)];

        Ok(Page {
            meta,
            graph: self.schema.graph(input),
        })
    }

    /// Metadata for `/blog/{slug}`. Unknown slugs get the not-found metadata,
    /// which keeps the page out of search indexes.
    pub fn blog_post_meta(&self, slug: &str) -> PageMeta {
        match self.blog_post(slug) {
            Ok(page) => page.meta,
            Err(_) => PageMeta::not_found(),
        }
    }

    pub fn author(&self, key: &str) -> io::Result<Page> {
        let Some(author) = self.authors.get(key) else {
            return Err(io::Error::new(ErrorKind::NotFound, format!("Could not find author {}", key)));
        };

        let base_url = self.base_url();
        let canonical_url = author_url(base_url, key);
        let posts = sort_by_date_descending(filter_by_author(self.collection.records(), key));

        let avatar = absolute_url(base_url, &author.avatar);
        let person = build_person(&author.name, Some(canonical_url.as_str()), Some(avatar.as_str()), Some(author.position.as_str()));
        let entries: Vec<ItemListEntry> = posts.iter()
            .enumerate()
            .map(|(idx, record)| {
                let url = blog_post_url(base_url, &record.slug.0);
                ItemListEntry {
                    name: record.title.clone().unwrap_or_else(|| url.clone()),
                    url,
                    position: Some(idx as u32 + 1),
                }
            })
            .collect();
        let item_list = build_item_list(&format!("Artiklar av {}", author.name), &canonical_url, &entries);

        let title = format!("{} – artiklar och profiler", author.name);
        let description = format!("Läs artiklar av {} hos {}.", author.name, self.site.name);

        let mut input = GraphInput::new(&canonical_url, &title);
        input.kind = WebPageType::ProfilePage;
        input.description = Some(description.as_str());
        input.breadcrumbs = vec![
            Crumb::new(HOME_CRUMB, base_url),
            Crumb::new(CONTRIBUTORS_CRUMB, &format!("{}{}", base_url, CONTRIBUTORS_PATH)),
            Crumb::new(&author.name, &canonical_url),
        ];
        input.extra = vec![Node::Person(person), Node::ItemList(item_list)];

        let mut meta = PageMeta::new(&title, &description, &canonical_url);
        meta.authors = vec![author.name.clone()];

        Ok(Page {
            meta,
            graph: self.schema.graph(input),
        })
    }

    /// Everyone in the author registry, in registry order
    pub fn contributors(&self) -> Page {
        let base_url = self.base_url();
        let canonical_url = format!("{}{}", base_url, CONTRIBUTORS_PATH);
        let description = format!("Personer som skriver, granskar och bygger innehåll på {}.", self.site.short_name);

        let mut extra: Vec<Node> = self.authors.iter()
            .map(|author| {
                let url = author_url(base_url, &author.key);
                let avatar = absolute_url(base_url, &author.avatar);
                Node::Person(build_person(&author.name, Some(url.as_str()), Some(avatar.as_str()), Some(author.position.as_str())))
            })
            .collect();

        let entries: Vec<ItemListEntry> = self.authors.iter()
            .map(|author| ItemListEntry {
                name: author.name.clone(),
                url: author_url(base_url, &author.key),
                position: None,
            })
            .collect();
        extra.push(Node::ItemList(build_item_list(CONTRIBUTORS_CRUMB, &canonical_url, &entries)));

        let mut input = GraphInput::new(&canonical_url, CONTRIBUTORS_CRUMB);
        input.description = Some(description.as_str());
        input.breadcrumbs = vec![
            Crumb::new(HOME_CRUMB, base_url),
            Crumb::new(CONTRIBUTORS_CRUMB, &canonical_url),
        ];
        input.extra = extra;

        Page {
            meta: PageMeta::new(CONTRIBUTORS_CRUMB, &description, &canonical_url),
            graph: self.schema.graph(input),
        }
    }

    pub fn info(&self, info: &InfoPage) -> Page {
        let base_url = self.base_url();
        let canonical_url = absolute_url(base_url, info.path);

        let mut input = GraphInput::new(&canonical_url, info.title);
        input.kind = info.kind;
        input.description = Some(info.description);
        input.primary_image = info.primary_image;
        input.breadcrumbs = vec![
            Crumb::new(HOME_CRUMB, base_url),
            Crumb::new(info.breadcrumb_name, &canonical_url),
        ];
        if !info.faq.is_empty() {
            input.extra = vec![Node::FaqPage(build_faq_page(&info.faq))];
        }

        let mut meta = PageMeta::new(info.title, info.description, &canonical_url);
        meta.og_image = info.primary_image.map(str::to_string);

        Page {
            meta,
            graph: self.schema.graph(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::{json, Value};

    use crate::test_data::{author_registry, record, site};

    use super::*;

    struct Fixture {
        site: Site,
        schema: SiteSchema,
        authors: AuthorRegistry,
        collection: ContentCollection,
    }

    impl Fixture {
        fn new() -> Fixture {
            let site = site();
            let schema = SiteSchema::new(&site);

            let mut post = record("klara-provet", "2024-06-01", &["Prov", "Guide"]);
            post.title = Some("Så klarar du provet".to_string());
            post.author = Some("nour".to_string());
            post.thumbnail = Some("/thumbnails/prov.png".to_string());
            post.last_modified = Some(crate::content::RecordDate::from_raw("not-a-date"));

            let mut news = record("nyheter", "2024-08-01", &["Nyheter"]);
            news.author = Some("ghost".to_string());

            let undated = record("utan-datum", "", &["Guide"]);

            Fixture {
                site,
                schema,
                authors: author_registry(),
                collection: ContentCollection::from_records(vec![post, news, undated]),
            }
        }

        fn assembler(&self) -> PageAssembler {
            let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            PageAssembler::new(&self.site, &self.schema, &self.authors, &self.collection, now)
        }
    }

    fn graph_value(page: &Page) -> Vec<Value> {
        page.graph.iter().map(|n| serde_json::to_value(n).unwrap()).collect()
    }

    #[test]
    fn test_home() {
        let fixture = Fixture::new();
        let home = fixture.assembler().home(None);
        assert_eq!(home.selected_tag, "All");
        let slugs: Vec<&str> = home.posts.iter().map(|p| p.record.slug.0.as_str()).collect();
        assert_eq!(slugs, ["nyheter", "klara-provet", "utan-datum"]);
        assert_eq!(home.posts[2].display_date, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(home.posts[1].author.unwrap().name, "Nour");
        assert!(home.posts[0].author.is_none());
        assert_eq!(home.tags[0], TagCount { tag: "All".to_string(), count: 3 });

        let types: Vec<&str> = home.page.graph.iter().map(Node::type_name).collect();
        assert_eq!(types, ["Organization", "WebSite", "CollectionPage", "Blog"]);
        let graph = graph_value(&home.page);
        assert_eq!(graph[2]["primaryImageOfPage"], "https://www.medborgarskaps-prov.se/images/hero-home.jpg");
    }

    #[test]
    fn test_home_with_tag() {
        let fixture = Fixture::new();
        let home = fixture.assembler().home(Some("Guide"));
        let slugs: Vec<&str> = home.posts.iter().map(|p| p.record.slug.0.as_str()).collect();
        assert_eq!(slugs, ["klara-provet", "utan-datum"]);
        // tag counts always cover the whole collection
        assert_eq!(home.tags[0].count, 3);
    }

    #[test]
    fn test_blog_post() {
        let fixture = Fixture::new();
        let page = fixture.assembler().blog_post("klara-provet").unwrap();
        let canonical = "https://www.medborgarskaps-prov.se/blog/klara-provet";

        let types: Vec<&str> = page.graph.iter().map(Node::type_name).collect();
        assert_eq!(types, ["Organization", "WebSite", "WebPage", "BreadcrumbList", "BlogPosting"]);

        let graph = graph_value(&page);
        assert_eq!(graph[2]["url"], canonical);
        assert_eq!(graph[3]["itemListElement"][2], json!({
            "@type": "ListItem", "position": 3, "name": "Så klarar du provet", "item": canonical,
        }));

        let posting = graph[4].as_object().unwrap();
        assert_eq!(posting["mainEntityOfPage"], canonical);
        assert_eq!(posting["image"], json!(["https://www.medborgarskaps-prov.se/thumbnails/prov.png"]));
        assert_eq!(posting["datePublished"], "2024-06-01T00:00:00.000Z");
        assert!(!posting.contains_key("dateModified"));
        assert_eq!(posting["keywords"], "Prov, Guide, Medborgarskapsprov, Medborgarskap, Migration, Sverige");
        assert_eq!(posting["author"], json!({
            "@type": "Person",
            "name": "Nour",
            "url": "https://www.medborgarskaps-prov.se/author/nour",
            "image": "https://www.medborgarskaps-prov.se/authors/nour.png",
        }));

        assert_eq!(page.meta.canonical_url.as_deref(), Some(canonical));
        assert_eq!(page.meta.published_time.as_deref(), Some("2024-06-01T00:00:00.000Z"));
        assert!(page.meta.modified_time.is_none());
        assert!(page.script_tag().unwrap().contains("BlogPosting"));
    }

    #[test]
    fn test_blog_post_unknown_author() {
        let fixture = Fixture::new();
        let page = fixture.assembler().blog_post("nyheter").unwrap();
        let graph = graph_value(&page);
        assert_eq!(graph[4]["author"], json!({"@type": "Person", "name": "ghost"}));
        assert_eq!(graph[4]["headline"], "Blog Post");
        // the breadcrumb still names the page by its slug
        assert_eq!(graph[3]["itemListElement"][2]["name"], "nyheter");
        assert_eq!(graph[4]["image"], json!(["https://www.medborgarskaps-prov.se/blog/nyheter/opengraph-image"]));
    }

    #[test]
    fn test_blog_post_not_found() {
        let fixture = Fixture::new();
        let err = fixture.assembler().blog_post("missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_blog_post_meta() {
        let fixture = Fixture::new();
        let meta = fixture.assembler().blog_post_meta("missing");
        assert_eq!(meta, PageMeta::not_found());
        assert!(!meta.robots.index);

        let meta = fixture.assembler().blog_post_meta("klara-provet");
        assert_eq!(meta.title, "Så klarar du provet");
        assert!(meta.robots.index);
    }

    #[test]
    fn test_author() {
        let fixture = Fixture::new();
        let page = fixture.assembler().author("nour").unwrap();
        let types: Vec<&str> = page.graph.iter().map(Node::type_name).collect();
        assert_eq!(types, ["Organization", "WebSite", "ProfilePage", "BreadcrumbList", "Person", "ItemList"]);

        let graph = graph_value(&page);
        assert_eq!(graph[4]["jobTitle"], "Author");
        assert_eq!(graph[5]["name"], "Artiklar av Nour");
        assert_eq!(graph[5]["itemListElement"], json!([{
            "@type": "ListItem",
            "position": 1,
            "name": "Så klarar du provet",
            "url": "https://www.medborgarskaps-prov.se/blog/klara-provet",
        }]));

        assert_eq!(fixture.assembler().author("ghost").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_contributors() {
        let fixture = Fixture::new();
        let page = fixture.assembler().contributors();
        let types: Vec<&str> = page.graph.iter().map(Node::type_name).collect();
        assert_eq!(types, ["Organization", "WebSite", "WebPage", "BreadcrumbList", "Person", "Person", "ItemList"]);
        let graph = graph_value(&page);
        assert_eq!(graph[6]["itemListElement"][1]["position"], 2);
        assert_eq!(graph[6]["itemListElement"][1]["name"], "Erik Svensson");
    }

    #[test]
    fn test_info_page_with_faq() {
        let fixture = Fixture::new();
        let page = fixture.assembler().info(&InfoPage {
            kind: WebPageType::WebPage,
            path: "/samhallskunskap",
            title: "Medborgarskapsprovet i samhällskunskap",
            description: "Vad som ingår i provet",
            breadcrumb_name: "Samhällskunskap",
            primary_image: None,
            faq: vec![("Vad innebär provet?", "Det handlar om hur Sverige fungerar.")],
        });
        let types: Vec<&str> = page.graph.iter().map(Node::type_name).collect();
        assert_eq!(types, ["Organization", "WebSite", "WebPage", "BreadcrumbList", "FAQPage"]);
        let graph = graph_value(&page);
        assert_eq!(graph[4]["mainEntity"][0]["acceptedAnswer"]["@type"], "Answer");
        assert_eq!(page.meta.canonical_url.as_deref(), Some("https://www.medborgarskaps-prov.se/samhallskunskap"));
    }
}

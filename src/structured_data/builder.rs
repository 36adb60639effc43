use spdlog::{debug, warn};

use crate::config::Site;
use crate::structured_data::nodes::*;
use crate::text_utils::{format_iso, parse_date_time};

const DEFAULT_HEADLINE: &str = "Blog Post";

#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub name: String,
    pub url: String,
}

impl Crumb {
    pub fn new(name: &str, url: &str) -> Crumb {
        Crumb { name: name.to_string(), url: url.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemListEntry {
    pub name: String,
    pub url: String,
    /// Kept verbatim when given, otherwise the 1-based index
    pub position: Option<u32>,
}

#[derive(Debug, Default, Clone)]
pub struct BlogPostingInput<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub canonical_url: &'a str,
    pub images: Vec<String>,
    pub published_time: Option<&'a str>,
    pub modified_time: Option<&'a str>,
    pub keywords: Vec<String>,
    pub author_name: Option<&'a str>,
    pub author_image_url: Option<&'a str>,
    pub author_url: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct GraphInput<'a> {
    pub kind: WebPageType,
    pub canonical_url: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub primary_image: Option<&'a str>,
    pub breadcrumbs: Vec<Crumb>,
    pub extra: Vec<Node>,
}

impl<'a> GraphInput<'a> {
    pub fn new(canonical_url: &'a str, title: &'a str) -> GraphInput<'a> {
        GraphInput {
            kind: WebPageType::WebPage,
            canonical_url,
            title,
            description: None,
            primary_image: None,
            breadcrumbs: vec![],
            extra: vec![],
        }
    }
}

pub fn build_organization(site: &Site) -> Organization {
    let url = site.base_url().to_string();
    Organization {
        context: SCHEMA_CONTEXT,
        kind: "Organization",
        id: format!("{}/#organization", url),
        name: site.name.clone(),
        url,
        logo: site.logo.clone(),
        description: non_empty(&site.description).map(str::to_string),
        contact_point: site.contact.as_ref().map(|c| ContactPoint {
            kind: "ContactPoint",
            contact_type: c.contact_type.clone(),
            telephone: c.telephone.clone(),
            email: c.email.clone(),
        }),
    }
}

pub fn build_website(site: &Site) -> WebSite {
    let url = site.base_url().to_string();
    WebSite {
        context: SCHEMA_CONTEXT,
        kind: "WebSite",
        id: format!("{}/#website", url),
        name: site.name.clone(),
        url,
    }
}

/// Positions are 1-based and follow the input order, root first.
pub fn build_breadcrumb_list(items: &[Crumb]) -> BreadcrumbList {
    let item_list_element = items.iter()
        .enumerate()
        .map(|(idx, crumb)| ListItem {
            kind: "ListItem",
            position: idx as u32 + 1,
            name: crumb.name.clone(),
            item: Some(crumb.url.clone()),
            url: None,
        })
        .collect();

    BreadcrumbList {
        context: SCHEMA_CONTEXT,
        kind: "BreadcrumbList",
        item_list_element,
    }
}

// Caller positions are not checked for gaps or duplicates
pub fn build_item_list(name: &str, url: &str, items: &[ItemListEntry]) -> ItemList {
    let item_list_element = items.iter()
        .enumerate()
        .map(|(idx, entry)| ListItem {
            kind: "ListItem",
            position: entry.position.unwrap_or(idx as u32 + 1),
            name: entry.name.clone(),
            item: None,
            url: Some(entry.url.clone()),
        })
        .collect();

    ItemList {
        context: SCHEMA_CONTEXT,
        kind: "ItemList",
        name: name.to_string(),
        url: url.to_string(),
        item_list_element,
    }
}

pub fn build_person(name: &str, url: Option<&str>, image: Option<&str>, job_title: Option<&str>) -> Person {
    Person {
        context: Some(SCHEMA_CONTEXT),
        kind: "Person",
        name: name.to_string(),
        url: url.and_then(non_empty).map(str::to_string),
        image: image.and_then(non_empty).map(str::to_string),
        job_title: job_title.and_then(non_empty).map(str::to_string),
    }
}

pub fn build_faq_page(questions: &[(&str, &str)]) -> FaqPage {
    FaqPage {
        context: SCHEMA_CONTEXT,
        kind: "FAQPage",
        main_entity: questions.iter()
            .map(|(question, answer)| Question {
                kind: "Question",
                name: question.to_string(),
                accepted_answer: Answer {
                    kind: "Answer",
                    text: answer.to_string(),
                },
            })
            .collect(),
    }
}

/// Site-wide nodes, built once from the configuration and shared by every page.
#[derive(Debug, Clone)]
pub struct SiteSchema {
    organization: Organization,
    website: WebSite,
    short_name: String,
    description: String,
}

impl SiteSchema {
    pub fn new(site: &Site) -> SiteSchema {
        SiteSchema {
            organization: build_organization(site),
            website: build_website(site),
            short_name: site.short_name.clone(),
            description: site.description.clone(),
        }
    }

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    pub fn website(&self) -> &WebSite {
        &self.website
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn base_url(&self) -> &str {
        &self.website.url
    }

    pub fn organization_ref(&self) -> OrganizationRef {
        OrganizationRef {
            kind: "Organization",
            id: self.organization.id.clone(),
            name: self.organization.name.clone(),
            url: self.organization.url.clone(),
        }
    }

    pub fn website_ref(&self) -> WebSiteRef {
        WebSiteRef {
            kind: "WebSite",
            id: self.website.id.clone(),
            name: self.website.name.clone(),
            url: self.website.url.clone(),
        }
    }

    pub fn web_page(&self, kind: WebPageType, name: &str, url: &str, description: &str,
                    primary_image_url: Option<&str>) -> WebPage {
        WebPage {
            context: SCHEMA_CONTEXT,
            kind,
            name: non_empty(name).unwrap_or(self.short_name.as_str()).to_string(),
            url: url.to_string(),
            description: non_empty(description).unwrap_or(self.description.as_str()).to_string(),
            is_part_of: self.website_ref(),
            primary_image_of_page: primary_image_url.and_then(non_empty).map(str::to_string),
        }
    }

    pub fn blog(&self) -> Blog {
        Blog {
            context: SCHEMA_CONTEXT,
            kind: "Blog",
            name: self.website.name.clone(),
            url: self.website.url.clone(),
            description: self.description.clone(),
            publisher: self.organization_ref(),
        }
    }

    pub fn blog_posting(&self, input: &BlogPostingInput) -> BlogPosting {
        let title = input.title.and_then(non_empty);
        let description = match input.description.and_then(non_empty) {
            Some(description) => description.to_string(),
            None => format!("Read about {} on {}", title.unwrap_or("this topic"), self.short_name),
        };

        let author = Person {
            context: None,
            kind: "Person",
            name: input.author_name.and_then(non_empty).unwrap_or(self.short_name.as_str()).to_string(),
            url: input.author_url.and_then(non_empty).map(str::to_string),
            image: input.author_image_url.and_then(non_empty).map(str::to_string),
            job_title: None,
        };

        let images: Vec<String> = input.images.iter()
            .filter(|i| !i.trim().is_empty())
            .cloned()
            .collect();
        let keywords: Vec<&str> = input.keywords.iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect();

        BlogPosting {
            context: SCHEMA_CONTEXT,
            kind: "BlogPosting",
            headline: title.unwrap_or(DEFAULT_HEADLINE).to_string(),
            description,
            main_entity_of_page: input.canonical_url.to_string(),
            author,
            publisher: self.organization_ref(),
            date_published: input.published_time.and_then(iso_date),
            date_modified: input.modified_time.and_then(iso_date),
            image: if images.is_empty() { None } else { Some(images) },
            keywords: if keywords.is_empty() { None } else { Some(keywords.join(", ")) },
        }
    }

    /// `[Organization, WebSite, WebPage]`, then the breadcrumbs when there are
    /// any, then the extra nodes in order.
    ///
    /// An extra node is dropped when any of its `(@type, @id)` or `(@type, url)`
    /// keys is already in the graph, so the site Organization and WebSite appear
    /// once whichever key a caller identifies them by. Nodes of those types with
    /// a different `@id` and `url` (a partner organization, say) are different
    /// entities and are kept.
    pub fn graph(&self, input: GraphInput) -> Vec<Node> {
        let web_page = self.web_page(
            input.kind,
            input.title,
            input.canonical_url,
            input.description.unwrap_or_default(),
            input.primary_image,
        );

        let mut graph = vec![
            Node::Organization(self.organization.clone()),
            Node::WebSite(self.website.clone()),
            Node::WebPage(web_page),
        ];

        if let Some(last) = input.breadcrumbs.last() {
            if last.url != input.canonical_url {
                warn!("Breadcrumb trail ends at {} but the page is {}", last.url, input.canonical_url);
            }
            graph.push(Node::BreadcrumbList(build_breadcrumb_list(&input.breadcrumbs)));
        }

        for node in input.extra {
            let keys = node.identities();
            let duplicate = graph.iter()
                .flat_map(Node::identities)
                .any(|existing| keys.contains(&existing));
            if duplicate {
                debug!("Dropping duplicate {} node on {}", node.type_name(), input.canonical_url);
                continue;
            }
            graph.push(node);
        }

        graph
    }
}

pub fn to_json_ld(graph: &[Node]) -> serde_json::Result<String> {
    serde_json::to_string(graph)
}

/// The graph inside a `<script type="application/ld+json">` element.
/// `<` is escaped so content can never close the element.
pub fn to_script_tag(graph: &[Node]) -> serde_json::Result<String> {
    let json = to_json_ld(graph)?.replace('<', "\\u003c");
    Ok(format!(r#"<script type="application/ld+json">{}</script>"#, json))
}

fn non_empty(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.is_empty() { None } else { Some(text) }
}

fn iso_date(raw: &str) -> Option<String> {
    parse_date_time(raw).ok().map(|d| format_iso(&d))
}

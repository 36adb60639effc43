//! Typed schema.org nodes.
//!
//! Optional attributes are skipped when absent, never written as `null`.

use serde::Serialize;
use serde_json::Value;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub contact_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<ContactPoint>,
}

/// Organization as referenced from other nodes (`publisher`)
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OrganizationRef {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WebSite {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
}

/// WebSite as referenced from `isPartOf`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WebSiteRef {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum WebPageType {
    WebPage,
    AboutPage,
    ContactPage,
    CollectionPage,
    ProfilePage,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: WebPageType,
    pub name: String,
    pub url: String,
    pub description: String,
    pub is_part_of: WebSiteRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_image_of_page: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: u32,
    pub name: String,
    /// Breadcrumb target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// ItemList target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub item_list_element: Vec<ListItem>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemList {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
    pub item_list_element: Vec<ListItem>,
}

/// `context` is only set when the person is a top-level node.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<&'static str>,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPosting {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub headline: String,
    pub description: String,
    pub main_entity_of_page: String,
    pub author: Person,
    pub publisher: OrganizationRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Blog {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
    pub description: String,
    pub publisher: OrganizationRef,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Answer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub accepted_answer: Answer,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FaqPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub main_entity: Vec<Question>,
}

/// One entry of a page's JSON-LD array.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Node {
    Organization(Organization),
    WebSite(WebSite),
    WebPage(WebPage),
    BreadcrumbList(BreadcrumbList),
    Person(Person),
    ItemList(ItemList),
    BlogPosting(BlogPosting),
    Blog(Blog),
    FaqPage(FaqPage),
    /// Caller-built JSON, emitted as is
    Other(Value),
}

impl Node {
    pub fn type_name(&self) -> &str {
        match self {
            Node::Organization(n) => n.kind,
            Node::WebSite(n) => n.kind,
            Node::WebPage(n) => n.kind.as_str(),
            Node::BreadcrumbList(n) => n.kind,
            Node::Person(n) => n.kind,
            Node::ItemList(n) => n.kind,
            Node::BlogPosting(n) => n.kind,
            Node::Blog(n) => n.kind,
            Node::FaqPage(n) => n.kind,
            Node::Other(v) => v.get("@type").and_then(Value::as_str).unwrap_or(""),
        }
    }

    /// Every `(@type, key)` pair the node can be matched on. The site singletons
    /// answer to both their `@id` and their `url`.
    pub fn identities(&self) -> Vec<(&str, &str)> {
        let keys: Vec<&str> = match self {
            Node::Organization(n) => vec![n.id.as_str(), n.url.as_str()],
            Node::WebSite(n) => vec![n.id.as_str(), n.url.as_str()],
            Node::WebPage(n) => vec![n.url.as_str()],
            Node::BreadcrumbList(_) => vec![],
            Node::Person(n) => n.url.as_deref().into_iter().collect(),
            Node::ItemList(n) => vec![n.url.as_str()],
            Node::BlogPosting(n) => vec![n.main_entity_of_page.as_str()],
            Node::Blog(n) => vec![n.url.as_str()],
            Node::FaqPage(_) => vec![],
            Node::Other(v) => ["@id", "url"].iter()
                .filter_map(|key| v.get(*key).and_then(Value::as_str))
                .collect(),
        };
        let kind = self.type_name();
        keys.into_iter().map(|key| (kind, key)).collect()
    }
}

impl WebPageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebPageType::WebPage => "WebPage",
            WebPageType::AboutPage => "AboutPage",
            WebPageType::ContactPage => "ContactPage",
            WebPageType::CollectionPage => "CollectionPage",
            WebPageType::ProfilePage => "ProfilePage",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_identities_of_raw_nodes() {
        let node = Node::Other(json!({"@type": "Organization", "@id": "https://s.se/#organization"}));
        assert_eq!(node.identities(), [("Organization", "https://s.se/#organization")]);

        let node = Node::Other(json!({"@type": "WebSite", "url": "https://s.se"}));
        assert_eq!(node.identities(), [("WebSite", "https://s.se")]);

        let node = Node::Other(json!({"@type": "WebSite", "@id": "https://s.se/#website", "url": "https://s.se"}));
        assert_eq!(node.identities(), [("WebSite", "https://s.se/#website"), ("WebSite", "https://s.se")]);

        let node = Node::Other(json!({"@type": "Event"}));
        assert!(node.identities().is_empty());
        assert_eq!(node.type_name(), "Event");
    }

    #[test]
    fn test_singletons_match_on_id_and_url() {
        let node = Node::WebSite(WebSite {
            context: SCHEMA_CONTEXT,
            kind: "WebSite",
            id: "https://s.se/#website".to_string(),
            name: "S".to_string(),
            url: "https://s.se".to_string(),
        });
        assert_eq!(node.identities(), [("WebSite", "https://s.se/#website"), ("WebSite", "https://s.se")]);
    }

    #[test]
    fn test_untagged_serialization() {
        let node = Node::Person(Person {
            context: None,
            kind: "Person",
            name: "Ada".to_string(),
            url: None,
            image: None,
            job_title: Some("Author".to_string()),
        });
        assert_eq!(serde_json::to_value(&node).unwrap(), json!({
            "@type": "Person",
            "name": "Ada",
            "jobTitle": "Author",
        }));
    }
}

//! schema.org JSON-LD graphs for every page of the site.

pub mod builder;
pub mod nodes;

pub use builder::{
    build_breadcrumb_list, build_faq_page, build_item_list, build_organization, build_person,
    build_website, to_json_ld, to_script_tag, BlogPostingInput, Crumb, GraphInput, ItemListEntry,
    SiteSchema,
};
pub use nodes::{Node, WebPageType};

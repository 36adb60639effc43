pub mod authors;
pub mod config;
pub mod content;
pub mod content_index;
pub mod logger;
pub mod page_meta;
pub mod pages;
pub mod structured_data;
pub mod text_utils;
pub mod view;
mod test_data;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use medborg::authors::AuthorRegistry;
use medborg::config::Config;
use medborg::content::ContentCollection;
use medborg::content_index::{filter_by_author, filter_by_tag, list_tags, sort_by_date_descending, ALL_TAG};
use medborg::logger::configure_logger;
use medborg::pages::{Page, PageAssembler};
use medborg::structured_data::SiteSchema;
use medborg::text_utils::format_date;
use medborg::view::{build_sitemap, write_sitemap};

use crate::config::open_config;
use crate::config_data::write_sample_cfg;

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "medborg.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Writes sitemap.xml for the static routes and every post
    Sitemap {
        /// Output file. Defaults to sitemap.xml in the configured output dir
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Prints the JSON-LD graph of a page
    Jsonld {
        #[command(subcommand)]
        page: JsonLdPage,
    },
    /// Prints the SEO metadata of a post, or the not-found metadata
    Meta { slug: String },
    /// Lists posts, newest first
    List {
        #[arg(short, long)]
        tag: Option<String>,
        /// Author key
        #[arg(short, long)]
        author: Option<String>,
    },
    /// Prints every tag with the number of posts carrying it
    Tags,
    /// Writes a sample configuration file
    Init {
        /// Defaults to medborg.toml in the current dir
        #[arg(short, long)]
        path: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum JsonLdPage {
    /// Blog index
    Home {
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// A single post
    Blog { slug: String },
    /// An author profile
    Author { key: String },
    /// Everyone in the author registry
    Contributors,
}

/// Everything loaded from the configuration and the content dir
struct Blog {
    config: Config,
    schema: SiteSchema,
    authors: AuthorRegistry,
    collection: ContentCollection,
}

impl Blog {
    fn load(config: Config) -> Result<Blog> {
        let collection = ContentCollection::load(&config.paths.content_dir)
            .with_context(|| format!("Could not load content from {}", config.paths.content_dir.display()))?;
        let schema = SiteSchema::new(&config.site);
        let authors = AuthorRegistry::new(config.authors.clone());

        Ok(Blog {
            config,
            schema,
            authors,
            collection,
        })
    }

    fn assembler(&self) -> PageAssembler {
        PageAssembler::new(&self.config.site, &self.schema, &self.authors, &self.collection, Utc::now())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let command = match args.command {
        Command::Init { path } => return init_cmd(path),
        command => command,
    };

    let config = open_config(args.config_path.map(PathBuf::from))?;
    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let blog = Blog::load(config)?;
    info!("Loaded {} posts and {} authors", blog.collection.len(), blog.authors.len());

    match command {
        Command::Sitemap { out } => sitemap_cmd(&blog, out),
        Command::Jsonld { page } => jsonld_cmd(&blog, page),
        Command::Meta { slug } => meta_cmd(&blog, &slug),
        Command::List { tag, author } => list_cmd(&blog, tag, author),
        Command::Tags => tags_cmd(&blog),
        Command::Init { path } => init_cmd(path),
    }
}

fn init_cmd(path: Option<String>) -> Result<()> {
    let path = match path {
        Some(path) => PathBuf::from(path),
        None => env::current_dir()?.join(CFG_FILE_NAME),
    };
    write_sample_cfg(&path).with_context(|| format!("Could not write {}", path.display()))?;
    println!("Sample configuration written to {}", path.display());
    Ok(())
}

fn sitemap_cmd(blog: &Blog, out: Option<String>) -> Result<()> {
    let out_file = match out {
        Some(out) => PathBuf::from(out),
        None => blog.config.paths.output_dir.join("sitemap.xml"),
    };
    let routes = blog.config.sitemap.routes();
    let entries = build_sitemap(&blog.config.site, &routes, &blog.collection, Utc::now());
    write_sitemap(&entries, &out_file)?;
    Ok(())
}

fn jsonld_cmd(blog: &Blog, page: JsonLdPage) -> Result<()> {
    let assembler = blog.assembler();
    let page: Page = match page {
        JsonLdPage::Home { tag } => assembler.home(tag.as_deref()).page,
        JsonLdPage::Blog { slug } => assembler.blog_post(&slug)?,
        JsonLdPage::Author { key } => assembler.author(&key)?,
        JsonLdPage::Contributors => assembler.contributors(),
    };
    println!("{}", serde_json::to_string_pretty(&page.graph)?);
    Ok(())
}

fn meta_cmd(blog: &Blog, slug: &str) -> Result<()> {
    let meta = blog.assembler().blog_post_meta(slug);
    println!("{}", serde_json::to_string_pretty(&meta)?);
    Ok(())
}

fn list_cmd(blog: &Blog, tag: Option<String>, author: Option<String>) -> Result<()> {
    let tag = tag.unwrap_or_else(|| ALL_TAG.to_string());
    let mut records = filter_by_tag(blog.collection.records(), &tag);
    if let Some(ref author) = author {
        records = filter_by_author(records, author);
    }

    for record in sort_by_date_descending(records) {
        let date = record.published().map(|d| format_date(&d)).unwrap_or_else(|| "-".to_string());
        println!("{:<10}  {:<40}  {}", date, record.slug.0, record.display_title());
    }
    Ok(())
}

fn tags_cmd(blog: &Blog) -> Result<()> {
    for tag in list_tags(blog.collection.records()) {
        println!("{} ({})", tag.tag, tag.count);
    }
    Ok(())
}

use std::collections::HashMap;
use std::path::Path;
use std::{fs, io};

use spdlog::{debug, info, warn};

use crate::content::content_list::ContentList;
use crate::content::frontmatter::split_frontmatter;
use crate::content::record::ContentRecord;

/// All records of a content directory, loaded once and read-only afterwards.
/// Slugs are unique: the first record with a given slug wins.
#[derive(Debug, Default, Clone)]
pub struct ContentCollection {
    records: Vec<ContentRecord>,
    slug_to_index: HashMap<String, usize>,
}

impl ContentCollection {
    pub fn from_records(records: impl IntoIterator<Item = ContentRecord>) -> ContentCollection {
        let mut collection = ContentCollection::default();
        for record in records {
            collection.add(record);
        }
        collection
    }

    pub fn load(content_dir: &Path) -> io::Result<ContentCollection> {
        let links = ContentList::new(content_dir).retrieve()?;
        let mut collection = ContentCollection::default();

        for link in links {
            let raw_content = match fs::read_to_string(&link.path) {
                Ok(raw_content) => raw_content,
                Err(e) => {
                    warn!("Skipping {}: {}", link.path.display(), e);
                    continue;
                }
            };
            let frontmatter = match split_frontmatter(&link.path, &raw_content) {
                Ok((frontmatter, _body)) => frontmatter,
                Err(e) => {
                    warn!("Skipping {}: {}", link.path.display(), e);
                    continue;
                }
            };
            if !frontmatter.is_object() {
                warn!("Frontmatter of {} is not a mapping, using defaults", link.path.display());
            }

            debug!("Loaded {} from {}", link.slug, link.path.display());
            collection.add(ContentRecord::normalize(&link.slug, &frontmatter));
        }

        info!("Loaded {} content records from {}", collection.len(), content_dir.display());
        Ok(collection)
    }

    fn add(&mut self, record: ContentRecord) {
        let slug = record.slug.0.clone();
        if self.slug_to_index.contains_key(&slug) {
            warn!("Duplicate slug {}, keeping the first record", slug);
            return;
        }

        self.slug_to_index.insert(slug, self.records.len());
        self.records.push(record);
    }

    pub fn get(&self, slug: &str) -> Option<&ContentRecord> {
        self.slug_to_index.get(slug).map(|idx| &self.records[*idx])
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::{record, POST_DATA, TOML_POST_DATA};

    use super::*;

    #[test]
    fn test_duplicate_slugs() {
        let collection = ContentCollection::from_records(vec![
            record("a", "2024-01-01", &["x"]),
            record("b", "2024-02-01", &[]),
            record("a", "2024-03-01", &["y"]),
        ]);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("a").unwrap().tags, ["x"]);
        assert!(collection.get("missing").is_none());
    }

    #[test]
    fn test_load() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        fs::write(root.path().join("klara-provet.mdx"), POST_DATA)?;
        fs::write(root.path().join("nyheter.md"), TOML_POST_DATA)?;
        fs::write(root.path().join("broken.mdx"), "---\ntitle: never closed\n")?;
        fs::write(root.path().join("plain.mdx"), "# No frontmatter")?;

        let collection = ContentCollection::load(root.path())?;
        let slugs: Vec<&str> = collection.records().iter().map(|r| r.slug.0.as_str()).collect();
        assert_eq!(slugs, ["klara-provet", "nyheter", "plain"]);

        let post = collection.get("klara-provet").unwrap();
        assert_eq!(post.display_title(), "Så klarar du medborgarskapsprovet");
        assert_eq!(post.author.as_deref(), Some("nour"));
        assert!(post.published().is_some());

        let plain = collection.get("plain").unwrap();
        assert_eq!(plain.display_title(), "plain");
        Ok(())
    }

    #[test]
    fn test_load_skips_unreadable_file() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        fs::write(root.path().join("a-good.mdx"), POST_DATA)?;
        fs::write(root.path().join("b-bad.mdx"), b"---\ntitle: \xff\xfe\n---\n")?;

        let collection = ContentCollection::load(root.path())?;
        assert_eq!(collection.len(), 1);
        assert!(collection.get("a-good").is_some());
        assert!(collection.get("b-bad").is_none());
        Ok(())
    }
}

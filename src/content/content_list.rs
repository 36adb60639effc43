use std::{fs, io};
use std::path::{Path, PathBuf};

const CONTENT_EXTENSIONS: [&str; 2] = ["mdx", "md"];

#[derive(Debug, Clone, PartialEq)]
pub struct ContentLink {
    pub slug: String,
    pub path: PathBuf,
}

/// Finds content files in a content directory: `<slug>.mdx` / `<slug>.md`
/// files, and `<slug>/index.mdx` / `<slug>/index.md` directories.
pub struct ContentList {
    pub root_dir: PathBuf,
    pub index_base_name: String,
}

impl ContentList {
    pub fn new(root_dir: &Path) -> ContentList {
        ContentList {
            root_dir: root_dir.to_path_buf(),
            index_base_name: "index".to_string(),
        }
    }

    /// Every content file, ordered by path
    pub fn retrieve(&self) -> io::Result<Vec<ContentLink>> {
        let mut links = self.retrieve_files()?;
        links.extend(self.retrieve_dirs()?);
        links.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(links)
    }

    fn retrieve_files(&self) -> io::Result<Vec<ContentLink>> {
        let mut links = vec![];
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let path = entry.path();
            if !is_content_file(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                links.push(ContentLink {
                    slug: stem.to_string(),
                    path,
                });
            }
        }
        Ok(links)
    }

    fn retrieve_dirs(&self) -> io::Result<Vec<ContentLink>> {
        let mut links = vec![];
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let dir = entry.path();
            let Some(slug) = dir.file_name().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            if let Some(path) = self.index_file(&dir) {
                links.push(ContentLink { slug, path });
            }
        }
        Ok(links)
    }

    fn index_file(&self, dir: &Path) -> Option<PathBuf> {
        CONTENT_EXTENSIONS.iter()
            .map(|ext| dir.join(format!("{}.{}", self.index_base_name, ext)))
            .find(|path| path.is_file())
    }
}

fn is_content_file(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => CONTENT_EXTENSIONS.contains(&ext),
        None => false,
    }
}

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::authors::Author;
use crate::view::sitemap_renderer::ChangeFrequency;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ContactPoint {
    pub contact_type: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Site {
    /// Full site name, used as Organization/WebSite name.
    pub name: String,
    /// Brand used in generated copy ("Read about ... on <short_name>").
    pub short_name: String,
    pub url: String,
    pub description: String,
    pub logo: Option<String>,
    pub hero_image: Option<String>,
    pub contact: Option<ContactPoint>,
    #[serde(default)]
    pub extra_keywords: Vec<String>,
}

impl Site {
    /// Base URL without the trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Route {
    pub path: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Sitemap {
    pub routes: Option<Vec<Route>>,
}

impl Sitemap {
    pub fn routes(&self) -> Vec<Route> {
        match self.routes {
            Some(ref routes) => routes.clone(),
            None => default_routes(),
        }
    }
}

fn default_routes() -> Vec<Route> {
    vec![
        Route { path: "/".to_string(), change_frequency: ChangeFrequency::Weekly, priority: 1.0 },
        Route { path: "/blog".to_string(), change_frequency: ChangeFrequency::Weekly, priority: 0.8 },
        Route { path: "/about".to_string(), change_frequency: ChangeFrequency::Monthly, priority: 0.6 },
        Route { path: "/contact".to_string(), change_frequency: ChangeFrequency::Monthly, priority: 0.5 },
    ]
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub sitemap: Sitemap,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match (exe_dir, path.to_str()) {
        (Some(exe_dir), Some(str_path)) => {
            let rest = str_path.trim_start_matches("${exe_dir}").trim_start_matches('/');
            exe_dir.join(rest)
        }
        _ => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.site.url = cfg.site.base_url().to_string();
    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir),
        output_dir: parse_path(cfg.paths.output_dir),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use crate::test_data::CONFIG_DATA;

    use super::*;

    #[test]
    fn test_parse_config() {
        let cfg = parse_config(CONFIG_DATA).unwrap();
        assert_eq!(cfg.site.short_name, "Medborgarskapsprov.se");
        // trailing slash removed
        assert_eq!(cfg.site.url, "https://www.medborgarskaps-prov.se");
        assert_eq!(cfg.site.contact.as_ref().unwrap().contact_type, "customer service");
        assert_eq!(cfg.authors.len(), 2);
        assert_eq!(cfg.authors[0].key, "nour");
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_default_routes() {
        let cfg = parse_config(CONFIG_DATA).unwrap();
        let routes = cfg.sitemap.routes();
        let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/", "/blog", "/about", "/contact"]);
        assert_eq!(routes[0].priority, 1.0);
        assert_eq!(routes[2].change_frequency, ChangeFrequency::Monthly);
    }

    #[test]
    fn test_custom_routes() {
        let cfg = format!("{}\n{}", CONFIG_DATA, r#"
[[sitemap.routes]]
path = "/samhallskunskap"
change_frequency = "yearly"
priority = 0.4
"#);
        let cfg = parse_config(&cfg).unwrap();
        assert_eq!(cfg.sitemap.routes(), vec![Route {
            path: "/samhallskunskap".to_string(),
            change_frequency: ChangeFrequency::Yearly,
            priority: 0.4,
        }]);
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[site]\nname = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_exe_dir_expansion() {
        let path = parse_path(PathBuf::from("${exe_dir}/content"));
        assert!(path.ends_with("content"));
        assert!(!path.to_string_lossy().contains("${exe_dir}"));

        let path = parse_path(PathBuf::from("blog/content"));
        assert_eq!(path, PathBuf::from("blog/content"));
    }
}

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};

const CONFIG_SAMPLE: &str = r#"# Generated on {{TODAY}}

[site]
name = "Medborgarskapsprov.se – om Sveriges medborgarskapsprov i samhällskunskap"
short_name = "Medborgarskapsprov.se"
url = "https://www.medborgarskaps-prov.se"
description = "Vi har samlat all information om det svenska medborgarskapsprovet i samhällskunskap."
logo = "https://www.medborgarskaps-prov.se/images/logo-512.png"
hero_image = "https://www.medborgarskaps-prov.se/images/hero-home.jpg"
extra_keywords = ["Medborgarskapsprov", "Medborgarskap", "Migration", "Sverige"]

[site.contact]
contact_type = "customer service"
email = "info@medborgarskaps-prov.se"

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
content_dir = "blog/content"
output_dir = "public"

[[authors]]
key = "nour"
name = "Nour"
position = "Author"
avatar = "/authors/nour.png"

# Static routes listed in sitemap.xml. Defaults to /, /blog, /about and /contact
[[sitemap.routes]]
path = "/"
change_frequency = "weekly"
priority = 1.0

[[sitemap.routes]]
path = "/blog"
change_frequency = "weekly"
priority = 0.8

[[sitemap.routes]]
path = "/about"
change_frequency = "monthly"
priority = 0.6

[[sitemap.routes]]
path = "/contact"
change_frequency = "monthly"
priority = 0.5

# Remove this section to log to the console only
[log]
level = "Info"
log_to_console = true
"#;

/// Writes the sample configuration, refusing to overwrite an existing file
pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(file_path)?;
    file.write_all(get_sample_cfg().as_bytes())
}

fn get_sample_cfg() -> String {
    let current_local: DateTime<Local> = Local::now();
    let today = current_local.format("%Y-%m-%d").to_string();
    CONFIG_SAMPLE.replace("{{TODAY}}", &today)
}

#[cfg(test)]
mod tests {
    use medborg::config::parse_config;

    use super::*;

    #[test]
    fn test_sample_cfg_parses() {
        let config = parse_config(&get_sample_cfg()).unwrap();
        assert_eq!(config.site.short_name, "Medborgarskapsprov.se");
        assert_eq!(config.authors.len(), 1);
        assert_eq!(config.sitemap.routes().len(), 4);
    }

    #[test]
    fn test_write_sample_cfg_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medborg.toml");
        write_sample_cfg(&path).unwrap();
        let err = write_sample_cfg(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}

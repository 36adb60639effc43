#[cfg(test)]
pub const POST_DATA: &str = "---
title: Så klarar du medborgarskapsprovet
description: Tips inför provet i samhällskunskap
date: 2024-06-01
lastModified: 2024-06-10T12:00:00Z
tags:
  - Prov
  - Guide
author: nour
thumbnail: /thumbnails/prov.png
readTime: 6 min
---

## Inledning

Från och med 2026 behöver den som ansöker om svenskt medborgarskap klara ett prov i samhällskunskap.
";

#[cfg(test)]
pub const TOML_POST_DATA: &str = "+++
title = \"Nyheter om provet\"
date = 2024-03-15
tags = [\"Nyheter\"]
+++

Regeringen har presenterat nya detaljer om provet.
";

#[cfg(test)]
pub const CONFIG_DATA: &str = r#"
[site]
name = "Medborgarskapsprov.se – om Sveriges medborgarskapsprov i samhällskunskap"
short_name = "Medborgarskapsprov.se"
url = "https://www.medborgarskaps-prov.se/"
description = "Vi har samlat all information om det svenska medborgarskapsprovet i samhällskunskap."
logo = "https://www.medborgarskaps-prov.se/images/logo-512.png"
hero_image = "https://www.medborgarskaps-prov.se/images/hero-home.jpg"
extra_keywords = ["Medborgarskapsprov", "Medborgarskap", "Migration", "Sverige"]

[site.contact]
contact_type = "customer service"
telephone = "+46-8-1234-5678"
email = "info@medborgarskaps-prov.se"

[paths]
content_dir = "blog/content"
output_dir = "public"

[[authors]]
key = "nour"
name = "Nour"
position = "Author"
avatar = "/authors/nour.png"

[[authors]]
key = "erik"
name = "Erik Svensson"
position = "Redaktör"
avatar = "/authors/erik.png"
"#;

#[cfg(test)]
pub fn site() -> crate::config::Site {
    crate::config::parse_config(CONFIG_DATA).unwrap().site
}

#[cfg(test)]
pub fn author_registry() -> crate::authors::AuthorRegistry {
    crate::authors::AuthorRegistry::new(crate::config::parse_config(CONFIG_DATA).unwrap().authors)
}

/// Record with a date and tags, the shape most index tests need
#[cfg(test)]
pub fn record(slug: &str, date: &str, tags: &[&str]) -> crate::content::ContentRecord {
    let mut record = crate::content::ContentRecord::empty(slug);
    record.date = Some(crate::content::RecordDate::from_raw(date));
    record.tags = tags.iter().map(|t| t.to_string()).collect();
    record
}

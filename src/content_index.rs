use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::content::{ContentRecord, RecordDate};

/// Synthetic tag standing for the whole collection
pub const ALL_TAG: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// What to do with a date that is missing or does not parse.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DatePolicy {
    /// Listings: show the build time instead
    FallbackToNow,
    /// Sitemap: leave the date out
    OmitIfInvalid,
}

impl DatePolicy {
    pub fn resolve(self, date: Option<&RecordDate>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match (date.and_then(|d| d.parsed), self) {
            (Some(parsed), _) => Some(parsed),
            (None, DatePolicy::FallbackToNow) => Some(now),
            (None, DatePolicy::OmitIfInvalid) => None,
        }
    }
}

/// Newest first. Records without a valid date go last; ties keep input order.
pub fn sort_by_date_descending<'a, I>(records: I) -> Vec<&'a ContentRecord>
    where I: IntoIterator<Item = &'a ContentRecord>
{
    let mut sorted: Vec<&ContentRecord> = records.into_iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| match (a.published(), b.published()) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// "All" with the total record count, then every distinct tag in alphabetical
/// order with the number of records carrying it.
pub fn list_tags<'a, I>(records: I) -> Vec<TagCount>
    where I: IntoIterator<Item = &'a ContentRecord>
{
    let mut total = 0;
    let mut tag_map: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        total += 1;
        let mut seen: Vec<&str> = Vec::with_capacity(record.tags.len());
        for tag in record.tags.iter().map(String::as_str) {
            // A literal "All" tag would shadow the synthetic entry
            if tag == ALL_TAG || seen.contains(&tag) {
                continue;
            }
            seen.push(tag);
            *tag_map.entry(tag).or_insert(0) += 1;
        }
    }

    let mut tags = Vec::with_capacity(tag_map.len() + 1);
    tags.push(TagCount { tag: ALL_TAG.to_string(), count: total });
    tags.extend(tag_map.into_iter().map(|(tag, count)| TagCount { tag: tag.to_string(), count }));
    tags
}

/// Records carrying `tag`, in input order. `"All"` keeps every record.
pub fn filter_by_tag<'a, I>(records: I, tag: &str) -> Vec<&'a ContentRecord>
    where I: IntoIterator<Item = &'a ContentRecord>
{
    if tag == ALL_TAG {
        return records.into_iter().collect();
    }
    records.into_iter().filter(|r| r.has_tag(tag)).collect()
}

/// Exact key match; records without an author never match.
pub fn filter_by_author<'a, I>(records: I, author_key: &str) -> Vec<&'a ContentRecord>
    where I: IntoIterator<Item = &'a ContentRecord>
{
    records.into_iter()
        .filter(|r| r.author.as_deref() == Some(author_key))
        .collect()
}

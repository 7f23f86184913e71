use super::arr::ArrFlavor;
use super::types::{Availability, LibraryEntry, LibraryRecord, QualityProfile, RootFolder, SearchResult};
use super::MediaKind;
use serde_json::{json, Value};

/// Sonarr: TV series keyed by TVDB id.
pub struct Sonarr;

impl ArrFlavor for Sonarr {
    const KIND: MediaKind = MediaKind::Show;
    const RESOURCE: &'static str = "series";
    const ID_FIELD: &'static str = "tvdbId";
    const SEARCH_COMMAND: &'static str = "EpisodeSearch";
    const SEARCH_IDS_FIELD: &'static str = "episodeIds";

    fn lookup_by_id_request(external_id: i64) -> (String, Vec<(&'static str, String)>) {
        // Sonarr resolves `tvdb:<id>` terms through the regular lookup endpoint
        (
            "series/lookup".to_string(),
            vec![("term", format!("tvdb:{external_id}"))],
        )
    }

    fn pick_lookup_match(body: Value) -> Option<Value> {
        match body {
            Value::Array(items) => items.into_iter().next(),
            _ => None,
        }
    }

    fn add_payload(item: &SearchResult, root_folder: &RootFolder, profile: &QualityProfile) -> Value {
        json!({
            "tvdbId": item.external_id,
            "title": item.title,
            "qualityProfileId": profile.id,
            "titleSlug": item.title_slug,
            "images": item.images,
            "seasons": item.seasons,
            "rootFolderPath": root_folder.path,
            "monitored": true,
            "addOptions": {
                "monitor": "all",
                "searchForMissingEpisodes": true
            }
        })
    }

    fn library_entry(record: LibraryRecord) -> LibraryEntry {
        LibraryEntry {
            id: record.id,
            title: record.title.unwrap_or_else(|| "Unknown".to_string()),
            year: record.year,
            availability: Availability::Status(
                record.status.unwrap_or_else(|| "Unknown".to_string()),
            ),
        }
    }
}

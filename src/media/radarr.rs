use super::arr::ArrFlavor;
use super::types::{Availability, LibraryEntry, LibraryRecord, QualityProfile, RootFolder, SearchResult};
use super::MediaKind;
use serde_json::{json, Value};

/// Radarr: movies keyed by TMDB id.
pub struct Radarr;

impl ArrFlavor for Radarr {
    const KIND: MediaKind = MediaKind::Movie;
    const RESOURCE: &'static str = "movie";
    const ID_FIELD: &'static str = "tmdbId";
    const SEARCH_COMMAND: &'static str = "MoviesSearch";
    const SEARCH_IDS_FIELD: &'static str = "movieIds";

    fn lookup_by_id_request(external_id: i64) -> (String, Vec<(&'static str, String)>) {
        (
            "movie/lookup/tmdb".to_string(),
            vec![("tmdbId", external_id.to_string())],
        )
    }

    fn pick_lookup_match(body: Value) -> Option<Value> {
        match body {
            Value::Array(items) => items.into_iter().next(),
            Value::Object(map) if !map.is_empty() => Some(Value::Object(map)),
            _ => None,
        }
    }

    fn add_payload(item: &SearchResult, root_folder: &RootFolder, profile: &QualityProfile) -> Value {
        json!({
            "tmdbId": item.external_id,
            "title": item.title,
            "year": item.year.unwrap_or(0),
            "qualityProfileId": profile.id,
            "titleSlug": item.title_slug,
            "images": item.images,
            "rootFolderPath": root_folder.path,
            "monitored": true,
            "addOptions": {
                "searchForMovie": true
            }
        })
    }

    fn library_entry(record: LibraryRecord) -> LibraryEntry {
        let availability = if record.has_file.unwrap_or(false) {
            Availability::Downloaded
        } else {
            Availability::Searching
        };
        LibraryEntry {
            id: record.id,
            title: record.title.unwrap_or_else(|| "Unknown".to_string()),
            year: record.year.filter(|y| *y > 0),
            availability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id_uses_tmdb_endpoint() {
        let (endpoint, query) = Radarr::lookup_by_id_request(603);
        assert_eq!(endpoint, "movie/lookup/tmdb");
        assert_eq!(query, vec![("tmdbId", "603".to_string())]);
    }

    #[test]
    fn test_pick_lookup_match_accepts_object_or_array() {
        let movie = json!({"tmdbId": 603, "title": "The Matrix"});
        assert_eq!(Radarr::pick_lookup_match(movie.clone()), Some(movie.clone()));
        assert_eq!(Radarr::pick_lookup_match(json!([movie.clone()])), Some(movie));
        assert_eq!(Radarr::pick_lookup_match(json!({})), None);
        assert_eq!(Radarr::pick_lookup_match(Value::Null), None);
    }

    #[test]
    fn test_add_payload_searches_immediately() {
        let item = SearchResult {
            external_id: Some(603),
            title: Some("The Matrix".to_string()),
            year: Some(1999),
            title_slug: Some("the-matrix-603".to_string()),
            ..SearchResult::default()
        };
        let folder = RootFolder {
            id: None,
            path: "/movies".to_string(),
        };
        let profile = QualityProfile {
            id: 1,
            name: "Any".to_string(),
        };

        let payload = Radarr::add_payload(&item, &folder, &profile);
        assert_eq!(payload["tmdbId"], 603);
        assert_eq!(payload["year"], 1999);

        let undated = SearchResult {
            external_id: Some(999),
            ..SearchResult::default()
        };
        assert_eq!(Radarr::add_payload(&undated, &folder, &profile)["year"], 0);
        assert_eq!(payload["monitored"], true);
        assert_eq!(payload["addOptions"], json!({"searchForMovie": true}));
        assert!(payload.get("seasons").is_none());
    }

    #[test]
    fn test_library_entry_reports_download_state() {
        let downloaded = Radarr::library_entry(LibraryRecord {
            title: Some("Alien".to_string()),
            year: Some(1979),
            has_file: Some(true),
            ..LibraryRecord::default()
        });
        assert_eq!(downloaded.availability, Availability::Downloaded);
        assert_eq!(downloaded.year, Some(1979));

        let pending = Radarr::library_entry(LibraryRecord::default());
        assert_eq!(pending.availability, Availability::Searching);
    }
}

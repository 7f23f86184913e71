use super::http::{create_http_client, ArrHttp};
use super::types::{CommandAck, LibraryEntry, LibraryRecord, QualityProfile, RootFolder, SearchResult};
use super::{BackendError, MediaBackend, MediaKind, SearchOutcome};
use crate::config::BackendSettings;
use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::info;

/// Backend-specific paths, field names and payloads.
///
/// Everything else about the two clients is shared by [`ArrClient`].
pub trait ArrFlavor: Send + Sync + 'static {
    /// Which backend this flavor describes.
    const KIND: MediaKind;
    /// Library resource path, `series` or `movie`.
    const RESOURCE: &'static str;
    /// Lookup field holding the external id.
    const ID_FIELD: &'static str;
    /// Command name used by [`ArrClient::trigger_search`].
    const SEARCH_COMMAND: &'static str;
    /// Command field listing the internal ids to search for.
    const SEARCH_IDS_FIELD: &'static str;

    /// Endpoint and query for looking up one title by external id.
    fn lookup_by_id_request(external_id: i64) -> (String, Vec<(&'static str, String)>);

    /// Pick the matching record out of a lookup-by-id response.
    fn pick_lookup_match(body: Value) -> Option<Value>;

    /// Body of the "add" request, using the chosen folder and profile.
    fn add_payload(item: &SearchResult, root_folder: &RootFolder, profile: &QualityProfile) -> Value;

    /// Convert a raw library record.
    fn library_entry(record: LibraryRecord) -> LibraryEntry;
}

/// Client for one `*arr` backend.
pub struct ArrClient<F: ArrFlavor> {
    http: ArrHttp,
    _flavor: PhantomData<F>,
}

/// Sonarr client, shows keyed by TVDB id.
pub type SonarrClient = ArrClient<super::sonarr::Sonarr>;
/// Radarr client, movies keyed by TMDB id.
pub type RadarrClient = ArrClient<super::radarr::Radarr>;

impl<F: ArrFlavor> ArrClient<F> {
    /// Create a client with its own HTTP connection pool.
    #[must_use]
    pub fn new(settings: &BackendSettings, timeout: Duration) -> Self {
        Self::with_http_client(settings, create_http_client(timeout))
    }

    /// Create a client sharing an existing HTTP client.
    #[must_use]
    pub fn with_http_client(settings: &BackendSettings, client: reqwest::Client) -> Self {
        Self {
            http: ArrHttp::new(F::KIND, settings, client),
            _flavor: PhantomData,
        }
    }

    /// Search the backend catalog by term.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` if the request fails.
    pub async fn lookup(&self, term: &str) -> Result<Vec<SearchResult>, BackendError> {
        let endpoint = format!("{}/lookup", F::RESOURCE);
        let body: Vec<Value> = self
            .http
            .get_json(&endpoint, &[("term", term.to_string())])
            .await?;
        Ok(body
            .into_iter()
            .filter_map(|v| SearchResult::from_lookup(F::ID_FIELD, v))
            .collect())
    }

    /// Full metadata for one external id.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` if the request fails or the id is unknown.
    pub async fn lookup_by_external_id(&self, external_id: i64) -> Result<SearchResult, BackendError> {
        let (endpoint, query) = F::lookup_by_id_request(external_id);
        let body: Value = self.http.get_json(&endpoint, &query).await?;

        F::pick_lookup_match(body)
            .and_then(|v| SearchResult::from_lookup(F::ID_FIELD, v))
            .filter(|item| item.external_id.is_some())
            .ok_or_else(|| {
                BackendError::new(
                    F::KIND,
                    format!(
                        "{} with {} ID {external_id} not found",
                        title_noun(F::KIND),
                        F::KIND.catalog_name()
                    ),
                )
            })
    }

    /// Configured storage locations, in backend order.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` if the request fails.
    pub async fn root_folders(&self) -> Result<Vec<RootFolder>, BackendError> {
        self.http.get_json("rootfolder", &[]).await
    }

    /// Configured quality tiers, in backend order.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` if the request fails.
    pub async fn quality_profiles(&self) -> Result<Vec<QualityProfile>, BackendError> {
        self.http.get_json("qualityprofile", &[]).await
    }

    /// Submit a looked-up title to the library.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` if the backend rejects the title.
    pub async fn add(
        &self,
        item: &SearchResult,
        root_folder: &RootFolder,
        profile: &QualityProfile,
    ) -> Result<LibraryEntry, BackendError> {
        let payload = F::add_payload(item, root_folder, profile);
        let record: LibraryRecord = self.http.post_json(F::RESOURCE, &payload).await?;
        Ok(F::library_entry(record))
    }

    /// One library entry by backend-internal id.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` if the request fails.
    pub async fn get_by_id(&self, internal_id: i64) -> Result<LibraryEntry, BackendError> {
        let endpoint = format!("{}/{internal_id}", F::RESOURCE);
        let record: LibraryRecord = self.http.get_json(&endpoint, &[]).await?;
        Ok(F::library_entry(record))
    }

    /// Ask the backend to search its indexers for the given library ids.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` if the command is rejected.
    pub async fn trigger_search(&self, internal_ids: &[i64]) -> Result<CommandAck, BackendError> {
        let mut body = serde_json::Map::new();
        body.insert("name".to_string(), Value::from(F::SEARCH_COMMAND));
        body.insert(F::SEARCH_IDS_FIELD.to_string(), Value::from(internal_ids.to_vec()));
        self.http.post_json("command", &body).await
    }
}

#[async_trait]
impl<F: ArrFlavor> MediaBackend for ArrClient<F> {
    async fn search_by_title(&self, query: &str) -> Result<SearchOutcome, BackendError> {
        self.lookup(query).await.map(SearchOutcome::from_results)
    }

    async fn add_by_external_id(&self, external_id: i64) -> Result<LibraryEntry, BackendError> {
        let item = self.lookup_by_external_id(external_id).await?;
        let root_folders = self.root_folders().await?;
        let profiles = self.quality_profiles().await?;

        let (Some(root_folder), Some(profile)) = (root_folders.first(), profiles.first()) else {
            return Err(BackendError::new(
                F::KIND,
                format!(
                    "No root folders or quality profiles configured in {}",
                    F::KIND.backend_name()
                ),
            ));
        };

        info!(
            backend = F::KIND.backend_name(),
            external_id,
            root_folder = %root_folder.path,
            quality_profile = profile.id,
            "Adding title"
        );
        self.add(&item, root_folder, profile).await
    }

    async fn list_library(&self) -> Result<Vec<LibraryEntry>, BackendError> {
        let records: Vec<LibraryRecord> = self.http.get_json(F::RESOURCE, &[]).await?;
        Ok(records.into_iter().map(F::library_entry).collect())
    }
}

const fn title_noun(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Show => "Series",
        MediaKind::Movie => "Movie",
    }
}

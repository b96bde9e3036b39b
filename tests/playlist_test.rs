use std::sync::Mutex;

use async_trait::async_trait;
use musicbuzz::Res;
use musicbuzz::error::Error;
use musicbuzz::management::playlist::commit_playlist;
use musicbuzz::spotify::PlaylistService;
use musicbuzz::types::{CreatePlaylistRequest, CreatePlaylistResponse, ExternalUrls, UserProfile};

// In-memory playlist service: records every call, optionally failing the
// user lookup or a specific batch.
struct FakePlaylistService {
    fail_user: bool,
    fail_batch: Option<usize>,
    created: Mutex<Option<CreatePlaylistRequest>>,
    batches: Mutex<Vec<Vec<String>>>,
}

impl FakePlaylistService {
    fn new() -> Self {
        FakePlaylistService {
            fail_user: false,
            fail_batch: None,
            created: Mutex::new(None),
            batches: Mutex::new(Vec::new()),
        }
    }

    fn failing_user(mut self) -> Self {
        self.fail_user = true;
        self
    }

    fn failing_batch(mut self, index: usize) -> Self {
        self.fail_batch = Some(index);
        self
    }
}

#[async_trait]
impl PlaylistService for FakePlaylistService {
    async fn current_user(&self, _token: &str) -> Res<UserProfile> {
        if self.fail_user {
            return Err(Error::Upstream {
                status: 401,
                body: "The access token expired".to_string(),
            });
        }
        Ok(UserProfile {
            id: "user-1".to_string(),
            display_name: Some("Tester".to_string()),
            email: None,
        })
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
        _token: &str,
    ) -> Res<CreatePlaylistResponse> {
        assert_eq!(user_id, "user-1");
        *self.created.lock().unwrap() = Some(request.clone());
        Ok(CreatePlaylistResponse {
            id: "pl-1".to_string(),
            name: request.name.clone(),
            external_urls: ExternalUrls {
                spotify: Some("https://open.spotify.com/playlist/pl-1".to_string()),
            },
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String], _token: &str) -> Res<()> {
        assert_eq!(playlist_id, "pl-1");
        let mut batches = self.batches.lock().unwrap();
        if self.fail_batch == Some(batches.len()) {
            return Err(Error::Upstream {
                status: 503,
                body: "Service unavailable".to_string(),
            });
        }
        batches.push(uris.to_vec());
        Ok(())
    }
}

fn uris(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("spotify:track:{i}")).collect()
}

#[tokio::test]
async fn test_batches_of_100_in_order() {
    let service = FakePlaylistService::new();
    let uris = uris(250);

    let result = commit_playlist(&service, "Mix", &uris, false, None, "token")
        .await
        .unwrap();

    assert_eq!(result.added, 250);
    assert_eq!(result.batches, 3);

    // 100/100/50, strictly in input order with no overlap
    let batches = service.batches.lock().unwrap();
    assert_eq!(
        batches.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![100, 100, 50]
    );
    assert_eq!(batches[0][0], "spotify:track:0");
    assert_eq!(batches[1][0], "spotify:track:100");
    assert_eq!(batches[2][0], "spotify:track:200");
    assert_eq!(batches[2][49], "spotify:track:249");
}

#[tokio::test]
async fn test_small_list_is_a_single_batch() {
    let service = FakePlaylistService::new();
    let uris = uris(3);

    let result = commit_playlist(&service, "Mix", &uris, false, None, "token")
        .await
        .unwrap();

    assert_eq!(result.batches, 1);
    assert_eq!(service.batches.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_commit_result_reflects_the_created_playlist() {
    let service = FakePlaylistService::new();

    let result = commit_playlist(&service, "  Mix  ", &uris(1), true, None, "token")
        .await
        .unwrap();

    assert_eq!(result.id, "pl-1");
    assert_eq!(result.name, "Mix");
    assert_eq!(
        result.url.as_deref(),
        Some("https://open.spotify.com/playlist/pl-1")
    );

    // Name is trimmed and visibility passed through
    let created = service.created.lock().unwrap().clone().unwrap();
    assert_eq!(created.name, "Mix");
    assert!(created.public);
    assert!(!created.collaborative);
}

#[tokio::test]
async fn test_description_defaults_and_overrides() {
    let service = FakePlaylistService::new();
    commit_playlist(&service, "Mix", &uris(1), false, None, "token")
        .await
        .unwrap();
    assert_eq!(
        service.created.lock().unwrap().clone().unwrap().description,
        "Created by MusicBuzz"
    );

    let service = FakePlaylistService::new();
    commit_playlist(
        &service,
        "Mix",
        &uris(1),
        false,
        Some("Summer set".to_string()),
        "token",
    )
    .await
    .unwrap();
    assert_eq!(
        service.created.lock().unwrap().clone().unwrap().description,
        "Summer set"
    );
}

#[tokio::test]
async fn test_blank_name_fails_before_any_remote_call() {
    let service = FakePlaylistService::new();

    let err = commit_playlist(&service, "   ", &uris(1), false, None, "token")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(service.created.lock().unwrap().is_none());
    assert!(service.batches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_uris_fail_before_any_remote_call() {
    let service = FakePlaylistService::new();

    let err = commit_playlist(&service, "Mix", &[], false, None, "token")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(service.created.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_batch_failure_after_creation_is_a_partial_commit() {
    let service = FakePlaylistService::new().failing_batch(1);

    let err = commit_playlist(&service, "Mix", &uris(250), false, None, "token")
        .await
        .unwrap_err();

    // The playlist exists with only the first batch applied; the error must
    // say so
    match err {
        Error::PartialCommit {
            playlist_id,
            applied,
            total,
            source,
        } => {
            assert_eq!(playlist_id, "pl-1");
            assert_eq!(applied, 1);
            assert_eq!(total, 3);
            assert!(matches!(*source, Error::Upstream { status: 503, .. }));
        }
        other => panic!("expected PartialCommit, got {other:?}"),
    }
    assert_eq!(service.batches.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_failure_before_creation_is_not_a_partial_commit() {
    let service = FakePlaylistService::new().failing_user();

    let err = commit_playlist(&service, "Mix", &uris(5), false, None, "token")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upstream { status: 401, .. }));
    assert!(service.created.lock().unwrap().is_none());
}

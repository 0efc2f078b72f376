use catalogue_sync::api::EpisodeRecord;
use catalogue_sync::clients::FavoriteClient;
use catalogue_sync::config::CatalogueConfig;
use catalogue_sync::controllers::{CharacterDetailController, CharacterDetailHandle, DetailContext};
use catalogue_sync::error::SyncError;
use catalogue_sync::favorite_store::{self, StoreError};
use catalogue_sync::model::{Character, CharacterId, FavoriteRecord, Location, Origin};
use catalogue_sync::navigation::{NavigationInstruction, NavigationReceiver};
use catalogue_sync::remote::memory::InMemoryCatalogue;
use catalogue_sync::remote::mock::{create_mock_catalogue, expect_episode, CatalogueRequest};
use catalogue_sync::remote::{CatalogueError, CatalogueService};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use sync_framework::mock::{create_mock_client, expect_exists, expect_insert, MockStore};
use sync_framework::FrameworkError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

const EPISODE_URL: &str = "https://rickandmortyapi.com/api/episode";

fn character(id: u32, episodes: &[u32]) -> Character {
    Character {
        id: CharacterId(id),
        name: format!("Character {id}"),
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        gender: "Female".into(),
        species: "Human".into(),
        status: "Alive".into(),
        origin: Origin {
            name: "Earth (C-137)".into(),
            url: "https://rickandmortyapi.com/api/location/1".into(),
        },
        location: Location {
            name: "Citadel of Ricks".into(),
            url: "https://rickandmortyapi.com/api/location/3".into(),
        },
        episode_list: episodes
            .iter()
            .map(|n| format!("{EPISODE_URL}/{n}/"))
            .collect(),
    }
}

fn episode_record(id: i64) -> EpisodeRecord {
    EpisodeRecord {
        id,
        name: format!("Episode {id}"),
        air_date: "December 2, 2013".into(),
        code: format!("S01E{id:02}"),
        url: format!("{EPISODE_URL}/{id}"),
    }
}

struct Screen {
    handle: CharacterDetailHandle,
    events: NavigationReceiver,
    task: JoinHandle<()>,
}

fn open(
    character: Option<Character>,
    catalogue: Arc<dyn CatalogueService>,
    favorites: FavoriteClient,
) -> Screen {
    let (controller, handle, events) =
        CharacterDetailController::new(character, &CatalogueConfig::default());
    let task = tokio::spawn(controller.run(DetailContext {
        catalogue,
        favorites,
    }));
    Screen {
        handle,
        events,
        task,
    }
}

/// Detail screen over a real favorite store and a fixture catalogue.
fn open_with_store(character: Option<Character>) -> (Screen, FavoriteClient) {
    let (store, favorites) = favorite_store::new(10);
    tokio::spawn(store.run());
    let catalogue = Arc::new(InMemoryCatalogue::sample(5, 3));
    (open(character, catalogue, favorites.clone()), favorites)
}

/// Detail screen whose catalogue requests are answered by the test.
fn open_with_mock_catalogue(
    character: Option<Character>,
) -> (Screen, mpsc::UnboundedReceiver<CatalogueRequest>) {
    let (store, favorites) = favorite_store::new(10);
    tokio::spawn(store.run());
    let (catalogue, requests) = create_mock_catalogue();
    (open(character, Arc::new(catalogue), favorites), requests)
}

async fn next_instruction(events: &mut NavigationReceiver) -> NavigationInstruction {
    let event = timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("Timed out waiting for an instruction")
        .expect("Event stream closed");
    event.consume().cloned().expect("Event already handled")
}

// =============================================================================
// Favorite reconciliation
// =============================================================================

#[tokio::test]
async fn test_check_status_reflects_store() {
    let (screen, favorites) = open_with_store(Some(character(1, &[1])));

    assert!(!screen.handle.check_status(CharacterId(1)).await.unwrap());
    assert_eq!(screen.handle.is_favorite(), Some(false));

    favorites.insert(&character(1, &[1])).await.unwrap();

    assert!(screen.handle.check_status(CharacterId(1)).await.unwrap());
    assert_eq!(screen.handle.is_favorite(), Some(true));
    assert!(!screen.handle.check_status(CharacterId(2)).await.unwrap());
}

#[tokio::test]
async fn test_repeated_checks_are_idempotent() {
    let (screen, favorites) = open_with_store(Some(character(7, &[])));
    favorites.insert(&character(7, &[])).await.unwrap();

    assert!(screen.handle.check_status(CharacterId(7)).await.unwrap());
    assert!(screen.handle.check_status(CharacterId(7)).await.unwrap());
    assert_eq!(favorites.favorites().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_toggle_inserts_absent_character() {
    let (screen, favorites) = open_with_store(Some(character(3, &[1, 2])));

    assert!(screen.handle.toggle_status().await.unwrap());
    assert_eq!(screen.handle.is_favorite(), Some(true));

    let stored = favorites.favorites().await.unwrap();
    assert_eq!(stored, vec![character(3, &[1, 2])]);
}

#[tokio::test]
async fn test_toggle_of_favorite_publishes_false_and_keeps_record() {
    let (screen, favorites) = open_with_store(Some(character(3, &[1])));

    assert!(screen.handle.toggle_status().await.unwrap());
    assert!(!screen.handle.toggle_status().await.unwrap());
    assert_eq!(screen.handle.is_favorite(), Some(false));

    // Still stored exactly once
    assert_eq!(favorites.favorites().await.unwrap().len(), 1);
    assert!(screen.handle.check_status(CharacterId(3)).await.unwrap());
}

#[tokio::test]
async fn test_toggle_without_character_fails() {
    let (screen, favorites) = open_with_store(None);

    assert_eq!(
        screen.handle.toggle_status().await,
        Err(SyncError::MissingCharacter)
    );
    assert!(favorites.favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_of_invalid_character_is_rejected_by_store() {
    let mut nameless = character(4, &[]);
    nameless.name = String::new();
    let (screen, favorites) = open_with_store(Some(nameless));

    let result = screen.handle.toggle_status().await;

    assert!(matches!(
        result,
        Err(SyncError::Store(StoreError::ValidationError(_)))
    ));
    assert_eq!(screen.handle.is_favorite(), None);
    assert!(favorites.favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_failure_is_returned_and_flag_untouched() {
    let mut mock = MockStore::<FavoriteRecord>::new();
    mock.expect_exists(CharacterId(1)).return_ok(true);
    mock.expect_exists(CharacterId(1))
        .return_err(FrameworkError::ActorClosed);
    mock.expect_exists(CharacterId(1)).return_ok(false);
    mock.expect_insert().return_err(FrameworkError::ActorDropped);

    let catalogue = Arc::new(InMemoryCatalogue::sample(1, 1));
    let screen = open(
        Some(character(1, &[])),
        catalogue,
        FavoriteClient::new(mock.client()),
    );

    assert!(screen.handle.check_status(CharacterId(1)).await.unwrap());
    assert!(matches!(
        screen.handle.check_status(CharacterId(1)).await,
        Err(SyncError::Store(StoreError::ActorCommunicationError(_)))
    ));
    assert_eq!(screen.handle.is_favorite(), Some(true));

    assert!(matches!(
        screen.handle.toggle_status().await,
        Err(SyncError::Store(StoreError::ActorCommunicationError(_)))
    ));
    assert_eq!(screen.handle.is_favorite(), Some(true));

    mock.verify();
}

#[tokio::test]
async fn test_concurrent_checks_share_one_query() {
    let (client, mut store_requests) = create_mock_client::<FavoriteRecord>(10);
    let (catalogue, _catalogue_requests) = create_mock_catalogue();
    let mut screen = open(
        Some(character(9, &[])),
        Arc::new(catalogue),
        FavoriteClient::new(client),
    );
    let handle = screen.handle.clone();
    let events = &mut screen.events;

    let (first, second, ()) = tokio::join!(
        handle.check_status(CharacterId(9)),
        handle.check_status(CharacterId(9)),
        async {
            // Both checks are queued ahead of this command; once its loading
            // event shows up, the controller has handled them.
            handle.resolve_episodes(Vec::new()).await.unwrap();
            assert_eq!(
                next_instruction(events).await,
                NavigationInstruction::ShowEpisodeListLoading
            );

            let (id, responder) = expect_exists(&mut store_requests)
                .await
                .expect("Expected Exists request");
            assert_eq!(id, CharacterId(9));
            responder.send(Ok(true)).unwrap();
        }
    );

    assert_eq!(first, Ok(true));
    assert_eq!(second, Ok(true));
    assert!(store_requests.try_recv().is_err());
}

#[tokio::test]
async fn test_check_started_before_toggle_does_not_overwrite_it() {
    let (client, mut store_requests) = create_mock_client::<FavoriteRecord>(10);
    let (catalogue, _catalogue_requests) = create_mock_catalogue();
    let screen = open(
        Some(character(9, &[])),
        Arc::new(catalogue),
        FavoriteClient::new(client),
    );

    let check = tokio::spawn({
        let handle = screen.handle.clone();
        async move { handle.check_status(CharacterId(9)).await }
    });
    let (_, held) = expect_exists(&mut store_requests)
        .await
        .expect("Expected Exists request");

    let toggle = tokio::spawn({
        let handle = screen.handle.clone();
        async move { handle.toggle_status().await }
    });
    let (_, responder) = expect_exists(&mut store_requests)
        .await
        .expect("Expected Exists request");
    responder.send(Ok(false)).unwrap();
    let (record, responder) = expect_insert(&mut store_requests)
        .await
        .expect("Expected Insert request");
    assert_eq!(record.id, CharacterId(9));
    responder.send(Ok(true)).unwrap();

    assert_eq!(toggle.await.unwrap(), Ok(true));
    assert_eq!(screen.handle.is_favorite(), Some(true));

    // The check read the store before the insert
    held.send(Ok(false)).unwrap();
    assert_eq!(check.await.unwrap(), Ok(false));
    assert_eq!(screen.handle.is_favorite(), Some(true));
}

#[tokio::test]
async fn test_check_after_toggle_publishes() {
    let (client, mut store_requests) = create_mock_client::<FavoriteRecord>(10);
    let (catalogue, _catalogue_requests) = create_mock_catalogue();
    let screen = open(
        Some(character(9, &[])),
        Arc::new(catalogue),
        FavoriteClient::new(client),
    );

    let toggle = tokio::spawn({
        let handle = screen.handle.clone();
        async move { handle.toggle_status().await }
    });
    let (_, responder) = expect_exists(&mut store_requests)
        .await
        .expect("Expected Exists request");
    responder.send(Ok(true)).unwrap();
    assert_eq!(toggle.await.unwrap(), Ok(false));
    assert_eq!(screen.handle.is_favorite(), Some(false));

    let check = tokio::spawn({
        let handle = screen.handle.clone();
        async move { handle.check_status(CharacterId(9)).await }
    });
    let (_, responder) = expect_exists(&mut store_requests)
        .await
        .expect("Expected Exists request");
    responder.send(Ok(true)).unwrap();
    assert_eq!(check.await.unwrap(), Ok(true));
    assert_eq!(screen.handle.is_favorite(), Some(true));
}

// =============================================================================
// Episode resolution
// =============================================================================

/// Collects the next `count` episode requests, keyed by reference.
async fn episode_requests(
    requests: &mut mpsc::UnboundedReceiver<CatalogueRequest>,
    count: usize,
) -> HashMap<String, tokio::sync::oneshot::Sender<Result<EpisodeRecord, CatalogueError>>> {
    let mut pending = HashMap::new();
    for _ in 0..count {
        let (reference, responder) = expect_episode(requests)
            .await
            .expect("Expected Episode request");
        pending.insert(reference, responder);
    }
    pending
}

#[tokio::test]
async fn test_episodes_keep_input_order() {
    let (mut screen, mut requests) = open_with_mock_catalogue(None);
    let references: Vec<String> = ["a/", "b/", "c/"].iter().map(|r| r.to_string()).collect();

    screen.handle.resolve_episodes(references).await.unwrap();
    assert_eq!(
        next_instruction(&mut screen.events).await,
        NavigationInstruction::ShowEpisodeListLoading
    );

    let mut pending = episode_requests(&mut requests, 3).await;
    // Answer out of order
    for (reference, id) in [("c/", 3), ("a/", 1), ("b/", 2)] {
        let responder = pending.remove(reference).unwrap();
        responder.send(Ok(episode_record(id))).unwrap();
    }

    assert_eq!(
        next_instruction(&mut screen.events).await,
        NavigationInstruction::HideEpisodeListLoading
    );
    let NavigationInstruction::ShowEpisodeList(episodes) =
        next_instruction(&mut screen.events).await
    else {
        panic!("Expected ShowEpisodeList");
    };
    let ids: Vec<u32> = episodes.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(episodes[0].code, "S01E01");
}

#[tokio::test]
async fn test_episode_failure_is_fail_fast() {
    let (mut screen, mut requests) = open_with_mock_catalogue(None);
    let references: Vec<String> = ["a/", "b/", "c/"].iter().map(|r| r.to_string()).collect();

    screen.handle.resolve_episodes(references).await.unwrap();
    next_instruction(&mut screen.events).await;

    let mut pending = episode_requests(&mut requests, 3).await;
    let mut unanswered = pending.remove("c/").unwrap();
    pending
        .remove("a/")
        .unwrap()
        .send(Ok(episode_record(1)))
        .unwrap();
    let failure = CatalogueError::NotFound("b/".into());
    pending.remove("b/").unwrap().send(Err(failure.clone())).unwrap();

    assert_eq!(
        next_instruction(&mut screen.events).await,
        NavigationInstruction::HideEpisodeListLoading
    );
    assert_eq!(
        next_instruction(&mut screen.events).await,
        NavigationInstruction::ShowEpisodeError(SyncError::Network(failure))
    );

    // The remaining fetch was dropped
    timeout(Duration::from_secs(1), unanswered.closed())
        .await
        .expect("Remaining fetch was not dropped");
    assert!(screen.events.try_recv().is_err());
}

#[tokio::test]
async fn test_malformed_episode_is_reported() {
    let (mut screen, mut requests) = open_with_mock_catalogue(None);

    screen
        .handle
        .resolve_episodes(vec!["a/".into()])
        .await
        .unwrap();
    next_instruction(&mut screen.events).await;

    let mut pending = episode_requests(&mut requests, 1).await;
    pending
        .remove("a/")
        .unwrap()
        .send(Ok(episode_record(-1)))
        .unwrap();

    next_instruction(&mut screen.events).await;
    assert!(matches!(
        next_instruction(&mut screen.events).await,
        NavigationInstruction::ShowEpisodeError(SyncError::Mapping(_))
    ));
}

#[tokio::test]
async fn test_superseded_resolution_is_not_shown() {
    let (mut screen, mut requests) = open_with_mock_catalogue(None);

    for reference in ["old/", "new/"] {
        screen
            .handle
            .resolve_episodes(vec![reference.into()])
            .await
            .unwrap();
        assert_eq!(
            next_instruction(&mut screen.events).await,
            NavigationInstruction::ShowEpisodeListLoading
        );
    }
    let mut pending = episode_requests(&mut requests, 2).await;

    pending
        .remove("new/")
        .unwrap()
        .send(Ok(episode_record(2)))
        .unwrap();
    assert_eq!(
        next_instruction(&mut screen.events).await,
        NavigationInstruction::HideEpisodeListLoading
    );
    let NavigationInstruction::ShowEpisodeList(episodes) =
        next_instruction(&mut screen.events).await
    else {
        panic!("Expected ShowEpisodeList");
    };
    assert_eq!(episodes[0].id, 2);

    // The older request finishes last and is dropped
    pending
        .remove("old/")
        .unwrap()
        .send(Ok(episode_record(1)))
        .unwrap();
    assert!(
        timeout(Duration::from_millis(100), screen.events.recv())
            .await
            .is_err()
    );
}

// =============================================================================
// Validation & teardown
// =============================================================================

#[tokio::test]
async fn test_validate_without_character_closes_screen() {
    let (mut screen, _favorites) = open_with_store(None);

    screen.handle.validate().await.unwrap();

    assert_eq!(
        next_instruction(&mut screen.events).await,
        NavigationInstruction::CloseScreen
    );
    assert_eq!(screen.handle.character(), None);
}

#[tokio::test]
async fn test_validate_shows_character_status_and_episodes() {
    let shown = character(2, &[2, 3, 4]);
    let (mut screen, _favorites) = open_with_store(Some(shown.clone()));

    screen.handle.validate().await.unwrap();

    assert_eq!(
        next_instruction(&mut screen.events).await,
        NavigationInstruction::ShowEpisodeListLoading
    );
    assert_eq!(
        next_instruction(&mut screen.events).await,
        NavigationInstruction::HideEpisodeListLoading
    );
    let NavigationInstruction::ShowEpisodeList(episodes) =
        next_instruction(&mut screen.events).await
    else {
        panic!("Expected ShowEpisodeList");
    };
    let ids: Vec<u32> = episodes.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 3, 4]);

    assert_eq!(screen.handle.character(), Some(shown));
    let mut favorite = screen.handle.watch_favorite();
    let status = timeout(Duration::from_secs(1), favorite.wait_for(|v| v.is_some()))
        .await
        .expect("Status was never published")
        .map(|v| *v)
        .unwrap();
    assert_eq!(status, Some(false));
}

#[tokio::test]
async fn test_closing_screen_aborts_episode_fetches() {
    let (screen, mut requests) = open_with_mock_catalogue(None);
    screen
        .handle
        .resolve_episodes(vec!["a/".into(), "b/".into()])
        .await
        .unwrap();

    let pending = episode_requests(&mut requests, 2).await;

    drop(screen.handle);
    screen.task.await.unwrap();

    for (_, mut responder) in pending {
        timeout(Duration::from_secs(1), responder.closed())
            .await
            .expect("Fetch was not aborted");
    }
}

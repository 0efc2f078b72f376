use std::time::Duration;
use sync_framework::{FrameworkError, RecordActor, StoreRecord};
use tokio_stream::StreamExt;

// --- Test Record ---

#[derive(Clone, Debug, PartialEq)]
struct Bookmark {
    id: u32,
    title: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Bookmark title must not be empty")]
struct BookmarkError;

impl StoreRecord for Bookmark {
    type Id = u32;
    type Error = BookmarkError;

    fn id(&self) -> u32 {
        self.id
    }

    fn validate(&self) -> Result<(), Self::Error> {
        if self.title.is_empty() {
            return Err(BookmarkError);
        }
        Ok(())
    }
}

fn bookmark(id: u32, title: &str) -> Bookmark {
    Bookmark {
        id,
        title: title.to_string(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (actor, client) = RecordActor::new(10);
    let handle = tokio::spawn(actor.run());

    // 1. Insert
    assert!(!client.exists(1).await.unwrap());
    assert!(client.insert(bookmark(1, "Pilot")).await.unwrap());
    assert!(client.exists(1).await.unwrap());

    // 2. Insert again under the same key replaces, never duplicates
    let created_again = client.insert(bookmark(1, "Pilot (remastered)")).await.unwrap();
    assert!(!created_again);
    let all = client.all().await.unwrap();
    assert_eq!(all, vec![bookmark(1, "Pilot (remastered)")]);

    // 3. Validation failure leaves the store untouched
    let rejected = client.insert(bookmark(2, "")).await;
    assert!(matches!(rejected, Err(FrameworkError::RecordError(_))));
    assert!(!client.exists(2).await.unwrap());

    // 4. Delete
    assert!(client.delete(1).await.unwrap());
    assert!(!client.delete(1).await.unwrap());
    assert!(client.get(1).await.unwrap().is_none());

    // 5. Shutdown when the last client goes away
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_all_is_ordered_by_key() {
    let (actor, client) = RecordActor::new(10);
    tokio::spawn(actor.run());

    for id in [5, 1, 3] {
        client.insert(bookmark(id, "x")).await.unwrap();
    }

    let ids: Vec<u32> = client.all().await.unwrap().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 3, 5]);
}

#[tokio::test]
async fn test_observe_all_redelivers_full_set_on_mutation() {
    let (actor, client) = RecordActor::new(10);
    tokio::spawn(actor.run());

    let mut stream = client.observe_all();
    let initial = stream.next().await.unwrap();
    assert!(initial.is_empty());

    client.insert(bookmark(2, "Rixty Minutes")).await.unwrap();
    let after_first = tokio::time::timeout(Duration::from_secs(1), stream.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_first, vec![bookmark(2, "Rixty Minutes")]);

    client.insert(bookmark(1, "Pilot")).await.unwrap();
    let after_second = tokio::time::timeout(Duration::from_secs(1), stream.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_second, vec![bookmark(1, "Pilot"), bookmark(2, "Rixty Minutes")]);

    // A new subscription restarts from the current set
    let mut restarted = client.observe_all();
    assert_eq!(restarted.next().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_closed_store_reports_actor_closed() {
    let (actor, client) = RecordActor::<Bookmark>::new(10);
    drop(actor);

    let result = client.exists(1).await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
}

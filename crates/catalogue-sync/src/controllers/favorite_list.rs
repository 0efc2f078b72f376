//! # Favorite List Controller
//!
//! Follows the favorite store's `observe_all` stream and turns every
//! delivered set into an instruction for the favorites screen:
//! `ShowFavoriteList` when there is something to show, `ShowEmptyFavoriteList`
//! otherwise. The stream redelivers the full set after each insert or delete,
//! so the screen never has to merge updates itself.

use crate::clients::FavoriteClient;
use crate::config::CatalogueConfig;
use crate::error::SyncError;
use crate::model::Character;
use crate::navigation::{NavigationInstruction, NavigationReceiver};
use futures::StreamExt;
use sync_framework::{event_channel, EventEmitter};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

#[derive(Debug)]
enum FavoriteListCommand {
    Current {
        respond_to: oneshot::Sender<Vec<Character>>,
    },
}

/// The actor behind the favorites screen.
pub struct FavoriteListController {
    receiver: mpsc::Receiver<FavoriteListCommand>,
    events: EventEmitter<NavigationInstruction>,
    favorites: Vec<Character>,
}

impl FavoriteListController {
    pub fn new(config: &CatalogueConfig) -> (Self, FavoriteListHandle, NavigationReceiver) {
        let (sender, receiver) = mpsc::channel(config.command_buffer);
        let (events, observer) = event_channel();
        let controller = Self {
            receiver,
            events,
            favorites: Vec::new(),
        };
        (controller, FavoriteListHandle { sender }, observer)
    }

    /// Follows the store until every handle is dropped. When the store shuts
    /// down first, the last delivered set stays available.
    pub async fn run(mut self, store: FavoriteClient) {
        info!(controller = "favorite_list", "Controller started");
        let mut updates = store.observe_all();
        let mut observing = true;

        loop {
            tokio::select! {
                command = self.receiver.recv() => match command {
                    Some(FavoriteListCommand::Current { respond_to }) => {
                        let _ = respond_to.send(self.favorites.clone());
                    }
                    None => break,
                },
                update = updates.next(), if observing => match update {
                    Some(favorites) => self.on_favorite_list(favorites),
                    None => {
                        debug!("Favorite store closed");
                        observing = false;
                    }
                },
            }
        }

        info!(
            controller = "favorite_list",
            favorites = self.favorites.len(),
            "Controller stopped"
        );
    }

    fn on_favorite_list(&mut self, favorites: Vec<Character>) {
        debug!(favorites = favorites.len(), "Favorites updated");
        if favorites.is_empty() {
            self.events.emit(NavigationInstruction::ShowEmptyFavoriteList);
        } else {
            self.events.emit(NavigationInstruction::ShowFavoriteList(favorites.clone()));
        }
        self.favorites = favorites;
    }
}

/// Cloneable handle to a running [`FavoriteListController`].
#[derive(Clone)]
pub struct FavoriteListHandle {
    sender: mpsc::Sender<FavoriteListCommand>,
}

impl FavoriteListHandle {
    /// The set most recently shown on the screen.
    pub async fn current(&self) -> Result<Vec<Character>, SyncError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FavoriteListCommand::Current { respond_to })
            .await
            .map_err(|_| SyncError::ControllerClosed)?;
        response.await.map_err(|_| SyncError::ControllerClosed)
    }
}

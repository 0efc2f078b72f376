//! # Character Detail Controller
//!
//! Backs the detail screen of a single character: reconciles the favorite
//! flag with the favorite store and resolves the character's episodes.
//!
//! ## Favorite Reconciliation
//!
//! - `check_status(id)` asks the store whether a record exists and publishes
//!   the answer on the `is_favorite` watch.
//! - `toggle_status()` inserts the screen's character if it is not stored
//!   yet, then publishes whether it was absent before. Toggling a character
//!   that is already a favorite leaves the store alone and publishes `false`.
//!
//! Requests for the same answer are joined while one is in flight: a second
//! `check_status` for an id already being checked, or a second toggle while
//! one is running, waits for the outstanding query instead of issuing another.
//!
//! Every successful toggle starts a new generation. A check spawned before
//! the latest toggle completed still answers its callers but no longer
//! publishes, so a slow read cannot overwrite the toggle's newer answer.
//!
//! Store failures are returned to the caller; `is_favorite` keeps its last
//! value.
//!
//! ## Episode Resolution
//!
//! All references are fetched concurrently and collected in input order. The
//! first failure drops the remaining fetches and is reported on its own; a
//! partial list is never shown. Only the latest request reaches the screen;
//! a resolution superseded by a newer one is dropped when it completes.

use crate::api::mapper::to_episode_domain;
use crate::clients::FavoriteClient;
use crate::config::CatalogueConfig;
use crate::error::SyncError;
use crate::favorite_store::StoreError;
use crate::model::{Character, CharacterId, Episode};
use crate::navigation::{NavigationInstruction, NavigationReceiver};
use crate::remote::CatalogueService;
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;
use sync_framework::{event_channel, DisposeBag, EventEmitter, StoreClient};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument, warn};

type StatusResponder = oneshot::Sender<Result<bool, SyncError>>;

/// Collaborators the detail controller runs against.
#[derive(Clone)]
pub struct DetailContext {
    pub catalogue: Arc<dyn CatalogueService>,
    pub favorites: FavoriteClient,
}

#[derive(Debug)]
enum DetailCommand {
    Validate,
    CheckStatus {
        character_id: CharacterId,
        respond_to: StatusResponder,
    },
    ToggleStatus {
        respond_to: StatusResponder,
    },
    ResolveEpisodes {
        references: Vec<String>,
    },
}

/// Results of background work, delivered back to the controller task.
enum DetailOutcome {
    StatusChecked {
        character_id: CharacterId,
        generation: u64,
        result: Result<bool, StoreError>,
    },
    Toggled {
        character_id: CharacterId,
        result: Result<bool, StoreError>,
    },
    EpisodesResolved {
        request: u64,
        result: Result<Vec<Episode>, SyncError>,
    },
}

/// The actor behind a character detail screen.
pub struct CharacterDetailController {
    character: Option<Character>,
    receiver: mpsc::Receiver<DetailCommand>,
    outcomes: mpsc::UnboundedReceiver<DetailOutcome>,
    outcome_sender: mpsc::UnboundedSender<DetailOutcome>,
    events: EventEmitter<NavigationInstruction>,
    is_favorite: watch::Sender<Option<bool>>,
    shown_character: watch::Sender<Option<Character>>,
    /// Outstanding checks keyed by id and the generation they started in.
    pending_checks: HashMap<(CharacterId, u64), Vec<StatusResponder>>,
    pending_toggle: Option<Vec<StatusResponder>>,
    /// Bumped by every successful toggle.
    generation: u64,
    /// Sequence number of the latest episode resolution.
    episode_request: u64,
    disposables: DisposeBag,
}

impl CharacterDetailController {
    /// Creates a controller for `character`. A screen opened without a
    /// character closes itself on [`validate`](CharacterDetailHandle::validate).
    pub fn new(
        character: Option<Character>,
        config: &CatalogueConfig,
    ) -> (Self, CharacterDetailHandle, NavigationReceiver) {
        let (sender, receiver) = mpsc::channel(config.command_buffer);
        let (outcome_sender, outcomes) = mpsc::unbounded_channel();
        let (events, observer) = event_channel();
        let (is_favorite, favorite_observer) = watch::channel(None);
        let (shown_character, character_observer) = watch::channel(None);

        let controller = Self {
            character,
            receiver,
            outcomes,
            outcome_sender,
            events,
            is_favorite,
            shown_character,
            pending_checks: HashMap::new(),
            pending_toggle: None,
            generation: 0,
            episode_request: 0,
            disposables: DisposeBag::new(),
        };
        let handle = CharacterDetailHandle {
            sender,
            is_favorite: favorite_observer,
            character: character_observer,
        };
        (controller, handle, observer)
    }

    /// Processes commands and background results until every handle is
    /// dropped. Outstanding work is aborted on exit.
    pub async fn run(mut self, context: DetailContext) {
        let character_id = self.character.as_ref().map(|c| c.id.0);
        info!(controller = "character_detail", ?character_id, "Controller started");

        loop {
            tokio::select! {
                command = self.receiver.recv() => match command {
                    Some(command) => self.handle_command(command, &context),
                    None => break,
                },
                Some(outcome) = self.outcomes.recv() => self.handle_outcome(outcome),
            }
        }

        self.disposables.dispose();
        info!(controller = "character_detail", ?character_id, "Controller stopped");
    }

    fn handle_command(&mut self, command: DetailCommand, context: &DetailContext) {
        match command {
            DetailCommand::Validate => self.validate(context),
            DetailCommand::CheckStatus {
                character_id,
                respond_to,
            } => self.check_status(character_id, Some(respond_to), context),
            DetailCommand::ToggleStatus { respond_to } => self.toggle_status(respond_to, context),
            DetailCommand::ResolveEpisodes { references } => {
                self.resolve_episodes(references, context)
            }
        }
    }

    fn validate(&mut self, context: &DetailContext) {
        let Some(character) = self.character.clone() else {
            info!("No character to show, closing screen");
            self.events.emit(NavigationInstruction::CloseScreen);
            return;
        };

        self.shown_character.send_replace(Some(character.clone()));
        self.check_status(character.id, None, context);
        self.resolve_episodes(character.episode_list, context);
    }

    fn check_status(
        &mut self,
        character_id: CharacterId,
        respond_to: Option<StatusResponder>,
        context: &DetailContext,
    ) {
        let generation = self.generation;
        if let Some(waiters) = self.pending_checks.get_mut(&(character_id, generation)) {
            debug!(%character_id, "Joining outstanding status check");
            waiters.extend(respond_to);
            return;
        }
        self.pending_checks
            .insert((character_id, generation), respond_to.into_iter().collect());

        let favorites = context.favorites.clone();
        let outcomes = self.outcome_sender.clone();
        self.disposables.add(async move {
            let result = favorites.exists(character_id).await;
            let _ = outcomes.send(DetailOutcome::StatusChecked {
                character_id,
                generation,
                result,
            });
        });
    }

    fn toggle_status(&mut self, respond_to: StatusResponder, context: &DetailContext) {
        let Some(character) = self.character.clone() else {
            let _ = respond_to.send(Err(SyncError::MissingCharacter));
            return;
        };
        if let Some(waiters) = self.pending_toggle.as_mut() {
            debug!(character_id = %character.id, "Joining outstanding toggle");
            waiters.push(respond_to);
            return;
        }
        self.pending_toggle = Some(vec![respond_to]);

        let favorites = context.favorites.clone();
        let outcomes = self.outcome_sender.clone();
        self.disposables.add(async move {
            let character_id = character.id;
            let result = async {
                let was_absent = !favorites.exists(character_id).await?;
                if was_absent {
                    favorites.insert(&character).await?;
                }
                Ok::<_, StoreError>(was_absent)
            }
            .await;
            let _ = outcomes.send(DetailOutcome::Toggled {
                character_id,
                result,
            });
        });
    }

    fn resolve_episodes(&mut self, references: Vec<String>, context: &DetailContext) {
        self.events.emit(NavigationInstruction::ShowEpisodeListLoading);
        self.episode_request += 1;
        let request = self.episode_request;
        debug!(request, episodes = references.len(), "Resolving episodes");

        let catalogue = Arc::clone(&context.catalogue);
        let outcomes = self.outcome_sender.clone();
        self.disposables.add(async move {
            let fetches = references.into_iter().map(|reference| {
                let catalogue = Arc::clone(&catalogue);
                async move {
                    let record = catalogue.fetch_episode(&reference).await?;
                    Ok::<_, SyncError>(to_episode_domain(record)?)
                }
            });
            let result = try_join_all(fetches).await;
            let _ = outcomes.send(DetailOutcome::EpisodesResolved { request, result });
        });
    }

    fn handle_outcome(&mut self, outcome: DetailOutcome) {
        match outcome {
            DetailOutcome::StatusChecked {
                character_id,
                generation,
                result,
            } => {
                let waiters = self
                    .pending_checks
                    .remove(&(character_id, generation))
                    .unwrap_or_default();
                let current = generation == self.generation;
                if !current {
                    debug!(%character_id, generation, "Status check superseded by a toggle");
                }
                self.publish_status(character_id, result, waiters, current, "Status checked");
            }
            DetailOutcome::Toggled {
                character_id,
                result,
            } => {
                let waiters = self.pending_toggle.take().unwrap_or_default();
                if result.is_ok() {
                    self.generation += 1;
                }
                self.publish_status(character_id, result, waiters, true, "Status toggled");
            }
            DetailOutcome::EpisodesResolved { request, .. } if request != self.episode_request => {
                debug!(request, latest = self.episode_request, "Dropping superseded episodes");
            }
            DetailOutcome::EpisodesResolved {
                result: Ok(episodes),
                ..
            } => {
                info!(episodes = episodes.len(), "Episodes resolved");
                self.events.emit(NavigationInstruction::HideEpisodeListLoading);
                self.events.emit(NavigationInstruction::ShowEpisodeList(episodes));
            }
            DetailOutcome::EpisodesResolved { result: Err(e), .. } => {
                warn!(error = %e, "Episode resolution failed");
                self.events.emit(NavigationInstruction::HideEpisodeListLoading);
                self.events.emit(NavigationInstruction::ShowEpisodeError(e));
            }
        }
    }

    /// Answers `waiters`; the flag is only updated when `publish` is set.
    fn publish_status(
        &mut self,
        character_id: CharacterId,
        result: Result<bool, StoreError>,
        waiters: Vec<StatusResponder>,
        publish: bool,
        message: &str,
    ) {
        let result = result.map_err(SyncError::from);
        match &result {
            Ok(is_favorite) => {
                info!(%character_id, is_favorite, "{message}");
                if publish {
                    self.is_favorite.send_replace(Some(*is_favorite));
                }
            }
            Err(e) => warn!(%character_id, error = %e, "Favorite query failed"),
        }
        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
    }
}

/// Cloneable handle to a running [`CharacterDetailController`].
#[derive(Clone)]
pub struct CharacterDetailHandle {
    sender: mpsc::Sender<DetailCommand>,
    is_favorite: watch::Receiver<Option<bool>>,
    character: watch::Receiver<Option<Character>>,
}

impl CharacterDetailHandle {
    /// Shows the screen's character, checks its favorite status and resolves
    /// its episodes; closes the screen when there is no character.
    #[instrument(skip(self))]
    pub async fn validate(&self) -> Result<(), SyncError> {
        debug!("Sending request");
        self.send(DetailCommand::Validate).await
    }

    /// Whether a favorite is stored under `character_id`.
    #[instrument(skip(self))]
    pub async fn check_status(&self, character_id: CharacterId) -> Result<bool, SyncError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(DetailCommand::CheckStatus {
            character_id,
            respond_to,
        })
        .await?;
        response.await.map_err(|_| SyncError::ControllerClosed)?
    }

    /// Stores the screen's character as a favorite if it is not one yet.
    /// Returns whether it was absent before the call.
    #[instrument(skip(self))]
    pub async fn toggle_status(&self) -> Result<bool, SyncError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(DetailCommand::ToggleStatus { respond_to }).await?;
        response.await.map_err(|_| SyncError::ControllerClosed)?
    }

    /// Fetches the episodes behind `references`, reporting the outcome as events.
    #[instrument(skip(self, references), fields(episodes = references.len()))]
    pub async fn resolve_episodes(&self, references: Vec<String>) -> Result<(), SyncError> {
        debug!("Sending request");
        self.send(DetailCommand::ResolveEpisodes { references }).await
    }

    /// Last published favorite flag; `None` until the first answer.
    pub fn is_favorite(&self) -> Option<bool> {
        *self.is_favorite.borrow()
    }

    /// Subscription to the favorite flag.
    pub fn watch_favorite(&self) -> watch::Receiver<Option<bool>> {
        self.is_favorite.clone()
    }

    /// The character shown by the screen, once validated.
    pub fn character(&self) -> Option<Character> {
        self.character.borrow().clone()
    }

    async fn send(&self, command: DetailCommand) -> Result<(), SyncError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| SyncError::ControllerClosed)
    }
}

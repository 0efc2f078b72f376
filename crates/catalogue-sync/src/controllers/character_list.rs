//! # Character List Controller
//!
//! Drives sequential page fetches for the character list screen.
//!
//! ## State Machine
//!
//! ```text
//!  Idle ──load_more / retry / fetch_page──▶ Loading
//!  Loading ──full page, more to come──────▶ Idle
//!  Loading ──short page / no more / error─▶ LastPage
//! ```
//!
//! `LastPage` is terminal for `load_more`: once reached, scrolling never
//! triggers another fetch. Only an explicit `retry` on an empty list fetches
//! again.
//!
//! ## Events
//!
//! Every fetch emits `ShowLoading` before it is issued, then either
//! `HideLoading` + `ShowList` or `HideLoading` + `ShowError`.
//!
//! ## Concurrency
//!
//! The controller runs in its own task and is the only owner of its
//! [`PaginationState`]. The fetch itself runs in a background task tracked by
//! the controller's [`DisposeBag`]; its result is delivered back to the
//! controller task as a message. `is_loading` is set before the fetch is
//! issued, so at most one fetch is outstanding.

use crate::api::mapper::to_character_domain_list;
use crate::config::CatalogueConfig;
use crate::error::SyncError;
use crate::navigation::{NavigationInstruction, NavigationReceiver};
use crate::remote::{CatalogueError, CatalogueService, CharacterPage};
use std::sync::Arc;
use sync_framework::{event_channel, DisposeBag, EventEmitter};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

/// Paging progress of one list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// 1-based page that was fetched last, or is being fetched.
    pub current_page: u32,
    pub is_last_page: bool,
    /// True exactly while a page fetch is outstanding.
    pub is_loading: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            is_last_page: false,
            is_loading: false,
        }
    }
}

/// Whether the visible window has reached the end of a list holding at
/// least one full page.
pub fn is_in_footer(
    visible_count: i32,
    first_visible_position: i32,
    total_count: i32,
    page_size: u32,
) -> bool {
    i64::from(visible_count) + i64::from(first_visible_position) >= i64::from(total_count)
        && first_visible_position >= 0
        && i64::from(total_count) >= i64::from(page_size)
}

#[derive(Debug)]
enum ListCommand {
    LoadMore {
        visible_count: i32,
        first_visible_position: i32,
        total_count: i32,
    },
    Retry {
        current_item_count: usize,
    },
    FetchPage,
    State {
        respond_to: oneshot::Sender<PaginationState>,
    },
}

/// Result of a background page fetch.
struct PageLoaded {
    page: u32,
    result: Result<CharacterPage, CatalogueError>,
}

/// The actor behind a character list screen.
pub struct CharacterListController {
    receiver: mpsc::Receiver<ListCommand>,
    completions: mpsc::UnboundedReceiver<PageLoaded>,
    completion_sender: mpsc::UnboundedSender<PageLoaded>,
    events: EventEmitter<NavigationInstruction>,
    state: PaginationState,
    page_size: u32,
    disposables: DisposeBag,
}

impl CharacterListController {
    /// Creates the controller, the handle used to drive it and the stream of
    /// instructions for the screen.
    pub fn new(config: &CatalogueConfig) -> (Self, CharacterListHandle, NavigationReceiver) {
        let (sender, receiver) = mpsc::channel(config.command_buffer);
        let (completion_sender, completions) = mpsc::unbounded_channel();
        let (events, observer) = event_channel();

        let controller = Self {
            receiver,
            completions,
            completion_sender,
            events,
            state: PaginationState::default(),
            page_size: config.page_size,
            disposables: DisposeBag::new(),
        };
        (controller, CharacterListHandle { sender }, observer)
    }

    /// Processes commands and fetch results until every handle is dropped.
    /// Outstanding fetches are aborted on exit.
    pub async fn run(mut self, catalogue: Arc<dyn CatalogueService>) {
        info!(controller = "character_list", "Controller started");

        loop {
            tokio::select! {
                command = self.receiver.recv() => match command {
                    Some(command) => self.handle_command(command, &catalogue),
                    None => break,
                },
                Some(loaded) = self.completions.recv() => self.on_page_loaded(loaded),
            }
        }

        self.disposables.dispose();
        info!(
            controller = "character_list",
            page = self.state.current_page,
            "Controller stopped"
        );
    }

    fn handle_command(&mut self, command: ListCommand, catalogue: &Arc<dyn CatalogueService>) {
        match command {
            ListCommand::LoadMore {
                visible_count,
                first_visible_position,
                total_count,
            } => self.load_more(visible_count, first_visible_position, total_count, catalogue),
            ListCommand::Retry { current_item_count } => {
                self.retry(current_item_count, catalogue)
            }
            ListCommand::FetchPage => self.fetch_page(catalogue),
            ListCommand::State { respond_to } => {
                let _ = respond_to.send(self.state);
            }
        }
    }

    fn load_more(
        &mut self,
        visible_count: i32,
        first_visible_position: i32,
        total_count: i32,
        catalogue: &Arc<dyn CatalogueService>,
    ) {
        if self.state.is_loading
            || self.state.is_last_page
            || !is_in_footer(
                visible_count,
                first_visible_position,
                total_count,
                self.page_size,
            )
        {
            debug!(
                visible_count,
                first_visible_position,
                total_count,
                is_loading = self.state.is_loading,
                is_last_page = self.state.is_last_page,
                "Load more ignored"
            );
            return;
        }

        self.state.current_page += 1;
        self.fetch_page(catalogue);
    }

    fn retry(&mut self, current_item_count: usize, catalogue: &Arc<dyn CatalogueService>) {
        if self.state.is_loading {
            debug!(current_item_count, "Retry ignored, fetch outstanding");
            return;
        }
        if current_item_count > 0 {
            // The list already shows data; only the refresh indicator is stale
            self.events.emit(NavigationInstruction::HideLoading);
            return;
        }
        self.fetch_page(catalogue);
    }

    fn fetch_page(&mut self, catalogue: &Arc<dyn CatalogueService>) {
        if self.state.is_loading {
            debug!(page = self.state.current_page, "Fetch already outstanding");
            return;
        }

        self.events.emit(NavigationInstruction::ShowLoading);
        self.state.is_loading = true;

        let page = self.state.current_page;
        let catalogue = Arc::clone(catalogue);
        let completions = self.completion_sender.clone();
        debug!(page, "Fetching page");
        self.disposables.add(async move {
            let result = catalogue.fetch_character_page(page).await;
            let _ = completions.send(PageLoaded { page, result });
        });
    }

    fn on_page_loaded(&mut self, loaded: PageLoaded) {
        self.state.is_loading = false;
        let page = loaded.page;

        let outcome = loaded.result.map_err(SyncError::from).and_then(|fetched| {
            let has_more = fetched.has_more;
            let characters = to_character_domain_list(fetched.items)?;
            Ok((characters, has_more))
        });

        match outcome {
            Ok((characters, has_more)) => {
                // A full page still ends paging when the catalogue reports
                // nothing after it, instead of waiting for an empty page.
                if characters.len() < self.page_size as usize || !has_more {
                    self.state.is_last_page = true;
                }
                info!(
                    page,
                    items = characters.len(),
                    last_page = self.state.is_last_page,
                    "Page loaded"
                );
                self.events.emit(NavigationInstruction::HideLoading);
                self.events.emit(NavigationInstruction::ShowList(characters));
            }
            Err(e) => {
                // A failed page ends paging; only an explicit retry fetches again
                self.state.is_last_page = true;
                warn!(page, error = %e, "Page load failed");
                self.events.emit(NavigationInstruction::HideLoading);
                self.events.emit(NavigationInstruction::ShowError(e));
            }
        }
    }
}

/// Cloneable handle to a running [`CharacterListController`].
///
/// Commands are queued in order; each method returns once its command has
/// been accepted, not once it has been carried out.
#[derive(Clone)]
pub struct CharacterListHandle {
    sender: mpsc::Sender<ListCommand>,
}

impl CharacterListHandle {
    /// Scroll notification from the list: fetches the next page when the
    /// visible window has reached the footer.
    #[instrument(skip(self))]
    pub async fn load_more(
        &self,
        visible_count: i32,
        first_visible_position: i32,
        total_count: i32,
    ) -> Result<(), SyncError> {
        debug!("Sending request");
        self.send(ListCommand::LoadMore {
            visible_count,
            first_visible_position,
            total_count,
        })
        .await
    }

    /// Pull-to-refresh: refetches the current page, unless the list already
    /// holds items, in which case only the loading indicator is cleared.
    /// Ignored while a fetch is outstanding; its completion hides the
    /// indicator instead.
    #[instrument(skip(self))]
    pub async fn retry(&self, current_item_count: usize) -> Result<(), SyncError> {
        debug!("Sending request");
        self.send(ListCommand::Retry { current_item_count }).await
    }

    /// Fetches the current page.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self) -> Result<(), SyncError> {
        debug!("Sending request");
        self.send(ListCommand::FetchPage).await
    }

    /// Snapshot of the paging state, taken after every previously queued
    /// command has been handled.
    pub async fn state(&self) -> Result<PaginationState, SyncError> {
        let (respond_to, response) = oneshot::channel();
        self.send(ListCommand::State { respond_to }).await?;
        response.await.map_err(|_| SyncError::ControllerClosed)
    }

    async fn send(&self, command: ListCommand) -> Result<(), SyncError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| SyncError::ControllerClosed)
    }
}

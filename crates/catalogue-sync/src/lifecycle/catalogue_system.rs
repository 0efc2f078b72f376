use crate::clients::FavoriteClient;
use crate::config::CatalogueConfig;
use crate::controllers::{
    CharacterDetailController, CharacterDetailHandle, CharacterListController,
    CharacterListHandle, DetailContext, FavoriteListController, FavoriteListHandle,
};
use crate::model::Character;
use crate::navigation::NavigationReceiver;
use crate::remote::CatalogueService;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// A running screen controller together with what the screen needs to
/// drive and observe it.
pub struct Screen<H> {
    /// Drives the controller.
    pub handle: H,
    /// Instructions for the screen, in emission order.
    pub events: NavigationReceiver,
    task: JoinHandle<()>,
}

impl<H> Screen<H> {
    /// Tears the screen down: drops the handle and waits for the controller
    /// to stop, which aborts its outstanding work.
    ///
    /// Clones of the handle made by the caller keep the controller alive;
    /// drop them first.
    pub async fn close(self) -> Result<(), String> {
        drop(self.handle);
        drop(self.events);
        self.task.await.map_err(|e| {
            error!("Controller task failed: {:?}", e);
            format!("Controller task failed: {:?}", e)
        })
    }
}

/// Wires the favorite store, the remote catalogue and the screen controllers.
///
/// # Architecture
///
/// - **Favorite store**: one [`RecordActor`](sync_framework::RecordActor),
///   started by [`new`](Self::new) and shared by every screen.
/// - **Screens**: each `open_*` call starts a fresh controller in its own
///   task, injecting the collaborators it needs through `run(context)`.
///
/// # Example
///
/// ```rust
/// use catalogue_sync::config::CatalogueConfig;
/// use catalogue_sync::lifecycle::CatalogueSystem;
/// use catalogue_sync::remote::memory::InMemoryCatalogue;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let catalogue = Arc::new(InMemoryCatalogue::sample(30, 2));
///     let system = CatalogueSystem::new(catalogue, CatalogueConfig::default());
///
///     let list = system.open_character_list();
///     list.handle.fetch_page().await.map_err(|e| e.to_string())?;
///     list.close().await?;
///
///     system.shutdown().await
/// }
/// ```
pub struct CatalogueSystem {
    /// Client for the favorite store.
    pub favorites: FavoriteClient,
    catalogue: Arc<dyn CatalogueService>,
    config: CatalogueConfig,
    store_handle: JoinHandle<()>,
}

impl CatalogueSystem {
    /// Starts the favorite store. Screens are started on demand.
    pub fn new(catalogue: Arc<dyn CatalogueService>, config: CatalogueConfig) -> Self {
        let (store_actor, favorites) = crate::favorite_store::new(config.store_buffer);
        let store_handle = tokio::spawn(store_actor.run());
        info!(page_size = config.page_size, "Catalogue system started");

        Self {
            favorites,
            catalogue,
            config,
            store_handle,
        }
    }

    pub fn open_character_list(&self) -> Screen<CharacterListHandle> {
        let (controller, handle, events) = CharacterListController::new(&self.config);
        let task = tokio::spawn(controller.run(Arc::clone(&self.catalogue)));
        Screen {
            handle,
            events,
            task,
        }
    }

    /// Opens the detail screen of `character`; `None` models a screen opened
    /// without one, which closes itself on validation.
    pub fn open_character_detail(
        &self,
        character: Option<Character>,
    ) -> Screen<CharacterDetailHandle> {
        let (controller, handle, events) = CharacterDetailController::new(character, &self.config);
        let task = tokio::spawn(controller.run(DetailContext {
            catalogue: Arc::clone(&self.catalogue),
            favorites: self.favorites.clone(),
        }));
        Screen {
            handle,
            events,
            task,
        }
    }

    pub fn open_favorite_list(&self) -> Screen<FavoriteListHandle> {
        let (controller, handle, events) = FavoriteListController::new(&self.config);
        let task = tokio::spawn(controller.run(self.favorites.clone()));
        Screen {
            handle,
            events,
            task,
        }
    }

    /// Stops the favorite store and waits for it.
    ///
    /// Open detail and favorite screens hold store clients; close them first
    /// or this waits until they are dropped.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalogue system...");

        // Dropping the last store client closes the store's request channel
        drop(self.favorites);
        drop(self.catalogue);

        if let Err(e) = self.store_handle.await {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("Catalogue system shutdown complete.");
        Ok(())
    }
}

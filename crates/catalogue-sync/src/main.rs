use catalogue_sync::config::CatalogueConfig;
use catalogue_sync::lifecycle::CatalogueSystem;
use catalogue_sync::model::Character;
use catalogue_sync::navigation::{NavigationInstruction, NavigationReceiver};
use catalogue_sync::remote::memory::InMemoryCatalogue;
use std::sync::Arc;
use std::time::Duration;
use sync_framework::tracing::setup_tracing;
use tracing::{error, info, warn, Instrument};

/// Waits for the next instruction the screen has not handled yet.
async fn next_instruction(events: &mut NavigationReceiver) -> Option<NavigationInstruction> {
    while let Some(event) = events.recv().await {
        if let Some(instruction) = event.consume() {
            return Some(instruction.clone());
        }
    }
    None
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting catalogue demo");

    let catalogue = InMemoryCatalogue::sample(45, 3).with_latency(Duration::from_millis(20));
    let system = CatalogueSystem::new(Arc::new(catalogue), CatalogueConfig::default());

    // Page through the whole list, scrolling to the footer after each page
    let span = tracing::info_span!("character_list");
    let characters: Vec<Character> = async {
        let mut list = system.open_character_list();
        list.handle.fetch_page().await.map_err(|e| e.to_string())?;

        let mut loaded = Vec::new();
        loop {
            match next_instruction(&mut list.events).await {
                Some(NavigationInstruction::ShowList(page)) => {
                    loaded.extend(page);
                    let state = list.handle.state().await.map_err(|e| e.to_string())?;
                    if state.is_last_page {
                        break;
                    }
                    let total = loaded.len() as i32;
                    list.handle
                        .load_more(10, total - 10, total)
                        .await
                        .map_err(|e| e.to_string())?;
                }
                Some(NavigationInstruction::ShowError(e)) => {
                    warn!(error = %e, "Paging stopped");
                    break;
                }
                Some(_) => {}
                None => break,
            }
        }
        info!(characters = loaded.len(), "List fully loaded");
        list.close().await?;
        Ok::<_, String>(loaded)
    }
    .instrument(span)
    .await?;

    // Open a detail screen and favorite the character
    let span = tracing::info_span!("character_detail");
    async {
        let mut detail = system.open_character_detail(characters.get(2).cloned());
        detail.handle.validate().await.map_err(|e| e.to_string())?;

        while let Some(instruction) = next_instruction(&mut detail.events).await {
            match instruction {
                NavigationInstruction::ShowEpisodeList(episodes) => {
                    for episode in &episodes {
                        info!(code = %episode.code, name = %episode.name, "Episode");
                    }
                    break;
                }
                NavigationInstruction::ShowEpisodeError(e) => {
                    error!(error = %e, "Episodes unavailable");
                    break;
                }
                _ => {}
            }
        }

        match detail.handle.toggle_status().await {
            Ok(is_favorite) => info!(is_favorite, "Favorite toggled"),
            Err(e) => error!(error = %e, "Favorite toggle failed"),
        }
        detail.close().await
    }
    .instrument(span)
    .await?;

    // Show the favorites screen
    let mut favorites = system.open_favorite_list();
    match next_instruction(&mut favorites.events).await {
        Some(NavigationInstruction::ShowFavoriteList(list)) => {
            for character in &list {
                info!(character_id = %character.id, name = %character.name, "Favorite");
            }
        }
        Some(NavigationInstruction::ShowEmptyFavoriteList) => info!("No favorites yet"),
        _ => {}
    }
    favorites.close().await?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

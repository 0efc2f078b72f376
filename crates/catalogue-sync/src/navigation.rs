//! # Navigation Instructions
//!
//! The closed set of things a controller can ask its screen to do. Each
//! instruction travels wrapped in an [`Event`](sync_framework::Event), so it is
//! acted upon at most once.

use crate::error::SyncError;
use crate::model::{Character, Episode};
use sync_framework::EventReceiver;

/// A UI-directed command emitted by a controller.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationInstruction {
    /// A freshly loaded page of characters, to append to the list.
    ShowList(Vec<Character>),
    ShowError(SyncError),
    ShowLoading,
    HideLoading,
    /// The episodes of the current character, in broadcast order.
    ShowEpisodeList(Vec<Episode>),
    ShowEpisodeError(SyncError),
    ShowEpisodeListLoading,
    HideEpisodeListLoading,
    /// Leave the screen; it has nothing to show.
    CloseScreen,
    ShowFavoriteList(Vec<Character>),
    ShowEmptyFavoriteList,
}

/// What a screen observes.
pub type NavigationReceiver = EventReceiver<NavigationInstruction>;

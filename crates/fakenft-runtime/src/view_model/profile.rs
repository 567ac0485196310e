#![forbid(unsafe_code)]

//! Profile screen: the signed-in user's card and menu.

use std::fmt;
use std::sync::Arc;

use fakenft_core::Profile;

use super::list::{acknowledge, fetch_into};
use crate::provider::DataProvider;
use crate::reactive::{ObservableBox, ReadOnlyObservable};

/// Rows of the profile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMenuItem {
    /// Owned NFTs, with their count.
    MyNfts(usize),
    /// Favourite NFTs, with their count.
    Favourites(usize),
    AboutDeveloper,
}

impl ProfileMenuItem {
    /// Row title as shown in the menu.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::MyNfts(count) => format!("My NFTs ({count})"),
            Self::Favourites(count) => format!("Favourite NFTs ({count})"),
            Self::AboutDeveloper => "About the developer".to_string(),
        }
    }
}

impl fmt::Display for ProfileMenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// View-model behind the profile screen.
pub struct ProfileViewModel {
    provider: Arc<dyn DataProvider<Profile>>,
    profile: ObservableBox<Option<Profile>>,
    error: ObservableBox<Option<String>>,
}

impl fmt::Debug for ProfileViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileViewModel")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl ProfileViewModel {
    pub fn new(provider: Arc<dyn DataProvider<Profile>>) -> Self {
        Self {
            provider,
            profile: ObservableBox::new(None),
            error: ObservableBox::new(None),
        }
    }

    /// `None` until the first successful fetch; afterwards the last good
    /// profile.
    #[must_use]
    pub fn profile_observable(&self) -> ReadOnlyObservable<Option<Profile>> {
        self.profile.read_only()
    }

    #[must_use]
    pub fn error_observable(&self) -> ReadOnlyObservable<Option<String>> {
        self.error.read_only()
    }

    pub fn fetch_profile(&self) {
        fetch_into(
            "profile",
            self.provider.as_ref(),
            &self.profile,
            &self.error,
            Some,
            |profile| profile.as_ref().map_or(0, |p| p.nfts.len()),
        );
    }

    /// Clear the error once the view has shown it. Returns `false` when
    /// called from inside an error-box subscriber on the notifying thread.
    pub fn acknowledge_error(&self) -> bool {
        acknowledge("profile", &self.error)
    }

    /// Menu rows for the current profile. Counts are 0 before the first
    /// successful fetch.
    #[must_use]
    pub fn menu_items(&self) -> [ProfileMenuItem; 3] {
        let (owned, liked) = self.profile.with(|profile| {
            profile
                .as_ref()
                .map_or((0, 0), |p| (p.nfts.len(), p.likes.len()))
        });
        [
            ProfileMenuItem::MyNfts(owned),
            ProfileMenuItem::Favourites(liked),
            ProfileMenuItem::AboutDeveloper,
        ]
    }
}

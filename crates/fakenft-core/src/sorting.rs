#![forbid(unsafe_code)]

//! Client-side sorting of already-fetched lists.
//!
//! # Invariants
//!
//! 1. **Stable**: items with equal keys keep their relative input order.
//! 2. **Idempotent**: sorting an already sorted slice by the same option
//!    leaves it unchanged.
//! 3. **Stateless**: the result depends only on the input order and the
//!    option, never on earlier sorts.
//! 4. **Unrecognised options are a no-op**: [`sort_items`] returns `false`
//!    and does not touch the slice.

use std::cmp::Ordering;
use std::fmt;

use crate::model::{Nft, NftCollection, UserRating};

/// Entries of the sorting action sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortingOption {
    ByName,
    ByRating,
    ByQuantity,
    /// Dismisses the sheet; never reorders anything.
    Close,
}

impl SortingOption {
    /// Every option, in action sheet order.
    pub const ALL: [Self; 4] = [Self::ByName, Self::ByRating, Self::ByQuantity, Self::Close];

    /// Stable identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ByName => "by_name",
            Self::ByRating => "by_rating",
            Self::ByQuantity => "by_quantity",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for SortingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item type that knows how to order itself for some sorting options.
pub trait Sortable {
    /// Compare `a` and `b` under `option`, or `None` if this type does not
    /// interpret `option`.
    ///
    /// Implementations must return `Some` or `None` independently of `a` and
    /// `b`: recognition is a property of the option, not of the items.
    fn compare_by(option: SortingOption, a: &Self, b: &Self) -> Option<Ordering>;

    /// Whether `option` reorders this item type.
    fn recognises(option: SortingOption) -> bool;
}

/// Stable-sort `items` by `option`. Returns `false` (and leaves `items`
/// untouched) when the option is not recognised for `T`.
pub fn sort_items<T: Sortable>(items: &mut [T], option: SortingOption) -> bool {
    if !T::recognises(option) {
        return false;
    }
    items.sort_by(|a, b| T::compare_by(option, a, b).unwrap_or(Ordering::Equal));
    true
}

impl Sortable for NftCollection {
    fn compare_by(option: SortingOption, a: &Self, b: &Self) -> Option<Ordering> {
        match option {
            SortingOption::ByName => Some(a.name.cmp(&b.name)),
            // Largest collections first.
            SortingOption::ByQuantity => Some(b.nft_count().cmp(&a.nft_count())),
            SortingOption::ByRating | SortingOption::Close => None,
        }
    }

    fn recognises(option: SortingOption) -> bool {
        matches!(option, SortingOption::ByName | SortingOption::ByQuantity)
    }
}

impl Sortable for UserRating {
    fn compare_by(option: SortingOption, a: &Self, b: &Self) -> Option<Ordering> {
        match option {
            SortingOption::ByName => Some(a.name.cmp(&b.name)),
            // Highest rating first.
            SortingOption::ByRating => Some(b.rating.cmp(&a.rating)),
            SortingOption::ByQuantity | SortingOption::Close => None,
        }
    }

    fn recognises(option: SortingOption) -> bool {
        matches!(option, SortingOption::ByName | SortingOption::ByRating)
    }
}

impl Sortable for Nft {
    fn compare_by(option: SortingOption, a: &Self, b: &Self) -> Option<Ordering> {
        match option {
            SortingOption::ByName => Some(a.name.cmp(&b.name)),
            SortingOption::ByRating => Some(b.rating.cmp(&a.rating)),
            SortingOption::ByQuantity | SortingOption::Close => None,
        }
    }

    fn recognises(option: SortingOption) -> bool {
        matches!(option, SortingOption::ByName | SortingOption::ByRating)
    }
}

#![forbid(unsafe_code)]

//! Model types returned by the NFT backend.
//!
//! Field names follow the backend's JSON payloads so the `serde` feature can
//! decode responses directly. Identifiers are opaque strings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named collection of NFTs shown on the catalog screen.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NftCollection {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cover: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub author: String,
    /// Identifiers of the NFTs in this collection.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nfts: Vec<String>,
}

impl NftCollection {
    /// Convenience constructor used by fixtures and tests.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, nfts: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nfts,
            ..Self::default()
        }
    }

    /// Number of NFTs in the collection ("quantity" when sorting).
    #[must_use]
    pub fn nft_count(&self) -> usize {
        self.nfts.len()
    }

    /// Catalog row title, e.g. `"Peach (11)"`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.nft_count())
    }
}

/// A single NFT card.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Nft {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub images: Vec<String>,
    /// Star rating, 0..=5.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: u8,
    /// Price in ETH.
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub author: String,
}

impl Nft {
    /// Price rendered with two decimals, e.g. `"1.78 ETH"`.
    #[must_use]
    pub fn price_label(&self) -> String {
        format!("{:.2} ETH", self.price)
    }

    /// First image, used as the card preview.
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// One row of the statistics (user rating) screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserRating {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub avatar: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub website: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nfts: Vec<String>,
    /// Backend sends this as a decimal string; numbers are accepted too.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "rating_serde::deserialize")
    )]
    pub rating: u32,
}

impl UserRating {
    /// Convenience constructor used by fixtures and tests.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, rating: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn nft_count(&self) -> usize {
        self.nfts.len()
    }
}

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Profile {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub avatar: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub website: String,
    /// NFTs owned by the user.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nfts: Vec<String>,
    /// NFTs the user marked as favourite.
    #[cfg_attr(feature = "serde", serde(default))]
    pub likes: Vec<String>,
}

#[cfg(feature = "serde")]
mod rating_serde {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_title_includes_count() {
        let c = NftCollection::new("1", "Peach", vec!["a".into(), "b".into()]);
        assert_eq!(c.nft_count(), 2);
        assert_eq!(c.title(), "Peach (2)");
    }

    #[test]
    fn price_label_has_two_decimals() {
        let nft = Nft {
            price: 1.775_f64 + 0.001,
            ..Nft::default()
        };
        assert_eq!(nft.price_label(), "1.78 ETH");
        let free = Nft::default();
        assert_eq!(free.price_label(), "0.00 ETH");
    }

    #[test]
    fn preview_is_first_image() {
        let nft = Nft {
            images: vec!["a.png".into(), "b.png".into()],
            ..Nft::default()
        };
        assert_eq!(nft.preview(), Some("a.png"));
        assert_eq!(Nft::default().preview(), None);
    }

    // Needs `--features serde`.
    #[cfg(feature = "serde")]
    mod json {
        use super::super::*;

        #[test]
        fn decodes_user_rating_with_string_rating() {
            let json = r#"{"id":"7","name":"Alex","nfts":["1","2"],"rating":"87"}"#;
            let user: UserRating = serde_json::from_str(json).unwrap();
            assert_eq!(user.rating, 87);
            assert_eq!(user.nft_count(), 2);
            assert!(user.website.is_empty());
        }

        #[test]
        fn decodes_user_rating_with_numeric_rating() {
            let json = r#"{"id":"7","name":"Alex","rating":12}"#;
            let user: UserRating = serde_json::from_str(json).unwrap();
            assert_eq!(user.rating, 12);
        }

        #[test]
        fn rejects_non_numeric_rating() {
            let json = r#"{"id":"7","name":"Alex","rating":"high"}"#;
            assert!(serde_json::from_str::<UserRating>(json).is_err());
        }

        #[test]
        fn decodes_collection_ignoring_unknown_fields() {
            let json = r#"{"createdAt":"2023-07-31","name":"Peach","cover":"c.png",
                "nfts":["1","2","3"],"description":"d","author":"6","id":"1"}"#;
            let c: NftCollection = serde_json::from_str(json).unwrap();
            assert_eq!(c.name, "Peach");
            assert_eq!(c.nft_count(), 3);
        }
    }
}

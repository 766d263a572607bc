//! The fixed microgame catalog.
//!
//! Descriptors are metadata only: identity, display strings, and the
//! background-audio policy the channel manager consults on phase entry. The
//! behavior half of each microgame (reset/frame/input) lives in the arcade
//! binary as a trait object stored at the same catalog position, so dispatch
//! is a single index with no per-id branching anywhere in the orchestrator.

use thiserror::Error;

/// Stable identifier of a microgame. Assigned once, never reused; catalog
/// order is id order and does not change for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MicrogameId(pub u8);

impl std::fmt::Display for MicrogameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the exclusive background channel treats a microgame on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundPolicy {
    /// No background track; entry clears whatever was playing.
    Silent,
    /// Entry starts this looping track on the exclusive channel.
    Loop(&'static str),
    /// The track exists but is only ever driven by an in-game hold; entry
    /// clears the channel exactly like `Silent`.
    HeldOnly(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct MicrogameDescriptor {
    pub id: MicrogameId,
    pub name: &'static str,
    pub objective: &'static str,
    pub background: BackgroundPolicy,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("microgame id {0} is not in the catalog")]
    UnknownId(MicrogameId),
    #[error("duplicate microgame id {0} in catalog definition")]
    DuplicateId(MicrogameId),
    #[error("catalog has no entries")]
    Empty,
}

#[derive(Debug)]
pub struct Catalog {
    entries: Vec<MicrogameDescriptor>,
}

impl Catalog {
    /// Build a catalog from a descriptor list, rejecting duplicates up front
    /// so lookup paths can assume id uniqueness.
    pub fn new(entries: Vec<MicrogameDescriptor>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
        }
        Ok(Self { entries })
    }

    /// The shipped thirteen-game catalog.
    pub fn standard() -> Self {
        let entries = vec![
            MicrogameDescriptor {
                id: MicrogameId(1),
                name: "Pollute the Cloud",
                objective: "Practice your pollution.",
                background: BackgroundPolicy::Loop("bg_cloud"),
            },
            MicrogameDescriptor {
                id: MicrogameId(2),
                name: "Find the Noise",
                objective: "Locate the noise.",
                background: BackgroundPolicy::Silent,
            },
            MicrogameDescriptor {
                id: MicrogameId(3),
                name: "The AI Face",
                objective: "Stop AI before it becomes Intelligent.",
                background: BackgroundPolicy::Loop("bg_face"),
            },
            MicrogameDescriptor {
                id: MicrogameId(4),
                name: "Tag Motivation",
                objective: "Click Motivation before it remembers it's busy.",
                background: BackgroundPolicy::Silent,
            },
            MicrogameDescriptor {
                id: MicrogameId(5),
                name: "Space Them",
                objective: "Give 'Grief' and 'Mayonnaise' some Space.",
                background: BackgroundPolicy::Silent,
            },
            MicrogameDescriptor {
                id: MicrogameId(6),
                name: "Deflate the Ego Balloon",
                objective: "Quickly deflate the ego.",
                background: BackgroundPolicy::Loop("bg_ego"),
            },
            MicrogameDescriptor {
                id: MicrogameId(7),
                name: "Pet the Invisible Dog",
                objective: "Pet the Invisible Dog.",
                background: BackgroundPolicy::Silent,
            },
            MicrogameDescriptor {
                id: MicrogameId(8),
                name: "Sentient Spaghetti",
                objective: "Only 'G' may pass-ta.",
                background: BackgroundPolicy::Loop("bg_spaghetti"),
            },
            MicrogameDescriptor {
                id: MicrogameId(9),
                name: "Bureaucratic Maze",
                objective: "Fragile. Do not touch.",
                background: BackgroundPolicy::Loop("bg_form"),
            },
            MicrogameDescriptor {
                id: MicrogameId(10),
                name: "Monty Stomp",
                objective: "Smash the civilized.",
                background: BackgroundPolicy::Loop("bg_stomp"),
            },
            MicrogameDescriptor {
                id: MicrogameId(11),
                name: "Repo It",
                objective: "Press the button to escape.",
                background: BackgroundPolicy::Silent,
            },
            MicrogameDescriptor {
                id: MicrogameId(12),
                name: "Legal Malware Text",
                objective: "Accept the Terms before they accept you.",
                background: BackgroundPolicy::HeldOnly("bg_legal"),
            },
            MicrogameDescriptor {
                id: MicrogameId(13),
                name: "Bad Bad Sausage",
                objective: "Stuff the sausage.",
                background: BackgroundPolicy::Silent,
            },
        ];
        Self::new(entries).expect("standard catalog is statically valid")
    }

    pub fn descriptor(&self, id: MicrogameId) -> Result<&MicrogameDescriptor, CatalogError> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(CatalogError::UnknownId(id))
    }

    /// Catalog position of an id; this is the dispatch index for the
    /// behavior table in the arcade.
    pub fn position(&self, id: MicrogameId) -> Result<usize, CatalogError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CatalogError::UnknownId(id))
    }

    pub fn ids(&self) -> Vec<MicrogameId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn entries(&self) -> &[MicrogameDescriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_thirteen_unique_entries() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 13);
        let ids = catalog.ids();
        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[..i].contains(id), "duplicate id {id}");
        }
    }

    #[test]
    fn ids_are_in_registration_order() {
        let catalog = Catalog::standard();
        let ids: Vec<u8> = catalog.ids().iter().map(|id| id.0).collect();
        assert_eq!(ids, (1..=13).collect::<Vec<u8>>());
    }

    #[test]
    fn descriptor_lookup_matches_position() {
        let catalog = Catalog::standard();
        for (pos, entry) in catalog.entries().iter().enumerate() {
            assert_eq!(catalog.position(entry.id).unwrap(), pos);
            assert_eq!(catalog.descriptor(entry.id).unwrap().id, entry.id);
        }
    }

    #[test]
    fn unknown_id_is_a_typed_error() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.descriptor(MicrogameId(99)).unwrap_err(),
            CatalogError::UnknownId(MicrogameId(99))
        );
        assert_eq!(
            catalog.position(MicrogameId(0)).unwrap_err(),
            CatalogError::UnknownId(MicrogameId(0))
        );
    }

    #[test]
    fn duplicate_ids_are_rejected_at_build() {
        let entry = MicrogameDescriptor {
            id: MicrogameId(7),
            name: "a",
            objective: "b",
            background: BackgroundPolicy::Silent,
        };
        let err = Catalog::new(vec![entry, entry]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(MicrogameId(7)));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(Catalog::new(vec![]).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn held_only_games_do_not_count_as_loop_eligible() {
        let catalog = Catalog::standard();
        let legal = catalog.descriptor(MicrogameId(12)).unwrap();
        assert!(matches!(legal.background, BackgroundPolicy::HeldOnly(_)));
        let cloud = catalog.descriptor(MicrogameId(1)).unwrap();
        assert!(matches!(cloud.background, BackgroundPolicy::Loop(_)));
    }
}

//! Species catalog.
//!
//! A static table of supported species with their care characteristics.
//! The per-resource need tiers seed the dimensions of a newly adopted
//! plant; everything else is display metadata.

use serde::{Deserialize, Serialize};

use super::dimension::{NeedTier, ResourceKind};
use crate::error::ValidationError;

/// How demanding a species is overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareLevel {
    Easy,
    Moderate,
    Demanding,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Species {
    pub id: &'static str,
    pub name: &'static str,
    pub scientific_name: &'static str,
    pub care_level: CareLevel,
    pub water_needs: NeedTier,
    pub light_needs: NeedTier,
    pub fertilizer_needs: NeedTier,
    pub temperature_needs: NeedTier,
}

impl Species {
    /// Need tier for one resource kind.
    pub fn needs(&self, kind: ResourceKind) -> NeedTier {
        match kind {
            ResourceKind::Water => self.water_needs,
            ResourceKind::Light => self.light_needs,
            ResourceKind::Fertilizer => self.fertilizer_needs,
            ResourceKind::Temperature => self.temperature_needs,
        }
    }
}

const SPECIES: &[Species] = &[
    Species {
        id: "succulent",
        name: "Succulent",
        scientific_name: "Crassulaceae",
        care_level: CareLevel::Easy,
        water_needs: NeedTier::Low,
        light_needs: NeedTier::Medium,
        fertilizer_needs: NeedTier::Low,
        temperature_needs: NeedTier::Low,
    },
    Species {
        id: "fern",
        name: "Fern",
        scientific_name: "Polypodiopsida",
        care_level: CareLevel::Moderate,
        water_needs: NeedTier::High,
        light_needs: NeedTier::Low,
        fertilizer_needs: NeedTier::Medium,
        temperature_needs: NeedTier::Medium,
    },
    Species {
        id: "cactus",
        name: "Cactus",
        scientific_name: "Cactaceae",
        care_level: CareLevel::Easy,
        water_needs: NeedTier::Low,
        light_needs: NeedTier::High,
        fertilizer_needs: NeedTier::Low,
        temperature_needs: NeedTier::Low,
    },
    Species {
        id: "flower",
        name: "Flowering Plant",
        scientific_name: "Angiosperms",
        care_level: CareLevel::Demanding,
        water_needs: NeedTier::Medium,
        light_needs: NeedTier::Medium,
        fertilizer_needs: NeedTier::High,
        temperature_needs: NeedTier::Medium,
    },
    Species {
        id: "vine",
        name: "Vine",
        scientific_name: "Various genera",
        care_level: CareLevel::Moderate,
        water_needs: NeedTier::Medium,
        light_needs: NeedTier::Medium,
        fertilizer_needs: NeedTier::Medium,
        temperature_needs: NeedTier::Medium,
    },
    Species {
        id: "tree",
        name: "Indoor Tree",
        scientific_name: "Various genera",
        care_level: CareLevel::Demanding,
        water_needs: NeedTier::Medium,
        light_needs: NeedTier::Medium,
        fertilizer_needs: NeedTier::Medium,
        temperature_needs: NeedTier::High,
    },
    Species {
        id: "herb",
        name: "Herb",
        scientific_name: "Various genera",
        care_level: CareLevel::Moderate,
        water_needs: NeedTier::High,
        light_needs: NeedTier::High,
        fertilizer_needs: NeedTier::Medium,
        temperature_needs: NeedTier::Medium,
    },
    Species {
        id: "palm",
        name: "Palm",
        scientific_name: "Arecaceae",
        care_level: CareLevel::Moderate,
        water_needs: NeedTier::Medium,
        light_needs: NeedTier::Medium,
        fertilizer_needs: NeedTier::Low,
        temperature_needs: NeedTier::High,
    },
];

/// All supported species.
pub fn all() -> &'static [Species] {
    SPECIES
}

/// Look up a species by its catalog id.
pub fn find(id: &str) -> Option<&'static Species> {
    SPECIES.iter().find(|s| s.id == id)
}

/// Like [`find`], but fails with a validation error for callers taking
/// the id from user input.
pub fn resolve(id: &str) -> Result<&'static Species, ValidationError> {
    find(id).ok_or_else(|| ValidationError::UnknownSpecies(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_known_species() {
        let fern = find("fern").unwrap();
        assert_eq!(fern.name, "Fern");
        assert_eq!(fern.water_needs, NeedTier::High);
    }

    #[test]
    fn find_unknown_species_is_none() {
        assert!(find("tumbleweed").is_none());
        assert!(matches!(
            resolve("tumbleweed"),
            Err(ValidationError::UnknownSpecies(_))
        ));
    }

    #[test]
    fn catalog_ids_are_unique() {
        for (i, a) in all().iter().enumerate() {
            for b in &all()[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn needs_covers_every_kind() {
        let cactus = find("cactus").unwrap();
        assert_eq!(cactus.needs(ResourceKind::Water), NeedTier::Low);
        assert_eq!(cactus.needs(ResourceKind::Light), NeedTier::High);
        assert_eq!(cactus.needs(ResourceKind::Fertilizer), NeedTier::Low);
        assert_eq!(cactus.needs(ResourceKind::Temperature), NeedTier::Low);
    }
}

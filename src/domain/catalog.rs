//! Crop catalog and dashboard requests.
//!
//! The catalog is the static tree the dashboard selects from:
//! sector -> sub-sector -> category. A request is one selection from it,
//! built once per interaction and passed down by value.

use serde::Serialize;

use super::AnalysisType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubSector {
    pub name: &'static str,
    pub categories: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    pub name: &'static str,
    pub sub_sectors: &'static [SubSector],
}

pub const CATALOG: &[Sector] = &[
    Sector {
        name: "Agriculture",
        sub_sectors: &[
            SubSector { name: "Cereals", categories: &["Rice", "Wheat"] },
            SubSector { name: "Pulses", categories: &["Gram", "Tur"] },
            SubSector { name: "Oilseeds", categories: &["Groundnut", "Soyabean"] },
        ],
    },
    Sector {
        name: "Allied Sectors",
        sub_sectors: &[
            SubSector { name: "Livestock", categories: &["Milk", "Meat"] },
            SubSector { name: "Fisheries", categories: &["Inland", "Marine"] },
        ],
    },
];

/// States with district-level heatmap files.
pub const HEATMAP_STATES: &[&str] = &["Andhra Pradesh", "Maharashtra", "Uttar Pradesh"];

pub fn find_sector(name: &str) -> Option<&'static Sector> {
    CATALOG.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

impl Sector {
    pub fn find_sub_sector(&self, name: &str) -> Option<&'static SubSector> {
        self.sub_sectors
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl SubSector {
    pub fn find_category(&self, name: &str) -> Option<&'static str> {
        self.categories
            .iter()
            .copied()
            .find(|c| c.eq_ignore_ascii_case(name.trim()))
    }
}

pub fn find_state(name: &str) -> Option<&'static str> {
    HEATMAP_STATES
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(name.trim()))
}

/// Why a selection does not name a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown sector '{0}'.")]
    Sector(String),
    #[error("Unknown sub-sector '{sub_sector}' for sector '{sector}'.")]
    SubSector { sector: String, sub_sector: String },
    #[error("Unknown category '{category}' for sub-sector '{sub_sector}'.")]
    Category { sub_sector: String, category: String },
    #[error("Unknown state '{0}'.")]
    State(String),
}

/// One dashboard selection, with names normalized to catalog spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub sector: &'static str,
    pub sub_sector: &'static str,
    pub category: &'static str,
    pub analysis: AnalysisType,
    /// Only meaningful for heatmaps; `None` selects the state-level file.
    pub state: Option<&'static str>,
}

impl AnalysisRequest {
    pub fn new(
        sector: &str,
        sub_sector: &str,
        category: &str,
        analysis: AnalysisType,
        state: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let sector_entry = find_sector(sector).ok_or_else(|| CatalogError::Sector(sector.to_string()))?;
        let sub_entry = sector_entry
            .find_sub_sector(sub_sector)
            .ok_or_else(|| CatalogError::SubSector {
                sector: sector_entry.name.to_string(),
                sub_sector: sub_sector.to_string(),
            })?;
        let category = sub_entry
            .find_category(category)
            .ok_or_else(|| CatalogError::Category {
                sub_sector: sub_entry.name.to_string(),
                category: category.to_string(),
            })?;

        // The dashboard selector spells "no state" as "None".
        let state = match state.map(str::trim) {
            None | Some("") => None,
            Some(s) if s.eq_ignore_ascii_case("none") => None,
            Some(s) => Some(find_state(s).ok_or_else(|| CatalogError::State(s.to_string()))?),
        };

        Ok(Self {
            sector: sector_entry.name,
            sub_sector: sub_entry.name,
            category,
            analysis,
            state,
        })
    }

    /// The first entry of the catalog with a growth view.
    pub fn first() -> Self {
        let sector = &CATALOG[0];
        let sub = &sector.sub_sectors[0];
        Self {
            sector: sector.name,
            sub_sector: sub.name,
            category: sub.categories[0],
            analysis: AnalysisType::Growth,
            state: None,
        }
    }
}

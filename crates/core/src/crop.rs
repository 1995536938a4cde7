//! Crop kinds and the per-crop identity shown on the dashboard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Supported crop kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropKind {
    Soy,
    Corn,
    Wheat,
    Coffee,
    Cotton,
    SugarCane,
}

/// How a crop kind is presented to the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropPresentation {
    pub label: &'static str,
    /// lucide icon name.
    pub icon: &'static str,
    /// Hex accent colour, without `#`.
    pub color: &'static str,
}

impl CropKind {
    pub const ALL: [CropKind; 6] = [
        CropKind::Soy,
        CropKind::Corn,
        CropKind::Wheat,
        CropKind::Coffee,
        CropKind::Cotton,
        CropKind::SugarCane,
    ];

    pub fn presentation(self) -> CropPresentation {
        match self {
            CropKind::Soy => CropPresentation {
                label: "Soy",
                icon: "leaf",
                color: "228B22",
            },
            CropKind::Corn => CropPresentation {
                label: "Corn",
                icon: "sprout",
                color: "DAA520",
            },
            CropKind::Wheat => CropPresentation {
                label: "Wheat",
                icon: "wheat",
                color: "D2B48C",
            },
            CropKind::Coffee => CropPresentation {
                label: "Coffee",
                icon: "coffee",
                color: "6F4E37",
            },
            CropKind::Cotton => CropPresentation {
                label: "Cotton",
                icon: "cloud",
                color: "A9A9A9",
            },
            CropKind::SugarCane => CropPresentation {
                label: "Sugar cane",
                icon: "trees",
                color: "6B8E23",
            },
        }
    }

    /// Accepted spellings, English first, then Portuguese.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            CropKind::Soy => &["soy", "soybean", "soybeans", "soja"],
            CropKind::Corn => &["corn", "maize", "milho"],
            CropKind::Wheat => &["wheat", "trigo"],
            CropKind::Coffee => &["coffee", "café", "cafe"],
            CropKind::Cotton => &["cotton", "algodão", "algodao"],
            CropKind::SugarCane => &["sugar cane", "sugarcane", "cana-de-açúcar", "cana"],
        }
    }

    /// Placeholder image shown when field image generation fails.
    pub fn placeholder_image_url(self) -> String {
        let p = self.presentation();
        format!(
            "https://placehold.co/500x500/{}/FFFFFF?text={}",
            p.color,
            p.label.replace(' ', "+")
        )
    }
}

impl fmt::Display for CropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.presentation().label)
    }
}

impl FromStr for CropKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.aliases().contains(&needle.as_str()))
            .ok_or_else(|| CoreError::Validation(format!("unknown crop type '{s}'")))
    }
}

/// Map coordinates of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Identity of one monitored crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropProfile {
    pub id: String,
    pub property_id: String,
    pub kind: CropKind,
    pub field_name: String,
    pub location: Location,
}

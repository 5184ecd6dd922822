//! Paint swatch catalog: named colors grouped into categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Rgba;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwatchError {
    #[error("swatch {name:?} has invalid hex color {hex:?}; expected #RRGGBB")]
    InvalidHex { name: String, hex: String },
}

pub type SwatchResult<T> = std::result::Result<T, SwatchError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub hex: String,
}

impl Swatch {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }

    /// Opaque paint color; catalog entries carry no alpha.
    pub fn color(&self) -> SwatchResult<Rgba> {
        parse_swatch_hex(&self.hex).ok_or_else(|| SwatchError::InvalidHex {
            name: self.name.clone(),
            hex: self.hex.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwatchCategory {
    pub name: String,
    pub swatch_color: String,
    #[serde(default)]
    pub colors: Vec<Swatch>,
}

fn parse_swatch_hex(value: &str) -> Option<Rgba> {
    let hex = value.trim();
    if !hex.starts_with('#') || hex.len() != 7 {
        return None;
    }
    Rgba::from_hex(hex)
}

fn category(name: &str, swatch_color: &str, colors: &[(&str, &str)]) -> SwatchCategory {
    SwatchCategory {
        name: name.to_string(),
        swatch_color: swatch_color.to_string(),
        colors: colors
            .iter()
            .map(|(name, hex)| Swatch::new(*name, *hex))
            .collect(),
    }
}

pub fn default_catalog() -> Vec<SwatchCategory> {
    vec![
        category(
            "Soft Whites",
            "#FDF9F7",
            &[
                ("Cloud White", "#F8F4F0"),
                ("Linen White", "#F5EFEA"),
                ("Alabaster", "#ECE7E4"),
            ],
        ),
        category(
            "Calm Blues",
            "#E6F0F5",
            &[
                ("Sky Blue Light", "#EBF5F8"),
                ("Powder Blue", "#DCEEF3"),
                ("Baby Blue", "#BDE0E9"),
            ],
        ),
        category(
            "Gentle Greens",
            "#E9F5E6",
            &[
                ("Mint Cream", "#EDF8EC"),
                ("Celadon", "#DEEEDD"),
                ("Tea Green", "#CFE4CE"),
            ],
        ),
    ]
}

/// Case-insensitive lookup across every category.
pub fn find_swatch<'a>(catalog: &'a [SwatchCategory], name: &str) -> Option<&'a Swatch> {
    let wanted = name.trim();
    catalog
        .iter()
        .flat_map(|category| category.colors.iter())
        .find(|swatch| swatch.name.eq_ignore_ascii_case(wanted))
}

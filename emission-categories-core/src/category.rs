//! Emission category codes used within the HEMCO configuration files.
//!
//! Every emission entry in `HEMCO_Config.rc` (and every diagnostic in `HEMCO_Diagn.rc`)
//! carries a numeric category in its `Cat` column. This module is the single place where
//! those numbers are given names.
//!
//! These categories should correspond with the HEMCO configuration files. If the category
//! listing there changes, this table must be updated accordingly; see
//! [`crate::validation`] for a check that can be run against a configuration file.
//!
//! # Codes
//!
//! | Constant                  | Variant                                | Code |
//! |---------------------------|----------------------------------------|------|
//! | [`CATEGORY_ANTHRO`]        | [`EmissionCategory::Anthro`]           | 1    |
//! | [`CATEGORY_NATURAL`]       | [`EmissionCategory::Natural`]          | 3    |
//! | [`CATEGORY_BIOGENIC`]      | [`EmissionCategory::Biogenic`]         | 4    |
//! | [`CATEGORY_BIOMASS`]       | [`EmissionCategory::Biomass`]          | 5    |
//! | [`CATEGORY_SHIP`]          | [`EmissionCategory::Ship`]             | 10   |
//! | [`CATEGORY_TRASH`]         | [`EmissionCategory::Trash`]            | 12   |
//! | [`CATEGORY_AIRCRAFT`]      | [`EmissionCategory::Aircraft`]         | 20   |
//! | [`CATEGORY_VOLCANO`]       | [`EmissionCategory::Volcano`]          | 50   |
//! | [`CATEGORY_VOLCANO_ERUPT`] | [`EmissionCategory::VolcanoErupt`]     | 51   |
//! | [`CATEGORY_VOLCANO_DEGAS`] | [`EmissionCategory::VolcanoDegas`]     | 52   |
//!
//! Unassigned values between the smallest and largest code (2, 6-9, 11, 13-19, 21-49) are
//! reserved. They are never reused for a different category.
//!
//! # Usage
//!
//! ```rust
//! use emission_categories_core::category::{EmissionCategory, CATEGORY_BIOMASS};
//!
//! assert_eq!(CATEGORY_BIOMASS, 5);
//! assert_eq!(EmissionCategory::VolcanoErupt.code(), 51);
//! assert_eq!(EmissionCategory::from_code(10), Some(EmissionCategory::Ship));
//! ```
//!
//! Names outside the table do not compile:
//!
//! ```rust,compile_fail
//! use emission_categories_core::category::CATEGORY_FOSSIL;
//! ```

use crate::errors::{CategoryError, CategoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer type of a category code as it appears in the `Cat` column.
pub type CategoryCode = u32;

/// Prefix used by the named constants (`CATEGORY_ANTHRO`).
const CONSTANT_PREFIX: &str = "CATEGORY_";

/// A category of emissions.
///
/// The discriminant of each variant is its category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum EmissionCategory {
    /// Anthropogenic emissions
    Anthro = 1,
    /// Natural emissions
    Natural = 3,
    /// Biogenic emissions
    Biogenic = 4,
    /// Biomass burning
    Biomass = 5,
    /// Ship emissions
    Ship = 10,
    /// Trash burning
    Trash = 12,
    /// Aircraft emissions
    Aircraft = 20,
    /// All volcanic emissions
    Volcano = 50,
    /// Eruptive volcanoes
    VolcanoErupt = 51,
    /// Degassing volcanoes
    VolcanoDegas = 52,
}

impl EmissionCategory {
    /// All categories in ascending code order.
    pub const ALL: [EmissionCategory; 10] = [
        EmissionCategory::Anthro,
        EmissionCategory::Natural,
        EmissionCategory::Biogenic,
        EmissionCategory::Biomass,
        EmissionCategory::Ship,
        EmissionCategory::Trash,
        EmissionCategory::Aircraft,
        EmissionCategory::Volcano,
        EmissionCategory::VolcanoErupt,
        EmissionCategory::VolcanoDegas,
    ];

    /// Numeric code used in the `Cat` column of the configuration files.
    pub const fn code(self) -> CategoryCode {
        self as CategoryCode
    }

    /// Symbolic name, without the `CATEGORY_` prefix of the constants.
    pub const fn name(self) -> &'static str {
        match self {
            EmissionCategory::Anthro => "ANTHRO",
            EmissionCategory::Natural => "NATURAL",
            EmissionCategory::Biogenic => "BIOGENIC",
            EmissionCategory::Biomass => "BIOMASS",
            EmissionCategory::Ship => "SHIP",
            EmissionCategory::Trash => "TRASH",
            EmissionCategory::Aircraft => "AIRCRAFT",
            EmissionCategory::Volcano => "VOLCANO",
            EmissionCategory::VolcanoErupt => "VOLCANO_ERUPT",
            EmissionCategory::VolcanoDegas => "VOLCANO_DEGAS",
        }
    }

    /// Short human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            EmissionCategory::Anthro => "Anthropogenic",
            EmissionCategory::Natural => "Natural",
            EmissionCategory::Biogenic => "Biogenic",
            EmissionCategory::Biomass => "Biomass burning",
            EmissionCategory::Ship => "Ships",
            EmissionCategory::Trash => "Trash burning",
            EmissionCategory::Aircraft => "Aircraft",
            EmissionCategory::Volcano => "Volcanoes",
            EmissionCategory::VolcanoErupt => "Eruptive volcanoes",
            EmissionCategory::VolcanoDegas => "Degassing volcanoes",
        }
    }

    const fn description(self) -> &'static str {
        match self {
            EmissionCategory::Anthro => {
                "Anthropogenic emissions from fossil fuel use, industry, residential and agricultural activity"
            }
            EmissionCategory::Natural => {
                "Natural non-biogenic sources such as soils, lightning, sea salt and dust"
            }
            EmissionCategory::Biogenic => "Biogenic emissions from terrestrial vegetation",
            EmissionCategory::Biomass => "Emissions from open biomass burning",
            EmissionCategory::Ship => "Emissions from ocean-going ships",
            EmissionCategory::Trash => "Emissions from open burning of trash",
            EmissionCategory::Aircraft => "Emissions from aviation",
            EmissionCategory::Volcano => "Volcanic emissions, eruptive and degassing combined",
            EmissionCategory::VolcanoErupt => "Volcanic emissions from eruptions",
            EmissionCategory::VolcanoDegas => {
                "Volcanic emissions from continuous, non-eruptive degassing"
            }
        }
    }

    /// Full static definition of this category.
    pub const fn definition(self) -> StaticCategoryDefinition {
        StaticCategoryDefinition::new(self.name(), self.code(), self.label(), self.description())
    }

    /// Look up a category by code.
    ///
    /// Returns `None` for reserved and out-of-range codes.
    pub const fn from_code(code: CategoryCode) -> Option<EmissionCategory> {
        match code {
            1 => Some(EmissionCategory::Anthro),
            3 => Some(EmissionCategory::Natural),
            4 => Some(EmissionCategory::Biogenic),
            5 => Some(EmissionCategory::Biomass),
            10 => Some(EmissionCategory::Ship),
            12 => Some(EmissionCategory::Trash),
            20 => Some(EmissionCategory::Aircraft),
            50 => Some(EmissionCategory::Volcano),
            51 => Some(EmissionCategory::VolcanoErupt),
            52 => Some(EmissionCategory::VolcanoDegas),
            _ => None,
        }
    }

    /// Iterate over all categories in ascending code order.
    pub fn iter() -> impl Iterator<Item = EmissionCategory> {
        Self::ALL.into_iter()
    }

    /// The aggregate category this one is a part of.
    ///
    /// Eruptive and degassing volcanoes are both part of [`EmissionCategory::Volcano`].
    pub const fn parent(self) -> Option<EmissionCategory> {
        match self {
            EmissionCategory::VolcanoErupt | EmissionCategory::VolcanoDegas => {
                Some(EmissionCategory::Volcano)
            }
            _ => None,
        }
    }

    /// Whether this is one of the volcanic categories.
    pub const fn is_volcanic(self) -> bool {
        matches!(
            self,
            EmissionCategory::Volcano
                | EmissionCategory::VolcanoErupt
                | EmissionCategory::VolcanoDegas
        )
    }
}

impl fmt::Display for EmissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EmissionCategory {
    type Err = CategoryError;

    /// Parse a symbolic name.
    ///
    /// Matching is case-insensitive and accepts both `VOLCANO_ERUPT` and
    /// `CATEGORY_VOLCANO_ERUPT`.
    fn from_str(s: &str) -> CategoryResult<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let symbol = upper.strip_prefix(CONSTANT_PREFIX).unwrap_or(&upper);

        Self::iter()
            .find(|category| category.name() == symbol)
            .ok_or_else(|| CategoryError::UnknownName(s.to_string()))
    }
}

impl TryFrom<CategoryCode> for EmissionCategory {
    type Error = CategoryError;

    fn try_from(code: CategoryCode) -> CategoryResult<Self> {
        Self::from_code(code).ok_or(CategoryError::UnknownCode(code))
    }
}

impl From<EmissionCategory> for CategoryCode {
    fn from(category: EmissionCategory) -> Self {
        category.code()
    }
}

/// Metadata describing a category.
///
/// Holds `&'static str` references so definitions can be produced in const contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticCategoryDefinition {
    /// Symbolic name (e.g. "VOLCANO_ERUPT")
    pub name: &'static str,
    /// Code used in the configuration files
    pub code: CategoryCode,
    /// Short label for reports
    pub label: &'static str,
    /// Description
    pub description: &'static str,
}

impl StaticCategoryDefinition {
    /// Create a new static category definition.
    pub const fn new(
        name: &'static str,
        code: CategoryCode,
        label: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            code,
            label,
            description,
        }
    }

    /// Name of the matching named constant (e.g. "CATEGORY_VOLCANO_ERUPT").
    pub fn constant_name(&self) -> String {
        format!("{}{}", CONSTANT_PREFIX, self.name)
    }
}

// ============================================================================
// Named constants
// ============================================================================

pub const CATEGORY_ANTHRO: CategoryCode = EmissionCategory::Anthro.code();
pub const CATEGORY_NATURAL: CategoryCode = EmissionCategory::Natural.code();
pub const CATEGORY_BIOGENIC: CategoryCode = EmissionCategory::Biogenic.code();
pub const CATEGORY_BIOMASS: CategoryCode = EmissionCategory::Biomass.code();
pub const CATEGORY_SHIP: CategoryCode = EmissionCategory::Ship.code();
pub const CATEGORY_TRASH: CategoryCode = EmissionCategory::Trash.code();
pub const CATEGORY_AIRCRAFT: CategoryCode = EmissionCategory::Aircraft.code();
pub const CATEGORY_VOLCANO: CategoryCode = EmissionCategory::Volcano.code();
pub const CATEGORY_VOLCANO_ERUPT: CategoryCode = EmissionCategory::VolcanoErupt.code();
pub const CATEGORY_VOLCANO_DEGAS: CategoryCode = EmissionCategory::VolcanoDegas.code();

/// Smallest assigned code.
pub const MIN_CATEGORY_CODE: CategoryCode = EmissionCategory::ALL[0].code();

/// Largest assigned code.
pub const MAX_CATEGORY_CODE: CategoryCode =
    EmissionCategory::ALL[EmissionCategory::ALL.len() - 1].code();

const fn is_strictly_ascending(categories: &[EmissionCategory]) -> bool {
    let mut i = 1;
    while i < categories.len() {
        if categories[i - 1].code() >= categories[i].code() {
            return false;
        }
        i += 1;
    }
    true
}

// MIN/MAX and the reserved ranges rely on this ordering
const _: () = assert!(is_strictly_ascending(&EmissionCategory::ALL));

/// Whether `code` belongs to a category in the table.
pub const fn is_assigned_code(code: CategoryCode) -> bool {
    EmissionCategory::from_code(code).is_some()
}

/// Whether `code` is an unassigned value inside the range of assigned codes.
///
/// ```rust
/// use emission_categories_core::category::is_reserved_code;
///
/// assert!(is_reserved_code(2));
/// assert!(is_reserved_code(11));
/// assert!(!is_reserved_code(12));
/// assert!(!is_reserved_code(99));
/// ```
pub const fn is_reserved_code(code: CategoryCode) -> bool {
    code >= MIN_CATEGORY_CODE && code <= MAX_CATEGORY_CODE && !is_assigned_code(code)
}

/// All reserved codes, ascending.
pub fn reserved_codes() -> impl Iterator<Item = CategoryCode> {
    (MIN_CATEGORY_CODE..=MAX_CATEGORY_CODE).filter(|code| is_reserved_code(*code))
}

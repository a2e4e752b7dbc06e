//! # Comparison Module
//!
//! Derives the side-by-side comparison table for a small set of dogs.
//!
//! ## Table Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Biscuit        Mango          Pepper              │
//! │  Overview                                                               │
//! │    Breed              Terrier Mix    Lab Mix        -                   │
//! │    Age                2 years        Puppy          5 years     differs │
//! │  Compatibility        (row only when EVERY dog has the field)           │
//! │    Good with cats     Yes            No             Yes         differs │
//! │  Adoption                                                               │
//! │    Fee                $250           $250           Free        differs │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are declared once in [`SECTIONS`]; adding a field means adding a
//! row there, not another branch in the builder.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Dog;
use crate::{MAX_COMPARE_DOGS, MIN_COMPARE_DOGS};

// =============================================================================
// Row Declarations
// =============================================================================

/// When a row is worth showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVisibility {
    /// At least one dog has the field.
    AnyHasValue,
    /// Every dog has the field. A half-filled compatibility row reads as
    /// "unknown means no", so those rows need the full set.
    AllHaveValue,
}

struct RowSpec {
    key: &'static str,
    label: &'static str,
    visibility: RowVisibility,
    extract: fn(&Dog) -> Option<String>,
}

struct SectionSpec {
    title: &'static str,
    rows: &'static [RowSpec],
}

static SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        title: "Overview",
        rows: &[
            RowSpec {
                key: "breed",
                label: "Breed",
                visibility: RowVisibility::AnyHasValue,
                extract: breed,
            },
            RowSpec {
                key: "age",
                label: "Age",
                visibility: RowVisibility::AnyHasValue,
                extract: age,
            },
            RowSpec {
                key: "sex",
                label: "Sex",
                visibility: RowVisibility::AnyHasValue,
                extract: sex,
            },
            RowSpec {
                key: "size",
                label: "Size",
                visibility: RowVisibility::AnyHasValue,
                extract: size,
            },
            RowSpec {
                key: "energyLevel",
                label: "Energy level",
                visibility: RowVisibility::AnyHasValue,
                extract: energy_level,
            },
        ],
    },
    SectionSpec {
        title: "Compatibility",
        rows: &[
            RowSpec {
                key: "goodWithDogs",
                label: "Good with dogs",
                visibility: RowVisibility::AllHaveValue,
                extract: good_with_dogs,
            },
            RowSpec {
                key: "goodWithCats",
                label: "Good with cats",
                visibility: RowVisibility::AllHaveValue,
                extract: good_with_cats,
            },
            RowSpec {
                key: "goodWithKids",
                label: "Good with kids",
                visibility: RowVisibility::AllHaveValue,
                extract: good_with_kids,
            },
        ],
    },
    SectionSpec {
        title: "Adoption",
        rows: &[
            RowSpec {
                key: "organization",
                label: "Organization",
                visibility: RowVisibility::AnyHasValue,
                extract: organization,
            },
            RowSpec {
                key: "location",
                label: "Location",
                visibility: RowVisibility::AnyHasValue,
                extract: location,
            },
            RowSpec {
                key: "adoptionFee",
                label: "Adoption fee",
                visibility: RowVisibility::AnyHasValue,
                extract: adoption_fee,
            },
        ],
    },
];

fn text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn yes_no(value: Option<bool>) -> Option<String> {
    value.map(|v| if v { "Yes" } else { "No" }.to_string())
}

fn breed(dog: &Dog) -> Option<String> {
    text(&dog.breed)
}

fn age(dog: &Dog) -> Option<String> {
    text(&dog.age_text)
}

fn sex(dog: &Dog) -> Option<String> {
    text(&dog.sex)
}

fn size(dog: &Dog) -> Option<String> {
    text(&dog.size)
}

fn energy_level(dog: &Dog) -> Option<String> {
    text(&dog.energy_level)
}

fn good_with_dogs(dog: &Dog) -> Option<String> {
    yes_no(dog.good_with_dogs)
}

fn good_with_cats(dog: &Dog) -> Option<String> {
    yes_no(dog.good_with_cats)
}

fn good_with_kids(dog: &Dog) -> Option<String> {
    yes_no(dog.good_with_kids)
}

fn organization(dog: &Dog) -> Option<String> {
    text(&dog.organization_name)
}

fn location(dog: &Dog) -> Option<String> {
    text(&dog.location)
}

fn adoption_fee(dog: &Dog) -> Option<String> {
    dog.adoption_fee().map(|fee| fee.fee_label())
}

// =============================================================================
// Table Types
// =============================================================================

/// One attribute across all compared dogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ComparisonRow {
    pub key: String,
    pub label: String,
    /// One entry per dog, in column order. `None` renders as a dash.
    pub values: Vec<Option<String>>,
    /// The present values are not all the same.
    pub differs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ComparisonSection {
    pub title: String,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ComparisonTable {
    /// Column order.
    pub dog_ids: Vec<String>,
    pub dog_names: Vec<String>,
    /// Sections with at least one visible row.
    pub sections: Vec<ComparisonSection>,
}

impl ComparisonTable {
    pub fn row(&self, key: &str) -> Option<&ComparisonRow> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .find(|r| r.key == key)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds the comparison table for `dogs`, in the order given.
///
/// ## Errors
/// - [`CoreError::InvalidComparison`] for fewer than 2 or more than 3 dogs
/// - [`CoreError::DuplicateDog`] when the same dog appears twice
/// - [`CoreError::Validation`] for records with a bad id or name
pub fn build_comparison(dogs: &[Dog]) -> CoreResult<ComparisonTable> {
    if dogs.len() < MIN_COMPARE_DOGS || dogs.len() > MAX_COMPARE_DOGS {
        return Err(CoreError::InvalidComparison {
            count: dogs.len(),
            min: MIN_COMPARE_DOGS,
            max: MAX_COMPARE_DOGS,
        });
    }

    for (i, dog) in dogs.iter().enumerate() {
        dog.validate()?;
        if dogs[..i].iter().any(|other| other.id == dog.id) {
            return Err(CoreError::DuplicateDog(dog.id.clone()));
        }
    }

    let sections = SECTIONS
        .iter()
        .filter_map(|section| {
            let rows: Vec<ComparisonRow> =
                section.rows.iter().filter_map(|spec| build_row(spec, dogs)).collect();

            (!rows.is_empty()).then(|| ComparisonSection {
                title: section.title.to_string(),
                rows,
            })
        })
        .collect();

    Ok(ComparisonTable {
        dog_ids: dogs.iter().map(|d| d.id.clone()).collect(),
        dog_names: dogs.iter().map(|d| d.name.trim().to_string()).collect(),
        sections,
    })
}

fn build_row(spec: &RowSpec, dogs: &[Dog]) -> Option<ComparisonRow> {
    let values: Vec<Option<String>> = dogs.iter().map(spec.extract).collect();

    let visible = match spec.visibility {
        RowVisibility::AnyHasValue => values.iter().any(Option::is_some),
        RowVisibility::AllHaveValue => values.iter().all(Option::is_some),
    };
    if !visible {
        return None;
    }

    let mut present = values.iter().flatten();
    let differs = match present.next() {
        Some(first) => present.any(|v| v != first),
        None => false,
    };

    Some(ComparisonRow {
        key: spec.key.to_string(),
        label: spec.label.to_string(),
        values,
        differs,
    })
}

//! # Domain Types
//!
//! Display records handed to the view logic by the listing pages.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Display Records                                 │
//! │                                                                         │
//! │  ┌─────────────────────────┐        ┌─────────────────────────┐        │
//! │  │          Dog            │        │     Organization        │        │
//! │  │  ─────────────────────  │        │  ─────────────────────  │        │
//! │  │  id (UUID)              │        │  id (UUID)              │        │
//! │  │  name                   │        │  name                   │        │
//! │  │  breed, age, sex, size  │        │  location               │        │
//! │  │  good_with_* (Option)   │        │  logo_url               │        │
//! │  │  organization_name      │        │  website_url            │        │
//! │  │  adoption_fee_cents     │        └─────────────────────────┘        │
//! │  │  primary_image_url      │                                            │
//! │  └─────────────────────────┘                                            │
//! │                                                                         │
//! │  Every descriptive field is optional: listings come from many rescues  │
//! │  and few of them fill in everything.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_dog_name, validate_fee_cents, validate_uuid};

// =============================================================================
// Dog
// =============================================================================

/// A dog listed for adoption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dog {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    #[serde(default)]
    pub breed: Option<String>,

    /// Free text from the rescue, e.g. "2 years" or "Puppy".
    #[serde(default)]
    pub age_text: Option<String>,

    #[serde(default)]
    pub sex: Option<String>,

    #[serde(default)]
    pub size: Option<String>,

    #[serde(default)]
    pub energy_level: Option<String>,

    #[serde(default)]
    pub good_with_dogs: Option<bool>,

    #[serde(default)]
    pub good_with_cats: Option<bool>,

    #[serde(default)]
    pub good_with_kids: Option<bool>,

    #[serde(default)]
    pub organization_name: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    /// Fee in cents. `Some(0)` means free, `None` means not listed.
    #[serde(default)]
    pub adoption_fee_cents: Option<i64>,

    #[serde(default)]
    pub primary_image_url: Option<String>,

    /// When the listing was published.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Dog {
    /// Creates a dog with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Dog {
            id: id.into(),
            name: name.into(),
            breed: None,
            age_text: None,
            sex: None,
            size: None,
            energy_level: None,
            good_with_dogs: None,
            good_with_cats: None,
            good_with_kids: None,
            organization_name: None,
            location: None,
            adoption_fee_cents: None,
            primary_image_url: None,
            created_at: Utc::now(),
        }
    }

    /// Checks the fields the views depend on.
    pub fn validate(&self) -> CoreResult<()> {
        validate_uuid(&self.id)?;
        validate_dog_name(&self.name)?;
        if let Some(fee) = self.adoption_fee_cents {
            validate_fee_cents(fee)?;
        }
        Ok(())
    }

    pub fn adoption_fee(&self) -> Option<Money> {
        self.adoption_fee_cents.map(Money::from_cents)
    }

    /// Alt text for the dog's photo, e.g. "Biscuit, Terrier Mix".
    ///
    /// Stays the same no matter which fallback stage the image reaches.
    pub fn image_alt(&self) -> String {
        match self.breed.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
            Some(breed) => format!("{}, {}", self.name.trim(), breed),
            None => self.name.trim().to_string(),
        }
    }
}

// =============================================================================
// Organization
// =============================================================================

/// A rescue organization listing dogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}

impl Organization {
    pub fn validate(&self) -> CoreResult<()> {
        validate_uuid(&self.id)?;
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "organization name".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn logo_alt(&self) -> String {
        format!("{} logo", self.name.trim())
    }
}

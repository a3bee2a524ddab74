use crate::error::NambiError;
use crate::types::itinerary::{CreateItinerary, UpdateItinerary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    pub id: i64,
    pub title: String,
    pub days: i64,
    pub budget: Option<String>,
    pub places: String,
    pub accommodation: String,
    pub transport: String,
    pub details: String,
    pub package_name: String,
    pub created_at: DateTime<Utc>,
}

/// Validated insert payload; `id` and `created_at` come from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItinerary {
    pub title: String,
    pub days: i64,
    pub budget: Option<String>,
    pub places: String,
    pub accommodation: String,
    pub transport: String,
    pub details: String,
    pub package_name: String,
}

impl TryFrom<CreateItinerary> for NewItinerary {
    type Error = NambiError;

    /// Fails with every missing required field, in declaration order.
    fn try_from(req: CreateItinerary) -> Result<Self, Self::Error> {
        let missing: Vec<String> = [
            ("title", req.title.is_none()),
            ("days", req.days.is_none()),
            ("places", req.places.is_none()),
            ("accommodation", req.accommodation.is_none()),
            ("transport", req.transport.is_none()),
            ("details", req.details.is_none()),
            ("package_name", req.package_name.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name.to_string())
        .collect();

        let (
            Some(title),
            Some(days),
            Some(places),
            Some(accommodation),
            Some(transport),
            Some(details),
            Some(package_name),
        ) = (
            req.title,
            req.days,
            req.places,
            req.accommodation,
            req.transport,
            req.details,
            req.package_name,
        )
        else {
            return Err(NambiError::MissingFields(missing));
        };

        Ok(Self {
            title,
            days,
            budget: req.budget.map(|b| b.into_text()),
            places,
            accommodation,
            transport,
            details,
            package_name,
        })
    }
}

impl Itinerary {
    /// Overwrite only the fields present in `patch`.
    pub fn apply(&mut self, patch: UpdateItinerary) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(days) = patch.days {
            self.days = days;
        }
        if let Some(budget) = patch.budget {
            self.budget = budget.map(|b| b.into_text());
        }
        if let Some(places) = patch.places {
            self.places = places;
        }
        if let Some(accommodation) = patch.accommodation {
            self.accommodation = accommodation;
        }
        if let Some(transport) = patch.transport {
            self.transport = transport;
        }
        if let Some(details) = patch.details {
            self.details = details;
        }
        if let Some(package_name) = patch.package_name {
            self.package_name = package_name;
        }
    }
}

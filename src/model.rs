// Data model shared by the store, the offer providers and the search

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

id_type!(
    /// Unique id of a hotel as found in the hotel data set
    HotelId
);
id_type!(
    /// Unique id of an advertiser
    AdvertiserId
);
id_type!(CityId);

/// Offers returned by one advertiser for one query, at most one per hotel
pub type OfferMap = BTreeMap<HotelId, Offer>;

/// A hotel from the reference data. Two hotels are the same hotel when their ids match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub city_id: Option<CityId>,
    // User rating between 0 and 100
    pub rating: u8,
    // Star category between 1 and 5
    pub stars: u8,
}

impl Hotel {
    pub fn new(
        id: impl Into<HotelId>,
        name: impl Into<String>,
        city_id: Option<CityId>,
        rating: u8,
        stars: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city_id,
            rating,
            stars,
        }
    }

    /// True if the hotel belongs to the given city. A hotel without a city never matches.
    pub fn is_in_city(&self, city_id: CityId) -> bool {
        self.city_id == Some(city_id)
    }
}

impl PartialEq for Hotel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Hotel {}

impl Hash for Hotel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A company publishing priced offers for hotel stays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advertiser {
    pub id: AdvertiserId,
    pub name: String,
}

impl Advertiser {
    pub fn new(id: impl Into<AdvertiserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for Advertiser {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Advertiser {}

impl Hash for Advertiser {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A concrete offer from a specific advertiser
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offer {
    pub advertiser: Advertiser,
    pub price_in_euro: u32,
    // The cost per click the advertiser pays for this offer
    pub cpc: u32,
}

impl Offer {
    pub fn new(advertiser: Advertiser, price_in_euro: u32, cpc: u32) -> Self {
        Self {
            advertiser,
            price_in_euro,
            cpc,
        }
    }
}

/// A hotel together with the offers collected for it during one search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelWithOffers {
    pub hotel: Hotel,
    pub offers: Vec<Offer>,
}

impl HotelWithOffers {
    pub fn new(hotel: Hotel, first_offer: Offer) -> Self {
        Self {
            hotel,
            offers: vec![first_offer],
        }
    }

    pub fn hotel_id(&self) -> HotelId {
        self.hotel.id
    }

    pub fn add_offer(&mut self, offer: Offer) {
        self.offers.push(offer);
    }
}

/// The stay period a search is performed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    // Zero for same-day or inverted ranges
    pub fn nights(&self) -> u32 {
        (self.end - self.start).num_days().max(0) as u32
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

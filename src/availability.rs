// Resolution of the hotels in a city and of the advertisers able to offer on them

use crate::model::{Advertiser, CityId, HotelId};
use crate::store::ReferenceDataStore;
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub struct AvailabilityResolver<'a> {
    store: &'a ReferenceDataStore,
}

impl<'a> AvailabilityResolver<'a> {
    pub fn new(store: &'a ReferenceDataStore) -> Self {
        Self { store }
    }

    /// Exact, case-sensitive lookup of a city by name. `None` if no city has that name.
    ///
    /// If several cities share the name, the one with the lowest id is returned.
    pub fn resolve_city_id(&self, city_name: &str) -> Option<CityId> {
        let city_id = self
            .store
            .cities()
            .iter()
            .find(|(_, name)| name.as_str() == city_name)
            .map(|(id, _)| *id);

        debug!(city_name, ?city_id, "Resolved city");
        city_id
    }

    /// Ids of all hotels located in the given city. Empty for `None`.
    pub fn hotels_in_city(&self, city_id: Option<CityId>) -> BTreeSet<HotelId> {
        let Some(city_id) = city_id else {
            return BTreeSet::new();
        };

        self.store
            .hotels()
            .iter()
            .filter(|hotel| hotel.is_in_city(city_id))
            .map(|hotel| hotel.id)
            .collect()
    }

    /// Advertisers whose availability covers at least one of the given hotels,
    /// ordered by ascending advertiser id.
    pub fn advertisers_for_hotels(&self, hotel_ids: &BTreeSet<HotelId>) -> Vec<Advertiser> {
        if hotel_ids.is_empty() {
            return Vec::new();
        }

        let mut advertisers = Vec::new();
        for (advertiser_id, available) in self.store.availability().iter() {
            if available.is_disjoint(hotel_ids) {
                continue;
            }

            match self.store.advertiser(advertiser_id) {
                Some(advertiser) => advertisers.push(advertiser.clone()),
                None => warn!(
                    %advertiser_id,
                    "Availability references an unknown advertiser, skipping"
                ),
            }
        }

        debug!(
            hotels = hotel_ids.len(),
            advertisers = advertisers.len(),
            "Resolved eligible advertisers"
        );
        advertisers
    }
}

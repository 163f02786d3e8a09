// In-memory reference data. Built once, read-only afterwards.

use crate::loader::DataError;
use crate::model::{Advertiser, AdvertiserId, CityId, Hotel, HotelId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::info;

/// Which advertisers may offer on which hotels, independent of live pricing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    hotels_by_advertiser: BTreeMap<AdvertiserId, BTreeSet<HotelId>>,
}

impl Availability {
    /// Group `(advertiser, hotel)` pairs per advertiser. Repeated pairs collapse.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (AdvertiserId, HotelId)>,
    {
        let mut hotels_by_advertiser: BTreeMap<AdvertiserId, BTreeSet<HotelId>> = BTreeMap::new();
        for (advertiser_id, hotel_id) in pairs {
            hotels_by_advertiser
                .entry(advertiser_id)
                .or_default()
                .insert(hotel_id);
        }
        Self {
            hotels_by_advertiser,
        }
    }

    pub fn hotels_for(&self, advertiser_id: AdvertiserId) -> Option<&BTreeSet<HotelId>> {
        self.hotels_by_advertiser.get(&advertiser_id)
    }

    // Ascending advertiser id
    pub fn iter(&self) -> impl Iterator<Item = (AdvertiserId, &BTreeSet<HotelId>)> {
        self.hotels_by_advertiser.iter().map(|(id, hotels)| (*id, hotels))
    }

    pub fn pairs(&self) -> impl Iterator<Item = (AdvertiserId, HotelId)> + '_ {
        self.iter()
            .flat_map(|(advertiser_id, hotels)| hotels.iter().map(move |h| (advertiser_id, *h)))
    }

    pub fn len(&self) -> usize {
        self.hotels_by_advertiser.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels_by_advertiser.is_empty()
    }
}

/// Hotels, advertisers, availability and cities for one run of the engine
#[derive(Debug, Clone)]
pub struct ReferenceDataStore {
    hotels: Vec<Hotel>,
    advertisers: Vec<Advertiser>,
    availability: Availability,
    cities: BTreeMap<CityId, String>,
    hotel_index: HashMap<HotelId, usize>,
    advertiser_index: HashMap<AdvertiserId, usize>,
}

impl ReferenceDataStore {
    /// Build the store. Fails if a hotel, advertiser or city id repeats.
    pub fn new<C>(
        hotels: Vec<Hotel>,
        advertisers: Vec<Advertiser>,
        availability: Availability,
        cities: C,
    ) -> Result<Self, DataError>
    where
        C: IntoIterator<Item = (CityId, String)>,
    {
        let mut hotel_index = HashMap::with_capacity(hotels.len());
        for (pos, hotel) in hotels.iter().enumerate() {
            if hotel_index.insert(hotel.id, pos).is_some() {
                return Err(DataError::DuplicateId {
                    kind: "hotel",
                    id: hotel.id.0,
                });
            }
        }

        let mut advertiser_index = HashMap::with_capacity(advertisers.len());
        for (pos, advertiser) in advertisers.iter().enumerate() {
            if advertiser_index.insert(advertiser.id, pos).is_some() {
                return Err(DataError::DuplicateId {
                    kind: "advertiser",
                    id: advertiser.id.0,
                });
            }
        }

        let mut city_map = BTreeMap::new();
        for (id, name) in cities {
            if city_map.insert(id, name).is_some() {
                return Err(DataError::DuplicateId {
                    kind: "city",
                    id: id.0,
                });
            }
        }

        info!(
            hotels = hotels.len(),
            advertisers = advertisers.len(),
            availability = availability.len(),
            cities = city_map.len(),
            "Reference data store built"
        );

        Ok(Self {
            hotels,
            advertisers,
            availability,
            cities: city_map,
            hotel_index,
            advertiser_index,
        })
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn advertisers(&self) -> &[Advertiser] {
        &self.advertisers
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn cities(&self) -> &BTreeMap<CityId, String> {
        &self.cities
    }

    pub fn hotel(&self, id: HotelId) -> Option<&Hotel> {
        self.hotel_index.get(&id).map(|&pos| &self.hotels[pos])
    }

    pub fn advertiser(&self, id: AdvertiserId) -> Option<&Advertiser> {
        self.advertiser_index.get(&id).map(|&pos| &self.advertisers[pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> ReferenceDataStore {
        ReferenceDataStore::new(
            vec![
                Hotel::new(10, "Hotel Astoria", Some(CityId(1)), 80, 4),
                Hotel::new(20, "Seaside Lodge", Some(CityId(2)), 65, 3),
            ],
            vec![Advertiser::new(100, "Expedia"), Advertiser::new(200, "Booking")],
            Availability::from_pairs([
                (AdvertiserId(100), HotelId(10)),
                (AdvertiserId(200), HotelId(10)),
                (AdvertiserId(200), HotelId(20)),
            ]),
            [(CityId(1), "Hamburg".to_string()), (CityId(2), "Berlin".to_string())],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_by_id() {
        let store = sample_store();

        assert_eq!(store.hotel(HotelId(20)).unwrap().name, "Seaside Lodge");
        assert!(store.hotel(HotelId(30)).is_none());
        assert_eq!(store.advertiser(AdvertiserId(200)).unwrap().name, "Booking");
        assert!(store.advertiser(AdvertiserId(300)).is_none());
        assert_eq!(store.cities()[&CityId(1)], "Hamburg");
    }

    #[test]
    fn test_availability_groups_pairs_per_advertiser() {
        let availability = Availability::from_pairs([
            (AdvertiserId(200), HotelId(20)),
            (AdvertiserId(100), HotelId(10)),
            (AdvertiserId(200), HotelId(10)),
            (AdvertiserId(200), HotelId(20)),
        ]);

        assert_eq!(availability.len(), 2);
        let ids: Vec<u32> = availability
            .hotels_for(AdvertiserId(200))
            .unwrap()
            .iter()
            .map(|h| h.0)
            .collect();
        assert_eq!(ids, vec![10, 20]);
        assert_eq!(availability.pairs().count(), 3);

        let advertisers: Vec<AdvertiserId> = availability.iter().map(|(id, _)| id).collect();
        assert_eq!(advertisers, vec![AdvertiserId(100), AdvertiserId(200)]);
    }

    #[test]
    fn test_duplicate_hotel_id_is_rejected() {
        let result = ReferenceDataStore::new(
            vec![
                Hotel::new(10, "Hotel Astoria", Some(CityId(1)), 80, 4),
                Hotel::new(10, "Hotel Astoria Annex", Some(CityId(1)), 70, 3),
            ],
            vec![],
            Availability::default(),
            Vec::<(CityId, String)>::new(),
        );

        match result {
            Err(DataError::DuplicateId { kind, id }) => {
                assert_eq!(kind, "hotel");
                assert_eq!(id, 10);
            }
            other => panic!("Expected duplicate hotel id error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_advertiser_and_city_ids_are_rejected() {
        let advertisers = ReferenceDataStore::new(
            vec![],
            vec![Advertiser::new(100, "Expedia"), Advertiser::new(100, "Expedia")],
            Availability::default(),
            Vec::<(CityId, String)>::new(),
        );
        assert!(matches!(
            advertisers,
            Err(DataError::DuplicateId { kind: "advertiser", id: 100 })
        ));

        let cities = ReferenceDataStore::new(
            vec![],
            vec![],
            Availability::default(),
            [(CityId(1), "Hamburg".to_string()), (CityId(1), "Berlin".to_string())],
        );
        assert!(matches!(
            cities,
            Err(DataError::DuplicateId { kind: "city", id: 1 })
        ));
    }
}

// Consolidation of per-advertiser offer maps into one entry per hotel

use crate::model::{HotelId, HotelWithOffers, OfferMap};
use crate::search::SearchError;
use crate::store::ReferenceDataStore;
use std::collections::HashMap;
use tracing::trace;

/// Accumulates the offers of one search.
///
/// Entries keep first-seen order. Each hotel gets exactly one entry, no matter
/// how many advertisers offer on it. Offers are appended as they arrive and
/// never deduplicated: merging the same advertiser twice adds its offer twice.
pub struct OfferMerger<'a> {
    store: &'a ReferenceDataStore,
    results: Vec<HotelWithOffers>,
    // hotel id -> position in `results`
    positions: HashMap<HotelId, usize>,
}

impl<'a> OfferMerger<'a> {
    pub fn new(store: &'a ReferenceDataStore) -> Self {
        Self {
            store,
            results: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Merge the offers of one advertiser. The hotels must exist in the store.
    pub fn merge(&mut self, offers: OfferMap) -> Result<(), SearchError> {
        for (hotel_id, offer) in offers {
            if let Some(&pos) = self.positions.get(&hotel_id) {
                self.results[pos].add_offer(offer);
                continue;
            }

            let hotel = self
                .store
                .hotel(hotel_id)
                .ok_or(SearchError::UnknownHotel(hotel_id))?;
            trace!(%hotel_id, "New result entry");
            self.positions.insert(hotel_id, self.results.len());
            self.results.push(HotelWithOffers::new(hotel.clone(), offer));
        }
        Ok(())
    }

    pub fn results(&self) -> &[HotelWithOffers] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<HotelWithOffers> {
        self.results
    }
}

// End-to-end hotel search: city -> hotels -> advertisers -> offers -> merged results

use crate::availability::AvailabilityResolver;
use crate::loader::{DataError, ReferenceDataSource};
use crate::merger::OfferMerger;
use crate::model::{DateRange, HotelId, HotelWithOffers};
use crate::provider::{OfferProvider, ProviderError};
use crate::store::ReferenceDataStore;
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search engine is not initialized")]
    NotInitialized,

    #[error("Offer provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Hotel {0} is not part of the reference data")]
    UnknownHotel(HotelId),
}

/// Search `city_name` for offers in `date_range`.
///
/// Advertisers are queried in ascending id order, once each. Result entries
/// appear in the order their hotel was first offered; offers within an entry
/// follow advertiser order. An unknown city gives an empty result without
/// calling the provider. The first provider failure aborts the search.
pub fn search<P>(
    store: &ReferenceDataStore,
    city_name: &str,
    date_range: &DateRange,
    provider: &P,
) -> Result<Vec<HotelWithOffers>, SearchError>
where
    P: OfferProvider + ?Sized,
{
    let resolver = AvailabilityResolver::new(store);

    let city_id = resolver.resolve_city_id(city_name);
    let hotel_ids = resolver.hotels_in_city(city_id);
    let advertisers = resolver.advertisers_for_hotels(&hotel_ids);

    let mut merger = OfferMerger::new(store);
    for advertiser in &advertisers {
        debug!(advertiser = %advertiser.id, %date_range, "Requesting offers");
        let mut offers = provider
            .get_offers(advertiser, &hotel_ids, date_range)
            .map_err(|e| {
                warn!(advertiser = %advertiser.id, error = %e, "Offer provider failed");
                e
            })?;

        offers.retain(|hotel_id, _| {
            let requested = hotel_ids.contains(hotel_id);
            if !requested {
                warn!(
                    advertiser = %advertiser.id,
                    %hotel_id,
                    "Dropping offer for a hotel that was not requested"
                );
            }
            requested
        });
        merger.merge(offers)?;
    }

    info!(
        city_name,
        %date_range,
        hotels = hotel_ids.len(),
        advertisers = advertisers.len(),
        results = merger.len(),
        "Search completed"
    );
    Ok(merger.into_results())
}

/// Owns the reference data and runs searches against it.
///
/// Starts uninitialized. Searching before a successful [`initialize`] fails
/// with [`SearchError::NotInitialized`]. A failed `initialize` leaves the
/// engine uninitialized, also when data was loaded before.
///
/// [`initialize`]: HotelSearchEngine::initialize
#[derive(Default)]
pub struct HotelSearchEngine {
    store: RwLock<Option<Arc<ReferenceDataStore>>>,
}

impl HotelSearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: ReferenceDataStore) -> Self {
        Self {
            store: RwLock::new(Some(Arc::new(store))),
        }
    }

    pub fn initialize<S>(&self, source: &S) -> Result<(), DataError>
    where
        S: ReferenceDataSource + ?Sized,
    {
        match source.load() {
            Ok(store) => {
                *self.store.write() = Some(Arc::new(store));
                info!("Hotel search engine initialized");
                Ok(())
            }
            Err(e) => {
                *self.store.write() = None;
                error!(error = %e, "Error initializing the hotel search engine");
                Err(e)
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.store.read().is_some()
    }

    /// The currently loaded data, if any
    pub fn store(&self) -> Option<Arc<ReferenceDataStore>> {
        self.store.read().clone()
    }

    pub fn search<P>(
        &self,
        city_name: &str,
        date_range: &DateRange,
        provider: &P,
    ) -> Result<Vec<HotelWithOffers>, SearchError>
    where
        P: OfferProvider + ?Sized,
    {
        // Snapshot so that the lock is not held while the provider runs
        let store = self.store().ok_or(SearchError::NotInitialized)?;
        search(&store, city_name, date_range, provider)
    }
}

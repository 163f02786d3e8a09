// Hotel offer search over in-memory reference data

pub mod availability;
pub mod loader;
pub mod merger;
pub mod model;
pub mod provider;
pub mod search;
pub mod store;

// Re-export key types for convenience
pub use availability::AvailabilityResolver;
pub use loader::{CsvDataLoader, DataConfig, DataError, DataSnapshot, JsonDataLoader, ReferenceDataSource};
pub use merger::OfferMerger;
pub use model::{
    Advertiser, AdvertiserId, CityId, DateRange, Hotel, HotelId, HotelWithOffers, Offer, OfferMap,
};
pub use provider::{OfferProvider, ProviderConfig, ProviderError, SimulatedOfferProvider};
pub use search::{search, HotelSearchEngine, SearchError};
pub use store::{Availability, ReferenceDataStore};

// Offer provider boundary: the external source of priced offers per advertiser

use crate::model::{Advertiser, AdvertiserId, DateRange, HotelId, Offer, OfferMap};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::debug;

// Error types for offer providers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Advertiser {advertiser} unavailable: {reason}")]
    Unavailable {
        advertiser: AdvertiserId,
        reason: String,
    },

    #[error("Offer request timeout after {0}ms")]
    Timeout(u64),

    #[error("Other error: {0}")]
    Other(String),
}

/// Source of offers for one advertiser, a set of hotels and a stay period.
///
/// Returns at most one offer per hotel. A provider holding several offers for
/// the same hotel must pick one before returning.
pub trait OfferProvider {
    fn get_offers(
        &self,
        advertiser: &Advertiser,
        hotel_ids: &BTreeSet<HotelId>,
        date_range: &DateRange,
    ) -> Result<OfferMap, ProviderError>;
}

impl<F> OfferProvider for F
where
    F: Fn(&Advertiser, &BTreeSet<HotelId>, &DateRange) -> Result<OfferMap, ProviderError>,
{
    fn get_offers(
        &self,
        advertiser: &Advertiser,
        hotel_ids: &BTreeSet<HotelId>,
        date_range: &DateRange,
    ) -> Result<OfferMap, ProviderError> {
        self(advertiser, hotel_ids, date_range)
    }
}

// Simulated provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub seed: u64,
    // Chance that an advertiser has an offer for a requested hotel
    pub offer_probability: f64,
    pub price_per_night_euro: RangeInclusive<u32>,
    pub cpc: RangeInclusive<u32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            offer_probability: 0.7,
            price_per_night_euro: 40..=400,
            cpc: 1..=20,
        }
    }
}

impl ProviderConfig {
    /// Probability must lie within 0-1 (NaN is rejected) and both ranges must be non-empty.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if !(0.0..=1.0).contains(&self.offer_probability) {
            return Err(ProviderError::Other(format!(
                "offer probability {} is not within 0-1",
                self.offer_probability
            )));
        }
        if self.price_per_night_euro.is_empty() {
            return Err(ProviderError::Other(format!(
                "empty price range {:?}",
                self.price_per_night_euro
            )));
        }
        if self.cpc.is_empty() {
            return Err(ProviderError::Other(format!("empty cpc range {:?}", self.cpc)));
        }
        Ok(())
    }
}

/// Random but reproducible offers, for demos and benchmarks
pub struct SimulatedOfferProvider {
    config: ProviderConfig,
    rng: Mutex<StdRng>,
}

impl SimulatedOfferProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

impl Default for SimulatedOfferProvider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

impl OfferProvider for SimulatedOfferProvider {
    fn get_offers(
        &self,
        advertiser: &Advertiser,
        hotel_ids: &BTreeSet<HotelId>,
        date_range: &DateRange,
    ) -> Result<OfferMap, ProviderError> {
        self.config.validate()?;
        let probability = self.config.offer_probability;
        let nights = date_range.nights().max(1);
        let mut rng = self.rng.lock();

        let mut offers = OfferMap::new();
        for &hotel_id in hotel_ids {
            if !rng.gen_bool(probability) {
                continue;
            }
            let per_night = rng.gen_range(self.config.price_per_night_euro.clone());
            let cpc = rng.gen_range(self.config.cpc.clone());
            offers.insert(
                hotel_id,
                Offer::new(advertiser.clone(), per_night.saturating_mul(nights), cpc),
            );
        }

        debug!(
            advertiser = %advertiser.id,
            requested = hotel_ids.len(),
            offers = offers.len(),
            "Simulated offers"
        );
        Ok(offers)
    }
}

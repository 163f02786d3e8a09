use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hotel_offer_search::{
    search, Advertiser, Availability, CityId, DateRange, Hotel, HotelSearchEngine, ProviderConfig,
    ReferenceDataStore, SimulatedOfferProvider,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::thread;

const CITIES: u32 = 20;
const ADVERTISERS: u32 = 50;

// Synthetic data set: `hotels_per_city` hotels in each city, every hotel
// listed by roughly a fifth of the advertisers
fn build_store(hotels_per_city: u32) -> ReferenceDataStore {
    let mut rng = StdRng::seed_from_u64(1);

    let hotels = (0..CITIES * hotels_per_city)
        .map(|i| {
            Hotel::new(
                i,
                format!("hotel{}", i),
                Some(CityId(i % CITIES)),
                rng.gen_range(0..=100),
                rng.gen_range(1..=5),
            )
        })
        .collect::<Vec<_>>();
    let advertisers = (0..ADVERTISERS)
        .map(|i| Advertiser::new(i, format!("advertiser{}", i)))
        .collect::<Vec<_>>();

    let mut pairs = Vec::new();
    for hotel in &hotels {
        for advertiser in &advertisers {
            if rng.gen_bool(0.2) {
                pairs.push((advertiser.id, hotel.id));
            }
        }
    }
    let cities = (0..CITIES).map(|i| (CityId(i), format!("city{}", i)));

    ReferenceDataStore::new(hotels, advertisers, Availability::from_pairs(pairs), cities).unwrap()
}

fn date_range() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 6, 4).unwrap(),
    )
}

pub fn search_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("hotel_search");

    // Benchmark with different city sizes
    for hotels_per_city in [10u32, 100, 1000].iter() {
        let store = build_store(*hotels_per_city);
        let provider = SimulatedOfferProvider::new(ProviderConfig::default());
        let dates = date_range();

        group.bench_with_input(
            BenchmarkId::from_parameter(hotels_per_city),
            hotels_per_city,
            |b, _| {
                b.iter(|| black_box(search(&store, "city7", &dates, &provider).unwrap()));
            },
        );
    }

    group.finish();
}

pub fn concurrent_search_benchmark(c: &mut Criterion) {
    let engine = Arc::new(HotelSearchEngine::from_store(build_store(100)));
    let dates = date_range();

    c.bench_function("hotel_search_concurrent", |b| {
        b.iter(|| {
            // Spawn multiple threads searching different cities
            let mut handles = vec![];
            for t in 0..4u64 {
                let engine = Arc::clone(&engine);
                let handle = thread::spawn(move || {
                    let provider = SimulatedOfferProvider::new(ProviderConfig {
                        seed: t,
                        ..Default::default()
                    });
                    let mut found = 0;
                    for i in 0..25u64 {
                        let city = format!("city{}", (t * 25 + i) % CITIES as u64);
                        found += engine.search(&city, &dates, &provider).unwrap().len();
                    }
                    found
                });
                handles.push(handle);
            }

            let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
            black_box(total)
        });
    });
}

criterion_group!(benches, search_benchmark, concurrent_search_benchmark);
criterion_main!(benches);

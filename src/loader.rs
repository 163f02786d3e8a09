// Ingestion of the reference data set from CSV files or a JSON snapshot

use crate::model::{Advertiser, AdvertiserId, CityId, Hotel, HotelId};
use crate::store::{Availability, ReferenceDataStore};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// Error types for loading reference data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record in {file} at row {row}: {reason}")]
    InvalidRecord {
        file: String,
        row: usize,
        reason: String,
    },

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },
}

// Default file layout of the data set
pub const DEFAULT_DATA_DIR: &str = "data";
pub const HOTELS_FILE: &str = "hotels.csv";
pub const ADVERTISERS_FILE: &str = "advertisers.csv";
pub const HOTEL_ADVERTISER_FILE: &str = "hotel_advertiser.csv";
pub const CITIES_FILE: &str = "cities.csv";

/// Where the CSV data set lives
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub hotels_file: String,
    pub advertisers_file: String,
    pub hotel_advertiser_file: String,
    pub cities_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            hotels_file: HOTELS_FILE.to_string(),
            advertisers_file: ADVERTISERS_FILE.to_string(),
            hotel_advertiser_file: HOTEL_ADVERTISER_FILE.to_string(),
            cities_file: CITIES_FILE.to_string(),
        }
    }
}

impl DataConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    fn path_of(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}

/// Anything that can produce a fully populated store
pub trait ReferenceDataSource {
    fn load(&self) -> Result<ReferenceDataStore, DataError>;
}

impl ReferenceDataSource for ReferenceDataStore {
    fn load(&self) -> Result<ReferenceDataStore, DataError> {
        Ok(self.clone())
    }
}

// Row layouts of the CSV files. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct HotelRow {
    id: u32,
    name: String,
    city_id: Option<u32>,
    rating: u32,
    stars: u32,
}

#[derive(Debug, Deserialize)]
struct AdvertiserRow {
    id: u32,
    advertiser_name: String,
}

#[derive(Debug, Deserialize)]
struct HotelAdvertiserRow {
    advertiser_id: u32,
    hotel_id: u32,
}

#[derive(Debug, Deserialize)]
struct CityRow {
    id: u32,
    city_name: String,
}

fn check_hotel(hotel: &Hotel, file: &str, row: usize) -> Result<(), DataError> {
    if hotel.rating > 100 {
        return Err(DataError::InvalidRecord {
            file: file.to_string(),
            row,
            reason: format!("rating {} of hotel {} is not within 0-100", hotel.rating, hotel.id),
        });
    }
    if !(1..=5).contains(&hotel.stars) {
        return Err(DataError::InvalidRecord {
            file: file.to_string(),
            row,
            reason: format!("stars {} of hotel {} is not within 1-5", hotel.stars, hotel.id),
        });
    }
    Ok(())
}

fn narrow(value: u32, field: &str, file: &str, row: usize) -> Result<u8, DataError> {
    u8::try_from(value).map_err(|_| DataError::InvalidRecord {
        file: file.to_string(),
        row,
        reason: format!("{} {} is out of range", field, value),
    })
}

fn read_rows<R, T>(reader: R, file: &str) -> Result<Vec<(usize, T)>, DataError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: T = result.map_err(|source| DataError::Csv {
            file: file.to_string(),
            source,
        })?;
        // Row 1 is the header
        rows.push((idx + 2, row));
    }
    Ok(rows)
}

/// Parse the hotels file. An empty `city_id` means the hotel has no city.
pub fn parse_hotels<R: Read>(reader: R, file: &str) -> Result<Vec<Hotel>, DataError> {
    let mut hotels = Vec::new();
    for (row, record) in read_rows::<_, HotelRow>(reader, file)? {
        let hotel = Hotel::new(
            record.id,
            record.name,
            record.city_id.map(CityId),
            narrow(record.rating, "rating", file, row)?,
            narrow(record.stars, "stars", file, row)?,
        );
        check_hotel(&hotel, file, row)?;
        hotels.push(hotel);
    }
    Ok(hotels)
}

pub fn parse_advertisers<R: Read>(reader: R, file: &str) -> Result<Vec<Advertiser>, DataError> {
    Ok(read_rows::<_, AdvertiserRow>(reader, file)?
        .into_iter()
        .map(|(_, record)| Advertiser::new(record.id, record.advertiser_name))
        .collect())
}

pub fn parse_availability<R: Read>(reader: R, file: &str) -> Result<Availability, DataError> {
    let pairs = read_rows::<_, HotelAdvertiserRow>(reader, file)?
        .into_iter()
        .map(|(_, record)| (AdvertiserId(record.advertiser_id), HotelId(record.hotel_id)));
    Ok(Availability::from_pairs(pairs))
}

pub fn parse_cities<R: Read>(reader: R, file: &str) -> Result<Vec<(CityId, String)>, DataError> {
    Ok(read_rows::<_, CityRow>(reader, file)?
        .into_iter()
        .map(|(_, record)| (CityId(record.id), record.city_name))
        .collect())
}

/// Loads the four CSV files named by a [`DataConfig`]
#[derive(Debug, Clone, Default)]
pub struct CsvDataLoader {
    config: DataConfig,
}

impl CsvDataLoader {
    pub fn new(config: DataConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    fn open(&self, file: &str) -> Result<File, DataError> {
        let path = self.config.path_of(file);
        debug!(path = %path.display(), "Opening data file");
        File::open(&path).map_err(|source| DataError::Io { path, source })
    }
}

impl ReferenceDataSource for CsvDataLoader {
    fn load(&self) -> Result<ReferenceDataStore, DataError> {
        let hotels_file = &self.config.hotels_file;
        let advertisers_file = &self.config.advertisers_file;
        let availability_file = &self.config.hotel_advertiser_file;
        let cities_file = &self.config.cities_file;

        let hotels = parse_hotels(self.open(hotels_file)?, hotels_file)?;
        let advertisers = parse_advertisers(self.open(advertisers_file)?, advertisers_file)?;
        let availability = parse_availability(self.open(availability_file)?, availability_file)?;
        let cities = parse_cities(self.open(cities_file)?, cities_file)?;

        info!(
            data_dir = %self.config.data_dir.display(),
            "Loaded CSV data set"
        );

        ReferenceDataStore::new(hotels, advertisers, availability, cities)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
}

/// Whole data set in one JSON document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSnapshot {
    pub hotels: Vec<Hotel>,
    pub advertisers: Vec<Advertiser>,
    // (advertiser id, hotel id) pairs
    pub availability: Vec<(AdvertiserId, HotelId)>,
    pub cities: Vec<City>,
}

impl DataSnapshot {
    pub fn from_store(store: &ReferenceDataStore) -> Self {
        Self {
            hotels: store.hotels().to_vec(),
            advertisers: store.advertisers().to_vec(),
            availability: store.availability().pairs().collect(),
            cities: store
                .cities()
                .iter()
                .map(|(id, name)| City {
                    id: *id,
                    name: name.clone(),
                })
                .collect(),
        }
    }

    pub fn into_store(self) -> Result<ReferenceDataStore, DataError> {
        for (idx, hotel) in self.hotels.iter().enumerate() {
            check_hotel(hotel, "snapshot", idx + 1)?;
        }
        ReferenceDataStore::new(
            self.hotels,
            self.advertisers,
            Availability::from_pairs(self.availability),
            self.cities.into_iter().map(|c| (c.id, c.name)),
        )
    }
}

/// Loads a [`DataSnapshot`] from a JSON file
#[derive(Debug, Clone)]
pub struct JsonDataLoader {
    path: PathBuf,
}

impl JsonDataLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn parse(json: &str) -> Result<ReferenceDataStore, DataError> {
        let snapshot: DataSnapshot = serde_json::from_str(json)?;
        snapshot.into_store()
    }
}

impl ReferenceDataSource for JsonDataLoader {
    fn load(&self) -> Result<ReferenceDataStore, DataError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "Loading JSON data snapshot");
        Self::parse(&content)
    }
}

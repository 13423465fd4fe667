use crate::domain::money::NightlyRate;
use crate::domain::property::{Category, Coordinates, Property};
use crate::error::{BookingError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One catalog row as it appears in the CSV file.
#[derive(Debug, Deserialize)]
struct PropertyRecord {
    id: String,
    name: String,
    location: String,
    price_per_night: Decimal,
    img_url: String,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    amenities: String,
    lat: Option<f64>,
    lng: Option<f64>,
    #[serde(default)]
    gallery: String,
}

impl TryFrom<PropertyRecord> for Property {
    type Error = BookingError;

    fn try_from(record: PropertyRecord) -> Result<Self> {
        Ok(Property {
            price_per_night: NightlyRate::new(record.price_per_night)?,
            id: record.id,
            name: record.name,
            location: record.location,
            gallery: split_list(&record.gallery),
            img_url: record.img_url,
            category: record.category,
            amenities: split_list(&record.amenities),
            coordinates: Coordinates {
                lat: record.lat.unwrap_or_default(),
                lng: record.lng.unwrap_or_default(),
            },
        })
    }
}

fn split_list(field: &str) -> Vec<String> {
    field
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Reads catalog properties from a CSV source.
///
/// Header: `id,name,location,price_per_night,img_url,category,amenities,lat,lng[,gallery]`.
/// Amenities and gallery image URLs are `;`-separated.
pub struct PropertyReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PropertyReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes rows; a bad row yields an error without ending the stream.
    pub fn properties(self) -> impl Iterator<Item = Result<Property>> {
        self.reader.into_deserialize::<PropertyRecord>().map(|result| {
            let record = result.map_err(BookingError::from)?;
            Property::try_from(record)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "id,name,location,price_per_night,img_url,category,amenities,lat,lng";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{HEADER}\n\
             ksamil-1, Ksamil Beach House, Ksamil, 120, https://img/1.jpg, house, wifi; pool ;parking, 39.77, 20.0\n\
             tirana-2, Blloku Studio, Tirana, 55.5, https://img/2.jpg, studio, , ,"
        );
        let reader = PropertyReader::new(data.as_bytes());
        let results: Vec<Result<Property>> = reader.properties().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.price_per_night.value(), dec!(120));
        assert_eq!(first.category, Category::House);
        assert_eq!(first.amenities, vec!["wifi", "pool", "parking"]);

        assert!(first.gallery.is_empty());

        let second = results[1].as_ref().unwrap();
        assert!(second.amenities.is_empty());
        assert_eq!(second.coordinates, Coordinates::default());
    }

    #[test]
    fn test_reader_gallery_column() {
        let data = format!(
            "{HEADER},gallery\n\
             berat-1, Berat Loft, Berat, 80, https://img/main.jpg, apartment, wifi, 40.7, 19.9, https://img/a.jpg; https://img/b.jpg\n\
             berat-2, Berat Room, Berat, 40, https://img/room.jpg, studio, , , ,"
        );
        let reader = PropertyReader::new(data.as_bytes());
        let results: Vec<Result<Property>> = reader.properties().collect();

        let first = results[0].as_ref().unwrap();
        assert_eq!(first.img_url, "https://img/main.jpg");
        assert_eq!(first.gallery, vec!["https://img/a.jpg", "https://img/b.jpg"]);
        assert!(results[1].as_ref().unwrap().gallery.is_empty());
    }

    #[test]
    fn test_reader_bad_rows() {
        let data = format!(
            "{HEADER}\n\
             a, A, Vlore, zero, x, villa, , ,\n\
             b, B, Vlore, 0, x, villa, , ,\n\
             c, C, Vlore, 70, x, villa, , ,"
        );
        let reader = PropertyReader::new(data.as_bytes());
        let results: Vec<Result<Property>> = reader.properties().collect();

        assert!(matches!(results[0], Err(BookingError::CsvError(_))));
        assert!(matches!(results[1], Err(BookingError::ValidationError { .. })));
        assert!(results[2].is_ok());
    }
}

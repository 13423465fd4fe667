use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub const CATALOG_HEADER: &str =
    "id,name,location,price_per_night,img_url,category,amenities,lat,lng";

/// Writes a small catalog of Albanian listings to a temp file.
pub fn catalog_file() -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{CATALOG_HEADER}")?;
    writeln!(
        file,
        "ksamil-1,Ksamil Beach House,Ksamil,100,https://img.example/ksamil.jpg,house,wifi;pool,39.77,20.0"
    )?;
    writeln!(
        file,
        "tirana-2,Blloku Studio,Tirana,55.5,https://img.example/blloku.jpg,studio,wifi,41.32,19.82"
    )?;
    file.flush()?;
    Ok(file)
}

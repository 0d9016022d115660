#![allow(dead_code)]

use charlotte::catalog::{Attribute, Catalog, CatalogRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Five tracks, exactly one of them jazz, three by Radiohead
pub fn sample_catalog() -> Catalog {
    Catalog::from_records(vec![
        track("01 Airbag.mp3", "Airbag", "Radiohead", "OK Computer", "rock", "1997"),
        track("02 So What.mp3", "So What", "Miles Davis", "Kind of Blue", "jazz", "1959"),
        track(
            "03 Paranoid Android.mp3",
            "Paranoid Android",
            "Radiohead",
            "OK Computer",
            "rock",
            "1997",
        ),
        track(
            "04 Clair de Lune.flac",
            "Clair de Lune",
            "Claude Debussy",
            "Suite bergamasque",
            "classical",
            "1905",
        ),
        track(
            "05 Karma Police.mp3",
            "Karma Police",
            "Radiohead",
            "OK Computer",
            "alternative",
            "1997",
        ),
    ])
    .expect("sample catalog is valid")
}

/// Catalog where three tracks share an artist and nothing else narrows them
pub fn miles_catalog() -> Catalog {
    Catalog::from_records(vec![
        track("so_what.mp3", "So What", "Miles Davis", "Kind of Blue", "jazz", "1959"),
        track("airegin.mp3", "Airegin", "Sonny Rollins", "Saxophone Colossus", "bebop", "1956"),
        track("freddie.mp3", "Freddie Freeloader", "Miles Davis", "Kind of Blue", "jazz", "1959"),
        track("blue_in_green.mp3", "Blue in Green", "Miles Davis", "Kind of Blue", "jazz", "1959"),
    ])
    .expect("miles catalog is valid")
}

pub fn track(
    file_name: &str,
    title: &str,
    artist: &str,
    album: &str,
    genre: &str,
    year: &str,
) -> CatalogRecord {
    CatalogRecord::new(file_name)
        .with(Attribute::Title, title)
        .with(Attribute::Artist, artist)
        .with(Attribute::Album, album)
        .with(Attribute::Genre, genre)
        .with(Attribute::Year, year)
        .with(Attribute::Duration, "0:04:44")
        .with(Attribute::FileSize, "6.5 MB")
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

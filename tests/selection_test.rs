use std::collections::HashSet;

use charlotte::catalog::{Attribute, Catalog, CatalogRecord};
use charlotte::selection::{
    AttributeFilterSet, CatalogSelector, SelectionRequest, SelectionResult,
};

mod common;
use common::{miles_catalog, sample_catalog, seeded};

fn filtered(filters: AttributeFilterSet) -> SelectionRequest {
    SelectionRequest::new().with_filters(filters)
}

#[test]
fn test_direct_neighbors_wrap_for_every_position() {
    let catalog = sample_catalog();
    let selector = CatalogSelector::default();
    let n = catalog.len();

    for i in 0..n {
        let file_name = catalog.get(i).unwrap().file_name.clone();
        let request = SelectionRequest::new().with_file_name(Some(file_name.as_str()));
        let result = selector.select(&catalog, &request, &mut seeded(1));
        let selection = result.selection().expect("direct lookup should match");

        assert_eq!(selection.index, i);
        assert_eq!(selection.record.file_name, file_name);
        assert_eq!(selection.previous, *catalog.get((i + n - 1) % n).unwrap());
        assert_eq!(selection.next, *catalog.get((i + 1) % n).unwrap());
    }
}

#[test]
fn test_first_and_last_wrap() {
    let catalog = sample_catalog();
    let selector = CatalogSelector::default();

    let first = SelectionRequest::new().with_file_name(Some("01 Airbag.mp3"));
    let result = selector.select(&catalog, &first, &mut seeded(1));
    assert_eq!(
        result.selection().unwrap().previous.file_name,
        "05 Karma Police.mp3"
    );

    let last = SelectionRequest::new().with_file_name(Some("05 Karma Police.mp3"));
    let result = selector.select(&catalog, &last, &mut seeded(1));
    assert_eq!(result.selection().unwrap().next.file_name, "01 Airbag.mp3");
}

#[test]
fn test_single_genre_match_is_deterministic() {
    let catalog = sample_catalog();
    let selector = CatalogSelector::default();
    let request = filtered(AttributeFilterSet::new().with(Attribute::Genre, "jazz"));

    for seed in 0..20 {
        let result = selector.select(&catalog, &request, &mut seeded(seed));
        assert_eq!(result.selection().unwrap().record.file_name, "02 So What.mp3");
    }
}

#[test]
fn test_random_pick_covers_all_matches() {
    let catalog = miles_catalog();
    let selector = CatalogSelector::default();
    let request = filtered(AttributeFilterSet::new().with(Attribute::Artist, "Miles Davis"));

    let mut rng = seeded(42);
    let mut seen = HashSet::new();
    for _ in 0..200 {
        let result = selector.select(&catalog, &request, &mut rng);
        seen.insert(result.selection().unwrap().record.file_name.clone());
    }

    let expected: HashSet<String> = ["so_what.mp3", "freddie.mp3", "blue_in_green.mp3"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_same_seed_same_pick() {
    let catalog = miles_catalog();
    let selector = CatalogSelector::default();
    let request = filtered(AttributeFilterSet::new().with(Attribute::Album, "kind of blue"));

    let a = selector.select(&catalog, &request, &mut seeded(9));
    let b = selector.select(&catalog, &request, &mut seeded(9));
    assert_eq!(a, b);
}

#[test]
fn test_filters_are_conjunctive() {
    let catalog = sample_catalog();
    let selector = CatalogSelector::default();
    let filters = AttributeFilterSet::new()
        .with(Attribute::Artist, "radiohead")
        .with(Attribute::Genre, "rock");

    assert_eq!(selector.filter(&catalog, &filters), vec![0, 2]);

    for seed in 0..20 {
        let result = selector.select(&catalog, &filtered(filters.clone()), &mut seeded(seed));
        let index = result.selection().unwrap().index;
        assert!(index == 0 || index == 2, "picked {}", index);
    }
}

#[test]
fn test_approximate_filter_values() {
    let catalog = sample_catalog();
    let selector = CatalogSelector::default();

    let request = filtered(AttributeFilterSet::new().with(Attribute::Artist, "miles davies"));
    let result = selector.select(&catalog, &request, &mut seeded(1));
    assert_eq!(result.selection().unwrap().index, 1);

    let request = filtered(AttributeFilterSet::new().with(Attribute::Genre, "classic"));
    let result = selector.select(&catalog, &request, &mut seeded(1));
    assert_eq!(result.selection().unwrap().record.file_name, "04 Clair de Lune.flac");
}

#[test]
fn test_filtered_pick_uses_full_catalog_neighbors() {
    let catalog = sample_catalog();
    let selector = CatalogSelector::default();
    let request = filtered(AttributeFilterSet::new().with(Attribute::Genre, "jazz"));

    let result = selector.select(&catalog, &request, &mut seeded(1));
    let selection = result.selection().unwrap();
    assert_eq!(selection.previous.file_name, "01 Airbag.mp3");
    assert_eq!(selection.next.file_name, "03 Paranoid Android.mp3");
}

#[test]
fn test_direct_title_lookup() {
    let catalog = sample_catalog();
    let selector = CatalogSelector::default();
    let request = SelectionRequest::new().with_title(Some("paranoid android"));

    let result = selector.select(&catalog, &request, &mut seeded(1));
    assert_eq!(result.selection().unwrap().index, 2);
}

#[test]
fn test_no_match_is_data() {
    let catalog = sample_catalog();
    let selector = CatalogSelector::default();

    let request = filtered(AttributeFilterSet::new().with(Attribute::Genre, "polka"));
    assert_eq!(
        selector.select(&catalog, &request, &mut seeded(1)),
        SelectionResult::NoMatch
    );

    // Each value exists, but never on the same record
    let request = filtered(
        AttributeFilterSet::new()
            .with(Attribute::Artist, "Miles Davis")
            .with(Attribute::Genre, "classical"),
    );
    assert_eq!(
        selector.select(&catalog, &request, &mut seeded(1)),
        SelectionResult::NoMatch
    );
}

#[test]
fn test_single_record_is_its_own_neighbor() {
    let catalog = Catalog::from_records(vec![CatalogRecord::new("only.mp3")]).unwrap();
    let request = SelectionRequest::new();
    let result = CatalogSelector::default().select(&catalog, &request, &mut seeded(1));

    let selection = result.selection().unwrap();
    assert_eq!(selection.previous.file_name, "only.mp3");
    assert_eq!(selection.next.file_name, "only.mp3");
}

//! Spoken replies
//!
//! Turns selection outcomes into short sentences. Wording is picked at
//! random from a few variants so repeated requests don't sound canned.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::CatalogRecord;
use crate::profile::UserProfile;

fn pick<R: Rng + ?Sized>(options: Vec<String>, rng: &mut R) -> String {
    options.choose(rng).cloned().unwrap_or_default()
}

/// Reply for a track that just started playing
///
/// Prefers "title by artist", then title, then the file name without its
/// extension.
pub fn playing<R: Rng + ?Sized>(
    record: &CatalogRecord,
    profile: &UserProfile,
    rng: &mut R,
) -> String {
    let who = &profile.salutation;

    let options = match (record.title.as_deref(), record.artist.as_deref()) {
        (Some(title), Some(artist)) => vec![
            format!("Alright, playing {} by {}.", title, artist),
            format!("Alright {}, playing {}.", who, title),
            format!("Sure, playing {} by {}.", title, artist),
            format!("Okay, playing {} by {}.", title, artist),
        ],
        (Some(title), None) => vec![
            format!("Alright, playing {}.", title),
            format!("Alright {}, playing {}.", who, title),
            format!("Sure, playing {}.", title),
            format!("Okay, playing {}.", title),
        ],
        (None, _) => {
            let stem = record.stem();
            vec![
                format!("Alright, playing {}.", stem),
                format!("Alright {}, playing {}.", who, stem),
                format!("Sure, playing {}.", stem),
                format!("Okay, playing {}.", stem),
            ]
        }
    };

    pick(options, rng)
}

/// Apology for a search that found nothing
pub fn no_match<R: Rng + ?Sized>(profile: &UserProfile, rng: &mut R) -> String {
    let who = &profile.salutation;
    pick(
        vec![
            format!("Sorry {}. I could not find any track with the search parameters.", who),
            format!("Sorry {}. I could not find any match for that.", who),
        ],
        rng,
    )
}

/// Reply when next/previous is asked with nothing queued
pub fn nothing_to_play(profile: &UserProfile) -> String {
    format!("Sorry {}. There is no track to play.", profile.salutation)
}

/// Reply when the catalog itself is empty
pub fn empty_catalog(profile: &UserProfile) -> String {
    format!(
        "Sorry {}. Your music catalog is empty. Try scanning your music folder first.",
        profile.salutation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Attribute;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_playing_uses_stem_without_title() {
        let mut rng = StdRng::seed_from_u64(3);
        let record = CatalogRecord::new("Blue in Green.flac");
        for _ in 0..10 {
            let reply = playing(&record, &UserProfile::default(), &mut rng);
            assert!(reply.contains("Blue in Green"));
            assert!(!reply.contains(".flac"));
        }
    }

    #[test]
    fn test_playing_mentions_title() {
        let mut rng = StdRng::seed_from_u64(3);
        let record = CatalogRecord::new("x.mp3")
            .with(Attribute::Title, "So What")
            .with(Attribute::Artist, "Miles Davis");
        for _ in 0..10 {
            assert!(playing(&record, &UserProfile::default(), &mut rng).contains("So What"));
        }
    }

    #[test]
    fn test_apologies_address_user() {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = UserProfile {
            salutation: "ma'am".to_string(),
            ..Default::default()
        };
        assert!(no_match(&profile, &mut rng).starts_with("Sorry ma'am."));
        assert_eq!(nothing_to_play(&profile), "Sorry ma'am. There is no track to play.");
    }
}

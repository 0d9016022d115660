//! User profile
//!
//! Built once from the config at startup and passed to whatever needs it.

use chrono::Timelike;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const MORNING: u32 = 5;
const NOON: u32 = 12;
const EVENING: u32 = 17;
const NIGHT: u32 = 21;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    /// How the assistant addresses the user, e.g. "sir"
    pub salutation: String,
    pub wake_phrase: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            salutation: "sir".to_string(),
            wake_phrase: "charlotte".to_string(),
        }
    }
}

/// Part of the day, by hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            h if (MORNING..NOON).contains(&h) => DayPart::Morning,
            h if (NOON..EVENING).contains(&h) => DayPart::Afternoon,
            h if (EVENING..NIGHT).contains(&h) => DayPart::Evening,
            _ => DayPart::Night,
        }
    }
}

impl UserProfile {
    /// Name to address the user by: first name if known, else the salutation
    pub fn address(&self) -> &str {
        if self.first_name.trim().is_empty() {
            &self.salutation
        } else {
            &self.first_name
        }
    }

    /// Greeting for the given hour (0..=23)
    pub fn greeting<R: Rng + ?Sized>(&self, hour: u32, rng: &mut R) -> String {
        let who = self.address();
        let options = match DayPart::from_hour(hour) {
            DayPart::Morning => [
                format!("Good morning, {}.", who),
                format!("Morning {}. What can I do for you?", who),
            ],
            DayPart::Afternoon => [
                format!("Good afternoon, {}.", who),
                format!("Hello {}. How is your day going?", who),
            ],
            DayPart::Evening => [
                format!("Good evening, {}.", who),
                format!("Evening {}. How can I help?", who),
            ],
            DayPart::Night => [
                format!("Hello {}. Working late?", who),
                format!("Hi {}. It's getting late.", who),
            ],
        };

        options
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| format!("Hello, {}.", who))
    }

    /// Greeting for the current local time
    pub fn greet_now<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.greeting(chrono::Local::now().hour(), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_day_parts() {
        assert_eq!(DayPart::from_hour(4), DayPart::Night);
        assert_eq!(DayPart::from_hour(5), DayPart::Morning);
        assert_eq!(DayPart::from_hour(11), DayPart::Morning);
        assert_eq!(DayPart::from_hour(12), DayPart::Afternoon);
        assert_eq!(DayPart::from_hour(17), DayPart::Evening);
        assert_eq!(DayPart::from_hour(20), DayPart::Evening);
        assert_eq!(DayPart::from_hour(21), DayPart::Night);
    }

    #[test]
    fn test_greeting_addresses_user() {
        let mut rng = StdRng::seed_from_u64(1);
        let profile = UserProfile {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        let greeting = profile.greeting(9, &mut rng);
        assert!(greeting.contains("Ada"));
        assert!(greeting.to_lowercase().contains("morning"));

        let greeting = UserProfile::default().greeting(14, &mut rng);
        assert!(greeting.contains("sir"));
    }

    #[test]
    fn test_profile_partial_json() {
        let profile: UserProfile = serde_json::from_str(r#"{"first_name":"Ada"}"#).unwrap();
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.salutation, "sir");
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelMode {
    #[default]
    Driving,
    Bicycling,
    Walking,
}

impl TravelMode {
    pub const ALL: [TravelMode; 3] = [Self::Driving, Self::Bicycling, Self::Walking];

    /// The value sent as the `TravelMode` query parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Driving => "Driving",
            Self::Bicycling => "Bicycling",
            Self::Walking => "Walking",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Driving => "🚗",
            Self::Bicycling => "🚲",
            Self::Walking => "🚶",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown travel mode: {}", s))
    }
}

#[test]
fn defaults_to_driving() {
    assert_eq!(TravelMode::default(), TravelMode::Driving);
}

#[test]
fn parses_names_case_insensitively() {
    assert_eq!("walking".parse::<TravelMode>(), Ok(TravelMode::Walking));
    assert_eq!(" BICYCLING ".parse::<TravelMode>(), Ok(TravelMode::Bicycling));
    assert!("flying".parse::<TravelMode>().is_err());
}

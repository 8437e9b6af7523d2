use crate::entities::{JourneyPayload, JourneySummary, TravelMode};
use crate::error::{missing_journey_error, Error};
use crate::format::{format_distance, format_duration};

/// The computed itinerary, or the reason there isn't one.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultScreen {
    Itinerary {
        travel_mode: TravelMode,
        summary: JourneySummary,
    },
    Unavailable(Error),
}

impl ResultScreen {
    /// Derives the summary afresh from whatever the builder handed over.
    /// Nothing is parsed when the payload is missing.
    pub fn new(payload: Option<JourneyPayload>) -> Self {
        let payload = match payload {
            Some(payload) => payload,
            None => return Self::Unavailable(missing_journey_error()),
        };

        match JourneySummary::parse(&payload.journey_data, &payload.waypoints) {
            Ok(summary) => Self::Itinerary {
                travel_mode: payload.travel_mode,
                summary,
            },
            Err(err) => {
                tracing::warn!(code = err.code, "journey data rejected: {}", err.message);
                Self::Unavailable(err)
            }
        }
    }

    pub fn render(&self) -> String {
        let (travel_mode, summary) = match self {
            Self::Itinerary {
                travel_mode,
                summary,
            } => (travel_mode, summary),
            Self::Unavailable(err) => {
                return format!("Error\n{}\n\n  new  start over    quit  exit", err.message);
            }
        };

        let mut lines = vec![
            "Journey Summary".to_string(),
            format!("{} {} Route", travel_mode.icon(), travel_mode),
            String::new(),
            format!(
                "Total Distance  {}",
                format_distance(summary.total_distance_miles)
            ),
            format!(
                "Total Time      {}",
                format_duration(summary.total_duration_minutes)
            ),
            String::new(),
            "Journey Segments".to_string(),
        ];

        lines.extend(summary.legs.iter().map(|leg| {
            format!(
                "  {} → {}  📍 {}  ⏱ {}",
                leg.from,
                leg.to,
                format_distance(leg.distance_miles),
                format_duration(leg.duration_minutes)
            )
        }));

        lines.push(String::new());
        lines.push("  new  start new journey    quit  exit".to_string());

        lines.join("\n")
    }
}

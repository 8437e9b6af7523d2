use serde::{Deserialize, Serialize};

use crate::entities::{Postcode, Route, TravelMode, Waypoint};
use crate::error::{malformed_response_error, missing_journey_error, Error};

/// What the routing service is asked for. Built from a snapshot of the route,
/// so later edits to the builder do not reach an in-flight request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyRequest {
    pub route: String,
    pub travel_mode: TravelMode,
}

impl JourneyRequest {
    pub fn new(route: &Route, travel_mode: TravelMode) -> Self {
        JourneyRequest {
            route: route.route_param(),
            travel_mode,
        }
    }
}

/// Carried from the route builder to the result screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyPayload {
    pub journey_data: String,
    pub waypoints: Vec<Waypoint>,
    pub travel_mode: TravelMode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub from: Postcode,
    pub to: Postcode,
    pub duration_minutes: f64,
    pub distance_miles: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JourneySummary {
    pub legs: Vec<Leg>,
    pub total_duration_minutes: f64,
    pub total_distance_miles: f64,
}

impl JourneySummary {
    /// Reads `duration,distance;duration,distance;...` and pairs leg `i` with
    /// waypoints `i` and `i + 1`. The leg count must be one less than the
    /// waypoint count.
    pub fn parse(journey_data: &str, waypoints: &[Waypoint]) -> Result<Self, Error> {
        if journey_data.trim().is_empty() || waypoints.is_empty() {
            return Err(missing_journey_error());
        }

        let segments = journey_data
            .split(';')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;

        let expected = waypoints.len() - 1;
        if segments.len() != expected {
            return Err(malformed_response_error(format!(
                "expected {} legs for {} postcodes, got {}",
                expected,
                waypoints.len(),
                segments.len()
            )));
        }

        let legs: Vec<Leg> = waypoints
            .windows(2)
            .zip(segments)
            .map(|(pair, (duration_minutes, distance_miles))| Leg {
                from: pair[0].postcode.clone(),
                to: pair[1].postcode.clone(),
                duration_minutes,
                distance_miles,
            })
            .collect();

        Ok(JourneySummary {
            total_duration_minutes: legs.iter().map(|leg| leg.duration_minutes).sum(),
            total_distance_miles: legs.iter().map(|leg| leg.distance_miles).sum(),
            legs,
        })
    }
}

fn parse_segment(segment: &str) -> Result<(f64, f64), Error> {
    let fields: Vec<&str> = segment.split(',').map(str::trim).collect();

    match fields.as_slice() {
        [duration, distance] => Ok((parse_number(duration)?, parse_number(distance)?)),
        _ => Err(malformed_response_error(format!(
            "leg {:?} is not a duration,distance pair",
            segment
        ))),
    }
}

fn parse_number(field: &str) -> Result<f64, Error> {
    let value = field
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| malformed_response_error(format!("{:?} is not a number", field)))?;

    if value < 0.0 {
        return Err(malformed_response_error(format!("{:?} is negative", field)));
    }

    Ok(value)
}

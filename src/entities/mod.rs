mod journey;
mod postcode;
mod travel_mode;
mod waypoint;

pub use journey::{JourneyPayload, JourneyRequest, JourneySummary, Leg};
pub use postcode::Postcode;
pub use travel_mode::TravelMode;
pub use waypoint::{Direction, Route, Waypoint};

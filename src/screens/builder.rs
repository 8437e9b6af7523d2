use uuid::Uuid;

use crate::entities::{Direction, JourneyPayload, JourneyRequest, Route, TravelMode};
use crate::error::{too_few_waypoints_error, Error};
use crate::external::RoutingApi;

pub const CALCULATE_FAILED_MESSAGE: &str = "Failed to calculate journey. Please try again.";

/// Postcode entry and ordering. Holds the route, the selected travel mode and
/// the last error shown to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteBuilder {
    route: Route,
    travel_mode: TravelMode,
    error: Option<String>,
}

impl RouteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn waypoint_id(&self, position: usize) -> Option<Uuid> {
        position
            .checked_sub(1)
            .and_then(|index| self.route.waypoints().get(index))
            .map(|w| w.id)
    }

    pub fn add_waypoint(&mut self, raw: &str) -> Result<(), Error> {
        match self.route.with_waypoint(raw) {
            Ok(route) => {
                self.route = route;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    pub fn remove_waypoint(&mut self, id: Uuid) {
        self.route = self.route.without(id);
    }

    pub fn move_waypoint(&mut self, id: Uuid, direction: Direction) {
        self.route = self.route.moved(id, direction);
    }

    pub fn set_travel_mode(&mut self, travel_mode: TravelMode) {
        self.travel_mode = travel_mode;
    }

    /// Asks the routing service for the current route. Issues exactly one
    /// request per call; on failure the route and mode are left as they were.
    #[tracing::instrument(name = "RouteBuilder::calculate_journey", skip_all)]
    pub async fn calculate_journey(&mut self, api: &dyn RoutingApi) -> Result<JourneyPayload, Error> {
        if self.route.len() < 2 {
            let err = too_few_waypoints_error();
            self.error = Some(err.message.clone());
            return Err(err);
        }

        let snapshot = self.route.clone();
        let travel_mode = self.travel_mode;
        let request = JourneyRequest::new(&snapshot, travel_mode);
        tracing::info!(route = %request.route, %travel_mode, "calculating journey");

        match api.plan_journey(&request).await {
            Ok(journey_data) => {
                self.error = None;
                Ok(JourneyPayload {
                    journey_data,
                    waypoints: snapshot.waypoints().to_vec(),
                    travel_mode,
                })
            }
            Err(err) => {
                tracing::error!(code = err.code, "journey calculation error: {}", err.message);
                self.error = Some(CALCULATE_FAILED_MESSAGE.into());
                Err(err)
            }
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec!["Plan Your Journey".to_string()];

        if let Some(error) = &self.error {
            lines.push(format!("! {}", error));
        }

        if !self.route.is_empty() {
            lines.push(String::new());
            lines.push("Your Route".to_string());
            lines.extend(
                self.route
                    .waypoints()
                    .iter()
                    .enumerate()
                    .map(|(i, w)| format!("  {}. {}", i + 1, w.postcode)),
            );

            let modes: Vec<String> = TravelMode::ALL
                .iter()
                .map(|mode| {
                    if *mode == self.travel_mode {
                        format!("[{} {}]", mode.icon(), mode)
                    } else {
                        format!(" {} {} ", mode.icon(), mode)
                    }
                })
                .collect();

            lines.push(String::new());
            lines.push(format!("Travel Mode  {}", modes.join(" ")));
        }

        lines.push(String::new());
        lines.push("  add <postcode>  remove <n>  up <n>  down <n>".to_string());
        lines.push("  mode <driving|bicycling|walking>  calculate  quit".to_string());

        lines.join("\n")
    }
}

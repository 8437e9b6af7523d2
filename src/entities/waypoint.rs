use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Postcode;
use crate::error::{duplicate_postcode_error, Error};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: Uuid,
    pub postcode: Postcode,
}

impl Waypoint {
    pub fn new(postcode: Postcode) -> Self {
        Waypoint {
            id: Uuid::new_v4(),
            postcode,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The ordered stops of a journey. Every edit returns a new route.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.waypoints.iter().position(|w| w.id == id)
    }

    pub fn with_waypoint(&self, raw: &str) -> Result<Route, Error> {
        let postcode = Postcode::parse(raw)?;

        if self.waypoints.iter().any(|w| w.postcode == postcode) {
            return Err(duplicate_postcode_error());
        }

        let mut waypoints = self.waypoints.clone();
        waypoints.push(Waypoint::new(postcode));

        Ok(Route { waypoints })
    }

    pub fn without(&self, id: Uuid) -> Route {
        Route {
            waypoints: self
                .waypoints
                .iter()
                .filter(|w| w.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Swaps the waypoint with its neighbour. Moving past either end is a no-op.
    pub fn moved(&self, id: Uuid, direction: Direction) -> Route {
        let mut waypoints = self.waypoints.clone();

        if let Some(index) = self.position(id) {
            let neighbour = match direction {
                Direction::Up => index.checked_sub(1),
                Direction::Down => Some(index + 1).filter(|&i| i < waypoints.len()),
            };

            if let Some(neighbour) = neighbour {
                waypoints.swap(index, neighbour);
            }
        }

        Route { waypoints }
    }

    pub fn route_param(&self) -> String {
        self.waypoints
            .iter()
            .map(|w| w.postcode.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

pub mod journey_planner;

use std::sync::Arc;

pub use journey_planner::{JourneyPlanner, RoutingApi};

pub type DynRoutingApi = Arc<dyn RoutingApi + Send + Sync>;

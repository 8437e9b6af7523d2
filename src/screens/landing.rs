#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LandingScreen;

impl LandingScreen {
    pub fn render(&self) -> String {
        [
            "Journey Planner",
            "Plan your journey across the UK with ease",
            "",
            "  start  begin planning    quit  exit",
        ]
        .join("\n")
    }
}

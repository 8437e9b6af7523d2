//! Screen routing: landing -> route builder -> result, and back to landing.

use crate::entities::{Direction, TravelMode};
use crate::error::Error;
use crate::external::{DynRoutingApi, RoutingApi};
use crate::screens::{LandingScreen, ResultScreen, RouteBuilder};

/// Which screen is currently displayed. Each variant owns all of its state, so
/// leaving a screen discards it.
#[derive(Debug)]
pub enum Screen {
    Landing(LandingScreen),
    Builder(RouteBuilder),
    Result(ResultScreen),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Add(String),
    Remove(usize),
    Up(usize),
    Down(usize),
    Mode(TravelMode),
    Calculate,
    New,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let position = |rest: &str| {
            rest.parse::<usize>()
                .map_err(|_| format!("`{}` needs a position, e.g. `{} 2`", word, word))
        };

        match word.to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "add" if !rest.is_empty() => Ok(Self::Add(rest.to_string())),
            "add" => Err("`add` needs a postcode, e.g. `add SW1A 1AA`".into()),
            "remove" => position(rest).map(Self::Remove),
            "up" => position(rest).map(Self::Up),
            "down" => position(rest).map(Self::Down),
            "mode" => rest.parse().map(Self::Mode),
            "calculate" => Ok(Self::Calculate),
            "new" => Ok(Self::New),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err("enter a command".into()),
            other => Err(format!("unknown command `{}`", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    screen: Screen,
    api: DynRoutingApi,
    notice: Option<String>,
}

impl App {
    pub fn new(api: DynRoutingApi) -> Self {
        App {
            screen: Screen::Landing(LandingScreen),
            api,
            notice: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Applies one line of user input to the current screen.
    pub async fn handle(&mut self, line: &str) -> Flow {
        self.notice = None;

        let command = match Command::parse(line) {
            Ok(Command::Quit) => return Flow::Quit,
            Ok(command) => command,
            Err(hint) => {
                self.notice = Some(hint);
                return Flow::Continue;
            }
        };

        let mut next = None;

        match (&mut self.screen, command) {
            (Screen::Landing(_), Command::Start) => {
                next = Some(Screen::Builder(RouteBuilder::new()));
            }
            (Screen::Builder(builder), Command::Add(raw)) => {
                // Shown by the builder itself.
                let _ = builder.add_waypoint(&raw);
            }
            (Screen::Builder(builder), Command::Remove(position)) => {
                match builder.waypoint_id(position) {
                    Some(id) => builder.remove_waypoint(id),
                    None => self.notice = Some(no_waypoint_at(position)),
                }
            }
            (Screen::Builder(builder), Command::Up(position)) => {
                match builder.waypoint_id(position) {
                    Some(id) => builder.move_waypoint(id, Direction::Up),
                    None => self.notice = Some(no_waypoint_at(position)),
                }
            }
            (Screen::Builder(builder), Command::Down(position)) => {
                match builder.waypoint_id(position) {
                    Some(id) => builder.move_waypoint(id, Direction::Down),
                    None => self.notice = Some(no_waypoint_at(position)),
                }
            }
            (Screen::Builder(builder), Command::Mode(travel_mode)) => {
                builder.set_travel_mode(travel_mode);
            }
            (Screen::Builder(builder), Command::Calculate) => {
                if let Ok(payload) = builder.calculate_journey(self.api.as_ref()).await {
                    next = Some(Screen::Result(ResultScreen::new(Some(payload))));
                }
            }
            (Screen::Result(_), Command::New) => {
                next = Some(Screen::Landing(LandingScreen));
            }
            (_, command) => {
                self.notice = Some(format!("{:?} is not available on this screen", command));
            }
        }

        if let Some(screen) = next {
            self.screen = screen;
        }

        Flow::Continue
    }

    pub fn render(&self) -> String {
        let body = match &self.screen {
            Screen::Landing(s) => s.render(),
            Screen::Builder(s) => s.render(),
            Screen::Result(s) => s.render(),
        };

        match &self.notice {
            Some(notice) => format!("{}\n\n({})", body, notice),
            None => body,
        }
    }
}

fn no_waypoint_at(position: usize) -> String {
    format!("there is no postcode at position {}", position)
}

/// Runs the builder non-interactively: adds each postcode in order, then
/// calculates. Returns the rendered result screen.
pub async fn plan(
    api: &dyn RoutingApi,
    postcodes: &[String],
    travel_mode: TravelMode,
) -> Result<String, Error> {
    let mut builder = RouteBuilder::new();
    for raw in postcodes {
        builder.add_waypoint(raw)?;
    }
    builder.set_travel_mode(travel_mode);

    let payload = builder.calculate_journey(api).await?;

    match ResultScreen::new(Some(payload)) {
        ResultScreen::Unavailable(err) => Err(err),
        screen => Ok(screen.render()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::entities::JourneyRequest;
    use crate::error::{upstream_error, DUPLICATE_POSTCODE_ERROR, MALFORMED_RESPONSE_ERROR};

    struct Canned {
        reply: Result<String, Error>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RoutingApi for Canned {
        async fn plan_journey(&self, _: &JourneyRequest) -> Result<String, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn canned(reply: Result<String, Error>) -> Arc<Canned> {
        Arc::new(Canned {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    async fn drive(app: &mut App, lines: &[&str]) {
        for line in lines {
            assert_eq!(app.handle(line).await, Flow::Continue, "{}", line);
        }
    }

    fn builder(app: &App) -> &RouteBuilder {
        match app.screen() {
            Screen::Builder(builder) => builder,
            other => panic!("expected the builder, got {:?}", other),
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse(" add sw1a 1aa "), Ok(Command::Add("sw1a 1aa".into())));
        assert_eq!(Command::parse("UP 2"), Ok(Command::Up(2)));
        assert_eq!(Command::parse("mode walking"), Ok(Command::Mode(TravelMode::Walking)));
        assert!(Command::parse("remove two").is_err());
        assert!(Command::parse("add").is_err());
        assert!(Command::parse("fly").is_err());
    }

    #[tokio::test]
    async fn full_journey_and_start_over() {
        let api = canned(Ok("10,2;15,3".into()));
        let mut app = App::new(api.clone());

        drive(
            &mut app,
            &[
                "start",
                "add SW1A 1AA",
                "add EC1A 1BB",
                "add M1 1AE",
                "mode bicycling",
                "calculate",
            ],
        )
        .await;

        let text = app.render();
        assert!(matches!(app.screen(), Screen::Result(ResultScreen::Itinerary { .. })));
        assert!(text.contains("Total Distance  5.0 miles"));
        assert!(text.contains("Total Time      25m"));
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);

        drive(&mut app, &["new"]).await;
        assert!(matches!(app.screen(), Screen::Landing(_)));

        drive(&mut app, &["start"]).await;
        assert!(builder(&app).route().is_empty());
    }

    #[tokio::test]
    async fn duplicate_stays_on_the_builder() {
        let mut app = App::new(canned(Ok("10,2".into())));

        drive(&mut app, &["start", "add SW1A 1AA", "add sw1a1aa"]).await;

        assert_eq!(builder(&app).route().len(), 1);
        assert!(app.render().contains("This postcode has already been added"));
        let err = builder(&app).route().with_waypoint("SW1A1AA").unwrap_err();
        assert_eq!(err.code, DUPLICATE_POSTCODE_ERROR);
    }

    #[tokio::test]
    async fn one_postcode_does_not_call_out() {
        let api = canned(Ok("10,2".into()));
        let mut app = App::new(api.clone());

        drive(&mut app, &["start", "add SW1A 1AA", "calculate"]).await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(builder(&app).error().unwrap().contains("at least two"));
    }

    #[tokio::test]
    async fn server_error_keeps_the_route() {
        let mut app = App::new(canned(Err(upstream_error(500))));

        drive(
            &mut app,
            &["start", "add SW1A 1AA", "add EC1A 1BB", "mode walking", "calculate"],
        )
        .await;

        let builder = builder(&app);
        assert_eq!(builder.route().route_param(), "SW1A 1AA,EC1A 1BB");
        assert_eq!(builder.travel_mode(), TravelMode::Walking);
        assert!(app.render().contains("Failed to calculate journey"));
    }

    #[tokio::test]
    async fn positions_and_wrong_screen_commands_leave_notices() {
        let mut app = App::new(canned(Ok("10,2".into())));

        drive(&mut app, &["calculate"]).await;
        assert!(matches!(app.screen(), Screen::Landing(_)));
        assert!(app.notice().is_some());

        drive(&mut app, &["start", "add SW1A 1AA", "add EC1A 1BB", "down 1"]).await;
        assert_eq!(builder(&app).route().route_param(), "EC1A 1BB,SW1A 1AA");
        assert_eq!(app.notice(), None);

        drive(&mut app, &["remove 5"]).await;
        assert_eq!(app.notice(), Some("there is no postcode at position 5"));

        assert_eq!(app.handle("quit").await, Flow::Quit);
    }

    #[tokio::test]
    async fn plan_reports_malformed_data() {
        let api = canned(Ok("10,2".into()));
        let postcodes = vec!["SW1A 1AA".to_string(), "EC1A 1BB".into(), "M1 1AE".into()];

        let err = plan(api.as_ref(), &postcodes, TravelMode::Driving)
            .await
            .unwrap_err();

        assert_eq!(err.code, MALFORMED_RESPONSE_ERROR);
    }

    #[tokio::test]
    async fn plan_renders_the_result() {
        let api = canned(Ok("90,30".into()));
        let postcodes = vec!["SW1A 1AA".to_string(), "EC1A 1BB".into()];

        let text = plan(api.as_ref(), &postcodes, TravelMode::Walking)
            .await
            .unwrap();

        assert!(text.contains("🚶 Walking Route"));
        assert!(text.contains("1h 30m"));
        assert!(text.contains("30.0 miles"));
    }
}

//! Search orchestration and page display state.

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::{
    chart::ChartHandle,
    model::WeatherQuery,
    ports::{OutputPort, Slot, SlotValue},
    provider::{FetchError, WeatherProvider},
    render,
    theme::{self, Theme},
};

/// Why a search ended without content. All variants are terminal for that
/// attempt.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no WeatherAPI key configured")]
    MissingApiKey,

    #[error("no city name given")]
    EmptyCity,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl SearchError {
    /// Text for the error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::MissingApiKey => "Please enter a valid WeatherAPI key.",
            SearchError::EmptyCity => "Please enter a city name",
            SearchError::Fetch(err) => err.user_message(),
        }
    }
}

/// Which of loading indicator, error banner and content area are shown.
/// Content and error are never visible together; loading hides content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    loading: bool,
    error: Option<String>,
    content: bool,
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_content_visible(&self) -> bool {
        self.content
    }

    fn show_loading(&mut self, port: &mut dyn OutputPort) {
        self.loading = true;
        self.content = false;
        port.write(Slot::Loading, SlotValue::Visible(true));
        port.write(Slot::Content, SlotValue::Visible(false));
    }

    fn hide_loading(&mut self, port: &mut dyn OutputPort) {
        self.loading = false;
        port.write(Slot::Loading, SlotValue::Visible(false));
    }

    fn show_error(&mut self, message: &str, port: &mut dyn OutputPort) {
        self.error = Some(message.to_string());
        self.content = false;
        port.write(Slot::Error, SlotValue::Banner { message: message.to_string(), visible: true });
        port.write(Slot::Content, SlotValue::Visible(false));
    }

    fn hide_error(&mut self, port: &mut dyn OutputPort) {
        let message = self.error.take().unwrap_or_default();
        port.write(Slot::Error, SlotValue::Banner { message, visible: false });
    }

    fn show_content(&mut self, port: &mut dyn OutputPort) {
        self.content = true;
        port.write(Slot::Content, SlotValue::Visible(true));
    }
}

/// The page: owns the provider, the output surface, the chart and all
/// session state.
///
/// `search` borrows the dashboard mutably for the whole request, so two
/// searches on one dashboard can never overlap.
pub struct Dashboard<P: OutputPort> {
    provider: Box<dyn WeatherProvider>,
    port: P,
    chart: ChartHandle,
    theme: Theme,
    display: DisplayState,
    city_input: String,
}

impl<P: OutputPort> Dashboard<P> {
    pub fn new(provider: Box<dyn WeatherProvider>, port: P, chart: ChartHandle, theme: Theme) -> Self {
        let mut dashboard = Self {
            provider,
            port,
            chart,
            theme,
            display: DisplayState::default(),
            city_input: String::new(),
        };
        theme::render_theme_indicator(dashboard.theme, &mut dashboard.port);
        dashboard
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn display_state(&self) -> &DisplayState {
        &self.display
    }

    pub fn city_input(&self) -> &str {
        &self.city_input
    }

    pub fn chart_is_live(&self) -> bool {
        self.chart.is_live()
    }

    /// Replace the contents of the city input without searching.
    pub fn set_city_input(&mut self, city: impl Into<String>) {
        self.city_input = city.into();
    }

    /// Look up the city currently in the input and render the result.
    ///
    /// The outcome is already on the page when this returns; the error is
    /// handed back for callers that want to react to it.
    #[instrument(skip(self), fields(city = %self.city_input.trim()))]
    pub async fn search(&mut self) -> Result<(), SearchError> {
        if !self.provider.is_configured() {
            return Err(self.fail(SearchError::MissingApiKey));
        }

        let Some(query) = WeatherQuery::parse(&self.city_input) else {
            return Err(self.fail(SearchError::EmptyCity));
        };

        self.display.show_loading(&mut self.port);
        self.display.hide_error(&mut self.port);

        let fetched = self.provider.fetch_weather(&query.city).await;
        let outcome = match fetched {
            Ok(data) => {
                debug!("rendering sections");
                render::render_all(&data, self.theme, &mut self.port, &mut self.chart);
                self.display.show_content(&mut self.port);
                info!(location = %data.location.name, "weather displayed");
                Ok(())
            }
            Err(err) => Err(self.fail(err.into())),
        };

        self.display.hide_loading(&mut self.port);
        outcome
    }

    /// Put `city` in the input and search for it.
    pub async fn change_city(&mut self, city: &str) -> Result<(), SearchError> {
        self.set_city_input(city);
        self.search().await
    }

    /// Initial load: search for whatever is in the input, but only once a
    /// key is configured.
    pub async fn startup(&mut self) -> Result<(), SearchError> {
        if !self.provider.is_configured() {
            return Err(self.fail(SearchError::MissingApiKey));
        }
        self.search().await
    }

    pub fn toggle_theme(&mut self) {
        theme::toggle_theme(&mut self.theme, &mut self.port, &mut self.chart);
    }

    fn fail(&mut self, err: SearchError) -> SearchError {
        warn!(error = %err, "search failed");
        self.display.show_error(err.user_message(), &mut self.port);
        err
    }
}

impl<P: OutputPort + std::fmt::Debug> std::fmt::Debug for Dashboard<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("provider", &self.provider)
            .field("port", &self.port)
            .field("chart", &self.chart)
            .field("theme", &self.theme)
            .field("display", &self.display)
            .field("city_input", &self.city_input)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::fake::{FakeFactory, Ledger};
    use crate::model::{WeatherResponse, fixtures};
    use crate::ports::RecordingPort;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy)]
    enum Reply {
        Data,
        Status(u16),
        Malformed,
    }

    #[derive(Debug)]
    struct StubProvider {
        configured: bool,
        reply: Arc<Mutex<Reply>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch_weather(&self, city: &str) -> Result<WeatherResponse, FetchError> {
            self.calls.lock().unwrap().push(city.to_string());
            let reply = *self.reply.lock().unwrap();
            match reply {
                Reply::Data => Ok(fixtures::response()),
                Reply::Status(status) => Err(FetchError::Http { status }),
                Reply::Malformed => {
                    Err(serde_json::from_str::<WeatherResponse>("[]").unwrap_err().into())
                }
            }
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    struct Harness {
        dashboard: Dashboard<RecordingPort>,
        reply: Arc<Mutex<Reply>>,
        calls: Arc<Mutex<Vec<String>>>,
        ledger: Rc<RefCell<Ledger>>,
    }

    fn harness(configured: bool, reply: Reply) -> Harness {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let reply = Arc::new(Mutex::new(reply));
        let provider =
            StubProvider { configured, reply: Arc::clone(&reply), calls: Arc::clone(&calls) };
        let (factory, ledger) = FakeFactory::new();
        let dashboard = Dashboard::new(
            Box::new(provider),
            RecordingPort::new(),
            ChartHandle::new(Box::new(factory)),
            Theme::Dark,
        );
        Harness { dashboard, reply, calls, ledger }
    }

    fn banner(port: &RecordingPort) -> Option<(&str, bool)> {
        match port.latest(Slot::Error) {
            Some(SlotValue::Banner { message, visible }) => Some((message.as_str(), *visible)),
            _ => None,
        }
    }

    #[tokio::test]
    async fn missing_key_stops_before_fetch() {
        let mut h = harness(false, Reply::Data);
        h.dashboard.set_city_input("Paris");

        let err = h.dashboard.search().await.unwrap_err();

        assert!(matches!(err, SearchError::MissingApiKey));
        assert!(h.calls.lock().unwrap().is_empty());
        assert_eq!(banner(h.dashboard.port()), Some(("Please enter a valid WeatherAPI key.", true)));
        assert!(!h.dashboard.port().is_visible(Slot::Content));
    }

    #[tokio::test]
    async fn blank_city_never_reaches_the_client() {
        let mut h = harness(true, Reply::Data);
        h.dashboard.set_city_input("   \t");

        let err = h.dashboard.search().await.unwrap_err();

        assert!(matches!(err, SearchError::EmptyCity));
        assert!(h.calls.lock().unwrap().is_empty());
        assert_eq!(banner(h.dashboard.port()), Some(("Please enter a city name", true)));
        assert!(h.dashboard.port().latest(Slot::Loading).is_none());
    }

    #[tokio::test]
    async fn successful_search_renders_everything() {
        let mut h = harness(true, Reply::Data);
        h.dashboard.set_city_input("  London ");

        h.dashboard.search().await.expect("search succeeds");

        assert_eq!(*h.calls.lock().unwrap(), vec!["London".to_string()]);
        let port = h.dashboard.port();
        assert!(port.is_visible(Slot::Content));
        assert!(!port.is_visible(Slot::Loading));
        assert!(!port.is_visible(Slot::Error));
        assert_eq!(port.text(Slot::MainLocation), Some("London, United Kingdom"));

        let Some(SlotValue::ForecastCards(cards)) = port.latest(Slot::ForecastGrid) else {
            panic!("no forecast cards");
        };
        let Some(SlotValue::RainRows(rows)) = port.latest(Slot::RainChance) else {
            panic!("no rain rows");
        };
        assert_eq!(cards.len(), 7);
        assert_eq!(rows.len(), 7);
        let card_days: Vec<_> = cards.iter().map(|c| c.day_name.clone()).collect();
        let row_days: Vec<_> = rows.iter().map(|r| r.day_name.clone()).collect();
        assert_eq!(card_days, row_days);
        assert_eq!(card_days.first().map(String::as_str), Some("Mon"));

        assert_eq!(h.ledger.borrow().live, 1);
        let state = h.dashboard.display_state();
        assert!(state.is_content_visible());
        assert!(!state.is_loading());
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn loading_shown_then_cleared() {
        let mut h = harness(true, Reply::Data);
        h.dashboard.set_city_input("London");
        h.dashboard.search().await.expect("search succeeds");

        let loading: Vec<_> = h
            .dashboard
            .port()
            .writes()
            .iter()
            .filter(|(slot, _)| *slot == Slot::Loading)
            .map(|(_, v)| v.clone())
            .collect();
        assert_eq!(loading, vec![SlotValue::Visible(true), SlotValue::Visible(false)]);
    }

    #[tokio::test]
    async fn remote_rejections_are_classified() {
        for (status, message) in [
            (401, "Invalid API key"),
            (400, "City not found"),
            (503, "Unable to fetch weather data"),
        ] {
            let mut h = harness(true, Reply::Status(status));
            let err = h.dashboard.change_city("Atlantis").await.unwrap_err();

            assert_eq!(err.user_message(), message);
            let port = h.dashboard.port();
            assert_eq!(banner(port), Some((message, true)));
            assert!(!port.is_visible(Slot::Content));
            assert!(!port.is_visible(Slot::Loading));
            assert!(port.latest(Slot::ForecastGrid).is_none());
            assert!(!h.dashboard.chart_is_live());
        }
    }

    #[tokio::test]
    async fn undecodable_body_gets_generic_message() {
        let mut h = harness(true, Reply::Malformed);
        let err = h.dashboard.change_city("Rome").await.unwrap_err();
        assert_eq!(err.user_message(), "Unable to fetch weather data");
        assert!(!h.dashboard.display_state().is_loading());
    }

    #[tokio::test]
    async fn change_city_updates_input_and_searches() {
        let mut h = harness(true, Reply::Data);
        h.dashboard.change_city("Berlin").await.expect("search succeeds");
        h.dashboard.change_city("Madrid").await.expect("search succeeds");

        assert_eq!(h.dashboard.city_input(), "Madrid");
        assert_eq!(*h.calls.lock().unwrap(), vec!["Berlin".to_string(), "Madrid".to_string()]);
        let ledger = h.ledger.borrow();
        assert_eq!(ledger.live, 1);
        assert_eq!(ledger.created, 2);
    }

    #[tokio::test]
    async fn new_search_clears_previous_error() {
        let mut h = harness(true, Reply::Data);
        let _ = h.dashboard.change_city(" ").await;
        assert!(h.dashboard.port().is_visible(Slot::Error));

        h.dashboard.change_city("Lisbon").await.expect("search succeeds");
        assert!(!h.dashboard.port().is_visible(Slot::Error));
        assert_eq!(h.dashboard.display_state().error(), None);
    }

    #[tokio::test]
    async fn failure_after_success_hides_content_and_keeps_chart() {
        let mut h = harness(true, Reply::Data);
        h.dashboard.change_city("London").await.expect("search succeeds");
        assert!(h.dashboard.port().is_visible(Slot::Content));
        let cards_before = h.dashboard.port().latest(Slot::ForecastGrid).cloned();

        *h.reply.lock().unwrap() = Reply::Status(400);
        let err = h.dashboard.change_city("Atlantis").await.unwrap_err();

        assert_eq!(err.user_message(), "City not found");
        let port = h.dashboard.port();
        assert!(!port.is_visible(Slot::Content));
        assert_eq!(banner(port), Some(("City not found", true)));
        assert!(!h.dashboard.display_state().is_content_visible());
        assert_eq!(port.latest(Slot::ForecastGrid).cloned(), cards_before);
        assert_eq!(port.text(Slot::MainLocation), Some("London, United Kingdom"));

        assert!(h.dashboard.chart_is_live());
        let ledger = h.ledger.borrow();
        assert_eq!(ledger.created, 1);
        assert_eq!(ledger.destroyed, 0);
        assert_eq!(ledger.live, 1);
    }

    #[tokio::test]
    async fn startup_requires_key() {
        let mut h = harness(false, Reply::Data);
        h.dashboard.set_city_input("London");
        assert!(matches!(h.dashboard.startup().await, Err(SearchError::MissingApiKey)));
        assert!(h.calls.lock().unwrap().is_empty());

        let mut h = harness(true, Reply::Data);
        h.dashboard.set_city_input("London");
        h.dashboard.startup().await.expect("startup search succeeds");
        assert_eq!(h.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn theme_indicator_written_on_construction() {
        let h = harness(true, Reply::Data);
        assert_eq!(
            h.dashboard.port().latest(Slot::ThemeIcon),
            Some(&SlotValue::Icon { class: "fas fa-sun".into(), color: Some("#ffffffff".into()) })
        );
    }

    #[test]
    fn toggling_before_any_search_creates_no_chart() {
        let mut h = harness(true, Reply::Data);
        h.dashboard.toggle_theme();

        assert_eq!(h.dashboard.theme(), Theme::Light);
        assert!(!h.dashboard.chart_is_live());
        assert_eq!(h.ledger.borrow().created, 0);
    }

    #[tokio::test]
    async fn toggling_after_search_restyles_chart() {
        let mut h = harness(true, Reply::Data);
        h.dashboard.change_city("London").await.expect("search succeeds");
        h.dashboard.toggle_theme();

        let ledger = h.ledger.borrow();
        assert_eq!(ledger.created, 1);
        assert_eq!(ledger.redraws, 1);
        assert_eq!(ledger.colors, Some(Theme::Light.axis_colors()));
    }
}

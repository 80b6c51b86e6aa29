//! Application state management for Skycast
//!
//! This module owns the session state (weather snapshot, loading/error
//! flags, unit preferences, recent searches) and orchestrates the location
//! resolver, the weather fetcher and the search debouncer. All network work
//! runs in spawned tasks that report back through an mpsc channel; state
//! mutations happen only on the UI task, one message at a time.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::cli::{StartupConfig, StartupLocation};
use crate::config::Config;
use crate::data::{
    Coordinates, DeviceLocator, LocationError, LocationSuggestion, RecentSearch, SpeedUnit,
    TemperatureUnit, WeatherClient, WeatherError, WeatherSnapshot,
};
use crate::search::SearchDebouncer;
use crate::store::{push_recent, RecentStore};

/// Default location when the device position cannot be resolved
/// (Kisumu, Kenya).
const FALLBACK_LAT: f64 = -0.1022;
const FALLBACK_LON: f64 = 34.7617;

/// Message shown alongside the fallback snapshot
const FALLBACK_NOTICE: &str = "Unable to get your location. Showing default location (Kisumu, Kenya).";

/// Messages sent from background tasks to the main app
#[derive(Debug)]
pub enum AppMessage {
    /// Device location lookup finished
    DeviceLocated(Result<Coordinates, LocationError>),
    /// The startup city search finished
    CityResolved {
        query: String,
        result: Result<Vec<LocationSuggestion>, WeatherError>,
    },
    /// A weather fetch finished; `seq` identifies which fetch
    FetchCompleted {
        seq: u64,
        result: Result<WeatherSnapshot, WeatherError>,
    },
    /// A debounced location search finished
    SearchCompleted {
        generation: u64,
        result: Result<Vec<LocationSuggestion>, WeatherError>,
    },
}

/// A selectable row in the search overlay
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRow {
    /// One of the current suggestions (index into `suggestions`)
    Suggestion(usize),
    /// One of the recent searches (index into `recent_searches`)
    Recent(usize),
    /// The "use current location" action
    Device,
}

/// Main application struct managing state and data
pub struct App {
    /// The latest complete weather dataset, replaced wholesale on success
    pub snapshot: Option<WeatherSnapshot>,
    /// Whether a fetch is in flight
    pub is_loading: bool,
    /// User-facing error message, if any
    pub error: Option<String>,
    /// Temperature display unit (presentation only)
    pub temperature_unit: TemperatureUnit,
    /// Wind speed display unit (presentation only)
    pub speed_unit: SpeedUnit,
    /// Recent searches, most recent first, at most five, unique names
    pub recent_searches: Vec<RecentSearch>,
    /// Whether the search overlay is open
    pub search_open: bool,
    /// Current search input text
    pub search_query: String,
    /// Suggestions for the current query
    pub suggestions: Vec<LocationSuggestion>,
    /// Whether a search request is in flight
    pub search_in_progress: bool,
    /// Selected row in the search overlay
    pub search_selection: usize,
    /// Flag to show the help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Sequence number of the most recently issued fetch
    fetch_seq: u64,
    /// Pending notice to attach once the fallback fetch lands
    fallback_notice: Option<String>,
    /// Search debounce state
    debouncer: SearchDebouncer,
    /// Weather/geocoding API client
    client: WeatherClient,
    /// Device location resolver
    locator: DeviceLocator,
    /// Persistence for recent searches; None keeps them in memory only
    store: Option<RecentStore>,
    /// Channel for background task results
    tx: mpsc::Sender<AppMessage>,
}

impl App {
    /// Creates the app from the resolved configuration.
    pub fn new(config: &Config, startup: &StartupConfig, tx: mpsc::Sender<AppMessage>) -> Self {
        Self::with_components(
            WeatherClient::new(config.api_key.clone()),
            DeviceLocator::new(),
            RecentStore::new(),
            startup,
            tx,
        )
    }

    /// Creates the app with custom components (used by tests).
    pub fn with_components(
        client: WeatherClient,
        locator: DeviceLocator,
        store: Option<RecentStore>,
        startup: &StartupConfig,
        tx: mpsc::Sender<AppMessage>,
    ) -> Self {
        let recent_searches = store.as_ref().map(|s| s.load()).unwrap_or_default();
        Self {
            snapshot: None,
            is_loading: true,
            error: None,
            temperature_unit: startup.temperature_unit,
            speed_unit: startup.speed_unit,
            recent_searches,
            search_open: false,
            search_query: String::new(),
            suggestions: Vec::new(),
            search_in_progress: false,
            search_selection: 0,
            show_help: false,
            should_quit: false,
            fetch_seq: 0,
            fallback_notice: None,
            debouncer: SearchDebouncer::new(),
            client,
            locator,
            store,
            tx,
        }
    }

    /// Kicks off the startup sequence.
    ///
    /// Runs once: resolve the startup location, then fetch. Any failure on
    /// the way falls back to the default location while still populating a
    /// snapshot.
    pub fn start(&mut self, startup: StartupConfig) {
        match startup.location {
            StartupLocation::Device => {
                let locator = self.locator.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = locator.locate().await;
                    let _ = tx.send(AppMessage::DeviceLocated(result)).await;
                });
            }
            StartupLocation::City(query) => {
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.search_locations(&query).await;
                    let _ = tx.send(AppMessage::CityResolved { query, result }).await;
                });
            }
            StartupLocation::Fixed(coords) => {
                self.request_fetch(coords);
            }
        }
    }

    /// Issues a weather fetch for the given coordinates.
    ///
    /// Each fetch gets the next sequence number; only the completion
    /// carrying the latest number may commit its result, so an older
    /// response can never overwrite a newer snapshot.
    pub fn request_fetch(&mut self, coords: Coordinates) -> u64 {
        self.fetch_seq += 1;
        let seq = self.fetch_seq;
        self.is_loading = true;
        self.error = None;
        // A notice from a superseded fallback must not surface on this
        // fetch; fetch_fallback re-arms it after the call
        self.fallback_notice = None;

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch(coords).await;
            let _ = tx.send(AppMessage::FetchCompleted { seq, result }).await;
        });
        seq
    }

    /// Applies one background-task message to the state.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::DeviceLocated(Ok(coords)) => {
                self.request_fetch(coords);
            }
            AppMessage::DeviceLocated(Err(err)) => {
                log::warn!("device location failed: {}", err);
                // Fall back only while there is nothing on screen yet; a
                // mid-session lookup failure keeps the current snapshot
                if self.snapshot.is_none() {
                    self.fetch_fallback(FALLBACK_NOTICE.to_string());
                } else {
                    self.error = Some("Unable to get your location.".to_string());
                }
            }
            AppMessage::CityResolved { query, result } => match result {
                Ok(suggestions) if !suggestions.is_empty() => {
                    let city = &suggestions[0];
                    let entry = RecentSearch {
                        name: format!("{}, {}", city.name, city.country),
                        lat: city.lat,
                        lon: city.lon,
                    };
                    if let Ok(coords) = Coordinates::new(city.lat, city.lon) {
                        self.add_recent_search(entry);
                        self.request_fetch(coords);
                    } else {
                        self.fetch_fallback(FALLBACK_NOTICE.to_string());
                    }
                }
                Ok(_) => {
                    self.fetch_fallback(format!(
                        "No match for '{}'. Showing default location (Kisumu, Kenya).",
                        query
                    ));
                }
                Err(err) => {
                    log::warn!("startup city search failed: {}", err);
                    self.fetch_fallback(FALLBACK_NOTICE.to_string());
                }
            },
            AppMessage::FetchCompleted { seq, result } => {
                if seq != self.fetch_seq {
                    log::debug!("discarding stale fetch result (seq {} < {})", seq, self.fetch_seq);
                    return;
                }
                self.is_loading = false;
                match result {
                    Ok(snapshot) => {
                        self.snapshot = Some(snapshot);
                        // A fallback fetch still reports why we fell back
                        self.error = self.fallback_notice.take();
                    }
                    Err(err) => {
                        log::error!("weather fetch failed: {}", err);
                        self.fallback_notice = None;
                        // Keep any previous snapshot; stale data beats none
                        self.error = Some(fetch_error_message(&err));
                    }
                }
            }
            AppMessage::SearchCompleted { generation, result } => {
                if !self.debouncer.is_current(generation) {
                    log::debug!("discarding stale search result (generation {})", generation);
                    return;
                }
                self.search_in_progress = false;
                match result {
                    Ok(suggestions) => {
                        self.suggestions = suggestions;
                        self.search_selection = 0;
                    }
                    Err(err) => {
                        log::warn!("location search failed: {}", err);
                        self.suggestions.clear();
                    }
                }
            }
        }
    }

    /// Fires any search whose debounce window has elapsed.
    ///
    /// Called from the main loop on every tick.
    pub fn tick(&mut self, now: Instant) {
        if let Some((generation, query)) = self.debouncer.poll(now) {
            self.search_in_progress = true;
            let client = self.client.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let result = client.search_locations(&query).await;
                let _ = tx
                    .send(AppMessage::SearchCompleted { generation, result })
                    .await;
            });
        }
    }

    /// Records a location selection in the recent-search list.
    ///
    /// Removes any entry with the same name, prepends, truncates to five,
    /// and persists the whole list immediately. Persistence failures are
    /// logged, never surfaced.
    pub fn add_recent_search(&mut self, entry: RecentSearch) {
        self.recent_searches = push_recent(&self.recent_searches, entry);
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.recent_searches) {
                log::warn!("failed to persist recent searches: {}", err);
            }
        }
    }

    /// Flips the temperature display unit. Stored data is untouched.
    pub fn toggle_temperature_unit(&mut self) {
        self.temperature_unit = self.temperature_unit.toggled();
    }

    /// Flips the wind speed display unit. Stored data is untouched.
    pub fn toggle_speed_unit(&mut self) {
        self.speed_unit = self.speed_unit.toggled();
    }

    /// The selectable rows of the search overlay, in display order.
    pub fn search_rows(&self) -> Vec<SearchRow> {
        let mut rows: Vec<SearchRow> = (0..self.suggestions.len())
            .map(SearchRow::Suggestion)
            .collect();
        rows.extend((0..self.recent_searches.len()).map(SearchRow::Recent));
        rows.push(SearchRow::Device);
        rows
    }

    /// Handles keyboard input and updates state accordingly.
    ///
    /// # Key Bindings
    /// - `q` / `Esc` (dashboard): quit
    /// - `/` or `s`: open search overlay
    /// - `u`: toggle temperature unit, `w`: toggle wind speed unit
    /// - `r`: refresh the current location
    /// - `?`: toggle help overlay
    /// - In search: type to search, `Up`/`Down` select, `Enter` confirm,
    ///   `Esc` close
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        if self.search_open {
            self.handle_search_key(key_event);
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.open_search();
            }
            KeyCode::Char('u') => {
                self.toggle_temperature_unit();
            }
            KeyCode::Char('w') => {
                self.toggle_speed_unit();
            }
            KeyCode::Char('r') => {
                self.refresh();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    /// Key handling while the search overlay is open
    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.close_search();
            }
            KeyCode::Up => {
                if self.search_selection > 0 {
                    self.search_selection -= 1;
                }
            }
            KeyCode::Down => {
                let rows = self.search_rows().len();
                if self.search_selection + 1 < rows {
                    self.search_selection += 1;
                }
            }
            KeyCode::Enter => {
                self.confirm_search_selection();
            }
            KeyCode::Backspace => {
                self.search_query.pop();
                self.on_search_input();
            }
            KeyCode::Char(c) => {
                self.search_query.push(c);
                self.on_search_input();
            }
            _ => {}
        }
    }

    fn on_search_input(&mut self) {
        let scheduled = self.debouncer.input(&self.search_query, Instant::now());
        if !scheduled {
            self.suggestions.clear();
            self.search_in_progress = false;
            self.search_selection = 0;
        }
    }

    fn open_search(&mut self) {
        self.search_open = true;
        self.search_query.clear();
        self.suggestions.clear();
        self.search_selection = 0;
    }

    fn close_search(&mut self) {
        self.search_open = false;
        self.search_in_progress = false;
        self.suggestions.clear();
        // Invalidate any in-flight search so its result cannot reopen state
        self.debouncer.input("", Instant::now());
    }

    /// Acts on the currently selected row of the search overlay.
    fn confirm_search_selection(&mut self) {
        let rows = self.search_rows();
        let Some(row) = rows.get(self.search_selection).cloned() else {
            return;
        };
        match row {
            SearchRow::Suggestion(index) => {
                if let Some(suggestion) = self.suggestions.get(index).cloned() {
                    self.select_suggestion(suggestion);
                }
            }
            SearchRow::Recent(index) => {
                if let Some(recent) = self.recent_searches.get(index).cloned() {
                    if let Ok(coords) = Coordinates::new(recent.lat, recent.lon) {
                        self.close_search();
                        self.request_fetch(coords);
                    }
                }
            }
            SearchRow::Device => {
                self.close_search();
                let locator = self.locator.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = locator.locate().await;
                    let _ = tx.send(AppMessage::DeviceLocated(result)).await;
                });
            }
        }
    }

    /// Fetches the selected suggestion and records it as a recent search.
    fn select_suggestion(&mut self, suggestion: LocationSuggestion) {
        let Ok(coords) = Coordinates::new(suggestion.lat, suggestion.lon) else {
            return;
        };
        self.close_search();
        self.add_recent_search(RecentSearch {
            name: format!("{}, {}", suggestion.name, suggestion.country),
            lat: suggestion.lat,
            lon: suggestion.lon,
        });
        self.request_fetch(coords);
    }

    /// Re-fetches the current snapshot's location, if there is one.
    pub fn refresh(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        if let Ok(coords) = Coordinates::new(snapshot.location.lat, snapshot.location.lon) {
            self.request_fetch(coords);
        }
    }

    /// Fetches the default location and arranges for `notice` to be shown
    /// once the snapshot lands.
    fn fetch_fallback(&mut self, notice: String) {
        let coords = fallback_coordinates();
        self.request_fetch(coords);
        self.fallback_notice = Some(notice);
    }
}

/// The default location used when no other can be resolved.
pub fn fallback_coordinates() -> Coordinates {
    Coordinates::new(FALLBACK_LAT, FALLBACK_LON).expect("default coordinates are valid")
}

/// Maps a fetch failure to the short message shown in the UI.
fn fetch_error_message(err: &WeatherError) -> String {
    match err {
        WeatherError::InvalidApiKey => {
            "Invalid OpenWeatherMap API key. Please check your credentials.".to_string()
        }
        _ => "Failed to fetch weather data. Please try again.".to_string(),
    }
}

//! Orchestrates the two ways into a fetch (startup position, submitted city)
//! and owns the display state that renderers watch.

use std::{
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::sync::watch;

use crate::{
    client::WeatherClient,
    error::WeatherError,
    location::Geolocator,
    model::{DisplayModel, WeatherQuery},
    normalize::normalize,
    validate::CityQuery,
};

pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(2);

/// A transient, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub duration: Duration,
}

pub trait Notifier: Send + Sync + Debug {
    fn notify(&self, notification: Notification);
}

/// Latest published snapshot. `revision` is the ticket of the fetch that produced `model`.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub revision: u64,
    pub model: Option<Arc<DisplayModel>>,
}

#[derive(Debug)]
pub enum Startup {
    Shown(Arc<DisplayModel>),
    /// No position available; the caller should ask for a city instead.
    NeedsCity(WeatherError),
}

#[derive(Debug)]
pub struct Presenter {
    client: Arc<dyn WeatherClient>,
    notifier: Arc<dyn Notifier>,
    clock_correction_secs: i64,
    issued: AtomicU64,
    state: watch::Sender<DisplayState>,
}

impl Presenter {
    pub fn new(
        client: Arc<dyn WeatherClient>,
        notifier: Arc<dyn Notifier>,
        clock_correction_secs: i64,
    ) -> Self {
        let (state, _) = watch::channel(DisplayState::default());
        Self {
            client,
            notifier,
            clock_correction_secs,
            issued: AtomicU64::new(0),
            state,
        }
    }

    /// Startup path: one position lookup, then a coordinate fetch.
    pub async fn start(&self, geolocator: &dyn Geolocator) -> Result<Startup, WeatherError> {
        match geolocator.current_position().await {
            Ok(coords) => self
                .refresh(WeatherQuery::Coordinates(coords))
                .await
                .map(Startup::Shown),
            Err(e) => {
                tracing::warn!("Falling back to manual city entry: {}", e);
                self.notify(e.user_message());
                Ok(Startup::NeedsCity(e))
            }
        }
    }

    /// Manual path. Invalid input is rejected before any request is made.
    pub async fn submit_city(&self, input: &str) -> Result<Arc<DisplayModel>, WeatherError> {
        let city = CityQuery::parse(input)?;
        self.refresh(WeatherQuery::City(city)).await
    }

    /// Shared pipeline: fetch, reject provider-level errors, normalize, publish.
    ///
    /// The returned model is this fetch's result. It only becomes the displayed
    /// state if no later fetch has been published first.
    pub async fn refresh(&self, query: WeatherQuery) -> Result<Arc<DisplayModel>, WeatherError> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Fetching weather for {} (revision {})", query, ticket);

        match self.load(&query).await {
            Ok(model) => {
                let model = Arc::new(model);
                if !self.publish(ticket, Arc::clone(&model)) {
                    tracing::debug!(
                        "Revision {} finished after a newer one, display unchanged",
                        ticket
                    );
                }
                Ok(model)
            }
            Err(e) => {
                tracing::warn!("Weather fetch for {} failed: {}", query, e);
                if self.is_superseded(ticket) {
                    tracing::debug!("Revision {} superseded, not notifying", ticket);
                } else {
                    self.notify(e.user_message());
                }
                Err(e)
            }
        }
    }

    async fn load(&self, query: &WeatherQuery) -> Result<DisplayModel, WeatherError> {
        let response = self.client.fetch(&query.suffix()).await?;

        if let Some(message) = response.message() {
            return Err(WeatherError::Provider { message });
        }

        normalize(&response, self.clock_correction_secs)
    }

    /// Replace the displayed state unless a newer revision is already shown.
    fn publish(&self, ticket: u64, model: Arc<DisplayModel>) -> bool {
        self.state.send_if_modified(|state| {
            if ticket <= state.revision {
                return false;
            }

            tracing::info!("Showing weather for {}", model.city);
            *state = DisplayState {
                revision: ticket,
                model: Some(model),
            };
            true
        })
    }

    fn is_superseded(&self, ticket: u64) -> bool {
        self.issued.load(Ordering::SeqCst) > ticket
    }

    fn notify(&self, message: String) {
        self.notifier.notify(Notification {
            message,
            duration: NOTIFICATION_DURATION,
        });
    }

    /// Currently displayed model, if any fetch has succeeded.
    pub fn current(&self) -> Option<Arc<DisplayModel>> {
        self.state.borrow().model.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }
}

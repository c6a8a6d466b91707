//! In-memory stand-ins for the network and the render surface.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use reqwest::{Method, Url};

use crate::{
    auth::{CredentialResolver, StaticSessionProvider},
    http::{
        PlayerClient,
        error::ApiError,
        transport::{HttpRequest, HttpResponse, Transport},
    },
    player::{
        config::{ControlsConfig, SPOTIFY_PLAYER_API},
        controller::PlaybackController,
        model::PlaybackSnapshot,
    },
    ui::{notice::Notice, render::RenderAdapter},
};

#[derive(Clone)]
struct Route {
    reply: Result<HttpResponse, ApiError>,
    delay: Option<Duration>,
}

impl Default for Route {
    fn default() -> Self {
        Self {
            reply: Ok(HttpResponse::new(204, "")),
            delay: None,
        }
    }
}

#[derive(Default)]
struct FakeState {
    routes: HashMap<(Method, String), Route>,
    requests: Vec<HttpRequest>,
}

/// Routes are keyed by method and operation (the path below the player
/// resource). Unknown routes answer 204.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: Method, operation: &str, response: HttpResponse) -> Self {
        self.set_reply(method, operation, response);
        self
    }

    pub fn fail(self, method: Method, operation: &str, message: &str) -> Self {
        self.set_fail(method, operation, message);
        self
    }

    pub fn delay(self, method: Method, operation: &str, delay: Duration) -> Self {
        self.route(method, operation, |route| route.delay = Some(delay));
        self
    }

    pub fn set_reply(&self, method: Method, operation: &str, response: HttpResponse) {
        self.route(method, operation, |route| route.reply = Ok(response));
    }

    pub fn set_fail(&self, method: Method, operation: &str, message: &str) {
        let error = ApiError::Transport(message.to_string());
        self.route(method, operation, |route| route.reply = Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn calls(&self, method: Method, operation: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && operation_of(&r.url) == operation)
            .count()
    }

    /// `"GET"`, `"PUT /pause"`, ... in the order they were sent.
    pub fn log(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, operation_of(&r.url)).trim_end().to_string())
            .collect()
    }

    fn route(&self, method: Method, operation: &str, update: impl FnOnce(&mut Route)) {
        let mut state = self.state.lock().unwrap();
        update(
            state
                .routes
                .entry((method, operation.to_string()))
                .or_default(),
        );
    }
}

fn operation_of(url: &Url) -> String {
    let base = Url::parse(SPOTIFY_PLAYER_API).unwrap();
    url.path()
        .strip_prefix(base.path())
        .unwrap_or(url.path())
        .to_string()
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let route = {
            let mut state = self.state.lock().unwrap();
            let key = (request.method.clone(), operation_of(&request.url));
            let route = state.routes.get(&key).cloned().unwrap_or_default();
            state.requests.push(request);
            route
        };

        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }

        route.reply
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Mount,
    Unmount,
    Display(PlaybackSnapshot),
    Busy(bool),
    Notice(Notice),
}

#[derive(Clone)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
    mountable: Arc<AtomicBool>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            calls: Arc::default(),
            mountable: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_mountable(&self, mountable: bool) {
        self.mountable.store(mountable, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn displayed(&self) -> Vec<PlaybackSnapshot> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RenderCall::Display(snapshot) => Some(snapshot),
                _ => None,
            })
            .collect()
    }

    pub fn busy(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RenderCall::Busy(busy) => Some(busy),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RenderCall::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: RenderCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RenderAdapter for RecordingRenderer {
    fn mount(&self) -> bool {
        let mountable = self.mountable.load(Ordering::SeqCst);
        if mountable {
            self.record(RenderCall::Mount);
        }
        mountable
    }

    fn unmount(&self) {
        self.record(RenderCall::Unmount);
    }

    fn update_display(&self, snapshot: &PlaybackSnapshot) {
        self.record(RenderCall::Display(snapshot.clone()));
    }

    fn set_busy(&self, busy: bool) {
        self.record(RenderCall::Busy(busy));
    }

    fn show_notice(&self, notice: &Notice) {
        self.record(RenderCall::Notice(notice.clone()));
    }
}

pub fn player_client(transport: FakeTransport, provider: StaticSessionProvider) -> PlayerClient {
    PlayerClient::new(
        CredentialResolver::new(Arc::new(provider)),
        Arc::new(transport),
        SPOTIFY_PLAYER_API,
    )
}

pub fn controller(
    transport: FakeTransport,
    provider: StaticSessionProvider,
    renderer: RecordingRenderer,
) -> Arc<PlaybackController> {
    PlaybackController::with_transport(
        Arc::new(provider),
        Arc::new(transport),
        Arc::new(renderer),
        ControlsConfig::default(),
    )
}

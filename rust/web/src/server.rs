use crate::handlers;
use crate::middleware;
use crate::players::PlayerRegistry;
use crate::scoreboard::ScoreBoard;
use crate::session::SessionManager;
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::BoxedFilter;
use warp::reply::{Reply, Response};
use warp::Filter;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Bind to an ephemeral localhost port, for integration tests.
    pub fn for_tests() -> Self {
        Self::new("127.0.0.1", 0)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

/// The shared components every request handler works against: the identity
/// collaborator, the game store, and the high-score sink.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    registry: Arc<PlayerRegistry>,
    sessions: Arc<SessionManager>,
    scoreboard: Arc<ScoreBoard>,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Self {
        let registry = Arc::new(PlayerRegistry::new());
        let scoreboard = Arc::new(ScoreBoard::new());
        let sessions = Arc::new(SessionManager::new(
            Arc::clone(&registry),
            Arc::clone(&scoreboard),
        ));
        Self::new_with_dependencies(config, registry, sessions, scoreboard)
    }

    pub fn new_with_dependencies(
        config: ServerConfig,
        registry: Arc<PlayerRegistry>,
        sessions: Arc<SessionManager>,
        scoreboard: Arc<ScoreBoard>,
    ) -> Self {
        Self {
            config,
            registry,
            sessions,
            scoreboard,
        }
    }

    pub fn new_for_tests() -> Self {
        Self::new(ServerConfig::for_tests())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> Arc<PlayerRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn sessions(&self) -> Arc<SessionManager> {
        Arc::clone(&self.sessions)
    }

    pub fn scoreboard(&self) -> Arc<ScoreBoard> {
        Arc::clone(&self.scoreboard)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            context: AppContext::new(config),
        }
    }

    pub fn from_context(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let config = context.config().clone();
        let bind_addr = Self::bind_addr(&config)?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = Self::routes(&context);
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        tracing::info!(address = %addr, "web server listening");

        let task = tokio::spawn(async move {
            server_future.await;
            Ok(())
        });

        Ok(ServerHandle::new(addr, shutdown_tx, task, context))
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port()));
        }

        let candidate = format!("{}:{}", host, config.port());
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(source) = err.source() {
            if let Some(io_err) = source.downcast_ref::<std::io::Error>() {
                let recreated = std::io::Error::new(io_err.kind(), io_err.to_string());
                return ServerError::BindError(recreated);
            }
        }

        ServerError::ConfigError(err.to_string())
    }

    fn routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let stack = Self::health_route()
            .or(Self::player_routes(context))
            .unify()
            .or(Self::game_routes(context))
            .unify()
            .or(Self::dashboard_route(context))
            .unify();

        middleware::with_request_logging(stack).boxed()
    }

    fn health_route() -> BoxedFilter<(Response,)> {
        warp::path("health")
            .and(warp::get())
            .and(warp::path::end())
            .map(|| handlers::health().into_response())
            .boxed()
    }

    fn player_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let registry = context.registry();

        let register = warp::path!("api" / "players")
            .and(warp::post())
            .and(Self::with_registry(registry.clone()))
            .and(warp::body::json())
            .and_then(
                |registry: Arc<PlayerRegistry>, request: handlers::RegisterRequest| async move {
                    let response = handlers::register_player(registry, request).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let list = warp::path!("api" / "players")
            .and(warp::get())
            .and(Self::with_registry(registry.clone()))
            .and(Self::with_auth_header())
            .and_then(
                |registry: Arc<PlayerRegistry>, auth: Option<String>| async move {
                    let response = handlers::list_players(registry, auth).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let profile = warp::path!("api" / "players" / String)
            .and(warp::get())
            .and(Self::with_registry(registry))
            .and(Self::with_auth_header())
            .and_then(
                |player_id: String, registry: Arc<PlayerRegistry>, auth: Option<String>| async move {
                    let response = handlers::get_player(registry, auth, player_id).await;
                    Ok::<_, Infallible>(response)
                },
            );

        register.or(list).unify().or(profile).unify().boxed()
    }

    fn game_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let registry = context.registry();
        let sessions = context.sessions();

        let create = warp::path!("api" / "games")
            .and(warp::post())
            .and(Self::with_registry(registry.clone()))
            .and(Self::with_session_manager(sessions.clone()))
            .and(Self::with_auth_header())
            .and(warp::body::json())
            .and_then(
                |registry: Arc<PlayerRegistry>,
                 sessions: Arc<SessionManager>,
                 auth: Option<String>,
                 request: handlers::CreateGameRequest| async move {
                    let response = handlers::create_game(registry, sessions, auth, request).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let moves = warp::path!("api" / "games" / String / "moves")
            .and(warp::post())
            .and(Self::with_registry(registry.clone()))
            .and(Self::with_session_manager(sessions.clone()))
            .and(Self::with_auth_header())
            .and(warp::body::json())
            .and_then(
                |session_id: String,
                 registry: Arc<PlayerRegistry>,
                 sessions: Arc<SessionManager>,
                 auth: Option<String>,
                 request: handlers::MoveRequest| async move {
                    let response =
                        handlers::submit_move(registry, sessions, auth, session_id, request).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let info = warp::path!("api" / "games" / String)
            .and(warp::get())
            .and(Self::with_registry(registry.clone()))
            .and(Self::with_session_manager(sessions.clone()))
            .and(Self::with_auth_header())
            .and_then(
                |session_id: String,
                 registry: Arc<PlayerRegistry>,
                 sessions: Arc<SessionManager>,
                 auth: Option<String>| async move {
                    let response = handlers::get_game(registry, sessions, auth, session_id).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let delete = warp::path!("api" / "games" / String)
            .and(warp::delete())
            .and(Self::with_registry(registry))
            .and(Self::with_session_manager(sessions))
            .and(Self::with_auth_header())
            .and_then(
                |session_id: String,
                 registry: Arc<PlayerRegistry>,
                 sessions: Arc<SessionManager>,
                 auth: Option<String>| async move {
                    let response =
                        handlers::delete_game(registry, sessions, auth, session_id).await;
                    Ok::<_, Infallible>(response)
                },
            );

        create
            .or(moves)
            .unify()
            .or(info)
            .unify()
            .or(delete)
            .unify()
            .boxed()
    }

    fn dashboard_route(context: &AppContext) -> BoxedFilter<(Response,)> {
        let scoreboard = context.scoreboard();

        warp::path!("api" / "dashboard")
            .and(warp::get())
            .and(warp::query::<handlers::DashboardQuery>())
            .and(Self::with_scoreboard(scoreboard))
            .and_then(
                |query: handlers::DashboardQuery, scoreboard: Arc<ScoreBoard>| async move {
                    let response = handlers::dashboard(scoreboard, query).await;
                    Ok::<_, Infallible>(response)
                },
            )
            .boxed()
    }

    fn with_registry(
        registry: Arc<PlayerRegistry>,
    ) -> impl Filter<Extract = (Arc<PlayerRegistry>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&registry))
    }

    fn with_session_manager(
        sessions: Arc<SessionManager>,
    ) -> impl Filter<Extract = (Arc<SessionManager>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&sessions))
    }

    fn with_scoreboard(
        scoreboard: Arc<ScoreBoard>,
    ) -> impl Filter<Extract = (Arc<ScoreBoard>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&scoreboard))
    }

    fn with_auth_header(
    ) -> impl Filter<Extract = (Option<String>,), Error = warp::Rejection> + Clone {
        warp::header::optional::<String>("authorization")
    }
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<(), ServerError>>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            match task.await {
                Ok(result) => result?,
                Err(err) => {
                    return Err(ServerError::ConfigError(format!(
                        "server task join error: {err}"
                    )))
                }
            }
        }

        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

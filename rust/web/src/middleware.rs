use std::time::Instant;
use warp::http::{Method, StatusCode};
use warp::path::FullPath;
use warp::reject::Rejection;
use warp::reply::{Reply, Response};
use warp::Filter;

/// Wraps a route stack with request/response logging.
///
/// Logs the incoming method and path before the inner filter runs, and the
/// status plus elapsed time once it produced a reply.
pub fn with_request_logging<F, T>(
    filter: F,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    F: Filter<Extract = (T,), Error = Rejection> + Clone + Send + Sync + 'static,
    T: Reply,
{
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: FullPath, method: Method| {
            tracing::info!(
                path = %path.as_str(),
                method = %method,
                "incoming request"
            );
            (Instant::now(), path.as_str().to_string(), method)
        })
        .and(filter)
        .map(
            |(start, path, method): (Instant, String, Method), reply: T| {
                let response = reply.into_response();
                log_response(
                    response.status(),
                    &path,
                    method.as_str(),
                    start.elapsed().as_millis(),
                );
                response
            },
        )
}

/// Routes a completed response to the log level matching its status class.
pub fn log_response(status: StatusCode, path: &str, method: &str, duration_ms: u128) {
    if status.is_client_error() {
        tracing::warn!(
            status = %status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "client error"
        );
    } else if status.is_server_error() {
        tracing::error!(
            status = %status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "server error"
        );
    } else {
        tracing::info!(
            status = %status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "response sent"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[tokio::test]
    async fn wrapped_filter_still_replies() {
        let inner = warp::path!("ping")
            .and(warp::get())
            .and_then(|| async { Ok::<_, Infallible>(warp::reply::json(&"pong")) });
        let wrapped = with_request_logging(inner);

        let response = warp::test::request()
            .method("GET")
            .path("/ping")
            .reply(&wrapped)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), "\"pong\"");
    }
}

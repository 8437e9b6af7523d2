//! Development reverse proxy: strips the `/api` prefix, forwards to the
//! routing host and adds permissive CORS headers to whatever comes back.

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::Extension, routing::any, Router};

use crate::config::{Config, PROXY_PREFIX};
use crate::error::{server_error, Error};
use crate::server::handlers::proxy::{self, SharedUpstream};

pub use handlers::proxy::Upstream;

pub fn router(upstream: Upstream) -> Router {
    let upstream: SharedUpstream = Arc::new(upstream);

    Router::new()
        .route(&format!("{}/*path", PROXY_PREFIX), any(proxy::forward))
        .layer(Extension(upstream))
}

pub async fn serve(config: &Config) -> Result<(), Error> {
    let app = router(Upstream::new(&config.proxy_target)?);
    let addr: SocketAddr = config.proxy_addr;

    tracing::info!("listening on {}, forwarding to {}", addr, config.proxy_target);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(server_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::RawQuery,
        http::{StatusCode, Uri},
        routing::get,
    };

    use crate::config::JOURNEY_PLAN_PATH;
    use crate::entities::{JourneyRequest, TravelMode};
    use crate::error::UPSTREAM_ERROR;
    use crate::external::{JourneyPlanner, RoutingApi};

    async fn spawn(app: Router) -> String {
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let server = axum::Server::bind(&addr).serve(app.into_make_service());
        let base = format!("http://{}", server.local_addr());
        tokio::spawn(server);
        base
    }

    async fn routing_host() -> String {
        spawn(
            Router::new()
                .route(
                    JOURNEY_PLAN_PATH,
                    get(|RawQuery(query): RawQuery| async move {
                        if query.unwrap_or_default().contains("TravelMode=Walking") {
                            (StatusCode::OK, "30,1.5")
                        } else {
                            (StatusCode::OK, "10,4")
                        }
                    }),
                )
                .route(
                    "/broken",
                    get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
                ),
        )
        .await
    }

    #[test]
    fn strips_the_prefix_and_keeps_the_query() {
        let upstream = Upstream::new("https://routing.example.org/").unwrap();
        let uri: Uri = "/api/Travel/JourneyPlan.aspx?Route=M1%201AE&Format=Miles"
            .parse()
            .unwrap();

        assert_eq!(
            upstream.url_for(&uri),
            "https://routing.example.org/Travel/JourneyPlan.aspx?Route=M1%201AE&Format=Miles"
        );
    }

    #[tokio::test]
    async fn forwards_and_adds_cors_headers() {
        let host = routing_host().await;
        let proxy = spawn(router(Upstream::new(host).unwrap())).await;

        let res = reqwest::get(format!(
            "{}/api{}?Route=M1%201AE&TravelMode=Walking",
            proxy, JOURNEY_PLAN_PATH
        ))
        .await
        .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        assert_eq!(
            res.headers()["access-control-allow-methods"],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            res.headers()["access-control-allow-headers"],
            "Content-Type, Authorization"
        );
        assert_eq!(res.text().await.unwrap(), "30,1.5");
    }

    #[tokio::test]
    async fn passes_upstream_failures_through() {
        let host = routing_host().await;
        let proxy = spawn(router(Upstream::new(host).unwrap())).await;

        let res = reqwest::get(format!("{}/api/broken", proxy)).await.unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn unreachable_target_is_a_bad_gateway() {
        let proxy = spawn(router(Upstream::new("http://127.0.0.1:9").unwrap())).await;

        let res = reqwest::get(format!("{}/api/anything", proxy)).await.unwrap();

        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn planner_works_through_the_proxy() {
        let host = routing_host().await;
        let proxy = spawn(router(Upstream::new(host).unwrap())).await;
        let planner = JourneyPlanner::new(format!("{}{}", proxy, PROXY_PREFIX)).unwrap();

        let walking = planner
            .plan_journey(&JourneyRequest {
                route: "M1 1AE,B33 8TH".into(),
                travel_mode: TravelMode::Walking,
            })
            .await
            .unwrap();
        assert_eq!(walking, "30,1.5");

        let broken = JourneyPlanner::new(format!("{}{}/broken", proxy, PROXY_PREFIX)).unwrap();
        let err = broken
            .plan_journey(&JourneyRequest {
                route: "M1 1AE,B33 8TH".into(),
                travel_mode: TravelMode::Driving,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, UPSTREAM_ERROR);
    }
}

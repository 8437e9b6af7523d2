use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::{
        header::{self, HeaderName},
        HeaderMap, HeaderValue, Method, Uri,
    },
    response::{IntoResponse, Response},
};

use crate::{config::PROXY_PREFIX, error::Error};

/// Where proxied requests go.
#[derive(Clone, Debug)]
pub struct Upstream {
    client: reqwest::Client,
    target: String,
}

pub type SharedUpstream = Arc<Upstream>;

impl Upstream {
    pub fn new(target: impl Into<String>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Upstream {
            client,
            target: target.into().trim_end_matches('/').to_string(),
        })
    }

    /// Upstream URL for a request that arrived at `uri`, minus the proxy prefix.
    pub fn url_for(&self, uri: &Uri) -> String {
        let path = uri.path();
        let path = path.strip_prefix(PROXY_PREFIX).unwrap_or(path);

        match uri.query() {
            Some(query) => format!("{}{}?{}", self.target, path, query),
            None => format!("{}{}", self.target, path),
        }
    }
}

const HOP_BY_HOP: [HeaderName; 5] = [
    header::CONNECTION,
    header::HOST,
    header::TRANSFER_ENCODING,
    header::CONTENT_LENGTH,
    header::UPGRADE,
];

fn forwardable(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = headers.clone();
    for name in HOP_BY_HOP.iter() {
        forwarded.remove(name);
    }
    forwarded
}

fn allow_any_origin(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
}

#[tracing::instrument(skip(upstream, headers, body))]
pub async fn forward(
    Extension(upstream): Extension<SharedUpstream>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, Error> {
    let url = upstream.url_for(&uri);

    let res = upstream
        .client
        .request(method, url.as_str())
        .headers(forwardable(&headers))
        .body(body)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("upstream unreachable: {}", err);
            Error::from(err)
        })?;

    let status = res.status();
    let mut response_headers = forwardable(res.headers());
    allow_any_origin(&mut response_headers);
    let data = res.bytes().await?;

    tracing::info!(%status, %url, "proxied");

    Ok((status, response_headers, data).into_response())
}

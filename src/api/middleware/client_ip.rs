//! Caller address extractor.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Best-effort client IP: the first `X-Forwarded-For` entry, else the peer
/// address of the connection. `None` when neither is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(String::from)
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = forwarded_for(&parts.headers).or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        });
        Ok(ClientIp(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::Request};

    async fn extract(request: Request) -> ClientIp {
        let (mut parts, _) = request.into_parts();
        ClientIp::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_first_forwarded_entry_wins() {
        let request = Request::builder()
            .header(FORWARDED_FOR, " 203.0.113.9 , 10.0.0.1")
            .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 9000))))
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract(request).await, ClientIp(Some("203.0.113.9".to_string())));
    }

    #[tokio::test]
    async fn test_falls_back_to_peer_address() {
        let request = Request::builder()
            .extension(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 5000))))
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract(request).await, ClientIp(Some("192.168.1.20".to_string())));
    }

    #[tokio::test]
    async fn test_unknown_address() {
        let request = Request::builder()
            .header(FORWARDED_FOR, "")
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract(request).await, ClientIp(None));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Provider Tests: Bitkub ticker parsing and fetching
// ═══════════════════════════════════════════════════════════════════

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use coin_pulse_core::errors::CoreError;
use coin_pulse_core::models::price::{derive_price, PriceSnapshot};
use coin_pulse_core::models::settings::DEFAULT_TICKER_URL;
use coin_pulse_core::models::symbol::Symbol;
use coin_pulse_core::providers::bitkub::{parse_ticker, BitkubProvider};
use coin_pulse_core::providers::traits::TickerProvider;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers: one-shot HTTP server
// ═══════════════════════════════════════════════════════════════════

/// Serve a single canned HTTP response on a local port and return its URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Read until the end of the request headers.
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{addr}/api/market/ticker")
}

// ═══════════════════════════════════════════════════════════════════
// parse_ticker
// ═══════════════════════════════════════════════════════════════════

mod parse {
    use super::*;

    #[test]
    fn reads_bid_ask_last() {
        let ticker = parse_ticker(json!({
            "THB_KUB": { "id": 1, "last": 59.0, "lowestAsk": 62.1, "highestBid": 59.9, "bid": 60.0, "ask": 62.0 },
            "THB_VELO": { "last": 0.52 }
        }))
        .unwrap();

        assert_eq!(ticker.len(), 2);
        assert_eq!(derive_price(&ticker, Symbol::Kub), Some(61.0));
        assert_eq!(derive_price(&ticker, Symbol::Velo), Some(0.52));
        assert_eq!(derive_price(&ticker, Symbol::Uni), None);
    }

    #[test]
    fn unrelated_markets_are_kept_but_ignored() {
        let ticker = parse_ticker(json!({
            "THB_BTC": { "bid": 1_000_000.0, "ask": 1_000_100.0, "last": 1_000_050.0 }
        }))
        .unwrap();

        let snapshot = PriceSnapshot::from_ticker(&ticker, chrono::Utc::now());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn unreadable_entries_are_skipped() {
        let ticker = parse_ticker(json!({
            "THB_KUB": { "last": 61.5 },
            "THB_UNI": "not a quote",
            "THB_VELO": { "last": "0.5" }
        }))
        .unwrap();

        assert_eq!(ticker.len(), 1);
        assert_eq!(derive_price(&ticker, Symbol::Kub), Some(61.5));
    }

    #[test]
    fn null_fields_count_as_missing() {
        let ticker = parse_ticker(json!({
            "THB_UNI": { "bid": null, "ask": 300.0, "last": 290.0 }
        }))
        .unwrap();

        assert_eq!(derive_price(&ticker, Symbol::Uni), Some(290.0));
    }

    #[test]
    fn empty_object_is_an_empty_ticker() {
        assert!(parse_ticker(json!({})).unwrap().is_empty());
    }

    #[test]
    fn non_object_body_is_malformed() {
        for body in [json!([1, 2, 3]), json!(null), json!("ticker"), json!(42)] {
            let err = parse_ticker(body).unwrap_err();
            assert!(matches!(err, CoreError::MalformedFeed(_)), "got {err:?}");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// BitkubProvider
// ═══════════════════════════════════════════════════════════════════

mod bitkub {
    use super::*;

    #[test]
    fn defaults_to_public_endpoint() {
        let provider = BitkubProvider::new();
        assert_eq!(provider.name(), "Bitkub");
        assert_eq!(provider.url(), DEFAULT_TICKER_URL);
    }

    #[test]
    fn custom_url() {
        let provider = BitkubProvider::with_url("http://localhost:9/ticker");
        assert_eq!(provider.url(), "http://localhost:9/ticker");
    }

    #[tokio::test]
    async fn fetches_and_parses_ticker() {
        let url = serve_once(
            "200 OK",
            r#"{"THB_KUB":{"bid":60.0,"ask":62.0,"last":59.0},"THB_UNI":{"last":280.0}}"#,
        )
        .await;
        let provider = BitkubProvider::with_url(url);

        let ticker = provider.fetch_ticker().await.unwrap();
        assert_eq!(derive_price(&ticker, Symbol::Kub), Some(61.0));
        assert_eq!(derive_price(&ticker, Symbol::Uni), Some(280.0));
    }

    #[tokio::test]
    async fn http_error_status_is_api_error() {
        let url = serve_once("503 Service Unavailable", r#"{"error":"busy"}"#).await;
        let provider = BitkubProvider::with_url(url);

        let err = provider.fetch_ticker().await.unwrap_err();
        match err {
            CoreError::Api { provider, message } => {
                assert_eq!(provider, "Bitkub");
                assert!(message.contains("503"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let url = serve_once("200 OK", "<html>maintenance</html>").await;
        let provider = BitkubProvider::with_url(url);

        let err = provider.fetch_ticker().await.unwrap_err();
        assert!(matches!(err, CoreError::MalformedFeed(_)), "got {err:?}");
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn array_body_is_malformed() {
        let url = serve_once("200 OK", "[]").await;
        let provider = BitkubProvider::with_url(url);

        let err = provider.fetch_ticker().await.unwrap_err();
        assert!(matches!(err, CoreError::MalformedFeed(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = BitkubProvider::with_url(format!("http://{addr}/ticker"));
        let err = provider.fetch_ticker().await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)), "got {err:?}");
    }
}

//! `sheethook health`: query a running instance.
//!
//! Sends `GET /health` and prints either a short summary or the raw
//! JSON body.

use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::SheethookError;
use crate::health::HealthResponse;

pub async fn execute(args: HealthArgs) -> Result<(), SheethookError> {
    let url = format!("{}/health", args.url.trim_end_matches('/'));
    let uri: hyper::Uri = url
        .parse()
        .map_err(|e: hyper::http::uri::InvalidUri| SheethookError::UriParse {
            source: Box::new(e),
        })?;

    let connector = hyper_util::client::legacy::connect::HttpConnector::new();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let req = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| SheethookError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(std::time::Duration::from_secs(10), client.request(req))
        .await
        .map_err(|_| SheethookError::HttpRequest {
            source: "health check timed out after 10s".into(),
        })?
        .map_err(|e| SheethookError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| SheethookError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if !status.is_success() {
        return Err(SheethookError::HealthCheckFailed(status));
    }

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    match serde_json::from_slice::<HealthResponse>(&body) {
        Ok(health) => print!("{}", summary(&args.url, &health)),
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

fn summary(url: &str, health: &HealthResponse) -> String {
    let stats = &health.stats;
    let mut out = format!("\u{2713} sheethook is healthy ({url})\n");
    out.push_str(&format!(
        "  uptime:         {}\n",
        format_uptime(health.uptime_seconds)
    ));
    out.push_str(&format!("  config source:  {}\n", health.config.source));
    out.push_str(&format!(
        "  config version: {} (loaded {}s ago)\n",
        health.config.version, health.config.loaded_ago_seconds
    ));
    out.push_str(&format!(
        "  tabs:           {} mapped, triggers {}\n",
        health.config.tabs,
        if health.config.triggers_enforced {
            "enforced"
        } else {
            "not enforced"
        }
    ));
    out.push_str(&format!(
        "  submissions:    {} delivered, {} failed, {} not configured\n",
        stats.submissions_delivered, stats.submissions_failed, stats.submissions_not_configured
    ));
    out
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{ConfigHealth, StatsResponse};

    #[test]
    fn uptime_is_compact() {
        assert_eq!(format_uptime(42), "42s");
        assert_eq!(format_uptime(125), "2m 5s");
        assert_eq!(format_uptime(3725), "1h 2m 5s");
    }

    #[test]
    fn summary_lists_submission_counts() {
        let health = HealthResponse {
            status: "healthy".into(),
            version: "0.1.0".into(),
            uptime_seconds: 61,
            config: ConfigHealth {
                source: "yaml".into(),
                version: "abcd1234".into(),
                loaded_ago_seconds: 61,
                tabs: 2,
                triggers_enforced: false,
            },
            stats: StatsResponse {
                submissions_delivered: 5,
                submissions_failed: 1,
                submissions_not_configured: 3,
            },
        };
        let text = summary("http://localhost:3000", &health);
        assert!(text.contains("2 mapped, triggers not enforced"));
        assert!(text.contains("5 delivered, 1 failed, 3 not configured"));
        assert!(text.contains("1m 1s"));
    }
}

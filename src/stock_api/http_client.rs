use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};

static HTTP_CLIENT: OnceCell<Mutex<reqwest::Client>> = OnceCell::const_new();

fn build_client() -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        .timeout(Duration::from_secs(20))
        .build()
        .map_err(|e| format!("Client error: {}", e))
}

pub async fn http_client() -> Result<reqwest::Client, String> {
    let cell = HTTP_CLIENT
        .get_or_try_init(|| async { build_client().map(Mutex::new) })
        .await?;
    Ok(cell.lock().await.clone())
}

// Replace the shared client after a dead-connection error so stale pooled
// sockets are not reused.
pub async fn reset_http_client() {
    if let Some(cell) = HTTP_CLIENT.get() {
        if let Ok(fresh) = build_client() {
            *cell.lock().await = fresh;
        }
    }
}

pub fn is_connection_error(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("connection reset")
        || message.contains("connection closed")
        || message.contains("connection refused")
        || message.contains("broken pipe")
        || message.contains("incomplete message")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors_are_recognized() {
        assert!(is_connection_error("Network error: Connection reset by peer"));
        assert!(is_connection_error("error sending request: broken pipe"));
        assert!(!is_connection_error("API error: 404 Not Found"));
    }
}

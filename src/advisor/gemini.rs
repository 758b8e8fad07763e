//! Gemini API連携
//!
//! generateContent エンドポイントへテキストのみのリクエストを1回送る。
//! リトライはしない。

use super::AdvisoryClient;
use crate::config::Config;
use crate::error::{InspectionAiError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: &str, timeout: Duration) -> Result<Self> {
        Self::with_base_url(GEMINI_API_BASE_URL, api_key, model, timeout)
    }

    /// 接続先を指定して生成（テスト・プロキシ用）
    pub fn with_base_url(
        base_url: &str,
        api_key: String,
        model: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InspectionAiError::ApiCall(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            api_key,
        })
    }

    /// 設定ファイル・環境変数から生成
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.get_api_key()?,
            &config.model,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AdvisoryClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(endpoint = %self.endpoint, "calling Gemini generateContent");
        let resp = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| InspectionAiError::ApiCall(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InspectionAiError::ApiCall(format!(
                "API error {}: {}",
                status.as_u16(),
                body
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| InspectionAiError::ApiCall(e.to_string()))?;
        parse_response_text(&body)
    }
}

/// レスポンスJSONから生成テキストを取り出す
///
/// 先頭候補の全パートを連結する。候補なしは空文字（呼び出し側で代替テキストに置換）。
fn parse_response_text(body: &str) -> Result<String> {
    let response: GeminiResponse =
        serde_json::from_str(body).map_err(|e| InspectionAiError::ApiParse(e.to_string()))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: "考评目标：A座" }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "考评目标：A座");
    }

    #[test]
    fn test_endpoint_from_model() {
        let client = GeminiClient::with_base_url(
            "http://localhost:8080/v1beta/",
            "key".to_string(),
            "gemini-3-flash-preview",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let body = r###"{
            "candidates": [
                {"content": {"parts": [{"text": "## 整体评价\n"}, {"text": "良好"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"###;
        assert_eq!(parse_response_text(body).unwrap(), "## 整体评价\n良好");
    }

    #[test]
    fn test_parse_response_without_candidates() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert_eq!(parse_response_text(body).unwrap(), "");
    }

    #[test]
    fn test_parse_response_invalid_json() {
        let result = parse_response_text("<html>502</html>");
        assert!(matches!(result, Err(InspectionAiError::ApiParse(_))));
    }
}

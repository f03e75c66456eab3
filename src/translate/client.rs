use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use super::interface::{TranslateError, TranslationRequest, TranslationResult, Translator};
use crate::language::Lang;

/// Client for the public `translate_a/single` endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
}

impl GoogleTranslateClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Translate text with a single GET request
    ///
    /// Failures are logged here with their cause before being returned, so
    /// callers only need to decide what the user sees.
    pub async fn translate_text(
        &self,
        text: &str,
        source: Lang,
        target: Lang,
    ) -> Result<String, TranslateError> {
        debug!("Translating {} chars: {} -> {}", text.chars().count(), source, target);

        match self.fetch(text, source, target).await {
            Ok(translated) => Ok(translated),
            Err(e) => {
                error!("Translation {} -> {} failed: {}", source, target, e);
                Err(e)
            }
        }
    }

    async fn fetch(&self, text: &str, source: Lang, target: Lang) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let json: Value = serde_json::from_str(&body)
            .map_err(|e| TranslateError::Malformed(format!("invalid JSON: {}", e)))?;

        extract_translation(&json)
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        let text = self
            .translate_text(&request.text, request.source_lang, request.target_lang)
            .await?;
        Ok(TranslationResult { text })
    }
}

/// Concatenate the translated fragments of a `[[[fragment, original, ...], ...], ...]` body
fn extract_translation(json: &Value) -> Result<String, TranslateError> {
    let root = json
        .as_array()
        .ok_or_else(|| TranslateError::Malformed("top level is not an array".to_string()))?;

    let segments = match root.first() {
        None | Some(Value::Null) => return Err(TranslateError::Empty),
        Some(Value::Array(segments)) => segments,
        Some(other) => {
            return Err(TranslateError::Malformed(format!(
                "expected segment list, found {}",
                other
            )))
        }
    };

    let mut translated = String::new();
    for segment in segments {
        let fragment = segment
            .as_array()
            .ok_or_else(|| TranslateError::Malformed(format!("segment is not an array: {}", segment)))?
            .first();

        match fragment {
            Some(Value::String(part)) => translated.push_str(part),
            None | Some(Value::Null) => {}
            Some(other) => {
                return Err(TranslateError::Malformed(format!(
                    "fragment is not a string: {}",
                    other
                )))
            }
        }
    }

    if translated.is_empty() {
        return Err(TranslateError::Empty);
    }

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint(server: &MockServer) -> String {
        format!("{}/translate_a/single", server.uri())
    }

    #[test]
    fn extract_joins_fragments_in_order() {
        let body = json!([
            [
                ["Hello, ", "你好，", null, null, 10],
                ["world.", "世界。", null, null, 10]
            ],
            null,
            "zh-CN"
        ]);
        assert_eq!(extract_translation(&body).unwrap(), "Hello, world.");
    }

    #[test]
    fn extract_skips_null_fragments() {
        let body = json!([[["foo", "x"], [null, null, "pinyin"], ["bar", "y"]]]);
        assert_eq!(extract_translation(&body).unwrap(), "foobar");
    }

    #[test]
    fn extract_rejects_unexpected_shapes() {
        assert!(matches!(
            extract_translation(&json!({"sentences": []})),
            Err(TranslateError::Malformed(_))
        ));
        assert!(matches!(
            extract_translation(&json!(["text"])),
            Err(TranslateError::Malformed(_))
        ));
        assert!(matches!(
            extract_translation(&json!([["text"]])),
            Err(TranslateError::Malformed(_))
        ));
        assert!(matches!(
            extract_translation(&json!([[[42]]])),
            Err(TranslateError::Malformed(_))
        ));
    }

    #[test]
    fn extract_treats_missing_text_as_empty() {
        assert!(matches!(extract_translation(&json!([])), Err(TranslateError::Empty)));
        assert!(matches!(
            extract_translation(&json!([null, null, "en"])),
            Err(TranslateError::Empty)
        ));
        assert!(matches!(extract_translation(&json!([[]])), Err(TranslateError::Empty)));
    }

    #[tokio::test]
    async fn sends_language_pair_and_text_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "zh-CN"))
            .and(query_param("tl", "en"))
            .and(query_param("dt", "t"))
            .and(query_param("q", "你好世界"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([[["Hello World", "你好世界"]]])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleTranslateClient::new(endpoint(&server));
        let result = client
            .translate(&TranslationRequest {
                text: "你好世界".to_string(),
                source_lang: Lang::ZhCn,
                target_lang: Lang::En,
            })
            .await
            .unwrap();

        assert_eq!(result.text, "Hello World");
    }

    #[tokio::test]
    async fn server_error_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleTranslateClient::new(endpoint(&server));
        let err = client
            .translate_text("hello", Lang::En, Lang::ZhCn)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::Status(500)));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
            .mount(&server)
            .await;

        let client = GoogleTranslateClient::new(endpoint(&server));
        let err = client
            .translate_text("hello", Lang::En, Lang::ZhCn)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::Malformed(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_failure() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let client = GoogleTranslateClient::new(format!("http://127.0.0.1:{}/translate_a/single", port));
        let err = client
            .translate_text("hello", Lang::En, Lang::ZhCn)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::Request(_)));
    }
}

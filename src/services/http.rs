// ============================================================================
// HTTP - Transporte HTTP abstracto (gloo-net en el navegador)
// ============================================================================
// Los servicios hablan con `HttpClient`; en los tests se sustituye por un fake
// que graba las URLs pedidas y devuelve respuestas programadas.
// ============================================================================

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::errors::FetchError;

/// Respuesta ya leída (status + body como texto)
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: String::new(),
            body: body.into(),
        }
    }

    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Falla con `FetchError::Status` si no es 2xx
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.ok() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                status: self.status,
                status_text: self.status_text,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Transporte HTTP. Un solo hilo: los futures no son `Send`.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// GET con `Authorization: Bearer <token>` opcional
    async fn get(&self, url: &str, bearer: Option<&str>) -> Result<HttpResponse, FetchError>;

    /// POST con body JSON
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, FetchError>;
}

/// Cliente real basado en `fetch` del navegador
#[derive(Clone, Default)]
pub struct GlooHttpClient;

impl GlooHttpClient {
    pub fn new() -> Self {
        Self
    }

    async fn read(response: Response) -> Result<HttpResponse, FetchError> {
        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Error leyendo body: {}", e)))?;
        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}

impl HttpClient for GlooHttpClient {
    async fn get(&self, url: &str, bearer: Option<&str>) -> Result<HttpResponse, FetchError> {
        let mut request = Request::get(url).header("Accept", "application/json");
        if let Some(token) = bearer {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, FetchError> {
        let response = Request::post(url)
            .json(body)
            .map_err(|e| FetchError::Network(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Self::read(response).await
    }
}

/// Fake de transporte para tests: respuestas por URL y registro de llamadas
#[cfg(test)]
pub mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCall {
        pub method: &'static str,
        pub url: String,
        pub bearer: Option<String>,
        pub body: Option<serde_json::Value>,
    }

    #[derive(Clone, Default)]
    pub struct FakeHttpClient {
        responses: Rc<RefCell<HashMap<String, Result<HttpResponse, FetchError>>>>,
        calls: Rc<RefCell<Vec<RecordedCall>>>,
    }

    impl FakeHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, url: &str, status: u16, body: &str) -> &Self {
            self.responses
                .borrow_mut()
                .insert(url.to_string(), Ok(HttpResponse::new(status, body)));
            self
        }

        pub fn fail(&self, url: &str, error: FetchError) -> &Self {
            self.responses.borrow_mut().insert(url.to_string(), Err(error));
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.borrow().clone()
        }

        pub fn urls(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|c| c.url.clone()).collect()
        }

        fn answer(&self, url: &str) -> Result<HttpResponse, FetchError> {
            self.responses
                .borrow()
                .get(url)
                .cloned()
                .unwrap_or_else(|| Ok(HttpResponse::new(404, "")))
        }
    }

    impl HttpClient for FakeHttpClient {
        async fn get(&self, url: &str, bearer: Option<&str>) -> Result<HttpResponse, FetchError> {
            self.calls.borrow_mut().push(RecordedCall {
                method: "GET",
                url: url.to_string(),
                bearer: bearer.map(str::to_string),
                body: None,
            });
            self.answer(url)
        }

        async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, FetchError> {
            self.calls.borrow_mut().push(RecordedCall {
                method: "POST",
                url: url.to_string(),
                bearer: None,
                body: Some(body.clone()),
            });
            self.answer(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_for_status_keeps_2xx() {
        assert!(HttpResponse::new(204, "").error_for_status().is_ok());
        let err = HttpResponse::new(500, "boom").error_for_status().unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[test]
    fn json_reports_malformed_body() {
        let resp = HttpResponse::new(200, "<html>");
        let parsed: Result<serde_json::Value, _> = resp.json();
        assert!(matches!(parsed, Err(FetchError::Malformed(_))));
    }
}

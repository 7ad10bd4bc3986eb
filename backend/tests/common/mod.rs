#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use glucoscope::{
    app,
    auth::{PasswordService, TokenService},
    database,
    state::AppState,
};
use glucoscope_adapters::{
    AdapterError, Classification, Classifier, FeatureVector, LogisticModel, TextGenerator,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret";

/// Logistic model with all-zero weights: every input scores exactly 0.5.
pub const FLAT_MODEL: &str = r#"{
    "feature_names": ["Pregnancies", "Glucose", "BloodPressure", "Insulin", "BMI", "DiabetesPedigreeFunction", "Age"],
    "mean": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    "scale": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    "coefficients": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    "intercept": 0.0
}"#;

pub struct FixedClassifier(pub Classification);

impl Classifier for FixedClassifier {
    fn predict(&self, _: &FeatureVector) -> Result<Classification, AdapterError> {
        Ok(self.0)
    }
}

pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn predict(&self, _: &FeatureVector) -> Result<Classification, AdapterError> {
        Err(AdapterError::Inference("model unavailable".to_string()))
    }
}

/// Echoes the prompt, then appends a canned completion.
pub struct CannedGenerator(pub &'static str);

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        Ok(format!("{prompt}{}", self.0))
    }
}

pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _: &str) -> Result<String, AdapterError> {
        Err(AdapterError::Upstream {
            status: 500,
            body: "boom".to_string(),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub tokens: TokenService,
}

pub async fn spawn_with(
    classifier: Arc<dyn Classifier>,
    generator: Arc<dyn TextGenerator>,
) -> TestApp {
    let pool = database::connect("sqlite::memory:").await.unwrap();
    let tokens = TokenService::new(JWT_SECRET, 60);
    let state = AppState::new(
        pool,
        PasswordService::with_params(1024, 1, 1).unwrap(),
        tokens.clone(),
        classifier,
        generator,
    );

    TestApp {
        router: app(state),
        tokens,
    }
}

pub async fn spawn() -> TestApp {
    spawn_with(
        Arc::new(FixedClassifier(Classification {
            class: 0,
            probability: 0.2345,
        })),
        Arc::new(CannedGenerator("\n- Walk daily\n- Limit sugary drinks\n")),
    )
    .await
}

pub async fn spawn_with_model(raw: &str) -> TestApp {
    spawn_with(
        Arc::new(LogisticModel::from_json(raw).unwrap()),
        Arc::new(CannedGenerator("")),
    )
    .await
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Reply {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Reply {
            status,
            headers,
            body,
        }
    }

    pub async fn json(&self, method: Method, uri: &str, token: Option<&str>, body: Value) -> Reply {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Sends an unchecked body, for payloads `json` cannot express.
    pub async fn raw(&self, uri: &str, content_type: &str, body: &str) -> Reply {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Reply {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Reply {
        self.json(
            Method::POST,
            "/register",
            None,
            serde_json::json!({ "username": username, "email": email, "password": password }),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Reply {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={username}&password={password}")))
            .unwrap();

        self.send(request).await
    }

    /// Registers and logs in, returning the bearer token.
    pub async fn signed_in(&self, username: &str, email: &str, password: &str) -> String {
        assert_eq!(
            self.register(username, email, password).await.status,
            StatusCode::CREATED
        );
        let reply = self.login(username, password).await;
        assert_eq!(reply.status, StatusCode::OK);
        reply.body["access_token"].as_str().unwrap().to_string()
    }
}

use fake::{
    Fake,
    faker::{
        internet::en::{Password, SafeEmail, Username},
        name::en::Name,
    },
};
use reqwest::multipart::{Form, Part};
use secrecy::Secret;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use vidtube_adapters::{
    auth::{JwtTokenIssuer, TokenConfig},
    config::test,
    http::AppState,
    media::InMemoryMediaStore,
    persistence::HashMapUserStore,
};
use vidtube_core::UserId;
use vidtube_service::AppService;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub user_store: HashMapUserStore,
    pub media_store: InMemoryMediaStore,
}

#[derive(Debug, Clone)]
pub struct TestUser {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl TestUser {
    pub fn random() -> Self {
        let username: String = Username().fake();
        let suffix: u32 = (1000..9999).fake();
        Self {
            full_name: Name().fake(),
            email: SafeEmail().fake(),
            username: format!("{username}{suffix}"),
            password: Password(10..20).fake(),
        }
    }

    /// Registration form with an avatar and, optionally, a cover image.
    pub fn form(&self, cover_image: Option<&str>) -> Form {
        let form = Form::new()
            .text("fullName", self.full_name.clone())
            .text("email", self.email.clone())
            .text("username", self.username.clone())
            .text("password", self.password.clone())
            .part("avatar", image_part("avatar.png"));

        match cover_image {
            Some(file_name) => form.part("coverImage", image_part(file_name)),
            None => form,
        }
    }
}

pub fn image_part(file_name: &str) -> Part {
    Part::bytes(vec![0x89, b'P', b'N', b'G', 1, 2, 3, 4]).file_name(file_name.to_string())
}

impl TestApp {
    pub async fn new() -> Self {
        let user_store = HashMapUserStore::new();
        let media_store = InMemoryMediaStore::new();

        let token_issuer = JwtTokenIssuer::new(
            TokenConfig {
                secret: Secret::new("test-access-secret".to_string()),
                time_to_live: 900,
            },
            TokenConfig {
                secret: Secret::new("test-refresh-secret".to_string()),
                time_to_live: 864_000,
            },
        );

        let state = AppState::new(user_store.clone(), media_store.clone(), token_issuer, false);

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(AppService::new(state).run_standalone(listener, None));

        let http_client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build http client");

        Self {
            address,
            http_client,
            user_store,
            media_store,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1/users{path}", self.address)
    }

    pub async fn register(&self, form: Form) -> reqwest::Response {
        self.http_client
            .post(self.url("/register"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login(&self, body: &Value) -> reqwest::Response {
        self.http_client
            .post(self.url("/login"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_refresh(&self) -> reqwest::Response {
        self.http_client
            .post(self.url("/refresh-token"))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.http_client
            .post(self.url("/logout"))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers and logs in a fresh user; the client then holds its cookies.
    pub async fn signed_in_user(&self) -> (TestUser, UserId, Value) {
        let user = TestUser::random();
        let response = self.register(user.form(None)).await;
        assert_eq!(response.status().as_u16(), 201);

        let login = self
            .post_login(&json!({ "email": user.email, "password": user.password }))
            .await;
        assert_eq!(login.status().as_u16(), 200);

        let body: Value = login.json().await.unwrap();
        let id = body["data"]["user"]["id"]
            .as_str()
            .unwrap()
            .parse::<UserId>()
            .unwrap();
        (user, id, body)
    }
}

//! Client layer: orchestrates session acquisition, transport calls, and
//! token encoding. Maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    BrowserIdentity, Credentials, SendVerificationCode, ValidationError, VerificationOutcome,
    VerifyCode, WebSession, validate_phone_number,
};
use crate::transport;

const DEFAULT_ORIGIN: &str = "https://www.digits.com";
const EMBED_PATH: &str = "/embed";
const LOGIN_PATH: &str = "/sdk/login";
const CHALLENGE_PATH: &str = "/sdk/challenge";

const SESSION_FAILURE_MESSAGE: &str = "Unable to get web session";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
    set_cookie: Vec<String>,
}

trait HttpTransport: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    fn post_form<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

async fn read_response(response: reqwest::Response) -> Result<HttpResponse, BoxError> {
    let status = response.status().as_u16();
    let set_cookie = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok().map(str::to_owned))
        .collect();
    let body = response.text().await?;
    Ok(HttpResponse {
        status,
        body,
        set_cookie,
    })
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            read_response(response).await
        })
    }

    fn post_form<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut request = self.client.post(url);
            for (name, value) in &headers {
                request = request.header(name.as_str(), value.as_str());
            }
            let response = request.form(&params).send().await?;
            read_response(response).await
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`DigitsClient`].
///
/// Every rejection carries a human-readable message (the `Display` impl) and
/// a numeric status code via [`DigitsError::status_code`]. No variant is
/// retried internally; a single failed attempt surfaces immediately.
pub enum DigitsError {
    /// Consumer key or host missing from the client configuration (500).
    #[error("Please configure consumerKey and host")]
    Configuration,

    /// Malformed or missing caller input (400).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The embed page was unreachable or its session markup was absent.
    #[error("{message}")]
    Session { message: String, status: u16 },

    /// Non-200 response from a provider POST; the message is the raw body.
    #[error("{body}")]
    Provider { status: u16, body: String },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// A provider response body (or token claims) could not be decoded (500).
    #[error("Unable to parse response")]
    Parse(#[source] BoxError),

    /// A 200-class challenge response matching neither the success nor the
    /// error shape.
    #[error("Unknown error in response")]
    UnknownResponse { status: u16 },
}

impl DigitsError {
    /// HTTP-style status code carried by the rejection.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Configuration | Self::Transport(_) | Self::Parse(_) => 500,
            Self::Validation(_) => 400,
            Self::Session { status, .. } => *status,
            Self::Provider { status, .. } => *status,
            Self::UnknownResponse { status } => *status,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`DigitsClient`].
///
/// Use this when you need to point the client at a different origin (for
/// tests or proxies), name the session cookie explicitly, or set a timeout.
pub struct DigitsClientBuilder {
    credentials: Credentials,
    origin: String,
    session_cookie_name: Option<String>,
    timeout: Option<Duration>,
}

impl DigitsClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            origin: DEFAULT_ORIGIN.to_owned(),
            session_cookie_name: None,
            timeout: None,
        }
    }

    /// Override the provider origin. All three endpoints (embed, login,
    /// challenge) derive from it.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into().trim_end_matches('/').to_owned();
        self
    }

    /// Locate the session cookie by name instead of relying on the
    /// provider's cookie ordering.
    pub fn session_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session_cookie_name = Some(name.into());
        self
    }

    /// Set an HTTP client timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a [`DigitsClient`].
    pub fn build(self) -> Result<DigitsClient, DigitsError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| DigitsError::Transport(Box::new(err)))?;

        Ok(DigitsClient {
            credentials: self.credentials,
            origin: self.origin,
            session_cookie_name: self.session_cookie_name,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level client for the two-step phone verification flow.
///
/// Each public operation is an independent sequential pipeline: validate
/// input, acquire a fresh web session, issue one provider POST, interpret
/// the response. No session state is kept between calls; the registration
/// token returned by [`DigitsClient::send_verification_code`] is the only
/// thing carried over, and the caller holds it.
pub struct DigitsClient {
    credentials: Credentials,
    origin: String,
    session_cookie_name: Option<String>,
    http: Arc<dyn HttpTransport>,
}

impl DigitsClient {
    /// Create a client against the default provider origin.
    ///
    /// For more customization, use [`DigitsClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            origin: DEFAULT_ORIGIN.to_owned(),
            session_cookie_name: None,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> DigitsClientBuilder {
        DigitsClientBuilder::new(credentials)
    }

    /// Request a verification code be delivered to the given phone and
    /// return an opaque registration token to resume with later.
    ///
    /// Validation order (first failure wins): configured credentials (500),
    /// identity headers (400), presence of both phone fields (400),
    /// structural phone validity for the country (400). No network access
    /// happens before validation passes.
    ///
    /// Errors:
    /// - [`DigitsError::Session`] when the embed page does not yield a
    ///   session,
    /// - [`DigitsError::Provider`] for a non-200 login response,
    /// - [`DigitsError::Parse`] when the login body is not the expected JSON.
    pub async fn send_verification_code(
        &self,
        request: SendVerificationCode,
    ) -> Result<String, DigitsError> {
        self.ensure_configured()?;
        ensure_identity(&request.identity)?;
        if request.phone_number.is_empty() || request.country_code.is_empty() {
            return Err(ValidationError::MissingPhoneInput.into());
        }
        validate_phone_number(&request.country_code, &request.phone_number)?;

        let session = self.acquire_session().await?;
        let referer = self.embed_url();
        let headers = transport::browser_headers(&session, &referer, &request.identity);
        let params = transport::encode_login_form(
            &session,
            request.method,
            &request.country_code,
            &request.phone_number,
        );

        let response = self
            .http
            .post_form(&self.login_url(), headers, params)
            .await
            .map_err(DigitsError::Transport)?;

        if response.status != 200 {
            return Err(DigitsError::Provider {
                status: response.status,
                body: response.body,
            });
        }

        let claims = transport::decode_login_json_response(&response.body, &request.phone_number)
            .map_err(|err| DigitsError::Parse(Box::new(err)))?;
        transport::encode_continuation_token(&claims)
            .map_err(|err| DigitsError::Parse(Box::new(err)))
    }

    /// Verify a user-entered code against a registration token.
    ///
    /// Validation order: configured credentials (500), identity headers
    /// (400), presence of token and code (400), token is valid base64 (400).
    /// The challenge body is parsed regardless of HTTP status: 200 yields
    /// [`VerificationOutcome::Verified`], an `errors` body yields
    /// [`VerificationOutcome::Rejected`], anything else is
    /// [`DigitsError::UnknownResponse`].
    pub async fn verify_code(
        &self,
        request: VerifyCode,
    ) -> Result<VerificationOutcome, DigitsError> {
        self.ensure_configured()?;
        ensure_identity(&request.identity)?;
        if request.registration_token.is_empty() || request.code.is_empty() {
            return Err(ValidationError::MissingVerifyInput.into());
        }
        let token_bytes = transport::decode_token_bytes(&request.registration_token)
            .map_err(|_| ValidationError::InvalidRegistrationToken)?;
        let claims = transport::decode_continuation_claims(&token_bytes)
            .map_err(|err| DigitsError::Parse(Box::new(err)))?;

        let session = self.acquire_session().await?;
        let referer = self.embed_url();
        let headers = transport::browser_headers(&session, &referer, &request.identity);
        let params = transport::encode_challenge_form(&session, &claims, &request.code);

        let response = self
            .http
            .post_form(&self.challenge_url(), headers, params)
            .await
            .map_err(DigitsError::Transport)?;

        let parsed = transport::decode_challenge_json_response(&response.body)
            .map_err(|err| DigitsError::Parse(Box::new(err)))?;

        if response.status == 200 {
            return Ok(VerificationOutcome::Verified {
                success: parsed.authorized,
                phone_number: claims.phone_number,
            });
        }
        if let Some(errors) = parsed.errors {
            return Ok(VerificationOutcome::Rejected {
                phone: claims.phone_number,
                errors,
            });
        }
        Err(DigitsError::UnknownResponse {
            status: response.status,
        })
    }

    /// Fetch the embed page and scrape a fresh [`WebSession`] from it.
    async fn acquire_session(&self) -> Result<WebSession, DigitsError> {
        let embed_url = self.embed_url();
        let response = self
            .http
            .get(&embed_url)
            .await
            .map_err(DigitsError::Transport)?;

        if response.status != 200 {
            // A page without a usable `.message` element is indistinguishable
            // from any other unparseable embed page: generic failure, 500.
            return Err(
                match transport::extract_failure_message(&response.body)
                    .filter(|message| !message.is_empty())
                {
                    Some(message) => DigitsError::Session {
                        message,
                        status: response.status,
                    },
                    None => DigitsError::Session {
                        message: SESSION_FAILURE_MESSAGE.to_owned(),
                        status: 500,
                    },
                },
            );
        }

        let cookie = transport::extract_session_cookie(
            &response.set_cookie,
            self.session_cookie_name.as_deref(),
        );
        let auth_token = transport::extract_auth_token(&response.body);
        match (cookie, auth_token) {
            (Some(cookie), Some(auth_token)) => Ok(WebSession { cookie, auth_token }),
            _ => Err(DigitsError::Session {
                message: SESSION_FAILURE_MESSAGE.to_owned(),
                status: 500,
            }),
        }
    }

    fn ensure_configured(&self) -> Result<(), DigitsError> {
        if self.credentials.is_configured() {
            Ok(())
        } else {
            Err(DigitsError::Configuration)
        }
    }

    /// Embed URL parameterized by the credentials; also sent as the referer
    /// on both POSTs.
    fn embed_url(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("consumer_key", &self.credentials.consumer_key)
            .append_pair("host", &self.credentials.host)
            .finish();
        format!("{}{}?{}", self.origin, EMBED_PATH, query)
    }

    fn login_url(&self) -> String {
        format!("{}{}", self.origin, LOGIN_PATH)
    }

    fn challenge_url(&self) -> String {
        format!("{}{}", self.origin, CHALLENGE_PATH)
    }
}

fn ensure_identity(identity: &BrowserIdentity) -> Result<(), DigitsError> {
    if identity.is_complete() {
        Ok(())
    } else {
        Err(ValidationError::MissingBrowserIdentity.into())
    }
}

//! Request dispatcher
//!
//! Every endpoint wrapper funnels through [`Dispatcher`]. It sends the
//! request, normalizes the envelope, and reports the outcome: a success
//! toast for mutating calls, exactly one error toast for any failure, and a
//! login prompt when the backend says the session is gone. Nothing is
//! retried.

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use validator::Validate;

use crate::{
    constants::{
        ADMIN_NETWORK_ERROR_MESSAGE, LOGIN_REQUIRED_PREFIX, MALFORMED_ENVELOPE_MESSAGE,
        SUCCESS_MESSAGE,
    },
    envelope::{Envelope, EnvelopeMode, Normalized, normalize},
    error::{ClientError, ClientResult},
    notify::{Notifier, StoreDispatch, TracingNotifier, UiAction},
    params::QueryParams,
    transport::{ApiRequest, Transport, TransportError},
};

/// Decides whether a domain error message means the session expired
pub type SessionExpiryDetector = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Shared request dispatcher (cheap to clone)
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    store: Option<Arc<dyn StoreDispatch>>,
    mode: EnvelopeMode,
    session_expiry: Option<SessionExpiryDetector>,
    network_error_message: String,
    request_error_prefix: Option<String>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("mode", &self.inner.mode)
            .field("session_expiry", &self.inner.session_expiry.is_some())
            .field("network_error_message", &self.inner.network_error_message)
            .field("request_error_prefix", &self.inner.request_error_prefix)
            .finish()
    }
}

/// Builder for [`Dispatcher`]
pub struct DispatcherBuilder {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    store: Option<Arc<dyn StoreDispatch>>,
    mode: EnvelopeMode,
    session_expiry: Option<SessionExpiryDetector>,
    network_error_message: String,
    request_error_prefix: Option<String>,
}

impl DispatcherBuilder {
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(mut self, store: Arc<dyn StoreDispatch>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn mode(mut self, mode: EnvelopeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Custom session-expiry detector
    pub fn session_expiry<F>(mut self, detector: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.session_expiry = Some(Arc::new(detector));
        self
    }

    /// Treat messages starting with `Please login` as session expiry
    pub fn login_prompt_on_expiry(self) -> Self {
        self.session_expiry(|message| message.starts_with(LOGIN_REQUIRED_PREFIX))
    }

    pub fn network_error_message(mut self, message: impl Into<String>) -> Self {
        self.network_error_message = message.into();
        self
    }

    /// Text shown before the message of a request that never left the client
    pub fn request_error_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.request_error_prefix = Some(prefix.into());
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            inner: Arc::new(DispatcherInner {
                transport: self.transport,
                notifier: self.notifier,
                store: self.store,
                mode: self.mode,
                session_expiry: self.session_expiry,
                network_error_message: self.network_error_message,
                request_error_prefix: self.request_error_prefix,
            }),
        }
    }
}

impl Dispatcher {
    /// Start a dispatcher over `transport`.
    ///
    /// Defaults: strict envelopes, tracing notifier, no store, no session
    /// expiry detection.
    pub fn builder(transport: Arc<dyn Transport>) -> DispatcherBuilder {
        DispatcherBuilder {
            transport,
            notifier: Arc::new(TracingNotifier),
            store: None,
            mode: EnvelopeMode::Strict,
            session_expiry: None,
            network_error_message: ADMIN_NETWORK_ERROR_MESSAGE.to_string(),
            request_error_prefix: None,
        }
    }

    pub fn mode(&self) -> EnvelopeMode {
        self.inner.mode
    }

    /// Send one request and normalize the result.
    ///
    /// `Ok` carries the envelope as received (or as synthesized in compat
    /// mode). Every `Err` has already been reported to the notifier.
    pub async fn dispatch(&self, request: ApiRequest) -> ClientResult<Envelope> {
        self.run(request, Ok).await
    }

    /// Dispatch and decode `data` into `T`.
    ///
    /// Data that does not fit `T` fails the call: it gets the error toast
    /// and no success toast.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        self.run(request, Envelope::into_data).await
    }

    async fn run<T, F>(&self, request: ApiRequest, read: F) -> ClientResult<T>
    where
        F: FnOnce(Envelope) -> ClientResult<T>,
    {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            params = %request.params.to_json(),
            "dispatching request"
        );

        let outcome = match self.inner.transport.send(&request).await {
            Ok(raw) if raw.is_success() => self.read_body(raw.body),
            Ok(raw) => Err(ClientError::Http {
                status: raw.status,
                status_text: raw.status_text,
                payload: raw.body,
            }),
            Err(TransportError::NoResponse(detail)) => {
                tracing::debug!(path = %request.path, %detail, "no response");
                Err(ClientError::Network(self.inner.network_error_message.clone()))
            }
            Err(TransportError::Request(message)) => Err(ClientError::Request(message)),
        };

        match outcome.and_then(read) {
            Ok(value) => {
                if request.method != Method::GET {
                    self.inner.notifier.success(SUCCESS_MESSAGE);
                }
                Ok(value)
            }
            Err(err) => Err(self.fail(&request, err)),
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        params: QueryParams,
    ) -> ClientResult<T> {
        self.call(ApiRequest::get(path).params(params)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        params: QueryParams,
    ) -> ClientResult<T> {
        self.call(ApiRequest::delete(path).params(params)).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        body: &B,
    ) -> ClientResult<T> {
        self.with_body(Method::POST, path.into(), body).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        body: &B,
    ) -> ClientResult<T> {
        self.with_body(Method::PUT, path.into(), body).await
    }

    /// Send with an arbitrary method and a JSON body
    pub async fn with_body<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: String,
        body: &B,
    ) -> ClientResult<T> {
        let request = ApiRequest::new(method, path);
        match serde_json::to_value(body) {
            Ok(value) => self.call(request.json(value)).await,
            Err(e) => Err(self.fail(&request, ClientError::Request(e.to_string()))),
        }
    }

    /// Validate a request record before it is sent.
    ///
    /// A failure is reported like any other failed call.
    pub fn check<V: Validate>(&self, path: &str, record: &V) -> ClientResult<()> {
        record.validate().map_err(|errors| {
            self.fail(&ApiRequest::get(path), ClientError::from(errors))
        })
    }

    /// Turn a filter record into query parameters, reporting failures
    pub fn query_params<R: Serialize>(&self, path: &str, record: &R) -> ClientResult<QueryParams> {
        QueryParams::from_record(record).map_err(|err| self.fail(&ApiRequest::get(path), err))
    }

    fn read_body(&self, body: Option<Value>) -> ClientResult<Envelope> {
        match normalize(body.unwrap_or(Value::Null), self.inner.mode) {
            Normalized::Success(envelope) => Ok(envelope),
            Normalized::Failure { envelope, message } => Err(ClientError::Domain {
                code: envelope.error_code(),
                message,
                envelope,
            }),
            Normalized::Malformed(body) => {
                let envelope = Envelope {
                    error: Some(Value::String("malformed-response".to_string())),
                    data: body,
                };
                Err(ClientError::Domain {
                    code: envelope.error_code(),
                    message: MALFORMED_ENVELOPE_MESSAGE.to_string(),
                    envelope,
                })
            }
        }
    }

    /// Report a failure and hand it back
    fn fail(&self, request: &ApiRequest, err: ClientError) -> ClientError {
        let message = match (&err, &self.inner.request_error_prefix) {
            (ClientError::Request(detail), Some(prefix)) => format!("{}{}", prefix, detail),
            _ => err.notification_message(),
        };
        tracing::warn!(
            method = %request.method,
            path = %request.path,
            code = err.error_code(),
            %message,
            "request failed"
        );
        self.inner.notifier.error(&message);

        if let ClientError::Domain { message, .. } = &err {
            let expired = self
                .inner
                .session_expiry
                .as_ref()
                .is_some_and(|detect| detect(message));
            if expired {
                if let Some(store) = &self.inner.store {
                    store.dispatch(UiAction::show_login());
                }
            }
        }

        err
    }
}

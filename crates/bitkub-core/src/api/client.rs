//! Bitkub REST API client.
//!
//! Public market data is fetched unsigned. Private endpoints are signed with
//! HMAC-SHA256 over `timestamp + METHOD + path + (body | query)`, see
//! [`crate::signing`].

use super::clock::{Clock, SystemClock};
use super::query::gen_query_param;
use super::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::config::{BitkubConfig, DEFAULT_HOST};
use crate::signing::{to_payload_json, ApiCredentials, RequestSigner};
use crate::types::{CancelOrderRequest, OrderSide, OrderType, PlaceOrderRequest};
use crate::Result;
use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const TICKER_PATH: &str = "/api/market/ticker";
pub const BALANCES_PATH: &str = "/api/v3/market/balances";
pub const PLACE_BID_PATH: &str = "/api/v3/market/place-bid";
pub const PLACE_ASK_PATH: &str = "/api/v3/market/place-ask";
pub const ORDER_INFO_PATH: &str = "/api/v3/market/order-info";
pub const MY_OPEN_ORDERS_PATH: &str = "/api/v3/market/my-open-orders";
pub const CANCEL_ORDER_PATH: &str = "/api/v3/market/cancel-order";

/// Signed client for the Bitkub REST API.
///
/// Holds only immutable state, so one instance can be shared across tasks.
/// Every method returns the decoded JSON body as sent by the exchange,
/// including error bodies on non-2xx statuses.
pub struct BitkubClient {
    host: String,
    signer: RequestSigner,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
}

impl BitkubClient {
    /// Client for the default host with a `reqwest` transport.
    #[allow(clippy::result_large_err)]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        Self::from_config(&BitkubConfig::new(api_key, api_secret))
    }

    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &BitkubConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout(), config.connect_timeout())?;
        Ok(Self::with_transport(
            config.host.clone(),
            config.credentials(),
            Arc::new(transport),
        ))
    }

    /// Client over an explicit transport, using the system clock.
    pub fn with_transport(
        host: impl Into<String>,
        credentials: ApiCredentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let host = host.into();
        let host = if host.is_empty() {
            DEFAULT_HOST.to_string()
        } else {
            host.trim_end_matches('/').to_string()
        };

        Self {
            host,
            signer: RequestSigner::new(credentials),
            transport,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Hex HMAC-SHA256 of `payload` keyed by the API secret.
    #[allow(clippy::result_large_err)]
    pub fn gen_sign(&self, payload: &str) -> Result<String> {
        self.signer.gen_sign(payload)
    }

    /// Canonical query string (leading `?`) for `params`.
    pub fn gen_query_param(params: &[(&str, &str)]) -> String {
        gen_query_param(params)
    }

    /// Ticker for all symbols.
    pub async fn get_ticker(&self) -> Result<Value> {
        self.public_get(TICKER_PATH, &[]).await
    }

    /// Ticker for one symbol.
    pub async fn get_symbol_ticker(&self, symbol: &str) -> Result<Value> {
        self.public_get(TICKER_PATH, &[("sym", symbol)]).await
    }

    pub async fn get_balances(&self) -> Result<Value> {
        self.signed_post(BALANCES_PATH, None).await
    }

    /// Place a limit buy order.
    pub async fn create_buy_order(
        &self,
        symbol: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Value> {
        self.create_order(OrderSide::Buy, symbol, amount, price, OrderType::Limit)
            .await
    }

    /// Place a limit sell order.
    pub async fn create_sell_order(
        &self,
        symbol: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Value> {
        self.create_order(OrderSide::Sell, symbol, amount, price, OrderType::Limit)
            .await
    }

    /// Place an order on either side.
    ///
    /// Bids go to `place-bid`, asks to `place-ask`. For market orders the
    /// exchange ignores `price`.
    pub async fn create_order(
        &self,
        side: OrderSide,
        symbol: &str,
        amount: Decimal,
        price: Decimal,
        order_type: OrderType,
    ) -> Result<Value> {
        let path = match side {
            OrderSide::Buy => PLACE_BID_PATH,
            OrderSide::Sell => PLACE_ASK_PATH,
        };
        let body = to_payload_json(&PlaceOrderRequest {
            sym: symbol,
            amt: amount,
            rat: price,
            typ: order_type,
        })?;

        let response = self.signed_post(path, Some(body)).await?;
        info!(symbol, side = %side, "Order placement submitted");
        Ok(response)
    }

    pub async fn get_order_info(
        &self,
        symbol: &str,
        order_id: &str,
        side: OrderSide,
    ) -> Result<Value> {
        self.signed_get(
            ORDER_INFO_PATH,
            &[("sym", symbol), ("id", order_id), ("sd", side.as_str())],
        )
        .await
    }

    pub async fn get_my_open_order(&self, symbol: &str) -> Result<Value> {
        self.signed_get(MY_OPEN_ORDERS_PATH, &[("sym", symbol)]).await
    }

    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: &str,
        side: OrderSide,
    ) -> Result<Value> {
        let body = to_payload_json(&CancelOrderRequest {
            sym: symbol,
            id: order_id,
            sd: side,
        })?;

        let response = self.signed_post(CANCEL_ORDER_PATH, Some(body)).await?;
        info!(symbol, order_id, side = %side, "Order cancellation submitted");
        Ok(response)
    }

    async fn public_get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let query = gen_query_param(params);
        let request = HttpRequest::new(Method::GET, format!("{}{}{}", self.host, path, query));
        self.execute(request).await
    }

    /// The query string is built once and used for both URL and signature.
    async fn signed_get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let query = gen_query_param(params);
        let signed = self.signer.sign_request(
            self.clock.now_millis(),
            Method::GET.as_str(),
            path,
            &query,
        )?;

        let request = HttpRequest::new(Method::GET, format!("{}{}{}", self.host, path, query))
            .with_headers(self.signer.auth_headers(&signed));
        self.execute(request).await
    }

    /// `body` is signed and sent byte for byte; `None` signs an empty body.
    async fn signed_post(&self, path: &str, body: Option<String>) -> Result<Value> {
        let signed = self.signer.sign_request(
            self.clock.now_millis(),
            Method::POST.as_str(),
            path,
            body.as_deref().unwrap_or_default(),
        )?;

        let request = HttpRequest::new(Method::POST, format!("{}{}", self.host, path))
            .with_headers(self.signer.auth_headers(&signed))
            .with_body(body);
        self.execute(request).await
    }

    async fn execute(&self, request: HttpRequest) -> Result<Value> {
        let method = request.method.clone();
        let url = request.url.clone();
        debug!(method = %method, url = %url, "Sending Bitkub request");

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!(
                method = %method,
                url = %url,
                status = response.status,
                "Bitkub returned non-success status"
            );
        }

        response.json()
    }
}

impl std::fmt::Debug for BitkubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitkubClient")
            .field("host", &self.host)
            .field("credentials", self.signer.credentials())
            .finish_non_exhaustive()
    }
}

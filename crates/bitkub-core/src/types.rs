//! Request body types for the Bitkub market endpoints.
//!
//! Field declaration order is the wire order. The signature covers the body
//! bytes, so these structs must not be reordered.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Order side, as used by the `sd` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type, as used by the `typ` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Limit,
    Market,
}

/// Body of `place-bid` / `place-ask`.
///
/// `sym` is `{quote}_{base}`, e.g. `btc_thb`. `amt` and `rat` always
/// serialize as JSON strings (`"0.001"`), never as JSON numbers, so callers
/// holding text must parse it into a `Decimal` first. The exchange accepts
/// the string form; only the rendered bytes matter for the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceOrderRequest<'a> {
    pub sym: &'a str,
    pub amt: Decimal,
    pub rat: Decimal,
    pub typ: OrderType,
}

/// Body of `cancel-order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelOrderRequest<'a> {
    pub sym: &'a str,
    pub id: &'a str,
    pub sd: OrderSide,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::to_payload_json;

    #[test]
    fn test_place_order_field_order() {
        let body = PlaceOrderRequest {
            typ: OrderType::Limit,
            rat: Decimal::new(1_000_000, 0),
            amt: Decimal::new(1, 3),
            sym: "btc_thb",
        };

        assert_eq!(
            to_payload_json(&body).unwrap(),
            r#"{"sym": "btc_thb", "amt": "0.001", "rat": "1000000", "typ": "limit"}"#
        );
    }

    #[test]
    fn test_market_order_type() {
        let body = PlaceOrderRequest {
            sym: "eth_thb",
            amt: Decimal::new(250, 2),
            rat: Decimal::ZERO,
            typ: OrderType::Market,
        };

        assert_eq!(
            to_payload_json(&body).unwrap(),
            r#"{"sym": "eth_thb", "amt": "2.50", "rat": "0", "typ": "market"}"#
        );
    }

    #[test]
    fn test_cancel_order_field_order() {
        let body = CancelOrderRequest {
            sym: "btc_thb",
            id: "123",
            sd: OrderSide::Sell,
        };

        assert_eq!(
            to_payload_json(&body).unwrap(),
            r#"{"sym": "btc_thb", "id": "123", "sd": "sell"}"#
        );
    }

    #[test]
    fn test_order_side_display() {
        assert_eq!(OrderSide::Buy.to_string(), "buy");
        assert_eq!(OrderSide::Sell.as_str(), "sell");
    }
}

/*
 * Responsibility
 * - Orders の response DTO
 * - subtotal / total は core (totals) で計算した値を載せる
 * - Decimal の範囲を超える金額は変換エラー (500)
 */
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::AppError;
use crate::services::access::{Order, OrderLine, totals};

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub img_url: Option<String>,
    pub sub_total: Decimal,
}

fn out_of_range(order_id: i64) -> AppError {
    tracing::error!(order_id, "order amount exceeds decimal range");
    AppError::Internal
}

impl OrderItemResponse {
    fn from_line(line: &OrderLine) -> Option<Self> {
        Some(Self {
            product_id: line.product_id,
            name: line.name.clone(),
            price: line.unit_price,
            quantity: line.quantity,
            img_url: line.img_url.clone(),
            sub_total: totals::subtotal(line)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub client_id: i64,
    pub items: Vec<OrderItemResponse>,
    pub total: Decimal,
}

impl TryFrom<Order> for OrderResponse {
    type Error = AppError;

    fn try_from(order: Order) -> Result<Self, Self::Error> {
        let items = order
            .items
            .iter()
            .map(OrderItemResponse::from_line)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| out_of_range(order.id))?;
        let total = totals::total(&order.items).ok_or_else(|| out_of_range(order.id))?;

        Ok(Self {
            id: order.id,
            client_id: order.owning_identity_id,
            items,
            total,
        })
    }
}

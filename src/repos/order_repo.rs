/*
 * Responsibility
 * - tb_order / tb_order_item / tb_product の読み取り
 * - 読み取りは READ ONLY transaction で行う
 */
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;
use crate::services::access::{Order, OrderLine, OrderLookup};

#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub client_id: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct OrderItemRow {
    pub product_id: i64,
    pub name: String,
    pub img_url: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
}

impl From<OrderItemRow> for OrderLine {
    fn from(row: OrderItemRow) -> Self {
        OrderLine {
            product_id: row.product_id,
            name: row.name,
            img_url: row.img_url,
            unit_price: row.price,
            quantity: row.quantity,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrderRepo {
    pool: PgPool,
}

impl OrderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, order_id: i64) -> RepoResult<Option<Order>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;

        let order = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, client_id
            FROM tb_order
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(order) = order else {
            tx.commit().await?;
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT
                tb_product.id AS product_id,
                tb_product.name,
                tb_product.img_url,
                tb_order_item.price::numeric AS price,
                tb_order_item.quantity
            FROM tb_order_item
            INNER JOIN tb_product ON tb_product.id = tb_order_item.product_id
            WHERE tb_order_item.order_id = $1
            ORDER BY tb_product.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(Order {
            id: order.id,
            owning_identity_id: order.client_id,
            items: items.into_iter().map(OrderLine::from).collect(),
        }))
    }
}

#[async_trait]
impl OrderLookup for OrderRepo {
    async fn find_order(&self, order_id: i64) -> RepoResult<Option<Order>> {
        self.find_by_id(order_id).await
    }
}

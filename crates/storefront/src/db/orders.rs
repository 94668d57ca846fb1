//! Order repository for the storefront side: sequence-backed order numbers,
//! the transactional order insert, and confirmation-page lookups.

use sqlx::{PgPool, Postgres, Transaction};

use kinmel_core::{
    Money, Order, OrderDraft, OrderId, OrderItem, OrderItemId, OrderNumber, OrderStatus,
    PaymentMethod,
};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    order_number: OrderNumber,
    status: OrderStatus,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    customer_note: Option<String>,
    payment_method: PaymentMethod,
    payment_screenshot_url: Option<String>,
    subtotal: Money,
    total: Money,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            order_number: row.order_number,
            status: row.status,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            customer_note: row.customer_note,
            payment_method: row.payment_method,
            payment_screenshot_url: row.payment_screenshot_url,
            subtotal: row.subtotal,
            total: row.total,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: OrderItemId,
    order_id: OrderId,
    product_name: String,
    product_image: Option<String>,
    variant_label: Option<String>,
    quantity: i32,
    unit_price: Money,
    total_price: Money,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = RepositoryError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "order item {} has negative quantity {}",
                row.id, row.quantity
            ))
        })?;
        Ok(Self {
            id: row.id,
            order_id: row.order_id,
            product_name: row.product_name,
            product_image: row.product_image,
            variant_label: row.variant_label,
            quantity,
            unit_price: row.unit_price,
            total_price: row.total_price,
        })
    }
}

const ORDER_COLUMNS: &str = r"
    id, order_number, status, customer_name, customer_email, customer_phone,
    customer_note, payment_method, payment_screenshot_url, subtotal, total,
    created_at, updated_at
";

/// Repository for order writes and confirmation reads.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reserve the next order number from the database sequence. Falls
    /// back to a timestamp-derived number if the sequence yields no row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn next_order_number(&self) -> Result<OrderNumber, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT nextval('order_number_seq')")
            .fetch_optional(self.pool)
            .await?;

        Ok(match row {
            Some((seq,)) => OrderNumber::from_sequence(seq),
            None => OrderNumber::from_timestamp(chrono::Utc::now()),
        })
    }

    /// Insert an order and all its items in a single transaction. If any
    /// item insert fails, the whole order rolls back and nothing is visible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on an order number collision and
    /// `RepositoryError::Database` on any other failure.
    pub async fn create_with_items(&self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order = Self::insert_order(&mut tx, draft).await?;
        for item in &draft.items {
            let quantity = i32::try_from(item.quantity).map_err(|_| {
                RepositoryError::DataCorruption(format!(
                    "order item quantity {} exceeds storage range",
                    item.quantity
                ))
            })?;
            sqlx::query(
                "INSERT INTO order_item \
                 (order_id, product_name, product_image, variant_label, \
                  quantity, unit_price, total_price) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(order.id)
            .bind(&item.product_name)
            .bind(&item.product_image)
            .bind(&item.variant_label)
            .bind(quantity)
            .bind(item.unit_price)
            .bind(item.total_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    async fn insert_order(
        tx: &mut Transaction<'_, Postgres>,
        draft: &OrderDraft,
    ) -> Result<Order, RepositoryError> {
        let query = format!(
            "INSERT INTO \"order\" \
             (order_number, status, customer_name, customer_email, customer_phone, \
              customer_note, payment_method, payment_screenshot_url, subtotal, total) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(&draft.order_number)
            .bind(OrderStatus::Pending)
            .bind(&draft.customer.name)
            .bind(&draft.customer.email)
            .bind(&draft.customer.phone)
            .bind(&draft.customer_note)
            .bind(draft.payment_method)
            .bind(&draft.payment_screenshot_url)
            .bind(draft.subtotal)
            .bind(draft.total)
            .fetch_one(&mut **tx)
            .await
            .map_err(|err| match &err {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    RepositoryError::Conflict(format!(
                        "order number {} already exists",
                        draft.order_number
                    ))
                }
                _ => RepositoryError::Database(err),
            })?;

        Ok(row.into())
    }

    /// Look up an order by its public number, items included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails and
    /// `RepositoryError::DataCorruption` if a stored item is invalid.
    pub async fn get_by_number(
        &self,
        number: &OrderNumber,
    ) -> Result<Option<(Order, Vec<OrderItem>)>, RepositoryError> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM \"order\" WHERE order_number = $1");
        let Some(row) = sqlx::query_as::<_, OrderRow>(&query)
            .bind(number)
            .fetch_optional(self.pool)
            .await?
        else {
            return Ok(None);
        };

        let order: Order = row.into();
        let items = self.items_for(order.id).await?;
        Ok(Some((order, items)))
    }

    async fn items_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, order_id, product_name, product_image, variant_label, \
                    quantity, unit_price, total_price \
             FROM order_item WHERE order_id = $1 ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

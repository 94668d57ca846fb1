//! Order workflow repository for the admin side.
//!
//! The storefront inserts orders; the admin moves them through the status
//! workflow. Transitions are enforced here, under a row lock, so two staff
//! members cannot race an order into an illegal state.

use sqlx::PgPool;

use kinmel_core::{
    Money, Order, OrderId, OrderItem, OrderItemId, OrderNumber, OrderStatus, PaymentMethod,
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

/// Filters for the order listing.
#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    /// Only orders in this status.
    pub status: Option<OrderStatus>,
    /// Substring match against order number or customer email.
    pub search: Option<String>,
    /// Page, 1-based.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
}

impl OrderFilter {
    const DEFAULT_PER_PAGE: u32 = 25;

    fn limit(&self) -> i64 {
        i64::from(if self.per_page == 0 {
            Self::DEFAULT_PER_PAGE
        } else {
            self.per_page.min(100)
        })
    }

    fn offset(&self) -> i64 {
        let page = self.page.max(1);
        i64::from(page - 1) * self.limit()
    }
}

/// A page of orders.
#[derive(Debug)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: i64,
}

/// Repository for order workflow operations.
pub struct AdminOrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminOrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders newest first, with optional status filter and search.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, filter: &OrderFilter) -> Result<OrderPage, RepositoryError> {
        let search = filter.search.as_ref().map(|s| format!("%{s}%"));

        let query = format!(
            "SELECT {ORDER_COLUMNS} FROM \"order\" \
             WHERE ($1::text IS NULL OR status = $1) \
               AND ($2::text IS NULL OR order_number ILIKE $2 OR customer_email ILIKE $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .bind(filter.status.map(|s| s.to_string()))
            .bind(&search)
            .bind(filter.limit())
            .bind(filter.offset())
            .fetch_all(self.pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM \"order\" \
             WHERE ($1::text IS NULL OR status = $1) \
               AND ($2::text IS NULL OR order_number ILIKE $2 OR customer_email ILIKE $2)",
        )
        .bind(filter.status.map(|s| s.to_string()))
        .bind(&search)
        .fetch_one(self.pool)
        .await?;

        Ok(OrderPage {
            orders: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }

    /// An order with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such order exists.
    pub async fn get(&self, id: OrderId) -> Result<(Order, Vec<OrderItem>), RepositoryError> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM \"order\" WHERE id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let order: Order = row.into();
        let items = self.items_for(order.id).await?;
        Ok((order, items))
    }

    /// Move an order to `next`, enforcing the transition table under a row
    /// lock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the transition is not
    /// allowed from the order's current status.
    pub async fn update_status(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (current,): (OrderStatus,) =
            sqlx::query_as("SELECT status FROM \"order\" WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(RepositoryError::NotFound)?;

        if !current.can_transition_to(next) {
            return Err(RepositoryError::Conflict(format!(
                "cannot move order from {current} to {next}"
            )));
        }

        let query = format!(
            "UPDATE \"order\" SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .bind(next)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Order counts per status, for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn status_counts(&self) -> Result<Vec<(OrderStatus, i64)>, RepositoryError> {
        let rows: Vec<(OrderStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM \"order\" GROUP BY status")
                .fetch_all(self.pool)
                .await?;
        Ok(rows)
    }

    /// Revenue from completed orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn completed_revenue(&self) -> Result<Money, RepositoryError> {
        let (total,): (Option<Money>,) = sqlx::query_as(
            "SELECT SUM(total) FROM \"order\" WHERE status = 'completed'",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(total.unwrap_or(Money::ZERO))
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

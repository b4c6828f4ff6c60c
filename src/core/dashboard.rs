use crate::core::client::ApiClient;
use crate::domain::model::{
    Buckets, CustomerSources, DashboardStats, MonthlyRevenue, OrderStats, TopProduct,
};
use crate::utils::error::{DashboardError, Result, ServiceErrorKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

/// The dashboard's widgets, one per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Stats,
    Customers,
    TopProducts,
    Revenue,
    Orders,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Stats,
        Section::Customers,
        Section::TopProducts,
        Section::Revenue,
        Section::Orders,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Stats => "Stats",
            Section::Customers => "Customers",
            Section::TopProducts => "Top products",
            Section::Revenue => "Revenue",
            Section::Orders => "Orders",
        }
    }
}

/// Outcome of one widget's fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Widget<T> {
    Ready {
        data: T,
    },
    Failed {
        kind: Option<ServiceErrorKind>,
        status: Option<u16>,
        message: String,
    },
}

impl<T> Widget<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Widget::Ready { data } => Some(data),
            Widget::Failed { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Widget::Ready { .. })
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Widget::Ready { .. } => None,
            Widget::Failed { message, .. } => Some(message.as_str()),
        }
    }
}

impl<T> From<Result<T>> for Widget<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Widget::Ready { data },
            Err(DashboardError::Service(e)) => Widget::Failed {
                kind: Some(e.kind),
                status: e.status,
                message: e.message,
            },
            Err(other) => Widget::Failed {
                kind: None,
                status: None,
                message: other.user_friendly_message(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub stats: Widget<DashboardStats>,
    pub customers: Widget<CustomerSources>,
    pub top_products: Widget<Vec<TopProduct>>,
    pub revenue: Widget<MonthlyRevenue>,
    pub orders: Widget<OrderStats>,
}

impl DashboardSnapshot {
    pub fn ready_count(&self) -> usize {
        [
            self.stats.is_ready(),
            self.customers.is_ready(),
            self.top_products.is_ready(),
            self.revenue.is_ready(),
            self.orders.is_ready(),
        ]
        .iter()
        .filter(|ready| **ready)
        .count()
    }

    /// `(section, message)` for every widget that failed.
    pub fn failures(&self) -> Vec<(Section, &str)> {
        [
            (Section::Stats, self.stats.failure_message()),
            (Section::Customers, self.customers.failure_message()),
            (Section::TopProducts, self.top_products.failure_message()),
            (Section::Revenue, self.revenue.failure_message()),
            (Section::Orders, self.orders.failure_message()),
        ]
        .into_iter()
        .filter_map(|(section, message)| message.map(|m| (section, m)))
        .collect()
    }

    /// Plain-text cards, one line (or a few) per widget.
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Dashboard ({} of {} widgets loaded, {})",
            self.ready_count(),
            Section::ALL.len(),
            self.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        );

        render_card(&mut out, Section::Stats, &self.stats, write_stats);
        render_card(&mut out, Section::Customers, &self.customers, write_customers);
        render_card(&mut out, Section::TopProducts, &self.top_products, write_top_products);
        render_card(&mut out, Section::Revenue, &self.revenue, write_revenue);
        render_card(&mut out, Section::Orders, &self.orders, write_orders);
        out
    }
}

fn write_stats(out: &mut String, s: &DashboardStats) {
    let _ = writeln!(
        out,
        "  total sales {:.2} | orders {} | customers {}",
        s.total_sales.as_f64(),
        s.total_orders,
        s.total_customers
    );
    let _ = writeln!(
        out,
        "  today {:.2} | this week {:.2} | this month {:.2}",
        s.daily_sales.as_f64(),
        s.weekly_sales.as_f64(),
        s.monthly_sales.as_f64()
    );
}

fn write_customers(out: &mut String, c: &CustomerSources) {
    for (label, bucket) in labelled(c) {
        let sources: Vec<String> = bucket
            .iter()
            .map(|s| format!("{} {:.0}", s.short_name, s.amount.as_f64()))
            .collect();
        let _ = writeln!(out, "  {:<8}{}", label, sources.join(", "));
    }
}

fn write_top_products(out: &mut String, products: &Vec<TopProduct>) {
    if products.is_empty() {
        let _ = writeln!(out, "  (no products)");
    }
    for (rank, p) in products.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {} - {} sold, {} left, {:.2} ({})",
            rank + 1,
            p.name,
            p.sold,
            p.remaining,
            p.price.as_f64(),
            p.status
        );
    }
}

fn write_revenue(out: &mut String, r: &MonthlyRevenue) {
    let _ = writeln!(
        out,
        "  {}: {:.2} over {} days",
        r.month,
        r.total(),
        r.daily_revenue.len()
    );
}

fn write_orders(out: &mut String, o: &OrderStats) {
    if o.is_empty() {
        let _ = writeln!(out, "  (no orders yet)");
        return;
    }
    for (label, bucket) in labelled(o) {
        let orders: u64 = bucket.iter().map(|s| s.order_count).sum();
        let sales: f64 = bucket.iter().map(|s| s.total_sales.as_f64()).sum();
        let _ = writeln!(out, "  {:<8}{} orders, {:.2} sales", label, orders, sales);
    }
}

fn labelled<T>(buckets: &Buckets<T>) -> [(&'static str, &Vec<T>); 4] {
    [
        ("daily", &buckets.daily),
        ("weekly", &buckets.weekly),
        ("monthly", &buckets.monthly),
        ("all", &buckets.all),
    ]
}

fn render_card<T>(
    out: &mut String,
    section: Section,
    widget: &Widget<T>,
    body: impl FnOnce(&mut String, &T),
) {
    let _ = writeln!(out, "[{}]", section.title());
    match widget {
        Widget::Ready { data } => body(out, data),
        Widget::Failed { message, .. } => {
            let _ = writeln!(out, "  error: {}", message);
        }
    }
}

/// Composes the dashboard page: every widget's data fetched side by side.
pub struct DashboardPage {
    client: ApiClient,
}

impl DashboardPage {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fetches all five sections concurrently. Each widget settles on its
    /// own; one failing leaves the others untouched.
    pub async fn load(&self) -> DashboardSnapshot {
        tracing::info!("Loading dashboard from {}", self.client.base_url());

        let (stats, customers, top_products, revenue, orders) = tokio::join!(
            self.client.dashboard_stats(),
            self.client.customer_sources(),
            self.client.top_products(),
            self.client.monthly_revenue(),
            self.client.order_stats(),
        );

        let snapshot = DashboardSnapshot {
            fetched_at: Utc::now(),
            stats: stats.into(),
            customers: customers.into(),
            top_products: top_products.into(),
            revenue: revenue.into(),
            orders: orders.into(),
        };

        tracing::info!(
            "Dashboard loaded: {}/{} widgets ready",
            snapshot.ready_count(),
            Section::ALL.len()
        );
        snapshot
    }

    /// One section as JSON, failing with the section's normalized error.
    pub async fn load_section(&self, section: Section) -> Result<serde_json::Value> {
        let value = match section {
            Section::Stats => serde_json::to_value(self.client.dashboard_stats().await?)?,
            Section::Customers => serde_json::to_value(self.client.customer_sources().await?)?,
            Section::TopProducts => serde_json::to_value(self.client.top_products().await?)?,
            Section::Revenue => serde_json::to_value(self.client.monthly_revenue().await?)?,
            Section::Orders => serde_json::to_value(self.client.order_stats().await?)?,
        };
        Ok(value)
    }

    /// One section as a plain-text card, the same card `render_summary`
    /// prints for it.
    pub async fn render_section(&self, section: Section) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "[{}]", section.title());
        match section {
            Section::Stats => write_stats(&mut out, &self.client.dashboard_stats().await?),
            Section::Customers => write_customers(&mut out, &self.client.customer_sources().await?),
            Section::TopProducts => write_top_products(&mut out, &self.client.top_products().await?),
            Section::Revenue => write_revenue(&mut out, &self.client.monthly_revenue().await?),
            Section::Orders => write_orders(&mut out, &self.client.order_stats().await?),
        }
        Ok(out)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A money value kept exactly as the API wrote it, so `1000` is re-encoded
/// as `1000` and `1000.5` as `1000.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(serde_json::Number);

impl Amount {
    /// `None` for NaN and infinities, which JSON cannot carry.
    pub fn from_f64(value: f64) -> Option<Self> {
        serde_json::Number::from_f64(value).map(Self)
    }

    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The same record shape grouped by time granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buckets<T> {
    pub daily: Vec<T>,
    pub weekly: Vec<T>,
    pub monthly: Vec<T>,
    pub all: Vec<T>,
}

impl<T> Buckets<T> {
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
            && self.weekly.is_empty()
            && self.monthly.is_empty()
            && self.all.is_empty()
    }

    /// Total number of records across every bucket.
    pub fn len(&self) -> usize {
        self.daily.len() + self.weekly.len() + self.monthly.len() + self.all.len()
    }
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Self {
            daily: Vec::new(),
            weekly: Vec::new(),
            monthly: Vec::new(),
            all: Vec::new(),
        }
    }
}

/// `/customers/source/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSource {
    pub name: String,
    pub amount: Amount,
    #[serde(rename = "shortName")]
    pub short_name: String,
    pub color: String,
}

pub type CustomerSources = Buckets<CustomerSource>;

/// `/dashboard/stats/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_sales: Amount,
    pub total_orders: u64,
    pub total_customers: u64,
    pub daily_sales: Amount,
    pub weekly_sales: Amount,
    pub monthly_sales: Amount,
}

/// One row of `/mahsulot/top10/`. The API speaks Uzbek; the Rust side doesn't.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub id: u64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "sotildi")]
    pub sold: u64,
    #[serde(rename = "narx")]
    pub price: Amount,
    #[serde(rename = "holat")]
    pub status: String,
    #[serde(rename = "qolgan")]
    pub remaining: i64,
}

/// `/revenue/monthly/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub daily_revenue: Vec<DailyRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub day: u32,
    pub total: Amount,
}

impl MonthlyRevenue {
    pub fn total(&self) -> f64 {
        self.daily_revenue.iter().map(|d| d.total.as_f64()).sum()
    }
}

/// One bucket entry of `/dashboard/order-stats/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStat {
    pub date: String,
    pub total_sales: Amount,
    pub order_count: u64,
    pub category_breakdown: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub value: Amount,
    pub color: String,
}

pub type OrderStats = Buckets<OrderStat>;

pub mod client;
pub mod dashboard;
pub mod services;

pub use crate::domain::model::{
    Amount, Buckets, CategoryShare, CustomerSource, CustomerSources, DailyRevenue,
    DashboardStats, MonthlyRevenue, OrderStat, OrderStats, TopProduct,
};
pub use crate::domain::ports::{ConfigProvider, Diagnostics, FailureRecord, TokenStore};
pub use crate::utils::error::Result;

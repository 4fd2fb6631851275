//! External collaborators: market data in, notifications and dashboard out.

pub mod dashboard;
pub mod lunarcrush;
pub mod market_data;
pub mod notifier;

pub use dashboard::{DashboardSink, DashboardState, DashboardView};
pub use market_data::MarketDataProvider;
pub use notifier::{LogNotifier, Notifier, TelegramNotifier};

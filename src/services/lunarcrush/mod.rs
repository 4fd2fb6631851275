//! LunarCrush v2 market data integration

pub mod client;
pub mod messages;
pub mod provider;

pub use client::LunarCrushClient;
pub use provider::LunarCrushProvider;

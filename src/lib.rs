//! Lunarwatch: sentiment + momentum screening for ranked crypto assets.
//!
//! Each run pulls the Galaxy Score ranked market list, computes RSI and MACD
//! over every asset's price sparkline, and flags assets with strong sentiment
//! and an oversold price for notification.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

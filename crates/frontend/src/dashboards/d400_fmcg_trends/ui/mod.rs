pub mod aggregate_stats;
pub mod chart_card;
pub mod dashboard;
pub mod filter_bar;
pub mod slot;

pub use dashboard::FmcgTrendsDashboard;

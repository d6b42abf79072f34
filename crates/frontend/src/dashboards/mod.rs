pub mod d400_fmcg_trends;

pub use d400_fmcg_trends::ui::FmcgTrendsDashboard;

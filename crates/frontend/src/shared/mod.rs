pub mod api_utils;
pub mod charts;
pub mod icons;

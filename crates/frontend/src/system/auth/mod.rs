pub mod api;
pub mod context;
pub mod google;
pub mod storage;

pub mod extractor;
pub mod google;
pub mod jwt;
pub mod middleware;
pub mod password;

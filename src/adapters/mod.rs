pub mod http;
pub mod page_cache;

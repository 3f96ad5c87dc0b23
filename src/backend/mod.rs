pub mod api_client;
pub mod docs;
pub mod stream;

pub mod content_type;
pub mod http_client;
pub mod response;

pub use content_type::ContentType;
pub use http_client::{http_get, http_post, http_post_with_charset, CONNECT_FAILURE_MESSAGE};
pub use response::{HttpResponse, STATUS_NO_EXCHANGE};

pub mod authorize;
pub mod factory;
pub mod gateway_trait;
pub mod nmi;
pub mod responses;

pub use authorize::AuthorizeGateway;
pub use factory::{select, select_by_name, AvailableGateway};
pub use gateway_trait::{
    CardDetails, Credentials, PaymentGateway, RefundRequest, TransactionRequest,
    TransactionResult, TransactionStatus, VoidRequest,
};
pub use nmi::NmiGateway;
pub use responses::ErrorResponse;

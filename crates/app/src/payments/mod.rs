//! Payments: hosted gateway checkout and payment status lookups.

pub mod errors;
mod gateway;
pub mod mercadopago;
pub mod models;
mod provider;
mod reconciler;

pub use errors::*;
pub use gateway::*;
pub use mercadopago::{MercadoPagoClient, MercadoPagoConfig};
pub use models::{BackUrls, PaymentStatus};
pub use provider::*;
pub use reconciler::*;

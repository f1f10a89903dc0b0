//! Domain entities shared by the API client and the page services.

pub mod category;
pub mod inquiry;
pub mod product;
pub mod types;

pub mod chart;
pub mod forecast;
pub mod query;
pub mod stock;

pub use chart::*;
pub use forecast::*;
pub use query::*;
pub use stock::*;

pub mod logging;
pub mod serde;

pub mod logging;

pub use logging::{Environment, setup_logging};

pub mod composite;
pub mod logging;
pub mod traits;

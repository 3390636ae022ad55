pub mod cgp;
pub mod evolution;
pub mod gates;
pub mod manager;
pub mod traits;

pub use cgp::CgpConfig;
pub use evolution::EvolutionConfig;
pub use gates::GatesConfig;
pub use manager::{AppConfig, ConfigManager};

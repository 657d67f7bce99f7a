pub mod analysis;
pub mod manager;
pub mod synthesis;
pub mod traits;

pub use analysis::AnalysisConfig;
pub use manager::{AppConfig, ConfigManager};
pub use synthesis::SynthesisConfig;
pub use traits::{ConfigManifest, ConfigSection, FieldManifest, FieldType};

pub mod core;
pub mod settings;
pub mod types;

pub use self::core::FileDataProvider;
pub use settings::Settings;
pub use types::FileData;

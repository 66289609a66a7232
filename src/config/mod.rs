//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::CustosPaths;
pub use settings::Settings;

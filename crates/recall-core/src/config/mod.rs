pub mod settings;

pub use settings::RecallConfig;

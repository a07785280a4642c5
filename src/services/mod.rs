// Service exports
pub mod loader;
pub mod report;

pub use loader::{load_population, load_profile, parse_profile, LoadError, ProfileFormat};
pub use report::{build_report, describe, render_experiment, render_json, render_text};

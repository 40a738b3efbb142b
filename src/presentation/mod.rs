pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{
    CorpusSettings, MatchingSettings, ServerSettings, Settings, SettingsError, VlmSettings,
};
pub use router::create_router;
pub use state::AppState;

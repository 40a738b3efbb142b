mod settings;

pub use settings::{
    CorpusSettings, MatchingSettings, ServerSettings, Settings, SettingsError, VlmSettings,
};

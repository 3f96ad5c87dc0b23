// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1080.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 720.0;
pub const DEFAULT_WINDOW_TITLE: &str = "PromptForge";

/// Application name, used for the confy config file
pub const APP_NAME: &str = "PromptForge";

/// Backend defaults, overridable in settings
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_WS_BASE_URL: &str = "ws://localhost:8000";

/// Keep only this many log lines in the run panel
pub const MAX_RUN_LOG_LINES: usize = 2000;

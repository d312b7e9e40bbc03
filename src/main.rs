use docqa::config::{AppConfig, parse_env_lines};

/// Bundled config for builds without a .env file (mobile, web)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if std::env::var(key).is_err() {
            // SAFETY: We're setting env vars at startup before any threads are spawned
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

fn init_tracing() {
    let level = AppConfig::from_env()
        .map(|config| config.log_level)
        .unwrap_or(tracing::Level::INFO);
    // Dioxus may try to install its own subscriber later; first one wins.
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}

fn main() {
    load_dotenv();
    init_tracing();
    dioxus::launch(docqa::ui::App);
}

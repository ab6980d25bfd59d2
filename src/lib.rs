pub mod app;
pub mod article;
pub mod config;
pub mod error;
pub mod output;
pub mod templates;
pub mod utils;
pub mod watch;

pub const CONFIG_FILE: &str = "articles.toml";
pub const DATA_FILE: &str = "wiki/释氏源流应化事迹/_data/articles.yml";
pub const OUT_DIR: &str = "wiki/释氏源流应化事迹/articles";
pub const TEMPLATE_DIR: &str = "templates";
pub const DEFAULT_LAYOUT: &str = "default";
pub const ENV_PREFIX: &str = "ARTICLES_";

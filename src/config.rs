use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::{Error, Figment, Metadata, Provider};
use serde::{Deserialize, Serialize};

use crate::{DATA_FILE, DEFAULT_LAYOUT, ENV_PREFIX, OUT_DIR, TEMPLATE_DIR};

/// config for materializing the articles
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub structure: ConfigStructure,
    pub defaults: ConfigDefaults,
}

/// config for where things are read from and written to
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigStructure {
    /// the yaml file holding the `articles` sequence
    pub data: String,
    /// the output directory, removed and recreated on every run
    pub output: String,
    /// templates overriding the built in ones, matched by file stem
    pub templates: String,
}

/// values filled into every rendered article
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigDefaults {
    /// the `layout` written into the front matter
    pub layout: String,
    /// heading above the translation of a standard article
    pub translation_heading: String,
    /// heading above the original text of a standard article
    pub original_heading: String,
}

impl Default for ConfigStructure {
    fn default() -> Self {
        Self {
            data: DATA_FILE.into(),
            output: OUT_DIR.into(),
            templates: TEMPLATE_DIR.into(),
        }
    }
}

impl Default for ConfigDefaults {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.into(),
            translation_heading: "白话译文".into(),
            original_heading: "古文原文".into(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Self::default())
    }

    pub fn from<T: Provider>(provider: T) -> Result<Self, Error> {
        Figment::from(provider).extract()
    }

    /// defaults, then the toml file if it exists, then `ARTICLES_` prefixed environment variables
    pub fn load<T: AsRef<Path>>(path: T) -> Result<Self, Error> {
        Self::figment()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Article config")
    }
    fn data(&self) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, Error> {
        Serialized::defaults(Self::default()).data()
    }
}

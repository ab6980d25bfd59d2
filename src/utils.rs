use std::{fs, io, path::Path};

use crate::{error::Result, templates::BUILTIN, CONFIG_FILE, TEMPLATE_DIR};

const NEW_CONFIG: &str = r#"[structure]
data = "_data/articles.yml"
output = "articles"
templates = "templates"

[defaults]
layout = "default"
"#;

const NEW_DATA: &str = r#"articles:
  - id: preface
    type: preface
    title: 序
    content: |
      这里是序言。
  - id: "001"
    type: standard
    title: 第一篇
    translation: |
      这里是白话译文。
    original: |
      这里是古文原文。
"#;

/// create a new project with a config, a sample data file and the default templates
pub fn create_new<T: AsRef<Path>>(name: T) -> Result<()> {
    let root = name.as_ref();
    if root.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("`{}` already exists", root.display()),
        )
        .into());
    }
    let data_dir = root.join("_data");
    let template_dir = root.join(TEMPLATE_DIR);
    fs::create_dir_all(&data_dir)?;
    fs::create_dir_all(&template_dir)?;

    fs::write(root.join(CONFIG_FILE), NEW_CONFIG)?;
    fs::write(data_dir.join("articles.yml"), NEW_DATA)?;
    for (name, source) in BUILTIN {
        fs::write(template_dir.join(format!("{name}.jinja")), source)?;
    }
    log::info!("Created {}", root.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::App, config::Config};
    use figment::providers::{Format, Toml};

    #[test]
    fn new_project_generates() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("site");
        create_new(&root).unwrap();

        let mut config = Config::from(Config::figment().merge(Toml::file(root.join(CONFIG_FILE))))
            .unwrap();
        assert_eq!(config.structure.output, "articles");
        for path in [
            &mut config.structure.data,
            &mut config.structure.output,
            &mut config.structure.templates,
        ] {
            *path = root.join(&*path).to_string_lossy().into_owned();
        }

        let summary = App::new(config).unwrap().generate().unwrap();
        assert_eq!(summary.count(), 2);
        assert!(root.join("articles/preface.md").is_file());
        assert!(root.join("articles/001.md").is_file());
    }

    #[test]
    fn refuses_existing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(create_new(tmp.path()).is_err());
    }
}

use std::{collections::HashSet, fs, path::PathBuf};

use minijinja::{context, Environment};

use crate::{
    article::{Article, ArticleCollection, Body},
    config::{Config, ConfigDefaults, ConfigStructure},
    error::Result,
    output::OutputDir,
    templates,
};

/// The app holds everything needed to materialize the articles
pub struct App<'a> {
    structure: ConfigStructure,
    defaults: ConfigDefaults,
    templates: Environment<'a>,
}

/// what a run of [`App::generate`] wrote, in the order of the data file
#[derive(Debug, Default)]
pub struct Summary {
    pub written: Vec<PathBuf>,
    /// one entry per article whose id was already used, it overwrote the earlier file
    pub duplicates: Vec<String>,
}

impl Summary {
    pub fn count(&self) -> usize {
        self.written.len()
    }
}

impl App<'static> {
    pub fn new(config: Config) -> Result<Self> {
        let templates = templates::get_env(&config.structure.templates)?;
        Ok(App {
            structure: config.structure,
            defaults: config.defaults,
            templates,
        })
    }
}

impl<'a> App<'a> {
    pub fn load(&self) -> Result<Vec<Article>> {
        log::debug!("Reading {}", self.structure.data);
        Ok(ArticleCollection::load(&self.structure.data)?.articles)
    }

    pub fn render(&self, article: &Article) -> Result<String> {
        let defaults = &self.defaults;
        let ctx = match &article.body {
            Body::Preface { content } => context! {
                layout => &defaults.layout,
                title => &article.title,
                id => &article.id,
                content => content,
            },
            Body::Standard {
                translation,
                original,
            } => context! {
                layout => &defaults.layout,
                title => &article.title,
                id => &article.id,
                translation_heading => &defaults.translation_heading,
                translation => translation,
                original_heading => &defaults.original_heading,
                original => original,
            },
        };
        let template = self.templates.get_template(article.template_name())?;
        Ok(template.render(ctx)?)
    }

    /// read the data file, wipe the output directory and write one file per article
    ///
    /// the data is parsed before anything is removed, so a broken data file leaves the previous
    /// output in place
    pub fn generate(&self) -> Result<Summary> {
        let articles = self.load()?;

        let mut summary = Summary::default();
        let mut seen = HashSet::new();
        for article in &articles {
            if !seen.insert(article.id.as_str()) {
                log::warn!(
                    "Duplicate id `{}`, a later article overwrites {}",
                    article.id,
                    article.file_name()
                );
                summary.duplicates.push(article.id.clone());
            }
        }

        let out = OutputDir::recreate(&self.structure.output)?;
        for article in &articles {
            let contents = self.render(article)?;
            let path = out.write(&article.file_name(), &contents)?;
            log::info!("Generated: {}", path.display());
            summary.written.push(path);
        }
        log::info!(
            "Done! Generated {} articles in {}",
            summary.count(),
            out.path().display()
        );
        Ok(summary)
    }

    /// remove the output directory
    pub fn clean(&self) -> Result<()> {
        match fs::remove_dir_all(&self.structure.output) {
            Ok(()) => {
                log::info!("Removed {}", self.structure.output);
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Nothing to clean at {}", self.structure.output);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn structure(&self) -> &ConfigStructure {
        &self.structure
    }
}

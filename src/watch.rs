use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;

use crate::{
    app::App,
    config::{Config, ConfigStructure},
    error::Result,
};

/// a path handed to the watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchPath {
    pub path: PathBuf,
    pub recursive: bool,
}

/// the paths a change in should trigger a regeneration: the directory of the data file, the
/// template directory and the config file, the last two only when they exist
pub fn watch_paths(structure: &ConfigStructure, config_path: &Path) -> Vec<WatchPath> {
    let data_dir = Path::new(&structure.data)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut paths = vec![WatchPath {
        path: data_dir.into(),
        recursive: false,
    }];
    let template_dir = Path::new(&structure.templates);
    if template_dir.is_dir() {
        paths.push(WatchPath {
            path: template_dir.into(),
            recursive: true,
        });
    }
    if config_path.is_file() {
        paths.push(WatchPath {
            path: config_path.into(),
            recursive: false,
        });
    }
    paths
}

/// move `watcher` from the `old` paths over to the `new` ones
pub fn rewatch<W: Watcher>(watcher: &mut W, old: &[WatchPath], new: &[WatchPath]) -> Result<()> {
    for stale in old.iter().filter(|p| !new.contains(p)) {
        log::debug!("No longer watching {:?}", stale.path);
        if let Err(err) = watcher.unwatch(&stale.path) {
            log::debug!("Failed to unwatch {:?}: `{err}`", stale.path);
        }
    }
    for added in new.iter().filter(|p| !old.contains(p)) {
        log::debug!("Watching {:?}", added.path);
        let mode = if added.recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(&added.path, mode)?;
    }
    Ok(())
}

/// the state carried between regenerations
struct Session<'p> {
    config_path: &'p Path,
    watched: Vec<WatchPath>,
    output: PathBuf,
}

impl<'p> Session<'p> {
    /// re-read the config, follow any moved paths and generate everything again
    fn regenerate<W: Watcher>(&mut self, watcher: &mut W) -> Result<()> {
        let app = App::new(Config::load(self.config_path)?)?;
        let structure = app.structure();
        let paths = watch_paths(structure, self.config_path);
        rewatch(watcher, &self.watched, &paths)?;
        self.watched = paths;

        let generated = app.generate();
        // writes into the output directory must not trigger another run
        self.output = fs::canonicalize(&structure.output)
            .unwrap_or_else(|_| PathBuf::from(&structure.output));
        generated.map(|_| ())
    }

    fn is_own_output(&self, updated: &HashSet<PathBuf>) -> bool {
        updated.iter().all(|p| p.starts_with(&self.output))
    }
}

/// generate, then regenerate everything whenever the data, the templates or the config change
pub fn watch<T: AsRef<Path>>(config_path: T) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_secs(2), None, tx)?;

    let mut session = Session {
        config_path: config_path.as_ref(),
        watched: Vec::new(),
        output: PathBuf::new(),
    };
    if let Err(err) = session.regenerate(debouncer.watcher()) {
        if session.watched.is_empty() {
            return Err(err);
        }
        log::error!("Encountered error `{err}`");
    }

    for res in rx {
        match res {
            Ok(event) => {
                let updated: HashSet<_> = event.into_iter().flat_map(|e| e.paths.clone()).collect();
                if session.is_own_output(&updated) {
                    continue;
                }
                log::info!("Changes in: {updated:?}");
                log::info!("Regenerating");
                if let Err(err) = session.regenerate(debouncer.watcher()) {
                    log::error!("Encountered error `{err}`");
                }
            }
            Err(errors) => {
                for error in errors {
                    log::error!("Error received `{error:?}`");
                }
            }
        }
    }
    Ok(())
}

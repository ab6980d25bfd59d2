use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use minijinja::Environment;

use crate::error::Result;

/// the templates compiled into the binary, keyed by the name articles refer to them with
pub const BUILTIN: [(&str, &str); 2] = [
    ("preface", include_str!("../templates/preface.jinja")),
    ("standard", include_str!("../templates/standard.jinja")),
];

/// the templates used for rendering articles
///
/// starts from the built in templates, a file in `template_dir` whose stem names a built in
/// template replaces it. Files are taken in name order and the first one for a stem wins
pub fn get_env<'a, T: AsRef<Path>>(template_dir: T) -> Result<Environment<'a>> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_filter("yaml_escape", yaml_escape);
    for (name, source) in BUILTIN {
        env.add_template(name, source)?;
    }

    let template_dir = template_dir.as_ref();
    if !template_dir.is_dir() {
        log::debug!("No template directory at {template_dir:?}, using built in templates");
        return Ok(env);
    }
    let mut paths = template_dir
        .read_dir()?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    let mut used: HashMap<&str, PathBuf> = HashMap::new();
    for path in paths {
        if !path.is_file() {
            log::debug!("Skipping `{path:?}` while traversing templates");
            continue;
        }
        let stem = path.file_stem().and_then(|s| s.to_str());
        let Some(name) = BUILTIN
            .iter()
            .map(|(name, _)| *name)
            .find(|name| Some(*name) == stem)
        else {
            log::warn!("Skipping `{path:?}`, it does not name a known template");
            continue;
        };
        if let Some(first) = used.get(name) {
            log::warn!("Skipping `{path:?}`, template `{name}` already comes from {first:?}");
            continue;
        }
        log::info!("Using template `{name}` from {path:?}");
        env.add_template_owned(name, fs::read_to_string(&path)?)?;
        used.insert(name, path);
    }
    Ok(env)
}

/// make a value safe to put between double quotes in yaml
fn yaml_escape(value: String) -> String {
    if !value.contains(['\\', '"']) {
        return value;
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if matches!(c, '\\' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(yaml_escape("序".into()), "序");
        assert_eq!(yaml_escape(r#"say "hi""#.into()), r#"say \"hi\""#);
        assert_eq!(yaml_escape(r"a\b".into()), r"a\\b");
    }

    #[test]
    fn builtin_preface_keeps_trailing_newline() {
        let env = get_env("does/not/exist").unwrap();
        let rendered = env
            .get_template("preface")
            .unwrap()
            .render(context! { layout => "default", title => "序", id => "preface", content => "正文" })
            .unwrap();
        assert_eq!(
            rendered,
            "---\nlayout: default\ntitle: \"序\"\nid: \"preface\"\n---\n\n正文\n"
        );
    }

    #[test]
    fn directory_overrides_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("preface.md"), "{{ title }}|{{ content }}").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let env = get_env(dir.path()).unwrap();
        let preface = env
            .get_template("preface")
            .unwrap()
            .render(context! { title => "t", content => "c" })
            .unwrap();
        assert_eq!(preface, "t|c");
        // the other built in template is still there
        assert!(env.get_template("standard").is_ok());
    }

    #[test]
    fn first_file_in_name_order_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("standard.md"), "md").unwrap();
        fs::write(dir.path().join("standard.jinja"), "jinja").unwrap();

        let env = get_env(dir.path()).unwrap();
        let standard = env.get_template("standard").unwrap().render(()).unwrap();
        assert_eq!(standard, "jinja");
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "{{ not closed").unwrap();
        fs::write(dir.path().join("README"), "{% if %}").unwrap();

        let env = get_env(dir.path()).unwrap();
        assert!(env.get_template("notes").is_err());
        assert!(env.get_template("preface").is_ok());
    }
}

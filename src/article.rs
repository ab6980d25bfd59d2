use std::{fs, path::Path};

use serde::Deserialize;
use serde_yml::Value;

use crate::error::{Error, Result};

/// the type tag that selects the preface body, every other tag is a standard article
pub const PREFACE: &str = "preface";

/// the whole data file, only the `articles` sequence is of interest
#[derive(Debug, Deserialize)]
pub struct ArticleCollection {
    pub articles: Vec<Article>,
}

impl ArticleCollection {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yml::from_str(text)?)
    }

    pub fn load<T: AsRef<Path>>(path: T) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }
}

/// a single entry of the collection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawArticle")]
pub struct Article {
    /// stem of the output file
    pub id: String,
    pub title: String,
    pub body: Body,
}

/// what goes under the front matter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Preface { content: String },
    Standard { translation: String, original: String },
}

impl Article {
    /// name of the template this article is rendered with
    pub fn template_name(&self) -> &'static str {
        match self.body {
            Body::Preface { .. } => "preface",
            Body::Standard { .. } => "standard",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.md", self.id)
    }
}

/// the entry as written in yaml, before the type tag decides which fields are needed
#[derive(Debug, Deserialize)]
struct RawArticle {
    id: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    title: Option<Value>,
    content: Option<Value>,
    translation: Option<Value>,
    original: Option<Value>,
}

impl TryFrom<RawArticle> for Article {
    type Error = Error;

    fn try_from(raw: RawArticle) -> Result<Self> {
        let id = scalar("id", raw.id)?.ok_or_else(|| Error::MissingField {
            id: "<no id>".into(),
            field: "id",
        })?;
        let required = |field: &'static str, value: Option<Value>| -> Result<String> {
            scalar(field, value)?.ok_or_else(|| Error::MissingField {
                id: id.clone(),
                field,
            })
        };

        let kind = required("type", raw.kind)?;
        let title = required("title", raw.title)?;
        let body = if kind == PREFACE {
            Body::Preface {
                content: required("content", raw.content)?,
            }
        } else {
            Body::Standard {
                translation: required("translation", raw.translation)?,
                original: required("original", raw.original)?,
            }
        };

        Ok(Self { id, title, body })
    }
}

/// the textual form of a yaml scalar, `None` for null or absent values
fn scalar(field: &'static str, value: Option<Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(Error::InvalidField {
            field,
            value: format!("{other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"
articles:
  - id: preface
    type: preface
    title: 序
    content: |
      释氏源流，始于明代。
  - id: "001"
    type: standard
    title: 补处兜率
    translation: 释迦佛在兜率天。
    original: 释迦如来在兜率天宫。
  - id: 2
    type: chapter
    title: 2
    translation: t
    original: o
"#;

    #[test]
    fn parses_in_declared_order() {
        let collection = ArticleCollection::from_yaml(DATA).unwrap();
        let ids: Vec<_> = collection.articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["preface", "001", "2"]);
    }

    #[test]
    fn preface_keeps_content_verbatim() {
        let collection = ArticleCollection::from_yaml(DATA).unwrap();
        let preface = &collection.articles[0];
        assert_eq!(preface.template_name(), "preface");
        assert_eq!(
            preface.body,
            Body::Preface {
                content: "释氏源流，始于明代。\n".into()
            }
        );
    }

    #[test]
    fn unknown_tags_are_standard() {
        let collection = ArticleCollection::from_yaml(DATA).unwrap();
        let article = &collection.articles[2];
        assert_eq!(article.template_name(), "standard");
        assert_eq!(article.title, "2");
        assert_eq!(article.file_name(), "2.md");
    }

    #[test]
    fn booleans_render_in_yaml_spelling() {
        let text = r#"
articles:
  - id: 7
    type: preface
    title: true
    content: false
"#;
        let collection = ArticleCollection::from_yaml(text).unwrap();
        let article = &collection.articles[0];
        assert_eq!(article.id, "7");
        assert_eq!(article.title, "true");
        assert_eq!(
            article.body,
            Body::Preface {
                content: "false".into()
            }
        );
    }

    #[test]
    fn missing_body_field_is_an_error() {
        let text = r#"
articles:
  - id: "003"
    type: standard
    title: 没有原文
    translation: 只有译文
"#;
        let err = ArticleCollection::from_yaml(text).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("003"), "{message}");
        assert!(message.contains("original"), "{message}");
    }

    #[test]
    fn null_counts_as_missing() {
        let text = r#"
articles:
  - id: p
    type: preface
    title: ~
    content: x
"#;
        assert!(ArticleCollection::from_yaml(text).is_err());
    }

    #[test]
    fn nested_values_are_rejected() {
        let text = r#"
articles:
  - id: [1, 2]
    type: preface
    title: t
    content: x
"#;
        assert!(ArticleCollection::from_yaml(text).is_err());
    }

    #[test]
    fn missing_articles_key_is_an_error() {
        assert!(ArticleCollection::from_yaml("pages: []").is_err());
    }
}

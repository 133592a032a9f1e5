// rulebook-core/src/infrastructure/renderer/jinja.rs

// Renders narrative documents as minijinja templates. The result-aware
// functions only exist between register_extensions and
// unregister_all_extensions, so one document never sees another's state.

use minijinja::{AutoEscape, Environment, Value, context, path_loader};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::domain::result::RuleResult;
use crate::domain::rule::{RuleKind, Status};
use crate::domain::store::ResultStore;
use crate::error::ReportError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{atomic_write, ensure_dir};
use crate::ports::renderer::{Backend, DocumentRenderer, RenderOptions, SafeMode};

#[derive(Debug, Default)]
pub struct JinjaDocumentRenderer {
    results: Option<Arc<ResultStore>>,
}

impl JinjaDocumentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_extensions(&self) -> bool {
        self.results.is_some()
    }

    fn environment(&self, options: &RenderOptions) -> Environment<'static> {
        let mut env = Environment::new();

        let backend = options.backend;
        env.set_auto_escape_callback(move |_| match backend {
            Backend::Html5 => AutoEscape::Html,
            Backend::Text => AutoEscape::None,
        });

        // Secure documents cannot pull in anything beyond themselves.
        if options.safe_mode != SafeMode::Secure {
            env.set_loader(path_loader(options.base_dir.clone()));
        }

        env.add_filter("status_class", |status: String| -> String {
            format!("rb-status-{}", status.to_lowercase())
        });

        if let Some(results) = &self.results {
            install_result_functions(&mut env, results, options.backend);
        }

        env
    }
}

fn install_result_functions(
    env: &mut Environment<'static>,
    results: &Arc<ResultStore>,
    backend: Backend,
) {
    let store = Arc::clone(results);
    env.add_function("concept", move |id: String| -> Value {
        store.concept(&id).map(Value::from_serialize).unwrap_or_else(|| Value::from(()))
    });

    let store = Arc::clone(results);
    env.add_function("constraint", move |id: String| -> Value {
        store.constraint(&id).map(Value::from_serialize).unwrap_or_else(|| Value::from(()))
    });

    let store = Arc::clone(results);
    env.add_function("concepts", move || -> Value { Value::from_serialize(store.concepts()) });

    let store = Arc::clone(results);
    env.add_function("constraints", move || -> Value {
        Value::from_serialize(store.constraints())
    });

    let store = Arc::clone(results);
    env.add_function("summary", move || -> Value { Value::from_serialize(store.summary()) });

    let store = Arc::clone(results);
    env.add_function(
        "result_table",
        move |kind: String, id: String| -> Result<Value, minijinja::Error> {
            let kind = match kind.as_str() {
                "concept" => RuleKind::Concept,
                "constraint" => RuleKind::Constraint,
                other => {
                    return Err(minijinja::Error::new(
                        minijinja::ErrorKind::InvalidOperation,
                        format!("unknown rule kind '{}'", other),
                    ));
                }
            };
            Ok(match (store.get(kind, &id), backend) {
                (None, _) => Value::from(""),
                (Some(result), Backend::Html5) => Value::from_safe_string(html_table(result)),
                (Some(result), Backend::Text) => Value::from(text_table(result)),
            })
        },
    );
}

impl DocumentRenderer for JinjaDocumentRenderer {
    fn register_extensions(&mut self, results: Arc<ResultStore>) {
        self.results = Some(results);
    }

    fn convert_file(
        &mut self,
        file: &Path,
        options: &RenderOptions,
    ) -> Result<PathBuf, ReportError> {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                InfrastructureError::ConfigError(format!("'{}' is not a file", file.display()))
            })?;
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());

        let source = fs::read_to_string(file).map_err(InfrastructureError::Io)?;

        let mut env = self.environment(options);
        env.add_template_owned(name.clone(), source)
            .map_err(InfrastructureError::TemplateError)?;
        let template = env
            .get_template(&name)
            .map_err(InfrastructureError::TemplateError)?;

        let rendered = template
            .render(context! {
                document => &name,
                base_dir => options.base_dir.display().to_string(),
                attributes => &options.attributes,
                generated_at => chrono::Utc::now().to_rfc3339(),
            })
            .map_err(InfrastructureError::TemplateError)?;

        if options.mkdirs {
            ensure_dir(&options.to_dir)?;
        }
        let target = options
            .to_dir
            .join(format!("{}.{}", stem, options.backend.extension()));
        atomic_write(&target, rendered)?;
        debug!(source = %file.display(), target = %target.display(), "Document rendered");

        Ok(target)
    }

    fn unregister_all_extensions(&mut self) {
        self.results = None;
    }
}

fn html_table(result: &RuleResult) -> String {
    let mut html = format!(
        "<table class=\"rb-result {}\">\n<thead><tr>",
        status_class(result.status())
    );
    for column in result.column_names() {
        html.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in result.rows() {
        html.push_str("<tr>");
        for cell in row.cells() {
            let labels: Vec<String> = cell.labels.iter().map(|l| escape_html(l)).collect();
            html.push_str(&format!("<td>{}</td>", labels.join("<br>")));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

fn text_table(result: &RuleResult) -> String {
    let mut lines = vec![result.column_names().join(" | ")];
    for row in result.rows() {
        let cells: Vec<String> = row.cells().iter().map(|c| c.labels.join(", ")).collect();
        lines.push(cells.join(" | "));
    }
    lines.join("\n")
}

fn status_class(status: Status) -> String {
    format!("rb-status-{}", status.as_str())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

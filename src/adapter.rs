//! The per-invocation state machine
//!
//! rofi starts a new process for every query and every selection. The only
//! state carried between them is the info token of the selected row
//! (`ROFI_INFO`) and the `data` value we persisted last time (`ROFI_DATA`).

use crate::context::{Context, InfoToken};
use crate::index::{IndexService, Kind};
use crate::output::{self, ResultLine};
use crate::resolver::Opener;
use crate::translator::translate;
use crate::utils::AppConfig;
use url::Url;

/// Inputs of one process run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub query_text: String,
    pub prior_context: Option<String>,
}

impl Invocation {
    /// Assemble the invocation from argv and rofi's variables
    ///
    /// When a row carrying a token was selected, rofi passes that row's text
    /// as the argument; it is not a query, so it is dropped. Otherwise the
    /// arguments are the typed text and the persisted data is the context.
    pub fn from_parts(args: &[String], info: Option<String>, data: Option<String>) -> Self {
        let info = info.filter(|s| !s.is_empty());
        let data = data.filter(|s| !s.is_empty());

        match info {
            Some(info) => Self {
                query_text: String::new(),
                prior_context: Some(info),
            },
            None => Self {
                query_text: args.join(" "),
                prior_context: data,
            },
        }
    }

    pub fn from_env(args: &[String]) -> Self {
        Self::from_parts(
            args,
            std::env::var("ROFI_INFO").ok(),
            std::env::var("ROFI_DATA").ok(),
        )
    }
}

/// Everything an invocation prints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub lines: Vec<ResultLine>,
    /// Persisted for the next invocation as rofi `data`
    pub next_context: Option<String>,
    /// Shown above the list
    pub message: Option<String>,
}

pub struct Adapter<'a, I, O> {
    index: I,
    opener: O,
    config: &'a AppConfig,
}

impl<'a, I: IndexService, O: Opener> Adapter<'a, I, O> {
    pub fn new(index: I, opener: O, config: &'a AppConfig) -> Self {
        Self {
            index,
            opener,
            config,
        }
    }

    /// Handle one invocation. Never fails: every problem degrades to a
    /// shorter (possibly empty) list.
    pub fn run(&self, query_text: &str, prior_context: Option<&str>) -> Outcome {
        match Context::decode(prior_context) {
            Context::FreshQuery => self.fresh_query(query_text),
            Context::Drilldown(scope) => self.drilldown(query_text, &scope),
            Context::Action(target) => self.action(&target),
        }
    }

    fn fresh_query(&self, query_text: &str) -> Outcome {
        if query_text.trim().is_empty() {
            return Outcome::default();
        }

        Outcome {
            lines: self.list(query_text, None),
            ..Outcome::default()
        }
    }

    fn drilldown(&self, query_text: &str, scope: &str) -> Outcome {
        let mut lines = Vec::new();
        if self.config.parent_row {
            if let Some(parent) = parent_of(scope) {
                lines.push(output::parent_row(&parent, self.config.show_icons));
            }
        }
        lines.extend(self.list(query_text, Some(scope)));

        Outcome {
            lines,
            next_context: Some(InfoToken::new(Kind::Folder, scope).encode()),
            message: Some(display_scope(scope)),
        }
    }

    fn action(&self, target: &str) -> Outcome {
        if let Err(e) = self.opener.open(target) {
            tracing::warn!(selection = target, error = %e, "can't open selection");
        }
        Outcome::default()
    }

    fn list(&self, query_text: &str, scope: Option<&str>) -> Vec<ResultLine> {
        let candidates = translate(&self.index, query_text, scope, self.config.max_results);

        if candidates.is_empty() {
            return self
                .config
                .no_results_message
                .as_deref()
                .map(ResultLine::placeholder)
                .into_iter()
                .collect();
        }

        candidates
            .iter()
            .map(|c| output::format(c, self.config.show_icons))
            .collect()
    }
}

/// Enclosing folder of a URL scope, `None` at the root or for non-URLs
fn parent_of(scope: &str) -> Option<String> {
    let mut url = Url::parse(scope).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().pop();

    let parent = url.to_string();
    (parent != scope).then_some(parent)
}

/// Scope as shown to the user: a local path when it is one
fn display_scope(scope: &str) -> String {
    Url::parse(scope)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| scope.to_string())
}

//! zenity dialogs
//!
//! zenity is driven entirely by `--flag` / `--flag=value` arguments. A
//! dialog is described as a [`ZenityArgs`] list and rendered into one
//! shell line, so the quoting rules live in exactly one place.

use super::{run_output, run_status, Adapter, DialogError, Operation};
use crate::backend::Backend;
use crate::platform::{Host, Invocation};
use std::path::Path;
use tracing::debug;

const LICENSE_CHECKBOX: &str = "I have read and accepted the terms of the license agreement.";

/// One zenity argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZenityArg {
    /// `--name`
    Bare(String),
    /// `--name='value'`
    Scalar(String, String),
    /// Unnamed values, one single-quoted token each
    Positional(Vec<String>),
}

/// Ordered zenity argument list; a name may appear more than once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZenityArgs {
    args: Vec<ZenityArg>,
}

impl ZenityArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bare(mut self, name: &str) -> Self {
        self.args.push(ZenityArg::Bare(name.to_string()));
        self
    }

    pub fn scalar(mut self, name: &str, value: impl ToString) -> Self {
        self.args
            .push(ZenityArg::Scalar(name.to_string(), value.to_string()));
        self
    }

    pub fn positional<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.args.push(ZenityArg::Positional(
            values.into_iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    /// Shell tokens in argument order
    ///
    /// Scalar values have `'` swapped for `"`; positional values have `'`
    /// removed. Either way nothing can close the surrounding quotes.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        for arg in &self.args {
            match arg {
                ZenityArg::Bare(name) => tokens.push(format!("--{}", name)),
                ZenityArg::Scalar(name, value) => {
                    tokens.push(format!("--{}='{}'", name, value.replace('\'', "\"")))
                }
                ZenityArg::Positional(values) => tokens.extend(
                    values
                        .iter()
                        .map(|value| format!("'{}'", value.replace('\'', ""))),
                ),
            }
        }
        tokens
    }

    pub fn command_line(&self) -> String {
        let line = format!("zenity {}", self.tokens().join(" "));
        debug!("zenity command: {}", line);
        line
    }

    fn invocation(&self) -> Invocation {
        Invocation::Shell(self.command_line())
    }
}

pub struct ZenityAdapter;

fn simple(kind: &str, text: &str, title: &str) -> ZenityArgs {
    ZenityArgs::new()
        .bare(kind)
        .scalar("title", title)
        .scalar("text", text)
}

/// Run and return the printed line, or `None` on cancel
fn read_line(host: &dyn Host, args: &ZenityArgs) -> Option<String> {
    run_output(host, &args.invocation())
        .filter(|c| c.success)
        .map(|c| c.line())
}

impl Adapter for ZenityAdapter {
    fn backend(&self) -> Backend {
        Backend::Zenity
    }

    fn supports(&self, _operation: Operation) -> bool {
        true
    }

    fn message(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        Ok(run_status(host, &simple("info", text, title).invocation()))
    }

    fn yes_no(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        Ok(run_status(host, &simple("question", text, title).invocation()))
    }

    fn error(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        Ok(run_status(host, &simple("error", text, title).invocation()))
    }

    fn progress(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        let args = simple("progress", text, title)
            .bare("no-cancel")
            .scalar("percentage", 2)
            .bare("pulsate");
        Ok(run_status(host, &args.invocation()))
    }

    fn license(&self, host: &dyn Host, file: &Path, title: &str) -> Result<bool, DialogError> {
        let args = ZenityArgs::new()
            .bare("text-info")
            .scalar("title", title)
            .scalar("filename", file.display())
            .scalar("checkbox", LICENSE_CHECKBOX);
        Ok(run_status(host, &args.invocation()))
    }

    fn choose(
        &self,
        host: &dyn Host,
        entries: &[&str],
        text: &str,
        title: &str,
    ) -> Result<Option<String>, DialogError> {
        if entries.is_empty() {
            return Err(DialogError::InvalidInput(
                "nothing to choose from".to_string(),
            ));
        }

        let rows = entries
            .iter()
            .enumerate()
            .flat_map(|(index, entry)| [index.to_string(), entry.to_string()]);
        let args = ZenityArgs::new()
            .bare("list")
            .bare("radiolist")
            .scalar("title", title)
            .scalar("text", text)
            .scalar("print-column", "ALL")
            .scalar("column", "#")
            .scalar("column", "Items")
            .positional(rows);
        Ok(read_line(host, &args))
    }

    fn pick_file(&self, host: &dyn Host, filters: &[&str], title: &str) -> Result<String, DialogError> {
        let mut args = ZenityArgs::new()
            .bare("file-selection")
            .scalar("title", title);
        for filter in filters {
            args = args.scalar("file-filter", filter);
        }
        Ok(read_line(host, &args).unwrap_or_default())
    }

    fn pick_directory(&self, host: &dyn Host, title: &str) -> Result<String, DialogError> {
        let args = ZenityArgs::new()
            .bare("file-selection")
            .bare("directory")
            .scalar("title", title);
        Ok(read_line(host, &args).unwrap_or_default())
    }

    fn text_entry(&self, host: &dyn Host, prompt: &str, title: &str) -> Result<String, DialogError> {
        let args = simple("entry", prompt, title);
        Ok(read_line(host, &args).unwrap_or_default())
    }
}

use std::{
    cell::Cell,
    fmt::{Display, Formatter},
    rc::Rc,
};

use lol_html::html_content::{ContentType, Element, EndTag};

use crate::{
    model::HashToken,
    utilities::{
        CSP_META_HTTP_EQUIV, ScriptInventory, TemplateScope, hash_source, scan_document,
        synthesize_loader,
    },
};

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("HTML rewriting failed")]
    Rewrite(#[from] lol_html::errors::RewritingError),
    #[error("Document has no explicit <{0}> tag, implied <{0}> elements are not supported")]
    MissingElement(&'static str),
    #[error("Document never closes the <{0}> element")]
    UnclosedElement(&'static str),
    #[error("`{operation}` can't run while the document is {state}")]
    OutOfOrder {
        operation: &'static str,
        state: DocumentState,
    },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DocumentState {
    Loaded,
    Refactored,
    Finalized,
}

impl Display for DocumentState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded => f.write_str("loaded"),
            Self::Refactored => f.write_str("refactored"),
            Self::Finalized => f.write_str("finalized"),
        }
    }
}

/// An HTML document moving through `Loaded -> Refactored -> Finalized`.
///
/// Every step is one rewriting pass over the current markup. The markup is only replaced
/// once a pass succeeded, so a failed step leaves the previous document intact.
#[derive(Debug)]
pub struct Document {
    html: String,
    state: DocumentState,
}

impl Document {
    /// Fails with [`DocumentError::MissingElement`] unless both `<head>` and `<body>` are
    /// written out as tags; elements the HTML parser would only imply don't count.
    pub fn parse(html: impl Into<String>) -> Result<Self, DocumentError> {
        let html = html.into();
        let inventory = scan_document(&html)?;

        if !inventory.has_head {
            return Err(DocumentError::MissingElement("head"));
        }

        if !inventory.has_body {
            return Err(DocumentError::MissingElement("body"));
        }

        Ok(Self {
            html,
            state: DocumentState::Loaded,
        })
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn scripts(&self) -> Result<ScriptInventory, DocumentError> {
        Ok(ScriptInventory::partition(scan_document(&self.html)?.scripts))
    }

    /// Removes every sourced script and appends a single loader script for them to `<body>`.
    ///
    /// Returns the number of removed scripts. Nothing is appended when there were none.
    pub fn refactor(&mut self) -> Result<usize, DocumentError> {
        self.require_state("refactor", &[DocumentState::Loaded])?;

        let scripts = self.scripts()?;
        let loader = synthesize_loader(&scripts.sourced);
        let loader_html_opt = (!loader.is_empty()).then(|| format!("<script>{loader}</script>"));
        let body_seen = Cell::new(false);
        let body_closed = Rc::new(Cell::new(false));
        let template_scope = TemplateScope::default();

        let html = lol_html::rewrite_str(
            &self.html,
            lol_html::RewriteStrSettings {
                element_content_handlers: vec![
                    lol_html::element!("template", |element| {
                        template_scope.enter(element);

                        Ok(())
                    }),
                    lol_html::element!("script[src]", |element| {
                        if !template_scope.is_inside() {
                            element.remove();
                        }

                        Ok(())
                    }),
                    lol_html::element!("body", |element| {
                        if body_seen.replace(true) {
                            return Ok(());
                        }

                        if let Some(loader_html) = loader_html_opt.as_deref() {
                            append_before_end_tag(element, loader_html, Rc::clone(&body_closed));
                        }

                        Ok(())
                    }),
                ],
                ..lol_html::RewriteStrSettings::new()
            },
        )?;

        if loader_html_opt.is_some() && !body_closed.get() {
            return Err(DocumentError::UnclosedElement("body"));
        }

        log::debug!(
            "moved {} sourced script(s) into the loader, {} inline script(s) left untouched",
            scripts.sourced.len(),
            scripts.inline.len()
        );

        self.html = html;
        self.state = DocumentState::Refactored;

        Ok(scripts.sourced.len())
    }

    /// Hashes every script without `src`, in document order.
    ///
    /// Runs after [`Document::refactor`], so the loader script is part of the result.
    pub fn collect_script_hashes(&self) -> Result<Vec<HashToken>, DocumentError> {
        self.require_state(
            "collect_script_hashes",
            &[DocumentState::Refactored, DocumentState::Finalized],
        )?;

        Ok(self
            .scripts()?
            .inline
            .iter()
            .map(|script| hash_source(&script.body))
            .collect())
    }

    pub fn collect_style_hashes(&self) -> Result<Vec<HashToken>, DocumentError> {
        Ok(scan_document(&self.html)?
            .styles
            .iter()
            .map(|style| hash_source(style))
            .collect())
    }

    /// Inserts `<meta http-equiv="Content-Security-Policy">` as the first child of `<head>`.
    pub fn inject_policy(&mut self, csp: &str) -> Result<(), DocumentError> {
        self.require_state(
            "inject_policy",
            &[DocumentState::Loaded, DocumentState::Refactored],
        )?;

        let meta_html = format!(
            "<meta http-equiv=\"{}\" content=\"{}\">",
            CSP_META_HTTP_EQUIV,
            escape_attribute_value(csp)
        );
        let head_seen = Cell::new(false);

        let html = lol_html::rewrite_str(
            &self.html,
            lol_html::RewriteStrSettings {
                element_content_handlers: vec![lol_html::element!("head", |element| {
                    if !head_seen.replace(true) {
                        element.prepend(&meta_html, ContentType::Html);
                    }

                    Ok(())
                })],
                ..lol_html::RewriteStrSettings::new()
            },
        )?;

        self.html = html;
        self.state = DocumentState::Finalized;

        Ok(())
    }

    fn require_state(
        &self,
        operation: &'static str,
        allowed: &[DocumentState],
    ) -> Result<(), DocumentError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(DocumentError::OutOfOrder {
                operation,
                state: self.state,
            })
        }
    }
}

fn append_before_end_tag(element: &mut Element<'_, '_>, html: &str, closed: Rc<Cell<bool>>) {
    let html = String::from(html);

    if let Some(handlers) = element.end_tag_handlers() {
        handlers.push(Box::new(move |end_tag: &mut EndTag<'_>| {
            end_tag.before(&html, ContentType::Html);
            closed.set(true);

            Ok(())
        }));
    }
}

fn escape_attribute_value(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

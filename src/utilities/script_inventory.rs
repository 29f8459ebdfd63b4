use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use lol_html::{
    errors::RewritingError,
    html_content::{Element, EndTag},
};

/// A `<script>` element as found in the document.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScriptElement {
    pub src: Option<String>,
    pub body: String,
}

impl ScriptElement {
    /// Any `src` attribute makes a script "sourced", whatever its body contains.
    pub fn is_sourced(&self) -> bool {
        self.src.is_some()
    }
}

/// Scripts split into sourced and inline sets, both in document order.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct ScriptInventory {
    pub sourced: Vec<ScriptElement>,
    pub inline: Vec<ScriptElement>,
}

impl ScriptInventory {
    pub fn partition(scripts: Vec<ScriptElement>) -> Self {
        let (sourced, inline) = scripts.into_iter().partition(ScriptElement::is_sourced);

        Self { sourced, inline }
    }

    pub fn total(&self) -> usize {
        self.sourced.len() + self.inline.len()
    }
}

/// Everything a single read-only pass over a document learns.
///
/// Contents of `<template>` elements are inert and not part of the inventory.
#[derive(Debug, Default)]
pub struct DocumentInventory {
    pub scripts: Vec<ScriptElement>,
    pub styles: Vec<String>,
    pub has_head: bool,
    pub has_body: bool,
}

/// Tracks how many `<template>` elements the current rewriting pass is inside of.
#[derive(Debug, Clone, Default)]
pub struct TemplateScope(Rc<Cell<usize>>);

impl TemplateScope {
    pub fn enter(&self, element: &mut Element<'_, '_>) {
        if let Some(handlers) = element.end_tag_handlers() {
            let depth = Rc::clone(&self.0);

            depth.set(depth.get() + 1);
            handlers.push(Box::new(move |_: &mut EndTag<'_>| {
                depth.set(depth.get().saturating_sub(1));

                Ok(())
            }));
        }
    }

    pub fn is_inside(&self) -> bool {
        self.0.get() > 0
    }
}

pub fn scan_document(html: &str) -> Result<DocumentInventory, RewritingError> {
    let scripts = RefCell::new(Vec::<ScriptElement>::new());
    let styles = RefCell::new(Vec::<String>::new());
    let has_head = Cell::new(false);
    let has_body = Cell::new(false);
    let template_scope = TemplateScope::default();

    {
        let mut rewriter = lol_html::HtmlRewriter::new(
            lol_html::Settings {
                element_content_handlers: vec![
                    lol_html::element!("template", |element| {
                        template_scope.enter(element);

                        Ok(())
                    }),
                    lol_html::element!("script", |element| {
                        if template_scope.is_inside() {
                            return Ok(());
                        }

                        let src = match element.get_attribute("src") {
                            Some(value) => Some(decode_attribute_value(&value)?),
                            None => None,
                        };

                        scripts.borrow_mut().push(ScriptElement {
                            src,
                            body: String::new(),
                        });

                        Ok(())
                    }),
                    lol_html::text!("script", |chunk| {
                        if template_scope.is_inside() {
                            return Ok(());
                        }

                        if let Some(script) = scripts.borrow_mut().last_mut() {
                            script.body.push_str(chunk.as_str());
                        }

                        Ok(())
                    }),
                    lol_html::element!("style", |_| {
                        if !template_scope.is_inside() {
                            styles.borrow_mut().push(String::new());
                        }

                        Ok(())
                    }),
                    lol_html::text!("style", |chunk| {
                        if template_scope.is_inside() {
                            return Ok(());
                        }

                        if let Some(style) = styles.borrow_mut().last_mut() {
                            style.push_str(chunk.as_str());
                        }

                        Ok(())
                    }),
                    lol_html::element!("head", |_| {
                        has_head.set(true);

                        Ok(())
                    }),
                    lol_html::element!("body", |_| {
                        has_body.set(true);

                        Ok(())
                    }),
                ],
                ..lol_html::Settings::new()
            },
            |_: &[u8]| {},
        );

        rewriter.write(html.as_bytes())?;
        rewriter.end()?;
    }

    let inventory = DocumentInventory {
        scripts: scripts.into_inner(),
        styles: styles.into_inner(),
        has_head: has_head.get(),
        has_body: has_body.get(),
    };

    log::debug!(
        "scanned document: {} script(s), {} style(s)",
        inventory.scripts.len(),
        inventory.styles.len()
    );

    Ok(inventory)
}

/// Attribute values come back from the rewriter with character references still encoded.
fn decode_attribute_value(
    value: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    use htmlentity::entity::ICodedDataTrait;

    let decoded = htmlentity::entity::decode(value.as_bytes());

    Ok(ICodedDataTrait::to_string(&decoded)?)
}

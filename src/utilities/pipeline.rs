use crate::{
    model::DirectiveSet,
    utilities::{Document, DocumentError, assemble_policy},
};

/// Hook for build tooling: receives a finished HTML document right before it is emitted and
/// hands back the text that should be written instead.
pub trait HtmlTransform {
    type Error: std::error::Error;

    fn transform(&self, html: &str) -> Result<String, Self::Error>;
}

#[derive(Debug)]
pub struct ProcessedDocument {
    pub html: String,
    pub policy: String,
}

/// The full rewrite: refactor sourced scripts, hash inline content, inject the policy.
#[derive(Debug, Clone, Default)]
pub struct StrictCsp {
    pub base: DirectiveSet,
    pub hash_styles: bool,
}

impl StrictCsp {
    pub fn new(base: DirectiveSet) -> Self {
        Self {
            base,
            hash_styles: false,
        }
    }

    pub fn with_style_hashes(mut self, hash_styles: bool) -> Self {
        self.hash_styles = hash_styles;
        self
    }

    pub fn apply(&self, html: &str) -> Result<ProcessedDocument, DocumentError> {
        let mut document = Document::parse(html)?;

        document.refactor()?;

        let script_hashes = document.collect_script_hashes()?;
        let style_hashes_opt = if self.hash_styles {
            Some(document.collect_style_hashes()?)
        } else {
            None
        };

        if script_hashes.is_empty() {
            log::warn!("document has no inline scripts, `script-src` only allows 'strict-dynamic'");
        }

        let policy = assemble_policy(&self.base, &script_hashes, style_hashes_opt.as_deref());

        document.inject_policy(&policy)?;

        Ok(ProcessedDocument {
            html: document.into_html(),
            policy,
        })
    }
}

impl HtmlTransform for StrictCsp {
    type Error = DocumentError;

    fn transform(&self, html: &str) -> Result<String, Self::Error> {
        Ok(self.apply(html)?.html)
    }
}

#[cfg(test)]
mod tests {
    use super::{HtmlTransform, StrictCsp};
    use crate::{
        model::DirectiveSet,
        utilities::{
            DocumentError,
            test_fixtures::{
                TEMPLATE_HTML_WITH_INLINE_SCRIPT, TEMPLATE_HTML_WITH_INLINE_STYLE,
                TEMPLATE_HTML_WITH_SOURCED_SCRIPT,
            },
        },
    };

    fn options_directive_set() -> DirectiveSet {
        let mut directive_set = DirectiveSet::new();

        directive_set.insert("base-uri", ["'self'"]);
        directive_set.insert("object-src", ["'none'"]);
        directive_set.insert("style-src", ["'self'", "'unsafe-inline'"]);
        directive_set
    }

    #[test]
    fn sourced_script() {
        let processed = StrictCsp::default()
            .apply(TEMPLATE_HTML_WITH_SOURCED_SCRIPT)
            .unwrap();

        assert_eq!(
            processed.policy,
            "base-uri 'self';object-src 'none';script-src 'strict-dynamic' 'sha256-mYdombCl/LUAKynRv79a3hlmGp7o1Dsd1wEeYRQb0NA=';"
        );
    }

    #[test]
    fn inline_script() {
        let processed = StrictCsp::default()
            .apply(TEMPLATE_HTML_WITH_INLINE_SCRIPT)
            .unwrap();

        assert_eq!(
            processed.policy,
            "base-uri 'self';object-src 'none';script-src 'strict-dynamic' 'sha256-S4W5IfMGp/y53v/Xg551TrOjlh3QicY3LqXAnb8sfrc=' 'sha256-mYdombCl/LUAKynRv79a3hlmGp7o1Dsd1wEeYRQb0NA=';"
        );
    }

    #[test]
    fn inline_style() {
        let processed = StrictCsp::default()
            .with_style_hashes(true)
            .apply(TEMPLATE_HTML_WITH_INLINE_STYLE)
            .unwrap();

        assert_eq!(
            processed.policy,
            "base-uri 'self';object-src 'none';script-src 'strict-dynamic' 'sha256-S4W5IfMGp/y53v/Xg551TrOjlh3QicY3LqXAnb8sfrc=' 'sha256-mYdombCl/LUAKynRv79a3hlmGp7o1Dsd1wEeYRQb0NA=';style-src 'self' 'sha256-Pme0qVBbJGACcvHOa2d2xK4uveiPdlWdSipR9gLYAMQ=';"
        );
    }

    #[test]
    fn inline_style_ignored_by_default() {
        let processed = StrictCsp::default()
            .apply(TEMPLATE_HTML_WITH_INLINE_STYLE)
            .unwrap();

        assert!(!processed.policy.contains("style-src"));
    }

    #[test]
    fn with_options() {
        let processed = StrictCsp::new(options_directive_set())
            .apply(TEMPLATE_HTML_WITH_INLINE_SCRIPT)
            .unwrap();

        assert_eq!(
            processed.policy,
            "base-uri 'self';object-src 'none';style-src 'self' 'unsafe-inline';script-src 'strict-dynamic' 'sha256-S4W5IfMGp/y53v/Xg551TrOjlh3QicY3LqXAnb8sfrc=' 'sha256-mYdombCl/LUAKynRv79a3hlmGp7o1Dsd1wEeYRQb0NA=';"
        );
    }

    #[test]
    fn generated_html() {
        let strict_csp = StrictCsp::new(options_directive_set());
        let processed = strict_csp.apply(TEMPLATE_HTML_WITH_INLINE_SCRIPT).unwrap();
        let html = processed.html.as_str();

        assert!(html.contains("var scripts = ['analytics.js','app.js'];"));
        assert!(!html.contains("<script src=\"analytics.js\"></script>"));
        assert!(!html.contains("<script src=\"app.js\"></script>"));
        assert!(html.contains(&format!(
            "<head><meta http-equiv=\"Content-Security-Policy\" content=\"{}\">",
            processed.policy
        )));
        assert_eq!(
            strict_csp.transform(TEMPLATE_HTML_WITH_INLINE_SCRIPT).unwrap(),
            processed.html
        );
    }

    #[test]
    fn malformed_document() {
        assert!(matches!(
            StrictCsp::default().transform("<p>no landmarks</p>"),
            Err(DocumentError::MissingElement("head"))
        ));
    }
}

pub use content_security_policy::assemble_policy;
pub use document::{Document, DocumentError, DocumentState};
pub use hash_source::hash_source;
pub use loader_script::synthesize_loader;
pub use pipeline::{HtmlTransform, ProcessedDocument, StrictCsp};
pub use script_inventory::{
    DocumentInventory, ScriptElement, ScriptInventory, TemplateScope, scan_document,
};
pub use shared::{BASE64_ENGINE, CSP_META_HTTP_EQUIV};

mod content_security_policy;
mod document;
mod hash_source;
mod loader_script;
mod pipeline;
mod script_inventory;
mod shared;
#[cfg(test)]
mod test_fixtures;

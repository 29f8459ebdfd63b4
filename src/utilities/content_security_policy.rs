use crate::model::{DirectiveSet, HashToken, SCRIPT_SRC, STRICT_DYNAMIC};

/// Builds the policy string for a `Content-Security-Policy` header or `<meta>` tag.
///
/// `script-src` is always recomputed as `'strict-dynamic'` followed by `script_hashes`,
/// replacing whatever `base` holds for it. Style hashes, if any, are folded into the
/// `style-src` of `base`; every other directive passes through untouched.
pub fn assemble_policy(
    base: &DirectiveSet,
    script_hashes: &[HashToken],
    style_hashes_opt: Option<&[HashToken]>,
) -> String {
    let base = match style_hashes_opt {
        Some(style_hashes) => base.with_style_hashes(style_hashes),
        None => base.clone(),
    };
    let script_src = std::iter::once(STRICT_DYNAMIC)
        .chain(script_hashes.iter().map(HashToken::as_str))
        .map(String::from)
        .collect::<Vec<String>>();

    base.with_directive(SCRIPT_SRC, script_src).to_string()
}

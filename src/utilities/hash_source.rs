use base64::Engine;
use sha2::{Digest, Sha256};

use crate::{model::HashToken, utilities::BASE64_ENGINE};

/// Hashes the exact text of an inline `<script>`/`<style>` body, without any trimming.
pub fn hash_source(text: &str) -> HashToken {
    let mut hasher = Sha256::new();

    hasher.update(text.as_bytes());

    HashToken::from_digest_base64(&BASE64_ENGINE.encode(hasher.finalize().as_slice()))
}

#[cfg(test)]
mod tests {
    use super::hash_source;

    #[test]
    fn hash_inline_script_n_1() {
        assert_eq!(
            hash_source("\n        console.log(\"Hello World\");\n    ").as_str(),
            "'sha256-S4W5IfMGp/y53v/Xg551TrOjlh3QicY3LqXAnb8sfrc='"
        );
    }

    #[test]
    fn hash_empty_body() {
        assert_eq!(
            hash_source("").as_str(),
            "'sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU='"
        );
    }

    #[test]
    fn hash_is_whitespace_sensitive() {
        let body = "body { margin: 0; }";

        assert_eq!(hash_source(body), hash_source(body));
        assert_eq!(
            hash_source(body).as_str(),
            "'sha256-Pme0qVBbJGACcvHOa2d2xK4uveiPdlWdSipR9gLYAMQ='"
        );
        assert_ne!(hash_source(body), hash_source(" body { margin: 0; }"));
    }
}

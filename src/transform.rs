use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Import line every generated post carries, matching the component path of
/// the publishing site.
pub(crate) const COMPONENT_IMPORT: &str =
    r#"import { CaptionedImage } from "../components/CaptionedImage.astro";"#;

/// Prefix the component resolves image sources against.
const ASSET_IMPORT_PREFIX: &str = "../assets/blog/";

// `![alt](path)` on a single line; alt may be empty, path runs to the first
// closing parenthesis. Nested brackets or parentheses are not supported.
static IMAGE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^)\n]*)\)").unwrap());

/// Replace every image reference in the body with a `<CaptionedImage/>`
/// block. Single pass, in document order; replacement text is not
/// re-scanned.
pub(crate) fn transform_body(body: &str) -> String {
    IMAGE_REF
        .replace_all(body, |caps: &Captures| captioned_image(&caps[2], &caps[1]))
        .into_owned()
}

/// Image paths referenced by the body, in document order, alt text ignored.
/// The copy step runs this against the untransformed body.
pub(crate) fn image_paths(body: &str) -> Vec<String> {
    IMAGE_REF
        .captures_iter(body)
        .map(|caps| caps[2].to_string())
        .collect()
}

/// Format one component call. The caption falls back to the path's file
/// stem when the alt text is empty. Quotes inside alt or caption are written
/// as-is and yield malformed MDX; known limitation.
fn captioned_image(path: &str, alt: &str) -> String {
    let caption = if alt.is_empty() { stem(path) } else { alt };
    format!(
        "<CaptionedImage\n  src={{import(\"{ASSET_IMPORT_PREFIX}{path}\")}}\n  alt=\"{alt}\"\n  caption=\"{caption}\"\n/>"
    )
}

/// Final path segment, cut before the last `.`.
fn stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => name,
    }
}

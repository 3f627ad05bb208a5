use std::{fs, path::Path};

use anyhow::Context as _;
use tracing::debug;

use crate::{
    error::{BlitlineError, BlitlineResult},
    model::Timeline,
};

/// Parse the bare JSON array form.
pub fn timeline_from_json_str(s: &str) -> BlitlineResult<Timeline> {
    let timeline: Timeline = serde_json::from_str(s)
        .map_err(|e| BlitlineError::parse(format!("timeline json: {e}")))?;
    Ok(timeline)
}

/// Parse the generated-JS wrapper form: a single `<ident> = <json array>`
/// assignment, optionally prefixed with `var`/`let`/`const` and terminated
/// with a semicolon. Encoders emit one such statement per animation.
pub fn timeline_from_js_str(s: &str) -> BlitlineResult<Timeline> {
    let body = strip_assignment(s)?;
    timeline_from_json_str(body)
}

/// Load a timeline file, accepting either form. Dispatches on content, not
/// extension: extracted `.json` payloads and generated `.js` files both load.
pub fn load_timeline(path: impl AsRef<Path>) -> BlitlineResult<Timeline> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("read timeline '{}'", path.display()))?;

    let timeline = if text.trim_start().starts_with('[') {
        timeline_from_json_str(&text)?
    } else {
        timeline_from_js_str(&text)?
    };

    debug!(
        path = %path.display(),
        frames = timeline.frame_count(),
        "loaded timeline"
    );
    Ok(timeline)
}

fn strip_assignment(s: &str) -> BlitlineResult<&str> {
    let trimmed = s.trim();
    let Some((lhs, rhs)) = trimmed.split_once('=') else {
        return Err(BlitlineError::parse(
            "expected a '<name> = [...]' timeline assignment",
        ));
    };

    let mut lhs_tokens = lhs.split_whitespace();
    let name = match lhs_tokens.next() {
        Some(kw @ ("var" | "let" | "const")) => lhs_tokens.next().ok_or_else(|| {
            BlitlineError::parse(format!("'{kw}' without a variable name"))
        })?,
        Some(name) => name,
        None => return Err(BlitlineError::parse("timeline assignment has no left side")),
    };
    if lhs_tokens.next().is_some() || !is_identifier(name) {
        return Err(BlitlineError::parse(format!(
            "'{}' is not a timeline variable name",
            lhs.trim()
        )));
    }

    let body = rhs.trim().trim_end_matches(';').trim_end();
    if !body.starts_with('[') {
        return Err(BlitlineError::parse(
            "timeline assignment right side is not an array",
        ));
    }
    Ok(body)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

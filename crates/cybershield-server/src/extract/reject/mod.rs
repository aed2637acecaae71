//! Drop-in replacements for the axum extractors with richer rejections.

mod enhanced_json;
mod enhanced_path;

pub(crate) use self::enhanced_json::MAX_JSON_PAYLOAD_SIZE;
pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;

/// Keeps the first lines of a rejection message and bounds its length.
fn sanitize_error_message(message: &str) -> String {
    let lines = message.lines().take(3).collect::<Vec<_>>();
    lines.join(" ").chars().take(200).collect()
}

/// Beatmap id used when a file does not declare one.
pub const NO_BEATMAP_ID: i32 = -1;

/// Find the `BeatmapID` entry of the `[Metadata]` section.
///
/// Returns `None` if the section or key is missing or the value is not an
/// integer.
pub fn parse_beatmap_id(content: &str) -> Option<i32> {
    let mut in_metadata = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if in_metadata {
                // Metadata section ended without the key
                return None;
            }
            in_metadata = line == "[Metadata]";
            continue;
        }

        if !in_metadata {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            if key.trim() == "BeatmapID" {
                return value.trim().parse().ok();
            }
        }
    }

    None
}

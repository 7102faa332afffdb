const MAX_PREVIEW_CHARS: usize = 80;

/// Short single-line preview of user text for log fields.
pub fn preview_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = collapsed.chars().count();
    if total_chars <= MAX_PREVIEW_CHARS {
        return collapsed;
    }

    let head: String = collapsed.chars().take(MAX_PREVIEW_CHARS).collect();
    format!("{head}... ({total_chars} chars total)")
}

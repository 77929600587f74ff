//! Result card rendering for image export.

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::model::PersonalityResult;

const CARD_WIDTH: u32 = 600;
const HEADER_HEIGHT: u32 = 150;
const LINE_HEIGHT: u32 = 26;
const WRAP_COLUMNS: usize = 52;
const FALLBACK_STEM: &str = "personality";

/// File stem derived from a personality type label.
///
/// Runs of non-alphanumeric characters collapse to a single `-`, leading and
/// trailing separators are dropped and the result is lower-cased.
#[must_use]
pub fn card_file_stem(personality_type: &str) -> String {
    let mut stem = String::with_capacity(personality_type.len());
    let mut pending_dash = false;
    for ch in personality_type.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !stem.is_empty() {
                stem.push('-');
            }
            pending_dash = false;
            stem.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if stem.is_empty() {
        FALLBACK_STEM.to_owned()
    } else {
        stem
    }
}

/// Render the result card as a standalone SVG document.
#[must_use]
pub fn render_card_svg(result: &PersonalityResult) -> String {
    let color = sanitize_color(&result.color);
    let message_lines = textwrap::wrap(&result.message, WRAP_COLUMNS);
    let trait_lines: Vec<String> = result
        .traits
        .iter()
        .map(|item| format!("• {item}"))
        .collect();

    let body_lines = 2 + message_lines.len() + 2 + trait_lines.len();
    let height = u32::try_from(body_lines)
        .unwrap_or(u32::MAX)
        .saturating_mul(LINE_HEIGHT)
        .saturating_add(HEADER_HEIGHT + 40);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CARD_WIDTH}" height="{height}" viewBox="0 0 {CARD_WIDTH} {height}">"#
    );
    let _ = writeln!(
        svg,
        r##"  <rect x="2" y="2" width="{}" height="{}" rx="24" fill="#ffffff" stroke="{color}" stroke-width="4"/>"##,
        CARD_WIDTH - 4,
        height - 4
    );
    let _ = writeln!(
        svg,
        r#"  <rect x="2" y="2" width="{}" height="{HEADER_HEIGHT}" rx="24" fill="{color}"/>"#,
        CARD_WIDTH - 4
    );
    let _ = writeln!(
        svg,
        r##"  <text x="{}" y="60" text-anchor="middle" font-family="sans-serif" font-size="20" fill="#ffffff">Your Personality Type</text>"##,
        CARD_WIDTH / 2
    );
    let _ = writeln!(
        svg,
        r##"  <text x="{}" y="110" text-anchor="middle" font-family="sans-serif" font-size="32" font-weight="bold" fill="#ffffff">{}</text>"##,
        CARD_WIDTH / 2,
        escape(&result.personality_type)
    );

    let mut y = HEADER_HEIGHT + 40;
    push_line(&mut svg, y, "Message for you:", true);
    y += LINE_HEIGHT;
    for line in &message_lines {
        push_line(&mut svg, y, line, false);
        y += LINE_HEIGHT;
    }
    y += LINE_HEIGHT;
    push_line(&mut svg, y, "Your Key Traits:", true);
    y += LINE_HEIGHT;
    for line in &trait_lines {
        push_line(&mut svg, y, line, false);
        y += LINE_HEIGHT;
    }

    svg.push_str("</svg>\n");
    svg
}

fn push_line(svg: &mut String, y: u32, text: &str, heading: bool) {
    let weight = if heading { "bold" } else { "normal" };
    let _ = writeln!(
        svg,
        r##"  <text x="40" y="{y}" font-family="sans-serif" font-size="18" font-weight="{weight}" fill="#333333">{}</text>"##,
        escape(text)
    );
}

// Anything that is not a plain hex color falls back to the first built-in accent.
fn sanitize_color(raw: &str) -> &str {
    let trimmed = raw.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if valid { trimmed } else { "#667eea" }
}

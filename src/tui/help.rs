//! Help text content for the help modal

pub fn get_help_text() -> Vec<String> {
    vec![
        "Navigation:",
        "  j/k, Up/Down   Select formula",
        "  g/G            First/last formula",
        "  Tab/S-Tab      Next/previous field",
        "",
        "Editing:",
        "  i / Enter      Edit focused field",
        "  Esc / Enter    Stop editing",
        "  Left/Right     Move cursor",
        "  Home/End       Start/end of field",
        "",
        "Expressions:",
        "  Numbers, declared variables, + - * / and parentheses.",
        "  A comma is accepted as decimal separator.",
        "  The result is recalculated on every keystroke.",
        "",
        "Other:",
        "  ?              Toggle this help",
        "  q              Quit",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

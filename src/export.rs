//! Markdown export of every card with its current outcome.

use formulary_core::{FormulaCard, Formulary};
use std::io::Write;
use std::path::Path;

/// Write all cards to a markdown file.
pub fn write_markdown(path: &Path, formulary: &Formulary, hint: &str) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    render_markdown(&mut file, formulary, hint)
}

pub fn render_markdown<W: Write>(out: &mut W, formulary: &Formulary, hint: &str) -> std::io::Result<()> {
    let title = formulary.name.as_deref().unwrap_or("Formulas");
    writeln!(out, "# {}", escape_markdown(title))?;
    if let Some(desc) = formulary.description.as_deref() {
        writeln!(out)?;
        writeln!(out, "{}", desc)?;
    }

    if formulary.is_empty() {
        writeln!(out)?;
        writeln!(out, "*Empty catalog*")?;
    }

    for section in formulary.sections() {
        writeln!(out)?;
        writeln!(out, "## {}", escape_markdown(&section.title))?;
        if let Some(desc) = section.description.as_deref() {
            writeln!(out)?;
            writeln!(out, "{}", desc)?;
        }
        for card in &section.cards {
            write_card(out, card, hint)?;
        }
    }

    if let Some(notice) = formulary.legal_notice.as_deref() {
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)?;
        writeln!(out, "*{}*", notice)?;
    }
    Ok(())
}

fn write_card<W: Write>(out: &mut W, card: &FormulaCard, hint: &str) -> std::io::Result<()> {
    let entry = card.entry();
    writeln!(out)?;
    writeln!(out, "### {}", escape_markdown(&entry.name))?;
    if let Some(desc) = entry.description.as_deref() {
        writeln!(out)?;
        writeln!(out, "{}", desc)?;
    }
    writeln!(out)?;
    if card.expression().trim().is_empty() {
        writeln!(out, "Expression: *(empty)*")?;
    } else {
        writeln!(out, "Expression: `{}`", card.expression().replace('`', "'"))?;
    }

    if !entry.variables.is_empty() {
        writeln!(out)?;
        writeln!(out, "| Variable | Label | Value |")?;
        writeln!(out, "|---|---|---|")?;
        for var in &entry.variables {
            let value = card.value(&var.id).unwrap_or(0.0);
            writeln!(
                out,
                "| {} | {} | {} |",
                var.id,
                escape_markdown(&var.display_label()),
                value
            )?;
        }
    }

    writeln!(out)?;
    let display = card.display();
    if display.is_error() {
        writeln!(out, "Result: *{}*", display.text())?;
    } else {
        writeln!(out, "Result: **{}**", display.text())?;
    }
    writeln!(out)?;
    writeln!(out, "> {}", hint)?;
    Ok(())
}

fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulary_core::HINT;
    use formulary_core::catalog::parse_catalog_json;

    fn export(json: &str) -> String {
        let formulary = Formulary::new(parse_catalog_json(json).unwrap());
        let mut buf: Vec<u8> = Vec::new();
        render_markdown(&mut buf, &formulary, HINT).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_export_cards() {
        let md = export(
            r#"{ "name": "Norms", "legalNotice": "Licensed use only.", "formulaSections": [
                { "id": "el", "title": "Electrical", "entries": [
                    { "id": "power", "name": "Power", "expression": "U * I", "variables": [
                        { "id": "U", "label": "Voltage", "unit": "V", "defaultValue": 230 },
                        { "id": "I", "label": "Current", "unit": "A", "defaultValue": 2 }
                    ] },
                    { "id": "current", "name": "Current", "expression": "P / U", "variables": [
                        { "id": "P", "label": "Power|W" }, { "id": "U", "label": "Voltage" }
                    ] }
                ] }
            ] }"#,
        );
        assert!(md.starts_with("# Norms\n"));
        assert!(md.contains("## Electrical"));
        assert!(md.contains("Expression: `U * I`"));
        assert!(md.contains("| U | Voltage (V) | 230 |"));
        assert!(md.contains("Result: **460.000**"));
        assert!(md.contains("Result: *Result is not a number.*"));
        assert!(md.contains("| P | Power\\|W | 0 |"));
        assert!(md.contains(&format!("> {}", HINT)));
        assert!(md.trim_end().ends_with("*Licensed use only.*"));
    }

    #[test]
    fn test_export_empty_catalog() {
        let md = export("[]");
        assert_eq!(md, "# Formulas\n\n*Empty catalog*\n");
    }
}

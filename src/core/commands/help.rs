use super::CommandKind;
use crate::highlight::StyleKind;
use crate::presentation::Presenter;

const USAGE_WIDTH: usize = 44;

pub(super) fn render(presenter: &mut dyn Presenter) {
    let rows: Vec<String> = CommandKind::ALL
        .iter()
        .map(|kind| format!("  {:<width$}- {}", kind.usage(), kind.description(), width = USAGE_WIDTH))
        .collect();
    let inner = rows.iter().map(|row| row.len() + 2).max().unwrap_or(0);
    let rule = "-".repeat(inner);

    presenter.plain(&format!("\n {}\n", rule));
    presenter.set_style(StyleKind::Heading);
    presenter.write(&format!("|{:<inner$}|\n", "  Available commands:", inner = inner));
    presenter.set_style(StyleKind::Default);

    let mut body = format!("|{}|\n", rule);
    for row in &rows {
        body.push_str(&format!("|{:<inner$}|\n", row, inner = inner));
    }
    body.push_str(&format!(" {}\n\n", rule));
    presenter.write(&body);
}

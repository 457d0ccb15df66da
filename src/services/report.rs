use crate::models::quote::{Outcome, Report, SymbolResult};
use crate::util;

pub const TABLE_HEADER: &str = "| Symbol | Start Price | Current Price | Change (%) |";
const TABLE_ALIGN: &str = "| :--- | :---: | :---: | :---: |";

/// 将报告渲染为 markdown 表格
pub fn render_report(report: &Report) -> String {
    let generated_at = report.generated_at();
    let mut output = format!("### Price Monitor (baseline: {})\n", report.baseline());
    output.push_str(&format!(
        "Updated: {} ({})\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        generated_at.timezone().name()
    ));
    output.push_str(TABLE_HEADER);
    output.push('\n');
    output.push_str(TABLE_ALIGN);
    output.push('\n');

    let rows: Vec<String> = report.results().iter().map(render_row).collect();
    output.push_str(&rows.join("\n"));
    output
}

pub fn render_row(result: &SymbolResult) -> String {
    match &result.outcome {
        Outcome::Ok {
            start_price,
            current_price,
            percent_change,
        } => format!(
            "| **{}** | {} | {} | {} |",
            result.symbol,
            util::format_price(*start_price),
            util::format_price(*current_price),
            util::format_change(*percent_change)
        ),
        Outcome::NoData => format!("| {} | N/A | N/A | No Data |", result.symbol),
        Outcome::Error { .. } => format!("| {} | Error | Error | Error |", result.symbol),
    }
}

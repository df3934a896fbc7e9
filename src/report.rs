use crate::comparison::ComparisonRow;
use crate::config::{DashboardConfig, DISPLAY_UNIT};
use crate::dashboard::{DashboardView, MarginalPanel, Panel};
use crate::dataset::{BaselineRecord, ScenarioRecord};
use crate::error::DashResult;
use crate::export::{self, DataTable};
use crate::format;
use crate::summary::HeadlineMetrics;
use crate::synthetic::{MonthlyFinancials, ScenarioLabel, SyntheticTotals};
use crate::threshold::{MarginalCrossing, WeeklyCrossing};
use std::path::Path;

// ═══════════════════════════════════════════════════════════════════════
// HTML helpers
// ═══════════════════════════════════════════════════════════════════════

const STYLE: &str = r#"*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#f5f5f5;color:#333}
header{background:#1a1a2e;color:#fff;padding:24px 32px}
header h1{font-size:1.4em;font-weight:500}
header h2{font-size:1em;font-weight:300;opacity:0.8;margin-top:4px}
.controls{margin-top:10px;font-size:0.85em;opacity:0.85}
main{max-width:1400px;margin:0 auto;padding:24px}
section{background:#fff;border-radius:8px;box-shadow:0 1px 3px rgba(0,0,0,0.1);padding:24px;margin-bottom:20px}
section h3{font-size:1.1em;margin-bottom:16px;color:#1a1a2e;border-bottom:2px solid #e0e0e0;padding-bottom:8px}
.metrics-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:12px}
.metric{background:#f8f9fa;border-radius:6px;padding:12px;text-align:center}
.metric .label{display:block;font-size:0.75em;color:#666;text-transform:uppercase;letter-spacing:0.5px}
.metric .value{display:block;font-size:1.3em;font-weight:600;margin-top:4px}
.metric .delta{display:block;font-size:0.8em;color:#34a853;margin-top:2px}
table{width:100%;border-collapse:collapse;font-size:0.9em}
th,td{padding:8px 12px;text-align:left;border-bottom:1px solid #e0e0e0}
th{background:#f8f9fa;font-weight:600}
.chart-row{display:grid;grid-template-columns:1fr 1fr;gap:20px;margin-bottom:20px}
.chart-row.three{grid-template-columns:1fr 1fr 1fr}
@media(max-width:900px){.chart-row,.chart-row.three{grid-template-columns:1fr}}
.chart-box{background:#fff;border-radius:8px;box-shadow:0 1px 3px rgba(0,0,0,0.1);padding:16px}
.chart-box h4{font-size:0.95em;margin-bottom:8px;color:#555}
canvas{width:100%!important;height:300px!important}
.warning{background:#fff4e5;border-left:4px solid #ea8c00;padding:12px 16px;border-radius:4px}
.info{background:#e8f0fe;border-left:4px solid #4285f4;padding:12px 16px;border-radius:4px;margin-bottom:16px}
button{padding:8px 20px;background:#4285f4;color:#fff;border:none;border-radius:4px;cursor:pointer;font-size:0.9em;margin-top:12px}
footer{display:grid;grid-template-columns:repeat(3,1fr);gap:20px;padding:16px 32px;color:#777;font-size:0.8em}"#;

const CHART_HELPERS: &str = r#"const mkDs=(l,c,d,o)=>{let s={label:l,data:d,borderColor:c,backgroundColor:c+'22',borderWidth:1.5,pointRadius:0,fill:false,tension:0.1};if(o)Object.assign(s,o);return s};
const hline=(l,y,xs)=>mkDs(l,'#ea433566',xs.map(x=>({x:x,y:y})),{borderDash:[6,3],borderWidth:1});
const xyOpts=(title,xLabel,yLabel)=>({responsive:true,maintainAspectRatio:false,parsing:true,plugins:{title:{display:true,text:title},legend:{position:'bottom',labels:{boxWidth:12,font:{size:11}}}},scales:{x:{type:'linear',title:{display:true,text:xLabel}},y:{title:{display:true,text:yLabel},beginAtZero:false}}});
function downloadBlob(data,filename,mime){
 const blob=new Blob([data],{type:mime});
 const url=URL.createObjectURL(blob);
 const a=document.createElement('a');
 a.href=url;a.download=filename;a.click();
 URL.revokeObjectURL(url);
}"#;

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn js_array_f64(data: &[f64]) -> String {
    let items: Vec<String> = data.iter().map(|v| format!("{:.4}", v)).collect();
    format!("[{}]", items.join(","))
}

fn js_array_u64(data: &[u64]) -> String {
    let items: Vec<String> = data.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(","))
}

fn js_array_str(data: &[String]) -> String {
    let items: Vec<String> = data.iter().map(|s| format!("\"{}\"", s)).collect();
    format!("[{}]", items.join(","))
}

fn js_points(xs: &[f64], ys: &[f64]) -> String {
    let items: Vec<String> = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| format!("{{x:{:.4},y:{:.4}}}", x, y))
        .collect();
    format!("[{}]", items.join(","))
}

fn metric_card(label: &str, value: &str, delta: &str) -> String {
    format!(
        "<div class=\"metric\"><span class=\"label\">{}</span><span class=\"value\">{}</span><span class=\"delta\">{}</span></div>\n",
        label,
        escape_html(value),
        escape_html(delta)
    )
}

fn table_html<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table>\n<tr>");
    for h in headers {
        html.push_str(&format!("<th>{}</th>", escape_html(h.as_ref())));
    }
    html.push_str("</tr>\n");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>");
    html
}

fn chart_box(id: &str, title: &str) -> String {
    format!(
        "<div class=\"chart-box\"><h4>{}</h4><canvas id=\"{}\"></canvas></div>",
        escape_html(title),
        id
    )
}

fn page(title: &str, subtitle: &str, controls: &str, body: &str, footer: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
<style>
{style}
</style>
</head>
<body>
<header>
 <h1>{title}</h1>
 <h2>{subtitle}</h2>
 <div class="controls">{controls}</div>
</header>
<main>
{body}
</main>
<footer>
{footer}
</footer>
<script>
{helpers}
{script}
</script>
</body>
</html>"#,
        title = escape_html(title),
        subtitle = escape_html(subtitle),
        controls = escape_html(controls),
        style = STYLE,
        body = body,
        footer = footer,
        helpers = CHART_HELPERS,
        script = script,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// Scenario dashboard
// ═══════════════════════════════════════════════════════════════════════

fn headline_section(view: &DashboardView) -> String {
    let mut cards = metric_card(
        "Total Scenarios",
        &format::grouped(view.filtered_count() as f64),
        &format!(
            "{} from filters",
            view.filtered_count() as i64 - view.total_count as i64
        ),
    );
    if let Some(h) = &view.headline {
        cards.push_str(&headline_cards(h));
    }
    format!(
        "<section>\n<h3>Key Metrics</h3>\n<div class=\"metrics-grid\">\n{}</div>\n</section>\n",
        cards
    )
}

fn headline_cards(h: &HeadlineMetrics) -> String {
    let mut cards = String::new();
    cards.push_str(&metric_card(
        "Max Annual Sales",
        &format::millions(h.max_sales),
        &format!("{} potential", format::millions(h.sales_potential)),
    ));
    cards.push_str(&metric_card(
        "Best ROAS",
        &format::ratio(h.best_roas),
        &format!("{} range", format::ratio(h.roas_range)),
    ));
    cards.push_str(&metric_card(
        "Optimal Spend",
        &format::millions(h.optimal_spend),
        "Highest ROAS",
    ));
    cards
}

fn spend_axis(rows: &[ScenarioRecord]) -> Vec<f64> {
    rows.iter()
        .map(|r| r.total_annual_spend / DISPLAY_UNIT)
        .collect()
}

fn overview_panel(rows: &[ScenarioRecord], reference_line: f64) -> (String, String) {
    let xs = spend_axis(rows);
    let sales: Vec<f64> = rows.iter().map(|r| r.total_annual_sales / DISPLAY_UNIT).collect();
    let roas: Vec<f64> = rows.iter().map(|r| r.blended_roas).collect();
    let conv: Vec<f64> = rows.iter().map(|r| r.blended_conversion_rate * 100.0).collect();
    let aov: Vec<f64> = rows.iter().map(|r| r.blended_aov).collect();
    let traffic: Vec<f64> = rows.iter().map(|r| r.total_annual_traffic).collect();

    let body = format!(
        r#"<section>
<h3>Annual Performance Overview</h3>
<div class="chart-row">
 {c1}
 {c2}
</div>
<h3>Key Performance Indicators</h3>
<div class="chart-row three">
 {c3}
 {c4}
 {c5}
</div>
</section>
"#,
        c1 = chart_box("c1", "Annual Sales vs Spend (sized by ROAS)"),
        c2 = chart_box("c2", "ROAS Curve - Diminishing Returns"),
        c3 = chart_box("c3", "Conversion Rate vs Spend"),
        c4 = chart_box("c4", "Average Order Value vs Spend"),
        c5 = chart_box("c5", "Annual Traffic vs Spend"),
    );

    let script = format!(
        r#"const X={xs};
const R={roas};
// 1. Sales vs spend, point size tracks ROAS
new Chart(document.getElementById('c1'),{{type:'scatter',data:{{datasets:[
 mkDs('Scenarios','#4285f4',{sales_pts},{{pointRadius:R.map(r=>2+r*2),backgroundColor:'#4285f488'}})
]}},options:xyOpts('Annual Sales vs Spend','Annual Spend ($M)','Annual Sales ($M)')}});
// 2. ROAS curve
new Chart(document.getElementById('c2'),{{type:'line',data:{{datasets:[
 mkDs('Blended ROAS','#1f77b4',{roas_pts}),
 hline('{ref_label} ROAS Threshold',{ref_line},X)
]}},options:xyOpts('ROAS Curve','Annual Spend ($M)','Blended ROAS')}});
// 3-5. KPIs
new Chart(document.getElementById('c3'),{{type:'line',data:{{datasets:[mkDs('Conversion Rate (%)','#34a853',{conv_pts})]}},options:xyOpts('Conversion Rate vs Spend','Annual Spend ($M)','%')}});
new Chart(document.getElementById('c4'),{{type:'line',data:{{datasets:[mkDs('AOV ($)','#ea8c00',{aov_pts})]}},options:xyOpts('Average Order Value vs Spend','Annual Spend ($M)','$')}});
new Chart(document.getElementById('c5'),{{type:'line',data:{{datasets:[mkDs('Annual Traffic','#9c27b0',{traffic_pts})]}},options:xyOpts('Annual Traffic vs Spend','Annual Spend ($M)','Visits')}});
"#,
        xs = js_array_f64(&xs),
        roas = js_array_f64(&roas),
        sales_pts = js_points(&xs, &sales),
        roas_pts = js_points(&xs, &roas),
        ref_label = format::threshold(reference_line),
        ref_line = reference_line,
        conv_pts = js_points(&xs, &conv),
        aov_pts = js_points(&xs, &aov),
        traffic_pts = js_points(&xs, &traffic),
    );
    (body, script)
}

fn threshold_lines(thresholds: &[f64]) -> String {
    thresholds
        .iter()
        .map(|t| format!(",\n hline('{}',{},X)", format::threshold(*t), t))
        .collect()
}

pub fn marginal_crossing_rows(crossings: &[MarginalCrossing]) -> Vec<Vec<String>> {
    crossings
        .iter()
        .map(|c| {
            vec![
                format::threshold(c.threshold),
                format::millions(c.annual_spend),
                format::millions(c.incremental_spend),
                format::millions(c.annual_sales),
                format::ratio(c.blended_roas),
            ]
        })
        .collect()
}

pub fn weekly_crossing_rows(crossings: &[WeeklyCrossing]) -> Vec<Vec<String>> {
    crossings
        .iter()
        .map(|c| {
            vec![
                format::threshold(c.threshold),
                format::dollars(c.weekly_spend),
                format::dollars(c.annual_spend),
                format::dollars(c.annual_sales),
            ]
        })
        .collect()
}

fn crossings_section(headers: &[String], rows: &[Vec<String>]) -> String {
    let table = if rows.is_empty() {
        "<div class=\"info\">No threshold is crossed within the selected range.</div>".to_string()
    } else {
        table_html(headers, rows)
    };
    format!("<h3>Marginal Returns Thresholds</h3>\n{}\n", table)
}

fn marginal_panel(panel: &MarginalPanel, config: &DashboardConfig) -> (String, String) {
    match panel {
        MarginalPanel::FromBaseline {
            baseline_label,
            rows,
            crossings,
        } => {
            let xs = spend_axis(rows);
            let marginal: Vec<f64> = rows
                .iter()
                .map(|r| r.marginal_roas_from_137m.unwrap_or(f64::NAN))
                .collect();
            let blended: Vec<f64> = rows.iter().map(|r| r.blended_roas).collect();
            let headers = vec![
                "Marginal ROAS Threshold".to_string(),
                "Annual Spend".to_string(),
                format!("Incremental from {}", baseline_label),
                "Annual Sales".to_string(),
                "Blended ROAS".to_string(),
            ];
            let body = format!(
                r#"<section>
<h3>Marginal Returns Analysis</h3>
<div class="info">Showing marginal ROAS calculated from {label} baseline</div>
<div class="chart-row">
 {c1}
 {c2}
</div>
{table}
</section>
"#,
                label = escape_html(baseline_label),
                c1 = chart_box("c1", &format!("Marginal ROAS from {} Baseline", baseline_label)),
                c2 = chart_box("c2", &format!("Blended vs Marginal ROAS from {} Baseline", baseline_label)),
                table = crossings_section(&headers, &marginal_crossing_rows(crossings)),
            );
            let script = format!(
                r#"const X={xs};
new Chart(document.getElementById('c1'),{{type:'line',data:{{datasets:[
 mkDs('Marginal ROAS from {label}','#ff7f0e',{marginal_pts}){lines}
]}},options:xyOpts('Marginal ROAS','Annual Spend ($M)','Marginal ROAS')}});
new Chart(document.getElementById('c2'),{{type:'line',data:{{datasets:[
 mkDs('Blended ROAS','#1f77b4',{blended_pts},{{borderWidth:2}}),
 mkDs('Marginal ROAS from {label}','#ff7f0e',{marginal_pts},{{borderWidth:2}})
]}},options:xyOpts('Blended vs Marginal ROAS','Annual Spend ($M)','ROAS')}});
"#,
                xs = js_array_f64(&xs),
                label = baseline_label,
                marginal_pts = js_points(&xs, &marginal),
                blended_pts = js_points(&xs, &blended),
                lines = threshold_lines(&config.marginal_thresholds),
            );
            (body, script)
        }
        MarginalPanel::Weekly { rows, crossings } => {
            let xs: Vec<f64> = rows.iter().map(|r: &BaselineRecord| r.weekly_spend).collect();
            let marginal: Vec<f64> = rows.iter().map(|r| r.marginal_roas).collect();
            let increase: Vec<f64> = rows.iter().map(|r| r.sales_increase).collect();
            let headers: Vec<String> = ["ROAS Threshold", "Weekly Spend", "Annual Spend", "Annual Sales"]
                .iter()
                .map(|h| h.to_string())
                .collect();
            let body = format!(
                r#"<section>
<h3>Marginal Returns Analysis</h3>
<div class="chart-row">
 {c1}
 {c2}
</div>
{table}
</section>
"#,
                c1 = chart_box("c1", "Weekly Marginal ROAS"),
                c2 = chart_box("c2", "Incremental Sales per Spend Step"),
                table = crossings_section(&headers, &weekly_crossing_rows(crossings)),
            );
            let script = format!(
                r#"const X={xs};
new Chart(document.getElementById('c1'),{{type:'line',data:{{datasets:[
 mkDs('Marginal ROAS','#1f77b4',{marginal_pts}){lines}
]}},options:xyOpts('Weekly Marginal ROAS','Weekly Spend ($)','Marginal ROAS')}});
new Chart(document.getElementById('c2'),{{type:'line',data:{{datasets:[
 mkDs('Incremental Weekly Sales ($)','#34a853',{increase_pts})
]}},options:xyOpts('Incremental Sales','Weekly Spend ($)','Incremental Weekly Sales ($)')}});
"#,
                xs = js_array_f64(&xs),
                marginal_pts = js_points(&xs, &marginal),
                increase_pts = js_points(&xs, &increase),
                lines = threshold_lines(&config.weekly_reference_lines),
            );
            (body, script)
        }
    }
}

fn comparison_panel(
    options: &[f64],
    targets: &[f64],
    rows: &[ComparisonRow],
    warning: Option<&str>,
) -> String {
    let options_list: Vec<String> = options.iter().map(|o| format::millions(*o)).collect();
    let targets_list: Vec<String> = targets.iter().map(|t| format::millions(*t)).collect();
    let content = match warning {
        Some(w) => format!("<div class=\"warning\">{}</div>", escape_html(w)),
        None => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| r.cells().iter().map(|c| c.to_string()).collect())
                .collect();
            table_html(ComparisonRow::HEADERS.as_slice(), &cells)
        }
    };
    format!(
        r#"<section>
<h3>Scenario Comparison</h3>
<p>Selected spends: {targets}</p>
<p style="font-size:0.8em;color:#777;margin:8px 0 16px">Available: {options}</p>
{content}
</section>
"#,
        targets = escape_html(&targets_list.join(", ")),
        options = escape_html(&options_list.join(", ")),
        content = content,
    )
}

fn table_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn table_panel(
    table: &DataTable,
    has_marginal_from_baseline: bool,
    file_name: &str,
) -> DashResult<(String, String)> {
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| table_cell(*v))
                .collect()
        })
        .collect();
    let info = if has_marginal_from_baseline {
        "<div class=\"info\">Table includes Marginal ROAS calculated from the baseline spend</div>\n"
    } else {
        ""
    };
    let body = format!(
        r#"<section>
<h3>Complete Data Table</h3>
{info}{table}
<button onclick="downloadCSV()">Download Data as CSV</button>
</section>
"#,
        info = info,
        table = table_html(table.headers.as_slice(), &rows),
    );
    let csv = export::to_csv_string(table)?;
    let script = format!(
        "const CSV_DATA={csv};\nfunction downloadCSV(){{downloadBlob(CSV_DATA,'{file}','text/csv');}}\n",
        csv = serde_json::to_string(&csv)?,
        file = file_name,
    );
    Ok((body, script))
}

fn empty_panel(message: &str) -> String {
    format!(
        "<section>\n<div class=\"warning\">{}</div>\n</section>\n",
        escape_html(message)
    )
}

fn dashboard_footer(timestamp: &str) -> String {
    format!(
        r#"<div><strong>Data Generated:</strong><br>Pipeline run: {}</div>
<div><strong>Model Details:</strong><br>Mathematical models fitted to historical data</div>
<div><strong>Usage:</strong><br>Adjust filters to explore different scenarios</div>"#,
        escape_html(timestamp)
    )
}

/// Render one dashboard interaction as a self-contained HTML page.
pub fn render_dashboard(view: &DashboardView, config: &DashboardConfig) -> DashResult<String> {
    let (panel_body, panel_script) = match &view.panel {
        Panel::Empty { message } => (empty_panel(message), String::new()),
        Panel::Overview {
            rows,
            reference_line,
        } => overview_panel(rows, *reference_line),
        Panel::Marginal(m) => marginal_panel(m, config),
        Panel::Comparison {
            options,
            targets,
            rows,
            warning,
        } => (
            comparison_panel(options, targets, rows, warning.as_deref()),
            String::new(),
        ),
        Panel::Table {
            table,
            has_marginal_from_baseline,
            file_name,
        } => table_panel(table, *has_marginal_from_baseline, file_name)?,
    };

    let controls = format!(
        "Spend ${}M - ${}M | Min ROAS {:.1}x | {}",
        view.selection.spend_millions.0,
        view.selection.spend_millions.1,
        view.selection.min_roas,
        view.selection.mode
    );
    let body = format!("{}{}", headline_section(view), panel_body);

    Ok(page(
        "E-commerce KPI Projections 2026",
        "Data-driven spend optimization using fitted mathematical models",
        &controls,
        &body,
        &dashboard_footer(&view.data_timestamp),
        &panel_script,
    ))
}

/// Plain-text rendering of one interaction for the terminal.
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} | spend ${}M-${}M, min ROAS {:.1}x\n",
        view.selection.mode,
        view.selection.spend_millions.0,
        view.selection.spend_millions.1,
        view.selection.min_roas
    ));
    out.push_str(&format!(
        "  Total Scenarios: {} ({} from filters)\n",
        view.filtered_count(),
        view.filtered_count() as i64 - view.total_count as i64
    ));
    if let Some(h) = &view.headline {
        out.push_str(&format!(
            "  Max Annual Sales: {} ({} potential)\n  Best ROAS: {} ({} range)\n  Optimal Spend: {}\n",
            format::millions(h.max_sales),
            format::millions(h.sales_potential),
            format::ratio(h.best_roas),
            format::ratio(h.roas_range),
            format::millions(h.optimal_spend),
        ));
    }

    match &view.panel {
        Panel::Empty { message } => out.push_str(&format!("\n  WARNING: {}\n", message)),
        Panel::Overview { rows, .. } => {
            out.push_str(&format!("\n  {} scenarios plotted\n", rows.len()));
        }
        Panel::Marginal(MarginalPanel::FromBaseline {
            baseline_label,
            crossings,
            ..
        }) => {
            out.push_str(&format!("\n  Thresholds (marginal ROAS from {}):\n", baseline_label));
            for row in marginal_crossing_rows(crossings) {
                out.push_str(&format!("    {}\n", row.join(" | ")));
            }
        }
        Panel::Marginal(MarginalPanel::Weekly { crossings, .. }) => {
            out.push_str("\n  Thresholds (weekly marginal ROAS):\n");
            for row in weekly_crossing_rows(crossings) {
                out.push_str(&format!("    {}\n", row.join(" | ")));
            }
        }
        Panel::Comparison { rows, warning, .. } => {
            if let Some(w) = warning {
                out.push_str(&format!("\n  WARNING: {}\n", w));
            }
            if !rows.is_empty() {
                out.push_str(&format!("\n    {}\n", ComparisonRow::HEADERS.join(" | ")));
            }
            for r in rows {
                out.push_str(&format!("    {}\n", r.cells().join(" | ")));
            }
        }
        Panel::Table { table, .. } => {
            out.push_str(&format!("\n    {}\n", table.headers.join(" | ")));
            for row in &table.rows {
                let cells: Vec<String> = row.iter().map(|v| table_cell(*v)).collect();
                out.push_str(&format!("    {}\n", cells.join(" | ")));
            }
        }
    }
    out.push_str(&format!("\n  Pipeline run: {}\n", view.data_timestamp));
    out
}

// ═══════════════════════════════════════════════════════════════════════
// Synthetic scenario dashboard
// ═══════════════════════════════════════════════════════════════════════

pub fn render_synthetic(label: ScenarioLabel, rows: &[MonthlyFinancials]) -> String {
    let totals = SyntheticTotals::from_rows(rows);
    let dates: Vec<String> = rows.iter().map(|r| r.date.format("%Y-%m-%d").to_string()).collect();
    let revenue: Vec<u64> = rows.iter().map(|r| r.revenue).collect();
    let costs: Vec<u64> = rows.iter().map(|r| r.costs).collect();
    let profit: Vec<u64> = rows.iter().map(|r| r.profit).collect();

    let mut cards = String::new();
    cards.push_str(&metric_card("Total Revenue", &format::dollars(totals.revenue as f64), ""));
    cards.push_str(&metric_card("Total Costs", &format::dollars(totals.costs as f64), ""));
    cards.push_str(&metric_card("Total Profit", &format::dollars(totals.profit as f64), ""));

    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.date.format("%Y-%m-%d").to_string(),
                r.revenue.to_string(),
                r.costs.to_string(),
                r.profit.to_string(),
            ]
        })
        .collect();

    let body = format!(
        r#"<div class="chart-row">
 <section>
  <h3>Sample Data Visualization</h3>
  <canvas id="c1"></canvas>
 </section>
 <section>
  <h3>Key Metrics</h3>
  <div class="metrics-grid">
{cards}  </div>
  <canvas id="c2" style="margin-top:16px"></canvas>
 </section>
</div>
<section>
<h3>Data Table</h3>
{table}
</section>
"#,
        cards = cards,
        table = table_html(["Date", "Revenue", "Costs", "Profit"].as_slice(), &table_rows),
    );

    let script = format!(
        r#"const L={dates};
new Chart(document.getElementById('c1'),{{type:'line',data:{{labels:L,datasets:[
 mkDs('Revenue','#4285f4',{revenue}),
 mkDs('Costs','#ea4335',{costs}),
 mkDs('Profit','#34a853',{profit})
]}},options:{{responsive:true,maintainAspectRatio:false,plugins:{{title:{{display:true,text:'{label} Scenario - Financial Trends'}}}}}}}});
new Chart(document.getElementById('c2'),{{type:'bar',data:{{labels:['Revenue','Costs','Profit'],datasets:[
 {{label:'Value',data:[{tr},{tc},{tp}],backgroundColor:['#4285f4','#ea4335','#34a853']}}
]}},options:{{responsive:true,maintainAspectRatio:false,plugins:{{title:{{display:true,text:'{label} Scenario - Summary'}}}}}}}});
"#,
        dates = js_array_str(&dates),
        revenue = js_array_u64(&revenue),
        costs = js_array_u64(&costs),
        profit = js_array_u64(&profit),
        label = label.name(),
        tr = totals.revenue,
        tc = totals.costs,
        tp = totals.profit,
    );

    page(
        "2026 Scenarios Dashboard",
        "Welcome to the 2026 Scenarios Analysis Dashboard",
        &format!("Scenario Type: {}", label),
        &body,
        "<div>Dashboard generated by kpi-dash</div>",
        &script,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// File I/O
// ═══════════════════════════════════════════════════════════════════════

pub fn save_report(html: &str, path: &Path) -> DashResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

use crate::stats::ReportRow;
use chrono::NaiveDate;

/// Render a self-contained HTML report (rows embedded as JSON).
///
/// Important: we avoid `format!()` because the HTML contains many `{}` from JS
/// template literals (e.g., `${x}`), which would conflict with Rust formatting.
pub fn render_html_report(rows: &[ReportRow], date: NaiveDate) -> anyhow::Result<String> {
    let json = serde_json::to_string(rows)?; // embedded as JS array literal

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Latency report __DATE__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  .container { padding: 12px 16px; }

  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }

  input#search { padding: 6px 8px; border: 1px solid #ddd; border-radius: 6px; width: 320px; margin-top: 8px; }

  table { border-collapse: collapse; width: 100%; margin-top: 8px; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 8px; text-align: left; font-size: 14px; }
  th { position: sticky; top: 0; background: white; border-bottom: 1px solid #ddd; cursor: pointer; user-select: none; }
  th.sorted { background: #e9f2ff; }
  .num { text-align: right; font-variant-numeric: tabular-nums; }
  code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; }
  .muted { color: #777; font-size: 12px; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
</header>

<div class="container">
  <input id="search" placeholder="Filter url...">
  <table>
    <thead>
      <tr id="headRow"></tr>
    </thead>
    <tbody id="rowsBody"></tbody>
  </table>
  <div class="muted" id="shown"></div>
</div>

<script>
// Embedded report rows (JSON array literal)
const ROWS = __DATA__;

const COLUMNS = [
  ["url", "url", false],
  ["count", "count", true],
  ["count_perc", "count %", true],
  ["time_sum", "time sum", true],
  ["time_perc", "time %", true],
  ["time_avg", "time avg", true],
  ["time_max", "time max", true],
  ["time_med", "time med", true],
];

const state = { sortKey: "time_sum", desc: true, search: "" };

function fmt(x) {
  return (Math.round(x * 1000) / 1000).toFixed(3);
}

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function renderSummary() {
  const totalCount = ROWS.reduce((a, r) => a + r.count, 0);
  const totalTime = ROWS.reduce((a, r) => a + r.time_sum, 0);
  document.getElementById("summary").innerHTML = `
    <span class="pill">urls: <b>${ROWS.length}</b></span>
    <span class="pill">requests: <b>${totalCount}</b></span>
    <span class="pill">total time: <b>${fmt(totalTime)}</b></span>
  `;
}

function renderHead() {
  const head = document.getElementById("headRow");
  head.innerHTML = "";
  for (const [key, label, numeric] of COLUMNS) {
    const th = document.createElement("th");
    th.className = (numeric ? "num" : "") + (state.sortKey === key ? " sorted" : "");
    th.textContent = label + (state.sortKey === key ? (state.desc ? " ▾" : " ▴") : "");
    th.onclick = () => {
      if (state.sortKey === key) state.desc = !state.desc;
      else { state.sortKey = key; state.desc = true; }
      render();
    };
    head.appendChild(th);
  }
}

function renderRows() {
  const body = document.getElementById("rowsBody");
  body.innerHTML = "";

  const needle = state.search.toLowerCase();
  const rows = ROWS.filter(r => !needle || r.url.toLowerCase().includes(needle));

  rows.sort((a, b) => {
    const x = a[state.sortKey], y = b[state.sortKey];
    const cmp = x < y ? -1 : (x > y ? 1 : 0);
    return state.desc ? -cmp : cmp;
  });

  for (const r of rows) {
    const tr = document.createElement("tr");
    tr.innerHTML = `
      <td><code>${escapeHtml(r.url)}</code></td>
      <td class="num">${r.count}</td>
      <td class="num">${fmt(r.count_perc)}</td>
      <td class="num">${fmt(r.time_sum)}</td>
      <td class="num">${fmt(r.time_perc)}</td>
      <td class="num">${fmt(r.time_avg)}</td>
      <td class="num">${fmt(r.time_max)}</td>
      <td class="num">${fmt(r.time_med)}</td>
    `;
    body.appendChild(tr);
  }

  document.getElementById("shown").textContent = `${rows.length} of ${ROWS.length} urls shown`;
}

function render() {
  renderHead();
  renderRows();
}

document.getElementById("search").addEventListener("input", (e) => {
  state.search = e.target.value || "";
  render();
});

renderSummary();
render();
</script>
</body>
</html>
"#;

    Ok(TEMPLATE
        .replace("__DATE__", &date.format("%Y.%m.%d").to_string())
        .replace("__DATA__", &json))
}

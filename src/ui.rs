use crate::analytics::AnalyticsSnapshot;

pub fn render_index(snapshot: &AnalyticsSnapshot) -> String {
    INDEX_HTML
        .replace("{{AS_OF}}", &snapshot.as_of)
        .replace("{{ACTIVE}}", &snapshot.active_count.to_string())
        .replace("{{SPEND}}", &format_amount(snapshot.total_active_spend))
        .replace("{{AVERAGE}}", &snapshot.average_active_spend.to_string())
        .replace("{{UPCOMING}}", &snapshot.upcoming_renewals.to_string())
        .replace("{{EXPIRED}}", &snapshot.expired_count.to_string())
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>SubTrack</title>
  <style>
    :root {
      --bg: #f4f5fb;
      --ink: #1f2333;
      --muted: #6b7080;
      --accent: #6366f1;
      --danger: #e5484d;
      --ok: #1f9d55;
      --card: #ffffff;
      --shadow: 0 12px 32px rgba(31, 35, 51, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      display: grid;
      grid-template-columns: 220px 1fr;
    }

    .sidebar {
      background: #1f2333;
      color: #fff;
      padding: 28px 18px;
    }

    .logo {
      margin: 0 0 28px;
      font-size: 1.4rem;
    }

    .nav-item {
      display: block;
      width: 100%;
      padding: 10px 12px;
      margin-bottom: 6px;
      border: none;
      border-radius: 10px;
      background: transparent;
      color: inherit;
      text-align: left;
      font: inherit;
      cursor: pointer;
    }

    .nav-item.active {
      background: var(--accent);
    }

    main {
      padding: 32px;
    }

    .view[hidden] {
      display: none;
    }

    .header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      margin-bottom: 24px;
    }

    .muted {
      color: var(--muted);
    }

    .dashboard-layout {
      display: grid;
      grid-template-columns: 1fr 300px;
      gap: 24px;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .card, .panel {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 18px;
    }

    .card p {
      margin: 0 0 8px;
      color: var(--muted);
    }

    .card h3 {
      margin: 0;
      font-size: 1.6rem;
    }

    .bar-row {
      display: grid;
      grid-template-columns: 120px 1fr 90px;
      gap: 12px;
      align-items: center;
      margin-bottom: 10px;
    }

    .bar {
      height: 14px;
      border-radius: 7px;
      background: var(--accent);
    }

    .alert-item {
      display: flex;
      flex-direction: column;
      padding: 10px 0;
      border-bottom: 1px solid #eceef5;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 10px;
      border-bottom: 1px solid #eceef5;
    }

    .status-active {
      color: var(--ok);
    }

    .status-expired {
      color: var(--danger);
    }

    button.btn {
      border: 1px solid #d5d8e5;
      background: #fff;
      border-radius: 8px;
      padding: 6px 12px;
      font: inherit;
      cursor: pointer;
    }

    button.primary {
      background: var(--accent);
      border-color: var(--accent);
      color: #fff;
    }

    button.danger {
      color: var(--danger);
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(31, 35, 51, 0.45);
      display: grid;
      place-items: center;
    }

    .overlay[hidden] {
      display: none;
    }

    .form-card {
      width: min(420px, 92vw);
      background: #fff;
      border-radius: 16px;
      padding: 24px;
    }

    .form-card label {
      display: block;
      margin-bottom: 12px;
    }

    .form-card input, .form-card select {
      display: block;
      width: 100%;
      margin-top: 4px;
      padding: 8px;
      border: 1px solid #d5d8e5;
      border-radius: 8px;
      font: inherit;
    }

    .form-actions {
      display: flex;
      justify-content: space-between;
    }

    .toast {
      position: fixed;
      right: 24px;
      bottom: 24px;
      padding: 12px 16px;
      border-radius: 10px;
      background: var(--ink);
      color: #fff;
    }

    .toast[hidden] {
      display: none;
    }

    .toast.error {
      background: var(--danger);
    }
  </style>
</head>
<body>
  <aside class="sidebar">
    <h2 class="logo">SubTrack</h2>
    <nav>
      <button class="nav-item active" data-view="dashboard">Dashboard</button>
      <button class="nav-item" data-view="subscriptions">Subscriptions</button>
    </nav>
  </aside>

  <main>
    <section class="view" id="view-dashboard">
      <div class="header">
        <div>
          <span class="muted">As of <span id="as-of">{{AS_OF}}</span></span>
          <h2>Dashboard</h2>
        </div>
      </div>

      <div class="dashboard-layout">
        <div>
          <div class="cards">
            <div class="card"><p>Active Subscriptions</p><h3 id="stat-active">{{ACTIVE}}</h3></div>
            <div class="card"><p>Monthly Spend</p><h3>&#8377; <span id="stat-spend">{{SPEND}}</span></h3></div>
            <div class="card"><p>Average Spend</p><h3>&#8377; <span id="stat-average">{{AVERAGE}}</span></h3></div>
            <div class="card"><p>Upcoming Renewals</p><h3 id="stat-upcoming">{{UPCOMING}}</h3></div>
            <div class="card"><p>Expired Subscriptions</p><h3 id="stat-expired">{{EXPIRED}}</h3></div>
          </div>

          <div class="panel" style="margin-top: 24px">
            <h4>Subscription Spend by Category</h4>
            <div id="breakdown"></div>
          </div>
        </div>

        <div class="panel">
          <h4>&#9888; Expiring Soon</h4>
          <div id="alerts"></div>
        </div>
      </div>
    </section>

    <section class="view" id="view-subscriptions" hidden>
      <div class="header">
        <h2>Your Subscriptions</h2>
        <button class="btn primary" id="add-button">+ Add Subscription</button>
      </div>

      <div class="panel">
        <table>
          <thead>
            <tr>
              <th>Service</th>
              <th>Category</th>
              <th>Billing</th>
              <th>Price</th>
              <th>Renewal</th>
              <th>Status</th>
              <th>Actions</th>
            </tr>
          </thead>
          <tbody id="rows"></tbody>
        </table>
      </div>
    </section>
  </main>

  <div class="overlay" id="overlay" hidden>
    <div class="form-card">
      <h4 id="form-title"></h4>
      <form id="editor-form">
        <label>Service Name <input name="name" type="text" required /></label>
        <label>Category <input name="category" type="text" required /></label>
        <label>Price <input name="price" type="number" min="0" step="any" required /></label>
        <label>Renewal Date <input name="renewalDate" type="date" required /></label>
        <label>Billing
          <select name="billing">
            <option>Monthly</option>
            <option>Yearly</option>
          </select>
        </label>
        <label>Status
          <select name="status">
            <option>Active</option>
            <option>Expired</option>
          </select>
        </label>
        <div class="form-actions">
          <button type="button" class="btn" id="close-button">Close</button>
          <button type="submit" class="btn primary" id="submit-button"></button>
        </div>
      </form>
    </div>
  </div>

  <div class="toast" id="toast" hidden></div>

  <script>
    const FIELDS = ['name', 'category', 'price', 'renewalDate', 'billing', 'status'];
    const TITLES = {
      Adding: 'Add Subscription',
      Viewing: 'View Subscription',
      Editing: 'Edit Subscription'
    };

    const form = document.getElementById('editor-form');
    const overlay = document.getElementById('overlay');
    const toast = document.getElementById('toast');

    const notify = (message, kind) => {
      toast.textContent = message;
      toast.className = kind === 'error' ? 'toast error' : 'toast';
      toast.hidden = false;
      setTimeout(() => { toast.hidden = true; }, 2500);
    };

    const request = async (method, url, body) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['content-type'] = 'application/json';
        options.body = JSON.stringify(body);
      }
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const cell = (text) => {
      const td = document.createElement('td');
      td.textContent = text;
      return td;
    };

    const renderDashboard = (snapshot) => {
      document.getElementById('as-of').textContent = snapshot.asOf;
      document.getElementById('stat-active').textContent = snapshot.activeCount;
      document.getElementById('stat-spend').textContent = snapshot.totalActiveSpend;
      document.getElementById('stat-average').textContent = snapshot.averageActiveSpend;
      document.getElementById('stat-upcoming').textContent = snapshot.upcomingRenewals;
      document.getElementById('stat-expired').textContent = snapshot.expiredCount;

      const breakdown = document.getElementById('breakdown');
      breakdown.replaceChildren();
      if (snapshot.categoryBreakdown.length === 0) {
        breakdown.innerHTML = '<p class="muted">No active spend yet</p>';
      }
      snapshot.categoryBreakdown.forEach((entry) => {
        const row = document.createElement('div');
        row.className = 'bar-row';
        const label = document.createElement('span');
        label.textContent = entry.category;
        const bar = document.createElement('div');
        bar.className = 'bar';
        bar.style.width = `${entry.percentage}%`;
        const amount = document.createElement('span');
        amount.textContent = `${entry.amount} (${entry.percentage}%)`;
        row.append(label, bar, amount);
        breakdown.append(row);
      });

      const alerts = document.getElementById('alerts');
      alerts.replaceChildren();
      if (snapshot.expiringSoon.length === 0) {
        alerts.innerHTML = '<p class="muted">No renewals in next 7 days</p>';
      }
      snapshot.expiringSoon.forEach((entry) => {
        const item = document.createElement('div');
        item.className = 'alert-item';
        const name = document.createElement('strong');
        name.textContent = entry.record.name;
        const message = document.createElement('span');
        message.textContent = entry.message;
        item.append(name, message);
        alerts.append(item);
      });
    };

    const actionButton = (label, className, handler) => {
      const button = document.createElement('button');
      button.className = `btn ${className}`;
      button.textContent = label;
      button.addEventListener('click', () => handler().catch((err) => notify(err.message, 'error')));
      return button;
    };

    const renderRows = (records) => {
      const rows = document.getElementById('rows');
      rows.replaceChildren();
      if (records.length === 0) {
        rows.innerHTML = '<tr><td colspan="7" class="muted">No subscriptions found</td></tr>';
      }
      records.forEach((record) => {
        const tr = document.createElement('tr');
        const status = cell(record.status);
        status.className = record.status === 'Active' ? 'status-active' : 'status-expired';
        const actions = document.createElement('td');
        const id = encodeURIComponent(record.id);
        actions.append(
          actionButton('View', '', () => openEditor(`/api/editor/view/${id}`)),
          actionButton('Edit', '', () => openEditor(`/api/editor/edit/${id}`)),
          actionButton('Delete', 'danger', () => remove(id))
        );
        tr.append(
          cell(record.name),
          cell(record.category),
          cell(record.billing),
          cell(`₹ ${record.price}`),
          cell(record.renewalDate),
          status,
          actions
        );
        rows.append(tr);
      });
    };

    const renderEditor = (editor) => {
      overlay.hidden = editor.mode === 'Closed';
      if (editor.mode === 'Closed') {
        return;
      }
      document.getElementById('form-title').textContent = TITLES[editor.mode];
      FIELDS.forEach((field) => {
        form.elements[field].value = editor.form[field];
        form.elements[field].disabled = editor.mode === 'Viewing';
      });
      const submit = document.getElementById('submit-button');
      submit.hidden = editor.mode === 'Viewing';
      submit.textContent = editor.mode === 'Adding' ? 'Add' : 'Update';
    };

    const reloadViews = async () => {
      const [snapshot, records] = await Promise.all([
        request('GET', '/api/dashboard'),
        request('GET', '/api/subscriptions')
      ]);
      renderDashboard(snapshot);
      renderRows(records);
    };

    const refresh = async () => {
      try {
        await request('POST', '/api/subscriptions/refresh');
      } catch (err) {
        notify(`Failed to load subscriptions: ${err.message}`, 'error');
      }
      await reloadViews();
    };

    const openEditor = async (url) => {
      renderEditor(await request('POST', url));
    };

    const remove = async (id) => {
      if (!window.confirm('Delete this subscription?')) {
        return;
      }
      try {
        await request('DELETE', `/api/subscriptions/${id}?confirm=true`);
        notify('Deleted', 'ok');
      } catch (err) {
        notify(`Delete failed: ${err.message}`, 'error');
      }
      await reloadViews();
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const values = {};
      FIELDS.forEach((field) => { values[field] = form.elements[field].value; });
      request('POST', '/api/editor/submit', values)
        .then((editor) => {
          renderEditor(editor);
          notify('Saved', 'ok');
        })
        .catch((err) => notify(`Save failed: ${err.message}`, 'error'))
        .finally(() => reloadViews().catch((err) => notify(err.message, 'error')));
    });

    document.getElementById('add-button').addEventListener('click', () => {
      openEditor('/api/editor/add').catch((err) => notify(err.message, 'error'));
    });

    document.getElementById('close-button').addEventListener('click', () => {
      openEditor('/api/editor/close').catch((err) => notify(err.message, 'error'));
    });

    document.querySelectorAll('.nav-item').forEach((button) => {
      button.addEventListener('click', () => {
        document.querySelectorAll('.nav-item').forEach((b) => b.classList.toggle('active', b === button));
        document.querySelectorAll('.view').forEach((view) => {
          view.hidden = view.id !== `view-${button.dataset.view}`;
        });
      });
    });

    refresh().catch((err) => notify(err.message, 'error'));
    request('GET', '/api/editor').then(renderEditor).catch(() => {});
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::derive;
    use chrono::NaiveDate;

    #[test]
    fn index_embeds_current_figures() {
        let snapshot = derive(&[], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let html = render_index(&snapshot);
        assert!(html.contains("2024-01-01"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn amounts_drop_trailing_zeros() {
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(99.5), "99.50");
    }
}

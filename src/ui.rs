use crate::client::Snapshot;
use crate::session::Session;
use crate::view::{CardAction, HabitCard};

const HOST_SCRIPT: &str = r#"<script src="https://telegram.org/js/telegram-web-app.js"></script>
  <script>
    const tg = window.Telegram && window.Telegram.WebApp;
    if (tg) {
      tg.ready();
      tg.expand();
    }
  </script>"#;

pub fn render_index(session: &Session, snapshot: &Snapshot) -> String {
    let cards = if snapshot.cards.is_empty() {
        r#"<p class="empty">Пока нет привычек</p>"#.to_string()
    } else {
        snapshot.cards.iter().map(render_card).collect::<Vec<_>>().join("\n")
    };

    let status = match &snapshot.last_error {
        Some(message) => format!(
            r#"<div class="status" data-type="error">{}</div>"#,
            escape_html(message)
        ),
        None => String::new(),
    };

    let updated = snapshot
        .loaded_at
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "—".to_string());

    let host_script = if session.is_embedded() { HOST_SCRIPT } else { "" };

    INDEX_HTML
        .replace("{{HOST_SCRIPT}}", host_script)
        .replace("{{USER_ID}}", &session.user_id().to_string())
        .replace("{{UPDATED}}", &updated)
        .replace("{{CARDS}}", &cards)
        .replace("{{STATUS}}", &status)
}

fn render_card(card: &HabitCard) -> String {
    let buttons = card
        .actions
        .iter()
        .map(|binding| {
            let (route, class) = match binding.action {
                CardAction::Complete(id) => (format!("/habits/{id}/done"), ""),
                CardAction::Delete(id) => (format!("/habits/{id}/delete"), " danger"),
            };
            format!(
                concat!(
                    r#"<form method="post" action="{route}">"#,
                    r#"<button class="action{class}" type="submit">{label}</button></form>"#,
                ),
                route = route,
                class = class,
                label = binding.label,
            )
        })
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"<div class="card" data-habit-id="{id}">
      <b>{title}</b>
      <span class="streak">{streak}</span>
      <div class="actions">{buttons}</div>
    </div>"#,
        id = card.habit_id,
        title = escape_html(&card.title),
        streak = card.streak_label,
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            // Keeps template placeholders out of user text.
            '{' => out.push_str("&#123;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Привычки</title>
  {{HOST_SCRIPT}}
  <style>
    :root {
      --bg: var(--tg-theme-bg-color, #f4f5f7);
      --ink: var(--tg-theme-text-color, #1f2328);
      --card: var(--tg-theme-secondary-bg-color, #ffffff);
      --accent: var(--tg-theme-button-color, #2f80ed);
      --accent-ink: var(--tg-theme-button-text-color, #ffffff);
      --danger: #d64545;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      padding: 16px;
      background: var(--bg);
      color: var(--ink);
      font-family: -apple-system, "Segoe UI", Roboto, sans-serif;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      margin-bottom: 16px;
    }

    h1 {
      margin: 0;
      font-size: 1.4rem;
    }

    #habits {
      display: grid;
      gap: 12px;
    }

    .card {
      background: var(--card);
      border-radius: 14px;
      padding: 14px 16px;
      display: grid;
      gap: 6px;
      box-shadow: 0 4px 14px rgba(0, 0, 0, 0.06);
    }

    .actions {
      display: flex;
      gap: 8px;
      margin-top: 8px;
    }

    .actions form {
      margin: 0;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 10px;
      padding: 8px 12px;
      font-size: 0.95rem;
      cursor: pointer;
      background: var(--accent);
      color: var(--accent-ink);
    }

    button.danger {
      background: var(--danger);
    }

    .add {
      display: flex;
      gap: 8px;
      margin-top: 16px;
    }

    .add input {
      flex: 1;
      border-radius: 10px;
      border: 1px solid rgba(0, 0, 0, 0.15);
      padding: 8px 10px;
      font-size: 0.95rem;
    }

    .empty,
    .hint {
      color: #7a7f87;
      font-size: 0.9rem;
    }

    .status[data-type="error"] {
      color: var(--danger);
      margin-bottom: 12px;
    }
  </style>
</head>
<body>
  <header>
    <h1>Мои привычки</h1>
    <form method="post" action="/refresh"><button type="submit">🔄</button></form>
  </header>

  {{STATUS}}

  <section id="habits">
    {{CARDS}}
  </section>

  <form class="add" method="post" action="/habits">
    <input name="title" placeholder="Новая привычка" minlength="2" required />
    <button type="submit">➕</button>
  </form>

  <p class="hint">ID: {{USER_ID}} · обновлено {{UPDATED}}</p>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Habit, User};
    use crate::session::EmbeddedHost;
    use crate::view::render_cards;

    fn snapshot(habits: &[Habit]) -> Snapshot {
        Snapshot {
            cards: render_cards(habits),
            ..Snapshot::default()
        }
    }

    #[test]
    fn renders_one_card_per_habit_with_bound_routes() {
        let habits = vec![
            Habit {
                id: 1,
                title: "Drink water".into(),
                streak: 3,
            },
            Habit {
                id: 8,
                title: "Stretch".into(),
                streak: 0,
            },
        ];
        let html = render_index(&Session::standalone(), &snapshot(&habits));

        assert_eq!(html.matches(r#"class="card""#).count(), 2);
        assert!(html.contains("<b>Drink water</b>"));
        assert!(html.contains("🔥 Серия: 3"));
        assert!(html.contains(r#"action="/habits/1/done""#));
        assert!(html.contains(r#"action="/habits/8/delete""#));
        assert!(html.find("Drink water") < html.find("Stretch"));
        assert!(html.contains("ID: 999999"));
    }

    #[test]
    fn empty_snapshot_renders_placeholder() {
        let html = render_index(&Session::standalone(), &snapshot(&[]));
        assert_eq!(html.matches(r#"class="card""#).count(), 0);
        assert!(html.contains("Пока нет привычек"));
    }

    #[test]
    fn titles_are_escaped() {
        let habits = vec![Habit {
            id: 2,
            title: "<script>x</script>".into(),
            streak: 1,
        }];
        let html = render_index(&Session::standalone(), &snapshot(&habits));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>x</script>"));
    }

    #[test]
    fn host_script_only_when_embedded() {
        let html = render_index(&Session::standalone(), &snapshot(&[]));
        assert!(!html.contains("telegram-web-app.js"));

        let mut host = EmbeddedHost::new(Some(User { id: 77 }));
        let embedded = Session::resolve(Some(&mut host)).unwrap();
        let html = render_index(&embedded, &snapshot(&[]));
        assert!(html.contains("telegram-web-app.js"));
        assert!(html.contains("tg.expand()"));
        assert!(html.contains("ID: 77"));
    }

    #[test]
    fn last_error_is_shown() {
        let mut snap = snapshot(&[]);
        snap.last_error = Some("request failed".into());
        let html = render_index(&Session::standalone(), &snap);
        assert!(html.contains(r#"data-type="error">request failed"#));
    }

    #[test]
    fn placeholder_text_in_error_or_title_is_not_substituted() {
        let habits = vec![Habit {
            id: 3,
            title: "{{STATUS}}".into(),
            streak: 0,
        }];
        let mut snap = snapshot(&habits);
        snap.last_error = Some("bad {{CARDS}} body".into());
        let html = render_index(&Session::standalone(), &snap);

        assert_eq!(html.matches(r#"class="card""#).count(), 1);
        assert!(html.contains("bad &#123;&#123;CARDS}} body"));
        assert!(html.contains("<b>&#123;&#123;STATUS}}</b>"));
    }
}

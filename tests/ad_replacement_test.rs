//! End-to-end tests for ad replacement against stored reminders

use chrono::NaiveDate;

use motivad::page::HtmlPage;
use motivad::quotes::{parse_quotes, QuoteSource, BUNDLED_QUOTES};
use motivad::reminder::Reminder;
use motivad::replace::{AdReplacer, NudgeKind};
use motivad::session::Session;
use motivad::store::{MemoryKv, ReminderStore};

// ============================================================================
// Sample pages
// ============================================================================

const NEWS_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Daily News</title></head>
<body>
    <header><h1>Daily News</h1></header>
    <div id="top-ad"><img src="https://cdn.example.com/banner.gif"></div>
    <article>
        <p>Story text that must survive untouched.</p>
    </article>
    <aside>
        <ins class="adsbygoogle" data-ad-slot="123"></ins>
        <ins class="adsbygoogle" data-ad-slot="456"></ins>
    </aside>
    <iframe src="https://ads.example.net/frame?id=9"></iframe>
    <footer><div class="site-banner">Subscribe now</div></footer>
</body>
</html>
"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn started_session(seed: u64) -> Session {
    Session::start(&QuoteSource::Bundled, Some(seed))
}

// ============================================================================
// Quotes when nothing is scheduled
// ============================================================================

#[test]
fn test_single_div_ad_gets_a_quote() {
    let mut page = HtmlPage::parse(r#"<html><body><div id="sidebar-ad">Buy!</div></body></html>"#);
    let mut session = started_session(1);
    let store = ReminderStore::new(MemoryKv::new());

    let report = AdReplacer::new().replace_ads(&mut page, &mut session, &store, today());

    assert_eq!(report.replaced.len(), 1);
    let notes = page.notes();
    assert_eq!(notes.len(), 1);
    let quotes = session.quotes().all();
    assert!(
        quotes.iter().any(|q| notes[0] == format!("\"{}\" - {}", q.content, q.author)),
        "note {:?} is not a loaded quote",
        notes[0]
    );
}

#[test]
fn test_fallback_quote_used_when_loading_fails() {
    let missing = QuoteSource::File("/nonexistent/motivad/quotes.json".into());
    let mut session = Session::start(&missing, Some(1));
    let mut page = HtmlPage::parse(r#"<body><div class="ad"></div></body>"#);

    AdReplacer::new().replace_ads(&mut page, &mut session, &Vec::<Reminder>::new(), today());

    assert_eq!(page.notes(), vec!["\"Stay focused and never give up.\" - Unknown".to_string()]);
}

#[test]
fn test_quote_list_size_after_double_load() {
    let n = parse_quotes(BUNDLED_QUOTES).unwrap().len();
    let mut session = started_session(1);

    assert_eq!(session.load_quotes(&QuoteSource::Bundled), 0);
    assert_eq!(session.quotes().len(), 1 + n);
}

// ============================================================================
// Reminders scheduled for today
// ============================================================================

#[test]
fn test_todays_reminder_replaces_first_ad_only() {
    let store = ReminderStore::new(MemoryKv::new());
    store.add("Buy milk", "2024-01-01T10:00").unwrap();
    let mut page = HtmlPage::parse(
        r#"<body><ins class="adsbygoogle"></ins><ins class="adsbygoogle"></ins></body>"#,
    );
    let mut session = started_session(7);

    let report = AdReplacer::new().replace_ads(&mut page, &mut session, &store, today());

    let notes = page.notes();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0], "Buy milk (2024-01-01T10:00)");
    assert_ne!(notes[1], notes[0]);
    assert_eq!(report.replaced[1].kind, NudgeKind::Quote);
}

#[test]
fn test_reminders_fill_ads_in_time_order() {
    let store = ReminderStore::new(MemoryKv::new());
    store.add("Afternoon walk", "2024-01-01T15:00").unwrap();
    store.add("Not today", "2024-01-02T08:00").unwrap();
    store.add("Morning pages", "2024-01-01T07:30").unwrap();
    let mut page = HtmlPage::parse(NEWS_PAGE);
    let mut session = started_session(3);

    let report = AdReplacer::new().replace_ads(&mut page, &mut session, &store, today());

    // div#top-ad (id selector) is reached before div.site-banner
    let reminders: Vec<&str> = report
        .replaced
        .iter()
        .filter(|r| r.kind == NudgeKind::Reminder)
        .map(|r| r.text.as_str())
        .collect();
    assert_eq!(
        reminders,
        vec!["Morning pages (2024-01-01T07:30)", "Afternoon walk (2024-01-01T15:00)"]
    );
    assert!(!report.replaced.iter().any(|r| r.text.contains("Not today")));
}

#[test]
fn test_news_page_is_fully_cleaned() {
    let mut page = HtmlPage::parse(NEWS_PAGE);
    let mut session = started_session(5);
    let store = ReminderStore::new(MemoryKv::new());
    let replacer = AdReplacer::new();

    let report = replacer.replace_ads(&mut page, &mut session, &store, today());

    assert_eq!(report.replaced.len(), 5);
    assert_eq!(report.failed, 0);
    assert!(replacer.find_ads(&page).is_empty());

    let html = page.to_html();
    assert!(html.contains("Story text that must survive untouched."));
    assert!(!html.contains("banner.gif"));
    assert!(!html.contains("ads.example.net"));
    assert!(!html.contains("Subscribe now"));
}

#[test]
fn test_reminder_added_between_passes_is_picked_up() {
    let store = ReminderStore::new(MemoryKv::new());
    let mut session = started_session(8);
    let replacer = AdReplacer::new();

    let mut first = HtmlPage::parse(r#"<body><div id="ad"></div></body>"#);
    let report = replacer.replace_ads(&mut first, &mut session, &store, today());
    assert_eq!(report.reminders_shown(), 0);

    store.add("Pick up kids", "2024-01-01T16:00").unwrap();

    let mut second = HtmlPage::parse(r#"<body><div id="ad"></div></body>"#);
    replacer.replace_ads(&mut second, &mut session, &store, today());
    assert_eq!(second.notes(), vec!["Pick up kids (2024-01-01T16:00)".to_string()]);
}

#[test]
fn test_reminder_text_is_escaped_in_page() {
    let store = ReminderStore::new(MemoryKv::new());
    store.add("<script>alert('x')</script>", "2024-01-01T09:00").unwrap();
    let mut page = HtmlPage::parse(r#"<body><div id="ad"></div></body>"#);
    let mut session = started_session(1);

    AdReplacer::new().replace_ads(&mut page, &mut session, &store, today());

    let html = page.to_html();
    assert!(!html.contains("<script>alert"));
    assert!(html.contains("&lt;script&gt;"));
}

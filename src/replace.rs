//! Ad detection and replacement with reminders or quotes

use chrono::NaiveDate;
use scraper::Selector;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{MotivadError, Result};
use crate::page::{AdElement, ElementOutcome, HtmlPage};
use crate::session::Session;
use crate::store::ReminderSource;

/// Built-in selectors for elements that look like advertisements
pub const AD_SELECTORS: [&str; 6] = [
    "div[class*='ad']",
    "div[id*='ad']",
    "div[class*='banner']",
    "div[id*='banner']",
    "iframe[src*='ads']",
    "ins.adsbygoogle",
];

/// Where a note's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeKind {
    Reminder,
    Quote,
}

/// Text placed where an ad used to be
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nudge {
    pub kind: NudgeKind,
    pub text: String,
}

impl AsRef<str> for Nudge {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// One element that was swapped out
#[derive(Debug, Clone, Serialize)]
pub struct Replacement {
    pub selector: String,
    pub element: AdElement,
    pub kind: NudgeKind,
    pub text: String,
}

/// Result of one replacement pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaceReport {
    /// In processing order: selectors in list order, matches in document order
    pub replaced: Vec<Replacement>,
    /// Matches that had already been removed along with an enclosing ad
    pub skipped: usize,
    pub failed: usize,
}

impl ReplaceReport {
    pub fn reminders_shown(&self) -> usize {
        self.replaced.iter().filter(|r| r.kind == NudgeKind::Reminder).count()
    }
}

/// A matched element, for listing without replacing
#[derive(Debug, Clone, Serialize)]
pub struct AdMatch {
    pub selector: String,
    pub element: AdElement,
}

/// Finds ad-like elements and replaces them, one at a time, in a fixed order
pub struct AdReplacer {
    selectors: Vec<(String, Selector)>,
}

impl AdReplacer {
    /// The built-in selectors only
    pub fn new() -> Self {
        Self {
            selectors: AD_SELECTORS
                .iter()
                .map(|s| (s.to_string(), Selector::parse(s).expect("Invalid built-in ad selector")))
                .collect(),
        }
    }

    /// Built-in selectors followed by `extra`
    pub fn with_extra_selectors(extra: &[String]) -> Result<Self> {
        let mut replacer = Self::new();
        for s in extra {
            let selector = Selector::parse(s).map_err(|e| MotivadError::SelectorError {
                selector: s.clone(),
                reason: format!("{:?}", e),
            })?;
            replacer.selectors.push((s.clone(), selector));
        }
        Ok(replacer)
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.selectors.iter().map(|(s, _)| s.as_str())
    }

    /// All current matches, grouped by selector in list order.
    /// An element matching several selectors is listed under each.
    pub fn find_ads(&self, page: &HtmlPage) -> Vec<AdMatch> {
        self.selectors
            .iter()
            .flat_map(|(raw, selector)| {
                page.find(selector).into_iter().map(move |element| AdMatch {
                    selector: raw.clone(),
                    element,
                })
            })
            .collect()
    }

    /// Replace every ad with today's next reminder, or a random quote.
    ///
    /// Each element reads the reminder list afresh from `reminders`. A
    /// failure on one element is logged and counted; the pass continues.
    pub fn replace_ads(
        &self,
        page: &mut HtmlPage,
        session: &mut Session,
        reminders: &dyn ReminderSource,
        today: NaiveDate,
    ) -> ReplaceReport {
        let mut report = ReplaceReport::default();

        for (raw, selector) in &self.selectors {
            let outcomes = page.replace_each(selector, |_| nudge_for(session, reminders, today));

            for outcome in outcomes {
                match outcome {
                    ElementOutcome::Replaced { element, content } => {
                        report.replaced.push(Replacement {
                            selector: raw.clone(),
                            element,
                            kind: content.kind,
                            text: content.text,
                        });
                    }
                    ElementOutcome::Skipped { .. } => report.skipped += 1,
                    ElementOutcome::Failed { element, error } => {
                        warn!(selector = %raw, element = %element.describe(), error = %error, "ad replacement failed");
                        report.failed += 1;
                    }
                }
            }
        }

        info!(
            replaced = report.replaced.len(),
            reminders = report.reminders_shown(),
            skipped = report.skipped,
            failed = report.failed,
            "ad replacement pass finished"
        );
        report
    }
}

impl Default for AdReplacer {
    fn default() -> Self {
        Self::new()
    }
}

/// Content for one element: the next reminder due today, else a quote
fn nudge_for(session: &mut Session, reminders: &dyn ReminderSource, today: NaiveDate) -> Result<Nudge> {
    let all = reminders.reminders()?;
    match session.select_reminder(&all, today) {
        Some(reminder) => Ok(Nudge {
            kind: NudgeKind::Reminder,
            text: reminder.line(),
        }),
        None => Ok(Nudge {
            kind: NudgeKind::Quote,
            text: session.random_quote().display(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::QuoteSource;
    use crate::reminder::Reminder;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn no_reminders() -> Vec<Reminder> {
        Vec::new()
    }

    struct BrokenSource;

    impl ReminderSource for BrokenSource {
        fn reminders(&self) -> Result<Vec<Reminder>> {
            Err(MotivadError::ConfigError("storage offline".into()))
        }
    }

    #[test]
    fn test_builtin_selectors_parse() {
        let replacer = AdReplacer::new();
        assert_eq!(replacer.selectors().count(), 6);
    }

    #[test]
    fn test_invalid_extra_selector() {
        let err = AdReplacer::with_extra_selectors(&["div[".to_string()]).err().unwrap();
        assert!(matches!(err, MotivadError::SelectorError { .. }));
    }

    #[test]
    fn test_extra_selector_is_used() {
        let replacer = AdReplacer::with_extra_selectors(&["aside.sponsored".to_string()]).unwrap();
        let mut page = HtmlPage::parse(r#"<body><aside class="sponsored">buy</aside></body>"#);
        let mut session = Session::with_seed(3);

        let report = replacer.replace_ads(&mut page, &mut session, &no_reminders(), today());
        assert_eq!(report.replaced.len(), 1);
        assert_eq!(report.replaced[0].selector, "aside.sponsored");
    }

    #[test]
    fn test_each_ad_type_is_matched() {
        let page = HtmlPage::parse(
            r#"<body>
                <div class="top-ad"></div>
                <div id="adslot"></div>
                <div class="promo-banner"></div>
                <div id="banner1"></div>
                <iframe src="https://ads.example.com/x"></iframe>
                <ins class="adsbygoogle"></ins>
                <div class="content">safe</div>
            </body>"#,
        );
        let matches = AdReplacer::new().find_ads(&page);
        let selectors: Vec<&str> = matches.iter().map(|m| m.selector.as_str()).collect();

        for s in AD_SELECTORS {
            assert!(selectors.contains(&s), "{} did not match", s);
        }
        assert!(matches.iter().all(|m| m.element.class.as_deref() != Some("content")));
    }

    #[test]
    fn test_quote_when_no_reminders() {
        let mut page = HtmlPage::parse(r#"<body><div id="ad"></div></body>"#);
        let mut session = Session::start(&QuoteSource::Bundled, Some(11));

        let report = AdReplacer::new().replace_ads(&mut page, &mut session, &no_reminders(), today());

        assert_eq!(report.replaced.len(), 1);
        assert_eq!(report.replaced[0].kind, NudgeKind::Quote);
        let shown = &report.replaced[0].text;
        assert!(session.quotes().all().iter().any(|q| &q.display() == shown));
    }

    #[test]
    fn test_element_matching_two_selectors_replaced_once() {
        let mut page = HtmlPage::parse(r#"<body><div id="ad-banner" class="ad"></div></body>"#);
        let mut session = Session::with_seed(5);

        let report = AdReplacer::new().replace_ads(&mut page, &mut session, &no_reminders(), today());
        assert_eq!(report.replaced.len(), 1);
        assert_eq!(page.notes().len(), 1);
    }

    #[test]
    fn test_storage_failure_fails_elements_independently() {
        let mut page = HtmlPage::parse(r#"<body><div id="ad1"></div><div id="ad2"></div></body>"#);
        let mut session = Session::with_seed(9);

        let report = AdReplacer::new().replace_ads(&mut page, &mut session, &BrokenSource, today());
        assert_eq!(report.failed, 2);
        assert!(report.replaced.is_empty());
        assert!(page.notes().is_empty());
    }

    #[test]
    fn test_second_pass_finds_nothing() {
        let mut page = HtmlPage::parse(
            r#"<body><div class="ad"></div><ins class="adsbygoogle"></ins></body>"#,
        );
        let mut session = Session::with_seed(2);
        let replacer = AdReplacer::new();

        assert_eq!(replacer.replace_ads(&mut page, &mut session, &no_reminders(), today()).replaced.len(), 2);
        let again = replacer.replace_ads(&mut page, &mut session, &no_reminders(), today());
        assert!(again.replaced.is_empty());
        assert!(replacer.find_ads(&page).is_empty());
    }
}

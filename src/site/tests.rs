use super::*;
use crate::page::default_page;
use folio_core::{
    analytics::RecordingAnalytics,
    browser::{MemoryNavigator, NavigationEvent},
};
use folio_storage::MemoryStore;

type TestSite = Site<MemoryNavigator, MemoryStore>;

struct Harness {
    site: TestSite,
    replies: UnboundedReceiver<PendingReply>,
    analytics: Arc<RecordingAnalytics>,
}

fn load(url: &str, config: Config) -> Harness {
    let analytics = Arc::new(RecordingAnalytics::default());
    let sink: Option<Arc<dyn Analytics>> = Some(analytics.clone());
    let (mut site, replies) = Site::new(
        config,
        default_page(),
        MemoryNavigator::new(url),
        MemoryStore::new(),
        sink,
    )
    .unwrap();
    site.load();
    Harness {
        site,
        replies,
        analytics,
    }
}

/// Prefixes are virtual routes onto one document.
fn single_document() -> Config {
    let mut config = Config::default();
    config.i18n.static_variants = false;
    config
}

fn by_id(site: &TestSite, id: &str) -> ElementId {
    site.doc().get_element_by_id(id).unwrap()
}

fn first_with_class(site: &TestSite, class: &str) -> ElementId {
    site.doc().select_by_class(class)[0]
}

fn with_attr(site: &TestSite, name: &str, value: &str) -> ElementId {
    site.doc().select_by_attr_value(name, value)[0]
}

fn active_langs(site: &TestSite, class: &str) -> Vec<String> {
    let doc = site.doc();
    doc.select_by_class(class)
        .into_iter()
        .filter(|&b| doc.has_class(b, "active"))
        .filter_map(|b| doc.attr(b, "data-lang").map(str::to_string))
        .collect()
}

#[test]
fn test_query_load_then_switch_in_place() {
    let mut h = load("/?lang=en", single_document());
    let site = &mut h.site;
    assert_eq!(site.doc().lang(), Some("en"));
    assert_eq!(site.nav().location().href(), "/en?lang=en");
    assert_eq!(site.doc().text_content(by_id(site, "navProjects")), "Work");

    assert_eq!(site.switch_language("nl"), SwitchOutcome::InPlace);

    assert_eq!(site.doc().lang(), Some("nl"));
    assert!(site.nav().navigations().is_empty());
    assert_eq!(site.nav().location().path, "/nl");
    assert_eq!(site.doc().text_content(by_id(site, "navProjects")), "Projecten");
    assert_eq!(site.doc().text_content(first_with_class(site, "lang-current")), "NL");
    assert_eq!(active_langs(site, "lang-option"), vec!["nl"]);
    assert_eq!(active_langs(site, "footer-lang-btn"), vec!["nl"]);
    assert_eq!(site.store().get("preferredLanguage").unwrap().as_deref(), Some("nl"));
}

#[test]
fn test_footer_click_navigates_to_static_variant() {
    let mut h = load("/", Config::default());
    assert_eq!(h.site.current_language(), LanguageCode::Nl);
    assert_eq!(h.site.nav().location().path, "/nl");

    let en = with_attr(&h.site, "data-lang", "en");
    let footer_en = h
        .site
        .doc()
        .select_by_class("footer-lang-btn")
        .into_iter()
        .find(|&b| h.site.doc().attr(b, "data-lang") == Some("en"))
        .unwrap();
    assert_ne!(en, footer_en);

    assert!(h.site.click(footer_en));
    assert_eq!(h.site.nav().navigations(), vec!["/en"]);
    assert_eq!(h.site.store().get("preferredLanguage").unwrap().as_deref(), Some("en"));
    assert_eq!(h.analytics.names(), vec!["language_switch"]);
}

#[test]
fn test_markup_translation_is_sanitized() {
    let h = load("/en", Config::default());
    let about = with_attr(&h.site, "data-translate", "aboutScreenIntro");
    assert!(h
        .site
        .doc()
        .text_content(about)
        .starts_with("I'm Nathalja Nijman, Product Owner"));
    assert!(h.site.render().contains("<strong>Nathalja Nijman</strong>"));
    assert_eq!(
        h.site.doc().attr(by_id(&h.site, "heroInput"), "placeholder"),
        Some("Tell me about your idea, project or question...")
    );
}

#[test]
fn test_dropdown_toggle_and_outside_click() {
    let mut h = load("/nl", Config::default());
    let dropdown = by_id(&h.site, "languageDropdown");
    let label = first_with_class(&h.site, "lang-current");

    assert!(h.site.click(label));
    assert!(h.site.doc().has_class(dropdown, "active"));
    assert!(h.site.click(label));
    assert!(!h.site.doc().has_class(dropdown, "active"));

    h.site.click(label);
    let body = h.site.doc().body();
    assert!(!h.site.click(body));
    assert!(!h.site.doc().has_class(dropdown, "active"));
}

#[test]
fn test_dropdown_option_switches_language() {
    let mut h = load("/nl", single_document());
    let dropdown = by_id(&h.site, "languageDropdown");
    let option = h.site.doc().select_by_class_within(dropdown, "lang-option")[1];

    assert!(h.site.click(option));
    assert_eq!(h.site.current_language(), LanguageCode::En);
    assert_eq!(active_langs(&h.site, "lang-option"), vec!["en"]);
    assert_eq!(
        h.site.doc().attr(by_id(&h.site, "portfolioStickerLink"), "href"),
        Some("/en/portfolio-website")
    );
    assert_eq!(h.site.doc().attr(by_id(&h.site, "navAbout"), "href"), Some("/en#about"));
}

#[tokio::test(start_paused = true)]
async fn test_conversation_through_page_events() {
    let mut h = load("/nl", Config::default());
    let trigger = by_id(&h.site, "conversationTrigger");
    let input = by_id(&h.site, "chatInput");
    let send = by_id(&h.site, "sendButton");
    let conversation = by_id(&h.site, "chatConversation");

    assert!(h.site.click(trigger));
    assert!(h.site.widget().is_open());
    assert_eq!(h.analytics.names(), vec!["conversation_open"]);

    h.site.doc_mut().set_value(input, "Wat kost een website?");
    h.site.input(input);
    assert_eq!(h.site.doc().attr(send, "disabled"), None);

    let form = by_id(&h.site, "chatForm");
    assert!(h.site.submit(form));
    assert!(h.site.widget().session().is_awaiting());

    let pending = h.replies.recv().await.unwrap();
    assert_eq!(pending.reply.topic.as_deref(), Some("rates"));
    assert!(h.site.deliver(pending));
    assert_eq!(
        h.site.doc().select_by_class_within(conversation, "chat-message").len(),
        3
    );

    assert!(h.site.key(Some(input), "Escape"));
    assert!(!h.site.widget().is_open());
    assert_eq!(
        h.site.doc().select_by_class_within(conversation, "chat-message").len(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_enter_in_chat_input_submits_once() {
    let mut h = load("/nl", Config::default());
    h.site.open_conversation(None);
    let input = by_id(&h.site, "chatInput");

    h.site.doc_mut().set_value(input, "hallo");
    assert!(h.site.key(Some(input), "Enter"));
    let send = by_id(&h.site, "sendButton");
    h.site.click(send);
    assert_eq!(h.site.widget().session().exchanged().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_escape_closes_choice_before_conversation() {
    let mut h = load("/nl", Config::default());
    h.site.click(by_id(&h.site, "conversationTrigger"));
    let pill = first_with_class(&h.site, "suggestion-pill");
    assert!(h.site.click(pill));
    assert!(h.site.choice().is_open());

    assert!(h.site.key(None, "Escape"));
    assert!(!h.site.choice().is_open());
    assert!(h.site.widget().is_open());

    assert!(h.site.key(None, "Escape"));
    assert!(!h.site.widget().is_open());
    assert!(!h.site.key(None, "Escape"));
}

#[test]
fn test_hero_to_whatsapp() {
    let mut h = load("/nl", Config::default());
    let input = by_id(&h.site, "heroInput");
    h.site.doc_mut().set_value(input, "Ik zoek een PO");
    assert!(h.site.submit(by_id(&h.site, "heroConversationForm")));
    assert!(h.site.choice().is_open());

    let whatsapp = by_id(&h.site, "chooseWhatsApp");
    let label = h.site.doc().children(whatsapp)[0];
    assert!(h.site.click(label));

    let expected = "https://wa.me/31657591440?text=Hi%20Nathalja%21%20Ik%20zoek%20een%20PO";
    assert_eq!(
        h.site.nav().last_event(),
        Some(&NavigationEvent::OpenNewContext(expected.to_string()))
    );
    assert!(!h.site.choice().is_open());
    assert_eq!(
        h.analytics.names(),
        vec!["contact_choice_modal_open", "contact_choice_whatsapp"]
    );
}

#[test]
fn test_blank_hero_input_ignored() {
    let mut h = load("/nl", Config::default());
    let hero_input = by_id(&h.site, "heroInput");
    h.site.doc_mut().set_value(hero_input, "   ");
    h.site.submit(by_id(&h.site, "heroConversationForm"));
    assert!(!h.site.choice().is_open());
}

#[test]
fn test_unconfigured_channel_keeps_choice_open() {
    let mut config = Config::default();
    config.contact.email = String::new();
    let mut h = load("/nl", config);
    h.site.click(first_with_class(&h.site, "suggestion-pill"));

    assert!(h.site.click(by_id(&h.site, "chooseEmail")));
    assert!(h.site.choice().is_open());
    assert!(h.site.nav().navigations().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_get_in_touch_from_topic_screen_by_email() {
    let mut h = load("/nl", Config::default());
    h.site.open_conversation(None);
    h.site.send("Ik wil een website");
    let pending = h.replies.recv().await.unwrap();
    h.site.deliver(pending);

    assert!(h.site.click(with_attr(&h.site, "data-topic", "rates")));
    assert_eq!(h.site.widget().state().screen(), Some(Screen::Rates));

    let rates = by_id(&h.site, "ratesScreen");
    let cta = h
        .site
        .doc()
        .select_by_attr_value("data-action", "contact")
        .into_iter()
        .find(|&b| h.site.doc().parent(b) == Some(rates))
        .unwrap();
    assert!(h.site.click(cta));
    assert!(!h.site.widget().is_open());
    assert!(h.site.choice().is_open());
    let preview = first_with_class(&h.site, "user-message-preview");
    assert_eq!(h.site.doc().text_content(preview), "\"Ik wil een website\"");

    assert!(h.site.click(by_id(&h.site, "chooseEmail")));
    let navigations = h.site.nav().navigations();
    assert_eq!(navigations.len(), 1);
    assert!(navigations[0].starts_with(
        "mailto:nathaljanijman@hotmail.com?subject=Project%20aanvraag%20via%20portfolio&body=Hi%20Nathalja%2C"
    ));
}

#[tokio::test(start_paused = true)]
async fn test_inquiry_form_submit() {
    let mut h = load("/en", Config::default());
    h.site.open_conversation(None);
    h.site.select_topic(Screen::Project);

    let form = by_id(&h.site, "projectForm");
    h.site.submit(form);
    let status = by_id(&h.site, "projectFormStatus");
    assert!(h.site.doc().has_class(status, "error"));
    assert!(h.site.nav().navigations().is_empty());

    for (id, value) in [
        ("projectName", "Sam"),
        ("projectEmail", "sam@example.com"),
        ("projectType", "UX Design"),
    ] {
        let field = by_id(&h.site, id);
        h.site.doc_mut().set_value(field, value);
    }
    assert!(h.site.submit(form));
    assert_eq!(h.site.nav().navigations().len(), 1);
    assert!(!h.site.widget().is_open());
    assert_eq!(h.analytics.names().last().map(String::as_str), Some("project_inquiry"));
}

#[test]
fn test_filter_and_show_more_follow_language() {
    let mut h = load("/nl", single_document());
    let cards = h.site.doc().select_by_class("project-card");
    assert_eq!(cards.len(), 5);
    assert!(!h.site.doc().is_displayed(cards[4]));

    assert!(h.site.key(Some(with_attr(&h.site, "data-filter", "web")), "Enter"));
    let shown = cards.iter().filter(|&&c| h.site.doc().is_displayed(c)).count();
    assert_eq!(shown, 2);

    let more = by_id(&h.site, "showMoreProjects");
    let label = h.site.doc().children(more)[0];
    assert!(h.site.click(label));
    assert!(cards.iter().all(|&c| h.site.doc().is_displayed(c)));
    assert!(h.site.doc().has_class(with_attr(&h.site, "data-filter", "all"), "active"));
    assert_eq!(h.site.doc().text_content(label), "Toon minder");

    h.site.switch_language("en");
    assert_eq!(h.site.doc().text_content(label), "Show less");
}

#[test]
fn test_nav_link_highlight() {
    let mut h = load("/nl", Config::default());
    let about = by_id(&h.site, "navAbout");
    assert!(h.site.click(about));
    assert!(h.site.doc().has_class(about, "active"));
    assert_eq!(
        h.site
            .doc()
            .select_by_class("mobile-nav-item")
            .into_iter()
            .filter(|&l| h.site.doc().has_class(l, "active"))
            .count(),
        1
    );
}

#[test]
fn test_scroll_reveals_cards() {
    let mut h = load("/nl", Config::default());
    assert_eq!(h.site.scroll(0.0, 1000.0), Some(1));
    let header = first_with_class(&h.site, "header");
    assert!(!h.site.doc().has_class(header, "scrolled"));
    assert!(h.site.doc().has_class(h.site.doc().select_by_class("project-card")[0], "fade-in"));
}

#[test]
fn test_bare_document_degrades_to_noops() {
    let (mut site, _rx) = Site::new(
        Config::default(),
        Document::new(),
        MemoryNavigator::new("/?lang=en"),
        MemoryStore::new(),
        None,
    )
    .unwrap();
    let resolution = site.load();
    assert_eq!(resolution.language, LanguageCode::En);

    let body = site.doc().body();
    assert!(!site.click(body));
    assert!(!site.submit(body));
    assert!(!site.key(Some(body), "Escape"));
    assert!(!site.open_conversation(Some("hallo")));
    assert_eq!(site.switch_language("fr"), SwitchOutcome::Rejected);
}

//! The default page: every region the site components bind to, with Dutch
//! source text and `data-translate` annotations.

use folio_core::dom::{Document, ElementBuilder, ElementId};
use folio_i18n::TRANSLATE_ATTR;

/// Filter buttons: `data-filter` value, label key and text.
const FILTERS: [(&str, &str, &str); 4] = [
    ("all", "filterAll", "Alle projecten"),
    ("product-owner", "filterProductOwner", "Product Owner"),
    ("web", "filterWeb", "Web Apps"),
    ("entrepreneurship", "filterEntrepreneurship", "Ondernemerschap"),
];

/// Project cards: title key and text, category, hidden behind "show more".
const PROJECTS: [(&str, &str, &str, bool); 5] = [
    ("project1Title", "ABN AMRO - Website & Content Platform", "product-owner", false),
    ("project2Title", "BALR. - E-Commerce & Website Platform", "web", false),
    ("project3Title", "DHGate Monitor", "entrepreneurship", false),
    ("project4Title", "SLOPEZ - Premium Ski Goggles Brand", "entrepreneurship", true),
    ("project5Title", "Sprint Planner", "web", true),
];

const HERO_PILLS: [(&str, &str); 3] = [
    ("heroSuggestion1", "Snellere groei"),
    ("heroSuggestion2", "Betere resultaten"),
    ("heroSuggestion3", "Meer impact"),
];

/// An element whose content comes from the translation table.
fn translated(doc: &mut Document, tag: &str, key: &str, text: &str, parent: ElementId) -> ElementId {
    let el = ElementBuilder::new(doc, tag)
        .attr(TRANSLATE_ATTR, key)
        .append_to(parent);
    if matches!(tag, "input" | "textarea") {
        doc.set_attr(el, "placeholder", text);
    } else {
        doc.set_text(el, text);
    }
    el
}

pub fn default_page() -> Document {
    let mut doc = Document::new();
    doc.set_lang("nl");
    let body = doc.body();

    header(&mut doc, body);
    hero(&mut doc, body);
    projects(&mut doc, body);
    about(&mut doc, body);
    contact(&mut doc, body);
    footer(&mut doc, body);
    dialogue(&mut doc, body);
    choice_modal(&mut doc, body);
    doc
}

fn header(doc: &mut Document, body: ElementId) {
    let header = ElementBuilder::new(doc, "header").class("header").append_to(body);
    let nav = ElementBuilder::new(doc, "nav").class("nav").append_to(header);
    for (href, key, text) in [
        ("#projects", "navProjects", "Projecten"),
        ("#about", "navAbout", "Bio"),
        ("#contact", "navContact", "Contact"),
    ] {
        let link = translated(doc, "a", key, text, nav);
        doc.add_class(link, "nav-link");
        doc.set_attr(link, "href", href);
    }

    let selector = ElementBuilder::new(doc, "div").class("language-selector").append_to(header);
    let toggle = ElementBuilder::new(doc, "button")
        .id("languageToggle")
        .class("lang-toggle")
        .append_to(selector);
    ElementBuilder::new(doc, "span").class("lang-current").text("NL").append_to(toggle);
    let dropdown = ElementBuilder::new(doc, "div")
        .id("languageDropdown")
        .class("lang-dropdown")
        .append_to(selector);
    for (code, name) in [("nl", "Nederlands"), ("en", "English")] {
        ElementBuilder::new(doc, "button")
            .class("lang-option")
            .attr("data-lang", code)
            .text(name)
            .append_to(dropdown);
    }

    let mobile = ElementBuilder::new(doc, "nav").class("mobile-nav").append_to(body);
    for (id, text) in [
        ("navHome", "Home"),
        ("navProjects", "Projecten"),
        ("navAbout", "Bio"),
        ("navContact", "Contact"),
    ] {
        let item = translated(doc, "a", id, text, mobile);
        doc.set_attr(item, "id", id);
        doc.add_class(item, "mobile-nav-item");
        doc.set_attr(item, "href", "/");
    }
}

fn hero(doc: &mut Document, body: ElementId) {
    let hero = ElementBuilder::new(doc, "section").id("home").class("hero").append_to(body);
    translated(doc, "h1", "heroName", "Nathalja Nijman", hero);
    translated(doc, "p", "heroTagline", "7 jaar PO ervaring × 10 jaar topsport mindset", hero);

    let form = ElementBuilder::new(doc, "form")
        .id("heroConversationForm")
        .class("hero-input-form")
        .append_to(hero);
    let input = translated(
        doc,
        "input",
        "heroInputPlaceholder",
        "Vertel me over je idee, project of vraag...",
        form,
    );
    doc.set_attr(input, "id", "heroInput");
    ElementBuilder::new(doc, "button").attr("type", "submit").append_to(form);

    let pills = ElementBuilder::new(doc, "div").class("hero-suggestions").append_to(hero);
    for (key, text) in HERO_PILLS {
        let pill = translated(doc, "button", key, text, pills);
        doc.add_class(pill, "suggestion-pill");
        doc.set_attr(pill, "data-message", text);
    }

    let sticker = ElementBuilder::new(doc, "a")
        .id("portfolioStickerLink")
        .class("portfolio-sticker")
        .attr("href", "/portfolio-website")
        .append_to(hero);
    translated(doc, "span", "stickerQuestion", "Wil je ook zo'n portfolio website?", sticker);
    translated(doc, "span", "stickerAnswer", "Ik maak hem voor je! →", sticker);
}

fn projects(doc: &mut Document, body: ElementId) {
    let section = ElementBuilder::new(doc, "section").id("projects").class("projects").append_to(body);
    translated(doc, "h2", "projectsTitle", "Geselecteerd werk", section);
    translated(doc, "p", "projectsSubtitle", "5+ jaar digital product leadership", section);

    let filters = ElementBuilder::new(doc, "div").class("project-filters").append_to(section);
    for (value, key, text) in FILTERS {
        let button = translated(doc, "button", key, text, filters);
        doc.add_class(button, "filter-btn");
        doc.set_attr(button, "data-filter", value);
        if value == "all" {
            doc.add_class(button, "active");
        }
    }

    let grid = ElementBuilder::new(doc, "div").class("projects-grid").append_to(section);
    for (i, (key, title, category, hidden)) in PROJECTS.into_iter().enumerate() {
        let card = ElementBuilder::new(doc, "article")
            .class("project-card")
            .attr("data-category", category)
            .attr("data-offset-top", &(900 + i * 400).to_string())
            .append_to(grid);
        if hidden {
            doc.add_class(card, "hidden-project");
            doc.set_displayed(card, false, "block");
        }
        translated(doc, "h3", key, title, card);
    }

    let more = ElementBuilder::new(doc, "button")
        .id("showMoreProjects")
        .class("show-more-btn")
        .attr("aria-expanded", "false")
        .append_to(section);
    translated(doc, "span", "showMoreBtn", "Toon meer projecten", more);
}

fn about(doc: &mut Document, body: ElementId) {
    let section = ElementBuilder::new(doc, "section").id("about").class("about").append_to(body);
    translated(doc, "h2", "aboutTitle", "Over Nathalja", section);
    translated(doc, "p", "aboutSubtitle", "Van topsport naar digital product leadership", section);
    let stats = ElementBuilder::new(doc, "div").class("stats").append_to(section);
    for (i, figure) in ["7+", "10", "5+"].into_iter().enumerate() {
        let card = ElementBuilder::new(doc, "div")
            .class("stat-card")
            .attr("data-offset-top", &(3000 + i * 10).to_string())
            .append_to(stats);
        ElementBuilder::new(doc, "span").class("stat-number").text(figure).append_to(card);
    }
}

fn contact(doc: &mut Document, body: ElementId) {
    let section = ElementBuilder::new(doc, "section").id("contact").class("contact").append_to(body);
    translated(doc, "h2", "contactTitle", "Klaar voor de volgende stap?", section);
    translated(doc, "p", "contactSubtitle", "Ik help je verder", section);
    let trigger = translated(doc, "button", "btnLetsTalk", "Laten we in contact komen", section);
    doc.set_attr(trigger, "id", "conversationTrigger");
}

fn footer(doc: &mut Document, body: ElementId) {
    let footer = ElementBuilder::new(doc, "footer").class("footer").append_to(body);
    let langs = ElementBuilder::new(doc, "div").class("footer-lang").append_to(footer);
    for code in ["nl", "en"] {
        ElementBuilder::new(doc, "button")
            .class("footer-lang-btn")
            .attr("data-lang", code)
            .attr("aria-pressed", "false")
            .text(&code.to_ascii_uppercase())
            .append_to(langs);
    }
    translated(doc, "p", "footerRights", "© 2025 Nathalja Nijman", footer);
}

fn back_button(doc: &mut Document, screen: ElementId) {
    let back = translated(doc, "button", "btnBackToOptions", "← Terug naar opties", screen);
    doc.set_attr(back, "data-action", "back");
}

fn contact_button(doc: &mut Document, screen: ElementId, key: &str, text: &str) {
    let cta = translated(doc, "button", key, text, screen);
    doc.set_attr(cta, "data-action", "contact");
}

fn sub_screen(doc: &mut Document, dialogue: ElementId, id: &str) -> ElementId {
    let screen = ElementBuilder::new(doc, "div")
        .id(id)
        .class("dialogue-screen")
        .style("display", "none")
        .append_to(dialogue);
    back_button(doc, screen);
    screen
}

fn dialogue(doc: &mut Document, body: ElementId) {
    let dialogue = ElementBuilder::new(doc, "div")
        .id("conversationDialogue")
        .class("conversation-dialogue")
        .style("display", "none")
        .append_to(body);
    ElementBuilder::new(doc, "button").id("closeDialogue").text("×").append_to(dialogue);
    translated(doc, "h3", "dialogueGreeting", "Hi! Waar kan ik je mee helpen?", dialogue);
    translated(doc, "p", "dialogueSubtitle", "Kies een van de opties hieronder", dialogue);

    let main = ElementBuilder::new(doc, "div")
        .id("mainScreen")
        .class("dialogue-screen")
        .append_to(dialogue);
    let conversation = ElementBuilder::new(doc, "div").id("chatConversation").append_to(main);
    let greeting = ElementBuilder::new(doc, "div")
        .class("chat-message assistant-message")
        .append_to(conversation);
    let content = ElementBuilder::new(doc, "div").class("message-content").append_to(greeting);
    translated(
        doc,
        "p",
        "chatWelcome",
        "Hey! Waar kan ik je mee helpen? Vertel me gerust wat je op je hart hebt.",
        content,
    );

    let typing = ElementBuilder::new(doc, "div")
        .id("typingIndicator")
        .class("typing-indicator")
        .style("display", "none")
        .append_to(main);
    translated(doc, "span", "chatTyping", "Aan het typen...", typing);

    let suggestions = ElementBuilder::new(doc, "div").id("quickSuggestions").append_to(main);
    translated(doc, "p", "suggestionsLabel", "Of kies een van deze onderwerpen:", suggestions);
    for (topic, key, text) in [
        ("about", "suggestionAbout", "Over jou"),
        ("contact", "suggestionContact", "Contact"),
        ("project", "suggestionProject", "Project bespreken"),
        ("rates", "suggestionRates", "Tarieven"),
    ] {
        let button = translated(doc, "button", key, text, suggestions);
        doc.add_class(button, "topic-btn");
        doc.set_attr(button, "data-topic", topic);
    }

    let form = ElementBuilder::new(doc, "form").id("chatForm").append_to(main);
    let input = translated(doc, "textarea", "chatPlaceholder", "Type je bericht hier...", form);
    doc.set_attr(input, "id", "chatInput");
    ElementBuilder::new(doc, "button")
        .id("sendButton")
        .attr("type", "submit")
        .attr("disabled", "")
        .append_to(form);

    let about = sub_screen(doc, dialogue, "aboutScreen");
    translated(
        doc,
        "p",
        "aboutScreenIntro",
        "Ik ben Nathalja Nijman, Product Owner bij ABN AMRO.",
        about,
    );
    contact_button(doc, about, "btnLetsTalk", "Laten we in contact komen");

    let contact = sub_screen(doc, dialogue, "contactScreen");
    translated(
        doc,
        "p",
        "contactScreenIntro",
        "Geweldig! Er zijn verschillende manieren om contact met me op te nemen:",
        contact,
    );
    contact_button(doc, contact, "btnLetsTalk", "Laten we in contact komen");

    let project = sub_screen(doc, dialogue, "projectScreen");
    translated(
        doc,
        "p",
        "projectScreenIntro",
        "Fantastisch! Ik zou graag meer willen weten over je project.",
        project,
    );
    project_form(doc, project);

    let expertise = sub_screen(doc, dialogue, "expertiseScreen");
    translated(
        doc,
        "p",
        "expertiseScreenIntro",
        "Ik help organisaties met verschillende aspecten van productbeheer:",
        expertise,
    );
    contact_button(doc, expertise, "btnCollaborate", "Laten we samenwerken");

    let rates = sub_screen(doc, dialogue, "ratesScreen");
    translated(
        doc,
        "p",
        "ratesScreenIntro",
        "Mijn tarieven zijn afhankelijk van het type project en de duur van de samenwerking:",
        rates,
    );
    translated(doc, "p", "ratesNote", "Laten we je specifieke situatie bespreken!", rates);
    contact_button(doc, rates, "btnDiscuss", "Laten we het bespreken");
}

fn project_form(doc: &mut Document, screen: ElementId) {
    let form = ElementBuilder::new(doc, "form").id("projectForm").append_to(screen);
    for (id, key, text) in [
        ("projectName", "projectFormName", "Je naam"),
        ("projectEmail", "projectFormEmail", "Email"),
    ] {
        let input = translated(doc, "input", key, text, form);
        doc.set_attr(input, "id", id);
    }

    let select = ElementBuilder::new(doc, "select").id("projectType").append_to(form);
    for (value, key, text) in [
        ("", "projectFormTypeSelect", "Selecteer type"),
        ("Product Strategy", "projectFormTypeStrategy", "Product Strategy"),
        ("UX Design", "projectFormTypeUX", "UX Design"),
    ] {
        let option = translated(doc, "option", key, text, select);
        doc.set_attr(option, "value", value);
    }

    let description = translated(
        doc,
        "textarea",
        "projectFormDescriptionPlaceholder",
        "Vertel me meer over wat je voor ogen hebt...",
        form,
    );
    doc.set_attr(description, "id", "projectDescription");
    ElementBuilder::new(doc, "p")
        .id("projectFormStatus")
        .class("form-status")
        .append_to(form);
    let submit = translated(doc, "button", "projectFormSubmit", "Verstuur aanvraag", form);
    doc.set_attr(submit, "type", "submit");
}

fn choice_modal(doc: &mut Document, body: ElementId) {
    let modal = ElementBuilder::new(doc, "div")
        .id("contactChoiceModal")
        .class("contact-choice-modal")
        .append_to(body);
    ElementBuilder::new(doc, "div").class("modal-backdrop").append_to(modal);
    let content = ElementBuilder::new(doc, "div").class("modal-content").append_to(modal);
    ElementBuilder::new(doc, "button").id("modalClose").text("×").append_to(content);
    translated(doc, "h3", "modalTitle", "Perfect! Hoe zullen we dit aanpakken?", content);
    ElementBuilder::new(doc, "p")
        .class("user-message-preview")
        .style("display", "none")
        .append_to(content);

    for (id, title_key, title, time_key, time) in [
        ("chooseWhatsApp", "modalWhatsAppTitle", "Whatsapp chat", "modalWhatsAppTime", "Antwoord binnen 2 uur"),
        ("chooseEmail", "modalEmailTitle", "Email contact", "modalEmailTime", "Antwoord binnen 24 uur"),
    ] {
        let button = ElementBuilder::new(doc, "button").id(id).class("choice-btn").append_to(content);
        translated(doc, "span", title_key, title, button);
        translated(doc, "span", time_key, time, button);
    }
    translated(doc, "p", "modalFooter", "Kies de manier die het beste bij je past", content);
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_i18n::{LanguageBindings, TranslationTable};

    #[test]
    fn test_every_annotation_has_a_translation() {
        let doc = default_page();
        let table = TranslationTable::bundled().unwrap();
        for id in doc.select_by_attr(TRANSLATE_ATTR) {
            let key = doc.attr(id, TRANSLATE_ATTR).unwrap();
            for lang in table.languages() {
                assert!(table.get(lang, key).is_some(), "{lang} has no {key}");
            }
        }
    }

    #[test]
    fn test_language_regions_present() {
        let doc = default_page();
        let bindings = LanguageBindings::resolve(&doc);
        assert!(bindings.toggle.is_some());
        assert_eq!(bindings.options.len(), 2);
        assert_eq!(bindings.footer_buttons.len(), 2);
        assert_eq!(bindings.nav_links.len(), 4);
        assert!(bindings.sticker_link.is_some());
    }
}

use anyhow::Result;
use chrono::NaiveDate;
use renovivo_quote::core::offer::{
    Element, BENEFITS, DOCUMENT_TITLE, OFFER_FILENAME, PAGE_HEIGHT_MM, TEXT_COLUMNS,
};
use renovivo_quote::core::pricing::compute;
use renovivo_quote::domain::model::{Branding, RenovationTier};
use renovivo_quote::{
    save_offer, Catalog, CatalogVariant, ContactInfo, LocalDownloads, OfferDocument,
    OfferDocumentFormatter, QuoteError, SelectionState,
};
use tempfile::TempDir;

fn offer_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn render(state: &SelectionState, catalog: &Catalog, contact: Option<&ContactInfo>) -> OfferDocument {
    let breakdown = compute(state, catalog).unwrap();
    OfferDocumentFormatter::default()
        .render_on(state, &breakdown, catalog, contact, offer_date())
        .unwrap()
}

fn row_labels(document: &OfferDocument) -> Vec<String> {
    document
        .pages
        .iter()
        .flat_map(|p| p.elements.iter())
        .filter_map(|e| match e {
            Element::Row { label, .. } => Some(label.clone()),
            _ => None,
        })
        .collect()
}

fn price_rows(document: &OfferDocument) -> Vec<(String, String)> {
    document
        .pages
        .iter()
        .flat_map(|p| p.elements.iter())
        .filter_map(|e| match e {
            Element::Panel { rows, .. } => Some(rows.clone()),
            _ => None,
        })
        .flatten()
        .map(|r| (r.label, r.value))
        .collect()
}

#[test]
fn test_minimal_offer_omits_optional_sections() {
    let catalog = Catalog::builtin(CatalogVariant::Classic);
    let document = render(&SelectionState::default(), &catalog, None);

    assert_eq!(document.filename, OFFER_FILENAME);
    assert_eq!(document.page_count(), 1);

    assert!(document.contains_text("Renovivo"));
    assert!(document.contains_text("Every detail matters."));
    assert!(document.contains_text(DOCUMENT_TITLE));
    assert!(document.contains_text("Дата: 19.10.2026 г."));
    assert!(document.contains_text("*Цените и сроковете"));
    assert!(document.contains_text("Тел.: +359 89 371 29 19 | renovivo.bg"));

    // no customer, included work, add-ons or discount
    assert!(!document.contains_text("Клиент"));
    assert!(!document.contains_text("Какво включва"));
    assert!(!document.contains_text("Допълнителни услуги"));
    assert!(!document.contains_text("Отстъпка"));
    assert!(!row_labels(&document).contains(&"Срок за изпълнение".to_string()));

    assert_eq!(
        price_rows(&document),
        vec![
            ("Базова цена".to_string(), "10\u{a0}800 лв".to_string()),
            ("ОРИЕНТИРОВЪЧНА ЦЕНА".to_string(), "10\u{a0}800 лв".to_string()),
        ]
    );
}

#[test]
fn test_discount_line_present_only_with_discount() {
    let catalog = Catalog::builtin(CatalogVariant::Classic);

    // 10800 + 1500 = 12300: add-ons but no discount
    let state = SelectionState::new(60, "apartment", "standard").with_services(["electrical"]);
    let document = render(&state, &catalog, None);
    let rows = price_rows(&document);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1], ("Допълнителни услуги".to_string(), "1500 лв".to_string()));
    assert!(!document.contains_text("Отстъпка"));

    let state = SelectionState::new(200, "bathroom", "luxury").with_services(["electrical", "plumbing"]);
    let document = render(&state, &catalog, None);
    assert_eq!(
        price_rows(&document),
        vec![
            ("Базова цена".to_string(), "154\u{a0}000 лв".to_string()),
            ("Допълнителни услуги".to_string(), "11\u{a0}000 лв".to_string()),
            ("Отстъпка (5%)".to_string(), "-8250 лв".to_string()),
            ("ОРИЕНТИРОВЪЧНА ЦЕНА".to_string(), "156\u{a0}750 лв".to_string()),
        ]
    );
}

#[test]
fn test_services_listed_in_catalog_order_with_unit_price() {
    let catalog = Catalog::builtin(CatalogVariant::Classic);
    let state = SelectionState::new(60, "kitchen", "cosmetic").with_services(["plumbing", "electrical"]);
    let document = render(&state, &catalog, None);

    let texts: Vec<&str> = document.texts().collect();
    let electrical = texts
        .iter()
        .position(|t| *t == "• Електро инсталация (25 лв/м²)")
        .unwrap();
    let plumbing = texts
        .iter()
        .position(|t| *t == "• ВиК инсталация (30 лв/м²)")
        .unwrap();
    assert!(electrical < plumbing);
    assert!(!document.contains_text("Подови настилки"));
}

#[test]
fn test_unknown_only_services_render_no_services_section() {
    let catalog = Catalog::builtin(CatalogVariant::Classic);
    let state = SelectionState::new(60, "apartment", "standard").with_services(["roofing"]);
    let document = render(&state, &catalog, None);

    assert!(!document.contains_text("Допълнителни услуги"));
    assert_eq!(price_rows(&document).len(), 2);
}

#[test]
fn test_detailed_tier_adds_duration_and_included_work() {
    let catalog = Catalog::builtin(CatalogVariant::Detailed);
    let state = SelectionState::new(80, "apartment", "major");
    let document = render(&state, &catalog, None);

    assert!(row_labels(&document).contains(&"Срок за изпълнение".to_string()));
    assert!(document.contains_text("6-10 седмици"));
    assert!(document.contains_text("Какво включва"));
    assert!(document.contains_text("• Всичко от стандартния ремонт"));
    assert!(document.contains_text("• Технически надзор"));
}

#[test]
fn test_customer_section_lists_only_filled_fields() {
    let catalog = Catalog::default();
    let contact = ContactInfo::new("", "0888 123 456", "  ");
    let document = render(&SelectionState::default(), &catalog, Some(&contact));

    assert!(document.contains_text("Клиент"));
    let labels = row_labels(&document);
    assert!(labels.contains(&"Телефон".to_string()));
    assert!(!labels.contains(&"Име".to_string()));
    assert!(!labels.contains(&"Имейл".to_string()));
    assert!(document.contains_text("0888 123 456"));
}

#[test]
fn test_contact_falls_back_to_selection_state() {
    let catalog = Catalog::default();
    let mut state = SelectionState::default();
    state.contact_info = ContactInfo::new("Мария Петрова", "", "maria@example.bg");

    let document = render(&state, &catalog, None);
    let labels = row_labels(&document);
    assert!(labels.contains(&"Име".to_string()));
    assert!(labels.contains(&"Имейл".to_string()));
    assert!(!labels.contains(&"Телефон".to_string()));

    // an explicit empty contact hides the section
    let document = render(&state, &catalog, Some(&ContactInfo::default()));
    assert!(!document.contains_text("Клиент"));
}

#[test]
fn test_long_contact_values_stay_within_text_columns() {
    let catalog = Catalog::default();
    let email = format!("{}@example.bg", "a".repeat(80));
    let contact = ContactInfo::new("Иван Петров", "0888 123 456", email.as_str());
    let document = render(&SelectionState::default(), &catalog, Some(&contact));

    let text = document.to_plain_text();
    assert!(text.lines().all(|l| l.chars().count() <= TEXT_COLUMNS));
    assert!(text.contains("@example.bg"));
    assert!(document.contains_text(&"a".repeat(65)));
    assert_eq!(document.page_count(), 1);
}

#[test]
fn test_benefits_follow_pricing_panel() {
    let catalog = Catalog::default();
    let document = render(&SelectionState::default(), &catalog, None);

    let texts: Vec<&str> = document.texts().collect();
    let total = texts.iter().position(|t| *t == "ОРИЕНТИРОВЪЧНА ЦЕНА").unwrap();
    for benefit in BENEFITS {
        let line = format!("✓ {}", benefit);
        let at = texts.iter().position(|t| *t == line).unwrap();
        assert!(at > total);
    }
    assert!(document.contains_text("5 години гаранция"));
}

#[test]
fn test_unknown_tier_is_configuration_error() {
    let catalog = Catalog::builtin(CatalogVariant::Classic);
    let state = SelectionState::new(60, "apartment", "major");
    let result = OfferDocumentFormatter::default().render_on(
        &state,
        &Default::default(),
        &catalog,
        None,
        offer_date(),
    );
    assert!(matches!(result, Err(QuoteError::ConfigError { .. })));
}

#[test]
fn test_custom_branding_in_header_and_footer() {
    let catalog = Catalog::default();
    let state = SelectionState::default();
    let breakdown = compute(&state, &catalog).unwrap();
    let branding = Branding {
        business_name: "Ремонти ООД".to_string(),
        phone: "+359 2 000 00 00".to_string(),
        domain: "example.bg".to_string(),
        ..Branding::default()
    };

    let document = OfferDocumentFormatter::new(branding)
        .render_on(&state, &breakdown, &catalog, None, offer_date())
        .unwrap();
    assert!(document.contains_text("Ремонти ООД"));
    assert!(document.contains_text("Тел.: +359 2 000 00 00 | example.bg"));
    assert!(!document.contains_text("renovivo.bg"));
}

#[test]
fn test_long_included_list_paginates() {
    let mut catalog = Catalog::builtin(CatalogVariant::Detailed);
    catalog.tiers.push(RenovationTier {
        id: "full".to_string(),
        name: "Пълен".to_string(),
        description: "Всичко".to_string(),
        price_per_sqm: 700.0,
        duration: Some("6 месеца".to_string()),
        included: (1..=45).map(|i| format!("Позиция {}", i)).collect(),
    });
    let state = SelectionState::new(120, "house", "full").with_services(["electrical", "flooring"]);
    let document = render(&state, &catalog, Some(&ContactInfo::new("Иван", "0888", "i@e.bg")));

    assert!(document.page_count() > 1);
    assert!(document.contains_text("• Позиция 45"));

    for page in &document.pages {
        match page.elements.last() {
            Some(Element::Footer {
                page: number,
                page_count,
                text,
                ..
            }) => {
                assert_eq!(*number, page.number);
                assert_eq!(*page_count, document.page_count());
                assert_eq!(text, "Тел.: +359 89 371 29 19 | renovivo.bg");
            }
            other => panic!("page {} does not end with a footer: {:?}", page.number, other),
        }
    }

    let panels: Vec<(f32, f32)> = document
        .pages
        .iter()
        .flat_map(|p| p.elements.iter())
        .filter_map(|e| match e {
            Element::Panel { y, height, .. } => Some((*y, *height)),
            _ => None,
        })
        .collect();
    assert_eq!(panels.len(), 1);
    let (y, height) = panels[0];
    assert!(y + height <= PAGE_HEIGHT_MM - 20.0);

    let text = document.to_plain_text();
    assert_eq!(text.matches('\u{c}').count(), document.page_count() - 1);
}

#[test]
fn test_plain_text_and_json_renderings() -> Result<()> {
    let catalog = Catalog::builtin(CatalogVariant::Classic);
    let state = SelectionState::new(200, "bathroom", "luxury").with_services(["electrical", "plumbing"]);
    let document = render(&state, &catalog, None);

    let text = document.to_plain_text();
    assert!(text.starts_with(&"=".repeat(72)));
    assert!(text.contains(DOCUMENT_TITLE));
    assert!(text.lines().any(|l| l.starts_with("| Отстъпка (5%)") && l.ends_with("-8250 лв |")));
    assert!(text
        .lines()
        .any(|l| l.starts_with("| ОРИЕНТИРОВЪЧНА ЦЕНА") && l.ends_with("156\u{a0}750 лв |")));
    assert!(text.lines().all(|l| l.chars().count() <= 72));

    let json: serde_json::Value = serde_json::from_str(&document.to_json()?)?;
    assert_eq!(json["filename"], OFFER_FILENAME);
    assert_eq!(json["generated_on"], "2026-10-19");
    assert_eq!(json["pages"][0]["elements"][0]["kind"], "band");

    Ok(())
}

#[tokio::test]
async fn test_save_offer_to_local_downloads() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let downloads = LocalDownloads::new(temp_dir.path().display().to_string());
    let document = render(&SelectionState::default(), &Catalog::default(), None);

    let location = save_offer(&downloads, &document).await?;
    assert!(location.ends_with(OFFER_FILENAME));

    let saved = std::fs::read_to_string(temp_dir.path().join(OFFER_FILENAME))?;
    assert_eq!(saved, document.to_plain_text());

    Ok(())
}

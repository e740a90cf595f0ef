//! Public site fragments: service and product cards, portfolio, contacts.

use super::html::empty_state;
use crate::model::product::Product;
use crate::model::service::Service;
use crate::model::settings::Settings;
use maud::{html, Markup};

pub const EMPTY_SITE_SERVICES_TITLE: &str = "Услуги скоро появятся";
pub const EMPTY_SITE_PRODUCTS_TITLE: &str = "Каталог скоро появится";
pub const EMPTY_PORTFOLIO_TITLE: &str = "Проектов пока нет";

pub fn render_service_cards(services: &[Service]) -> String {
    if services.is_empty() {
        return empty_state("fa-concierge-bell", EMPTY_SITE_SERVICES_TITLE, "").into_string();
    }

    html! {
        @for service in services {
            div.service-card {
                div.service-icon { i class=(format!("fas {}", service.display_icon())) {} }
                h3 { (service.name) }
                p { (service.description) }
                ul.service-features {
                    @for feature in &service.features {
                        li { (feature) }
                    }
                }
                div.service-price { (service.price) }
            }
        }
    }
    .into_string()
}

pub fn render_product_cards(products: &[Product]) -> String {
    if products.is_empty() {
        return empty_state("fa-shopping-cart", EMPTY_SITE_PRODUCTS_TITLE, "").into_string();
    }

    html! {
        @for product in products {
            (product_card(product))
        }
    }
    .into_string()
}

/// Renders only products flagged with `show_in_portfolio`.
pub fn render_portfolio(products: &[Product]) -> String {
    let mut flagged = products
        .iter()
        .filter(|product| product.show_in_portfolio)
        .peekable();
    if flagged.peek().is_none() {
        return empty_state("fa-images", EMPTY_PORTFOLIO_TITLE, "").into_string();
    }

    html! {
        @for product in flagged {
            div.portfolio-item data-id=(product.id.to_string()) {
                img src=(product.display_image()) alt=(product.name);
                div.portfolio-overlay {
                    h3 { (product.name) }
                    p { (product.location) }
                }
            }
        }
    }
    .into_string()
}

pub fn render_contacts(settings: &Settings) -> String {
    html! {
        div.contact-info {
            h3 { (settings.company_name) }
            p.contact-phone { (settings.company_phone) }
            p.contact-email { (settings.company_email) }
            p.contact-address { (settings.company_address) }
            p.contact-hours {
                @for (index, line) in settings.company_hours.lines().enumerate() {
                    @if index > 0 { br; }
                    (line)
                }
            }
        }
    }
    .into_string()
}

fn product_card(product: &Product) -> Markup {
    let specs = [
        ("Материал", &product.specs.material),
        ("Возраст", &product.specs.age),
        ("Гарантия", &product.specs.warranty),
        ("Размер", &product.specs.size),
    ];

    html! {
        div.product-card data-category=(product.category) {
            img src=(product.display_image()) alt=(product.name);
            div.product-info {
                h3 { (product.name) }
                p { (product.description) }
                ul.product-specs {
                    @for (label, value) in specs {
                        @if !value.trim().is_empty() {
                            li { span { (label) ":" } " " (value) }
                        }
                    }
                }
                div.product-price { (product.price) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{render_contacts, render_portfolio, render_product_cards, EMPTY_PORTFOLIO_TITLE};
    use crate::model::id::new_entity_id;
    use crate::model::product::{Product, ProductSpecs};
    use crate::model::settings::Settings;

    #[test]
    fn contacts_split_hours_into_lines() {
        let html = render_contacts(&Settings::default());
        assert!(html.contains("Пн-Пт: 8:00 - 17:00<br>Сб: 8:00 - 16:00"));
    }

    #[test]
    fn product_card_skips_blank_specs() {
        let product = Product {
            id: new_entity_id(),
            name: "Качели".to_string(),
            description: String::new(),
            price: "9 000 ₽".to_string(),
            category: "swings".to_string(),
            image: String::new(),
            location: String::new(),
            specs: ProductSpecs {
                material: "Металл".to_string(),
                ..ProductSpecs::default()
            },
            show_in_portfolio: false,
        };
        let html = render_product_cards(&[product]);
        assert!(html.contains("<span>Материал:</span> Металл"));
        assert!(!html.contains("Гарантия"));
        assert!(html.contains("via.placeholder.com"));
    }

    #[test]
    fn portfolio_escapes_names_and_skips_unflagged() {
        let flagged = Product {
            id: new_entity_id(),
            name: "Замок <Люкс>".to_string(),
            description: String::new(),
            price: String::new(),
            category: "complexes".to_string(),
            image: "https://example.com/castle.jpg".to_string(),
            location: "Химки".to_string(),
            specs: ProductSpecs::default(),
            show_in_portfolio: true,
        };
        let hidden = Product {
            id: new_entity_id(),
            name: "Скрытый".to_string(),
            show_in_portfolio: false,
            ..flagged.clone()
        };

        let html = render_portfolio(&[flagged, hidden.clone()]);
        assert_eq!(html.matches("class=\"portfolio-item\"").count(), 1);
        assert!(html.contains("<h3>Замок &lt;Люкс&gt;</h3>"));
        assert!(!html.contains("Скрытый"));

        assert!(render_portfolio(&[hidden]).contains(EMPTY_PORTFOLIO_TITLE));
    }
}

//! Admin panel fragments: entity lists, dashboard and activity feed.

use super::html::empty_state;
use crate::model::activity::Activity;
use crate::model::application::{Application, ApplicationStatus};
use crate::model::image::Image;
use crate::model::product::Product;
use crate::model::service::Service;
use crate::repo::admin_store::DashboardStats;
use maud::{html, Markup};

pub const EMPTY_SERVICES_TITLE: &str = "Услуг пока нет";
pub const EMPTY_PRODUCTS_TITLE: &str = "Товаров пока нет";
pub const EMPTY_IMAGES_TITLE: &str = "Изображений пока нет";
pub const EMPTY_APPLICATIONS_TITLE: &str = "Заявок пока нет";
pub const EMPTY_ACTIVITY_TEXT: &str = "Активности пока нет";

const APPLICATION_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";
const IMAGE_DATE_FORMAT: &str = "%d.%m.%Y";
const ACTIVITY_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

pub fn render_services(services: &[Service]) -> String {
    if services.is_empty() {
        return empty_state(
            "fa-concierge-bell",
            EMPTY_SERVICES_TITLE,
            "Добавьте вашу первую услугу",
        )
        .into_string();
    }

    html! {
        @for service in services {
            div.service-item data-id=(service.id.to_string()) {
                div.service-icon-small { i class=(fa(service.display_icon())) {} }
                div.item-content {
                    h4 { (service.name) }
                    p { (service.description) }
                    div.item-meta {
                        span.price { (service.price) }
                        span.features { (service.features.len()) " особенностей" }
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn render_products(products: &[Product]) -> String {
    if products.is_empty() {
        return empty_state(
            "fa-shopping-cart",
            EMPTY_PRODUCTS_TITLE,
            "Добавьте ваш первый товар",
        )
        .into_string();
    }

    html! {
        @for product in products {
            div.product-item data-id=(product.id.to_string()) {
                div.product-image-small { img src=(product.display_image()) alt=(product.name); }
                div.item-content {
                    h4 { (product.name) }
                    p { (product.description) }
                    div.item-meta {
                        span.price { (product.price) }
                        span.category { (product.category) }
                        span.location { (product.location) }
                        @if product.show_in_portfolio {
                            span.portfolio-flag { "В портфолио" }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn render_images(images: &[Image]) -> String {
    if images.is_empty() {
        return empty_state(
            "fa-images",
            EMPTY_IMAGES_TITLE,
            "Загрузите ваше первое изображение",
        )
        .into_string();
    }

    html! {
        @for image in images {
            div.image-item data-id=(image.id.to_string()) {
                img src=(image.url) alt=(image.name);
                div.image-info {
                    p.image-name { (image.name) }
                    small.image-date { (image.uploaded_at.format(IMAGE_DATE_FORMAT).to_string()) }
                }
            }
        }
    }
    .into_string()
}

pub fn render_applications(applications: &[Application]) -> String {
    if applications.is_empty() {
        return empty_state(
            "fa-inbox",
            EMPTY_APPLICATIONS_TITLE,
            "Все новые заявки будут появляться здесь",
        )
        .into_string();
    }

    html! {
        div.table-header {
            div { "Дата" }
            div { "Имя" }
            div { "Сообщение" }
            div { "Статус" }
        }
        @for application in applications {
            div.table-row data-id=(application.id.to_string()) {
                div { (application.date.format(APPLICATION_DATE_FORMAT).to_string()) }
                div { (application.name) }
                div.truncate { (or_placeholder(&application.message, "Без сообщения")) }
                div { (status_badge(application.status)) }
            }
        }
    }
    .into_string()
}

/// Detail view of one application.
pub fn render_application_details(application: &Application) -> String {
    const NOT_GIVEN: &str = "Не указан";
    let date = application.date.format(APPLICATION_DATE_FORMAT).to_string();
    let message = or_placeholder(&application.message, "Нет сообщения");

    html! {
        div.application-details {
            (text_row("Дата:", &date))
            (text_row("Имя:", &application.name))
            (text_row("Телефон:", &application.phone))
            (text_row("Email:", or_placeholder(&application.email, NOT_GIVEN)))
            (text_row("Интерес:", or_placeholder(&application.interest, NOT_GIVEN)))
            (detail_row("Сообщение:", html! { p.application-message { (message) } }))
            (detail_row("Статус:", status_badge(application.status)))
            (text_row("Источник:", or_placeholder(&application.source, "Неизвестно")))
        }
    }
    .into_string()
}

/// `<select>` for the status-change dialog with `current` preselected.
pub fn render_status_select(current: ApplicationStatus) -> String {
    html! {
        select id="newStatus" class="form-control" {
            @for status in ApplicationStatus::ALL {
                option value=(status.as_str()) selected[status == current] { (status.label()) }
            }
        }
    }
    .into_string()
}

pub fn render_activity(activities: &[Activity]) -> String {
    let time = |activity: &Activity| activity.timestamp.format(ACTIVITY_DATE_FORMAT).to_string();

    html! {
        @if activities.is_empty() {
            p.text-center { (EMPTY_ACTIVITY_TEXT) }
        }
        @for activity in activities {
            div.activity-item {
                div.activity-icon { i class=(fa(&activity.icon)) {} }
                div.activity-content {
                    p.activity-message { (activity.message) }
                    small.activity-time { (time(activity)) }
                }
            }
        }
    }
    .into_string()
}

pub fn render_dashboard(stats: &DashboardStats) -> String {
    let cards = [
        ("services-count", "Услуги", stats.services),
        ("products-count", "Товары", stats.products),
        ("portfolio-count", "Портфолио", stats.portfolio),
        ("applications-count", "Новые заявки", stats.new_applications),
        ("applications-total", "Всего заявок", stats.total_applications),
    ];

    html! {
        div.stats-grid {
            @for (id, title, value) in cards {
                div.stat-card {
                    h3 id=(id) { (value) }
                    p { (title) }
                }
            }
        }
    }
    .into_string()
}

fn fa(icon: &str) -> String {
    format!("fas {icon}")
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

fn status_badge(status: ApplicationStatus) -> Markup {
    html! {
        span class=(format!("status-badge status-{}", status.as_str())) { (status.label()) }
    }
}

fn text_row(title: &str, value: &str) -> Markup {
    detail_row(title, html! { span { (value) } })
}

fn detail_row(title: &str, value: Markup) -> Markup {
    html! {
        div.detail-row {
            strong { (title) }
            (value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        render_activity, render_application_details, render_applications, render_dashboard,
        render_images, render_products, render_services, render_status_select,
        EMPTY_ACTIVITY_TEXT, EMPTY_APPLICATIONS_TITLE, EMPTY_IMAGES_TITLE, EMPTY_PRODUCTS_TITLE,
        EMPTY_SERVICES_TITLE,
    };
    use crate::model::activity::Activity;
    use crate::model::application::{Application, ApplicationStatus};
    use crate::model::id::new_entity_id;
    use crate::model::image::Image;
    use crate::model::product::{Product, ProductSpecs};
    use crate::model::service::Service;
    use crate::repo::admin_store::DashboardStats;
    use chrono::{TimeZone, Utc};

    fn application(message: &str, status: ApplicationStatus) -> Application {
        Application {
            id: new_entity_id(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            name: "Ирина".to_string(),
            phone: "+7 900 000-00-00".to_string(),
            email: String::new(),
            interest: "complexes".to_string(),
            message: message.to_string(),
            status,
            source: "website".to_string(),
        }
    }

    #[test]
    fn empty_lists_render_their_empty_state() {
        let cases = [
            (render_services(&[]), EMPTY_SERVICES_TITLE),
            (render_products(&[]), EMPTY_PRODUCTS_TITLE),
            (render_images(&[]), EMPTY_IMAGES_TITLE),
            (render_applications(&[]), EMPTY_APPLICATIONS_TITLE),
        ];
        for (html, title) in cases {
            assert!(html.contains("class=\"empty-state\""), "{title}");
            assert!(html.contains(&format!("<h3>{title}</h3>")));
        }
        assert_eq!(
            render_activity(&[]),
            format!("<p class=\"text-center\">{EMPTY_ACTIVITY_TEXT}</p>")
        );
    }

    #[test]
    fn service_markup_is_escaped() {
        let service = Service {
            id: new_entity_id(),
            name: "<script>".to_string(),
            description: "a & b".to_string(),
            price: "1".to_string(),
            icon: String::new(),
            features: vec!["x".to_string(), "y".to_string()],
        };
        let html = render_services(&[service]);
        assert!(html.contains("<h4>&lt;script&gt;</h4>"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("2 особенностей"));
        assert!(html.contains("<i class=\"fas fa-paint-brush\"></i>"));
    }

    #[test]
    fn product_rows_show_portfolio_flag_and_placeholder() {
        let flagged = Product {
            id: new_entity_id(),
            name: "Горка \"Волна\"".to_string(),
            description: "Пластик".to_string(),
            price: "45 000 ₽".to_string(),
            category: "slides".to_string(),
            image: String::new(),
            location: "Москва".to_string(),
            specs: ProductSpecs::default(),
            show_in_portfolio: true,
        };
        let plain = Product {
            id: new_entity_id(),
            show_in_portfolio: false,
            ..flagged.clone()
        };

        let html = render_products(&[flagged, plain]);
        assert_eq!(html.matches("class=\"product-item\"").count(), 2);
        assert_eq!(html.matches("В портфолио").count(), 1);
        assert!(html.contains("alt=\"Горка &quot;Волна&quot;\""));
        assert!(html.contains("via.placeholder.com"));
    }

    #[test]
    fn image_tiles_carry_url_name_and_date() {
        let image = Image {
            id: new_entity_id(),
            url: "https://example.com/a.jpg?w=1&h=2".to_string(),
            name: "Площадка".to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap(),
        };
        let html = render_images(&[image.clone()]);
        assert!(html.contains(&format!("data-id=\"{}\"", image.id)));
        assert!(html.contains("src=\"https://example.com/a.jpg?w=1&amp;h=2\""));
        assert!(html.contains("<p class=\"image-name\">Площадка</p>"));
        assert!(html.contains("08.03.2024"));
    }

    #[test]
    fn application_rows_label_status_and_blank_message() {
        let html = render_applications(&[
            application("", ApplicationStatus::New),
            application("Перезвоните", ApplicationStatus::Processed),
        ]);
        assert!(html.starts_with("<div class=\"table-header\">"));
        assert_eq!(html.matches("class=\"table-row\"").count(), 2);
        assert!(html.contains("Без сообщения"));
        assert!(html.contains("<span class=\"status-badge status-new\">Новая</span>"));
        assert!(html.contains("<span class=\"status-badge status-processed\">В работе</span>"));
        assert!(html.contains("01.05.2024 09:30"));
    }

    #[test]
    fn application_details_fill_placeholders() {
        let html = render_application_details(&application("", ApplicationStatus::Completed));
        assert!(html.contains("<strong>Email:</strong><span>Не указан</span>"));
        assert!(html.contains("<p class=\"application-message\">Нет сообщения</p>"));
        assert!(html.contains("<span>complexes</span>"));
        assert!(html.contains("status-completed\">Завершена"));
        assert!(html.contains("<strong>Источник:</strong><span>website</span>"));
    }

    #[test]
    fn status_select_marks_current_status() {
        let html = render_status_select(ApplicationStatus::Processed);
        assert_eq!(html.matches("<option").count(), ApplicationStatus::ALL.len());
        assert!(html.contains("<option value=\"processed\" selected>В работе</option>"));
        assert!(html.contains("<option value=\"new\">Новая</option>"));
    }

    #[test]
    fn activity_items_keep_order_and_escape_messages() {
        let newest = Activity::new("Добавлена услуга: <b>Монтаж</b>", Utc::now());
        let older = Activity::new("Обновлен товар: Горка", Utc::now());
        let html = render_activity(&[newest, older]);
        assert_eq!(html.matches("class=\"activity-item\"").count(), 2);
        let first = html.find("Добавлена услуга").unwrap();
        let second = html.find("Обновлен товар").unwrap();
        assert!(first < second);
        assert!(html.contains("&lt;b&gt;Монтаж&lt;/b&gt;"));
        assert!(html.contains("<i class=\"fas fa-history\"></i>"));
    }

    #[test]
    fn dashboard_lists_every_counter() {
        let html = render_dashboard(&DashboardStats {
            services: 2,
            products: 5,
            portfolio: 1,
            new_applications: 3,
            total_applications: 4,
        });
        assert!(html.contains("<h3 id=\"products-count\">5</h3>"));
        assert!(html.contains("<h3 id=\"applications-total\">4</h3>"));
    }
}

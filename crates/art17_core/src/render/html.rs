//! Shared fragment pieces.

use maud::{html, Markup};

/// Empty-state block shared by every list renderer. `hint` may be empty.
pub(crate) fn empty_state(icon: &str, title: &str, hint: &str) -> Markup {
    html! {
        div.empty-state {
            i class=(format!("fas {icon} fa-3x")) {}
            h3 { (title) }
            @if !hint.is_empty() {
                p { (hint) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::empty_state;

    #[test]
    fn empty_state_escapes_and_skips_blank_hint() {
        let html = empty_state("fa-inbox", "<нет>", "").into_string();
        assert!(html.starts_with("<div class=\"empty-state\">"));
        assert!(html.contains("<i class=\"fas fa-inbox fa-3x\"></i>"));
        assert!(html.contains("<h3>&lt;нет&gt;</h3>"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn empty_state_keeps_hint_text() {
        let html = empty_state("fa-images", "Пусто", "от 5000 ₽ & выше").into_string();
        assert!(html.contains("<p>от 5000 ₽ &amp; выше</p>"));
    }
}

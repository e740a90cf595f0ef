//! Company settings singleton.

use serde::{Deserialize, Serialize};

/// Company contact data and SEO metadata.
///
/// `Default` yields the factory settings. Fields missing from a stored blob
/// load as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_phone: String,
    #[serde(default)]
    pub company_email: String,
    #[serde(default)]
    pub company_address: String,
    /// Multi-line opening hours.
    #[serde(default)]
    pub company_hours: String,
    #[serde(default)]
    pub seo_description: String,
    #[serde(default)]
    pub seo_keywords: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            company_name: "Арт 17".to_string(),
            company_phone: "8 (499) 688-63-54".to_string(),
            company_email: "sales@pandaplay.ru".to_string(),
            company_address: "Калуга, Аэропортовский переулок 11".to_string(),
            company_hours: "Пн-Пт: 8:00 - 17:00\nСб: 8:00 - 16:00\nВс: выходной".to_string(),
            seo_description: "Профессиональный дизайн интерьеров от студии \"Арт 17\". \
                Создаем уникальные пространства для игр на открытом воздухе."
                .to_string(),
            seo_keywords:
                "дизайн интерьеров, игровые площадки, детские площадки, оборудование, монтаж"
                    .to_string(),
        }
    }
}

impl Settings {
    /// Returns a copy with every value trimmed.
    pub fn trimmed(&self) -> Self {
        Self {
            company_name: self.company_name.trim().to_string(),
            company_phone: self.company_phone.trim().to_string(),
            company_email: self.company_email.trim().to_string(),
            company_address: self.company_address.trim().to_string(),
            company_hours: self.company_hours.trim().to_string(),
            seo_description: self.seo_description.trim().to_string(),
            seo_keywords: self.seo_keywords.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;

    #[test]
    fn partial_blob_fills_missing_with_empty() {
        let settings: Settings = serde_json::from_str(r#"{"companyName":"Арт 17"}"#).unwrap();
        assert_eq!(settings.company_name, "Арт 17");
        assert!(settings.company_phone.is_empty());
    }

    #[test]
    fn factory_defaults_are_populated() {
        let settings = Settings::default();
        assert_eq!(settings.company_phone, "8 (499) 688-63-54");
        assert!(settings.company_hours.contains('\n'));
    }
}

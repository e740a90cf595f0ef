//! User-visible action outcomes.

use crate::model::id::EntityKind;
use crate::repo::admin_store::{CorruptBlob, StoreError};
use log::error;

/// Severity of a notice, mirrored by the toast style in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

pub(crate) fn created_message(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Service => "Услуга добавлена",
        EntityKind::Product => "Товар добавлен",
        EntityKind::Image => "Изображение добавлено",
        EntityKind::Application => "Спасибо! Ваша заявка отправлена. Мы свяжемся с вами в течение часа.",
    }
}

pub(crate) fn updated_message(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Service => "Услуга обновлена",
        EntityKind::Product => "Товар обновлен",
        EntityKind::Image => "Изображение обновлено",
        EntityKind::Application => "Статус заявки изменен",
    }
}

pub(crate) fn deleted_message(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Service => "Услуга удалена",
        EntityKind::Product => "Товар удален",
        EntityKind::Image => "Изображение удалено",
        EntityKind::Application => "Заявка удалена",
    }
}

/// Converts a store error into an error notice and logs it.
pub fn store_error_notice(err: &StoreError) -> Notice {
    error!("event=notice module=service status=error error={err}");
    match err {
        StoreError::NotFound(..) => Notice::error("Запись не найдена"),
        StoreError::ReadOnlyBlob(_) => {
            Notice::error("Сохраненные данные повреждены. Изменения заблокированы до сброса")
        }
        StoreError::Serialization(_) | StoreError::Storage(_) => {
            Notice::error("Ошибка сохранения данных")
        }
    }
}

/// Warning shown after a load that found an unreadable blob.
pub fn corrupt_blob_notice(corrupt: &CorruptBlob) -> Notice {
    match &corrupt.backup_key {
        Some(backup_key) => Notice::warning(format!(
            "Данные «{}» повреждены и загружены по умолчанию. Копия сохранена в {backup_key}",
            corrupt.key
        )),
        None => Notice::error(format!(
            "Данные «{}» повреждены. Изменения заблокированы до сброса",
            corrupt.key
        )),
    }
}

/// Hint shown when `check_for_updates` reports a stale session.
pub fn update_check_notice(stale: bool) -> Option<Notice> {
    stale.then(|| Notice::info("Рекомендуется проверить обновления данных"))
}

/// Outcome notice for a delete action.
pub fn delete_notice<T>(kind: EntityKind, result: &Result<T, StoreError>) -> Notice {
    match result {
        Ok(_) => Notice::warning(deleted_message(kind)),
        Err(err) => store_error_notice(err),
    }
}

// Display helpers for the signed-in user's profile.

use canteen_api::UserProfile;

use crate::i18n::Locale;

/// Shown when the profile carries no name.
pub const DEFAULT_USER_LABEL: &str = "Пайдаланушы";

pub trait ProfileExt {
    fn display_name(&self) -> &str;
    fn school_name(&self, locale: Locale) -> &str;
    fn warehouse_label(&self) -> String;
}

impl ProfileExt for UserProfile {
    fn display_name(&self) -> &str {
        [self.user_name.as_str(), self.login.as_str()]
            .into_iter()
            .find(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_USER_LABEL)
    }

    /// Russian UI gets the Russian name; everything else the Kazakh one.
    fn school_name(&self, locale: Locale) -> &str {
        let (preferred, fallback) = match locale {
            Locale::Ru => (&self.school_name_ru, &self.school_name_kz),
            Locale::Kz | Locale::En => (&self.school_name_kz, &self.school_name_ru),
        };
        if preferred.is_empty() { fallback } else { preferred }
    }

    fn warehouse_label(&self) -> String {
        if self.warehouse_name.is_empty() {
            format!("#{}", self.warehouse_id)
        } else {
            format!("{} (#{})", self.warehouse_name, self.warehouse_id)
        }
    }
}

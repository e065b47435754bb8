// ── Message catalog ──
//
// Stores build their notifications from two keys: a message template
// (`messages.createSuccess`) and an entity label (`dish.item`). The
// template's `{item}` placeholder is filled with the label. Unknown keys
// render as the key itself so a missing translation is visible, not fatal.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// UI language. Kazakh is the product default.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    Kz,
    Ru,
    En,
}

impl Locale {
    /// BCP 47 tag for `Accept-Language`; Kazakh is `kk`, not `kz`.
    pub fn language_tag(self) -> &'static str {
        match self {
            Locale::Kz => "kk",
            Locale::Ru => "ru",
            Locale::En => "en",
        }
    }
}

/// Key-based message lookup.
pub trait Translate: Send + Sync {
    /// Resolve a key, falling back to the key itself.
    fn t(&self, key: &str) -> String;

    /// Resolve `template_key` and substitute `{item}` with `item_key`'s text.
    fn t_item(&self, template_key: &str, item_key: &str) -> String {
        self.t(template_key).replace("{item}", &self.t(item_key))
    }
}

/// Built-in catalog covering every store notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn lookup(&self, key: &str) -> Option<&'static str> {
        if let Some(name) = key.strip_prefix("messages.") {
            return message(self.locale, name);
        }
        let (entity, form) = key.split_once('.')?;
        let row = ENTITIES.iter().find(|row| row.key == entity)?;
        let (item, list) = match self.locale {
            Locale::Kz => row.kz,
            Locale::Ru => row.ru,
            Locale::En => row.en,
        };
        match form {
            "item" => Some(item),
            "itemList" => Some(list),
            _ => None,
        }
    }
}

impl Translate for Catalog {
    fn t(&self, key: &str) -> String {
        self.lookup(key).map_or_else(|| key.to_owned(), str::to_owned)
    }
}

// ── Tables ───────────────────────────────────────────────────────────

fn message(locale: Locale, name: &str) -> Option<&'static str> {
    let text = match (locale, name) {
        (Locale::Kz, "fetchListError") => "Жүктеу мүмкін болмады: {item}",
        (Locale::Kz, "fetchItemError") => "Жазбаны жүктеу мүмкін болмады: {item}",
        (Locale::Kz, "createSuccess") => "Құрылды: {item}",
        (Locale::Kz, "createError") => "Құру мүмкін болмады: {item}",
        (Locale::Kz, "updateSuccess") => "Сақталды: {item}",
        (Locale::Kz, "updateError") => "Сақтау мүмкін болмады: {item}",
        (Locale::Kz, "deleteSuccess") => "Жойылды: {item}",
        (Locale::Kz, "deleteError") => "Жою мүмкін болмады: {item}",
        (Locale::Kz, "deleteReloadError") => "Жойылды, бірақ тізім жаңартылмады: {item}",
        (Locale::Kz, "deleting") => "Жойылуда…",

        (Locale::Ru, "fetchListError") => "Не удалось загрузить: {item}",
        (Locale::Ru, "fetchItemError") => "Не удалось загрузить запись: {item}",
        (Locale::Ru, "createSuccess") => "Создано: {item}",
        (Locale::Ru, "createError") => "Не удалось создать: {item}",
        (Locale::Ru, "updateSuccess") => "Сохранено: {item}",
        (Locale::Ru, "updateError") => "Не удалось сохранить: {item}",
        (Locale::Ru, "deleteSuccess") => "Удалено: {item}",
        (Locale::Ru, "deleteError") => "Не удалось удалить: {item}",
        (Locale::Ru, "deleteReloadError") => "Удалено, но список не обновился: {item}",
        (Locale::Ru, "deleting") => "Удаление…",

        (Locale::En, "fetchListError") => "Failed to load: {item}",
        (Locale::En, "fetchItemError") => "Failed to load record: {item}",
        (Locale::En, "createSuccess") => "Created: {item}",
        (Locale::En, "createError") => "Failed to create: {item}",
        (Locale::En, "updateSuccess") => "Saved: {item}",
        (Locale::En, "updateError") => "Failed to save: {item}",
        (Locale::En, "deleteSuccess") => "Deleted: {item}",
        (Locale::En, "deleteError") => "Failed to delete: {item}",
        (Locale::En, "deleteReloadError") => "Deleted, but the list could not be reloaded: {item}",
        (Locale::En, "deleting") => "Deleting…",
        _ => return None,
    };
    Some(text)
}

/// Entity labels as (singular, plural) per locale.
struct EntityLabels {
    key: &'static str,
    kz: (&'static str, &'static str),
    ru: (&'static str, &'static str),
    en: (&'static str, &'static str),
}

const ENTITIES: &[EntityLabels] = &[
    EntityLabels {
        key: "incomingInvoice",
        kz: ("кіріс жүкқұжаты", "кіріс жүкқұжаттары"),
        ru: ("приходная накладная", "приходные накладные"),
        en: ("incoming invoice", "incoming invoices"),
    },
    EntityLabels {
        key: "writeOff",
        kz: ("есептен шығару", "есептен шығарулар"),
        ru: ("списание", "списания"),
        en: ("write-off", "write-offs"),
    },
    EntityLabels {
        key: "movementDish",
        kz: ("орын ауыстыру", "орын ауыстырулар"),
        ru: ("перемещение", "перемещения"),
        en: ("movement", "movements"),
    },
    EntityLabels {
        key: "sellingDish",
        kz: ("сату", "сатулар"),
        ru: ("продажа", "продажи"),
        en: ("sale", "sales"),
    },
    EntityLabels {
        key: "dish",
        kz: ("тағам", "тағамдар"),
        ru: ("блюдо", "блюда"),
        en: ("dish", "dishes"),
    },
    EntityLabels {
        key: "student",
        kz: ("оқушы", "оқушылар"),
        ru: ("учащийся", "учащиеся"),
        en: ("student", "students"),
    },
    EntityLabels {
        key: "contractor",
        kz: ("контрагент", "контрагенттер"),
        ru: ("контрагент", "контрагенты"),
        en: ("contractor", "contractors"),
    },
    EntityLabels {
        key: "warehouse",
        kz: ("қойма", "қоймалар"),
        ru: ("склад", "склады"),
        en: ("warehouse", "warehouses"),
    },
    EntityLabels {
        key: "dishCategory",
        kz: ("тағам санаты", "тағам санаттары"),
        ru: ("категория блюд", "категории блюд"),
        en: ("dish category", "dish categories"),
    },
    EntityLabels {
        key: "measurementUnit",
        kz: ("өлшем бірлігі", "өлшем бірліктері"),
        ru: ("единица измерения", "единицы измерения"),
        en: ("measurement unit", "measurement units"),
    },
    EntityLabels {
        key: "writingOffReason",
        kz: ("есептен шығару себебі", "есептен шығару себептері"),
        ru: ("причина списания", "причины списания"),
        en: ("write-off reason", "write-off reasons"),
    },
];

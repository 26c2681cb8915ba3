use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lang {
    #[default]
    Ru,
    En,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.open" => if ru { "Открыть план..." } else { "Open Plan..." },
        "menu.open_title" => if ru { "Открыть JSON плана" } else { "Open Plan JSON" },
        "menu.save" => if ru { "Сохранить план..." } else { "Save Plan..." },
        "menu.save_title" => if ru { "Сохранить JSON плана" } else { "Save Plan JSON" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.reset_camera" => if ru { "Сбросить камеру  Home" } else { "Reset camera  Home" },
        "menu.grid" => if ru { "Сетка" } else { "Grid" },
        "menu.language" => if ru { "Язык" } else { "Language" },
        "menu.settings" => if ru { "Настройки..." } else { "Settings..." },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.grid" => if ru { "Сетка" } else { "Grid" },
        "settings.grid_visible" => if ru { "Показывать сетку" } else { "Show grid" },
        "settings.grid_size" => if ru { "Шаг" } else { "Cell size" },
        "settings.grid_range" => if ru { "Число линий" } else { "Line count" },
        "settings.grid_opacity" => if ru { "Прозрачность" } else { "Opacity" },
        "settings.camera" => if ru { "Камера" } else { "Camera" },
        "settings.fov" => if ru { "Угол обзора" } else { "Field of view" },
        "settings.orbit" => if ru { "Чувствительность вращения" } else { "Orbit sensitivity" },
        "settings.zoom" => if ru { "Чувствительность зума" } else { "Zoom sensitivity" },
        "settings.viewport" => if ru { "Вьюпорт" } else { "Viewport" },
        "settings.bg_color" => if ru { "Цвет фона" } else { "Background" },
        "settings.sel_color" => if ru { "Цвет выделения" } else { "Selection" },
        "settings.apply" => if ru { "Сохранить" } else { "Save" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Furniture types ─────────────────────────────────
        "type.sofa" => if ru { "Диван" } else { "Sofa" },
        "type.table" => if ru { "Стол" } else { "Table" },
        "type.wardrobe" => if ru { "Шкаф" } else { "Wardrobe" },
        "type.bed" => if ru { "Кровать" } else { "Bed" },
        "type.chair" => if ru { "Стул" } else { "Chair" },
        "type.other" => if ru { "Другое" } else { "Other" },

        // ── Toolbar ─────────────────────────────────────────
        "tb.type" => if ru { "Тип" } else { "Type" },
        "tb.add" => if ru { "Добавить объект" } else { "Add object" },
        "tb.rotate_left" => if ru { "⟲ Повернуть влево" } else { "⟲ Rotate left" },
        "tb.rotate_right" => if ru { "⟳ Повернуть вправо" } else { "⟳ Rotate right" },

        // ── Status bar ──────────────────────────────────────
        "status.elements" => if ru { "Элементы" } else { "Elements" },
        "status.objects" => if ru { "Объекты" } else { "Objects" },
        "status.selected" => if ru { "Выбран" } else { "Selected" },
        "status.none" => if ru { "нет" } else { "none" },
        "status.dragging" => if ru { "перетаскивание" } else { "dragging" },
        "status.pointer" => if ru { "Курсор" } else { "Pointer" },

        // ── Messages ────────────────────────────────────────
        "msg.load_failed" => if ru { "Не удалось загрузить план" } else { "Failed to load plan" },
        "msg.save_failed" => if ru { "Не удалось сохранить план" } else { "Failed to save plan" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

/// i18n key for a furniture type label
pub fn furniture_key(ty: plan_shared::FurnitureType) -> &'static str {
    use plan_shared::FurnitureType::*;
    match ty {
        Sofa => "type.sofa",
        Table => "type.table",
        Wardrobe => "type.wardrobe",
        Bed => "type.bed",
        Chair => "type.chair",
        Other => "type.other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_shared::FurnitureType;

    #[test]
    fn test_every_furniture_type_has_label() {
        for ty in FurnitureType::ALL {
            assert_ne!(t(furniture_key(ty)), "???");
        }
    }

    #[test]
    fn test_unknown_key_fallback() {
        assert_eq!(t("no.such.key"), "???");
    }
}

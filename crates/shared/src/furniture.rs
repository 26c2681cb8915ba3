use serde::{Deserialize, Serialize};

/// Категория мебели, доступная в селекторе типов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureType {
    #[default]
    Sofa,
    Table,
    Wardrobe,
    Bed,
    Chair,
    Other,
}

impl FurnitureType {
    /// Все категории в порядке отображения
    pub const ALL: [FurnitureType; 6] = [
        FurnitureType::Sofa,
        FurnitureType::Table,
        FurnitureType::Wardrobe,
        FurnitureType::Bed,
        FurnitureType::Chair,
        FurnitureType::Other,
    ];

    /// Строка, записываемая в поле `type` объекта
    pub fn as_str(&self) -> &'static str {
        match self {
            FurnitureType::Sofa => "sofa",
            FurnitureType::Table => "table",
            FurnitureType::Wardrobe => "wardrobe",
            FurnitureType::Bed => "bed",
            FurnitureType::Chair => "chair",
            FurnitureType::Other => "other",
        }
    }

    /// Категория по строке типа; неизвестные строки — `Other`
    pub fn from_type_str(s: &str) -> Self {
        match s {
            "sofa" => FurnitureType::Sofa,
            "table" => FurnitureType::Table,
            "wardrobe" => FurnitureType::Wardrobe,
            "bed" => FurnitureType::Bed,
            "chair" => FurnitureType::Chair,
            _ => FurnitureType::Other,
        }
    }
}

impl std::fmt::Display for FurnitureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

mod furniture;

pub use furniture::FurnitureType;

/// Уникальный идентификатор объекта мебели
pub type ObjectId = String;

/// Дополнительные поля, которые ядро не интерпретирует, но обязано сохранить
pub type ExtraFields = Map<String, Value>;

fn default_unit() -> String {
    "px".to_string()
}

/// Число из JSON или None: null, строки и прочие значения не ломают разбор документа
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

// ============================================================================
// Метаданные плана
// ============================================================================

/// Масштаб плана: сколько пикселей в одном метре
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanScale {
    /// Отсутствующее или нечисловое значение — масштаб по умолчанию
    #[serde(
        alias = "pxPerMeter",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub px_per_meter: Option<f64>,
}

/// Фон плана (подложка); ядро его только переносит
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanBackground {
    pub file_id: String,
    pub opacity: f64,
}

/// Метаданные плана: размер холста в пикселях и масштаб
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMeta {
    /// Ширина холста в пикселях
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Высота холста в пикселях
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<PlanScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<PlanBackground>,
    /// Высота потолка в метрах; ядро её только переносит
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_height_m: Option<f64>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Default for PlanMeta {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            unit: default_unit(),
            scale: None,
            background: None,
            ceiling_height_m: None,
            extra: ExtraFields::new(),
        }
    }
}

// ============================================================================
// Элементы плана (2D, в пикселях)
// ============================================================================

/// 2D-точка плана в пикселях.
///
/// Координата может отсутствовать или быть нечисловой: такая точка
/// разбирается, но при построении сцены пропускается.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Координаты, если обе заданы и конечны
    pub fn coords(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }

    /// Обе координаты заданы и конечны
    pub fn is_finite(&self) -> bool {
        self.coords().is_some()
    }
}

/// Тип элемента плана. Неизвестные строки сохраняются как есть.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Wall,
    Zone,
    Door,
    Window,
    Label,
    #[serde(untagged)]
    Other(String),
}

/// Геометрия элемента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementGeometry {
    /// Отрезок (стены, двери, окна)
    Segment {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<Point2>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<Point2>,
        /// Несущая стена (влияет только на материал)
        #[serde(
            rename = "loadBearing",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        load_bearing: Option<bool>,
        /// Поля геометрии, которые ядро не интерпретирует (например, `openings`)
        #[serde(flatten)]
        extra: ExtraFields,
    },
    /// Многоугольник (зоны)
    Polygon {
        #[serde(default)]
        points: Vec<Point2>,
        /// Тип зоны (влияет только на цвет)
        #[serde(rename = "zoneType", default, skip_serializing_if = "Option::is_none")]
        zone_type: Option<String>,
        #[serde(flatten)]
        extra: ExtraFields,
    },
    /// Точка (подписи)
    Point {
        #[serde(flatten)]
        at: Point2,
    },
}

/// Элемент плана
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub geometry: ElementGeometry,
    /// Флаг несущей стены на уровне элемента (запасной вариант)
    #[serde(rename = "loadBearing", default, skip_serializing_if = "Option::is_none")]
    pub load_bearing: Option<bool>,
    /// Тип зоны на уровне элемента (запасной вариант)
    #[serde(rename = "zoneType", default, skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl PlanElement {
    /// Элемент с пустыми дополнительными полями
    pub fn new(id: Option<String>, element_type: ElementType, geometry: ElementGeometry) -> Self {
        Self {
            id,
            element_type,
            geometry,
            load_bearing: None,
            zone_type: None,
            extra: ExtraFields::new(),
        }
    }

    /// Несущая ли стена: флаг геометрии, затем флаг элемента
    pub fn is_load_bearing(&self) -> bool {
        match &self.geometry {
            ElementGeometry::Segment {
                load_bearing: Some(flag),
                ..
            } => *flag,
            _ => self.load_bearing.unwrap_or(false),
        }
    }

    /// Тип зоны: из геометрии, затем из элемента
    pub fn zone_type(&self) -> Option<&str> {
        match &self.geometry {
            ElementGeometry::Polygon {
                zone_type: Some(zt),
                ..
            } => Some(zt.as_str()),
            _ => self.zone_type.as_deref(),
        }
    }
}

// ============================================================================
// Объекты мебели (3D, в метрах)
// ============================================================================

/// Вектор в метрах
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3d {
    pub const ONE: Vec3d = Vec3d {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Позиция объекта; `y` может отсутствовать (объект стоит на полу)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPosition {
    pub x: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub z: f64,
}

impl ObjectPosition {
    pub fn new(x: f64, y: Option<f64>, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Поворот объекта в радианах
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation3 {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Rotation3 {
    pub fn yaw(y: f64) -> Self {
        Self { x: 0.0, y, z: 0.0 }
    }
}

/// Размещённый объект мебели
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: ObjectId,
    /// Семантическая категория (используется только для цвета)
    #[serde(rename = "type")]
    pub object_type: String,
    pub position: ObjectPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec3d>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation3>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl PlacedObject {
    /// Размер объекта; единичный куб, если не задан
    pub fn size_or_default(&self) -> Vec3d {
        self.size.unwrap_or(Vec3d::ONE)
    }

    /// Поворот вокруг вертикальной оси; 0, если не задан
    pub fn rotation_y(&self) -> f64 {
        self.rotation.map(|r| r.y).unwrap_or(0.0)
    }

    /// Высота центра: заданная `position.y` или половина высоты объекта
    pub fn center_y(&self) -> f64 {
        self.position
            .y
            .unwrap_or_else(|| self.size_or_default().y / 2.0)
    }
}

// ============================================================================
// Документ плана
// ============================================================================

/// Документ плана — корневой агрегат, которым владеет внешняя сторона
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub meta: PlanMeta,
    #[serde(default)]
    pub elements: Vec<PlanElement>,
    #[serde(default)]
    pub objects3d: Vec<PlacedObject>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl PlanDocument {
    /// Пустой план заданного размера и масштаба
    pub fn new(width: f64, height: f64, px_per_meter: f64) -> Self {
        Self {
            meta: PlanMeta {
                width: Some(width),
                height: Some(height),
                scale: Some(PlanScale {
                    px_per_meter: Some(px_per_meter),
                }),
                ..PlanMeta::default()
            },
            ..Self::default()
        }
    }

    /// Разобрать документ из JSON
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid plan JSON: {e}"))
    }

    /// Сериализовать документ в форматированный JSON
    pub fn to_json_pretty(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize plan: {e}"))
    }

    /// Масштаб как он записан в документе (без подстановки значения по умолчанию)
    pub fn px_per_meter(&self) -> Option<f64> {
        self.meta.scale.as_ref().and_then(|s| s.px_per_meter)
    }

    /// Найти объект по ID
    pub fn find_object(&self, id: &str) -> Option<&PlacedObject> {
        self.objects3d.iter().find(|o| o.id == id)
    }

    /// Есть ли объект с таким ID
    pub fn contains_object(&self, id: &str) -> bool {
        self.find_object(id).is_some()
    }
}

//! Skin: per-class layout metrics, render layers and visual states, loaded from JSON.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::{Result, UiError};
use super::geom::{flag_ops, Alignment, Size};
use super::layout::Spacing;

const BUILTIN_SKIN: &str = include_str!("../../../assets/default_skin.json");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RenderLayers(u8);

impl RenderLayers {
    pub const NONE: Self = Self(0);
    pub const BACKGROUND: Self = Self(1);
    pub const ABOVE_BACKGROUND: Self = Self(2);
    pub const BELOW_FOREGROUND: Self = Self(4);
    pub const FOREGROUND: Self = Self(8);

    const NAMES: [(&'static str, RenderLayers); 4] = [
        ("BACKGROUND", Self::BACKGROUND),
        ("ABOVE_BACKGROUND", Self::ABOVE_BACKGROUND),
        ("BELOW_FOREGROUND", Self::BELOW_FOREGROUND),
        ("FOREGROUND", Self::FOREGROUND),
    ];
}

flag_ops!(RenderLayers);

impl TryFrom<Vec<String>> for RenderLayers {
    type Error = String;

    fn try_from(names: Vec<String>) -> std::result::Result<Self, Self::Error> {
        let mut layers = RenderLayers::NONE;
        for name in &names {
            let (_, layer) = Self::NAMES
                .iter()
                .find(|(n, _)| n == name)
                .ok_or_else(|| format!("unknown render layer {name}"))?;
            layers |= *layer;
        }
        Ok(layers)
    }
}

impl From<RenderLayers> for Vec<String> {
    fn from(layers: RenderLayers) -> Self {
        RenderLayers::NAMES
            .iter()
            .filter(|(_, l)| layers.contains(*l))
            .map(|(n, _)| n.to_string())
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontKind {
    Gui,
    Text,
    Code,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Key into `metrics.font.size`.
    pub size: String,
    #[serde(default)]
    pub halign: HAlign,
    #[serde(default)]
    pub valign: VAlign,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl TextStyle {
    pub fn alignment(&self) -> Alignment {
        let h = match self.halign {
            HAlign::Left => Alignment::LEFT,
            HAlign::Center => Alignment::CENTER,
            HAlign::Right => Alignment::RIGHT,
        };
        let v = match self.valign {
            VAlign::Top => Alignment::TOP,
            VAlign::Middle => Alignment::MIDDLE,
            VAlign::Bottom => Alignment::BOTTOM,
        };
        h | v
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub size: Size,
    pub margin: Spacing,
    pub padding: Spacing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualState {
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub backcolor: Option<Color>,
    #[serde(default)]
    pub bordercolor: Option<Color>,
    #[serde(default)]
    pub checkmark: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub render_layers: RenderLayers,
    pub style: TextStyle,
    pub layout: LayoutMetrics,
    /// Named visual states; `normal` is required.
    pub states: FxHashMap<String, VisualState>,
}

impl Element {
    /// The named state, falling back to `normal`.
    pub fn state(&self, name: &str) -> Option<&VisualState> {
        self.states.get(name).or_else(|| self.states.get("normal"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinMeta {
    pub name: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFace {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub is_sysfont: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub size: FxHashMap<String, u16>,
    pub gui: FontFace,
    pub text: FontFace,
    pub code: FontFace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultMetrics {
    pub size: Size,
    pub margin: Spacing,
    pub padding: Spacing,
    pub erase_color: Color,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub font: FontMetrics,
    pub default: DefaultMetrics,
}

/// A resolved font request handed to the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub family: String,
    pub px: u16,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    pub meta: SkinMeta,
    pub metrics: Metrics,
    pub elements: FxHashMap<String, Element>,
}

impl Skin {
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_SKIN)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let skin: Skin = serde_json::from_str(data)?;
        skin.validate()?;
        Ok(skin)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let skin = Self::from_json_str(&data)?;
        tracing::debug!(path = %path.display(), skin = %skin.meta.name, "skin loaded");
        Ok(skin)
    }

    pub fn validate(&self) -> Result<()> {
        for (class, element) in &self.elements {
            if !element.states.contains_key("normal") {
                return Err(UiError::Skin(format!("{class} has no normal state")));
            }
            if !self.metrics.font.size.contains_key(&element.style.size) {
                return Err(UiError::Skin(format!(
                    "{class} uses unknown font size {}",
                    element.style.size
                )));
            }
        }
        Ok(())
    }

    pub fn element(&self, class: &str) -> Result<&Element> {
        self.elements.get(class).ok_or_else(|| UiError::NoThemeEntry {
            class: class.to_string(),
            skin: self.meta.name.clone(),
        })
    }

    pub fn insert_element(&mut self, class: impl Into<String>, element: Element) {
        self.elements.insert(class.into(), element);
    }

    /// Layout metrics for `class`, or the skin defaults when it has no entry.
    pub fn layout_for(&self, class: &str) -> LayoutMetrics {
        match self.elements.get(class) {
            Some(element) => element.layout,
            None => LayoutMetrics {
                size: self.metrics.default.size,
                margin: self.metrics.default.margin,
                padding: self.metrics.default.padding,
            },
        }
    }

    pub fn erase_color(&self) -> Color {
        self.metrics.default.erase_color
    }

    pub fn font_face(&self, kind: FontKind) -> &FontFace {
        match kind {
            FontKind::Gui => &self.metrics.font.gui,
            FontKind::Text => &self.metrics.font.text,
            FontKind::Code => &self.metrics.font.code,
        }
    }

    pub fn font_for(&self, class: &str, kind: FontKind) -> Result<FontSpec> {
        let style = &self.element(class)?.style;
        let px = self
            .metrics
            .font
            .size
            .get(&style.size)
            .copied()
            .ok_or_else(|| UiError::Skin(format!("unknown font size {}", style.size)))?;
        Ok(FontSpec {
            family: self.font_face(kind).name.clone(),
            px,
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
        })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/theme.rs"]
mod tests;

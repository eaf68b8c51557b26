use crate::model::CellStyle;
use schemars::JsonSchema;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

/// Old and new raw values of one style property. `None` means the property was unset.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PropertyChange<T> {
    pub old: Option<T>,
    pub new: Option<T>,
}

impl<T: Clone + PartialEq> PropertyChange<T> {
    fn between(old: &Option<T>, new: &Option<T>) -> Option<Self> {
        if old == new {
            None
        } else {
            Some(Self {
                old: old.clone(),
                new: new.clone(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum StyleProperty {
    BackgroundColor,
    TextColor,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    FontSize,
    HorizontalAlign,
    Border,
}

/// The style properties that differ between two versions of a cell. Properties that
/// did not change are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StyleChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<PropertyChange<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<PropertyChange<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<PropertyChange<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<PropertyChange<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<PropertyChange<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<PropertyChange<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<PropertyChange<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_align: Option<PropertyChange<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<PropertyChange<serde_json::Value>>,
}

impl StyleChanges {
    pub fn is_empty(&self) -> bool {
        self.changed_properties().is_empty()
    }

    pub fn changed_properties(&self) -> Vec<StyleProperty> {
        let flags = [
            (StyleProperty::BackgroundColor, self.background_color.is_some()),
            (StyleProperty::TextColor, self.text_color.is_some()),
            (StyleProperty::Bold, self.bold.is_some()),
            (StyleProperty::Italic, self.italic.is_some()),
            (StyleProperty::Underline, self.underline.is_some()),
            (StyleProperty::Strikethrough, self.strikethrough.is_some()),
            (StyleProperty::FontSize, self.font_size.is_some()),
            (StyleProperty::HorizontalAlign, self.horizontal_align.is_some()),
            (StyleProperty::Border, self.border.is_some()),
        ];
        flags
            .into_iter()
            .filter_map(|(property, changed)| changed.then_some(property))
            .collect()
    }
}

/// Compares two optional styles property by property. A missing style is the same
/// as a style with nothing set. Values are compared raw: `"FF0000"` and `"ff0000"`
/// differ, and an unset `bold` differs from an explicit `false`.
pub fn diff_styles(old: Option<&CellStyle>, new: Option<&CellStyle>) -> Option<StyleChanges> {
    let empty = CellStyle::default();
    let old = old.unwrap_or(&empty);
    let new = new.unwrap_or(&empty);

    let changes = StyleChanges {
        background_color: PropertyChange::between(&old.background_color, &new.background_color),
        text_color: PropertyChange::between(&old.text_color, &new.text_color),
        bold: PropertyChange::between(&old.bold, &new.bold),
        italic: PropertyChange::between(&old.italic, &new.italic),
        underline: PropertyChange::between(&old.underline, &new.underline),
        strikethrough: PropertyChange::between(&old.strikethrough, &new.strikethrough),
        font_size: PropertyChange::between(&old.font_size, &new.font_size),
        horizontal_align: PropertyChange::between(&old.horizontal_align, &new.horizontal_align),
        border: PropertyChange::between(&old.border, &new.border),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes)
    }
}

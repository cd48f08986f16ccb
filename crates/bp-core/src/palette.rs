//! Wire and pin colors per category.

use crate::model::{PinCategory, PinProperty, Rgba8};

pub const BOOL: Rgba8 = Rgba8::rgb(146, 1, 1);
pub const FLOAT: Rgba8 = Rgba8::rgb(158, 250, 68);
pub const VECTOR: Rgba8 = Rgba8::rgb(253, 200, 35);
pub const ROTATOR: Rgba8 = Rgba8::rgb(159, 178, 253);
pub const STRUCT: Rgba8 = Rgba8::rgb(0, 88, 200);
pub const NAME: Rgba8 = Rgba8::rgb(150, 97, 185);
pub const OBJECT: Rgba8 = Rgba8::rgb(0, 133, 191);
pub const DEFAULT: Rgba8 = Rgba8::rgb(230, 230, 230);

/// Color the editor draws a pin (and its wires) in.
pub fn pin_color(pin: &PinProperty) -> Rgba8 {
    match &pin.category {
        Some(PinCategory::Bool) => BOOL,
        Some(c) if c.is_floating_point() => FLOAT,
        Some(PinCategory::Struct) => match pin.sub_category_class() {
            Some("/Script/CoreUObject.Vector") => VECTOR,
            Some("/Script/CoreUObject.Rotator") => ROTATOR,
            _ => STRUCT,
        },
        Some(PinCategory::Name) => NAME,
        Some(PinCategory::Object) => OBJECT,
        _ => DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeName;
    use crate::model::SubCategoryObject;

    fn pin(category: PinCategory, class: Option<&str>) -> PinProperty {
        let mut pin = PinProperty::new(NodeName::intern("K2Node_0"));
        pin.category = Some(category);
        pin.sub_category_object = class.map(|c| SubCategoryObject {
            type_name: "ScriptStruct".into(),
            class: c.into(),
        });
        pin
    }

    #[test]
    fn colors_by_category() {
        assert_eq!(pin_color(&pin(PinCategory::Bool, None)), BOOL);
        assert_eq!(pin_color(&pin(PinCategory::Float, None)), FLOAT);
        assert_eq!(pin_color(&pin(PinCategory::Real, None)), FLOAT);
        assert_eq!(pin_color(&pin(PinCategory::Name, None)), NAME);
        assert_eq!(pin_color(&pin(PinCategory::Object, None)), OBJECT);
        assert_eq!(pin_color(&pin(PinCategory::Exec, None)), DEFAULT);
        assert_eq!(
            pin_color(&PinProperty::new(NodeName::intern("K2Node_0"))),
            DEFAULT
        );
    }

    #[test]
    fn struct_colors_by_class() {
        let vector = pin(PinCategory::Struct, Some("/Script/CoreUObject.Vector"));
        let rotator = pin(PinCategory::Struct, Some("/Script/CoreUObject.Rotator"));
        let other = pin(PinCategory::Struct, Some("/Script/CoreUObject.Transform"));
        assert_eq!(pin_color(&vector), VECTOR);
        assert_eq!(pin_color(&rotator), ROTATOR);
        assert_eq!(pin_color(&other), STRUCT);
        assert_eq!(pin_color(&vector).to_hex(), "#FDC823");
    }
}

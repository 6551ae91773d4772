//! Fixed attribute values of the math markup schema.
//!
//! The string forms are exactly the values expected by consuming document software, so they
//! must not be changed.
#[cfg(feature = "serde")]
use serde::Serialize;

use strum_macros::IntoStaticStr;

/// `m:type` of a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FracType {
    #[strum(serialize = "bar")]
    Bar,
    #[strum(serialize = "noBar")]
    NoBar,
    #[strum(serialize = "lin")]
    Linear,
}

/// `m:limLoc` of an n-ary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum LimLoc {
    #[strum(serialize = "undOvr")]
    UnderOver,
    #[strum(serialize = "subSup")]
    SubSup,
}

/// `m:pos` of bars and grouping characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Position {
    #[strum(serialize = "top")]
    Top,
    #[strum(serialize = "bot")]
    Bottom,
}

impl Position {
    /// The vertical justification that keeps a grouping character attached to its base.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Position::Top => Position::Bottom,
            Position::Bottom => Position::Top,
        }
    }
}

/// `m:mcJc` of a matrix column and `m:jc` of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Justification {
    #[strum(serialize = "left")]
    Left,
    #[strum(serialize = "center")]
    Center,
    #[strum(serialize = "right")]
    Right,
}

/// On/off switch as used by `m:degHide`, `m:subHide` and friends.
#[inline]
pub fn on_off(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

bitflags::bitflags! {
    /// Properties of a `m:borderBox`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(Serialize))]
    pub struct BorderBoxFlags: u8 {
        const HIDE_TOP = 1 << 0;
        const HIDE_BOT = 1 << 1;
        const HIDE_LEFT = 1 << 2;
        const HIDE_RIGHT = 1 << 3;
        const STRIKE_BLTR = 1 << 4;
        const STRIKE_TLBR = 1 << 5;

        const HIDE_ALL = Self::HIDE_TOP.bits()
            | Self::HIDE_BOT.bits()
            | Self::HIDE_LEFT.bits()
            | Self::HIDE_RIGHT.bits();
    }
}

/// Element names for each flag, in schema order.
const BORDER_BOX_PROPERTIES: [(BorderBoxFlags, &str); 6] = [
    (BorderBoxFlags::HIDE_TOP, "hideTop"),
    (BorderBoxFlags::HIDE_BOT, "hideBot"),
    (BorderBoxFlags::HIDE_LEFT, "hideLeft"),
    (BorderBoxFlags::HIDE_RIGHT, "hideRight"),
    (BorderBoxFlags::STRIKE_BLTR, "strikeBLTR"),
    (BorderBoxFlags::STRIKE_TLBR, "strikeTLBR"),
];

impl BorderBoxFlags {
    /// The names of the property elements that are switched on.
    pub fn property_names(self) -> impl Iterator<Item = &'static str> {
        BORDER_BOX_PROPERTIES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_strings() {
        assert_eq!(<&str>::from(FracType::NoBar), "noBar");
        assert_eq!(<&str>::from(LimLoc::UnderOver), "undOvr");
        assert_eq!(<&str>::from(Position::Bottom), "bot");
        assert_eq!(<&str>::from(Justification::Center), "center");
    }

    #[test]
    fn border_box_property_order() {
        let flags = BorderBoxFlags::HIDE_ALL | BorderBoxFlags::STRIKE_TLBR;
        let names: Vec<_> = flags.property_names().collect();
        assert_eq!(
            names,
            ["hideTop", "hideBot", "hideLeft", "hideRight", "strikeTLBR"]
        );
        assert_eq!(BorderBoxFlags::empty().property_names().count(), 0);
    }
}

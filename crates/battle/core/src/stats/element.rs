use strum::{Display, EnumCount, EnumIter, EnumString};

/// Closed set of damage elements.
///
/// Six primaries combine pairwise into six secondaries. `Neutral` is neither.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    #[default]
    Neutral,

    // Primary
    Fire,
    Water,
    Earth,
    Air,
    Light,
    Dark,

    // Secondary
    Ice,
    Lightning,
    Sand,
    Steam,
    Life,
    Metal,
}

impl Element {
    /// Position in the resistance table.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_primary(self) -> bool {
        matches!(
            self,
            Self::Fire | Self::Water | Self::Earth | Self::Air | Self::Light | Self::Dark
        )
    }

    pub const fn is_secondary(self) -> bool {
        self.components().is_some()
    }

    /// The two primaries a secondary element is made of.
    pub const fn components(self) -> Option<(Element, Element)> {
        match self {
            Self::Ice => Some((Self::Air, Self::Water)),
            Self::Lightning => Some((Self::Air, Self::Fire)),
            Self::Sand => Some((Self::Air, Self::Earth)),
            Self::Steam => Some((Self::Water, Self::Fire)),
            Self::Life => Some((Self::Water, Self::Earth)),
            Self::Metal => Some((Self::Fire, Self::Earth)),
            _ => None,
        }
    }

    /// Secondary element formed by two primaries, in either order.
    pub fn combine(a: Element, b: Element) -> Option<Element> {
        use strum::IntoEnumIterator;

        Element::iter().find(|element| match element.components() {
            Some((x, y)) => (x == a && y == b) || (x == b && y == a),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_element_is_exactly_one_category() {
        for element in Element::iter() {
            let categories = [
                element == Element::Neutral,
                element.is_primary(),
                element.is_secondary(),
            ];
            assert_eq!(
                categories.iter().filter(|c| **c).count(),
                1,
                "{element} belongs to more than one category"
            );
        }
        assert_eq!(Element::iter().filter(|e| e.is_primary()).count(), 6);
        assert_eq!(Element::iter().filter(|e| e.is_secondary()).count(), 6);
    }

    #[test]
    fn secondaries_decompose_into_primaries() {
        for element in Element::iter().filter(|e| e.is_secondary()) {
            let (a, b) = element.components().unwrap();
            assert!(a.is_primary() && b.is_primary());
            assert_eq!(Element::combine(b, a), Some(element));
        }
        assert_eq!(Element::combine(Element::Fire, Element::Earth), Some(Element::Metal));
        assert_eq!(Element::combine(Element::Light, Element::Dark), None);
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!("lightning".parse::<Element>().unwrap(), Element::Lightning);
        assert_eq!(Element::Steam.to_string(), "steam");
    }
}

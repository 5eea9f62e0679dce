use serde::Serialize;

use crate::error::CardError;

/// Numeric template identifier as it appears in routes and stored drafts.
pub type TemplateId = u32;

/// A card design from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: &'static str,
    /// Gradient style token applied to the card front.
    pub theme: &'static str,
    pub emoji: &'static str,
}

/// Every template the app offers, ordered by id.
pub const CATALOG: [Template; 8] = [
    Template {
        id: 1,
        name: "Birthday Balloons",
        theme: "from-pink-400 to-purple-500",
        emoji: "🎈",
    },
    Template {
        id: 2,
        name: "Cake & Candles",
        theme: "from-yellow-400 to-orange-500",
        emoji: "🎂",
    },
    Template {
        id: 3,
        name: "Party Hat",
        theme: "from-blue-400 to-cyan-500",
        emoji: "🎉",
    },
    Template {
        id: 4,
        name: "Gift Box",
        theme: "from-green-400 to-teal-500",
        emoji: "🎁",
    },
    Template {
        id: 5,
        name: "Stars & Sparkles",
        theme: "from-purple-400 to-pink-500",
        emoji: "⭐",
    },
    Template {
        id: 6,
        name: "Flower Garden",
        theme: "from-rose-400 to-pink-500",
        emoji: "🌸",
    },
    Template {
        id: 7,
        name: "Ocean Waves",
        theme: "from-cyan-400 to-blue-500",
        emoji: "🌊",
    },
    Template {
        id: 8,
        name: "Sunset Glow",
        theme: "from-orange-400 to-red-500",
        emoji: "🌅",
    },
];

/// All templates, for the selection grid.
pub fn all() -> &'static [Template] {
    &CATALOG
}

/// Find a template by id.
pub fn lookup(id: TemplateId) -> Result<&'static Template, CardError> {
    CATALOG
        .iter()
        .find(|t| t.id == id)
        .ok_or(CardError::TemplateNotFound(id))
}

/// Parse a template id from a route segment such as `/customize/3`.
pub fn parse_route_id(segment: &str) -> Result<&'static Template, CardError> {
    let id = segment
        .trim()
        .parse::<TemplateId>()
        .map_err(|_| CardError::TemplateNotFound(0))?;
    lookup(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_every_catalog_id() {
        for id in 1..=8 {
            assert_eq!(lookup(id).unwrap().id, id);
        }
    }

    #[test]
    fn lookup_rejects_ids_outside_catalog() {
        assert_eq!(lookup(0), Err(CardError::TemplateNotFound(0)));
        assert_eq!(lookup(9), Err(CardError::TemplateNotFound(9)));
        assert!(lookup(u32::MAX).unwrap_err().is_not_found());
    }

    #[test]
    fn catalog_ids_are_unique_and_sorted() {
        let ids: Vec<_> = all().iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn route_segments() {
        assert_eq!(parse_route_id("2").unwrap().name, "Cake & Candles");
        assert!(parse_route_id("abc").is_err());
        assert!(parse_route_id("12").is_err());
    }
}

//! Placement id minting (`BBnnn`, `STRnnn`)

use super::ComponentType;

/// Id family with its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdFamily {
    /// `BB001`, `BB002`, …
    Busbar,
    /// `STR001`, `STR002`, …
    String,
}

impl IdFamily {
    /// Prefix of every id in the family
    pub fn prefix(&self) -> &'static str {
        match self {
            IdFamily::Busbar => "BB",
            IdFamily::String => "STR",
        }
    }

    /// Family that mints ids for a component type
    pub fn for_type(component_type: ComponentType) -> Option<Self> {
        match component_type {
            ComponentType::Busbar => Some(IdFamily::Busbar),
            ComponentType::String => Some(IdFamily::String),
            ComponentType::Other => None,
        }
    }

    /// Numeric suffix of `id` if it belongs to this family
    pub fn suffix_of(&self, id: &str) -> Option<u32> {
        let digits = id.strip_prefix(self.prefix())?;
        if digits.len() < 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Format an id, zero-padded to three digits
    pub fn format(&self, number: u32) -> String {
        format!("{}{:03}", self.prefix(), number)
    }
}

/// Highest numeric suffix ever seen or minted per family.
///
/// Kept in the document so an id freed by a removal is never handed out
/// again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdHighWater {
    busbar: u32,
    string: u32,
}

impl IdHighWater {
    /// Empty marks
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, family: IdFamily) -> &mut u32 {
        match family {
            IdFamily::Busbar => &mut self.busbar,
            IdFamily::String => &mut self.string,
        }
    }

    /// Current mark for a family
    pub fn get(&self, family: IdFamily) -> u32 {
        match family {
            IdFamily::Busbar => self.busbar,
            IdFamily::String => self.string,
        }
    }

    /// Raise the mark if `id` belongs to a family and exceeds it
    pub fn observe(&mut self, id: &str) {
        for family in [IdFamily::Busbar, IdFamily::String] {
            if let Some(number) = family.suffix_of(id) {
                let slot = self.slot(family);
                *slot = (*slot).max(number);
            }
        }
    }

    /// Next id of the family: `max(existing, mark) + 1`
    pub fn peek<'a, I>(&self, family: IdFamily, existing: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let max_existing = existing
            .into_iter()
            .filter_map(|id| family.suffix_of(id))
            .max()
            .unwrap_or(0);
        family.format(max_existing.max(self.get(family)) + 1)
    }

    /// Mint the next id and advance the mark
    pub fn mint<'a, I>(&mut self, family: IdFamily, existing: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let id = self.peek(family, existing);
        self.observe(&id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_parsing() {
        assert_eq!(IdFamily::Busbar.suffix_of("BB007"), Some(7));
        assert_eq!(IdFamily::String.suffix_of("STR120"), Some(120));
        assert_eq!(IdFamily::String.suffix_of("STR1234"), Some(1234));
        assert_eq!(IdFamily::Busbar.suffix_of("BBX01"), None);
        assert_eq!(IdFamily::Busbar.suffix_of("STR001"), None);
        assert_eq!(IdFamily::String.suffix_of("STR1"), None);
    }

    #[test]
    fn test_first_id_is_one() {
        let mut marks = IdHighWater::new();
        assert_eq!(marks.mint(IdFamily::Busbar, []), "BB001");
        assert_eq!(marks.mint(IdFamily::Busbar, []), "BB002");
    }

    #[test]
    fn test_next_after_existing_max() {
        let mut marks = IdHighWater::new();
        let id = marks.mint(IdFamily::String, ["STR003", "STR010", "BB050"]);
        assert_eq!(id, "STR011");
    }

    #[test]
    fn test_freed_id_not_reused() {
        let mut marks = IdHighWater::new();
        marks.observe("BB001");
        marks.observe("BB002");
        // BB002 was deleted; only BB001 remains
        assert_eq!(marks.mint(IdFamily::Busbar, ["BB001"]), "BB003");
    }
}

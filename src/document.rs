//! IDF document structure

use crate::catalog::CellTypeCatalog;
use crate::error::{IdfError, Result};
use crate::io::idf::section::SourceText;
use crate::model::{
    AngleHistory, BoardOutline, ComponentOutline, ComponentPlacement, ComponentType, IdFamily,
    IdHighWater, IdfHeader,
};
use crate::notification::NotificationCollection;
use crate::strings::{reconstruct, StringMetadata};
use crate::types::Handle;
use indexmap::{IndexMap, IndexSet};

/// A solar-panel layout: board outline, shared component outlines and their
/// placements.
///
/// The document is the only mutable aggregate. Outlines are keyed by name
/// and placements by id, both in file order. A name → ids index, one
/// rotation history per placement and one height flag per busbar are
/// maintained alongside and kept consistent by every edit.
#[derive(Debug, Clone)]
pub struct IdfDocument {
    /// Header fields as read
    pub header: IdfHeader,

    /// Notifications collected while reading
    pub notifications: NotificationCollection,

    board: Option<BoardOutline>,

    outlines: IndexMap<String, ComponentOutline>,

    placements: IndexMap<String, ComponentPlacement>,

    /// Outline name → ids of the placements that use it
    name_index: IndexMap<String, IndexSet<String>>,

    /// Placement id → submitted rotation angles
    histories: IndexMap<String, AngleHistory>,

    /// Busbar outline name → raised flag
    busbar_raised: IndexMap<String, bool>,

    id_marks: IdHighWater,

    /// Original text and section layout
    pub(crate) source: SourceText,

    /// Next handle to assign
    next_handle: u64,
}

impl IdfDocument {
    /// Create an empty document
    pub fn new() -> Self {
        IdfDocument {
            header: IdfHeader::default(),
            notifications: NotificationCollection::new(),
            board: None,
            outlines: IndexMap::new(),
            placements: IndexMap::new(),
            name_index: IndexMap::new(),
            histories: IndexMap::new(),
            busbar_raised: IndexMap::new(),
            id_marks: IdHighWater::new(),
            source: SourceText::default(),
            next_handle: 1,
        }
    }

    /// Allocate a new unique handle
    pub fn allocate_handle(&mut self) -> Handle {
        let handle = Handle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Get the next handle value (without allocating)
    pub fn next_handle(&self) -> u64 {
        self.next_handle
    }

    // ---- board ----

    /// The board outline, if the file has one
    pub fn board(&self) -> Option<&BoardOutline> {
        self.board.as_ref()
    }

    /// Replace the board outline
    pub fn set_board(&mut self, mut board: BoardOutline) -> Handle {
        if board.handle.is_null() {
            board.handle = self.allocate_handle();
        }
        let handle = board.handle;
        self.board = Some(board);
        handle
    }

    // ---- outlines ----

    /// Look up an outline by name
    pub fn outline(&self, name: &str) -> Option<&ComponentOutline> {
        self.outlines.get(name)
    }

    /// Look up an outline, failing with `NotFound`
    pub fn require_outline(&self, name: &str) -> Result<&ComponentOutline> {
        self.outlines
            .get(name)
            .ok_or_else(|| IdfError::outline_not_found(name))
    }

    pub(crate) fn outline_mut(&mut self, name: &str) -> Option<&mut ComponentOutline> {
        self.outlines.get_mut(name)
    }

    /// All outlines in file order
    pub fn outlines(&self) -> impl Iterator<Item = &ComponentOutline> {
        self.outlines.values()
    }

    pub fn outline_count(&self) -> usize {
        self.outlines.len()
    }

    /// Busbar outline names in file order
    pub fn busbar_names(&self) -> Vec<&str> {
        self.names_of(ComponentType::Busbar)
    }

    /// String outline names in file order
    pub fn string_names(&self) -> Vec<&str> {
        self.names_of(ComponentType::String)
    }

    fn names_of(&self, component_type: ComponentType) -> Vec<&str> {
        self.outlines
            .values()
            .filter(|o| o.component_type == component_type)
            .map(|o| o.name.as_str())
            .collect()
    }

    /// Register an outline. Names are unique.
    pub fn add_outline(&mut self, mut outline: ComponentOutline) -> Result<Handle> {
        if self.outlines.contains_key(&outline.name) {
            return Err(IdfError::Consistency(format!(
                "outline '{}' already exists",
                outline.name
            )));
        }
        if outline.handle.is_null() {
            outline.handle = self.allocate_handle();
        }
        let handle = outline.handle;
        if outline.component_type == ComponentType::Busbar {
            self.busbar_raised.entry(outline.name.clone()).or_insert(false);
        }
        self.outlines.insert(outline.name.clone(), outline);
        Ok(handle)
    }

    /// Remove an outline record and its height flag; placements are untouched
    pub(crate) fn take_outline(&mut self, name: &str) -> Option<ComponentOutline> {
        self.busbar_raised.shift_remove(name);
        self.name_index.shift_remove(name);
        self.outlines.shift_remove(name)
    }

    /// Re-key an outline in place, keeping its position in the registry
    pub(crate) fn rekey_outline(&mut self, old: &str, new: &str) {
        if let Some(index) = self.outlines.get_index_of(old) {
            if let Some((_, mut outline)) = self.outlines.shift_remove_index(index) {
                outline.name = new.to_string();
                self.outlines.shift_insert(index, new.to_string(), outline);
            }
        }
        if let Some(index) = self.busbar_raised.get_index_of(old) {
            if let Some((_, flag)) = self.busbar_raised.shift_remove_index(index) {
                self.busbar_raised.shift_insert(index, new.to_string(), flag);
            }
        }
        if let Some(ids) = self.name_index.shift_remove(old) {
            for id in &ids {
                if let Some(p) = self.placements.get_mut(id) {
                    p.name = new.to_string();
                }
            }
            self.name_index.insert(new.to_string(), ids);
        }
    }

    // ---- placements ----

    /// Look up a placement by id
    pub fn placement(&self, id: &str) -> Option<&ComponentPlacement> {
        self.placements.get(id)
    }

    /// Look up a placement, failing with `NotFound`
    pub fn require_placement(&self, id: &str) -> Result<&ComponentPlacement> {
        self.placements
            .get(id)
            .ok_or_else(|| IdfError::placement_not_found(id))
    }

    pub(crate) fn placement_mut(&mut self, id: &str) -> Option<&mut ComponentPlacement> {
        self.placements.get_mut(id)
    }

    /// All placements in file order
    pub fn placements(&self) -> impl Iterator<Item = &ComponentPlacement> {
        self.placements.values()
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Ids of the placements that instantiate `name`
    pub fn placement_ids_of(&self, name: &str) -> Vec<&str> {
        self.name_index
            .get(name)
            .map(|ids| ids.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Register a placement. Ids are unique and the outline must exist.
    pub fn add_placement(&mut self, mut placement: ComponentPlacement) -> Result<Handle> {
        if self.placements.contains_key(&placement.id) {
            return Err(IdfError::Consistency(format!(
                "placement id '{}' already exists",
                placement.id
            )));
        }
        let outline = self.require_outline(&placement.name)?;
        placement.component_type = outline.component_type;
        if placement.handle.is_null() {
            placement.handle = self.allocate_handle();
        }
        let handle = placement.handle;
        self.id_marks.observe(&placement.id);
        self.histories
            .insert(placement.id.clone(), AngleHistory::new(placement.placement.rotation));
        self.name_index
            .entry(placement.name.clone())
            .or_default()
            .insert(placement.id.clone());
        self.placements.insert(placement.id.clone(), placement);
        Ok(handle)
    }

    /// Remove a placement record, its history and its index entry
    pub(crate) fn take_placement(&mut self, id: &str) -> Option<ComponentPlacement> {
        let placement = self.placements.shift_remove(id)?;
        self.histories.shift_remove(id);
        if let Some(ids) = self.name_index.get_mut(&placement.name) {
            ids.shift_remove(id);
            if ids.is_empty() {
                self.name_index.shift_remove(&placement.name);
            }
        }
        Some(placement)
    }

    // ---- derived state ----

    /// Rotation history of a placement
    pub fn history(&self, id: &str) -> Option<&AngleHistory> {
        self.histories.get(id)
    }

    pub(crate) fn history_mut(&mut self, id: &str) -> Option<&mut AngleHistory> {
        self.histories.get_mut(id)
    }

    /// Height flag of a busbar outline
    pub fn is_busbar_raised(&self, name: &str) -> Option<bool> {
        self.busbar_raised.get(name).copied()
    }

    pub(crate) fn set_raised_flag(&mut self, name: &str, raised: bool) {
        if let Some(flag) = self.busbar_raised.get_mut(name) {
            *flag = raised;
        }
    }

    /// Id high-water marks
    pub fn id_marks(&self) -> IdHighWater {
        self.id_marks
    }

    /// The id the next added component of `family` will get
    pub fn next_id(&self, family: IdFamily) -> String {
        self.id_marks
            .peek(family, self.placements.keys().map(String::as_str))
    }

    pub(crate) fn mint_id(&mut self, family: IdFamily) -> String {
        let existing: Vec<&str> = self.placements.keys().map(String::as_str).collect();
        self.id_marks.mint(family, existing)
    }

    /// Reconstruct the parameters of every string outline, in file order
    pub fn string_metadata(
        &self,
        catalog: &CellTypeCatalog,
    ) -> Result<IndexMap<String, StringMetadata>> {
        self.outlines
            .values()
            .filter(|o| o.component_type == ComponentType::String)
            .map(|o| Ok((o.name.clone(), reconstruct(o, catalog)?)))
            .collect()
    }

    /// Check every structural invariant, reporting the first violation
    pub fn validate(&self) -> Result<()> {
        if let Some(board) = &self.board {
            if !board.is_closed() {
                return Err(IdfError::Consistency("board outline is not closed".into()));
            }
        }

        for (name, outline) in &self.outlines {
            if name != &outline.name {
                return Err(IdfError::Consistency(format!(
                    "outline registered as '{}' is named '{}'",
                    name, outline.name
                )));
            }
            if !outline.is_closed() {
                return Err(IdfError::Consistency(format!(
                    "outline '{}' is not closed",
                    name
                )));
            }
        }

        let mut expected: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
        for (id, placement) in &self.placements {
            if id != &placement.id {
                return Err(IdfError::Consistency(format!(
                    "placement registered as '{}' has id '{}'",
                    id, placement.id
                )));
            }
            let outline = self.outlines.get(&placement.name).ok_or_else(|| {
                IdfError::Consistency(format!(
                    "placement '{}' references missing outline '{}'",
                    id, placement.name
                ))
            })?;
            if outline.component_type != placement.component_type {
                return Err(IdfError::Consistency(format!(
                    "placement '{}' is a {} but outline '{}' is a {}",
                    id, placement.component_type, outline.name, outline.component_type
                )));
            }
            if !self.histories.contains_key(id) {
                return Err(IdfError::Consistency(format!(
                    "placement '{}' has no rotation history",
                    id
                )));
            }
            expected
                .entry(placement.name.as_str())
                .or_default()
                .insert(id.as_str());
        }

        if self.histories.len() != self.placements.len() {
            return Err(IdfError::Consistency(
                "rotation histories do not match placements".into(),
            ));
        }

        if expected.len() != self.name_index.len()
            || self.name_index.iter().any(|(name, ids)| {
                expected
                    .get(name.as_str())
                    .map_or(true, |e| e.len() != ids.len() || ids.iter().any(|id| !e.contains(id.as_str())))
            })
        {
            return Err(IdfError::Consistency(
                "name index does not match placements".into(),
            ));
        }

        for name in self.busbar_raised.keys() {
            match self.outlines.get(name) {
                Some(o) if o.component_type == ComponentType::Busbar => {}
                _ => {
                    return Err(IdfError::Consistency(format!(
                        "height flag for '{}' which is not a busbar outline",
                        name
                    )))
                }
            }
        }

        Ok(())
    }
}

impl Default for IdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlacementVector;

    fn busbar_doc() -> IdfDocument {
        let mut doc = IdfDocument::new();
        doc.add_outline(ComponentOutline::rectangle("sbar_001", 100.0, 6.0, 0.3))
            .unwrap();
        doc.add_placement(ComponentPlacement::new(
            "BB001",
            "sbar_001",
            ComponentType::Busbar,
            PlacementVector::new(0.0, 0.0, 0.0),
        ))
        .unwrap();
        doc
    }

    #[test]
    fn test_new_document() {
        let doc = IdfDocument::new();
        assert!(doc.board().is_none());
        assert_eq!(doc.outline_count(), 0);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_handles_are_unique() {
        let mut doc = IdfDocument::new();
        let a = doc.allocate_handle();
        let b = doc.allocate_handle();
        assert_ne!(a, b);
        assert_eq!(doc.next_handle(), b.value() + 1);
    }

    #[test]
    fn test_add_placement_updates_index() {
        let doc = busbar_doc();
        assert_eq!(doc.placement_ids_of("sbar_001"), vec!["BB001"]);
        assert_eq!(doc.history("BB001").unwrap().current(), 0.0);
        assert_eq!(doc.is_busbar_raised("sbar_001"), Some(false));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_duplicate_outline_rejected() {
        let mut doc = busbar_doc();
        let err = doc
            .add_outline(ComponentOutline::rectangle("sbar_001", 1.0, 1.0, 0.3))
            .unwrap_err();
        assert!(matches!(err, IdfError::Consistency(_)));
    }

    #[test]
    fn test_placement_needs_outline() {
        let mut doc = IdfDocument::new();
        let err = doc
            .add_placement(ComponentPlacement::new(
                "STR001",
                "String X",
                ComponentType::String,
                PlacementVector::new(0.0, 0.0, 0.0),
            ))
            .unwrap_err();
        assert!(matches!(err, IdfError::NotFound { kind: "outline", .. }));
    }

    #[test]
    fn test_next_id_uses_high_water() {
        let mut doc = busbar_doc();
        assert_eq!(doc.next_id(IdFamily::Busbar), "BB002");
        doc.take_placement("BB001");
        assert_eq!(doc.next_id(IdFamily::Busbar), "BB002");
        assert_eq!(doc.next_id(IdFamily::String), "STR001");
    }

    #[test]
    fn test_rekey_keeps_position() {
        let mut doc = busbar_doc();
        doc.add_outline(ComponentOutline::rectangle("sbar_002", 50.0, 6.0, 0.3))
            .unwrap();
        doc.rekey_outline("sbar_001", "sbar_left");
        assert_eq!(doc.busbar_names(), vec!["sbar_left", "sbar_002"]);
        assert_eq!(doc.placement("BB001").unwrap().name, "sbar_left");
        assert_eq!(doc.placement_ids_of("sbar_left"), vec!["BB001"]);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_validate_detects_dangling_placement() {
        let mut doc = busbar_doc();
        doc.outlines.shift_remove("sbar_001");
        assert!(matches!(doc.validate(), Err(IdfError::Consistency(_))));
    }
}

//! Per-player piece catalogs

use crate::error::StructureError;
use crate::piece::{Owner, PieceDef};
use indexmap::IndexMap;
use log::debug;

/// Piece templates and the two players' copies, in registration order
#[derive(Debug, Clone, Default)]
pub struct PlayerDef {
    templates: IndexMap<String, PieceDef>,
    player_one: IndexMap<String, PieceDef>,
    player_two: IndexMap<String, PieceDef>,
}

impl PlayerDef {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template and give each player an independent copy of it
    ///
    /// # Errors
    ///
    /// Fails on a name that is already registered or if a copy is not independent.
    pub fn register(&mut self, template: PieceDef) -> Result<(), StructureError> {
        let name = template.props.name.clone();
        if self.templates.contains_key(&name) {
            return Err(StructureError::DuplicatePiece { piece: name });
        }

        let first = template.duplicate_for(Owner::PlayerOne)?;
        let second = template.duplicate_for(Owner::PlayerTwo)?;
        if first.shares_storage_with(&second) {
            return Err(StructureError::CloneIntegrity {
                piece: name,
                owner: Owner::PlayerTwo,
            });
        }

        debug!(
            "registered piece `{name}` with {} start positions per player",
            template.props.start_positions.len()
        );
        self.player_one.insert(name.clone(), first);
        self.player_two.insert(name.clone(), second);
        self.templates.insert(name, template);
        Ok(())
    }

    /// Catalog of one owner
    pub fn pieces(&self, owner: Owner) -> &IndexMap<String, PieceDef> {
        match owner {
            Owner::Template => &self.templates,
            Owner::PlayerOne => &self.player_one,
            Owner::PlayerTwo => &self.player_two,
        }
    }

    pub(crate) fn pieces_mut(&mut self, owner: Owner) -> &mut IndexMap<String, PieceDef> {
        match owner {
            Owner::Template => &mut self.templates,
            Owner::PlayerOne => &mut self.player_one,
            Owner::PlayerTwo => &mut self.player_two,
        }
    }

    /// Definition of `name` owned by `owner`
    pub fn piece(&self, owner: Owner, name: &str) -> Option<&PieceDef> {
        self.pieces(owner).get(name)
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no template is registered
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

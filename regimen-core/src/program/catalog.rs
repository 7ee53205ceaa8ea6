//! Program catalog
//!
//! Ordered collection of programs, looked up by id. The catalog owner
//! builds a new one on every change and hands it to the flow control whole.

use heapless::Vec;

use super::Program;

/// Maximum programs per catalog
pub const MAX_PROGRAMS: usize = 16;

/// Errors raised while building a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// A program with the same id is already present
    DuplicateId,
    /// More than [`MAX_PROGRAMS`] programs
    Full,
}

/// Immutable snapshot of every known program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    programs: Vec<Program, MAX_PROGRAMS>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            programs: Vec::new(),
        }
    }

    /// Build a catalog from programs in display order
    pub fn from_programs<I>(programs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Program>,
    {
        let mut catalog = Self::new();
        for program in programs {
            catalog.insert(program)?;
        }
        Ok(catalog)
    }

    /// Append a program
    pub fn insert(&mut self, program: Program) -> Result<(), CatalogError> {
        if self.contains(program.id()) {
            return Err(CatalogError::DuplicateId);
        }
        self.programs.push(program).map_err(|_| CatalogError::Full)
    }

    /// Look up a program by id
    pub fn get(&self, id: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.id() == id)
    }

    /// Whether a program with `id` exists
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Display position of a program
    pub fn position(&self, id: &str) -> Option<usize> {
        self.programs.iter().position(|p| p.id() == id)
    }

    /// Programs in display order
    pub fn iter(&self) -> impl Iterator<Item = &Program> {
        self.programs.iter()
    }

    /// Program ids in display order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.programs.iter().map(Program::id)
    }

    /// Number of programs
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether the catalog holds no program
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

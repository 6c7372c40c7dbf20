//! Lumber package models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{calculate_board_feet, classify_length, LengthCategory};
use crate::constants::{DISPATCHED_DESTINATION, STOCK_DESTINATION};
use crate::error::{DomainError, DomainResult};
use crate::validation::{validate_content_line, validate_package_id};

/// One length group inside a package
///
/// `board_feet` is derived from `length` and `piece_count` and is recomputed
/// whenever either changes. Incoming JSON never sets it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ContentLineInput")]
pub struct ContentLine {
    /// Length in feet (7-20 for this product line)
    length: i32,
    piece_count: i32,
    board_feet: Decimal,
}

/// Wire shape of a content line
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContentLineInput {
    pub length: i32,
    pub piece_count: i32,
}

impl ContentLine {
    pub fn new(length: i32, piece_count: i32) -> Self {
        Self {
            length,
            piece_count,
            board_feet: calculate_board_feet(length, piece_count),
        }
    }

    pub fn length(&self) -> i32 {
        self.length
    }

    pub fn piece_count(&self) -> i32 {
        self.piece_count
    }

    pub fn board_feet(&self) -> Decimal {
        self.board_feet
    }

    pub fn category(&self) -> LengthCategory {
        classify_length(self.length)
    }

    pub fn set_length(&mut self, length: i32) {
        self.length = length;
        self.board_feet = calculate_board_feet(self.length, self.piece_count);
    }

    pub fn set_piece_count(&mut self, piece_count: i32) {
        self.piece_count = piece_count;
        self.board_feet = calculate_board_feet(self.length, self.piece_count);
    }

    /// Lines with no length or no pieces are never persisted
    pub fn is_valid(&self) -> bool {
        self.length != 0 && self.piece_count != 0
    }
}

impl From<ContentLineInput> for ContentLine {
    fn from(input: ContentLineInput) -> Self {
        Self::new(input.length, input.piece_count)
    }
}

/// Where a package currently sits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination<'a> {
    Stock,
    Dispatched,
    Load(&'a str),
}

/// A bundle of boards, moved between free stock and loads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PackageDraft")]
pub struct Package {
    /// Identifier in `PT-<n>` form, immutable once assigned
    pub id: String,
    /// Load name or [`STOCK_DESTINATION`]
    pub destination: String,
    pub species: String,
    pub finish: String,
    pub certification: String,
    pub packed_on: Option<NaiveDate>,
    content: Vec<ContentLine>,
    total_board_feet: Decimal,
}

/// Everything needed to build a [`Package`]; derived values are not part of it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageDraft {
    pub id: String,
    pub destination: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub finish: String,
    #[serde(default)]
    pub certification: String,
    #[serde(default)]
    pub packed_on: Option<NaiveDate>,
    #[serde(default)]
    pub content: Vec<ContentLine>,
}

impl PackageDraft {
    pub fn new(id: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }

    pub fn line(mut self, length: i32, piece_count: i32) -> Self {
        self.content.push(ContentLine::new(length, piece_count));
        self
    }
}

impl Package {
    /// Build a package, dropping empty lines and computing the total
    pub fn build(draft: PackageDraft) -> Self {
        let mut package = Self {
            id: draft.id,
            destination: draft.destination,
            species: draft.species,
            finish: draft.finish,
            certification: draft.certification,
            packed_on: draft.packed_on,
            content: Vec::new(),
            total_board_feet: Decimal::ZERO,
        };
        package.set_content(draft.content);
        package
    }

    /// Build a package after checking its id and every content line
    pub fn try_build(draft: PackageDraft) -> DomainResult<Self> {
        validate_package_id(&draft.id).map_err(|reason| DomainError::InvalidPackageId {
            id: draft.id.clone(),
            reason,
        })?;

        for line in draft.content.iter().filter(|line| line.is_valid()) {
            validate_content_line(line.length(), line.piece_count()).map_err(|reason| {
                DomainError::InvalidContentLine {
                    length: line.length(),
                    piece_count: line.piece_count(),
                    reason,
                }
            })?;
        }

        let package = Self::build(draft);
        if package.content.is_empty() {
            return Err(DomainError::EmptyPackage { id: package.id });
        }
        Ok(package)
    }

    pub fn content(&self) -> &[ContentLine] {
        &self.content
    }

    pub fn total_board_feet(&self) -> Decimal {
        self.total_board_feet
    }

    /// Replace the whole content and recompute the total
    pub fn set_content(&mut self, content: Vec<ContentLine>) {
        self.content = content.into_iter().filter(ContentLine::is_valid).collect();
        self.total_board_feet = self.content.iter().map(ContentLine::board_feet).sum();
    }

    pub fn piece_count(&self) -> i64 {
        self.content.iter().map(|line| i64::from(line.piece_count())).sum()
    }

    pub fn destination(&self) -> Destination<'_> {
        match self.destination.as_str() {
            STOCK_DESTINATION => Destination::Stock,
            DISPATCHED_DESTINATION => Destination::Dispatched,
            name => Destination::Load(name),
        }
    }
}

impl From<PackageDraft> for Package {
    fn from(draft: PackageDraft) -> Self {
        Self::build(draft)
    }
}

//! # Entity Tags for NER Annotation
//!
//! Defines the tag set for sequence labeling of e-commerce messages.
//! Uses the BIO (Begin-Inside-Outside) tagging scheme.

use std::fmt;

/// BIO tags for labeling tokens in e-commerce messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    // Product entity
    BeginProduct,
    InsideProduct,
    // Location entity
    BeginLocation,
    InsideLocation,
    // Price entity
    BeginPrice,
    InsidePrice,
    // Contact info entity
    BeginContact,
    InsideContact,
    // Outside (irrelevant token)
    Outside,
}

impl EntityTag {
    /// Total number of distinct tags.
    pub const NUM_TAGS: usize = 9;

    /// Get all possible tags in order.
    pub fn all_tags() -> &'static [EntityTag] {
        &[
            EntityTag::Outside,
            EntityTag::BeginProduct,
            EntityTag::InsideProduct,
            EntityTag::BeginLocation,
            EntityTag::InsideLocation,
            EntityTag::BeginPrice,
            EntityTag::InsidePrice,
            EntityTag::BeginContact,
            EntityTag::InsideContact,
        ]
    }

    /// Parse a tag from its CoNLL column form.
    ///
    /// Matching is exact and case-sensitive: `parse` accepts precisely the
    /// strings that [`fmt::Display`] produces, nothing else.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "O" => Some(EntityTag::Outside),
            "B-PRODUCT" => Some(EntityTag::BeginProduct),
            "I-PRODUCT" => Some(EntityTag::InsideProduct),
            "B-LOC" => Some(EntityTag::BeginLocation),
            "I-LOC" => Some(EntityTag::InsideLocation),
            "B-PRICE" => Some(EntityTag::BeginPrice),
            "I-PRICE" => Some(EntityTag::InsidePrice),
            "B-CONTACT_INFO" => Some(EntityTag::BeginContact),
            "I-CONTACT_INFO" => Some(EntityTag::InsideContact),
            _ => None,
        }
    }

    /// Check if this is a "Begin" tag.
    pub fn is_begin(&self) -> bool {
        matches!(
            self,
            EntityTag::BeginProduct
                | EntityTag::BeginLocation
                | EntityTag::BeginPrice
                | EntityTag::BeginContact
        )
    }

    /// Check if this is an "Inside" tag.
    pub fn is_inside(&self) -> bool {
        matches!(
            self,
            EntityTag::InsideProduct
                | EntityTag::InsideLocation
                | EntityTag::InsidePrice
                | EntityTag::InsideContact
        )
    }

    /// Get the entity kind for this tag.
    pub fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            EntityTag::BeginProduct | EntityTag::InsideProduct => Some(EntityKind::Product),
            EntityTag::BeginLocation | EntityTag::InsideLocation => Some(EntityKind::Location),
            EntityTag::BeginPrice | EntityTag::InsidePrice => Some(EntityKind::Price),
            EntityTag::BeginContact | EntityTag::InsideContact => Some(EntityKind::Contact),
            EntityTag::Outside => None,
        }
    }

    /// Check if transitioning from `from` tag to `to` tag is valid.
    ///
    /// An `I-*` tag may only follow a `B-*` or `I-*` tag of the same entity;
    /// every other transition is allowed.
    pub fn is_valid_transition(from: EntityTag, to: EntityTag) -> bool {
        if !to.is_inside() {
            return true;
        }
        from.entity_kind() == to.entity_kind()
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityTag::BeginProduct => write!(f, "B-PRODUCT"),
            EntityTag::InsideProduct => write!(f, "I-PRODUCT"),
            EntityTag::BeginLocation => write!(f, "B-LOC"),
            EntityTag::InsideLocation => write!(f, "I-LOC"),
            EntityTag::BeginPrice => write!(f, "B-PRICE"),
            EntityTag::InsidePrice => write!(f, "I-PRICE"),
            EntityTag::BeginContact => write!(f, "B-CONTACT_INFO"),
            EntityTag::InsideContact => write!(f, "I-CONTACT_INFO"),
            EntityTag::Outside => write!(f, "O"),
        }
    }
}

/// Entity kinds annotated in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    Location,
    Price,
    Contact,
}
